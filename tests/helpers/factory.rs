pub use super::factories::{
    DictionaryFactory, ParsedRowFactory, RawRecordFactory, SliceFactory, TableSchemaFactory,
};

use crate::engine::core::dict::Dictionary;
use crate::engine::core::parse::{ParsedRow, RawRecord};
use crate::engine::schema::TableSchema;

pub struct Factory;

impl Factory {
    pub fn table_schema() -> TableSchemaFactory {
        TableSchemaFactory::new()
    }

    pub fn slice() -> SliceFactory {
        SliceFactory::new()
    }

    pub fn raw_batch(lines: &[&str]) -> Vec<RawRecord> {
        RawRecordFactory::new().create_batch(lines)
    }

    pub fn raw_batch_at(start_offset: u64, lines: &[&str]) -> Vec<RawRecord> {
        RawRecordFactory::new()
            .starting_at(start_offset)
            .create_batch(lines)
    }

    pub fn parsed_rows(schema: &TableSchema, lines: &[&str]) -> Vec<ParsedRow> {
        ParsedRowFactory::new(schema).create_batch(lines)
    }

    pub fn dictionary(values: &[&str]) -> Dictionary {
        DictionaryFactory::new().with_values(values).create()
    }
}
