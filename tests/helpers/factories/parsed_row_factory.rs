use crate::engine::core::parse::{ParsedRow, RecordParser};
use crate::engine::schema::TableSchema;

use super::RawRecordFactory;

/// Runs payload lines through the real parser against a schema.
pub struct ParsedRowFactory<'a> {
    schema: &'a TableSchema,
}

impl<'a> ParsedRowFactory<'a> {
    pub fn new(schema: &'a TableSchema) -> Self {
        Self { schema }
    }

    pub fn create_batch(&self, lines: &[&str]) -> Vec<ParsedRow> {
        let parser = RecordParser::new(self.schema);
        RawRecordFactory::new()
            .create_batch(lines)
            .iter()
            .map(|record| parser.parse(record).unwrap())
            .collect()
    }
}
