pub mod dictionary_factory;
pub mod parsed_row_factory;
pub mod raw_record_factory;
pub mod slice_factory;
pub mod table_schema_factory;

pub use dictionary_factory::DictionaryFactory;
pub use parsed_row_factory::ParsedRowFactory;
pub use raw_record_factory::RawRecordFactory;
pub use slice_factory::SliceFactory;
pub use table_schema_factory::TableSchemaFactory;

#[cfg(test)]
mod raw_record_factory_test;
#[cfg(test)]
mod slice_factory_test;
#[cfg(test)]
mod table_schema_factory_test;
