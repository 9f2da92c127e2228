pub mod raw_record;
pub mod record_parser;

pub use raw_record::RawRecord;
pub use record_parser::{FIELD_DELIMITER, ParsedRow, RecordParser};
