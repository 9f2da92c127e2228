use tracing::warn;

use crate::engine::core::parse::RawRecord;
use crate::engine::errors::BuildError;
use crate::engine::schema::TableSchema;

/// Field delimiter of the source text format. There is no quoting or
/// escaping; a delimiter inside a value shifts the field count and the
/// record is rejected.
pub const FIELD_DELIMITER: char = ',';

/// Cells of one record, in schema column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRow {
    cells: Vec<String>,
}

impl ParsedRow {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    pub fn cell(&self, ordinal: usize) -> &str {
        &self.cells[ordinal]
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Splits raw payloads into cells and checks them against the schema.
pub struct RecordParser<'a> {
    schema: &'a TableSchema,
}

impl<'a> RecordParser<'a> {
    pub fn new(schema: &'a TableSchema) -> Self {
        Self { schema }
    }

    /// Split one payload on the delimiter. A cell count that does not match
    /// the schema aborts the batch; a partially parsed row must never reach
    /// the encoder.
    pub fn parse(&self, record: &RawRecord) -> Result<ParsedRow, BuildError> {
        let text = String::from_utf8_lossy(&record.payload);
        let cells: Vec<String> = text.split(FIELD_DELIMITER).map(str::to_string).collect();

        let expected = self.schema.column_count();
        if cells.len() != expected {
            warn!(
                target: "sliceforge::parse",
                offset = record.offset,
                expected,
                actual = cells.len(),
                "Rejecting record with wrong field count"
            );
            return Err(BuildError::ColumnCountMismatch {
                expected,
                actual: cells.len(),
                offset: record.offset,
            });
        }

        Ok(ParsedRow::new(cells))
    }
}
