use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::debug;

use crate::engine::core::dict::Dictionary;
use crate::engine::core::parse::ParsedRow;
use crate::engine::errors::BuildError;
use crate::engine::schema::TableSchema;

/// The dictionaries of one batch, keyed by dimension column name. Every
/// dimension column of the schema has an entry, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalDictionaries {
    by_column: HashMap<String, Dictionary>,
}

impl LocalDictionaries {
    pub fn from_map(by_column: HashMap<String, Dictionary>) -> Self {
        Self { by_column }
    }

    pub fn get(&self, column: &str) -> Option<&Dictionary> {
        self.by_column.get(column)
    }

    pub fn len(&self) -> usize {
        self.by_column.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_column.is_empty()
    }
}

/// One pass over a parsed batch: collect distinct values per dimension
/// column, then freeze them into sorted dictionaries.
pub struct DictionaryBuilder<'a> {
    schema: &'a TableSchema,
}

impl<'a> DictionaryBuilder<'a> {
    /// Longest dimension value that still fits a blob length prefix.
    pub const MAX_VALUE_LEN: usize = u16::MAX as usize;

    pub fn new(schema: &'a TableSchema) -> Self {
        Self { schema }
    }

    pub fn collect(&self, rows: &[ParsedRow]) -> Result<LocalDictionaries, BuildError> {
        let mut distinct: BTreeMap<&str, BTreeSet<&str>> = self
            .schema
            .dimension_columns()
            .map(|col| (col.name.as_str(), BTreeSet::new()))
            .collect();

        for row in rows {
            for (ordinal, cell) in row.cells().iter().enumerate() {
                if !self.schema.is_dimension(ordinal) {
                    continue;
                }
                let name = self.schema.columns()[ordinal].name.as_str();
                if cell.len() > Self::MAX_VALUE_LEN {
                    return Err(BuildError::ValueTooLong {
                        column: name.to_string(),
                        len: cell.len(),
                    });
                }
                if let Some(values) = distinct.get_mut(name) {
                    values.insert(cell.as_str());
                }
            }
        }

        let by_column: HashMap<String, Dictionary> = distinct
            .into_iter()
            .map(|(name, values)| {
                let owned: BTreeSet<String> = values.into_iter().map(str::to_string).collect();
                (name.to_string(), Dictionary::from_distinct(owned))
            })
            .collect();

        debug!(
            target: "sliceforge::dict",
            columns = by_column.len(),
            rows = rows.len(),
            "Built batch dictionaries"
        );

        Ok(LocalDictionaries::from_map(by_column))
    }
}
