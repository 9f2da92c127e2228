use serde::{Deserialize, Serialize};

use crate::engine::schema::errors::SchemaError;

/// Fixed-width storage type of a metric column.
/// - Accepts common aliases in specs (e.g., "int", "long" -> I64)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricType {
    I64,
    U64,
    F64,
    Bool,
}

impl MetricType {
    /// Parse one primitive/alias (e.g., "bigint" -> I64, "double" -> F64).
    pub fn from_primitive_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "i64" | "int64" | "int" | "integer" | "bigint" | "long" => Some(MetricType::I64),
            "u64" | "uint64" => Some(MetricType::U64),
            "f64" | "float" | "double" | "number" => Some(MetricType::F64),
            "bool" | "boolean" => Some(MetricType::Bool),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            MetricType::I64 => "i64",
            MetricType::U64 => "u64",
            MetricType::F64 => "f64",
            MetricType::Bool => "bool",
        }
    }
}

/// Role of a column inside a record: dictionary-coded dimension or
/// fixed-width metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    Dimension,
    Metric(MetricType),
}

impl ColumnKind {
    pub fn is_dimension(&self) -> bool {
        matches!(self, ColumnKind::Dimension)
    }

    pub fn is_metric(&self) -> bool {
        matches!(self, ColumnKind::Metric(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    pub kind: ColumnKind,
}

impl ColumnDescriptor {
    pub fn dimension(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Dimension,
        }
    }

    pub fn metric(name: impl Into<String>, metric: MetricType) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Metric(metric),
        }
    }

    /// Parse a column from a `(name, type spec)` pair. "dim"/"dimension"
    /// marks a dimension column, anything else must be a metric type alias.
    pub fn from_spec(name: impl Into<String>, spec: &str) -> Result<Self, SchemaError> {
        let kind = match spec.to_ascii_lowercase().as_str() {
            "dim" | "dimension" | "string" | "str" | "text" | "varchar" => ColumnKind::Dimension,
            other => match MetricType::from_primitive_str(other) {
                Some(metric) => ColumnKind::Metric(metric),
                None => return Err(SchemaError::UnknownColumnSpec(spec.to_string())),
            },
        };
        Ok(Self {
            name: name.into(),
            kind,
        })
    }
}

/// Ordered column layout of one table. Column order is the field order of
/// the delimited source records and the ordinal order of the store keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    columns: Vec<ColumnDescriptor>,
}

impl TableSchema {
    /// Hard cap on columns: every ordinal must fit the u16 column slot of a
    /// store key, or two columns would collide on the same key.
    pub const MAX_COLUMNS: usize = (u16::MAX as usize) + 1;

    pub fn new(columns: Vec<ColumnDescriptor>) -> Result<Self, SchemaError> {
        if columns.is_empty() {
            return Err(SchemaError::EmptySchema);
        }
        if columns.len() > Self::MAX_COLUMNS {
            return Err(SchemaError::TooManyColumns(columns.len()));
        }
        let mut seen = std::collections::HashSet::with_capacity(columns.len());
        for col in &columns {
            if col.name.is_empty() {
                return Err(SchemaError::EmptyColumnName);
            }
            if !seen.insert(col.name.as_str()) {
                return Err(SchemaError::DuplicateColumn(col.name.clone()));
            }
        }
        Ok(Self { columns })
    }

    /// Build a schema from `(name, type spec)` pairs.
    pub fn from_specs(specs: &[(&str, &str)]) -> Result<Self, SchemaError> {
        let mut columns = Vec::with_capacity(specs.len());
        for (name, spec) in specs {
            columns.push(ColumnDescriptor::from_spec(*name, spec)?);
        }
        Self::new(columns)
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn column(&self, ordinal: usize) -> Option<&ColumnDescriptor> {
        self.columns.get(ordinal)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_dimension(&self, ordinal: usize) -> bool {
        self.columns
            .get(ordinal)
            .is_some_and(|c| c.kind.is_dimension())
    }

    pub fn dimension_columns(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.columns.iter().filter(|c| c.kind.is_dimension())
    }
}
