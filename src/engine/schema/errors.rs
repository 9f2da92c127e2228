use std::fmt;

#[derive(Debug, PartialEq, Eq)]
pub enum SchemaError {
    /// Schema has no columns
    EmptySchema,

    /// Column name appears more than once
    DuplicateColumn(String),

    /// Column name is empty
    EmptyColumnName,

    /// Column type spec string is not recognized
    UnknownColumnSpec(String),

    /// More columns than a store key ordinal can address
    TooManyColumns(usize),
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::EmptySchema => write!(f, "Schema cannot be empty"),
            SchemaError::DuplicateColumn(name) => {
                write!(f, "Column '{}' declared more than once", name)
            }
            SchemaError::EmptyColumnName => write!(f, "Column name cannot be empty"),
            SchemaError::UnknownColumnSpec(spec) => {
                write!(f, "Unknown column type spec '{}'", spec)
            }
            SchemaError::TooManyColumns(count) => {
                write!(
                    f,
                    "Schema has {} columns, at most {} fit a store key ordinal",
                    count,
                    (u16::MAX as usize) + 1
                )
            }
        }
    }
}

impl std::error::Error for SchemaError {}
