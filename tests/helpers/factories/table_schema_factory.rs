use crate::engine::schema::{ColumnDescriptor, MetricType, TableSchema};

/// Builds a schema column by column, in ordinal order.
pub struct TableSchemaFactory {
    columns: Vec<ColumnDescriptor>,
}

impl TableSchemaFactory {
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    pub fn with_dimension(mut self, name: &str) -> Self {
        self.columns.push(ColumnDescriptor::dimension(name));
        self
    }

    pub fn with_metric(mut self, name: &str, metric: MetricType) -> Self {
        self.columns.push(ColumnDescriptor::metric(name, metric));
        self
    }

    pub fn with_metric_i64(self, name: &str) -> Self {
        self.with_metric(name, MetricType::I64)
    }

    pub fn with_metric_f64(self, name: &str) -> Self {
        self.with_metric(name, MetricType::F64)
    }

    pub fn with_metric_bool(self, name: &str) -> Self {
        self.with_metric(name, MetricType::Bool)
    }

    pub fn create(self) -> TableSchema {
        TableSchema::new(self.columns).unwrap()
    }
}
