use crate::engine::schema::{ColumnKind, MetricType};
use crate::test_helpers::factory::Factory;

#[test]
fn columns_keep_declaration_order() {
    let schema = Factory::table_schema()
        .with_dimension("seller")
        .with_metric_i64("amount")
        .with_dimension("category")
        .create();

    assert_eq!(schema.column_count(), 3);
    assert_eq!(schema.column(0).unwrap().name, "seller");
    assert_eq!(schema.column(1).unwrap().name, "amount");
    assert_eq!(schema.column(2).unwrap().name, "category");
    assert!(schema.is_dimension(0));
    assert!(!schema.is_dimension(1));
}

#[test]
fn metric_helpers_pick_the_right_type() {
    let schema = Factory::table_schema()
        .with_dimension("k")
        .with_metric_i64("a")
        .with_metric_f64("b")
        .with_metric_bool("c")
        .create();

    assert_eq!(schema.column(1).unwrap().kind, ColumnKind::Metric(MetricType::I64));
    assert_eq!(schema.column(2).unwrap().kind, ColumnKind::Metric(MetricType::F64));
    assert_eq!(schema.column(3).unwrap().kind, ColumnKind::Metric(MetricType::Bool));
}
