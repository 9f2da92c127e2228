use crate::test_helpers::factory::Factory;

#[test]
fn default_slice_uses_seller_amount_schema() {
    let slice = Factory::slice().with_rows(&["a,1", "b,2"]).create();

    assert_eq!(slice.column_count(), 2);
    assert_eq!(slice.row_count(), 2);
    assert_eq!(slice.schema().column(0).unwrap().name, "seller");
    assert!(slice.local_dictionaries().is_some());
}

#[test]
fn without_dictionaries_leaves_slice_unattached() {
    let slice = Factory::slice()
        .with_rows(&["a,1"])
        .without_dictionaries()
        .create();
    assert!(slice.local_dictionaries().is_none());
}

#[test]
fn custom_schema_and_identity_carry_through() {
    let schema = Factory::table_schema()
        .with_dimension("label")
        .with_dimension("tag")
        .with_metric_i64("n")
        .create();

    let slice = Factory::slice()
        .with_partition(9)
        .with_slice_id(77)
        .with_schema(schema)
        .with_rows(&["x,y,1"])
        .create();

    assert_eq!(slice.partition(), 9);
    assert_eq!(slice.slice_id(), 77);
    assert_eq!(slice.column_count(), 3);
}
