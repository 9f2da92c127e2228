use crate::test_helpers::factory::Factory;

#[test]
fn offsets_are_consecutive_from_zero() {
    let batch = Factory::raw_batch(&["a,1", "b,2", "c,3"]);
    let offsets: Vec<u64> = batch.iter().map(|r| r.offset).collect();
    assert_eq!(offsets, vec![0, 1, 2]);
    assert_eq!(batch[1].payload, b"b,2");
}

#[test]
fn start_offset_shifts_the_whole_window() {
    let batch = Factory::raw_batch_at(40, &["a,1", "b,2"]);
    let offsets: Vec<u64> = batch.iter().map(|r| r.offset).collect();
    assert_eq!(offsets, vec![40, 41]);
}
