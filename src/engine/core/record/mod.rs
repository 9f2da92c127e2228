pub mod encoder;
pub mod layout;

pub use encoder::{EncodedRecord, RecordEncoder};
pub use layout::{FieldSlot, RecordLayout, SlotRole};
