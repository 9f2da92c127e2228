pub mod fixed_len;

pub use fixed_len::{FixedLenCodec, for_metric};

#[cfg(test)]
mod fixed_len_test;
