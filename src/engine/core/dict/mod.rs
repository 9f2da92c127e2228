pub mod dict_builder;
pub mod dictionary;

pub use dict_builder::{DictionaryBuilder, LocalDictionaries};
pub use dictionary::Dictionary;
