use std::collections::BTreeSet;

use crate::engine::core::dict::Dictionary;

pub struct DictionaryFactory {
    values: BTreeSet<String>,
}

impl DictionaryFactory {
    pub fn new() -> Self {
        Self {
            values: BTreeSet::new(),
        }
    }

    pub fn with_values(mut self, values: &[&str]) -> Self {
        self.values.extend(values.iter().map(|v| v.to_string()));
        self
    }

    pub fn create(self) -> Dictionary {
        Dictionary::from_distinct(self.values)
    }
}
