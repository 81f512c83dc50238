//! Shared fixtures for integration tests

#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use snapstore::Record;

/// Test record with a nested collection, so deep copies are observable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub key: String,
    pub val: i64,
    pub tags: Vec<String>,
}

impl Item {
    pub fn new(key: &str, val: i64) -> Self {
        Self {
            key: key.to_string(),
            val,
            tags: Vec::new(),
        }
    }

    pub fn with_tags(key: &str, val: i64, tags: &[&str]) -> Self {
        Self {
            key: key.to_string(),
            val,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl Record for Item {
    type Key = String;

    fn key(&self) -> &String {
        &self.key
    }

    fn duplicate(&self) -> Self {
        Self {
            key: self.key.clone(),
            val: self.val,
            tags: self.tags.clone(),
        }
    }
}

/// Owned key for lookups
pub fn key(k: &str) -> String {
    k.to_string()
}
