use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Default number of items a lazily created cubby accepts.
pub const CUBBY_DEFAULT_CAPACITY: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Item {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{} ({})", self.code, label),
            None => f.write_str(&self.code),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cubby {
    pub capacity: usize,
    pub items: Vec<Item>,
}

impl Cubby {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            items: Vec::new(),
        }
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn remaining(&self) -> usize {
        self.capacity.saturating_sub(self.items.len())
    }
}

/// Whether an item is waiting for placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Selecting,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub cargo: Vec<Item>,
    pub selected: Option<Item>,
    pub cubbies: BTreeMap<String, Cubby>,
}

impl Snapshot {
    pub fn sorted_count(&self) -> usize {
        self.cubbies.values().map(|c| c.items.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_wire_shape() {
        let json = serde_json::to_value(Item::new("tomato")).unwrap();
        assert_eq!(json, serde_json::json!({"code": "tomato"}));

        let item: Item =
            serde_json::from_value(serde_json::json!({"code": "cheese", "label": "brie"}))
                .unwrap();
        assert_eq!(item, Item::new("cheese").with_label("brie"));
        assert_eq!(item.to_string(), "cheese (brie)");
    }

    #[test]
    fn test_cubby_capacity() {
        let mut cubby = Cubby::new(1);
        assert!(!cubby.is_full());
        assert_eq!(cubby.remaining(), 1);
        cubby.items.push(Item::new("potato"));
        assert!(cubby.is_full());
        assert_eq!(cubby.remaining(), 0);
    }
}
