use crate::core::{Cubby, Item, Phase, RandomSource, Snapshot, CUBBY_DEFAULT_CAPACITY};
use crate::utils::error::{Result, SortingError};
use crate::utils::validation::require_non_blank;
use std::collections::BTreeMap;

/// Cargo, selected slot and cubby table of one robot.
///
/// Every operation checks all of its preconditions before touching state, so
/// a rejected call leaves the machine exactly as it was.
pub struct SortingState<R: RandomSource> {
    cargo: Vec<Item>,
    selected: Option<Item>,
    cubbies: BTreeMap<String, Cubby>,
    default_capacity: usize,
    random: R,
}

impl<R: RandomSource> SortingState<R> {
    pub fn new(random: R) -> Self {
        Self::with_default_capacity(random, CUBBY_DEFAULT_CAPACITY)
    }

    pub fn with_default_capacity(random: R, default_capacity: usize) -> Self {
        Self {
            cargo: Vec::new(),
            selected: None,
            cubbies: BTreeMap::new(),
            default_capacity,
            random,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.selected.is_some() {
            Phase::Selecting
        } else {
            Phase::Idle
        }
    }

    pub fn cargo(&self) -> &[Item] {
        &self.cargo
    }

    pub fn selected(&self) -> Option<&Item> {
        self.selected.as_ref()
    }

    pub fn cubby(&self, id: &str) -> Option<&Cubby> {
        self.cubbies.get(id)
    }

    pub fn default_capacity(&self) -> usize {
        self.default_capacity
    }

    pub fn load_items(&mut self, items: Vec<Item>) -> Result<()> {
        if items.is_empty() {
            return Err(SortingError::invalid_argument(
                "items",
                "loading items called with empty cargo",
            ));
        }
        for item in &items {
            require_non_blank("items.code", &item.code)?;
        }

        self.cargo.extend(items);
        Ok(())
    }

    /// Takes a random item out of cargo and holds it in the selected slot.
    /// Returns the chosen index alongside the item.
    pub fn select_item(&mut self) -> Result<(usize, Item)> {
        if self.selected.is_some() {
            return Err(SortingError::AlreadySelected);
        }
        if self.cargo.is_empty() {
            return Err(SortingError::EmptyCargo);
        }

        let len = self.cargo.len();
        let index = self.random.pick(len);
        if index >= len {
            return Err(SortingError::internal(format!(
                "random source returned index {} for cargo of {}",
                index, len
            )));
        }

        let item = self.cargo.remove(index);
        self.selected = Some(item.clone());
        Ok((index, item))
    }

    /// Places the selected item into `cubby_id`, creating the cubby with the
    /// default capacity on first use. On `CubbyFull` the item stays selected.
    pub fn move_item(&mut self, cubby_id: &str) -> Result<&Cubby> {
        if self.selected.is_none() {
            return Err(SortingError::NothingSelected);
        }
        require_non_blank("cubby.id", cubby_id)?;

        let default_capacity = self.default_capacity;
        let cubby = self
            .cubbies
            .entry(cubby_id.to_string())
            .or_insert_with(|| Cubby::new(default_capacity));

        if cubby.is_full() {
            return Err(SortingError::CubbyFull {
                id: cubby_id.to_string(),
                capacity: cubby.capacity,
            });
        }

        if let Some(item) = self.selected.take() {
            cubby.items.push(item);
        }
        Ok(cubby)
    }

    pub fn create_cubby(&mut self, cubby_id: &str, capacity: usize) -> Result<()> {
        require_non_blank("cubby.id", cubby_id)?;
        if capacity == 0 {
            return Err(SortingError::invalid_argument(
                "cubby.capacity",
                "capacity must be at least 1",
            ));
        }
        if self.cubbies.contains_key(cubby_id) {
            return Err(SortingError::CubbyExists {
                id: cubby_id.to_string(),
            });
        }

        self.cubbies.insert(cubby_id.to_string(), Cubby::new(capacity));
        Ok(())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase(),
            cargo: self.cargo.clone(),
            selected: self.selected.clone(),
            cubbies: self.cubbies.clone(),
        }
    }
}
