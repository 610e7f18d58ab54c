use crate::core::state_machine::SortingState;
use crate::core::{ConfigProvider, Item, RandomSource, Snapshot, SortingRobot};
use crate::utils::error::{Result, SortingError};
use crate::utils::validation::validate_positive_number;
use async_trait::async_trait;
use tokio::sync::Mutex;

/// In-process robot. A single lock serializes every operation, so concurrent
/// requests from the HTTP layer never interleave inside the state machine.
pub struct SortingService<R: RandomSource> {
    state: Mutex<SortingState<R>>,
}

impl<R: RandomSource> SortingService<R> {
    pub fn new(random: R) -> Self {
        Self {
            state: Mutex::new(SortingState::new(random)),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C, random: R) -> Result<Self> {
        validate_positive_number("default_capacity", config.default_capacity(), 1)?;
        let mut state = SortingState::with_default_capacity(random, config.default_capacity());
        for (id, capacity) in config.preset_cubbies() {
            state.create_cubby(&id, capacity)?;
            tracing::debug!("Preset cubby {} with capacity {}", id, capacity);
        }

        tracing::info!(
            "Sorting service ready (default cubby capacity: {})",
            state.default_capacity()
        );
        Ok(Self {
            state: Mutex::new(state),
        })
    }
}

fn log_rejection(operation: &str, err: &SortingError) {
    tracing::warn!("{} rejected: {} [{}]", operation, err, err.code());
}

#[async_trait]
impl<R: RandomSource + 'static> SortingRobot for SortingService<R> {
    async fn load_items(&self, items: Vec<Item>) -> Result<()> {
        let count = items.len();
        let mut state = self.state.lock().await;

        state
            .load_items(items)
            .inspect_err(|e| log_rejection("LoadItems", e))?;

        tracing::info!(
            "Loaded {} items, cargo now holds {}",
            count,
            state.cargo().len()
        );
        tracing::debug!("Cargo: {:?}", state.cargo());
        Ok(())
    }

    async fn select_item(&self) -> Result<Item> {
        let mut state = self.state.lock().await;

        let (index, item) = state
            .select_item()
            .inspect_err(|e| log_rejection("SelectItem", e))?;

        tracing::debug!("Randomly selected index: {}", index);
        tracing::info!(
            "Selected item {}, {} left in cargo",
            item,
            state.cargo().len()
        );
        Ok(item)
    }

    async fn move_item(&self, cubby_id: &str) -> Result<()> {
        let mut state = self.state.lock().await;
        let item = state.selected().cloned();

        let cubby = state
            .move_item(cubby_id)
            .inspect_err(|e| log_rejection("MoveItem", e))?;
        let (held, remaining) = (cubby.items.len(), cubby.remaining());

        if let Some(item) = item {
            tracing::info!(
                "Moved item {} to cubby {} ({} held, {} free)",
                item.code,
                cubby_id,
                held,
                remaining
            );
        }
        tracing::debug!("Total sorted items: {}", state.snapshot().sorted_count());
        Ok(())
    }

    async fn create_cubby(&self, cubby_id: &str, capacity: usize) -> Result<()> {
        let mut state = self.state.lock().await;

        state
            .create_cubby(cubby_id, capacity)
            .inspect_err(|e| log_rejection("CreateCubby", e))?;

        tracing::info!("Created cubby {} with capacity {}", cubby_id, capacity);
        Ok(())
    }

    async fn snapshot(&self) -> Result<Snapshot> {
        Ok(self.state.lock().await.snapshot())
    }
}
