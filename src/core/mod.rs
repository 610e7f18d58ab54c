pub mod service;
pub mod state_machine;

pub use crate::domain::model::{Cubby, Item, Phase, Snapshot, CUBBY_DEFAULT_CAPACITY};
pub use crate::domain::ports::{ConfigProvider, RandomSource, SortingRobot};
pub use crate::utils::error::Result;
