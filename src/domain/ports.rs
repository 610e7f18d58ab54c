use crate::domain::model::{Item, Snapshot};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::net::SocketAddr;

/// Chooses which cargo position `SelectItem` takes.
pub trait RandomSource: Send {
    /// Returns an index in `0..len`. Callers never pass `len == 0`.
    fn pick(&mut self, len: usize) -> usize;
}

pub trait ConfigProvider: Send + Sync {
    fn listen_addr(&self) -> SocketAddr;
    fn default_capacity(&self) -> usize;
    fn seed(&self) -> Option<u64>;
    fn preset_cubbies(&self) -> Vec<(String, usize)>;
}

/// The remote control surface of the robot. Implemented in-process by
/// `SortingService` and over HTTP by `RemoteRobot`.
#[async_trait]
pub trait SortingRobot: Send + Sync {
    async fn load_items(&self, items: Vec<Item>) -> Result<()>;
    async fn select_item(&self) -> Result<Item>;
    async fn move_item(&self, cubby_id: &str) -> Result<()>;
    async fn create_cubby(&self, cubby_id: &str, capacity: usize) -> Result<()>;
    async fn snapshot(&self) -> Result<Snapshot>;
}
