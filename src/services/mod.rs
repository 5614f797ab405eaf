pub mod adapters;
pub mod fallback;
#[cfg(test)]
pub mod mock;
pub mod retry;
pub mod row;
pub mod service;

pub use fallback::Fallback;
pub use retry::retry;
pub use row::{Row, SelectSink};
pub use service::{ItemService, ItemServiceExt};
