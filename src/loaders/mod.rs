pub mod cache;
pub mod demo_api;
pub mod loader;
#[cfg(test)]
pub mod mock;

pub use cache::{MemoryCache, NullCache};
pub use demo_api::{DemoApi, Fixtures};
pub use loader::{CacheSink, ItemLoader};
