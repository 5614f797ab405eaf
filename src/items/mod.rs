pub mod format;
pub mod types;

pub use types::{Card, Direction, Friend, Item, ManagedItem, Transfer};
