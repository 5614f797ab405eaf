//! Services built on one loader each, mapping items into rows for a screen.

mod cache;
mod cards;
mod friends;
mod transfers;

pub use cache::FriendsCacheServiceAdapter;
pub use cards::{CardsServiceAdapter, card_row};
pub use friends::{FriendsServiceAdapter, friend_row};
pub use transfers::{TransfersServiceAdapter, transfer_row};
