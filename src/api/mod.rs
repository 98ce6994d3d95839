//! Namespaced endpoint groups and their entities
//!
//! Each group holds a clone of the shared [`crate::http::ApiClient`] and
//! builds entities from the raw response records. Entities that keep the
//! client handle for late-bound fetches exclude it from their serialized
//! view.

mod bits;
mod extensions;
mod games;
mod users;

pub use bits::{
    BitsApi, BitsLeaderboard, BitsLeaderboardEntry, BitsLeaderboardEntryData,
    BitsLeaderboardPeriod, BitsLeaderboardQuery, BitsLeaderboardResponse, DateRangeData,
};
pub use extensions::{
    ExtensionProductCost, ExtensionProductData, ExtensionTransaction, ExtensionTransactionData,
    ExtensionTransactionsFilter, ExtensionsApi,
};
pub use games::{Game, GameData, GamesApi};
pub use users::{User, UserData, UsersApi};
