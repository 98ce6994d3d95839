//! Bits endpoints and the bits leaderboard entities
//!
//! The leaderboard is the canonical consumer of [`Derived`]: the mapped
//! entry list is built from the raw rows on first access and reused for
//! the lifetime of the leaderboard instance.

use super::users::User;
use crate::cache::Derived;
use crate::error::Result;
use crate::http::{ApiClient, ApiRequest, Query};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Leaderboard aggregation period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BitsLeaderboardPeriod {
    /// One day, aligned to the started-at date
    Day,
    /// One week
    Week,
    /// One month
    Month,
    /// One year
    Year,
    /// The whole lifetime of the channel
    #[default]
    All,
}

impl BitsLeaderboardPeriod {
    /// The query-parameter spelling of this period
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
            Self::All => "all",
        }
    }
}

/// Filters for the bits leaderboard request
#[derive(Debug, Clone, Default)]
pub struct BitsLeaderboardQuery {
    /// Number of leaderboard entries to return, 1-100
    pub count: Option<u32>,
    /// Aggregation period
    pub period: Option<BitsLeaderboardPeriod>,
    /// Start of the aggregation window
    pub started_at: Option<DateTime<Utc>>,
    /// Restrict the leaderboard to one user
    pub user_id: Option<String>,
}

/// Raw leaderboard entry record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitsLeaderboardEntryData {
    /// ID of the contributing user
    pub user_id: String,
    /// Login of the contributing user
    #[serde(default)]
    pub user_login: Option<String>,
    /// Display name of the contributing user
    pub user_name: String,
    /// Position on the leaderboard
    pub rank: u32,
    /// Bits used within the requested period
    pub score: u64,
}

/// Aggregation window reported with the leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRangeData {
    /// Start of the window
    pub started_at: DateTime<Utc>,
    /// End of the window
    pub ended_at: DateTime<Utc>,
}

/// Raw leaderboard response payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitsLeaderboardResponse {
    /// Leaderboard rows, best rank first
    pub data: Vec<BitsLeaderboardEntryData>,
    /// The aggregation window the rows cover
    pub date_range: DateRangeData,
    /// Total number of people on the requested leaderboard
    pub total: u64,
}

/// One user's position on a bits leaderboard.
#[derive(Debug, Clone, Serialize)]
pub struct BitsLeaderboardEntry {
    #[serde(flatten)]
    data: BitsLeaderboardEntryData,
    #[serde(skip_serializing)]
    client: ApiClient,
}

impl BitsLeaderboardEntry {
    pub(crate) fn new(data: BitsLeaderboardEntryData, client: ApiClient) -> Self {
        Self { data, client }
    }

    /// The ID of the contributing user
    pub fn user_id(&self) -> &str {
        &self.data.user_id
    }

    /// The display name of the contributing user
    pub fn user_name(&self) -> &str {
        &self.data.user_name
    }

    /// The position of the user on the leaderboard
    pub fn rank(&self) -> u32 {
        self.data.rank
    }

    /// The amount of bits the user used within the period
    pub fn score(&self) -> u64 {
        self.data.score
    }

    /// Retrieve the full user record for this entry
    pub async fn get_user(&self) -> Result<Option<User>> {
        self.client.users().get_user_by_id(&self.data.user_id).await
    }
}

/// A leaderboard of the users who used the most bits in a channel.
///
/// Holds the raw response it was built from; the mapped entry list is a
/// derived property, computed once per instance on first access.
#[derive(Debug, Clone, Serialize)]
pub struct BitsLeaderboard {
    #[serde(flatten)]
    data: BitsLeaderboardResponse,
    #[serde(skip_serializing)]
    client: ApiClient,
    #[serde(skip_serializing)]
    entries: Derived<Vec<BitsLeaderboardEntry>>,
}

impl BitsLeaderboard {
    pub(crate) fn new(data: BitsLeaderboardResponse, client: ApiClient) -> Self {
        Self {
            data,
            client,
            entries: Derived::new(),
        }
    }

    /// The entries of the leaderboard, best rank first
    pub fn entries(&self) -> &[BitsLeaderboardEntry] {
        self.entries.get_or_compute(|| {
            self.data
                .data
                .iter()
                .map(|entry| BitsLeaderboardEntry::new(entry.clone(), self.client.clone()))
                .collect()
        })
    }

    /// The total number of people on the requested leaderboard
    pub fn total_count(&self) -> u64 {
        self.data.total
    }

    /// The aggregation window the leaderboard covers
    pub fn date_range(&self) -> &DateRangeData {
        &self.data.date_range
    }
}

/// The API methods that deal with bits.
///
/// Accessed through [`ApiClient::bits`].
#[derive(Debug, Clone)]
pub struct BitsApi {
    client: ApiClient,
}

impl BitsApi {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Retrieve a bits leaderboard for the authenticated channel.
    ///
    /// Requires the `bits:read` scope.
    pub async fn get_leaderboard(
        &self,
        filter: BitsLeaderboardQuery,
    ) -> Result<BitsLeaderboard> {
        let mut query = Query::new();
        if let Some(count) = filter.count {
            query.set("count", count.to_string());
        }
        if let Some(period) = filter.period {
            query.set("period", period.as_str());
        }
        if let Some(started_at) = filter.started_at {
            query.set("started_at", started_at.to_rfc3339());
        }
        if let Some(user_id) = &filter.user_id {
            query.set("user_id", user_id);
        }

        let request = ApiRequest::new("bits/leaderboard")
            .with_query(query)
            .scope("bits:read");
        let data: BitsLeaderboardResponse = self.client.call(&request).await?;
        Ok(BitsLeaderboard::new(data, self.client.clone()))
    }
}
