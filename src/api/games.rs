//! Game endpoints and the game entity

use crate::error::Result;
use crate::http::{ApiClient, ApiRequest, Query};
use crate::pagination::{PaginatedResult, Pagination, Paginator, ResponsePage};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Raw game record as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameData {
    /// Game ID
    pub id: String,
    /// Game name
    pub name: String,
    /// Box art URL template with `{width}`/`{height}` placeholders
    pub box_art_url: String,
}

/// A game as listed on the platform.
#[derive(Debug, Clone, Serialize)]
pub struct Game {
    #[serde(flatten)]
    data: GameData,
}

impl Game {
    pub(crate) fn new(data: GameData) -> Self {
        Self { data }
    }

    /// The ID of the game
    pub fn id(&self) -> &str {
        &self.data.id
    }

    /// The name of the game
    pub fn name(&self) -> &str {
        &self.data.name
    }

    /// Box art URL for the given dimensions
    pub fn box_art_url(&self, width: u32, height: u32) -> String {
        self.data
            .box_art_url
            .replace("{width}", &width.to_string())
            .replace("{height}", &height.to_string())
    }
}

/// The API methods that deal with games.
///
/// Accessed through [`ApiClient::games`].
///
/// ## Example
/// ```rust,ignore
/// let client = ApiClient::new(Arc::new(StaticAuthProvider::new(client_id, token, scopes)));
/// let game = client.games().get_game_by_name("Hearthstone").await?;
/// ```
#[derive(Debug, Clone)]
pub struct GamesApi {
    client: ApiClient,
}

impl GamesApi {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Retrieve the games for the given list of game IDs
    pub async fn get_games_by_ids(&self, ids: &[&str]) -> Result<Vec<Game>> {
        self.get_games("id", ids).await
    }

    /// Retrieve the games for the given list of game names
    pub async fn get_games_by_names(&self, names: &[&str]) -> Result<Vec<Game>> {
        self.get_games("name", names).await
    }

    /// Retrieve the game with the given ID, if it exists
    pub async fn get_game_by_id(&self, id: &str) -> Result<Option<Game>> {
        let games = self.get_games("id", &[id]).await?;
        Ok(games.into_iter().next())
    }

    /// Retrieve the game with the given name, if it exists
    pub async fn get_game_by_name(&self, name: &str) -> Result<Option<Game>> {
        let games = self.get_games("name", &[name]).await?;
        Ok(games.into_iter().next())
    }

    /// Retrieve one page of the most viewed games at the moment
    pub async fn get_top_games(&self, pagination: Pagination) -> Result<PaginatedResult<Game>> {
        let mut query = Query::new();
        pagination.apply_to(&mut query);
        let request = ApiRequest::new("games/top").with_query(query);

        let page: ResponsePage<GameData> = self.client.call(&request).await?;
        PaginatedResult::from_page(page, |data| Ok(Game::new(data)))
    }

    /// Create a paginator for the most viewed games at the moment
    pub fn get_top_games_paginated(&self) -> Paginator<GameData, Game> {
        Paginator::new(
            Arc::new(self.client.clone()),
            ApiRequest::new("games/top"),
            |data| Ok(Game::new(data)),
            |data: &GameData| data.id.clone(),
        )
    }

    async fn get_games(&self, filter: &str, values: &[&str]) -> Result<Vec<Game>> {
        let request =
            ApiRequest::new("games").query_values(filter, values.iter().copied());
        let page: ResponsePage<GameData> = self.client.call(&request).await?;
        Ok(page.data.into_iter().map(Game::new).collect())
    }
}
