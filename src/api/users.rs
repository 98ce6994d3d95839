//! User endpoints and the user entity

use crate::error::Result;
use crate::http::{ApiClient, ApiRequest};
use crate::pagination::ResponsePage;
use serde::{Deserialize, Serialize};

/// Raw user record as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    /// User ID
    pub id: String,
    /// Login name
    pub login: String,
    /// Display name
    pub display_name: String,
    /// Channel description
    #[serde(default)]
    pub description: String,
    /// Profile image URL
    #[serde(default)]
    pub profile_image_url: String,
}

/// A user account.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    #[serde(flatten)]
    data: UserData,
}

impl User {
    pub(crate) fn new(data: UserData) -> Self {
        Self { data }
    }

    /// The ID of the user
    pub fn id(&self) -> &str {
        &self.data.id
    }

    /// The login name of the user
    pub fn login(&self) -> &str {
        &self.data.login
    }

    /// The display name of the user
    pub fn display_name(&self) -> &str {
        &self.data.display_name
    }

    /// The channel description of the user
    pub fn description(&self) -> &str {
        &self.data.description
    }

    /// The profile image URL of the user
    pub fn profile_image_url(&self) -> &str {
        &self.data.profile_image_url
    }
}

/// The API methods that deal with users.
///
/// Accessed through [`ApiClient::users`].
#[derive(Debug, Clone)]
pub struct UsersApi {
    client: ApiClient,
}

impl UsersApi {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Retrieve the users for the given list of user IDs
    pub async fn get_users_by_ids(&self, ids: &[&str]) -> Result<Vec<User>> {
        self.get_users("id", ids).await
    }

    /// Retrieve the users for the given list of login names
    pub async fn get_users_by_logins(&self, logins: &[&str]) -> Result<Vec<User>> {
        self.get_users("login", logins).await
    }

    /// Retrieve the user with the given ID, if it exists
    pub async fn get_user_by_id(&self, id: &str) -> Result<Option<User>> {
        let users = self.get_users("id", &[id]).await?;
        Ok(users.into_iter().next())
    }

    /// Retrieve the user with the given login name, if it exists
    pub async fn get_user_by_login(&self, login: &str) -> Result<Option<User>> {
        let users = self.get_users("login", &[login]).await?;
        Ok(users.into_iter().next())
    }

    async fn get_users(&self, filter: &str, values: &[&str]) -> Result<Vec<User>> {
        let request =
            ApiRequest::new("users").query_values(filter, values.iter().copied());
        let page: ResponsePage<UserData> = self.client.call(&request).await?;
        Ok(page.data.into_iter().map(User::new).collect())
    }
}
