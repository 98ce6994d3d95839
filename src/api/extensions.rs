//! Extension endpoints and the extension transaction entity

use crate::error::Result;
use crate::http::{ApiClient, ApiRequest, Query};
use crate::pagination::{PaginatedResult, Pagination, Paginator, ResponsePage};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Cost of an extension product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionProductCost {
    /// Amount in the given cost type
    pub amount: u64,
    /// Cost type, currently always `bits`
    pub cost_type: String,
}

/// Product information attached to a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionProductData {
    /// Product SKU
    pub sku: String,
    /// Product cost
    pub cost: ExtensionProductCost,
    /// Display name of the product
    #[serde(default, rename = "displayName")]
    pub display_name: String,
    /// Whether the product is in development
    #[serde(default, rename = "inDevelopment")]
    pub in_development: bool,
}

/// Raw extension transaction record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionTransactionData {
    /// Transaction ID
    pub id: String,
    /// Time of the transaction
    pub timestamp: DateTime<Utc>,
    /// ID of the channel the transaction happened in
    pub broadcaster_id: String,
    /// Display name of the channel the transaction happened in
    pub broadcaster_name: String,
    /// ID of the buying user
    pub user_id: String,
    /// Display name of the buying user
    pub user_name: String,
    /// Product type of the transaction
    pub product_type: String,
    /// The product bought in the transaction
    pub product_data: ExtensionProductData,
}

/// A bits transaction made inside an extension.
#[derive(Debug, Clone, Serialize)]
pub struct ExtensionTransaction {
    #[serde(flatten)]
    data: ExtensionTransactionData,
}

impl ExtensionTransaction {
    pub(crate) fn new(data: ExtensionTransactionData) -> Self {
        Self { data }
    }

    /// The ID of the transaction
    pub fn id(&self) -> &str {
        &self.data.id
    }

    /// The time of the transaction
    pub fn transaction_date(&self) -> DateTime<Utc> {
        self.data.timestamp
    }

    /// The ID of the channel the transaction happened in
    pub fn broadcaster_id(&self) -> &str {
        &self.data.broadcaster_id
    }

    /// The ID of the buying user
    pub fn user_id(&self) -> &str {
        &self.data.user_id
    }

    /// The product type of the transaction
    pub fn product_type(&self) -> &str {
        &self.data.product_type
    }

    /// The SKU of the bought product
    pub fn product_sku(&self) -> &str {
        &self.data.product_data.sku
    }

    /// The cost of the bought product, in bits
    pub fn product_cost(&self) -> u64 {
        self.data.product_data.cost.amount
    }
}

/// Filters for the extension transactions request
#[derive(Debug, Clone, Default)]
pub struct ExtensionTransactionsFilter {
    /// Restrict the result to these transaction IDs
    pub transaction_ids: Vec<String>,
}

impl ExtensionTransactionsFilter {
    fn apply_to(&self, query: &mut Query) {
        if !self.transaction_ids.is_empty() {
            query.append_all("id", self.transaction_ids.iter().cloned());
        }
    }
}

/// The API methods that deal with extensions.
///
/// Accessed through [`ApiClient::extensions`].
#[derive(Debug, Clone)]
pub struct ExtensionsApi {
    client: ApiClient,
}

impl ExtensionsApi {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Retrieve one page of transactions for the given extension
    pub async fn get_transactions(
        &self,
        extension_id: &str,
        filter: ExtensionTransactionsFilter,
        pagination: Pagination,
    ) -> Result<PaginatedResult<ExtensionTransaction>> {
        let mut query = Query::new();
        query.set("extension_id", extension_id);
        filter.apply_to(&mut query);
        pagination.apply_to(&mut query);

        let request = ApiRequest::new("extensions/transactions").with_query(query);
        let page: ResponsePage<ExtensionTransactionData> = self.client.call(&request).await?;
        PaginatedResult::from_page(page, |data| Ok(ExtensionTransaction::new(data)))
    }

    /// Create a paginator for transactions for the given extension
    pub fn get_transactions_paginated(
        &self,
        extension_id: &str,
        filter: ExtensionTransactionsFilter,
    ) -> Paginator<ExtensionTransactionData, ExtensionTransaction> {
        let mut query = Query::new();
        query.set("extension_id", extension_id);
        filter.apply_to(&mut query);

        Paginator::new(
            Arc::new(self.client.clone()),
            ApiRequest::new("extensions/transactions").with_query(query),
            |data| Ok(ExtensionTransaction::new(data)),
            |data: &ExtensionTransactionData| data.id.clone(),
        )
    }
}
