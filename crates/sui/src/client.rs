use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dropit_core::{ObjectId, SuiAddress};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, instrument, warn};

use crate::config::SuiConfig;
use crate::error::SuiError;
use crate::rpc::{
    Balance, DynamicFieldName, ObjectDataOptions, ObjectQuery, ObjectResponse, OwnedObjectsPage,
    RpcRequest, RpcResponse,
};

/// Read access to account balances and owned objects.
#[async_trait]
pub trait LedgerReader: Send + Sync {
    /// Every coin balance held by `owner`, one entry per coin type.
    async fn get_all_balances(&self, owner: &SuiAddress) -> Result<Vec<Balance>, SuiError>;

    /// The first page of objects owned by `owner` that match `query`.
    async fn get_owned_objects(
        &self,
        owner: &SuiAddress,
        query: &ObjectQuery,
    ) -> Result<OwnedObjectsPage, SuiError>;
}

/// Read access to individual objects and their dynamic fields.
#[async_trait]
pub trait ObjectReader: Send + Sync {
    async fn get_object(
        &self,
        object_id: &ObjectId,
        options: ObjectDataOptions,
    ) -> Result<ObjectResponse, SuiError>;

    async fn get_dynamic_field_object(
        &self,
        parent: &ObjectId,
        name: &DynamicFieldName,
    ) -> Result<ObjectResponse, SuiError>;
}

/// JSON-RPC client for a Sui full node.
pub struct SuiClient {
    config: SuiConfig,
    client: Client,
    next_id: AtomicU64,
}

impl SuiClient {
    /// Create a client with its own connection pool and the configured timeout.
    pub fn new(config: SuiConfig) -> Result<Self, SuiError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(config, client))
    }

    /// Create a client sharing an existing `reqwest::Client`.
    pub fn with_client(config: SuiConfig, client: Client) -> Self {
        Self {
            config,
            client,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn rpc_url(&self) -> &str {
        &self.config.rpc_url
    }

    /// Issue one JSON-RPC call and decode its `result`.
    #[instrument(skip(self, params), fields(url = %self.config.rpc_url))]
    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T, SuiError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = RpcRequest::new(id, method, params);

        debug!(id, "sending JSON-RPC request");
        let response = self
            .client
            .post(&self.config.rpc_url)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            warn!(status = status.as_u16(), "full node returned error status");
            return Err(SuiError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let envelope: RpcResponse<T> = serde_json::from_str(&text)?;
        if let Some(err) = envelope.error {
            warn!(code = err.code, message = %err.message, "JSON-RPC error");
            return Err(SuiError::Rpc {
                code: err.code,
                message: err.message,
            });
        }
        envelope
            .result
            .ok_or_else(|| SuiError::Deserialization(format!("{method}: response has no result")))
    }
}

#[async_trait]
impl LedgerReader for SuiClient {
    #[instrument(skip(self), fields(owner = %owner))]
    async fn get_all_balances(&self, owner: &SuiAddress) -> Result<Vec<Balance>, SuiError> {
        self.call("suix_getAllBalances", json!([owner])).await
    }

    #[instrument(skip(self, query), fields(owner = %owner))]
    async fn get_owned_objects(
        &self,
        owner: &SuiAddress,
        query: &ObjectQuery,
    ) -> Result<OwnedObjectsPage, SuiError> {
        let page: OwnedObjectsPage = self
            .call("suix_getOwnedObjects", json!([owner, query, null, null]))
            .await?;
        debug!(count = page.data.len(), has_next_page = page.has_next_page, "owned objects fetched");
        Ok(page)
    }
}

#[async_trait]
impl ObjectReader for SuiClient {
    #[instrument(skip(self, options), fields(object_id = %object_id))]
    async fn get_object(
        &self,
        object_id: &ObjectId,
        options: ObjectDataOptions,
    ) -> Result<ObjectResponse, SuiError> {
        self.call("sui_getObject", json!([object_id, options])).await
    }

    #[instrument(skip(self, name), fields(parent = %parent))]
    async fn get_dynamic_field_object(
        &self,
        parent: &ObjectId,
        name: &DynamicFieldName,
    ) -> Result<ObjectResponse, SuiError> {
        self.call("suix_getDynamicFieldObject", json!([parent, name]))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_server::{MockServer, request_json};
    use dropit_core::Frost;

    fn client_for(server: &MockServer) -> SuiClient {
        SuiClient::new(SuiConfig::new(&server.base_url)).unwrap()
    }

    #[tokio::test]
    async fn get_all_balances_sends_owner() {
        let server = MockServer::start().await;
        let client = client_for(&server);

        let body = r#"{"jsonrpc":"2.0","id":1,"result":[
            {"coinType":"0x2::sui::SUI","coinObjectCount":1,"totalBalance":"100"},
            {"coinType":"0xabc::wal::WAL","coinObjectCount":3,"totalBalance":"7000000000"}
        ]}"#;
        let handle = tokio::spawn(async move { server.respond_once(200, body).await });

        let balances = client
            .get_all_balances(&SuiAddress::new("0xa11ce"))
            .await
            .unwrap();
        let request = request_json(&handle.await.unwrap());

        assert_eq!(request["jsonrpc"], "2.0");
        assert_eq!(request["method"], "suix_getAllBalances");
        assert_eq!(request["params"], json!(["0xa11ce"]));
        assert_eq!(balances.len(), 2);
        assert_eq!(balances[1].total_balance, Frost::new(7_000_000_000));
    }

    #[tokio::test]
    async fn get_owned_objects_sends_filter_and_options() {
        let server = MockServer::start().await;
        let client = client_for(&server);

        let body = r#"{"jsonrpc":"2.0","id":1,"result":{
            "data":[{"data":{
                "objectId":"0x77","version":"12","digest":"abc",
                "content":{"dataType":"moveObject","type":"0x1::video::Video","hasPublicTransfer":true,
                    "fields":{"title":"t","blob_id":"b","owner":"0xa11ce","created_at":"1"}}
            }}],
            "nextCursor":"0x77","hasNextPage":false
        }}"#;
        let handle = tokio::spawn(async move { server.respond_once(200, body).await });

        let query = ObjectQuery::struct_type("0x1::video::Video");
        let page = client
            .get_owned_objects(&SuiAddress::new("0xa11ce"), &query)
            .await
            .unwrap();
        let request = request_json(&handle.await.unwrap());

        assert_eq!(request["method"], "suix_getOwnedObjects");
        assert_eq!(request["params"][0], "0xa11ce");
        assert_eq!(
            request["params"][1]["filter"]["StructType"],
            "0x1::video::Video"
        );
        assert_eq!(request["params"][1]["options"]["showContent"], true);

        let data = page.data[0].data.as_ref().unwrap();
        assert_eq!(data.object_id, ObjectId::new("0x77"));
        assert_eq!(data.fields().unwrap()["title"], "t");
    }

    #[tokio::test]
    async fn rpc_error_surfaces_node_message() {
        let server = MockServer::start().await;
        let client = client_for(&server);

        let body = r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32602,"message":"Invalid Sui address"}}"#;
        let handle = tokio::spawn(async move { server.respond_once(200, body).await });

        let err = client
            .get_all_balances(&SuiAddress::new("nope"))
            .await
            .unwrap_err();
        handle.await.unwrap();

        assert!(matches!(err, SuiError::Rpc { code: -32602, .. }));
        assert_eq!(err.to_string(), "Invalid Sui address");
    }

    #[tokio::test]
    async fn http_error_status_is_reported() {
        let server = MockServer::start().await;
        let client = client_for(&server);

        let handle = tokio::spawn(async move { server.respond_once(503, "overloaded").await });

        let err = client
            .get_object(&ObjectId::new("0x1"), ObjectDataOptions::content())
            .await
            .unwrap_err();
        handle.await.unwrap();

        assert!(matches!(err, SuiError::Status { status: 503, .. }));
    }

    #[tokio::test]
    async fn dynamic_field_request_shape() {
        let server = MockServer::start().await;
        let client = client_for(&server);

        let body = r#"{"jsonrpc":"2.0","id":1,"result":{"data":null,"error":{"code":"dynamicFieldNotFound"}}}"#;
        let handle = tokio::spawn(async move { server.respond_once(200, body).await });

        let response = client
            .get_dynamic_field_object(&ObjectId::new("0x5"), &DynamicFieldName::u64(1))
            .await
            .unwrap();
        let request = request_json(&handle.await.unwrap());

        assert_eq!(request["method"], "suix_getDynamicFieldObject");
        assert_eq!(request["params"], json!(["0x5", {"type": "u64", "value": "1"}]));
        assert!(response.data.is_none());
        assert!(response.error.is_some());
    }
}
