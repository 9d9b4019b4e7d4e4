//! Wire types for the subset of the Sui JSON-RPC API DropIt uses.

use dropit_core::{Frost, ObjectId};
use serde::{Deserialize, Serialize};

/// JSON-RPC 2.0 request envelope.
#[derive(Debug, Serialize)]
pub(crate) struct RpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: serde_json::Value,
}

impl<'a> RpcRequest<'a> {
    pub fn new(id: u64, method: &'a str, params: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method,
            params,
        }
    }
}

/// JSON-RPC 2.0 response envelope; exactly one of `result` and `error` is set.
#[derive(Debug, Deserialize)]
pub(crate) struct RpcResponse<T> {
    pub result: Option<T>,
    pub error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

/// One coin type's aggregate balance, as returned by `suix_getAllBalances`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub coin_type: String,
    #[serde(default)]
    pub coin_object_count: u64,
    pub total_balance: Frost,
}

/// Which parts of an object the node should include.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct ObjectDataOptions {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub show_type: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub show_owner: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub show_content: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub show_display: bool,
}

impl ObjectDataOptions {
    /// Request the parsed Move content only.
    #[must_use]
    pub fn content() -> Self {
        Self {
            show_content: true,
            ..Self::default()
        }
    }
}

/// Filter for `suix_getOwnedObjects`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ObjectFilter {
    /// Objects whose Move type is exactly this struct type.
    StructType(String),
    /// Objects of any type from this package.
    Package(ObjectId),
}

/// Query argument for `suix_getOwnedObjects`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ObjectQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<ObjectFilter>,
    pub options: ObjectDataOptions,
}

impl ObjectQuery {
    /// Objects of one struct type, with their content.
    pub fn struct_type(struct_type: impl Into<String>) -> Self {
        Self {
            filter: Some(ObjectFilter::StructType(struct_type.into())),
            options: ObjectDataOptions::content(),
        }
    }
}

/// Name of a dynamic field, as accepted by `suix_getDynamicFieldObject`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DynamicFieldName {
    #[serde(rename = "type")]
    pub type_: String,
    pub value: serde_json::Value,
}

impl DynamicFieldName {
    /// A `u64`-keyed field; the node expects the key as a decimal string.
    pub fn u64(value: u64) -> Self {
        Self {
            type_: "u64".to_owned(),
            value: serde_json::Value::String(value.to_string()),
        }
    }
}

/// Response of `sui_getObject` and each element of an owned-objects page.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ObjectResponse {
    pub data: Option<ObjectData>,
    pub error: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectData {
    pub object_id: ObjectId,
    pub version: String,
    pub digest: String,
    #[serde(rename = "type")]
    pub type_: Option<String>,
    pub content: Option<ParsedContent>,
}

impl ObjectData {
    /// The Move struct fields, if the content was requested and the object is a
    /// Move object.
    pub fn fields(&self) -> Option<&serde_json::Value> {
        self.content.as_ref().and_then(|c| c.fields.as_ref())
    }
}

/// Parsed content of a ledger object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedContent {
    pub data_type: String,
    #[serde(rename = "type")]
    pub type_: Option<String>,
    #[serde(default)]
    pub has_public_transfer: bool,
    pub fields: Option<serde_json::Value>,
}

/// One page of `suix_getOwnedObjects` results.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedObjectsPage {
    pub data: Vec<ObjectResponse>,
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_next_page: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_serializes_like_the_node_expects() {
        let query = ObjectQuery::struct_type("0x1::video::Video");
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "filter": {"StructType": "0x1::video::Video"},
                "options": {"showContent": true}
            })
        );
    }

    #[test]
    fn dynamic_field_name_uses_string_key() {
        let json = serde_json::to_value(DynamicFieldName::u64(2)).unwrap();
        assert_eq!(json, serde_json::json!({"type": "u64", "value": "2"}));
    }

    #[test]
    fn balance_parses_string_amount() {
        let balance: Balance = serde_json::from_value(serde_json::json!({
            "coinType": "0x8270::wal::WAL",
            "coinObjectCount": 2,
            "totalBalance": "5000000000",
            "lockedBalance": {}
        }))
        .unwrap();
        assert_eq!(balance.total_balance, Frost::new(5_000_000_000));
    }

    #[test]
    fn object_without_content_has_no_fields() {
        let page: OwnedObjectsPage = serde_json::from_value(serde_json::json!({
            "data": [{"data": {"objectId": "0x1", "version": "3", "digest": "d"}}],
            "nextCursor": null,
            "hasNextPage": false
        }))
        .unwrap();
        let data = page.data[0].data.as_ref().unwrap();
        assert!(data.fields().is_none());
    }
}
