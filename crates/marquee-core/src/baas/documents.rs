//! Document collection operations.
//!
//! Documents are plain JSON rows: the service's `$`-prefixed system fields
//! plus the collection attributes, modeled here as a generic payload
//! flattened beside the system fields. Queries are serialized to the
//! service's JSON query-string format and passed as repeated `queries[]`
//! parameters.

use super::BaasClient;
use crate::error::BaasError;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A stored document: system fields plus collection attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document<T> {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$createdAt", default)]
    pub created_at: String,
    #[serde(flatten)]
    pub data: T,
}

/// Result page of a list call.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentList<T> {
    pub total: u64,
    pub documents: Vec<Document<T>>,
}

/// Query operators understood by the document store.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentQuery {
    Equal { attribute: String, value: String },
    OrderDesc { attribute: String },
    Limit(usize),
}

impl DocumentQuery {
    pub fn equal(attribute: &str, value: &str) -> Self {
        Self::Equal {
            attribute: attribute.to_string(),
            value: value.to_string(),
        }
    }

    pub fn order_desc(attribute: &str) -> Self {
        Self::OrderDesc {
            attribute: attribute.to_string(),
        }
    }

    pub fn limit(limit: usize) -> Self {
        Self::Limit(limit)
    }

    /// Wire form: one JSON object per query, stringified.
    pub fn to_query_string(&self) -> String {
        let value = match self {
            Self::Equal { attribute, value } => {
                json!({"method": "equal", "attribute": attribute, "values": [value]})
            }
            Self::OrderDesc { attribute } => {
                json!({"method": "orderDesc", "attribute": attribute})
            }
            Self::Limit(limit) => json!({"method": "limit", "values": [limit]}),
        };
        value.to_string()
    }
}

impl BaasClient {
    fn collection_path(&self, database_id: &str, collection_id: &str) -> String {
        format!(
            "/databases/{}/collections/{}/documents",
            database_id, collection_id
        )
    }

    /// Creates a document; the service generates the document id.
    pub async fn create_document<T>(
        &self,
        database_id: &str,
        collection_id: &str,
        data: &T,
    ) -> Result<Document<T>, BaasError>
    where
        T: Serialize + DeserializeOwned,
    {
        let body = json!({"documentId": "unique()", "data": data});
        self.request(
            Method::POST,
            &self.collection_path(database_id, collection_id),
            Some(body),
        )
        .await
    }

    /// Patches a subset of a document's attributes.
    pub async fn update_document<T>(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        patch: &Value,
    ) -> Result<Document<T>, BaasError>
    where
        T: DeserializeOwned,
    {
        let body = json!({"data": patch});
        self.request(
            Method::PATCH,
            &format!(
                "{}/{}",
                self.collection_path(database_id, collection_id),
                document_id
            ),
            Some(body),
        )
        .await
    }

    pub async fn delete_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> Result<(), BaasError> {
        self.request::<()>(
            Method::DELETE,
            &format!(
                "{}/{}",
                self.collection_path(database_id, collection_id),
                document_id
            ),
            None,
        )
        .await
    }

    pub async fn list_documents<T>(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: &[DocumentQuery],
    ) -> Result<DocumentList<T>, BaasError>
    where
        T: DeserializeOwned,
    {
        let params: Vec<(&str, String)> = queries
            .iter()
            .map(|query| ("queries[]", query.to_query_string()))
            .collect();
        let request = self
            .base_request(
                Method::GET,
                &self.collection_path(database_id, collection_id),
            )
            .query(&params);
        self.execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Row {
        user_id: String,
        movie_imdb_id: String,
    }

    #[test]
    fn test_document_flattens_system_fields() {
        let doc: Document<Row> = serde_json::from_str(
            r#"{
                "$id": "doc_1",
                "$createdAt": "2026-08-01T10:00:00.000+00:00",
                "$permissions": [],
                "user_id": "user_1",
                "movie_imdb_id": "tt0133093"
            }"#,
        )
        .unwrap();

        assert_eq!(doc.id, "doc_1");
        assert_eq!(doc.data.user_id, "user_1");
        assert_eq!(doc.data.movie_imdb_id, "tt0133093");
    }

    #[test]
    fn test_equal_query_wire_format() {
        let query = DocumentQuery::equal("user_id", "user_1").to_query_string();
        let parsed: Value = serde_json::from_str(&query).unwrap();
        assert_eq!(parsed["method"], "equal");
        assert_eq!(parsed["attribute"], "user_id");
        assert_eq!(parsed["values"], json!(["user_1"]));
    }

    #[test]
    fn test_order_and_limit_query_wire_format() {
        let order: Value =
            serde_json::from_str(&DocumentQuery::order_desc("count").to_query_string()).unwrap();
        assert_eq!(order["method"], "orderDesc");
        assert_eq!(order["attribute"], "count");

        let limit: Value =
            serde_json::from_str(&DocumentQuery::limit(10).to_query_string()).unwrap();
        assert_eq!(limit["method"], "limit");
        assert_eq!(limit["values"], json!([10]));
    }

    #[test]
    fn test_document_list_decodes_page() {
        let list: DocumentList<Row> = serde_json::from_str(
            r#"{
                "total": 1,
                "documents": [
                    {"$id": "doc_1", "$createdAt": "", "user_id": "u", "movie_imdb_id": "tt1"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(list.total, 1);
        assert_eq!(list.documents.len(), 1);
    }
}
