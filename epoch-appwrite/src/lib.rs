//! Appwrite document adapter: typed list-documents payloads, REST request
//! construction and startup configuration checks. The backend is treated as
//! an opaque paginated store of event documents; everything here is plain
//! parsing, so it tests natively.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use epoch_core::{EventRecord, PageRequest, TimelineError, TimelineSnapshot};

/// Header carrying the project id on every REST call.
pub const PROJECT_HEADER: &str = "X-Appwrite-Project";

/// Connection settings for the hosted database. All four values are required
/// before any timeline logic runs; a missing one is a fatal startup error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppwriteConfig {
    endpoint: String,
    project_id: String,
    database_id: String,
    collection_id: String,
}

impl AppwriteConfig {
    pub fn new(
        endpoint: impl Into<String>,
        project_id: impl Into<String>,
        database_id: impl Into<String>,
        collection_id: impl Into<String>,
    ) -> Result<Self, TimelineError> {
        let config = Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            project_id: project_id.into(),
            database_id: database_id.into(),
            collection_id: collection_id.into(),
        };

        if config.endpoint.is_empty() {
            return Err(TimelineError::MissingConfig("endpoint"));
        }
        if config.project_id.is_empty() {
            return Err(TimelineError::MissingConfig("project id"));
        }
        if config.database_id.is_empty() {
            return Err(TimelineError::MissingConfig("database id"));
        }
        if config.collection_id.is_empty() {
            return Err(TimelineError::MissingConfig("collection id"));
        }

        Ok(config)
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// REST URL for one list-documents window.
    pub fn list_documents_url(&self, request: PageRequest) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents?queries[]=limit({})&queries[]=offset({})",
            self.endpoint, self.database_id, self.collection_id, request.limit, request.offset
        )
    }
}

/// One stored event document, `$id` and all.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventDocument {
    #[serde(rename = "$id")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub year: i32,
    pub era: String,
    pub image_url: String,
}

impl EventDocument {
    pub fn into_record(self) -> EventRecord {
        EventRecord {
            id: self.id,
            title: self.title,
            description: self.description,
            year: self.year,
            era: self.era,
            image_url: self.image_url,
        }
    }
}

/// One paginated list-documents response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentPage {
    pub total: usize,
    pub documents: Vec<EventDocument>,
}

/// Parse a list-documents response from a JSON string.
pub fn parse_document_page_str(payload: &str) -> Result<DocumentPage, TimelineError> {
    serde_json::from_str(payload).map_err(|err| TimelineError::Parse(err.to_string()))
}

/// Parse a list-documents response from a `serde_json::Value`.
pub fn parse_document_page_value(payload: &Value) -> Result<DocumentPage, TimelineError> {
    serde_json::from_value(payload.clone()).map_err(|err| TimelineError::Parse(err.to_string()))
}

/// Concatenate fetched pages into plain records, in page order.
pub fn collect_records(pages: Vec<DocumentPage>) -> Vec<EventRecord> {
    pages
        .into_iter()
        .flat_map(|page| page.documents)
        .map(EventDocument::into_record)
        .collect()
}

/// Merge fetched pages into the sorted, grouped timeline.
pub fn snapshot_from_pages(pages: Vec<DocumentPage>) -> TimelineSnapshot {
    TimelineSnapshot::new(collect_records(pages))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AppwriteConfig {
        AppwriteConfig::new(
            "https://cloud.appwrite.io/v1",
            "epoch-project",
            "epoch-db",
            "events",
        )
        .expect("complete config should validate")
    }

    #[test]
    fn missing_values_name_the_offending_key() {
        let err = AppwriteConfig::new("", "p", "d", "c").unwrap_err();
        assert!(err.to_string().contains("endpoint"));

        let err = AppwriteConfig::new("https://cloud.appwrite.io/v1", "p", "", "c").unwrap_err();
        assert!(err.to_string().contains("database id"));
    }

    #[test]
    fn list_url_carries_window_queries() {
        let url = config().list_documents_url(PageRequest {
            limit: 100,
            offset: 200,
        });

        assert_eq!(
            url,
            "https://cloud.appwrite.io/v1/databases/epoch-db/collections/events/documents\
             ?queries[]=limit(100)&queries[]=offset(200)"
        );
    }

    #[test]
    fn a_trailing_slash_on_the_endpoint_is_tolerated() {
        let config = AppwriteConfig::new("https://cloud.appwrite.io/v1/", "p", "d", "c").unwrap();
        let url = config.list_documents_url(PageRequest {
            limit: 100,
            offset: 0,
        });
        assert!(url.starts_with("https://cloud.appwrite.io/v1/databases/"));
    }

    #[test]
    fn a_malformed_payload_is_a_parse_error() {
        let err = parse_document_page_str(r#"{"documents": "nope"}"#).unwrap_err();
        assert!(matches!(err, TimelineError::Parse(_)));
    }
}
