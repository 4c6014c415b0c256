//! Request and response bodies exchanged with the catalog API.

use super::catalog::CatalogObject;
use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};

/// One entry of a response's `errors` list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl std::fmt::Display for ApiErrorDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.category, self.code)?;
        if let Some(detail) = &self.detail {
            write!(f, ": {}", detail)?;
        }
        if let Some(field) = &self.field {
            write!(f, " (field {})", field)?;
        }
        Ok(())
    }
}

/// A page of catalog objects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListCatalogResponse {
    #[serde(default)]
    pub objects: Vec<CatalogObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ApiErrorDetail>,
}

impl ListCatalogResponse {
    pub fn page(objects: Vec<CatalogObject>, cursor: Option<&str>) -> Self {
        Self {
            objects,
            cursor: cursor.map(str::to_string),
            errors: Vec::new(),
        }
    }

    /// Cursor for the next page, treating an empty string as "no more pages".
    pub fn next_cursor(&self) -> Option<&str> {
        self.cursor.as_deref().filter(|c| !c.is_empty())
    }

    /// Fail if the response carried errors.
    pub fn into_result(self) -> Result<Self> {
        if self.errors.is_empty() {
            Ok(self)
        } else {
            Err(CatalogError::remote("ListCatalog", self.errors))
        }
    }
}

/// A group of objects upserted together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogObjectBatch {
    pub objects: Vec<CatalogObject>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchUpsertCatalogObjectsRequest {
    pub idempotency_key: String,
    pub batches: Vec<CatalogObjectBatch>,
}

impl BatchUpsertCatalogObjectsRequest {
    /// Wrap all objects in a single batch.
    pub fn single_batch(idempotency_key: impl Into<String>, objects: Vec<CatalogObject>) -> Self {
        Self {
            idempotency_key: idempotency_key.into(),
            batches: vec![CatalogObjectBatch { objects }],
        }
    }
}

/// Maps a client-generated id to the id the server assigned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogIdMapping {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_object_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
}

impl CatalogIdMapping {
    pub fn new(client_object_id: impl Into<String>, object_id: impl Into<String>) -> Self {
        Self {
            client_object_id: Some(client_object_id.into()),
            object_id: Some(object_id.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchUpsertCatalogObjectsResponse {
    #[serde(default)]
    pub objects: Vec<CatalogObject>,
    #[serde(default)]
    pub id_mappings: Vec<CatalogIdMapping>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ApiErrorDetail>,
}

impl BatchUpsertCatalogObjectsResponse {
    /// Fail if the response carried errors.
    pub fn into_result(self) -> Result<Self> {
        if self.errors.is_empty() {
            Ok(self)
        } else {
            Err(CatalogError::remote("BatchUpsertCatalogObjects", self.errors))
        }
    }
}
