//! Stateless HTTP request builder and response parser for the articulos API.
//!
//! # Design
//! `ArticulosClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`. Any 2xx counts as success; only the list
//! and get-one bodies are decoded.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Articulo, ArticuloDraft, ArticuloId};

const RESOURCE: &str = "articulos";

/// Synchronous, stateless client for the articulos API.
#[derive(Debug, Clone)]
pub struct ArticulosClient {
    base_url: String,
}

impl ArticulosClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list_articulos(&self) -> HttpRequest {
        self.bare(HttpMethod::Get, self.collection_url())
    }

    pub fn build_get_articulo(&self, id: ArticuloId) -> HttpRequest {
        self.bare(HttpMethod::Get, self.item_url(id))
    }

    pub fn build_create_articulo(&self, draft: &ArticuloDraft) -> Result<HttpRequest, ApiError> {
        self.with_json(HttpMethod::Post, self.collection_url(), draft)
    }

    pub fn build_update_articulo(
        &self,
        id: ArticuloId,
        draft: &ArticuloDraft,
    ) -> Result<HttpRequest, ApiError> {
        self.with_json(HttpMethod::Put, self.item_url(id), draft)
    }

    pub fn build_delete_articulo(&self, id: ArticuloId) -> HttpRequest {
        self.bare(HttpMethod::Delete, self.item_url(id))
    }

    pub fn parse_list_articulos(&self, response: HttpResponse) -> Result<Vec<Articulo>, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    pub fn parse_get_articulo(&self, response: HttpResponse) -> Result<Articulo, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    /// Create, update and delete only look at the status; the body is ignored.
    pub fn parse_mutation(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    fn collection_url(&self) -> String {
        format!("{}/{RESOURCE}", self.base_url)
    }

    fn item_url(&self, id: ArticuloId) -> String {
        format!("{}/{RESOURCE}/{id}", self.base_url)
    }

    fn bare(&self, method: HttpMethod, path: String) -> HttpRequest {
        HttpRequest {
            method,
            path,
            headers: Vec::new(),
            body: None,
        }
    }

    fn with_json(
        &self,
        method: HttpMethod,
        path: String,
        draft: &ArticuloDraft,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(draft).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method,
            path,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

/// Map non-2xx status codes to the matching `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
