/// Authenticated HTTP client for the hosted REST backend
///
/// One instance is built at startup and shared by every handler. Each call is a
/// single attempt: transport failures and non-2xx statuses surface as `FetchError`
/// and are rendered by the caller, never retried.

use crate::baas::query::{Query, Resource};
use crate::config::BaasConfig;
use axum::body::Bytes;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Failure of a single REST call
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network or protocol failure before a response arrived
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status
    #[error("Request failed with status code {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body was not the JSON we expected
    #[error("Unexpected response body: {0}")]
    Decode(String),

    /// A request body could not be serialized
    #[error("Failed to encode request body: {0}")]
    Encode(String),
}

/// Request body for inserts and updates
#[derive(Debug)]
pub enum Payload {
    Json(Value),
    Multipart(MultipartBody),
}

impl Payload {
    pub fn json(body: &impl Serialize) -> Result<Self, FetchError> {
        serde_json::to_value(body)
            .map(Payload::Json)
            .map_err(|e| FetchError::Encode(e.to_string()))
    }
}

/// Multipart form body kept as plain data until the request is sent
#[derive(Debug, Clone, Default)]
pub struct MultipartBody {
    parts: Vec<MultipartPart>,
}

#[derive(Debug, Clone)]
enum MultipartPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        content_type: String,
        data: Bytes,
    },
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.parts.push(MultipartPart::Text {
            name: name.to_string(),
            value: value.into(),
        });
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, data: Bytes) -> Self {
        self.parts.push(MultipartPart::File {
            name: name.to_string(),
            file_name: file_name.to_string(),
            content_type: content_type.to_string(),
            data,
        });
        self
    }

    /// Names of all parts, in order
    pub fn part_names(&self) -> Vec<&str> {
        self.parts
            .iter()
            .map(|part| match part {
                MultipartPart::Text { name, .. } | MultipartPart::File { name, .. } => name.as_str(),
            })
            .collect()
    }

    fn into_form(self) -> Result<reqwest::multipart::Form, FetchError> {
        let mut form = reqwest::multipart::Form::new();
        for part in self.parts {
            form = match part {
                MultipartPart::Text { name, value } => form.text(name, value),
                MultipartPart::File { name, file_name, content_type, data } => {
                    let file = reqwest::multipart::Part::bytes(data.to_vec())
                        .file_name(file_name)
                        .mime_str(&content_type)?;
                    form.part(name, file)
                }
            };
        }
        Ok(form)
    }
}

/// REST client carrying the backend URL and credentials as immutable fields
#[derive(Debug, Clone)]
pub struct BaasClient {
    http: Client,
    rest_url: String,
    api_key: String,
}

impl BaasClient {
    /// Build the client from configuration; the REST root is `{url}/rest/v1`
    pub fn new(config: &BaasConfig) -> Result<Self, FetchError> {
        let http = Client::builder().build()?;
        Ok(Self {
            http,
            rest_url: format!("{}/rest/v1", config.url.trim_end_matches('/')),
            api_key: config.anon_key.clone(),
        })
    }

    /// List records matching the query
    pub async fn select<T: DeserializeOwned>(&self, query: &Query) -> Result<Vec<T>, FetchError> {
        tracing::debug!("🔍 GET {} {:?}", query.path(), query.params());
        let response = self.request(Method::GET, query).send().await?;
        decode(response).await
    }

    /// First record matching the query, `None` when nothing matches
    pub async fn select_one<T: DeserializeOwned>(&self, query: &Query) -> Result<Option<T>, FetchError> {
        Ok(self.select(query).await?.into_iter().next())
    }

    /// Create records; returns the stored representation
    pub async fn insert<T: DeserializeOwned>(
        &self,
        resource: Resource,
        payload: Payload,
    ) -> Result<Vec<T>, FetchError> {
        let query = Query::new(resource);
        tracing::debug!("📝 POST {}", query.path());
        let builder = self
            .request(Method::POST, &query)
            .header("Prefer", "return=representation");
        let response = with_payload(builder, payload)?.send().await?;
        decode(response).await
    }

    /// Partially update the records matched by the query (usually `id=eq.<id>`)
    pub async fn update<T: DeserializeOwned>(
        &self,
        query: &Query,
        payload: Payload,
    ) -> Result<Vec<T>, FetchError> {
        tracing::debug!("✏️ PATCH {} {:?}", query.path(), query.params());
        let builder = self
            .request(Method::PATCH, query)
            .header("Prefer", "return=representation");
        let response = with_payload(builder, payload)?.send().await?;
        decode(response).await
    }

    /// Delete the records matched by the query
    pub async fn delete(&self, query: &Query) -> Result<(), FetchError> {
        tracing::debug!("🗑️ DELETE {} {:?}", query.path(), query.params());
        let response = self.request(Method::DELETE, query).send().await?;
        check_status(response).await?;
        Ok(())
    }

    fn request(&self, method: Method, query: &Query) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.rest_url, query.path()))
            .query(&query.params())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }
}

fn with_payload(builder: RequestBuilder, payload: Payload) -> Result<RequestBuilder, FetchError> {
    Ok(match payload {
        Payload::Json(body) => builder.json(&body),
        Payload::Multipart(body) => builder.multipart(body.into_form()?),
    })
}

async fn check_status(response: Response) -> Result<Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|json| json.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| {
            if body.is_empty() {
                status.canonical_reason().unwrap_or("unknown error").to_string()
            } else {
                body
            }
        });

    tracing::warn!("⚠️ Backend responded {}: {}", status.as_u16(), message);
    Err(FetchError::Status {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<Vec<T>, FetchError> {
    let response = check_status(response).await?;
    let body = response.text().await?;
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))
}
