use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::CensistaLookup;
use crate::api::error::LookupError;
use crate::api::types::{Record, SearchQuery};

pub const RESOURCE_PATH: &str = "/censistas";

/// HTTP client for the credential lookup service.
#[derive(Debug, Clone)]
pub struct CensistasClient {
    pub base_url: String,
    pub(crate) inner: reqwest::Client,
}

impl CensistasClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .user_agent(concat!("censistas-console/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            base_url: base_url.into(),
            inner,
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}{RESOURCE_PATH}", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CensistaLookup for CensistasClient {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Record>, LookupError> {
        let url = self.endpoint();
        info!(endpoint=%url, dni = query.dni.is_some(), nombre = query.nombre.is_some(), "sending lookup request");

        let resp = self.inner.get(&url).query(query).send().await?;
        let status = resp.status();
        if !status.is_success() {
            warn!(status=%status.as_u16(), "lookup returned non-success status");
            return Err(LookupError::Status(status));
        }

        let body = resp.text().await?;
        let records = parse_response(&body)?;
        info!(count = records.len(), "lookup succeeded");
        Ok(records)
    }
}

/// Validates the `{ ok, count, data }` envelope. Only `data` is checked;
/// `ok` and `count` are informational.
pub fn parse_response(body: &str) -> Result<Vec<Record>, LookupError> {
    let value: Value = serde_json::from_str(body)?;
    let Value::Object(mut envelope) = value else {
        warn!("lookup response is not a JSON object");
        return Err(LookupError::UnexpectedShape);
    };
    let Some(Value::Array(items)) = envelope.remove("data") else {
        warn!("lookup response has no `data` array");
        return Err(LookupError::UnexpectedShape);
    };

    if let Some(count) = envelope.get("count").and_then(Value::as_u64)
        && count != items.len() as u64
    {
        debug!(count, len = items.len(), "response count disagrees with data length");
    }

    items
        .into_iter()
        .map(|item| {
            if !item.is_object() {
                warn!("lookup response contains a non-object record");
                return Err(LookupError::UnexpectedShape);
            }
            serde_json::from_value::<Record>(item).map_err(|_| LookupError::UnexpectedShape)
        })
        .collect()
}
