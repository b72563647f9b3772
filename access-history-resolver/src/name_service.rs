use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, StatusCode};
use serde::Deserialize;

use crate::{Directory, DirectoryError, Result};

#[derive(Deserialize)]
struct NameRecord {
    #[serde(default)]
    name: Option<String>,
}

/// Client for a name service exposing `GET {url}/{address}` → `{"name": ...}`.
///
/// A 404 or an empty name is reported as "no entry"; any other non-success
/// status is an error.
pub struct NameServiceClient {
    url: String,
    client: ReqwestClient,
}

impl NameServiceClient {
    pub fn new(url: &str) -> Self {
        NameServiceClient {
            url: url.trim_end_matches('/').to_string(),
            client: ReqwestClient::new(),
        }
    }

    fn lookup_url(&self, address: &str) -> String {
        format!("{}/{}", self.url, address)
    }
}

#[async_trait]
impl Directory for NameServiceClient {
    async fn lookup(&self, address: &str) -> Result<Option<String>> {
        let res = self.client.get(self.lookup_url(address)).send().await?;

        match res.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let record: NameRecord = res.json().await?;
                Ok(record.name.filter(|name| !name.trim().is_empty()))
            }
            status => Err(DirectoryError::Status(status.as_u16())),
        }
    }
}
