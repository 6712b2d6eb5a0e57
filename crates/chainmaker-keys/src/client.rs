use std::collections::BTreeMap;

use chainmaker_core::error::KeyMaterialError;
use chainmaker_core::types::KeyScheme;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::KeysConfig;
use crate::KeySource;

/// Blocking HTTP client for a remote key daemon.
///
/// Every endpoint takes `{"args": {...}}` and answers
/// `{"Response": "...", "Error": "..."}`; a non-empty `Error` is a failure.
pub struct KeysClient {
    url: String,
    client: reqwest::blocking::Client,
}

#[derive(Serialize)]
struct KeysRequest<'a> {
    args: BTreeMap<&'a str, &'a str>,
}

#[derive(Deserialize)]
struct KeysResponse {
    #[serde(rename = "Response", default)]
    response: String,
    #[serde(rename = "Error", default)]
    error: String,
}

impl KeysClient {
    pub fn new(config: &KeysConfig) -> Result<Self, KeyMaterialError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| KeyMaterialError::Request(e.to_string()))?;
        Ok(Self {
            url: config.url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// POST `args` to `/{method}` and return the `Response` field.
    fn call(&self, method: &str, args: BTreeMap<&str, &str>) -> Result<String, KeyMaterialError> {
        let endpoint = format!("{}/{}", self.url, method);
        debug!(endpoint = %endpoint, "calling key daemon");

        let body = self
            .client
            .post(&endpoint)
            .json(&KeysRequest { args })
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.text())
            .map_err(|e| KeyMaterialError::Request(format!("connecting to {endpoint}: {e}")))?;

        parse_response(method, &body)
    }
}

fn parse_response(method: &str, body: &str) -> Result<String, KeyMaterialError> {
    let resp: KeysResponse = serde_json::from_str(body)
        .map_err(|e| KeyMaterialError::Request(format!("parsing {method} response: {e}")))?;
    if !resp.error.is_empty() {
        return Err(KeyMaterialError::Request(format!("{method}: {}", resp.error)));
    }
    Ok(resp.response)
}

impl KeySource for KeysClient {
    fn generate_key(&self, scheme: KeyScheme, credential: &str) -> Result<String, KeyMaterialError> {
        self.call(
            "gen",
            BTreeMap::from([("auth", credential), ("type", scheme.as_str()), ("name", "")]),
        )
    }

    fn public_key(&self, address: &str, credential: &str) -> Result<String, KeyMaterialError> {
        self.call("pub", BTreeMap::from([("addr", address), ("auth", credential)]))
    }

    fn convert(&self, address: &str, credential: &str) -> Result<Vec<u8>, KeyMaterialError> {
        self.call("convert", BTreeMap::from([("addr", address), ("auth", credential)]))
            .map(String::into_bytes)
    }
}
