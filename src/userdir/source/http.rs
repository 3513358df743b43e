use super::UserSource;
use crate::error::{DirectoryError, Result};
use crate::model::User;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("userdir/", env!("CARGO_PKG_VERSION"));

/// Reads the user list with a single blocking GET.
pub struct HttpUserSource {
    client: Client,
    endpoint: String,
}

impl HttpUserSource {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

impl UserSource for HttpUserSource {
    fn fetch_users(&self) -> Result<Vec<User>> {
        debug!(endpoint = %self.endpoint, "requesting users");
        let response = self
            .client
            .get(&self.endpoint)
            .header(ACCEPT, "application/json")
            .send()?;

        let status = response.status();
        debug!(status = status.as_u16(), "endpoint responded");
        let body = response.bytes()?;
        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        Ok(serde_json::from_slice(&body)?)
    }

    fn describe(&self) -> String {
        self.endpoint.clone()
    }
}

fn status_error(status: StatusCode, body: &[u8]) -> DirectoryError {
    let preview = body_preview(body);
    if preview.is_empty() {
        DirectoryError::Fetch(format!("status {}", status.as_u16()))
    } else {
        DirectoryError::Fetch(format!("status {}: {}", status.as_u16(), preview))
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 120;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview: String = compact.chars().take(PREVIEW_CHAR_LIMIT).collect();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{}...", preview)
    } else {
        preview
    }
}
