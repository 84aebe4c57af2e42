//! ungh.cc user directory

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use herald_core::config::IdentityConfig;
use herald_core::error::LookupError;

use super::{request_error, LookupResult, UserDirectory};

#[derive(Debug, Deserialize)]
struct FindResponse {
    user: Option<FoundUser>,
}

#[derive(Debug, Deserialize)]
struct FoundUser {
    username: Option<String>,
}

/// User directory served over HTTP, `{email}` templated into the URL
pub struct UnghDirectory {
    url_template: String,
    client: Client,
}

impl UnghDirectory {
    /// Create a directory client for a URL template
    pub fn new(url_template: impl Into<String>) -> Self {
        Self {
            url_template: url_template.into(),
            client: Client::new(),
        }
    }

    /// Create a directory client from configuration
    pub fn from_config(config: &IdentityConfig) -> Self {
        Self::new(&config.directory_url)
    }

    fn url_for(&self, email: &str) -> String {
        self.url_template.replace("{email}", email)
    }
}

#[async_trait]
impl UserDirectory for UnghDirectory {
    #[instrument(skip(self))]
    async fn find_username(&self, email: &str) -> LookupResult<String> {
        let url = self.url_for(email);
        let response = self.client.get(&url).send().await.map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body: FindResponse = response
            .json()
            .await
            .map_err(|e| LookupError::Decode(e.to_string()))?;

        let username = body
            .user
            .and_then(|u| u.username)
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| LookupError::NotFound(email.to_string()))?;

        debug!(email, username = %username, "directory lookup succeeded");
        Ok(username)
    }
}
