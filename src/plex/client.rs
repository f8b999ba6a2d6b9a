use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use crate::errors::PlexError;
use crate::plex::models::{
    ItemMetadata, ItemsResponse, MetadataResponse, Section, SectionsResponse,
};
use crate::plex::MediaLibrary;

/// Plex client for interacting with the Plex server HTTP API
#[derive(Debug)]
pub struct PlexClient {
    /// Base URL of the Plex server, without trailing slash
    base_url: String,
    /// Access token, sent as the X-Plex-Token query parameter
    token: String,
    /// HTTP client for making requests
    client: Client,
}

impl PlexClient {
    /// Create a new Plex client for the given server address and token
    pub fn new(
        server_url: impl Into<String>,
        token: impl Into<String>,
        request_timeout: Duration,
    ) -> Result<Self, PlexError> {
        let server_url = server_url.into();

        // Validate the address up front so a malformed one fails here and
        // not inside the first request
        let parsed = Url::parse(&server_url)
            .map_err(|e| PlexError::Connection(format!("Invalid server URL {}: {}", server_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(PlexError::Connection(format!(
                "Unsupported URL scheme: {}",
                parsed.scheme()
            )));
        }

        let base_url = server_url.trim_end_matches('/').to_string();

        Ok(Self {
            base_url,
            token: token.into(),
            client: Client::builder()
                .timeout(request_timeout)
                .build()
                .unwrap_or_default(),
        })
    }

    /// Base URL of the server this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Verify the server is reachable and the token is accepted.
    ///
    /// Surfaced failures are fatal: there is nothing useful to do against a
    /// server that cannot be reached or a token that is rejected.
    pub async fn connect(&self) -> Result<(), PlexError> {
        let url = format!("{}/identity", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("X-Plex-Token", self.token.as_str())])
            .send()
            .await
            .map_err(|e| PlexError::Connection(format!("Failed to reach Plex server: {}", e)))?;

        match response.status() {
            status if status.is_success() => {
                debug!("Connected to Plex server at {}", self.base_url);
                Ok(())
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(PlexError::Authentication(
                "Plex server rejected the access token".to_string(),
            )),
            status => Err(PlexError::Api {
                status_code: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            }),
        }
    }

    /// List all library sections on the server
    pub async fn sections(&self) -> Result<Vec<Section>, PlexError> {
        let response: SectionsResponse = self.get_json("/library/sections").await?;
        Ok(response.container.directories)
    }

    /// Find a library section by exact title
    pub async fn section_by_title(&self, name: &str) -> Result<Section, PlexError> {
        let sections = self.sections().await?;
        sections
            .into_iter()
            .find(|s| s.title == name)
            .ok_or_else(|| PlexError::SectionNotFound(name.to_string()))
    }

    // @fetches: Path relative to the base URL, token attached, JSON decoded
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, PlexError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&[("X-Plex-Token", self.token.as_str())])
            .send()
            .await
            .map_err(|e| PlexError::Connection(format!("Request to {} failed: {}", path, e)))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(PlexError::Authentication(
                "Plex server rejected the access token".to_string(),
            ));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!("Plex API error ({}) for {}: {}", status, path, message);
            return Err(PlexError::Api {
                status_code: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| PlexError::Parse(format!("{} returned unexpected JSON: {}", path, e)))
    }
}

#[async_trait]
impl MediaLibrary for PlexClient {
    async fn find_item(&self, section: &str, title: &str) -> Result<Option<String>, PlexError> {
        let section = self.section_by_title(section).await?;

        let path = format!("/library/sections/{}/all", section.key);
        let response: ItemsResponse = self.get_json(&path).await?;

        // First exact match in server order wins
        let rating_key = response
            .container
            .items
            .into_iter()
            .find(|item| item.title == title)
            .map(|item| item.rating_key);

        debug!(
            "Section {:?}: title {:?} resolved to {:?}",
            section.title, title, rating_key
        );

        Ok(rating_key)
    }

    async fn item_metadata(&self, rating_key: &str) -> Result<ItemMetadata, PlexError> {
        let path = format!("/library/metadata/{}", rating_key);
        let response: MetadataResponse = self.get_json(&path).await?;

        response
            .container
            .items
            .into_iter()
            .next()
            .ok_or_else(|| {
                PlexError::Parse(format!("Metadata response for {} carried no item", rating_key))
            })
    }

    fn media_url(&self, part_key: &str) -> String {
        format!("{}{}?X-Plex-Token={}", self.base_url, part_key, self.token)
    }
}
