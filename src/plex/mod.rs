/*!
 * Plex HTTP API access.
 *
 * This module contains the client implementation and the response models
 * for the parts of the Plex API the extractor consumes:
 * - `client`: reqwest-based `PlexClient`
 * - `models`: serde models for the MediaContainer JSON responses
 */

use async_trait::async_trait;

use crate::errors::PlexError;
use crate::plex::models::ItemMetadata;

/// Read-only view of a media library, as the extractor consumes it.
///
/// `PlexClient` is the production implementation; tests drive the extractor
/// with an in-memory library instead of a live server.
#[async_trait]
pub trait MediaLibrary: Send + Sync {
    /// Find an item by exact title within the named section.
    ///
    /// Returns `Ok(None)` when the title does not exist; that case is
    /// non-fatal for callers. When several items share the title, the first
    /// one in server order wins.
    async fn find_item(&self, section: &str, title: &str) -> Result<Option<String>, PlexError>;

    /// Fetch the full metadata of an item, media parts and streams included.
    ///
    /// Section listings carry no stream detail, so this is always a fresh
    /// server round trip.
    async fn item_metadata(&self, rating_key: &str) -> Result<ItemMetadata, PlexError>;

    /// Build the remote media URL for a part key, token included.
    fn media_url(&self, part_key: &str) -> String;
}

pub mod client;
pub mod models;
