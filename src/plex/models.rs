use serde::Deserialize;

/// Plex `streamType` value identifying a subtitle stream.
pub const SUBTITLE_STREAM_TYPE: u32 = 3;

/// Response of `GET /library/sections`
#[derive(Debug, Clone, Deserialize)]
pub struct SectionsResponse {
    /// Top-level container every Plex response is wrapped in
    #[serde(rename = "MediaContainer")]
    pub container: SectionContainer,
}

/// Container of library sections
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SectionContainer {
    /// One entry per library section
    #[serde(alias = "Directory", default)]
    pub directories: Vec<Section>,
}

/// A single library section ("Movies", "TV Shows", ...)
#[derive(Debug, Clone, Deserialize)]
pub struct Section {
    /// Section key used in further requests
    pub key: String,
    /// Section display title
    pub title: String,
    /// Section content type (movie, show, artist, ...)
    #[serde(alias = "type", default)]
    pub section_type: String,
}

/// Response of `GET /library/sections/{key}/all`
#[derive(Debug, Clone, Deserialize)]
pub struct ItemsResponse {
    #[serde(rename = "MediaContainer")]
    pub container: ItemContainer,
}

/// Container of item summaries in a section listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemContainer {
    /// Items of the section; no media detail at this level
    #[serde(alias = "Metadata", default)]
    pub items: Vec<ItemSummary>,
}

/// An item as reported by a section listing
#[derive(Debug, Clone, Deserialize)]
pub struct ItemSummary {
    /// Server-wide item identifier
    #[serde(alias = "ratingKey")]
    pub rating_key: String,
    /// Item title
    pub title: String,
}

/// Response of `GET /library/metadata/{ratingKey}`
#[derive(Debug, Clone, Deserialize)]
pub struct MetadataResponse {
    #[serde(rename = "MediaContainer")]
    pub container: MetadataContainer,
}

/// Container of full item metadata
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetadataContainer {
    #[serde(alias = "Metadata", default)]
    pub items: Vec<ItemMetadata>,
}

/// Full metadata of a single item, including media and stream detail
#[derive(Debug, Clone, Deserialize)]
pub struct ItemMetadata {
    /// Server-wide item identifier
    #[serde(alias = "ratingKey")]
    pub rating_key: String,
    /// Item title
    pub title: String,
    /// Playable media entries
    #[serde(alias = "Media", default)]
    pub media: Vec<Media>,
}

/// One playable version of an item
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Media {
    /// Media identifier
    #[serde(default)]
    pub id: Option<u64>,
    /// File parts making up this media
    #[serde(alias = "Part", default)]
    pub parts: Vec<Part>,
}

/// A single file component of a media entry
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Part {
    /// Server-relative path of the file; the remote media URL is built from it
    #[serde(default)]
    pub key: String,
    /// Container format of the file (mkv, mp4, ...)
    #[serde(default)]
    pub container: Option<String>,
    /// All streams of the part, subtitles included
    #[serde(alias = "Stream", default)]
    pub streams: Vec<Stream>,
}

/// A single stream descriptor within a part
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Stream {
    /// Plex stream type (1 video, 2 audio, 3 subtitle)
    #[serde(alias = "streamType", default)]
    pub stream_type: u32,
    /// Stream codec (srt, hdmv_pgs_subtitle, ...)
    #[serde(default)]
    pub codec: Option<String>,
    /// Stream language, when tagged
    #[serde(default)]
    pub language: Option<String>,
    /// Human-readable stream description
    #[serde(alias = "displayTitle", default)]
    pub display_title: Option<String>,
}

impl Part {
    /// Subtitle streams of this part, in server-reported order.
    ///
    /// The position within the returned list is the zero-based index the
    /// transcoder selects the stream by (`0:s:{i}`).
    pub fn subtitle_streams(&self) -> Vec<&Stream> {
        self.streams
            .iter()
            .filter(|s| s.stream_type == SUBTITLE_STREAM_TYPE)
            .collect()
    }
}

impl Stream {
    /// Short description used in log output
    pub fn describe(&self) -> String {
        match (&self.display_title, &self.language, &self.codec) {
            (Some(display), _, _) => display.clone(),
            (None, Some(lang), Some(codec)) => format!("{} ({})", lang, codec),
            (None, Some(lang), None) => lang.clone(),
            (None, None, Some(codec)) => codec.clone(),
            (None, None, None) => "unknown".to_string(),
        }
    }
}
