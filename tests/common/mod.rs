/*!
 * Common test utilities for the plexsub test suite
 */

use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use plexsub::plex::models::{ItemMetadata, Media, Part, Stream, SUBTITLE_STREAM_TYPE};


/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Builds item metadata for a movie with one part carrying the given number
/// of subtitle streams, preceded by a video and an audio stream.
pub fn movie_item(rating_key: &str, title: &str, subtitle_count: usize) -> ItemMetadata {
    let mut streams = vec![
        Stream {
            stream_type: 1,
            codec: Some("h264".to_string()),
            ..Default::default()
        },
        Stream {
            stream_type: 2,
            codec: Some("aac".to_string()),
            language: Some("English".to_string()),
            ..Default::default()
        },
    ];

    for i in 0..subtitle_count {
        streams.push(Stream {
            stream_type: SUBTITLE_STREAM_TYPE,
            codec: Some("srt".to_string()),
            language: Some("English".to_string()),
            display_title: Some(format!("English (SRT #{})", i)),
        });
    }

    ItemMetadata {
        rating_key: rating_key.to_string(),
        title: title.to_string(),
        media: vec![Media {
            id: Some(1),
            parts: vec![Part {
                key: format!("/library/parts/{}/file.mkv", rating_key),
                container: Some("mkv".to_string()),
                streams,
            }],
        }],
    }
}
