/*!
 * Tests for Plex client construction and URL building
 */

use std::time::Duration;

use plexsub::errors::PlexError;
use plexsub::plex::MediaLibrary;
use plexsub::PlexClient;

fn client(url: &str) -> Result<PlexClient, PlexError> {
    PlexClient::new(url, "TOKEN", Duration::from_secs(5))
}

/// Test that a well-formed server address is accepted
#[test]
fn test_new_withValidUrl_shouldSucceed() {
    assert!(client("http://192.168.1.10:32400").is_ok());
    assert!(client("https://plex.example.com").is_ok());
}

/// Test that a malformed server address fails up front
#[test]
fn test_new_withMalformedUrl_shouldFail() {
    assert!(matches!(
        client("not a url"),
        Err(PlexError::Connection(_))
    ));
}

/// Test that non-HTTP schemes are rejected
#[test]
fn test_new_withNonHttpScheme_shouldFail() {
    assert!(matches!(
        client("ftp://plex.example.com"),
        Err(PlexError::Connection(_))
    ));
}

/// Test that a trailing slash is stripped from the base URL
#[test]
fn test_new_withTrailingSlash_shouldNormalize() {
    let client = client("http://plex.local:32400/").unwrap();
    assert_eq!(client.base_url(), "http://plex.local:32400");
}

/// Test that the media URL carries the part key and the token query parameter
#[test]
fn test_media_url_withPartKey_shouldAppendToken() {
    let client = client("http://plex.local:32400").unwrap();
    let url = client.media_url("/library/parts/9/1234/file.mkv");

    assert_eq!(
        url,
        "http://plex.local:32400/library/parts/9/1234/file.mkv?X-Plex-Token=TOKEN"
    );
}
