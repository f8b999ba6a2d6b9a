/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use plexsub::file_utils::FileManager;
use std::path::Path;

use crate::common;

/// Test that sanitize_title replaces spaces with underscores
#[test]
fn test_sanitize_title_withSpaces_shouldReplaceWithUnderscores() {
    assert_eq!(FileManager::sanitize_title("The Matrix"), "The_Matrix");
    assert_eq!(
        FileManager::sanitize_title("The Lord of the Rings"),
        "The_Lord_of_the_Rings"
    );
}

/// Test that sanitize_title removes colons
#[test]
fn test_sanitize_title_withColons_shouldRemoveThem() {
    assert_eq!(
        FileManager::sanitize_title("Mission: Impossible"),
        "Mission_Impossible"
    );
    assert_eq!(FileManager::sanitize_title("12:08"), "1208");
}

/// Test that sanitize_title is idempotent
#[test]
fn test_sanitize_title_appliedTwice_shouldMatchSingleApplication() {
    let titles = ["The Matrix", "Mission: Impossible", "Alien", "A: B C"];
    for title in titles {
        let once = FileManager::sanitize_title(title);
        let twice = FileManager::sanitize_title(&once);
        assert_eq!(once, twice, "sanitization not idempotent for {:?}", title);
    }
}

/// Test that subtitle_output_path produces the deterministic naming scheme
#[test]
fn test_subtitle_output_path_withIndexAndExtension_shouldFormatName() {
    let path = FileManager::subtitle_output_path("subtitles", "The_Matrix", 0, "srt");
    assert_eq!(path, Path::new("subtitles/The_Matrix_subtitle_0.srt"));

    let path = FileManager::subtitle_output_path("/tmp/out", "Alien", 3, "sup");
    assert_eq!(path, Path::new("/tmp/out/Alien_subtitle_3.sup"));
}

/// Test that ensure_dir creates directories as needed
#[test]
fn test_ensure_dir_withNonExistentDir_shouldCreateDirectory() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_subdir = temp_dir.path().join("subtitles");

    FileManager::ensure_dir(&test_subdir)?;

    assert!(test_subdir.exists());
    assert!(test_subdir.is_dir());

    // Repeating the call on an existing directory is a no-op
    FileManager::ensure_dir(&test_subdir)?;
    assert!(test_subdir.is_dir());

    Ok(())
}

/// Test that file_exists and dir_exists distinguish files from directories
#[test]
fn test_existence_checks_withFileAndDir_shouldDistinguish() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(&temp_dir.path().to_path_buf(), "a.srt", "1\n")?;

    assert!(FileManager::file_exists(&file));
    assert!(!FileManager::dir_exists(&file));
    assert!(FileManager::dir_exists(temp_dir.path()));
    assert!(!FileManager::file_exists(temp_dir.path()));

    Ok(())
}
