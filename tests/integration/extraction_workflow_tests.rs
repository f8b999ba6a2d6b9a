/*!
 * End-to-end extraction scenarios against an in-memory library, with the
 * recording transcoder actually producing output files.
 */

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use plexsub::app_config::Config;
use plexsub::extractor::{Extractor, StreamOutcome};

use crate::common;
use crate::common::mocks::{InMemoryLibrary, RecordingTranscoder};

fn extractor_for(
    output_dir: &Path,
    library: InMemoryLibrary,
    transcoder: Arc<RecordingTranscoder>,
) -> Extractor {
    let config = Config {
        output_dir: output_dir.to_path_buf(),
        ..Config::default()
    };
    Extractor::new(config, Arc::new(library), transcoder)
}

/// Scenario: "The Matrix" with two subtitle streams, both primaries succeed
#[tokio::test]
async fn test_extraction_withTwoGoodStreams_shouldWriteTwoSrtFiles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let output_dir = temp_dir.path().join("subtitles");

    let library = InMemoryLibrary::movies(vec![common::movie_item("101", "The Matrix", 2)]);
    let transcoder = Arc::new(RecordingTranscoder::succeeding().with_output_files());

    let extractor = extractor_for(&output_dir, library, transcoder.clone());
    let report = extractor.run("The Matrix").await?;

    assert_eq!(report.extracted_count(), 2);
    assert!(output_dir.join("The_Matrix_subtitle_0.srt").is_file());
    assert!(output_dir.join("The_Matrix_subtitle_1.srt").is_file());

    Ok(())
}

/// Scenario: title not present in the library
#[tokio::test]
async fn test_extraction_withUnknownMovie_shouldCreateNoFiles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let output_dir = temp_dir.path().join("subtitles");

    let library = InMemoryLibrary::movies(vec![common::movie_item("101", "The Matrix", 2)]);
    let transcoder = Arc::new(RecordingTranscoder::succeeding().with_output_files());

    let extractor = extractor_for(&output_dir, library, transcoder.clone());
    let report = extractor.run("Unknown Movie").await?;

    assert!(!report.item_found);
    assert_eq!(transcoder.job_count(), 0);
    assert!(!output_dir.exists());

    Ok(())
}

/// Scenario: stream 0 fails as text, the stream-copy fallback succeeds
#[tokio::test]
async fn test_extraction_withBitmapStream_shouldProduceSupFileOnly() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let output_dir = temp_dir.path().join("subtitles");

    let library = InMemoryLibrary::movies(vec![common::movie_item("101", "The Matrix", 1)]);
    let transcoder = Arc::new(
        RecordingTranscoder::failing_primary_for(&[0]).with_output_files(),
    );

    let extractor = extractor_for(&output_dir, library, transcoder.clone());
    let report = extractor.run("The Matrix").await?;

    assert_eq!(report.extracted_count(), 1);
    assert!(matches!(
        report.streams[0].outcome,
        StreamOutcome::Fallback { .. }
    ));

    assert!(output_dir.join("The_Matrix_subtitle_0.sup").is_file());
    assert!(!output_dir.join("The_Matrix_subtitle_0.srt").exists());

    Ok(())
}

/// Rerunning an extraction is idempotent for naming: files are overwritten,
/// never duplicated under new names
#[tokio::test]
async fn test_extraction_runTwice_shouldReuseSameFileNames() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let output_dir = temp_dir.path().join("subtitles");

    let library = InMemoryLibrary::movies(vec![common::movie_item("101", "The Matrix", 2)]);
    let transcoder = Arc::new(RecordingTranscoder::succeeding().with_output_files());

    let extractor = extractor_for(&output_dir, library, transcoder.clone());
    extractor.run("The Matrix").await?;
    extractor.run("The Matrix").await?;

    let entries: Vec<_> = std::fs::read_dir(&output_dir)?.collect();
    assert_eq!(entries.len(), 2);

    Ok(())
}
