use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::PathBuf;
use std::sync::Arc;

use crate::app_config::Config;
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::plex::models::{ItemMetadata, Part};
use crate::plex::MediaLibrary;
use crate::transcoder::{TranscodeJob, Transcoder};

// @module: Main extraction workflow

/// Final outcome of one subtitle stream, after at most two attempts.
///
/// The retry-to-fallback behavior is carried in the type: a failed primary
/// attempt leads to exactly one stream-copy attempt, and whatever happens
/// then is final. No attempt ever aborts the remaining streams.
#[derive(Debug)]
pub enum StreamOutcome {
    /// Primary conversion succeeded
    Primary {
        /// File the stream was written to
        output: PathBuf,
    },
    /// Primary conversion failed, stream-copy fallback succeeded
    Fallback {
        /// File the stream was written to
        output: PathBuf,
        /// Why the primary attempt failed
        primary_error: String,
    },
    /// Both attempts failed; the stream was skipped
    Failed {
        /// Why the primary attempt failed
        primary_error: String,
        /// Why the fallback attempt failed
        fallback_error: String,
    },
}

impl StreamOutcome {
    /// Whether an output file was produced for this stream
    pub fn succeeded(&self) -> bool {
        !matches!(self, StreamOutcome::Failed { .. })
    }
}

/// Outcome of one subtitle stream together with its identity
#[derive(Debug)]
pub struct StreamResult {
    /// Zero-based index among the part's subtitle streams
    pub stream_index: usize,
    /// Human-readable stream description, for reporting
    pub description: String,
    /// What happened for this stream
    pub outcome: StreamOutcome,
}

/// Summary of a whole extraction run
#[derive(Debug, Default)]
pub struct ExtractionReport {
    /// Whether the title resolved to a library item
    pub item_found: bool,
    /// One entry per subtitle stream, across all media parts
    pub streams: Vec<StreamResult>,
}

impl ExtractionReport {
    /// Report for a title that does not exist in the library
    pub fn not_found() -> Self {
        Self {
            item_found: false,
            streams: Vec::new(),
        }
    }

    /// Number of streams that produced an output file
    pub fn extracted_count(&self) -> usize {
        self.streams.iter().filter(|s| s.outcome.succeeded()).count()
    }

    /// Number of streams skipped after both attempts failed
    pub fn failed_count(&self) -> usize {
        self.streams.len() - self.extracted_count()
    }
}

/// Main extraction workflow: resolve a title, enumerate its subtitle
/// streams, and run the transcoder once or twice per stream.
pub struct Extractor {
    // @field: App configuration
    config: Config,
    // @field: Library the item is resolved against
    library: Arc<dyn MediaLibrary>,
    // @field: External transcoder
    transcoder: Arc<dyn Transcoder>,
}

impl Extractor {
    /// Create an extractor over the given library and transcoder
    pub fn new(config: Config, library: Arc<dyn MediaLibrary>, transcoder: Arc<dyn Transcoder>) -> Self {
        Self {
            config,
            library,
            transcoder,
        }
    }

    /// Run a full extraction for one title.
    ///
    /// A missing title is not an error: it logs a warning and returns an
    /// empty report without touching the filesystem or spawning anything.
    pub async fn run(&self, title: &str) -> Result<ExtractionReport, AppError> {
        let Some(rating_key) = self.library.find_item(&self.config.section, title).await? else {
            warn!(
                "Title not found in section {:?}: {}",
                self.config.section, title
            );
            return Ok(ExtractionReport::not_found());
        };

        // Section listings carry no stream detail, so refresh the item
        // from the metadata endpoint before reading parts
        let item = self.library.item_metadata(&rating_key).await?;

        self.extract_item(&item).await
    }

    /// Extract every subtitle stream of an already-resolved item
    pub async fn extract_item(&self, item: &ItemMetadata) -> Result<ExtractionReport, AppError> {
        let base = FileManager::sanitize_title(&item.title);

        FileManager::ensure_dir(&self.config.output_dir)
            .map_err(|e| AppError::File(e.to_string()))?;

        let mut report = ExtractionReport {
            item_found: true,
            streams: Vec::new(),
        };

        for media in &item.media {
            for part in &media.parts {
                let results = self.extract_part_streams(&base, part).await;
                report.streams.extend(results);
            }
        }

        if report.streams.is_empty() {
            info!("No subtitle streams found for {}", item.title);
        } else {
            info!(
                "Extracted {}/{} subtitle stream(s) for {}",
                report.extracted_count(),
                report.streams.len(),
                item.title
            );
        }

        Ok(report)
    }

    /// Extract the subtitle streams of one media part, in server order
    async fn extract_part_streams(&self, base: &str, part: &Part) -> Vec<StreamResult> {
        let subtitle_streams = part.subtitle_streams();
        if subtitle_streams.is_empty() {
            debug!("Part {:?} has no subtitle streams", part.key);
            return Vec::new();
        }

        let input_url = self.library.media_url(&part.key);

        let progress = ProgressBar::new(subtitle_streams.len() as u64);
        progress.set_style(
            ProgressStyle::with_template("{spinner:.green} [{pos}/{len}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let mut results = Vec::with_capacity(subtitle_streams.len());
        for (index, stream) in subtitle_streams.iter().enumerate() {
            let description = stream.describe();
            progress.set_message(description.clone());

            let outcome = self.extract_stream(&input_url, base, index).await;
            results.push(StreamResult {
                stream_index: index,
                description,
                outcome,
            });

            progress.inc(1);
        }
        progress.finish_and_clear();

        results
    }

    /// One stream: primary attempt, then at most one stream-copy fallback
    async fn extract_stream(&self, input_url: &str, base: &str, index: usize) -> StreamOutcome {
        let primary_output = FileManager::subtitle_output_path(
            &self.config.output_dir,
            base,
            index,
            &self.config.primary_format,
        );

        let primary_job = TranscodeJob {
            input_url: input_url.to_string(),
            stream_index: index,
            output_path: primary_output.clone(),
            stream_copy: false,
        };

        let primary_error = match self.transcoder.run(&primary_job).await {
            Ok(()) => {
                info!("Subtitles extracted successfully: {:?}", primary_output);
                return StreamOutcome::Primary {
                    output: primary_output,
                };
            }
            Err(e) => {
                error!(
                    "Error extracting stream {} as .{}: {}",
                    index, self.config.primary_format, e
                );
                e.to_string()
            }
        };

        let fallback_output = FileManager::subtitle_output_path(
            &self.config.output_dir,
            base,
            index,
            &self.config.fallback_format,
        );
        info!(
            "Retrying stream {} as .{} with stream copy: {:?}",
            index, self.config.fallback_format, fallback_output
        );

        let fallback_job = TranscodeJob {
            input_url: input_url.to_string(),
            stream_index: index,
            output_path: fallback_output.clone(),
            stream_copy: true,
        };

        match self.transcoder.run(&fallback_job).await {
            Ok(()) => {
                info!("Subtitles extracted successfully: {:?}", fallback_output);
                StreamOutcome::Fallback {
                    output: fallback_output,
                    primary_error,
                }
            }
            Err(e) => {
                error!(
                    "Error extracting stream {} as .{}: {}",
                    index, self.config.fallback_format, e
                );
                StreamOutcome::Failed {
                    primary_error,
                    fallback_error: e.to_string(),
                }
            }
        }
    }
}
