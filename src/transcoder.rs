use async_trait::async_trait;
use log::{debug, error};
use std::path::PathBuf;
use std::time::Duration;
use tokio::process::Command;

use crate::errors::TranscoderError;

// @module: External transcoder invocation

/// A single extraction request handed to the transcoder
#[derive(Debug, Clone)]
pub struct TranscodeJob {
    /// Remote media URL, token included
    pub input_url: String,
    /// Zero-based subtitle stream index within the input
    pub stream_index: usize,
    /// File the extracted stream is written to
    pub output_path: PathBuf,
    /// Copy the stream as-is instead of converting it.
    /// Set on the fallback attempt; image-based tracks cannot be
    /// re-encoded to a text container.
    pub stream_copy: bool,
}

/// Interface to the external transcoder.
///
/// The extractor only depends on whether an invocation succeeded; tests
/// substitute a recording implementation for the ffmpeg one.
#[async_trait]
pub trait Transcoder: Send + Sync {
    /// Run one extraction to completion
    async fn run(&self, job: &TranscodeJob) -> Result<(), TranscoderError>;
}

/// Transcoder implementation that shells out to ffmpeg
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    /// Upper bound on a single ffmpeg run
    timeout: Duration,
}

impl FfmpegTranscoder {
    /// Create a transcoder with the given per-invocation timeout
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Filter ffmpeg stderr to only show meaningful error lines, stripping the
    /// version banner, build configuration, and stream metadata noise.
    pub fn filter_stderr(stderr: &str) -> String {
        let dominated_prefixes = [
            "ffmpeg version",
            "  built with",
            "  configuration:",
            "  lib",
            "Input #",
            "  Metadata:",
            "  Duration:",
            "  Chapter",
            "    Chapter",
            "  Stream #",
            "      Metadata:",
            "        title",
            "        BPS",
            "        DURATION",
            "        NUMBER_OF",
            "        _STATISTICS",
            "Output #",
            "Stream mapping:",
            "Press [q]",
        ];

        let meaningful: Vec<&str> = stderr
            .lines()
            .filter(|line| {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    return false;
                }
                !dominated_prefixes.iter().any(|p| trimmed.starts_with(p))
            })
            .collect();

        if meaningful.is_empty() {
            "unknown ffmpeg error (stderr was empty after filtering)".to_string()
        } else {
            meaningful.join("\n")
        }
    }

    /// ffmpeg argument list for a job.
    ///
    /// `-y` makes reruns overwrite deterministically; `-nostdin` keeps
    /// ffmpeg from blocking on a TTY prompt.
    pub fn build_args(job: &TranscodeJob) -> Vec<String> {
        let mut args = vec![
            "-y".to_string(),
            "-nostdin".to_string(),
            "-i".to_string(),
            job.input_url.clone(),
            "-map".to_string(),
            format!("0:s:{}", job.stream_index),
        ];
        if job.stream_copy {
            args.push("-c".to_string());
            args.push("copy".to_string());
        }
        args.push(job.output_path.to_string_lossy().to_string());
        args
    }
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    async fn run(&self, job: &TranscodeJob) -> Result<(), TranscoderError> {
        let args = Self::build_args(job);
        debug!("Running ffmpeg {}", args.join(" "));

        let ffmpeg_future = Command::new("ffmpeg").args(&args).output();

        // Bound the invocation so a stalled remote read cannot hang the run
        let output = tokio::select! {
            result = ffmpeg_future => {
                result.map_err(|e| TranscoderError::Spawn(e.to_string()))?
            },
            _ = tokio::time::sleep(self.timeout) => {
                return Err(TranscoderError::Timeout(self.timeout.as_secs()));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let filtered = Self::filter_stderr(&stderr);
            error!("ffmpeg failed for {:?}: {}", job.output_path, filtered);
            return Err(TranscoderError::Failed { stderr: filtered });
        }

        Ok(())
    }
}
