//! Active-directory detection
//!
//! A [`DetectionStrategy`] resolves the directory the user is working in.
//! The [`DetectionOrchestrator`] tries registered strategies in priority
//! order. Every attempt resolves to a [`DetectionOutcome`]; nothing in this
//! module returns an error or panics past its boundary.

pub mod args;
pub mod native;
pub mod orchestrator;
pub mod process;
pub mod wire;

pub use native::NativeDetector;
pub use orchestrator::DetectionOrchestrator;
pub use process::{ProcessRunner, TokioProcessRunner};

use async_trait::async_trait;
use std::time::Duration;

use crate::config::FileSearchSettings;
use crate::directory::DirectoryInfo;

/// Parameters for one detection attempt
#[derive(Debug, Clone)]
pub struct DetectionRequest {
    /// Overall time budget
    pub timeout: Duration,
    /// Bundle identifier of the previously frontmost application, if known
    pub previous_bundle_id: Option<String>,
    /// Options forwarded to the file listing stage
    pub file_search: FileSearchSettings,
}

impl DetectionRequest {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            previous_bundle_id: None,
            file_search: FileSearchSettings::default(),
        }
    }

    pub fn with_previous_bundle_id(mut self, bundle_id: Option<String>) -> Self {
        self.previous_bundle_id = bundle_id;
        self
    }

    pub fn with_file_search(mut self, file_search: FileSearchSettings) -> Self {
        self.file_search = file_search;
        self
    }
}

/// Result of one detection attempt
#[derive(Debug, Clone, PartialEq)]
pub enum DetectionOutcome {
    /// Directory resolved (files may or may not have been listed)
    Detected(DirectoryInfo),
    /// The detector answered with an error payload, kept for diagnostics
    Reported(DirectoryInfo),
    /// The detector ran but knows of no directory
    NoDirectory,
    /// A helper process failed or produced unreadable output
    Failed(String),
    /// The detect stage ran out of time
    TimedOut,
    /// No strategy could run on this machine
    Unavailable,
}

impl DetectionOutcome {
    /// The carried result, if any
    pub fn into_directory_info(self) -> Option<DirectoryInfo> {
        match self {
            DetectionOutcome::Detected(info) | DetectionOutcome::Reported(info) => Some(info),
            _ => None,
        }
    }

    pub fn directory_info(&self) -> Option<&DirectoryInfo> {
        match self {
            DetectionOutcome::Detected(info) | DetectionOutcome::Reported(info) => Some(info),
            _ => None,
        }
    }

    pub fn is_timed_out(&self) -> bool {
        matches!(self, DetectionOutcome::TimedOut)
    }

    /// Short label for logs
    pub fn label(&self) -> &'static str {
        match self {
            DetectionOutcome::Detected(_) => "detected",
            DetectionOutcome::Reported(_) => "reported",
            DetectionOutcome::NoDirectory => "no_directory",
            DetectionOutcome::Failed(_) => "failed",
            DetectionOutcome::TimedOut => "timed_out",
            DetectionOutcome::Unavailable => "unavailable",
        }
    }
}

/// One way of resolving the active directory
#[async_trait]
pub trait DetectionStrategy: Send + Sync {
    /// Strategy name for logs
    fn name(&self) -> &str;

    /// Whether this strategy can run here (platform, helper binaries, ...)
    fn is_available(&self) -> bool;

    /// Run one detection attempt within `request.timeout`
    async fn detect(&self, request: &DetectionRequest) -> DetectionOutcome;
}
