//! Native two-stage detection
//!
//! Stage one runs the detect helper to find the frontmost application and
//! its working directory. Stage two runs the list helper on that directory.
//! Both share one time budget: stage one is capped so it cannot consume all
//! of it, and stage two always gets at least a floor, preferring a late but
//! complete listing over none.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use super::args::{detect_args, list_args};
use super::process::{ProcessRunner, TokioProcessRunner};
use super::wire::{DetectOutput, ListOutput, parse_json_output};
use super::{DetectionOutcome, DetectionRequest, DetectionStrategy};
use crate::config::DetectionConfig;
use crate::directory::{DirectoryInfo, DisabledDirectories, SearchMode};

/// Shown when the list helper reports its `fd` dependency is missing
pub const FD_MISSING_HINT: &str =
    "File search requires fd. Install it with `brew install fd` and reopen the window.";

/// Strategy backed by the external detect and list helpers
pub struct NativeDetector {
    runner: Arc<dyn ProcessRunner>,
    detect_binary: PathBuf,
    list_binary: PathBuf,
    stage_cap: Duration,
    stage2_floor: Duration,
    disabled: DisabledDirectories,
}

impl NativeDetector {
    /// Detector that launches real processes
    pub fn new(config: &DetectionConfig) -> Self {
        Self::with_runner(config, Arc::new(TokioProcessRunner))
    }

    /// Detector with an injected process runner
    pub fn with_runner(config: &DetectionConfig, runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            runner,
            detect_binary: config.detect_binary.clone(),
            list_binary: config.list_binary.clone(),
            stage_cap: config.stage_cap(),
            stage2_floor: config.stage2_floor(),
            disabled: DisabledDirectories::default(),
        }
    }

    /// Directories whose contents are never listed
    pub fn with_disabled_directories(mut self, disabled: DisabledDirectories) -> Self {
        self.disabled = disabled;
        self
    }

    /// Budget for the detect stage
    pub fn stage1_budget(&self, overall: Duration) -> Duration {
        overall.min(self.stage_cap)
    }

    /// Budget for the list stage after `elapsed` was spent in stage one
    pub fn stage2_budget(&self, overall: Duration, elapsed: Duration) -> Duration {
        overall.saturating_sub(elapsed).max(self.stage2_floor)
    }

    async fn detect_app(&self, request: &DetectionRequest) -> Result<DetectOutput, DetectionOutcome> {
        let budget = self.stage1_budget(request.timeout);
        let args = detect_args(request.previous_bundle_id.as_deref());

        match self.runner.run(&self.detect_binary, &args, budget).await {
            Ok(stdout) => match parse_json_output(&stdout) {
                Some(output) => Ok(output),
                None => {
                    warn!("Detect helper produced unparsable output: {}", stdout.trim());
                    Err(DetectionOutcome::Failed(
                        "Unparsable detect output".to_string(),
                    ))
                }
            },
            Err(e) if e.is_timeout() => {
                warn!("Detect helper timed out after {:?}", budget);
                Err(DetectionOutcome::TimedOut)
            }
            Err(e) => {
                warn!("Detect helper failed: {}", e);
                Err(DetectionOutcome::Failed(e.to_string()))
            }
        }
    }

    #[instrument(skip_all, fields(directory = %directory))]
    async fn list_files(
        &self,
        directory: &str,
        mut info: DirectoryInfo,
        request: &DetectionRequest,
        started: Instant,
    ) -> DirectoryInfo {
        let budget = self.stage2_budget(request.timeout, started.elapsed());
        let args = list_args(directory, &request.file_search);

        match self.runner.run(&self.list_binary, &args, budget).await {
            Ok(stdout) => match parse_json_output::<ListOutput>(&stdout) {
                Some(listing) => merge_listing(&mut info, listing),
                None => warn!("List helper produced unparsable output"),
            },
            Err(e) if e.is_timeout() => warn!("List helper timed out after {:?}", budget),
            Err(e) => warn!("List helper failed: {}", e),
        }

        info
    }
}

/// Fold a listing onto the stage-one result.
///
/// A listing error leaves the result untouched apart from a dependency hint.
fn merge_listing(info: &mut DirectoryInfo, listing: ListOutput) {
    if listing.fd_available == Some(false) {
        info.hint = Some(FD_MISSING_HINT.to_string());
    }
    if let Some(error) = listing.files_error {
        warn!("List helper reported an error: {}", error);
        return;
    }

    let files = listing.files.unwrap_or_default();
    info.file_count = listing.file_count.unwrap_or(files.len());
    info.files = files;
    info.partial = listing.file_limit_reached.unwrap_or(false);
    info.max_files = listing.max_files;
    if let Some(mode) = listing.search_mode.as_deref().and_then(SearchMode::from_wire) {
        info.search_mode = mode;
    }
}

#[async_trait]
impl DetectionStrategy for NativeDetector {
    fn name(&self) -> &str {
        "native"
    }

    fn is_available(&self) -> bool {
        self.detect_binary.is_file() && self.list_binary.is_file()
    }

    #[instrument(skip_all, fields(strategy = "native"))]
    async fn detect(&self, request: &DetectionRequest) -> DetectionOutcome {
        let started = Instant::now();

        let detected = match self.detect_app(request).await {
            Ok(output) => output,
            Err(outcome) => return outcome,
        };

        if let Some(error) = detected.error {
            debug!("Detect helper reported: {}", error);
            let mut info = DirectoryInfo::failed(error);
            info.directory = detected.directory;
            info.app_name = detected.app_name;
            info.bundle_id = detected.bundle_id;
            return DetectionOutcome::Reported(info);
        }

        let Some(directory) = detected.directory else {
            debug!("Detect helper found no directory");
            return DetectionOutcome::NoDirectory;
        };

        if let Some(reason) = self.disabled.reason_for(&directory) {
            debug!("Skipping listing for disabled directory {}", directory);
            let mut info = DirectoryInfo::disabled(directory, reason);
            info.app_name = detected.app_name;
            info.bundle_id = detected.bundle_id;
            return DetectionOutcome::Detected(info);
        }

        let info = DirectoryInfo::detected(&directory, detected.app_name, detected.bundle_id);
        let info = self.list_files(&directory, info, request, started).await;
        info!(
            "Detected {} with {} files in {:?}",
            directory,
            info.file_count,
            started.elapsed()
        );
        DetectionOutcome::Detected(info)
    }
}
