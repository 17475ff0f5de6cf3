use derive_more::Display;
use strum_macros::AsRefStr;

use crate::PredictionResult;
use crate::reply::ReplyError;

/// Largest file the browser will submit.
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Display, Clone, PartialEq)]
pub enum UploadError {
    #[display(fmt = "File size should be less than 5MB")]
    TooLarge { size: u64 },
    #[display(fmt = "Wait for the current analysis to finish")]
    Busy,
}

impl std::error::Error for UploadError {}

pub fn validate_upload_size(size: u64) -> Result<(), UploadError> {
    if size > MAX_UPLOAD_BYTES {
        return Err(UploadError::TooLarge { size });
    }
    Ok(())
}

/// Where the single upload flow currently is. The variants are mutually
/// exclusive; `as_ref()` yields a kebab-case name usable as a CSS class.
#[derive(Debug, Clone, PartialEq, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Phase {
    Idle,
    Loading,
    Success(PredictionResult),
    Failed(String),
}

/// Client-side state for one selected file and its in-flight request.
///
/// Generic over the file handle so the browser can store a `gloo_file::File`
/// while tests use plain values.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadSession<F> {
    file: Option<F>,
    phase: Phase,
}

impl<F> Default for UploadSession<F> {
    fn default() -> Self {
        Self {
            file: None,
            phase: Phase::Idle,
        }
    }
}

impl<F> UploadSession<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(&self) -> Option<&F> {
        self.file.as_ref()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn can_submit(&self) -> bool {
        self.file.is_some() && !self.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        match &self.phase {
            Phase::Success(result) => Some(result),
            _ => None,
        }
    }

    /// Accepts or rejects a newly picked file. While a request is in flight
    /// the file is refused with `Busy` and the session is left as is. A file
    /// that is too large leaves the session without a file.
    pub fn select(&mut self, file: F, size: u64) -> Result<(), UploadError> {
        if self.is_loading() {
            return Err(UploadError::Busy);
        }
        match validate_upload_size(size) {
            Ok(()) => {
                self.file = Some(file);
                self.phase = Phase::Idle;
                Ok(())
            }
            Err(err) => {
                self.file = None;
                self.phase = Phase::Failed(err.to_string());
                Err(err)
            }
        }
    }

    /// Shows a message without touching the selected file.
    pub fn fail(&mut self, message: impl Into<String>) {
        if !self.is_loading() {
            self.phase = Phase::Failed(message.into());
        }
    }

    /// Moves to `Loading` and hands back the file to send, or `None` when
    /// there is nothing to send or a request is already running.
    pub fn begin_submit(&mut self) -> Option<&F> {
        if !self.can_submit() {
            return None;
        }
        self.phase = Phase::Loading;
        self.file.as_ref()
    }

    /// Records the outcome of the in-flight request. Returns false when no
    /// request was running, in which case the outcome is dropped.
    pub fn finish(&mut self, outcome: Result<PredictionResult, ReplyError>) -> bool {
        if !self.is_loading() {
            return false;
        }
        self.phase = match outcome {
            Ok(result) => Phase::Success(result),
            Err(err) => Phase::Failed(err.to_string()),
        };
        true
    }

    pub fn clear(&mut self) {
        if !self.is_loading() {
            self.file = None;
            self.phase = Phase::Idle;
        }
    }
}
