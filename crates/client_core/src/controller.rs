//! Shortening request workflow: form state, the phase machine, and copy feedback.
//!
//! The controller never performs I/O itself. `submit` hands out a
//! [`SubmitTicket`]; whoever owns the transport sends it and reports back
//! through [`RequestController::complete`] with the same id. Outcomes for any
//! other id are dropped, so a reset or a newer submit can never be overwritten
//! by a slow response.

use std::time::{Duration, Instant};

use shared::{
    domain::{RequestId, ShortenResult},
    protocol::ShortenRequest,
};
use tracing::debug;

use crate::error::ShortenError;

pub const CLIPBOARD_FAILURE_MESSAGE: &str = "Failed to copy to clipboard";
pub const COPY_FEEDBACK_WINDOW: Duration = Duration::from_secs(2);

/// Platform clipboard seam. The GUI backs it with `arboard`.
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Url,
    CustomCode,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CopyFeedback {
    #[default]
    None,
    Copied {
        until: Instant,
    },
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Submitting {
        request: RequestId,
    },
    Success {
        result: ShortenResult,
        copy: CopyFeedback,
    },
    Error {
        message: String,
    },
}

/// A request the caller must send, tagged with the id to complete it under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTicket {
    pub id: RequestId,
    pub request: ShortenRequest,
}

#[derive(Debug, Default)]
pub struct RequestController {
    pub url: String,
    pub custom_code: String,
    phase: Phase,
    last_request: RequestId,
}

impl RequestController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, Phase::Submitting { .. })
    }

    pub fn can_submit(&self) -> bool {
        !self.is_submitting() && !self.url.trim().is_empty()
    }

    pub fn result(&self) -> Option<&ShortenResult> {
        match &self.phase {
            Phase::Success { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.phase {
            Phase::Error { message } => Some(message.as_str()),
            Phase::Success {
                copy: CopyFeedback::Failed(message),
                ..
            } => Some(message.as_str()),
            _ => None,
        }
    }

    /// Starts a new request unless the URL is blank or one is already in flight.
    pub fn submit(&mut self) -> Option<SubmitTicket> {
        if !self.can_submit() {
            return None;
        }

        let request = ShortenRequest::from_form(&self.url, &self.custom_code);
        self.last_request = self.last_request.next();
        let id = self.last_request;
        self.phase = Phase::Submitting { request: id };
        debug!(
            request_id = id.0,
            custom_code = request.custom_code.is_some(),
            "shorten request issued"
        );
        Some(SubmitTicket { id, request })
    }

    /// Confirm key pressed while `focus` holds keyboard focus.
    pub fn confirm_key(&mut self, focus: Option<FormField>) -> Option<SubmitTicket> {
        focus.and_then(|_| self.submit())
    }

    /// Applies an outcome if it belongs to the in-flight request. Returns
    /// whether the session changed.
    pub fn complete(
        &mut self,
        id: RequestId,
        outcome: Result<ShortenResult, ShortenError>,
    ) -> bool {
        match self.phase {
            Phase::Submitting { request } if request == id => {}
            _ => {
                debug!(request_id = id.0, "discarding stale shorten response");
                return false;
            }
        }

        self.phase = match outcome {
            Ok(result) => Phase::Success {
                result,
                copy: CopyFeedback::None,
            },
            Err(err) => {
                debug!(request_id = id.0, error = %err, "shorten request failed");
                Phase::Error {
                    message: err.user_message(),
                }
            }
        };
        true
    }

    pub fn reset(&mut self) {
        *self = Self {
            last_request: self.last_request,
            ..Self::default()
        };
    }

    pub fn copy_result(&mut self, clipboard: &mut dyn ClipboardSink) -> bool {
        self.copy_result_at(clipboard, Instant::now())
    }

    /// Writes the short link to the clipboard. A rejected write surfaces an
    /// error message but leaves the result on screen.
    pub fn copy_result_at(&mut self, clipboard: &mut dyn ClipboardSink, now: Instant) -> bool {
        let Phase::Success { result, copy } = &mut self.phase else {
            return false;
        };

        *copy = match clipboard.set_text(&result.shortened_url) {
            Ok(()) => CopyFeedback::Copied {
                until: now + COPY_FEEDBACK_WINDOW,
            },
            Err(err) => {
                debug!(error = %err, "clipboard write rejected");
                CopyFeedback::Failed(CLIPBOARD_FAILURE_MESSAGE.to_string())
            }
        };
        matches!(*copy, CopyFeedback::Copied { .. })
    }

    pub fn is_copied_at(&self, now: Instant) -> bool {
        self.copy_feedback_remaining(now).is_some()
    }

    /// Time left before the "copied" acknowledgment reverts.
    pub fn copy_feedback_remaining(&self, now: Instant) -> Option<Duration> {
        match &self.phase {
            Phase::Success {
                copy: CopyFeedback::Copied { until },
                ..
            } if now < *until => Some(*until - now),
            _ => None,
        }
    }

    /// Reverts copy feedback whose window has passed.
    pub fn tick(&mut self, now: Instant) {
        if let Phase::Success { copy, .. } = &mut self.phase {
            if matches!(*copy, CopyFeedback::Copied { until } if now >= until) {
                *copy = CopyFeedback::None;
            }
        }
    }

    pub fn copy_label(&self, now: Instant) -> &'static str {
        if self.is_copied_at(now) {
            "Copied!"
        } else {
            "Copy"
        }
    }

    /// Link to open in a new browser tab.
    pub fn open_target(&self) -> Option<&str> {
        self.result().map(|result| result.shortened_url.as_str())
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
