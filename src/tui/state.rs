//! TUI state machine
//!
//! All interactive state lives in [`AppState`]: the input buffer, the
//! submission lifecycle, and the transient copy feedback. Transitions
//! are synchronous methods; async effects (the HTTP call, the copy
//! revert timer) are driven by the runner and report back through
//! generation-tagged messages so stale outcomes can be discarded.

use std::time::Duration;

use tracing::debug;

use crate::api::{DetailLevel, PromptSubmission, RefineResult};
use crate::validate::{ValidationError, validate_prompt};

/// How long the "Copied!" acknowledgement stays visible
pub const COPY_FEEDBACK: Duration = Duration::from_millis(2000);

/// Submission lifecycle
///
/// Exactly one variant is active at a time; it is the single source of
/// truth for whether a new submission may begin.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Lifecycle {
    #[default]
    Idle,
    Submitting,
    Success(RefineResult),
    Failed(String),
}

impl Lifecycle {
    pub fn is_submitting(&self) -> bool {
        matches!(self, Lifecycle::Submitting)
    }

    /// Current result, if the last submission succeeded
    pub fn result(&self) -> Option<&RefineResult> {
        match self {
            Lifecycle::Success(result) => Some(result),
            _ => None,
        }
    }

    /// Current submission error, if the last submission failed
    pub fn error(&self) -> Option<&str> {
        match self {
            Lifecycle::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Transient copy acknowledgement, independent of [`Lifecycle`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CopyFeedback {
    #[default]
    Idle,
    Acknowledged,
}

/// Application state
///
/// Owned by the runner; mutated only on the event loop task.
#[derive(Debug, Default)]
pub struct AppState {
    /// Raw prompt text, submitted verbatim
    pub input: String,
    /// Byte offset of the cursor within `input`
    pub cursor: usize,
    /// Selected verbosity target
    pub detail_level: DetailLevel,
    /// Submission lifecycle
    pub lifecycle: Lifecycle,
    /// Inline validation message; never touches the lifecycle
    pub input_error: Option<ValidationError>,
    /// Copy acknowledgement state
    pub copy_feedback: CopyFeedback,
    /// Service reachability from the startup health check
    pub service_status: Option<String>,
    /// Set by key handling, consumed by the runner
    pub submit_requested: bool,
    /// Set by key handling, consumed by the runner
    pub copy_requested: bool,
    /// Exit the event loop
    pub should_quit: bool,

    /// Tags outbound requests; bumped on submit and clear so responses
    /// for an abandoned submission are discarded
    request_generation: u64,
    /// Tags copy acknowledgements; the latest acknowledgement wins
    copy_generation: u64,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the input buffer and detail level accept changes
    pub fn can_edit(&self) -> bool {
        !self.lifecycle.is_submitting()
    }

    /// Message for the status line: inline validation first, then the
    /// last submission failure
    pub fn display_error(&self) -> Option<String> {
        if let Some(err) = &self.input_error {
            return Some(err.to_string());
        }
        self.lifecycle.error().map(|e| e.to_string())
    }

    // --- input editing (no-ops while submitting) ---

    pub fn insert_char(&mut self, c: char) {
        if !self.can_edit() {
            return;
        }
        self.input.insert(self.cursor, c);
        self.cursor += c.len_utf8();
        self.input_error = None;
    }

    pub fn delete_char(&mut self) {
        if !self.can_edit() || self.cursor == 0 {
            return;
        }
        let prev = prev_char_boundary(&self.input, self.cursor);
        self.input.replace_range(prev..self.cursor, "");
        self.cursor = prev;
        self.input_error = None;
    }

    pub fn delete_forward(&mut self) {
        if !self.can_edit() || self.cursor >= self.input.len() {
            return;
        }
        let next = next_char_boundary(&self.input, self.cursor);
        self.input.replace_range(self.cursor..next, "");
        self.input_error = None;
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = prev_char_boundary(&self.input, self.cursor);
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.input.len() {
            self.cursor = next_char_boundary(&self.input, self.cursor);
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor = self.input.len();
    }

    /// Cycle the detail level selection forward
    pub fn cycle_detail_level(&mut self) {
        if !self.can_edit() {
            return;
        }
        self.detail_level = self.detail_level.cycle();
    }

    /// Cycle the detail level selection backward
    pub fn cycle_detail_level_back(&mut self) {
        if !self.can_edit() {
            return;
        }
        self.detail_level = self.detail_level.cycle_back();
    }

    // --- submission lifecycle ---

    pub fn request_submit(&mut self) {
        self.submit_requested = true;
    }

    pub fn take_submit_request(&mut self) -> bool {
        std::mem::take(&mut self.submit_requested)
    }

    /// Try to start a submission
    ///
    /// Returns the submission and its generation tag, or `None` when a
    /// request is already in flight (single-flight) or validation
    /// fails. Validation failure surfaces an inline message and leaves
    /// the lifecycle untouched.
    pub fn begin_submit(&mut self) -> Option<(PromptSubmission, u64)> {
        if self.lifecycle.is_submitting() {
            debug!("begin_submit: request already in flight, ignoring");
            return None;
        }

        if let Err(e) = validate_prompt(&self.input) {
            debug!(error = %e, "begin_submit: validation failed");
            self.input_error = Some(e);
            return None;
        }

        self.input_error = None;
        self.copy_feedback = CopyFeedback::Idle;
        self.request_generation += 1;
        self.lifecycle = Lifecycle::Submitting;

        debug!(generation = self.request_generation, "begin_submit: entering Submitting");
        Some((
            PromptSubmission {
                raw_prompt: self.input.clone(),
                detail_level: self.detail_level,
            },
            self.request_generation,
        ))
    }

    /// Apply the outcome of a submission
    ///
    /// Outcomes tagged with a stale generation (the user cleared while
    /// the request was in flight) are dropped silently.
    pub fn complete_submit(&mut self, generation: u64, outcome: Result<RefineResult, String>) {
        if generation != self.request_generation {
            debug!(
                generation,
                current = self.request_generation,
                "complete_submit: stale outcome, discarding"
            );
            return;
        }
        if !self.lifecycle.is_submitting() {
            debug!("complete_submit: not submitting, discarding");
            return;
        }

        self.lifecycle = match outcome {
            Ok(result) => Lifecycle::Success(result),
            Err(message) => Lifecycle::Failed(message),
        };
    }

    /// Reset everything as one logical step
    ///
    /// Bumps both generations so an in-flight response and any pending
    /// copy revert become stale. Detail level selection survives.
    pub fn clear(&mut self) {
        debug!("clear: resetting state");
        self.input.clear();
        self.cursor = 0;
        self.lifecycle = Lifecycle::Idle;
        self.input_error = None;
        self.copy_feedback = CopyFeedback::Idle;
        self.submit_requested = false;
        self.copy_requested = false;
        self.request_generation += 1;
        self.copy_generation += 1;
    }

    // --- copy feedback ---

    pub fn request_copy(&mut self) {
        if self.lifecycle.result().is_some() {
            self.copy_requested = true;
        }
    }

    pub fn take_copy_request(&mut self) -> bool {
        std::mem::take(&mut self.copy_requested)
    }

    /// Acknowledge a completed copy
    ///
    /// Only valid while a result is present. Returns the generation the
    /// revert timer must present to [`AppState::revert_copy`].
    pub fn acknowledge_copy(&mut self) -> Option<u64> {
        self.lifecycle.result()?;
        self.copy_feedback = CopyFeedback::Acknowledged;
        self.copy_generation += 1;
        debug!(generation = self.copy_generation, "acknowledge_copy: acknowledged");
        Some(self.copy_generation)
    }

    /// Revert the copy acknowledgement if `generation` is still current
    ///
    /// A newer acknowledgement supersedes older timers, so a stale
    /// revert is a no-op.
    pub fn revert_copy(&mut self, generation: u64) {
        if generation != self.copy_generation {
            debug!(
                generation,
                current = self.copy_generation,
                "revert_copy: stale revert, ignoring"
            );
            return;
        }
        if self.copy_feedback == CopyFeedback::Acknowledged {
            self.copy_feedback = CopyFeedback::Idle;
        }
    }
}

fn prev_char_boundary(s: &str, idx: usize) -> usize {
    let mut i = idx - 1;
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn next_char_boundary(s: &str, idx: usize) -> usize {
    let mut i = idx + 1;
    while i < s.len() && !s.is_char_boundary(i) {
        i += 1;
    }
    i
}
