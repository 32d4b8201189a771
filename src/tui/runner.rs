//! Async TUI runner
//!
//! Owns the terminal, the app state, and every pending async effect:
//! the in-flight refinement request, the copy-revert timer, and the
//! startup health check. All state transitions happen on this task;
//! spawned tasks only perform I/O and send generation-tagged messages
//! back so stale outcomes can be discarded.

use std::sync::Arc;
use std::time::Duration;

use eyre::Result;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::api::{ApiError, HealthStatus, RefineClient, RefineResult};

use super::app::App;
use super::events::{Event, EventHandler};
use super::state::COPY_FEEDBACK;
use super::views;
use super::Tui;

const TICK_RATE: Duration = Duration::from_millis(100);

/// Outcome of one refinement request, tagged with its generation
#[derive(Debug)]
struct RefineOutcome {
    generation: u64,
    result: Result<RefineResult, ApiError>,
}

/// One step of the event loop
enum Step {
    Terminal(Event),
    Refine(RefineOutcome),
    CopyRevert(u64),
}

/// TUI runner: event loop and async effect owner
pub struct TuiRunner {
    terminal: Tui,
    app: App,
    event_handler: EventHandler,
    client: Arc<dyn RefineClient>,

    /// Receives the outcome of the single in-flight request
    refine_rx: Option<mpsc::Receiver<RefineOutcome>>,
    refine_task: Option<JoinHandle<()>>,

    /// Copy-revert timers report back here
    copy_tx: mpsc::Sender<u64>,
    copy_rx: mpsc::Receiver<u64>,
    /// Pending revert; aborted when a newer acknowledgement supersedes it
    copy_revert_task: Option<JoinHandle<()>>,

    health_rx: Option<oneshot::Receiver<Option<HealthStatus>>>,
}

impl TuiRunner {
    pub fn new(terminal: Tui, client: Arc<dyn RefineClient>) -> Self {
        debug!("TuiRunner::new: called");
        let (copy_tx, copy_rx) = mpsc::channel(4);
        Self {
            terminal,
            app: App::new(),
            event_handler: EventHandler::new(TICK_RATE),
            client,
            refine_rx: None,
            refine_task: None,
            copy_tx,
            copy_rx,
            copy_revert_task: None,
            health_rx: None,
        }
    }

    /// Run the event loop until the user quits
    pub async fn run(&mut self) -> Result<()> {
        info!("TUI starting");
        self.spawn_health_check();

        loop {
            self.terminal.draw(|frame| views::render(self.app.state(), frame))?;

            let Self {
                event_handler,
                refine_rx,
                copy_rx,
                ..
            } = self;

            let step = tokio::select! {
                event = event_handler.next() => Step::Terminal(event?),
                Some(outcome) = recv_opt(refine_rx) => Step::Refine(outcome),
                Some(generation) = copy_rx.recv() => Step::CopyRevert(generation),
            };

            match step {
                Step::Terminal(Event::Key(key)) => self.app.handle_key(key),
                Step::Terminal(Event::Resize(_, _)) | Step::Terminal(Event::Tick) => {}
                Step::Refine(outcome) => self.handle_refine_outcome(outcome),
                Step::CopyRevert(generation) => self.app.state_mut().revert_copy(generation),
            }

            self.process_intents();

            if self.app.state().should_quit {
                debug!("TuiRunner::run: quit requested");
                break;
            }
        }

        if let Some(task) = self.refine_task.take() {
            task.abort();
        }
        if let Some(task) = self.copy_revert_task.take() {
            task.abort();
        }

        info!("TUI exiting");
        Ok(())
    }

    /// Consume intents queued by key handling
    fn process_intents(&mut self) {
        self.poll_health();
        if self.app.state_mut().take_submit_request() {
            self.start_refine();
        }
        if self.app.state_mut().take_copy_request() {
            self.copy_to_clipboard();
        }
    }

    /// Start the outbound request if the state machine allows it
    fn start_refine(&mut self) {
        let Some((submission, generation)) = self.app.state_mut().begin_submit() else {
            return;
        };

        info!(generation, detail_level = %submission.detail_level, "starting refinement request");
        let (tx, rx) = mpsc::channel(1);
        let client = Arc::clone(&self.client);
        let task = tokio::spawn(async move {
            let result = client.refine(&submission).await;
            let _ = tx.send(RefineOutcome { generation, result }).await;
        });

        self.refine_rx = Some(rx);
        self.refine_task = Some(task);
    }

    fn handle_refine_outcome(&mut self, outcome: RefineOutcome) {
        debug!(generation = outcome.generation, "handle_refine_outcome: called");
        self.refine_rx = None;
        self.refine_task = None;

        let result = outcome.result.map_err(|e| {
            warn!(error = %e, "refinement request failed");
            e.user_message()
        });
        self.app.state_mut().complete_submit(outcome.generation, result);
    }

    /// Copy the refined prompt and schedule the feedback revert
    ///
    /// The previous revert timer is aborted first so the later
    /// acknowledgement always wins; the generation check makes a late
    /// message harmless even if the abort races the send.
    fn copy_to_clipboard(&mut self) {
        let Some(text) = self.app.state().lifecycle.result().map(|r| r.refined_prompt.clone()) else {
            return;
        };

        if let Err(e) = write_clipboard(&text) {
            warn!(error = %e, "clipboard write failed");
            return;
        }
        debug!(chars = text.chars().count(), "copy_to_clipboard: copied refined prompt");

        let Some(generation) = self.app.state_mut().acknowledge_copy() else {
            return;
        };

        if let Some(task) = self.copy_revert_task.take() {
            task.abort();
        }

        let tx = self.copy_tx.clone();
        self.copy_revert_task = Some(tokio::spawn(async move {
            tokio::time::sleep(COPY_FEEDBACK).await;
            let _ = tx.send(generation).await;
        }));
    }

    fn spawn_health_check(&mut self) {
        let (tx, rx) = oneshot::channel();
        let client = Arc::clone(&self.client);
        tokio::spawn(async move {
            let status = client.health().await.ok();
            let _ = tx.send(status);
        });
        self.health_rx = Some(rx);
    }

    fn poll_health(&mut self) {
        let Some(rx) = self.health_rx.as_mut() else { return };
        match rx.try_recv() {
            Ok(status) => {
                let status = status.map(|h| h.status).unwrap_or_else(|| "unreachable".to_string());
                debug!(%status, "poll_health: service status received");
                self.app.state_mut().service_status = Some(status);
                self.health_rx = None;
            }
            Err(oneshot::error::TryRecvError::Empty) => {}
            Err(oneshot::error::TryRecvError::Closed) => {
                self.health_rx = None;
            }
        }
    }
}

/// Receive from an optional channel, pending forever when absent
async fn recv_opt(rx: &mut Option<mpsc::Receiver<RefineOutcome>>) -> Option<RefineOutcome> {
    match rx {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

fn write_clipboard(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{DetailLevel, MockRefineClient, PromptSubmission};
    use crate::tui::state::AppState;

    fn sample_result() -> RefineResult {
        RefineResult {
            refined_prompt: "Act as a developer.".to_string(),
            improvements: "Added a role.".to_string(),
            analysis: None,
        }
    }

    fn submitting_state(input: &str) -> (AppState, PromptSubmission, u64) {
        let mut state = AppState::new();
        state.input = input.to_string();
        state.cursor = state.input.len();
        let (submission, generation) = state.begin_submit().unwrap();
        (state, submission, generation)
    }

    #[tokio::test]
    async fn test_too_short_input_never_reaches_client() {
        let client = Arc::new(MockRefineClient::new(vec![Ok(sample_result())]));

        let mut state = AppState::new();
        state.input = "hi".to_string();
        assert!(state.begin_submit().is_none());

        // Validation rejected locally; the client was never called
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_exactly_one_call_per_accepted_submit() {
        let client = Arc::new(MockRefineClient::new(vec![Ok(sample_result())]).with_delay(Duration::from_millis(50)));
        let (mut state, submission, generation) = submitting_state("Write code for login page");

        let task_client = Arc::clone(&client);
        let (tx, mut rx) = mpsc::channel(1);
        tokio::spawn(async move {
            let result = task_client.refine(&submission).await;
            let _ = tx.send(RefineOutcome { generation, result }).await;
        });

        // A second submit while the first is in flight must not spawn
        // another request
        assert!(state.begin_submit().is_none());

        let outcome = rx.recv().await.unwrap();
        state.complete_submit(outcome.generation, outcome.result.map_err(|e| e.user_message()));

        assert!(state.lifecycle.result().is_some());
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_outcome_shows_service_detail() {
        let client = Arc::new(MockRefineClient::new(vec![Err("rate limit exceeded".to_string())]));
        let (mut state, submission, generation) = submitting_state("Write code for login page");

        let result = client.refine(&submission).await;
        state.complete_submit(generation, result.map_err(|e| e.user_message()));

        assert_eq!(state.display_error().as_deref(), Some("rate limit exceeded"));
        assert!(state.lifecycle.result().is_none());
    }

    #[tokio::test]
    async fn test_stale_outcome_after_clear_is_dropped() {
        let client = Arc::new(MockRefineClient::new(vec![Ok(sample_result())]).with_delay(Duration::from_millis(50)));
        let (mut state, submission, generation) = submitting_state("Write code for login page");

        let task_client = Arc::clone(&client);
        let (tx, mut rx) = mpsc::channel(1);
        tokio::spawn(async move {
            let result = task_client.refine(&submission).await;
            let _ = tx.send(RefineOutcome { generation, result }).await;
        });

        state.clear();

        let outcome = rx.recv().await.unwrap();
        state.complete_submit(outcome.generation, outcome.result.map_err(|e| e.user_message()));

        // The late response must not repopulate cleared state
        assert!(state.lifecycle.result().is_none());
    }

    #[tokio::test]
    async fn test_copy_revert_timer_sends_generation() {
        tokio::time::pause();

        let (tx, mut rx) = mpsc::channel::<u64>(4);
        let generation = 7;
        tokio::spawn(async move {
            tokio::time::sleep(COPY_FEEDBACK).await;
            let _ = tx.send(generation).await;
        });

        tokio::time::advance(COPY_FEEDBACK).await;
        assert_eq!(rx.recv().await, Some(generation));
    }

    #[tokio::test]
    async fn test_submission_round_trip_with_mock() {
        let client = Arc::new(MockRefineClient::new(vec![Ok(sample_result())]));
        let mut state = AppState::new();
        state.input = "Write code for login page".to_string();
        state.detail_level = DetailLevel::Simple;

        let (submission, generation) = state.begin_submit().unwrap();
        assert_eq!(submission.detail_level, DetailLevel::Simple);

        let result = client.refine(&submission).await;
        state.complete_submit(generation, result.map_err(|e| e.user_message()));

        assert_eq!(state.lifecycle.result().unwrap().refined_prompt, "Act as a developer.");
    }
}
