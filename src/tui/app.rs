//! Key handling
//!
//! Translates terminal key events into state transitions and intents.
//! Async effects are queued on [`AppState`] and picked up by the runner.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use super::state::AppState;

/// Key bindings:
/// - typing edits the prompt (disabled while a request is in flight)
/// - `Enter` submits, `Alt+Enter` inserts a newline
/// - `Tab` / `BackTab` cycle the detail level
/// - `Ctrl+Y` copies the refined prompt
/// - `Ctrl+L` clears everything
/// - `Esc` / `Ctrl+C` quit
pub struct App {
    state: AppState,
}

impl App {
    pub fn new() -> Self {
        Self { state: AppState::new() }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        debug!(?key, "App::handle_key: called");

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => {
                    debug!("App::handle_key: quit requested");
                    self.state.should_quit = true;
                }
                KeyCode::Char('y') => self.state.request_copy(),
                KeyCode::Char('l') => self.state.clear(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Esc => {
                debug!("App::handle_key: quit requested");
                self.state.should_quit = true;
            }
            KeyCode::Enter => {
                if key.modifiers.contains(KeyModifiers::ALT) {
                    self.state.insert_char('\n');
                } else {
                    self.state.request_submit();
                }
            }
            KeyCode::Tab => self.state.cycle_detail_level(),
            KeyCode::BackTab => self.state.cycle_detail_level_back(),
            KeyCode::Backspace => self.state.delete_char(),
            KeyCode::Delete => self.state.delete_forward(),
            KeyCode::Left => self.state.move_cursor_left(),
            KeyCode::Right => self.state.move_cursor_right(),
            KeyCode::Home => self.state.move_cursor_home(),
            KeyCode::End => self.state.move_cursor_end(),
            KeyCode::Char(c) => self.state.insert_char(c),
            _ => {}
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::DetailLevel;
    use crate::tui::state::Lifecycle;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_typing_appends_to_input() {
        let mut app = App::new();
        for c in "hello".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(app.state().input, "hello");
    }

    #[test]
    fn test_enter_requests_submit() {
        let mut app = App::new();
        app.handle_key(key(KeyCode::Enter));
        assert!(app.state().submit_requested);
    }

    #[test]
    fn test_alt_enter_inserts_newline() {
        let mut app = App::new();
        app.handle_key(key(KeyCode::Char('a')));
        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT));
        app.handle_key(key(KeyCode::Char('b')));
        assert_eq!(app.state().input, "a\nb");
        assert!(!app.state().submit_requested);
    }

    #[test]
    fn test_tab_cycles_detail_level() {
        let mut app = App::new();
        assert_eq!(app.state().detail_level, DetailLevel::Moderate);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.state().detail_level, DetailLevel::Detailed);
        app.handle_key(key(KeyCode::BackTab));
        assert_eq!(app.state().detail_level, DetailLevel::Moderate);
    }

    #[test]
    fn test_typing_ignored_while_submitting() {
        let mut app = App::new();
        app.state_mut().input = "Write code for login page".to_string();
        app.state_mut().cursor = app.state().input.len();
        app.state_mut().begin_submit().unwrap();

        app.handle_key(key(KeyCode::Char('x')));
        assert_eq!(app.state().input, "Write code for login page");
    }

    #[test]
    fn test_ctrl_l_clears() {
        let mut app = App::new();
        app.state_mut().input = "something".to_string();
        app.handle_key(ctrl('l'));
        assert!(app.state().input.is_empty());
        assert_eq!(app.state().lifecycle, Lifecycle::Idle);
    }

    #[test]
    fn test_ctrl_y_without_result_is_noop() {
        let mut app = App::new();
        app.handle_key(ctrl('y'));
        assert!(!app.state().copy_requested);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = App::new();
        app.handle_key(ctrl('c'));
        assert!(app.state().should_quit);
    }

    #[test]
    fn test_esc_quits() {
        let mut app = App::new();
        app.handle_key(key(KeyCode::Esc));
        assert!(app.state().should_quit);
    }

    #[test]
    fn test_backspace_and_cursor_movement() {
        let mut app = App::new();
        for c in "abc".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Left));
        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.state().input, "ac");
        app.handle_key(key(KeyCode::End));
        assert_eq!(app.state().cursor, 2);
    }
}
