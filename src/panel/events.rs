//! Key event handling for the copilot panel

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::PanelState;
use crate::draft::DraftHost;

impl PanelState {
    /// Handle a key press event
    pub fn handle_key_event(&mut self, key: KeyEvent, draft: &mut dyn DraftHost) {
        // Ctrl+C: quit from anywhere
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        // Inline title rename captures the keyboard while active
        if self.editing_title {
            self.handle_title_edit_key(key);
            return;
        }

        // Tab: accept the visible suggestion, consuming the keystroke
        if key.code == KeyCode::Tab && self.accept_suggestion(draft) {
            return;
        }

        // Esc: reject the visible suggestion, consuming the keystroke
        if key.code == KeyCode::Esc && self.reject_suggestion() {
            return;
        }

        match key.code {
            // Enter / Ctrl+Enter: submit; Shift+Enter and Alt+Enter insert a
            // newline into the prompt instead
            KeyCode::Enter => {
                if key.modifiers.contains(KeyModifiers::SHIFT)
                    || key.modifiers.contains(KeyModifiers::ALT)
                {
                    self.prompt.insert_newline();
                } else {
                    self.submit(draft);
                }
            }
            // Ctrl+G: generate a ghost suggestion for the draft
            KeyCode::Char('g') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.generate_suggestion(draft);
            }
            // Ctrl+T: switch mode (ask <-> edit), clearing the prompt
            KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.toggle_mode();
            }
            // Ctrl+N: new chat
            KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.new_chat();
            }
            // Ctrl+D: delete the active conversation
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.delete_active();
            }
            // F2: rename the active conversation inline
            KeyCode::F(2) => {
                self.begin_title_edit();
            }
            // Alt+Up / Alt+Down: walk the conversation list
            KeyCode::Up if key.modifiers.contains(KeyModifiers::ALT) => {
                self.store.select_previous();
            }
            KeyCode::Down if key.modifiers.contains(KeyModifiers::ALT) => {
                self.store.select_next();
            }
            // Everything else goes to the prompt input
            _ => {
                self.prompt.input(key);
            }
        }
    }

    fn handle_title_edit_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.commit_title_edit(),
            KeyCode::Esc => self.cancel_title_edit(),
            KeyCode::Backspace => {
                self.title_input.pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.title_input.push(c);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod events_tests;
