//! # Application State
//!
//! Core business state for gitup. This module contains domain state only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── menu: Menu                    // current options + selection
//! ├── menu_stack: Vec<Menu>         // previous menus, for Back
//! ├── input: Option<InputPrompt>    // free-text capture in progress
//! ├── key_setup: KeySetup           // gathered ssh-keygen parameters
//! ├── pending_git_name: Option      // username awaiting the email step
//! ├── transcript: Vec<TranscriptEntry>  // command output log
//! ├── status_message: String        // title bar text
//! └── defaults: ResolvedConfig      // resolved settings
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use crate::core::config::ResolvedConfig;
use crate::core::menu::Menu;

/// Which pending value an open text prompt feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTarget {
    GitUserName,
    GitUserEmail,
    CloneUrl,
    CommitMessage,
    KeyPath,
    KeyPassphrase,
    GiteaHost,
    AgentKeyPath,
}

/// A free-text field being captured: the label shown to the user, the text
/// typed so far, and where the submitted value goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPrompt {
    pub target: InputTarget,
    pub label: &'static str,
    pub buffer: String,
}

impl InputPrompt {
    pub fn new(target: InputTarget, label: &'static str) -> Self {
        Self {
            target,
            label,
            buffer: String::new(),
        }
    }

    /// A prompt pre-filled with an existing or default value.
    pub fn with_value(target: InputTarget, label: &'static str, value: String) -> Self {
        Self {
            target,
            label,
            buffer: value,
        }
    }
}

/// Values gathered in the SSH key submenu. `None` means "use the default".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeySetup {
    pub path: Option<String>,
    pub passphrase: Option<String>,
}

/// One line group in the output pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptEntry {
    /// A command line that was run, shown with a `$ ` prefix.
    Command(String),
    /// Captured stdout/stderr of a finished command.
    Output(String),
    /// A non-zero exit, a signal death, or a spawn failure.
    Failure(String),
    /// A friendly note, e.g. the key-created confirmation.
    Notice(String),
}

pub struct App {
    pub menu: Menu,
    pub menu_stack: Vec<Menu>,
    pub input: Option<InputPrompt>,
    pub key_setup: KeySetup,
    pub pending_git_name: Option<String>,
    pub transcript: Vec<TranscriptEntry>,
    pub status_message: String,
    pub defaults: ResolvedConfig,
}

impl App {
    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self {
            menu: Menu::main(),
            menu_stack: Vec::new(),
            input: None,
            key_setup: KeySetup::default(),
            pending_git_name: None,
            transcript: Vec::new(),
            status_message: String::from("Welcome to gitup!"),
            defaults: config.clone(),
        }
    }

    pub fn in_input_mode(&self) -> bool {
        self.input.is_some()
    }

    /// Enter a submenu, remembering the current menu (and its selection).
    pub fn push_menu(&mut self, next: Menu) {
        let prev = std::mem::replace(&mut self.menu, next);
        self.menu_stack.push(prev);
    }

    /// Leave the current submenu. Abandons any open prompt; a no-op on the
    /// main menu.
    pub fn pop_menu(&mut self) {
        if let Some(prev) = self.menu_stack.pop() {
            self.menu = prev;
            self.input = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::menu::{EntryId, Menu};
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.status_message, "Welcome to gitup!");
        assert!(!app.in_input_mode());
        assert!(app.menu_stack.is_empty());
        assert!(app.transcript.is_empty());
        assert_eq!(app.menu.selected_entry().id, EntryId::CreateSshKey);
    }

    #[test]
    fn test_push_pop_menu_restores_selection() {
        let mut app = test_app();
        app.menu.select_next();
        app.menu.select_next();
        let before = app.menu.clone();

        app.push_menu(Menu::ssh_key());
        assert_eq!(app.menu.selected_entry().id, EntryId::EnterKeyPath);
        assert_eq!(app.menu_stack.len(), 1);

        app.pop_menu();
        assert_eq!(app.menu, before);
        assert!(app.menu_stack.is_empty());
    }

    #[test]
    fn test_pop_menu_on_main_menu_is_noop() {
        let mut app = test_app();
        let before = app.menu.clone();
        app.pop_menu();
        assert_eq!(app.menu, before);
    }
}
