//! # Menu Definitions
//!
//! The task menus shown in the left pane. A `Menu` owns its entries and the
//! selection index; the index is kept in bounds by construction, since the
//! fields are private and every mutation goes through the clamping methods.

/// Identifies what a menu entry does when activated, independent of its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryId {
    // Main menu
    CreateSshKey,
    SetGitIdentity,
    CloneRepository,
    CommitAndSync,
    TestConnection,
    AddKeyToAgent,
    Exit,

    // SSH key submenu
    EnterKeyPath,
    EnterPassphrase,
    GenerateKeys,

    // Connection test submenu
    TestGithub,
    TestGitea,

    // Shared submenu entries
    Back,
    Cancel,
}

/// One selectable line in a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    pub id: EntryId,
    pub label: &'static str,
}

const fn entry(id: EntryId, label: &'static str) -> MenuEntry {
    MenuEntry { id, label }
}

/// An options list plus the current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    entries: Vec<MenuEntry>,
    selected: usize,
}

impl Menu {
    fn new(entries: Vec<MenuEntry>) -> Self {
        debug_assert!(!entries.is_empty());
        Self {
            entries,
            selected: 0,
        }
    }

    /// The top-level task list.
    pub fn main() -> Self {
        Self::new(vec![
            entry(EntryId::CreateSshKey, "Create SSH Key"),
            entry(EntryId::SetGitIdentity, "Set Global Git Config"),
            entry(EntryId::CloneRepository, "Clone Repository"),
            entry(EntryId::CommitAndSync, "Commit and Sync Changes"),
            entry(EntryId::TestConnection, "Test SSH Connection"),
            entry(EntryId::AddKeyToAgent, "Add Key to Agent"),
            entry(EntryId::Exit, "Exit"),
        ])
    }

    /// Parameters for key generation, gathered before running ssh-keygen.
    pub fn ssh_key() -> Self {
        Self::new(vec![
            entry(EntryId::EnterKeyPath, "Enter file path"),
            entry(EntryId::EnterPassphrase, "Enter passphrase"),
            entry(EntryId::GenerateKeys, "Generate Keys"),
            entry(EntryId::Back, "Back"),
            entry(EntryId::Cancel, "Cancel"),
        ])
    }

    /// Which host to test the SSH connection against.
    pub fn test_connection() -> Self {
        Self::new(vec![
            entry(EntryId::TestGithub, "GitHub"),
            entry(EntryId::TestGitea, "Gitea"),
            entry(EntryId::Back, "Back"),
            entry(EntryId::Cancel, "Cancel"),
        ])
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_entry(&self) -> MenuEntry {
        self.entries[self.selected]
    }

    /// Move the selection up one entry, stopping at the top.
    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Move the selection down one entry, stopping at the bottom.
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.entries.len() {
            self.selected += 1;
        }
    }
}
