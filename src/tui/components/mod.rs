//! # TUI Components
//!
//! All UI pieces for the terminal interface.
//!
//! Stateless, props-based: `TitleBar`, `MenuList`, `InputField`. Stateful:
//! `Transcript`, whose scroll position lives in `TranscriptState` inside
//! `TuiState` while the component itself is a transient per-frame wrapper.
//!
//! Each component file contains its state types, rendering logic, event
//! handling, and tests, so one file tells the whole story.

pub mod input_field;
pub mod menu_list;
pub mod title_bar;
pub mod transcript;

pub use input_field::InputField;
pub use menu_list::MenuList;
pub use title_bar::TitleBar;
pub use transcript::{Transcript, TranscriptState};
