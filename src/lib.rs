//! notepilot - terminal copilot panel for notebook drafts
//!
//! Manages multiple chat conversations, routes prompts to a remote completion
//! service in `ask` or `edit` mode, and offers inline ghost-text suggestions
//! for continuing the draft. All conversation state is process-local in the
//! current mode.

pub mod backend;
pub mod config;
pub mod context;
pub mod conversation;
pub mod dispatch;
pub mod draft;
pub mod error;
pub mod panel;
pub mod suggest;
