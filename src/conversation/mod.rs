//! Conversation state
//!
//! Owns the set of conversations and their message histories. All state is
//! process-local in the current mode; the store's public contract matches the
//! shape a remote session backend would expose (create/list/rename/delete/
//! append), so persistence is a data-source swap only.

mod message;
mod store;

pub use message::{Message, Mode, Role};
pub use store::{Conversation, ConversationStore, DEFAULT_TITLE};

/// Session-stable conversation identifier
pub type ConversationId = String;
