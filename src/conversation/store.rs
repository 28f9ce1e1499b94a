//! Conversation store
//!
//! Explicitly owned state container for conversations and the active
//! selection. Mutations go through `&mut self` against the latest state, so a
//! completed dispatch can never clobber a conversation through a stale
//! snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::message::{Message, Mode, Role};
use super::ConversationId;

/// Placeholder title for a conversation that has not earned one yet
pub const DEFAULT_TITLE: &str = "New Chat";

/// Maximum characters kept when deriving a title from the first message
const TITLE_MAX_CHARS: usize = 30;

/// A chat conversation with its ordered message history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    pub title: String,
    pub messages: Vec<Message>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// Owns all conversations and the active selection
///
/// The active selection is an id lookup, never an index or a reference, so
/// deletions can never leave it dangling.
#[derive(Debug, Default)]
pub struct ConversationStore {
    conversations: Vec<Conversation>,
    active_id: Option<ConversationId>,
    next_id: u64,
}

impl ConversationStore {
    /// Create an empty store with no active selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a conversation, insert it at the front, and make it active
    pub fn create(&mut self, title: &str) -> &Conversation {
        let now = Utc::now();
        let id = self.next_id("conv");
        self.conversations.insert(
            0,
            Conversation {
                id: id.clone(),
                title: title.to_string(),
                messages: Vec::new(),
                created: now,
                updated: now,
            },
        );
        self.active_id = Some(id);
        &self.conversations[0]
    }

    /// Delete a conversation
    ///
    /// If it was active, the first remaining conversation (in list order)
    /// becomes active, or the selection clears when the list is empty.
    pub fn delete(&mut self, id: &str) {
        self.conversations.retain(|c| c.id != id);
        if self.active_id.as_deref() == Some(id) {
            self.active_id = self.conversations.first().map(|c| c.id.clone());
        }
    }

    /// Update a conversation's title; silent no-op if the id is absent
    pub fn rename(&mut self, id: &str, title: &str) {
        if let Some(conversation) = self.get_mut(id) {
            conversation.title = title.to_string();
            conversation.updated = Utc::now();
        }
    }

    /// Append a message to a conversation
    ///
    /// Silent no-op when the id does not resolve: the outcome of an in-flight
    /// dispatch may target a conversation deleted in the meantime, and the
    /// message is deliberately dropped rather than resurrected. The first
    /// message of a still-placeholder-titled conversation also derives the
    /// title from its content.
    pub fn append_message(
        &mut self,
        id: &str,
        role: Role,
        mode: Mode,
        content: &str,
    ) -> Option<&Message> {
        let message_id = self.next_id("msg");
        let conversation = self.get_mut(id)?;

        if conversation.messages.is_empty() && conversation.title == DEFAULT_TITLE {
            conversation.title = derive_title(content);
        }

        conversation.messages.push(Message {
            id: message_id,
            role,
            mode,
            content: content.to_string(),
            created_at: Utc::now(),
        });
        conversation.updated = Utc::now();
        conversation.messages.last()
    }

    pub fn get(&self, id: &str) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == id)
    }

    pub fn active(&self) -> Option<&Conversation> {
        self.active_id.as_deref().and_then(|id| self.get(id))
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    /// Select a conversation by id; returns false if it does not exist
    pub fn set_active(&mut self, id: &str) -> bool {
        if self.get(id).is_some() {
            self.active_id = Some(id.to_string());
            true
        } else {
            false
        }
    }

    /// Move the active selection one step down the list
    pub fn select_next(&mut self) {
        self.select_offset(1);
    }

    /// Move the active selection one step up the list
    pub fn select_previous(&mut self) {
        self.select_offset(-1);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Conversation> {
        self.conversations.iter()
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    fn select_offset(&mut self, offset: isize) {
        if self.conversations.is_empty() {
            return;
        }
        let current = self
            .active_id
            .as_deref()
            .and_then(|id| self.conversations.iter().position(|c| c.id == id));
        let index = match current {
            Some(index) => {
                let last = self.conversations.len() as isize - 1;
                (index as isize + offset).clamp(0, last) as usize
            }
            None => 0,
        };
        self.active_id = Some(self.conversations[index].id.clone());
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Conversation> {
        self.conversations.iter_mut().find(|c| c.id == id)
    }

    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }
}

/// Derive a conversation title from its first message
///
/// Takes the first 30 characters and appends an ellipsis marker when
/// truncated.
fn derive_title(text: &str) -> String {
    let mut title: String = text.chars().take(TITLE_MAX_CHARS).collect();
    if text.chars().count() > TITLE_MAX_CHARS {
        title.push_str("...");
    }
    title
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod store_tests;
