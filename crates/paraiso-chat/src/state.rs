//! Conversation state machine.
//!
//! Two states per session: at the main menu, or inside the submenu of one
//! intent. [`transition`] is pure: it maps the current state and a message to
//! the next state and a reply, leaving storage to the engine.

use serde::{Deserialize, Serialize};

use paraiso_core::types::FaqRecord;

use crate::dataset::FaqDataset;
use crate::menu::MenuCatalog;
use crate::replies;

const EXIT_PHRASES: [&str; 3] = ["salir", "adios", "gracias"];
const RETURN_PHRASES: [&str; 2] = ["menu", "inicio"];
const GREETING_PHRASES: [&str; 5] = ["hola", "buenos días", "buenas tardes", "menu", "inicio"];

/// Which branch of the conversation produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplySource {
    Exit,
    Menu,
    Submenu,
    Default,
}

/// Reply text plus its source, as returned to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
    pub source: ReplySource,
}

impl ChatReply {
    fn new(reply: impl Into<String>, source: ReplySource) -> Self {
        Self {
            reply: reply.into(),
            source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConversationState {
    #[default]
    AtMainMenu,
    InSubmenu {
        intent: String,
        items: Vec<FaqRecord>,
    },
}

/// Lowercase and trim a raw message for keyword matching.
pub fn normalize(message: &str) -> String {
    message.trim().to_lowercase()
}

/// Parse a 1-based submenu selection.
///
/// `None` when the text is not made only of ASCII digits. Digit strings too
/// large for `usize` map to `Some(usize::MAX)`, which is always out of range.
fn parse_selection(msg: &str) -> Option<usize> {
    if msg.is_empty() || !msg.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(msg.parse::<usize>().unwrap_or(usize::MAX))
}

/// Apply one message to a session's state.
///
/// Precedence: exit phrases, then submenu input, then greetings, then main
/// menu keys, then the fallback reply.
pub fn transition(
    state: ConversationState,
    message: &str,
    catalog: &MenuCatalog,
    dataset: &FaqDataset,
) -> (ConversationState, ChatReply) {
    let msg = normalize(message);

    if EXIT_PHRASES.contains(&msg.as_str()) {
        return (
            ConversationState::AtMainMenu,
            ChatReply::new(replies::FAREWELL, ReplySource::Exit),
        );
    }

    if let ConversationState::InSubmenu { ref items, .. } = state {
        if let Some(selection) = parse_selection(&msg) {
            let reply = match selection.checked_sub(1).and_then(|idx| items.get(idx)) {
                Some(item) => ChatReply::new(item.response.clone(), ReplySource::Submenu),
                None => ChatReply::new(replies::INVALID_OPTION, ReplySource::Submenu),
            };
            return (state, reply);
        }
        if RETURN_PHRASES.contains(&msg.as_str()) {
            return (
                ConversationState::AtMainMenu,
                ChatReply::new(replies::main_menu(catalog), ReplySource::Menu),
            );
        }
        return (
            state,
            ChatReply::new(replies::SUBMENU_PROMPT, ReplySource::Submenu),
        );
    }

    if GREETING_PHRASES.contains(&msg.as_str()) {
        return (
            ConversationState::AtMainMenu,
            ChatReply::new(replies::main_menu(catalog), ReplySource::Menu),
        );
    }

    if let Some(entry) = catalog.get(&msg) {
        let items = dataset.by_intent(entry.intent);
        let reply = ChatReply::new(replies::submenu(entry.intent, &items), ReplySource::Submenu);
        return (
            ConversationState::InSubmenu {
                intent: entry.intent.to_string(),
                items,
            },
            reply,
        );
    }

    (
        state,
        ChatReply::new(replies::NOT_UNDERSTOOD, ReplySource::Default),
    )
}
