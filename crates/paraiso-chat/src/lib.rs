//! Scripted FAQ conversation for the Paraíso Azul hotel site.
//!
//! Provides the FAQ dataset store, the fixed main-menu catalog, the session
//! store, and the menu-driven conversation engine.

pub mod dataset;
pub mod engine;
pub mod error;
pub mod menu;
pub mod replies;
pub mod session;
pub mod state;

pub use dataset::{FaqDataset, IntentCount};
pub use engine::ChatEngine;
pub use error::ChatError;
pub use menu::{MenuCatalog, MenuEntry};
pub use session::{InMemorySessionStore, SessionContext, SessionStore};
pub use state::{transition, ChatReply, ConversationState, ReplySource};
