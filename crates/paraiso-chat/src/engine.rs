//! Chat engine: central coordinator wiring the menu, dataset, and session store.

use std::sync::{Arc, Mutex};

use crate::dataset::FaqDataset;
use crate::error::ChatError;
use crate::menu::MenuCatalog;
use crate::session::{SessionContext, SessionStore};
use crate::state::{transition, ChatReply, ConversationState};

/// Answers guest messages by walking the menu tree for each session.
pub struct ChatEngine {
    dataset: Arc<FaqDataset>,
    catalog: MenuCatalog,
    store: Arc<dyn SessionStore>,
    // Serializes read-transition-write so concurrent requests cannot lose an update.
    write_guard: Mutex<()>,
}

impl ChatEngine {
    pub fn new(
        dataset: Arc<FaqDataset>,
        catalog: MenuCatalog,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            dataset,
            catalog,
            store,
            write_guard: Mutex::new(()),
        }
    }

    /// Handle one incoming message for `session_id`.
    ///
    /// Unknown session ids start at the main menu. Errors only come from the
    /// session store, never from the message content.
    pub fn handle_message(
        &self,
        message: &str,
        session_id: &str,
    ) -> Result<ChatReply, ChatError> {
        let _guard = self
            .write_guard
            .lock()
            .map_err(|e| ChatError::StorageError(format!("engine lock poisoned: {}", e)))?;

        let state = match self.store.get(session_id)? {
            Some(context) => ConversationState::InSubmenu {
                intent: context.intent,
                items: context.items,
            },
            None => ConversationState::AtMainMenu,
        };

        let (next, reply) = transition(state, message, &self.catalog, &self.dataset);

        match next {
            ConversationState::AtMainMenu => self.store.delete(session_id)?,
            ConversationState::InSubmenu { intent, items } => {
                self.store.put(session_id, SessionContext::new(intent, items))?
            }
        }

        tracing::debug!(session = %session_id, source = ?reply.source, "Chat message handled");
        Ok(reply)
    }

    pub fn dataset(&self) -> &FaqDataset {
        &self.dataset
    }

    pub fn catalog(&self) -> &MenuCatalog {
        &self.catalog
    }

    /// Current session context for `session_id`, if it is inside a submenu.
    pub fn session(&self, session_id: &str) -> Result<Option<SessionContext>, ChatError> {
        self.store.get(session_id)
    }

    pub fn active_sessions(&self) -> Result<usize, ChatError> {
        self.store.count()
    }

    pub fn purge_expired(&self) -> Result<usize, ChatError> {
        self.store.purge_expired()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replies;
    use crate::session::InMemorySessionStore;
    use crate::state::ReplySource;
    use paraiso_core::types::FaqRecord;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    fn record(id: i64, intent: &str, question: &str, response: &str) -> FaqRecord {
        FaqRecord {
            id,
            intent: Some(intent.to_string()),
            question: question.to_string(),
            response: response.to_string(),
        }
    }

    fn make_engine(records: Vec<FaqRecord>) -> ChatEngine {
        ChatEngine::new(
            Arc::new(FaqDataset::from_records(records)),
            MenuCatalog::hotel(),
            Arc::new(InMemorySessionStore::new()),
        )
    }

    fn hotel_engine() -> ChatEngine {
        make_engine(vec![
            record(1, "reserva_info", "¿Cuál es el precio?", "100 USD/noche"),
            record(2, "habitacion_info", "¿Hay cunas?", "Sí, bajo pedido."),
            record(3, "habitacion_info", "¿Hay aire acondicionado?", "En todas."),
            record(4, "servicios_info", "¿Hay piscina?", "Sí, climatizada."),
        ])
    }

    #[test]
    fn test_worked_example() {
        let engine = make_engine(vec![record(
            1,
            "reserva_info",
            "¿Cuál es el precio?",
            "100 USD/noche",
        )]);

        let reply = engine.handle_message("1", "s1").unwrap();
        assert!(reply.reply.contains("1. ¿Cuál es el precio?"));
        assert_eq!(reply.source, ReplySource::Submenu);

        let reply = engine.handle_message("1", "s1").unwrap();
        assert_eq!(reply.reply, "100 USD/noche");

        let reply = engine.handle_message("salir", "s1").unwrap();
        assert_eq!(reply.reply, replies::FAREWELL);
        assert_eq!(reply.source, ReplySource::Exit);
        assert!(engine.session("s1").unwrap().is_none());
    }

    #[test]
    fn test_fresh_session_greeting_returns_menu() {
        let engine = hotel_engine();
        let reply = engine.handle_message("hola", "new-guest").unwrap();
        assert_eq!(reply.reply, replies::main_menu(engine.catalog()));
        assert_eq!(reply.source, ReplySource::Menu);
        assert_eq!(engine.active_sessions().unwrap(), 0);
    }

    #[test]
    fn test_every_key_and_index_returns_stored_response() {
        let engine = hotel_engine();
        for entry in engine.catalog().entries() {
            let items = engine.dataset().by_intent(entry.intent);
            for (idx, item) in items.iter().enumerate() {
                let session = format!("{}-{}", entry.key, idx);
                engine.handle_message(entry.key, &session).unwrap();
                let selection = (idx + 1).to_string();
                let first = engine.handle_message(&selection, &session).unwrap();
                let again = engine.handle_message(&selection, &session).unwrap();
                assert_eq!(first.reply, item.response);
                assert_eq!(again.reply, item.response);
            }
        }
    }

    #[test]
    fn test_selection_stores_context() {
        let engine = hotel_engine();
        engine.handle_message("2", "s1").unwrap();
        let ctx = engine.session("s1").unwrap().unwrap();
        assert_eq!(ctx.intent, "habitacion_info");
        assert_eq!(ctx.items.len(), 2);
        assert!(ctx.items.iter().all(|r| r.has_intent("habitacion_info")));
    }

    #[test]
    fn test_empty_intent_then_number_is_invalid_option() {
        let engine = hotel_engine();
        let reply = engine.handle_message("8", "s1").unwrap();
        assert_eq!(reply.reply, replies::NO_INFORMATION);
        let reply = engine.handle_message("1", "s1").unwrap();
        assert_eq!(reply.reply, replies::INVALID_OPTION);
    }

    #[test]
    fn test_exit_then_greeting_returns_main_menu() {
        let engine = hotel_engine();
        engine.handle_message("2", "s1").unwrap();
        engine.handle_message("adios", "s1").unwrap();
        let reply = engine.handle_message("hola", "s1").unwrap();
        assert_eq!(reply.source, ReplySource::Menu);
        let reply = engine.handle_message("1", "s1").unwrap();
        assert!(reply.reply.starts_with("Has seleccionado 'reserva_info'"));
    }

    #[test]
    fn test_menu_in_submenu_clears_context() {
        let engine = hotel_engine();
        engine.handle_message("3", "s1").unwrap();
        let reply = engine.handle_message("menu", "s1").unwrap();
        assert_eq!(reply.source, ReplySource::Menu);
        assert!(engine.session("s1").unwrap().is_none());
    }

    #[test]
    fn test_new_selection_overwrites_context() {
        let engine = hotel_engine();
        engine.handle_message("1", "s1").unwrap();
        engine.handle_message("inicio", "s1").unwrap();
        engine.handle_message("3", "s1").unwrap();
        assert_eq!(engine.session("s1").unwrap().unwrap().intent, "servicios_info");
    }

    #[test]
    fn test_sessions_do_not_share_state() {
        let engine = hotel_engine();
        engine.handle_message("1", "alice").unwrap();
        let reply = engine.handle_message("1", "bob").unwrap();
        assert!(reply.reply.starts_with("Has seleccionado 'reserva_info'"));
        let reply = engine.handle_message("1", "alice").unwrap();
        assert_eq!(reply.reply, "100 USD/noche");
    }

    #[test]
    fn test_concurrent_sessions_from_threads() {
        let engine = Arc::new(hotel_engine());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let engine = Arc::clone(&engine);
                std::thread::spawn(move || {
                    let session = format!("guest-{}", i);
                    engine.handle_message("2", &session).unwrap();
                    engine.handle_message("2", &session).unwrap()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().reply, "En todas.");
        }
        assert_eq!(engine.active_sessions().unwrap(), 8);
    }

    /// Store that sleeps inside `get` and flags any read-transition-write
    /// cycle that starts while another one is still open.
    struct SlowStore {
        inner: InMemorySessionStore,
        open_cycles: AtomicUsize,
        overlapped: AtomicBool,
    }

    impl SlowStore {
        fn new() -> Self {
            Self {
                inner: InMemorySessionStore::new(),
                open_cycles: AtomicUsize::new(0),
                overlapped: AtomicBool::new(false),
            }
        }

        fn close_cycle(&self) {
            self.open_cycles.fetch_sub(1, Ordering::SeqCst);
        }
    }

    impl SessionStore for SlowStore {
        fn get(&self, session_id: &str) -> Result<Option<SessionContext>, ChatError> {
            if self.open_cycles.fetch_add(1, Ordering::SeqCst) > 0 {
                self.overlapped.store(true, Ordering::SeqCst);
            }
            std::thread::sleep(Duration::from_millis(5));
            self.inner.get(session_id)
        }

        fn put(&self, session_id: &str, context: SessionContext) -> Result<(), ChatError> {
            let result = self.inner.put(session_id, context);
            self.close_cycle();
            result
        }

        fn delete(&self, session_id: &str) -> Result<(), ChatError> {
            let result = self.inner.delete(session_id);
            self.close_cycle();
            result
        }

        fn count(&self) -> Result<usize, ChatError> {
            self.inner.count()
        }

        fn purge_expired(&self) -> Result<usize, ChatError> {
            self.inner.purge_expired()
        }
    }

    #[test]
    fn test_same_session_messages_never_interleave() {
        let store = Arc::new(SlowStore::new());
        let engine = Arc::new(ChatEngine::new(
            Arc::new(FaqDataset::from_records(vec![
                record(2, "habitacion_info", "¿Hay cunas?", "Sí, bajo pedido."),
                record(3, "habitacion_info", "¿Hay aire acondicionado?", "En todas."),
            ])),
            MenuCatalog::hotel(),
            Arc::clone(&store) as Arc<dyn SessionStore>,
        ));
        engine.handle_message("2", "shared").unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let engine = Arc::clone(&engine);
                std::thread::spawn(move || {
                    (0..5)
                        .map(|_| engine.handle_message("1", "shared").unwrap().reply)
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        for handle in handles {
            for reply in handle.join().unwrap() {
                assert_eq!(reply, "Sí, bajo pedido.");
            }
        }

        assert!(!store.overlapped.load(Ordering::SeqCst));
        assert_eq!(store.open_cycles.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_fallback_does_not_create_session() {
        let engine = hotel_engine();
        let reply = engine.handle_message("¿tienen spa?", "s1").unwrap();
        assert_eq!(reply.source, ReplySource::Default);
        assert!(engine.session("s1").unwrap().is_none());
    }
}
