use holiday_core::{Id, Message, Role, Timestamp};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SessionStats {
    pub message_count: usize,
    pub tool_call_count: usize,
    pub iteration_count: usize,
    pub turn_count: usize,
}

#[derive(Debug, Default)]
struct SessionInner {
    messages: Vec<Message>,
    stats: SessionStats,
}

/// One conversation: an append-only history keyed by an opaque id.
///
/// Clones share state. Turns are serialized through [`Session::begin_turn`],
/// so two callers driving the same session never interleave their appends.
#[derive(Clone, Debug)]
pub struct Session {
    id: String,
    created_at: Timestamp,
    inner: Arc<RwLock<SessionInner>>,
    turn: Arc<Mutex<()>>,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            created_at: Timestamp::now(),
            inner: Arc::new(RwLock::new(SessionInner::default())),
            turn: Arc::new(Mutex::new(())),
        }
    }

    /// A session with a fresh random id.
    pub fn generate() -> Self {
        Self::new(Id::new().to_string())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Waits for any turn already running on this session, then holds the
    /// session until the guard drops.
    pub async fn begin_turn(&self) -> OwnedMutexGuard<()> {
        let guard = self.turn.clone().lock_owned().await;
        self.write().stats.turn_count += 1;
        guard
    }

    pub fn add_message(&self, message: Message) {
        let mut inner = self.write();
        inner.stats.message_count += 1;
        inner.messages.push(message);
    }

    pub fn add_messages(&self, messages: impl IntoIterator<Item = Message>) {
        let mut inner = self.write();
        for message in messages {
            inner.stats.message_count += 1;
            inner.messages.push(message);
        }
    }

    pub fn messages(&self) -> Vec<Message> {
        self.read().messages.clone()
    }

    pub fn message_count(&self) -> usize {
        self.read().messages.len()
    }

    pub fn last_messages(&self, n: usize) -> Vec<Message> {
        let inner = self.read();
        let len = inner.messages.len();
        if n >= len {
            inner.messages.clone()
        } else {
            inner.messages[len - n..].to_vec()
        }
    }

    /// Text of the most recent final answer.
    pub fn last_answer(&self) -> Option<String> {
        self.read()
            .messages
            .iter()
            .rev()
            .find(|m| m.role == Role::Assistant && !m.has_tool_use())
            .map(Message::text_content)
    }

    pub fn clear(&self) {
        self.write().messages.clear();
    }

    pub fn stats(&self) -> SessionStats {
        self.read().stats.clone()
    }

    pub fn increment_tool_calls(&self, count: usize) {
        self.write().stats.tool_call_count += count;
    }

    pub fn increment_iterations(&self) {
        self.write().stats.iteration_count += 1;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::generate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holiday_core::message::{ContentBlock, ToolUse};
    use std::time::Duration;

    #[test]
    fn test_session_new() {
        let session = Session::new("user-1");
        assert_eq!(session.id(), "user-1");
        assert_eq!(session.message_count(), 0);
        assert_ne!(Session::generate().id(), Session::generate().id());
    }

    #[test]
    fn test_session_add_message() {
        let session = Session::new("s");
        session.add_message(Message::user("Hello"));
        session.add_message(Message::assistant("Hi there!"));

        let messages = session.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[1].role, Role::Assistant);
    }

    #[test]
    fn test_session_last_messages() {
        let session = Session::new("s");
        for i in 0..10 {
            session.add_message(Message::user(format!("Message {}", i)));
        }

        let last_3 = session.last_messages(3);
        assert_eq!(last_3.len(), 3);
        assert_eq!(last_3[0].text_content(), "Message 7");
        assert_eq!(session.last_messages(20).len(), 10);
    }

    #[test]
    fn test_last_answer_skips_tool_requests() {
        let session = Session::new("s");
        assert!(session.last_answer().is_none());

        session.add_message(Message::user("q"));
        session.add_message(Message::assistant("first"));
        session.add_message(Message::new(
            Role::Assistant,
            vec![ContentBlock::tool_use(ToolUse::new(
                "c",
                "get_holidays",
                serde_json::json!({}),
            ))],
        ));

        assert_eq!(session.last_answer().as_deref(), Some("first"));
    }

    #[test]
    fn test_session_stats() {
        let session = Session::new("s");
        session.add_message(Message::user("Hello"));
        session.increment_tool_calls(2);
        session.increment_iterations();

        let stats = session.stats();
        assert_eq!(stats.message_count, 1);
        assert_eq!(stats.tool_call_count, 2);
        assert_eq!(stats.iteration_count, 1);
    }

    #[test]
    fn test_session_clone_shares_state() {
        let session1 = Session::new("shared");
        let session2 = session1.clone();

        session1.add_message(Message::user("Hello"));

        assert_eq!(session2.message_count(), 1);
    }

    #[tokio::test]
    async fn test_turns_are_exclusive() {
        let session = Session::new("s");
        let guard = session.begin_turn().await;

        let other = session.clone();
        let waiter = tokio::spawn(async move {
            let _turn = other.begin_turn().await;
            other.add_message(Message::user("second"));
        });

        tokio::time::sleep(Duration::from_millis(50)).await;
        session.add_message(Message::user("first"));
        assert!(!waiter.is_finished());
        drop(guard);

        waiter.await.unwrap();
        let texts: Vec<_> = session.messages().iter().map(|m| m.text_content()).collect();
        assert_eq!(texts, vec!["first", "second"]);
        assert_eq!(session.stats().turn_count, 2);
    }
}
