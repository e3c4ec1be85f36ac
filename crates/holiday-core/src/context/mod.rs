use crate::types::{RequestId, Timestamp};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Per-call execution context handed to tools.
#[derive(Clone)]
pub struct Context {
    pub request_id: RequestId,
    pub session_id: Option<String>,
    pub started_at: Timestamp,
    pub deadline: Option<Timestamp>,
    cancellation: CancellationToken,
}

impl Context {
    pub fn new() -> Self {
        Self {
            request_id: RequestId::new(),
            session_id: None,
            started_at: Timestamp::now(),
            deadline: None,
            cancellation: CancellationToken::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let deadline_ms = self.started_at.unix_millis() + timeout.as_millis() as i64;
        self.deadline = Timestamp::from_unix_millis(deadline_ms);
        self
    }

    pub fn with_deadline(mut self, deadline: Timestamp) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    pub fn cancel(&self) {
        self.cancellation.cancel()
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    pub fn is_timeout(&self) -> bool {
        self.deadline.map(|d| Timestamp::now() > d).unwrap_or(false)
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.deadline.map(|d| {
            let now = Timestamp::now().unix_millis();
            let deadline = d.unix_millis();
            if deadline > now {
                Duration::from_millis((deadline - now) as u64)
            } else {
                Duration::ZERO
            }
        })
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("request_id", &self.request_id)
            .field("session_id", &self.session_id)
            .field("started_at", &self.started_at)
            .field("deadline", &self.deadline)
            .field("is_cancelled", &self.is_cancelled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_deadline_by_default() {
        let ctx = Context::new();
        assert!(ctx.remaining().is_none());
        assert!(!ctx.is_timeout());
    }

    #[test]
    fn test_with_timeout_sets_remaining() {
        let ctx = Context::new().with_timeout(Duration::from_secs(30));
        let remaining = ctx.remaining().unwrap();
        assert!(remaining <= Duration::from_secs(30));
        assert!(remaining > Duration::from_secs(20));
    }

    #[test]
    fn test_cancel_is_shared_between_clones() {
        let ctx = Context::new().with_session("hw03");
        let clone = ctx.clone();
        ctx.cancel();
        assert!(clone.is_cancelled());
        assert_eq!(clone.session_id.as_deref(), Some("hw03"));
    }
}
