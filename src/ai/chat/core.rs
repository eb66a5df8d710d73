use std::panic::AssertUnwindSafe;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use anyhow::{Error, Result};
use futures::FutureExt;
use tokio::task::JoinHandle;
use uuid::Uuid;

use super::models::{ChatTurn, Transcript};
use crate::ai::generator::{BoxedTextGenerator, TextGenerator};
use crate::ai::prompt;
use crate::core::AppConfig;
use crate::openai::OpenAiGenerator;

/// Shown when the model answers with nothing
pub const EMPTY_REPLY_FALLBACK: &str = "I'm sorry, I couldn't process that. Please try again!";

/// Shown when the request fails for any reason
pub const ERROR_FALLBACK: &str = "I apologize, I'm having trouble connecting right now. Please try again or chat with us on WhatsApp!";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    /// A request is outstanding and new submissions are ignored
    Awaiting,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// Nothing but whitespace was submitted
    EmptyInput,
    /// The previous request hasn't finished yet
    RequestInFlight,
}

#[derive(Debug)]
pub enum Submission {
    /// The user turn was recorded and the request is running in the
    /// returned task
    Accepted(JoinHandle<()>),
    Rejected(Rejection),
}

impl Submission {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Submission::Accepted(_))
    }

    /// Wait until the reply (or fallback) is in the transcript.
    /// Resolves immediately for rejected submissions.
    pub async fn finished(self) -> Result<(), Error> {
        match self {
            Submission::Accepted(handle) => Ok(handle.await?),
            Submission::Rejected(_) => Ok(()),
        }
    }
}

struct SessionState {
    status: SessionStatus,
    transcript: Transcript,
}

fn read_state(state: &RwLock<SessionState>) -> RwLockReadGuard<'_, SessionState> {
    state.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_state(state: &RwLock<SessionState>) -> RwLockWriteGuard<'_, SessionState> {
    state.write().unwrap_or_else(PoisonError::into_inner)
}

/// A conversation with the shopping assistant.
///
/// At most one request to the model is outstanding at a time. The
/// transcript is the only thing callers observe: `submit` records the
/// user's turn right away and the spawned request appends exactly one
/// assistant turn when it finishes, a fallback if it failed. Errors
/// never reach the caller.
///
/// Use `AssistantSession::builder()` to construct one.
pub struct AssistantSession {
    id: Uuid,
    persona: String,
    timeout: Duration,
    generator: Arc<dyn TextGenerator + Send + Sync>,
    state: Arc<RwLock<SessionState>>,
}

impl AssistantSession {
    pub fn builder(generator: BoxedTextGenerator) -> AssistantSessionBuilder {
        AssistantSessionBuilder::new(generator)
    }

    /// A session talking to the model configured in `config`
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let generator = OpenAiGenerator::from_config(config);
        let session = Self::builder(Box::new(generator))
            .persona(&prompt::persona()?)
            .timeout(config.assistant_timeout)
            .build();
        Ok(session)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn status(&self) -> SessionStatus {
        read_state(&self.state).status
    }

    pub fn is_awaiting(&self) -> bool {
        self.status() == SessionStatus::Awaiting
    }

    /// Snapshot of the conversation so far
    pub fn transcript(&self) -> Vec<ChatTurn> {
        read_state(&self.state).transcript.turns()
    }

    /// Submit the customer's message. Must be called from within a
    /// tokio runtime, the request runs as a spawned task and this
    /// returns without waiting for it.
    pub fn submit(&self, text: &str) -> Submission {
        if text.trim().is_empty() {
            tracing::debug!("Session {}: ignoring empty message", self.id);
            return Submission::Rejected(Rejection::EmptyInput);
        }

        {
            let mut state = write_state(&self.state);
            if state.status == SessionStatus::Awaiting {
                tracing::debug!("Session {}: request in flight, ignoring message", self.id);
                return Submission::Rejected(Rejection::RequestInFlight);
            }
            state.transcript.push(ChatTurn::user(text));
            state.status = SessionStatus::Awaiting;
        }

        let session_id = self.id;
        let generator = Arc::clone(&self.generator);
        let state = Arc::clone(&self.state);
        let persona = self.persona.clone();
        let prompt = text.to_string();
        let timeout = self.timeout;

        let handle = tokio::spawn(async move {
            // A panicking generator is treated like any other failure
            // so the session can't get stuck awaiting
            let request = AssertUnwindSafe(generator.generate(&persona, &prompt)).catch_unwind();

            let reply = match tokio::time::timeout(timeout, request).await {
                Ok(Ok(Ok(text))) if text.trim().is_empty() => {
                    tracing::warn!("Session {}: empty reply from model", session_id);
                    EMPTY_REPLY_FALLBACK.to_string()
                }
                Ok(Ok(Ok(text))) => text,
                Ok(Ok(Err(e))) => {
                    tracing::error!(
                        "Session {}: assistant request failed: {}. Root cause: {}",
                        session_id,
                        e,
                        e.root_cause()
                    );
                    ERROR_FALLBACK.to_string()
                }
                Ok(Err(_)) => {
                    tracing::error!("Session {}: assistant request panicked", session_id);
                    ERROR_FALLBACK.to_string()
                }
                Err(_) => {
                    tracing::error!(
                        "Session {}: assistant request timed out after {:?}",
                        session_id,
                        timeout
                    );
                    ERROR_FALLBACK.to_string()
                }
            };

            let mut state = write_state(&state);
            state.transcript.push(ChatTurn::assistant(&reply));
            state.status = SessionStatus::Idle;
        });

        Submission::Accepted(handle)
    }
}

pub struct AssistantSessionBuilder {
    generator: BoxedTextGenerator,
    persona: String,
    timeout: Duration,
}

impl AssistantSessionBuilder {
    pub fn new(generator: BoxedTextGenerator) -> Self {
        Self {
            generator,
            persona: String::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn persona(mut self, persona: &str) -> Self {
        self.persona = persona.to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> AssistantSession {
        AssistantSession {
            id: Uuid::new_v4(),
            persona: self.persona,
            timeout: self.timeout,
            generator: Arc::from(self.generator),
            state: Arc::new(RwLock::new(SessionState {
                status: SessionStatus::Idle,
                transcript: Transcript::new(),
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::chat::models::{GREETING, TurnRole};
    use anyhow::anyhow;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tokio::sync::Notify;

    struct StaticGenerator(String);

    #[async_trait]
    impl TextGenerator for StaticGenerator {
        async fn generate(&self, _system: &str, _prompt: &str) -> Result<String, Error> {
            Ok(self.0.clone())
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _system: &str, _prompt: &str) -> Result<String, Error> {
            Err(anyhow!("connection refused"))
        }
    }

    struct PanickingGenerator;

    #[async_trait]
    impl TextGenerator for PanickingGenerator {
        async fn generate(&self, _system: &str, _prompt: &str) -> Result<String, Error> {
            panic!("generator blew up")
        }
    }

    struct SlowGenerator;

    #[async_trait]
    impl TextGenerator for SlowGenerator {
        async fn generate(&self, _system: &str, _prompt: &str) -> Result<String, Error> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok("too late".to_string())
        }
    }

    /// Holds every request until `release` is notified
    struct GatedGenerator {
        release: Arc<Notify>,
    }

    #[async_trait]
    impl TextGenerator for GatedGenerator {
        async fn generate(&self, _system: &str, prompt: &str) -> Result<String, Error> {
            self.release.notified().await;
            Ok(format!("reply to {}", prompt))
        }
    }

    struct RecordingGenerator {
        calls: Arc<Mutex<Vec<(String, String)>>>,
    }

    #[async_trait]
    impl TextGenerator for RecordingGenerator {
        async fn generate(&self, system: &str, prompt: &str) -> Result<String, Error> {
            self.calls
                .lock()
                .unwrap()
                .push((system.to_string(), prompt.to_string()));
            Ok("ok".to_string())
        }
    }

    fn session(generator: impl TextGenerator + Send + Sync + 'static) -> AssistantSession {
        AssistantSession::builder(Box::new(generator))
            .persona("persona")
            .build()
    }

    #[test]
    fn test_builder_defaults() {
        let builder = AssistantSessionBuilder::new(Box::new(FailingGenerator));
        assert_eq!(builder.persona, "");
        assert_eq!(builder.timeout, DEFAULT_TIMEOUT);

        let session = builder.timeout(Duration::from_secs(3)).build();
        assert_eq!(session.timeout, Duration::from_secs(3));
        assert_eq!(session.status(), SessionStatus::Idle);
        assert_eq!(session.transcript(), vec![ChatTurn::assistant(GREETING)]);
    }

    #[test]
    fn test_sessions_have_distinct_ids() {
        let a = session(FailingGenerator);
        let b = session(FailingGenerator);
        assert_ne!(a.id(), b.id());
    }

    #[tokio::test]
    async fn test_successful_reply() {
        let session = session(StaticGenerator("Try the Avakaya!".to_string()));

        let submission = session.submit("something with mango");
        assert!(submission.is_accepted());
        submission.finished().await.unwrap();

        assert_eq!(
            session.transcript(),
            vec![
                ChatTurn::assistant(GREETING),
                ChatTurn::user("something with mango"),
                ChatTurn::assistant("Try the Avakaya!"),
            ]
        );
        assert_eq!(session.status(), SessionStatus::Idle);
    }

    #[tokio::test]
    async fn test_empty_input_is_rejected() {
        let session = session(StaticGenerator("unused".to_string()));
        for input in ["", "   ", "\n\t "] {
            match session.submit(input) {
                Submission::Rejected(reason) => assert_eq!(reason, Rejection::EmptyInput),
                Submission::Accepted(_) => panic!("Accepted empty input {:?}", input),
            }
        }
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.status(), SessionStatus::Idle);
    }

    #[tokio::test]
    async fn test_empty_reply_uses_fallback() {
        let session = session(StaticGenerator("  ".to_string()));
        session.submit("hello").finished().await.unwrap();

        let transcript = session.transcript();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[2], ChatTurn::assistant(EMPTY_REPLY_FALLBACK));
    }

    #[tokio::test]
    async fn test_failure_uses_fallback() {
        let session = session(FailingGenerator);
        session
            .submit("spicy pickle recommendation")
            .finished()
            .await
            .unwrap();

        let transcript = session.transcript();
        assert_eq!(
            transcript[1..],
            [
                ChatTurn::user("spicy pickle recommendation"),
                ChatTurn::assistant(ERROR_FALLBACK),
            ]
        );
        assert!(transcript[2].text.contains("WhatsApp"));
        assert_eq!(session.status(), SessionStatus::Idle);
    }

    #[tokio::test]
    async fn test_panic_uses_fallback() {
        let session = session(PanickingGenerator);
        session.submit("hello").finished().await.unwrap();

        assert_eq!(session.transcript().last().unwrap().text, ERROR_FALLBACK);
        assert_eq!(session.status(), SessionStatus::Idle);
    }

    #[tokio::test]
    async fn test_timeout_uses_fallback() {
        let session = AssistantSession::builder(Box::new(SlowGenerator))
            .timeout(Duration::from_millis(20))
            .build();
        session.submit("hello").finished().await.unwrap();

        assert_eq!(session.transcript().last().unwrap().text, ERROR_FALLBACK);
        assert_eq!(session.status(), SessionStatus::Idle);
    }

    #[tokio::test]
    async fn test_submit_while_awaiting_is_ignored() {
        let release = Arc::new(Notify::new());
        let session = session(GatedGenerator {
            release: Arc::clone(&release),
        });

        let first = session.submit("first");
        assert!(first.is_accepted());
        // The user turn is recorded before the reply arrives
        assert_eq!(session.status(), SessionStatus::Awaiting);
        assert_eq!(session.transcript().len(), 2);
        assert_eq!(session.transcript()[1], ChatTurn::user("first"));

        match session.submit("second") {
            Submission::Rejected(reason) => assert_eq!(reason, Rejection::RequestInFlight),
            Submission::Accepted(_) => panic!("Accepted while awaiting"),
        }
        assert_eq!(session.transcript().len(), 2);

        release.notify_one();
        first.finished().await.unwrap();

        let transcript = session.transcript();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[2], ChatTurn::assistant("reply to first"));
        assert_eq!(session.status(), SessionStatus::Idle);

        // Accepting again once idle
        let third = session.submit("third");
        assert!(third.is_accepted());
        release.notify_one();
        third.finished().await.unwrap();

        let roles: Vec<TurnRole> = session.transcript().iter().map(|t| t.role).collect();
        assert_eq!(
            roles,
            vec![
                TurnRole::Assistant,
                TurnRole::User,
                TurnRole::Assistant,
                TurnRole::User,
                TurnRole::Assistant,
            ]
        );
    }

    #[tokio::test]
    async fn test_request_carries_persona_and_raw_text() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let session = AssistantSession::builder(Box::new(RecordingGenerator {
            calls: Arc::clone(&calls),
        }))
        .persona("You are a pickle expert.")
        .build();

        session.submit("  gift ideas?  ").finished().await.unwrap();

        let calls = calls.lock().unwrap();
        assert_eq!(
            *calls,
            vec![(
                "You are a pickle expert.".to_string(),
                "  gift ideas?  ".to_string()
            )]
        );
        assert_eq!(session.transcript()[1].text, "  gift ideas?  ");
    }
}
