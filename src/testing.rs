//! Test utilities: an in-memory stand-in for the remote MicroLearn API.
//!
//! Mirrors the remote service's behaviour closely enough for handler tests:
//! duplicate usernames are rejected, every generation counts as a session
//! and lands in history, and every mastery report adds to the counter.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::api::{ApiError, GenerateRequest, LearnApi, LoginRequest, RegisterRequest};
use crate::domain::{ChatMessage, MasteryReport, StudyMode, User};

struct StoredUser {
    user: User,
    password: String,
}

#[derive(Default)]
struct Inner {
    users: HashMap<String, StoredUser>,
    history: HashMap<String, Vec<ChatMessage>>,
    content: HashMap<StudyMode, String>,
    next_id: u64,
    fail_generation: bool,
    fail_mastery: bool,
    mastery_calls: usize,
}

#[derive(Default)]
pub struct MemoryLearnApi {
    inner: Mutex<Inner>,
}

fn rejected(status: u16, message: &str) -> ApiError {
    ApiError::Rejected {
        status,
        message: message.to_string(),
    }
}

/// Content returned for a mode unless a test scripts its own
fn canned_content(mode: StudyMode, topic: &str) -> String {
    match mode {
        StudyMode::Lesson => format!("## {}\n- Key idea one\n- Key idea two", topic),
        StudyMode::Flashcards => format!(
            "**Q:** What is {topic}?\n**A:** A subject worth studying\n\n\
             Q: Why learn {topic}?\nA: Because it is\nuseful",
        ),
        StudyMode::Quiz => format!(
            "Q: Which is true of {}?\nA) One\nB) Two\nC) Three\nD) Four\nCorrect: A",
            topic
        ),
        StudyMode::Notes => format!("Definition: {}\n\n1. Point\n2. Point", topic),
    }
}

impl MemoryLearnApi {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("memory api lock poisoned")
    }

    /// Create an account directly, bypassing `register`
    pub fn seed_user(&self, name: &str, username: &str, password: &str) -> User {
        let mut inner = self.lock();
        inner.next_id += 1;
        let user = User {
            id: format!("u{}", inner.next_id),
            name: name.to_string(),
            username: username.to_string(),
            total_sessions: 0,
            mastered_cards: 0,
            created_at: Utc::now().timestamp_millis(),
        };
        inner.history.insert(user.id.clone(), Vec::new());
        inner.users.insert(
            user.id.clone(),
            StoredUser {
                user: user.clone(),
                password: password.to_string(),
            },
        );
        user
    }

    /// Add a message to a user's remote history
    pub fn seed_history(&self, user_id: &str, message: ChatMessage) {
        self.lock()
            .history
            .entry(user_id.to_string())
            .or_default()
            .push(message);
    }

    /// Return `content` for every generation in `mode`
    pub fn script_content(&self, mode: StudyMode, content: &str) {
        self.lock().content.insert(mode, content.to_string());
    }

    pub fn fail_generation(&self, fail: bool) {
        self.lock().fail_generation = fail;
    }

    pub fn fail_mastery_reports(&self, fail: bool) {
        self.lock().fail_mastery = fail;
    }

    pub fn mastered_cards(&self, user_id: &str) -> Option<u32> {
        self.lock().users.get(user_id).map(|s| s.user.mastered_cards)
    }

    pub fn total_sessions(&self, user_id: &str) -> Option<u32> {
        self.lock().users.get(user_id).map(|s| s.user.total_sessions)
    }

    /// Mastery reports received, including failed ones
    pub fn mastery_calls(&self) -> usize {
        self.lock().mastery_calls
    }
}

#[async_trait]
impl LearnApi for MemoryLearnApi {
    async fn register(&self, request: &RegisterRequest) -> Result<User, ApiError> {
        let taken = self
            .lock()
            .users
            .values()
            .any(|s| s.user.username == request.username);
        if taken {
            return Err(rejected(400, "Username already exists"));
        }
        Ok(self.seed_user(&request.name, &request.username, &request.password))
    }

    async fn login(&self, request: &LoginRequest) -> Result<User, ApiError> {
        self.lock()
            .users
            .values()
            .find(|s| s.user.username == request.username && s.password == request.password)
            .map(|s| s.user.clone())
            .ok_or_else(|| rejected(401, "Invalid credentials"))
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<ChatMessage, ApiError> {
        let mut inner = self.lock();
        if inner.fail_generation {
            return Err(ApiError::Transport("generation service unavailable".to_string()));
        }

        let content = inner
            .content
            .get(&request.mode)
            .cloned()
            .unwrap_or_else(|| canned_content(request.mode, &request.topic));

        let message = ChatMessage {
            role: "assistant".to_string(),
            content,
            mode: request.mode.as_str().to_string(),
            topic: request.topic.clone(),
            timestamp: Utc::now().timestamp_millis(),
        };

        let stored = inner
            .users
            .get_mut(&request.user_id)
            .ok_or_else(|| rejected(404, "User not found"))?;
        stored.user.total_sessions += 1;

        inner
            .history
            .entry(request.user_id.clone())
            .or_default()
            .push(message.clone());

        Ok(message)
    }

    async fn history(&self, user_id: &str) -> Result<Vec<ChatMessage>, ApiError> {
        Ok(self.lock().history.get(user_id).cloned().unwrap_or_default())
    }

    async fn progress(&self, user_id: &str) -> Result<User, ApiError> {
        self.lock()
            .users
            .get(user_id)
            .map(|s| s.user.clone())
            .ok_or_else(|| rejected(404, "User not found"))
    }

    async fn report_mastery(&self, report: &MasteryReport) -> Result<(), ApiError> {
        let mut inner = self.lock();
        inner.mastery_calls += 1;
        if inner.fail_mastery {
            return Err(ApiError::Transport("progress service unavailable".to_string()));
        }

        let stored = inner
            .users
            .get_mut(&report.user_id)
            .ok_or_else(|| rejected(404, "User not found"))?;
        stored.user.mastered_cards += report.cards_reviewed;
        Ok(())
    }
}
