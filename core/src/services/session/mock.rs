//! In-memory session store for tests and local development

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::verification_code::{CodePurpose, VerificationCode};
use crate::errors::DomainError;

use super::traits::SessionStore;

#[derive(Debug, Default, Clone)]
struct SessionData {
    codes: HashMap<CodePurpose, VerificationCode>,
    user_id: Option<Uuid>,
}

/// Session store backed by a process-local map
#[derive(Clone, Default)]
pub struct MockSessionStore {
    sessions: Arc<RwLock<HashMap<String, SessionData>>>,
}

impl MockSessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plant a code directly, bypassing issuance
    pub async fn insert_code(&self, session_id: &str, purpose: CodePurpose, code: &str) {
        let mut issued = VerificationCode::issue(purpose, String::new(), 300);
        issued.code = code.to_string();
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(session_id.to_string())
            .or_default()
            .codes
            .insert(purpose, issued);
    }
}

#[async_trait]
impl SessionStore for MockSessionStore {
    async fn get_code(&self, session_id: &str, purpose: CodePurpose) -> Result<Option<VerificationCode>, DomainError> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(session_id)
            .and_then(|s| s.codes.get(&purpose))
            .filter(|c| !c.is_expired())
            .cloned())
    }

    async fn store_code(&self, session_id: &str, code: &VerificationCode) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(session_id.to_string())
            .or_default()
            .codes
            .insert(code.purpose, code.clone());
        Ok(())
    }

    async fn clear_code(&self, session_id: &str, purpose: CodePurpose) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        if let Some(session) = sessions.get_mut(session_id) {
            session.codes.remove(&purpose);
        }
        Ok(())
    }

    async fn get_user_id(&self, session_id: &str) -> Result<Option<Uuid>, DomainError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(session_id).and_then(|s| s.user_id))
    }

    async fn set_user_id(&self, session_id: &str, user_id: Uuid) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        sessions.entry(session_id.to_string()).or_default().user_id = Some(user_id);
        Ok(())
    }

    async fn clear_user_id(&self, session_id: &str) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        if let Some(session) = sessions.get_mut(session_id) {
            session.user_id = None;
        }
        Ok(())
    }
}
