use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use doctor_cell::Catalog;
use shared_config::MessagingTimings;
use shared_models::ids::DoctorId;

use crate::error::MessagingError;
use crate::models::{ConversationSnapshot, SendOutcome};
use crate::services::classifier::ResponseClassifier;
use crate::services::session::ConversationSession;

/// Open conversation sessions keyed by session id.
pub struct ConversationRegistry {
    sessions: RwLock<HashMap<Uuid, Arc<ConversationSession>>>,
    catalog: Arc<Catalog>,
    classifier: Arc<ResponseClassifier>,
    timings: MessagingTimings,
}

impl ConversationRegistry {
    pub fn new(catalog: Arc<Catalog>, timings: MessagingTimings) -> Self {
        Self::with_classifier(catalog, Arc::new(ResponseClassifier::default()), timings)
    }

    pub fn with_classifier(
        catalog: Arc<Catalog>,
        classifier: Arc<ResponseClassifier>,
        timings: MessagingTimings,
    ) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            catalog,
            classifier,
            timings,
        }
    }

    #[instrument(skip(self))]
    pub async fn open(
        &self,
        doctor_id: DoctorId,
        appointment_id: Option<String>,
    ) -> Result<Arc<ConversationSession>, MessagingError> {
        let doctor = self
            .catalog
            .get(doctor_id)
            .ok_or(MessagingError::DoctorNotFound(doctor_id))?;

        let session = Arc::new(ConversationSession::open(
            doctor,
            appointment_id,
            self.classifier.clone(),
            self.timings,
        ));

        let mut sessions = self.sessions.write().await;
        let expired = Self::sweep_idle(&mut sessions, self.timings.session_idle());
        if expired > 0 {
            info!("Expired {} idle conversations", expired);
        }
        sessions.insert(session.id(), session.clone());
        Ok(session)
    }

    /// Closes and forgets sessions idle for at least `idle`.
    fn sweep_idle(sessions: &mut HashMap<Uuid, Arc<ConversationSession>>, idle: Duration) -> usize {
        let before = sessions.len();
        sessions.retain(|id, session| {
            if session.idle_for() < idle {
                return true;
            }
            let cancelled = session.close();
            debug!("Conversation {} idle, cancelled {} effects", id, cancelled);
            false
        });
        before - sessions.len()
    }

    pub async fn get(&self, session_id: Uuid) -> Result<Arc<ConversationSession>, MessagingError> {
        self.sessions
            .read()
            .await
            .get(&session_id)
            .cloned()
            .ok_or(MessagingError::SessionNotFound(session_id))
    }

    pub async fn snapshot(&self, session_id: Uuid) -> Result<ConversationSnapshot, MessagingError> {
        Ok(self.get(session_id).await?.snapshot().await)
    }

    pub async fn send(&self, session_id: Uuid, text: &str) -> Result<SendOutcome, MessagingError> {
        self.get(session_id).await?.send(text).await
    }

    /// Cancels the session's outstanding effects, then forgets it.
    pub async fn close(&self, session_id: Uuid) -> Result<usize, MessagingError> {
        let session = self
            .sessions
            .write()
            .await
            .remove(&session_id)
            .ok_or(MessagingError::SessionNotFound(session_id))?;

        Ok(session.close())
    }

    pub async fn close_all(&self) -> usize {
        let sessions: Vec<_> = self.sessions.write().await.drain().map(|(_, s)| s).collect();
        let cancelled = sessions.iter().map(|session| session.close()).sum::<usize>();
        info!("Closed {} conversations, cancelled {} effects", sessions.len(), cancelled);
        cancelled
    }

    pub async fn open_sessions(&self) -> usize {
        self.sessions.read().await.len()
    }
}
