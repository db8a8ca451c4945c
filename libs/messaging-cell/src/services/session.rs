use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex as StdMutex, Weak};
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use doctor_cell::DoctorRecord;
use shared_config::MessagingTimings;
use shared_models::ids::DoctorId;

use crate::error::MessagingError;
use crate::models::{
    ConversationMessage, ConversationSnapshot, DeliveryStatus, MessageId, ScheduledEffect,
    SendOutcome,
};
use crate::services::classifier::ResponseClassifier;

#[derive(Debug, Default)]
struct Transcript {
    messages: Vec<ConversationMessage>,
    next_id: MessageId,
    pending_replies: usize,
}

impl Transcript {
    fn push(&mut self, build: impl FnOnce(MessageId) -> ConversationMessage) -> ConversationMessage {
        self.next_id += 1;
        let message = build(self.next_id);
        self.messages.push(message.clone());
        message
    }

    fn advance_status(&mut self, id: MessageId, status: DeliveryStatus) {
        if let Some(message) = self.messages.iter_mut().find(|m| m.id == id) {
            if message.status.is_some_and(|current| current < status) {
                message.status = Some(status);
            }
        }
    }

    fn apply(&mut self, sent_id: MessageId, effect: ScheduledEffect) {
        match effect {
            ScheduledEffect::MarkDelivered => self.advance_status(sent_id, DeliveryStatus::Delivered),
            ScheduledEffect::MarkRead => self.advance_status(sent_id, DeliveryStatus::Read),
            ScheduledEffect::Reply(text) => {
                self.pending_replies = self.pending_replies.saturating_sub(1);
                self.push(|id| ConversationMessage::received(id, text));
            }
        }
    }
}

/// One open messaging panel. Scheduled effects are tracked per sent
/// message and aborted when the session closes.
pub struct ConversationSession {
    id: Uuid,
    doctor_id: DoctorId,
    doctor_name: String,
    appointment_id: Option<String>,
    transcript: Arc<Mutex<Transcript>>,
    effects: StdMutex<HashMap<MessageId, Vec<JoinHandle<()>>>>,
    closed: AtomicBool,
    last_active: StdMutex<Instant>,
    classifier: Arc<ResponseClassifier>,
    timings: MessagingTimings,
}

impl ConversationSession {
    pub fn open(
        doctor: &DoctorRecord,
        appointment_id: Option<String>,
        classifier: Arc<ResponseClassifier>,
        timings: MessagingTimings,
    ) -> Self {
        let appointment_id = appointment_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());

        let mut transcript = Transcript::default();
        transcript.push(|id| {
            ConversationMessage::system(
                id,
                format!("Connected to {}'s office. How can we help you today?", doctor.name),
            )
        });
        if let Some(appointment_id) = &appointment_id {
            transcript.push(|id| {
                ConversationMessage::system(
                    id,
                    format!(
                        "Your appointment (ID: {}) is confirmed for today at 2:30 PM. Please arrive 15 minutes early.",
                        appointment_id
                    ),
                )
            });
        }

        let session = Self {
            id: Uuid::new_v4(),
            doctor_id: doctor.id,
            doctor_name: doctor.name.clone(),
            appointment_id,
            transcript: Arc::new(Mutex::new(transcript)),
            effects: StdMutex::new(HashMap::new()),
            closed: AtomicBool::new(false),
            last_active: StdMutex::new(Instant::now()),
            classifier,
            timings,
        };

        info!("Opened conversation {} with doctor {}", session.id, session.doctor_id);
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn doctor_id(&self) -> DoctorId {
        self.doctor_id
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn touch(&self) {
        *self.last_active.lock().unwrap_or_else(|e| e.into_inner()) = Instant::now();
    }

    /// Time since the session was opened, read or written to.
    pub fn idle_for(&self) -> Duration {
        self.last_active
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .elapsed()
    }

    /// Appends the message and schedules delivered / reply / read relative
    /// to now. Blank input is ignored.
    #[instrument(skip(self, text), fields(session_id = %self.id))]
    pub async fn send(&self, text: &str) -> Result<SendOutcome, MessagingError> {
        if self.is_closed() {
            return Err(MessagingError::SessionClosed(self.id));
        }
        self.touch();
        if text.trim().is_empty() {
            debug!("Ignoring blank message");
            return Ok(SendOutcome::Ignored);
        }

        let reply = self.classifier.respond(text).to_string();

        let message = {
            let mut transcript = self.transcript.lock().await;
            transcript.pending_replies += 1;
            transcript.push(|id| ConversationMessage::sent(id, text))
        };

        let handles = vec![
            self.schedule(message.id, self.timings.delivered_after(), ScheduledEffect::MarkDelivered),
            self.schedule(message.id, self.timings.reply_after(), ScheduledEffect::Reply(reply)),
            self.schedule(message.id, self.timings.read_after(), ScheduledEffect::MarkRead),
        ];

        let mut effects = self.effects.lock().unwrap_or_else(|e| e.into_inner());
        effects.retain(|_, tasks| {
            tasks.retain(|task| !task.is_finished());
            !tasks.is_empty()
        });
        if self.is_closed() {
            // Closed while we were appending; nothing may outlive the session.
            handles.iter().for_each(JoinHandle::abort);
            return Err(MessagingError::SessionClosed(self.id));
        }
        effects.insert(message.id, handles);

        debug!("Message {} sent, {} messages awaiting effects", message.id, effects.len());
        Ok(SendOutcome::Sent { message })
    }

    fn schedule(&self, sent_id: MessageId, delay: Duration, effect: ScheduledEffect) -> JoinHandle<()> {
        let transcript: Weak<Mutex<Transcript>> = Arc::downgrade(&self.transcript);
        let session_id = self.id;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(transcript) = transcript.upgrade() else {
                debug!("Conversation {} gone, dropping {:?}", session_id, effect);
                return;
            };
            transcript.lock().await.apply(sent_id, effect);
        })
    }

    pub async fn snapshot(&self) -> ConversationSnapshot {
        self.touch();
        let transcript = self.transcript.lock().await;
        ConversationSnapshot {
            session_id: self.id,
            doctor_id: self.doctor_id,
            doctor_name: self.doctor_name.clone(),
            appointment_id: self.appointment_id.clone(),
            messages: transcript.messages.clone(),
            is_typing: transcript.pending_replies > 0,
        }
    }

    /// Number of scheduled effects that have not run yet.
    pub fn pending_effects(&self) -> usize {
        self.effects
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .flatten()
            .filter(|task| !task.is_finished())
            .count()
    }

    /// Aborts every outstanding effect. Returns how many were still
    /// pending. Idempotent.
    pub fn close(&self) -> usize {
        if self.closed.swap(true, Ordering::SeqCst) {
            return 0;
        }

        let mut effects = self.effects.lock().unwrap_or_else(|e| e.into_inner());
        let mut cancelled = 0;
        for (_, tasks) in effects.drain() {
            for task in tasks {
                if !task.is_finished() {
                    cancelled += 1;
                }
                task.abort();
            }
        }

        info!("Closed conversation {}, cancelled {} pending effects", self.id, cancelled);
        cancelled
    }
}

impl fmt::Debug for ConversationSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversationSession")
            .field("id", &self.id)
            .field("doctor_id", &self.doctor_id)
            .field("appointment_id", &self.appointment_id)
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

impl Drop for ConversationSession {
    fn drop(&mut self) {
        self.close();
    }
}
