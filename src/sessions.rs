// src/sessions.rs

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::{
    lesson::{FlowError, LessonFlow, LocationReading, Score, Settled},
    models::{progress::SessionRecord, session::SessionView},
    recorder::SessionRecorder,
    utils::jwt::Identity,
};

/// One learner's pass through the lesson.
///
/// The flow is behind a mutex so transitions run one at a time. Identity and
/// location settle independently of the flow and are read by value on submit.
pub struct LessonSession {
    id: Uuid,
    flow: Mutex<LessonFlow>,
    identity: Settled<Identity>,
    location: Settled<LocationReading>,
}

impl LessonSession {
    fn new(id: Uuid) -> Self {
        Self {
            id,
            flow: Mutex::new(LessonFlow::new()),
            identity: Settled::new(),
            location: Settled::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn identity(&self) -> &Settled<Identity> {
        &self.identity
    }

    pub fn location(&self) -> &Settled<LocationReading> {
        &self.location
    }

    pub async fn view(&self) -> SessionView {
        let flow = self.flow.lock().await;
        SessionView::new(self.id, &flow, self.location.peek().as_ref())
    }

    /// Runs `action` against the flow and returns the resulting view.
    pub async fn apply<F>(&self, action: F) -> Result<SessionView, FlowError>
    where
        F: FnOnce(&mut LessonFlow) -> Result<(), FlowError>,
    {
        let mut flow = self.flow.lock().await;
        action(&mut flow)?;
        Ok(SessionView::new(self.id, &flow, self.location.peek().as_ref()))
    }

    /// Quiz -> Result. The flow lock is released before the progress write,
    /// which runs in the background with whatever identity and location have
    /// settled by now.
    pub async fn submit(&self, recorder: &SessionRecorder) -> Result<Submission, FlowError> {
        let (score, view) = {
            let mut flow = self.flow.lock().await;
            let score = flow.submit()?;
            let view = SessionView::new(self.id, &flow, self.location.peek().as_ref());
            (score, view)
        };

        let write = recorder.spawn_record(self.identity.peek(), score, self.location.peek());

        Ok(Submission { score, view, write })
    }
}

/// Outcome of a successful submit.
pub struct Submission {
    pub score: Score,
    pub view: SessionView,
    /// The background progress write. Dropping it does not cancel the write.
    pub write: JoinHandle<Option<SessionRecord>>,
}

/// Live sessions, keyed by id. Sessions live for the lifetime of the process.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, Arc<LessonSession>>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self) -> Arc<LessonSession> {
        let id = Uuid::new_v4();
        let session = Arc::new(LessonSession::new(id));
        self.sessions.write().await.insert(id, Arc::clone(&session));
        session
    }

    pub async fn get(&self, id: Uuid) -> Option<Arc<LessonSession>> {
        self.sessions.read().await.get(&id).cloned()
    }
}
