use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;
use uuid::Uuid;

use crate::interview::conversation::Phase;
use crate::interview::responder::Responder;
use crate::interview::session::InterviewSession;
use crate::models::resume::ResumeRecord;

/// In-memory registry of live interview sessions. Cloning shares the map.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Arc<InterviewSession>>>>,
    responder: Arc<Responder>,
    preloaded: Option<Arc<ResumeRecord>>,
}

impl SessionStore {
    pub fn new(responder: Arc<Responder>) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            responder,
            preloaded: None,
        }
    }

    /// Every session created afterwards starts with `record` installed.
    pub fn with_resume(mut self, record: ResumeRecord) -> Self {
        self.preloaded = Some(Arc::new(record));
        self
    }

    pub fn create(&self) -> Arc<InterviewSession> {
        let session = Arc::new(InterviewSession::new(self.responder.clone()));
        if let Some(record) = &self.preloaded {
            session.install_resume((**record).clone());
        }
        self.sessions.write().insert(session.id(), session.clone());
        session
    }

    /// Looks a session up and marks it active.
    pub fn get(&self, id: Uuid) -> Option<Arc<InterviewSession>> {
        let session = self.sessions.read().get(&id).cloned()?;
        session.touch();
        Some(session)
    }

    /// Drops the session, cancelling any answer still in flight.
    pub fn remove(&self, id: Uuid) -> Option<Arc<InterviewSession>> {
        let removed = self.sessions.write().remove(&id);
        if let Some(session) = &removed {
            session.cancel();
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// Drops sessions idle for at least `max_idle`. Sessions with an answer
    /// in flight are kept. Returns how many were dropped.
    pub fn evict_idle(&self, max_idle: Duration) -> usize {
        let mut evicted = Vec::new();
        self.sessions.write().retain(|_, session| {
            let stale = session.idle_for() >= max_idle && session.phase() != Phase::Answering;
            if stale {
                evicted.push(session.clone());
            }
            !stale
        });
        for session in &evicted {
            session.cancel();
        }
        evicted.len()
    }

    /// Sweeps idle sessions every `every` until `shutdown` fires.
    pub fn spawn_eviction(
        &self,
        every: Duration,
        max_idle: Duration,
        shutdown: CancellationToken,
    ) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            interval.tick().await; // Skip first immediate tick

            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => break,
                    _ = interval.tick() => {
                        let evicted = store.evict_idle(max_idle);
                        if evicted > 0 {
                            info!(evicted, remaining = store.len(), "Evicted idle sessions");
                        }
                    }
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::OfflineGenerator;

    const HOUR: Duration = Duration::from_secs(3600);

    fn store() -> SessionStore {
        SessionStore::new(Arc::new(Responder::new(
            Arc::new(OfflineGenerator),
            Duration::from_secs(1),
        )))
    }

    #[test]
    fn test_create_get_remove() {
        let store = store();
        let session = store.create();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(session.id()).unwrap().id(), session.id());

        assert!(store.remove(session.id()).is_some());
        assert!(store.get(session.id()).is_none());
        assert!(store.remove(session.id()).is_none());
    }

    #[test]
    fn test_clones_share_sessions() {
        let store = store();
        let other = store.clone();
        let session = store.create();
        assert!(other.get(session.id()).is_some());
    }

    #[test]
    fn test_sessions_are_isolated() {
        let store = store();
        let a = store.create();
        let b = store.create();
        a.install_resume(ResumeRecord {
            skills: vec!["Rust".to_string()],
            ..Default::default()
        });
        assert!(b.facts().current().is_none());
    }

    #[test]
    fn test_preloaded_resume_installed_in_new_sessions() {
        let store = store().with_resume(ResumeRecord {
            skills: vec!["Go".to_string()],
            ..Default::default()
        });
        let session = store.create();
        assert_eq!(session.facts().skills_or_fallback(), vec!["Go"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_evict_idle_drops_only_untouched_sessions() {
        let store = store();
        let stale = store.create();
        let active = store.create();

        tokio::time::advance(Duration::from_secs(1800)).await;
        store.get(active.id());
        tokio::time::advance(Duration::from_secs(1800)).await;

        assert_eq!(store.evict_idle(HOUR), 1);
        assert!(store.get(stale.id()).is_none());
        assert!(store.get(active.id()).is_some());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_eviction_task_sweeps_until_shutdown() {
        let store = store();
        let session = store.create();
        let shutdown = CancellationToken::new();
        let task = store.spawn_eviction(Duration::from_secs(60), HOUR, shutdown.clone());

        tokio::time::sleep(Duration::from_secs(1800)).await;
        assert_eq!(store.len(), 1);

        tokio::time::sleep(Duration::from_secs(1860)).await;
        assert!(store.get(session.id()).is_none());
        assert_eq!(store.len(), 0);

        shutdown.cancel();
        task.await.unwrap();
    }
}
