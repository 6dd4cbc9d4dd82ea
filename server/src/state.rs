use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use summary_service_cli::pipeline::PipelineExecutor;
use summary_service_cli::shell::{self, Session, ShellEvent};
use tracing::info;
use uuid::Uuid;

/// A session plus the last time a request touched it.
pub struct SessionEntry {
    pub session: Session,
    last_seen: Instant,
}

impl SessionEntry {
    fn new() -> Self {
        SessionEntry {
            session: Session::new(),
            last_seen: Instant::now(),
        }
    }

    fn step(&mut self, event: ShellEvent) {
        let current = std::mem::take(&mut self.session);
        self.session = shell::transition(current, event);
        self.last_seen = Instant::now();
    }
}

// Uygulama durumu: session_id → SessionEntry
#[derive(Clone)]
pub struct AppState {
    sessions: Arc<DashMap<Uuid, SessionEntry>>,
    pub executor: Arc<dyn PipelineExecutor>,
}

impl AppState {
    pub fn new(executor: Arc<dyn PipelineExecutor>) -> Self {
        AppState {
            sessions: Arc::new(DashMap::new()),
            executor,
        }
    }

    pub fn create_session(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions.insert(id, SessionEntry::new());
        id
    }

    /// Reads a session and marks it as seen. `None` if the id is unknown.
    pub fn read<R>(&self, id: &Uuid, read: impl FnOnce(&Session) -> R) -> Option<R> {
        let mut entry = self.sessions.get_mut(id)?;
        entry.last_seen = Instant::now();
        Some(read(&entry.session))
    }

    /// Feeds `event` to the session's state machine under the map's entry lock
    /// and hands the updated session to `read`. `None` if the id is unknown.
    pub fn apply<R>(
        &self,
        id: &Uuid,
        event: ShellEvent,
        read: impl FnOnce(&Session) -> R,
    ) -> Option<R> {
        let mut entry = self.sessions.get_mut(id)?;
        entry.step(event);
        Some(read(&entry.session))
    }

    /// Applies input edits under a single entry lock. `Err` carries the
    /// untouched session's view when a run is in flight.
    pub fn edit<R>(
        &self,
        id: &Uuid,
        events: impl IntoIterator<Item = ShellEvent>,
        read: impl FnOnce(&Session) -> R,
    ) -> Option<Result<R, R>> {
        let mut entry = self.sessions.get_mut(id)?;
        if entry.session.is_running() {
            return Some(Err(read(&entry.session)));
        }
        for event in events {
            entry.step(event);
        }
        Some(Ok(read(&entry.session)))
    }

    /// Drops sessions nobody has touched for `ttl`, together with their export
    /// payloads. Sessions with a run in flight are kept. Returns how many went.
    pub fn evict_idle(&self, ttl: Duration) -> usize {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, entry| entry.session.is_running() || entry.last_seen.elapsed() < ttl);
        before.saturating_sub(self.sessions.len())
    }

    /// Background sweep calling [`evict_idle`](Self::evict_idle) every `period`.
    pub fn spawn_sweeper(&self, ttl: Duration, period: Duration) -> tokio::task::JoinHandle<()> {
        let state = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                let evicted = state.evict_idle(ttl);
                if evicted > 0 {
                    info!("🧹 {} eski oturum silindi", evicted);
                }
            }
        })
    }
}
