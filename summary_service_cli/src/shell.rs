//! Presentation-side state machine shared by the CLI and the web server.
//!
//! A `Session` holds the user's inputs and the current state. Every change
//! goes through [`transition`]; nothing mutates a session from the side.
//!
//! ```text
//! Idle ──url──▶ Ready ──trigger──▶ Running ──ok──▶ Result
//!                 ▲                  │  └──err──▶ Error
//!                 └──empty content───┘
//! ```

use crate::error::PipelineError;
use crate::pipeline::{PipelineCommand, PipelineExecutor, RunOutput};
use crate::{ExportFormat, ExportJob, Language, SummaryResult};
use tracing::debug;

pub const MISSING_URL_WARNING: &str = "Lütfen bir URL girin.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ShellState {
    /// No URL yet.
    #[default]
    Idle,
    /// URL present, waiting for the user to trigger a run.
    Ready,
    Running,
    Result(Box<RunOutput>),
    /// Terminal for this attempt; the user may trigger again.
    Error(String),
}

impl ShellState {
    pub fn name(&self) -> &'static str {
        match self {
            ShellState::Idle => "idle",
            ShellState::Ready => "ready",
            ShellState::Running => "running",
            ShellState::Result(_) => "result",
            ShellState::Error(_) => "error",
        }
    }
}

#[derive(Debug)]
pub enum ShellEvent {
    UrlEntered(String),
    FormatChosen(ExportFormat),
    LanguageChosen(Language),
    Trigger,
    Finished(Result<RunOutput, PipelineError>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub url: String,
    pub format: ExportFormat,
    pub language: Language,
    pub state: ShellState,
    /// Non-fatal notice: missing URL, empty page or failed translation.
    pub warning: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn command(&self) -> PipelineCommand {
        PipelineCommand {
            url: self.url.clone(),
            format: self.format,
            language: self.language,
        }
    }

    pub fn is_running(&self) -> bool {
        self.state == ShellState::Running
    }

    pub fn output(&self) -> Option<&RunOutput> {
        match &self.state {
            ShellState::Result(out) => Some(out),
            _ => None,
        }
    }

    pub fn summary(&self) -> Option<&SummaryResult> {
        self.output().map(|out| &out.summary)
    }

    /// The downloadable file. Only a successful run exposes one.
    pub fn export(&self) -> Option<&ExportJob> {
        self.output().map(|out| &out.export)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ShellState::Error(msg) => Some(msg),
            _ => None,
        }
    }

    /// Back to `Idle`/`Ready` after an input edit; any previous result is dropped.
    fn settle(&mut self) {
        self.state = if self.url.is_empty() {
            ShellState::Idle
        } else {
            ShellState::Ready
        };
        self.warning = None;
    }
}

pub fn transition(mut session: Session, event: ShellEvent) -> Session {
    let editing = matches!(
        event,
        ShellEvent::UrlEntered(_) | ShellEvent::FormatChosen(_) | ShellEvent::LanguageChosen(_)
    );
    if editing && session.is_running() {
        debug!("Input ignored while a run is in flight");
        return session;
    }

    match event {
        ShellEvent::UrlEntered(url) => {
            session.url = url.trim().to_string();
            session.settle();
        }
        ShellEvent::FormatChosen(format) => {
            session.format = format;
            session.settle();
        }
        ShellEvent::LanguageChosen(language) => {
            session.language = language;
            session.settle();
        }
        ShellEvent::Trigger => match session.state {
            ShellState::Running => debug!("Trigger ignored, already running"),
            ShellState::Idle => session.warning = Some(MISSING_URL_WARNING.to_string()),
            _ => {
                session.state = ShellState::Running;
                session.warning = None;
            }
        },
        ShellEvent::Finished(outcome) => {
            if !session.is_running() {
                debug!("Stale pipeline result dropped");
                return session;
            }
            match outcome {
                Ok(out) => {
                    session.warning = out.translation_warning.clone();
                    session.state = ShellState::Result(Box::new(out));
                }
                Err(e) if e.is_soft() => {
                    session.state = ShellState::Ready;
                    session.warning = Some(e.user_message());
                }
                Err(e) => {
                    session.state = ShellState::Error(e.user_message());
                }
            }
        }
    }
    session
}

/// Triggers a run and awaits the executor. Every call starts from the fetch;
/// nothing from an earlier run is reused.
pub async fn run(session: Session, executor: &dyn PipelineExecutor) -> Session {
    let session = transition(session, ShellEvent::Trigger);
    if !session.is_running() {
        return session;
    }
    let command = session.command();
    let outcome = executor.execute(&command).await;
    transition(session, ShellEvent::Finished(outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::DEFAULT_CAPTION;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn output(warning: Option<&str>) -> RunOutput {
        RunOutput {
            summary: SummaryResult {
                title: "Example".into(),
                summary_text: "Lorem ipsum dolor.".into(),
                source_url: "https://example.com".into(),
                caption_label: DEFAULT_CAPTION.into(),
                language: Language::Turkish,
                file_stem: "example".into(),
            },
            export: ExportJob {
                format: ExportFormat::Txt,
                payload: b"Example\n\nLorem ipsum dolor.".to_vec(),
                suggested_filename: "example_ozet.txt".into(),
            },
            translation_warning: warning.map(str::to_string),
        }
    }

    enum Outcome {
        Ok,
        NotFound,
        Empty,
    }

    struct Fake {
        outcome: Outcome,
        calls: AtomicUsize,
    }

    impl Fake {
        fn new(outcome: Outcome) -> Self {
            Self {
                outcome,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl PipelineExecutor for Fake {
        async fn execute(&self, command: &PipelineCommand) -> Result<RunOutput, PipelineError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.outcome {
                Outcome::Ok => Ok(output(None)),
                Outcome::NotFound => Err(PipelineError::Fetch(FetchError::Http {
                    status: reqwest::StatusCode::NOT_FOUND,
                    url: command.url.clone(),
                })),
                Outcome::Empty => Err(PipelineError::EmptyContent),
            }
        }
    }

    fn ready(url: &str) -> Session {
        transition(Session::new(), ShellEvent::UrlEntered(url.into()))
    }

    #[test]
    fn url_moves_idle_to_ready_and_back() {
        let session = ready("  https://example.com  ");
        assert_eq!(session.state, ShellState::Ready);
        assert_eq!(session.url, "https://example.com");

        let session = transition(session, ShellEvent::UrlEntered("   ".into()));
        assert_eq!(session.state, ShellState::Idle);
    }

    #[test]
    fn trigger_without_url_warns_and_stays_idle() {
        let session = transition(Session::new(), ShellEvent::Trigger);
        assert_eq!(session.state, ShellState::Idle);
        assert_eq!(session.warning.as_deref(), Some(MISSING_URL_WARNING));
    }

    #[test]
    fn inputs_are_frozen_while_running() {
        let running = transition(ready("https://example.com"), ShellEvent::Trigger);
        assert!(running.is_running());

        let after = transition(running.clone(), ShellEvent::FormatChosen(ExportFormat::Docx));
        assert_eq!(after, running);
        let after = transition(after, ShellEvent::Trigger);
        assert_eq!(after, running);
    }

    #[test]
    fn editing_a_result_discards_it() {
        let mut session = transition(ready("https://example.com"), ShellEvent::Trigger);
        session = transition(session, ShellEvent::Finished(Ok(output(None))));
        assert!(session.export().is_some());

        session = transition(session, ShellEvent::LanguageChosen(Language::French));
        assert_eq!(session.state, ShellState::Ready);
        assert!(session.export().is_none());
    }

    #[test]
    fn stale_results_are_dropped() {
        let session = transition(ready("https://example.com"), ShellEvent::Finished(Ok(output(None))));
        assert_eq!(session.state, ShellState::Ready);
    }

    #[tokio::test]
    async fn success_exposes_export() {
        let fake = Fake::new(Outcome::Ok);
        let session = run(ready("https://example.com"), &fake).await;
        assert_eq!(session.state.name(), "result");
        assert_eq!(session.export().unwrap().suggested_filename, "example_ozet.txt");
        assert_eq!(session.warning, None);
    }

    #[test]
    fn translation_warning_is_carried_to_result() {
        let mut session = transition(ready("https://example.com"), ShellEvent::Trigger);
        session = transition(session, ShellEvent::Finished(Ok(output(Some("❌ Çeviri yapılamadı")))));
        assert!(session.export().is_some());
        assert_eq!(session.warning.as_deref(), Some("❌ Çeviri yapılamadı"));
    }

    #[tokio::test]
    async fn http_404_ends_in_error_without_export() {
        let fake = Fake::new(Outcome::NotFound);
        let session = run(ready("https://example.com/yok"), &fake).await;
        assert!(session.error().unwrap().contains("404"));
        assert!(session.export().is_none());
        assert!(session.summary().is_none());
    }

    #[tokio::test]
    async fn empty_content_returns_to_ready_with_warning() {
        let fake = Fake::new(Outcome::Empty);
        let session = run(ready("https://example.com"), &fake).await;
        assert_eq!(session.state, ShellState::Ready);
        assert!(session.warning.is_some());
        assert!(session.export().is_none());
    }

    #[tokio::test]
    async fn retrigger_after_error_runs_again() {
        let fake = Fake::new(Outcome::NotFound);
        let session = run(ready("https://example.com/yok"), &fake).await;
        let session = run(session, &fake).await;
        assert_eq!(fake.calls.load(Ordering::SeqCst), 2);
        assert_eq!(session.state.name(), "error");
    }

    #[tokio::test]
    async fn idle_run_never_reaches_executor() {
        let fake = Fake::new(Outcome::Ok);
        let session = run(Session::new(), &fake).await;
        assert_eq!(fake.calls.load(Ordering::SeqCst), 0);
        assert_eq!(session.state, ShellState::Idle);
    }
}
