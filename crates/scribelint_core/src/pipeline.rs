//! Two-phase asynchronous lint pipeline.
//!
//! Every submitted text starts a debounced fast pass (grammar engine, pattern
//! rules, clause detector, merge). When AI review is on, a second task asks
//! the reviewer and splices its lints into the fast-pass result once they
//! arrive. Results for a text that is no longer current are dropped.

use std::sync::Arc;
use std::time::Duration;

use scribelint_plugin::{AiReviewer, GrammarEngine, Lint, LintSource, RewriteOptions};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::aggregator::LintAggregator;
use crate::session::{SessionId, SessionStore};
use crate::{LintError, Linter};

/// Notifications sent to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    /// The fast pass finished for `version` of the session.
    Linted {
        session: SessionId,
        version: u64,
        lints: Vec<Lint>,
    },
    /// AI lints were spliced into the result for `version`.
    AiMerged {
        session: SessionId,
        version: u64,
        lints: Vec<Lint>,
    },
}

struct Shared<E, A> {
    linter: Arc<Linter>,
    engine: E,
    reviewer: A,
    sessions: Arc<SessionStore>,
    events: mpsc::UnboundedSender<PipelineEvent>,
    debounce: Duration,
}

/// Drives lint passes for any number of sessions.
pub struct LintPipeline<E, A> {
    shared: Arc<Shared<E, A>>,
}

impl<E, A> Clone for LintPipeline<E, A> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<E: GrammarEngine, A: AiReviewer> LintPipeline<E, A> {
    /// Creates a pipeline and the receiving end of its event channel.
    pub fn new(
        linter: Arc<Linter>,
        engine: E,
        reviewer: A,
        sessions: Arc<SessionStore>,
    ) -> (Self, mpsc::UnboundedReceiver<PipelineEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let debounce = linter.config().debounce();
        let shared = Shared {
            linter,
            engine,
            reviewer,
            sessions,
            events,
            debounce,
        };
        (
            Self {
                shared: Arc::new(shared),
            },
            rx,
        )
    }

    /// Returns the session store.
    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.shared.sessions
    }

    /// Records `text` as the session's current snapshot and schedules a pass.
    ///
    /// The pass runs after the debounce delay, and only if no newer text was
    /// submitted for the session in the meantime.
    pub fn submit(&self, session: SessionId, text: impl Into<String>) -> JoinHandle<()> {
        let text = text.into();
        let version = self.shared.sessions.update_text(&session, text.clone());
        let shared = Arc::clone(&self.shared);

        tokio::spawn(async move {
            tokio::time::sleep(shared.debounce).await;

            if !shared.sessions.is_current(&session, version) {
                debug!(%session, version, "superseded before the fast pass");
                return;
            }
            if !shared.sessions.is_enabled(&session) {
                debug!(%session, "linting disabled");
                return;
            }

            Shared::fast_pass(&shared, session, version, text).await;
        })
    }

    /// Asks the reviewer to rewrite `text`.
    ///
    /// Returns `Ok(None)` when the reviewer is unavailable.
    pub async fn rewrite(
        &self,
        text: &str,
        options: &RewriteOptions,
    ) -> Result<Option<String>, LintError> {
        let rewrite = self.shared.reviewer.rewrite(text, options).await?;
        if !rewrite.available {
            debug!(
                "{}",
                LintError::AiUnavailable("rewrite not available".to_string())
            );
            return Ok(None);
        }
        Ok(rewrite.text)
    }
}

impl<E: GrammarEngine, A: AiReviewer> Shared<E, A> {
    async fn fast_pass(this: &Arc<Self>, session: SessionId, version: u64, text: String) {
        let lints = match this.linter.cached(&text) {
            Some(lints) => {
                debug!(%session, "fast pass served from cache");
                lints
            }
            None => this.compute(&text).await,
        };

        if !this.sessions.set_lints(&session, version, lints.clone()) {
            debug!(%session, version, "{}", LintError::StaleResult);
            return;
        }
        this.emit(PipelineEvent::Linted {
            session: session.clone(),
            version,
            lints,
        });

        if this.linter.config().ai.enabled && this.sessions.is_ai_enabled(&session) {
            let shared = Arc::clone(this);
            tokio::spawn(async move {
                shared.ai_phase(session, version, text).await;
            });
        }
    }

    async fn compute(&self, text: &str) -> Vec<Lint> {
        match self.engine.lint(text).await {
            Ok(engine_lints) => {
                let lints = self.linter.lint_text(text, engine_lints, &[]);
                self.linter.store(text, lints.clone());
                lints
            }
            Err(e) => {
                let error = LintError::EngineUnavailable(format!("{}: {}", self.engine.name(), e));
                warn!("{}", error);
                self.linter.lint_text(text, Vec::new(), &[])
            }
        }
    }

    async fn ai_phase(&self, session: SessionId, version: u64, text: String) {
        let review = match self.reviewer.proofread(&text).await {
            Ok(review) if review.available => review,
            Ok(_) => {
                debug!(%session, "{}", LintError::AiUnavailable("no review".to_string()));
                return;
            }
            Err(e) => {
                debug!(%session, "{}", LintError::AiUnavailable(e.to_string()));
                return;
            }
        };

        let Some(state) = self.sessions.get(&session).filter(|s| s.version == version) else {
            debug!(%session, version, "{}", LintError::StaleResult);
            return;
        };
        let ai_lints = review
            .lints
            .into_iter()
            .map(|mut lint| {
                lint.source = LintSource::Ai;
                lint
            })
            .collect();

        let Some(merged) = LintAggregator::splice_ai(&state.lints, &text, &state.text, ai_lints)
        else {
            debug!(%session, version, "{}", LintError::StaleResult);
            return;
        };
        let merged = self.linter.filter_categories(merged);

        if !self.sessions.set_lints(&session, version, merged.clone()) {
            debug!(%session, version, "{}", LintError::StaleResult);
            return;
        }
        self.emit(PipelineEvent::AiMerged {
            session,
            version,
            lints: merged,
        });
    }

    fn emit(&self, event: PipelineEvent) {
        if self.events.send(event).is_err() {
            debug!("pipeline event receiver dropped");
        }
    }
}
