//! AdvisorRunner – loads a session, applies exactly **one** user action, renders the resulting
//! page and persists the updated session back to storage.
//!
//! ## Why a runner?
//! * **HTTP hosts**: one action per request, the rendered [`PageView`] goes back to the client and
//!   the session is saved for the next round trip.
//! * **Terminal hosts**: the same load → transition → render → save loop without touching storage
//!   code directly.
//!
//! A rejected action (invalid input, undefined transition) returns an error before anything is
//! saved, so the stored state is exactly what it was before the request.
//!
//! Hosts that keep the [`SessionState`] themselves can skip the runner and call
//! [`SessionState::transition`] and [`render_page`] directly.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::{
    client::TextGenerator,
    error::{AdvisorError, Result},
    navigator::{Action, Page, SessionState},
    storage::{Session, SessionStorage},
    view::{PageView, render_page},
};

/// Outcome of one runner step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepResult {
    pub session_id: String,
    pub page: Page,
    pub view: PageView,
}

/// High-level helper that orchestrates the _load → transition → render → save_ pattern.
#[derive(Clone)]
pub struct AdvisorRunner {
    generator: Arc<dyn TextGenerator>,
    storage: Arc<dyn SessionStorage>,
}

impl AdvisorRunner {
    pub fn new(generator: Arc<dyn TextGenerator>, storage: Arc<dyn SessionStorage>) -> Self {
        Self { generator, storage }
    }

    /// Create a session on the welcome page and persist it.
    pub async fn open(&self) -> Result<StepResult> {
        let session = Session::new();
        info!(session_id = %session.id, "Opened advisor session");

        let view = render_page(&session.state, self.generator.as_ref()).await;
        let result = StepResult {
            session_id: session.id.clone(),
            page: session.state.page,
            view,
        };
        self.storage.save(session).await?;
        Ok(result)
    }

    /// Apply `action` to the session with `session_id` and persist the new state.
    pub async fn run(&self, session_id: &str, action: Action) -> Result<StepResult> {
        // 1. Load session
        let mut session = self
            .storage
            .get(session_id)
            .await?
            .ok_or_else(|| AdvisorError::SessionNotFound(session_id.to_string()))?;

        // 2. Transition; a rejected action leaves storage untouched
        let action_name = action.name();
        session.state = session.state.transition(action)?;

        // 3. Render the page we landed on
        let view = render_page(&session.state, self.generator.as_ref()).await;

        info!(
            session_id = %session_id,
            action = action_name,
            page = %session.state.page,
            "Advisor step completed"
        );

        let result = StepResult {
            session_id: session.id.clone(),
            page: session.state.page,
            view,
        };

        // 4. Persist so the next action starts where we left off
        self.storage.save(session).await?;

        Ok(result)
    }

    /// Current state of a session.
    pub async fn state(&self, session_id: &str) -> Result<SessionState> {
        self.storage
            .get(session_id)
            .await?
            .map(|session| session.state)
            .ok_or_else(|| AdvisorError::SessionNotFound(session_id.to_string()))
    }
}
