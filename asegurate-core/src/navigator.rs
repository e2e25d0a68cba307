use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    error::{AdvisorError, Result},
    profile::UserProfile,
};

/// Screen of the advisor flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    /// Welcome screen
    #[default]
    Main,
    /// Profile form
    Form,
    /// Recommendation screen
    Result,
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Page::Main => "main",
            Page::Form => "form",
            Page::Result => "result",
        };
        f.write_str(name)
    }
}

/// User-triggered actions on the advisor flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Leave the welcome screen for the form
    Start,
    /// Submit the form with a completed profile
    Submit { profile: UserProfile },
    /// Go back to the welcome screen from the result
    Restart,
    /// Escape from a result screen that has no profile to show
    BackToForm,
    /// Render the current page again without changing state
    Refresh,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Start => "start",
            Action::Submit { .. } => "submit",
            Action::Restart => "restart",
            Action::BackToForm => "back_to_form",
            Action::Refresh => "refresh",
        }
    }
}

/// Per-session navigation state, threaded explicitly through every action
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub page: Page,
    pub profile: Option<UserProfile>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored profile, or [`AdvisorError::MissingProfile`] when none was submitted.
    pub fn require_profile(&self) -> Result<&UserProfile> {
        self.profile.as_ref().ok_or(AdvisorError::MissingProfile)
    }

    /// Compute the state that follows `action`.
    ///
    /// The current state is left untouched; on error the caller keeps it as is.
    pub fn transition(&self, action: Action) -> Result<SessionState> {
        let action_name = action.name();

        let next = match (self.page, action) {
            (Page::Main, Action::Start) => SessionState {
                page: Page::Form,
                profile: self.profile.clone(),
            },
            (Page::Form, Action::Submit { profile }) => {
                profile.validate()?;
                SessionState {
                    page: Page::Result,
                    profile: Some(profile),
                }
            }
            // Profiles are discarded when returning to the welcome screen
            (Page::Result, Action::Restart) => SessionState {
                page: Page::Main,
                profile: None,
            },
            (Page::Result, Action::BackToForm) if self.profile.is_none() => SessionState {
                page: Page::Form,
                profile: None,
            },
            (_, Action::Refresh) => self.clone(),
            (page, _) => {
                warn!(page = %page, action = action_name, "Rejected navigation action");
                return Err(AdvisorError::InvalidTransition {
                    page,
                    action: action_name.to_string(),
                });
            }
        };

        debug!(
            from = %self.page,
            to = %next.page,
            action = action_name,
            "Navigation transition"
        );
        Ok(next)
    }
}
