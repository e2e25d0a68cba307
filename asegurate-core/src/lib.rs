pub mod catalog;
pub mod client;
pub mod comparator;
pub mod error;
pub mod navigator;
pub mod profile;
pub mod prompt;
pub mod runner;
pub mod storage;
pub mod view;

// Re-export commonly used types
pub use catalog::{Catalog, InsuranceProduct};
#[cfg(feature = "rig")]
pub use client::GeminiClient;
pub use client::{DEFAULT_MODEL, GEMINI_API_KEY_VAR, TextGenerator, check_credential};
pub use comparator::{ComparisonView, compare};
pub use error::{AdvisorError, Result};
pub use navigator::{Action, Page, SessionState};
pub use profile::{ComparisonCriteria, CoverageDuration, InsuranceType, Priority, UserProfile};
pub use prompt::{build_advisory_prompt, build_comparison_prompt};
pub use runner::{AdvisorRunner, StepResult};
pub use storage::{InMemorySessionStorage, Session, SessionStorage};
pub use view::{PageView, ResultView, render_page, render_result};
