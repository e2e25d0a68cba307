//! What each screen shows after an action. Hosts render these however they like.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    client::TextGenerator,
    error::Result,
    navigator::{Page, SessionState},
    profile::UserProfile,
    prompt::build_advisory_prompt,
};

pub const WELCOME_TITLE: &str = "¡Bienvenido a 'Asegúrate'!";
pub const WELCOME_MESSAGE: &str =
    "Descubre el seguro ideal para ti con nuestra herramienta personalizada.";
pub const START_LABEL: &str = "¿Qué seguro va conmigo?";

pub const FORM_TITLE: &str = "Descubre tu Seguro Ideal";
pub const FORM_MESSAGE: &str =
    "Por favor, introduce tus datos para ayudarte a encontrar el seguro perfecto.";
pub const SUBMIT_LABEL: &str = "Procesar Solicitud";

pub const RESULT_TITLE: &str = "Resultado de tu Solicitud";
pub const RECOMMENDATION_HEADING: &str = "Aquí está nuestra recomendación personalizada:";
pub const RESTART_LABEL: &str = "Volver al inicio";
pub const MISSING_PROFILE_NOTICE: &str =
    "No se encontraron datos de usuario. Por favor, regresa al formulario.";
pub const BACK_TO_FORM_LABEL: &str = "Volver al formulario";
pub const GENERATION_HINT: &str = "Por favor, asegúrate de que tu clave API de Gemini sea válida y de que no haya problemas de conexión.";

/// Rendered content of a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageView {
    Welcome {
        title: String,
        message: String,
        start_label: String,
    },
    Form {
        title: String,
        message: String,
        submit_label: String,
        defaults: UserProfile,
    },
    Result {
        title: String,
        outcome: ResultView,
    },
}

/// Body of the result page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResultView {
    Recommendation {
        heading: String,
        text: String,
        restart_label: String,
    },
    GenerationFailed {
        error: String,
        hint: String,
        restart_label: String,
    },
    MissingProfile {
        notice: String,
        back_label: String,
    },
}

/// Render the page `state` points at. Only the result page talks to the generator.
pub async fn render_page(state: &SessionState, generator: &dyn TextGenerator) -> PageView {
    match state.page {
        Page::Main => PageView::Welcome {
            title: WELCOME_TITLE.to_string(),
            message: WELCOME_MESSAGE.to_string(),
            start_label: START_LABEL.to_string(),
        },
        Page::Form => PageView::Form {
            title: FORM_TITLE.to_string(),
            message: FORM_MESSAGE.to_string(),
            submit_label: SUBMIT_LABEL.to_string(),
            defaults: UserProfile::default(),
        },
        Page::Result => PageView::Result {
            title: RESULT_TITLE.to_string(),
            outcome: render_result(state.require_profile(), generator).await,
        },
    }
}

/// Build the advisory prompt and ask the generator for a recommendation.
///
/// Without a profile no prompt is built and the generator is never called.
pub async fn render_result(
    profile: Result<&UserProfile>,
    generator: &dyn TextGenerator,
) -> ResultView {
    let profile = match profile {
        Ok(profile) => profile,
        Err(e) => {
            warn!(error = %e, "Result page reached without a stored profile");
            return ResultView::MissingProfile {
                notice: MISSING_PROFILE_NOTICE.to_string(),
                back_label: BACK_TO_FORM_LABEL.to_string(),
            };
        }
    };

    let prompt = build_advisory_prompt(profile);
    info!(
        model = %generator.model(),
        prompt_len = prompt.len(),
        insurance_type = %profile.insurance_type,
        "Requesting insurance recommendation"
    );

    match generator.generate(&prompt).await {
        Ok(text) => ResultView::Recommendation {
            heading: RECOMMENDATION_HEADING.to_string(),
            text,
            restart_label: RESTART_LABEL.to_string(),
        },
        Err(e) => ResultView::GenerationFailed {
            error: format!("Hubo un error al procesar tu solicitud: {}", e.detail()),
            hint: GENERATION_HINT.to_string(),
            restart_label: RESTART_LABEL.to_string(),
        },
    }
}
