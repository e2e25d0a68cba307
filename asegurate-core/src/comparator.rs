use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    catalog::InsuranceProduct,
    client::TextGenerator,
    error::Result,
    profile::ComparisonCriteria,
    prompt::build_comparison_prompt,
};

pub const COMPARATOR_TITLE: &str = "🛡️ Comparador Inteligente de Seguros de Vida";
pub const COMPARATOR_MESSAGE: &str =
    "Encuentra la póliza que mejor se adapta a tus necesidades con la ayuda de la IA.";
pub const FIND_MATCH_LABEL: &str = "Encontrar Mi Seguro Ideal";
pub const COMPARISON_HINT: &str =
    "Asegúrate de que tu clave API de Gemini sea correcta y que tengas conexión a internet.";

/// Outcome of one "find match" request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ComparisonView {
    Recommendation { text: String },
    GenerationFailed { error: String, hint: String },
}

/// Validate the criteria, embed them with the catalog and ask for the best match.
///
/// Invalid criteria are an error; a failed generation is a normal outcome the user can retry.
pub async fn compare(
    criteria: &ComparisonCriteria,
    catalog: &[InsuranceProduct],
    generator: &dyn TextGenerator,
) -> Result<ComparisonView> {
    criteria.validate()?;

    let prompt = build_comparison_prompt(criteria, catalog);
    info!(
        model = %generator.model(),
        prompt_len = prompt.len(),
        products = catalog.len(),
        priorities = criteria.priorities.len(),
        "Requesting catalog comparison"
    );

    let view = match generator.generate(&prompt).await {
        Ok(text) => ComparisonView::Recommendation { text },
        Err(e) => ComparisonView::GenerationFailed {
            error: format!(
                "¡Oops! Hubo un error al buscar tu seguro: {}. Por favor, inténtalo de nuevo más tarde.",
                e.detail()
            ),
            hint: COMPARISON_HINT.to_string(),
        },
    };
    Ok(view)
}
