use asegurate_core::{
    Catalog, ComparisonCriteria, ComparisonView, TextGenerator, compare,
    comparator::{COMPARATOR_MESSAGE, COMPARATOR_TITLE, FIND_MATCH_LABEL},
};
use dialoguer::Select;

/// Comparator form: collect criteria, ask for the best match, show it. Repeats on request with
/// the last answers pre-filled.
pub async fn run(catalog: &Catalog, generator: &dyn TextGenerator) -> anyhow::Result<()> {
    println!("\n{}\n{}\n", COMPARATOR_TITLE, COMPARATOR_MESSAGE);
    println!("1. Tus Requerimientos\n");

    let mut criteria = ComparisonCriteria::default();
    loop {
        criteria = crate::form::ask_criteria(&criteria)?;

        let choice = Select::new()
            .items(&[FIND_MATCH_LABEL, "Salir"])
            .default(0)
            .interact()?;
        if choice == 1 {
            return Ok(());
        }

        println!("\n---\nBuscando tu seguro ideal...\n");
        // Out-of-range criteria are caught by the form prompts before this point
        match compare(&criteria, catalog.products(), generator).await? {
            ComparisonView::Recommendation { text } => println!("{}\n", text),
            ComparisonView::GenerationFailed { error, hint } => {
                eprintln!("❌ {}", error);
                println!("ℹ️  {}\n", hint);
            }
        }
    }
}
