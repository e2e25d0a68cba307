use asegurate_core::{Action, Page, PageView, ResultView, SessionState, TextGenerator, render_page};
use dialoguer::Select;
use tracing::debug;

const EXIT_LABEL: &str = "Salir";
const RETRY_LABEL: &str = "Reintentar";

/// Run the advisor screens until the user leaves.
///
/// The state lives here and is threaded through every transition; nothing is kept elsewhere.
pub async fn run(generator: &dyn TextGenerator) -> anyhow::Result<()> {
    let mut state = SessionState::new();

    loop {
        if state.page == Page::Result {
            println!("Procesando tu solicitud y obteniendo la mejor recomendación...");
        }
        let view = render_page(&state, generator).await;

        let Some(action) = show(view)? else {
            return Ok(());
        };

        match state.transition(action) {
            Ok(next) => {
                debug!(from = %state.page, to = %next.page, "Advisor screen change");
                state = next;
            }
            Err(e) => eprintln!("⚠️  {}", e),
        }
    }
}

/// Draw one screen and turn the user's choice into an action. `None` means leave.
fn show(view: PageView) -> anyhow::Result<Option<Action>> {
    match view {
        PageView::Welcome {
            title,
            message,
            start_label,
        } => {
            println!("\n{}\n{}\n", title, message);
            Ok(pick(&[start_label.as_str(), EXIT_LABEL])?.map(|_| Action::Start))
        }
        PageView::Form {
            title,
            message,
            defaults,
            ..
        } => {
            println!("\n{}\n{}\n", title, message);
            let profile = crate::form::ask_profile(&defaults)?;
            Ok(Some(Action::Submit { profile }))
        }
        PageView::Result { title, outcome } => {
            println!("\n{}\n", title);
            match outcome {
                ResultView::Recommendation {
                    heading,
                    text,
                    restart_label,
                } => {
                    println!("{}\n\n{}\n", heading, text);
                    Ok(pick(&[restart_label.as_str(), EXIT_LABEL])?.map(|_| Action::Restart))
                }
                ResultView::GenerationFailed {
                    error,
                    hint,
                    restart_label,
                } => {
                    eprintln!("❌ {}", error);
                    println!("ℹ️  {}\n", hint);
                    Ok(
                        pick(&[RETRY_LABEL, restart_label.as_str(), EXIT_LABEL])?.map(|choice| {
                            if choice == 0 {
                                Action::Refresh
                            } else {
                                Action::Restart
                            }
                        }),
                    )
                }
                ResultView::MissingProfile { notice, back_label } => {
                    println!("⚠️  {}\n", notice);
                    Ok(pick(&[back_label.as_str(), EXIT_LABEL])?.map(|_| Action::BackToForm))
                }
            }
        }
    }
}

/// Select among `labels`; the last label always exits and yields `None`.
fn pick(labels: &[&str]) -> anyhow::Result<Option<usize>> {
    let choice = Select::new().items(labels).default(0).interact()?;
    if choice + 1 == labels.len() {
        Ok(None)
    } else {
        Ok(Some(choice))
    }
}
