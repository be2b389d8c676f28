//! Interactive terminal channel.
//!
//! Walks one owner through the seven letter fields, one prompt per step,
//! then writes the letter to a text file. Slash commands are handled here;
//! every other line (including the skip sentinel) goes to the composer.

use console::style;
use tracing::info;

use letterpost_core::compose::machine::Delivery;
use letterpost_core::compose::template::Template;
use letterpost_core::storage::progress::ProgressTracker;
use letterpost_types::config::GlobalConfig;
use letterpost_types::error::ComposeError;
use letterpost_types::letter::{FieldName, Step};
use letterpost_types::session::OwnerId;

use crate::state::AppState;

use super::commands::{self, ChannelCommand};
use super::input::{ComposeInput, InputEvent};

const INTRO_HEADING: &str = "Let's write a letter together.";

fn intro_lines(config: &GlobalConfig) -> [String; 4] {
    [
        "I am going to ask you for the different parts of the letter, one at a time.".to_string(),
        "Once the signature is in, the letter is saved as a text file.".to_string(),
        format!(
            "Send {} to leave a part empty: the letter will be adapted accordingly.",
            style(&config.skip_command).cyan()
        ),
        format!(
            "Send {} to stop at any time, {} for the other commands.",
            style(&config.cancel_command).cyan(),
            style("/help").cyan()
        ),
    ]
}

fn print_intro(config: &GlobalConfig) {
    println!();
    println!("  {}", style(INTRO_HEADING).cyan().bold());
    println!();
    for line in intro_lines(config) {
        println!("  {line}");
    }
    println!("  {}", style("---").dim());
}

/// `Part n of 7` for a step that still collects a field.
fn progress_label(step: Step) -> Option<String> {
    step.field()
        .map(|_| format!("Part {} of {}", step.visited() + 1, FieldName::ALL.len()))
}

fn print_step(step: Step) {
    let (Some(field), Some(progress)) = (step.field(), progress_label(step)) else {
        return;
    };
    let spec = Template.spec(field);
    println!();
    println!("  {}", style(progress).dim());
    println!("  {}", style(spec.prompt).bold());
    println!("  {}", style(format!("e.g. {}", spec.placeholder)).dim());
}

fn step_prompt(step: Step) -> String {
    format!("  {} ", style(format!("{step} >")).green().bold())
}

fn print_farewell() {
    println!();
    println!(
        "  {}",
        style("Feel free to use `lpost compose` to start the conversation again.").dim()
    );
    println!();
}

fn print_delivery(delivery: &Delivery, completed: u64, json: bool) -> anyhow::Result<()> {
    if json {
        let out = serde_json::json!({
            "owner": delivery.owner,
            "path": delivery.artifact.path,
            "file_name": delivery.artifact.file_name,
            "sections": delivery.sections,
            "completed_letters": completed,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let sections = delivery
        .sections
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    println!();
    println!("  {} It's ready!", style("✓").green().bold());
    println!();
    println!(
        "  {}  {}",
        style("File:").bold(),
        style(delivery.artifact.path.display()).cyan()
    );
    println!("  {}  {}", style("Name:").bold(), delivery.artifact.file_name);
    println!(
        "  {}  {}",
        style("Sections:").bold(),
        if sections.is_empty() {
            style("none".to_string()).dim()
        } else {
            style(sections)
        }
    );
    println!();
    println!(
        "  Thank you for joining in. {} letters written so far.",
        style(completed).cyan()
    );
    println!();
    Ok(())
}

/// Run the interactive compose loop for `owner`.
///
/// Leaving the loop any way other than delivery (cancel command, Ctrl+C,
/// Ctrl+D) cancels the composition.
pub async fn run_compose_loop(state: &AppState, owner: OwnerId, json: bool) -> anyhow::Result<()> {
    let config = state.config.as_ref();

    if !json {
        print_intro(config);
    }

    let mut step = state.composer.begin(owner).await?.step;
    print_step(step);

    let (mut input, _writer) = ComposeInput::new(step_prompt(step))
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        let text = match input.read_line().await {
            InputEvent::Line(text) => text,
            InputEvent::Eof | InputEvent::Interrupted => {
                state.composer.cancel(owner).await?;
                print_farewell();
                break;
            }
        };

        if let Some(cmd) = commands::parse(&text, config) {
            match cmd {
                ChannelCommand::Help => {
                    commands::print_help(config);
                    print_step(step);
                }
                ChannelCommand::Start => {
                    step = state.composer.begin(owner).await?.step;
                    println!("\n  {}", style("Starting over.").dim());
                    print_step(step);
                    input.update_prompt(&step_prompt(step));
                }
                ChannelCommand::Cancel => {
                    state.composer.cancel(owner).await?;
                    info!(%owner, "compose loop cancelled by owner");
                    print_farewell();
                    break;
                }
                ChannelCommand::Unknown(name) => {
                    println!(
                        "\n  {} Unknown command: {}. Type /help for available commands.",
                        style("?").yellow().bold(),
                        style(name).dim()
                    );
                }
            }
            continue;
        }

        if text.trim().is_empty() {
            println!(
                "  {}",
                style(format!(
                    "Type something, or {} to leave this part empty.",
                    config.skip_command
                ))
                .dim()
            );
            continue;
        }

        step = state
            .composer
            .submit(owner, commands::submission(&text, config))
            .await?;

        if !step.is_terminal() {
            print_step(step);
            input.update_prompt(&step_prompt(step));
            continue;
        }

        input.flush();
        match state.composer.deliver(owner, state.renderer.as_ref()).await {
            Ok(delivery) => {
                let completed = state
                    .composer
                    .progress()
                    .completed_for(owner)
                    .await
                    .map_err(ComposeError::from)?;
                print_delivery(&delivery, completed, json)?;
            }
            Err(ComposeError::RenderingFailed(reason)) => {
                eprintln!(
                    "\n  {} The letter could not be written: {reason}",
                    style("!").red().bold()
                );
                print_farewell();
            }
            Err(e) => return Err(e.into()),
        }
        break;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use letterpost_types::session::Submission;

    use super::*;

    #[test]
    fn test_step_prompt_names_the_field() {
        let prompt = console::strip_ansi_codes(&step_prompt(Step::Salutation)).to_string();
        assert_eq!(prompt, "  salutation > ");
    }

    #[test]
    fn test_intro_describes_text_output_and_commands() {
        let config = GlobalConfig::default();
        let lines: Vec<String> = intro_lines(&config)
            .iter()
            .map(|l| console::strip_ansi_codes(l).to_string())
            .collect();
        let intro = lines.join("\n");

        assert!(!INTRO_HEADING.contains("sound"));
        assert!(intro.contains("text file"));
        assert!(intro.contains("/skip"));
        assert!(intro.contains("/cancel"));
    }

    #[test]
    fn test_progress_label_counts_parts() {
        assert_eq!(progress_label(Step::Address1).as_deref(), Some("Part 1 of 7"));
        assert_eq!(progress_label(Step::Body).as_deref(), Some("Part 5 of 7"));
        assert_eq!(progress_label(Step::Signature).as_deref(), Some("Part 7 of 7"));
        assert_eq!(progress_label(Step::Done), None);
    }

    #[tokio::test]
    async fn test_padded_skip_sentinel_skips_the_step() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::in_memory(dir.path().to_path_buf());
        let owner = OwnerId(4);
        let config = state.config.as_ref();

        state.composer.begin(owner).await.unwrap();
        assert_eq!(commands::parse("/skip ", config), None);
        state
            .composer
            .submit(owner, commands::submission("/skip ", config))
            .await
            .unwrap();
        for text in ["b", "c", "d", "e", "f", "Sig"] {
            state
                .composer
                .submit(owner, commands::submission(text, config))
                .await
                .unwrap();
        }

        let document = state.composer.finalize(owner).await.unwrap();
        assert_eq!(document.value(FieldName::Address1), None);
        assert_eq!(document.value(FieldName::Address2), Some("b"));
    }

    #[tokio::test]
    async fn test_print_delivery_json() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::in_memory(dir.path().to_path_buf());
        let owner = OwnerId(9);

        state.composer.begin(owner).await.unwrap();
        for text in ["a", "b", "c", "d", "e", "f", "Sig"] {
            state
                .composer
                .submit(owner, Submission::Text(text.to_string()))
                .await
                .unwrap();
        }
        let delivery = state
            .composer
            .deliver(owner, state.renderer.as_ref())
            .await
            .unwrap();

        assert!(delivery.artifact.path.exists());
        assert!(print_delivery(&delivery, 1, true).is_ok());
    }
}
