//! Slash command parsing for the compose loop.
//!
//! The skip sentinel is not a command: it is a submission, built by
//! `submission`. Skip and cancel are configurable, so parsing takes the
//! loaded `GlobalConfig`. Both are matched after trimming, since terminal
//! input often carries stray whitespace.

use console::style;
use letterpost_types::config::GlobalConfig;
use letterpost_types::session::Submission;

/// Controls available while composing.
#[derive(Debug, PartialEq)]
pub enum ChannelCommand {
    /// Show available commands.
    Help,
    /// Throw away the current letter and start over.
    Start,
    /// Abandon the letter and leave.
    Cancel,
    /// Unknown slash command. Never submitted as field content.
    Unknown(String),
}

/// Parse a line as a channel command.
///
/// Returns `None` for field content, including the skip sentinel.
pub fn parse(input: &str, config: &GlobalConfig) -> Option<ChannelCommand> {
    let trimmed = input.trim();
    if trimmed == config.skip_command {
        return None;
    }
    if trimmed == config.cancel_command {
        return Some(ChannelCommand::Cancel);
    }

    if !trimmed.starts_with('/') {
        return None;
    }

    let cmd = trimmed
        .split_whitespace()
        .next()
        .unwrap_or(trimmed)
        .to_lowercase();
    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChannelCommand::Help),
        "/start" | "/restart" => Some(ChannelCommand::Start),
        _ => Some(ChannelCommand::Unknown(cmd)),
    }
}

/// Turn a non-command line into a submission for the current step.
///
/// The line is the skip sentinel when it matches after trimming; any other
/// text is submitted as typed.
pub fn submission(input: &str, config: &GlobalConfig) -> Submission {
    let trimmed = input.trim();
    let line = if trimmed == config.skip_command { trimmed } else { input };
    Submission::from_input(line, &config.skip_command)
}

/// Print the help text listing all available commands.
pub fn print_help(config: &GlobalConfig) {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    println!(
        "  {:<10} Leave the current part empty",
        style(&config.skip_command).cyan()
    );
    println!(
        "  {:<10} Stop writing this letter",
        style(&config.cancel_command).cyan()
    );
    println!("  {:<10} Start the letter over", style("/start").cyan());
    println!("  {:<10} Show this help message", style("/help").cyan());
    println!();
    println!(
        "  {}",
        style("Empty parts are left out of the letter, along with their whole section.").dim()
    );
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_help() {
        let config = GlobalConfig::default();
        assert_eq!(parse("/help", &config), Some(ChannelCommand::Help));
        assert_eq!(parse("/h", &config), Some(ChannelCommand::Help));
        assert_eq!(parse("/?", &config), Some(ChannelCommand::Help));
    }

    #[test]
    fn test_parse_start() {
        let config = GlobalConfig::default();
        assert_eq!(parse("/start", &config), Some(ChannelCommand::Start));
        assert_eq!(parse("/RESTART", &config), Some(ChannelCommand::Start));
    }

    #[test]
    fn test_parse_cancel_is_exact() {
        let config = GlobalConfig::default();
        assert_eq!(parse("/cancel", &config), Some(ChannelCommand::Cancel));
        assert_eq!(
            parse("/cancel now", &config),
            Some(ChannelCommand::Unknown("/cancel".to_string()))
        );
    }

    #[test]
    fn test_parse_cancel_ignores_surrounding_whitespace() {
        let config = GlobalConfig::default();
        assert_eq!(parse("/cancel ", &config), Some(ChannelCommand::Cancel));
        assert_eq!(parse("  /cancel\t", &config), Some(ChannelCommand::Cancel));
    }

    #[test]
    fn test_skip_sentinel_is_not_a_command() {
        let config = GlobalConfig::default();
        assert_eq!(parse("/skip", &config), None);
        assert_eq!(parse("/skip ", &config), None);
        assert_eq!(parse(" /skip", &config), None);
    }

    #[test]
    fn test_submission_trims_skip_sentinel() {
        let config = GlobalConfig::default();
        assert_eq!(submission("/skip", &config), Submission::Skip);
        assert_eq!(submission("/skip ", &config), Submission::Skip);
        assert_eq!(
            submission("/skip this", &config),
            Submission::Text("/skip this".to_string())
        );
        assert_eq!(
            submission(" Dear Ada, ", &config),
            Submission::Text(" Dear Ada, ".to_string())
        );
    }

    #[test]
    fn test_parse_not_command() {
        let config = GlobalConfig::default();
        assert_eq!(parse("Dear Ada,", &config), None);
        assert_eq!(parse("", &config), None);
    }

    #[test]
    fn test_parse_unknown() {
        let config = GlobalConfig::default();
        assert_eq!(
            parse("/foo bar", &config),
            Some(ChannelCommand::Unknown("/foo".to_string()))
        );
    }

    #[test]
    fn test_custom_commands() {
        let config = GlobalConfig {
            skip_command: "-".to_string(),
            cancel_command: "/stop".to_string(),
            ..GlobalConfig::default()
        };
        assert_eq!(parse("-", &config), None);
        assert_eq!(parse("/stop", &config), Some(ChannelCommand::Cancel));
        assert_eq!(
            parse("/skip", &config),
            Some(ChannelCommand::Unknown("/skip".to_string()))
        );
    }
}
