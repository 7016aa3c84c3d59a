//! The read-eval-print loop.

use planwise_agent::aggregate::title_case;
use planwise_agent::{Context, Session, SessionReply};
use planwise_tools::{ToolDefinition, ToolError, ToolRegistry};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

// ANSI style constants
pub(crate) const STYLE_DIM: &str = "\x1b[2m";
pub(crate) const STYLE_BOLD: &str = "\x1b[1m";
pub(crate) const STYLE_RED: &str = "\x1b[31m";
pub(crate) const STYLE_RESET: &str = "\x1b[0m";

const PROMPT: &str = "User: ";

/// REPL commands handled locally, never sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Help,
    History,
    Clear,
    /// Query the lookup tool without the model. Empty when no entity was given.
    Lookup(String),
    Exit,
}

impl Command {
    pub(crate) fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("/lookup")
            && (rest.is_empty() || rest.starts_with(char::is_whitespace))
        {
            return Some(Self::Lookup(rest.trim().to_string()));
        }
        match line {
            "/help" => Some(Self::Help),
            "/history" => Some(Self::History),
            "/clear" => Some(Self::Clear),
            "/exit" | "/quit" => Some(Self::Exit),
            _ => None,
        }
    }
}

pub(crate) fn print_banner(
    model: &str,
    label: &str,
    entities: &[String],
    tools: &[ToolDefinition],
) {
    eprintln!("{STYLE_BOLD}Planwise weather assistant{STYLE_RESET}");
    eprintln!("{STYLE_DIM}Model: {model}{STYLE_RESET}");
    for tool in tools {
        eprintln!("{STYLE_DIM}Tool: {} ({}){STYLE_RESET}", tool.name, tool.description);
    }
    eprintln!("{STYLE_DIM}Known {label}: {}{STYLE_RESET}", entities.join(", "));
    eprintln!("{STYLE_DIM}Type /help for commands, exit, quit or Ctrl+D to leave.{STYLE_RESET}");
    eprintln!();
}

fn print_help() {
    eprintln!("{STYLE_DIM}Commands:");
    eprintln!("  /help    Show this help message");
    eprintln!("  /history Show the conversation sent to the model");
    eprintln!("  /clear   Forget the conversation");
    eprintln!("  /lookup <entity>  Read the tool directly, without the model");
    eprintln!("  exit     Leave (also quit, /exit, /quit){STYLE_RESET}");
}

fn print_history(context: &Context) {
    // Skip the system prompt.
    let messages = &context.messages()[1..];
    if messages.is_empty() {
        eprintln!("{STYLE_DIM}  (no messages){STYLE_RESET}");
        return;
    }
    for (i, message) in messages.iter().enumerate() {
        eprintln!(
            "{STYLE_DIM}  [{}] {}: {}{STYLE_RESET}",
            i + 1,
            message.role,
            message.content
        );
    }
}

/// Runs `tool` for `entity` and formats the reading as `Entity: reading`.
pub(crate) async fn lookup(
    tools: &ToolRegistry,
    tool: &str,
    entity: &str,
) -> Result<String, ToolError> {
    let reading = tools.execute(tool, entity).await?;
    Ok(format!("{}: {reading}", title_case(entity)))
}

/// Reads lines until the user leaves or input ends.
pub(crate) async fn run(
    mut session: Session,
    tools: &ToolRegistry,
    tool: &str,
    mut editor: DefaultEditor,
) {
    loop {
        let line = match editor.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                eprintln!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{STYLE_RED}Error: {err}{STYLE_RESET}");
                break;
            }
        };

        let trimmed = line.trim();
        if !trimmed.is_empty() {
            let _ = editor.add_history_entry(trimmed);
        }

        match Command::parse(trimmed) {
            Some(Command::Help) => print_help(),
            Some(Command::History) => print_history(session.context()),
            Some(Command::Clear) => {
                session.reset();
                eprintln!("{STYLE_DIM}  Conversation cleared.{STYLE_RESET}");
            }
            Some(Command::Lookup(entity)) if entity.is_empty() => {
                eprintln!("{STYLE_DIM}  Usage: /lookup <entity>{STYLE_RESET}");
            }
            Some(Command::Lookup(entity)) => match lookup(tools, tool, &entity).await {
                Ok(line) => println!("{line}"),
                Err(err) => eprintln!("{STYLE_RED}Error: {err}{STYLE_RESET}"),
            },
            Some(Command::Exit) => break,
            None => match session.handle(&line).await {
                SessionReply::Exit => break,
                SessionReply::Empty => {}
                SessionReply::Reply(answer) => println!("Bot: {answer}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(Command::parse("/help"), Some(Command::Help));
        assert_eq!(Command::parse(" /history "), Some(Command::History));
        assert_eq!(Command::parse("/clear"), Some(Command::Clear));
        assert_eq!(Command::parse("/quit"), Some(Command::Exit));
    }

    #[test]
    fn parses_lookup_entity() {
        assert_eq!(
            Command::parse("/lookup  new delhi "),
            Some(Command::Lookup("new delhi".to_string()))
        );
        assert_eq!(Command::parse("/lookup"), Some(Command::Lookup(String::new())));
        assert_eq!(Command::parse("/lookups delhi"), None);
    }

    #[test]
    fn plain_text_is_not_a_command() {
        assert_eq!(Command::parse("weather in /help"), None);
        assert_eq!(Command::parse("help"), None);
        assert_eq!(Command::parse(""), None);
    }
}
