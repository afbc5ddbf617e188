//! Turns REPL lines into runtime commands.

use mitra_core::breathing::PatternKey;
use mitra_core::games::Swatch;
use mitra_core::{MitraError, Result};
use mitra_execution::{
    BreathingCommand, ColorCommand, Command, MemoryCommand, TriviaCommand,
};

/// Slash commands offered for completion and hints.
pub const SLASH_COMMANDS: &[&str] = &[
    "/breathe start",
    "/breathe pause",
    "/breathe reset",
    "/breathe pattern ",
    "/breathe patterns",
    "/memory new",
    "/memory flip ",
    "/memory show",
    "/trivia answer ",
    "/trivia next",
    "/trivia reset",
    "/trivia show",
    "/color pick ",
    "/color clear",
    "/color swatches",
    "/help",
];

pub const HELP: &str = "\
Type anything to talk with your companion.

  /breathe start | pause | reset      control the breathing exercise
  /breathe pattern <key>              choose 4-4-4, 4-7-8, 6-2-6 or 5-5-5
  /breathe patterns                   list breathing patterns
  /memory new | show                  memory match board
  /memory flip <n>                    flip card n (1-16)
  /trivia show | next | reset         wellness trivia
  /trivia answer <n>                  answer with option n (1-4)
  /color pick <name>                  pick a color, e.g. blue or calm-blue
  /color clear | swatches             clear the canvas or list colors
  /help                               show this help
  quit | exit                         leave";

/// A parsed REPL line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Empty,
    Quit,
    Help,
    ListPatterns,
    ListSwatches,
    Command(Command),
}

pub fn parse_line(line: &str) -> Result<Input> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(Input::Empty);
    }
    if trimmed == "quit" || trimmed == "exit" {
        return Ok(Input::Quit);
    }
    if !trimmed.starts_with('/') {
        return Ok(Input::Command(Command::Say(trimmed.to_string())));
    }

    let mut words = trimmed.split_whitespace();
    let head = words.next().unwrap_or_default();
    let action = words.next();
    let argument = words.next();

    let input = match (head, action) {
        ("/help", _) => Input::Help,
        ("/breathe", Some("patterns")) => Input::ListPatterns,
        ("/breathe", Some(action)) => Input::Command(Command::Breathing(match action {
            "start" => BreathingCommand::Start,
            "pause" => BreathingCommand::Pause,
            "reset" => BreathingCommand::Reset,
            "show" => BreathingCommand::Show,
            "pattern" => BreathingCommand::SelectPattern(PatternKey::parse(required(
                argument, "pattern key",
            )?)?),
            other => return Err(unknown_action("/breathe", other)),
        })),
        ("/memory", Some(action)) => Input::Command(Command::Memory(match action {
            "new" => MemoryCommand::NewGame,
            "show" => MemoryCommand::Show,
            "flip" => MemoryCommand::Flip(one_based(required(argument, "card number")?)?),
            other => return Err(unknown_action("/memory", other)),
        })),
        ("/trivia", Some(action)) => Input::Command(Command::Trivia(match action {
            "next" => TriviaCommand::Next,
            "reset" => TriviaCommand::Reset,
            "show" => TriviaCommand::Show,
            "answer" => {
                TriviaCommand::Answer(one_based(required(argument, "option number")?)?)
            }
            other => return Err(unknown_action("/trivia", other)),
        })),
        ("/color", Some("swatches")) => Input::ListSwatches,
        ("/color", Some(action)) => Input::Command(Command::Color(match action {
            "pick" => ColorCommand::Pick(Swatch::parse(required(argument, "color name")?)?),
            "clear" => ColorCommand::Clear,
            other => return Err(unknown_action("/color", other)),
        })),
        ("/breathe" | "/memory" | "/trivia" | "/color", None) => {
            return Err(MitraError::invalid_input(format!(
                "{} needs an action, see /help",
                head
            )));
        }
        (other, _) => {
            return Err(MitraError::invalid_input(format!(
                "unknown command '{}', see /help",
                other
            )));
        }
    };
    Ok(input)
}

fn required<'a>(argument: Option<&'a str>, what: &str) -> Result<&'a str> {
    argument.ok_or_else(|| MitraError::invalid_input(format!("missing {}", what)))
}

/// Converts a 1-based number typed by the user into a 0-based index.
fn one_based(argument: &str) -> Result<usize> {
    match argument.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(MitraError::invalid_input(format!(
            "'{}' is not a positive number",
            argument
        ))),
    }
}

fn unknown_action(head: &str, action: &str) -> MitraError {
    MitraError::invalid_input(format!("unknown {} action '{}'", head, action))
}
