//! Colored terminal output for runtime updates.
//!
//! The `*_lines` functions build plain text so they can be tested without
//! depending on whether the terminal supports color; `print_update` adds
//! the colors.

use colored::Colorize;

use mitra_core::breathing::{BreathingSnapshot, presets};
use mitra_core::games::{MemoryCard, Swatch, TriviaView};
use mitra_execution::Update;

const BOARD_COLUMNS: usize = 4;

pub fn print_update(update: &Update, companion_name: &str) {
    match update {
        Update::Message(message) if message.is_from_user => {
            println!("{}", format!("> {}", message.text).green());
        }
        Update::Message(message) => {
            println!("{}", format!("[{}]", companion_name).bright_magenta());
            for line in message.text.lines() {
                println!("{}", line.bright_blue());
            }
            println!();
        }
        Update::Typing(true) => {
            println!("{}", format!("{} is typing...", companion_name).bright_black());
        }
        Update::Typing(false) => {}
        Update::Breathing(snapshot) => {
            println!("{}", breathing_line(snapshot).cyan());
        }
        Update::Memory {
            cards,
            moves,
            complete,
        } => {
            for line in memory_lines(cards) {
                println!("  {}", line);
            }
            println!("{}", format!("Moves: {}", moves).bright_black());
            if *complete {
                println!(
                    "{}",
                    format!("🎉 Well done! You matched every pair in {} moves.", moves)
                        .bright_green()
                );
            }
        }
        Update::TriviaAnswered(feedback) => {
            if feedback.correct {
                println!("{}", "Correct!".bright_green().bold());
            } else {
                println!(
                    "{}",
                    format!("Not quite. The answer is: {}", feedback.correct_option).yellow()
                );
            }
            println!("{}", feedback.explanation.bright_black());
            println!("{}", "Type '/trivia next' to continue.".bright_black());
        }
        Update::Trivia(view) => {
            for line in trivia_lines(view) {
                println!("{}", line.bright_white());
            }
        }
        Update::Affirmation {
            swatch,
            text,
            picked,
        } => {
            println!(
                "{} {}",
                format!("[{}]", swatch.label()).bright_magenta(),
                text.bright_blue()
            );
            println!(
                "{}",
                format!("Colors on your canvas: {}", picked).bright_black()
            );
        }
        Update::CanvasCleared => {
            println!("{}", "Canvas cleared.".bright_black());
        }
        Update::Rejected(reason) => {
            println!("{}", reason.yellow());
        }
    }
}

pub fn breathing_line(snapshot: &BreathingSnapshot) -> String {
    let state = if snapshot.running { "running" } else { "paused" };
    format!(
        "{} ({}) | {} {}s | cycles: {} | {}",
        snapshot.pattern.label,
        snapshot.pattern.key,
        snapshot.phase.instruction(),
        snapshot.seconds_remaining,
        snapshot.completed_cycles,
        state
    )
}

/// Face-down cards show their 1-based number so they can be flipped.
pub fn memory_lines(cards: &[MemoryCard]) -> Vec<String> {
    cards
        .chunks(BOARD_COLUMNS)
        .map(|row| {
            row.iter()
                .map(|card| {
                    if card.is_face_up() {
                        format!("[{:^4}]", card.symbol)
                    } else {
                        format!("[{:>4}]", card.id + 1)
                    }
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

pub fn trivia_lines(view: &TriviaView) -> Vec<String> {
    match view {
        TriviaView::Asking {
            number,
            total,
            question,
            selected,
            score,
        } => {
            let mut lines = vec![
                format!(
                    "Question {} of {} ({}) | score {}",
                    number, total, question.category, score
                ),
                question.question.to_string(),
            ];
            for (index, option) in question.options.iter().enumerate() {
                let marker = if *selected == Some(index) { '>' } else { ' ' };
                lines.push(format!("{} {}. {}", marker, index + 1, option));
            }
            lines
        }
        TriviaView::Complete {
            score,
            total,
            message,
        } => vec![
            format!("Quiz complete! You scored {} out of {}.", score, total),
            message.to_string(),
        ],
    }
}

pub fn print_patterns() {
    for pattern in presets() {
        println!(
            "  {}  {}",
            pattern.key.to_string().bright_cyan(),
            format!(
                "{} (in {}s, hold {}s, out {}s)",
                pattern.label,
                pattern.inhale_seconds,
                pattern.hold_seconds,
                pattern.exhale_seconds
            )
            .bright_black()
        );
    }
}

pub fn print_swatches() {
    for swatch in Swatch::all() {
        println!(
            "  {:<14} {}",
            swatch.to_string().bright_cyan(),
            format!("{} {} ({})", swatch.label(), swatch.hex(), swatch.mood()).bright_black()
        );
    }
}
