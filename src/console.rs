//! Operator-facing console output and prompts.
//!
//! Messages carry a colored marker (`[INFO]`, `[OK]`, `[WARN]`, `[ERROR]`);
//! errors go to stderr. Interactive input goes through the `Prompter` trait
//! so the setup sequence can be driven without a terminal.

use crossterm::style::{StyledContent, Stylize};
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use strum::Display;

/// Severity marker printed in front of console messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Level {
    #[strum(serialize = "INFO")]
    Info,
    #[strum(serialize = "OK")]
    Ok,
    #[strum(serialize = "WARN")]
    Warn,
    #[strum(serialize = "ERROR")]
    Error,
}

impl Level {
    /// Bracketed, colored marker for this level
    pub fn marker(self) -> StyledContent<String> {
        let tag = format!("[{}]", self);
        match self {
            Level::Info => tag.cyan(),
            Level::Ok => tag.green(),
            Level::Warn => tag.yellow(),
            Level::Error => tag.red(),
        }
    }
}

pub fn info(msg: impl AsRef<str>) {
    println!("{} {}", Level::Info.marker(), msg.as_ref());
}

pub fn ok(msg: impl AsRef<str>) {
    println!("{} {}", Level::Ok.marker(), msg.as_ref());
}

pub fn warn(msg: impl AsRef<str>) {
    println!("{} {}", Level::Warn.marker(), msg.as_ref());
}

pub fn error(msg: impl AsRef<str>) {
    eprintln!("{} {}", Level::Error.marker(), msg.as_ref());
}

/// Interpret a yes/no answer. Accepts English and Spanish affirmatives.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "s" | "si" | "sí"
    )
}

/// Source of operator answers.
///
/// Empty or missing input always means "decline".
pub trait Prompter {
    /// Ask a yes/no question; anything but an affirmative answer is "no".
    fn confirm(&mut self, question: &str) -> bool;

    /// Ask for free text; returns the trimmed answer (empty on EOF).
    fn ask(&mut self, question: &str) -> String;

    /// Wait until the operator presses Enter.
    fn pause(&mut self, message: &str);
}

/// Prompter reading answers from standard input
#[derive(Debug, Default)]
pub struct StdinPrompter;

impl StdinPrompter {
    fn read_answer(question: &str) -> String {
        print!("{}", question);
        let _ = io::stdout().flush();

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(_) => line.trim().to_string(),
            Err(e) => {
                tracing::warn!("Failed to read console input: {}", e);
                String::new()
            }
        }
    }
}

impl Prompter for StdinPrompter {
    fn confirm(&mut self, question: &str) -> bool {
        is_affirmative(&Self::read_answer(question))
    }

    fn ask(&mut self, question: &str) -> String {
        Self::read_answer(question)
    }

    fn pause(&mut self, message: &str) {
        let _ = Self::read_answer(message);
    }
}

/// Prompter replaying a fixed list of answers, one per prompt.
///
/// Once the list is exhausted every prompt receives an empty answer.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    /// Questions shown so far, in order
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    fn next_answer(&mut self, question: &str) -> String {
        self.asked.push(question.to_string());
        self.answers
            .pop_front()
            .map(|a| a.trim().to_string())
            .unwrap_or_default()
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&mut self, question: &str) -> bool {
        is_affirmative(&self.next_answer(question))
    }

    fn ask(&mut self, question: &str) -> String {
        self.next_answer(question)
    }

    fn pause(&mut self, message: &str) {
        let _ = self.next_answer(message);
    }
}
