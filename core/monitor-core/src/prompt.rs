//! Yes/no confirmation.
//!
//! The configurator asks through a [`ResponseProvider`] so scripted runs and
//! tests can supply answers without a terminal.

use crate::error::{MonitorError, Result};
use std::collections::VecDeque;
use std::io::{BufRead, Write};

/// Answers a yes/no question.
pub trait ResponseProvider {
    /// Asks `question` once and returns whether it was confirmed.
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

/// Only `y` and `yes` (any case) confirm. Only the line terminator is
/// stripped, so `" y"` or `"yep"` decline.
pub fn is_affirmative(line: &str) -> bool {
    let answer = line.trim_end_matches(['\n', '\r']).to_lowercase();
    answer == "y" || answer == "yes"
}

/// Prompts on a writer and reads one line from a reader.
///
/// Writes `"<question> [y/N] "` and reads a single line. End of input reads
/// as an empty answer.
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> ResponseProvider for LinePrompt<R, W> {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        write!(self.output, "{} [y/N] ", question).map_err(|source| MonitorError::Prompt { source })?;
        self.output
            .flush()
            .map_err(|source| MonitorError::Prompt { source })?;

        let mut line = String::new();
        self.input
            .read_line(&mut line)
            .map_err(|source| MonitorError::Prompt { source })?;

        let confirmed = is_affirmative(&line);
        tracing::debug!(question, confirmed, "Prompt answered");
        Ok(confirmed)
    }
}

/// Answers every question the same way, echoing it with the answer.
/// Backs `--yes` / `--no`.
pub struct FixedAnswer<W> {
    answer: bool,
    output: W,
}

impl<W: Write> FixedAnswer<W> {
    pub fn new(answer: bool, output: W) -> Self {
        Self { answer, output }
    }
}

impl<W: Write> ResponseProvider for FixedAnswer<W> {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        let label = if self.answer { "y" } else { "n" };
        writeln!(self.output, "{} [y/N] {}", question, label)
            .map_err(|source| MonitorError::Prompt { source })?;
        Ok(self.answer)
    }
}

/// Canned answers consumed in order; an exhausted queue answers no.
/// Records every question asked.
#[derive(Debug, Default)]
pub struct ScriptedResponses {
    answers: VecDeque<bool>,
    asked: Vec<String>,
}

impl ScriptedResponses {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }

    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl ResponseProvider for ScriptedResponses {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        self.asked.push(question.to_string());
        Ok(self.answers.pop_front().unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_affirmative_tokens() {
        for line in ["y", "Y\n", "yes", "YES\r\n", "yEs\n"] {
            assert!(is_affirmative(line), "{line:?}");
        }
    }

    #[test]
    fn test_everything_else_declines() {
        for line in ["", "\n", "n", "no\n", "yep", "yes please", " y", "y ", "sure"] {
            assert!(!is_affirmative(line), "{line:?}");
        }
    }

    #[test]
    fn test_line_prompt_writes_suffix_and_reads_one_line() {
        let input = Cursor::new("yes\nno\n");
        let mut output = Vec::new();
        {
            let mut prompt = LinePrompt::new(input, &mut output);
            assert!(prompt.confirm("Configure now?").unwrap());
        }
        assert_eq!(String::from_utf8(output).unwrap(), "Configure now? [y/N] ");
    }

    #[test]
    fn test_line_prompt_end_of_input_declines() {
        let mut output = Vec::new();
        let mut prompt = LinePrompt::new(Cursor::new(""), &mut output);
        assert!(!prompt.confirm("Configure now?").unwrap());
        assert!(!prompt.confirm("Set up autostart now?").unwrap());
    }

    #[test]
    fn test_fixed_answer_echoes_question() {
        let mut output = Vec::new();
        {
            let mut prompt = FixedAnswer::new(true, &mut output);
            assert!(prompt.confirm("Configure now?").unwrap());
        }
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Configure now? [y/N] y\n"
        );
    }

    #[test]
    fn test_scripted_responses_default_to_no() {
        let mut responses = ScriptedResponses::new([true]);
        assert!(responses.confirm("first").unwrap());
        assert!(!responses.confirm("second").unwrap());
        assert_eq!(responses.asked(), ["first", "second"]);
    }
}
