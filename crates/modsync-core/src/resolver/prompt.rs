//! Operator I/O for the conflict prompt

use std::io::BufRead;
use std::sync::mpsc::{self, Receiver};
use std::thread;

use crate::{Error, Result};

/// Line-based channel to an operator.
pub trait PromptIo {
    /// Ask `question` and block until an answer line arrives. An empty
    /// answer stands for `default`.
    fn ask(&mut self, question: &str, default: &str) -> Result<String>;

    /// Show several lines at once.
    fn write(&mut self, lines: &[String]);
}

/// A [`PromptIo`] whose answers arrive as messages on a channel.
///
/// The sending side may be a thread reading a terminal or a pipe (see
/// [`ChannelPrompt::spawn_reader`]) or a test feeding scripted answers.
/// Everything shown to the operator is kept in a transcript.
pub struct ChannelPrompt {
    answers: Receiver<String>,
    transcript: Vec<String>,
}

impl ChannelPrompt {
    pub fn new(answers: Receiver<String>) -> Self {
        Self {
            answers,
            transcript: Vec::new(),
        }
    }

    /// Pre-load a fixed list of answers.
    pub fn scripted<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (tx, rx) = mpsc::channel();
        for answer in answers {
            // The receiver lives in `rx`, so sending cannot fail here
            let _ = tx.send(answer.into());
        }
        Self::new(rx)
    }

    /// Start a thread that forwards each line of `reader` as an answer.
    ///
    /// The channel closes when the reader hits end of input.
    pub fn spawn_reader<R>(reader: R) -> Self
    where
        R: BufRead + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for line in reader.lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });
        Self::new(rx)
    }

    /// Everything written to the operator so far, questions included.
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }
}

impl PromptIo for ChannelPrompt {
    fn ask(&mut self, question: &str, default: &str) -> Result<String> {
        self.transcript.push(question.to_string());
        let answer = self.answers.recv().map_err(|_| Error::Prompt {
            message: "operator input closed before an answer was given".to_string(),
        })?;
        let answer = answer.trim();
        if answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer.to_string())
        }
    }

    fn write(&mut self, lines: &[String]) {
        self.transcript.extend_from_slice(lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn scripted_answers_in_order() {
        let mut prompt = ChannelPrompt::scripted(["v", "y"]);
        assert_eq!(prompt.ask("q?", "?").unwrap(), "v");
        assert_eq!(prompt.ask("q?", "?").unwrap(), "y");
        assert!(matches!(prompt.ask("q?", "?"), Err(Error::Prompt { .. })));
        assert_eq!(prompt.transcript(), ["q?", "q?", "q?"]);
    }

    #[test]
    fn empty_answer_becomes_default() {
        let mut prompt = ChannelPrompt::scripted([""]);
        assert_eq!(prompt.ask("q?", "?").unwrap(), "?");
    }

    #[test]
    fn reader_thread_forwards_lines() {
        let mut prompt = ChannelPrompt::spawn_reader(Cursor::new("x\nn\n"));
        assert_eq!(prompt.ask("q?", "?").unwrap(), "x");
        assert_eq!(prompt.ask("q?", "?").unwrap(), "n");
        assert!(prompt.ask("q?", "?").is_err());
    }
}
