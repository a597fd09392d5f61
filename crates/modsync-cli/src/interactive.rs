//! Terminal operator for the conflict prompt
//!
//! Uses dialoguer for line input.

use colored::Colorize;
use dialoguer::Input;
use modsync_core::{PromptIo, Result};

/// Asks the discard-changes question on the controlling terminal.
pub struct TerminalPrompt;

impl PromptIo for TerminalPrompt {
    fn ask(&mut self, question: &str, default: &str) -> Result<String> {
        Input::<String>::new()
            .with_prompt(question.trim())
            .default(default.to_string())
            .show_default(false)
            .interact_text()
            .map_err(|e| modsync_core::Error::Prompt {
                message: e.to_string(),
            })
    }

    fn write(&mut self, lines: &[String]) {
        for line in lines {
            match line.trim_start().split_once(' ') {
                Some((flag @ ("M" | "A" | "D"), path)) => {
                    let flag = match flag {
                        "D" => flag.red(),
                        "A" => flag.green(),
                        _ => flag.yellow(),
                    };
                    eprintln!("    {} {}", flag.bold(), path);
                }
                _ => eprintln!("{}", line),
            }
        }
    }
}
