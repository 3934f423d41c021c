//! Console implementation of the engine's prompter seam

use floppyforge_disk::Prompter;
use std::io::{self, BufRead, Write};

/// Prompter that talks to the terminal.
///
/// Reads answers line by line from stdin. End of input answers "no" so an
/// unattended run aborts instead of looping.
pub struct ConsolePrompter;

impl ConsolePrompter {
    /// Creates a console prompter.
    pub fn new() -> Self {
        Self
    }

    fn read_line(&self) -> Option<String> {
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim().to_string()),
            Err(_) => None,
        }
    }

    /// Picks one entry from `choices`, returning its index, or `None` when
    /// input ended.
    pub fn prompt_choice(&mut self, message: &str, choices: &[&str]) -> Option<usize> {
        loop {
            println!("{message}");
            for (index, choice) in choices.iter().enumerate() {
                println!("  {}) {choice}", index + 1);
            }
            print!("> ");
            let _ = io::stdout().flush();

            let line = self.read_line()?;
            if let Ok(number) = line.parse::<usize>() {
                if (1..=choices.len()).contains(&number) {
                    return Some(number - 1);
                }
            }
            println!("Enter a number between 1 and {}.", choices.len());
        }
    }

    /// Reads a number, falling back to `default` on an empty answer.
    pub fn prompt_number(&mut self, message: &str, default: u64) -> Option<u64> {
        loop {
            print!("{message} [{default}] ");
            let _ = io::stdout().flush();

            let line = self.read_line()?;
            if line.is_empty() {
                return Some(default);
            }
            if let Ok(number) = line.parse() {
                return Some(number);
            }
            println!("Enter a number.");
        }
    }
}

impl Prompter for ConsolePrompter {
    fn report(&mut self, message: &str) {
        println!("{message}");
    }

    fn report_error(&mut self, message: &str) {
        eprintln!("[ERR] {message}");
    }

    fn report_success(&mut self, message: &str) {
        println!("[OK] {message}");
    }

    fn prompt_yes_no(&mut self, message: &str) -> bool {
        loop {
            print!("{message} [y/n] ");
            let _ = io::stdout().flush();

            let Some(line) = self.read_line() else {
                return false;
            };
            match line.to_ascii_lowercase().as_str() {
                "y" | "yes" => return true,
                "n" | "no" => return false,
                _ => {}
            }
        }
    }
}
