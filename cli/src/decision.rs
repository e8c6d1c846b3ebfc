//! Decision providers for import conflicts.
//!
//! The engine defers every replace/keep decision to a provider. The
//! interactive provider prompts on the terminal per conflict; the blanket
//! providers answer uniformly for non-interactive runs.

use clap::ValueEnum;
use searchsync_engine::{Conflict, DecisionProvider, Resolution};
use std::io::{self, BufRead, Write};

/// Conflict handling selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConflictPolicy {
    /// Prompt per conflict
    Ask,
    /// Replace every conflicting entry
    Replace,
    /// Keep every existing entry
    Keep,
}

impl ConflictPolicy {
    /// Build the provider implementing this policy.
    pub fn provider(self) -> Box<dyn DecisionProvider> {
        match self {
            ConflictPolicy::Ask => Box::new(Prompt::terminal()),
            ConflictPolicy::Replace => Box::new(ReplaceAll),
            ConflictPolicy::Keep => Box::new(KeepAll),
        }
    }
}

/// Replaces every conflicting entry without asking.
pub struct ReplaceAll;

impl DecisionProvider for ReplaceAll {
    fn resolve(&mut self, _conflict: &Conflict) -> Resolution {
        Resolution::Replace
    }
}

/// Keeps every existing entry without asking.
pub struct KeepAll;

impl DecisionProvider for KeepAll {
    fn resolve(&mut self, _conflict: &Conflict) -> Resolution {
        Resolution::KeepExisting
    }
}

/// Interactive terminal prompt, one question per conflict.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl Prompt<io::BufReader<io::Stdin>, io::Stderr> {
    /// Prompt on stderr and read answers from stdin, leaving stdout free
    /// for the import summary.
    pub fn terminal() -> Self {
        Self {
            input: io::BufReader::new(io::stdin()),
            output: io::stderr(),
        }
    }
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, conflict: &Conflict) -> io::Result<Resolution> {
        writeln!(
            self.output,
            "\nConflict for \"{}\" (keyword: {}):\n{}",
            conflict.incoming.display_name(),
            conflict.key,
            conflict.diff
        )?;
        write!(self.output, "Replace the existing entry? [y/N] ")?;
        self.output.flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        match answer.trim().to_lowercase().as_str() {
            "y" | "yes" => Ok(Resolution::Replace),
            _ => Ok(Resolution::KeepExisting),
        }
    }
}

impl<R: BufRead, W: Write> DecisionProvider for Prompt<R, W> {
    fn resolve(&mut self, conflict: &Conflict) -> Resolution {
        // On a closed or failing terminal, keeping the existing entry is
        // the only answer that cannot destroy data.
        self.ask(conflict).unwrap_or(Resolution::KeepExisting)
    }
}
