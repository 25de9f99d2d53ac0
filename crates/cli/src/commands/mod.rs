pub(crate) mod days;
pub(crate) mod duration;
pub(crate) mod log;
pub(crate) mod milestones;
pub(crate) mod note;
pub(crate) mod reset;
pub(crate) mod start;
pub(crate) mod status;
pub(crate) mod validate;

use std::process;

use tally_core::{ChallengeState, Clock, Problem};
use tally_storage::{FileStore, ProgressRepository};

use crate::{report_error, OutputFormat};

/// Everything a command needs: where the challenge lives, what day it is, and
/// how to talk back.
pub(crate) struct Session {
    pub repo: ProgressRepository<FileStore>,
    pub clock: Clock,
    pub output: OutputFormat,
    pub quiet: bool,
}

impl Session {
    pub(crate) fn fail(&self, msg: &str) -> ! {
        report_error(msg, self.output, self.quiet);
        process::exit(1);
    }

    /// Load the stored challenge, reporting any repairs on stderr.
    pub(crate) fn load(&self) -> Option<ChallengeState> {
        let loaded = match self.repo.load(&self.clock) {
            Ok(l) => l,
            Err(e) => self.fail(&format!("error loading challenge: {}", e)),
        };
        self.warn_problems(&loaded.problems, loaded.state.is_some());
        loaded.state
    }

    /// Load the stored challenge or exit if none has been started.
    pub(crate) fn require_state(&self) -> ChallengeState {
        match self.load() {
            Some(state) => state,
            None => self.fail("no challenge in progress; run `tally start <name>` first"),
        }
    }

    pub(crate) fn save(&self, state: &ChallengeState) -> ChallengeState {
        match self.repo.save(state) {
            Ok(saved) => saved,
            Err(e) => self.fail(&format!("error saving challenge: {}", e)),
        }
    }

    /// Report load problems on stderr. `repaired` is false when the stored
    /// data could not be read at all.
    pub(crate) fn warn_problems(&self, problems: &[Problem], repaired: bool) {
        if self.quiet {
            return;
        }
        for p in problems {
            match self.output {
                OutputFormat::Text if repaired => eprintln!("warning: repaired {}", p),
                OutputFormat::Text => eprintln!("warning: {}", p),
                OutputFormat::Json => eprintln!("{}", serde_json::json!({ "warning": p })),
            }
        }
    }

    /// Print a command result on stdout in the selected format.
    pub(crate) fn emit(&self, text: &str, json: &serde_json::Value) {
        if self.quiet {
            return;
        }
        match self.output {
            OutputFormat::Text => println!("{}", text),
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(json).unwrap_or_default())
            }
        }
    }
}
