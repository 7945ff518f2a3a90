use std::time::Duration;

use crate::{clock::Timer, config::CodeConfig};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CodePhase {
    Typing,
    /// Everything shown; waits before wiping and starting over.
    Resting,
}

/// Code sample revealed one character at a time, line by line.
pub struct CodeTyper {
    config: CodeConfig,
    line: usize,
    column: usize,
    shown: String,
    phase: CodePhase,
    timer: Timer,
    runs: u64,
}

impl CodeTyper {
    pub fn new(config: CodeConfig, now: Duration) -> Self {
        Self {
            config,
            line: 0,
            column: 0,
            shown: String::new(),
            phase: CodePhase::Typing,
            timer: Timer::at(now),
            runs: 0,
        }
    }

    pub fn shown(&self) -> &str {
        &self.shown
    }

    pub fn phase(&self) -> CodePhase {
        self.phase
    }

    /// Completed passes over the whole sample.
    pub fn runs(&self) -> u64 {
        self.runs
    }

    fn type_next(&mut self) {
        let Some(line) = self.config.lines.get(self.line) else {
            self.phase = CodePhase::Resting;
            self.runs += 1;
            self.timer.schedule(self.config.rest());
            return;
        };

        match line.chars().nth(self.column) {
            Some(ch) => {
                self.shown.push(ch);
                self.column += 1;
            }
            None => {
                self.shown.push('\n');
                self.line += 1;
                self.column = 0;
            }
        }
        self.timer.schedule(self.config.char_step());
    }

    fn step(&mut self) {
        if self.phase == CodePhase::Resting {
            self.shown.clear();
            self.line = 0;
            self.column = 0;
            self.phase = CodePhase::Typing;
        }
        self.type_next();
    }

    pub fn poll(&mut self, now: Duration) -> bool {
        if self.config.lines.is_empty() {
            return false;
        }

        let mut changed = false;
        while self.timer.is_due(now) {
            self.step();
            changed = true;
        }
        changed
    }
}
