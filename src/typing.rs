use std::time::Duration;

use crate::{clock::Timer, config::TypingConfig};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypingPhase {
    Typing,
    /// Whole text shown; the next step starts deleting.
    Pausing,
    Deleting,
}

/// Headline that types a phrase, holds it, deletes it and moves on to the
/// next one, forever.
pub struct TypingCycler {
    config: TypingConfig,
    index: usize,
    shown: usize,
    phase: TypingPhase,
    timer: Timer,
}

impl TypingCycler {
    /// The first character appears at `now`.
    pub fn new(config: TypingConfig, now: Duration) -> Self {
        let index = config.texts.iter().position(|text| !text.is_empty()).unwrap_or(0);
        Self {
            config,
            index,
            shown: 0,
            phase: TypingPhase::Typing,
            timer: Timer::at(now),
        }
    }

    pub fn phase(&self) -> TypingPhase {
        self.phase
    }

    pub fn text_index(&self) -> usize {
        self.index
    }

    /// The visible prefix of the current text.
    pub fn current(&self) -> &str {
        let Some(text) = self.config.texts.get(self.index) else {
            return "";
        };
        let end = text
            .char_indices()
            .nth(self.shown)
            .map_or(text.len(), |(offset, _)| offset);
        &text[..end]
    }

    fn text_len(&self) -> usize {
        self.config.texts.get(self.index).map_or(0, |text| text.chars().count())
    }

    fn has_text(&self) -> bool {
        self.config.texts.iter().any(|text| !text.is_empty())
    }

    fn next_text(&mut self) {
        let count = self.config.texts.len();
        loop {
            self.index = (self.index + 1) % count;
            if !self.config.texts[self.index].is_empty() {
                break;
            }
        }
    }

    fn step(&mut self) {
        match self.phase {
            TypingPhase::Typing => {
                self.shown += 1;
                if self.shown >= self.text_len() {
                    self.phase = TypingPhase::Pausing;
                    self.timer.schedule(self.config.pause());
                } else {
                    self.timer.schedule(self.config.type_step());
                }
            }
            TypingPhase::Pausing | TypingPhase::Deleting => {
                self.shown = self.shown.saturating_sub(1);
                self.phase = TypingPhase::Deleting;
                if self.shown == 0 {
                    self.next_text();
                    self.phase = TypingPhase::Typing;
                }
                self.timer.schedule(self.config.delete_step());
            }
        }
    }

    /// Applies every step due by `now`. Returns whether the text changed.
    pub fn poll(&mut self, now: Duration) -> bool {
        if !self.has_text() {
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
