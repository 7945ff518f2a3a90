use std::time::Duration;

use rand::Rng;

use crate::{clock::Timer, config::LoadingConfig};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadingPhase {
    /// Progress bar still filling.
    Loading,
    /// Reached 100%, splash about to hide.
    Complete,
    /// Splash gone, page components not started yet.
    Hidden,
    /// Page components started.
    Ready,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadingEvent {
    Hidden,
    /// Fired once; this is what starts the particle animation.
    Ready,
}

/// Simulated loading splash.
///
/// Progress grows by a random amount every tick until it hits 100, then the
/// splash hides and, after a short delay, the page reports ready.
pub struct LoadingSplash {
    config: LoadingConfig,
    progress: f32,
    phase: LoadingPhase,
    timer: Timer,
}

impl LoadingSplash {
    pub fn new(config: LoadingConfig, now: Duration) -> Self {
        let timer = Timer::at(now + config.tick());
        Self {
            config,
            progress: 0.0,
            phase: LoadingPhase::Loading,
            timer,
        }
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Whole percent shown next to the bar.
    pub fn percentage(&self) -> u32 {
        self.progress.floor() as u32
    }

    pub fn phase(&self) -> LoadingPhase {
        self.phase
    }

    pub fn is_visible(&self) -> bool {
        matches!(self.phase, LoadingPhase::Loading | LoadingPhase::Complete)
    }

    /// Runs every step due by `now` and returns the last event produced.
    pub fn poll<R: Rng>(&mut self, now: Duration, rng: &mut R) -> Option<LoadingEvent> {
        let mut event = None;

        while self.phase != LoadingPhase::Ready && self.timer.is_due(now) {
            match self.phase {
                LoadingPhase::Loading => {
                    self.progress += rng.gen_range(0.0f32..1.0) * self.config.max_step;
                    if self.progress >= 100.0 {
                        self.progress = 100.0;
                        self.phase = LoadingPhase::Complete;
                        self.timer.schedule(self.config.hide_delay());
                    } else {
                        self.timer.schedule(self.config.tick());
                    }
                }
                LoadingPhase::Complete => {
                    tracing::debug!("loading splash hidden");
                    self.phase = LoadingPhase::Hidden;
                    self.timer.schedule(self.config.ready_delay());
                    event = Some(LoadingEvent::Hidden);
                }
                LoadingPhase::Hidden => {
                    tracing::info!("page ready");
                    self.phase = LoadingPhase::Ready;
                    event = Some(LoadingEvent::Ready);
                }
                LoadingPhase::Ready => break,
            }
        }

        event
    }
}
