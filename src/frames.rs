//! Lifecycle of the background animation.
//!
//! Frames are pulled, not pushed: the host asks for the next frame once per
//! repaint and gets `None` while the loop is idle or paused. [`Frames`]
//! exposes the same thing as an unbounded iterator, so a test can step an
//! exact number of frames with `take(n)`.

use crate::{canvas::Frame, field::ParticleField};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    /// Created but not started yet; the splash is still up.
    Idle,
    Running,
    Paused,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

pub struct FrameLoop {
    field: ParticleField,
    state: LoopState,
    frame_count: u64,
}

impl FrameLoop {
    pub fn new(field: ParticleField) -> Self {
        Self {
            field,
            state: LoopState::Idle,
            frame_count: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut ParticleField {
        &mut self.field
    }

    /// Starts producing frames. Only the first call has an effect.
    pub fn start(&mut self) {
        match self.state {
            LoopState::Idle => {
                tracing::info!(particles = self.field.len(), "starting particle animation");
                self.state = LoopState::Running;
            }
            state => tracing::warn!(?state, "particle animation already started"),
        }
    }

    /// Stops frame production. Particle state is left exactly as it was.
    pub fn pause(&mut self) {
        if self.state == LoopState::Running {
            tracing::debug!(frame = self.frame_count, "pausing particle animation");
            self.state = LoopState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state == LoopState::Paused {
            tracing::debug!(frame = self.frame_count, "resuming particle animation");
            self.state = LoopState::Running;
        }
    }

    pub fn set_visibility(&mut self, visibility: Visibility) {
        match visibility {
            Visibility::Hidden => self.pause(),
            Visibility::Visible => self.resume(),
        }
    }

    pub fn next_frame(&mut self) -> Option<Frame> {
        if !self.is_running() {
            return None;
        }
        self.frame_count += 1;
        Some(self.field.step())
    }

    pub fn frames(&mut self) -> Frames<'_> {
        Frames { frame_loop: self }
    }
}

/// Unbounded sequence of frames; ends as soon as the loop stops running.
pub struct Frames<'a> {
    frame_loop: &'a mut FrameLoop,
}

impl Iterator for Frames<'_> {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        self.frame_loop.next_frame()
    }
}
