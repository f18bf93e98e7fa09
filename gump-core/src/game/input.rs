//! Input Capture and Recording
//!
//! The per-tick key state and a delta-compressed recording of it, used to
//! replay a session tick-for-tick.

use serde::{Serialize, Deserialize};

bitflags::bitflags! {
    /// Keys held during one tick.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct InputFrame: u8 {
        /// Left arrow
        const LEFT = 1 << 0;
        /// Right arrow
        const RIGHT = 1 << 1;
        /// Up arrow (jump)
        const UP = 1 << 2;
    }
}

impl InputFrame {
    /// Build from individual key states.
    pub fn from_keys(left: bool, right: bool, up: bool) -> Self {
        let mut frame = Self::empty();
        frame.set(Self::LEFT, left);
        frame.set(Self::RIGHT, right);
        frame.set(Self::UP, up);
        frame
    }

    /// Left held.
    #[inline]
    pub fn left(&self) -> bool {
        self.contains(Self::LEFT)
    }

    /// Right held.
    #[inline]
    pub fn right(&self) -> bool {
        self.contains(Self::RIGHT)
    }

    /// Up held.
    #[inline]
    pub fn up(&self) -> bool {
        self.contains(Self::UP)
    }

    /// No keys held.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.is_empty()
    }
}

/// A recorded input change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputDelta {
    /// Tick when this input state began
    pub tick: u32,
    /// The new input state
    pub frame: InputFrame,
}

/// Input recording for one session.
///
/// Only ticks where the input changed are stored.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InputRecording {
    /// Starting tick (usually 1, the first simulated tick)
    pub start_tick: u32,

    /// Last recorded tick
    pub end_tick: u32,

    deltas: Vec<InputDelta>,
}

impl InputRecording {
    /// Create an empty recording starting at `start_tick`.
    pub fn new(start_tick: u32) -> Self {
        Self {
            start_tick,
            end_tick: start_tick,
            deltas: Vec::new(),
        }
    }

    /// Record input for a tick. Stored only if it differs from the previous one.
    pub fn record(&mut self, tick: u32, frame: InputFrame) {
        self.end_tick = tick;

        if frame != self.last_frame() {
            self.deltas.push(InputDelta { tick, frame });
        }
    }

    /// Most recent recorded input; idle if nothing was recorded.
    fn last_frame(&self) -> InputFrame {
        self.deltas.last().map_or(InputFrame::empty(), |d| d.frame)
    }

    /// Input held at `tick`. Idle before the first change.
    pub fn input_at(&self, tick: u32) -> InputFrame {
        let idx = self.deltas.partition_point(|d| d.tick <= tick);
        if idx == 0 {
            InputFrame::empty()
        } else {
            self.deltas[idx - 1].frame
        }
    }

    /// Recorded changes.
    pub fn deltas(&self) -> &[InputDelta] {
        &self.deltas
    }

    /// Number of recorded changes.
    pub fn delta_count(&self) -> usize {
        self.deltas.len()
    }

    /// Number of ticks covered.
    pub fn tick_count(&self) -> u32 {
        self.end_tick.saturating_sub(self.start_tick) + 1
    }

    /// Iterate every tick from start to end with the input held at it.
    pub fn replay_iter(&self) -> ReplayIterator<'_> {
        ReplayIterator {
            recording: self,
            current_tick: self.start_tick,
            delta_idx: 0,
            current_frame: InputFrame::empty(),
        }
    }
}

/// Iterator for replaying inputs tick-by-tick.
pub struct ReplayIterator<'a> {
    recording: &'a InputRecording,
    current_tick: u32,
    delta_idx: usize,
    current_frame: InputFrame,
}

impl Iterator for ReplayIterator<'_> {
    type Item = (u32, InputFrame);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_tick > self.recording.end_tick {
            return None;
        }

        while let Some(delta) = self.recording.deltas.get(self.delta_idx) {
            if delta.tick > self.current_tick {
                break;
            }
            self.current_frame = delta.frame;
            self.delta_idx += 1;
        }

        let result = (self.current_tick, self.current_frame);
        self.current_tick += 1;
        Some(result)
    }
}

// =============================================================================
// TESTS
// =============================================================================
