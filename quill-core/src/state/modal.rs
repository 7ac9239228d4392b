//! Modal group 1 tracking
//!
//! G0-G3 are mutually exclusive motion modes. The last one seen stays in
//! effect for parameter-only lines and bare `G53` overrides.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Group 1 motion modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MotionMode {
    /// G0
    Rapid,
    /// G1
    Linear,
    /// G2
    ArcClockwise,
    /// G3
    ArcCounterClockwise,
}

impl MotionMode {
    /// Decode a G number; anything above 3 is not a group 1 code
    pub const fn from_gcode(number: u16) -> Option<Self> {
        match number {
            0 => Some(MotionMode::Rapid),
            1 => Some(MotionMode::Linear),
            2 => Some(MotionMode::ArcClockwise),
            3 => Some(MotionMode::ArcCounterClockwise),
            _ => None,
        }
    }

    /// G number of this mode
    pub const fn gcode(self) -> u16 {
        match self {
            MotionMode::Rapid => 0,
            MotionMode::Linear => 1,
            MotionMode::ArcClockwise => 2,
            MotionMode::ArcCounterClockwise => 3,
        }
    }

    /// Check if this mode may follow a `G53` on the same line
    pub const fn is_straight(self) -> bool {
        matches!(self, MotionMode::Rapid | MotionMode::Linear)
    }
}

/// Last group 1 motion mode seen by the dispatcher
///
/// Persists across lines for the lifetime of the engine. `None` until the
/// first G0-G3 is processed (unless seeded from configuration).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModalContext {
    group1: Option<MotionMode>,
}

impl ModalContext {
    /// Create a context with an optional starting mode
    pub const fn new(initial: Option<MotionMode>) -> Self {
        Self { group1: initial }
    }

    /// Current group 1 mode, if one is known
    pub fn motion(&self) -> Option<MotionMode> {
        self.group1
    }

    /// Record a G number; codes outside group 1 leave the context unchanged
    pub fn observe(&mut self, gcode: u16) {
        if let Some(mode) = MotionMode::from_gcode(gcode) {
            self.group1 = Some(mode);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gcode_mapping() {
        for number in 0..4 {
            let mode = MotionMode::from_gcode(number).unwrap();
            assert_eq!(mode.gcode(), number);
        }
        assert_eq!(MotionMode::from_gcode(4), None);
        assert_eq!(MotionMode::from_gcode(53), None);
    }

    #[test]
    fn test_straight_modes() {
        assert!(MotionMode::Rapid.is_straight());
        assert!(MotionMode::Linear.is_straight());
        assert!(!MotionMode::ArcClockwise.is_straight());
        assert!(!MotionMode::ArcCounterClockwise.is_straight());
    }

    #[test]
    fn test_observe_tracks_group1_only() {
        let mut modal = ModalContext::default();
        assert_eq!(modal.motion(), None);

        modal.observe(1);
        assert_eq!(modal.motion(), Some(MotionMode::Linear));

        // G28, G90 etc. do not change the motion mode
        modal.observe(28);
        modal.observe(90);
        assert_eq!(modal.motion(), Some(MotionMode::Linear));

        modal.observe(3);
        assert_eq!(modal.motion(), Some(MotionMode::ArcCounterClockwise));
    }

    #[test]
    fn test_seeded_context() {
        let modal = ModalContext::new(Some(MotionMode::Rapid));
        assert_eq!(modal.motion(), Some(MotionMode::Rapid));
    }
}
