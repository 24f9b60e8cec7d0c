//! Input Events and Source Mapping
//!
//! The simulation consumes four discrete events and does not care where they
//! came from. Event sources (key handlers, touch gesture recognizers, tilt
//! sensors) push into an [`InputQueue`] whenever they like; the frame driver
//! drains the queue exactly once at the top of each frame, so a frame always
//! sees a consistent snapshot of everything that arrived since the last one.

use serde::{Deserialize, Serialize};

/// A discrete input event, origin-agnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Shift one lane to the left
    LaneLeft,
    /// Shift one lane to the right
    LaneRight,
    /// Request a jump
    Jump,
    /// Request a slide
    Slide,
}

/// Buffer of input events awaiting the next frame.
///
/// Events are kept in arrival order; the frame driver applies them in that
/// order, so "left, left, right" at lane 1 lands on lane 0.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an event from any source.
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Take this frame's snapshot, leaving the queue empty.
    pub fn drain_frame(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of queued events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

// =============================================================================
// SOURCE MAPPING
// =============================================================================

/// Map a keyboard key code (DOM `KeyboardEvent.code` style) to an event.
pub fn event_for_key(code: &str) -> Option<InputEvent> {
    match code {
        "ArrowLeft" | "KeyA" => Some(InputEvent::LaneLeft),
        "ArrowRight" | "KeyD" => Some(InputEvent::LaneRight),
        "Space" | "ArrowUp" | "KeyW" => Some(InputEvent::Jump),
        "ArrowDown" | "KeyS" => Some(InputEvent::Slide),
        _ => None,
    }
}

/// Swipe gesture recognizer.
///
/// A swipe shorter than `min_delta` pixels on its dominant axis is noise and
/// maps to nothing. Vertical swipes follow screen convention: negative dy is
/// upward.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SwipeMapper {
    /// Minimum pixel delta on the dominant axis
    pub min_delta: f32,
}

impl Default for SwipeMapper {
    fn default() -> Self {
        Self { min_delta: 30.0 }
    }
}

impl SwipeMapper {
    /// Map a completed swipe (total pixel delta) to an event.
    pub fn event_for_swipe(&self, dx: f32, dy: f32) -> Option<InputEvent> {
        if dx.abs() >= dy.abs() {
            if dx <= -self.min_delta {
                Some(InputEvent::LaneLeft)
            } else if dx >= self.min_delta {
                Some(InputEvent::LaneRight)
            } else {
                None
            }
        } else if dy <= -self.min_delta {
            Some(InputEvent::Jump)
        } else if dy >= self.min_delta {
            Some(InputEvent::Slide)
        } else {
            None
        }
    }
}

/// Which side a tilt is currently latched to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
enum TiltSide {
    Left,
    Right,
}

/// Device-tilt mapper with a calibratable neutral angle.
///
/// Tilt is a continuous signal, not an edge, so the mapper latches: crossing
/// the threshold emits one lane-change event, and nothing more fires until
/// the device returns inside the neutral band. `calibrate` captures the
/// current resting angle as the new neutral (the "reset tilt" affordance).
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct TiltMapper {
    /// Degrees past neutral that count as a deliberate tilt
    pub threshold_deg: f32,
    neutral_deg: f32,
    latched: Option<TiltSide>,
}

impl Default for TiltMapper {
    fn default() -> Self {
        Self {
            threshold_deg: 12.0,
            neutral_deg: 0.0,
            latched: None,
        }
    }
}

impl TiltMapper {
    /// Capture the current angle as the neutral resting position.
    pub fn calibrate(&mut self, current_deg: f32) {
        self.neutral_deg = current_deg;
        self.latched = None;
    }

    /// Feed one tilt sample (device gamma, degrees). Emits at most one event
    /// per threshold crossing.
    pub fn sample(&mut self, gamma_deg: f32) -> Option<InputEvent> {
        let offset = gamma_deg - self.neutral_deg;

        if offset.abs() < self.threshold_deg {
            self.latched = None;
            return None;
        }

        let side = if offset < 0.0 { TiltSide::Left } else { TiltSide::Right };
        if self.latched == Some(side) {
            return None;
        }
        self.latched = Some(side);

        Some(match side {
            TiltSide::Left => InputEvent::LaneLeft,
            TiltSide::Right => InputEvent::LaneRight,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_preserves_arrival_order() {
        let mut queue = InputQueue::new();
        queue.push(InputEvent::LaneLeft);
        queue.push(InputEvent::Jump);
        queue.push(InputEvent::LaneRight);

        let frame = queue.drain_frame();
        assert_eq!(
            frame,
            vec![InputEvent::LaneLeft, InputEvent::Jump, InputEvent::LaneRight]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(event_for_key("ArrowLeft"), Some(InputEvent::LaneLeft));
        assert_eq!(event_for_key("KeyD"), Some(InputEvent::LaneRight));
        assert_eq!(event_for_key("Space"), Some(InputEvent::Jump));
        assert_eq!(event_for_key("KeyS"), Some(InputEvent::Slide));
        assert_eq!(event_for_key("Escape"), None);
    }

    #[test]
    fn test_swipe_threshold() {
        let mapper = SwipeMapper { min_delta: 30.0 };

        // Below threshold: noise
        assert_eq!(mapper.event_for_swipe(10.0, 5.0), None);

        // Dominant axis wins
        assert_eq!(mapper.event_for_swipe(-45.0, 10.0), Some(InputEvent::LaneLeft));
        assert_eq!(mapper.event_for_swipe(80.0, -20.0), Some(InputEvent::LaneRight));
        assert_eq!(mapper.event_for_swipe(5.0, -60.0), Some(InputEvent::Jump));
        assert_eq!(mapper.event_for_swipe(0.0, 31.0), Some(InputEvent::Slide));
    }

    #[test]
    fn test_tilt_latches_per_crossing() {
        let mut mapper = TiltMapper::default();

        // Holding a tilt fires once
        assert_eq!(mapper.sample(20.0), Some(InputEvent::LaneRight));
        assert_eq!(mapper.sample(25.0), None);
        assert_eq!(mapper.sample(18.0), None);

        // Returning to neutral rearms
        assert_eq!(mapper.sample(2.0), None);
        assert_eq!(mapper.sample(-15.0), Some(InputEvent::LaneLeft));
    }

    #[test]
    fn test_tilt_calibration_shifts_neutral() {
        let mut mapper = TiltMapper::default();

        // Device resting at 30 degrees (e.g. propped on a stand)
        mapper.calibrate(30.0);
        assert_eq!(mapper.sample(31.0), None);
        assert_eq!(mapper.sample(45.0), Some(InputEvent::LaneRight));
        assert_eq!(mapper.sample(30.0), None);
        assert_eq!(mapper.sample(10.0), Some(InputEvent::LaneLeft));
    }
}
