// Copyright 2026 the Veld contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Tracks the normalized pointer position accumulated from device deltas.

use crate::error::InputError;
use crate::event::target::{MouseMotionTarget, MouseTarget};
use crate::event::{InputEvent, MouseEventKind};
use crate::math::{clamp, Vec3};

/// Accumulates raw pointer deltas into a clamped, normalized position.
///
/// Each axis is clamped to its own `[low, high]` limits, `[0, 1]` by
/// default. Incoming deltas are scaled by a configurable factor before
/// accumulation. The relative deltas are valid only for the single event
/// that produced them and are reset to zero after each `process_event`.
///
/// The cursor is itself an event receiver: it composes mouse and motion
/// listener sets so interested code (crosshair overlays, pointer-lock
/// handling) can observe cursor traffic directly.
pub struct Cursor {
    position: Vec3,
    relative: Vec3,
    scale: f32,
    limits: [(f32, f32); 3],
    mouse_target: MouseTarget,
    motion_target: MouseMotionTarget,
}

impl Cursor {
    /// Creates a cursor centred at `(0.5, 0.5, 0.5)` with unit scale and
    /// `[0, 1]` limits on every axis.
    pub fn new() -> Self {
        Self {
            position: Vec3::new(0.5, 0.5, 0.5),
            relative: Vec3::ZERO,
            scale: 1.0,
            limits: [(0.0, 1.0); 3],
            mouse_target: MouseTarget::new(),
            motion_target: MouseMotionTarget::new(),
        }
    }

    /// The absolute normalized position.
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// The scaled deltas of the most recent accumulation, zero once the
    /// event that carried them has been processed.
    #[inline]
    pub fn relative(&self) -> Vec3 {
        self.relative
    }

    /// The absolute x position.
    #[inline]
    pub fn x(&self) -> f32 {
        self.position.x
    }

    /// The absolute y position.
    #[inline]
    pub fn y(&self) -> f32 {
        self.position.y
    }

    /// The absolute z (wheel) position.
    #[inline]
    pub fn z(&self) -> f32 {
        self.position.z
    }

    /// The scaled x delta of the most recent accumulation.
    #[inline]
    pub fn rel_x(&self) -> f32 {
        self.relative.x
    }

    /// The scaled y delta of the most recent accumulation.
    #[inline]
    pub fn rel_y(&self) -> f32 {
        self.relative.y
    }

    /// The scaled z delta of the most recent accumulation.
    #[inline]
    pub fn rel_z(&self) -> f32 {
        self.relative.z
    }

    /// The factor applied to all incoming deltas.
    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Sets the factor applied to all incoming deltas.
    #[inline]
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    /// Sets the clamp range for the x axis.
    pub fn set_x_limits(&mut self, low: f32, high: f32) -> Result<(), InputError> {
        self.set_limits(0, low, high)
    }

    /// Sets the clamp range for the y axis.
    pub fn set_y_limits(&mut self, low: f32, high: f32) -> Result<(), InputError> {
        self.set_limits(1, low, high)
    }

    /// Sets the clamp range for the z axis.
    pub fn set_z_limits(&mut self, low: f32, high: f32) -> Result<(), InputError> {
        self.set_limits(2, low, high)
    }

    fn set_limits(&mut self, axis: usize, low: f32, high: f32) -> Result<(), InputError> {
        if low > high || !low.is_finite() || !high.is_finite() {
            return Err(InputError::InvalidParameters {
                details: format!("cursor axis limits [{low}, {high}]"),
            });
        }
        self.limits[axis] = (low, high);
        self.position[axis] = clamp(self.position[axis], low, high);
        Ok(())
    }

    /// Accumulates an x delta, scaling it and clamping the result.
    /// The stored relative delta is the scaled delta, unclamped.
    pub fn add_to_x(&mut self, delta: f32) {
        self.add_to_axis(0, delta);
    }

    /// Accumulates a y delta, scaling it and clamping the result.
    pub fn add_to_y(&mut self, delta: f32) {
        self.add_to_axis(1, delta);
    }

    /// Accumulates a z (wheel) delta, scaling it and clamping the result.
    pub fn add_to_z(&mut self, delta: f32) {
        self.add_to_axis(2, delta);
    }

    fn add_to_axis(&mut self, axis: usize, delta: f32) {
        let scaled = delta * self.scale;
        let (low, high) = self.limits[axis];
        self.relative[axis] = scaled;
        self.position[axis] = clamp(self.position[axis] + scaled, low, high);
    }

    /// The listener set observing cursor button and enter/exit events.
    #[inline]
    pub fn mouse_target(&self) -> &MouseTarget {
        &self.mouse_target
    }

    /// The listener set observing cursor motion events.
    #[inline]
    pub fn motion_target(&self) -> &MouseMotionTarget {
        &self.motion_target
    }

    /// Routes a mouse event to the cursor's own listener sets, then resets
    /// the relative deltas. Relative motion is valid only for the single
    /// event that produced it, never across events.
    pub fn process_event(&mut self, event: &InputEvent) {
        if let Some(mouse) = event.as_mouse() {
            match mouse.kind {
                MouseEventKind::Moved | MouseEventKind::Dragged | MouseEventKind::DragMoved => {
                    self.motion_target.process_mouse_motion_event(event);
                }
                _ => {
                    self.mouse_target.process_mouse_event(event);
                }
            }
            self.relative = Vec3::ZERO;
        }
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Modifiers, MouseEvent};
    use crate::math::approx_eq;

    fn motion_event(cursor: &Cursor) -> InputEvent {
        InputEvent::mouse(
            Modifiers::empty(),
            MouseEvent {
                kind: MouseEventKind::Moved,
                position: cursor.position(),
                relative: cursor.relative(),
                button: Modifiers::empty(),
                click_count: 0,
            },
        )
    }

    #[test]
    fn accumulates_and_clamps() {
        let mut cursor = Cursor::new();
        cursor.add_to_x(0.3);
        assert!(approx_eq(cursor.x(), 0.8));
        assert!(approx_eq(cursor.rel_x(), 0.3));

        // The position saturates at the limit; the delta itself is unclamped.
        cursor.add_to_x(1.0);
        assert!(approx_eq(cursor.x(), 1.0));
        assert!(approx_eq(cursor.rel_x(), 1.0));

        cursor.add_to_y(-2.0);
        assert!(approx_eq(cursor.y(), 0.0));
        assert!(approx_eq(cursor.rel_y(), -2.0));
    }

    #[test]
    fn scale_applies_to_deltas() {
        let mut cursor = Cursor::new();
        cursor.set_scale(0.5);
        cursor.add_to_x(0.4);
        assert!(approx_eq(cursor.x(), 0.7));
        assert!(approx_eq(cursor.rel_x(), 0.2));
    }

    #[test]
    fn relative_resets_after_process_event() {
        let mut cursor = Cursor::new();
        cursor.add_to_x(0.1);
        cursor.add_to_y(-0.2);
        let event = motion_event(&cursor);
        cursor.process_event(&event);
        assert_eq!(cursor.relative(), Vec3::ZERO);
        // The absolute position is untouched by processing.
        assert!(approx_eq(cursor.x(), 0.6));
        assert!(approx_eq(cursor.y(), 0.3));
    }

    #[test]
    fn limits_validation() {
        let mut cursor = Cursor::new();
        assert!(cursor.set_x_limits(0.25, 0.75).is_ok());
        assert!(cursor.set_x_limits(1.0, 0.0).is_err());
        assert!(cursor.set_y_limits(0.0, f32::NAN).is_err());

        // Tightening limits pulls the current position back in range.
        assert!(approx_eq(cursor.x(), 0.5));
        cursor.add_to_x(5.0);
        assert!(approx_eq(cursor.x(), 0.75));
    }
}
