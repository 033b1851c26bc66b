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

//! Listener traits notified by the event targets.
//!
//! Each trait covers one event family. Methods for the basic gestures are
//! required; the drag-and-drop and focus refinements default to no-ops so
//! simple listeners stay small.

use crate::event::InputEvent;

/// Receives mouse button and enter/exit events from a `MouseTarget`.
pub trait MouseListener {
    /// A press and release happened over the listening target.
    fn mouse_clicked(&self, event: &InputEvent);
    /// The pointer entered the listening target.
    fn mouse_entered(&self, event: &InputEvent);
    /// The pointer left the listening target.
    fn mouse_exited(&self, event: &InputEvent);
    /// A button went down over the listening target.
    fn mouse_pressed(&self, event: &InputEvent);
    /// A button went up over the listening target.
    fn mouse_released(&self, event: &InputEvent);

    /// A drag-and-drop gesture entered the listening target.
    fn mouse_drag_entered(&self, _event: &InputEvent) {}
    /// A drag-and-drop gesture left the listening target.
    fn mouse_drag_exited(&self, _event: &InputEvent) {}
    /// A drag-and-drop gesture was released over the listening target.
    fn mouse_drag_dropped(&self, _event: &InputEvent) {}
}

/// Receives pointer motion events from a `MouseMotionTarget`.
pub trait MouseMotionListener {
    /// The pointer moved with no buttons held.
    fn mouse_moved(&self, event: &InputEvent);
    /// The pointer moved with a button held.
    fn mouse_dragged(&self, event: &InputEvent);

    /// A drag-and-drop gesture moved over the listening target.
    fn mouse_drag_moved(&self, _event: &InputEvent) {}
}

/// Receives keyboard events from a `KeyTarget`.
pub trait KeyListener {
    /// A key was pressed and released while the target held focus.
    fn key_clicked(&self, event: &InputEvent);
    /// A key went down while the target held focus.
    fn key_pressed(&self, event: &InputEvent);
    /// A key went up while the target held focus.
    fn key_released(&self, event: &InputEvent);

    /// The listening target gained keyboard focus.
    fn key_focus_in(&self, _event: &InputEvent) {}
    /// The listening target lost keyboard focus.
    fn key_focus_out(&self, _event: &InputEvent) {}
}
