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

//! Defines the input event records routed through the dispatch pipeline.

use std::cell::Cell;
use std::rc::{Rc, Weak};

use bitflags::bitflags;

use crate::event::target::EventTarget;
use crate::input::KeyCode;
use crate::math::Vec3;

bitflags! {
    /// Modifier keys and mouse buttons held down while an event was generated.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Modifiers: u32 {
        /// A shift key is held.
        const SHIFT = 1 << 0;
        /// A control key is held.
        const CTRL = 1 << 1;
        /// A meta (command / windows) key is held.
        const META = 1 << 2;
        /// An alt key is held.
        const ALT = 1 << 3;
        /// The left mouse button is held.
        const BUTTON0 = 1 << 4;
        /// The right mouse button is held.
        const BUTTON1 = 1 << 5;
        /// The middle mouse button is held.
        const BUTTON2 = 1 << 6;
        /// A fourth mouse button is held.
        const BUTTON3 = 1 << 7;
        /// Mask matching any held mouse button.
        const BUTTON_ANY = 0xF << 4;
    }
}

impl Modifiers {
    /// Returns the button flag for a zero-based mouse button index, if any.
    #[inline]
    pub fn for_button(index: u32) -> Option<Modifiers> {
        match index {
            0 => Some(Modifiers::BUTTON0),
            1 => Some(Modifiers::BUTTON1),
            2 => Some(Modifiers::BUTTON2),
            3 => Some(Modifiers::BUTTON3),
            _ => None,
        }
    }
}

/// The kind of a mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEventKind {
    /// A button went down.
    Pressed,
    /// A button went up.
    Released,
    /// A press and release happened over the same target.
    /// Synthesized by the dispatcher, never by a reader.
    Clicked,
    /// The pointer entered a target.
    Entered,
    /// The pointer left a target.
    Exited,
    /// The pointer moved with no buttons held.
    Moved,
    /// The pointer moved with at least one button held.
    Dragged,
    /// A drag-and-drop gesture entered a target.
    DragEntered,
    /// A drag-and-drop gesture left a target.
    DragExited,
    /// A drag-and-drop gesture was released over a target.
    DragDropped,
    /// A drag-and-drop gesture moved over a target.
    DragMoved,
}

/// The kind of a keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEventKind {
    /// A key was pressed and released.
    Clicked,
    /// A key went down.
    Pressed,
    /// A key went up.
    Released,
    /// A target gained keyboard focus.
    FocusIn,
    /// A target lost keyboard focus.
    FocusOut,
}

/// The mouse-specific payload of an [`InputEvent`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseEvent {
    /// What happened.
    pub kind: MouseEventKind,
    /// Absolute normalized pointer position.
    pub position: Vec3,
    /// Pointer motion since the previous mouse event. Valid only for the
    /// single event that produced it.
    pub relative: Vec3,
    /// The button flag that triggered the event, empty for pure motion.
    pub button: Modifiers,
    /// Number of consecutive clicks in this gesture.
    pub click_count: u32,
}

/// The keyboard-specific payload of an [`InputEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// What happened.
    pub kind: KeyEventKind,
    /// The physical key involved.
    pub key: KeyCode,
}

/// The payload of an [`InputEvent`], tagged by event family.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventKind {
    /// A mouse event.
    Mouse(MouseEvent),
    /// A keyboard event.
    Key(KeyEvent),
}

/// An input event routed through the queue and dispatch pipeline.
///
/// The `consumed` flag is one-way: once [`consume`](Self::consume) has been
/// called, [`is_consumed`](Self::is_consumed) returns `true` for the rest of
/// the event's life, and routing code checks it between every delivery stage
/// to decide whether to keep propagating.
#[derive(Debug, Clone)]
pub struct InputEvent {
    source: Weak<dyn EventTarget>,
    /// Modifier and button state at the time the event was generated.
    pub modifiers: Modifiers,
    consumed: Cell<bool>,
    /// The event payload.
    pub kind: EventKind,
}

impl InputEvent {
    /// Creates a new unconsumed event.
    ///
    /// `source` is a non-owning reference to whatever generated the event and
    /// may be empty for device-level events.
    pub fn new(source: Weak<dyn EventTarget>, modifiers: Modifiers, kind: EventKind) -> Self {
        Self {
            source,
            modifiers,
            consumed: Cell::new(false),
            kind,
        }
    }

    /// Creates a mouse event with no source target.
    #[inline]
    pub fn mouse(modifiers: Modifiers, mouse: MouseEvent) -> Self {
        Self::new(Weak::<NullTarget>::new(), modifiers, EventKind::Mouse(mouse))
    }

    /// Creates a keyboard event with no source target.
    #[inline]
    pub fn key(modifiers: Modifiers, key: KeyEvent) -> Self {
        Self::new(Weak::<NullTarget>::new(), modifiers, EventKind::Key(key))
    }

    /// Returns the event's source target, if it still exists.
    #[inline]
    pub fn source(&self) -> Option<Rc<dyn EventTarget>> {
        self.source.upgrade()
    }

    /// Marks the event consumed, stopping further propagation.
    #[inline]
    pub fn consume(&self) {
        self.consumed.set(true);
    }

    /// Returns `true` once the event has been consumed.
    #[inline]
    pub fn is_consumed(&self) -> bool {
        self.consumed.get()
    }

    /// The mouse payload, if this is a mouse event.
    #[inline]
    pub fn as_mouse(&self) -> Option<&MouseEvent> {
        match &self.kind {
            EventKind::Mouse(mouse) => Some(mouse),
            EventKind::Key(_) => None,
        }
    }

    /// The keyboard payload, if this is a keyboard event.
    #[inline]
    pub fn as_key(&self) -> Option<&KeyEvent> {
        match &self.kind {
            EventKind::Key(key) => Some(key),
            EventKind::Mouse(_) => None,
        }
    }
}

/// Zero-sized stand-in used to build an empty `Weak<dyn EventTarget>`.
struct NullTarget;

impl EventTarget for NullTarget {
    fn process_event(&self, _event: &InputEvent) {}
}
