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

//! The platform-independent input capture engine.
//!
//! A backend implements [`InputReader`] by embedding a [`ReaderState`] and
//! sampling its native device API once per frame inside `capture`. The
//! shared machinery here turns raw button, key, and motion changes into
//! queued [`InputEvent`]s when buffered input is enabled, and keeps the
//! immediate-mode snapshot coherent either way.

use std::collections::HashSet;
use std::rc::Rc;

use crate::error::InputError;
use crate::event::{
    Cursor, EventQueue, InputEvent, KeyEvent, KeyEventKind, Modifiers, MouseEvent, MouseEventKind,
};
use crate::input::KeyCode;
use crate::math::Vec3;

/// Immediate-mode snapshot of the mouse, refreshed once per `capture` call.
///
/// All queries between two captures observe the same values, never
/// mid-update state.
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseState {
    /// Absolute position accumulated by the backend.
    pub abs: Vec3,
    /// Motion since the previous capture.
    pub rel: Vec3,
    /// Currently held buttons.
    pub buttons: Modifiers,
}

impl MouseState {
    /// Returns `true` while the zero-based button index is held.
    #[inline]
    pub fn is_button_down(&self, index: u32) -> bool {
        Modifiers::for_button(index)
            .map(|flag| self.buttons.contains(flag))
            .unwrap_or(false)
    }
}

/// Shared state and event-synthesis machinery every reader embeds.
pub struct ReaderState {
    cursor: Cursor,
    queue: Option<Rc<EventQueue>>,
    buffered_keys: bool,
    buffered_mouse: bool,
    modifiers: Modifiers,
    mouse_state: MouseState,
    keys_down: HashSet<KeyCode>,
}

impl ReaderState {
    /// Creates state with buffering disabled and the cursor centred.
    pub fn new() -> Self {
        Self {
            cursor: Cursor::new(),
            queue: None,
            buffered_keys: false,
            buffered_mouse: false,
            modifiers: Modifiers::empty(),
            mouse_state: MouseState::default(),
            keys_down: HashSet::new(),
        }
    }

    /// Attaches an event queue and selects which families are buffered.
    pub fn use_buffered_input(&mut self, queue: Rc<EventQueue>, keys: bool, mouse: bool) {
        log::info!("Buffered input enabled (keys: {keys}, mouse: {mouse}).");
        self.queue = Some(queue);
        self.buffered_keys = keys;
        self.buffered_mouse = mouse;
    }

    /// Reselects the buffered families without touching the queue.
    pub fn set_buffered_input(&mut self, keys: bool, mouse: bool) {
        self.buffered_keys = keys;
        self.buffered_mouse = mouse;
    }

    /// Returns `true` while key events are buffered.
    #[inline]
    pub fn is_buffering_keys(&self) -> bool {
        self.buffered_keys
    }

    /// Returns `true` while mouse events are buffered.
    #[inline]
    pub fn is_buffering_mouse(&self) -> bool {
        self.buffered_mouse
    }

    /// The cursor accumulating normalized pointer motion.
    #[inline]
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Mutable access to the cursor, for backends feeding deltas and for
    /// configuration of scale and limits.
    #[inline]
    pub fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }

    /// The modifier and button state as of the last change.
    #[inline]
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// The immediate-mode mouse snapshot.
    #[inline]
    pub fn mouse_state(&self) -> &MouseState {
        &self.mouse_state
    }

    /// Mutable access to the immediate-mode snapshot, for backends.
    #[inline]
    pub fn mouse_state_mut(&mut self) -> &mut MouseState {
        &mut self.mouse_state
    }

    /// The set of keys currently held, maintained while keys are buffered.
    #[inline]
    pub fn buffered_keys_down(&self) -> &HashSet<KeyCode> {
        &self.keys_down
    }

    /// Records a mouse button transition and synthesizes the press or
    /// release event.
    ///
    /// Click synthesis is deliberately left to the dispatcher, which knows
    /// whether press and release happened over the same target; emitting
    /// clicks here as well would double them up.
    pub fn trigger_mouse_button(&mut self, button_index: u32, pressed: bool) {
        let Some(flag) = Modifiers::for_button(button_index) else {
            log::trace!("Ignoring unmapped mouse button {button_index}.");
            return;
        };
        if pressed {
            self.modifiers.insert(flag);
            self.mouse_state.buttons.insert(flag);
            self.create_mouse_event(MouseEventKind::Pressed, flag);
        } else {
            self.modifiers.remove(flag);
            self.mouse_state.buttons.remove(flag);
            self.create_mouse_event(MouseEventKind::Released, flag);
        }
    }

    /// Records pointer motion, synthesizing a drag event while any button
    /// is held and a move event otherwise.
    pub fn mouse_moved(&mut self) {
        let kind = if self.modifiers.intersects(Modifiers::BUTTON_ANY) {
            MouseEventKind::Dragged
        } else {
            MouseEventKind::Moved
        };
        self.create_mouse_event(kind, Modifiers::empty());
    }

    /// Records a key transition, maintaining the modifier masks and the
    /// held-keys set and synthesizing the matching key events.
    pub fn key_changed(&mut self, key: KeyCode, down: bool) {
        let modifier = match key {
            KeyCode::LShift | KeyCode::RShift => Some(Modifiers::SHIFT),
            KeyCode::LControl | KeyCode::RControl => Some(Modifiers::CTRL),
            KeyCode::LAlt | KeyCode::RAlt => Some(Modifiers::ALT),
            _ => None,
        };
        if down {
            if let Some(m) = modifier {
                self.modifiers.insert(m);
            }
            self.create_key_event(KeyEventKind::Pressed, key);
            self.keys_down.insert(key);
        } else {
            if let Some(m) = modifier {
                self.modifiers.remove(m);
            }
            self.create_key_event(KeyEventKind::Released, key);
            self.create_key_event(KeyEventKind::Clicked, key);
            self.keys_down.remove(&key);
        }
    }

    /// Builds a mouse event from the cursor's current state, routes it
    /// through the cursor (which resets the relative deltas), and queues it
    /// when mouse buffering is on.
    pub fn create_mouse_event(&mut self, kind: MouseEventKind, button: Modifiers) {
        let event = InputEvent::mouse(
            self.modifiers,
            MouseEvent {
                kind,
                position: self.cursor.position(),
                relative: self.cursor.relative(),
                button,
                click_count: 0,
            },
        );
        self.cursor.process_event(&event);
        if self.buffered_mouse {
            if let Some(queue) = &self.queue {
                queue.push(event);
            }
        }
    }

    /// Builds a key event and queues it when key buffering is on.
    pub fn create_key_event(&mut self, kind: KeyEventKind, key: KeyCode) {
        if self.buffered_keys {
            if let Some(queue) = &self.queue {
                let event = InputEvent::key(self.modifiers, KeyEvent { kind, key });
                queue.push(event);
            }
        }
    }
}

impl Default for ReaderState {
    fn default() -> Self {
        Self::new()
    }
}

/// Abstracts over a platform input backend.
///
/// `capture` must be called exactly once per frame and is the only point at
/// which backend state is sampled; every immediate-mode query between two
/// captures observes a consistent snapshot.
pub trait InputReader {
    /// The shared reader state the backend embeds.
    fn state(&self) -> &ReaderState;

    /// Mutable access to the shared reader state.
    fn state_mut(&mut self) -> &mut ReaderState;

    /// Samples the backend once. In buffered mode this also synthesizes and
    /// queues the input events derived from the sampled changes.
    fn capture(&mut self);

    /// Immediate-mode key query against the backend's latest snapshot.
    fn is_key_down_immediate(&self, key: KeyCode) -> bool;

    /// Prepares the backend devices.
    ///
    /// Game controller capture has no implementation yet in any backend, so
    /// requesting it fails rather than silently doing nothing.
    fn initialize(
        &mut self,
        use_keyboard: bool,
        use_mouse: bool,
        use_game_controller: bool,
    ) -> Result<(), InputError> {
        let _ = (use_keyboard, use_mouse);
        if use_game_controller {
            return Err(InputError::NotImplemented {
                capability: "game controller capture".to_string(),
            });
        }
        Ok(())
    }

    /// Attaches an event queue and enables buffering per family.
    fn use_buffered_input(&mut self, queue: Rc<EventQueue>, keys: bool, mouse: bool) {
        self.state_mut().use_buffered_input(queue, keys, mouse);
    }

    /// Reselects which families are buffered.
    fn set_buffered_input(&mut self, keys: bool, mouse: bool) {
        self.state_mut().set_buffered_input(keys, mouse);
    }

    /// Returns `true` while the key is held. Uses the buffered held-keys
    /// set when key buffering is on, the backend snapshot otherwise.
    fn is_key_down(&self, key: KeyCode) -> bool {
        if self.state().is_buffering_keys() {
            self.state().buffered_keys_down().contains(&key)
        } else {
            self.is_key_down_immediate(key)
        }
    }

    /// The pointer's absolute position: the normalized cursor in buffered
    /// mode, the backend snapshot otherwise.
    fn mouse_absolute(&self) -> Vec3 {
        if self.state().is_buffering_mouse() {
            self.state().cursor().position()
        } else {
            self.state().mouse_state().abs
        }
    }

    /// The pointer's motion for the current event or frame.
    fn mouse_relative(&self) -> Vec3 {
        if self.state().is_buffering_mouse() {
            self.state().cursor().relative()
        } else {
            self.state().mouse_state().rel
        }
    }

    /// Returns `true` while the zero-based button index is held.
    fn is_mouse_button_down(&self, index: u32) -> bool {
        self.state().mouse_state().is_button_down(index)
    }

    /// The factor applied to incoming pointer deltas.
    fn mouse_scale(&self) -> f32 {
        self.state().cursor().scale()
    }

    /// Sets the factor applied to incoming pointer deltas.
    fn set_mouse_scale(&mut self, scale: f32) {
        self.state_mut().cursor_mut().set_scale(scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal backend that only exercises the shared machinery.
    struct TestReader {
        state: ReaderState,
        immediate_keys: HashSet<KeyCode>,
    }

    impl TestReader {
        fn new() -> Self {
            Self {
                state: ReaderState::new(),
                immediate_keys: HashSet::new(),
            }
        }
    }

    impl InputReader for TestReader {
        fn state(&self) -> &ReaderState {
            &self.state
        }

        fn state_mut(&mut self) -> &mut ReaderState {
            &mut self.state
        }

        fn capture(&mut self) {}

        fn is_key_down_immediate(&self, key: KeyCode) -> bool {
            self.immediate_keys.contains(&key)
        }
    }

    fn buffered_reader() -> (TestReader, Rc<EventQueue>) {
        let queue = Rc::new(EventQueue::new());
        queue.set_activate(true);
        let mut reader = TestReader::new();
        reader.use_buffered_input(Rc::clone(&queue), true, true);
        (reader, queue)
    }

    fn drain_mouse_kinds(queue: &EventQueue) -> Vec<MouseEventKind> {
        std::iter::from_fn(|| queue.pop())
            .map(|e| e.as_mouse().unwrap().kind)
            .collect()
    }

    #[test]
    fn button_press_drag_release_sequence() {
        let (mut reader, queue) = buffered_reader();

        reader.state_mut().trigger_mouse_button(0, true);
        assert!(reader.state().modifiers().contains(Modifiers::BUTTON0));

        reader.state_mut().cursor_mut().add_to_x(0.1);
        reader.state_mut().mouse_moved();

        reader.state_mut().trigger_mouse_button(0, false);
        assert!(!reader.state().modifiers().contains(Modifiers::BUTTON0));

        // No click here: the dispatcher synthesizes clicks, not the reader.
        assert_eq!(
            drain_mouse_kinds(&queue),
            vec![
                MouseEventKind::Pressed,
                MouseEventKind::Dragged,
                MouseEventKind::Released
            ]
        );
    }

    #[test]
    fn motion_without_buttons_is_moved() {
        let (mut reader, queue) = buffered_reader();
        reader.state_mut().cursor_mut().add_to_y(0.05);
        reader.state_mut().mouse_moved();
        assert_eq!(drain_mouse_kinds(&queue), vec![MouseEventKind::Moved]);
    }

    #[test]
    fn mouse_event_carries_cursor_state_then_rel_resets() {
        let (mut reader, queue) = buffered_reader();
        reader.state_mut().cursor_mut().add_to_x(0.2);
        reader.state_mut().mouse_moved();

        let event = queue.pop().unwrap();
        let mouse = event.as_mouse().unwrap();
        assert!((mouse.position.x - 0.7).abs() < 1e-6);
        assert!((mouse.relative.x - 0.2).abs() < 1e-6);
        // The cursor gave its relative motion to that one event.
        assert_eq!(reader.state().cursor().relative(), Vec3::ZERO);
    }

    #[test]
    fn key_lifecycle_and_buffered_query() {
        let (mut reader, queue) = buffered_reader();

        reader.state_mut().key_changed(KeyCode::A, true);
        assert!(reader.is_key_down(KeyCode::A));

        reader.state_mut().key_changed(KeyCode::A, false);
        assert!(!reader.is_key_down(KeyCode::A));

        let kinds: Vec<_> = std::iter::from_fn(|| queue.pop())
            .map(|e| e.as_key().unwrap().kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                KeyEventKind::Pressed,
                KeyEventKind::Released,
                KeyEventKind::Clicked
            ]
        );
    }

    #[test]
    fn shift_maintains_modifier_mask() {
        let (mut reader, queue) = buffered_reader();
        reader.state_mut().key_changed(KeyCode::LShift, true);
        reader.state_mut().key_changed(KeyCode::A, true);

        let _shift_pressed = queue.pop().unwrap();
        let a_pressed = queue.pop().unwrap();
        assert!(a_pressed.modifiers.contains(Modifiers::SHIFT));
        assert_eq!(
            a_pressed.as_key().unwrap().key.to_char(a_pressed.modifiers),
            Some('A')
        );

        reader.state_mut().key_changed(KeyCode::LShift, false);
        assert!(!reader.state().modifiers().contains(Modifiers::SHIFT));
    }

    #[test]
    fn immediate_query_used_when_not_buffering() {
        let mut reader = TestReader::new();
        reader.immediate_keys.insert(KeyCode::Space);
        assert!(reader.is_key_down(KeyCode::Space));
        assert!(!reader.is_key_down(KeyCode::Q));
    }

    #[test]
    fn game_controller_request_is_rejected() {
        let mut reader = TestReader::new();
        assert!(reader.initialize(true, true, false).is_ok());
        let err = reader.initialize(true, true, true).unwrap_err();
        assert!(matches!(err, InputError::NotImplemented { .. }));
    }
}
