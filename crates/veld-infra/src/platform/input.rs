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

//! Provides translation from a concrete windowing backend (`winit`) to the
//! engine's raw input changes, and an `InputReader` built on them.
//!
//! This module acts as an adapter layer, decoupling the rest of the engine
//! from the specific input event format of the `winit` crate.

use std::collections::HashSet;

use veld_core::input::{InputReader, KeyCode, ReaderState};
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

/// Wheel lines are small compared to the normalized [0, 1] z axis, so each
/// line moves the cursor by this fraction.
const WHEEL_STEP: f32 = 0.05;

/// A backend-agnostic raw input change, one winit window event's worth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawInput {
    /// A keyboard key went down or up.
    KeyChanged {
        /// The physical key that changed.
        key: KeyCode,
        /// `true` for press, `false` for release.
        down: bool,
    },
    /// A mouse button went down or up.
    ButtonChanged {
        /// Zero-based button index (left 0, right 1, middle 2, back 3).
        button: u32,
        /// `true` for press, `false` for release.
        down: bool,
    },
    /// The pointer moved to a normalized window position.
    PointerAt {
        /// Horizontal position in `[0, 1]`.
        x: f32,
        /// Vertical position in `[0, 1]`.
        y: f32,
    },
    /// The wheel scrolled by a number of lines.
    WheelScrolled {
        /// Positive values scroll away from the user.
        lines: f32,
    },
}

/// Translates a `winit::event::WindowEvent` into a [`RawInput`] change.
///
/// Pointer positions arrive in physical pixels and are normalized against
/// `window_size`. Events that are not direct user input (resizing, focus
/// changes), key repeats, and buttons past the fourth are dropped.
pub fn translate_window_event(event: &WindowEvent, window_size: (f32, f32)) -> Option<RawInput> {
    match event {
        WindowEvent::KeyboardInput {
            event: key_event, ..
        } => {
            if let PhysicalKey::Code(keycode) = key_event.physical_key {
                match key_event.state {
                    ElementState::Pressed if !key_event.repeat => Some(RawInput::KeyChanged {
                        key: map_keycode(keycode),
                        down: true,
                    }),
                    ElementState::Released => Some(RawInput::KeyChanged {
                        key: map_keycode(keycode),
                        down: false,
                    }),
                    _ => None,
                }
            } else {
                None
            }
        }
        WindowEvent::CursorMoved { position, .. } => {
            let (width, height) = window_size;
            if width <= 0.0 || height <= 0.0 {
                return None;
            }
            Some(RawInput::PointerAt {
                x: position.x as f32 / width,
                y: position.y as f32 / height,
            })
        }
        WindowEvent::MouseInput { state, button, .. } => {
            map_mouse_button(*button).map(|button| RawInput::ButtonChanged {
                button,
                down: *state == ElementState::Pressed,
            })
        }
        WindowEvent::MouseWheel { delta, .. } => {
            let lines = match delta {
                MouseScrollDelta::LineDelta(_, y) => *y,
                // Pixel deltas come from touchpads; approximate a line as
                // 20 physical pixels.
                MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 20.0,
            };
            if lines != 0.0 {
                Some(RawInput::WheelScrolled { lines })
            } else {
                None
            }
        }
        _ => None,
    }
}

/// An [`InputReader`] fed by winit window events.
///
/// Window events are buffered as they arrive via
/// [`handle_window_event`](Self::handle_window_event) and applied to the
/// shared reader state in the next [`capture`](InputReader::capture) call,
/// so immediate-mode queries between two captures observe one consistent
/// snapshot rather than mid-frame values.
pub struct WinitInputReader {
    state: ReaderState,
    pending: Vec<RawInput>,
    held_keys: HashSet<KeyCode>,
    window_size: (f32, f32),
}

impl WinitInputReader {
    /// Creates a reader for a window of the given physical size in pixels.
    pub fn new(window_size: (f32, f32)) -> Self {
        Self {
            state: ReaderState::new(),
            pending: Vec::new(),
            held_keys: HashSet::new(),
            window_size,
        }
    }

    /// Buffers one window event for the next capture. Resize events update
    /// the normalization basis immediately.
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        if let WindowEvent::Resized(size) = event {
            self.window_size = (size.width as f32, size.height as f32);
            return;
        }
        if let Some(raw) = translate_window_event(event, self.window_size) {
            self.pending.push(raw);
        }
    }

    /// Applies one buffered change to the reader state.
    fn apply(&mut self, raw: RawInput) {
        match raw {
            RawInput::KeyChanged { key, down } => {
                if key.is_unassigned() {
                    log::trace!("Dropping unmapped key transition.");
                    return;
                }
                if down {
                    self.held_keys.insert(key);
                } else {
                    self.held_keys.remove(&key);
                }
                self.state.key_changed(key, down);
            }
            RawInput::ButtonChanged { button, down } => {
                self.state.trigger_mouse_button(button, down);
            }
            RawInput::PointerAt { x, y } => {
                let pos = self.state.cursor().position();
                let (dx, dy) = (x - pos.x, y - pos.y);
                self.state.cursor_mut().add_to_x(dx);
                self.state.cursor_mut().add_to_y(dy);
                let mouse = self.state.mouse_state_mut();
                mouse.rel.x += dx;
                mouse.rel.y += dy;
                self.state.mouse_moved();
            }
            RawInput::WheelScrolled { lines } => {
                let dz = lines * WHEEL_STEP;
                self.state.cursor_mut().add_to_z(dz);
                self.state.mouse_state_mut().rel.z += dz;
                self.state.mouse_moved();
            }
        }
    }
}

impl InputReader for WinitInputReader {
    fn state(&self) -> &ReaderState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ReaderState {
        &mut self.state
    }

    fn capture(&mut self) {
        self.state.mouse_state_mut().rel = veld_core::math::Vec3::ZERO;
        let pending = std::mem::take(&mut self.pending);
        for raw in pending {
            self.apply(raw);
        }
        let pos = self.state.cursor().position();
        self.state.mouse_state_mut().abs = pos;
    }

    fn is_key_down_immediate(&self, key: KeyCode) -> bool {
        self.held_keys.contains(&key)
    }
}

// --- Private Helper Functions ---

/// (Internal) Maps a `winit` mouse button to a zero-based index.
fn map_mouse_button(button: MouseButton) -> Option<u32> {
    match button {
        MouseButton::Left => Some(0),
        MouseButton::Right => Some(1),
        MouseButton::Middle => Some(2),
        MouseButton::Back => Some(3),
        _ => None,
    }
}

/// (Internal) Maps a `winit` key code onto the engine's key space.
/// Keys without a counterpart become `KeyCode::Unassigned`.
fn map_keycode(keycode: WinitKeyCode) -> KeyCode {
    match keycode {
        WinitKeyCode::Escape => KeyCode::Escape,
        WinitKeyCode::Digit1 => KeyCode::Digit1,
        WinitKeyCode::Digit2 => KeyCode::Digit2,
        WinitKeyCode::Digit3 => KeyCode::Digit3,
        WinitKeyCode::Digit4 => KeyCode::Digit4,
        WinitKeyCode::Digit5 => KeyCode::Digit5,
        WinitKeyCode::Digit6 => KeyCode::Digit6,
        WinitKeyCode::Digit7 => KeyCode::Digit7,
        WinitKeyCode::Digit8 => KeyCode::Digit8,
        WinitKeyCode::Digit9 => KeyCode::Digit9,
        WinitKeyCode::Digit0 => KeyCode::Digit0,
        WinitKeyCode::Minus => KeyCode::Minus,
        WinitKeyCode::Equal => KeyCode::Equals,
        WinitKeyCode::Backspace => KeyCode::Backspace,
        WinitKeyCode::Tab => KeyCode::Tab,
        WinitKeyCode::KeyQ => KeyCode::Q,
        WinitKeyCode::KeyW => KeyCode::W,
        WinitKeyCode::KeyE => KeyCode::E,
        WinitKeyCode::KeyR => KeyCode::R,
        WinitKeyCode::KeyT => KeyCode::T,
        WinitKeyCode::KeyY => KeyCode::Y,
        WinitKeyCode::KeyU => KeyCode::U,
        WinitKeyCode::KeyI => KeyCode::I,
        WinitKeyCode::KeyO => KeyCode::O,
        WinitKeyCode::KeyP => KeyCode::P,
        WinitKeyCode::BracketLeft => KeyCode::LBracket,
        WinitKeyCode::BracketRight => KeyCode::RBracket,
        WinitKeyCode::Enter => KeyCode::Return,
        WinitKeyCode::ControlLeft => KeyCode::LControl,
        WinitKeyCode::KeyA => KeyCode::A,
        WinitKeyCode::KeyS => KeyCode::S,
        WinitKeyCode::KeyD => KeyCode::D,
        WinitKeyCode::KeyF => KeyCode::F,
        WinitKeyCode::KeyG => KeyCode::G,
        WinitKeyCode::KeyH => KeyCode::H,
        WinitKeyCode::KeyJ => KeyCode::J,
        WinitKeyCode::KeyK => KeyCode::K,
        WinitKeyCode::KeyL => KeyCode::L,
        WinitKeyCode::Semicolon => KeyCode::Semicolon,
        WinitKeyCode::Quote => KeyCode::Apostrophe,
        WinitKeyCode::Backquote => KeyCode::Grave,
        WinitKeyCode::ShiftLeft => KeyCode::LShift,
        WinitKeyCode::Backslash => KeyCode::Backslash,
        WinitKeyCode::KeyZ => KeyCode::Z,
        WinitKeyCode::KeyX => KeyCode::X,
        WinitKeyCode::KeyC => KeyCode::C,
        WinitKeyCode::KeyV => KeyCode::V,
        WinitKeyCode::KeyB => KeyCode::B,
        WinitKeyCode::KeyN => KeyCode::N,
        WinitKeyCode::KeyM => KeyCode::M,
        WinitKeyCode::Comma => KeyCode::Comma,
        WinitKeyCode::Period => KeyCode::Period,
        WinitKeyCode::Slash => KeyCode::Slash,
        WinitKeyCode::ShiftRight => KeyCode::RShift,
        WinitKeyCode::NumpadMultiply => KeyCode::Multiply,
        WinitKeyCode::AltLeft => KeyCode::LAlt,
        WinitKeyCode::Space => KeyCode::Space,
        WinitKeyCode::CapsLock => KeyCode::CapsLock,
        WinitKeyCode::F1 => KeyCode::F1,
        WinitKeyCode::F2 => KeyCode::F2,
        WinitKeyCode::F3 => KeyCode::F3,
        WinitKeyCode::F4 => KeyCode::F4,
        WinitKeyCode::F5 => KeyCode::F5,
        WinitKeyCode::F6 => KeyCode::F6,
        WinitKeyCode::F7 => KeyCode::F7,
        WinitKeyCode::F8 => KeyCode::F8,
        WinitKeyCode::F9 => KeyCode::F9,
        WinitKeyCode::F10 => KeyCode::F10,
        WinitKeyCode::NumLock => KeyCode::NumLock,
        WinitKeyCode::ScrollLock => KeyCode::ScrollLock,
        WinitKeyCode::Numpad7 => KeyCode::Numpad7,
        WinitKeyCode::Numpad8 => KeyCode::Numpad8,
        WinitKeyCode::Numpad9 => KeyCode::Numpad9,
        WinitKeyCode::NumpadSubtract => KeyCode::Subtract,
        WinitKeyCode::Numpad4 => KeyCode::Numpad4,
        WinitKeyCode::Numpad5 => KeyCode::Numpad5,
        WinitKeyCode::Numpad6 => KeyCode::Numpad6,
        WinitKeyCode::NumpadAdd => KeyCode::Add,
        WinitKeyCode::Numpad1 => KeyCode::Numpad1,
        WinitKeyCode::Numpad2 => KeyCode::Numpad2,
        WinitKeyCode::Numpad3 => KeyCode::Numpad3,
        WinitKeyCode::Numpad0 => KeyCode::Numpad0,
        WinitKeyCode::NumpadDecimal => KeyCode::Decimal,
        WinitKeyCode::F11 => KeyCode::F11,
        WinitKeyCode::F12 => KeyCode::F12,
        WinitKeyCode::F13 => KeyCode::F13,
        WinitKeyCode::F14 => KeyCode::F14,
        WinitKeyCode::F15 => KeyCode::F15,
        WinitKeyCode::NumpadEqual => KeyCode::NumpadEquals,
        WinitKeyCode::NumpadEnter => KeyCode::NumpadEnter,
        WinitKeyCode::ControlRight => KeyCode::RControl,
        WinitKeyCode::NumpadComma => KeyCode::NumpadComma,
        WinitKeyCode::NumpadDivide => KeyCode::Divide,
        WinitKeyCode::AltRight => KeyCode::RAlt,
        WinitKeyCode::Pause => KeyCode::Pause,
        WinitKeyCode::Home => KeyCode::Home,
        WinitKeyCode::ArrowUp => KeyCode::Up,
        WinitKeyCode::PageUp => KeyCode::PageUp,
        WinitKeyCode::ArrowLeft => KeyCode::Left,
        WinitKeyCode::ArrowRight => KeyCode::Right,
        WinitKeyCode::End => KeyCode::End,
        WinitKeyCode::ArrowDown => KeyCode::Down,
        WinitKeyCode::PageDown => KeyCode::PageDown,
        WinitKeyCode::Insert => KeyCode::Insert,
        WinitKeyCode::Delete => KeyCode::Delete,
        WinitKeyCode::SuperLeft => KeyCode::LWin,
        WinitKeyCode::SuperRight => KeyCode::RWin,
        WinitKeyCode::ContextMenu => KeyCode::Apps,
        WinitKeyCode::MediaTrackPrevious => KeyCode::PrevTrack,
        WinitKeyCode::MediaTrackNext => KeyCode::NextTrack,
        WinitKeyCode::AudioVolumeMute => KeyCode::Mute,
        WinitKeyCode::AudioVolumeDown => KeyCode::VolumeDown,
        WinitKeyCode::AudioVolumeUp => KeyCode::VolumeUp,
        WinitKeyCode::MediaPlayPause => KeyCode::PlayPause,
        WinitKeyCode::MediaStop => KeyCode::MediaStop,
        WinitKeyCode::IntlBackslash => KeyCode::Oem102,
        WinitKeyCode::IntlYen => KeyCode::Yen,
        WinitKeyCode::Convert => KeyCode::Convert,
        WinitKeyCode::NonConvert => KeyCode::NoConvert,
        WinitKeyCode::KanaMode => KeyCode::Kana,
        _ => KeyCode::Unassigned,
    }
}

// --- Unit Tests for Input Translation ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use veld_core::event::{EventQueue, MouseEventKind};
    use winit::dpi::PhysicalPosition;

    const SIZE: (f32, f32) = (800.0, 600.0);

    #[test]
    fn test_map_keycode() {
        assert_eq!(map_keycode(WinitKeyCode::KeyA), KeyCode::A);
        assert_eq!(map_keycode(WinitKeyCode::Digit1), KeyCode::Digit1);
        assert_eq!(map_keycode(WinitKeyCode::ArrowUp), KeyCode::Up);
        assert_eq!(map_keycode(WinitKeyCode::Fn), KeyCode::Unassigned);
    }

    #[test]
    fn test_map_mouse_button() {
        assert_eq!(map_mouse_button(MouseButton::Left), Some(0));
        assert_eq!(map_mouse_button(MouseButton::Right), Some(1));
        assert_eq!(map_mouse_button(MouseButton::Middle), Some(2));
        assert_eq!(map_mouse_button(MouseButton::Back), Some(3));
        assert_eq!(map_mouse_button(MouseButton::Other(12)), None);
    }

    #[test]
    fn test_translate_mouse_button_pressed() {
        let winit_event = WindowEvent::MouseInput {
            device_id: winit::event::DeviceId::dummy(),
            state: ElementState::Pressed,
            button: MouseButton::Left,
        };
        assert_eq!(
            translate_window_event(&winit_event, SIZE),
            Some(RawInput::ButtonChanged {
                button: 0,
                down: true
            })
        );
    }

    #[test]
    fn test_translate_cursor_moved_normalizes() {
        let winit_event = WindowEvent::CursorMoved {
            device_id: winit::event::DeviceId::dummy(),
            position: PhysicalPosition::new(400.0, 150.0),
        };
        assert_eq!(
            translate_window_event(&winit_event, SIZE),
            Some(RawInput::PointerAt { x: 0.5, y: 0.25 })
        );
    }

    #[test]
    fn test_translate_mouse_wheel_line() {
        let winit_event = WindowEvent::MouseWheel {
            device_id: winit::event::DeviceId::dummy(),
            delta: MouseScrollDelta::LineDelta(0.0, 2.0),
            phase: winit::event::TouchPhase::Moved,
        };
        assert_eq!(
            translate_window_event(&winit_event, SIZE),
            Some(RawInput::WheelScrolled { lines: 2.0 })
        );

        let still = WindowEvent::MouseWheel {
            device_id: winit::event::DeviceId::dummy(),
            delta: MouseScrollDelta::LineDelta(0.0, 0.0),
            phase: winit::event::TouchPhase::Moved,
        };
        assert_eq!(translate_window_event(&still, SIZE), None);
    }

    #[test]
    fn capture_applies_buffered_events_in_order() {
        let queue = Rc::new(EventQueue::new());
        queue.set_activate(true);
        let mut reader = WinitInputReader::new(SIZE);
        reader.use_buffered_input(Rc::clone(&queue), true, true);

        reader.handle_window_event(&WindowEvent::MouseInput {
            device_id: winit::event::DeviceId::dummy(),
            state: ElementState::Pressed,
            button: MouseButton::Left,
        });
        reader.handle_window_event(&WindowEvent::CursorMoved {
            device_id: winit::event::DeviceId::dummy(),
            position: PhysicalPosition::new(600.0, 300.0),
        });
        reader.handle_window_event(&WindowEvent::MouseInput {
            device_id: winit::event::DeviceId::dummy(),
            state: ElementState::Released,
            button: MouseButton::Left,
        });

        // Nothing reaches the state until capture.
        assert!(queue.is_empty());
        reader.capture();

        let kinds: Vec<_> = std::iter::from_fn(|| queue.pop())
            .map(|e| e.as_mouse().unwrap().kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                MouseEventKind::Pressed,
                MouseEventKind::Dragged,
                MouseEventKind::Released
            ]
        );
        assert!((reader.mouse_absolute().x - 0.75).abs() < 1e-6);
    }

    #[test]
    fn immediate_key_snapshot_updates_at_capture() {
        let mut reader = WinitInputReader::new(SIZE);
        reader.pending.push(RawInput::KeyChanged {
            key: KeyCode::Space,
            down: true,
        });
        assert!(!reader.is_key_down(KeyCode::Space));
        reader.capture();
        assert!(reader.is_key_down(KeyCode::Space));

        reader.pending.push(RawInput::KeyChanged {
            key: KeyCode::Space,
            down: false,
        });
        reader.capture();
        assert!(!reader.is_key_down(KeyCode::Space));
    }
}
