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

//! Routes raw input events to position targets, tracking enter/exit,
//! drag, and keyboard-focus transitions.

use std::rc::{Rc, Weak};

use crate::event::target::{same_target, EventTarget, PositionTarget, TargetManager};
use crate::event::{
    EventKind, InputEvent, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind,
};
use crate::input::KeyCode;

/// Per-target-manager event router.
///
/// One dispatcher serves one [`TargetManager`]: for every mouse event it asks
/// the manager which target is under the pointer, then drives a small state
/// machine covering enter/exit pairing, drag gestures, click synthesis, and
/// keyboard focus. Keyboard events go straight to the focus holder.
///
/// Click synthesis lives here rather than in the readers so a click fires
/// exactly once per press/release pair over the same target, regardless of
/// how many motion events arrived in between.
///
/// All target references held across events are weak: a target destroyed
/// mid-gesture simply drops out of the state machine instead of dangling.
pub struct EventDispatcher {
    target_manager: Rc<dyn TargetManager>,
    drag_source: Option<Weak<dyn PositionTarget>>,
    key_cursor_on: Option<Weak<dyn PositionTarget>>,
    last_entered: Option<Weak<dyn PositionTarget>>,
    dragging: bool,
    drag_drop_on: bool,
    drag_drop_active: bool,
}

/// Identity comparison over optional targets.
fn same(a: Option<&Rc<dyn PositionTarget>>, b: Option<&Rc<dyn PositionTarget>>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => same_target(a, b),
        _ => false,
    }
}

impl EventDispatcher {
    /// Creates a dispatcher with no focus, no drag, and no last-entered
    /// target.
    pub fn new(target_manager: Rc<dyn TargetManager>) -> Self {
        Self {
            target_manager,
            drag_source: None,
            key_cursor_on: None,
            last_entered: None,
            dragging: false,
            drag_drop_on: false,
            drag_drop_active: false,
        }
    }

    /// Enables or disables drag-and-drop event synthesis. Takes effect at
    /// the next press.
    pub fn set_drag_drop(&mut self, on: bool) {
        self.drag_drop_on = on;
    }

    /// Returns `true` while a press is held.
    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Routes one event, returning `true` if it ended up consumed.
    pub fn dispatch_event(&mut self, event: &InputEvent) -> bool {
        match &event.kind {
            EventKind::Mouse(mouse) => self.process_mouse_event(event, *mouse),
            EventKind::Key(_) => self.process_key_event(event),
        }
    }

    fn process_key_event(&mut self, event: &InputEvent) -> bool {
        if let Some(holder) = self.key_cursor_on.as_ref().and_then(Weak::upgrade) {
            holder.process_event(event);
        }
        event.is_consumed()
    }

    fn process_mouse_event(&mut self, event: &InputEvent, mouse: MouseEvent) -> bool {
        let target_over = self
            .target_manager
            .position_target_at(mouse.position.x, mouse.position.y);
        self.track_mouse_enter_exit(target_over.as_ref(), event, mouse);

        match mouse.kind {
            MouseEventKind::Pressed => {
                log::trace!("Dispatcher press: drag begins.");
                self.dragging = true;
                if self.drag_drop_on {
                    self.drag_drop_active = true;
                }
                self.drag_source = target_over.as_ref().map(Rc::downgrade);
                retarget_mouse(target_over.as_ref(), mouse.kind, event, mouse, true);
                self.track_key_enter_exit(target_over.as_ref(), event);
            }
            MouseEventKind::Released => {
                let drag_source = self.drag_source.as_ref().and_then(Weak::upgrade);
                match target_over.as_ref() {
                    Some(over) => {
                        if same(Some(over), drag_source.as_ref()) {
                            retarget_mouse(
                                drag_source.as_ref(),
                                MouseEventKind::Clicked,
                                event,
                                mouse,
                                false,
                            );
                            retarget_mouse(drag_source.as_ref(), mouse.kind, event, mouse, true);
                        } else {
                            if self.drag_drop_active {
                                retarget_mouse(
                                    Some(over),
                                    MouseEventKind::DragDropped,
                                    event,
                                    mouse,
                                    false,
                                );
                            }
                            retarget_mouse(drag_source.as_ref(), mouse.kind, event, mouse, true);
                            retarget_mouse(
                                Some(over),
                                MouseEventKind::Entered,
                                event,
                                mouse,
                                false,
                            );
                        }
                    }
                    None => {
                        retarget_mouse(drag_source.as_ref(), mouse.kind, event, mouse, true);
                    }
                }
                log::trace!("Dispatcher release: drag ends.");
                self.dragging = false;
                self.drag_drop_active = false;
                self.drag_source = None;
            }
            MouseEventKind::Moved | MouseEventKind::Dragged => {
                let drag_source = self.drag_source.as_ref().and_then(Weak::upgrade);
                if !self.dragging || same(target_over.as_ref(), drag_source.as_ref()) {
                    retarget_mouse(target_over.as_ref(), mouse.kind, event, mouse, true);
                } else {
                    retarget_mouse(
                        drag_source.as_ref(),
                        MouseEventKind::Dragged,
                        event,
                        mouse,
                        true,
                    );
                    if self.drag_drop_active {
                        retarget_mouse(
                            target_over.as_ref(),
                            MouseEventKind::DragMoved,
                            event,
                            mouse,
                            false,
                        );
                    }
                }
            }
            // Enter/exit family events are synthesized here, never read
            // from the queue.
            _ => {}
        }

        event.is_consumed()
    }

    /// Pairs an exit to the previously entered target with an enter to the
    /// new one whenever the pointer crosses a boundary. During a drag the
    /// plain pair is replaced by the drag-and-drop variants, and only while
    /// drag-and-drop is active.
    fn track_mouse_enter_exit(
        &mut self,
        target_over: Option<&Rc<dyn PositionTarget>>,
        event: &InputEvent,
        mouse: MouseEvent,
    ) {
        let last = self.last_entered.as_ref().and_then(Weak::upgrade);
        if same(last.as_ref(), target_over) {
            return;
        }

        let drag_source = self.drag_source.as_ref().and_then(Weak::upgrade);
        if let Some(last) = last.as_ref() {
            if !self.dragging || same(Some(last), drag_source.as_ref()) {
                retarget_mouse(Some(last), MouseEventKind::Exited, event, mouse, false);
            } else if self.drag_drop_active {
                retarget_mouse(Some(last), MouseEventKind::DragExited, event, mouse, false);
            }
        }
        if let Some(over) = target_over {
            if !self.dragging || same(Some(over), drag_source.as_ref()) {
                retarget_mouse(Some(over), MouseEventKind::Entered, event, mouse, false);
            } else if self.drag_drop_active {
                retarget_mouse(Some(over), MouseEventKind::DragEntered, event, mouse, false);
            }
        }

        self.last_entered = target_over.map(Rc::downgrade);
    }

    /// Moves keyboard focus to the pressed target when it accepts keys;
    /// otherwise clears focus. The previous holder learns of the change
    /// either way.
    fn track_key_enter_exit(
        &mut self,
        target_over: Option<&Rc<dyn PositionTarget>>,
        event: &InputEvent,
    ) {
        let current = self.key_cursor_on.as_ref().and_then(Weak::upgrade);
        if same(current.as_ref(), target_over) {
            return;
        }

        if let Some(current) = current.as_ref() {
            retarget_key(current, KeyEventKind::FocusOut, event);
        }
        match target_over {
            Some(over) if over.is_key_enabled() => {
                log::trace!("Keyboard focus moved.");
                self.key_cursor_on = Some(Rc::downgrade(over));
                retarget_key(over, KeyEventKind::FocusIn, event);
            }
            _ => {
                self.key_cursor_on = None;
            }
        }
    }
}

/// Delivers a fresh copy of a mouse event to `target` under a possibly
/// overridden kind, consuming the original afterwards when asked.
///
/// TODO: translate the coordinates into the target's local space by walking
/// the parent chain; they are currently passed through unchanged and
/// listeners compensate by reading absolute positions.
fn retarget_mouse(
    target: Option<&Rc<dyn PositionTarget>>,
    kind: MouseEventKind,
    original: &InputEvent,
    mouse: MouseEvent,
    consume: bool,
) {
    let Some(target) = target else {
        return;
    };

    let source: Rc<dyn EventTarget> = target.clone();
    let retargeted = InputEvent::new(
        Rc::downgrade(&source),
        original.modifiers,
        EventKind::Mouse(MouseEvent { kind, ..mouse }),
    );
    target.process_event(&retargeted);

    // The original carries the consumed flag downstream stages check.
    if consume {
        original.consume();
    }
}

/// Delivers a synthetic focus event to `target`. Focus events carry no key.
fn retarget_key(target: &Rc<dyn PositionTarget>, kind: KeyEventKind, original: &InputEvent) {
    let source: Rc<dyn EventTarget> = target.clone();
    let retargeted = InputEvent::new(
        Rc::downgrade(&source),
        original.modifiers,
        EventKind::Key(KeyEvent {
            kind,
            key: KeyCode::Unassigned,
        }),
    );
    target.process_event(&retargeted);
}
