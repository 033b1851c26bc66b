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

//! The top-level orchestrator draining the event queue once per frame.

use std::rc::Rc;

use crate::event::dispatcher::EventDispatcher;
use crate::event::target::{
    EventTarget, KeyTarget, MouseMotionTarget, MouseTarget, TargetManager,
};
use crate::event::listener::MouseMotionListener;
use crate::event::{EventQueue, InputEvent, MouseEventKind};
use crate::input::InputReader;

/// Owns the input reader, the event queue, and the dispatcher list.
///
/// The processor is constructed explicitly by the application and passed to
/// whatever drives the frame loop; it holds no global state. Once per frame,
/// [`frame_started`](Self::frame_started) captures the reader and drains
/// every event that was queued before the call.
///
/// Each drained event is offered to every dispatcher in registration order,
/// dispatchers cooperate rather than short-circuit. An event no dispatcher
/// consumed then goes to the flat event-target list, and finally to the
/// processor's own listener sets acting as default fallback.
pub struct EventProcessor {
    queue: Rc<EventQueue>,
    reader: Box<dyn InputReader>,
    dispatchers: Vec<EventDispatcher>,
    event_targets: Vec<Rc<dyn EventTarget>>,
    mouse_target: MouseTarget,
    motion_target: MouseMotionTarget,
    key_target: KeyTarget,
}

impl EventProcessor {
    /// Creates a processor around a reader, wiring the reader's buffered
    /// output into a fresh queue. The queue stays inactive until
    /// [`start_processing_events`](Self::start_processing_events).
    pub fn new(mut reader: Box<dyn InputReader>) -> Self {
        let queue = Rc::new(EventQueue::new());
        reader.use_buffered_input(Rc::clone(&queue), true, true);
        log::info!("EventProcessor initialized.");
        Self {
            queue,
            reader,
            dispatchers: Vec::new(),
            event_targets: Vec::new(),
            mouse_target: MouseTarget::new(),
            motion_target: MouseMotionTarget::new(),
            key_target: KeyTarget::new(),
        }
    }

    /// Activates the queue so captured events start flowing.
    pub fn start_processing_events(&self) {
        self.queue.set_activate(true);
    }

    /// Deactivates the queue. Events already queued are kept and drain once
    /// processing restarts.
    pub fn stop_processing_events(&self) {
        self.queue.set_activate(false);
    }

    /// The shared queue, for wiring additional producers.
    pub fn queue(&self) -> Rc<EventQueue> {
        Rc::clone(&self.queue)
    }

    /// The platform reader, for immediate-mode queries.
    pub fn reader(&self) -> &dyn InputReader {
        self.reader.as_ref()
    }

    /// Mutable access to the platform reader, for backend configuration.
    pub fn reader_mut(&mut self) -> &mut dyn InputReader {
        self.reader.as_mut()
    }

    /// Registers a target manager, creating a dispatcher routing to it.
    pub fn add_target_manager(&mut self, manager: Rc<dyn TargetManager>) {
        self.dispatchers.push(EventDispatcher::new(manager));
    }

    /// Enables or disables drag-and-drop synthesis on every dispatcher.
    pub fn set_drag_drop(&mut self, on: bool) {
        for dispatcher in &mut self.dispatchers {
            dispatcher.set_drag_drop(on);
        }
    }

    /// Registers a flat event target receiving events no dispatcher
    /// consumed.
    pub fn add_event_target(&mut self, target: Rc<dyn EventTarget>) {
        self.event_targets.push(target);
    }

    /// Unregisters a flat event target by identity.
    pub fn remove_event_target(&mut self, target: &Rc<dyn EventTarget>) {
        self.event_targets.retain(|t| !Rc::ptr_eq(t, target));
    }

    /// Registers a listener on the reader's cursor, observing every pointer
    /// motion the cursor accumulates, consumed or not.
    pub fn add_cursor_move_listener(&self, listener: Rc<dyn MouseMotionListener>) {
        self.reader
            .state()
            .cursor()
            .motion_target()
            .add_listener(listener);
    }

    /// Unregisters a cursor motion listener by identity.
    pub fn remove_cursor_move_listener(&self, listener: &Rc<dyn MouseMotionListener>) {
        self.reader
            .state()
            .cursor()
            .motion_target()
            .remove_listener(listener);
    }

    /// The fallback listener set for mouse button and enter/exit events.
    #[inline]
    pub fn mouse_target(&self) -> &MouseTarget {
        &self.mouse_target
    }

    /// The fallback listener set for pointer motion events.
    #[inline]
    pub fn motion_target(&self) -> &MouseMotionTarget {
        &self.motion_target
    }

    /// The fallback listener set for keyboard events.
    #[inline]
    pub fn key_target(&self) -> &KeyTarget {
        &self.key_target
    }

    /// Runs one frame of input work: captures the reader, then drains every
    /// event queued before this call.
    ///
    /// The drain is bounded by the queue length at entry, so events pushed
    /// by listeners during dispatch wait for the next frame rather than
    /// extending the current drain.
    pub fn frame_started(&mut self) {
        self.reader.capture();

        let pending = self.queue.len();
        for _ in 0..pending {
            let Some(event) = self.queue.pop() else {
                break;
            };
            self.process_event(&event);
        }
    }

    fn process_event(&mut self, event: &InputEvent) {
        for dispatcher in &mut self.dispatchers {
            dispatcher.dispatch_event(event);
        }

        if !event.is_consumed() {
            for target in &self.event_targets {
                target.process_event(event);
            }
        }

        if !event.is_consumed() {
            match event.as_mouse().map(|m| m.kind) {
                Some(
                    MouseEventKind::Moved | MouseEventKind::Dragged | MouseEventKind::DragMoved,
                ) => {
                    self.motion_target.process_mouse_motion_event(event);
                }
                Some(_) => {
                    self.mouse_target.process_mouse_event(event);
                }
                None => {
                    self.key_target.process_key_event(event);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::listener::MouseListener;
    use crate::event::target::PositionTarget;
    use crate::event::{EventKind, Modifiers, MouseEvent};
    use crate::input::{KeyCode, ReaderState};
    use crate::math::Vec3;
    use std::cell::RefCell;

    type Log = Rc<RefCell<Vec<String>>>;

    /// Replays a scripted list of device actions when captured.
    enum Action {
        Press(u32),
        Release(u32),
        MoveTo(f32, f32),
        Key(KeyCode, bool),
    }

    struct ScriptedReader {
        state: ReaderState,
        script: Vec<Action>,
    }

    impl ScriptedReader {
        fn new(script: Vec<Action>) -> Self {
            Self {
                state: ReaderState::new(),
                script,
            }
        }
    }

    impl InputReader for ScriptedReader {
        fn state(&self) -> &ReaderState {
            &self.state
        }

        fn state_mut(&mut self) -> &mut ReaderState {
            &mut self.state
        }

        fn capture(&mut self) {
            for action in self.script.drain(..) {
                match action {
                    Action::Press(button) => self.state.trigger_mouse_button(button, true),
                    Action::Release(button) => self.state.trigger_mouse_button(button, false),
                    Action::MoveTo(x, y) => {
                        let pos = self.state.cursor().position();
                        self.state.cursor_mut().add_to_x(x - pos.x);
                        self.state.cursor_mut().add_to_y(y - pos.y);
                        self.state.mouse_moved();
                    }
                    Action::Key(key, down) => self.state.key_changed(key, down),
                }
            }
        }

        fn is_key_down_immediate(&self, _key: KeyCode) -> bool {
            false
        }
    }

    /// Panel that logs deliveries and optionally consumes everything.
    struct Panel {
        name: &'static str,
        consume: bool,
        log: Log,
    }

    impl EventTarget for Panel {
        fn process_event(&self, event: &InputEvent) {
            let label = match &event.kind {
                EventKind::Mouse(m) => format!("{}:{:?}", self.name, m.kind),
                EventKind::Key(k) => format!("{}:{:?}", self.name, k.kind),
            };
            self.log.borrow_mut().push(label);
            if self.consume {
                event.consume();
            }
        }
    }

    impl PositionTarget for Panel {
        fn left(&self) -> f32 {
            0.0
        }
        fn top(&self) -> f32 {
            0.0
        }
        fn parent(&self) -> Option<Rc<dyn PositionTarget>> {
            None
        }
        fn is_key_enabled(&self) -> bool {
            false
        }
    }

    struct WholeScreen {
        panel: Rc<Panel>,
    }

    impl TargetManager for WholeScreen {
        fn position_target_at(&self, _x: f32, _y: f32) -> Option<Rc<dyn PositionTarget>> {
            Some(Rc::clone(&self.panel) as Rc<dyn PositionTarget>)
        }
    }

    struct LoggingMouseListener {
        log: Log,
    }

    impl MouseListener for LoggingMouseListener {
        fn mouse_clicked(&self, _e: &InputEvent) {
            self.log.borrow_mut().push("fallback:Clicked".to_string());
        }
        fn mouse_entered(&self, _e: &InputEvent) {}
        fn mouse_exited(&self, _e: &InputEvent) {}
        fn mouse_pressed(&self, _e: &InputEvent) {
            self.log.borrow_mut().push("fallback:Pressed".to_string());
        }
        fn mouse_released(&self, _e: &InputEvent) {}
    }

    fn mouse_event(kind: MouseEventKind) -> InputEvent {
        InputEvent::mouse(
            Modifiers::empty(),
            MouseEvent {
                kind,
                position: Vec3::new(0.5, 0.5, 0.5),
                relative: Vec3::ZERO,
                button: Modifiers::BUTTON0,
                click_count: 0,
            },
        )
    }

    #[test]
    fn frame_drains_whole_queue_in_order() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let reader = ScriptedReader::new(vec![
            Action::Press(0),
            Action::MoveTo(0.6, 0.5),
            Action::Release(0),
        ]);
        let mut processor = EventProcessor::new(Box::new(reader));
        processor.start_processing_events();

        let panel = Rc::new(Panel {
            name: "panel",
            consume: false,
            log: Rc::clone(&log),
        });
        processor.add_target_manager(Rc::new(WholeScreen { panel }));

        processor.frame_started();
        assert_eq!(
            *log.borrow(),
            vec![
                "panel:Entered",
                "panel:Pressed",
                "panel:Dragged",
                "panel:Clicked",
                "panel:Released"
            ]
        );
        assert!(processor.queue().is_empty());
    }

    #[test]
    fn key_tap_reaches_flat_targets_through_the_frame() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let reader = ScriptedReader::new(vec![
            Action::Key(KeyCode::G, true),
            Action::Key(KeyCode::G, false),
        ]);
        let mut processor = EventProcessor::new(Box::new(reader));
        processor.start_processing_events();

        // No dispatcher holds keyboard focus, so the key events fall
        // through to the flat target list.
        let flat = Rc::new(Panel {
            name: "flat",
            consume: false,
            log: Rc::clone(&log),
        });
        processor.add_event_target(flat as Rc<dyn EventTarget>);

        processor.frame_started();
        assert_eq!(
            *log.borrow(),
            vec!["flat:Pressed", "flat:Released", "flat:Clicked"]
        );
    }

    #[test]
    fn unconsumed_events_fall_through_to_flat_targets_and_fallback() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let reader = ScriptedReader::new(vec![]);
        let mut processor = EventProcessor::new(Box::new(reader));
        processor.start_processing_events();

        // No dispatchers: events reach the flat list unconsumed.
        let flat = Rc::new(Panel {
            name: "flat",
            consume: false,
            log: Rc::clone(&log),
        });
        processor.add_event_target(flat as Rc<dyn EventTarget>);
        processor.mouse_target().add_listener(Rc::new(LoggingMouseListener {
            log: Rc::clone(&log),
        }));

        processor.queue().push(mouse_event(MouseEventKind::Pressed));
        processor.frame_started();
        assert_eq!(*log.borrow(), vec!["flat:Pressed", "fallback:Pressed"]);
    }

    #[test]
    fn consumed_events_do_not_fall_through() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let reader = ScriptedReader::new(vec![]);
        let mut processor = EventProcessor::new(Box::new(reader));
        processor.start_processing_events();

        // The whole-screen panel consumes everything the dispatcher routes.
        let panel = Rc::new(Panel {
            name: "panel",
            consume: true,
            log: Rc::clone(&log),
        });
        processor.add_target_manager(Rc::new(WholeScreen { panel }));

        let flat = Rc::new(Panel {
            name: "flat",
            consume: false,
            log: Rc::clone(&log),
        });
        processor.add_event_target(flat as Rc<dyn EventTarget>);

        processor.queue().push(mouse_event(MouseEventKind::Pressed));
        processor.frame_started();
        let log = log.borrow();
        assert!(!log.iter().any(|entry| entry.starts_with("flat:")));
    }

    #[test]
    fn events_queued_during_dispatch_wait_for_next_frame() {
        /// Pushes a follow-up event into the queue from inside a callback.
        struct Requeuer {
            queue: Rc<EventQueue>,
            log: Log,
        }

        impl EventTarget for Requeuer {
            fn process_event(&self, event: &InputEvent) {
                self.log
                    .borrow_mut()
                    .push(format!("seen:{:?}", event.as_mouse().unwrap().kind));
                if event.as_mouse().unwrap().kind == MouseEventKind::Pressed {
                    self.queue.push(mouse_event(MouseEventKind::Released));
                }
            }
        }

        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let reader = ScriptedReader::new(vec![]);
        let mut processor = EventProcessor::new(Box::new(reader));
        processor.start_processing_events();
        processor.add_event_target(Rc::new(Requeuer {
            queue: processor.queue(),
            log: Rc::clone(&log),
        }));

        processor.queue().push(mouse_event(MouseEventKind::Pressed));
        processor.frame_started();
        // The requeued release stays buffered until the next frame.
        assert_eq!(*log.borrow(), vec!["seen:Pressed"]);
        assert_eq!(processor.queue().len(), 1);

        processor.frame_started();
        assert_eq!(*log.borrow(), vec!["seen:Pressed", "seen:Released"]);
    }

    #[test]
    fn cursor_move_listener_observes_reader_motion() {
        struct MotionLog {
            log: Log,
        }

        impl crate::event::listener::MouseMotionListener for MotionLog {
            fn mouse_moved(&self, e: &InputEvent) {
                self.log
                    .borrow_mut()
                    .push(format!("moved:{:.2}", e.as_mouse().unwrap().position.x));
            }
            fn mouse_dragged(&self, _e: &InputEvent) {}
        }

        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let reader = ScriptedReader::new(vec![Action::MoveTo(0.8, 0.5)]);
        let mut processor = EventProcessor::new(Box::new(reader));
        processor.start_processing_events();
        processor.add_cursor_move_listener(Rc::new(MotionLog {
            log: Rc::clone(&log),
        }));

        processor.frame_started();
        // The cursor notifies its listeners while the event is created,
        // before any dispatcher sees it.
        assert_eq!(*log.borrow(), vec!["moved:0.80"]);
    }

    #[test]
    fn stop_processing_keeps_queued_events() {
        let reader = ScriptedReader::new(vec![]);
        let processor = EventProcessor::new(Box::new(reader));
        processor.start_processing_events();
        processor.queue().push(mouse_event(MouseEventKind::Moved));

        processor.stop_processing_events();
        assert_eq!(processor.queue().len(), 1);
        processor.start_processing_events();
        assert!(processor.queue().pop().is_some());
    }
}
