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

//! Replays a scripted input session through the full event pipeline.
//!
//! Panels are axis-aligned boxes in normalized screen space; a JSON config
//! (built-in or passed as the first argument) describes the panels and the
//! per-frame device actions. Every delivered event is logged, so the
//! dispatch order is visible end to end.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use anyhow::{Context, Result};
use serde::Deserialize;

use veld_core::event::{
    EventKind, EventProcessor, EventTarget, InputEvent, KeyTarget, MouseEventKind,
    MouseMotionTarget, MouseTarget, PositionTarget, TargetManager,
};
use veld_core::input::{InputReader, KeyCode, ReaderState};
use veld_core::math::{Aabb, Vec3};

const DEFAULT_CONFIG: &str = r#"{
    "cursor_scale": 1.0,
    "drag_drop": true,
    "panels": [
        { "name": "inventory", "min": [0.05, 0.05], "max": [0.45, 0.95], "key_enabled": true },
        { "name": "toolbar",   "min": [0.55, 0.05], "max": [0.95, 0.95], "key_enabled": false }
    ],
    "frames": [
        [ { "MoveTo": { "x": 0.25, "y": 0.5 } }, { "Press": { "button": 0 } } ],
        [ { "MoveTo": { "x": 0.75, "y": 0.5 } } ],
        [ { "Release": { "button": 0 } } ],
        [ { "Key": { "key": "G", "down": true } }, { "Key": { "key": "G", "down": false } } ]
    ]
}"#;

/// One scripted device action.
#[derive(Debug, Clone, Deserialize)]
enum ScriptAction {
    /// Press a mouse button by zero-based index.
    Press { button: u32 },
    /// Release a mouse button.
    Release { button: u32 },
    /// Move the pointer to a normalized position.
    MoveTo { x: f32, y: f32 },
    /// Press or release a key.
    Key { key: KeyCode, down: bool },
}

#[derive(Debug, Deserialize)]
struct PanelConfig {
    name: String,
    min: [f32; 2],
    max: [f32; 2],
    key_enabled: bool,
}

#[derive(Debug, Deserialize)]
struct SandboxConfig {
    cursor_scale: f32,
    drag_drop: bool,
    panels: Vec<PanelConfig>,
    frames: Vec<Vec<ScriptAction>>,
}

/// Replays one frame's worth of scripted actions per capture.
struct ScriptedReader {
    state: ReaderState,
    frames: VecDeque<Vec<ScriptAction>>,
}

impl ScriptedReader {
    fn new(frames: Vec<Vec<ScriptAction>>) -> Self {
        Self {
            state: ReaderState::new(),
            frames: frames.into(),
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
        let Some(actions) = self.frames.pop_front() else {
            return;
        };
        for action in actions {
            match action {
                ScriptAction::Press { button } => self.state.trigger_mouse_button(button, true),
                ScriptAction::Release { button } => {
                    self.state.trigger_mouse_button(button, false)
                }
                ScriptAction::MoveTo { x, y } => {
                    let pos = self.state.cursor().position();
                    self.state.cursor_mut().add_to_x(x - pos.x);
                    self.state.cursor_mut().add_to_y(y - pos.y);
                    self.state.mouse_moved();
                }
                ScriptAction::Key { key, down } => self.state.key_changed(key, down),
            }
        }
    }

    fn is_key_down_immediate(&self, _key: KeyCode) -> bool {
        false
    }
}

/// A rectangular UI element occupying a box in normalized screen space.
struct Panel {
    name: String,
    bounds: Aabb,
    key_enabled: bool,
    mouse: MouseTarget,
    motion: MouseMotionTarget,
    key: KeyTarget,
    clicks: Cell<u32>,
}

impl Panel {
    fn new(config: &PanelConfig) -> Self {
        let bounds = Aabb::from_min_max(
            Vec3::new(config.min[0], config.min[1], 0.0),
            Vec3::new(config.max[0], config.max[1], 1.0),
        );
        Self {
            name: config.name.clone(),
            bounds,
            key_enabled: config.key_enabled,
            mouse: MouseTarget::new(),
            motion: MouseMotionTarget::new(),
            key: KeyTarget::new(),
            clicks: Cell::new(0),
        }
    }

    fn contains(&self, x: f32, y: f32) -> bool {
        self.bounds.contains_point(Vec3::new(x, y, 0.5))
    }
}

impl EventTarget for Panel {
    fn process_event(&self, event: &InputEvent) {
        match &event.kind {
            EventKind::Mouse(mouse) => {
                log::info!(
                    "[{}] {:?} at ({:.2}, {:.2})",
                    self.name,
                    mouse.kind,
                    mouse.position.x,
                    mouse.position.y
                );
                if mouse.kind == MouseEventKind::Clicked {
                    self.clicks.set(self.clicks.get() + 1);
                }
                match mouse.kind {
                    MouseEventKind::Moved | MouseEventKind::Dragged | MouseEventKind::DragMoved => {
                        self.motion.process_mouse_motion_event(event)
                    }
                    _ => self.mouse.process_mouse_event(event),
                }
            }
            EventKind::Key(key) => {
                log::info!("[{}] {:?} key {:?}", self.name, key.kind, key.key);
                self.key.process_key_event(event);
            }
        }
    }
}

impl PositionTarget for Panel {
    fn left(&self) -> f32 {
        self.bounds.min().x
    }

    fn top(&self) -> f32 {
        self.bounds.min().y
    }

    fn parent(&self) -> Option<Rc<dyn PositionTarget>> {
        None
    }

    fn is_key_enabled(&self) -> bool {
        self.key_enabled
    }
}

/// Hit-tests the panel list front to back.
struct PanelManager {
    panels: Vec<Rc<Panel>>,
}

impl TargetManager for PanelManager {
    fn position_target_at(&self, x: f32, y: f32) -> Option<Rc<dyn PositionTarget>> {
        self.panels
            .iter()
            .find(|p| p.contains(x, y))
            .map(|p| Rc::clone(p) as Rc<dyn PositionTarget>)
    }
}

fn load_config() -> Result<SandboxConfig> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config from '{path}'"))?;
            serde_json::from_str(&text).with_context(|| format!("parsing config '{path}'"))?
        }
        None => serde_json::from_str(DEFAULT_CONFIG).context("parsing built-in config")?,
    };
    Ok(config)
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    log::info!(
        "Replaying {} frames across {} panels.",
        config.frames.len(),
        config.panels.len()
    );

    let panels: Vec<Rc<Panel>> = config.panels.iter().map(|c| Rc::new(Panel::new(c))).collect();

    let total_frames = config.frames.len();
    let mut reader = ScriptedReader::new(config.frames);
    reader.set_mouse_scale(config.cursor_scale);
    reader.initialize(true, true, false)?;

    let mut processor = EventProcessor::new(Box::new(reader));
    processor.add_target_manager(Rc::new(PanelManager {
        panels: panels.clone(),
    }));
    processor.set_drag_drop(config.drag_drop);
    processor.start_processing_events();

    for frame in 0..total_frames {
        log::info!("--- frame {frame} ---");
        processor.frame_started();
    }

    processor.stop_processing_events();
    for panel in &panels {
        log::info!("[{}] total clicks: {}", panel.name, panel.clicks.get());
    }
    Ok(())
}
