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

//! The buffered-input event pipeline.
//!
//! Events captured by an input reader are pushed into the [`EventQueue`],
//! drained once per frame by the [`EventProcessor`], and routed by an
//! [`EventDispatcher`] per registered target manager to the
//! [`PositionTarget`](target::PositionTarget) under the pointer.

pub mod cursor;
pub mod dispatcher;
pub mod input_event;
pub mod listener;
pub mod processor;
pub mod queue;
pub mod target;

pub use self::cursor::Cursor;
pub use self::dispatcher::EventDispatcher;
pub use self::input_event::{
    EventKind, InputEvent, KeyEvent, KeyEventKind, Modifiers, MouseEvent, MouseEventKind,
};
pub use self::listener::{KeyListener, MouseListener, MouseMotionListener};
pub use self::processor::EventProcessor;
pub use self::queue::EventQueue;
pub use self::target::{
    EventTarget, KeyTarget, MouseMotionTarget, MouseTarget, PositionTarget, TargetManager,
};
