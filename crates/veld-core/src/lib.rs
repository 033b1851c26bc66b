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

//! # Veld Core
//!
//! Platform-independent input capture and event dispatch, together with the
//! math primitives the spatial targeting logic depends on. Backends live in
//! companion crates and plug in through the [`input::InputReader`] and
//! [`event::TargetManager`] contracts.

#![warn(missing_docs)]

pub mod error;
pub mod event;
pub mod input;
pub mod math;

pub use error::InputError;
