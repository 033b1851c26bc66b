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

//! # Veld Infra
//!
//! Concrete platform backends for the Veld input pipeline. Currently this
//! means the `winit` adapter: translation of window events into raw input
//! changes and an [`input::InputReader`](veld_core::input::InputReader)
//! implementation built on them.

#![warn(missing_docs)]

pub mod platform;
