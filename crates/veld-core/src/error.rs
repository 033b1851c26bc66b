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

//! Defines the error types for the input and event subsystem.

use std::fmt;

/// An error raised by an input backend or the event pipeline.
#[derive(Debug)]
pub enum InputError {
    /// The backend does not implement the requested capability
    /// (e.g. game controller polling on a mouse/keyboard-only reader).
    NotImplemented {
        /// The capability that was requested.
        capability: String,
    },
    /// A referenced device, target, or dispatcher could not be found.
    NotFound {
        /// A description of what was looked up.
        what: String,
    },
    /// Invalid parameters were passed to a configuration call
    /// (e.g. cursor limits with `low > high`).
    InvalidParameters {
        /// A description of the rejected parameters.
        details: String,
    },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::NotImplemented { capability } => {
                write!(f, "Input capability not implemented: {capability}")
            }
            InputError::NotFound { what } => {
                write!(f, "Input lookup failed, not found: {what}")
            }
            InputError::InvalidParameters { details } => {
                write!(f, "Invalid input parameters: {details}")
            }
        }
    }
}

impl std::error::Error for InputError {}
