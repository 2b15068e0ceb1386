// This file is part of the terraform-provider-flexibleengine project
//
// Copyright (C) ANEO, 2024-2024. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License")
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

use thiserror::Error;

use super::kind::Grammar;

/// Errors raised while converting between a [`JobSpec`](super::JobSpec) and its wire format
///
/// All of them are deterministic functions of the input: retrying the same
/// conversion always yields the same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The wire string is not enclosed in the expected delimiters
    #[error("Malformed wire format: expected a value enclosed in `{open}` and `{close}`, got `{input}`")]
    MalformedWireFormat {
        open: char,
        close: char,
        input: String,
    },

    /// Fewer tokens than the grammar requires at a given consumption point
    #[error("Wrong {grammar} arguments length of the API response: {expected} ({remaining} remaining)")]
    ArgumentCount {
        grammar: Grammar,
        expected: &'static str,
        remaining: usize,
    },

    /// SQL family arguments without a trailing statement
    #[error("The arguments of the API response do not contain the SQL statement or the SQL file path")]
    MissingStatement,

    /// A property segment has no `=` between key and value
    #[error("The property ({0}) of the MRS job is invalid")]
    InvalidPropertyEntry(String),

    /// Job type name outside of the supported set
    #[error("Unknown MRS job type `{0}`")]
    UnknownJobKind(String),

    /// Epoch value that cannot be represented as a date
    #[error("Timestamp {0} is out of the representable range")]
    InvalidTimestamp(i64),
}
