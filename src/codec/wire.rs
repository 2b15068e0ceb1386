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

//! Stringified lists as returned by the MRS API
//!
//! The API reports the arguments of a job as a single line such as
//! `[run, -d, -m, yarn-cluster, obs://bucket/program/driver.jar]`.

use super::CodecError;

const SEPARATOR: &str = ", ";

/// Strip `open` and `close` around a single line value
pub(super) fn unwrap_delimited(wire: &str, open: char, close: char) -> Result<&str, CodecError> {
    wire.strip_prefix(open)
        .and_then(|inner| inner.strip_suffix(close))
        .filter(|inner| !inner.contains('\n'))
        .ok_or_else(|| CodecError::MalformedWireFormat {
            open,
            close,
            input: wire.to_owned(),
        })
}

/// Split the inside of a stringified collection into its elements
fn split_elements(inner: &str) -> impl Iterator<Item = &str> {
    inner.split(SEPARATOR)
}

/// Whether a token reads back unchanged from a formatted list
pub fn is_wire_token(token: &str) -> bool {
    !token.contains(SEPARATOR) && !token.contains('\n')
}

/// Render tokens the way the API reports them
pub fn format_argument_list<S: AsRef<str>>(tokens: &[S]) -> String {
    let mut wire = String::from("[");
    for (i, token) in tokens.iter().enumerate() {
        if i > 0 {
            wire.push_str(SEPARATOR);
        }
        wire.push_str(token.as_ref());
    }
    wire.push(']');
    wire
}

/// Parse a bracketed list into its tokens
///
/// `[]` yields a single empty token, as the content between the brackets is
/// always split on `", "`.
///
/// # Errors
///
/// [`CodecError::MalformedWireFormat`] if the brackets are missing.
pub fn try_parse_argument_list(wire: &str) -> Result<Vec<String>, CodecError> {
    let inner = unwrap_delimited(wire, '[', ']')?;
    Ok(split_elements(inner).map(str::to_owned).collect())
}

/// Parse a bracketed list into its tokens, yielding no tokens at all if the brackets are missing
pub fn parse_argument_list(wire: &str) -> Vec<String> {
    try_parse_argument_list(wire).unwrap_or_else(|err| {
        tracing::warn!("Ignoring MRS job arguments: {err}");
        Vec::new()
    })
}
