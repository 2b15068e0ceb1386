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

//! Service properties of a job, reported as `{fs.obs.access.key=xxx, fs.obs.secret.key=xxx}`

use std::collections::BTreeMap;

use super::wire::unwrap_delimited;
use super::CodecError;

/// Render properties the way the API reports them
pub fn format_properties(properties: &BTreeMap<String, String>) -> String {
    let entries = properties
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>();
    format!("{{{}}}", entries.join(", "))
}

/// Whether a property reads back unchanged from a formatted map
pub fn is_wire_property(key: &str, value: &str) -> bool {
    !key.contains(['=', ',', '\n'])
        && !value.contains([',', '\n'])
        && key.trim_start() == key
        && value.trim_end() == value
}

/// Parse a property map
///
/// # Errors
///
/// - [`CodecError::MalformedWireFormat`] if the braces are missing,
/// - [`CodecError::InvalidPropertyEntry`] if a comma separated segment does not contain `=`.
///
/// Each segment is split on its first `=`: the value may contain more of them.
pub fn try_parse_properties(wire: &str) -> Result<BTreeMap<String, String>, CodecError> {
    let inner = unwrap_delimited(wire, '{', '}')?;
    let mut properties = BTreeMap::new();
    if inner.is_empty() {
        return Ok(properties);
    }
    for segment in inner.split(',') {
        let entry = segment.trim();
        let (key, value) = entry
            .split_once('=')
            .ok_or_else(|| CodecError::InvalidPropertyEntry(entry.to_owned()))?;
        properties.insert(key.to_owned(), value.to_owned());
    }
    Ok(properties)
}

/// Parse a property map, yielding an empty map if the braces are missing
///
/// # Errors
///
/// [`CodecError::InvalidPropertyEntry`] as [`try_parse_properties`].
pub fn parse_properties(wire: &str) -> Result<BTreeMap<String, String>, CodecError> {
    match try_parse_properties(wire) {
        Err(err @ CodecError::MalformedWireFormat { .. }) => {
            tracing::warn!("Ignoring MRS job properties: {err}");
            Ok(Default::default())
        }
        result => result,
    }
}
