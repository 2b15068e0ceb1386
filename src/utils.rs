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


use std::borrow::Cow;
use std::collections::BTreeMap;

use tf_provider::schema::Schema;
use tf_provider::value::{Value, ValueMap, ValueString};
use tf_provider::{AttributePath, Diagnostics};

pub(crate) trait WithSchema {
    fn schema() -> Schema;
}

pub(crate) trait WithValidate {
    fn validate(&self, diags: &mut Diagnostics, attr_path: AttributePath);
}

pub(crate) trait WithNormalize {
    fn normalize(&mut self, diags: &mut Diagnostics);
}

/// Known entries of a map of strings
pub(crate) fn known_entries(map: &ValueMap<'_, ValueString<'_>>) -> BTreeMap<String, String> {
    map.iter()
        .flatten()
        .filter_map(|(k, v)| match v {
            Value::Value(v) => Some((k.to_string(), v.to_string())),
            _ => None,
        })
        .collect()
}

/// Wrap a value read back from the API
///
/// An empty string stays null if the attribute was null.
pub(crate) fn read_string<'a>(prior: &ValueString<'_>, read: String) -> ValueString<'a> {
    if read.is_empty() && prior.is_null() {
        Value::Null
    } else {
        Value::Value(Cow::Owned(read))
    }
}

/// Wrap a map read back from the API
///
/// An empty map stays null if the attribute was null.
pub(crate) fn read_map<'a>(
    prior: &ValueMap<'_, ValueString<'_>>,
    read: BTreeMap<String, String>,
) -> ValueMap<'a, ValueString<'a>> {
    if read.is_empty() && prior.is_null() {
        Value::Null
    } else {
        Value::Value(
            read.into_iter()
                .map(|(k, v)| (Cow::Owned(k), Value::Value(Cow::Owned(v))))
                .collect(),
        )
    }
}
