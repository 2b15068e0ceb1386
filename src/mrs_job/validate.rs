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


use tf_provider::value::Value;
use tf_provider::{AttributePath, Diagnostics};

use crate::codec::{is_wire_property, is_wire_token, JobKind};
use crate::utils::WithValidate;

use super::state::MrsJobState;

const NAME_MAX_LEN: usize = 64;

fn is_valid_name(name: &str) -> bool {
    (1..=NAME_MAX_LEN).contains(&name.len())
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

impl WithValidate for MrsJobState<'_> {
    fn validate(&self, diags: &mut Diagnostics, attr_path: AttributePath) {
        if let Value::Value(cluster_id) = &self.cluster_id {
            if cluster_id.is_empty() {
                diags.error_short(
                    "`cluster_id` cannot be empty",
                    attr_path.clone().attribute("cluster_id"),
                );
            }
        }

        if let Value::Value(name) = &self.name {
            if !is_valid_name(name) {
                diags.error(
                    "Invalid job name",
                    format!("`{name}` must be 1 to {NAME_MAX_LEN} letters, digits, `_` or `-`."),
                    attr_path.clone().attribute("name"),
                );
            }
        }

        for (key, value) in self.service_parameters.iter().flatten() {
            if let Value::Value(value) = value {
                if !is_wire_property(key, value) {
                    diags.error(
                        "Invalid service parameter",
                        "Keys cannot contain `=` or `,`. Values cannot contain `,`. Newlines and surrounding spaces are not kept.",
                        attr_path.clone().attribute("service_parameters").key(key.to_string()),
                    );
                }
            }
        }

        let kind = match &self.job_type {
            Value::Value(job_type) => match job_type.parse::<JobKind>() {
                Ok(kind) => kind,
                Err(err) => {
                    diags.error(
                        "Invalid job type",
                        err.to_string(),
                        attr_path.attribute("type"),
                    );
                    return;
                }
            },
            _ => return,
        };

        let grammar = kind.grammar();
        let fields = [
            ("program_path", self.program_path.is_null(), grammar.uses_program_path()),
            ("parameters", self.parameters.is_null(), grammar.uses_parameters()),
            (
                "program_parameters",
                self.program_parameters.is_null(),
                grammar.uses_program_parameters(),
            ),
            ("sql", self.sql.is_null(), grammar.uses_sql()),
        ];
        for (name, is_null, used) in fields {
            if !is_null && !used {
                diags.warning(
                    format!("`{name}` is ignored by {kind} jobs"),
                    format!("{kind} jobs do not send `{name}` to the cluster."),
                    attr_path.clone().attribute(name),
                );
            }
        }

        let tokens = [
            ("program_path", &self.program_path, grammar.uses_program_path()),
            ("sql", &self.sql, grammar.uses_sql()),
        ];
        for (name, value, used) in tokens {
            if let (Value::Value(value), true) = (value, used) {
                if !is_wire_token(value) {
                    diags.error(
                        format!("Invalid `{name}`"),
                        "Cannot contain `, ` or a newline.",
                        attr_path.clone().attribute(name),
                    );
                }
            }
        }
        if let (Value::Value(parameters), true) = (&self.parameters, grammar.uses_parameters()) {
            if parameters.contains('\n') {
                diags.error(
                    "Invalid `parameters`",
                    "Cannot contain a newline.",
                    attr_path.clone().attribute("parameters"),
                );
            }
        }
        if grammar.uses_program_parameters() {
            for (key, value) in self.program_parameters.iter().flatten() {
                let path = attr_path
                    .clone()
                    .attribute("program_parameters")
                    .key(key.to_string());
                if grammar.marker() == Some(&**key) {
                    diags.error(
                        "Invalid program parameter",
                        format!("`{key}` is set by the provider for {kind} jobs."),
                        path,
                    );
                } else if !is_wire_token(key)
                    || matches!(value, Value::Value(value) if !is_wire_token(value))
                {
                    diags.error(
                        "Invalid program parameter",
                        "Keys and values cannot contain `, ` or a newline.",
                        path,
                    );
                }
            }
        }

        let required = if grammar.uses_sql() {
            ("sql", &self.sql)
        } else {
            ("program_path", &self.program_path)
        };
        match required.1 {
            Value::Value(value) if value.is_empty() => {
                diags.error_short(
                    format!("`{}` cannot be empty for {kind} jobs", required.0),
                    attr_path.attribute(required.0),
                );
            }
            Value::Null => {
                diags.error_short(
                    format!("`{}` is required for {kind} jobs", required.0),
                    attr_path.attribute(required.0),
                );
            }
            _ => (),
        }
    }
}
