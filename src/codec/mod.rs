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

//! Conversion between a structured MRS job and the flattened form used by the MRS API
//!
//! A job is submitted with a single argument array whose layout depends on the job kind,
//! and a map of service properties.
//! When the job is read back, the API reports both as strings
//! (`[run, -d, -m, yarn-cluster, obs://x/driver.jar]` and `{k1=v1, k2=v2}`).
//!
//! ```
//! # use terraform_provider_flexibleengine::codec::{JobKind, JobSpec};
//! let mut spec = JobSpec::new(JobKind::SparkSubmit);
//! spec.arguments.program_path = "job.py".into();
//! spec.arguments.program_parameters.insert("--k".into(), "v".into());
//!
//! let tokens = spec.encode_arguments();
//! assert_eq!(tokens, ["--k", "v", "--master", "yarn-cluster", "job.py", ""]);
//! ```

mod arguments;
mod error;
mod kind;
mod properties;
mod timestamp;
mod wire;

use std::collections::BTreeMap;

pub use arguments::Arguments;
pub use error::CodecError;
pub use kind::{Grammar, JobKind};
pub use properties::{
    format_properties, is_wire_property, parse_properties, try_parse_properties,
};
pub use timestamp::{format_timestamp, format_timestamp_with_offset};
pub use wire::{
    format_argument_list, is_wire_token, parse_argument_list, try_parse_argument_list,
};

/// Structured description of an MRS job
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct JobSpec {
    /// Kind of the job, selects the argument grammar
    pub kind: JobKind,
    /// Fields carried by the argument array
    pub arguments: Arguments,
    /// Service properties, sent beside the arguments
    pub service_properties: BTreeMap<String, String>,
}

impl JobSpec {
    pub fn new(kind: JobKind) -> Self {
        Self {
            kind,
            arguments: Default::default(),
            service_properties: Default::default(),
        }
    }

    /// Argument array to submit
    pub fn encode_arguments(&self) -> Vec<String> {
        self.kind.grammar().encode(&self.arguments)
    }

    /// Rebuild a job from the strings reported by the API
    ///
    /// Arguments without brackets and properties without braces are read as empty.
    ///
    /// # Errors
    ///
    /// Any [`CodecError`] from the grammar of `kind` or from the properties;
    /// nothing is returned from a partially decoded job.
    pub fn decode(kind: JobKind, arguments: &str, properties: &str) -> Result<Self, CodecError> {
        let tokens = parse_argument_list(arguments);
        Ok(Self {
            kind,
            arguments: kind.grammar().decode(&tokens)?,
            service_properties: parse_properties(properties)?,
        })
    }
}
