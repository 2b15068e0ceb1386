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

use tf_provider::value::Value;

use crate::codec::{format_timestamp, Arguments, CodecError, JobKind, JobSpec};
use crate::mrs::{CreateJobOpts, Job};
use crate::utils::{known_entries, read_map, read_string};

use super::state::MrsJobState;

impl<'a> MrsJobState<'a> {
    /// Structured job described by the configuration
    pub(super) fn job_spec(&self) -> Result<JobSpec, CodecError> {
        Ok(JobSpec {
            kind: self.job_type.as_str().parse()?,
            arguments: Arguments {
                program_path: self.program_path.as_str().to_owned(),
                parameters: self.parameters.as_str().to_owned(),
                program_parameters: known_entries(&self.program_parameters),
                sql: self.sql.as_str().to_owned(),
            },
            service_properties: known_entries(&self.service_parameters),
        })
    }

    /// Request submitting the configured job
    pub(super) fn create_opts(&self) -> Result<CreateJobOpts, CodecError> {
        let spec = self.job_spec()?;
        let opts = CreateJobOpts {
            job_type: spec.kind.to_string(),
            job_name: self.name.as_str().to_owned(),
            arguments: spec.encode_arguments(),
            properties: spec.service_properties,
        };
        tracing::debug!("Create MRS job options: {opts:?}");
        Ok(opts)
    }

    /// Update the state from a job reported by the API
    ///
    /// The state is left untouched on error.
    pub(super) fn apply_job(&mut self, job: &Job) -> Result<(), CodecError> {
        tracing::debug!("Retrieved MRS job ({}): {job:?}", job.job_id);

        let kind = JobKind::from_api(&job.job_type);
        let spec = JobSpec::decode(kind, &job.arguments, &job.properties)?;
        let start_time = format_timestamp(job.started_time / 1000)?;
        let submit_time = format_timestamp(job.submitted_time / 1000)?;
        let finish_time = format_timestamp(job.finished_time / 1000)?;

        self.id = Value::Value(Cow::Owned(job.job_id.clone()));
        self.name = Value::Value(Cow::Owned(job.job_name.clone()));
        self.job_type = Value::Value(Cow::Owned(job.job_type.clone()));
        self.status = Value::Value(Cow::Owned(job.job_state.clone()));

        let grammar = kind.grammar();
        let arguments = spec.arguments;
        if grammar.uses_program_path() {
            self.program_path = read_string(&self.program_path, arguments.program_path);
        }
        if grammar.uses_parameters() {
            self.parameters = read_string(&self.parameters, arguments.parameters);
        }
        if grammar.uses_program_parameters() {
            self.program_parameters =
                read_map(&self.program_parameters, arguments.program_parameters);
        }
        if grammar.uses_sql() {
            self.sql = read_string(&self.sql, arguments.sql);
        }
        self.service_parameters = read_map(&self.service_parameters, spec.service_properties);

        self.start_time = Value::Value(Cow::Owned(start_time));
        self.submit_time = Value::Value(Cow::Owned(submit_time));
        self.finish_time = Value::Value(Cow::Owned(finish_time));
        Ok(())
    }
}
