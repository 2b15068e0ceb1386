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


use serde::{Deserialize, Serialize};

use tf_provider::map;
use tf_provider::schema::{
    Attribute, AttributeConstraint, AttributeType, Block, Description, Schema,
};
use tf_provider::value::{ValueMap, ValueString};

use crate::utils::WithSchema;

/// Terraform state of a `flexibleengine_mrs_job_v2`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MrsJobState<'a> {
    #[serde(borrow = "'a")]
    pub id: ValueString<'a>,
    pub region: ValueString<'a>,
    pub cluster_id: ValueString<'a>,
    pub name: ValueString<'a>,
    #[serde(rename = "type")]
    pub job_type: ValueString<'a>,
    pub program_path: ValueString<'a>,
    pub parameters: ValueString<'a>,
    pub sql: ValueString<'a>,
    pub program_parameters: ValueMap<'a, ValueString<'a>>,
    pub service_parameters: ValueMap<'a, ValueString<'a>>,
    pub status: ValueString<'a>,
    pub start_time: ValueString<'a>,
    pub submit_time: ValueString<'a>,
    pub finish_time: ValueString<'a>,
}

impl MrsJobState<'_> {
    /// Attributes set by the practitioner, any change replaces the job
    pub(super) fn inputs(&self) -> [(&'static str, Input<'_>); 9] {
        [
            ("region", Input::String(&self.region)),
            ("cluster_id", Input::String(&self.cluster_id)),
            ("name", Input::String(&self.name)),
            ("type", Input::String(&self.job_type)),
            ("program_path", Input::String(&self.program_path)),
            ("parameters", Input::String(&self.parameters)),
            ("sql", Input::String(&self.sql)),
            ("program_parameters", Input::Map(&self.program_parameters)),
            ("service_parameters", Input::Map(&self.service_parameters)),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Input<'s> {
    String(&'s ValueString<'s>),
    Map(&'s ValueMap<'s, ValueString<'s>>),
}

impl WithSchema for MrsJobState<'_> {
    fn schema() -> Schema {
        let input = |attr_type: AttributeType,
                     description: &str,
                     constraint: AttributeConstraint| Attribute {
            attr_type,
            description: Description::plain(description),
            constraint,
            ..Default::default()
        };
        let output = |description: &str| Attribute {
            attr_type: AttributeType::String,
            description: Description::plain(description),
            constraint: AttributeConstraint::Computed,
            ..Default::default()
        };
        let string_map = || AttributeType::Map(AttributeType::String.into());

        Schema {
            version: 1,
            block: Block {
                version: 1,
                attributes: map! {
                    "id" => output("ID of the job"),
                    "region" => input(
                        AttributeType::String,
                        "Region of the cluster, defaults to the region of the provider",
                        AttributeConstraint::OptionalComputed,
                    ),
                    "cluster_id" => input(
                        AttributeType::String,
                        "ID of the MRS cluster running the job",
                        AttributeConstraint::Required,
                    ),
                    "name" => input(
                        AttributeType::String,
                        "Name of the job: letters, digits, `_` and `-`, up to 64 characters",
                        AttributeConstraint::Required,
                    ),
                    "type" => input(
                        AttributeType::String,
                        "Type of the job: Flink, HiveSql, HiveScript, MapReduce, SparkSubmit, SparkSql or SparkScript",
                        AttributeConstraint::Required,
                    ),
                    "program_path" => input(
                        AttributeType::String,
                        "Path of the program (jar or script) to run, unused by SQL jobs",
                        AttributeConstraint::Optional,
                    ),
                    "parameters" => input(
                        AttributeType::String,
                        "Space separated parameters passed to the program, unused by SQL jobs",
                        AttributeConstraint::Optional,
                    ),
                    "sql" => input(
                        AttributeType::String,
                        "SQL statement or path of the SQL file, used by Hive and Spark SQL jobs",
                        AttributeConstraint::Optional,
                    ),
                    "program_parameters" => input(
                        string_map(),
                        "Options of the job engine, unused by MapReduce jobs",
                        AttributeConstraint::Optional,
                    ),
                    "service_parameters" => input(
                        string_map(),
                        "Service configuration of the job",
                        AttributeConstraint::Optional,
                    ),
                    "status" => output("Status of the job"),
                    "start_time" => output("Start time of the job"),
                    "submit_time" => output("Submission time of the job"),
                    "finish_time" => output("Completion time of the job"),
                },
                description: Description::plain("MapReduce Service job"),
                ..Default::default()
            },
        }
    }
}
