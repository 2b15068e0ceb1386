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

use std::collections::BTreeMap;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Body of a job submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateJobOpts {
    pub job_type: String,
    pub job_name: String,
    pub arguments: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
}

/// Response of a job submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSubmitResult {
    pub job_id: String,
    #[serde(default)]
    pub state: String,
}

/// Body of a job deletion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteJobOpts {
    pub job_id_list: Vec<String>,
}

/// Job as reported by the API
///
/// `arguments` and `properties` are stringified collections, see [`crate::codec`].
/// Times are in milliseconds since the epoch, and zero when not reached yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Job {
    pub job_id: String,
    pub job_name: String,
    pub job_type: String,
    pub job_state: String,
    pub job_result: String,
    pub arguments: String,
    pub properties: String,
    pub started_time: i64,
    pub submitted_time: i64,
    pub finished_time: i64,
}

/// Access to the MRS job API of a FlexibleEngine region
///
/// Transport and authentication are left to the implementation.
#[async_trait]
pub trait MrsApi: Send + Sync + 'static {
    /// Submit a new job to a cluster
    async fn create_job(
        &self,
        region: &str,
        cluster_id: &str,
        opts: &CreateJobOpts,
    ) -> Result<JobSubmitResult>;

    /// Get a job, or `None` if it does not exist
    async fn get_job(&self, region: &str, cluster_id: &str, job_id: &str) -> Result<Option<Job>>;

    /// Delete jobs of a cluster
    async fn delete_jobs(&self, region: &str, cluster_id: &str, opts: &DeleteJobOpts)
        -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_response() {
        let job: Job = serde_json::from_str(
            r#"{
                "job_id": "3c0a2b1e-7a43-4b5b-9e2f-0f0c8f2b8a10",
                "user": "admin",
                "job_name": "flink_demo",
                "job_result": "SUCCEEDED",
                "job_state": "FINISHED",
                "job_progress": 100.0,
                "job_type": "Flink",
                "started_time": 1650000000000,
                "submitted_time": 1649999990000,
                "finished_time": 1650000060000,
                "elapsed_time": 60000,
                "arguments": "[run, -d, -m, yarn-cluster, obs://x/driver.jar]",
                "properties": "{}",
                "launcher_id": "application_1649999000000_0001",
                "app_id": "application_1649999000000_0002"
            }"#,
        )
        .unwrap();
        assert_eq!(job.job_type, "Flink");
        assert_eq!(job.job_state, "FINISHED");
        assert_eq!(job.started_time, 1_650_000_000_000);
        assert_eq!(job.arguments, "[run, -d, -m, yarn-cluster, obs://x/driver.jar]");
    }

    #[test]
    fn test_job_response_without_times() {
        let job: Job =
            serde_json::from_str(r#"{"job_id": "id", "job_state": "NEW", "job_type": "MapReduce"}"#)
                .unwrap();
        assert_eq!(job.started_time, 0);
        assert_eq!(job.finished_time, 0);
        assert_eq!(job.arguments, "");
    }

    #[test]
    fn test_create_request() {
        let opts = CreateJobOpts {
            job_type: "MapReduce".into(),
            job_name: "wordcount".into(),
            arguments: vec!["obs://x/wordcount.jar".into(), "in".into(), "out".into()],
            properties: Default::default(),
        };
        assert_eq!(
            serde_json::to_value(&opts).unwrap(),
            serde_json::json!({
                "job_type": "MapReduce",
                "job_name": "wordcount",
                "arguments": ["obs://x/wordcount.jar", "in", "out"],
            })
        );
    }
}
