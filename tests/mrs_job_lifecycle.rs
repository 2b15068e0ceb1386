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
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use tf_provider::value::{Value, ValueMap, ValueString};
use tf_provider::{AttributePath, Diagnostics, Resource};

use terraform_provider_flexibleengine::codec::{format_argument_list, format_properties};
use terraform_provider_flexibleengine::mrs::{
    CreateJobOpts, DeleteJobOpts, Job, JobSubmitResult, MrsApi,
};
use terraform_provider_flexibleengine::{MrsJobResource, MrsJobState};

const CLUSTER: &str = "cluster-1";

/// MRS cluster keeping its jobs in memory
///
/// Every `get_job` moves the job to the next scripted state.
#[derive(Default)]
struct FakeMrs {
    jobs: Mutex<BTreeMap<String, (String, Job)>>,
    script: Mutex<VecDeque<&'static str>>,
    vanish: bool,
}

impl FakeMrs {
    fn scripted(states: &[&'static str]) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(states.iter().copied().collect()),
            ..Default::default()
        })
    }

    fn insert(&self, region: &str, job: Job) {
        self.jobs
            .lock()
            .unwrap()
            .insert(job.job_id.clone(), (region.to_owned(), job));
    }

    fn job(&self, job_id: &str) -> Option<(String, Job)> {
        self.jobs.lock().unwrap().get(job_id).cloned()
    }
}

#[async_trait]
impl MrsApi for FakeMrs {
    async fn create_job(
        &self,
        region: &str,
        cluster_id: &str,
        opts: &CreateJobOpts,
    ) -> Result<JobSubmitResult> {
        if cluster_id != CLUSTER {
            return Err(anyhow!("cluster {cluster_id} not found"));
        }
        let mut jobs = self.jobs.lock().unwrap();
        let job_id = format!("job-{}", jobs.len() + 1);
        let job = Job {
            job_id: job_id.clone(),
            job_name: opts.job_name.clone(),
            job_type: opts.job_type.clone(),
            job_state: "NEW".into(),
            arguments: format_argument_list(&opts.arguments),
            properties: format_properties(&opts.properties),
            submitted_time: 1_650_000_000_000,
            ..Default::default()
        };
        if !self.vanish {
            jobs.insert(job_id.clone(), (region.to_owned(), job));
        }
        Ok(JobSubmitResult {
            job_id,
            state: "COMPLETE".into(),
        })
    }

    async fn get_job(
        &self,
        _region: &str,
        cluster_id: &str,
        job_id: &str,
    ) -> Result<Option<Job>> {
        if cluster_id != CLUSTER {
            return Err(anyhow!("cluster {cluster_id} not found"));
        }
        let mut jobs = self.jobs.lock().unwrap();
        let Some((_, job)) = jobs.get_mut(job_id) else {
            return Ok(None);
        };
        if let Some(state) = self.script.lock().unwrap().pop_front() {
            job.job_state = state.to_owned();
            if state == "RUNNING" {
                job.started_time = 1_650_000_010_000;
            }
            if state == "FINISHED" || state == "FAILED" {
                job.finished_time = 1_650_000_060_000;
            }
        }
        Ok(Some(job.clone()))
    }

    async fn delete_jobs(
        &self,
        _region: &str,
        cluster_id: &str,
        opts: &DeleteJobOpts,
    ) -> Result<()> {
        if cluster_id != CLUSTER {
            return Err(anyhow!("cluster {cluster_id} not found"));
        }
        let mut jobs = self.jobs.lock().unwrap();
        for job_id in &opts.job_id_list {
            jobs.remove(job_id);
        }
        Ok(())
    }
}

fn resource(api: &Arc<FakeMrs>, region: Option<&str>) -> MrsJobResource<FakeMrs> {
    let default_region = OnceLock::new();
    if let Some(region) = region {
        _ = default_region.set(region.to_owned());
    }
    MrsJobResource::new(api.clone(), Arc::new(default_region))
}

fn string_map<'a>(entries: &[(&'a str, &'a str)]) -> ValueMap<'a, ValueString<'a>> {
    Value::Value(
        entries
            .iter()
            .map(|(k, v)| (Cow::Borrowed(*k), Value::from(*v)))
            .collect(),
    )
}

fn flink_job() -> MrsJobState<'static> {
    MrsJobState {
        cluster_id: CLUSTER.into(),
        name: "flink_wordcount".into(),
        job_type: "Flink".into(),
        program_path: "obs://bucket/program/driver.jar".into(),
        parameters: "--input obs://bucket/in --output obs://bucket/out".into(),
        program_parameters: string_map(&[("-ynm", "wordcount"), ("-yjm", "1024")]),
        service_parameters: string_map(&[("fs.obs.endpoint", "obs.eu-west-0.example.com")]),
        ..Default::default()
    }
}

async fn plan_and_create<'a>(
    resource: &MrsJobResource<FakeMrs>,
    diags: &mut Diagnostics,
    config: MrsJobState<'a>,
) -> Option<MrsJobState<'a>> {
    let (planned, private) = resource
        .plan_create(diags, config.clone(), config.clone(), Value::Null)
        .await?;
    let (state, _) = resource
        .create(diags, planned, config, private, Value::Null)
        .await?;
    Some(state)
}

#[tokio::test(start_paused = true)]
async fn test_create_flink_job() {
    let api = FakeMrs::scripted(&["NEW", "RUNNING", "RUNNING", "FINISHED"]);
    let resource = resource(&api, Some("eu-west-0"));
    let mut diags = Diagnostics::default();

    let state = plan_and_create(&resource, &mut diags, flink_job())
        .await
        .unwrap();
    assert!(diags.errors.is_empty(), "{:?}", diags.errors);

    assert_eq!(state.id, Value::from("job-1"));
    assert_eq!(state.region, Value::from("eu-west-0"));
    assert_eq!(state.status, Value::from("FINISHED"));
    assert_eq!(state.program_path, flink_job().program_path);
    assert_eq!(state.parameters, flink_job().parameters);
    assert_eq!(state.program_parameters, flink_job().program_parameters);
    assert_eq!(state.service_parameters, flink_job().service_parameters);
    assert_eq!(state.sql, Value::Null);
    for time in [&state.start_time, &state.submit_time, &state.finish_time] {
        assert_eq!(time.len(), "2022-04-15 05:20:10".len());
    }

    let (region, job) = api.job("job-1").unwrap();
    assert_eq!(region, "eu-west-0");
    assert_eq!(
        job.arguments,
        "[run, -d, -yjm, 1024, -ynm, wordcount, -m, yarn-cluster, obs://bucket/program/driver.jar, \
         --input, obs://bucket/in, --output, obs://bucket/out]"
    );
    assert_eq!(job.properties, "{fs.obs.endpoint=obs.eu-west-0.example.com}");
}

#[tokio::test(start_paused = true)]
async fn test_create_waits_before_polling() {
    let api = FakeMrs::scripted(&["RUNNING", "FINISHED"]);
    let resource = resource(&api, Some("eu-west-0"));
    let mut diags = Diagnostics::default();

    let start = tokio::time::Instant::now();
    plan_and_create(&resource, &mut diags, flink_job())
        .await
        .unwrap();
    assert_eq!(start.elapsed(), Duration::from_secs(30 + 10));
}

#[tokio::test(start_paused = true)]
async fn test_create_sql_job() {
    let api = FakeMrs::scripted(&["FINISHED"]);
    let resource = resource(&api, None);
    let mut diags = Diagnostics::default();

    let config = MrsJobState {
        region: "eu-west-1".into(),
        cluster_id: CLUSTER.into(),
        name: "hive_count".into(),
        job_type: "HiveSql".into(),
        sql: "SELECT count(*) FROM logs".into(),
        ..Default::default()
    };
    let state = plan_and_create(&resource, &mut diags, config)
        .await
        .unwrap();
    assert!(diags.errors.is_empty(), "{:?}", diags.errors);
    assert_eq!(state.region, Value::from("eu-west-1"));
    assert_eq!(state.sql, Value::from("SELECT count(*) FROM logs"));
    assert_eq!(state.program_parameters, Value::Null);
    assert_eq!(state.program_path, Value::Null);

    let (_, job) = api.job("job-1").unwrap();
    assert_eq!(job.arguments, "[SELECT count(*) FROM logs]");
}

#[tokio::test(start_paused = true)]
async fn test_create_spark_job_with_java_options() {
    let api = FakeMrs::scripted(&["FINISHED"]);
    let resource = resource(&api, Some("eu-west-0"));
    let mut diags = Diagnostics::default();

    let config = MrsJobState {
        cluster_id: CLUSTER.into(),
        name: "spark_logs".into(),
        job_type: "SparkSubmit".into(),
        program_path: "obs://bucket/program/logs.py".into(),
        service_parameters: string_map(&[
            ("spark.driver.extraJavaOptions", "-Dlog4j.configuration=file.xml"),
            ("spark.executor.memory", "2g"),
        ]),
        ..Default::default()
    };
    resource.validate(&mut diags, config.clone()).await.unwrap();
    let state = plan_and_create(&resource, &mut diags, config.clone())
        .await
        .unwrap();
    assert!(diags.errors.is_empty(), "{:?}", diags.errors);
    assert_eq!(state.service_parameters, config.service_parameters);

    let (_, job) = api.job("job-1").unwrap();
    assert_eq!(
        job.properties,
        "{spark.driver.extraJavaOptions=-Dlog4j.configuration=file.xml, spark.executor.memory=2g}"
    );
}

#[tokio::test]
async fn test_sql_with_separator_is_invalid() {
    let api = FakeMrs::scripted(&[]);
    let resource = resource(&api, Some("eu-west-0"));
    let mut diags = Diagnostics::default();

    let config = MrsJobState {
        cluster_id: CLUSTER.into(),
        name: "hive_select".into(),
        job_type: "HiveSql".into(),
        sql: "SELECT a, b, c FROM t".into(),
        ..Default::default()
    };
    assert!(resource.validate(&mut diags, config).await.is_none());
    assert_eq!(diags.errors.len(), 1);
    assert_eq!(diags.errors[0].attribute, AttributePath::new("sql"));
}

#[tokio::test(start_paused = true)]
async fn test_failed_job_is_created() {
    let api = FakeMrs::scripted(&["RUNNING", "FAILED"]);
    let resource = resource(&api, Some("eu-west-0"));
    let mut diags = Diagnostics::default();

    let state = plan_and_create(&resource, &mut diags, flink_job())
        .await
        .unwrap();
    assert!(diags.errors.is_empty());
    assert_eq!(state.status, Value::from("FAILED"));
}

#[tokio::test(start_paused = true)]
async fn test_vanished_job() {
    let api = Arc::new(FakeMrs {
        vanish: true,
        ..Default::default()
    });
    let resource = resource(&api, Some("eu-west-0"));
    let mut diags = Diagnostics::default();

    // the job was submitted: it is kept in the state along with the error
    let state = plan_and_create(&resource, &mut diags, flink_job())
        .await
        .unwrap();
    assert_eq!(diags.errors.len(), 1);
    assert!(diags.errors[0].detail.contains("DELETED"));
    assert_eq!(state.id, Value::from("job-1"));
    assert!(!state.status.is_unknown());
    assert!(!state.finish_time.is_unknown());
}

#[tokio::test(start_paused = true)]
async fn test_create_timeout() {
    let running = ["RUNNING"; 200];
    let api = FakeMrs::scripted(&running);
    let resource = resource(&api, Some("eu-west-0"));
    let mut diags = Diagnostics::default();

    let start = tokio::time::Instant::now();
    let state = plan_and_create(&resource, &mut diags, flink_job())
        .await
        .unwrap();
    assert!(start.elapsed() <= Duration::from_secs(20 * 60));
    assert_eq!(diags.errors.len(), 1);
    assert!(diags.errors[0].detail.contains("timeout"));
    assert_eq!(state.id, Value::from("job-1"));
}

#[tokio::test(start_paused = true)]
async fn test_create_unknown_cluster() {
    let api = FakeMrs::scripted(&[]);
    let resource = resource(&api, Some("eu-west-0"));
    let mut diags = Diagnostics::default();

    let config = MrsJobState {
        cluster_id: "missing".into(),
        ..flink_job()
    };
    assert!(plan_and_create(&resource, &mut diags, config).await.is_none());
    assert_eq!(diags.errors.len(), 1);
    assert_eq!(diags.errors[0].summary, "Failed to create MRS job");
}

#[tokio::test]
async fn test_plan_without_region() {
    let api = FakeMrs::scripted(&[]);
    let resource = resource(&api, None);
    let mut diags = Diagnostics::default();

    let config = flink_job();
    let planned = resource
        .plan_create(&mut diags, config.clone(), config, Value::Null)
        .await;
    assert!(planned.is_none());
    assert_eq!(diags.errors[0].attribute, AttributePath::new("region"));
}

#[tokio::test]
async fn test_plan_create_marks_outputs_unknown() {
    let api = FakeMrs::scripted(&[]);
    let resource = resource(&api, Some("eu-west-0"));
    let mut diags = Diagnostics::default();

    let config = flink_job();
    let (planned, _) = resource
        .plan_create(&mut diags, config.clone(), config, Value::Null)
        .await
        .unwrap();
    assert!(planned.id.is_unknown());
    assert!(planned.status.is_unknown());
    assert!(planned.start_time.is_unknown());
    assert_eq!(planned.region, Value::from("eu-west-0"));
}

#[tokio::test]
async fn test_plan_update_replaces_on_change() {
    let api = FakeMrs::scripted(&[]);
    let resource = resource(&api, Some("eu-west-0"));
    let mut diags = Diagnostics::default();

    let prior = MrsJobState {
        id: "job-1".into(),
        region: "eu-west-0".into(),
        status: "FINISHED".into(),
        ..flink_job()
    };

    let (_, _, replace) = resource
        .plan_update(
            &mut diags,
            prior.clone(),
            prior.clone(),
            prior.clone(),
            Value::Null,
            Value::Null,
        )
        .await
        .unwrap();
    assert!(replace.is_empty());

    let proposed = MrsJobState {
        parameters: "--input obs://bucket/other".into(),
        service_parameters: Value::Null,
        ..prior.clone()
    };
    let (planned, _, replace) = resource
        .plan_update(
            &mut diags,
            prior,
            proposed.clone(),
            proposed,
            Value::Null,
            Value::Null,
        )
        .await
        .unwrap();
    assert_eq!(
        replace,
        vec![
            AttributePath::new("parameters"),
            AttributePath::new("service_parameters"),
        ]
    );
    assert_eq!(planned.id, Value::from("job-1"));
}

#[tokio::test]
async fn test_import_and_read() {
    let api = FakeMrs::scripted(&[]);
    api.insert(
        "eu-west-0",
        Job {
            job_id: "4a3b".into(),
            job_name: "spark_pi".into(),
            job_type: "SparkSubmit".into(),
            job_state: "FINISHED".into(),
            arguments: "[--class, org.apache.spark.examples.SparkPi, --master, yarn-cluster, \
                        obs://bucket/spark-examples.jar, 100]"
                .into(),
            properties: "{}".into(),
            started_time: 1_650_000_010_000,
            submitted_time: 1_650_000_000_000,
            finished_time: 1_650_000_060_000,
            ..Default::default()
        },
    );
    let resource = resource(&api, Some("eu-west-0"));
    let mut diags = Diagnostics::default();

    let (imported, private) = resource
        .import(&mut diags, format!("{CLUSTER}/4a3b"))
        .await
        .unwrap();
    assert_eq!(imported.id, Value::from("4a3b"));
    assert_eq!(imported.cluster_id, Value::from(CLUSTER));

    let (state, _) = resource
        .read(&mut diags, imported, private, Value::Null)
        .await
        .unwrap();
    assert!(diags.errors.is_empty(), "{:?}", diags.errors);
    assert_eq!(state.region, Value::from("eu-west-0"));
    assert_eq!(state.name, Value::from("spark_pi"));
    assert_eq!(state.job_type, Value::from("SparkSubmit"));
    assert_eq!(state.program_path, Value::from("obs://bucket/spark-examples.jar"));
    assert_eq!(state.parameters, Value::from("100"));
    assert_eq!(
        state.program_parameters,
        string_map(&[("--class", "org.apache.spark.examples.SparkPi")])
    );
    assert_eq!(state.service_parameters, Value::Null);
}

#[tokio::test]
async fn test_import_invalid_id() {
    let api = FakeMrs::scripted(&[]);
    let resource = resource(&api, Some("eu-west-0"));

    for id in ["4a3b", "/4a3b", "cluster-1/", ""] {
        let mut diags = Diagnostics::default();
        assert!(resource.import(&mut diags, id.to_owned()).await.is_none());
        assert_eq!(diags.errors.len(), 1, "{id}");
    }
}

#[tokio::test]
async fn test_read_undecodable_job() {
    let api = FakeMrs::scripted(&[]);
    api.insert(
        "eu-west-0",
        Job {
            job_id: "flink-1".into(),
            job_type: "Flink".into(),
            job_state: "FINISHED".into(),
            arguments: "[run, -d]".into(),
            properties: "{}".into(),
            ..Default::default()
        },
    );
    let resource = resource(&api, Some("eu-west-0"));
    let mut diags = Diagnostics::default();

    let state = MrsJobState {
        id: "flink-1".into(),
        ..flink_job()
    };
    assert!(resource
        .read(&mut diags, state, Value::Null, Value::Null)
        .await
        .is_none());
    assert_eq!(diags.errors[0].summary, "Failed to decode MRS job");
}

#[tokio::test(start_paused = true)]
async fn test_destroy() {
    let api = FakeMrs::scripted(&["FINISHED"]);
    let resource = resource(&api, Some("eu-west-0"));
    let mut diags = Diagnostics::default();

    let state = plan_and_create(&resource, &mut diags, flink_job())
        .await
        .unwrap();
    let private = resource
        .plan_destroy(&mut diags, state.clone(), Value::Null, Value::Null)
        .await
        .unwrap();
    resource
        .destroy(&mut diags, state.clone(), private, Value::Null)
        .await
        .unwrap();
    assert!(api.job("job-1").is_none());

    assert!(resource
        .read(&mut diags, state, Value::Null, Value::Null)
        .await
        .is_none());
    assert_eq!(diags.errors[0].summary, "MRS job not found");
}
