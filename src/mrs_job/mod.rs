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


//! `flexibleengine_mrs_job_v2` resource

use std::borrow::Cow;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use async_trait::async_trait;

use tf_provider::schema::Schema;
use tf_provider::value::{Value, ValueEmpty};
use tf_provider::{AttributePath, Diagnostics, Resource};

use crate::mrs::{DeleteJobOpts, Job, MrsApi, StateChangeConf};
use crate::utils::{WithNormalize, WithSchema, WithValidate};

mod normalize;
mod read;
mod state;
mod validate;

pub use state::MrsJobState;

/// State reported for a job the API does not know
const JOB_DELETED: &str = "DELETED";

const CREATE_WAIT: StateChangeConf = StateChangeConf {
    pending: &["NEW", "NEW_SAVING", "ACCEPTED", "SUBMITTED", "RUNNING"],
    target: &["FINISHED", "FAILED"],
    delay: Duration::from_secs(30),
    poll_interval: Duration::from_secs(10),
    timeout: Duration::from_secs(20 * 60),
};

/// Job submitted to an MRS cluster
///
/// Every input forces a new job: the API cannot modify a submitted job.
#[derive(Debug)]
pub struct MrsJobResource<T: MrsApi> {
    api: Arc<T>,
    default_region: Arc<OnceLock<String>>,
}

impl<T: MrsApi> MrsJobResource<T> {
    pub fn new(api: Arc<T>, default_region: Arc<OnceLock<String>>) -> Self {
        Self {
            api,
            default_region,
        }
    }

    /// Region of the job, falling back to the region of the provider
    fn region(&self, diags: &mut Diagnostics, state: &MrsJobState<'_>) -> Option<String> {
        match &state.region {
            Value::Value(region) => Some(region.to_string()),
            Value::Null => match self.default_region.get() {
                Some(region) => Some(region.clone()),
                None => {
                    diags.error(
                        "Missing region",
                        "Set `region` on the resource or on the provider.",
                        AttributePath::new("region"),
                    );
                    None
                }
            },
            Value::Unknown => {
                diags.error_short("`region` is not known", AttributePath::new("region"));
                None
            }
        }
    }

    /// Wait for a freshly submitted job to complete
    async fn wait_for_job(
        &self,
        region: &str,
        cluster_id: &str,
        job_id: &str,
    ) -> anyhow::Result<Job> {
        let api = &self.api;
        CREATE_WAIT
            .wait_for_state(|| async move {
                Ok(match api.get_job(region, cluster_id, job_id).await? {
                    Some(job) => {
                        let state = job.job_state.clone();
                        (job, state)
                    }
                    None => (Job::default(), JOB_DELETED.to_owned()),
                })
            })
            .await
    }
}

#[async_trait]
impl<T: MrsApi> Resource for MrsJobResource<T> {
    type State<'a> = MrsJobState<'a>;
    type PrivateState<'a> = ValueEmpty;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(MrsJobState::schema())
    }

    async fn validate<'a>(&self, diags: &mut Diagnostics, config: Self::State<'a>) -> Option<()> {
        config.validate(diags, AttributePath::root());

        if diags.errors.is_empty() {
            Some(())
        } else {
            None
        }
    }

    async fn read<'a>(
        &self,
        diags: &mut Diagnostics,
        state: Self::State<'a>,
        private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let mut state = state;
        let region = self.region(diags, &state)?;

        let job = match self
            .api
            .get_job(&region, state.cluster_id.as_str(), state.id.as_str())
            .await
        {
            Ok(Some(job)) => job,
            Ok(None) => {
                diags.root_error(
                    "MRS job not found",
                    format!(
                        "Job `{}` does not exist in cluster `{}`.",
                        state.id, state.cluster_id
                    ),
                );
                return None;
            }
            Err(err) => {
                diags.root_error("Failed to read MRS job", err.to_string());
                return None;
            }
        };

        if let Err(err) = state.apply_job(&job) {
            diags.root_error("Failed to decode MRS job", err.to_string());
            return None;
        }
        state.region = Value::Value(Cow::Owned(region));

        Some((state, private_state))
    }

    async fn plan_create<'a>(
        &self,
        diags: &mut Diagnostics,
        proposed_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let mut state = proposed_state;
        state.normalize(diags);
        if state.region.is_null() {
            state.region = Value::Value(Cow::Owned(self.region(diags, &state)?));
        }

        Some((state, Default::default()))
    }

    async fn plan_update<'a>(
        &self,
        diags: &mut Diagnostics,
        prior_state: Self::State<'a>,
        proposed_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        prior_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>, Vec<AttributePath>)> {
        let mut state = proposed_state;
        state.normalize(diags);

        let trigger_replace = prior_state
            .inputs()
            .into_iter()
            .zip(state.inputs())
            .filter(|((_, prior), (_, proposed))| prior != proposed)
            .map(|((name, _), _)| AttributePath::new(name))
            .collect();

        Some((state, prior_private_state, trigger_replace))
    }

    async fn plan_destroy<'a>(
        &self,
        _diags: &mut Diagnostics,
        _prior_state: Self::State<'a>,
        prior_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<Self::PrivateState<'a>> {
        Some(prior_private_state)
    }

    async fn create<'a>(
        &self,
        diags: &mut Diagnostics,
        planned_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        planned_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let mut state = planned_state;
        let region = self.region(diags, &state)?;
        let cluster_id = state.cluster_id.as_str().to_owned();

        let opts = match state.create_opts() {
            Ok(opts) => opts,
            Err(err) => {
                diags.error(
                    "Invalid MRS job",
                    err.to_string(),
                    AttributePath::new("type"),
                );
                return None;
            }
        };

        let job_id = match self.api.create_job(&region, &cluster_id, &opts).await {
            Ok(submitted) => submitted.job_id,
            Err(err) => {
                diags.root_error("Failed to create MRS job", err.to_string());
                return None;
            }
        };
        tracing::debug!("MRS job created: {job_id}");
        state.id = Value::Value(Cow::Owned(job_id.clone()));
        state.region = Value::Value(Cow::Owned(region.clone()));

        // The job exists from now on: failures below keep it in the state
        match self.wait_for_job(&region, &cluster_id, &job_id).await {
            Ok(job) => {
                if let Err(err) = state.apply_job(&job) {
                    diags.root_error("Failed to decode MRS job", err.to_string());
                }
            }
            Err(err) => {
                diags.root_error(
                    format!("Error waiting for MRS job ({job_id}) to complete"),
                    err.to_string(),
                );
            }
        }
        state.clear_unknown();

        Some((state, planned_private_state))
    }

    async fn update<'a>(
        &self,
        _diags: &mut Diagnostics,
        _prior_state: Self::State<'a>,
        planned_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        planned_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        Some((planned_state, planned_private_state))
    }

    async fn destroy<'a>(
        &self,
        diags: &mut Diagnostics,
        prior_state: Self::State<'a>,
        _planned_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<()> {
        let region = self.region(diags, &prior_state)?;
        let opts = DeleteJobOpts {
            job_id_list: vec![prior_state.id.as_str().to_owned()],
        };

        match self
            .api
            .delete_jobs(&region, prior_state.cluster_id.as_str(), &opts)
            .await
        {
            Ok(()) => Some(()),
            Err(err) => {
                diags.root_error("Failed to delete MRS job", err.to_string());
                None
            }
        }
    }

    async fn import<'a>(
        &self,
        diags: &mut Diagnostics,
        id: String,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        match id.split_once('/') {
            Some((cluster_id, job_id)) if !cluster_id.is_empty() && !job_id.is_empty() => {
                let state = MrsJobState {
                    id: Value::from(job_id.to_owned()),
                    cluster_id: Value::from(cluster_id.to_owned()),
                    ..Default::default()
                };
                Some((state, Default::default()))
            }
            _ => {
                diags.root_error(
                    "Invalid import ID",
                    format!("`{id}` must be of the form <cluster_id>/<id>"),
                );
                None
            }
        }
    }
}
