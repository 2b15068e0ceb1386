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

use std::future::Future;
use std::time::Duration;

use anyhow::{anyhow, Result};
use tokio::time::{sleep, Instant};

/// Fixed interval polling of a remote state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateChangeConf {
    /// States the remote object goes through before settling
    pub pending: &'static [&'static str],
    /// States that end the wait successfully
    pub target: &'static [&'static str],
    /// Wait before the first refresh
    pub delay: Duration,
    /// Wait between two refreshes
    pub poll_interval: Duration,
    /// Overall deadline, delay included
    pub timeout: Duration,
}

impl StateChangeConf {
    /// Refresh until a target state is reached
    ///
    /// `refresh` returns the remote object with its current state.
    ///
    /// # Errors
    ///
    /// - the refresh failed,
    /// - the state is neither pending nor target,
    /// - the timeout elapsed before a target state was reached.
    pub async fn wait_for_state<T, F, Fut>(&self, mut refresh: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<(T, String)>>,
    {
        let deadline = Instant::now() + self.timeout;
        sleep(self.delay).await;

        loop {
            let (value, state) = refresh().await?;
            tracing::debug!("Refreshed state: {state}");

            if self.target.contains(&state.as_str()) {
                return Ok(value);
            }
            if !self.pending.contains(&state.as_str()) {
                return Err(anyhow!(
                    "unexpected state '{state}', wanted target '{}'",
                    self.target.join(", ")
                ));
            }
            if Instant::now() + self.poll_interval > deadline {
                return Err(anyhow!(
                    "timeout while waiting for state to become '{}' (last state: '{state}', timeout: {:?})",
                    self.target.join(", "),
                    self.timeout
                ));
            }

            sleep(self.poll_interval).await;
        }
    }
}
