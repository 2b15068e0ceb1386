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


//! FlexibleEngine provider for Terraform and OpenTofu
//!
//! It manages jobs of the MapReduce Service (MRS) with the `flexibleengine_mrs_job_v2` resource.
//! The MRS API flattens the description of a job into a list of arguments whose layout
//! depends on the type of the job; the [`codec`] module converts between both forms.
//!
//! The provider is generic over the [`MrsApi`] client:
//!
//! ```no_run
//! # use terraform_provider_flexibleengine::{FlexibleEngineProvider, MrsApi};
//! # async fn run(api: impl MrsApi) -> anyhow::Result<()> {
//! tf_provider::serve("flexibleengine", FlexibleEngineProvider::new(api)).await
//! # }
//! ```

pub mod codec;
pub mod mrs;
mod mrs_job;
mod provider;
mod utils;

pub use mrs::MrsApi;
pub use mrs_job::{MrsJobResource, MrsJobState};
pub use provider::{FlexibleEngineProvider, ProviderConfig};
