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


use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use tf_provider::schema::{
    Attribute, AttributeConstraint, AttributeType, Block, Description, Schema,
};
use tf_provider::value::{Value, ValueEmpty, ValueString};
use tf_provider::{map, AttributePath, Diagnostics, DynamicResource, Provider};

use crate::mrs::MrsApi;
use crate::mrs_job::MrsJobResource;

/// `provider "flexibleengine"` block
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Default, Clone)]
pub struct ProviderConfig<'a> {
    #[serde(borrow = "'a")]
    pub region: ValueString<'a>,
}

/// FlexibleEngine provider, serving the MRS job resource
///
/// The API client is shared by every resource.
#[derive(Debug)]
pub struct FlexibleEngineProvider<T: MrsApi> {
    api: Arc<T>,
    region: Arc<OnceLock<String>>,
}

impl<T: MrsApi> FlexibleEngineProvider<T> {
    pub fn new(api: T) -> Self {
        Self {
            api: Arc::new(api),
            region: Default::default(),
        }
    }

    /// Region configured on the provider block, if any
    pub fn region(&self) -> Option<&str> {
        self.region.get().map(String::as_str)
    }
}

#[async_trait]
impl<T: MrsApi> Provider for FlexibleEngineProvider<T> {
    type Config<'a> = ProviderConfig<'a>;
    type MetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(Schema {
            version: 1,
            block: Block {
                attributes: map! {
                    "region" => Attribute {
                        attr_type: AttributeType::String,
                        description: Description::plain("Default region of the resources"),
                        constraint: AttributeConstraint::Optional,
                        ..Default::default()
                    },
                },
                description: Description::plain("flexibleengine"),
                ..Default::default()
            },
        })
    }

    async fn validate<'a>(&self, diags: &mut Diagnostics, config: Self::Config<'a>) -> Option<()> {
        if let Value::Value(region) = &config.region {
            if region.is_empty() {
                diags.error_short("`region` cannot be empty", AttributePath::new("region"));
                return None;
            }
        }
        Some(())
    }

    async fn configure<'a>(
        &self,
        diags: &mut Diagnostics,
        _terraform_version: String,
        config: Self::Config<'a>,
    ) -> Option<()> {
        if let Value::Value(region) = config.region {
            if let Err(region) = self.region.set(region.into_owned()) {
                if self.region.get() != Some(&region) {
                    diags.root_warning(
                        "Provider already configured",
                        format!("Region `{region}` is ignored, the first region is kept."),
                    );
                }
            }
        }
        tracing::debug!("Default region: {:?}", self.region.get());
        Some(())
    }

    fn get_resources(
        &self,
        _diags: &mut Diagnostics,
    ) -> Option<HashMap<String, Box<dyn DynamicResource>>> {
        let mrs_job = MrsJobResource::new(self.api.clone(), self.region.clone());
        Some(map! {
            "mrs_job_v2" => Box::new(mrs_job) as Box<dyn DynamicResource>,
        })
    }
}
