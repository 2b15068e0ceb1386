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
use tf_provider::Diagnostics;

use crate::utils::WithNormalize;

use super::state::MrsJobState;

impl WithNormalize for MrsJobState<'_> {
    fn normalize(&mut self, _diags: &mut Diagnostics) {
        for computed in [
            &mut self.id,
            &mut self.status,
            &mut self.start_time,
            &mut self.submit_time,
            &mut self.finish_time,
        ] {
            if computed.is_null() {
                *computed = Value::Unknown;
            }
        }
    }
}

impl MrsJobState<'_> {
    /// Computed attributes that could not be read are stored as null
    pub(super) fn clear_unknown(&mut self) {
        for computed in [
            &mut self.region,
            &mut self.status,
            &mut self.start_time,
            &mut self.submit_time,
            &mut self.finish_time,
        ] {
            if computed.is_unknown() {
                *computed = Value::Null;
            }
        }
    }
}
