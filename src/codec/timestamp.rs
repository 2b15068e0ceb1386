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

use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use super::CodecError;

/// Format epoch seconds as `YYYY-MM-DD hh:mm:ss` in the local time zone
///
/// Zero is formatted as the epoch itself.
/// UTC is used when the local offset cannot be determined.
pub fn format_timestamp(epoch_seconds: i64) -> Result<String, CodecError> {
    let datetime = OffsetDateTime::from_unix_timestamp(epoch_seconds)
        .map_err(|_| CodecError::InvalidTimestamp(epoch_seconds))?;
    let offset = UtcOffset::local_offset_at(datetime).unwrap_or(UtcOffset::UTC);
    format_at_offset(datetime, offset, epoch_seconds)
}

/// Format epoch seconds as `YYYY-MM-DD hh:mm:ss` at a fixed offset
pub fn format_timestamp_with_offset(
    epoch_seconds: i64,
    offset: UtcOffset,
) -> Result<String, CodecError> {
    let datetime = OffsetDateTime::from_unix_timestamp(epoch_seconds)
        .map_err(|_| CodecError::InvalidTimestamp(epoch_seconds))?;
    format_at_offset(datetime, offset, epoch_seconds)
}

fn format_at_offset(
    datetime: OffsetDateTime,
    offset: UtcOffset,
    epoch_seconds: i64,
) -> Result<String, CodecError> {
    datetime
        .to_offset(offset)
        .format(format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second]"
        ))
        .map_err(|_| CodecError::InvalidTimestamp(epoch_seconds))
}
