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

use std::fmt::Display;
use std::str::FromStr;

use super::CodecError;

/// Execution engine of an MRS job
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum JobKind {
    /// Flink, batch and stream processing
    Flink,
    /// Hive, with an inline SQL statement
    HiveSql,
    /// Hive, with a SQL file
    HiveScript,
    /// Hadoop MapReduce
    MapReduce,
    /// Spark application submitted to the MRS executor
    SparkSubmit,
    /// Spark, with an inline SQL statement
    SparkSql,
    /// Spark, with a SQL file
    SparkScript,
}

impl JobKind {
    /// Every supported job kind
    pub const ALL: [JobKind; 7] = [
        JobKind::Flink,
        JobKind::HiveSql,
        JobKind::HiveScript,
        JobKind::MapReduce,
        JobKind::SparkSubmit,
        JobKind::SparkSql,
        JobKind::SparkScript,
    ];

    /// Name of the kind as expected by the MRS API
    pub const fn as_str(self) -> &'static str {
        match self {
            JobKind::Flink => "Flink",
            JobKind::HiveSql => "HiveSql",
            JobKind::HiveScript => "HiveScript",
            JobKind::MapReduce => "MapReduce",
            JobKind::SparkSubmit => "SparkSubmit",
            JobKind::SparkSql => "SparkSql",
            JobKind::SparkScript => "SparkScript",
        }
    }

    /// Argument grammar used by this kind
    pub const fn grammar(self) -> Grammar {
        match self {
            JobKind::Flink => Grammar::Flink,
            JobKind::HiveSql | JobKind::HiveScript | JobKind::SparkSql | JobKind::SparkScript => {
                Grammar::Sql
            }
            JobKind::MapReduce => Grammar::MapReduce,
            JobKind::SparkSubmit => Grammar::SparkSubmit,
        }
    }

    /// Kind reported by the API, falling back to `SparkSubmit` for unknown names
    pub fn from_api(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            tracing::debug!("Unknown MRS job type `{name}`, decoding it as SparkSubmit");
            JobKind::SparkSubmit
        })
    }
}

impl FromStr for JobKind {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CodecError::UnknownJobKind(s.to_owned()))
    }
}

impl Display for JobKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape of the argument array, shared by one or more [`JobKind`]s
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Grammar {
    /// `run -d <program parameters> -m yarn-cluster <program path> <parameters>`
    Flink,
    /// `<program parameters> <sql>`
    Sql,
    /// `<program path> <parameters>`
    MapReduce,
    /// `<program parameters> --master yarn-cluster <program path> <parameters>`
    SparkSubmit,
}

impl Grammar {
    pub const fn uses_program_path(self) -> bool {
        !matches!(self, Grammar::Sql)
    }
    pub const fn uses_parameters(self) -> bool {
        !matches!(self, Grammar::Sql)
    }
    pub const fn uses_program_parameters(self) -> bool {
        !matches!(self, Grammar::MapReduce)
    }
    pub const fn uses_sql(self) -> bool {
        matches!(self, Grammar::Sql)
    }
}

impl Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Grammar::Flink => "flink",
            Grammar::Sql => "sql",
            Grammar::MapReduce => "mapreduce",
            Grammar::SparkSubmit => "spark-submit",
        })
    }
}
