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

use super::kind::Grammar;
use super::CodecError;

const FLINK_RUN: &str = "run";
const FLINK_DETACHED: &str = "-d";
const FLINK_MASTER: &str = "-m";
const SPARK_MASTER: &str = "--master";
const YARN_CLUSTER: &str = "yarn-cluster";

/// Fields of a job carried by the argument array
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Arguments {
    pub program_path: String,
    pub parameters: String,
    pub program_parameters: BTreeMap<String, String>,
    pub sql: String,
}

impl Grammar {
    /// Flag closing the program parameters, which cannot be used as a program parameter
    pub const fn marker(self) -> Option<&'static str> {
        match self {
            Grammar::Flink => Some(FLINK_MASTER),
            Grammar::SparkSubmit => Some(SPARK_MASTER),
            Grammar::Sql | Grammar::MapReduce => None,
        }
    }

    /// Flatten the fields used by this grammar into the argument array
    pub fn encode(self, arguments: &Arguments) -> Vec<String> {
        let named = flatten_named_parameters(&arguments.program_parameters);
        let mut tokens = Vec::new();
        match self {
            Grammar::Flink => {
                tokens.extend([FLINK_RUN.to_owned(), FLINK_DETACHED.to_owned()]);
                tokens.extend(named);
                tokens.extend([FLINK_MASTER.to_owned(), YARN_CLUSTER.to_owned()]);
                tokens.push(arguments.program_path.clone());
                tokens.extend(split_parameters(&arguments.parameters));
            }
            Grammar::Sql => {
                tokens.extend(named);
                tokens.push(arguments.sql.clone());
            }
            Grammar::MapReduce => {
                tokens.push(arguments.program_path.clone());
                tokens.extend(split_parameters(&arguments.parameters));
            }
            Grammar::SparkSubmit => {
                tokens.extend(named);
                tokens.extend([SPARK_MASTER.to_owned(), YARN_CLUSTER.to_owned()]);
                tokens.push(arguments.program_path.clone());
                tokens.extend(split_parameters(&arguments.parameters));
            }
        }
        tokens
    }

    /// Recover the fields used by this grammar from the argument array
    ///
    /// Fields the grammar does not use are left empty.
    pub fn decode<S: AsRef<str>>(self, tokens: &[S]) -> Result<Arguments, CodecError> {
        match self {
            Grammar::Flink => {
                // `run -d`
                let rest = tokens.get(2..).ok_or(CodecError::ArgumentCount {
                    grammar: self,
                    expected: "`run` and `-d`",
                    remaining: tokens.len(),
                })?;
                let (program_parameters, rest) = take_named_parameters(rest, self.marker());
                let (program_path, parameters) = take_program(self, rest)?;
                Ok(Arguments {
                    program_path,
                    parameters,
                    program_parameters,
                    ..Default::default()
                })
            }
            Grammar::Sql => {
                let (program_parameters, rest) = take_named_parameters(tokens, self.marker());
                let sql = rest.first().ok_or(CodecError::MissingStatement)?;
                Ok(Arguments {
                    program_parameters,
                    sql: sql.as_ref().to_owned(),
                    ..Default::default()
                })
            }
            Grammar::MapReduce => {
                let (program_path, rest) =
                    tokens.split_first().ok_or(CodecError::ArgumentCount {
                        grammar: self,
                        expected: "the program path",
                        remaining: 0,
                    })?;
                Ok(Arguments {
                    program_path: program_path.as_ref().to_owned(),
                    parameters: join_parameters(rest),
                    ..Default::default()
                })
            }
            Grammar::SparkSubmit => {
                let (program_parameters, rest) = take_named_parameters(tokens, self.marker());
                let (program_path, parameters) = take_program(self, rest)?;
                Ok(Arguments {
                    program_path,
                    parameters,
                    program_parameters,
                    ..Default::default()
                })
            }
        }
    }
}

fn flatten_named_parameters(named: &BTreeMap<String, String>) -> Vec<String> {
    let tokens = named
        .iter()
        .flat_map(|(k, v)| [k.clone(), v.clone()])
        .collect::<Vec<_>>();
    tracing::debug!("The program parameters are: {tokens:?}");
    tokens
}

fn split_parameters(parameters: &str) -> impl Iterator<Item = String> + '_ {
    parameters.split(' ').map(str::to_owned)
}

fn join_parameters<S: AsRef<str>>(tokens: &[S]) -> String {
    tokens
        .iter()
        .map(|token| token.as_ref())
        .collect::<Vec<&str>>()
        .join(" ")
}

/// Consume key/value pairs until `marker` is at the front, or fewer than two tokens remain
fn take_named_parameters<'t, S: AsRef<str>>(
    mut rest: &'t [S],
    marker: Option<&str>,
) -> (BTreeMap<String, String>, &'t [S]) {
    let mut named = BTreeMap::new();
    while let [key, value, tail @ ..] = rest {
        if marker == Some(key.as_ref()) {
            break;
        }
        named.insert(key.as_ref().to_owned(), value.as_ref().to_owned());
        rest = tail;
    }
    (named, rest)
}

/// Consume `<master flag> yarn-cluster <program path> <parameters...>`
fn take_program<S: AsRef<str>>(
    grammar: Grammar,
    rest: &[S],
) -> Result<(String, String), CodecError> {
    match rest {
        [_master, _cluster, program_path, parameters @ ..] => Ok((
            program_path.as_ref().to_owned(),
            join_parameters(parameters),
        )),
        _ => Err(CodecError::ArgumentCount {
            grammar,
            expected: "the master flag, the cluster mode and the program path",
            remaining: rest.len(),
        }),
    }
}
