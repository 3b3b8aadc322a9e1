// Copyright (c) 2021 Quark Container Authors / 2018 The gVisor Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
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

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};

use super::super::common::*;
use super::super::config::Config;
use super::super::timebase::*;
use super::command::*;

// ConvertCmd rescales a tick count between two timebases.
#[derive(Debug, PartialEq)]
pub struct ConvertCmd {
    pub from: Timebase,
    pub to: Timebase,
    pub value: u64,
}

impl ConvertCmd {
    pub fn init(cmd_matches: &ArgMatches) -> Result<Self> {
        let timebase = |name: &str| -> Result<Timebase> {
            return cmd_matches.value_of(name).unwrap_or_default().parse();
        };

        return Ok(Self {
            from: timebase("from")?,
            to: timebase("to")?,
            value: parse_u64(cmd_matches, "value")?,
        });
    }

    pub fn sub_command<'a, 'b>() -> App<'a, 'b> {
        return SubCommand::with_name("convert")
            .setting(AppSettings::ColoredHelp)
            .arg(
                Arg::with_name("from")
                    .long("from")
                    .takes_value(true)
                    .required(true)
                    .help("source timebase as num/den seconds per tick, e.g. 1/90000"),
            )
            .arg(
                Arg::with_name("to")
                    .long("to")
                    .takes_value(true)
                    .default_value("1/1000000000")
                    .help("target timebase, defaults to nanoseconds"),
            )
            .arg(Arg::with_name("value").required(true).index(1))
            .about("rescales a tick count from one timebase to another");
    }

    pub fn run(&self, _cfg: &Config) -> Result<u64> {
        debug!("convert {} ticks of {} to {}", self.value, self.from, self.to);
        return self.from.rescale(self.value, &self.to);
    }
}
