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

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FramesDirection {
    FramesToNs,
    NsToFrames,
}

// FramesCmd converts between audio frame counts and nanoseconds.
#[derive(Debug, PartialEq)]
pub struct FramesCmd {
    pub rate: u64,
    pub value: u64,
    pub direction: FramesDirection,
}

impl FramesCmd {
    pub fn init(cmd_matches: &ArgMatches, direction: FramesDirection) -> Result<Self> {
        return Ok(Self {
            rate: parse_u64(cmd_matches, "rate")?,
            value: parse_u64(cmd_matches, "value")?,
            direction: direction,
        });
    }

    pub fn sub_command<'a, 'b>(name: &str, about: &'b str) -> App<'a, 'b> {
        return SubCommand::with_name(name)
            .setting(AppSettings::ColoredHelp)
            .arg(
                Arg::with_name("rate")
                    .long("rate")
                    .short("r")
                    .takes_value(true)
                    .default_value("48000")
                    .help("sample rate in Hz"),
            )
            .arg(Arg::with_name("value").required(true).index(1))
            .about(about);
    }

    pub fn run(&self, _cfg: &Config) -> Result<u64> {
        match self.direction {
            FramesDirection::FramesToNs => frames_to_ns(self.rate, self.value),
            FramesDirection::NsToFrames => ns_to_frames(self.rate, self.value),
        }
    }
}
