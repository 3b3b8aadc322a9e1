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
use super::super::muldiv::*;
use super::command::*;

// RescaleCmd computes floor(num * mul / div). The checked form reports an
// overflow instead of wrapping.
#[derive(Debug, PartialEq)]
pub struct RescaleCmd {
    pub num: u64,
    pub mul: u64,
    pub div: u64,
    pub checked: bool,
}

impl RescaleCmd {
    pub fn init(cmd_matches: &ArgMatches, checked: bool) -> Result<Self> {
        return Ok(Self {
            num: parse_u64(cmd_matches, "num")?,
            mul: parse_u64(cmd_matches, "mul")?,
            div: parse_u64(cmd_matches, "div")?,
            checked: checked,
        });
    }

    pub fn sub_command<'a, 'b>(name: &str, about: &'b str) -> App<'a, 'b> {
        return SubCommand::with_name(name)
            .setting(AppSettings::ColoredHelp)
            .arg(Arg::with_name("num").required(true).index(1).help("value to rescale"))
            .arg(Arg::with_name("mul").required(true).index(2).help("multiplier"))
            .arg(Arg::with_name("div").required(true).index(3).help("divisor"))
            .about(about);
    }

    pub fn run(&self, cfg: &Config) -> Result<u64> {
        debug!(
            "rescale {} * {} / {} with {:?}, checked {}",
            self.num, self.mul, self.div, cfg.strategy, self.checked
        );

        if self.checked {
            return muldiv64_with(cfg.strategy, self.num, self.mul, self.div);
        }

        return rescale_div_mod_with(cfg.strategy, self.num, self.mul, self.div);
    }
}
