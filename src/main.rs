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

#[macro_use]
extern crate log;
extern crate simplelog;
extern crate timescale;

use std::env;

use simplelog::CombinedLogger;

use timescale::cmd::command::*;
use timescale::config::Config as TimescaleConfig;
use timescale::Result;

fn init_logger(cfg: &TimescaleConfig) -> Result<()> {
    let loggers = cfg.loggers()?;
    if let Err(e) = CombinedLogger::init(loggers) {
        eprintln!("timescale: logger init fail {}", e);
    }

    return Ok(());
}

fn main() {
    let args = match parse(env::args().collect()) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("timescale: {}", e);
            ::std::process::exit(1);
        }
    };

    if let Err(e) = init_logger(&args.config) {
        eprintln!("timescale: unable to open debug log {}: {}", args.config.debug_log, e);
        ::std::process::exit(1);
    }

    args.config.print();

    match args.cmd.run(&args.config) {
        Ok(v) => println!("{}", v),
        Err(e) => {
            error!("{:?} failed: {}", args.cmd, e);
            ::std::process::exit(1);
        }
    }
}
