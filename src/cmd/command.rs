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

use clap::{App, AppSettings, Arg, ArgMatches, ErrorKind};

use super::super::common::*;
use super::super::config::*;
use super::super::muldiv::Strategy;
use super::convert::*;
use super::frames::*;
use super::rescale::*;

pub fn parse_u64(cmd_matches: &ArgMatches, name: &str) -> Result<u64> {
    let val = cmd_matches.value_of(name).unwrap_or_default();
    return val
        .parse::<u64>()
        .map_err(|e| Error::InvalidInput(format!("{} {}: {}", name, val, e)));
}

#[derive(Debug, PartialEq)]
pub enum Command {
    RescaleCmd(RescaleCmd),
    FramesCmd(FramesCmd),
    ConvertCmd(ConvertCmd),
}

impl Command {
    pub fn run(&self, cfg: &Config) -> Result<u64> {
        match self {
            Command::RescaleCmd(c) => c.run(cfg),
            Command::FramesCmd(c) => c.run(cfg),
            Command::ConvertCmd(c) => c.run(cfg),
        }
    }
}

#[derive(Debug)]
pub struct Arguments {
    pub config: Config,
    pub cmd: Command,
}

pub fn app<'a, 'b>() -> App<'a, 'b> {
    return App::new("timescale")
        .about("timescale - exact floor(num * mul / div) and timebase conversion")
        .setting(AppSettings::ColoredHelp)
        .setting(AppSettings::SubcommandRequired)
        .version(crate_version!())
        .arg(
            Arg::with_name("v")
                .multiple(true)
                .help("Sets the level of verbosity")
                .short("v"),
        )
        .arg(
            Arg::with_name("config")
                .help("Path of the config file")
                .default_value(Config::CONFIG_FILE)
                .long("config")
                .short("c")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("strategy")
                .help("Override the rescale strategy: portable or native")
                .long("strategy")
                .short("s")
                .takes_value(true),
        )
        .subcommand(RescaleCmd::sub_command(
            "rescale",
            "prints floor(num * mul / div), wrapping modulo 2^64",
        ))
        .subcommand(RescaleCmd::sub_command(
            "checked",
            "prints floor(num * mul / div), failing if it does not fit in 64 bits",
        ))
        .subcommand(FramesCmd::sub_command(
            "frames-to-ns",
            "converts an audio frame count to nanoseconds",
        ))
        .subcommand(FramesCmd::sub_command(
            "ns-to-frames",
            "converts nanoseconds to whole audio frames",
        ))
        .subcommand(ConvertCmd::sub_command());
}

pub fn parse(args: Vec<String>) -> Result<Arguments> {
    let matches = match app().get_matches_from_safe(args) {
        Ok(m) => m,
        Err(e) => match e.kind {
            ErrorKind::HelpDisplayed | ErrorKind::VersionDisplayed => e.exit(),
            _ => return Err(Error::InvalidInput(e.message)),
        },
    };

    let mut config = Config::load(matches.value_of("config").unwrap_or(Config::CONFIG_FILE))?;

    match matches.occurrences_of("v") {
        0 => (),
        1 => config.debug_level = config.debug_level.max(DebugLevel::Debug),
        _ => config.debug_level = DebugLevel::Trace,
    }

    if let Some(s) = matches.value_of("strategy") {
        config.strategy = s.parse::<Strategy>()?;
    }

    let cmd = match matches.subcommand() {
        ("rescale", Some(cmd_matches)) => Command::RescaleCmd(RescaleCmd::init(cmd_matches, false)?),
        ("checked", Some(cmd_matches)) => Command::RescaleCmd(RescaleCmd::init(cmd_matches, true)?),
        ("frames-to-ns", Some(cmd_matches)) => {
            Command::FramesCmd(FramesCmd::init(cmd_matches, FramesDirection::FramesToNs)?)
        }
        ("ns-to-frames", Some(cmd_matches)) => {
            Command::FramesCmd(FramesCmd::init(cmd_matches, FramesDirection::NsToFrames)?)
        }
        ("convert", Some(cmd_matches)) => Command::ConvertCmd(ConvertCmd::init(cmd_matches)?),
        (name, _) => return Err(Error::InvalidInput(format!("unknown subcommand {}", name))),
    };

    return Ok(Arguments {
        config: config,
        cmd: cmd,
    });
}

#[cfg(test)]
mod tests {
    use simplelog::{LevelFilter, SharedLogger};

    use super::super::super::timebase::*;
    use super::*;

    fn args(line: &str) -> Vec<String> {
        let dir = std::env::temp_dir().join("timescale-no-config.json");
        let mut v = vec![
            "timescale".to_string(),
            "--config".to_string(),
            dir.to_string_lossy().to_string(),
        ];
        v.extend(line.split_whitespace().map(|s| s.to_string()));
        return v;
    }

    #[test]
    fn test_parse_rescale() {
        let a = parse(args("-s portable rescale 1000 3 7")).unwrap();
        assert_eq!(a.config.strategy, Strategy::Portable);
        assert_eq!(
            a.cmd,
            Command::RescaleCmd(RescaleCmd {
                num: 1000,
                mul: 3,
                div: 7,
                checked: false,
            })
        );
        assert_eq!(a.cmd.run(&a.config), Ok(428));
    }

    #[test]
    fn test_parse_checked() {
        let a = parse(args("checked 18446744073709551615 2 1")).unwrap();
        assert_eq!(a.cmd.run(&a.config), Err(Error::Overflow));

        let a = parse(args("rescale 7 5 0")).unwrap();
        assert_eq!(a.cmd.run(&a.config), Err(Error::DivisionByZero));
    }

    #[test]
    fn test_parse_frames() {
        let a = parse(args("frames-to-ns 48000")).unwrap();
        assert_eq!(a.cmd.run(&a.config), Ok(SECOND));

        let a = parse(args("ns-to-frames --rate 44100 1000000000")).unwrap();
        assert_eq!(a.cmd.run(&a.config), Ok(44100));
    }

    #[test]
    fn test_parse_convert() {
        let a = parse(args("convert --from 1/90000 90000")).unwrap();
        assert_eq!(a.cmd.run(&a.config), Ok(SECOND));

        let a = parse(args("convert --from 1001/30000 --to 1/1000 30")).unwrap();
        assert_eq!(a.cmd.run(&a.config), Ok(1001));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse(args("rescale 1 2")).is_err());
        assert!(parse(args("rescale -1 2 3")).is_err());
        assert!(parse(args("-s asm rescale 1 2 3")).is_err());
        assert!(parse(args("convert --from 0/1 5")).is_err());
    }

    #[test]
    fn test_parse_verbosity() {
        let a = parse(args("-v rescale 1 1 1")).unwrap();
        assert_eq!(a.config.debug_level, DebugLevel::Debug);
        let loggers = a.config.loggers().unwrap();
        assert_eq!(loggers[0].level(), LevelFilter::Debug);

        let a = parse(args("-vv rescale 1 1 1")).unwrap();
        assert_eq!(a.config.debug_level, DebugLevel::Trace);
    }
}
