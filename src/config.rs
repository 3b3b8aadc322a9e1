// Copyright (c) 2021 Quark Container Authors
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

use std::fs;
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

use simplelog::{
    Config as LogConfig, LevelFilter, SharedLogger, SimpleLogger, TermLogger, TerminalMode,
    WriteLogger,
};

use super::common::*;
use super::muldiv::Strategy;

#[derive(Clone, Copy, Debug, PartialOrd, Ord, Eq, PartialEq, Serialize, Deserialize)]
pub enum DebugLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Default for DebugLevel {
    fn default() -> Self {
        return Self::Error;
    }
}

impl DebugLevel {
    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            DebugLevel::Off => LevelFilter::Off,
            DebugLevel::Error => LevelFilter::Error,
            DebugLevel::Warn => LevelFilter::Warn,
            DebugLevel::Info => LevelFilter::Info,
            DebugLevel::Debug => LevelFilter::Debug,
            DebugLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // Strategy is the default evaluation strategy for rescales.
    #[serde(rename = "Strategy")]
    pub strategy: Strategy,

    #[serde(rename = "DebugLevel")]
    pub debug_level: DebugLevel,

    // DebugLog is the path to log debug information to, if not empty.
    #[serde(rename = "DebugLog")]
    pub debug_log: String,
}

impl Default for Config {
    fn default() -> Self {
        return Self {
            strategy: Strategy::default(),
            debug_level: DebugLevel::default(),
            debug_log: String::default(),
        };
    }
}

impl Config {
    pub const CONFIG_FILE: &'static str = "/etc/timescale/config.json";

    // load reads the config file at path. A missing file yields the default
    // config; a file that exists but does not parse is an error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = match fs::read_to_string(path.as_ref()) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };

        let config: Config = serde_json::from_str(&contents)?;
        return Ok(config);
    }

    // loggers returns the terminal logger and, when DebugLog is set, a file
    // logger, both filtered at DebugLevel.
    pub fn loggers(&self) -> Result<Vec<Box<dyn SharedLogger>>> {
        let level = self.debug_level.to_level_filter();

        let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
        match TermLogger::new(level, LogConfig::default(), TerminalMode::Mixed) {
            Some(l) => loggers.push(l),
            None => loggers.push(SimpleLogger::new(level, LogConfig::default())),
        }

        if !self.debug_log.is_empty() {
            let file = File::create(&self.debug_log)?;
            loggers.push(WriteLogger::new(level, LogConfig::default(), file));
        }

        return Ok(loggers);
    }

    pub fn print(&self) {
        match serde_json::to_string(self) {
            Ok(c) => info!("config is {}", c),
            Err(e) => error!("config print fail {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_load() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(
            f,
            r#"{{"Strategy": "Portable", "DebugLevel": "Debug", "DebugLog": "/tmp/timescale.log"}}"#
        )
        .unwrap();

        let config = Config::load(f.path()).unwrap();
        assert_eq!(config.strategy, Strategy::Portable);
        assert_eq!(config.debug_level, DebugLevel::Debug);
        assert_eq!(config.debug_level.to_level_filter(), LevelFilter::Debug);
        assert_eq!(config.debug_log, "/tmp/timescale.log");
    }

    #[test]
    fn test_load_partial() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{"DebugLevel": "Trace"}}"#).unwrap();

        let config = Config::load(f.path()).unwrap();
        assert_eq!(config.strategy, Strategy::default());
        assert_eq!(config.debug_level, DebugLevel::Trace);
        assert_eq!(config.debug_log, "");
    }

    #[test]
    fn test_load_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_malformed() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "Strategy = Native").unwrap();

        match Config::load(f.path()) {
            Err(Error::Common(msg)) => assert!(msg.starts_with("configuration wrong format")),
            r => panic!("unexpected {:?}", r),
        }
    }

    #[test]
    fn test_loggers_follow_debug_level() {
        let mut config = Config::default();
        let loggers = config.loggers().unwrap();
        assert_eq!(loggers.len(), 1);
        assert_eq!(loggers[0].level(), LevelFilter::Error);

        let dir = tempfile::tempdir().unwrap();
        config.debug_level = DebugLevel::Debug;
        config.debug_log = dir.path().join("debug.log").to_string_lossy().to_string();
        let loggers = config.loggers().unwrap();
        assert_eq!(loggers.len(), 2);
        for l in loggers.iter() {
            assert_eq!(l.level(), LevelFilter::Debug);
        }
    }
}
