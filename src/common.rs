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

use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // the divisor of a rescale was zero
    #[error("division by zero")]
    DivisionByZero,

    // the exact result does not fit in 64 bits
    #[error("result does not fit in 64 bits")]
    Overflow,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Common(String),

    #[error("io error: {0}")]
    IOError(String),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        return Error::IOError(e.to_string());
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        return Error::Common(format!("configuration wrong format: {}", e));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Error::DivisionByZero.to_string(), "division by zero");
        assert_eq!(
            Error::InvalidInput("rate is zero".to_string()).to_string(),
            "invalid input: rate is zero"
        );
    }

    #[test]
    fn test_from_io_error() {
        let e: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(e, Error::IOError("gone".to_string()));
    }
}
