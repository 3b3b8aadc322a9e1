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

//! Exact `floor(num * mul / div)` over `u64`, and the media clock rescaling
//! built on it: timebase conversion, video frame timestamps and drift-free
//! frame counting.

#![allow(non_snake_case)]

#[macro_use]
extern crate log;

#[macro_use]
extern crate serde_derive;

#[macro_use]
extern crate clap;

extern crate serde;
extern crate serde_json;
extern crate simplelog;

pub mod cmd;
pub mod common;
pub mod config;
pub mod frame_clock;
pub mod muldiv;
pub mod timebase;

pub use self::common::{Error, Result};
pub use self::frame_clock::FrameClock;
pub use self::muldiv::{muldiv64, muldiv64_with, rescale_div_mod, rescale_div_mod_with, Strategy};
pub use self::timebase::Timebase;
