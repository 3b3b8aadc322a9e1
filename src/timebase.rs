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

use core::fmt;
use core::str::FromStr;

use super::common::*;
use super::muldiv::*;

pub const NANOSECOND: u64 = 1;
pub const MICROSECOND: u64 = 1000 * NANOSECOND;
pub const MILLISECOND: u64 = 1000 * MICROSECOND;
pub const SECOND: u64 = 1000 * MILLISECOND;

pub const TB_1NS: Timebase = Timebase { num: 1, den: SECOND };
pub const TB_1US: Timebase = Timebase { num: 1, den: SECOND / MICROSECOND };
pub const TB_1MS: Timebase = Timebase { num: 1, den: SECOND / MILLISECOND };
// MPEG-TS presentation timestamps
pub const TB_90KHZ: Timebase = Timebase { num: 1, den: 90_000 };
// MPEG-TS program clock reference
pub const TB_27MHZ: Timebase = Timebase { num: 1, den: 27_000_000 };

/// A clock base: the duration of one tick in seconds, kept as a reduced
/// fraction `num / den`.
///
/// 48 kHz audio is `1/48000`, NTSC video is `1001/30000`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timebase {
    num: u64,
    den: u64,
}

pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }

    return a;
}

impl Timebase {
    pub fn new(num: u64, den: u64) -> Result<Self> {
        if num == 0 || den == 0 {
            return Err(Error::InvalidInput(format!(
                "timebase {}/{} has a zero component",
                num, den
            )));
        }

        let g = gcd(num, den);
        return Ok(Self {
            num: num / g,
            den: den / g,
        });
    }

    // from_rate returns the timebase of a clock ticking hz times per second.
    pub fn from_rate(hz: u64) -> Result<Self> {
        return Self::new(1, hz);
    }

    // from_fps returns the timebase of a frame counter running at
    // fpsNum / fpsDen frames per second.
    pub fn from_fps(fpsNum: u64, fpsDen: u64) -> Result<Self> {
        return Self::new(fpsDen, fpsNum);
    }

    pub fn num(&self) -> u64 {
        return self.num;
    }

    pub fn den(&self) -> u64 {
        return self.den;
    }

    // ratio returns the reduced (mul, div) pair that converts a tick count in
    // self into a tick count in to.
    //
    // value * self.num / self.den seconds = value * self.num * to.den / (self.den * to.num) ticks of to
    pub fn ratio(&self, to: &Timebase) -> Result<(u64, u64)> {
        // both fractions are already reduced, cross cancelling is enough
        let g1 = gcd(self.num, to.num);
        let g2 = gcd(self.den, to.den);

        let mul = (self.num / g1)
            .checked_mul(to.den / g2)
            .ok_or(Error::Overflow)?;
        let div = (self.den / g2)
            .checked_mul(to.num / g1)
            .ok_or(Error::Overflow)?;
        return Ok((mul, div));
    }

    /// Converts `value` ticks of this timebase into whole ticks of `to`,
    /// rounding down.
    pub fn rescale(&self, value: u64, to: &Timebase) -> Result<u64> {
        let (mul, div) = self.ratio(to)?;
        return muldiv64(value, mul, div);
    }
}

impl fmt::Display for Timebase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

impl FromStr for Timebase {
    type Err = Error;

    // accepts "num/den", or a bare "num" for whole seconds
    fn from_str(s: &str) -> Result<Self> {
        let parse = |v: &str| -> Result<u64> {
            v.trim()
                .parse::<u64>()
                .map_err(|e| Error::InvalidInput(format!("timebase {}: {}", s, e)))
        };

        match s.find('/') {
            None => Self::new(parse(s)?, 1),
            Some(idx) => Self::new(parse(&s[..idx])?, parse(&s[idx + 1..])?),
        }
    }
}

// frames_to_ns converts an audio frame count at sampleRate into nanoseconds.
pub fn frames_to_ns(sampleRate: u64, frames: u64) -> Result<u64> {
    return muldiv64(frames, SECOND, sampleRate);
}

// ns_to_frames converts nanoseconds into whole audio frames at sampleRate.
pub fn ns_to_frames(sampleRate: u64, ns: u64) -> Result<u64> {
    return muldiv64(ns, sampleRate, SECOND);
}

// frame_interval_ns returns the duration of one video frame in nanoseconds
// for a frame rate of fpsNum / fpsDen.
pub fn frame_interval_ns(fpsNum: u64, fpsDen: u64) -> Result<u64> {
    return muldiv64(SECOND, fpsDen, fpsNum);
}

// frame_timestamp_ns returns the presentation time of video frame number
// frame for a stream that started at baseNS and runs at fpsNum / fpsDen.
pub fn frame_timestamp_ns(baseNS: u64, frame: u64, fpsNum: u64, fpsDen: u64) -> Result<u64> {
    let offset = Timebase::from_fps(fpsNum, fpsDen)?.rescale(frame, &TB_1NS)?;
    return baseNS.checked_add(offset).ok_or(Error::Overflow);
}

// frame_index_at returns the number of the video frame on screen at nowNS for
// a stream that started at baseNS. A time before the start is rejected.
pub fn frame_index_at(baseNS: u64, nowNS: u64, fpsNum: u64, fpsDen: u64) -> Result<u64> {
    let elapsed = nowNS.checked_sub(baseNS).ok_or_else(|| {
        Error::InvalidInput(format!(
            "time {} is before stream start {}",
            nowNS, baseNS
        ))
    })?;
    return TB_1NS.rescale(elapsed, &Timebase::from_fps(fpsNum, fpsDen)?);
}
