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

use super::common::*;
use super::muldiv::*;
use super::timebase::SECOND;

// FrameClock converts a monotonic nanosecond clock into a stream of whole
// frames at a fixed rate.
//
// Converting every step with ns * rate / 1e9 drops the fractional frame each
// time, so many small steps lose frames compared to one large step. FrameClock
// carries the leftover numerator across calls instead, which keeps the total
// independent of how the interval is split.
#[derive(Debug, Clone)]
pub struct FrameClock {
    // rate is the frame rate in frames per second.
    rate: u64,

    // lastNS is the last time passed to advance_to.
    lastNS: u64,

    // frac is the remainder of (delta * rate + frac) / SECOND, always < SECOND.
    frac: u64,
}

impl FrameClock {
    pub fn new(rate: u64, startNS: u64) -> Result<Self> {
        if rate == 0 {
            return Err(Error::InvalidInput("frame clock rate is zero".to_string()));
        }

        return Ok(Self {
            rate: rate,
            lastNS: startNS,
            frac: 0,
        });
    }

    pub fn rate(&self) -> u64 {
        return self.rate;
    }

    pub fn last_ns(&self) -> u64 {
        return self.lastNS;
    }

    // advance_to moves the clock to nowNS and returns how many frames elapsed
    // since the previous call.
    //
    // A nowNS earlier than the last observed time counts as zero frames and
    // the clock does not move backwards.
    pub fn advance_to(&mut self, nowNS: u64) -> u64 {
        if nowNS <= self.lastNS {
            if nowNS < self.lastNS {
                debug!(
                    "frame clock went backwards: {} < {}",
                    nowNS, self.lastNS
                );
            }
            return 0;
        }

        let delta = nowNS - self.lastNS;
        self.lastNS = nowNS;

        let (high, low) = mul_wide(delta, self.rate);
        let (low, carry) = low.overflowing_add(self.frac);
        let high = high + carry as u64;

        // the frame count no longer fits in 64 bits once high >= SECOND
        match div_wide(high, low, SECOND) {
            Ok((frames, rem)) => {
                self.frac = rem;
                return frames;
            }
            Err(_) => {
                self.frac = 0;
                return u64::MAX;
            }
        }
    }

    // ns_until_next_frame returns how many nanoseconds must pass before the next
    // whole frame is produced.
    pub fn ns_until_next_frame(&self) -> u64 {
        // smallest d with d * rate + frac >= SECOND
        let missing = SECOND - self.frac;
        return missing / self.rate + (missing % self.rate != 0) as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        assert!(FrameClock::new(0, 0).is_err());
        let c = FrameClock::new(48000, 100).unwrap();
        assert_eq!(c.rate(), 48000);
        assert_eq!(c.last_ns(), 100);
    }

    #[test]
    fn test_advance_to() {
        let mut c = FrameClock::new(48000, 0).unwrap();
        assert_eq!(c.advance_to(SECOND), 48000);
        assert_eq!(c.advance_to(SECOND + 20_000_000), 960);
    }

    #[test]
    fn test_advance_to_no_drift() {
        // 44.1kHz does not divide a millisecond evenly
        let mut stepped = FrameClock::new(44100, 0).unwrap();
        let mut total = 0;
        for i in 1..=1000 {
            total += stepped.advance_to(i * MILLI);
        }

        let mut once = FrameClock::new(44100, 0).unwrap();
        assert_eq!(total, once.advance_to(1000 * MILLI));
        assert_eq!(total, 44100);
    }

    #[test]
    fn test_advance_to_backwards() {
        let mut c = FrameClock::new(48000, SECOND).unwrap();
        assert_eq!(c.advance_to(SECOND / 2), 0);
        assert_eq!(c.last_ns(), SECOND);
        assert_eq!(c.advance_to(SECOND), 0);
        assert_eq!(c.advance_to(2 * SECOND), 48000);
    }

    #[test]
    fn test_advance_to_saturates() {
        let mut c = FrameClock::new(u64::MAX, 0).unwrap();
        assert_eq!(c.advance_to(u64::MAX), u64::MAX);
    }

    #[test]
    fn test_ns_until_next_frame() {
        let mut c = FrameClock::new(1000, 0).unwrap();
        assert_eq!(c.ns_until_next_frame(), 1_000_000);
        c.advance_to(400_000);
        assert_eq!(c.ns_until_next_frame(), 600_000);
        assert_eq!(c.advance_to(1_000_000), 1);
    }

    const MILLI: u64 = 1_000_000;
}
