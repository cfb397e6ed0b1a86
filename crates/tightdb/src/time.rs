//   Copyright (c) 2024-2026 Anton Kundenko <singaraiona@gmail.com>
//   All rights reserved.
//
//   Permission is hereby granted, free of charge, to any person obtaining a copy
//   of this software and associated documentation files (the "Software"), to deal
//   in the Software without restriction, including without limitation the rights
//   to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
//   copies of the Software, and to permit persons to whom the Software is
//   furnished to do so, subject to the following conditions:
//
//   The above copyright notice and this permission notice shall be included in all
//   copies or substantial portions of the Software.
//
//   THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
//   IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
//   FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
//   AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
//   LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
//   OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
//   SOFTWARE.

//! Calendar time <-> epoch seconds (`time_t`).

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};

/// Whole seconds since 1970-01-01T00:00:00Z, sub-second part truncated
/// toward zero.
pub fn encode(value: DateTime<Utc>) -> i64 {
    let secs = value.timestamp();
    if secs < 0 && value.timestamp_subsec_nanos() > 0 {
        // timestamp() floors; move back toward zero
        secs + 1
    } else {
        secs
    }
}

/// Encode for a mixed cell, which only accepts instants at or after the epoch.
pub fn encode_mixed(value: DateTime<Utc>) -> Result<i64> {
    if value < DateTime::UNIX_EPOCH {
        return Err(Error::PreEpochMixedDate(value));
    }
    Ok(encode(value))
}

/// Epoch plus `secs`. Values beyond chrono's range clamp to its bounds.
pub fn decode(secs: i64) -> DateTime<Utc> {
    match DateTime::from_timestamp(secs, 0) {
        Some(dt) => dt,
        None if secs < 0 => DateTime::<Utc>::MIN_UTC,
        None => DateTime::<Utc>::MAX_UTC,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn epoch_is_zero() {
        assert_eq!(encode(DateTime::UNIX_EPOCH), 0);
        assert_eq!(decode(0), DateTime::UNIX_EPOCH);
    }

    #[test]
    fn whole_seconds_round_trip() {
        let t = Utc.with_ymd_and_hms(2013, 6, 1, 12, 30, 45).unwrap();
        assert_eq!(decode(encode(t)), t);
        assert_eq!(encode(t), 1_370_089_845);
    }

    #[test]
    fn sub_second_part_is_truncated() {
        let t = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let with_millis = t + Duration::milliseconds(999);
        assert_eq!(decode(encode(with_millis)), t);
    }

    #[test]
    fn pre_epoch_truncates_toward_zero() {
        let t = DateTime::UNIX_EPOCH - Duration::milliseconds(1500);
        assert_eq!(encode(t), -1);
    }

    #[test]
    fn mixed_rejects_pre_epoch() {
        let t = DateTime::UNIX_EPOCH - Duration::seconds(1);
        assert!(matches!(encode_mixed(t), Err(Error::PreEpochMixedDate(v)) if v == t));
        assert_eq!(encode_mixed(DateTime::UNIX_EPOCH).unwrap(), 0);
    }

    #[test]
    fn out_of_range_seconds_clamp() {
        assert_eq!(decode(i64::MAX), DateTime::<Utc>::MAX_UTC);
        assert_eq!(decode(i64::MIN), DateTime::<Utc>::MIN_UTC);
    }
}
