//! Mission-epoch time conversion.
//!
//! SWA/EAS files encode time as CDF TT2000: nanoseconds from J2000
//! (2000-01-01T12:00:00 Terrestrial Time). Converting to UTC subtracts the
//! TT-UTC offset, which is 32.184 s plus the accumulated leap seconds at
//! that instant.

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::error::{SwaError, SwaResult};

/// Leap-second table from 1999 onward, as (year, month, day, TAI-UTC).
/// Solar Orbiter data starts in 2020, where the offset is a constant 37 s,
/// but earlier entries keep the conversion exact for the whole TT2000 era.
const LEAP_SECONDS: &[(i32, u32, u32, i64)] = &[
    (1999, 1, 1, 32),
    (2006, 1, 1, 33),
    (2009, 1, 1, 34),
    (2012, 7, 1, 35),
    (2015, 7, 1, 36),
    (2017, 1, 1, 37),
];

/// TT - TAI in milliseconds.
const TT_TAI_OFFSET_MS: i64 = 32_184;

fn leap_seconds_at(tt: DateTime<Utc>) -> i64 {
    let mut leap = LEAP_SECONDS[0].3;
    for &(y, m, d, s) in LEAP_SECONDS {
        // Each entry takes effect at a UTC midnight; on the TT scale that
        // instant is 32.184 s plus the new TAI-UTC value later.
        let boundary_tt = Utc
            .with_ymd_and_hms(y, m, d, 0, 0, 0)
            .single()
            .unwrap_or_else(|| DateTime::<Utc>::MIN_UTC)
            + Duration::milliseconds(TT_TAI_OFFSET_MS + s * 1000);
        if tt >= boundary_tt {
            leap = s;
        }
    }
    leap
}

/// The CDF_TT2000 pad/fill value; marks records that hold no time.
const TT2000_FILL: i64 = i64::MIN;

/// Convert one TT2000 value (ns since J2000 TT) to a UTC timestamp.
pub fn tt2000_to_datetime(ns: i64) -> SwaResult<DateTime<Utc>> {
    if ns == TT2000_FILL {
        return Err(SwaError::TimeConversion(
            "epoch is the TT2000 fill value".to_string(),
        ));
    }
    // J2000 expressed on the TT scale; chrono has no TT type, so the
    // intermediate value is a TT instant carried in a Utc container.
    let j2000_tt = Utc
        .with_ymd_and_hms(2000, 1, 1, 12, 0, 0)
        .single()
        .ok_or_else(|| SwaError::TimeConversion("invalid J2000 base".to_string()))?;

    let tt = j2000_tt
        .checked_add_signed(Duration::nanoseconds(ns))
        .ok_or_else(|| SwaError::TimeConversion(format!("epoch {} out of range", ns)))?;

    let offset_ms = TT_TAI_OFFSET_MS + leap_seconds_at(tt) * 1000;
    tt.checked_sub_signed(Duration::milliseconds(offset_ms))
        .ok_or_else(|| SwaError::TimeConversion(format!("epoch {} out of range", ns)))
}

/// Convert a whole epoch array, failing on the first bad value.
pub fn epochs_to_datetimes(epochs: &[i64]) -> SwaResult<Vec<DateTime<Utc>>> {
    epochs.iter().map(|&ns| tt2000_to_datetime(ns)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tt2000_zero_is_j2000() {
        // At J2000 the TT-UTC offset was 32.184 + 32 = 64.184 s.
        let t = tt2000_to_datetime(0).unwrap();
        assert_eq!(t.to_rfc3339(), "2000-01-01T11:58:55.816+00:00");
    }

    #[test]
    fn test_mission_era_offset() {
        // 2020-06-01T00:00:00 TT is 644,241,600 s after J2000 TT;
        // UTC should lag TT by 69.184 s.
        let ns = 644_241_600_i64 * 1_000_000_000;
        let t = tt2000_to_datetime(ns).unwrap();
        assert_eq!(t.to_rfc3339(), "2020-05-31T23:58:50.816+00:00");
    }

    #[test]
    fn test_leap_second_boundary_is_exact() {
        // 2017-01-01T00:00:00 UTC is 536,500,869.184 s after J2000 on the
        // TT scale; the 37 s entry applies from exactly that instant.
        let boundary_ns = 536_500_800_i64 * 1_000_000_000 + 69_184_000_000;
        let t = tt2000_to_datetime(boundary_ns).unwrap();
        assert_eq!(t.to_rfc3339(), "2017-01-01T00:00:00+00:00");

        // Two seconds earlier is still on the 36 s offset, before the
        // inserted leap second.
        let t = tt2000_to_datetime(boundary_ns - 2_000_000_000).unwrap();
        assert_eq!(t.to_rfc3339(), "2016-12-31T23:59:59+00:00");
    }

    #[test]
    fn test_epoch_array_preserves_order() {
        let epochs: Vec<i64> = (0..4).map(|i| i * 1_000_000_000).collect();
        let times = epochs_to_datetimes(&epochs).unwrap();
        assert_eq!(times.len(), 4);
        assert!(times.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_fill_value_epoch_errors() {
        let err = tt2000_to_datetime(i64::MIN).unwrap_err();
        assert!(matches!(err, SwaError::TimeConversion(_)));
    }
}
