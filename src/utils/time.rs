//! Frame-exact timecode conversion
//!
//! All arithmetic is done on exact ratios. A frame's elapsed time is rounded
//! once, to whole nanoseconds, and everything downstream works from that
//! integer, so the chapter timecode for a frame always matches the split
//! point mkvmerge is given for the same frame.

use num_rational::Ratio;

use crate::domain::model::FrameRate;

const NANOS_PER_SECOND: u128 = 1_000_000_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const MILLIS_PER_SECOND: u128 = 1_000;

/// Number of fractional second digits in a rendered timecode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimecodePrecision {
    /// `HH:MM:SS.mmm`, as used by OGM chapter files
    Millisecond,
    /// `HH:MM:SS.nnnnnnnnn`, as used by mkvmerge split ranges
    Nanosecond,
}

/// Elapsed time of `frame` in whole nanoseconds, rounded half to even
pub fn frame_to_nanoseconds(frame: u64, fps: FrameRate) -> u128 {
    let elapsed = Ratio::new(
        u128::from(frame) * u128::from(fps.den()) * NANOS_PER_SECOND,
        u128::from(fps.num()),
    );
    round_half_even(elapsed)
}

/// Render the start time of `frame` as a timecode
pub fn frame_to_timecode(frame: u64, fps: FrameRate, precision: TimecodePrecision) -> String {
    let nanos = frame_to_nanoseconds(frame, fps);
    match precision {
        TimecodePrecision::Millisecond => {
            // Rounded before splitting into fields so seconds never read 60
            let millis = round_half_even(Ratio::new(nanos, NANOS_PER_MILLI));
            format_ticks(millis, MILLIS_PER_SECOND, 3)
        }
        TimecodePrecision::Nanosecond => format_ticks(nanos, NANOS_PER_SECOND, 9),
    }
}

/// Factor converting a frame count at `old` fps to the same duration at `new` fps
pub fn rescale_factor(old: FrameRate, new: FrameRate) -> Ratio<u64> {
    old.frame_duration() * new.as_ratio()
}

fn round_half_even(value: Ratio<u128>) -> u128 {
    let whole = value.to_integer();
    let remainder = value.fract();
    let half = Ratio::new(1, 2);
    if remainder > half || (remainder == half && whole % 2 == 1) {
        whole + 1
    } else {
        whole
    }
}

fn format_ticks(ticks: u128, ticks_per_second: u128, digits: usize) -> String {
    let total_seconds = ticks / ticks_per_second;
    let fraction = ticks % ticks_per_second;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!(
        "{:02}:{:02}:{:02}.{:0width$}",
        hours,
        minutes,
        seconds,
        fraction,
        width = digits
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fps(num: u64, den: u64) -> FrameRate {
        FrameRate::new(num, den).unwrap()
    }

    #[test]
    fn test_frame_zero() {
        let tc = frame_to_timecode(0, FrameRate::ntsc_film(), TimecodePrecision::Millisecond);
        assert_eq!(tc, "00:00:00.000");
        let tc = frame_to_timecode(0, FrameRate::ntsc_film(), TimecodePrecision::Nanosecond);
        assert_eq!(tc, "00:00:00.000000000");
    }

    #[test]
    fn test_film_rate_one_second() {
        let tc = frame_to_timecode(24, FrameRate::ntsc_film(), TimecodePrecision::Millisecond);
        assert_eq!(tc, "00:00:01.001");
        let tc = frame_to_timecode(24, FrameRate::ntsc_film(), TimecodePrecision::Nanosecond);
        assert_eq!(tc, "00:00:01.001000000");
    }

    #[test]
    fn test_nanoseconds_round_once() {
        // 1001/24000 s = 41708333.33 ns
        assert_eq!(frame_to_nanoseconds(1, FrameRate::ntsc_film()), 41_708_333);
        let tc = frame_to_timecode(1, FrameRate::ntsc_film(), TimecodePrecision::Nanosecond);
        assert_eq!(tc, "00:00:00.041708333");
        let tc = frame_to_timecode(1, FrameRate::ntsc_film(), TimecodePrecision::Millisecond);
        assert_eq!(tc, "00:00:00.042");
    }

    #[test]
    fn test_half_nanosecond_rounds_to_even() {
        // 1/2000000000 s per frame: frame 1 is exactly half a nanosecond
        assert_eq!(frame_to_nanoseconds(1, fps(2_000_000_000, 1)), 0);
        assert_eq!(frame_to_nanoseconds(3, fps(2_000_000_000, 1)), 2);
    }

    #[test]
    fn test_ntsc_video_rate() {
        let tc = frame_to_timecode(21, FrameRate::ntsc_video(), TimecodePrecision::Nanosecond);
        assert_eq!(tc, "00:00:00.700700000");
        let tc = frame_to_timecode(100, FrameRate::ntsc_video(), TimecodePrecision::Millisecond);
        assert_eq!(tc, "00:00:03.337");
    }

    #[test]
    fn test_minutes_and_hours() {
        let tc = frame_to_timecode(25 * 3723, fps(25, 1), TimecodePrecision::Millisecond);
        assert_eq!(tc, "01:02:03.000");
    }

    #[test]
    fn test_hours_widen_past_99() {
        let tc = frame_to_timecode(25 * 3600 * 100, fps(25, 1), TimecodePrecision::Millisecond);
        assert_eq!(tc, "100:00:00.000");
    }

    #[test]
    fn test_millisecond_rounding_carries_into_minutes() {
        // 59.9996 s rounds up to a full minute
        let tc = frame_to_timecode(599_996, fps(10_000, 1), TimecodePrecision::Millisecond);
        assert_eq!(tc, "00:01:00.000");
    }

    #[test]
    fn test_extreme_frame_and_rate_stay_in_range() {
        let slowest = fps(1, FrameRate::MAX_TERM);
        let nanos = frame_to_nanoseconds(u64::MAX, slowest);
        assert_eq!(
            nanos,
            u128::from(u64::MAX) * u128::from(u32::MAX) * NANOS_PER_SECOND
        );
    }

    #[test]
    fn test_rescale_factor_ivtc() {
        let scalar = rescale_factor(FrameRate::ntsc_video(), FrameRate::ntsc_film());
        assert_eq!(scalar, Ratio::new(4, 5));
    }

    #[test]
    fn test_rescale_factor_identity() {
        let scalar = rescale_factor(FrameRate::ntsc_film(), FrameRate::ntsc_film());
        assert_eq!(scalar, Ratio::from_integer(1));
    }
}
