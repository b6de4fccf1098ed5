use embassy_time::Duration;

use crate::{Direction, config::Config, report::Report};

/// Rotational speed in revolutions per minute.
///
/// Derived from a position delta taken over a fixed reporting interval:
/// `rpm = (delta / pulses_per_revolution) * 60 * (1 / interval)`.
///```rust
/// use quadrature_counter_logic::Rpm;
/// use embassy_time::Duration;
/// let interval = Duration::from_millis(100);
///
/// assert_eq!(Rpm::new(40, 2400, interval).val(), 10.0);
/// assert_eq!(Rpm::new(-240, 2400, interval).val(), -60.0);
/// assert_eq!(Rpm::new(40, 0, interval), Rpm::stopped());
///```
#[derive(Clone, Copy, PartialEq, PartialOrd, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rpm(f32);

const MICROS_PER_MINUTE: i64 = 60_000_000;

impl Rpm {
    pub fn new(delta: i32, pulses_per_revolution: u32, interval: Duration) -> Self {
        let pulses_per_minute = i64::from(delta) * MICROS_PER_MINUTE;
        let pulse_micros = u64::from(pulses_per_revolution).saturating_mul(interval.as_micros());
        if pulse_micros == 0 {
            // No meaningful scale, treat as standing still.
            return Self::stopped();
        }
        #[allow(
            clippy::cast_precision_loss,
            reason = "rpm is reported with two decimals, f32 is plenty"
        )]
        let rpm = pulses_per_minute as f32 / pulse_micros as f32;
        Self(rpm)
    }
    pub const fn stopped() -> Self {
        Self(0.0)
    }
    pub fn val(&self) -> f32 {
        self.0
    }

    /// Rounded to two decimals, split as `(negative, whole, hundredths)`.
    ///
    /// defmt has no float precision hint, so both telemetry renderings print these parts.
    pub fn two_decimals(&self) -> (bool, u32, u32) {
        let bias = if self.0 < 0.0 { -0.5 } else { 0.5 };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "the cast truncates toward zero, bias makes it round half away from zero"
        )]
        let hundredths = (self.0 * 100.0 + bias) as i64;
        let magnitude = hundredths.unsigned_abs();
        #[allow(
            clippy::cast_possible_truncation,
            reason = "whole part of any rpm an i32 delta can produce fits in u32"
        )]
        let whole = (magnitude / 100) as u32;
        #[allow(clippy::cast_possible_truncation, reason = "remainder is below 100")]
        let fraction = (magnitude % 100) as u32;
        (hundredths < 0, whole, fraction)
    }
}

/// Turns periodic accumulator snapshots into position deltas and speed.
pub struct SpeedMeter {
    pulses_per_revolution: u32,
    interval: Duration,
    last_position: i32,
}

impl SpeedMeter {
    pub fn new(config: &Config, start_position: i32) -> Self {
        Self {
            pulses_per_revolution: config.pulses_per_revolution(),
            interval: config.report_interval(),
            last_position: start_position,
        }
    }

    /// Take a snapshot.
    ///
    /// The delta is the wrapping distance since the previous snapshot, so a reading taken across
    /// the `i32` roll over still has the right size and sign.
    pub fn sample(&mut self, position: i32) -> Report {
        let delta = position.wrapping_sub(self.last_position);
        self.last_position = position;
        Report {
            position,
            delta,
            rpm: Rpm::new(delta, self.pulses_per_revolution, self.interval),
            direction: Direction::from_delta(delta),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Rpm, SpeedMeter};
    use crate::{Config, Direction};
    use embassy_time::Duration;

    #[test]
    fn ten_rpm() {
        let rpm = Rpm::new(40, 2400, Duration::from_millis(100));
        assert!((rpm.val() - 10.0).abs() < 1e-4);
    }

    #[test]
    fn one_revolution_per_second() {
        let rpm = Rpm::new(2400, 2400, Duration::from_secs(1));
        assert!((rpm.val() - 60.0).abs() < 1e-4);
        let rpm = Rpm::new(-240, 2400, Duration::from_millis(100));
        assert!((rpm.val() + 60.0).abs() < 1e-4);
    }

    #[test]
    fn two_decimal_rounding() {
        assert_eq!(Rpm(10.0).two_decimals(), (false, 10, 0));
        assert_eq!(Rpm(-0.75).two_decimals(), (true, 0, 75));
        assert_eq!(Rpm(0.126).two_decimals(), (false, 0, 13));
        assert_eq!(Rpm(-12.344).two_decimals(), (true, 12, 34));
        assert_eq!(Rpm(0.004).two_decimals(), (false, 0, 0));
        // Too small to show up after rounding, so no minus sign either.
        assert_eq!(Rpm(-0.004).two_decimals(), (false, 0, 0));
        assert_eq!(Rpm::stopped().two_decimals(), (false, 0, 0));
    }

    #[test]
    fn zero_interval_is_stopped() {
        assert_eq!(Rpm::new(100, 2400, Duration::from_ticks(0)), Rpm::stopped());
    }

    #[test]
    fn meter_reports_change_since_last_snapshot() {
        let mut meter = SpeedMeter::new(&Config::default(), 0);
        let first = meter.sample(40);
        assert_eq!(first.position, 40);
        assert_eq!(first.delta, 40);
        assert!((first.rpm.val() - 10.0).abs() < 1e-4);
        assert_eq!(first.direction, Some(Direction::Clockwise));

        let idle = meter.sample(40);
        assert_eq!(idle.delta, 0);
        assert_eq!(idle.rpm, Rpm::stopped());
        assert_eq!(idle.direction, None);

        let reverse = meter.sample(-200);
        assert_eq!(reverse.delta, -240);
        assert_eq!(reverse.direction, Some(Direction::CounterClockwise));
    }

    #[test]
    fn delta_survives_accumulator_wrap() {
        let mut meter = SpeedMeter::new(&Config::default(), i32::MAX - 10);
        let report = meter.sample(i32::MIN + 29);
        assert_eq!(report.delta, 40);
        assert!((report.rpm.val() - 10.0).abs() < 1e-4);

        let report = meter.sample(i32::MAX - 10);
        assert_eq!(report.delta, -40);
    }
}
