use core::fmt;

use embassy_time::Instant;

use crate::{Config, Direction, schedule::Interval, speed::Rpm, speed::SpeedMeter};

/// One telemetry reading.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Report {
    /// Accumulator value at the time of the snapshot.
    pub position: i32,
    /// Change since the previous snapshot.
    pub delta: i32,
    pub rpm: Rpm,
    /// `None` while the shaft did not move between snapshots.
    pub direction: Option<Direction>,
}

/// Field name the host side parser looks the direction up by.
const DIRECTION_KEY: &str = "Dirección";

impl Report {
    fn direction_label(&self) -> &'static str {
        match self.direction {
            Some(Direction::Clockwise) => "CW",
            Some(Direction::CounterClockwise) => "CCW",
            None => "STOPPED",
        }
    }
    fn sign(negative: bool) -> &'static str {
        if negative { "-" } else { "" }
    }
}

/// Renders the line the host side tooling parses:
/// `RPM: 10.00 | COUNTER: 40 | Dirección: CW`
impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (negative, whole, fraction) = self.rpm.two_decimals();
        write!(
            f,
            "RPM: {}{}.{:02} | COUNTER: {} | {}: {}",
            Self::sign(negative),
            whole,
            fraction,
            self.position,
            DIRECTION_KEY,
            self.direction_label()
        )
    }
}

#[cfg(feature = "defmt")]
mod defmt_impl {
    use super::{DIRECTION_KEY, Report};
    #[mutants::skip]
    impl defmt::Format for Report {
        fn format(&self, fmt: defmt::Formatter) {
            let (negative, whole, fraction) = self.rpm.two_decimals();
            // Same text as the `Display` impl, hundredths printed digit by digit.
            defmt::write!(
                fmt,
                "RPM: {=str}{=u32}.{=u32}{=u32} | COUNTER: {=i32} | {=str}: {=str}",
                Report::sign(negative),
                whole,
                fraction / 10,
                fraction % 10,
                self.position,
                DIRECTION_KEY,
                self.direction_label()
            );
        }
    }
}

/// What the caller has to do after a [`Reporter::poll`].
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Tick {
    /// A new telemetry reading is due.
    pub report: Option<Report>,
    /// The status indicator should change state.
    pub toggle_indicator: bool,
}

/// Drives the periodic side of the counter: the speed snapshot and the status indicator, each on
/// its own interval.
pub struct Reporter {
    meter: SpeedMeter,
    report: Interval,
    indicator: Interval,
}

impl Reporter {
    pub fn new(config: &Config, start: Instant, start_position: i32) -> Self {
        Self {
            meter: SpeedMeter::new(config, start_position),
            report: Interval::new(config.report_interval(), start),
            indicator: Interval::new(config.indicator_interval(), start),
        }
    }

    /// Check both intervals against `now`. `position` is only read when a report is due.
    pub fn poll(&mut self, now: Instant, position: impl FnOnce() -> i32) -> Tick {
        let report = self
            .report
            .poll(now)
            .then(|| self.meter.sample(position()));
        Tick {
            report,
            toggle_indicator: self.indicator.poll(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Report, Reporter};
    use crate::{Config, Direction, Rpm};
    use embassy_time::{Duration, Instant};

    #[test]
    fn line_format() {
        let report = Report {
            position: 40,
            delta: 40,
            rpm: Rpm::new(40, 2400, Duration::from_millis(100)),
            direction: Some(Direction::Clockwise),
        };
        assert_eq!(
            report.to_string(),
            "RPM: 10.00 | COUNTER: 40 | Dirección: CW"
        );

        let report = Report {
            position: -139_635,
            delta: -3,
            rpm: Rpm::new(-3, 2400, Duration::from_millis(100)),
            direction: Some(Direction::CounterClockwise),
        };
        assert_eq!(
            report.to_string(),
            "RPM: -0.75 | COUNTER: -139635 | Dirección: CCW"
        );
    }

    #[test]
    fn idle_line() {
        let report = Report {
            position: 7,
            delta: 0,
            rpm: Rpm::stopped(),
            direction: None,
        };
        assert_eq!(
            report.to_string(),
            "RPM: 0.00 | COUNTER: 7 | Dirección: STOPPED"
        );
    }

    /// Splits a line the way the host side parser does: fields on `|`, key and value on `:`.
    fn host_fields(line: &str) -> Vec<(String, String)> {
        line.split('|')
            .map(|part| {
                let (key, value) = part.split_once(':').expect("key: value field");
                (key.trim().to_string(), value.trim().to_string())
            })
            .collect()
    }

    #[test]
    fn host_parser_finds_every_field() {
        let report = Report {
            position: 139_635,
            delta: 985,
            rpm: Rpm::new(985, 2400, Duration::from_millis(100)),
            direction: Some(Direction::CounterClockwise),
        };
        let fields = host_fields(&report.to_string());
        assert_eq!(
            fields,
            vec![
                ("RPM".to_string(), "246.25".to_string()),
                ("COUNTER".to_string(), "139635".to_string()),
                ("Dirección".to_string(), "CCW".to_string()),
            ]
        );
        let rpm: f32 = fields[0].1.parse().unwrap();
        assert!((rpm - report.rpm.val()).abs() < 0.005);
    }

    #[test]
    fn reports_on_report_interval_only() {
        let config =
            Config::new(2400, Duration::from_millis(100), Duration::from_millis(250)).unwrap();
        let mut reporter = Reporter::new(&config, Instant::from_millis(0), 0);

        let tick = reporter.poll(Instant::from_millis(50), || unreachable!());
        assert_eq!(tick.report, None);
        assert!(!tick.toggle_indicator);

        let tick = reporter.poll(Instant::from_millis(100), || 40);
        let report = tick.report.expect("report due");
        assert_eq!(report.delta, 40);
        assert!((report.rpm.val() - 10.0).abs() < 1e-4);
        assert!(!tick.toggle_indicator);

        let tick = reporter.poll(Instant::from_millis(250), || 40);
        assert_eq!(tick.report.map(|r| r.delta), Some(0));
        assert!(tick.toggle_indicator);
    }
}
