use core::fmt;

use embassy_time::Duration;

/// Encoder counts per shaft revolution (all four edges of every cycle).
pub const DEFAULT_PULSES_PER_REVOLUTION: u32 = 2400;
/// How often a telemetry line is produced.
pub const DEFAULT_REPORT_INTERVAL: Duration = Duration::from_millis(100);
/// How often the status indicator is toggled.
pub const DEFAULT_INDICATOR_INTERVAL: Duration = Duration::from_millis(100);

/// Runtime settings of the counter.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pulses_per_revolution: u32,
    report_interval: Duration,
    indicator_interval: Duration,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    ZeroPulsesPerRevolution,
    ZeroReportInterval,
    ZeroIndicatorInterval,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroPulsesPerRevolution => f.write_str("pulses per revolution is zero"),
            ConfigError::ZeroReportInterval => f.write_str("report interval is zero"),
            ConfigError::ZeroIndicatorInterval => f.write_str("indicator interval is zero"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pulses_per_revolution: DEFAULT_PULSES_PER_REVOLUTION,
            report_interval: DEFAULT_REPORT_INTERVAL,
            indicator_interval: DEFAULT_INDICATOR_INTERVAL,
        }
    }
}

impl Config {
    /// Validate and build a configuration.
    ///
    /// # Errors
    /// Any value that would divide by zero when computing speed or scheduling is rejected.
    pub fn new(
        pulses_per_revolution: u32,
        report_interval: Duration,
        indicator_interval: Duration,
    ) -> Result<Self, ConfigError> {
        if pulses_per_revolution == 0 {
            return Err(ConfigError::ZeroPulsesPerRevolution);
        }
        if report_interval == Duration::from_ticks(0) {
            return Err(ConfigError::ZeroReportInterval);
        }
        if indicator_interval == Duration::from_ticks(0) {
            return Err(ConfigError::ZeroIndicatorInterval);
        }
        Ok(Self {
            pulses_per_revolution,
            report_interval,
            indicator_interval,
        })
    }

    pub fn pulses_per_revolution(&self) -> u32 {
        self.pulses_per_revolution
    }
    pub fn report_interval(&self) -> Duration {
        self.report_interval
    }
    pub fn indicator_interval(&self) -> Duration {
        self.indicator_interval
    }
}
