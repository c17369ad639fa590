use std::time::Duration;

pub const DEFAULT_CLOCK_HZ: u32 = 700;

/// Runtime settings for driving the interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Instructions executed per second. ROM dependent, usually 500 to 1000.
    pub clock_hz: u32,
    /// Show the boot banner until the program draws over it.
    pub splash: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            clock_hz: DEFAULT_CLOCK_HZ,
            splash: false,
        }
    }
}

impl Config {
    pub fn cpu_period(&self) -> Duration {
        Duration::from_secs(1) / self.clock_hz.max(1)
    }
}
