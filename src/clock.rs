//! Two free-running logical clocks: one for the CPU, one for the 60 Hz
//! timers. The driver feeds both the same elapsed wall time and they count
//! their own periods independently, so the CPU rate never bends timer decay.

use std::time::Duration;

/// The delay and sound timers always count down at this rate.
pub const TIMER_HZ: u32 = 60;

/// Elapsed time beyond this is dropped instead of being caught up on.
pub const MAX_BACKLOG: Duration = Duration::from_millis(250);

#[derive(Debug, Clone)]
pub struct Clock {
    period: Duration,
    owed: Duration,
}

impl Clock {
    /// A clock ticking `hz` times per second. Zero is treated as one.
    pub fn new(hz: u32) -> Self {
        Clock {
            period: Duration::from_secs(1) / hz.max(1),
            owed: Duration::ZERO,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Add `elapsed` and return how many whole periods are now due. The
    /// leftover fraction carries over to the next call.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.owed = (self.owed + elapsed).min(MAX_BACKLOG);
        let due = (self.owed.as_nanos() / self.period.as_nanos()) as u32;
        self.owed -= self.period * due;
        due
    }
}

/// Work due after some wall time has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ticks {
    pub cycles: u32,
    pub timer_ticks: u32,
}

#[derive(Debug, Clone)]
pub struct Scheduler {
    cpu: Clock,
    timers: Clock,
}

impl Scheduler {
    pub fn new(cpu_hz: u32) -> Self {
        Scheduler {
            cpu: Clock::new(cpu_hz),
            timers: Clock::new(TIMER_HZ),
        }
    }

    pub fn cpu_period(&self) -> Duration {
        self.cpu.period()
    }

    pub fn advance(&mut self, elapsed: Duration) -> Ticks {
        Ticks {
            cycles: self.cpu.advance(elapsed),
            timer_ticks: self.timers.advance(elapsed),
        }
    }
}
