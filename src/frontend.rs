use crate::clock::Scheduler;
use crate::config::Config;
use crate::interpreter::{Chip8, FrameBuffer, HEIGHT, WIDTH};
use chip8_base::{Display, Interpreter, Keys, Pixel};
use log::info;
use std::time::{Duration, Instant};

/// Glue between the interpreter and the `chip8_base` window. Each call to
/// `step` works off however much wall time has passed since the last one.
pub struct Frontend {
    chip: Chip8,
    scheduler: Scheduler,
    last_step: Option<Instant>,
}

impl Frontend {
    pub fn new(mut chip: Chip8, config: &Config) -> Self {
        if config.splash {
            chip.show_splash();
        }
        info!("running at {} Hz", config.clock_hz);
        Frontend {
            chip,
            scheduler: Scheduler::new(config.clock_hz),
            last_step: None,
        }
    }

    pub fn chip(&self) -> &Chip8 {
        &self.chip
    }

    /// Latch `keys`, then run whatever cycles and timer ticks `elapsed` pays
    /// for. Returns the screen if it changed.
    pub fn advance(&mut self, keys: &Keys, elapsed: Duration) -> Option<Display> {
        self.chip.set_keys(keys);

        let ticks = self.scheduler.advance(elapsed);
        for _ in 0..ticks.cycles {
            if self.chip.step().is_err() {
                break;
            }
        }
        for _ in 0..ticks.timer_ticks {
            self.chip.tick_timers();
        }

        if self.chip.take_redraw() {
            Some(export(self.chip.display()))
        } else {
            None
        }
    }
}

fn export(fb: &FrameBuffer) -> Display {
    let mut display = [[Pixel::default(); WIDTH]; HEIGHT];
    for (row, pixels) in display.iter_mut().zip(fb.rows()) {
        for (pixel, cell) in row.iter_mut().zip(pixels) {
            *pixel = (*cell).try_into().unwrap_or_default();
        }
    }
    display
}

impl Interpreter for Frontend {
    fn step(&mut self, keys: &Keys) -> Option<Display> {
        let now = Instant::now();
        let elapsed = match self.last_step.replace(now) {
            Some(last) => now - last,
            None => self.scheduler.cpu_period(),
        };
        self.advance(keys, elapsed)
    }

    fn speed(&self) -> Duration {
        self.scheduler.cpu_period()
    }

    fn buzzer_active(&self) -> bool {
        self.chip.sound_timer() != 0
    }
}
