//! A CHIP-8 virtual machine.
//!
//! [`interpreter::Chip8`] is the machine itself: memory, registers, stack,
//! timers, framebuffer and key latch, advanced one instruction per `step`
//! and one timer tick per `tick_timers`. It never touches the clock or any
//! device. [`clock`], [`config`] and [`frontend`] pace it and hook it up to
//! a `chip8_base` window.

pub mod clock;
pub mod config;
pub mod frontend;
pub mod interpreter;

pub use interpreter::{Chip8, Fault, LoadError, RunState};
