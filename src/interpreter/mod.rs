mod display;
mod error;
mod font;
mod state;

pub use display::{FrameBuffer, HEIGHT, WIDTH};
pub use error::{Fault, LoadError};
pub use state::{MachineState, RunState, KEY_COUNT, MEMORY_SIZE, PROGRAM_SPACE, PROGRAM_START};

use font::{FONT_ADDR, GLYPH_HEIGHT, SPLASH, SPLASH_Y};
use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use state::ADDRESS_MASK;

/// The CHIP-8 interpreter. Owns one machine and advances it one instruction
/// per `step`; timers only move on `tick_timers`. Neither call does any I/O
/// or looks at the clock, pacing is up to whoever drives it.
pub struct Chip8 {
    state: MachineState,
    rng: StdRng,
    redraw: bool,
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Same as `new`, but Cxnn draws from a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Chip8 {
            state: MachineState::new(),
            rng,
            redraw: false,
        }
    }

    pub fn reset(&mut self) {
        self.state.reset();
        self.redraw = true;
        debug!("machine reset");
    }

    pub fn load(&mut self, rom: &[u8]) -> Result<(), LoadError> {
        self.state.load(rom)?;
        debug!("loaded {} byte ROM at {:#05X}", rom.len(), PROGRAM_START);
        Ok(())
    }

    /// Run one fetch/decode/execute cycle.
    ///
    /// While waiting in Fx0A this only polls the key latch. Once halted it
    /// does nothing. A fault halts the machine and is also returned here.
    pub fn step(&mut self) -> Result<(), Fault> {
        match self.state.run_state {
            RunState::Halted(_) => Ok(()),
            RunState::AwaitingKey { register } => {
                self.poll_key(register);
                Ok(())
            }
            RunState::Running => {
                let result = self.fetch().and_then(|opcode| self.execute(opcode));
                if let Err(fault) = result {
                    warn!("halting at {:#05X}: {}", self.state.pc, fault);
                    self.state.run_state = RunState::Halted(fault);
                }
                result
            }
        }
    }

    /// One 60 Hz timer tick.
    pub fn tick_timers(&mut self) {
        self.state.delay_timer = self.state.delay_timer.saturating_sub(1);
        self.state.sound_timer = self.state.sound_timer.saturating_sub(1);
    }

    /// Draw the "CHIP8" boot banner straight into the framebuffer.
    pub fn show_splash(&mut self) {
        for (x, glyph) in SPLASH.iter() {
            self.state
                .display
                .draw(*x as usize, SPLASH_Y as usize, glyph);
        }
        self.redraw = true;
    }

    pub fn set_key(&mut self, key: usize, pressed: bool) {
        if let Some(k) = self.state.keys.get_mut(key) {
            *k = pressed;
        }
    }

    pub fn set_keys(&mut self, keys: &[bool; KEY_COUNT]) {
        self.state.keys = *keys;
    }

    pub fn keys(&self) -> &[bool; KEY_COUNT] {
        &self.state.keys
    }

    pub fn display(&self) -> &FrameBuffer {
        &self.state.display
    }

    /// True once per change to the framebuffer; clears the flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    pub fn state(&self) -> &MachineState {
        &self.state
    }

    pub fn run_state(&self) -> RunState {
        self.state.run_state
    }

    pub fn fault(&self) -> Option<Fault> {
        match self.state.run_state {
            RunState::Halted(fault) => Some(fault),
            _ => None,
        }
    }

    pub fn is_halted(&self) -> bool {
        self.fault().is_some()
    }

    pub fn pc(&self) -> u16 {
        self.state.pc
    }

    pub fn index(&self) -> u16 {
        self.state.index
    }

    pub fn registers(&self) -> &[u8] {
        &self.state.registers
    }

    pub fn memory(&self) -> &[u8] {
        &self.state.memory
    }

    pub fn stack_depth(&self) -> usize {
        self.state.sp
    }

    pub fn delay_timer(&self) -> u8 {
        self.state.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.state.sound_timer
    }

    fn poll_key(&mut self, register: u8) {
        if let Some(key) = self.state.keys.iter().position(|pressed| *pressed) {
            self.state.registers[register as usize] = key as u8;
            self.state.run_state = RunState::Running;
            self.state.pc += 2;
        }
    }

    fn fetch(&self) -> Result<u16, Fault> {
        let pc = self.state.pc as usize;
        if pc + 1 >= MEMORY_SIZE {
            return Err(Fault::PcOutOfBounds(self.state.pc));
        }
        Ok(u16::from_be_bytes([
            self.state.memory[pc],
            self.state.memory[pc + 1],
        ]))
    }

    // Break u16 instruction into 4 u8 nibbles
    fn nibbles(n: u16) -> (u8, u8, u8, u8) {
        let n3 = (n >> 12) as u8;
        let n2 = ((n >> 8) & 0b1111) as u8;
        let n1 = ((n >> 4) & 0b1111) as u8;
        let n0 = (n & 0b1111) as u8;
        (n3, n2, n1, n0)
    }

    /// Execute a single instruction. Everything that does not branch or skip
    /// falls through to the PC += 2 at the bottom.
    fn execute(&mut self, instruction: u16) -> Result<(), Fault> {
        trace!("{:#05X}: {:04X}", self.state.pc, instruction);

        let nn = (instruction & 0x00FF) as u8;
        let nnn = instruction & 0x0FFF;
        let s = &mut self.state;
        let v = &mut s.registers;

        match Self::nibbles(instruction) {
            // 00E0 CLS: clear display
            (0x0, 0x0, 0xE, 0x0) => {
                s.display.clear();
                self.redraw = true;
            }
            // 00EE RET: return from subroutine
            (0x0, 0x0, 0xE, 0xE) => {
                s.pc = s.pop()?;
                return Ok(());
            }
            // 1nnn JP addr: jump to location nnn
            (0x1, ..) => {
                s.pc = nnn;
                return Ok(());
            }
            // 2nnn CALL addr: call subroutine at nnn
            (0x2, ..) => {
                s.push(s.pc + 2)?;
                s.pc = nnn;
                return Ok(());
            }
            // 3xkk SE Vx, byte: skip next instruction if Vx = kk
            (0x3, x, _, _) => {
                if v[x as usize] == nn {
                    s.pc += 2;
                }
            }
            // 4xkk SNE Vx, byte: skip next instruction if Vx != kk
            (0x4, x, _, _) => {
                if v[x as usize] != nn {
                    s.pc += 2;
                }
            }
            // 5xy0 SE Vx, Vy: skip next instruction if Vx = Vy
            (0x5, x, y, 0x0) => {
                if v[x as usize] == v[y as usize] {
                    s.pc += 2;
                }
            }
            // 6xkk LD Vx, byte: set Vx = kk
            (0x6, x, _, _) => {
                v[x as usize] = nn;
            }
            // 7xkk ADD Vx, byte: set Vx = Vx + kk, VF untouched
            (0x7, x, _, _) => {
                v[x as usize] = v[x as usize].wrapping_add(nn);
            }
            // 8xy0 LD Vx, Vy: set Vx = Vy
            (0x8, x, y, 0x0) => {
                v[x as usize] = v[y as usize];
            }
            // 8xy1 OR Vx, Vy: set Vx = Vx OR Vy
            (0x8, x, y, 0x1) => {
                v[x as usize] |= v[y as usize];
            }
            // 8xy2 AND Vx, Vy: set Vx = Vx AND Vy
            (0x8, x, y, 0x2) => {
                v[x as usize] &= v[y as usize];
            }
            // 8xy3 XOR Vx, Vy: set Vx = Vx XOR Vy
            (0x8, x, y, 0x3) => {
                v[x as usize] ^= v[y as usize];
            }
            // The flag writes below always go last, so with x == F the flag
            // wins over the arithmetic result.

            // 8xy4 ADD Vx, Vy: set Vx = Vx + Vy, set VF = carry
            (0x8, x, y, 0x4) => {
                let (sum, carry) = v[x as usize].overflowing_add(v[y as usize]);
                v[x as usize] = sum;
                v[0xF] = carry as u8;
            }
            // 8xy5 SUB Vx, Vy: set Vx = Vx - Vy, set VF = Vx > Vy
            (0x8, x, y, 0x5) => {
                let (vx, vy) = (v[x as usize], v[y as usize]);
                v[x as usize] = vx.wrapping_sub(vy);
                v[0xF] = (vx > vy) as u8;
            }
            // 8xy6 SHR Vx: set Vx = Vx SHR 1, VF = old LSB
            (0x8, x, _, 0x6) => {
                let vx = v[x as usize];
                v[x as usize] = vx >> 1;
                v[0xF] = vx & 0x1;
            }
            // 8xy7 SUBN Vx, Vy: set Vx = Vy - Vx, set VF = Vy > Vx
            (0x8, x, y, 0x7) => {
                let (vx, vy) = (v[x as usize], v[y as usize]);
                v[x as usize] = vy.wrapping_sub(vx);
                v[0xF] = (vy > vx) as u8;
            }
            // 8xyE SHL Vx: set Vx = Vx SHL 1, VF = old MSB
            (0x8, x, _, 0xE) => {
                let vx = v[x as usize];
                v[x as usize] = vx << 1;
                v[0xF] = vx >> 7;
            }
            // 9xy0 SNE Vx, Vy: skip next instruction if Vx != Vy
            (0x9, x, y, 0x0) => {
                if v[x as usize] != v[y as usize] {
                    s.pc += 2;
                }
            }
            // Annn LD I, addr: set I = nnn
            (0xA, ..) => {
                s.index = nnn;
            }
            // Bnnn JP V0, addr: jump to nnn + V0
            (0xB, ..) => {
                s.pc = (nnn + v[0] as u16) & ADDRESS_MASK;
                return Ok(());
            }
            // Cxkk RND Vx, byte: set Vx = random byte AND kk
            (0xC, x, _, _) => {
                let byte: u8 = self.rng.gen();
                v[x as usize] = byte & nn;
            }
            // Dxyn DRW Vx, Vy, nibble: draw n-byte sprite from I at (Vx, Vy), set VF = collision
            (0xD, x, y, n) => {
                let mut sprite = [0_u8; 15];
                for (i, row) in sprite.iter_mut().take(n as usize).enumerate() {
                    *row = s.read(s.index.wrapping_add(i as u16));
                }
                let collision = s.display.draw(
                    s.registers[x as usize] as usize,
                    s.registers[y as usize] as usize,
                    &sprite[..n as usize],
                );
                s.registers[0xF] = collision as u8;
                self.redraw = true;
            }
            // Ex9E SKP Vx: skip next instruction if key Vx is pressed
            (0xE, x, 0x9, 0xE) => {
                if s.keys[(v[x as usize] & 0x0F) as usize] {
                    s.pc += 2;
                }
            }
            // ExA1 SKNP Vx: skip next instruction if key Vx is not pressed
            (0xE, x, 0xA, 0x1) => {
                if !s.keys[(v[x as usize] & 0x0F) as usize] {
                    s.pc += 2;
                }
            }
            // Fx07 LD Vx, DT: set Vx = delay timer value
            (0xF, x, 0x0, 0x7) => {
                v[x as usize] = s.delay_timer;
            }
            // Fx0A LD Vx, K: wait for a key press; step() finishes the job
            (0xF, x, 0x0, 0xA) => {
                s.run_state = RunState::AwaitingKey { register: x };
                return Ok(());
            }
            // Fx15 LD DT, Vx: set delay timer = Vx
            (0xF, x, 0x1, 0x5) => {
                s.delay_timer = v[x as usize];
            }
            // Fx18 LD ST, Vx: set sound timer = Vx
            (0xF, x, 0x1, 0x8) => {
                s.sound_timer = v[x as usize];
            }
            // Fx1E ADD I, Vx: set I = I + Vx
            (0xF, x, 0x1, 0xE) => {
                s.index = s.index.wrapping_add(v[x as usize] as u16);
            }
            // Fx29 LD F, Vx: set I = location of the glyph for digit Vx
            (0xF, x, 0x2, 0x9) => {
                s.index = FONT_ADDR as u16 + v[x as usize] as u16 * GLYPH_HEIGHT as u16;
            }
            // Fx33 LD B, Vx: store BCD of Vx at I, I+1 and I+2
            (0xF, x, 0x3, 0x3) => {
                let value = s.registers[x as usize];
                let i = s.index;
                s.write(i, value / 100);
                s.write(i.wrapping_add(1), (value / 10) % 10);
                s.write(i.wrapping_add(2), value % 10);
            }
            // Fx55 LD [I], Vx: store V0 through Vx starting at I, then I += x + 1
            (0xF, x, 0x5, 0x5) => {
                for reg in 0..=x as u16 {
                    let value = s.registers[reg as usize];
                    s.write(s.index.wrapping_add(reg), value);
                }
                s.index = s.index.wrapping_add(x as u16 + 1);
            }
            // Fx65 LD Vx, [I]: read V0 through Vx starting at I, then I += x + 1
            (0xF, x, 0x6, 0x5) => {
                for reg in 0..=x as u16 {
                    s.registers[reg as usize] = s.read(s.index.wrapping_add(reg));
                }
                s.index = s.index.wrapping_add(x as u16 + 1);
            }
            _ => return Err(Fault::UnknownOpcode(instruction)),
        };
        s.pc += 2;
        Ok(())
    }
}
