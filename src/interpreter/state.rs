use super::display::FrameBuffer;
use super::error::{Fault, LoadError};
use super::font::{FONT, FONT_ADDR};

pub const MEMORY_SIZE: usize = 4096;
pub const PROGRAM_START: usize = 0x200;
/// Largest ROM that fits between the program start and the end of memory.
pub const PROGRAM_SPACE: usize = MEMORY_SIZE - PROGRAM_START;
pub const STACK_SIZE: usize = 16;
pub const REGISTER_COUNT: usize = 16;
pub const KEY_COUNT: usize = 16;
/// Mask applied to every address computed from I or a jump.
pub const ADDRESS_MASK: u16 = 0x0FFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    /// Blocked in Fx0A until a key is pressed; the key index goes to `register`.
    AwaitingKey { register: u8 },
    /// Stopped by a fault. Only a reset gets out of here.
    Halted(Fault),
}

/// Everything one CHIP-8 machine remembers. The interpreter is the only
/// thing that mutates it between resets.
#[derive(Debug, Clone)]
pub struct MachineState {
    pub(crate) memory: [u8; MEMORY_SIZE],
    /// V0..VF; VF doubles as the carry/borrow/collision flag.
    pub(crate) registers: [u8; REGISTER_COUNT],
    pub(crate) index: u16,
    pub(crate) pc: u16,
    pub(crate) stack: [u16; STACK_SIZE],
    /// Number of entries pushed; `stack[sp]` is the next free slot.
    pub(crate) sp: usize,
    pub(crate) delay_timer: u8,
    pub(crate) sound_timer: u8,
    pub(crate) display: FrameBuffer,
    pub(crate) keys: [bool; KEY_COUNT],
    pub(crate) run_state: RunState,
}

impl Default for MachineState {
    fn default() -> Self {
        Self::new()
    }
}

impl MachineState {
    /// A freshly booted machine: font installed, PC at 0x200, all else zero.
    pub fn new() -> Self {
        let mut memory = [0_u8; MEMORY_SIZE];
        memory[FONT_ADDR..FONT_ADDR + FONT.len()].copy_from_slice(&FONT);

        MachineState {
            memory,
            registers: [0; REGISTER_COUNT],
            index: 0,
            pc: PROGRAM_START as u16,
            stack: [0; STACK_SIZE],
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            display: FrameBuffer::new(),
            keys: [false; KEY_COUNT],
            run_state: RunState::Running,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Copy a ROM image into memory at 0x200.
    pub fn load(&mut self, rom: &[u8]) -> Result<(), LoadError> {
        if rom.len() > PROGRAM_SPACE {
            return Err(LoadError::too_large(rom.len()));
        }
        self.memory[PROGRAM_START..PROGRAM_START + rom.len()].copy_from_slice(rom);
        Ok(())
    }

    pub(crate) fn read(&self, addr: u16) -> u8 {
        self.memory[(addr & ADDRESS_MASK) as usize]
    }

    pub(crate) fn write(&mut self, addr: u16, value: u8) {
        self.memory[(addr & ADDRESS_MASK) as usize] = value;
    }

    pub(crate) fn push(&mut self, addr: u16) -> Result<(), Fault> {
        let slot = self.stack.get_mut(self.sp).ok_or(Fault::StackOverflow)?;
        *slot = addr;
        self.sp += 1;
        Ok(())
    }

    pub(crate) fn pop(&mut self) -> Result<u16, Fault> {
        self.sp = self.sp.checked_sub(1).ok_or(Fault::StackUnderflow)?;
        Ok(self.stack[self.sp])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boot_layout() {
        let m = MachineState::new();
        assert_eq!(m.memory[..FONT.len()], FONT);
        assert!(m.memory[FONT.len()..].iter().all(|b| *b == 0));
        assert_eq!(m.pc, 0x200);
        assert_eq!(m.sp, 0);
        assert_eq!(m.run_state, RunState::Running);
    }

    #[test]
    fn test_load_places_rom_at_program_start() -> Result<(), LoadError> {
        let mut m = MachineState::new();
        let rom: Vec<u8> = (0..=255).collect();
        m.load(&rom)?;
        for (i, b) in rom.iter().enumerate() {
            assert_eq!(m.memory[PROGRAM_START + i], *b);
        }
        Ok(())
    }

    #[test]
    fn test_load_fills_all_program_space() -> Result<(), LoadError> {
        let mut m = MachineState::new();
        m.load(&[0xAB; PROGRAM_SPACE])?;
        assert_eq!(m.memory[MEMORY_SIZE - 1], 0xAB);
        Ok(())
    }

    #[test]
    fn test_load_too_large_leaves_state_untouched() {
        let mut m = MachineState::new();
        let before = m.memory;
        let err = m.load(&[0x12; PROGRAM_SPACE + 1]).unwrap_err();
        assert_eq!(
            err,
            LoadError::RomTooLarge {
                size: 3585,
                max: 3584
            }
        );
        assert_eq!(m.memory, before);
    }

    #[test]
    fn test_stack_bounds() {
        let mut m = MachineState::new();
        assert_eq!(m.pop(), Err(Fault::StackUnderflow));
        for i in 0..STACK_SIZE as u16 {
            assert_eq!(m.push(0x200 + i * 2), Ok(()));
        }
        assert_eq!(m.push(0x300), Err(Fault::StackOverflow));
        assert_eq!(m.sp, STACK_SIZE);
        assert_eq!(m.pop(), Ok(0x21E));
    }

    #[test]
    fn test_addresses_wrap() {
        let mut m = MachineState::new();
        m.write(0x1005, 0x42);
        assert_eq!(m.memory[0x005], 0x42);
        assert_eq!(m.read(0xF005), 0x42);
    }

    #[test]
    fn test_reset_restores_boot_state() -> Result<(), LoadError> {
        let mut m = MachineState::new();
        m.load(&[1, 2, 3])?;
        m.registers[3] = 9;
        m.run_state = RunState::Halted(Fault::StackUnderflow);
        m.reset();
        assert_eq!(m.memory[PROGRAM_START], 0);
        assert_eq!(m.registers, [0; REGISTER_COUNT]);
        assert_eq!(m.run_state, RunState::Running);
        Ok(())
    }
}
