use chip8_vm::interpreter::{PROGRAM_SPACE, PROGRAM_START};
use chip8_vm::{Chip8, Fault, LoadError, RunState};

fn assemble(program: &[u16]) -> Vec<u8> {
    program.iter().flat_map(|op| op.to_be_bytes()).collect()
}

fn boot(program: &[u16]) -> Result<Chip8, LoadError> {
    let mut chip = Chip8::with_seed(42);
    chip.reset();
    chip.load(&assemble(program))?;
    Ok(chip)
}

#[test]
fn test_load_any_size_up_to_program_space() -> Result<(), LoadError> {
    for len in [0, 1, 2, 255, 1024, PROGRAM_SPACE - 1, PROGRAM_SPACE] {
        let rom: Vec<u8> = (0..len).map(|i| (i * 7 % 251) as u8).collect();
        let mut chip = Chip8::new();
        chip.load(&rom)?;
        assert_eq!(&chip.memory()[PROGRAM_START..PROGRAM_START + len], &rom[..]);
    }
    Ok(())
}

#[test]
fn test_oversized_rom_is_rejected() {
    let mut chip = Chip8::new();
    chip.reset();
    let before = chip.memory().to_vec();
    let result = chip.load(&vec![0xFF; PROGRAM_SPACE + 1]);
    assert!(matches!(result, Err(LoadError::RomTooLarge { size: 3585, .. })));
    assert_eq!(chip.memory(), &before[..]);
    assert_eq!(chip.pc(), 0x200);
}

#[test]
fn test_countdown_loop_with_subroutine() -> Result<(), LoadError> {
    // count V0 down from 10, bumping V1 in a subroutine each time round
    let mut chip = boot(&[
        0x600A, // 200: V0 = 10
        0x6201, // 202: V2 = 1
        0x2210, // 204: CALL 210
        0x8025, // 206: V0 -= V2
        0x3000, // 208: skip if V0 == 0
        0x1204, // 20A: JP 204
        0x120C, // 20C: park
        0x0000, // 20E
        0x7101, // 210: V1 += 1
        0x00EE, // 212: RET
    ])?;
    for _ in 0..200 {
        chip.step().expect("no faults");
    }
    assert_eq!(chip.pc(), 0x20C);
    assert_eq!(chip.registers()[0], 0);
    assert_eq!(chip.registers()[1], 10);
    assert_eq!(chip.stack_depth(), 0);
    // last subtraction was 1 - 1, no borrow but not strictly greater
    assert_eq!(chip.registers()[0xF], 0);
    Ok(())
}

#[test]
fn test_score_display() -> Result<(), LoadError> {
    // BCD of 137 at 0x300, load into V0..V2, draw each digit
    let mut chip = boot(&[
        0x6389, // V3 = 137
        0xA300, // I = 0x300
        0xF333, // BCD V3
        0xF265, // V0..V2 = digits
        0x6A00, // VA = x
        0x6B00, // VB = y
        0xF029, // I = glyph(V0)
        0xDAB5,
        0x7A05,
        0xF129, // I = glyph(V1)
        0xDAB5,
        0x7A05,
        0xF229, // I = glyph(V2)
        0xDAB5,
    ])?;
    for _ in 0..14 {
        chip.step().expect("no faults");
    }
    assert_eq!(&chip.registers()[..3], &[1, 3, 7]);
    assert_eq!(chip.registers()[0xF], 0);

    let text = chip.display().to_string();
    let rows: Vec<&str> = text.lines().take(5).collect();
    // "1" "3" "7" side by side, 5 columns apart
    assert_eq!(&rows[0][..15], "  #  #### #### ");
    assert_eq!(&rows[4][..15], " ### ####  #   ");
    Ok(())
}

#[test]
fn test_key_wait_then_halt_then_reset() -> Result<(), LoadError> {
    let mut chip = boot(&[0xF40A, 0x0FFF])?;
    chip.step().expect("no faults");
    assert_eq!(chip.run_state(), RunState::AwaitingKey { register: 4 });
    for _ in 0..3 {
        chip.step().expect("no faults");
    }
    assert_eq!(chip.pc(), 0x200);

    chip.set_key(0xE, true);
    chip.step().expect("no faults");
    assert_eq!(chip.registers()[4], 0xE);
    assert_eq!(chip.pc(), 0x202);

    assert_eq!(chip.step(), Err(Fault::UnknownOpcode(0x0FFF)));
    assert_eq!(chip.step(), Ok(()));
    assert_eq!(chip.fault(), Some(Fault::UnknownOpcode(0x0FFF)));

    chip.reset();
    assert_eq!(chip.run_state(), RunState::Running);
    assert!(chip.keys().iter().all(|k| !k));
    Ok(())
}
