/// Where the hex digit glyphs live. Fx29 relies on this being address zero.
pub const FONT_ADDR: usize = 0x000;

/// Bytes per glyph; every glyph is 4 pixels wide and 5 rows tall.
pub const GLYPH_HEIGHT: usize = 5;

pub const FONT: [u8; 16 * GLYPH_HEIGHT] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

// "CHIP8" banner, one 5-row sprite per letter, paired with its x offset
pub const SPLASH_Y: u8 = 4;
pub const SPLASH: [(u8, [u8; 5]); 5] = [
    (1, [0xF8, 0x80, 0x80, 0x80, 0xF8]),  // C
    (10, [0x81, 0x81, 0xFF, 0x81, 0x81]), // H
    (20, [0x18, 0x18, 0x18, 0x18, 0x18]), // I
    (30, [0xF0, 0x90, 0xF0, 0x80, 0x80]), // P
    (40, [0xF0, 0x90, 0xF0, 0x90, 0xF0]), // 8
];
