use std::fmt;

pub const WIDTH: usize = 64;
pub const HEIGHT: usize = 32;

/// Monochrome 64x32 screen, one byte per pixel (0 or 1), row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: [u8; WIDTH * HEIGHT],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            pixels: [0; WIDTH * HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        self.pixels = [0; WIDTH * HEIGHT];
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Pixel at (x, y), with both coordinates wrapped onto the screen.
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.pixels[(x % WIDTH) + (y % HEIGHT) * WIDTH]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.pixels.chunks_exact(WIDTH)
    }

    /// XOR an 8 pixel wide sprite onto the screen at (x, y), one byte per row.
    /// Rows and columns running off an edge wrap to the opposite edge.
    ///
    /// Returns true if any lit sprite pixel landed on an already lit pixel,
    /// which is what Dxyn reports in VF.
    pub fn draw(&mut self, x: usize, y: usize, sprite: &[u8]) -> bool {
        let mut collision = false;
        for (i, row) in sprite.iter().enumerate() {
            for j in 0..8 {
                let bit = (row >> (7 - j)) & 1;
                if bit == 0 {
                    continue;
                }
                let wx = (x + j) % WIDTH;
                let wy = (y + i) % HEIGHT;
                let cell = &mut self.pixels[wx + wy * WIDTH];
                if *cell == 1 {
                    collision = true;
                }
                *cell ^= bit;
            }
        }
        collision
    }
}

impl fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lit = self.pixels.iter().filter(|p| **p == 1).count();
        f.debug_struct("FrameBuffer").field("lit", &lit).finish()
    }
}

// '#' for a lit pixel, ' ' otherwise, one line per row
impl fmt::Display for FrameBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for pixel in row {
                f.write_str(if *pixel == 1 { "#" } else { " " })?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}
