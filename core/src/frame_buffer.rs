use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, EXTENDED_DISPLAY_HEIGHT, EXTENDED_DISPLAY_WIDTH,
    FRAME_BUFFER_SIZE,
};

/// # FrameBuffer
/// A row-major bitmap holding one byte (0 or 1) per pixel.
///
/// The storage is always sized for the 128x64 extended geometry; in normal mode only the first
/// 64x32 cells are addressed, with a row width of 64. Coordinates outside the active geometry
/// are ignored by every setter and read back as unset.
#[derive(Clone)]
pub struct FrameBuffer {
    pixels: [u8; FRAME_BUFFER_SIZE],
    extended: bool,
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            pixels: [0; FRAME_BUFFER_SIZE],
            extended: false,
        }
    }

    pub fn is_extended(&self) -> bool {
        self.extended
    }

    /// Switches geometry; pixels are left as they are and reinterpreted with the new row width.
    pub fn set_extended(&mut self, extended: bool) {
        self.extended = extended;
    }

    /// Number of pixels in a row
    pub fn width(&self) -> usize {
        if self.extended {
            EXTENDED_DISPLAY_WIDTH
        } else {
            DISPLAY_WIDTH
        }
    }

    /// Number of pixels in a column
    pub fn height(&self) -> usize {
        if self.extended {
            EXTENDED_DISPLAY_HEIGHT
        } else {
            DISPLAY_HEIGHT
        }
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.width() && y < self.height() {
            Some(y * self.width() + x)
        } else {
            None
        }
    }

    fn write(&mut self, x: usize, y: usize, value: u8) {
        if let Some(index) = self.index(x, y) {
            self.pixels[index] = value;
        }
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> bool {
        self.index(x, y).map_or(false, |index| self.pixels[index] != 0)
    }

    pub fn set_pixel(&mut self, x: usize, y: usize) {
        self.write(x, y, 1);
    }

    pub fn clear_pixel(&mut self, x: usize, y: usize) {
        self.write(x, y, 0);
    }

    pub fn fill_row(&mut self, y: usize) {
        for x in 0..self.width() {
            self.write(x, y, 1);
        }
    }

    pub fn clear_row(&mut self, y: usize) {
        for x in 0..self.width() {
            self.write(x, y, 0);
        }
    }

    pub fn fill_column(&mut self, x: usize) {
        for y in 0..self.height() {
            self.write(x, y, 1);
        }
    }

    pub fn clear_column(&mut self, x: usize) {
        for y in 0..self.height() {
            self.write(x, y, 0);
        }
    }

    /// Unsets every cell, including those outside the active geometry.
    pub fn clear(&mut self) {
        self.pixels = [0; FRAME_BUFFER_SIZE];
    }

    /// Moves every row down by `rows`, discarding what falls off the bottom.
    pub fn scroll_down(&mut self, rows: usize) {
        let (width, height) = (self.width(), self.height());
        for y in (0..height).rev() {
            for x in 0..width {
                let value = if y >= rows {
                    self.get_pixel(x, y - rows) as u8
                } else {
                    0
                };
                self.write(x, y, value);
            }
        }
    }

    /// Moves every column right by `columns`, discarding what falls off the right edge.
    pub fn scroll_right(&mut self, columns: usize) {
        let (width, height) = (self.width(), self.height());
        for y in 0..height {
            for x in (0..width).rev() {
                let value = if x >= columns {
                    self.get_pixel(x - columns, y) as u8
                } else {
                    0
                };
                self.write(x, y, value);
            }
        }
    }

    /// Moves every column left by `columns`, discarding what falls off the left edge.
    pub fn scroll_left(&mut self, columns: usize) {
        let (width, height) = (self.width(), self.height());
        for y in 0..height {
            for x in 0..width {
                let value = if x + columns < width {
                    self.get_pixel(x + columns, y) as u8
                } else {
                    0
                };
                self.write(x, y, value);
            }
        }
    }

    /// XORs a sprite onto the buffer at (x, y), wrapping around both edges.
    ///
    /// Each element of `sprite` is one row whose `sprite_width` least significant bits are
    /// drawn most significant bit first. Returns whether any set pixel was unset.
    pub fn draw(&mut self, x: usize, y: usize, sprite: &[u16], sprite_width: usize) -> bool {
        let (width, height) = (self.width(), self.height());
        let mut collision = false;

        for (row, bits) in sprite.iter().enumerate() {
            let py = (y + row) % height;
            for column in 0..sprite_width {
                if (bits >> (sprite_width - 1 - column)) & 1 == 0 {
                    continue;
                }
                let px = (x + column) % width;
                let index = py * width + px;
                collision |= self.pixels[index] == 1;
                self.pixels[index] ^= 1;
            }
        }

        collision
    }

    /// The cells of the active geometry in row-major order.
    pub fn as_slice(&self) -> &[u8] {
        &self.pixels[..self.width() * self.height()]
    }

    /// The rows of the active geometry, top to bottom.
    pub fn rows(&self) -> std::slice::Chunks<'_, u8> {
        self.as_slice().chunks(self.width())
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
