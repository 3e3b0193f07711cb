/// Braille Unicode canvas for terminal map layers.
/// Each character cell holds a 2x4 dot grid (8 dots), so the effective
/// pixel resolution is `width*2 x height*4`.
#[derive(Clone)]
pub struct BrailleCanvas {
    width: usize,  // Characters
    height: usize, // Characters
    cells: Vec<u8>, // Dot bit patterns, row-major
}

impl BrailleCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![0u8; width * height],
        }
    }

    /// Width in pixels (two dots per character)
    pub fn pixel_width(&self) -> usize {
        self.width * 2
    }

    /// Height in pixels (four dots per character)
    pub fn pixel_height(&self) -> usize {
        self.height * 4
    }

    /// Set a pixel at the given coordinates.
    /// Braille dot layout per character:
    /// ```text
    /// (0,0) (1,0)   bits: 0x01 0x08
    /// (0,1) (1,1)   bits: 0x02 0x10
    /// (0,2) (1,2)   bits: 0x04 0x20
    /// (0,3) (1,3)   bits: 0x40 0x80
    /// ```
    pub fn set_pixel(&mut self, x: usize, y: usize) {
        let cx = x / 2;
        let cy = y / 4;

        if cx >= self.width || cy >= self.height {
            return;
        }

        let bit = match (x % 2, y % 4) {
            (0, 0) => 0x01,
            (1, 0) => 0x08,
            (0, 1) => 0x02,
            (1, 1) => 0x10,
            (0, 2) => 0x04,
            (1, 2) => 0x20,
            (0, 3) => 0x40,
            (1, 3) => 0x80,
            _ => 0,
        };

        self.cells[cy * self.width + cx] |= bit;
    }

    /// Set a pixel using signed coordinates (ignores negative values)
    pub fn set_pixel_signed(&mut self, x: i32, y: i32) {
        if x >= 0 && y >= 0 {
            self.set_pixel(x as usize, y as usize);
        }
    }

    /// Dot pattern of a single character cell (0 when out of range)
    pub fn cell(&self, cx: usize, cy: usize) -> u8 {
        if cx >= self.width || cy >= self.height {
            return 0;
        }
        self.cells[cy * self.width + cx]
    }

    /// True when no dot has been set
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|&b| b == 0)
    }

    /// Iterate over non-empty cells as (column, row, dot pattern)
    pub fn lit_cells(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        self.cells.iter().enumerate().filter_map(move |(idx, &bits)| {
            if bits == 0 {
                None
            } else {
                Some((idx % self.width, idx / self.width, bits))
            }
        })
    }

    /// Convert the canvas to a string of Braille characters
    #[cfg(test)]
    pub fn to_string(&self) -> String {
        (0..self.height)
            .map(|row| {
                self.cells[row * self.width..(row + 1) * self.width]
                    .iter()
                    .map(|&b| braille_char(b))
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Braille character for a dot pattern (U+2800 + bits)
#[inline(always)]
pub fn braille_char(bits: u8) -> char {
    char::from_u32(0x2800 + bits as u32).unwrap_or(' ')
}

/// Recover the dot pattern from a rendered Braille character
#[inline(always)]
pub fn braille_bits(ch: char) -> Option<u8> {
    let code = ch as u32;
    if (0x2800..=0x28FF).contains(&code) {
        Some((code - 0x2800) as u8)
    } else {
        None
    }
}
