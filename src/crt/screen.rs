//! The handheld's CRT: 40 columns × 6 rows of pixels.
//!
//! The beam draws one pixel per cycle, left to right and top to bottom.
//! A pixel is lit when the 3-pixel-wide sprite centered on X covers the
//! beam's column.

use super::RasterDevice;
use std::fmt;

/// Pixels per row.
pub const WIDTH: usize = 40;

/// Rows per screen.
pub const HEIGHT: usize = 6;

/// Character for a lit pixel.
pub const LIT: char = '#';

/// Character for a dark pixel.
pub const DARK: char = '.';

/// CRT state: the pixel grid and the beam position.
#[derive(Clone, PartialEq, Eq)]
pub struct Crt {
    rows: [[bool; WIDTH]; HEIGHT],
    x: usize,
    y: usize,
}

impl Crt {
    /// A dark screen with the beam at (0, 0).
    pub fn new() -> Self {
        Self {
            rows: [[false; WIDTH]; HEIGHT],
            x: 0,
            y: 0,
        }
    }

    /// Darken every pixel and return the beam to (0, 0).
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Beam position as (column, row).
    pub fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    /// Whether the pixel at (column, row) is lit.
    ///
    /// # Panics
    /// Panics if the coordinates are off screen.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        assert!(x < WIDTH && y < HEIGHT, "pixel ({}, {}) off screen", x, y);
        self.rows[y][x]
    }

    /// One row rendered as `#`/`.` characters.
    ///
    /// # Panics
    /// Panics if `y` is not a valid row.
    pub fn row(&self, y: usize) -> String {
        assert!(y < HEIGHT, "row {} off screen", y);
        self.rows[y]
            .iter()
            .map(|&lit| if lit { LIT } else { DARK })
            .collect()
    }

    /// All rows, top to bottom.
    pub fn lines(&self) -> Vec<String> {
        (0..HEIGHT).map(|y| self.row(y)).collect()
    }

    /// The whole screen, rows joined by newlines.
    pub fn render(&self) -> String {
        self.lines().join("\n")
    }

    /// Number of lit pixels.
    pub fn lit_count(&self) -> usize {
        self.rows.iter().flatten().filter(|&&lit| lit).count()
    }

    /// Light the pixel under the beam if the sprite covers it, then advance
    /// the beam. Wraps to the next row at the right edge and back to the top
    /// after the last row.
    pub fn draw_and_advance(&mut self, sprite_position: i64) {
        let column = self.x as i64;
        if (sprite_position - 1..=sprite_position + 1).contains(&column) {
            self.rows[self.y][self.x] = true;
        }

        self.x += 1;
        if self.x >= WIDTH {
            self.x = 0;
            self.y += 1;
        }
        if self.y >= HEIGHT {
            self.y = 0;
        }
    }
}

impl RasterDevice for Crt {
    fn draw_and_advance(&mut self, sprite_position: i64) {
        Crt::draw_and_advance(self, sprite_position);
    }
}

impl Default for Crt {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Crt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl fmt::Debug for Crt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Crt at {:?}", self.position())?;
        write!(f, "{}", self.render())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn cursor_follows_notification_count(
            sprites in prop::collection::vec(-5i64..45, 0..600)
        ) {
            let mut crt = Crt::new();
            for &s in &sprites {
                crt.draw_and_advance(s);
            }
            let n = sprites.len();
            prop_assert_eq!(crt.position(), (n % WIDTH, (n / WIDTH) % HEIGHT));
        }

        #[test]
        fn lit_pixels_never_exceed_notifications(
            sprites in prop::collection::vec(-5i64..45, 0..240)
        ) {
            let mut crt = Crt::new();
            for &s in &sprites {
                crt.draw_and_advance(s);
            }
            prop_assert!(crt.lit_count() <= sprites.len());
        }
    }
}
