//! Geometry argument
//!
//! Passed to the native library in its canonical string form (`WxH+X+Y` plus flags).

use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MagickGeometry {
    pub width: usize,
    pub height: usize,
    pub x: isize,
    pub y: isize,
    /// `%`: width and height are percentages
    pub is_percentage: bool,
    /// `!`: resize to exactly width x height
    pub ignore_aspect_ratio: bool,
    /// `>`: only shrink larger images
    pub greater: bool,
    /// `<`: only enlarge smaller images
    pub less: bool,
    /// `^`: fill the area, overflowing one dimension
    pub fill_area: bool,
    /// `@`: width is a pixel count limit
    pub limit_pixels: bool,
}

impl MagickGeometry {
    pub fn new(width: usize, height: usize) -> Self {
        MagickGeometry {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_offset(mut self, x: isize, y: isize) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn percentage(mut self) -> Self {
        self.is_percentage = true;
        self
    }

    pub fn ignore_aspect_ratio(mut self) -> Self {
        self.ignore_aspect_ratio = true;
        self
    }

    /// No size and no offset.
    pub fn is_empty(&self) -> bool {
        self.width == 0 && self.height == 0 && self.x == 0 && self.y == 0
    }
}

impl fmt::Display for MagickGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.width > 0 {
            write!(f, "{}", self.width)?;
        }
        if self.height > 0 {
            write!(f, "x{}", self.height)?;
        } else if !self.is_percentage {
            f.write_str("x")?;
        }
        if self.x != 0 || self.y != 0 {
            write!(f, "{:+}{:+}", self.x, self.y)?;
        }

        let flags = [
            (self.fill_area, '^'),
            (self.greater, '>'),
            (self.ignore_aspect_ratio, '!'),
            (self.is_percentage, '%'),
            (self.less, '<'),
            (self.limit_pixels, '@'),
        ];
        for (set, flag) in flags {
            if set {
                write!(f, "{}", flag)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_form() {
        assert_eq!(MagickGeometry::new(640, 480).to_string(), "640x480");
        assert_eq!(MagickGeometry::new(10, 20).with_offset(5, -3).to_string(), "10x20+5-3");
        assert_eq!(MagickGeometry::new(50, 0).percentage().to_string(), "50%");
        assert_eq!(MagickGeometry::new(100, 0).to_string(), "100x");
        assert_eq!(MagickGeometry::new(10, 10).ignore_aspect_ratio().to_string(), "10x10!");

        let geometry = MagickGeometry {
            greater: true,
            ..MagickGeometry::new(800, 600)
        };
        assert_eq!(geometry.to_string(), "800x600>");
    }

    #[test]
    fn test_empty() {
        assert!(MagickGeometry::default().is_empty());
        assert!(!MagickGeometry::default().with_offset(1, 0).is_empty());
    }
}
