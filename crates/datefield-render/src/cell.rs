#![forbid(unsafe_code)]

//! Cell types.
//!
//! A [`Cell`] is one terminal column on one row: a character plus colors
//! and style flags. Wide characters occupy their head cell followed by
//! [`Cell::CONTINUATION`] cells.

/// Sentinel content for the tail of a wide character.
const CONTINUATION_CHAR: char = '\0';

/// A single terminal cell.
///
/// The default cell is a blank with white foreground and transparent
/// background.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Character content.
    pub content: char,
    /// Foreground color.
    pub fg: PackedRgba,
    /// Background color.
    pub bg: PackedRgba,
    /// Style flags.
    pub attrs: StyleFlags,
}

impl Cell {
    /// Placeholder occupying the columns after a wide character.
    pub const CONTINUATION: Self = Self {
        content: CONTINUATION_CHAR,
        fg: PackedRgba::TRANSPARENT,
        bg: PackedRgba::TRANSPARENT,
        attrs: StyleFlags::empty(),
    };

    /// Create a cell from a single character with default colors.
    #[inline]
    pub const fn from_char(c: char) -> Self {
        Self {
            content: c,
            fg: PackedRgba::WHITE,
            bg: PackedRgba::TRANSPARENT,
            attrs: StyleFlags::empty(),
        }
    }

    /// Check if this is a continuation cell.
    #[inline]
    pub const fn is_continuation(&self) -> bool {
        self.content == CONTINUATION_CHAR
    }

    /// Display width of the content (0 for continuations).
    #[inline]
    pub fn width(&self) -> usize {
        if self.is_continuation() {
            0
        } else {
            crate::char_width(self.content)
        }
    }

    #[inline]
    #[must_use]
    pub const fn with_char(mut self, c: char) -> Self {
        self.content = c;
        self
    }

    #[inline]
    #[must_use]
    pub const fn with_fg(mut self, fg: PackedRgba) -> Self {
        self.fg = fg;
        self
    }

    #[inline]
    #[must_use]
    pub const fn with_bg(mut self, bg: PackedRgba) -> Self {
        self.bg = bg;
        self
    }

    #[inline]
    #[must_use]
    pub const fn with_attrs(mut self, attrs: StyleFlags) -> Self {
        self.attrs = attrs;
        self
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::from_char(' ')
    }
}

impl core::fmt::Debug for Cell {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Cell")
            .field("content", &self.content)
            .field("fg", &self.fg)
            .field("bg", &self.bg)
            .field("attrs", &self.attrs)
            .finish()
    }
}

/// A compact RGBA color, `0xRRGGBBAA`.
///
/// Straight (non-premultiplied) alpha. An alpha of zero means "inherit
/// whatever is underneath".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[repr(transparent)]
pub struct PackedRgba(pub u32);

impl PackedRgba {
    /// Fully transparent (alpha = 0).
    pub const TRANSPARENT: Self = Self(0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque red.
    pub const RED: Self = Self::rgb(255, 0, 0);

    /// Create an opaque RGB color (alpha = 255).
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Create an RGBA color with explicit alpha.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | (a as u32))
    }

    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    /// Whether this color is fully transparent.
    #[inline]
    pub const fn is_transparent(self) -> bool {
        self.a() == 0
    }

    /// Porter-Duff source-over: `self` composited on top of `dst`.
    #[must_use]
    pub fn over(self, dst: Self) -> Self {
        match self.a() {
            255 => self,
            0 => dst,
            sa => {
                let sa = u32::from(sa);
                let inv = 255 - sa;
                let blend = |s: u8, d: u8| ((u32::from(s) * sa + u32::from(d) * inv) / 255) as u8;
                let out_a = (sa + u32::from(dst.a()) * inv / 255).min(255) as u8;
                Self::rgba(
                    blend(self.r(), dst.r()),
                    blend(self.g(), dst.g()),
                    blend(self.b(), dst.b()),
                    out_a,
                )
            }
        }
    }
}

bitflags::bitflags! {
    /// 8-bit cell style flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u8 {
        /// Bold / increased intensity.
        const BOLD          = 0b0000_0001;
        /// Dim / decreased intensity.
        const DIM           = 0b0000_0010;
        /// Italic text.
        const ITALIC        = 0b0000_0100;
        /// Underlined text.
        const UNDERLINE     = 0b0000_1000;
        /// Blinking text.
        const BLINK         = 0b0001_0000;
        /// Reverse video (swap fg/bg).
        const REVERSE       = 0b0010_0000;
        /// Strikethrough text.
        const STRIKETHROUGH = 0b0100_0000;
        /// Hidden / invisible text.
        const HIDDEN        = 0b1000_0000;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cell_is_blank() {
        let cell = Cell::default();
        assert_eq!(cell.content, ' ');
        assert_eq!(cell.fg, PackedRgba::WHITE);
        assert!(cell.bg.is_transparent());
        assert!(cell.attrs.is_empty());
        assert_eq!(cell.width(), 1);
    }

    #[test]
    fn continuation_has_zero_width() {
        assert!(Cell::CONTINUATION.is_continuation());
        assert_eq!(Cell::CONTINUATION.width(), 0);
        assert!(!Cell::from_char('x').is_continuation());
    }

    #[test]
    fn rgba_channels() {
        let c = PackedRgba::rgba(1, 2, 3, 4);
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (1, 2, 3, 4));
        assert_eq!(PackedRgba::rgb(9, 9, 9).a(), 255);
    }

    #[test]
    fn over_respects_alpha_extremes() {
        let red = PackedRgba::RED;
        let black = PackedRgba::BLACK;
        assert_eq!(red.over(black), red);
        assert_eq!(PackedRgba::TRANSPARENT.over(black), black);
        let half = PackedRgba::rgba(255, 0, 0, 128).over(black);
        assert!(half.r() > 100 && half.r() < 160);
        assert_eq!(half.a(), 255);
    }

    #[test]
    fn builders_chain() {
        let cell = Cell::from_char('a')
            .with_fg(PackedRgba::RED)
            .with_bg(PackedRgba::BLACK)
            .with_attrs(StyleFlags::BOLD | StyleFlags::UNDERLINE)
            .with_char('b');
        assert_eq!(cell.content, 'b');
        assert!(cell.attrs.contains(StyleFlags::BOLD));
        assert_eq!(cell.bg, PackedRgba::BLACK);
    }
}
