//! Character set definitions for glyph rendering.
//!
//! Every literal palette is ordered from emptiest (space) to densest glyph.
//! Braille is the one procedural set: it encodes 2x4 pixel blocks instead of
//! indexing a list.

use serde::{Deserialize, Serialize};

/// Standard ASCII density ramp (10 levels).
pub const STANDARD_CHARSET: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Dense ASCII ramp (92 levels) for fine tonal steps at high resolution.
#[rustfmt::skip]
pub const DENSE_CHARSET: &[char] = &[
    ' ', '`', '.', '-', '\'', ':', '_', ',', '^', '=', ';', '>', '<', '+', '!', 'r', 'c', '*',
    '/', 'z', '?', 's', 'L', 'T', 'v', ')', 'J', '7', '(', '|', 'F', 'i', '{', 'C', '}', 'f',
    'I', '3', '1', 't', 'l', 'u', '[', 'n', 'e', 'o', 'Z', '5', 'Y', 'x', 'j', 'y', 'a', ']',
    '2', 'E', 'S', 'w', 'q', 'k', 'P', '6', 'h', '9', 'd', '4', 'V', 'p', 'O', 'G', 'b', 'U',
    'A', 'K', 'X', 'H', 'm', '8', 'R', 'D', '#', '$', 'B', 'g', '0', 'M', 'N', 'W', 'Q', '%',
    '&', '@',
];

/// Block character set (5 levels).
pub const BLOCKS_CHARSET: &[char] = &[' ', '░', '▒', '▓', '█'];

/// Minimal character set (5 levels).
/// Clean, less noisy look.
pub const MINIMAL_CHARSET: &[char] = &[' ', '.', '-', ':', '*'];

/// Detailed ASCII ramp (71 levels).
#[rustfmt::skip]
pub const DETAILED_CHARSET: &[char] = &[
    ' ', '.', '\'', '\'', '`', '^', '"', ',', ':', ';', 'I', 'l', '!', 'i', '>', '<', '~', '+',
    '_', '-', '?', ']', '[', '}', '{', '1', ')', '(', '|', '\\', '/', 't', 'f', 'j', 'r', 'x',
    'n', 'u', 'v', 'c', 'z', 'X', 'Y', 'U', 'J', 'C', 'L', 'Q', '0', 'O', 'Z', 'm', 'w', 'q',
    'p', 'd', 'b', 'k', 'h', 'a', 'o', '*', '#', 'M', 'W', '&', '8', '%', 'B', '@', '$',
];

/// Geometric shapes (10 levels).
pub const GEOMETRIC_CHARSET: &[char] = &[' ', '·', '∘', '○', '◎', '●', '◐', '◑', '◒', '◓'];

/// Half-width katakana (43 levels).
#[rustfmt::skip]
pub const KATAKANA_CHARSET: &[char] = &[
    ' ', 'ｦ', 'ｱ', 'ｳ', 'ｴ', 'ｵ', 'ｶ', 'ｷ', 'ｸ', 'ｹ', 'ｺ', 'ｻ', 'ｼ', 'ｽ', 'ｾ', 'ｿ', 'ﾀ', 'ﾁ',
    'ﾂ', 'ﾃ', 'ﾅ', 'ﾆ', 'ﾇ', 'ﾈ', 'ﾉ', 'ﾊ', 'ﾋ', 'ﾌ', 'ﾍ', 'ﾎ', 'ﾏ', 'ﾐ', 'ﾑ', 'ﾒ', 'ﾓ', 'ﾔ',
    'ﾕ', 'ﾗ', 'ﾘ', 'ﾙ', 'ﾚ', 'ﾛ', 'ﾝ',
];

/// Square symbols of increasing fill (7 levels).
pub const EMOJI_CHARSET: &[char] = &[' ', '·', '░', '▪', '◾', '◼', '⬛'];

/// Glyph strategy selected by a conversion config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharSet {
    /// Standard ASCII density ramp (10 levels)
    Standard,
    /// 92-level ASCII ramp
    Dense,
    /// Block character set (5 levels) using Unicode blocks
    Blocks,
    /// Minimal character set for a clean look
    Minimal,
    /// 71-level ASCII ramp
    Detailed,
    Geometric,
    Katakana,
    Emoji,
    /// 2x4 dot patterns, one glyph per pixel block
    #[default]
    Braille,
}

impl CharSet {
    /// Every format, in display order.
    pub const ALL: [CharSet; 9] = [
        CharSet::Standard,
        CharSet::Dense,
        CharSet::Blocks,
        CharSet::Minimal,
        CharSet::Detailed,
        CharSet::Geometric,
        CharSet::Katakana,
        CharSet::Emoji,
        CharSet::Braille,
    ];

    /// Get the character slice for this charset.
    ///
    /// Note: For Braille, this returns an empty slice since braille
    /// rendering encodes dots procedurally (see [`super::braille`]).
    pub fn chars(&self) -> &'static [char] {
        match self {
            CharSet::Standard => STANDARD_CHARSET,
            CharSet::Dense => DENSE_CHARSET,
            CharSet::Blocks => BLOCKS_CHARSET,
            CharSet::Minimal => MINIMAL_CHARSET,
            CharSet::Detailed => DETAILED_CHARSET,
            CharSet::Geometric => GEOMETRIC_CHARSET,
            CharSet::Katakana => KATAKANA_CHARSET,
            CharSet::Emoji => EMOJI_CHARSET,
            CharSet::Braille => &[],
        }
    }

    /// Get a machine-readable name for the charset.
    pub fn name(&self) -> &'static str {
        match self {
            CharSet::Standard => "standard",
            CharSet::Dense => "dense",
            CharSet::Blocks => "blocks",
            CharSet::Minimal => "minimal",
            CharSet::Detailed => "detailed",
            CharSet::Geometric => "geometric",
            CharSet::Katakana => "katakana",
            CharSet::Emoji => "emoji",
            CharSet::Braille => "braille",
        }
    }

    /// Human-readable label for listings.
    pub fn label(&self) -> &'static str {
        match self {
            CharSet::Standard => "Standard",
            CharSet::Dense => "Dense",
            CharSet::Blocks => "Blocks",
            CharSet::Minimal => "Minimal",
            CharSet::Detailed => "Detailed",
            CharSet::Geometric => "Geometric",
            CharSet::Katakana => "Katakana",
            CharSet::Emoji => "Emoji",
            CharSet::Braille => "Braille (dots)",
        }
    }

    /// Look a charset up by its [`name`](Self::name), case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }

    /// Check if this charset uses braille rendering.
    pub fn is_braille(&self) -> bool {
        matches!(self, CharSet::Braille)
    }

    /// Number of quantization levels used when dithering for this charset.
    pub fn dither_levels(&self) -> usize {
        match self {
            CharSet::Braille => 2,
            other => other.chars().len(),
        }
    }
}

impl std::fmt::Display for CharSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
