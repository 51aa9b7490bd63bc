//! CLI enum types for output format and source pattern options.

use clap::ValueEnum;

use crate::ascii;
use crate::patterns;

/// Glyph format for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CharacterSet {
    Standard,
    Dense,
    Blocks,
    Minimal,
    Detailed,
    Geometric,
    Katakana,
    Emoji,
    Braille,
}

impl From<CharacterSet> for ascii::CharSet {
    fn from(c: CharacterSet) -> Self {
        match c {
            CharacterSet::Standard => ascii::CharSet::Standard,
            CharacterSet::Dense => ascii::CharSet::Dense,
            CharacterSet::Blocks => ascii::CharSet::Blocks,
            CharacterSet::Minimal => ascii::CharSet::Minimal,
            CharacterSet::Detailed => ascii::CharSet::Detailed,
            CharacterSet::Geometric => ascii::CharSet::Geometric,
            CharacterSet::Katakana => ascii::CharSet::Katakana,
            CharacterSet::Emoji => ascii::CharSet::Emoji,
            CharacterSet::Braille => ascii::CharSet::Braille,
        }
    }
}

/// Procedural source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PatternKind {
    #[default]
    Gradient,
    Rings,
    Checker,
}

impl From<PatternKind> for patterns::Pattern {
    fn from(p: PatternKind) -> Self {
        match p {
            PatternKind::Gradient => patterns::Pattern::Gradient,
            PatternKind::Rings => patterns::Pattern::Rings,
            PatternKind::Checker => patterns::Pattern::Checker,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charset_to_ascii_charset() {
        assert_eq!(
            ascii::CharSet::from(CharacterSet::Standard),
            ascii::CharSet::Standard
        );
        assert_eq!(
            ascii::CharSet::from(CharacterSet::Katakana),
            ascii::CharSet::Katakana
        );
        assert_eq!(
            ascii::CharSet::from(CharacterSet::Braille),
            ascii::CharSet::Braille
        );
    }

    #[test]
    fn test_every_charset_has_a_cli_value() {
        for charset in ascii::CharSet::ALL {
            let value = CharacterSet::from_str(charset.name(), true).unwrap();
            assert_eq!(ascii::CharSet::from(value), charset);
        }
    }

    #[test]
    fn test_pattern_kind_names_match() {
        for pattern in patterns::Pattern::ALL {
            let kind = PatternKind::from_str(pattern.name(), true).unwrap();
            assert_eq!(patterns::Pattern::from(kind), pattern);
        }
    }
}
