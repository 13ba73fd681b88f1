//! Synthetic OCR noise.
//!
//! Produces raw OCR-like text for a known card name: look-alike glyph
//! swaps, dropped and doubled letters, stray noise glyphs, and short junk
//! lines above and below the name (mana symbols, frame edges).

use crate::core::SimRng;

/// Glyph confusions an OCR engine typically makes, as (true, read) pairs.
const CONFUSIONS: [(char, char); 12] = [
    ('l', 'I'),
    ('I', 'l'),
    ('i', 'l'),
    ('o', '0'),
    ('O', '0'),
    ('e', 'c'),
    ('c', 'e'),
    ('n', 'r'),
    ('m', 'n'),
    ('u', 'v'),
    ('a', 'o'),
    ('S', '5'),
];

/// Noise glyphs the normalizer is expected to strip.
const STRAY_GLYPHS: [char; 5] = ['~', '@', '_', '.', '\u{2014}'];

/// Junk lines that show up around the name.
const JUNK_LINES: [&str; 6] = ["{2}{R}", "__", "@@", "~ ~", "1/1", "Ri"];

/// Corruption rates, each a per-character or per-line probability.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OcrNoise {
    /// Replace a letter with a look-alike.
    pub confusion: f64,
    /// Drop a letter.
    pub drop: f64,
    /// Repeat a letter.
    pub double: f64,
    /// Insert a stray noise glyph after a character.
    pub stray: f64,
    /// Add a junk line before and/or after the name.
    pub junk_line: f64,
}

impl Default for OcrNoise {
    fn default() -> Self {
        Self {
            confusion: 0.05,
            drop: 0.01,
            double: 0.01,
            stray: 0.02,
            junk_line: 0.5,
        }
    }
}

impl OcrNoise {
    /// No corruption at all.
    #[must_use]
    pub fn none() -> Self {
        Self {
            confusion: 0.0,
            drop: 0.0,
            double: 0.0,
            stray: 0.0,
            junk_line: 0.0,
        }
    }

    /// Scale every rate by `factor`.
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            confusion: self.confusion * factor,
            drop: self.drop * factor,
            double: self.double * factor,
            stray: self.stray * factor,
            junk_line: self.junk_line * factor,
        }
    }

    /// Corrupt a single name line.
    pub fn corrupt_name(&self, name: &str, rng: &mut SimRng) -> String {
        let mut out = String::with_capacity(name.len() + 4);
        for c in name.chars() {
            if c.is_alphabetic() && rng.gen_bool(self.drop) {
                continue;
            }

            let read = if rng.gen_bool(self.confusion) {
                confusion_for(c).unwrap_or(c)
            } else {
                c
            };
            out.push(read);

            if c.is_alphabetic() && rng.gen_bool(self.double) {
                out.push(read);
            }
            if rng.gen_bool(self.stray) {
                if let Some(&g) = rng.choose(&STRAY_GLYPHS) {
                    out.push(g);
                }
            }
        }
        out
    }

    /// Produce full raw OCR text for a card name.
    pub fn render(&self, name: &str, rng: &mut SimRng) -> String {
        let mut lines: Vec<String> = Vec::with_capacity(3);
        if rng.gen_bool(self.junk_line) {
            lines.extend(rng.choose(&JUNK_LINES).map(|s| s.to_string()));
        }
        lines.push(self.corrupt_name(name, rng));
        if rng.gen_bool(self.junk_line) {
            lines.extend(rng.choose(&JUNK_LINES).map(|s| s.to_string()));
        }
        lines.join("\n")
    }
}

fn confusion_for(c: char) -> Option<char> {
    CONFUSIONS
        .iter()
        .find(|(from, _)| *from == c)
        .map(|(_, to)| *to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_noise_is_identity() {
        let mut rng = SimRng::new(1);
        let noise = OcrNoise::none();
        for name in ["Lightning Bolt", "Æther Vial", "Will-o'-the-Wisp"] {
            assert_eq!(noise.render(name, &mut rng), name);
        }
    }

    #[test]
    fn test_same_seed_same_text() {
        let noise = OcrNoise::default().scaled(4.0);
        let a = noise.render("Serra Angel", &mut SimRng::new(99));
        let b = noise.render("Serra Angel", &mut SimRng::new(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_full_confusion() {
        let noise = OcrNoise {
            confusion: 1.0,
            ..OcrNoise::none()
        };
        let mut rng = SimRng::new(3);
        assert_eq!(noise.corrupt_name("Island", &mut rng), "lsIord");
    }

    #[test]
    fn test_junk_lines_added() {
        let noise = OcrNoise {
            junk_line: 1.0,
            ..OcrNoise::none()
        };
        let text = noise.render("Forest", &mut SimRng::new(5));
        let lines: Vec<&str> = text.split('\n').collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "Forest");
    }
}
