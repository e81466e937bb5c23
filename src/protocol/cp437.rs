//! # Code Page 437 Encoding
//!
//! ESC/POS printers power up in code page 437, so receipt text is sent as
//! single CP437 bytes. ASCII passes through unchanged; everything else is
//! looked up in the upper half of the code page, and characters with no
//! CP437 form (e.g. `€`) print as `?`.

use tracing::warn;

/// Upper half of CP437: `CP437_HIGH[i]` is the character printed for byte `0x80 + i`.
const CP437_HIGH: [char; 128] = [
    // 0x80
    'Ç', 'ü', 'é', 'â', 'ä', 'à', 'å', 'ç', 'ê', 'ë', 'è', 'ï', 'î', 'ì', 'Ä', 'Å',
    // 0x90
    'É', 'æ', 'Æ', 'ô', 'ö', 'ò', 'û', 'ù', 'ÿ', 'Ö', 'Ü', '¢', '£', '¥', '₧', 'ƒ',
    // 0xA0
    'á', 'í', 'ó', 'ú', 'ñ', 'Ñ', 'ª', 'º', '¿', '⌐', '¬', '½', '¼', '¡', '«', '»',
    // 0xB0
    '░', '▒', '▓', '│', '┤', '╡', '╢', '╖', '╕', '╣', '║', '╗', '╝', '╜', '╛', '┐',
    // 0xC0
    '└', '┴', '┬', '├', '─', '┼', '╞', '╟', '╚', '╔', '╩', '╦', '╠', '═', '╬', '╧',
    // 0xD0
    '╨', '╤', '╥', '╙', '╘', '╒', '╓', '╫', '╪', '┘', '┌', '█', '▄', '▌', '▐', '▀',
    // 0xE0
    'α', 'ß', 'Γ', 'π', 'Σ', 'σ', 'µ', 'τ', 'Φ', 'Θ', 'Ω', 'δ', '∞', 'φ', 'ε', '∩',
    // 0xF0
    '≡', '±', '≥', '≤', '⌠', '⌡', '÷', '≈', '°', '∙', '·', '√', 'ⁿ', '²', '■', '\u{00A0}',
];

/// Encode a Unicode string as CP437 bytes.
pub fn encode(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len());
    for ch in s.chars() {
        if ch.is_ascii() {
            out.push(ch as u8);
        } else if let Some(byte) = to_cp437(ch) {
            out.push(byte);
        } else {
            warn!(character = %ch, codepoint = ch as u32, "no CP437 mapping, printing '?'");
            out.push(b'?');
        }
    }
    out
}

fn to_cp437(ch: char) -> Option<u8> {
    CP437_HIGH
        .iter()
        .position(|&c| c == ch)
        .map(|i| 0x80 + i as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passthrough() {
        assert_eq!(encode("Net Sales 18.00"), b"Net Sales 18.00");
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(encode(""), b"");
    }

    #[test]
    fn test_currency_symbols() {
        assert_eq!(encode("£"), vec![0x9C]);
        assert_eq!(encode("¥"), vec![0x9D]);
        assert_eq!(encode("¢"), vec![0x9B]);
    }

    #[test]
    fn test_accented_product_names() {
        assert_eq!(encode("Café"), vec![0x43, 0x61, 0x66, 0x82]);
        assert_eq!(encode("Jalapeño"), b"Jalape\xA4o".to_vec());
        assert_eq!(encode("Müsli"), vec![b'M', 0x81, b's', b'l', b'i']);
    }

    #[test]
    fn test_table_edges() {
        assert_eq!(encode("Ç"), vec![0x80]);
        assert_eq!(encode("\u{00A0}"), vec![0xFF]);
        assert_eq!(encode("─"), vec![0xC4]);
    }

    #[test]
    fn test_unmapped_char_becomes_question_mark() {
        assert_eq!(encode("€5"), vec![b'?', b'5']);
    }
}
