//! Lenient numeric text parsing
//!
//! Parameters arrive as text from consoles, MQTT topics and config pages
//! written for C firmware, so parsing follows `strtoimax`/`strtoumax` with
//! base 0 and `strtod`: leading whitespace is skipped, a prefix selects the
//! radix, parsing stops at the first invalid character and never fails.

/// C `isspace` set
fn is_c_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// Result of scanning an integer literal
struct ScannedInt {
    negative: bool,
    magnitude: u64,
    overflow: bool,
}

fn scan_integer(text: &str) -> ScannedInt {
    let bytes = text.as_bytes();
    let mut pos = 0;
    while pos < bytes.len() && is_c_space(bytes[pos]) {
        pos += 1;
    }

    let mut negative = false;
    if pos < bytes.len() && (bytes[pos] == b'+' || bytes[pos] == b'-') {
        negative = bytes[pos] == b'-';
        pos += 1;
    }

    let mut radix = 10;
    if bytes.get(pos) == Some(&b'0') {
        let has_hex_prefix = matches!(bytes.get(pos + 1), Some(b'x') | Some(b'X'))
            && bytes.get(pos + 2).is_some_and(|b| b.is_ascii_hexdigit());
        if has_hex_prefix {
            radix = 16;
            pos += 2;
        } else {
            radix = 8;
        }
    }

    let mut magnitude: u64 = 0;
    let mut overflow = false;
    while let Some(digit) = bytes.get(pos).and_then(|&b| (b as char).to_digit(radix)) {
        match magnitude
            .checked_mul(radix as u64)
            .and_then(|m| m.checked_add(digit as u64))
        {
            Some(m) => magnitude = m,
            None => overflow = true,
        }
        pos += 1;
    }

    ScannedInt {
        negative,
        magnitude,
        overflow,
    }
}

/// Parse like `strtoimax(text, NULL, 0)`
///
/// Out-of-range input saturates at `i64::MIN` / `i64::MAX`.
pub fn parse_signed(text: &str) -> i64 {
    let scanned = scan_integer(text);
    const MIN_MAGNITUDE: u64 = i64::MAX as u64 + 1;
    if scanned.negative {
        if scanned.overflow || scanned.magnitude > MIN_MAGNITUDE {
            i64::MIN
        } else {
            (scanned.magnitude as i64).wrapping_neg()
        }
    } else if scanned.overflow || scanned.magnitude > i64::MAX as u64 {
        i64::MAX
    } else {
        scanned.magnitude as i64
    }
}

/// Parse like `strtoumax(text, NULL, 0)`
///
/// Out-of-range input saturates at `u64::MAX`; a leading `-` negates the
/// magnitude in two's complement.
pub fn parse_unsigned(text: &str) -> u64 {
    let scanned = scan_integer(text);
    if scanned.overflow {
        u64::MAX
    } else if scanned.negative {
        scanned.magnitude.wrapping_neg()
    } else {
        scanned.magnitude
    }
}

/// Longest prefix of `text` (after whitespace) that forms a decimal float
fn float_prefix(text: &str) -> &str {
    let trimmed = text.trim_start_matches(|c: char| c.is_ascii() && is_c_space(c as u8));
    let bytes = trimmed.as_bytes();
    let mut pos = 0;
    if pos < bytes.len() && (bytes[pos] == b'+' || bytes[pos] == b'-') {
        pos += 1;
    }

    for word in ["infinity", "inf", "nan"] {
        let end = pos + word.len();
        if bytes.len() >= end && bytes[pos..end].eq_ignore_ascii_case(word.as_bytes()) {
            return match (word, bytes.first()) {
                ("nan", _) => "nan",
                (_, Some(b'-')) => "-inf",
                _ => "inf",
            };
        }
    }

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let mut digits = pos - int_start;

    if pos < bytes.len() && bytes[pos] == b'.' {
        let frac_start = pos + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            pos = frac_end;
        }
    }

    if digits == 0 {
        return "";
    }

    if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        let mut exp = pos + 1;
        if exp < bytes.len() && (bytes[exp] == b'+' || bytes[exp] == b'-') {
            exp += 1;
        }
        let exp_digits_start = exp;
        while exp < bytes.len() && bytes[exp].is_ascii_digit() {
            exp += 1;
        }
        if exp > exp_digits_start {
            pos = exp;
        }
    }

    &trimmed[..pos]
}

/// Parse like `strtod(text, NULL)`, returning 0.0 when nothing parses
pub fn parse_f64(text: &str) -> f64 {
    float_prefix(text).parse().unwrap_or(0.0)
}

/// Parse like `strtof(text, NULL)`, returning 0.0 when nothing parses
pub fn parse_f32(text: &str) -> f32 {
    float_prefix(text).parse().unwrap_or(0.0)
}
