//! Minimal `sscanf("%u%c%u")`-style scanner for time text

/// Cursor over time text
pub(super) struct Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub(super) fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    /// `%u`: skip whitespace, read an unsigned decimal
    ///
    /// Saturates instead of overflowing. A negative number wraps like C's
    /// `%u` would, which lands above any clamp limit, so it reads as
    /// `u32::MAX`.
    pub(super) fn number(&mut self) -> Option<u32> {
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }

        let mut negative = false;
        if let Some(&sign @ (b'+' | b'-')) = self.bytes.get(self.pos) {
            negative = sign == b'-';
            self.pos += 1;
        }

        let start = self.pos;
        let mut value: u32 = 0;
        while let Some(digit) = self.bytes.get(self.pos).filter(|b| b.is_ascii_digit()) {
            value = value.saturating_mul(10).saturating_add((digit - b'0') as u32);
            self.pos += 1;
        }

        if self.pos == start {
            return None;
        }
        if negative && value != 0 {
            return Some(u32::MAX);
        }
        Some(value)
    }

    /// `%c`: consume exactly one character, whatever it is
    pub(super) fn any_char(&mut self) -> Option<char> {
        let rest = core::str::from_utf8(&self.bytes[self.pos..]).ok()?;
        let c = rest.chars().next()?;
        self.pos += c.len_utf8();
        Some(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_fields() {
        let mut scan = Scanner::new(" 7:05");
        assert_eq!(scan.number(), Some(7));
        assert_eq!(scan.any_char(), Some(':'));
        assert_eq!(scan.number(), Some(5));
        assert_eq!(scan.any_char(), None);
    }

    #[test]
    fn test_scan_no_digits() {
        let mut scan = Scanner::new("x1");
        assert_eq!(scan.number(), None);
    }

    #[test]
    fn test_scan_negative_and_huge() {
        assert_eq!(Scanner::new("-3").number(), Some(u32::MAX));
        assert_eq!(Scanner::new("99999999999").number(), Some(u32::MAX));
    }
}
