use std::{borrow::Cow, fmt};

use crate::constants::{NAME_WIDTH, SPKID_WIDTH, SUN_SPKID};

/// Fixed-width, NUL-padded text field of the dataset.
///
/// The bytes are kept as read so that a record re-encodes to exactly what was decoded,
/// whatever they contain. The text view stops at the first NUL and replaces invalid
/// UTF-8; it is only used for lookups and display.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedStr<const N: usize>([u8; N]);

/// SPK identifier field.
pub type SpkId = FixedStr<SPKID_WIDTH>;

/// Body name field.
pub type BodyName = FixedStr<NAME_WIDTH>;

impl SpkId {
    pub const SUN: SpkId = FixedStr::new(SUN_SPKID);
}

impl<const N: usize> FixedStr<N> {
    /// Encode `text`, cut to `N` bytes and NUL padded.
    pub const fn new(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut out = [0u8; N];
        let mut i = 0;
        while i < N && i < bytes.len() {
            out[i] = bytes[i];
            i += 1;
        }
        FixedStr(out)
    }

    /// Copy at most `N` raw bytes, padding with NUL.
    pub fn from_slice(bytes: &[u8]) -> Self {
        let mut out = [0u8; N];
        let n = bytes.len().min(N);
        out[..n].copy_from_slice(&bytes[..n]);
        FixedStr(out)
    }

    pub fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }

    /// Bytes before the first NUL.
    pub fn text_bytes(&self) -> &[u8] {
        let end = self.0.iter().position(|&b| b == 0).unwrap_or(N);
        &self.0[..end]
    }

    pub fn as_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.text_bytes())
    }
}

impl<const N: usize> Default for FixedStr<N> {
    fn default() -> Self {
        FixedStr([0u8; N])
    }
}

impl<const N: usize> From<&str> for FixedStr<N> {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl<const N: usize> PartialEq<str> for FixedStr<N> {
    fn eq(&self, other: &str) -> bool {
        self.text_bytes() == other.as_bytes()
    }
}

impl<const N: usize> PartialEq<&str> for FixedStr<N> {
    fn eq(&self, other: &&str) -> bool {
        self.text_bytes() == other.as_bytes()
    }
}

impl<const N: usize> fmt::Display for FixedStr<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str())
    }
}

impl<const N: usize> fmt::Debug for FixedStr<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

#[cfg(test)]
mod fixed_str_test {
    use super::*;

    #[test]
    fn test_text_view() {
        assert_eq!(SpkId::from_slice(b"399\0\0\0\0\0"), "399");
        assert_eq!(SpkId::from_slice(b"12345678"), "12345678");
        assert_eq!(SpkId::from_slice(b"\0garbage"), "");
        assert_eq!(SpkId::SUN, SUN_SPKID);
    }

    #[test]
    fn test_new_cuts_and_pads() {
        assert_eq!(SpkId::new("a-much-too-long-id").as_bytes(), b"a-much-t");
        assert_eq!(SpkId::new("-31").as_bytes(), b"-31\0\0\0\0\0");
    }

    #[test]
    fn test_raw_bytes_kept() {
        let raw = *b"\xFFeres\0\0\0";
        let name = FixedStr::<8>::from_slice(&raw);
        assert_eq!(name.as_bytes(), &raw);
        assert_eq!(name.as_str(), "\u{FFFD}eres");

        // trailing bytes after the NUL are part of the value
        let padded = FixedStr::<8>::from_slice(b"399\0\0\0\0\0");
        let dirty = FixedStr::<8>::from_slice(b"399\0abcd");
        assert_ne!(padded, dirty);
        assert_eq!(dirty, "399");
    }
}
