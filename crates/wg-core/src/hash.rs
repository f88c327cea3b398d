//! Text hashing for the result cache
//!
//! The cache is keyed by a 32-bit rolling hash of the checked text rather than
//! the text itself. The algorithm is the classic `h * 31 + c` string hash over
//! UTF-16 code units with wrapping signed arithmetic, so keys are identical to
//! those produced by the browser-side implementation for the same input.
//!
//! Collisions are possible. A collision can only surface a stale verdict for a
//! different text, never a panic or an error.

/// 32-bit cache key derived from a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct TextHash(pub i32);

impl TextHash {
    /// Hash a text.
    #[inline]
    pub fn of(text: &str) -> Self {
        Self(text_hash(text))
    }

    /// Raw signed value.
    #[inline]
    pub const fn get(self) -> i32 {
        self.0
    }
}

/// Rolling hash over the UTF-16 code units of `text`.
///
/// `hash = ((hash << 5) - hash) + unit`, truncated to 32 bits, seeded at 0.
#[inline]
pub fn text_hash(text: &str) -> i32 {
    text.encode_utf16().fold(0i32, |h, unit| {
        h.wrapping_shl(5).wrapping_sub(h).wrapping_add(unit as i32)
    })
}
