//! Vendor status translation
//!
//! Turns raw vendor status codes into printable text. The text is copied
//! into the scratch arena so diagnostics never need their own allocation.

use crate::arena::ScratchArena;
use std::borrow::Cow;
use std::fmt;

/// Raw status code returned by a vendor interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusCode(pub i32);

impl StatusCode {
    #[inline]
    pub const fn raw(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Describe a status code
///
/// Uses the vendor-supplied message when there is a non-empty one, otherwise
/// the code in hexadecimal (`0x<code>`). The result is never empty. One
/// scratch region is consumed per call; if the arena is exhausted the text
/// is returned owned instead.
pub fn describe_status<'a>(
    arena: &'a ScratchArena,
    code: StatusCode,
    vendor_message: Option<&str>,
) -> Cow<'a, str> {
    let text = match vendor_message.map(str::trim) {
        Some(message) if !message.is_empty() => Cow::Borrowed(message),
        _ => Cow::Owned(code.to_string()),
    };

    match arena.alloc_str(&text) {
        Some(scratch) => Cow::Borrowed(scratch),
        None => {
            log::debug!("Scratch arena exhausted while describing status {}", code);
            Cow::Owned(text.into_owned())
        }
    }
}
