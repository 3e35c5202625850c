//! Borrowed text views and arena-backed text building.
//!
//! A [`Text`] is a byte span with no ownership and no terminator. Copies
//! that need to be mutated are made explicitly in an [`Arena`].

use std::fmt;

use crate::arena::{Arena, ArenaError};

/// An immutable view of contiguous bytes.
///
/// Equality compares length first, then content, byte by byte.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Text<'a> {
    bytes: &'a [u8],
}

impl<'a> Text<'a> {
    /// The empty span.
    pub const EMPTY: Text<'static> = Text { bytes: b"" };

    /// Wrap a byte slice.
    #[inline]
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Wrap a static string, used for punctuation and keyword literals.
    #[inline]
    pub const fn from_static(text: &'static str) -> Text<'static> {
        Text {
            bytes: text.as_bytes(),
        }
    }

    /// Copy a single byte into the arena.
    pub fn from_byte(byte: u8, arena: &'a Arena<'_>) -> Result<Self, ArenaError> {
        let data = arena.alloc(1)?;
        data[0] = byte;
        Ok(Self { bytes: data })
    }

    /// Return a new span holding these bytes followed by `byte`.
    ///
    /// Always allocates `len + 1` bytes and copies; `self` is left intact.
    pub fn extend(self, byte: u8, arena: &'a Arena<'_>) -> Result<Self, ArenaError> {
        let data = arena.alloc(self.bytes.len() + 1)?;
        data[..self.bytes.len()].copy_from_slice(self.bytes);
        data[self.bytes.len()] = byte;
        Ok(Self { bytes: data })
    }

    /// Copy these bytes into the arena.
    pub fn clone_in<'b>(self, arena: &'b Arena<'_>) -> Result<Text<'b>, ArenaError> {
        let data = arena.alloc(self.bytes.len())?;
        data.copy_from_slice(self.bytes);
        Ok(Text { bytes: data })
    }

    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// The bytes as UTF-8, if they are valid.
    #[inline]
    pub fn as_str(&self) -> Option<&'a str> {
        std::str::from_utf8(self.bytes).ok()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl PartialEq<str> for Text<'_> {
    fn eq(&self, other: &str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl PartialEq<&str> for Text<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl fmt::Debug for Text<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", String::from_utf8_lossy(self.bytes))
    }
}

impl fmt::Display for Text<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.bytes))
    }
}

/// Accumulates text one byte at a time inside an arena.
///
/// Each push resizes the builder's region. While the region is the arena's
/// most recent allocation that resize happens in place, so building a
/// literal costs no copies. If a push fails the partial text is dropped.
pub struct TextBuilder<'a> {
    arena: &'a Arena<'a>,
    bytes: Option<&'a mut [u8]>,
}

impl<'a> TextBuilder<'a> {
    pub fn new(arena: &'a Arena<'a>) -> Self {
        Self { arena, bytes: None }
    }

    /// Append one byte.
    pub fn push(&mut self, byte: u8) -> Result<(), ArenaError> {
        let old = self.bytes.take();
        let len = old.as_ref().map_or(0, |bytes| bytes.len());
        let grown = self.arena.resize(old, len + 1)?;
        grown[len] = byte;
        self.bytes = Some(grown);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.bytes.as_ref().map_or(0, |bytes| bytes.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The bytes accumulated so far.
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_deref().unwrap_or(&[])
    }

    /// Freeze the accumulated bytes into a [`Text`].
    pub fn finish(self) -> Text<'a> {
        match self.bytes {
            Some(bytes) => Text::new(bytes),
            None => Text::new(&[]),
        }
    }
}
