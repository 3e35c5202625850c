//! Arena allocation for the front end.
//!
//! Two arenas live here. [`Arena`] partitions a fixed, caller-owned byte
//! buffer with a bump cursor and can grow its most recent allocation in
//! place; the lexer materializes literal text in one. [`NodeArena`] wraps a
//! bump allocator with an allocation limit and holds the typed AST nodes.
//!
//! Neither arena frees individual allocations. Memory is reclaimed all at
//! once by `reset`, which takes `&mut self` so no allocation can still be
//! borrowed when it happens.

use std::alloc::Layout;
use std::cell::Cell;
use std::marker::PhantomData;
use std::ptr::NonNull;

use bumpalo::Bump;
use thiserror::Error;

/// Alignment used by [`Arena::alloc`] and [`Arena::resize`]: two pointer widths.
pub const DEFAULT_ALIGNMENT: usize = 2 * std::mem::size_of::<usize>();

/// Failures reported by both arena kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArenaError {
    /// The request does not fit in the space left in the arena.
    #[error("arena exhausted: requested {requested} bytes with {remaining} bytes remaining")]
    Exhausted { requested: usize, remaining: usize },
    /// A region handed back to the arena does not lie inside its buffer.
    #[error("memory is out of bounds of the buffer in this arena")]
    OutOfBounds,
    /// Alignments must be non-zero powers of two.
    #[error("alignment {0} is not a power of two")]
    InvalidAlignment(usize),
}

/// Round `addr` up to the next multiple of `align` (a power of two).
fn align_forward(addr: usize, align: usize) -> Option<usize> {
    let modulo = addr & (align - 1);
    if modulo == 0 {
        Some(addr)
    } else {
        addr.checked_add(align - modulo)
    }
}

/// A bump-pointer region over a caller-owned byte buffer.
///
/// Invariant: `0 <= prev_offset <= curr_offset <= len`. `prev_offset` marks
/// the start of the most recent allocation, which is the only one that
/// [`Arena::resize_aligned`] can grow in place. `curr_offset` never moves
/// backwards except through `reset`.
pub struct Arena<'buf> {
    buf: NonNull<u8>,
    len: usize,
    prev_offset: Cell<usize>,
    curr_offset: Cell<usize>,
    _buffer: PhantomData<&'buf mut [u8]>,
}

impl<'buf> Arena<'buf> {
    /// Create an arena that partitions `buffer`. The arena borrows the
    /// buffer for its whole lifetime but never owns it.
    pub fn new(buffer: &'buf mut [u8]) -> Self {
        let len = buffer.len();
        Self {
            buf: NonNull::from(buffer).cast::<u8>(),
            len,
            prev_offset: Cell::new(0),
            curr_offset: Cell::new(0),
            _buffer: PhantomData,
        }
    }

    /// Total size of the backing buffer in bytes.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.len
    }

    /// Bytes consumed so far, including alignment padding.
    #[inline]
    pub fn used(&self) -> usize {
        self.curr_offset.get()
    }

    /// Bytes left after the write cursor.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.len - self.curr_offset.get()
    }

    /// Address of the first byte of the backing buffer.
    #[inline]
    pub fn base_ptr(&self) -> *const u8 {
        self.buf.as_ptr()
    }

    /// Allocate `size` zeroed bytes with the default alignment.
    #[inline]
    #[allow(clippy::mut_from_ref)]
    pub fn alloc(&self, size: usize) -> Result<&mut [u8], ArenaError> {
        self.alloc_aligned(size, DEFAULT_ALIGNMENT)
    }

    /// Allocate `size` zeroed bytes whose address is a multiple of `align`.
    #[allow(clippy::mut_from_ref)]
    pub fn alloc_aligned(&self, size: usize, align: usize) -> Result<&mut [u8], ArenaError> {
        if !align.is_power_of_two() {
            return Err(ArenaError::InvalidAlignment(align));
        }

        let base = self.buf.as_ptr() as usize;
        let exhausted = ArenaError::Exhausted {
            requested: size,
            remaining: self.remaining(),
        };
        let offset = align_forward(base + self.curr_offset.get(), align)
            .map(|addr| addr - base)
            .ok_or(exhausted)?;
        let end = offset
            .checked_add(size)
            .filter(|&end| end <= self.len)
            .ok_or(exhausted)?;

        self.prev_offset.set(offset);
        self.curr_offset.set(end);

        // SAFETY: `offset..end` lies inside the buffer, is past every region
        // handed out before, and the buffer is exclusively borrowed for 'buf.
        let region = unsafe { std::slice::from_raw_parts_mut(self.buf.as_ptr().add(offset), size) };
        region.fill(0);
        Ok(region)
    }

    /// Resize a region with the default alignment.
    #[inline]
    #[allow(clippy::mut_from_ref)]
    pub fn resize<'s>(
        &'s self,
        old: Option<&'s mut [u8]>,
        new_size: usize,
    ) -> Result<&'s mut [u8], ArenaError> {
        self.resize_aligned(old, new_size, DEFAULT_ALIGNMENT)
    }

    /// Resize a region previously allocated from this arena.
    ///
    /// A missing or empty `old` region is a plain allocation. When `old` is
    /// exactly the most recent allocation it grows in place and newly exposed
    /// bytes are zeroed. Shrinking returns a prefix of `old` and keeps the
    /// tail reserved: a caller may still hold the full region through the
    /// borrow it passed in. Any other region is copied into a fresh
    /// allocation and the old bytes stay behind as garbage.
    #[allow(clippy::mut_from_ref)]
    pub fn resize_aligned<'s>(
        &'s self,
        old: Option<&'s mut [u8]>,
        new_size: usize,
        align: usize,
    ) -> Result<&'s mut [u8], ArenaError> {
        let old = match old {
            Some(old) if !old.is_empty() => old,
            _ => return self.alloc_aligned(new_size, align),
        };
        if !align.is_power_of_two() {
            return Err(ArenaError::InvalidAlignment(align));
        }

        let base = self.buf.as_ptr() as usize;
        let start = old.as_ptr() as usize;
        let old_len = old.len();
        if start < base || start + old_len > base + self.len {
            return Err(ArenaError::OutOfBounds);
        }

        let old_offset = start - base;
        let prev = self.prev_offset.get();
        if old_offset == prev && prev + old_len == self.curr_offset.get() {
            if new_size <= old_len {
                let (head, _) = old.split_at_mut(new_size);
                return Ok(head);
            }
            let end = prev
                .checked_add(new_size)
                .filter(|&end| end <= self.len)
                .ok_or(ArenaError::Exhausted {
                    requested: new_size.saturating_sub(old_len),
                    remaining: self.remaining(),
                })?;
            self.curr_offset.set(end);

            // SAFETY: `old` covers the whole most recent allocation and stays
            // borrowed for 's, so nothing else refers to `prev..end` while the
            // grown region lives.
            let region = unsafe { std::slice::from_raw_parts_mut(self.buf.as_ptr().add(prev), new_size) };
            region[old_len..].fill(0);
            return Ok(region);
        }

        let fresh = self.alloc_aligned(new_size, align)?;
        let copy_len = old_len.min(new_size);
        fresh[..copy_len].copy_from_slice(&old[..copy_len]);
        Ok(fresh)
    }

    /// Release every allocation at once. The buffer contents are left as is.
    pub fn reset(&mut self) {
        self.prev_offset.set(0);
        self.curr_offset.set(0);
    }
}

impl std::fmt::Debug for Arena<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arena")
            .field("capacity", &self.len)
            .field("prev_offset", &self.prev_offset.get())
            .field("curr_offset", &self.curr_offset.get())
            .finish()
    }
}

/// The typed arena that owns every AST node of a parse.
///
/// Wraps a bump allocator. With a limit set, running out of room is an
/// [`ArenaError::Exhausted`] result instead of an abort.
pub struct NodeArena {
    bump: Bump,
}

impl NodeArena {
    /// Create an unbounded node arena.
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    /// Create a node arena that refuses to grow past `limit` bytes.
    pub fn with_limit(limit: usize) -> Self {
        let bump = Bump::new();
        bump.set_allocation_limit(Some(limit));
        Self { bump }
    }

    /// Move a value into the arena.
    #[inline]
    #[allow(clippy::mut_from_ref)]
    pub fn alloc<T>(&self, val: T) -> Result<&mut T, ArenaError> {
        self.bump
            .try_alloc(val)
            .map_err(|_| self.exhausted(std::mem::size_of::<T>()))
    }

    /// Copy a slice into the arena.
    pub fn alloc_slice_copy<T: Copy>(&self, src: &[T]) -> Result<&[T], ArenaError> {
        let layout = Layout::for_value(src);
        let dst = self
            .bump
            .try_alloc_layout(layout)
            .map_err(|_| self.exhausted(layout.size()))?
            .cast::<T>();
        // SAFETY: `dst` is a fresh allocation sized and aligned for
        // `src.len()` values of `T`, and `T: Copy` needs no drop.
        unsafe {
            std::ptr::copy_nonoverlapping(src.as_ptr(), dst.as_ptr(), src.len());
            Ok(std::slice::from_raw_parts(dst.as_ptr(), src.len()))
        }
    }

    /// Returns the total bytes of chunk memory held by this arena.
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }

    /// Reset the arena, deallocating all nodes but keeping the memory.
    pub fn reset(&mut self) {
        self.bump.reset();
    }

    fn exhausted(&self, requested: usize) -> ArenaError {
        let remaining = self
            .bump
            .allocation_limit()
            .map_or(usize::MAX, |limit| limit.saturating_sub(self.bump.allocated_bytes()));
        ArenaError::Exhausted {
            requested,
            remaining,
        }
    }
}

impl Default for NodeArena {
    fn default() -> Self {
        Self::new()
    }
}
