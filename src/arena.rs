//! Scratch memory arena
//!
//! A bump allocator that carves regions out of one preallocated block.
//! Regions are never freed individually; the whole block goes away when the
//! arena is dropped. Used for translated status strings and as the memory
//! provider handed to vendor interfaces that allocate on our behalf.

use std::alloc::{self, Layout};
use std::ptr::{self, NonNull};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Alignment of every region handed out by [`ScratchArena`]
pub const REGION_ALIGN: usize = 16;

/// Default arena size (8 MiB)
pub const DEFAULT_CAPACITY: usize = 8 * 1024 * 1024;

/// Capability to hand out raw memory regions
///
/// Implementations must never return overlapping regions and never reclaim
/// a region while the implementor is alive.
pub trait Allocator: Sync {
    /// Allocate at least `size` bytes, or `None` when out of memory
    fn allocate(&self, size: usize) -> Option<NonNull<u8>>;
}

/// Bump allocator over a single fixed block
pub struct ScratchArena {
    base: NonNull<u8>,
    capacity: usize,
    offset: AtomicUsize,
}

// SAFETY: the block is owned by the arena and every caller receives a disjoint
// region, reserved through the atomic offset.
unsafe impl Send for ScratchArena {}
unsafe impl Sync for ScratchArena {}

impl ScratchArena {
    /// Create an arena backed by a block of `capacity` bytes
    ///
    /// # Panics
    ///
    /// Panics if `capacity` exceeds `isize::MAX` once rounded up to the
    /// region alignment, like `Vec::with_capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        let base = if capacity == 0 {
            NonNull::<u128>::dangling().cast()
        } else {
            let layout = Self::layout(capacity);
            // SAFETY: layout has a non-zero size.
            let raw = unsafe { alloc::alloc(layout) };
            NonNull::new(raw).unwrap_or_else(|| alloc::handle_alloc_error(layout))
        };

        Self {
            base,
            capacity,
            offset: AtomicUsize::new(0),
        }
    }

    /// Total size of the backing block in bytes
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes consumed so far, including alignment padding
    pub fn used(&self) -> usize {
        self.offset.load(Ordering::Acquire)
    }

    /// Bytes still available
    pub fn remaining(&self) -> usize {
        self.capacity - self.used()
    }

    /// Copy `text` into the arena
    ///
    /// The returned string lives as long as the arena.
    pub fn alloc_str(&self, text: &str) -> Option<&str> {
        let region = self.allocate(text.len())?;

        // SAFETY: `region` is a fresh, exclusively owned span of `text.len()`
        // bytes inside the block, and the bytes copied in are valid UTF-8.
        unsafe {
            ptr::copy_nonoverlapping(text.as_ptr(), region.as_ptr(), text.len());
            let bytes = std::slice::from_raw_parts(region.as_ptr(), text.len());
            Some(std::str::from_utf8_unchecked(bytes))
        }
    }

    fn layout(capacity: usize) -> Layout {
        match Layout::from_size_align(capacity, REGION_ALIGN) {
            Ok(layout) => layout,
            Err(_) => panic!("scratch arena capacity overflow: {capacity} bytes"),
        }
    }
}

impl Allocator for ScratchArena {
    fn allocate(&self, size: usize) -> Option<NonNull<u8>> {
        let capacity = self.capacity;
        let start = self
            .offset
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |offset| {
                let end = offset.checked_add(size)?;
                if end > capacity {
                    return None;
                }
                let next = end
                    .checked_add(REGION_ALIGN - 1)
                    .map(|v| v & !(REGION_ALIGN - 1))
                    .unwrap_or(capacity);
                Some(next.min(capacity))
            })
            .ok()?;

        // SAFETY: start + size <= capacity, so the pointer stays inside the block.
        NonNull::new(unsafe { self.base.as_ptr().add(start) })
    }
}

impl Default for ScratchArena {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl Drop for ScratchArena {
    fn drop(&mut self) {
        if self.capacity > 0 {
            // SAFETY: allocated in `with_capacity` with the same layout.
            unsafe { alloc::dealloc(self.base.as_ptr(), Self::layout(self.capacity)) };
        }
    }
}

impl std::fmt::Debug for ScratchArena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScratchArena")
            .field("capacity", &self.capacity)
            .field("used", &self.used())
            .finish()
    }
}
