//! Length-prefixed array blocks.
//!
//! An array allocation is one heap block laid out as
//!
//! ```text
//! [ len: usize ][ padding ][ T; len ]
//!                           ^ the handle callers see
//! ```
//!
//! The element count lives in a header ahead of element 0 — the same trick
//! allocator chunk headers use — so the caller-visible handle is a thin
//! `*mut T` and neither the owning pointer nor the default array strategy
//! stores a length. The padding is whatever `Layout::extend` inserts to
//! align element 0, so the header offset depends only on `T`'s alignment,
//! never on `len`, and can be recomputed at release time.
//!
//! Zero-length arrays still allocate the header: the handle stays non-null
//! and releasable, matching the semantics of a zero-count array allocation.

use std::alloc::{alloc, dealloc, handle_alloc_error, Layout};
use std::ptr::NonNull;

/// Block layout and element-0 byte offset for a `len`-element array of `T`.
fn block_layout<T>(len: usize) -> (Layout, usize) {
    let header = Layout::new::<usize>();
    let elems = Layout::array::<T>(len).expect("array allocation exceeds isize::MAX bytes");
    header
        .extend(elems)
        .expect("array allocation exceeds isize::MAX bytes")
}

/// Allocate a block for `len` elements, record `len` in the header, and
/// return the element-0 handle. The elements are uninitialized.
///
/// Aborts via [`handle_alloc_error`] if the allocator fails.
pub(crate) fn alloc_block<T>(len: usize) -> NonNull<T> {
    let (block, offset) = block_layout::<T>(len);
    // SAFETY: `block` starts with a usize header, so its size is non-zero.
    let base = unsafe { alloc(block) };
    if base.is_null() {
        handle_alloc_error(block);
    }
    // SAFETY: `base` is valid for `block`, which begins with the header.
    unsafe { base.cast::<usize>().write(len) };
    // SAFETY: `offset` is within the block by construction of `block_layout`.
    let elems = unsafe { base.add(offset) }.cast::<T>();
    // SAFETY: `elems` points into the just-allocated non-null block.
    unsafe { NonNull::new_unchecked(elems) }
}

/// Element count recorded in the header of the block `elems` points into.
///
/// # Safety
///
/// `elems` must be an element-0 handle returned by [`alloc_block::<T>`]
/// whose block has not been freed.
pub(crate) unsafe fn stored_len<T>(elems: *const T) -> usize {
    // Offset is independent of `len`; any value recomputes it.
    let (_, offset) = block_layout::<T>(0);
    // SAFETY: the header sits `offset` bytes before element 0 in the same block.
    unsafe { elems.cast::<u8>().sub(offset).cast::<usize>().read() }
}

/// Free the block behind `elems` without touching the elements.
///
/// # Safety
///
/// `elems` must be an element-0 handle returned by [`alloc_block::<T>`] with
/// header value `len`, freed exactly once. Element destructors are the
/// caller's business — run them before calling this, or deliberately skip
/// them (e.g. after moving the elements out).
pub(crate) unsafe fn free_block<T>(elems: *mut T, len: usize) {
    let (block, offset) = block_layout::<T>(len);
    // SAFETY: the block base sits `offset` bytes before element 0.
    let base = unsafe { elems.cast::<u8>().sub(offset) };
    // SAFETY: `base`/`block` match the original `alloc_block` call exactly.
    unsafe { dealloc(base, block) };
}

/// Drop all elements in place, then free the block.
///
/// # Safety
///
/// `elems` must be an element-0 handle returned by [`alloc_block::<T>`] with
/// all elements initialized, released exactly once.
pub(crate) unsafe fn release<T>(elems: *mut T) {
    // SAFETY: the block is live, so the header is readable.
    let len = unsafe { stored_len(elems) };
    // SAFETY: all `len` elements are initialized and owned by this block.
    unsafe { std::ptr::drop_in_place(std::ptr::slice_from_raw_parts_mut(elems, len)) };
    // SAFETY: elements are dead; the block itself remains to be freed.
    unsafe { free_block(elems, len) };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_round_trips_the_len() {
        let elems = alloc_block::<u64>(17);
        // SAFETY: block is live with header value 17.
        assert_eq!(unsafe { stored_len(elems.as_ptr()) }, 17);
        // SAFETY: elements were never initialized, so skip their drops.
        unsafe { free_block(elems.as_ptr(), 17) };
    }

    #[test]
    fn zero_len_block_is_non_null_and_releasable() {
        let elems = alloc_block::<i32>(0);
        // SAFETY: block is live with header value 0.
        assert_eq!(unsafe { stored_len(elems.as_ptr()) }, 0);
        // SAFETY: zero elements to drop; single release.
        unsafe { release(elems.as_ptr()) };
    }

    #[test]
    fn element_zero_is_aligned_for_overaligned_types() {
        #[repr(align(64))]
        struct Wide(#[allow(dead_code)] u8);

        let elems = alloc_block::<Wide>(3);
        assert_eq!(elems.as_ptr() as usize % 64, 0);
        // SAFETY: elements were never initialized, so skip their drops.
        unsafe { free_block(elems.as_ptr(), 3) };
    }

    #[test]
    fn release_runs_element_destructors() {
        use std::cell::Cell;
        use std::rc::Rc;

        struct Spy(Rc<Cell<usize>>);
        impl Drop for Spy {
            fn drop(&mut self) {
                self.0.set(self.0.get() + 1);
            }
        }

        let drops = Rc::new(Cell::new(0));
        let elems = alloc_block::<Spy>(4);
        for i in 0..4 {
            // SAFETY: index < 4, the allocated count; slots are uninitialized.
            unsafe { elems.as_ptr().add(i).write(Spy(Rc::clone(&drops))) };
        }
        // SAFETY: all 4 elements initialized; single release.
        unsafe { release(elems.as_ptr()) };
        assert_eq!(drops.get(), 4);
    }

    #[test]
    fn zst_elements_store_only_the_header() {
        struct Nothing;

        let elems = alloc_block::<Nothing>(1_000_000);
        // SAFETY: block is live with header value 1_000_000.
        assert_eq!(unsafe { stored_len(elems.as_ptr()) }, 1_000_000);
        // SAFETY: ZST drops are no-ops but must still be counted once each.
        unsafe { release(elems.as_ptr()) };
    }
}
