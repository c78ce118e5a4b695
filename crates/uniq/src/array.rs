//! Array-mode exclusive ownership.
//!
//! [`UniqueArray<T, D>`] owns a contiguous sequence of `T` behind a thin
//! element-0 handle. The type stores **no length** — bounds are wholly the
//! caller's contract, the way raw array indexing works — so indexing is
//! `unsafe` and unchecked. For default-allocated arrays the element count
//! lives in the block header (see the crate docs), invisible to the caller.
//!
//! There is deliberately no single-element surface here: no `Deref`, no
//! member access. An array handle has no single pointee, so those
//! operations simply do not exist on this type.

use std::fmt;
use std::mem::{self, ManuallyDrop};
use std::ptr::{self, NonNull};

use crate::cookie;
use crate::deleter::{ArrayDeleter, Deleter};

/// Exclusive owner of a contiguous, length-less sequence of `T`.
///
/// ```
/// use uniq::UniqueArray;
///
/// let a = UniqueArray::from_vec(vec![1, 2, 3, 4, 5]);
/// // SAFETY: indices 0 and 2 are within the five elements allocated above.
/// unsafe {
///     assert_eq!(*a.at(0), 1);
///     assert_eq!(*a.at(2), 3);
/// }
/// ```
///
/// Like its single-element sibling, the type has no `Clone`:
///
/// ```compile_fail
/// let a = uniq::UniqueArray::from_vec(vec![1, 2, 3]);
/// let b = Clone::clone(&a);
/// ```
#[must_use]
pub struct UniqueArray<T, D: Deleter<T> = ArrayDeleter> {
    /// Element-0 handle, or `None` when empty. A zero-count allocation is
    /// still non-empty: it owns a (header-only) block.
    raw: Option<NonNull<T>>,
    deleter: D,
}

impl<T> UniqueArray<T> {
    /// Allocate `len` value-initialized elements.
    ///
    /// Mirrors a counted array allocation: every element starts as
    /// `T::default()`. `len` may be zero — the result still owns a block
    /// and reports non-empty.
    pub fn new(len: usize) -> Self
    where
        T: Default,
    {
        let elems = cookie::alloc_block::<T>(len);

        // If a `T::default()` call panics mid-fill, drop the initialized
        // prefix and free the block before unwinding out.
        struct FillGuard<T> {
            elems: NonNull<T>,
            filled: usize,
            len: usize,
        }
        impl<T> Drop for FillGuard<T> {
            fn drop(&mut self) {
                // SAFETY: exactly `filled` elements were initialized, and the
                // block was allocated for `len` elements by `alloc_block`.
                unsafe {
                    ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                        self.elems.as_ptr(),
                        self.filled,
                    ));
                    cookie::free_block(self.elems.as_ptr(), self.len);
                }
            }
        }

        let mut guard = FillGuard {
            elems,
            filled: 0,
            len,
        };
        for i in 0..len {
            // SAFETY: `i < len`, so the slot is within the allocation and
            // not yet initialized.
            unsafe { elems.as_ptr().add(i).write(T::default()) };
            guard.filled = i + 1;
        }
        mem::forget(guard);

        Self {
            raw: Some(elems),
            deleter: ArrayDeleter,
        }
    }

    /// Move the elements of `vec` into a freshly allocated array block.
    ///
    /// The vector's spare capacity is discarded; its buffer is freed without
    /// running element destructors, since the elements now live in the block.
    pub fn from_vec(vec: Vec<T>) -> Self {
        let len = vec.len();
        let elems = cookie::alloc_block::<T>(len);
        let mut vec = ManuallyDrop::new(vec);
        // SAFETY: distinct allocations cannot overlap, and the block has
        // room for `len` elements.
        unsafe { ptr::copy_nonoverlapping(vec.as_ptr(), elems.as_ptr(), len) };
        // SAFETY: the elements were moved out above; reconstituting the Vec
        // with length 0 frees its buffer without dropping them.
        drop(unsafe { Vec::from_raw_parts(vec.as_mut_ptr(), 0, vec.capacity()) });
        Self {
            raw: Some(elems),
            deleter: ArrayDeleter,
        }
    }
}

impl<T, D: Deleter<T> + Default> UniqueArray<T, D> {
    /// An owner of nothing.
    pub fn empty() -> Self {
        Self {
            raw: None,
            deleter: D::default(),
        }
    }

    /// Take ownership of a caller-supplied element-0 handle.
    ///
    /// A null `raw` yields the empty state.
    ///
    /// # Safety
    ///
    /// If `raw` is non-null it must be allocated compatibly with `D` (for
    /// [`ArrayDeleter`], a handle this crate's array constructors produced)
    /// and no other owner may hold or release it.
    pub unsafe fn from_raw(raw: *mut T) -> Self {
        Self {
            raw: NonNull::new(raw),
            deleter: D::default(),
        }
    }

    /// Move the held state out, leaving `self` empty. No release runs.
    pub fn take(&mut self) -> Self {
        mem::replace(self, Self::empty())
    }
}

impl<T, D: Deleter<T>> UniqueArray<T, D> {
    /// Take ownership of a caller-supplied element-0 handle with an explicit
    /// deleter.
    ///
    /// # Safety
    ///
    /// Same as [`from_raw`](UniqueArray::from_raw): a non-null `raw` must be
    /// live, allocated compatibly with `deleter`, and unaliased.
    pub unsafe fn from_raw_with(raw: *mut T, deleter: D) -> Self {
        Self {
            raw: NonNull::new(raw),
            deleter,
        }
    }

    /// The held element-0 handle, without transferring ownership. Null when
    /// empty.
    pub fn get(&self) -> *mut T {
        self.raw.map_or(ptr::null_mut(), NonNull::as_ptr)
    }

    /// True iff no allocation is owned. A zero-count allocation reports
    /// `false`: it owns a block, just no elements.
    pub fn is_empty(&self) -> bool {
        self.raw.is_none()
    }

    /// Borrow element `index`. Unchecked: no bounds test is performed.
    ///
    /// # Panics
    ///
    /// Panics if the array is empty.
    ///
    /// # Safety
    ///
    /// `index` must be within the owned allocation's element count.
    pub unsafe fn at(&self, index: usize) -> &T {
        let base = self.raw.expect("indexed an empty UniqueArray");
        // SAFETY: the caller guarantees `index` is in bounds, so the offset
        // lands on an initialized element of the owned block.
        unsafe { &*base.as_ptr().add(index) }
    }

    /// Mutably borrow element `index`. Unchecked: no bounds test is
    /// performed.
    ///
    /// # Panics
    ///
    /// Panics if the array is empty.
    ///
    /// # Safety
    ///
    /// `index` must be within the owned allocation's element count.
    pub unsafe fn at_mut(&mut self, index: usize) -> &mut T {
        let base = self.raw.expect("indexed an empty UniqueArray");
        // SAFETY: as in `at`, plus `&mut self` guarantees the borrow is
        // unique.
        unsafe { &mut *base.as_ptr().add(index) }
    }

    /// Surrender the held handle without releasing it.
    ///
    /// The array reports empty afterwards; the caller now owns the
    /// allocation and must release it with a compatible strategy. Returns
    /// null when already empty.
    #[must_use = "the returned handle owns the allocation; dropping it leaks"]
    pub fn release(&mut self) -> *mut T {
        self.raw.take().map_or(ptr::null_mut(), |p| p.as_ptr())
    }

    /// Replace the held handle, releasing the old allocation.
    ///
    /// Resetting to the handle already held is a no-op. Otherwise the new
    /// handle is installed *before* the old allocation is released, so the
    /// array is already consistent if the deleter unwinds.
    ///
    /// # Safety
    ///
    /// Same contract as [`from_raw`](UniqueArray::from_raw) for the incoming
    /// `raw`.
    pub unsafe fn reset(&mut self, raw: *mut T) {
        if self.get() == raw {
            return;
        }
        let old = mem::replace(&mut self.raw, NonNull::new(raw));
        if let Some(old) = old {
            // SAFETY: `old` was held under the construction contract and has
            // just been detached, so this is its single release.
            unsafe { self.deleter.delete(old.as_ptr()) };
        }
    }

    /// Release the held allocation, if any, and become empty.
    pub fn clear(&mut self) {
        if let Some(old) = self.raw.take() {
            // SAFETY: `old` was held under the construction contract and has
            // just been detached, so this is its single release.
            unsafe { self.deleter.delete(old.as_ptr()) };
        }
    }

    /// Exchange handles and deleters with `other`. No release runs on
    /// either side; swapping twice restores the original state.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// The held deleter.
    pub fn deleter(&self) -> &D {
        &self.deleter
    }

    /// The held deleter, mutably.
    pub fn deleter_mut(&mut self) -> &mut D {
        &mut self.deleter
    }
}

impl<T, D: Deleter<T>> Drop for UniqueArray<T, D> {
    fn drop(&mut self) {
        if let Some(p) = self.raw.take() {
            // SAFETY: `p` was held under the construction contract; drop is
            // its single release.
            unsafe { self.deleter.delete(p.as_ptr()) };
        }
    }
}

impl<T, D: Deleter<T> + Default> Default for UniqueArray<T, D> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<Vec<T>> for UniqueArray<T> {
    fn from(vec: Vec<T>) -> Self {
        Self::from_vec(vec)
    }
}

impl<T> FromIterator<T> for UniqueArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

/// Handle identity, not element equality. Symmetric in its operands by
/// construction.
impl<T, D1: Deleter<T>, D2: Deleter<T>> PartialEq<UniqueArray<T, D2>> for UniqueArray<T, D1> {
    fn eq(&self, other: &UniqueArray<T, D2>) -> bool {
        self.get() == other.get()
    }
}

impl<T, D: Deleter<T>> Eq for UniqueArray<T, D> {}

impl<T, D: Deleter<T>> fmt::Debug for UniqueArray<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.raw {
            Some(p) => write!(f, "UniqueArray({p:p})"),
            None => write!(f, "UniqueArray(empty)"),
        }
    }
}

// SAFETY: exactly one owner exists, so sending the array transfers every
// element and the deleter wholesale; `T: Send + D: Send` make that sound.
unsafe impl<T: Send, D: Deleter<T> + Send> Send for UniqueArray<T, D> {}

// SAFETY: `&UniqueArray` only exposes `&T` (via `at`) and the raw address,
// so sharing it across threads is sound when `T: Sync + D: Sync`.
unsafe impl<T: Sync, D: Deleter<T> + Sync> Sync for UniqueArray<T, D> {}
