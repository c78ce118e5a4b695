//! Single-element exclusive ownership.
//!
//! [`UniquePtr<T, D>`] owns one heap-allocated `T` and releases it through
//! its deleter exactly once. Ownership moves with the value — the type has
//! no `Clone`, so duplication is a compile-time error, and a moved-from
//! pointer is statically unusable. The runtime analogue of moving out is
//! [`take`](UniquePtr::take), which leaves the source observably empty.

use std::fmt;
use std::mem;
use std::ops::{Deref, DerefMut};
use std::ptr::{self, NonNull};

use crate::deleter::{BoxDeleter, Deleter};

/// Exclusive owner of a single heap-allocated `T`.
///
/// The empty state owns nothing; dropping an empty pointer is a no-op. With
/// a zero-sized deleter the whole type is pointer-sized.
///
/// ```
/// use uniq::UniquePtr;
///
/// let mut p = UniquePtr::new(42);
/// assert_eq!(*p, 42);
/// *p += 1;
/// assert_eq!(*p, 43);
/// ```
///
/// Duplication does not compile — only moves transfer ownership:
///
/// ```compile_fail
/// let a = uniq::UniquePtr::new(5);
/// let b = Clone::clone(&a);
/// ```
#[must_use]
pub struct UniquePtr<T, D: Deleter<T> = BoxDeleter> {
    /// `None` is the empty state. `Some` handles are valid per the
    /// construction contract and released exactly once.
    raw: Option<NonNull<T>>,
    deleter: D,
}

impl<T> UniquePtr<T> {
    /// Allocate `value` on the heap and take ownership of it.
    pub fn new(value: T) -> Self {
        Self {
            raw: Some(NonNull::from(Box::leak(Box::new(value)))),
            deleter: BoxDeleter,
        }
    }
}

impl<T, D: Deleter<T> + Default> UniquePtr<T, D> {
    /// An owner of nothing.
    pub fn empty() -> Self {
        Self {
            raw: None,
            deleter: D::default(),
        }
    }

    /// Take ownership of a caller-supplied handle.
    ///
    /// A null `raw` yields the empty state. Construction from a raw handle
    /// is deliberately a named, `unsafe` operation — handles never slide
    /// into an owner through an implicit conversion.
    ///
    /// # Safety
    ///
    /// If `raw` is non-null it must point to a live resource allocated
    /// compatibly with `D` (for [`BoxDeleter`], via `Box::into_raw`), and no
    /// other owner may hold or release it.
    pub unsafe fn from_raw(raw: *mut T) -> Self {
        Self {
            raw: NonNull::new(raw),
            deleter: D::default(),
        }
    }

    /// Move the held state out, leaving `self` empty.
    ///
    /// The returned owner holds exactly what `self` held. No release runs.
    pub fn take(&mut self) -> Self {
        mem::replace(self, Self::empty())
    }
}

impl<T, D: Deleter<T>> UniquePtr<T, D> {
    /// Take ownership of a caller-supplied handle with an explicit deleter.
    ///
    /// # Safety
    ///
    /// Same as [`from_raw`](UniquePtr::from_raw): a non-null `raw` must be
    /// live, allocated compatibly with `deleter`, and unaliased.
    pub unsafe fn from_raw_with(raw: *mut T, deleter: D) -> Self {
        Self {
            raw: NonNull::new(raw),
            deleter,
        }
    }

    /// The held handle, without transferring ownership. Null when empty.
    pub fn get(&self) -> *mut T {
        self.raw.map_or(ptr::null_mut(), NonNull::as_ptr)
    }

    /// True iff no resource is owned.
    pub fn is_empty(&self) -> bool {
        self.raw.is_none()
    }

    /// Borrow the pointee, or `None` when empty.
    pub fn as_ref(&self) -> Option<&T> {
        // SAFETY: a non-empty handle is valid (construction contract) and
        // exclusively owned, so a shared borrow tied to `&self` is sound.
        self.raw.map(|p| unsafe { &*p.as_ptr() })
    }

    /// Mutably borrow the pointee, or `None` when empty.
    pub fn as_mut(&mut self) -> Option<&mut T> {
        // SAFETY: as in `as_ref`, plus `&mut self` guarantees uniqueness of
        // the borrow.
        self.raw.map(|p| unsafe { &mut *p.as_ptr() })
    }

    /// Surrender the held handle without releasing it.
    ///
    /// The pointer reports empty afterwards; the caller now owns the
    /// resource and must release it (for [`BoxDeleter`] handles, by
    /// reconstructing the `Box`). Returns null when already empty.
    #[must_use = "the returned handle owns the resource; dropping it leaks"]
    pub fn release(&mut self) -> *mut T {
        self.raw.take().map_or(ptr::null_mut(), |p| p.as_ptr())
    }

    /// Replace the held handle, releasing the old resource.
    ///
    /// Resetting to the handle already held is a no-op — the resource is
    /// not released out from under the caller. Otherwise the new handle is
    /// installed *before* the old resource is released, so the pointer is
    /// already consistent if the deleter unwinds.
    ///
    /// # Safety
    ///
    /// Same contract as [`from_raw`](UniquePtr::from_raw) for the incoming
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

    /// Release the held resource, if any, and become empty.
    ///
    /// Equivalent to assigning the empty sentinel.
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

impl<T, D: Deleter<T>> Drop for UniquePtr<T, D> {
    fn drop(&mut self) {
        if let Some(p) = self.raw.take() {
            // SAFETY: `p` was held under the construction contract; drop is
            // its single release.
            unsafe { self.deleter.delete(p.as_ptr()) };
        }
    }
}

impl<T, D: Deleter<T> + Default> Default for UniquePtr<T, D> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<Box<T>> for UniquePtr<T> {
    /// A `Box` is already an exclusive owner with `Box` deallocation, so the
    /// conversion is free.
    fn from(boxed: Box<T>) -> Self {
        Self {
            raw: Some(NonNull::from(Box::leak(boxed))),
            deleter: BoxDeleter,
        }
    }
}

impl<T, D: Deleter<T>> Deref for UniquePtr<T, D> {
    type Target = T;

    /// # Panics
    ///
    /// Panics if the pointer is empty.
    fn deref(&self) -> &T {
        self.as_ref().expect("dereferenced an empty UniquePtr")
    }
}

impl<T, D: Deleter<T>> DerefMut for UniquePtr<T, D> {
    /// # Panics
    ///
    /// Panics if the pointer is empty.
    fn deref_mut(&mut self) -> &mut T {
        self.as_mut().expect("dereferenced an empty UniquePtr")
    }
}

/// Handle identity, not pointee equality. Two empty pointers compare equal;
/// the comparison is symmetric in its operands by construction.
impl<T, D1: Deleter<T>, D2: Deleter<T>> PartialEq<UniquePtr<T, D2>> for UniquePtr<T, D1> {
    fn eq(&self, other: &UniquePtr<T, D2>) -> bool {
        self.get() == other.get()
    }
}

impl<T, D: Deleter<T>> Eq for UniquePtr<T, D> {}

impl<T, D: Deleter<T>> fmt::Debug for UniquePtr<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.raw {
            Some(p) => write!(f, "UniquePtr({p:p})"),
            None => write!(f, "UniquePtr(empty)"),
        }
    }
}

// SAFETY: exactly one owner exists, so sending the pointer transfers the
// resource and deleter wholesale; `T: Send + D: Send` make that transfer
// sound. No interior sharing is introduced by the type itself.
unsafe impl<T: Send, D: Deleter<T> + Send> Send for UniquePtr<T, D> {}

// SAFETY: `&UniquePtr` only exposes `&T` (via `as_ref`/`Deref`) and the raw
// address, so sharing it across threads is sound when `T: Sync + D: Sync`.
unsafe impl<T: Sync, D: Deleter<T> + Sync> Sync for UniquePtr<T, D> {}
