//! Release strategies for owned handles.
//!
//! A [`Deleter`] is a value that knows how to release one raw handle. The
//! owning pointer stores it alongside the handle and invokes it exactly once
//! when the resource goes away — on drop, on [`clear`](crate::UniquePtr::clear),
//! or when [`reset`](crate::UniquePtr::reset) replaces the handle. The
//! built-in deleters are zero-sized, so the default configurations cost
//! nothing over a bare pointer.
//!
//! Custom strategies cover non-memory resources (file descriptors, foreign
//! allocations, pool slots). Wrap a closure in [`FnDeleter`] for a one-off
//! strategy with no named type.

/// A strategy for releasing a raw resource handle.
///
/// Implementations release whatever `raw` refers to: heap memory, a foreign
/// allocation, a descriptor table slot. The owning pointer guarantees the
/// calls it makes satisfy the contract below, so implementations may rely on
/// it without re-checking.
pub trait Deleter<T> {
    /// Release the resource behind `raw`.
    ///
    /// # Safety
    ///
    /// The caller must guarantee:
    ///
    /// - `raw` is non-null and refers to a live resource allocated in a
    ///   manner compatible with this strategy;
    /// - this is the only release of `raw` — the handle is dead afterwards.
    unsafe fn delete(&mut self, raw: *mut T);
}

/// Default strategy for [`UniquePtr`](crate::UniquePtr): a `Box` deallocation.
///
/// Pairs with handles produced by `Box::into_raw` (which is what
/// [`UniquePtr::new`](crate::UniquePtr::new) and the `From<Box<T>>`
/// conversion produce). Zero-sized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BoxDeleter;

impl<T> Deleter<T> for BoxDeleter {
    unsafe fn delete(&mut self, raw: *mut T) {
        // SAFETY: the trait contract says `raw` came from `Box::into_raw`
        // and this is its only release.
        drop(unsafe { Box::from_raw(raw) });
    }
}

/// Default strategy for [`UniqueArray`](crate::UniqueArray): releases a
/// length-prefixed array block.
///
/// Pairs with handles produced by this crate's array allocation
/// ([`UniqueArray::new`](crate::UniqueArray::new),
/// [`from_vec`](crate::UniqueArray::from_vec), `FromIterator`). The element
/// count is read back from the block header, so the strategy itself stays
/// zero-sized and the handle stays thin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArrayDeleter;

impl<T> Deleter<T> for ArrayDeleter {
    unsafe fn delete(&mut self, raw: *mut T) {
        // SAFETY: the trait contract says `raw` is the element-0 handle of a
        // live block from `cookie::alloc_block`, released exactly once.
        unsafe { crate::cookie::release(raw) }
    }
}

/// Adapter that turns any `FnMut(*mut T)` closure into a deleter.
///
/// The closure receives the raw handle and assumes full responsibility for
/// it. Pair with [`from_raw_with`](crate::UniquePtr::from_raw_with):
///
/// ```
/// use uniq::{FnDeleter, UniquePtr};
///
/// let raw = Box::into_raw(Box::new(7_u32));
/// // SAFETY: `raw` came from `Box::into_raw` and the closure re-boxes it.
/// let p = unsafe {
///     UniquePtr::from_raw_with(
///         raw,
///         FnDeleter(|h: *mut u32| unsafe { drop(Box::from_raw(h)) }),
///     )
/// };
/// assert_eq!(*p, 7);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct FnDeleter<F>(
    /// The wrapped release closure.
    pub F,
);

impl<T, F: FnMut(*mut T)> Deleter<T> for FnDeleter<F> {
    unsafe fn delete(&mut self, raw: *mut T) {
        (self.0)(raw)
    }
}

/// A deleter that does nothing.
///
/// For handles whose storage is owned elsewhere — stack slots, arena
/// interiors, foreign memory that outlives the pointer. The owning pointer
/// then provides move-only access discipline without claiming the
/// deallocation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LeakDeleter;

impl<T> Deleter<T> for LeakDeleter {
    unsafe fn delete(&mut self, _raw: *mut T) {}
}
