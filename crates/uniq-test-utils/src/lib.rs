//! Instrumented deleters and drop trackers for uniq development.
//!
//! Provides release-observing deleters ([`TallyDeleter`], [`FlagDeleter`])
//! and a drop-counting value type ([`DropSpy`]) so tests can assert the
//! release-exactly-once contract instead of trusting it.

#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::cell::Cell;
use std::rc::Rc;

use uniq::Deleter;

/// Shared release/drop counter.
///
/// Clone it into as many deleters or [`DropSpy`]s as the test needs; every
/// clone bumps the same underlying count.
#[derive(Clone, Default)]
pub struct DropTally(Rc<Cell<usize>>);

impl DropTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of releases (or drops) recorded so far.
    pub fn count(&self) -> usize {
        self.0.get()
    }

    /// Record one release.
    pub fn bump(&self) {
        self.0.set(self.0.get() + 1);
    }
}

/// A deleter that counts releases, then frees the `Box`-allocated handle.
///
/// Pair only with handles produced by `Box::into_raw`. The count lives in a
/// [`DropTally`], so the test keeps a handle on it after the deleter moves
/// into the pointer under test. The `Default` deleter is wired to a fresh,
/// unobserved tally — what empty owners (e.g. the source left behind by
/// `take`) carry.
#[derive(Clone, Default)]
pub struct TallyDeleter {
    tally: DropTally,
}

impl TallyDeleter {
    pub fn new(tally: &DropTally) -> Self {
        Self {
            tally: tally.clone(),
        }
    }
}

impl<T> Deleter<T> for TallyDeleter {
    unsafe fn delete(&mut self, raw: *mut T) {
        self.tally.bump();
        // SAFETY: per this type's contract, `raw` came from `Box::into_raw`
        // and the owning pointer guarantees single release.
        drop(unsafe { Box::from_raw(raw) });
    }
}

/// Observer handle for [`FlagDeleter`]: reports whether the release ran.
#[derive(Clone, Default)]
pub struct ReleaseFlag(Rc<Cell<bool>>);

impl ReleaseFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once the paired deleter has run.
    pub fn is_set(&self) -> bool {
        self.0.get()
    }
}

/// A deleter that flips a [`ReleaseFlag`], then frees the `Box`-allocated
/// handle.
///
/// The flag stays `false` for as long as the resource is held — scope-exit
/// tests watch it flip. The `Default` deleter is wired to a fresh,
/// unobserved flag.
#[derive(Clone, Default)]
pub struct FlagDeleter {
    flag: ReleaseFlag,
}

impl FlagDeleter {
    pub fn new(flag: &ReleaseFlag) -> Self {
        Self { flag: flag.clone() }
    }
}

impl<T> Deleter<T> for FlagDeleter {
    unsafe fn delete(&mut self, raw: *mut T) {
        self.flag.0.set(true);
        // SAFETY: per this type's contract, `raw` came from `Box::into_raw`
        // and the owning pointer guarantees single release.
        drop(unsafe { Box::from_raw(raw) });
    }
}

/// A value whose drop bumps a [`DropTally`].
///
/// For exercising the *default* deleters: wrap `DropSpy`s in a pointer or
/// array and count how many element destructors actually ran.
pub struct DropSpy {
    tally: DropTally,
    /// Arbitrary payload so spies are distinguishable in tests.
    pub id: usize,
}

impl DropSpy {
    pub fn new(tally: &DropTally, id: usize) -> Self {
        Self {
            tally: tally.clone(),
            id,
        }
    }
}

impl Drop for DropSpy {
    fn drop(&mut self) {
        self.tally.bump();
    }
}
