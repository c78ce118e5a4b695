//! Exclusive-ownership smart pointers with pluggable deleters.
//!
//! One owner per resource, release exactly once, transfer only by move —
//! with the release strategy as a swappable, usually zero-sized value. This
//! crate is one of two in the workspace that may contain `unsafe` code
//! (along with `uniq-test-utils`); every unsafe block carries a
//! `// SAFETY:` comment.
//!
//! # Architecture
//!
//! ```text
//! UniquePtr<T, D = BoxDeleter>      single element, Deref/DerefMut
//! UniqueArray<T, D = ArrayDeleter>  contiguous elements, unchecked at()
//! ├── raw: Option<NonNull<T>>       None is the empty state
//! └── deleter: D                    Deleter<T>, invoked at most once
//! cookie (private)                  length-prefixed array blocks
//! ```
//!
//! Single and array modes are separate types, not a runtime branch: an
//! array owner has no `Deref`, a single owner has no `at()`, and mixing
//! them up is a type error.
//!
//! # Ownership contract
//!
//! - Neither type implements `Clone` or `Copy`; duplication is rejected at
//!   compile time and moves statically empty the source.
//! - The deleter runs exactly once per held handle — on drop, [`clear`],
//!   or handle replacement via [`reset`] — and never on an empty owner.
//! - [`release`] surrenders the handle without running the deleter; the
//!   caller takes over the release obligation.
//! - `reset` installs the new handle before releasing the old one, and
//!   resetting to the currently held handle is a no-op.
//!
//! # Threading
//!
//! No internal synchronization. An owner may move across threads when its
//! element and deleter types allow it (`Send`/`Sync` propagate); anything
//! beyond that is the caller's synchronization problem.
//!
//! [`clear`]: UniquePtr::clear
//! [`reset`]: UniquePtr::reset
//! [`release`]: UniquePtr::release

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod array;
mod cookie;
pub mod deleter;
pub mod single;

// Public re-exports for the primary API surface.
pub use array::UniqueArray;
pub use deleter::{ArrayDeleter, BoxDeleter, Deleter, FnDeleter, LeakDeleter};
pub use single::UniquePtr;
