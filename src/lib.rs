//! Pagedelta: compact page-aligned binary deltas between snapshot buffers.
//!
//! The crate provides:
//! - A differencer (`diff`) producing per-page byte-range commits
//! - An applier (`apply`) rebuilding the target from baseline + diff
//! - An expander (`expand_diff`) decoding commit payloads to raw bytes
//! - An optional CLI (`cli` feature)
//!
//! Buffers must be an exact multiple of the page size; only changed byte
//! ranges are carried in the diff, and a page more than half changed (by
//! default) is replaced wholesale.
//!
//! # Quick Start
//!
//! ```
//! let baseline = vec![0u8; 1024];
//! let mut target = baseline.clone();
//! target[100] = 0xFF;
//!
//! let delta = pagedelta::diff(&baseline, &target).unwrap().expect("buffers differ");
//! let rebuilt = pagedelta::apply(&baseline, &delta).unwrap();
//! assert_eq!(rebuilt, target);
//!
//! // Identical buffers yield the no-diff sentinel.
//! assert!(pagedelta::diff(&target, &target).unwrap().is_none());
//! ```

pub mod apply;
pub mod diff;
pub mod error;
pub mod expand;
pub mod page;

#[cfg(feature = "cli")]
pub mod cli;

pub use crate::apply::apply;
pub use crate::diff::{Commit, DiffOptions, FileDiff, PageDiff, diff, diff_with_options};
pub use crate::error::DiffError;
pub use crate::expand::{ExpandedCommit, ExpandedFileDiff, ExpandedPageDiff, expand_diff};
pub use crate::page::DEFAULT_PAGE_SIZE;
