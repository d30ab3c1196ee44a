// Differencer: page-aligned comparison of two snapshot buffers.
//
// Walks the target one page at a time, comparing against the baseline page
// at the same index. Changed pages produce either a list of contiguous
// byte-range commits or, past a mismatch threshold, a single whole-page
// replacement. The result is a compact value object the applier consumes
// to rebuild the target from the baseline.

use serde::{Deserialize, Serialize};

use crate::error::DiffError;
use crate::page::{self, DEFAULT_PAGE_SIZE};

// ---------------------------------------------------------------------------
// Diff value types
// ---------------------------------------------------------------------------

/// A single contiguous byte-range replacement within one page:
/// `(offset within page, hex-encoded replacement bytes)`.
///
/// Tuple layout matches the wire shape `[offset, "hexdata"]` under serde.
/// The payload is lowercase, even-length hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit(pub usize, pub String);

impl Commit {
    /// Offset of the replaced range, relative to the page start.
    pub fn offset(&self) -> usize {
        self.0
    }

    /// Hex-encoded replacement bytes.
    pub fn data(&self) -> &str {
        &self.1
    }
}

/// All commits for one changed page: `(page index, commits)`.
///
/// Commits are non-overlapping, ascending by offset, each at least one
/// byte. A whole-page replacement is a single commit at offset 0 spanning
/// the full page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDiff(pub usize, pub Vec<Commit>);

impl PageDiff {
    /// Index of the page this diff applies to.
    pub fn page_index(&self) -> usize {
        self.0
    }

    /// Ordered byte-range replacements within the page.
    pub fn commits(&self) -> &[Commit] {
        &self.1
    }
}

/// The complete structured delta between two buffers:
/// `(page size, target page count, changed pages)`.
///
/// Page indices in `changes` are strictly ascending and each appears at
/// most once; pages with no byte changes never appear. The page size and
/// page count are needed by [`apply`](crate::apply()) to resize the baseline
/// before patching.
///
/// Serializes to the wire shape
/// `[pageSize, pageCount, [[pageIndex, [[offset, "hex"], ...]], ...]]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDiff(pub usize, pub usize, pub Vec<PageDiff>);

impl FileDiff {
    /// Page size both buffers were partitioned with.
    pub fn page_size(&self) -> usize {
        self.0
    }

    /// Total page count of the target buffer.
    pub fn page_count(&self) -> usize {
        self.1
    }

    /// Changed pages, ascending by page index.
    pub fn changes(&self) -> &[PageDiff] {
        &self.2
    }
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Configuration for the differencer.
#[derive(Debug, Clone)]
pub struct DiffOptions {
    /// Page size in bytes. Both input lengths must be exact multiples.
    pub page_size: usize,
    /// Mismatched-byte count at which a page is emitted as one whole-page
    /// replacement instead of a commit list. Policy knob only; any value
    /// produces a correct diff.
    pub entire_page_threshold: usize,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

impl DiffOptions {
    /// Options for a given page size, with the threshold at its default of
    /// half a page.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size,
            entire_page_threshold: page_size / 2,
        }
    }
}

// ---------------------------------------------------------------------------
// Differencer
// ---------------------------------------------------------------------------

/// Diff `target` against `baseline` with the default 512-byte pages.
///
/// Returns `Ok(None)` when the buffers are byte-identical and equal in
/// length, so callers can skip the update entirely. A pure page-count
/// shrink yields `Ok(Some(_))` with an empty change list; the applier
/// still needs the new page count to truncate.
pub fn diff(baseline: &[u8], target: &[u8]) -> Result<Option<FileDiff>, DiffError> {
    diff_with_options(baseline, target, &DiffOptions::default())
}

/// Diff with a custom page size and whole-page threshold.
///
/// Fails with [`DiffError::InvalidLength`] before any comparison if either
/// buffer's length is not a multiple of `opts.page_size`.
pub fn diff_with_options(
    baseline: &[u8],
    target: &[u8],
    opts: &DiffOptions,
) -> Result<Option<FileDiff>, DiffError> {
    let page_size = opts.page_size;
    // A zero page size can never divide a buffer; reject it up front
    // instead of letting the modulo below divide by zero.
    if page_size == 0 {
        return Err(DiffError::InvalidLength {
            len: baseline.len(),
            page_size,
        });
    }
    for len in [baseline.len(), target.len()] {
        if len % page_size != 0 {
            return Err(DiffError::InvalidLength { len, page_size });
        }
    }

    let target_page_count = page::page_count(target.len(), page_size);
    let mut changes: Vec<PageDiff> = Vec::new();

    for (page_index, target_page) in target.chunks_exact(page_size).enumerate() {
        let Some(baseline_page) = page::page(baseline, page_size, page_index) else {
            // Page growth: no baseline page to compare against, take the
            // target page verbatim.
            changes.push(PageDiff(page_index, vec![Commit(0, hex::encode(target_page))]));
            continue;
        };
        if let Some(commits) =
            page_commits(baseline_page, target_page, opts.entire_page_threshold)
        {
            changes.push(PageDiff(page_index, commits));
        }
    }

    if changes.is_empty() && baseline.len() == target.len() {
        return Ok(None);
    }

    log::debug!(
        "diff: {} of {} pages changed (page_size={page_size})",
        changes.len(),
        target_page_count
    );
    Ok(Some(FileDiff(page_size, target_page_count, changes)))
}

/// Compare one baseline/target page pair. `None` means the pages are
/// identical; otherwise the ascending, non-overlapping commit list (or the
/// single whole-page commit once the threshold is hit).
fn page_commits(baseline: &[u8], target: &[u8], threshold: usize) -> Option<Vec<Commit>> {
    if baseline == target {
        return None;
    }

    let mut commits: Vec<Commit> = Vec::new();
    let mut mismatched = 0usize;
    let mut run_start: Option<usize> = None;

    for (i, (&old, &new)) in baseline.iter().zip(target).enumerate() {
        // Threshold check happens before each byte, so the exact bailout
        // position never affects the emitted diff.
        if mismatched >= threshold {
            log::debug!("page exceeds {threshold} mismatched bytes, emitting whole page");
            return Some(vec![Commit(0, hex::encode(target))]);
        }
        if old != new {
            mismatched += 1;
            if run_start.is_none() {
                run_start = Some(i);
            }
        } else if let Some(start) = run_start.take() {
            commits.push(Commit(start, hex::encode(&target[start..i])));
        }
    }
    // A run still open at end-of-page closes there.
    if let Some(start) = run_start {
        commits.push(Commit(start, hex::encode(&target[start..])));
    }
    Some(commits)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
