// Diff expander: decode commit payloads for callers that want raw bytes.
//
// Pure structural transform over a FileDiff. Every commit's hex string is
// decoded once, with the original string kept alongside, so consumers can
// pick whichever form suits them. The no-diff sentinel passes through
// unchanged.

use crate::diff::FileDiff;
use crate::error::DiffError;

/// A commit with its payload decoded: offset, raw bytes, and the original
/// hex string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandedCommit {
    pub offset: usize,
    pub data: Vec<u8>,
    pub data_hex: String,
}

/// One changed page with decoded commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandedPageDiff {
    pub page_index: usize,
    pub commits: Vec<ExpandedCommit>,
}

/// A [`FileDiff`] with every commit payload decoded to raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandedFileDiff {
    pub page_size: usize,
    pub page_count: usize,
    pub changes: Vec<ExpandedPageDiff>,
}

/// Decode every commit payload in `diff`, preserving the hex alongside.
///
/// `None` (the no-diff sentinel) propagates unchanged. The only failure
/// mode is a malformed hex payload.
pub fn expand_diff(diff: Option<&FileDiff>) -> Result<Option<ExpandedFileDiff>, DiffError> {
    let Some(diff) = diff else {
        return Ok(None);
    };

    let mut changes = Vec::with_capacity(diff.changes().len());
    for page_diff in diff.changes() {
        let mut commits = Vec::with_capacity(page_diff.commits().len());
        for commit in page_diff.commits() {
            commits.push(ExpandedCommit {
                offset: commit.offset(),
                data: hex::decode(commit.data())?,
                data_hex: commit.data().to_string(),
            });
        }
        changes.push(ExpandedPageDiff {
            page_index: page_diff.page_index(),
            commits,
        });
    }

    Ok(Some(ExpandedFileDiff {
        page_size: diff.page_size(),
        page_count: diff.page_count(),
        changes,
    }))
}
