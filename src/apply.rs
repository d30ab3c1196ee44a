// Applier: rebuild the target buffer from a baseline plus a FileDiff.
//
// Inverse of the differencer. The working buffer is sized from the diff's
// declared page count (zero-padding on growth, truncating on shrink), then
// every commit is written in place at its absolute position.

use crate::diff::FileDiff;
use crate::error::DiffError;

/// Reconstruct the target buffer from `baseline` and `diff`.
///
/// The returned buffer is the authoritative result; `baseline` itself is
/// never modified. Malformed hex payloads surface as
/// [`DiffError::Decode`].
///
/// # Panics
///
/// Diffs are trusted to come from [`diff`](crate::diff()) or an equivalent
/// producer. A hand-built diff whose page index or commit offset points
/// outside the declared extent panics on the out-of-bounds write rather
/// than being validated away.
pub fn apply(baseline: &[u8], diff: &FileDiff) -> Result<Vec<u8>, DiffError> {
    let page_size = diff.page_size();
    let expected_len = diff.page_count() * page_size;

    // Resize up front: growth zero-pads the tail, shrink truncates.
    let mut target = vec![0u8; expected_len];
    let keep = baseline.len().min(expected_len);
    target[..keep].copy_from_slice(&baseline[..keep]);

    for page_diff in diff.changes() {
        let page_offset = page_diff.page_index() * page_size;
        for commit in page_diff.commits() {
            let data = hex::decode(commit.data())?;
            let at = page_offset + commit.offset();
            target[at..at + data.len()].copy_from_slice(&data);
        }
    }

    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{Commit, PageDiff};

    #[test]
    fn writes_commits_at_absolute_positions() {
        let baseline = vec![0u8; 128];
        let d = FileDiff(
            64,
            2,
            vec![
                PageDiff(0, vec![Commit(3, "aabb".into())]),
                PageDiff(1, vec![Commit(60, "01020304".into())]),
            ],
        );

        let out = apply(&baseline, &d).unwrap();
        assert_eq!(out.len(), 128);
        assert_eq!(&out[3..5], &[0xAA, 0xBB]);
        assert_eq!(&out[124..128], &[1, 2, 3, 4]);
        assert!(out[..3].iter().all(|&b| b == 0));
    }

    #[test]
    fn growth_zero_pads_then_patches() {
        let baseline = vec![7u8; 64];
        let d = FileDiff(64, 2, vec![PageDiff(1, vec![Commit(0, "ff".into())])]);

        let out = apply(&baseline, &d).unwrap();
        assert_eq!(out.len(), 128);
        assert_eq!(&out[..64], &baseline[..]);
        assert_eq!(out[64], 0xFF);
        assert!(out[65..].iter().all(|&b| b == 0));
    }

    #[test]
    fn shrink_truncates_the_baseline() {
        let baseline: Vec<u8> = (0..=255u8).collect();
        let d = FileDiff(64, 2, vec![]);

        let out = apply(&baseline, &d).unwrap();
        assert_eq!(out, &baseline[..128]);
    }

    #[test]
    fn matching_extent_leaves_unpatched_bytes_alone() {
        let baseline: Vec<u8> = (0..64u8).collect();
        let d = FileDiff(64, 1, vec![PageDiff(0, vec![Commit(10, "00".into())])]);

        let out = apply(&baseline, &d).unwrap();
        assert_eq!(out[10], 0);
        assert_eq!(&out[..10], &baseline[..10]);
        assert_eq!(&out[11..], &baseline[11..]);
    }

    #[test]
    fn malformed_hex_payload_is_a_decode_error() {
        let baseline = vec![0u8; 64];
        let d = FileDiff(64, 1, vec![PageDiff(0, vec![Commit(0, "zz".into())])]);
        let err = apply(&baseline, &d).unwrap_err();
        assert!(matches!(err, DiffError::Decode(_)), "{err}");
    }
}
