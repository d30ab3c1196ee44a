use pagedelta::{DiffOptions, apply, diff_with_options, expand_diff};
use proptest::prelude::*;

const PAGE: usize = 64;

/// Page-aligned buffers of up to `max_pages` pages.
fn paged(max_pages: usize) -> impl Strategy<Value = Vec<u8>> {
    (0..=max_pages).prop_flat_map(|n| proptest::collection::vec(any::<u8>(), n * PAGE))
}

proptest! {
    #[test]
    fn prop_apply_reconstructs_target(
        baseline in paged(6),
        target in paged(6),
        threshold in 0usize..=PAGE,
    ) {
        let opts = DiffOptions { page_size: PAGE, entire_page_threshold: threshold };
        match diff_with_options(&baseline, &target, &opts).unwrap() {
            Some(d) => prop_assert_eq!(apply(&baseline, &d).unwrap(), target),
            None => prop_assert_eq!(baseline, target),
        }
    }

    #[test]
    fn prop_self_diff_is_none(buf in paged(8)) {
        let opts = DiffOptions::with_page_size(PAGE);
        prop_assert!(diff_with_options(&buf, &buf, &opts).unwrap().is_none());
    }

    #[test]
    fn prop_commits_are_ascending_in_bounds_and_nonempty(
        baseline in paged(5).prop_filter("need at least one page", |b| !b.is_empty()),
        edits in proptest::collection::vec((any::<prop::sample::Index>(), any::<u8>()), 1..32),
    ) {
        let mut target = baseline.clone();
        for (idx, val) in &edits {
            let pos = idx.index(target.len());
            target[pos] = *val;
        }

        let opts = DiffOptions::with_page_size(PAGE);
        let Some(d) = diff_with_options(&baseline, &target, &opts).unwrap() else {
            // All edits happened to write the original bytes back.
            prop_assert_eq!(baseline, target);
            return Ok(());
        };

        let expanded = expand_diff(Some(&d)).unwrap().unwrap();
        prop_assert_eq!(expanded.page_count, target.len() / PAGE);
        let mut prev_index = None;
        for page in &expanded.changes {
            prop_assert!(page.page_index < expanded.page_count);
            prop_assert!(prev_index < Some(page.page_index), "page indices must ascend");
            prev_index = Some(page.page_index);
            prop_assert!(!page.commits.is_empty());

            let mut prev_end = 0usize;
            for (i, commit) in page.commits.iter().enumerate() {
                prop_assert!(!commit.data.is_empty(), "commits cover at least one byte");
                if i > 0 {
                    // A matching byte separates consecutive runs.
                    prop_assert!(commit.offset > prev_end);
                }
                prev_end = commit.offset + commit.data.len();
                prop_assert!(prev_end <= PAGE);
            }
        }
    }

    #[test]
    fn prop_unchanged_pages_never_appear(
        baseline in paged(6).prop_filter("need at least one page", |b| !b.is_empty()),
        page_to_edit in any::<prop::sample::Index>(),
    ) {
        let mut target = baseline.clone();
        let page = page_to_edit.index(target.len() / PAGE);
        target[page * PAGE] ^= 0xFF;

        let opts = DiffOptions::with_page_size(PAGE);
        let d = diff_with_options(&baseline, &target, &opts).unwrap().unwrap();
        let indices: Vec<usize> = d.changes().iter().map(|p| p.page_index()).collect();
        prop_assert_eq!(indices, vec![page]);
    }
}
