// Wire-shape checks: a FileDiff serializes to the exact nested-array JSON
// form, and the no-diff sentinel to `null`.

use pagedelta::{Commit, DiffOptions, FileDiff, PageDiff, diff, diff_with_options};

#[test]
fn file_diff_serializes_to_nested_arrays() {
    let d = FileDiff(
        512,
        196,
        vec![
            PageDiff(0, vec![Commit(100, "00".into())]),
            PageDiff(1, vec![Commit(488, "00".into())]),
            PageDiff(19, vec![Commit(272, "00".into())]),
        ],
    );
    assert_eq!(
        serde_json::to_string(&d).unwrap(),
        r#"[512,196,[[0,[[100,"00"]]],[1,[[488,"00"]]],[19,[[272,"00"]]]]]"#
    );
}

#[test]
fn sentinel_serializes_to_null() {
    let none: Option<FileDiff> = None;
    assert_eq!(serde_json::to_string(&none).unwrap(), "null");
    let parsed: Option<FileDiff> = serde_json::from_str("null").unwrap();
    assert!(parsed.is_none());
}

#[test]
fn empty_change_list_is_not_null() {
    // A pure shrink keeps the explicit [pageSize, pageCount, []] form.
    let d = FileDiff(64, 14, vec![]);
    assert_eq!(serde_json::to_string(&Some(&d)).unwrap(), "[64,14,[]]");
}

#[test]
fn wire_roundtrip_preserves_structure() {
    let baseline = vec![1u8; 256];
    let mut target = baseline.clone();
    target[5] = 2;
    target[200] = 3;

    let d = diff_with_options(&baseline, &target, &DiffOptions::with_page_size(64))
        .unwrap()
        .unwrap();
    let json = serde_json::to_string(&d).unwrap();
    let back: FileDiff = serde_json::from_str(&json).unwrap();
    assert_eq!(back, d);
}

#[test]
fn diff_payloads_are_lowercase_even_length_hex() {
    let baseline = vec![0u8; 512];
    let mut target = baseline.clone();
    target[0] = 0xAB;
    target[1] = 0xCD;

    let d = diff(&baseline, &target).unwrap().unwrap();
    let payload = d.changes()[0].commits()[0].data();
    assert_eq!(payload, "abcd");
    assert_eq!(payload.len() % 2, 0);
}
