use super::*;
use crate::fixtures::*;
use datsmith_core::DigestSet;

const SHA1: &str = "0123456789abcdef0123456789abcdef01234567";

#[test]
fn default_options() {
    let options = ReconcileOptions::default();
    assert_eq!(options.key, KeyKind::Digest(DigestKind::Crc32));
    assert!(!options.case_sensitive);
    assert!(!options.parallel);

    let options = ReconcileOptions::new()
        .key(KeyKind::Machine)
        .case_sensitive(true)
        .parallel(true);
    assert_eq!(options.key, KeyKind::Machine);
    assert!(options.case_sensitive);
    assert!(options.parallel);
}

#[test]
fn selects_strongest_shared_digest() {
    let both = digests(&[(DigestKind::Crc32, "deadbeef"), (DigestKind::Sha1, SHA1)]);
    let inputs = vec![
        vec![rom("m", "a", both.clone(), 0)],
        vec![rom("m", "b", both, 1)],
    ];
    assert_eq!(select_key_kind(&inputs), KeyKind::Digest(DigestKind::Sha1));
}

#[test]
fn weakest_input_limits_the_key() {
    let both = digests(&[(DigestKind::Crc32, "deadbeef"), (DigestKind::Sha1, SHA1)]);
    let inputs = vec![
        vec![rom("m", "a", both, 0)],
        vec![crc_rom("m", "b", "deadbeef", 4, 1)],
    ];
    assert_eq!(select_key_kind(&inputs), KeyKind::Digest(DigestKind::Crc32));
}

#[test]
fn records_without_digests_do_not_vote() {
    let inputs = vec![vec![
        crc_rom("m", "a", "deadbeef", 4, 0),
        nodump_disk("m", "d", 0),
        rom("m", "empty", DigestSet::new(), 0),
    ]];
    assert_eq!(select_key_kind(&inputs), KeyKind::Digest(DigestKind::Crc32));
}

#[test]
fn falls_back_to_machine() {
    let inputs = vec![vec![
        crc_rom("m", "a", "deadbeef", 4, 0),
        rom("m", "b", digests(&[(DigestKind::Md5, "11111111111111111111111111111111")]), 0),
    ]];
    assert_eq!(select_key_kind(&inputs), KeyKind::Machine);
    assert_eq!(select_key_kind(&[]), KeyKind::Machine);
}
