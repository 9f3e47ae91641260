use super::*;
use crate::fixtures::*;
use datsmith_core::{DigestKind, DigestSet, Item, Record};

const CRC_A: &str = "deadbeef";
const SHA1_A: &str = "0123456789abcdef0123456789abcdef01234567";
const SHA1_B: &str = "fedcba9876543210fedcba9876543210fedcba98";

#[test]
fn different_kinds_never_match() {
    let set = digests(&[(DigestKind::Crc32, CRC_A)]);
    let a = rom("m", "x", set.clone(), 0);
    let b = disk("m", "x", set, 0);
    assert!(!is_duplicate(&a, &b));
    assert!(!is_duplicate(&b, &a));
}

#[test]
fn no_common_algorithm_is_not_a_match() {
    // Same name and size, but one side only has a CRC and the other an MD5.
    let a = rom("m", "game.rom", digests(&[(DigestKind::Crc32, CRC_A)]).with_size(1024), 0);
    let b = rom(
        "m",
        "game.rom",
        digests(&[(DigestKind::Md5, "11111111111111111111111111111111")]).with_size(1024),
        1,
    );
    assert!(!is_duplicate(&a, &b));
}

#[test]
fn common_digests_must_all_agree() {
    let a = rom(
        "m",
        "x",
        digests(&[(DigestKind::Crc32, CRC_A), (DigestKind::Sha1, SHA1_A)]),
        0,
    );
    let same_crc_other_sha = rom(
        "m",
        "x",
        digests(&[(DigestKind::Crc32, CRC_A), (DigestKind::Sha1, SHA1_B)]),
        0,
    );
    assert!(!is_duplicate(&a, &same_crc_other_sha));

    let crc_only = rom("m", "x", digests(&[(DigestKind::Crc32, CRC_A)]), 0);
    assert!(is_duplicate(&a, &crc_only));
}

#[test]
fn rom_sizes_must_agree_when_both_known() {
    let set = digests(&[(DigestKind::Crc32, CRC_A)]);
    let a = rom("m", "x", set.clone().with_size(10), 0);
    let b = rom("m", "x", set.clone().with_size(11), 0);
    let c = rom("m", "x", set.clone(), 0);
    let d = rom("m", "x", set, 0);
    assert!(!is_duplicate(&a, &b));
    assert!(!is_duplicate(&a, &c), "one known size and one unknown differ");
    assert!(is_duplicate(&c, &d));
}

#[test]
fn disk_sizes_are_not_compared() {
    let set = digests(&[(DigestKind::Sha1, SHA1_A)]);
    let a = disk("m", "d", set.clone().with_size(10), 0);
    let b = disk("m", "d", set, 0);
    assert!(is_duplicate(&a, &b));
}

#[test]
fn nodump_with_same_name_matches() {
    let a = nodump_disk("m", "disk1", 0);
    let b = nodump_disk("m", "disk1", 1);
    assert!(is_duplicate(&a, &b));
    assert_eq!(classify(&a, &b), DupeType::EXTERNAL | DupeType::ALL);

    let other = nodump_disk("m", "disk2", 1);
    assert!(!is_duplicate(&a, &other));
}

#[test]
fn auxiliary_kinds_never_match() {
    let a = Record::new("boom.wav", Item::Sample);
    let b = Record::new("boom.wav", Item::Sample);
    assert!(!is_duplicate(&a, &b));
}

#[test]
fn empty_digest_sets_never_match() {
    let a = rom("m", "x", DigestSet::new(), 0);
    let b = rom("m", "x", DigestSet::new(), 0);
    assert!(!is_duplicate(&a, &b));
}

#[test]
fn classify_internal_and_external() {
    let a = crc_rom("m", "x", CRC_A, 4, 0);
    let same_source = crc_rom("m", "x", CRC_A, 4, 0);
    let other_source = crc_rom("m", "x", CRC_A, 4, 1);
    assert_eq!(classify(&a, &same_source), DupeType::INTERNAL | DupeType::ALL);
    assert_eq!(classify(&a, &other_source), DupeType::EXTERNAL | DupeType::ALL);
}

#[test]
fn classify_hash_only_when_names_differ() {
    let a = crc_rom("m", "x", CRC_A, 4, 0);
    let renamed = crc_rom("m", "y", CRC_A, 4, 0);
    let moved = crc_rom("n", "x", CRC_A, 4, 0);
    assert_eq!(classify(&a, &renamed), DupeType::INTERNAL | DupeType::HASH);
    assert_eq!(classify(&a, &moved), DupeType::INTERNAL | DupeType::HASH);
}

#[test]
fn classify_external_propagates_forward() {
    let mut a = crc_rom("m", "x", CRC_A, 4, 0);
    a.dupe = DupeType::EXTERNAL | DupeType::ALL;
    let same_source = crc_rom("m", "x", CRC_A, 4, 0);
    assert_eq!(classify(&a, &same_source), DupeType::EXTERNAL | DupeType::ALL);
}
