use super::*;
use crate::bucket::KeyKind;
use crate::engine::ReconcileOptions;
use crate::fixtures::*;
use datsmith_core::{DigestKind, DupeType};

const SHA1: &str = "0123456789abcdef0123456789abcdef01234567";

fn reconciler() -> Reconciler {
    Reconciler::default()
}

#[test]
fn merge_keeps_first_and_preserves_order() {
    let a = vec![
        crc_rom("pacman", "pacman.6e", "c1e6ab10", 4096, 0),
        crc_rom("pacman", "pacman.6f", "1a6fb2d4", 4096, 0),
    ];
    let b = vec![
        crc_rom("pacman", "pacman.6e", "c1e6ab10", 4096, 1),
        crc_rom("galaga", "gg1_1b.3p", "ab036c9f", 4096, 1),
    ];

    let merged = reconciler().merge(vec![a, b]);
    assert_eq!(names(&merged), vec!["pacman.6e", "pacman.6f", "gg1_1b.3p"]);
    assert_eq!(merged[0].source.index, 0);
    assert_eq!(merged[0].dupe, DupeType::EXTERNAL | DupeType::ALL);
    assert!(merged[1].dupe.is_empty());
    assert!(merged[2].dupe.is_empty());
}

#[test]
fn merge_fills_digests_from_dropped_duplicate() {
    let a = vec![crc_rom("m", "x", "deadbeef", 4, 0)];
    let b = vec![rom(
        "m",
        "x",
        digests(&[(DigestKind::Crc32, "deadbeef"), (DigestKind::Sha1, SHA1)]).with_size(4),
        1,
    )];

    let merged = reconciler().merge(vec![a, b]);
    assert_eq!(merged.len(), 1);
    let d = merged[0].digests().unwrap();
    assert_eq!(d.text(DigestKind::Sha1).as_deref(), Some(SHA1));
}

#[test]
fn crc_without_common_digest_survives() {
    // Same name and size, no algorithm in common: both are kept.
    let a = vec![crc_rom("m", "game.rom", "deadbeef", 1024, 0)];
    let b = vec![rom(
        "m",
        "game.rom",
        digests(&[(DigestKind::Md5, "11111111111111111111111111111111")]).with_size(1024),
        1,
    )];
    let merged = reconciler().merge(vec![a, b]);
    assert_eq!(merged.len(), 2);
    assert!(merged.iter().all(|r| r.dupe.is_empty()));
}

#[test]
fn nodump_disks_merge_by_name() {
    let merged = reconciler().merge(vec![
        vec![nodump_disk("m", "disk1", 0)],
        vec![nodump_disk("m", "disk1", 1)],
    ]);
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].dupe, DupeType::EXTERNAL | DupeType::ALL);
}

#[test]
fn internal_duplicate_under_other_name_is_hash() {
    let records = vec![
        crc_rom("m", "a.bin", "deadbeef", 4, 0),
        crc_rom("m", "b.bin", "deadbeef", 4, 0),
    ];
    let deduped = reconciler().dedup(records);
    assert_eq!(names(&deduped), vec!["a.bin"]);
    assert_eq!(deduped[0].dupe, DupeType::INTERNAL | DupeType::HASH);
}

#[test]
fn dedup_is_idempotent() {
    let records = vec![
        crc_rom("m", "a", "11111111", 4, 0),
        crc_rom("m", "b", "22222222", 4, 0),
        crc_rom("n", "a", "11111111", 4, 1),
        crc_rom("n", "c", "33333333", 4, 1),
    ];
    let once = reconciler().dedup(records);
    let twice = reconciler().dedup(once.clone());
    assert_eq!(once, twice);
}

#[test]
fn parallel_matches_sequential() {
    let records: Vec<_> = (0..200)
        .map(|i| {
            let crc = format!("{:08x}", i % 37);
            crc_rom("m", &format!("r{i}"), &crc, 4, i % 3)
        })
        .collect();
    let sequential = reconciler().dedup(records.clone());
    let parallel = Reconciler::new(ReconcileOptions::new().parallel(true)).dedup(records);
    assert_eq!(sequential, parallel);
    assert_eq!(sequential.len(), 37);
}

#[test]
fn machine_key_dedup() {
    let options = ReconcileOptions::new().key(KeyKind::Machine);
    let records = vec![
        crc_rom("Pacman", "a", "11111111", 4, 0),
        crc_rom("pacman", "a", "11111111", 4, 1),
    ];
    let insensitive = Reconciler::new(options).dedup(records.clone());
    assert_eq!(insensitive.len(), 1);

    let sensitive = Reconciler::new(options.case_sensitive(true)).dedup(records);
    assert_eq!(sensitive.len(), 2);
}

#[test]
fn diff_duplicates_and_complement() {
    let inputs = vec![
        vec![
            crc_rom("m", "shared", "11111111", 4, 0),
            crc_rom("m", "only_a", "22222222", 4, 0),
        ],
        vec![
            crc_rom("m", "shared", "11111111", 4, 1),
            crc_rom("m", "only_b", "33333333", 4, 1),
        ],
    ];
    let dupes = reconciler().diff_duplicates(inputs.clone());
    assert_eq!(names(&dupes), vec!["shared"]);

    let unique = reconciler().diff_no_duplicates(inputs);
    assert_eq!(names(&unique), vec!["only_a", "only_b"]);
}

#[test]
fn diff_individuals_splits_by_input() {
    let inputs = vec![
        vec![
            crc_rom("m", "shared", "11111111", 4, 0),
            crc_rom("m", "only_a", "22222222", 4, 0),
        ],
        vec![crc_rom("m", "shared", "11111111", 4, 1)],
        vec![crc_rom("m", "only_c", "33333333", 4, 2)],
    ];
    let outputs = reconciler().diff_individuals(inputs);
    assert_eq!(outputs.len(), 3);
    assert_eq!(names(&outputs[0]), vec!["only_a"]);
    assert!(outputs[1].is_empty());
    assert_eq!(names(&outputs[2]), vec!["only_c"]);
}
