use super::*;
use crate::fixtures::*;
use datsmith_core::{DigestSet, Item, Machine};

#[test]
fn extension_split() {
    let records = vec![
        crc_rom("m", "a.BIN", "11111111", 1, 0),
        crc_rom("m", "b.cue", "22222222", 1, 0),
        crc_rom("m", "c.txt", "33333333", 1, 0),
        crc_rom("m", "noext", "44444444", 1, 0),
    ];
    let split = split_by_extension(records, &[".bin".to_string()], &["CUE".to_string()]);
    assert_eq!(names(&split.a), vec!["a.BIN"]);
    assert_eq!(names(&split.b), vec!["b.cue"]);
    assert_eq!(names(&split.rest), vec!["c.txt", "noext"]);
}

#[test]
fn extension_in_both_lists_goes_to_first() {
    let records = vec![crc_rom("m", "a.bin", "11111111", 1, 0)];
    let bin = vec!["bin".to_string()];
    let split = split_by_extension(records, &bin, &bin);
    assert_eq!(split.a.len(), 1);
    assert!(split.b.is_empty());
}

#[test]
fn hash_tiers() {
    let sha1 = "0123456789abcdef0123456789abcdef01234567";
    let records = vec![
        crc_rom("m", "crc", "11111111", 1, 0),
        rom(
            "m",
            "sha1",
            digests(&[(DigestKind::Crc32, "11111111"), (DigestKind::Sha1, sha1)]),
            0,
        ),
        nodump_disk("m", "nodump", 0),
        rom("m", "bare", DigestSet::new(), 0),
        Record::new("sample", Item::Sample),
    ];
    let tiers = split_by_hash(records);
    assert_eq!(names(&tiers[&HashTier::Crc]), vec!["crc"]);
    assert_eq!(names(&tiers[&HashTier::Sha1]), vec!["sha1"]);
    assert_eq!(names(&tiers[&HashTier::NoDump]), vec!["nodump"]);
    assert_eq!(names(&tiers[&HashTier::None]), vec!["bare", "sample"]);
    assert!(!tiers.contains_key(&HashTier::Md5));
    assert_eq!(HashTier::None.to_string(), "nohash");
}

#[test]
fn level_split() {
    let records = vec![
        crc_rom("Arcade/Capcom/sf2", "a", "11111111", 1, 0),
        crc_rom("Arcade/Capcom/ffight", "b", "22222222", 1, 0),
        crc_rom("pacman", "c", "33333333", 1, 0),
    ];
    let levels = split_by_level(records.clone(), false);
    assert_eq!(levels.len(), 2);
    assert_eq!(levels["Arcade/Capcom"][0].machine.name, "Arcade/Capcom/sf2");
    assert_eq!(names(&levels[""]), vec!["c"]);

    let short = split_by_level(records, true);
    assert_eq!(short["Arcade/Capcom"][1].machine.name, "ffight");
}

#[test]
fn kind_split() {
    let records = vec![
        crc_rom("m", "a", "11111111", 1, 0),
        nodump_disk("m", "d", 0),
        Record::new("s", Item::Sample).with_machine(Machine::new("m")),
    ];
    let split = split_by_kind(records);
    assert_eq!(names(&split.roms), vec!["a"]);
    assert_eq!(names(&split.disks), vec!["d"]);
    assert_eq!(names(&split.other), vec!["s"]);
}

#[test]
fn size_split() {
    let records = vec![
        crc_rom("m", "small", "11111111", 10, 0),
        crc_rom("m", "edge", "22222222", 100, 0),
        crc_rom("m", "big", "33333333", 1000, 0),
        rom("m", "unknown", DigestSet::new(), 0),
    ];
    let split = split_by_size(records, 100);
    assert_eq!(names(&split.below), vec!["small", "unknown"]);
    assert_eq!(names(&split.at_or_above), vec!["edge", "big"]);
}
