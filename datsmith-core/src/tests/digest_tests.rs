use super::*;

#[test]
fn sentinels_are_empty_content_digests() {
    assert_eq!(DigestKind::Crc32.sentinel_text(), "00000000");
    assert_eq!(
        DigestKind::Md5.sentinel_text(),
        "d41d8cd98f00b204e9800998ecf8427e"
    );
    assert_eq!(
        DigestKind::Sha1.sentinel_text(),
        "da39a3ee5e6b4b0d3255bfef95601890afd80709"
    );
    assert_eq!(
        DigestKind::Sha256.sentinel_text(),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
    assert_eq!(DigestKind::SpamSum.sentinel_text(), "3::");
}

#[test]
fn sentinel_lengths_match_algorithm_width() {
    for kind in DigestKind::ALL {
        if let Some(len) = kind.byte_len() {
            assert_eq!(kind.sentinel().len(), len, "{kind}");
        }
    }
}

#[test]
fn parse_is_case_insensitive() {
    let upper = DigestKind::Crc32.parse("DEADBEEF").unwrap();
    let lower = DigestKind::Crc32.parse("deadbeef").unwrap();
    assert_eq!(upper, lower);
    assert_eq!(upper, vec![0xde, 0xad, 0xbe, 0xef]);
}

#[test]
fn parse_pads_short_crc() {
    let bytes = DigestKind::Crc32.parse("abcdef").unwrap();
    assert_eq!(bytes, vec![0x00, 0xab, 0xcd, 0xef]);
}

#[test]
fn parse_rejects_bad_text() {
    assert!(matches!(
        DigestKind::Md5.parse("not-hex"),
        Err(DigestError::InvalidHex { .. })
    ));
    assert!(matches!(
        DigestKind::Crc32.parse("0123456789"),
        Err(DigestError::TooLong { expected: 8, actual: 10, .. })
    ));
}

#[test]
fn spamsum_is_kept_verbatim() {
    let text = "96:abcDEF+/:xyz";
    let set = DigestSet::new().with_hex(DigestKind::SpamSum, text).unwrap();
    assert_eq!(set.text(DigestKind::SpamSum).as_deref(), Some(text));
}

#[test]
fn kind_names_parse() {
    assert_eq!("crc".parse::<DigestKind>().unwrap(), DigestKind::Crc32);
    assert_eq!("SHA-256".parse::<DigestKind>().unwrap(), DigestKind::Sha256);
    assert_eq!("ssdeep".parse::<DigestKind>().unwrap(), DigestKind::SpamSum);
    assert!("whirlpool".parse::<DigestKind>().is_err());
}

#[test]
fn empty_set_has_no_digest() {
    let set = DigestSet::new().with_size(1024);
    assert!(!set.has_any_digest());
    assert!(!set.has_zero_digest());
    assert_eq!(set.populated_count(), 0);
    assert_eq!(set.size(), Some(1024));
}

#[test]
fn zero_digest_detection() {
    let set = DigestSet::new()
        .with_hex(DigestKind::Crc32, "00000000")
        .unwrap()
        .with_hex(DigestKind::Sha1, "0123456789abcdef0123456789abcdef01234567")
        .unwrap();
    assert!(set.has_zero_digest());

    let real = DigestSet::new().with_hex(DigestKind::Crc32, "deadbeef").unwrap();
    assert!(!real.has_zero_digest());
}

#[test]
fn common_kinds_is_intersection() {
    let a = DigestSet::new()
        .with_digest(DigestKind::Crc32, vec![1, 2, 3, 4])
        .with_digest(DigestKind::Md5, vec![0; 16]);
    let b = DigestSet::new()
        .with_digest(DigestKind::Md5, vec![1; 16])
        .with_digest(DigestKind::Sha1, vec![0; 20]);
    let common: Vec<_> = a.common_kinds(&b).collect();
    assert_eq!(common, vec![DigestKind::Md5]);
}

#[test]
fn insert_if_missing_never_overwrites() {
    let mut set = DigestSet::new().with_digest(DigestKind::Crc32, vec![1, 2, 3, 4]);
    assert!(!set.insert_if_missing(DigestKind::Crc32, &[9, 9, 9, 9]));
    assert_eq!(set.get(DigestKind::Crc32), Some(&[1u8, 2, 3, 4][..]));

    assert!(set.insert_if_missing(DigestKind::Md5, &[7; 16]));
    assert_eq!(set.populated_count(), 2);

    assert!(set.insert_size_if_missing(10));
    assert!(!set.insert_size_if_missing(20));
    assert_eq!(set.size(), Some(10));
}

#[test]
fn serde_uses_text_digests() {
    let set = DigestSet::new()
        .with_size(4)
        .with_hex(DigestKind::Crc32, "DEADBEEF")
        .unwrap();
    let json = serde_json::to_string(&set).unwrap();
    assert_eq!(json, r#"{"size":4,"crc32":"deadbeef"}"#);

    let back: DigestSet = serde_json::from_str(&json).unwrap();
    assert_eq!(back, set);

    let bad = serde_json::from_str::<DigestSet>(r#"{"md5":"zz"}"#);
    assert!(bad.is_err());
}
