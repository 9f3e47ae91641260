// Property-based tests for the duplicate relation and the merge.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use proptest::prelude::*;

use datsmith_core::{DigestKind, DigestSet, DumpStatus, Machine, Record, Source};
use datsmith_dat::{KeyKind, ReconcileOptions, Reconciler, fill_missing, is_duplicate};

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// A digest slot drawn from a tiny alphabet so collisions are common.
fn arb_slot(kind: DigestKind) -> impl Strategy<Value = Option<Vec<u8>>> {
    let len = kind.byte_len().unwrap_or(4);
    prop::option::weighted(0.6, (0u8..3).prop_map(move |b| vec![b; len]))
}

fn arb_digests() -> impl Strategy<Value = DigestSet> {
    (
        arb_slot(DigestKind::Crc32),
        arb_slot(DigestKind::Md5),
        arb_slot(DigestKind::Sha1),
        prop::option::of(0u64..3),
    )
        .prop_map(|(crc, md5, sha1, size)| {
            let mut set = DigestSet::new();
            for (kind, slot) in [
                (DigestKind::Crc32, crc),
                (DigestKind::Md5, md5),
                (DigestKind::Sha1, sha1),
            ] {
                if let Some(bytes) = slot {
                    set = set.with_digest(kind, bytes);
                }
            }
            if let Some(size) = size {
                set = set.with_size(size);
            }
            set
        })
}

fn arb_record() -> impl Strategy<Value = Record> {
    (
        arb_digests(),
        0usize..3,
        prop::sample::select(vec!["a", "b"]),
        prop::sample::select(vec!["m", "n"]),
        prop::bool::weighted(0.1),
        prop::bool::weighted(0.2),
    )
        .prop_map(|(digests, source, name, machine, nodump, disk)| {
            let record = if disk {
                Record::disk(name, digests)
            } else {
                Record::rom(name, digests)
            };
            let record = record
                .with_machine(Machine::new(machine))
                .with_source(Source::new(source));
            if nodump {
                record.with_status(DumpStatus::NoDump)
            } else {
                record
            }
        })
}

fn arb_inputs() -> impl Strategy<Value = Vec<Vec<Record>>> {
    prop::collection::vec(prop::collection::vec(arb_record(), 0..12), 1..4).prop_map(|inputs| {
        inputs
            .into_iter()
            .enumerate()
            .map(|(i, input)| {
                input
                    .into_iter()
                    .map(|r| r.with_source(Source::new(i)))
                    .collect()
            })
            .collect()
    })
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config())]

    #[test]
    fn duplicate_relation_is_symmetric(a in arb_record(), b in arb_record()) {
        prop_assert_eq!(is_duplicate(&a, &b), is_duplicate(&b, &a));
    }

    #[test]
    fn fill_never_overwrites(mut target in arb_record(), source in arb_record()) {
        let before = target.digests().cloned();
        fill_missing(&mut target, &source);
        if let (Some(before), Some(after)) = (before, target.digests()) {
            for kind in before.populated() {
                prop_assert_eq!(before.get(kind), after.get(kind));
            }
            if before.size().is_some() {
                prop_assert_eq!(before.size(), after.size());
            }
        }
    }

    #[test]
    fn merge_never_grows_and_keeps_order(inputs in arb_inputs()) {
        let total: usize = inputs.iter().map(Vec::len).sum();
        let merged = Reconciler::default().merge(inputs);
        prop_assert!(merged.len() <= total);
        let sources: Vec<usize> = merged.iter().map(|r| r.source.index).collect();
        let mut sorted = sources.clone();
        sorted.sort();
        prop_assert_eq!(sources, sorted);
    }

    #[test]
    fn merge_output_has_no_duplicate_pairs(inputs in arb_inputs()) {
        let merged = Reconciler::default().merge(inputs);
        for (i, a) in merged.iter().enumerate() {
            for b in &merged[i + 1..] {
                // Records in different buckets are never compared.
                let same_bucket = datsmith_dat::bucket_key(a, KeyKind::Digest(DigestKind::Crc32), false, false)
                    == datsmith_dat::bucket_key(b, KeyKind::Digest(DigestKind::Crc32), false, false);
                prop_assert!(!(same_bucket && is_duplicate(a, b)));
            }
        }
    }

    #[test]
    fn dedup_is_idempotent(inputs in arb_inputs()) {
        let reconciler = Reconciler::default();
        let once = reconciler.merge(inputs);
        let twice = reconciler.dedup(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn parallel_equals_sequential(inputs in arb_inputs()) {
        let sequential = Reconciler::default().merge(inputs.clone());
        let parallel = Reconciler::new(ReconcileOptions::new().parallel(true)).merge(inputs);
        prop_assert_eq!(sequential, parallel);
    }

    #[test]
    fn cascade_first_output_is_first_input(inputs in arb_inputs()) {
        let outputs = Reconciler::default().diff_cascade(&inputs);
        prop_assert_eq!(outputs.len(), inputs.len());
        prop_assert_eq!(&outputs[0], &inputs[0]);
        for (output, input) in outputs.iter().zip(&inputs) {
            prop_assert!(output.len() <= input.len());
        }
    }
}
