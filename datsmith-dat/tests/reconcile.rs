use datsmith_core::{DigestKind, DupeType};
use datsmith_dat::{
    CatalogFormat, KeyKind, ReconcileOptions, Reconciler, load_catalog, save_catalog,
    select_key_kind,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_dat(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

const NO_INTRO: &str = r#"<?xml version="1.0"?>
<datafile>
	<header><name>Nintendo - Game Boy</name></header>
	<game name="Tetris (World)">
		<description>Tetris (World)</description>
		<rom name="Tetris (World).gb" size="32768" crc="46df91ad" sha1="74591cc9501af93873f9a5d3eb12da12c0723bbc"/>
	</game>
	<game name="Alleyway (World)">
		<description>Alleyway (World)</description>
		<rom name="Alleyway (World).gb" size="32768" crc="d9e33ef5"/>
	</game>
</datafile>
"#;

const REDUMP_STYLE: &str = r#"clrmamepro (
	name "Game Boy (Other)"
)

game (
	name "Tetris"
	rom ( name "tetris.gb" size 32768 crc 46DF91AD md5 084f1e457749cdec86183189bd88ce69 )
)

game (
	name "Kirby's Dream Land"
	rom ( name "kirby.gb" size 262144 crc 0b9d5a1e )
)
"#;

#[test]
fn merge_across_dialects() {
    let tmp = TempDir::new().unwrap();
    let a = load_catalog(&write_dat(tmp.path(), "a.dat", NO_INTRO), 0).unwrap();
    let b = load_catalog(&write_dat(tmp.path(), "b.dat", REDUMP_STYLE), 1).unwrap();

    let inputs = vec![a.records, b.records];
    assert_eq!(select_key_kind(&inputs), KeyKind::Digest(DigestKind::Crc32));

    let merged = Reconciler::default().merge(inputs);
    let names: Vec<&str> = merged.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Tetris (World).gb", "Alleyway (World).gb", "kirby.gb"]);

    let tetris = &merged[0];
    assert_eq!(tetris.source.name.as_deref(), Some("a.dat"));
    assert_eq!(tetris.dupe, DupeType::EXTERNAL | DupeType::HASH);
    let digests = tetris.digests().unwrap();
    assert!(digests.has(DigestKind::Md5), "md5 filled from the dropped copy");
    assert!(digests.has(DigestKind::Sha1));
}

#[test]
fn cascade_then_save() {
    let tmp = TempDir::new().unwrap();
    let a = load_catalog(&write_dat(tmp.path(), "a.dat", NO_INTRO), 0).unwrap();
    let b = load_catalog(&write_dat(tmp.path(), "b.dat", REDUMP_STYLE), 1).unwrap();

    let reconciler = Reconciler::new(ReconcileOptions::new().parallel(true));
    let outputs = reconciler.diff_cascade(&[a.records, b.records]);
    assert_eq!(outputs[0].len(), 2);
    assert_eq!(outputs[1].len(), 1);
    assert_eq!(outputs[1][0].name, "kirby.gb");

    let out_path = tmp.path().join("out").join("b.json");
    let catalog = datsmith_dat::Catalog::new(b.header, outputs[1].clone());
    save_catalog(&out_path, &catalog, CatalogFormat::Json).unwrap();

    let reloaded = load_catalog(&out_path, 5).unwrap();
    assert_eq!(reloaded.header.name, "Game Boy (Other)");
    assert_eq!(reloaded.records.len(), 1);
    assert_eq!(reloaded.records[0].machine.name, "Kirby's Dream Land");
}

#[test]
fn missing_file_is_an_error() {
    let tmp = TempDir::new().unwrap();
    assert!(load_catalog(&tmp.path().join("nope.dat"), 0).is_err());
}
