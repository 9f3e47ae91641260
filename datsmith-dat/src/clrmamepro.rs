//! ClrMamePro text catalog reading.
//!
//! Format:
//! ```text
//! clrmamepro (
//!     name "System Name"
//!     version 20240101-000000
//! )
//!
//! game (
//!     name "Game Name (Region)"
//!     cloneof "Parent"
//!     rom ( name "Game Name (Region).ext" size 12345 crc AABBCCDD sha1 ... )
//!     disk ( name "disc" sha1 ... )
//!     sample "boom.wav"
//! )
//! ```

use std::io::BufRead;

use datsmith_core::{DigestKind, DigestSet, DumpStatus, Item, Machine, Record};

use crate::catalog::{Catalog, CatalogHeader};
use crate::error::DatError;

pub(crate) fn parse<R: BufRead>(reader: R) -> Result<Catalog, DatError> {
    let mut header = CatalogHeader::default();
    let mut records: Vec<Record> = Vec::new();

    let mut in_block: Option<String> = None;
    let mut machine = Machine::default();
    // Items are buffered until the block closes so that machine fields
    // appearing after them still apply.
    let mut pending: Vec<Record> = Vec::new();

    for line_result in reader.lines() {
        let line = line_result?;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }

        let Some(block_type) = in_block.as_deref() else {
            if let Some(block_type) = detect_block_start(trimmed) {
                machine = Machine::default();
                in_block = Some(block_type);
            }
            continue;
        };

        if trimmed == ")" {
            for mut record in pending.drain(..) {
                record.machine = machine.clone();
                records.push(record);
            }
            in_block = None;
            continue;
        }

        let Some((key, value)) = parse_kv(trimmed) else {
            continue;
        };
        match block_type {
            "clrmamepro" => match key.as_str() {
                "name" => header.name = value,
                "description" => header.description = value,
                "version" => header.version = value,
                "author" => header.author = Some(value),
                _ => {}
            },
            "game" | "machine" | "resource" => match key.as_str() {
                "name" => machine.name = value,
                "description" => machine.description = Some(value),
                "cloneof" => machine.clone_of = Some(value),
                "romof" => machine.rom_of = Some(value),
                "sampleof" => machine.sample_of = Some(value),
                "rom" | "disk" | "media" => {
                    if let Some(record) = parse_item_inline(&key, &value) {
                        pending.push(record);
                    }
                }
                "sample" => pending.push(Record::new(value, Item::Sample)),
                "archive" => pending.push(Record::new(value, Item::Archive)),
                _ => {}
            },
            _ => {}
        }
    }

    if header.name.is_empty() && records.is_empty() {
        return Err(DatError::invalid_dat(
            "No header or games found in ClrMamePro DAT file",
        ));
    }

    Ok(Catalog::new(header, records))
}

/// Detect a block start like `clrmamepro (` or `game (`.
fn detect_block_start(line: &str) -> Option<String> {
    let stripped = line.trim_end();
    if let Some(head) = stripped.strip_suffix('(') {
        let block_type = head.trim();
        if !block_type.is_empty() && block_type.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return Some(block_type.to_lowercase());
        }
    }
    None
}

/// Parse a key-value line like `name "Some Value"` or `version 20240101`.
/// For `rom ( ... )` style lines, the value is the content inside the parens.
fn parse_kv(line: &str) -> Option<(String, String)> {
    let trimmed = line.trim();

    for item in ["rom", "disk", "media"] {
        if let Some(rest) = trimmed.strip_prefix(item) {
            let rest = rest.trim();
            if rest.starts_with('(') && rest.ends_with(')') && rest.len() >= 2 {
                let inner = rest[1..rest.len() - 1].trim();
                return Some((item.to_string(), inner.to_string()));
            }
        }
    }

    let mut parts = trimmed.splitn(2, |c: char| c.is_ascii_whitespace());
    let key = parts.next()?.trim().to_string();
    let raw_value = parts.next()?.trim();

    let value = if raw_value.starts_with('"') && raw_value.ends_with('"') && raw_value.len() >= 2 {
        raw_value[1..raw_value.len() - 1].to_string()
    } else {
        raw_value.to_string()
    };

    Some((key, value))
}

/// Parse an inline item entry like:
/// `name "Game (Region).ext" size 12345 crc AABBCCDD md5 ... sha1 ...`
fn parse_item_inline(kind: &str, inner: &str) -> Option<Record> {
    let tokens = tokenize_item_line(inner);
    let mut name = String::new();
    let mut digests = DigestSet::new();
    let mut status = DumpStatus::None;
    let mut merge = None;

    let mut pairs = tokens.iter();
    while let Some(key) = pairs.next() {
        let key = key.as_str();
        if key == "nodump" || key == "baddump" {
            // Bare flags appear in some DATs without a `flags` keyword.
            status = key.parse().unwrap_or(DumpStatus::None);
            continue;
        }
        let Some(value) = pairs.next() else {
            break;
        };
        match key {
            "name" => name = value.clone(),
            "size" => match value.parse::<u64>() {
                Ok(size) => digests = digests.with_size(size),
                Err(_) => log::warn!("Ignoring invalid size '{value}' in ClrMamePro entry"),
            },
            "merge" => merge = Some(value.clone()),
            "flags" | "status" => match value.parse::<DumpStatus>() {
                Ok(s) => status = s,
                Err(e) => log::warn!("Ignoring status in ClrMamePro entry: {e}"),
            },
            other => {
                if let Ok(digest_kind) = other.parse::<DigestKind>() {
                    match digest_kind.parse(value) {
                        Ok(bytes) => digests = digests.with_digest(digest_kind, bytes),
                        Err(e) => log::warn!("Ignoring digest for '{name}': {e}"),
                    }
                }
            }
        }
    }

    if name.is_empty() {
        return None;
    }

    let mut record = match kind {
        "disk" => Record::disk(name, digests),
        "media" => Record::media(name, digests),
        _ => Record::rom(name, digests),
    }
    .with_status(status);
    record.merge_tag = merge;
    Some(record)
}

/// Tokenize an item line, respecting quoted strings.
/// `name "Game (Region).ext" size 12345 crc AB` → ["name", "Game (Region).ext", "size", "12345", "crc", "AB"]
fn tokenize_item_line(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    loop {
        while chars.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            chars.next();
        }

        let Some(&first) = chars.peek() else {
            break;
        };

        let mut token = String::new();
        if first == '"' {
            chars.next();
            for c in chars.by_ref() {
                if c == '"' {
                    break;
                }
                token.push(c);
            }
        } else {
            while let Some(&c) = chars.peek() {
                if c.is_ascii_whitespace() {
                    break;
                }
                token.push(c);
                chars.next();
            }
        }
        tokens.push(token);
    }

    tokens
}

#[cfg(test)]
#[path = "tests/clrmamepro_tests.rs"]
mod tests;
