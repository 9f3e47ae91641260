//! Logiqx XML (`<datafile>`) reading and writing.

use std::io::{BufRead, Write};

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::reader::Reader;

use datsmith_core::{
    BiosSet, DigestKind, DigestSet, Disk, DumpStatus, Item, ItemKind, Machine, MachineType, Media,
    Record, Release, Rom,
};

use crate::catalog::{Catalog, CatalogHeader};
use crate::error::DatError;

/// Attributes of one element, unescaped.
type Attrs = Vec<(String, String)>;

fn attr<'a>(attrs: &'a Attrs, key: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

fn read_attrs(e: &BytesStart<'_>) -> Result<Attrs, DatError> {
    let mut attrs = Vec::new();
    for a in e.attributes() {
        let a = a?;
        let key = String::from_utf8_lossy(a.key.as_ref()).to_string();
        let value = a.unescape_value()?.to_string();
        attrs.push((key, value));
    }
    Ok(attrs)
}

pub(crate) fn parse<R: BufRead>(reader: R) -> Result<Catalog, DatError> {
    let mut xml = Reader::from_reader(reader);
    xml.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut header = CatalogHeader::default();
    let mut records = Vec::new();

    let mut in_header = false;
    let mut current_tag = String::new();
    let mut current_machine: Option<Machine> = None;
    let mut saw_datafile = false;

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let tag_name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                match tag_name.as_str() {
                    "datafile" => saw_datafile = true,
                    "header" => in_header = true,
                    "game" | "machine" | "set" => {
                        current_machine = Some(machine_from_attrs(&read_attrs(e)?));
                    }
                    tag if item_kind(tag).is_some() => {
                        push_item(&mut records, current_machine.as_ref(), tag, &read_attrs(e)?);
                    }
                    _ => current_tag = tag_name,
                }
            }
            Event::Empty(ref e) => {
                let tag_name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if tag_name == "datafile" {
                    saw_datafile = true;
                } else if item_kind(&tag_name).is_some() {
                    push_item(&mut records, current_machine.as_ref(), &tag_name, &read_attrs(e)?);
                }
            }
            Event::Text(ref e) => {
                let text = e.unescape()?.to_string();
                if in_header {
                    match current_tag.as_str() {
                        "name" => header.name = text,
                        "description" => header.description = text,
                        "version" => header.version = text,
                        "author" => header.author = Some(text),
                        _ => {}
                    }
                } else if let Some(machine) = current_machine.as_mut() {
                    if current_tag == "description" {
                        machine.description = Some(text);
                    }
                }
            }
            Event::End(ref e) => {
                let tag_name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                match tag_name.as_str() {
                    "header" => in_header = false,
                    "game" | "machine" | "set" => current_machine = None,
                    _ => current_tag.clear(),
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !saw_datafile && header.name.is_empty() && records.is_empty() {
        return Err(DatError::invalid_dat(
            "No header or games found in XML DAT file",
        ));
    }

    Ok(Catalog::new(header, records))
}

fn item_kind(tag: &str) -> Option<ItemKind> {
    match tag {
        "rom" => Some(ItemKind::Rom),
        "disk" => Some(ItemKind::Disk),
        "media" => Some(ItemKind::Media),
        "sample" => Some(ItemKind::Sample),
        "archive" => Some(ItemKind::Archive),
        "biosset" => Some(ItemKind::BiosSet),
        "release" => Some(ItemKind::Release),
        _ => None,
    }
}

fn machine_from_attrs(attrs: &Attrs) -> Machine {
    let mut machine = Machine::new(attr(attrs, "name").unwrap_or_default());
    machine.clone_of = attr(attrs, "cloneof").map(str::to_string);
    machine.rom_of = attr(attrs, "romof").map(str::to_string);
    machine.sample_of = attr(attrs, "sampleof").map(str::to_string);
    machine.machine_type = if attr(attrs, "isbios") == Some("yes") {
        MachineType::Bios
    } else if attr(attrs, "isdevice") == Some("yes") {
        MachineType::Device
    } else if attr(attrs, "ismechanical") == Some("yes") {
        MachineType::Mechanical
    } else {
        MachineType::None
    };
    machine
}

/// Digests and size from item attributes. Malformed values are dropped
/// with a warning; the slot simply stays unknown.
fn digests_from_attrs(attrs: &Attrs, item_name: &str) -> DigestSet {
    let mut digests = DigestSet::new();
    if let Some(size) = attr(attrs, "size") {
        match size.trim().parse::<u64>() {
            Ok(size) => digests = digests.with_size(size),
            Err(_) => log::warn!("Ignoring invalid size '{size}' for '{item_name}'"),
        }
    }
    for kind in DigestKind::ALL {
        let Some(text) = attr(attrs, kind.attribute()).filter(|t| !t.trim().is_empty()) else {
            continue;
        };
        match kind.parse(text) {
            Ok(bytes) => digests = digests.with_digest(kind, bytes),
            Err(e) => log::warn!("Ignoring digest for '{item_name}': {e}"),
        }
    }
    digests
}

fn push_item(records: &mut Vec<Record>, machine: Option<&Machine>, tag: &str, attrs: &Attrs) {
    let Some(kind) = item_kind(tag) else {
        return;
    };
    let name = attr(attrs, "name").unwrap_or_default().to_string();
    let item = match kind {
        ItemKind::Rom => Item::Rom(Rom {
            digests: digests_from_attrs(attrs, &name),
            date: attr(attrs, "date").map(str::to_string),
            bios: attr(attrs, "bios").map(str::to_string),
        }),
        ItemKind::Disk => Item::Disk(Disk {
            digests: digests_from_attrs(attrs, &name),
            region: attr(attrs, "region").map(str::to_string),
        }),
        ItemKind::Media => Item::Media(Media {
            digests: digests_from_attrs(attrs, &name),
        }),
        ItemKind::Sample => Item::Sample,
        ItemKind::Archive => Item::Archive,
        ItemKind::BiosSet => Item::BiosSet(BiosSet {
            description: attr(attrs, "description").map(str::to_string),
            default: attr(attrs, "default") == Some("yes"),
        }),
        ItemKind::Release => Item::Release(Release {
            region: attr(attrs, "region").map(str::to_string),
            language: attr(attrs, "language").map(str::to_string),
        }),
    };

    let status = match attr(attrs, "status").map(str::parse::<DumpStatus>) {
        Some(Ok(status)) => status,
        Some(Err(e)) => {
            log::warn!("Ignoring status for '{name}': {e}");
            DumpStatus::None
        }
        None => DumpStatus::None,
    };

    let mut record = Record::new(name, item)
        .with_status(status)
        .with_machine(machine.cloned().unwrap_or_default());
    record.merge_tag = attr(attrs, "merge").map(str::to_string);
    records.push(record);
}

/// Write a catalog as Logiqx XML.
///
/// Consecutive records of the same machine share one `<machine>` element;
/// record order is preserved.
pub(crate) fn write<W: Write>(writer: W, catalog: &Catalog) -> Result<(), DatError> {
    let mut xml = Writer::new_with_indent(writer, b'\t', 1);
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    xml.write_event(Event::Start(BytesStart::new("datafile")))?;

    xml.write_event(Event::Start(BytesStart::new("header")))?;
    write_text_element(&mut xml, "name", &catalog.header.name)?;
    write_text_element(&mut xml, "description", &catalog.header.description)?;
    write_text_element(&mut xml, "version", &catalog.header.version)?;
    write_text_element(
        &mut xml,
        "date",
        &chrono::Local::now().format("%Y-%m-%d").to_string(),
    )?;
    if let Some(author) = &catalog.header.author {
        write_text_element(&mut xml, "author", author)?;
    }
    xml.write_event(Event::End(BytesEnd::new("header")))?;

    let mut open: Option<&Machine> = None;
    for record in &catalog.records {
        if open != Some(&record.machine) {
            if open.is_some() {
                xml.write_event(Event::End(BytesEnd::new("machine")))?;
            }
            write_machine_start(&mut xml, &record.machine)?;
            open = Some(&record.machine);
        }
        xml.write_event(Event::Empty(item_element(record)))?;
    }
    if open.is_some() {
        xml.write_event(Event::End(BytesEnd::new("machine")))?;
    }

    xml.write_event(Event::End(BytesEnd::new("datafile")))?;
    Ok(())
}

fn write_text_element<W: Write>(xml: &mut Writer<W>, tag: &str, text: &str) -> Result<(), DatError> {
    xml.write_event(Event::Start(BytesStart::new(tag)))?;
    xml.write_event(Event::Text(BytesText::new(text)))?;
    xml.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn write_machine_start<W: Write>(xml: &mut Writer<W>, machine: &Machine) -> Result<(), DatError> {
    let mut elem = BytesStart::new("machine");
    elem.push_attribute(("name", machine.display_name()));
    if let Some(parent) = &machine.clone_of {
        elem.push_attribute(("cloneof", parent.as_str()));
    }
    if let Some(parent) = &machine.rom_of {
        elem.push_attribute(("romof", parent.as_str()));
    }
    if let Some(parent) = &machine.sample_of {
        elem.push_attribute(("sampleof", parent.as_str()));
    }
    match machine.machine_type {
        MachineType::Bios => elem.push_attribute(("isbios", "yes")),
        MachineType::Device => elem.push_attribute(("isdevice", "yes")),
        MachineType::Mechanical => elem.push_attribute(("ismechanical", "yes")),
        MachineType::None => {}
    }
    xml.write_event(Event::Start(elem))?;
    let description = machine.description.as_deref().unwrap_or(machine.display_name());
    write_text_element(xml, "description", description)?;
    Ok(())
}

fn item_element(record: &Record) -> BytesStart<'static> {
    let mut elem = BytesStart::new(record.kind().tag());
    elem.push_attribute(("name", record.name.as_str()));

    match record.item() {
        Item::Rom(rom) => {
            if let Some(bios) = &rom.bios {
                elem.push_attribute(("bios", bios.as_str()));
            }
            if let Some(date) = &rom.date {
                elem.push_attribute(("date", date.as_str()));
            }
        }
        Item::Disk(disk) => {
            if let Some(region) = &disk.region {
                elem.push_attribute(("region", region.as_str()));
            }
        }
        Item::BiosSet(bios) => {
            if let Some(description) = &bios.description {
                elem.push_attribute(("description", description.as_str()));
            }
            if bios.default {
                elem.push_attribute(("default", "yes"));
            }
        }
        Item::Release(release) => {
            if let Some(region) = &release.region {
                elem.push_attribute(("region", region.as_str()));
            }
            if let Some(language) = &release.language {
                elem.push_attribute(("language", language.as_str()));
            }
        }
        Item::Media(_) | Item::Sample | Item::Archive => {}
    }

    if let Some(digests) = record.digests() {
        if let Some(size) = digests.size() {
            elem.push_attribute(("size", size.to_string().as_str()));
        }
        for kind in digests.populated() {
            if let Some(text) = digests.text(kind) {
                elem.push_attribute((kind.attribute(), text.as_str()));
            }
        }
    }

    if let Some(merge) = &record.merge_tag {
        elem.push_attribute(("merge", merge.as_str()));
    }
    if !matches!(record.status, DumpStatus::None | DumpStatus::Good) {
        elem.push_attribute(("status", record.status.as_str()));
    }
    elem
}

#[cfg(test)]
#[path = "tests/logiqx_tests.rs"]
mod tests;
