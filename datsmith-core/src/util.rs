/// Format a byte count with fractional units (e.g., "1.5 KB", "2.3 GB").
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Lowercased extension of an item name, without the dot.
///
/// Only the final path component is considered, so `dir.v2/file` has no
/// extension. Names ending in a dot, and dotfiles, have none either.
pub fn file_extension(name: &str) -> Option<String> {
    let file = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let (stem, ext) = file.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

/// Split a hierarchical machine name into its directory part and leaf.
///
/// `"Arcade/Capcom/sf2"` gives `("Arcade/Capcom", "sf2")`; names without a
/// separator live at the root (`""`). Backslashes count as separators.
pub fn split_level(name: &str) -> (String, &str) {
    match name.rfind(['/', '\\']) {
        Some(pos) => (name[..pos].replace('\\', "/"), &name[pos + 1..]),
        None => (String::new(), name),
    }
}
