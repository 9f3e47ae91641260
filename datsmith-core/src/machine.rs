use serde::{Deserialize, Serialize};

/// Name rendered for machines that carry no name of their own.
pub const DEFAULT_MACHINE_NAME: &str = "Default";

/// Special roles a machine can have in an arcade-style catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MachineType {
    #[default]
    None,
    Bios,
    Device,
    Mechanical,
}

/// The set (game, BIOS, device) a record belongs to.
///
/// Each record owns its own copy; changing one record's machine never
/// affects another record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Machine {
    /// Set name. Empty means "no name given".
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clone_of: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rom_of: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_of: Option<String>,
    #[serde(default)]
    pub machine_type: MachineType,
}

impl Machine {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_clone_of(mut self, parent: impl Into<String>) -> Self {
        self.clone_of = Some(parent.into());
        self
    }

    pub fn with_rom_of(mut self, parent: impl Into<String>) -> Self {
        self.rom_of = Some(parent.into());
        self
    }

    pub fn with_sample_of(mut self, parent: impl Into<String>) -> Self {
        self.sample_of = Some(parent.into());
        self
    }

    pub fn with_type(mut self, machine_type: MachineType) -> Self {
        self.machine_type = machine_type;
        self
    }

    /// Name used for keys and output; falls back to [`DEFAULT_MACHINE_NAME`].
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            DEFAULT_MACHINE_NAME
        } else {
            &self.name
        }
    }
}
