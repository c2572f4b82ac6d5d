use crate::helpers::sanitizer::clip_chars;
use serde::Deserialize;

pub const MAX_PROJECT_NAME_CHARS: usize = 100;
pub const DEFAULT_ICON: &str = "Folder";
pub const DEFAULT_COLOR: &str = "#feba01";

pub const ALLOWED_ICONS: [&str; 8] = [
    "Folder",
    "Star",
    "Briefcase",
    "Code",
    "BookOpen",
    "Globe",
    "Layers",
    "Zap",
];

fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateForm {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

impl CreateForm {
    pub fn cleaned_name(&self) -> Option<String> {
        cleaned_name(self.name.as_deref())
    }

    /// Unknown icons fall back to the default rather than erroring.
    pub fn cleaned_icon(&self) -> String {
        match self.icon.as_deref() {
            Some(icon) if ALLOWED_ICONS.contains(&icon) => icon.to_string(),
            _ => DEFAULT_ICON.to_string(),
        }
    }

    pub fn cleaned_color(&self) -> String {
        match self.color.as_deref() {
            Some(color) if is_hex_color(color) => color.to_string(),
            _ => DEFAULT_COLOR.to_string(),
        }
    }
}

/// Partial update. Fields that are absent, blank or invalid are left
/// untouched on the stored project.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateForm {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

impl UpdateForm {
    pub fn cleaned_name(&self) -> Option<String> {
        cleaned_name(self.name.as_deref())
    }

    pub fn cleaned_icon(&self) -> Option<String> {
        self.icon
            .as_deref()
            .filter(|icon| ALLOWED_ICONS.contains(icon))
            .map(str::to_string)
    }

    pub fn cleaned_color(&self) -> Option<String> {
        self.color
            .as_deref()
            .filter(|color| is_hex_color(color))
            .map(str::to_string)
    }

    pub fn is_empty(&self) -> bool {
        self.cleaned_name().is_none()
            && self.cleaned_icon().is_none()
            && self.cleaned_color().is_none()
    }
}

fn cleaned_name(name: Option<&str>) -> Option<String> {
    name.map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| clip_chars(name, MAX_PROJECT_NAME_CHARS))
}
