//! Project data model types: camelCase JSON matching the web editor's
//! `ProjectData` shape.

use rb_common::{EditorConfig, EditorElement, Resolution, TimeMs};
use serde::{Deserialize, Serialize};

/// Project format version written by this crate.
pub const CURRENT_VERSION: u32 = 1;

fn default_version() -> u32 {
    CURRENT_VERSION
}

/// A complete project: identity, settings and the element list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectData {
    /// Format version. Files written before versioning default to 1.
    #[serde(default = "default_version")]
    pub version: u32,
    /// Unique project identifier (`project_<uuid>`).
    pub id: String,
    /// Human-readable project name.
    pub name: String,
    /// Ordered elements; later elements draw on top.
    #[serde(default)]
    pub elements: Vec<EditorElement>,
    pub settings: ProjectSettings,
}

impl ProjectData {
    /// Create a new empty project with a fresh id.
    pub fn new(name: impl Into<String>, settings: ProjectSettings) -> Self {
        Self {
            version: CURRENT_VERSION,
            id: generate_project_id(),
            name: name.into(),
            elements: Vec::new(),
            settings,
        }
    }

    /// Number of elements whose time frame ends after the project duration.
    pub fn elements_past_end(&self) -> usize {
        self.elements
            .iter()
            .filter(|e| e.time_frame.end > self.settings.duration)
            .count()
    }
}

/// Canvas and timeline settings of a project.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSettings {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Background color (CSS hex string, e.g. "#000000").
    pub background_color: String,
    /// Timeline duration.
    pub duration: TimeMs,
    pub fps: u32,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

impl ProjectSettings {
    /// Settings of a fresh project under `config`.
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            width: config.canvas.width,
            height: config.canvas.height,
            background_color: config.background_color.clone(),
            duration: TimeMs(config.initial_max_time_ms),
            fps: config.fps,
        }
    }

    pub fn resolution(&self) -> Resolution {
        Resolution::new(self.width, self.height)
    }

    /// Apply the non-`None` overrides on top of these settings.
    pub fn with_overrides(mut self, overrides: ProjectSettingsOverrides) -> Self {
        if let Some(width) = overrides.width {
            self.width = width;
        }
        if let Some(height) = overrides.height {
            self.height = height;
        }
        if let Some(color) = overrides.background_color {
            self.background_color = color;
        }
        if let Some(duration) = overrides.duration {
            self.duration = duration;
        }
        if let Some(fps) = overrides.fps {
            self.fps = fps;
        }
        self
    }
}

/// Optional settings for `create_project`; unset fields use the defaults.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectSettingsOverrides {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub background_color: Option<String>,
    pub duration: Option<TimeMs>,
    pub fps: Option<u32>,
}

fn generate_project_id() -> String {
    format!("project_{}", uuid::Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rb_common::{ElementKind, TextProperties, TimeFrame};

    #[test]
    fn new_project_has_unique_id_and_defaults() {
        let a = ProjectData::new("A", ProjectSettings::default());
        let b = ProjectData::new("B", ProjectSettings::default());
        assert!(a.id.starts_with("project_"));
        assert_ne!(a.id, b.id);
        assert_eq!(a.version, CURRENT_VERSION);
        assert!(a.elements.is_empty());
        assert_eq!(a.settings.width, 1920);
        assert_eq!(a.settings.height, 1080);
        assert_eq!(a.settings.duration, TimeMs(30_000));
        assert_eq!(a.settings.fps, 60);
        assert_eq!(a.settings.background_color, "#000000");
    }

    #[test]
    fn overrides_replace_only_given_fields() {
        let settings = ProjectSettings::default().with_overrides(ProjectSettingsOverrides {
            width: Some(1080),
            height: Some(1920),
            fps: Some(30),
            ..Default::default()
        });
        assert_eq!(settings.resolution(), Resolution::new(1080, 1920));
        assert_eq!(settings.fps, 30);
        assert_eq!(settings.duration, TimeMs(30_000));
    }

    #[test]
    fn settings_follow_config() {
        let config = EditorConfig {
            fps: 24,
            initial_max_time_ms: 5_000,
            ..EditorConfig::default()
        };
        let settings = ProjectSettings::from_config(&config);
        assert_eq!(settings.fps, 24);
        assert_eq!(settings.duration, TimeMs(5_000));
    }

    #[test]
    fn json_uses_camel_case() {
        let project = ProjectData::new("Json", ProjectSettings::default());
        let value = serde_json::to_value(&project).unwrap();
        assert_eq!(value["settings"]["backgroundColor"], "#000000");
        assert_eq!(value["settings"]["duration"], 30_000);
    }

    #[test]
    fn elements_past_end_counts_overhang() {
        let mut project = ProjectData::new("Overhang", ProjectSettings::default());
        for (id, end) in [("a", 1_000), ("b", 31_000)] {
            project.elements.push(EditorElement::new(
                id,
                id,
                TimeFrame::from_millis(0, end).unwrap(),
                ElementKind::Text(TextProperties::default()),
            ));
        }
        assert_eq!(project.elements_past_end(), 1);
    }
}
