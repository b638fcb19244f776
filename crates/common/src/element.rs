//! Editor elements: placed, time-bounded media and text layers.

use serde::{Deserialize, Serialize};

use crate::effect::ColorEffect;
use crate::error::{EditorError, EditorResult};
use crate::types::{ElementId, RenderHandle, TimeMs};

/// Position, size, rotation and scale of an element on the canvas.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    /// Position in project pixels (from canvas top-left).
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Rotation in degrees.
    pub rotation: f32,
    /// Scale factors (1.0 = original size).
    pub scale_x: f32,
    pub scale_y: f32,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }
}

impl Placement {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            ..Self::default()
        }
    }

    /// Copy of this placement moved by `(dx, dy)`.
    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    pub fn rotation_radians(&self) -> f32 {
        self.rotation.to_radians()
    }
}

/// Visibility window of an element on the timeline, inclusive at both ends.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeFrame {
    pub start: TimeMs,
    pub end: TimeMs,
}

impl TimeFrame {
    /// Create a time frame, rejecting `start > end`.
    pub fn new(start: TimeMs, end: TimeMs) -> EditorResult<Self> {
        let frame = Self { start, end };
        frame.validate()?;
        Ok(frame)
    }

    pub fn from_millis(start: u64, end: u64) -> EditorResult<Self> {
        Self::new(TimeMs(start), TimeMs(end))
    }

    pub fn validate(&self) -> EditorResult<()> {
        if self.start > self.end {
            return Err(EditorError::InvalidTimeFrame {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// Whether `time` falls inside `[start, end]`.
    pub fn contains(&self, time: TimeMs) -> bool {
        time >= self.start && time <= self.end
    }

    pub fn duration(&self) -> TimeMs {
        self.end.saturating_sub(self.start)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoProperties {
    pub src: String,
    pub element_id: String,
    #[serde(default)]
    pub effect: ColorEffect,
    /// Playback volume, 0.0 to 1.0.
    pub volume: f32,
    pub muted: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageProperties {
    pub src: String,
    pub element_id: String,
    #[serde(default)]
    pub effect: ColorEffect,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioProperties {
    pub src: String,
    pub element_id: String,
    pub volume: f32,
    pub muted: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextProperties {
    pub text: String,
    pub font_size: f32,
    pub font_weight: u16,
    pub font_family: String,
    /// CSS color string, e.g. `"#ffffff"`.
    pub color: String,
}

impl Default for TextProperties {
    fn default() -> Self {
        Self {
            text: String::new(),
            font_size: 40.0,
            font_weight: 400,
            font_family: "Arial".to_string(),
            color: "#ffffff".to_string(),
        }
    }
}

/// Type-specific payload of an element.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "properties", rename_all = "lowercase")]
pub enum ElementKind {
    Video(VideoProperties),
    Image(ImageProperties),
    Audio(AudioProperties),
    Text(TextProperties),
}

impl ElementKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            ElementKind::Video(_) => "video",
            ElementKind::Image(_) => "image",
            ElementKind::Audio(_) => "audio",
            ElementKind::Text(_) => "text",
        }
    }

    /// Whether the element draws something on the canvas.
    pub fn is_visual(&self) -> bool {
        !matches!(self, ElementKind::Audio(_))
    }
}

/// A placed, time-bounded layer in the project.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorElement {
    pub id: ElementId,
    pub name: String,
    #[serde(default)]
    pub placement: Placement,
    pub time_frame: TimeFrame,
    pub kind: ElementKind,
    /// Renderer-side object for this element, owned by the scene adapter.
    #[serde(skip)]
    pub render_handle: Option<RenderHandle>,
}

impl EditorElement {
    pub fn new(
        id: impl Into<ElementId>,
        name: impl Into<String>,
        time_frame: TimeFrame,
        kind: ElementKind,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            placement: Placement::default(),
            time_frame,
            kind,
            render_handle: None,
        }
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    /// Whether the element is visible at `time`.
    pub fn is_visible_at(&self, time: TimeMs) -> bool {
        self.time_frame.contains(time)
    }

    /// Media source URL, if the element is backed by a file.
    pub fn source(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Video(p) => Some(&p.src),
            ElementKind::Image(p) => Some(&p.src),
            ElementKind::Audio(p) => Some(&p.src),
            ElementKind::Text(_) => None,
        }
    }

    pub fn effect(&self) -> Option<ColorEffect> {
        match &self.kind {
            ElementKind::Video(p) => Some(p.effect),
            ElementKind::Image(p) => Some(p.effect),
            _ => None,
        }
    }

    /// Replace the color effect. Only video and image elements carry one.
    pub fn set_effect(&mut self, effect: ColorEffect) -> EditorResult<()> {
        match &mut self.kind {
            ElementKind::Video(p) => p.effect = effect,
            ElementKind::Image(p) => p.effect = effect,
            other => {
                return Err(EditorError::UnsupportedProperty {
                    id: self.id.clone(),
                    kind: other.type_name(),
                    property: "effect",
                })
            }
        }
        Ok(())
    }

    /// Check the structural invariants every stored element must satisfy.
    pub fn validate(&self) -> EditorResult<()> {
        if self.id.as_str().is_empty() {
            return Err(EditorError::InvalidSnapshot {
                reason: "element id is empty".into(),
            });
        }
        self.time_frame.validate()
    }
}
