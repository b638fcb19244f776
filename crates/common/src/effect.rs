//! Color effect tags attached to visual elements.
//!
//! Effects are plain data here: the renderer decides how (and whether) to
//! draw them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A color effect applied to a video or image element.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ColorEffect {
    #[default]
    None,
    BlackAndWhite,
    Sepia,
    Invert,
    Saturate,
    Blur,
    Brightness,
    Contrast,
}

impl ColorEffect {
    /// All effects in the order the effects panel lists them.
    pub const ALL: [ColorEffect; 8] = [
        ColorEffect::None,
        ColorEffect::BlackAndWhite,
        ColorEffect::Sepia,
        ColorEffect::Invert,
        ColorEffect::Saturate,
        ColorEffect::Blur,
        ColorEffect::Brightness,
        ColorEffect::Contrast,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ColorEffect::None => "None",
            ColorEffect::BlackAndWhite => "Black & White",
            ColorEffect::Sepia => "Sepia",
            ColorEffect::Invert => "Invert",
            ColorEffect::Saturate => "Saturate",
            ColorEffect::Blur => "Blur",
            ColorEffect::Brightness => "Brightness",
            ColorEffect::Contrast => "Contrast",
        }
    }

    pub fn is_none(self) -> bool {
        self == ColorEffect::None
    }
}

impl fmt::Display for ColorEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
