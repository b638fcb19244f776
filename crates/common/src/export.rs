//! Export settings and output resolution presets.
//!
//! Only the configuration lives here; there is no encoder behind it.

use serde::{Deserialize, Serialize};

use crate::types::Resolution;

/// Output container format.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoFormat {
    #[default]
    Mp4,
    Webm,
    Avi,
    Mov,
    Mkv,
    Flv,
    Wmv,
    Gif,
    Hevc,
    #[serde(rename = "3gp")]
    ThreeGp,
    Asf,
    M4v,
    Mpeg,
    Mpg,
    Ogv,
    Ts,
}

impl VideoFormat {
    pub fn extension(self) -> &'static str {
        match self {
            VideoFormat::Mp4 => "mp4",
            VideoFormat::Webm => "webm",
            VideoFormat::Avi => "avi",
            VideoFormat::Mov => "mov",
            VideoFormat::Mkv => "mkv",
            VideoFormat::Flv => "flv",
            VideoFormat::Wmv => "wmv",
            VideoFormat::Gif => "gif",
            VideoFormat::Hevc => "hevc",
            VideoFormat::ThreeGp => "3gp",
            VideoFormat::Asf => "asf",
            VideoFormat::M4v => "m4v",
            VideoFormat::Mpeg => "mpeg",
            VideoFormat::Mpg => "mpg",
            VideoFormat::Ogv => "ogv",
            VideoFormat::Ts => "ts",
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportQuality {
    Low,
    #[default]
    Medium,
    High,
}

/// Settings for rendering the project to a file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportSettings {
    pub format: VideoFormat,
    pub quality: ExportQuality,
    pub fps: u32,
    pub resolution: Resolution,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            format: VideoFormat::Mp4,
            quality: ExportQuality::Medium,
            fps: 30,
            resolution: Resolution::HD,
        }
    }
}

/// Partial update of [`ExportSettings`]; `None` fields are left unchanged.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExportSettingsUpdate {
    pub format: Option<VideoFormat>,
    pub quality: Option<ExportQuality>,
    pub fps: Option<u32>,
    pub resolution: Option<Resolution>,
}

impl ExportSettings {
    /// Apply a partial update. A zero fps or empty resolution is ignored.
    pub fn apply(&mut self, update: ExportSettingsUpdate) {
        if let Some(format) = update.format {
            self.format = format;
        }
        if let Some(quality) = update.quality {
            self.quality = quality;
        }
        match update.fps {
            Some(0) => tracing::warn!("Ignoring export fps of 0"),
            Some(fps) => self.fps = fps,
            None => {}
        }
        match update.resolution {
            Some(res) if res.is_empty() => {
                tracing::warn!(resolution = %res, "Ignoring empty export resolution")
            }
            Some(res) => self.resolution = res,
            None => {}
        }
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.resolution.aspect_ratio()
    }
}

/// Aspect ratio families offered by the resolution selector.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "16:9")]
    Landscape,
    #[serde(rename = "9:16")]
    Portrait,
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "4:3")]
    Classic,
    #[serde(rename = "21:9")]
    Ultrawide,
}

/// A named output resolution.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ResolutionPreset {
    pub name: &'static str,
    pub resolution: Resolution,
}

const fn preset(name: &'static str, width: u32, height: u32) -> ResolutionPreset {
    ResolutionPreset {
        name,
        resolution: Resolution { width, height },
    }
}

const LANDSCAPE: &[ResolutionPreset] = &[
    preset("4K UHD", 3840, 2160),
    preset("1440p QHD", 2560, 1440),
    preset("1080p FHD", 1920, 1080),
    preset("720p HD", 1280, 720),
    preset("480p SD", 854, 480),
];

const PORTRAIT: &[ResolutionPreset] = &[
    preset("4K Vertical", 2160, 3840),
    preset("1440p Vertical", 1440, 2560),
    preset("1080p Vertical", 1080, 1920),
    preset("720p Vertical", 720, 1280),
];

const SQUARE: &[ResolutionPreset] = &[
    preset("4K Square", 2160, 2160),
    preset("1440p Square", 1440, 1440),
    preset("1080p Square", 1080, 1080),
    preset("720p Square", 720, 720),
];

const CLASSIC: &[ResolutionPreset] = &[
    preset("1024x768", 1024, 768),
    preset("800x600", 800, 600),
    preset("640x480", 640, 480),
];

const ULTRAWIDE: &[ResolutionPreset] = &[
    preset("3440x1440", 3440, 1440),
    preset("2560x1080", 2560, 1080),
];

impl AspectRatio {
    pub const ALL: [AspectRatio; 5] = [
        AspectRatio::Landscape,
        AspectRatio::Portrait,
        AspectRatio::Square,
        AspectRatio::Classic,
        AspectRatio::Ultrawide,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AspectRatio::Landscape => "16:9 (Landscape)",
            AspectRatio::Portrait => "9:16 (Portrait)",
            AspectRatio::Square => "1:1 (Square)",
            AspectRatio::Classic => "4:3 (Classic)",
            AspectRatio::Ultrawide => "21:9 (Ultrawide)",
        }
    }

    pub fn ratio(self) -> f64 {
        match self {
            AspectRatio::Landscape => 16.0 / 9.0,
            AspectRatio::Portrait => 9.0 / 16.0,
            AspectRatio::Square => 1.0,
            AspectRatio::Classic => 4.0 / 3.0,
            AspectRatio::Ultrawide => 21.0 / 9.0,
        }
    }

    pub fn presets(self) -> &'static [ResolutionPreset] {
        match self {
            AspectRatio::Landscape => LANDSCAPE,
            AspectRatio::Portrait => PORTRAIT,
            AspectRatio::Square => SQUARE,
            AspectRatio::Classic => CLASSIC,
            AspectRatio::Ultrawide => ULTRAWIDE,
        }
    }

    /// The family whose ratio is closest to `resolution`'s.
    pub fn closest_to(resolution: Resolution) -> AspectRatio {
        let target = resolution.aspect_ratio();
        let mut best = AspectRatio::Landscape;
        let mut best_diff = f64::INFINITY;
        for ratio in Self::ALL {
            let diff = (ratio.ratio() - target).abs();
            if diff < best_diff {
                best = ratio;
                best_diff = diff;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings() {
        let s = ExportSettings::default();
        assert_eq!(s.format, VideoFormat::Mp4);
        assert_eq!(s.quality, ExportQuality::Medium);
        assert_eq!(s.fps, 30);
        assert_eq!(s.resolution, Resolution::HD);
    }

    #[test]
    fn apply_partial_update() {
        let mut s = ExportSettings::default();
        s.apply(ExportSettingsUpdate {
            quality: Some(ExportQuality::High),
            fps: Some(60),
            ..Default::default()
        });
        assert_eq!(s.quality, ExportQuality::High);
        assert_eq!(s.fps, 60);
        assert_eq!(s.format, VideoFormat::Mp4);
    }

    #[test]
    fn apply_ignores_zero_fps_and_empty_resolution() {
        let mut s = ExportSettings::default();
        s.apply(ExportSettingsUpdate {
            fps: Some(0),
            resolution: Some(Resolution::new(0, 720)),
            ..Default::default()
        });
        assert_eq!(s.fps, 30);
        assert_eq!(s.resolution, Resolution::HD);
    }

    #[test]
    fn format_serde_names() {
        assert_eq!(serde_json::to_string(&VideoFormat::ThreeGp).unwrap(), "\"3gp\"");
        let f: VideoFormat = serde_json::from_str("\"webm\"").unwrap();
        assert_eq!(f, VideoFormat::Webm);
        assert_eq!(VideoFormat::Mkv.extension(), "mkv");
    }

    #[test]
    fn presets_match_their_family() {
        for ratio in AspectRatio::ALL {
            for p in ratio.presets() {
                assert_eq!(AspectRatio::closest_to(p.resolution), ratio, "{}", p.name);
            }
        }
    }

    #[test]
    fn aspect_ratio_serde_uses_colon_form() {
        assert_eq!(
            serde_json::to_string(&AspectRatio::Portrait).unwrap(),
            "\"9:16\""
        );
    }
}
