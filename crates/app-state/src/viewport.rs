//! Responsive canvas sizing: fit the project canvas into a container, zoom,
//! and map points between screen and project space.

use rb_common::CanvasConfig;

const ZOOM_STEP: f32 = 1.2;

/// Displayed canvas size and the scale that produced it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
    pub scale: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CanvasViewport {
    original_width: f32,
    original_height: f32,
    padding: f32,
    min_scale: f32,
    max_scale: f32,
    size: CanvasSize,
    /// Last container passed to `fit`, used by `reset`.
    container: Option<(f32, f32)>,
}

impl CanvasViewport {
    pub fn from_config(config: &CanvasConfig) -> Self {
        let mut viewport = Self {
            original_width: config.width as f32,
            original_height: config.height as f32,
            padding: config.padding,
            min_scale: config.min_scale,
            max_scale: config.max_scale,
            size: CanvasSize {
                width: 0.0,
                height: 0.0,
                scale: 1.0,
            },
            container: None,
        };
        viewport.apply_scale(1.0);
        viewport
    }

    pub fn size(&self) -> CanvasSize {
        self.size
    }

    pub fn scale(&self) -> f32 {
        self.size.scale
    }

    pub fn original_size(&self) -> (f32, f32) {
        (self.original_width, self.original_height)
    }

    /// Fit the canvas inside a container, keeping `padding` on every side.
    pub fn fit(&mut self, container_width: f32, container_height: f32) -> CanvasSize {
        self.container = Some((container_width, container_height));
        let available_w = container_width - self.padding * 2.0;
        let available_h = container_height - self.padding * 2.0;
        let scale = (available_w / self.original_width).min(available_h / self.original_height);
        self.apply_scale(scale);
        tracing::trace!(
            container_width,
            container_height,
            scale = self.size.scale,
            "Canvas fitted"
        );
        self.size
    }

    /// Set an explicit scale, clamped to the configured bounds.
    pub fn zoom(&mut self, scale: f32) -> CanvasSize {
        self.apply_scale(scale);
        self.size
    }

    pub fn zoom_in(&mut self) -> CanvasSize {
        self.zoom(self.size.scale * ZOOM_STEP)
    }

    pub fn zoom_out(&mut self) -> CanvasSize {
        self.zoom(self.size.scale / ZOOM_STEP)
    }

    pub fn can_zoom_in(&self) -> bool {
        self.size.scale < self.max_scale
    }

    pub fn can_zoom_out(&self) -> bool {
        self.size.scale > self.min_scale
    }

    /// Re-fit to the last container, or scale 1 if none was seen yet.
    pub fn reset(&mut self) -> CanvasSize {
        match self.container {
            Some((w, h)) => self.fit(w, h),
            None => self.zoom(1.0),
        }
    }

    /// Change the project size (a new resolution) and re-fit.
    pub fn set_original_size(&mut self, width: u32, height: u32) -> CanvasSize {
        self.original_width = width.max(1) as f32;
        self.original_height = height.max(1) as f32;
        self.reset()
    }

    /// Map a point on the displayed canvas to project coordinates.
    pub fn screen_to_project(&self, x: f32, y: f32) -> (f32, f32) {
        (x / self.size.scale, y / self.size.scale)
    }

    /// Map a point in project coordinates to the displayed canvas.
    pub fn project_to_screen(&self, x: f32, y: f32) -> (f32, f32) {
        (x * self.size.scale, y * self.size.scale)
    }

    fn apply_scale(&mut self, scale: f32) {
        let scale = if scale.is_nan() {
            self.min_scale
        } else {
            scale.clamp(self.min_scale, self.max_scale)
        };
        self.size = CanvasSize {
            width: self.original_width * scale,
            height: self.original_height * scale,
            scale,
        };
    }
}
