//! Central editor state container.
//!
//! `EditorStore` is the single owner of the element list, selection,
//! playback clock and undo history, plus project metadata and editor
//! settings. Every modification goes through a method here, and every
//! element mutation records exactly one history entry.

use std::fmt;
use std::time::Instant;

use rb_common::{
    ColorEffect, EditorConfig, EditorElement, EditorError, EditorResult, ElementId, ElementKind,
    ExportSettings, ExportSettingsUpdate, MediaKind, Placement, Resolution, TimeFrame, TimeMs,
};
use rb_project::{
    from_json_string, to_json_string, validate_project, ProjectData, ProjectError,
    ProjectSettings, ProjectSettingsOverrides,
};
use serde::{Deserialize, Serialize};

use crate::clock::{TickOutcome, TimelineClock};
use crate::commands::EditorCommand;
use crate::error::StoreResult;
use crate::frame::FrameTicker;
use crate::history::HistoryStack;
use crate::scene::SceneSync;
use crate::shortcuts::{resolve_shortcut, KeyChord, ShortcutContext};
use crate::snapshot::HistorySnapshot;
use crate::viewport::CanvasViewport;

/// Offset applied to a duplicated element so it does not sit exactly on top
/// of its source.
const DUPLICATE_OFFSET: f32 = 20.0;

const DEFAULT_PANEL_SIZE: f32 = 25.0;
const MIN_PANEL_SIZE: f32 = 10.0;
const MAX_PANEL_SIZE: f32 = 60.0;

/// Side-panel section currently open.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuOption {
    Video,
    Image,
    Audio,
    Text,
    Effects,
    Animations,
    Export,
    Settings,
}

/// Imported media sources, grouped by kind.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaLibrary {
    pub videos: Vec<String>,
    pub images: Vec<String>,
    pub audios: Vec<String>,
}

impl MediaLibrary {
    pub fn len(&self) -> usize {
        self.videos.len() + self.images.len() + self.audios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Partial update of an element; `None` fields are left unchanged.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ElementUpdate {
    pub name: Option<String>,
    pub placement: Option<Placement>,
    pub time_frame: Option<TimeFrame>,
    pub kind: Option<ElementKind>,
}

impl ElementUpdate {
    pub fn placement(placement: Placement) -> Self {
        Self {
            placement: Some(placement),
            ..Self::default()
        }
    }

    pub fn time_frame(time_frame: TimeFrame) -> Self {
        Self {
            time_frame: Some(time_frame),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.placement.is_none()
            && self.time_frame.is_none()
            && self.kind.is_none()
    }
}

/// The editor's state and its operations.
pub struct EditorStore {
    config: EditorConfig,
    elements: Vec<EditorElement>,
    selected: Option<ElementId>,
    clock: TimelineClock,
    ticker: FrameTicker,
    history: HistoryStack,
    viewport: CanvasViewport,
    project: Option<ProjectData>,
    background_color: String,
    export_settings: ExportSettings,
    resources: MediaLibrary,
    menu_option: Option<MenuOption>,
    property_panel_size: f32,
    is_dirty: bool,
    scene: Option<Box<dyn SceneSync + Send>>,
}

impl fmt::Debug for EditorStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorStore")
            .field("elements", &self.elements.len())
            .field("selected", &self.selected)
            .field("clock", &self.clock)
            .field("history_len", &self.history.len())
            .field("project", &self.project.as_ref().map(|p| &p.name))
            .field("is_dirty", &self.is_dirty)
            .field("scene_attached", &self.scene.is_some())
            .finish()
    }
}

impl EditorStore {
    /// Create an empty store. The config is validated first.
    pub fn new(config: EditorConfig) -> EditorResult<Self> {
        config.validate()?;
        let mut store = Self {
            clock: TimelineClock::from_config(&config)?,
            ticker: FrameTicker::from_config(&config),
            history: HistoryStack::new(config.max_history_size)?,
            viewport: CanvasViewport::from_config(&config.canvas),
            elements: Vec::new(),
            selected: None,
            project: None,
            background_color: config.background_color.clone(),
            export_settings: ExportSettings::default(),
            resources: MediaLibrary::default(),
            menu_option: None,
            property_panel_size: DEFAULT_PANEL_SIZE,
            is_dirty: false,
            scene: None,
            config,
        };
        store.reset_history("Initial state")?;
        tracing::debug!(
            max_history = store.config.max_history_size,
            fps = store.config.fps,
            "Editor store created"
        );
        Ok(store)
    }

    // --- Accessors ---

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn elements(&self) -> &[EditorElement] {
        &self.elements
    }

    pub fn element(&self, id: &ElementId) -> Option<&EditorElement> {
        self.elements.iter().find(|e| &e.id == id)
    }

    pub fn selected_id(&self) -> Option<&ElementId> {
        self.selected.as_ref()
    }

    pub fn selected_element(&self) -> Option<&EditorElement> {
        self.selected.as_ref().and_then(|id| self.element(id))
    }

    pub fn clock(&self) -> &TimelineClock {
        &self.clock
    }

    pub fn current_time_ms(&self) -> u64 {
        self.clock.current_time_ms()
    }

    pub fn max_time_ms(&self) -> u64 {
        self.clock.max_time_ms()
    }

    pub fn is_playing(&self) -> bool {
        self.clock.is_playing()
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    pub fn viewport(&self) -> &CanvasViewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut CanvasViewport {
        &mut self.viewport
    }

    pub fn project(&self) -> Option<&ProjectData> {
        self.project.as_ref()
    }

    pub fn background_color(&self) -> &str {
        &self.background_color
    }

    pub fn export_settings(&self) -> &ExportSettings {
        &self.export_settings
    }

    pub fn resources(&self) -> &MediaLibrary {
        &self.resources
    }

    pub fn menu_option(&self) -> Option<MenuOption> {
        self.menu_option
    }

    pub fn property_panel_size(&self) -> f32 {
        self.property_panel_size
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    pub fn mark_dirty(&mut self) {
        if !self.is_dirty {
            self.is_dirty = true;
            tracing::debug!("Editor marked as dirty");
        }
    }

    pub fn mark_clean(&mut self) {
        if self.is_dirty {
            self.is_dirty = false;
            tracing::debug!("Editor marked as clean");
        }
    }

    // --- Elements ---

    fn index_of(&self, id: &ElementId) -> EditorResult<usize> {
        self.elements
            .iter()
            .position(|e| &e.id == id)
            .ok_or_else(|| EditorError::ElementNotFound(id.clone()))
    }

    /// Append an element (drawn on top of the existing ones).
    pub fn add_element(&mut self, element: EditorElement) -> EditorResult<()> {
        if self.element(&element.id).is_some() {
            return Err(EditorError::DuplicateElement(element.id));
        }
        element.validate()?;
        tracing::debug!(id = %element.id, kind = element.type_name(), "Adding element");
        self.elements.push(element);
        self.commit("Add element")
    }

    pub fn update_element(&mut self, id: &ElementId, update: ElementUpdate) -> EditorResult<()> {
        let index = self.index_of(id)?;
        if let Some(time_frame) = &update.time_frame {
            time_frame.validate()?;
        }
        if update.is_empty() {
            return Ok(());
        }

        let element = &mut self.elements[index];
        if let Some(name) = update.name {
            element.name = name;
        }
        if let Some(placement) = update.placement {
            element.placement = placement;
        }
        if let Some(time_frame) = update.time_frame {
            element.time_frame = time_frame;
        }
        if let Some(kind) = update.kind {
            element.kind = kind;
        }
        tracing::debug!(%id, "Updated element");
        self.commit("Update element")
    }

    /// Remove an element. Clears the selection if it pointed at it.
    pub fn remove_element(&mut self, id: &ElementId) -> EditorResult<EditorElement> {
        let index = self.index_of(id)?;
        let removed = self.elements.remove(index);
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        tracing::debug!(%id, "Removed element");
        self.commit("Remove element")?;
        Ok(removed)
    }

    /// Copy an element under a fresh id, offset so it is visibly distinct.
    /// The copy is appended on top; returns its id.
    pub fn duplicate_element(&mut self, id: &ElementId) -> EditorResult<ElementId> {
        let index = self.index_of(id)?;
        let mut copy = self.elements[index].clone();
        copy.id = ElementId::new(format!("{id}_copy_{}", uuid::Uuid::new_v4().simple()));
        copy.name = format!("{} (copy)", copy.name);
        copy.placement = copy.placement.offset(DUPLICATE_OFFSET, DUPLICATE_OFFSET);
        copy.render_handle = None;

        let new_id = copy.id.clone();
        tracing::debug!(source = %id, copy = %new_id, "Duplicated element");
        self.elements.push(copy);
        self.commit("Duplicate element")?;
        Ok(new_id)
    }

    /// Set the color effect of a video or image element.
    pub fn update_effect(&mut self, id: &ElementId, effect: ColorEffect) -> EditorResult<()> {
        let index = self.index_of(id)?;
        self.elements[index].set_effect(effect)?;
        tracing::debug!(%id, effect = %effect, "Updated effect");
        self.commit("Change effect")
    }

    /// Elements visible under the playhead.
    pub fn visible_elements(&self) -> Vec<&EditorElement> {
        self.clock.visible_elements(&self.elements)
    }

    // --- Selection ---

    /// Select an element (or clear with `None`). Not recorded in history.
    pub fn select_element(&mut self, id: Option<ElementId>) -> EditorResult<()> {
        if let Some(id) = &id {
            self.index_of(id)?;
        }
        tracing::trace!(selected = ?id, "Selection changed");
        self.selected = id;
        Ok(())
    }

    // --- Timeline ---

    /// Start playback. A no-op while already playing; the frame ticker
    /// restarts only on a stopped-to-playing transition.
    pub fn play(&mut self) -> bool {
        if self.clock.is_playing() {
            return true;
        }
        self.ticker.reset();
        self.clock.play()
    }

    pub fn pause(&mut self) {
        self.clock.pause();
        self.ticker.reset();
    }

    pub fn stop(&mut self) {
        self.clock.stop();
        self.ticker.reset();
    }

    pub fn toggle_play_pause(&mut self) -> bool {
        if self.clock.is_playing() {
            self.pause();
            false
        } else {
            self.play()
        }
    }

    pub fn seek_to(&mut self, time_ms: f64) -> TimeMs {
        self.clock.seek_to(time_ms)
    }

    pub fn tick(&mut self, elapsed_ms: f64) -> TickOutcome {
        self.clock.tick(elapsed_ms)
    }

    /// Advance playback for a host frame presented at `now`. Returns whether
    /// the host should schedule another frame.
    pub fn on_frame(&mut self, now: Instant) -> bool {
        if !self.clock.is_playing() {
            self.ticker.reset();
            return false;
        }
        let delta = self.ticker.delta_ms(now);
        if self.clock.tick(delta) == TickOutcome::ReachedEnd {
            self.ticker.reset();
            return false;
        }
        true
    }

    pub fn set_max_time_ms(&mut self, max_time_ms: u64) -> EditorResult<()> {
        self.clock.set_max_time_ms(max_time_ms)?;
        self.mark_dirty();
        Ok(())
    }

    pub fn set_fps(&mut self, fps: u32) -> EditorResult<()> {
        self.clock.set_fps(fps)?;
        self.mark_dirty();
        Ok(())
    }

    // --- History ---

    fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot::from_parts(
            self.elements.clone(),
            self.selected.clone(),
            self.clock.current_time(),
        )
    }

    /// Record the current state after an element mutation.
    fn commit(&mut self, label: &str) -> EditorResult<()> {
        self.history.push(label, self.snapshot())?;
        self.mark_dirty();
        self.refresh_scene();
        Ok(())
    }

    /// Drop all history and record the current state as the new baseline.
    fn reset_history(&mut self, label: &str) -> EditorResult<()> {
        self.history.clear();
        self.history.push(label, self.snapshot())
    }

    fn restore(&mut self, snapshot: HistorySnapshot) {
        let (elements, selected, time) = snapshot.into_parts();
        self.elements = elements;
        self.selected = selected;
        self.clock.seek(time);
        self.mark_dirty();
        self.refresh_scene();
    }

    /// Step back one history entry. Returns whether anything was restored.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo().cloned() else {
            tracing::trace!("Nothing to undo");
            return false;
        };
        self.restore(snapshot);
        true
    }

    /// Step forward one history entry. Returns whether anything was restored.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo().cloned() else {
            tracing::trace!("Nothing to redo");
            return false;
        };
        self.restore(snapshot);
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Start a gesture (a drag, a resize): the element updates until
    /// [`end_gesture`](Self::end_gesture) become one history entry.
    pub fn begin_gesture(&mut self, label: &str) {
        self.history.begin_batch(label);
    }

    pub fn end_gesture(&mut self) -> bool {
        self.history.end_batch()
    }

    // --- Project ---

    /// Start a new project with the configured defaults plus `overrides`.
    pub fn create_project(
        &mut self,
        name: &str,
        overrides: ProjectSettingsOverrides,
    ) -> StoreResult<&ProjectData> {
        let settings = ProjectSettings::from_config(&self.config).with_overrides(overrides);
        let project = ProjectData::new(name, settings);
        tracing::info!(project_id = %project.id, project_name = %project.name, "Creating project");
        self.load_project(project)
    }

    pub fn create_default_project(&mut self, name: &str) -> StoreResult<&ProjectData> {
        self.create_project(name, ProjectSettingsOverrides::default())
    }

    /// Replace the editor contents with `project`. History restarts with the
    /// loaded state as its baseline and the editor is clean.
    pub fn load_project(&mut self, project: ProjectData) -> StoreResult<&ProjectData> {
        validate_project(&project)?;
        let settings = &project.settings;

        self.clock.set_max_time_ms(settings.duration.as_millis())?;
        self.clock.set_fps(settings.fps)?;
        self.clock.stop();
        self.ticker.reset();
        self.viewport.set_original_size(settings.width, settings.height);
        self.background_color = settings.background_color.clone();
        self.elements = project.elements.clone();
        self.selected = None;
        self.reset_history("Open project")?;
        self.is_dirty = false;
        self.refresh_scene();

        tracing::info!(
            project_id = %project.id,
            project_name = %project.name,
            elements = self.elements.len(),
            "Project loaded"
        );
        Ok(self.project.insert(project))
    }

    /// Decode a project from JSON and load it.
    pub fn load_project_json(&mut self, json: &str) -> StoreResult<&ProjectData> {
        let project = from_json_string(json)?;
        self.load_project(project)
    }

    /// Write the live editor state back into the current project and mark the
    /// editor clean.
    pub fn save_project(&mut self) -> StoreResult<&ProjectData> {
        let Some(project) = self.project.as_mut() else {
            return Err(ProjectError::InvalidProject {
                reason: "no project is open".into(),
            }
            .into());
        };
        project.elements = self.elements.clone();
        project.settings.background_color = self.background_color.clone();
        project.settings.duration = self.clock.max_time();
        project.settings.fps = self.clock.fps();
        self.is_dirty = false;

        tracing::info!(
            project_id = %project.id,
            project_name = %project.name,
            elements = project.elements.len(),
            "Project saved"
        );
        Ok(project)
    }

    /// Save and encode the current project as JSON.
    pub fn save_project_json(&mut self) -> StoreResult<String> {
        let project = self.save_project()?;
        Ok(to_json_string(project)?)
    }

    pub fn rename_project(&mut self, name: &str) -> StoreResult<()> {
        if name.trim().is_empty() {
            return Err(ProjectError::InvalidProject {
                reason: "project name is empty".into(),
            }
            .into());
        }
        let Some(project) = self.project.as_mut() else {
            return Err(ProjectError::InvalidProject {
                reason: "no project is open".into(),
            }
            .into());
        };
        tracing::debug!(from = %project.name, to = name, "Renaming project");
        project.name = name.to_string();
        self.mark_dirty();
        Ok(())
    }

    // --- Settings ---

    pub fn set_background_color(&mut self, color: impl Into<String>) {
        self.background_color = color.into();
        self.mark_dirty();
    }

    pub fn set_export_settings(&mut self, update: ExportSettingsUpdate) {
        self.export_settings.apply(update);
        tracing::debug!(
            format = ?self.export_settings.format,
            fps = self.export_settings.fps,
            resolution = %self.export_settings.resolution,
            "Export settings updated"
        );
    }

    /// Set the export resolution; the aspect ratio follows from it.
    pub fn set_export_resolution(&mut self, width: u32, height: u32) {
        self.set_export_settings(ExportSettingsUpdate {
            resolution: Some(Resolution::new(width, height)),
            ..ExportSettingsUpdate::default()
        });
    }

    pub fn set_menu_option(&mut self, option: Option<MenuOption>) {
        self.menu_option = option;
    }

    /// Set the property panel width in percent of the window, clamped to
    /// 10..=60. NaN is ignored.
    pub fn set_property_panel_size(&mut self, percent: f32) {
        if percent.is_nan() {
            return;
        }
        self.property_panel_size = percent.clamp(MIN_PANEL_SIZE, MAX_PANEL_SIZE);
    }

    // --- Resources ---

    /// Register an imported media source, classified by its extension.
    pub fn add_resource(&mut self, src: impl Into<String>) -> EditorResult<MediaKind> {
        let src = src.into();
        let Some(kind) = MediaKind::from_file_name(&src) else {
            return Err(EditorError::UnsupportedMedia(src));
        };
        let list = match kind {
            MediaKind::Video => &mut self.resources.videos,
            MediaKind::Image => &mut self.resources.images,
            MediaKind::Audio => &mut self.resources.audios,
        };
        tracing::debug!(%src, ?kind, "Resource added");
        list.push(src);
        Ok(kind)
    }

    // --- Scene ---

    /// Attach a scene adapter and sync it with the current elements.
    pub fn attach_scene(&mut self, scene: Box<dyn SceneSync + Send>) {
        self.scene = Some(scene);
        self.refresh_scene();
    }

    pub fn detach_scene(&mut self) -> Option<Box<dyn SceneSync + Send>> {
        self.scene.take()
    }

    /// Hand the element list to the attached scene, if any.
    pub fn refresh_scene(&mut self) {
        if let Some(scene) = self.scene.as_mut() {
            scene.sync(&self.elements);
        }
    }

    /// Reset to a fresh editor under the same config, keeping the scene.
    pub fn clear_all(&mut self) -> EditorResult<()> {
        self.clock = TimelineClock::from_config(&self.config)?;
        self.ticker.reset();
        self.viewport = CanvasViewport::from_config(&self.config.canvas);
        self.elements.clear();
        self.selected = None;
        self.project = None;
        self.background_color = self.config.background_color.clone();
        self.export_settings = ExportSettings::default();
        self.resources = MediaLibrary::default();
        self.menu_option = None;
        self.property_panel_size = DEFAULT_PANEL_SIZE;
        self.is_dirty = false;
        self.reset_history("Initial state")?;
        self.refresh_scene();
        tracing::debug!("Editor cleared");
        Ok(())
    }

    // --- Commands ---

    /// Apply a command. Returns whether it changed anything.
    pub fn dispatch(&mut self, command: EditorCommand) -> EditorResult<bool> {
        tracing::trace!(?command, "Dispatching command");
        let transport = (self.clock.is_playing(), self.clock.current_time());
        let changed = match command {
            EditorCommand::Play => {
                self.play();
                self.transport_changed(transport)
            }
            EditorCommand::Pause => {
                self.pause();
                self.transport_changed(transport)
            }
            EditorCommand::Stop => {
                self.stop();
                self.transport_changed(transport)
            }
            EditorCommand::TogglePlayPause => {
                self.toggle_play_pause();
                self.transport_changed(transport)
            }
            EditorCommand::Seek(time_ms) => {
                let before = self.clock.current_time();
                self.seek_to(time_ms) != before
            }
            EditorCommand::SetMaxTime(max_time_ms) => {
                self.set_max_time_ms(max_time_ms)?;
                true
            }
            EditorCommand::Undo => self.undo(),
            EditorCommand::Redo => self.redo(),
            EditorCommand::Select(id) => {
                let changed = self.selected != id;
                self.select_element(id)?;
                changed
            }
            EditorCommand::Duplicate(id) => {
                self.duplicate_element(&id)?;
                true
            }
            EditorCommand::Remove(id) => {
                self.remove_element(&id)?;
                true
            }
            EditorCommand::DuplicateSelected => match self.selected.clone() {
                Some(id) => {
                    self.duplicate_element(&id)?;
                    true
                }
                None => false,
            },
            EditorCommand::RemoveSelected => match self.selected.clone() {
                Some(id) => {
                    self.remove_element(&id)?;
                    true
                }
                None => false,
            },
            EditorCommand::SetEffect { id, effect } => {
                self.update_effect(&id, effect)?;
                true
            }
        };
        Ok(changed)
    }

    fn transport_changed(&self, before: (bool, TimeMs)) -> bool {
        (self.clock.is_playing(), self.clock.current_time()) != before
    }

    /// Resolve a key press against the current selection and apply it.
    /// Returns whether the key was bound.
    pub fn handle_key(&mut self, chord: &KeyChord, text_input_focused: bool) -> EditorResult<bool> {
        let ctx = ShortcutContext {
            has_selection: self.selected.is_some(),
            text_input_focused,
        };
        match resolve_shortcut(chord, ctx) {
            Some(command) => {
                self.dispatch(command)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
