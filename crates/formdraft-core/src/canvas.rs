//! Canvas state and the commands the shell issues against it.

use crate::config::CanvasConfig;
use crate::document::FormDocument;
use crate::edit::EditSession;
use crate::factory::WidgetFactory;
use crate::input::{InputState, PointerEvent, PointerId};
use crate::interaction::{Interaction, InteractionController, PointerOutcome};
use crate::layout::{self, LayoutError};
use crate::notice::Notice;
use crate::placement::find_position;
use crate::storage::{LayoutStore, StorageError, StorageResult};
use crate::widget::{HitRegion, Widget, WidgetContent, WidgetId, WidgetKind};
use kurbo::{Point, Size};

/// Answer to the "clear everything?" question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

/// A form canvas: its widgets plus the runtime state that manipulates them.
#[derive(Debug, Clone, Default)]
pub struct FormCanvas {
    document: FormDocument,
    factory: WidgetFactory,
    interaction: InteractionController,
    input: InputState,
    editing: Option<EditSession>,
    config: CanvasConfig,
}

impl FormCanvas {
    /// Create an empty canvas with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CanvasConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// Canvas extent in pixels.
    pub fn size(&self) -> Size {
        self.config.size
    }

    pub fn document(&self) -> &FormDocument {
        &self.document
    }

    pub fn widget(&self, id: &WidgetId) -> Option<&Widget> {
        self.document.get(id)
    }

    /// Mutable access for direct field interaction (typing into inputs).
    pub fn widget_mut(&mut self, id: &WidgetId) -> Option<&mut Widget> {
        self.document.get_mut(id)
    }

    /// Current value of the identifier counter.
    pub fn id_counter(&self) -> u64 {
        self.factory.counter()
    }

    pub fn interaction(&self) -> &Interaction {
        self.interaction.state()
    }

    /// Widget being dragged or resized, if any.
    pub fn active_widget(&self) -> Option<&WidgetId> {
        self.interaction.active_widget()
    }

    /// Create a widget of `kind` at a free spot and add it to the canvas.
    pub fn add_widget(&mut self, kind: WidgetKind) -> WidgetId {
        self.commit_edit();
        let mut widget = self.factory.create(kind);
        if self.document.contains(widget.id()) {
            widget.set_id(self.fresh_id());
        }
        let placement = find_position(&self.document.bounds(), self.config.size, widget.size, &self.config.placement);
        widget.origin = placement.origin;
        // Only matters for canvases smaller than the default widget.
        widget.normalize(self.config.size);

        let id = widget.id().clone();
        log::info!("Added {} {} at ({}, {})", kind.label(), id, widget.origin.x, widget.origin.y);
        self.document.add(widget);
        id
    }

    /// Next identifier not held by any widget on the canvas.
    fn fresh_id(&mut self) -> WidgetId {
        loop {
            let id = self.factory.allocate_id();
            if !self.document.contains(&id) {
                return id;
            }
        }
    }

    /// Remove a widget immediately. Returns false if it did not exist.
    pub fn delete_widget(&mut self, id: &WidgetId) -> bool {
        if self.document.remove(id).is_none() {
            return false;
        }
        if self.interaction.active_widget() == Some(id) {
            self.interaction.reset();
        }
        if self.editing.as_ref().is_some_and(|session| session.widget() == id) {
            self.editing = None;
        }
        log::info!("Deleted {id}");
        true
    }

    /// Remove every widget and restart identifier numbering.
    ///
    /// Does nothing unless the user confirmed.
    pub fn clear(&mut self, confirmation: Confirmation) -> bool {
        if confirmation == Confirmation::Declined {
            log::debug!("Clear declined");
            return false;
        }
        self.reset();
        log::info!("Canvas cleared");
        true
    }

    fn reset(&mut self) {
        self.document.clear();
        self.factory.reset();
        self.interaction.reset();
        self.editing = None;
    }

    /// Write the layout to `store`, replacing any previous save.
    ///
    /// An open inline edit is committed first so the saved text matches what
    /// is on screen.
    pub fn save<S: LayoutStore + ?Sized>(&mut self, store: &S) -> StorageResult<Notice> {
        self.commit_edit();
        let records = layout::records(self.document.iter());
        let blob = layout::to_json(&records).map_err(|e| StorageError::Serialization(e.to_string()))?;
        store.write(&self.config.storage_key, &blob)?;
        log::info!("Saved {} widgets under '{}'", records.len(), self.config.storage_key);
        Ok(Notice::Saved)
    }

    /// Replace the canvas contents with the layout saved in `store`.
    ///
    /// Without a saved layout nothing changes. Otherwise the canvas is cleared
    /// first, so a corrupt layout leaves only the widgets restored before the
    /// fault.
    pub fn load<S: LayoutStore + ?Sized>(&mut self, store: &S) -> Notice {
        let blob = match store.read(&self.config.storage_key) {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                log::info!("No saved layout under '{}'", self.config.storage_key);
                return Notice::NothingToLoad;
            }
            Err(e) => {
                log::error!("Failed to read saved layout: {e}");
                return Notice::LoadFailed { reason: e.to_string() };
            }
        };

        self.reset();
        match self.restore(&blob) {
            Ok(count) => {
                log::info!("Loaded {count} widgets, next id after {}", self.factory.counter());
                Notice::Loaded { count }
            }
            Err(e) => {
                log::error!("Failed to load layout: {e}");
                Notice::LoadFailed { reason: e.to_string() }
            }
        }
    }

    fn restore(&mut self, blob: &str) -> Result<usize, LayoutError> {
        let entries = layout::parse_layout(blob)?;
        let mut restored = 0;

        for (index, entry) in entries.into_iter().enumerate() {
            let record = layout::decode_record(index, entry)?;
            let tag = record.kind.clone();
            let Some(mut widget) = record.into_widget(&mut self.factory) else {
                log::warn!("Skipping layout record {index} of unknown type '{tag}'");
                continue;
            };

            if self.document.contains(widget.id()) {
                let fresh = self.fresh_id();
                log::warn!("Duplicate id {} in saved layout, renamed to {fresh}", widget.id());
                widget.set_id(fresh);
            }
            if let Some(suffix) = widget.id().numeric_suffix() {
                self.factory.advance_to(suffix);
            }

            widget.normalize(self.config.size);
            self.document.add(widget);
            restored += 1;
        }

        Ok(restored)
    }

    /// Feed a pointer event through editing, double-click and drag/resize handling.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> PointerOutcome {
        self.input.handle_pointer_event(event);
        match event {
            PointerEvent::Down { pointer, position } => self.pointer_down(pointer, position),
            PointerEvent::Move { pointer, position } => {
                if self.input.is_multi_touch() {
                    return PointerOutcome::Ignored;
                }
                self.interaction
                    .pointer_move(&mut self.document, self.config.size, pointer, position)
            }
            PointerEvent::Up { pointer, .. } | PointerEvent::Cancel { pointer } => {
                self.interaction.pointer_up(pointer)
            }
        }
    }

    /// Abandon whatever pointer sequence is in progress.
    ///
    /// Used when something else takes over input mid-gesture, so the release
    /// never reaches the canvas. Returns the widget that was being dragged or
    /// resized.
    pub fn cancel_pointer(&mut self) -> Option<WidgetId> {
        self.input.release_all();
        let active = self.interaction.active_widget().cloned();
        self.interaction.reset();
        if let Some(id) = &active {
            log::debug!("Pointer sequence on {id} abandoned");
        }
        active
    }

    fn pointer_down(&mut self, pointer: PointerId, position: Point) -> PointerOutcome {
        if !self.interaction.is_idle() || self.input.is_multi_touch() {
            log::debug!("Ignoring extra pointer {pointer:?}");
            return PointerOutcome::Ignored;
        }

        // Presses inside the widget being edited belong to the editor.
        let mut committed = None;
        if let Some(session) = &self.editing {
            let inside = self
                .document
                .get(session.widget())
                .is_some_and(|w| w.bounds().contains(position));
            if inside {
                return PointerOutcome::Ignored;
            }
            committed = self.commit_edit();
        }

        if self.input.is_double_click() {
            let editable = self.document.widget_at(position).and_then(|(widget, region)| {
                let on_content = matches!(region, HitRegion::Body | HitRegion::Field);
                (on_content && widget.kind().is_editable()).then(|| widget.id().clone())
            });
            if let Some(id) = editable {
                if self.begin_edit(&id) {
                    return PointerOutcome::EditStarted(id);
                }
            }
        }

        match self.interaction.pointer_down(&mut self.document, pointer, position) {
            PointerOutcome::Ignored => committed.map_or(PointerOutcome::Ignored, PointerOutcome::EditCommitted),
            outcome => outcome,
        }
    }

    /// Open an inline editor on `id`, committing any other open one.
    pub fn begin_edit(&mut self, id: &WidgetId) -> bool {
        if self.editing.as_ref().is_some_and(|session| session.widget() == id) {
            return true;
        }
        let Some(session) = self.document.get(id).and_then(EditSession::begin) else {
            return false;
        };
        self.commit_edit();
        log::debug!("Editing {id}");
        self.editing = Some(session);
        true
    }

    pub fn edit_session(&self) -> Option<&EditSession> {
        self.editing.as_ref()
    }

    pub fn edit_session_mut(&mut self) -> Option<&mut EditSession> {
        self.editing.as_mut()
    }

    /// Apply the open edit. Returns the edited widget.
    pub fn commit_edit(&mut self) -> Option<WidgetId> {
        let session = self.editing.take()?;
        let id = session.widget().clone();
        let widget = self.document.get_mut(&id)?;
        if session.apply(widget) {
            log::debug!("Committed edit of {id}");
            Some(id)
        } else {
            None
        }
    }

    /// Discard the open edit. Returns the widget that was being edited.
    pub fn cancel_edit(&mut self) -> Option<WidgetId> {
        let session = self.editing.take()?;
        log::debug!("Cancelled edit of {}", session.widget());
        Some(session.widget().clone())
    }

    /// Tick or untick a checkbox widget.
    pub fn set_checked(&mut self, id: &WidgetId, value: bool) -> bool {
        match self.document.get_mut(id).map(|w| &mut w.content) {
            Some(WidgetContent::Checkbox { checked, .. }) => {
                *checked = value;
                true
            }
            _ => false,
        }
    }

    /// Choose a dropdown option by index.
    pub fn select_option(&mut self, id: &WidgetId, index: usize) -> bool {
        match self.document.get_mut(id).map(|w| &mut w.content) {
            Some(WidgetContent::Dropdown { options, selected }) if index < options.len() => {
                *selected = index;
                true
            }
            _ => false,
        }
    }
}
