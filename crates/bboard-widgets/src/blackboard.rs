#![forbid(unsafe_code)]

//! The blackboard panel: mutation coordinator over a property graph.
//!
//! [`Blackboard`] owns the row mirror, the row section and the two inline
//! edit sessions, and mediates every structural change to the graph. Each
//! mutation is bracketed the same way:
//!
//! ```text
//!   snapshot graph ─► register_complete_undo(label) ─► mutate graph ─► reconcile
//! ```
//!
//! Edits the user abandons (Escape, unchanged text, a name that sanitizes to
//! the current one) never reach the graph and never leave a checkpoint.
//!
//! # Example
//!
//! ```
//! use bboard_core::{NodeGraph, PropertyKind};
//! use bboard_widgets::{Blackboard, EditSurface};
//!
//! let mut board = Blackboard::with_history(NodeGraph::new(), &Default::default());
//! let id = board.create_property(PropertyKind::Float);
//! assert!(board.is_editing(EditSurface::Property(id)));
//! assert_eq!(board.row(id).map(|r| r.text()), Some("Float"));
//! ```

use bboard_core::change_set::ChangeSet;
use bboard_core::event::Event;
use bboard_core::gesture::ClickDetector;
use bboard_core::graph::{GraphSnapshot, ModificationScope, NodeKind, PropertyGraph};
use bboard_core::naming::{format_path, sanitize_segments};
use bboard_core::property::{Property, PropertyId, PropertyKind};
use bboard_runtime::config::{BlackboardConfig, PanelPolicyConfig};
use bboard_runtime::undo::{UndoHistory, UndoStore};
use web_time::Instant;

use crate::commands::{BlackboardCommands, EditSurface};
use crate::edit_session::{EditOutcome, EditResponse, InlineEditSession};
use crate::menu::AddItemMenu;
use crate::mirror::PropertyMirror;
use crate::reconcile::{ReconcileReport, Reconciler};
use crate::row::{BlackboardRow, Section};

/// Undo label recorded before a property is created.
pub const UNDO_CREATE_PROPERTY: &str = "Create Property";
/// Undo label recorded before a property is renamed.
pub const UNDO_EDIT_PROPERTY_NAME: &str = "Edit Property Name";
/// Undo label recorded before a property is moved.
pub const UNDO_MOVE_PROPERTY: &str = "Move Property";
/// Undo label recorded before the path changes.
pub const UNDO_EDIT_PATH: &str = "Edit Path";

/// Property panel bound to a graph `G` and an undo store `U`.
#[derive(Debug)]
pub struct Blackboard<G, U = UndoHistory<GraphSnapshot>> {
    graph: G,
    undo: U,
    mirror: PropertyMirror<BlackboardRow>,
    section: Section,
    reconciler: Reconciler,
    path_session: InlineEditSession,
    rename_session: InlineEditSession,
    /// Property whose name the rename session edits.
    renaming: Option<PropertyId>,
    path_clicks: ClickDetector,
    row_clicks: ClickDetector,
    last_clicked_row: Option<PropertyId>,
    panel: PanelPolicyConfig,
    asset_name: String,
}

impl<G: PropertyGraph> Blackboard<G, UndoHistory<GraphSnapshot>> {
    /// Panel with its own depth-bounded undo history.
    #[must_use]
    pub fn with_history(graph: G, config: &BlackboardConfig) -> Self {
        let history = UndoHistory::new(config.to_history_config());
        Self::with_config(graph, history, config)
    }
}

impl<G, U> Blackboard<G, U>
where
    G: PropertyGraph,
    U: UndoStore<GraphSnapshot>,
{
    /// Panel with the default configuration.
    #[must_use]
    pub fn new(graph: G, undo: U) -> Self {
        Self::with_config(graph, undo, &BlackboardConfig::default())
    }

    /// Panel built from `config`.
    ///
    /// Rows are created for every property the graph already holds, then any
    /// changes the graph has pending are applied.
    #[must_use]
    pub fn with_config(graph: G, undo: U, config: &BlackboardConfig) -> Self {
        let click = config.to_click_config();
        let mut board = Self {
            graph,
            undo,
            mirror: PropertyMirror::new(),
            section: Section::new().with_scrollable(config.panel.scrollable),
            reconciler: Reconciler::new(),
            path_session: InlineEditSession::new(),
            rename_session: InlineEditSession::new(),
            renaming: None,
            path_clicks: ClickDetector::new(click.clone()),
            row_clicks: ClickDetector::new(click),
            last_clicked_row: None,
            panel: config.panel.clone(),
            asset_name: config.panel.title.clone(),
        };

        let initial = board
            .graph
            .properties()
            .iter()
            .enumerate()
            .fold(ChangeSet::new(), |changes, (index, property)| {
                changes.with_added(property.clone(), index)
            });
        board.reconciler.apply(
            initial,
            board.graph.properties(),
            &mut board.mirror,
            &mut board.section,
        );
        board.handle_graph_changes();
        board
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub fn graph(&self) -> &G {
        &self.graph
    }

    /// Mutable graph access for changes made outside the panel.
    ///
    /// Call [`handle_graph_changes`](Self::handle_graph_changes) afterwards.
    pub fn graph_mut(&mut self) -> &mut G {
        &mut self.graph
    }

    #[must_use]
    pub fn undo_store(&self) -> &U {
        &self.undo
    }

    #[must_use]
    pub fn mirror(&self) -> &PropertyMirror<BlackboardRow> {
        &self.mirror
    }

    #[must_use]
    pub fn section(&self) -> &Section {
        &self.section
    }

    /// Rows in display order.
    pub fn rows(&self) -> impl Iterator<Item = &BlackboardRow> {
        self.mirror.iter().map(|(_, row)| row)
    }

    #[must_use]
    pub fn row(&self, id: PropertyId) -> Option<&BlackboardRow> {
        self.mirror.get(id)
    }

    /// Panel title.
    #[must_use]
    pub fn asset_name(&self) -> &str {
        &self.asset_name
    }

    pub fn set_asset_name(&mut self, name: impl Into<String>) {
        self.asset_name = name.into();
    }

    /// Text of the path label.
    #[must_use]
    pub fn path_text(&self) -> &str {
        format_path(self.graph.path(), &self.panel.empty_path_placeholder)
    }

    /// Fresh add-item menu listing every property kind.
    #[must_use]
    pub fn add_item_menu(&self) -> AddItemMenu {
        AddItemMenu::new()
    }

    // ========================================================================
    // Row state
    // ========================================================================

    /// Flip a row's expansion. Returns the new state.
    pub fn toggle_expanded(&mut self, id: PropertyId) -> Option<bool> {
        self.mirror.get_mut(id).map(BlackboardRow::toggle_expanded)
    }

    /// Set a row's expansion. Returns `false` for an unknown id.
    pub fn set_expanded(&mut self, id: PropertyId, expanded: bool) -> bool {
        match self.mirror.get_mut(id) {
            Some(row) => {
                row.set_expanded(expanded);
                true
            }
            None => false,
        }
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Create a property of `kind` named after the kind.
    pub fn create_property(&mut self, kind: PropertyKind) -> PropertyId {
        self.create_property_named(kind, kind.default_name())
    }

    /// Create a property of `kind`, making `name` unique among its siblings.
    ///
    /// The new row is expanded and opened for renaming unless the panel
    /// configuration turns that off.
    pub fn create_property_named(&mut self, kind: PropertyKind, name: &str) -> PropertyId {
        let name = self.graph.sanitize_property_name(name, kind, None);
        let property = Property::named(kind, name);
        let id = property.id();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "blackboard.create",
            %id,
            kind = kind.label(),
            name = property.display_name()
        );

        self.checkpoint(UNDO_CREATE_PROPERTY);
        self.graph.add_property(property);
        self.handle_graph_changes();

        if self.panel.expand_created_rows {
            self.set_expanded(id, true);
        }
        if self.panel.edit_created_rows {
            self.begin_rename(id);
        }
        id
    }

    /// Rename a property.
    ///
    /// Returns `false`, recording nothing, when the id is unknown, `proposed`
    /// is empty or equals the current name, or it sanitizes to the current
    /// name.
    pub fn rename_property(&mut self, id: PropertyId, proposed: &str) -> bool {
        let Some(property) = self.graph.property(id) else {
            return false;
        };
        if proposed.is_empty() || proposed == property.display_name() {
            return false;
        }
        let sanitized = self
            .graph
            .sanitize_property_name(proposed, property.kind(), Some(id));
        if sanitized == property.display_name() {
            return false;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "blackboard.rename",
            %id,
            from = property.display_name(),
            to = sanitized.as_str()
        );

        self.checkpoint(UNDO_EDIT_PROPERTY_NAME);
        self.graph.set_display_name(id, &sanitized);
        if let Some(row) = self.mirror.get_mut(id) {
            row.set_text(sanitized);
        }
        for node in self.graph.nodes_of_kind(NodeKind::Property) {
            self.graph.refresh_node(node, ModificationScope::Node);
        }
        true
    }

    /// Move a property to `index` (clamped) in the canonical order.
    ///
    /// Unknown ids and moves that land on the current position do nothing.
    pub fn move_property(&mut self, id: PropertyId, index: usize) -> bool {
        let Some(from) = self.graph.property_index(id) else {
            return false;
        };
        let to = index.min(self.graph.properties().len().saturating_sub(1));
        if from == to {
            return false;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(message = "blackboard.move", %id, from, to);

        self.checkpoint(UNDO_MOVE_PROPERTY);
        let moved = self.graph.move_property(id, to);
        self.handle_graph_changes();
        moved
    }

    /// Set the category path from user text and return the label text.
    ///
    /// The text is sanitized first; a result equal to the current path
    /// records nothing.
    pub fn edit_path(&mut self, text: &str) -> &str {
        let sanitized = sanitize_segments(text);
        if sanitized != self.graph.path() {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                message = "blackboard.path",
                from = self.graph.path(),
                to = sanitized.as_str()
            );

            self.checkpoint(UNDO_EDIT_PATH);
            self.graph.set_path(sanitized);
        }
        self.path_text()
    }

    /// Take the graph's pending changes and apply them to the rows.
    pub fn handle_graph_changes(&mut self) -> ReconcileReport {
        let changes = self.graph.take_changes();
        let report = self.reconciler.apply(
            changes,
            self.graph.properties(),
            &mut self.mirror,
            &mut self.section,
        );

        // A rename target that went away takes its session with it.
        if let Some(id) = self.renaming
            && !self.mirror.contains(id)
        {
            self.rename_session.blur();
            self.renaming = None;
        }
        report
    }

    fn checkpoint(&mut self, label: &str) {
        let snapshot = self.graph.snapshot();
        self.undo.register_complete_undo(label, snapshot);
    }

    // ========================================================================
    // Undo / redo
    // ========================================================================

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.undo.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.undo.can_redo()
    }

    /// Revert the last checkpoint. Returns its label.
    ///
    /// Open edit sessions are closed without applying their text.
    pub fn undo(&mut self) -> Option<String> {
        if !self.undo.can_undo() {
            return None;
        }
        self.abandon_edits();
        let restored = self.undo.undo(self.graph.snapshot())?;
        self.graph.restore(&restored.state);
        self.handle_graph_changes();

        #[cfg(feature = "tracing")]
        tracing::debug!(message = "blackboard.undo", label = restored.label.as_str());

        Some(restored.label)
    }

    /// Reapply the last undone checkpoint. Returns its label.
    pub fn redo(&mut self) -> Option<String> {
        if !self.undo.can_redo() {
            return None;
        }
        self.abandon_edits();
        let restored = self.undo.redo(self.graph.snapshot())?;
        self.graph.restore(&restored.state);
        self.handle_graph_changes();

        #[cfg(feature = "tracing")]
        tracing::debug!(message = "blackboard.redo", label = restored.label.as_str());

        Some(restored.label)
    }

    fn abandon_edits(&mut self) {
        self.path_session.blur();
        self.rename_session.blur();
        self.renaming = None;
    }

    // ========================================================================
    // Inline editing
    // ========================================================================

    /// Whether `surface` has an open edit session.
    #[must_use]
    pub fn is_editing(&self, surface: EditSurface) -> bool {
        self.edit_session(surface).is_some()
    }

    /// The open session editing `surface`, if any.
    #[must_use]
    pub fn edit_session(&self, surface: EditSurface) -> Option<&InlineEditSession> {
        let session = match surface {
            EditSurface::Path => &self.path_session,
            EditSurface::Property(id) if self.renaming == Some(id) => &self.rename_session,
            EditSurface::Property(_) => return None,
        };
        session.is_editing().then_some(session)
    }

    /// Open the path editor on the raw path.
    pub fn begin_path_edit(&mut self) {
        let path = self.graph.path().to_owned();
        self.path_session.start(&path);
    }

    /// Open the name editor on a row. Returns `false` for an unknown id.
    ///
    /// A rename already open on another row is ended first, applying its text.
    pub fn begin_rename(&mut self, id: PropertyId) -> bool {
        if !self.mirror.contains(id) {
            return false;
        }
        if let Some(other) = self.renaming
            && other != id
        {
            self.end_edit(EditSurface::Property(other));
        }
        let Some(text) = self.mirror.get(id).map(|row| row.text().to_owned()) else {
            return false;
        };
        self.rename_session.start(&text);
        self.renaming = Some(id);
        true
    }

    /// Open the editor for `surface`.
    pub fn begin_edit(&mut self, surface: EditSurface) -> bool {
        match surface {
            EditSurface::Path => {
                self.begin_path_edit();
                true
            }
            EditSurface::Property(id) => self.begin_rename(id),
        }
    }

    /// Route an input event to the session editing `surface`.
    ///
    /// Focus loss is the blur itself: the session is ended on the spot.
    /// Escape and Enter only request a blur, which the host delivers through
    /// [`end_edit`](Self::end_edit).
    pub fn handle_edit_event(&mut self, surface: EditSurface, event: &Event) -> EditResponse {
        let response = match surface {
            EditSurface::Path => self.path_session.handle_event(event),
            EditSurface::Property(id) if self.renaming == Some(id) => {
                self.rename_session.handle_event(event)
            }
            EditSurface::Property(_) => EditResponse::Ignored,
        };
        if response == EditResponse::BlurRequested && matches!(event, Event::Focus(false)) {
            self.end_edit(surface);
        }
        response
    }

    /// Blur `surface`, applying committed text.
    ///
    /// Committed path text goes through [`edit_path`](Self::edit_path) and a
    /// committed name through [`rename_property`](Self::rename_property), so
    /// both are sanitized and may still turn out to be no-ops.
    pub fn end_edit(&mut self, surface: EditSurface) -> EditOutcome {
        match surface {
            EditSurface::Path => {
                let outcome = self.path_session.blur();
                if let EditOutcome::Committed(text) = &outcome {
                    self.edit_path(text);
                }
                outcome
            }
            EditSurface::Property(id) => {
                if self.renaming != Some(id) {
                    return EditOutcome::Idle;
                }
                self.renaming = None;
                let outcome = self.rename_session.blur();
                if let EditOutcome::Committed(text) = &outcome {
                    self.rename_property(id, text);
                }
                outcome
            }
        }
    }

    /// Feed a pointer event aimed at a label. A double left-click opens
    /// the editor. Returns `true` if an edit session started.
    pub fn handle_label_event(&mut self, surface: EditSurface, event: &Event, now: Instant) -> bool {
        let click = match surface {
            EditSurface::Path => self.path_clicks.process(event, now),
            EditSurface::Property(id) => {
                if self.last_clicked_row != Some(id) {
                    self.row_clicks.reset();
                    self.last_clicked_row = Some(id);
                }
                self.row_clicks.process(event, now)
            }
        };
        match click {
            Some(click) if click.is_double_left() => self.begin_edit(surface),
            _ => false,
        }
    }
}

impl<G, U> BlackboardCommands for Blackboard<G, U>
where
    G: PropertyGraph,
    U: UndoStore<GraphSnapshot>,
{
    fn request_edit(&mut self, surface: EditSurface) -> bool {
        self.begin_edit(surface)
    }

    fn request_add(&mut self, kind: PropertyKind) -> PropertyId {
        self.create_property(kind)
    }

    fn request_move(&mut self, id: PropertyId, index: usize) -> bool {
        self.move_property(id, index)
    }
}
