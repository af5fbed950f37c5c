#![forbid(unsafe_code)]

//! Property tests for row mirror convergence.
//!
//! Validates:
//! - After every reconciliation the mirror lists exactly the graph's
//!   properties in canonical order, and the section holds the same rows.
//! - Row text always matches the property's display name.
//! - A second reconciliation with nothing pending is a no-op.
//! - Panel mutations interleaved with undo/redo keep the same guarantees.

use proptest::prelude::*;

use bboard_core::graph::{GraphSnapshot, NodeGraph, PropertyGraph};
use bboard_core::property::{Property, PropertyId, PropertyKind};
use bboard_runtime::undo::{HistoryConfig, UndoHistory, UndoStore};
use bboard_widgets::{Blackboard, RowHandle};

// ============================================================================
// Strategy helpers
// ============================================================================

/// A change made to the graph behind the panel's back.
#[derive(Debug, Clone)]
enum GraphOp {
    Add(usize),
    Remove(usize),
    Move(usize, usize),
    Rename(usize, String),
}

/// A user action routed through the panel.
#[derive(Debug, Clone)]
enum PanelOp {
    Create(usize),
    Move(usize, usize),
    Rename(usize, String),
    Path(String),
    Undo,
    Redo,
}

fn graph_op_strategy() -> impl Strategy<Value = GraphOp> {
    prop_oneof![
        3 => (0usize..16).prop_map(GraphOp::Add),
        2 => (0usize..32).prop_map(GraphOp::Remove),
        3 => (0usize..32, 0usize..32).prop_map(|(a, b)| GraphOp::Move(a, b)),
        1 => (0usize..32, "[A-C ]{0,3}").prop_map(|(a, n)| GraphOp::Rename(a, n)),
    ]
}

/// Batches of graph ops; each batch is reconciled as one cycle.
fn batches_strategy() -> impl Strategy<Value = Vec<Vec<GraphOp>>> {
    prop::collection::vec(prop::collection::vec(graph_op_strategy(), 1..6), 1..12)
}

fn panel_op_strategy() -> impl Strategy<Value = PanelOp> {
    prop_oneof![
        3 => (0usize..16).prop_map(PanelOp::Create),
        3 => (0usize..32, 0usize..32).prop_map(|(a, b)| PanelOp::Move(a, b)),
        2 => (0usize..32, "[A-C ]{0,3}").prop_map(|(a, n)| PanelOp::Rename(a, n)),
        1 => "[a-b/ ]{0,5}".prop_map(PanelOp::Path),
        2 => Just(PanelOp::Undo),
        2 => Just(PanelOp::Redo),
    ]
}

// ============================================================================
// Helpers
// ============================================================================

fn id_at(graph: &NodeGraph, index: usize) -> Option<PropertyId> {
    let properties = graph.properties();
    (!properties.is_empty()).then(|| properties[index % properties.len()].id())
}

fn apply_graph_op(graph: &mut NodeGraph, op: &GraphOp) {
    match op {
        GraphOp::Add(kind) => {
            let kind = PropertyKind::ALL[*kind % PropertyKind::ALL.len()];
            let name = graph.sanitize_property_name("", kind, None);
            graph.add_property(Property::named(kind, name));
        }
        GraphOp::Remove(index) => {
            if let Some(id) = id_at(graph, *index) {
                graph.remove_property(id);
            }
        }
        GraphOp::Move(index, to) => {
            if let Some(id) = id_at(graph, *index) {
                graph.move_property(id, *to);
            }
        }
        GraphOp::Rename(index, name) => {
            if let Some(id) = id_at(graph, *index)
                && let Some(kind) = graph.property(id).map(Property::kind)
            {
                let name = graph.sanitize_property_name(name, kind, Some(id));
                graph.set_display_name(id, &name);
            }
        }
    }
}

fn check_converged<U: UndoStore<GraphSnapshot>>(
    board: &Blackboard<NodeGraph, U>,
) -> Result<(), TestCaseError> {
    let canonical: Vec<PropertyId> = board.graph().properties().iter().map(Property::id).collect();
    prop_assert_eq!(board.mirror().ordered_ids(), canonical);

    let handles: Vec<RowHandle> = board.rows().map(|row| row.handle()).collect();
    prop_assert_eq!(board.section().children(), handles.as_slice());

    for (row, property) in board.rows().zip(board.graph().properties()) {
        prop_assert_eq!(row.property(), property.id());
        prop_assert_eq!(row.text(), property.display_name());
        prop_assert_eq!(row.kind(), property.kind());
    }
    Ok(())
}

fn seeded_graph(len: usize) -> NodeGraph {
    NodeGraph::new().with_properties(
        (0..len).map(|i| Property::named(PropertyKind::ALL[i % 16], format!("P{i}"))),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn external_batches_converge(seed in 0usize..6, batches in batches_strategy()) {
        let mut board = Blackboard::new(seeded_graph(seed), UndoHistory::new(HistoryConfig::unlimited()));
        check_converged(&board)?;

        for batch in &batches {
            for op in batch {
                apply_graph_op(board.graph_mut(), op);
            }
            board.handle_graph_changes();
            check_converged(&board)?;
        }
    }

    #[test]
    fn second_reconcile_is_noop(seed in 0usize..6, batch in prop::collection::vec(graph_op_strategy(), 1..8)) {
        let mut board = Blackboard::new(seeded_graph(seed), UndoHistory::new(HistoryConfig::unlimited()));
        for op in &batch {
            apply_graph_op(board.graph_mut(), op);
        }
        board.handle_graph_changes();
        let ids = board.mirror().ordered_ids();
        let handles = board.section().children().to_vec();

        let report = board.handle_graph_changes();
        prop_assert!(report.is_noop());
        prop_assert_eq!(board.mirror().ordered_ids(), ids);
        prop_assert_eq!(board.section().children(), handles.as_slice());
    }

    #[test]
    fn panel_ops_with_undo_converge(
        seed in 0usize..5,
        ops in prop::collection::vec(panel_op_strategy(), 1..24),
    ) {
        let mut board = Blackboard::new(seeded_graph(seed), UndoHistory::new(HistoryConfig::unlimited()));
        for op in &ops {
            match op {
                PanelOp::Create(kind) => {
                    board.create_property(PropertyKind::ALL[*kind % 16]);
                }
                PanelOp::Move(index, to) => {
                    if let Some(id) = id_at(board.graph(), *index) {
                        board.move_property(id, *to);
                    }
                }
                PanelOp::Rename(index, name) => {
                    if let Some(id) = id_at(board.graph(), *index) {
                        board.rename_property(id, name);
                    }
                }
                PanelOp::Path(text) => {
                    board.edit_path(text);
                }
                PanelOp::Undo => {
                    board.undo();
                }
                PanelOp::Redo => {
                    board.redo();
                }
            }
            check_converged(&board)?;
        }

        // Unwinding every checkpoint lands back on the seed graph.
        while board.undo().is_some() {}
        let names: Vec<&str> = board.rows().map(|row| row.text()).collect();
        let expected: Vec<String> = (0..seed).map(|i| format!("P{i}")).collect();
        prop_assert_eq!(names, expected);
        prop_assert_eq!(board.graph().path(), "");
    }
}
