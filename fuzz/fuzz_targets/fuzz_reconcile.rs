#![no_main]

use arbitrary::Arbitrary;
use bboard_core::graph::{NodeGraph, PropertyGraph};
use bboard_core::property::{Property, PropertyId, PropertyKind};
use bboard_widgets::Blackboard;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum Op {
    Add(u8),
    Remove(u8),
    Move(u8, u8),
    Rename(u8, String),
    Reconcile,
    Undo,
    Redo,
    PanelMove(u8, u8),
}

fn id_at(graph: &NodeGraph, index: u8) -> Option<PropertyId> {
    let properties = graph.properties();
    (!properties.is_empty()).then(|| properties[usize::from(index) % properties.len()].id())
}

fuzz_target!(|ops: Vec<Op>| {
    if ops.len() > 128 {
        return;
    }

    let mut board = Blackboard::with_history(NodeGraph::new(), &Default::default());
    for op in ops {
        match op {
            Op::Add(kind) => {
                let kind = PropertyKind::ALL[usize::from(kind) % PropertyKind::ALL.len()];
                let name = board.graph().sanitize_property_name("", kind, None);
                board.graph_mut().add_property(Property::named(kind, name));
            }
            Op::Remove(index) => {
                if let Some(id) = id_at(board.graph(), index) {
                    board.graph_mut().remove_property(id);
                }
            }
            Op::Move(index, to) => {
                if let Some(id) = id_at(board.graph(), index) {
                    board.graph_mut().move_property(id, usize::from(to));
                }
            }
            Op::Rename(index, name) => {
                if let Some(id) = id_at(board.graph(), index) {
                    board.rename_property(id, &name);
                }
            }
            Op::Reconcile => {
                board.handle_graph_changes();
            }
            Op::Undo => {
                board.handle_graph_changes();
                board.undo();
            }
            Op::Redo => {
                board.handle_graph_changes();
                board.redo();
            }
            Op::PanelMove(index, to) => {
                board.handle_graph_changes();
                if let Some(id) = id_at(board.graph(), index) {
                    board.move_property(id, usize::from(to));
                }
            }
        }
    }

    board.handle_graph_changes();
    let canonical: Vec<PropertyId> = board.graph().properties().iter().map(Property::id).collect();
    assert_eq!(board.mirror().ordered_ids(), canonical);
    assert_eq!(board.section().len(), canonical.len());
});
