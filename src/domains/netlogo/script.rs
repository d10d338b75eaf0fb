use crate::common::EmitResult;
use crate::domains::network::{Edge, Graph, Node, NodeKind};

/// Renders the `generate-map`, `generate-beacons` and `connect-beacons`
/// procedures for `graph`, one line per entry.
pub fn generate_map_block(graph: &Graph) -> EmitResult<Vec<String>> {
    let mut lines = Vec::new();

    lines.push("to generate-map".to_string());
    lines.push(format!("  let new-world-width 2 * world-offset + {}", graph.max_east_coordinate()));
    lines.push(format!("  let new-world-height 2 * world-offset + {}", graph.max_north_coordinate()));
    lines.push("  resize-world 0 new-world-width 0 new-world-height".to_string());
    for procedure in [
        "generate-beacons",
        "generate-interest-points",
        "connect-beacons",
        "draw-squares",
        "draw-streets",
        "make-patches-non-wall",
    ] {
        lines.push(format!("  {}", procedure));
    }
    lines.push("end ".to_string());
    lines.push(String::new());

    lines.push("to generate-beacons".to_string());
    for node in graph.nodes() {
        render_node(node, &mut lines);
    }
    lines.push("end".to_string());

    lines.push("to connect-beacons".to_string());
    for edge in graph.edges() {
        render_edge(graph, edge, &mut lines)?;
    }
    lines.push("end".to_string());

    Ok(lines)
}

fn patch(x: i32, y: i32) -> String {
    format!("patch (world-offset + {}) (world-offset + {})", x, y)
}

fn render_node(node: &Node, lines: &mut Vec<String>) {
    let marker = match node.kind() {
        NodeKind::Regular => "make-beacon-normal",
        NodeKind::Entry(_) => "make-beacon-entry",
        NodeKind::Exit(_) => "make-beacon-exit",
    };

    lines.push(format!("  ask {} [sprout-beacons 1 [", patch(node.x(), node.y())));
    lines.push(format!("    {}", marker));
    lines.push(format!("    set intersection-width {}", node.width()));
    lines.push(format!("    set intersection-height {}", node.height()));
    lines.push(format!("    set intersection-radius {}", node.radius()));

    match node.kind() {
        NodeKind::Regular => {}
        NodeKind::Entry(entry) => {
            for (behavior, percentage) in entry.generation_percentage() {
                lines.push(format!(
                    "    set entry-percentages lput [{} {}] entry-percentages",
                    behavior, percentage
                ));
            }
            lines.push(format!("    set entry-rate {}", entry.entry_rate()));
            if entry.is_unlimited() {
                lines.push("    set entry-limit 0".to_string());
                lines.push("    set entry-infinity? true".to_string());
            } else {
                lines.push(format!("    set entry-limit {}", entry.entry_limit()));
                lines.push("    set entry-infinity? false".to_string());
            }
        }
        NodeKind::Exit(exit) => {
            for (behavior, percentage) in exit.sinking_percentage() {
                lines.push(format!(
                    "    set exit-percentages lput [{} {}] exit-percentages",
                    behavior, percentage
                ));
            }
            lines.push(format!("    set exit-rate {}", exit.exit_rate()));
        }
    }

    lines.push("  ]]".to_string());
}

fn render_edge(graph: &Graph, edge: &Edge, lines: &mut Vec<String>) -> EmitResult<()> {
    let source = graph.node(edge.source())?;
    let target = graph.node(edge.target())?;
    let command = match edge {
        Edge::Directed(_) => "create-directed-streets-to",
        Edge::Undirected(_) => "create-streets-with",
    };

    lines.push(format!("  ask beacons-on {} [", patch(source.x(), source.y())));
    lines.push(format!("    {} beacons-on {} [", command, patch(target.x(), target.y())));
    lines.push(format!("      set weight {}", edge.weight()));
    lines.push(format!("      set street-width {}]]", edge.width()));
    Ok(())
}
