use super::behavior::BehaviorKind;
use super::builder::GraphBuilder;
use super::graph::Graph;
use super::node::{BehaviorId, Coordinate, EntryFlow, NodeGeometry};
use crate::common::{NetworkError, NetworkResult};
use serde::{Deserialize, Serialize};

/// Declarative form of a network, as read from a TOML or JSON file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkDescription {
    #[serde(default)]
    pub behaviors: Vec<BehaviorDescription>,
    #[serde(default)]
    pub nodes: Vec<NodeDescription>,
    #[serde(default)]
    pub edges: Vec<EdgeDescription>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorDescription {
    pub id: BehaviorId,
    pub kind: BehaviorKind,
    #[serde(default)]
    pub core_interest_points: Vec<Coordinate>,
    #[serde(default)]
    pub optional_interest_points: Vec<Coordinate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKindDescription {
    #[default]
    Regular,
    Entry,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDescription {
    #[serde(default)]
    pub kind: NodeKindDescription,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub radius: i32,
    #[serde(default)]
    pub speed: f64,
    /// Entry or exit rate. Must stay 0 on regular nodes.
    #[serde(default)]
    pub rate: f64,
    /// Entry limit, 0 for unlimited. Only entry points may set it.
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub percentages: Vec<PercentageDescription>,
}

impl NodeDescription {
    pub fn geometry(&self) -> NodeGeometry {
        NodeGeometry::new(self.x, self.y, self.width, self.height, self.radius, self.speed)
    }

    /// Rejects a `rate` or `limit` the node kind has no use for.
    fn check_kind_fields(&self) -> NetworkResult<()> {
        let expected = match self.kind {
            NodeKindDescription::Regular if self.rate != 0.0 => "entry point or exit point",
            NodeKindDescription::Regular | NodeKindDescription::Exit if self.limit != 0 => "entry point",
            _ => return Ok(()),
        };
        Err(NetworkError::WrongNodeKind { x: self.x, y: self.y, expected })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentageDescription {
    pub behavior: BehaviorId,
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeDescription {
    pub source: Coordinate,
    pub target: Coordinate,
    pub width: i32,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub directed: bool,
}

impl NetworkDescription {
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Replays the description into `builder` and finalizes the result.
    ///
    /// Behaviors go first so percentages can refer to them, then nodes,
    /// their percentages, interest points and finally edges.
    pub fn apply(&self, builder: &mut GraphBuilder) -> NetworkResult<Graph> {
        builder.build_graph();

        for behavior in &self.behaviors {
            match behavior.kind {
                BehaviorKind::Visit => builder.build_visit_behavior(behavior.id)?,
                BehaviorKind::Evacuate => builder.build_evacuate_behavior(behavior.id)?,
            }
        }

        for node in &self.nodes {
            node.check_kind_fields()?;
            match node.kind {
                NodeKindDescription::Regular => builder.build_regular_node(node.geometry())?,
                NodeKindDescription::Entry => {
                    builder.build_entry_point(node.geometry(), EntryFlow::new(node.rate, node.limit))?
                }
                NodeKindDescription::Exit => builder.build_exit_point(node.geometry(), node.rate)?,
            };
        }

        for node in &self.nodes {
            for share in &node.percentages {
                match node.kind {
                    NodeKindDescription::Exit => {
                        builder.build_sinking_percentage(node.x, node.y, share.behavior, share.percentage)?
                    }
                    // regular nodes are rejected by the builder
                    _ => builder.build_generation_percentage(node.x, node.y, share.behavior, share.percentage)?,
                }
            }
        }

        for behavior in &self.behaviors {
            for point in &behavior.core_interest_points {
                builder.build_interest_point_on_behavior(point.x, point.y, behavior.id, false)?;
            }
            for point in &behavior.optional_interest_points {
                builder.build_interest_point_on_behavior(point.x, point.y, behavior.id, true)?;
            }
        }

        for edge in &self.edges {
            let source = (edge.source.x, edge.source.y);
            let target = (edge.target.x, edge.target.y);
            if edge.directed {
                builder.build_directed_edge(source, target, edge.width, edge.weight)?;
            } else {
                builder.build_undirected_edge(source, target, edge.width, edge.weight)?;
            }
        }

        builder.finalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::network::node::NodeKind;

    const CROSSING: &str = r#"
[[behaviors]]
id = 1
kind = "visit"
core_interest_points = [{ x = 4, y = 0 }]

[[nodes]]
kind = "entry"
x = 0
y = 0
width = 2
height = 2
radius = 1
rate = 0.5
percentages = [{ behavior = 1, percentage = 100.0 }]

[[nodes]]
x = 4
y = 0
width = 2
height = 2
radius = 1

[[nodes]]
kind = "exit"
x = 4
y = 6
width = 2
height = 2
radius = 1
rate = 1.0

[[edges]]
source = { x = 0, y = 0 }
target = { x = 4, y = 0 }
width = 1
weight = 4.0

[[edges]]
source = { x = 4, y = 0 }
target = { x = 4, y = 6 }
width = 1
weight = 6.0
directed = true
"#;

    #[test]
    fn test_toml_description_builds_graph() {
        let description = NetworkDescription::from_toml_str(CROSSING).unwrap();
        let mut builder = GraphBuilder::new();
        let graph = description.apply(&mut builder).unwrap();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.edges()[1].is_directed());
        assert!(graph.behavior(1).unwrap().core_interest_points().contains(&1));
        match graph.node_at(0, 0).unwrap().kind() {
            NodeKind::Entry(entry) => {
                assert_eq!(entry.generation_percentage().get(&1), Some(&100.0));
                assert!(entry.is_unlimited());
            }
            other => panic!("Expected entry point, got {:?}", other),
        }
    }

    #[test]
    fn test_json_description_with_unlinked_node() {
        let json = r#"{
            "nodes": [
                { "x": 0, "y": 0, "width": 1, "height": 1, "radius": 1 },
                { "x": 3, "y": 3, "width": 1, "height": 1, "radius": 1 }
            ]
        }"#;
        let description = NetworkDescription::from_json_str(json).unwrap();
        let mut builder = GraphBuilder::new();
        assert_eq!(description.apply(&mut builder).unwrap_err(), NetworkError::IncompleteGraph);
    }

    #[test]
    fn test_percentage_on_regular_node_is_rejected() {
        let json = r#"{
            "behaviors": [{ "id": 2, "kind": "evacuate" }],
            "nodes": [
                { "x": 0, "y": 0, "width": 1, "height": 1, "radius": 1,
                  "percentages": [{ "behavior": 2, "percentage": 50.0 }] }
            ]
        }"#;
        let description = NetworkDescription::from_json_str(json).unwrap();
        let mut builder = GraphBuilder::new();
        assert!(matches!(
            description.apply(&mut builder),
            Err(NetworkError::WrongNodeKind { x: 0, y: 0, .. })
        ));
    }

    #[test]
    fn test_rate_on_regular_node_is_rejected() {
        let json = r#"{
            "nodes": [{ "x": 2, "y": 5, "width": 1, "height": 1, "radius": 1, "rate": 3.0 }]
        }"#;
        let description = NetworkDescription::from_json_str(json).unwrap();
        let mut builder = GraphBuilder::new();
        assert_eq!(
            description.apply(&mut builder).unwrap_err(),
            NetworkError::WrongNodeKind { x: 2, y: 5, expected: "entry point or exit point" }
        );
        assert_eq!(builder.product().map(Graph::node_count), Some(0));
    }

    #[test]
    fn test_limit_outside_entry_point_is_rejected() {
        let json = r#"{
            "nodes": [
                { "kind": "entry", "x": 0, "y": 0, "width": 1, "height": 1, "radius": 1, "limit": 20 },
                { "kind": "exit", "x": 1, "y": 0, "width": 1, "height": 1, "radius": 1, "limit": 5 }
            ]
        }"#;
        let description = NetworkDescription::from_json_str(json).unwrap();
        let mut builder = GraphBuilder::new();
        assert_eq!(
            description.apply(&mut builder).unwrap_err(),
            NetworkError::WrongNodeKind { x: 1, y: 0, expected: "entry point" }
        );
    }
}
