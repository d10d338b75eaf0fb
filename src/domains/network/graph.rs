use super::behavior::Behavior;
use super::edge::Edge;
use super::node::{BehaviorId, Coordinate, Node, NodeId};
use crate::common::{NetworkError, NetworkResult};
use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::{BTreeMap, HashMap};

/// Owns the nodes, edges and behaviors of one network.
///
/// Nodes and edges keep insertion order, which is the order the emitter
/// renders them in. Nodes are indexed both by id and by coordinate.
///
/// Only [`GraphBuilder`](super::GraphBuilder) inserts into a graph, so a
/// graph released by `finalize` can no longer change:
///
/// ```compile_fail
/// use beacon_net::domains::network::{GraphBuilder, Node, NodeGeometry};
///
/// let mut builder = GraphBuilder::new();
/// builder.build_graph();
/// let mut graph = builder.finalize().unwrap();
/// let stray = Node::regular(1, NodeGeometry::new(9, 9, 1, 1, 1, 0.0)).unwrap();
/// graph.add_node(stray).unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    by_id: HashMap<NodeId, usize>,
    by_coordinate: HashMap<Coordinate, usize>,
    edges: Vec<Edge>,
    behaviors: BTreeMap<BehaviorId, Behavior>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add_node(&mut self, node: Node) -> NetworkResult<()> {
        let coordinate = node.coordinate();
        if self.by_coordinate.contains_key(&coordinate) {
            return Err(NetworkError::DuplicateCoordinate { x: coordinate.x, y: coordinate.y });
        }
        if self.by_id.contains_key(&node.id()) {
            return Err(NetworkError::DuplicateId { kind: "node", id: node.id() });
        }

        let index = self.nodes.len();
        self.by_id.insert(node.id(), index);
        self.by_coordinate.insert(coordinate, index);
        self.nodes.push(node);
        Ok(())
    }

    pub(crate) fn add_edge(&mut self, edge: Edge) -> NetworkResult<()> {
        for endpoint in [edge.source(), edge.target()] {
            if !self.by_id.contains_key(&endpoint) {
                return Err(NetworkError::NoSuchNodeId { id: endpoint });
            }
        }
        self.edges.push(edge);
        Ok(())
    }

    pub(crate) fn add_behavior(&mut self, behavior: Behavior) -> NetworkResult<()> {
        if self.behaviors.contains_key(&behavior.id()) {
            return Err(NetworkError::DuplicateId { kind: "behavior", id: behavior.id() });
        }
        self.behaviors.insert(behavior.id(), behavior);
        Ok(())
    }

    pub fn node_at(&self, x: i32, y: i32) -> NetworkResult<&Node> {
        self.by_coordinate
            .get(&Coordinate::new(x, y))
            .map(|&index| &self.nodes[index])
            .ok_or(NetworkError::NoSuchNode { x, y })
    }

    pub(crate) fn node_at_mut(&mut self, x: i32, y: i32) -> NetworkResult<&mut Node> {
        match self.by_coordinate.get(&Coordinate::new(x, y)) {
            Some(&index) => Ok(&mut self.nodes[index]),
            None => Err(NetworkError::NoSuchNode { x, y }),
        }
    }

    pub fn node(&self, id: NodeId) -> NetworkResult<&Node> {
        self.by_id
            .get(&id)
            .map(|&index| &self.nodes[index])
            .ok_or(NetworkError::NoSuchNodeId { id })
    }

    pub fn behavior(&self, id: BehaviorId) -> NetworkResult<&Behavior> {
        self.behaviors.get(&id).ok_or(NetworkError::NoSuchBehavior { id })
    }

    pub(crate) fn behavior_mut(&mut self, id: BehaviorId) -> NetworkResult<&mut Behavior> {
        self.behaviors.get_mut(&id).ok_or(NetworkError::NoSuchBehavior { id })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn behaviors(&self) -> impl Iterator<Item = &Behavior> {
        self.behaviors.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn behavior_count(&self) -> usize {
        self.behaviors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Largest `x` over all nodes, 0 for an empty graph.
    pub fn max_east_coordinate(&self) -> i32 {
        self.nodes.iter().map(Node::x).max().unwrap_or(0)
    }

    /// Largest `y` over all nodes, 0 for an empty graph.
    pub fn max_north_coordinate(&self) -> i32 {
        self.nodes.iter().map(Node::y).max().unwrap_or(0)
    }

    /// True when every node is reachable from every other one, treating
    /// directed edges as plain links. Graphs with zero or one node pass.
    pub fn validate_connected_nodes(&self) -> bool {
        let mut links: UnGraph<NodeId, ()> =
            UnGraph::with_capacity(self.nodes.len(), self.edges.len());
        let indices: HashMap<NodeId, NodeIndex> = self
            .nodes
            .iter()
            .map(|node| (node.id(), links.add_node(node.id())))
            .collect();

        for edge in &self.edges {
            if let (Some(&a), Some(&b)) = (indices.get(&edge.source()), indices.get(&edge.target())) {
                links.add_edge(a, b, ());
            }
        }

        connected_components(&links) <= 1
    }
}
