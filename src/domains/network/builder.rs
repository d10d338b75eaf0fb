use super::behavior::{Behavior, BehaviorKind};
use super::edge::Edge;
use super::graph::Graph;
use super::node::{BehaviorId, EntryFlow, Node, NodeGeometry, NodeId};
use crate::common::{NetworkError, NetworkResult};
use tracing::{debug, warn};

/// The only mutation surface for assembling a [`Graph`].
///
/// `build_graph` starts a new product and must come first. Nodes get dense
/// ids from a single counter shared by all node kinds. Edges and interest
/// points refer to nodes by coordinate, so their nodes must already be placed.
/// `finalize` checks connectivity and hands the graph over; the builder then
/// needs another `build_graph` before it accepts more calls.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    product: Option<Graph>,
    last_id: NodeId,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build_graph(&mut self) {
        self.product = Some(Graph::new());
        self.last_id = 0;
    }

    pub fn build_regular_node(&mut self, geometry: NodeGeometry) -> NetworkResult<NodeId> {
        let node = Node::regular(self.last_id, geometry)?;
        self.place(node)
    }

    pub fn build_entry_point(&mut self, geometry: NodeGeometry, flow: EntryFlow) -> NetworkResult<NodeId> {
        let node = Node::entry(self.last_id, geometry, flow)?;
        self.place(node)
    }

    pub fn build_exit_point(&mut self, geometry: NodeGeometry, exit_rate: f64) -> NetworkResult<NodeId> {
        let node = Node::exit(self.last_id, geometry, exit_rate)?;
        self.place(node)
    }

    pub fn build_directed_edge(
        &mut self,
        source: (i32, i32),
        target: (i32, i32),
        width: i32,
        weight: f64,
    ) -> NetworkResult<()> {
        let (source, target) = self.resolve_endpoints(source, target)?;
        let edge = Edge::directed(source, target, width, weight)?;
        self.connect(edge)
    }

    pub fn build_undirected_edge(
        &mut self,
        source: (i32, i32),
        target: (i32, i32),
        width: i32,
        weight: f64,
    ) -> NetworkResult<()> {
        let (source, target) = self.resolve_endpoints(source, target)?;
        let edge = Edge::undirected(source, target, width, weight)?;
        self.connect(edge)
    }

    pub fn build_visit_behavior(&mut self, id: BehaviorId) -> NetworkResult<()> {
        self.register_behavior(Behavior::new(id, BehaviorKind::Visit))
    }

    pub fn build_evacuate_behavior(&mut self, id: BehaviorId) -> NetworkResult<()> {
        self.register_behavior(Behavior::new(id, BehaviorKind::Evacuate))
    }

    pub fn build_interest_point_on_behavior(
        &mut self,
        x: i32,
        y: i32,
        behavior: BehaviorId,
        optional: bool,
    ) -> NetworkResult<()> {
        let graph = self.product_mut()?;
        let node = graph.node_at(x, y)?.id();
        let behavior = graph.behavior_mut(behavior)?;
        if optional {
            behavior.add_optional_interest_point(node);
        } else {
            behavior.add_core_interest_point(node);
        }
        debug!(node, behavior = behavior.id(), optional, "interest point added");
        Ok(())
    }

    /// Sets the share of agents of `behavior` generated at the entry point at `(x, y)`.
    pub fn build_generation_percentage(
        &mut self,
        x: i32,
        y: i32,
        behavior: BehaviorId,
        percentage: f64,
    ) -> NetworkResult<()> {
        let graph = self.product_mut()?;
        graph.behavior(behavior)?;
        graph.node_at_mut(x, y)?.add_generation_percentage(behavior, percentage)
    }

    /// Sets the share of agents of `behavior` absorbed at the exit point at `(x, y)`.
    pub fn build_sinking_percentage(
        &mut self,
        x: i32,
        y: i32,
        behavior: BehaviorId,
        percentage: f64,
    ) -> NetworkResult<()> {
        let graph = self.product_mut()?;
        graph.behavior(behavior)?;
        graph.node_at_mut(x, y)?.add_sinking_percentage(behavior, percentage)
    }

    /// Releases the product once every node is linked to the rest.
    /// On failure the product stays in the builder so more edges can be added.
    pub fn finalize(&mut self) -> NetworkResult<Graph> {
        let graph = self.product.as_ref().ok_or(NetworkError::BuilderNotStarted)?;
        if !graph.validate_connected_nodes() {
            warn!(nodes = graph.node_count(), edges = graph.edge_count(), "graph has unlinked nodes");
            return Err(NetworkError::IncompleteGraph);
        }
        self.product.take().ok_or(NetworkError::BuilderNotStarted)
    }

    /// The graph under construction, if any.
    pub fn product(&self) -> Option<&Graph> {
        self.product.as_ref()
    }

    fn product_mut(&mut self) -> NetworkResult<&mut Graph> {
        self.product.as_mut().ok_or(NetworkError::BuilderNotStarted)
    }

    fn place(&mut self, node: Node) -> NetworkResult<NodeId> {
        let id = node.id();
        let kind = node.kind().name();
        let (x, y) = (node.x(), node.y());
        self.product_mut()?.add_node(node)?;
        self.last_id += 1;
        debug!(id, x, y, kind, "node placed");
        Ok(id)
    }

    fn connect(&mut self, edge: Edge) -> NetworkResult<()> {
        self.product_mut()?.add_edge(edge)?;
        debug!(
            source = edge.source(),
            target = edge.target(),
            directed = edge.is_directed(),
            "edge added"
        );
        Ok(())
    }

    fn register_behavior(&mut self, behavior: Behavior) -> NetworkResult<()> {
        let id = behavior.id();
        self.product_mut()?.add_behavior(behavior)?;
        debug!(id, "behavior registered");
        Ok(())
    }

    fn resolve_endpoints(
        &self,
        (source_x, source_y): (i32, i32),
        (target_x, target_y): (i32, i32),
    ) -> NetworkResult<(NodeId, NodeId)> {
        let graph = self.product.as_ref().ok_or(NetworkError::BuilderNotStarted)?;
        let source = graph.node_at(source_x, source_y)?.id();
        let target = graph.node_at(target_x, target_y)?.id();
        Ok((source, target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::network::node::NodeKind;

    fn at(x: i32, y: i32) -> NodeGeometry {
        NodeGeometry::new(x, y, 2, 2, 1, 1.0)
    }

    fn started() -> GraphBuilder {
        let mut builder = GraphBuilder::new();
        builder.build_graph();
        builder
    }

    #[test]
    fn test_calls_before_build_graph_fail() {
        let mut builder = GraphBuilder::new();
        assert_eq!(builder.build_regular_node(at(0, 0)), Err(NetworkError::BuilderNotStarted));
        assert_eq!(builder.build_visit_behavior(1), Err(NetworkError::BuilderNotStarted));
        assert_eq!(builder.finalize().unwrap_err(), NetworkError::BuilderNotStarted);
    }

    #[test]
    fn test_ids_are_dense_across_node_kinds() {
        let mut builder = started();
        assert_eq!(builder.build_regular_node(at(0, 0)), Ok(0));
        assert_eq!(builder.build_entry_point(at(1, 0), EntryFlow::new(1.0, 0)), Ok(1));
        // a rejected node does not consume an id
        assert!(builder.build_exit_point(at(1, 0), 1.0).is_err());
        assert_eq!(builder.build_exit_point(at(2, 0), 1.0), Ok(2));

        let graph = builder.product().unwrap();
        for (expected, node) in graph.nodes().iter().enumerate() {
            assert_eq!(node.id() as usize, expected);
        }
    }

    #[test]
    fn test_build_graph_resets_state() {
        let mut builder = started();
        builder.build_regular_node(at(0, 0)).unwrap();
        builder.build_regular_node(at(1, 0)).unwrap();

        builder.build_graph();
        assert_eq!(builder.product().unwrap().node_count(), 0);
        assert_eq!(builder.build_regular_node(at(0, 0)), Ok(0));
    }

    #[test]
    fn test_edge_to_unplaced_coordinate() {
        let mut builder = started();
        builder.build_regular_node(at(0, 0)).unwrap();
        let result = builder.build_undirected_edge((0, 0), (5, 5), 1, 1.0);
        assert_eq!(result, Err(NetworkError::NoSuchNode { x: 5, y: 5 }));
        assert_eq!(builder.product().unwrap().edge_count(), 0);
    }

    #[test]
    fn test_interest_points() {
        let mut builder = started();
        builder.build_regular_node(at(0, 0)).unwrap();
        builder.build_regular_node(at(1, 0)).unwrap();
        builder.build_evacuate_behavior(9).unwrap();

        builder.build_interest_point_on_behavior(0, 0, 9, false).unwrap();
        builder.build_interest_point_on_behavior(1, 0, 9, true).unwrap();
        assert_eq!(
            builder.build_interest_point_on_behavior(3, 3, 9, true),
            Err(NetworkError::NoSuchNode { x: 3, y: 3 })
        );
        assert_eq!(
            builder.build_interest_point_on_behavior(0, 0, 2, true),
            Err(NetworkError::NoSuchBehavior { id: 2 })
        );

        let behavior = builder.product().unwrap().behavior(9).unwrap();
        assert_eq!(behavior.kind(), BehaviorKind::Evacuate);
        assert!(behavior.core_interest_points().contains(&0));
        assert!(behavior.optional_interest_points().contains(&1));
        assert_eq!(behavior.optional_interest_points().len(), 1);
    }

    #[test]
    fn test_percentages() {
        let mut builder = started();
        builder.build_visit_behavior(1).unwrap();
        builder.build_entry_point(at(0, 0), EntryFlow::new(0.5, 10)).unwrap();
        builder.build_exit_point(at(1, 0), 2.0).unwrap();

        builder.build_generation_percentage(0, 0, 1, 75.0).unwrap();
        builder.build_sinking_percentage(1, 0, 1, 100.0).unwrap();
        assert_eq!(
            builder.build_generation_percentage(0, 0, 3, 10.0),
            Err(NetworkError::NoSuchBehavior { id: 3 })
        );
        assert!(matches!(
            builder.build_generation_percentage(1, 0, 1, 10.0),
            Err(NetworkError::WrongNodeKind { x: 1, y: 0, .. })
        ));

        match builder.product().unwrap().node_at(0, 0).unwrap().kind() {
            NodeKind::Entry(entry) => {
                assert_eq!(entry.generation_percentage().get(&1), Some(&75.0));
                assert_eq!(entry.entry_limit(), 10);
            }
            other => panic!("Expected entry point, got {:?}", other),
        }
    }

    #[test]
    fn test_finalize_requires_connected_graph() {
        let mut builder = started();
        builder.build_regular_node(at(0, 0)).unwrap();
        builder.build_regular_node(at(1, 0)).unwrap();
        builder.build_regular_node(at(2, 0)).unwrap();
        builder.build_undirected_edge((0, 0), (1, 0), 1, 1.0).unwrap();

        assert_eq!(builder.finalize().unwrap_err(), NetworkError::IncompleteGraph);

        builder.build_directed_edge((1, 0), (2, 0), 1, 1.0).unwrap();
        let graph = builder.finalize().unwrap();
        assert!(graph.validate_connected_nodes());
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);

        // the product has been handed over
        assert!(builder.product().is_none());
    }

    #[test]
    fn test_empty_graph_finalizes() {
        let mut builder = started();
        let graph = builder.finalize().unwrap();
        assert!(graph.is_empty());
    }
}
