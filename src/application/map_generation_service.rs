use crate::common::ApplicationResult;
use crate::domains::logger::DynLogger;
use crate::domains::netlogo::MapWriter;
use crate::domains::network::{Graph, GraphBuilder, NetworkSource};
use std::sync::Arc;

/// Counts of what ended up in a generated map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationReport {
    pub nodes: usize,
    pub edges: usize,
    pub behaviors: usize,
}

impl GenerationReport {
    fn of(graph: &Graph) -> Self {
        Self {
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            behaviors: graph.behavior_count(),
        }
    }
}

/// Loads a network description, builds and validates the graph, then
/// compiles it into a map script.
pub struct MapGenerationService {
    source: Arc<dyn NetworkSource>,
    writer: Arc<dyn MapWriter>,
    logger: DynLogger,
}

impl MapGenerationService {
    pub fn new(source: Arc<dyn NetworkSource>, writer: Arc<dyn MapWriter>, logger: DynLogger) -> Self {
        Self { source, writer, logger }
    }

    pub fn build_graph(&self, description: &str) -> ApplicationResult<Graph> {
        let network = self.source.load_description(description).inspect_err(|e| {
            self.logger.error(&format!("Failed to load {}: {}", description, e));
        })?;

        let mut builder = GraphBuilder::new();
        let graph = network.apply(&mut builder).inspect_err(|e| {
            self.logger.error(&format!("Network {} rejected: {}", description, e));
        })?;

        self.logger.info(&format!(
            "Network {} built: {} nodes, {} edges, {} behaviors",
            description,
            graph.node_count(),
            graph.edge_count(),
            graph.behavior_count()
        ));
        Ok(graph)
    }

    pub fn generate(&self, description: &str) -> ApplicationResult<GenerationReport> {
        let graph = self.build_graph(description)?;
        self.writer.write_map(&graph).inspect_err(|e| {
            self.logger.error(&format!("Map generation for {} failed: {}", description, e));
        })?;

        let report = GenerationReport::of(&graph);
        self.logger.info(&format!("Map for {} written", description));
        Ok(report)
    }
}
