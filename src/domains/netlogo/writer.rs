use crate::common::EmitResult;
use crate::domains::network::Graph;

/// Port for persisting a compiled map script (filesystem, in-memory, ...).
pub trait MapWriter: Send + Sync {
    fn write_map(&self, graph: &Graph) -> EmitResult<()>;
}
