use super::node::{validate_non_negative, NodeId};
use crate::common::{NetworkError, NetworkResult};

/// Endpoints and street attributes shared by both edge kinds.
/// Endpoints are node ids; the graph owns the nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub source: NodeId,
    pub target: NodeId,
    pub width: i32,
    pub weight: f64,
}

impl Link {
    pub fn validate(width: i32, weight: f64) -> NetworkResult<()> {
        if width <= 0 {
            return Err(NetworkError::validation(format!(
                "edge width must be positive, got {}",
                width
            )));
        }
        validate_non_negative("edge weight", weight)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Edge {
    Directed(Link),
    /// Source and target order is construction order only.
    Undirected(Link),
}

impl Edge {
    pub fn directed(source: NodeId, target: NodeId, width: i32, weight: f64) -> NetworkResult<Self> {
        Link::validate(width, weight)?;
        Ok(Edge::Directed(Link { source, target, width, weight }))
    }

    pub fn undirected(source: NodeId, target: NodeId, width: i32, weight: f64) -> NetworkResult<Self> {
        Link::validate(width, weight)?;
        Ok(Edge::Undirected(Link { source, target, width, weight }))
    }

    pub fn link(&self) -> &Link {
        match self {
            Edge::Directed(link) | Edge::Undirected(link) => link,
        }
    }

    pub fn source(&self) -> NodeId {
        self.link().source
    }

    pub fn target(&self) -> NodeId {
        self.link().target
    }

    pub fn width(&self) -> i32 {
        self.link().width
    }

    pub fn weight(&self) -> f64 {
        self.link().weight
    }

    pub fn is_directed(&self) -> bool {
        matches!(self, Edge::Directed(_))
    }
}
