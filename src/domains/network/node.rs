use crate::common::{NetworkError, NetworkResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type NodeId = u32;
pub type BehaviorId = u32;

/// Grid position of a node. No two nodes of a graph share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Raw placement parameters shared by every node kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeGeometry {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub radius: i32,
    pub speed: f64,
}

impl NodeGeometry {
    pub fn new(x: i32, y: i32, width: i32, height: i32, radius: i32, speed: f64) -> Self {
        Self { x, y, width, height, radius, speed }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.x, self.y)
    }

    /// Rejects non-positive dimensions and negative speed.
    pub fn validate(&self) -> NetworkResult<()> {
        for (name, value) in [("width", self.width), ("height", self.height), ("radius", self.radius)] {
            if value <= 0 {
                return Err(NetworkError::validation(format!(
                    "node {} must be positive, got {}",
                    name, value
                )));
            }
        }
        validate_non_negative("node speed", self.speed)
    }
}

/// Spawn settings of an entry point. A `limit` of 0 means unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EntryFlow {
    pub rate: f64,
    pub limit: u32,
}

impl EntryFlow {
    pub fn new(rate: f64, limit: u32) -> Self {
        Self { rate, limit }
    }

    pub fn validate(&self) -> NetworkResult<()> {
        validate_non_negative("entry rate", self.rate)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntryPoint {
    generation_percentage: BTreeMap<BehaviorId, f64>,
    entry_rate: f64,
    entry_limit: u32,
}

impl EntryPoint {
    pub fn generation_percentage(&self) -> &BTreeMap<BehaviorId, f64> {
        &self.generation_percentage
    }

    pub fn entry_rate(&self) -> f64 {
        self.entry_rate
    }

    pub fn entry_limit(&self) -> u32 {
        self.entry_limit
    }

    pub fn is_unlimited(&self) -> bool {
        self.entry_limit == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExitPoint {
    sinking_percentage: BTreeMap<BehaviorId, f64>,
    exit_rate: f64,
}

impl ExitPoint {
    pub fn sinking_percentage(&self) -> &BTreeMap<BehaviorId, f64> {
        &self.sinking_percentage
    }

    pub fn exit_rate(&self) -> f64 {
        self.exit_rate
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Regular,
    Entry(EntryPoint),
    Exit(ExitPoint),
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Regular => "regular node",
            NodeKind::Entry(_) => "entry point",
            NodeKind::Exit(_) => "exit point",
        }
    }
}

/// A beacon of the network. Only the percentage maps of entry and exit
/// points change after construction, and only through the builder.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    geometry: NodeGeometry,
    kind: NodeKind,
}

impl Node {
    pub fn regular(id: NodeId, geometry: NodeGeometry) -> NetworkResult<Self> {
        geometry.validate()?;
        Ok(Self { id, geometry, kind: NodeKind::Regular })
    }

    pub fn entry(id: NodeId, geometry: NodeGeometry, flow: EntryFlow) -> NetworkResult<Self> {
        geometry.validate()?;
        flow.validate()?;
        Ok(Self {
            id,
            geometry,
            kind: NodeKind::Entry(EntryPoint {
                generation_percentage: BTreeMap::new(),
                entry_rate: flow.rate,
                entry_limit: flow.limit,
            }),
        })
    }

    pub fn exit(id: NodeId, geometry: NodeGeometry, exit_rate: f64) -> NetworkResult<Self> {
        geometry.validate()?;
        validate_non_negative("exit rate", exit_rate)?;
        Ok(Self {
            id,
            geometry,
            kind: NodeKind::Exit(ExitPoint {
                sinking_percentage: BTreeMap::new(),
                exit_rate,
            }),
        })
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn x(&self) -> i32 {
        self.geometry.x
    }

    pub fn y(&self) -> i32 {
        self.geometry.y
    }

    pub fn coordinate(&self) -> Coordinate {
        self.geometry.coordinate()
    }

    pub fn width(&self) -> i32 {
        self.geometry.width
    }

    pub fn height(&self) -> i32 {
        self.geometry.height
    }

    pub fn radius(&self) -> i32 {
        self.geometry.radius
    }

    pub fn speed(&self) -> f64 {
        self.geometry.speed
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub(crate) fn add_generation_percentage(
        &mut self,
        behavior: BehaviorId,
        percentage: f64,
    ) -> NetworkResult<()> {
        validate_percentage(percentage)?;
        match &mut self.kind {
            NodeKind::Entry(entry) => {
                entry.generation_percentage.insert(behavior, percentage);
                Ok(())
            }
            _ => Err(NetworkError::WrongNodeKind {
                x: self.geometry.x,
                y: self.geometry.y,
                expected: "entry point",
            }),
        }
    }

    pub(crate) fn add_sinking_percentage(
        &mut self,
        behavior: BehaviorId,
        percentage: f64,
    ) -> NetworkResult<()> {
        validate_percentage(percentage)?;
        match &mut self.kind {
            NodeKind::Exit(exit) => {
                exit.sinking_percentage.insert(behavior, percentage);
                Ok(())
            }
            _ => Err(NetworkError::WrongNodeKind {
                x: self.geometry.x,
                y: self.geometry.y,
                expected: "exit point",
            }),
        }
    }
}

pub(crate) fn validate_percentage(percentage: f64) -> NetworkResult<()> {
    if !(0.0..=100.0).contains(&percentage) {
        return Err(NetworkError::validation(format!(
            "percentage must be within [0, 100], got {}",
            percentage
        )));
    }
    Ok(())
}

pub(crate) fn validate_non_negative(name: &str, value: f64) -> NetworkResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(NetworkError::validation(format!(
            "{} must be a finite non-negative number, got {}",
            name, value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> NodeGeometry {
        NodeGeometry::new(3, 4, 2, 2, 1, 1.5)
    }

    #[test]
    fn test_regular_node_keeps_geometry() {
        let node = Node::regular(7, geometry()).unwrap();
        assert_eq!(node.id(), 7);
        assert_eq!(node.coordinate(), Coordinate::new(3, 4));
        assert_eq!(node.width(), 2);
        assert_eq!(node.radius(), 1);
        assert_eq!(*node.kind(), NodeKind::Regular);
    }

    #[test]
    fn test_non_positive_dimensions_are_rejected() {
        let mut g = geometry();
        g.height = 0;
        assert!(matches!(Node::regular(0, g), Err(NetworkError::Validation { .. })));

        let mut g = geometry();
        g.radius = -1;
        assert!(matches!(Node::exit(0, g, 1.0), Err(NetworkError::Validation { .. })));
    }

    #[test]
    fn test_negative_speed_and_rates_are_rejected() {
        let mut g = geometry();
        g.speed = -0.5;
        assert!(Node::regular(0, g).is_err());
        assert!(Node::entry(0, geometry(), EntryFlow::new(-1.0, 0)).is_err());
        assert!(Node::exit(0, geometry(), f64::NAN).is_err());
    }

    #[test]
    fn test_percentages_only_apply_to_matching_kind() {
        let mut entry = Node::entry(0, geometry(), EntryFlow::new(2.0, 0)).unwrap();
        entry.add_generation_percentage(1, 60.0).unwrap();
        entry.add_generation_percentage(2, 60.0).unwrap();
        match entry.kind() {
            NodeKind::Entry(e) => {
                assert_eq!(e.generation_percentage().len(), 2);
                assert!(e.is_unlimited());
            }
            other => panic!("Expected entry point, got {:?}", other),
        }

        let result = entry.add_sinking_percentage(1, 10.0);
        assert!(matches!(result, Err(NetworkError::WrongNodeKind { expected: "exit point", .. })));
    }

    #[test]
    fn test_percentage_out_of_range() {
        let mut exit = Node::exit(0, geometry(), 1.0).unwrap();
        assert!(exit.add_sinking_percentage(1, 100.5).is_err());
        assert!(exit.add_sinking_percentage(1, -0.1).is_err());
        assert!(exit.add_sinking_percentage(1, 100.0).is_ok());
    }
}
