use super::node::{BehaviorId, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorKind {
    Visit,
    Evacuate,
}

/// An agent behavior profile and the nodes it cares about.
/// Keeping core and optional sets disjoint is up to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Behavior {
    id: BehaviorId,
    kind: BehaviorKind,
    core_interest_points: BTreeSet<NodeId>,
    optional_interest_points: BTreeSet<NodeId>,
}

impl Behavior {
    pub fn new(id: BehaviorId, kind: BehaviorKind) -> Self {
        Self {
            id,
            kind,
            core_interest_points: BTreeSet::new(),
            optional_interest_points: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> BehaviorId {
        self.id
    }

    pub fn kind(&self) -> BehaviorKind {
        self.kind
    }

    pub fn core_interest_points(&self) -> &BTreeSet<NodeId> {
        &self.core_interest_points
    }

    pub fn optional_interest_points(&self) -> &BTreeSet<NodeId> {
        &self.optional_interest_points
    }

    pub(crate) fn add_core_interest_point(&mut self, node: NodeId) {
        self.core_interest_points.insert(node);
    }

    pub(crate) fn add_optional_interest_point(&mut self, node: NodeId) {
        self.optional_interest_points.insert(node);
    }
}
