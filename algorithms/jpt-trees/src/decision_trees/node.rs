use std::collections::BTreeMap;

use jpt::{Constraint, Distribution, Expectation, Variable};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Identifier of a node, also its index in the node table of the tree
pub type NodeId = usize;

/// The conjunction of per-variable constraints from the root to a node, keyed by variable index
pub type Path = BTreeMap<usize, Constraint>;

/// An inner node splitting on one variable
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug)]
pub struct DecisionNode {
    variable: usize,
    constraints: Vec<Constraint>,
    children: Vec<Option<NodeId>>,
}

impl DecisionNode {
    pub(crate) fn new(variable: usize, constraints: Vec<Constraint>) -> Self {
        let children = vec![None; constraints.len()];
        DecisionNode {
            variable,
            constraints,
            children,
        }
    }

    /// Index of the split variable
    pub fn variable(&self) -> usize {
        self.variable
    }

    /// Pairwise disjoint constraints, one per child slot
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Children in the order of the constraints, `None` for slots no training row reached
    pub fn children(&self) -> &[Option<NodeId>] {
        &self.children
    }

    pub(crate) fn set_child(&mut self, slot: usize, child: NodeId) {
        self.children[slot] = Some(child);
    }
}

/// A leaf holding one fitted distribution per variable
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug)]
pub struct Leaf {
    distributions: Vec<Distribution>,
}

impl Leaf {
    pub(crate) fn new(distributions: Vec<Distribution>) -> Self {
        Leaf { distributions }
    }

    /// Distributions in the order of the tree's variables
    pub fn distributions(&self) -> &[Distribution] {
        &self.distributions
    }

    pub fn distribution(&self, variable: usize) -> &Distribution {
        &self.distributions[variable]
    }

    /// The expectation of every variable in this leaf
    pub fn expectations(&self) -> Vec<Expectation> {
        self.distributions.iter().map(|d| d.expectation()).collect()
    }
}

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug)]
pub enum NodeKind {
    Decision(DecisionNode),
    Leaf(Leaf),
}

/// A node in the joint probability tree
///
/// The parent is referenced by its id in the node table of the tree, `slot` is the index of the
/// edge of the parent that leads to this node.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug)]
pub struct Node {
    id: NodeId,
    parent: Option<NodeId>,
    slot: usize,
    samples: usize,
    kind: NodeKind,
}

impl Node {
    pub(crate) fn new(
        id: NodeId,
        parent: Option<NodeId>,
        slot: usize,
        samples: usize,
        kind: NodeKind,
    ) -> Self {
        Node {
            id,
            parent,
            slot,
            samples,
            kind,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Index of the parent's edge leading to this node
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Number of training rows that reached this node
    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub(crate) fn kind_mut(&mut self) -> &mut NodeKind {
        &mut self.kind
    }

    /// Returns true if the node has no children
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match &self.kind {
            NodeKind::Leaf(leaf) => Some(leaf),
            NodeKind::Decision(_) => None,
        }
    }

    pub fn as_decision(&self) -> Option<&DecisionNode> {
        match &self.kind {
            NodeKind::Decision(node) => Some(node),
            NodeKind::Leaf(_) => None,
        }
    }

    /// Ids of the existing children, empty for leaves
    pub fn children(&self) -> Vec<NodeId> {
        match &self.kind {
            NodeKind::Decision(node) => node.children.iter().filter_map(|c| *c).collect(),
            NodeKind::Leaf(_) => Vec::new(),
        }
    }

    /// Name of the split variable for decision nodes, empty for leaves
    pub fn label(&self, variables: &[Variable]) -> String {
        match &self.kind {
            NodeKind::Decision(node) => variables[node.variable].name().to_string(),
            NodeKind::Leaf(_) => String::new(),
        }
    }
}

/// Renders a path as conjunction, e.g. `x ∈ (5, ∞) ∧ color = red`
pub fn format_path(path: &Path, variables: &[Variable]) -> String {
    path.iter()
        .map(|(&var, constraint)| variables[var].format_constraint(constraint))
        .collect::<Vec<_>>()
        .join(" ∧ ")
}
