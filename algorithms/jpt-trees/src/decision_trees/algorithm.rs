//! Joint probability trees
//!
use std::collections::VecDeque;
use std::fmt;
use std::time::Instant;

use log::{debug, info};
use ndarray::{Array2, ArrayView2, Axis};

use super::impurity::{Impurity, Split};
use super::node::{format_path, DecisionNode, Leaf, Node, NodeId, NodeKind, Path};
use super::{JptValidParams, NodeIter};
use jpt::{
    error::{Error, Result},
    traits::Fit,
    Constraint, Distribution, Interval, TrainingData, Variable,
};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// A pending partition of the training rows
///
/// The partition becomes the child in slot `slot` of the decision node `parent`, or the root
/// if there is no parent. Work items own their rows, so they can be handed to other threads.
#[derive(Clone, Debug)]
struct WorkItem {
    rows: Vec<usize>,
    parent: Option<NodeId>,
    slot: usize,
}

/// Nodes produced by a finished induction
struct Grown {
    nodes: Vec<Node>,
    inner_nodes: Vec<NodeId>,
    leaves: Vec<NodeId>,
    root: NodeId,
}

/// Breadth-first induction over a FIFO queue of partitions
struct Builder<'a> {
    params: &'a JptValidParams,
    data: ArrayView2<'a, f64>,
    impurity: Impurity<'a>,
    nodes: Vec<Node>,
    inner_nodes: Vec<NodeId>,
    leaves: Vec<NodeId>,
    queue: VecDeque<WorkItem>,
}

impl<'a> Builder<'a> {
    fn new(params: &'a JptValidParams, data: ArrayView2<'a, f64>) -> Self {
        let impurity = Impurity::new(
            data,
            params.variables(),
            params.min_samples_leaf(),
            params.min_impurity_improvement(),
        )
        .parallel(params.parallel());

        Builder {
            params,
            data,
            impurity,
            nodes: Vec::new(),
            inner_nodes: Vec::new(),
            leaves: Vec::new(),
            queue: VecDeque::new(),
        }
    }

    fn build(mut self) -> Result<Grown> {
        self.queue.push_back(WorkItem {
            rows: (0..self.data.nrows()).collect(),
            parent: None,
            slot: 0,
        });

        while let Some(item) = self.queue.pop_front() {
            self.expand(item);
        }

        let root = self
            .inner_nodes
            .first()
            .or_else(|| self.leaves.first())
            .copied()
            .ok_or(Error::EmptyTree)?;

        Ok(Grown {
            nodes: self.nodes,
            inner_nodes: self.inner_nodes,
            leaves: self.leaves,
            root,
        })
    }

    /// Creates the node for one partition and enqueues its children
    fn expand(&mut self, item: WorkItem) {
        let split = if item.rows.len() > self.params.min_samples_leaf() {
            self.impurity.best_split(&item.rows)
        } else {
            None
        };

        match split {
            Some(split) if split.score > self.params.min_impurity_improvement() => {
                self.decision_node(item, split)
            }
            _ => self.leaf(item),
        }
    }

    fn attach(&mut self, parent: Option<NodeId>, slot: usize, child: NodeId) {
        if let Some(parent) = parent {
            if let NodeKind::Decision(node) = self.nodes[parent].kind_mut() {
                node.set_child(slot, child);
            }
        }
    }

    fn leaf(&mut self, item: WorkItem) {
        let id = self.nodes.len();
        let subset = self.data.select(Axis(0), &item.rows);
        let distributions = self
            .params
            .variables()
            .iter()
            .zip(subset.columns())
            .map(|(var, column)| Distribution::fit(var, &column))
            .collect();

        debug!("leaf {} with {} samples", id, item.rows.len());

        self.nodes.push(Node::new(
            id,
            item.parent,
            item.slot,
            item.rows.len(),
            NodeKind::Leaf(Leaf::new(distributions)),
        ));
        self.attach(item.parent, item.slot, id);
        self.leaves.push(id);
    }

    fn decision_node(&mut self, item: WorkItem, split: Split) {
        let id = self.nodes.len();
        let variable = &self.params.variables()[split.variable];
        let column = self.data.column(split.variable);

        let (constraints, partitions): (Vec<Constraint>, Vec<Vec<usize>>) = match split.threshold {
            // numeric split into `x <= threshold` and `x > threshold`
            Some(threshold) => {
                let (left, right): (Vec<usize>, Vec<usize>) =
                    item.rows.iter().copied().partition(|&r| column[r] <= threshold);
                (
                    vec![
                        Interval::at_most(threshold).into(),
                        Interval::greater_than(threshold).into(),
                    ],
                    vec![left, right],
                )
            }
            // symbolic split with one child per label
            None => {
                let n_values = variable.n_values();
                let mut partitions = vec![Vec::new(); n_values];
                for &r in &item.rows {
                    if let Some(partition) = partitions.get_mut(column[r] as usize) {
                        partition.push(r);
                    }
                }
                ((0..n_values).map(Constraint::label).collect(), partitions)
            }
        };

        debug!(
            "decision node {} on {} with {} samples, partitions {:?}",
            id,
            variable.name(),
            item.rows.len(),
            partitions.iter().map(|p| p.len()).collect::<Vec<_>>()
        );

        self.nodes.push(Node::new(
            id,
            item.parent,
            item.slot,
            item.rows.len(),
            NodeKind::Decision(DecisionNode::new(split.variable, constraints)),
        ));
        self.attach(item.parent, item.slot, id);
        self.inner_nodes.push(id);

        for (slot, rows) in partitions.into_iter().enumerate() {
            if rows.is_empty() {
                continue;
            }
            self.queue.push_back(WorkItem {
                rows,
                parent: Some(id),
                slot,
            });
        }
    }
}

/// A fitted joint probability tree.
///
/// ### Structure
/// A joint probability tree is a decision tree where:
/// * Each inner node tests a single variable. A numeric variable is split into the two intervals
/// `(-∞, threshold]` and `(threshold, ∞)`, a symbolic variable into one child per label.
/// * Each leaf holds a fitted distribution for *every* variable over the training rows that
/// reached it, which together with its share of the samples forms a joint distribution.
///
/// ### Algorithm
///
/// Starting with all rows in a single partition, partitions are taken from a FIFO queue and:
///
/// * partitions with at most `min_samples_leaf` rows become leaves;
/// * otherwise the gain of every split candidate is computed for every variable as target, the
/// gains are normalized per target and averaged over the targets;
/// * if the best average exceeds `min_impurity_improvement` a decision node is created and its
/// non-empty partitions are enqueued, otherwise the partition becomes a leaf.
///
/// Node ids are assigned in creation order, so they increase from the root to the leaves.
///
/// ### Example
///
/// ```rust
/// use std::collections::HashMap;
///
/// use jpt::prelude::*;
/// use jpt_trees::Jpt;
///
/// let x = Variable::numeric("x");
/// let rows = vec![1., 2., 3., 8., 9.]
///     .into_iter()
///     .map(|v| vec![Value::from(v)])
///     .collect();
///
/// let tree = Jpt::params(vec![x.clone()])
///     .min_samples_leaf(2)
///     .fit(TrainingData::Rows(rows))
///     .unwrap();
///
/// let mut query = HashMap::new();
/// query.insert(x, Value::from([8., 9.]));
/// let result = tree.infer(&query, &HashMap::new()).unwrap();
///
/// assert!((result.result() - 0.4).abs() < 1e-12);
/// ```
///
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug)]
pub struct Jpt {
    name: String,
    variables: Vec<Variable>,
    min_samples_leaf: usize,
    min_impurity_improvement: f64,
    nodes: Vec<Node>,
    inner_nodes: Vec<NodeId>,
    leaves: Vec<NodeId>,
    root: NodeId,
    data: Array2<f64>,
}

impl Fit<TrainingData, Error> for JptValidParams {
    type Object = Jpt;

    /// Learns a joint probability tree using these hyperparameters from `data`
    fn fit(&self, data: TrainingData) -> Result<Self::Object> {
        let data = data.into_matrix(self.variables())?;

        let started = Instant::now();
        info!(
            "Started learning of {} x {} ({})",
            data.nrows(),
            data.ncols(),
            self.name()
        );

        let grown = Builder::new(self, data.view()).build()?;

        info!(
            "Learning took {:?}: #innernodes = {}, #leaves = {}",
            started.elapsed(),
            grown.inner_nodes.len(),
            grown.leaves.len()
        );

        Ok(Jpt {
            name: self.name().to_string(),
            variables: self.variables().to_vec(),
            min_samples_leaf: self.min_samples_leaf(),
            min_impurity_improvement: self.min_impurity_improvement(),
            nodes: grown.nodes,
            inner_nodes: grown.inner_nodes,
            leaves: grown.leaves,
            root: grown.root,
            data,
        })
    }
}

impl Jpt {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The variables in column order
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Position of `variable` in the variable list, compared by identity
    pub fn variable_index(&self, variable: &Variable) -> Option<usize> {
        self.variables.iter().position(|v| v == variable)
    }

    pub fn min_samples_leaf(&self) -> usize {
        self.min_samples_leaf
    }

    pub fn min_impurity_improvement(&self) -> f64 {
        self.min_impurity_improvement
    }

    /// The encoded training matrix
    pub fn training_data(&self) -> ArrayView2<f64> {
        self.data.view()
    }

    /// Number of training rows
    pub fn nsamples(&self) -> usize {
        self.root().samples()
    }

    /// Return root node of the tree
    pub fn root(&self) -> &Node {
        &self.nodes[self.root]
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// All nodes ordered by id
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Decision nodes ordered by id
    pub fn inner_nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.inner_nodes.iter().map(move |&id| &self.nodes[id])
    }

    /// Leaves ordered by id
    pub fn leaves(&self) -> impl Iterator<Item = &Node> + '_ {
        self.leaves.iter().map(move |&id| &self.nodes[id])
    }

    /// Return the number of leaves in this tree
    pub fn num_leaves(&self) -> usize {
        self.leaves.len()
    }

    pub fn num_inner_nodes(&self) -> usize {
        self.inner_nodes.len()
    }

    /// Create a node iterator in level-order (BFT)
    pub fn iter_nodes(&self) -> NodeIter {
        NodeIter::new(self, self.root)
    }

    /// Return max depth of the tree, a single leaf has depth zero
    pub fn depth(&self) -> usize {
        self.leaves
            .iter()
            .map(|&id| self.path_to_root(id).len() - 1)
            .max()
            .unwrap_or(0)
    }

    /// Ids of the nodes from `id` up to the root
    pub fn path_to_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = self.nodes.get(id);
        while let Some(node) = current {
            path.push(node.id());
            current = node.parent().and_then(|p| self.nodes.get(p));
        }
        path
    }

    /// The constraints accumulated on the way from the root to `id`
    ///
    /// Constraints on the same variable are intersected, variables that are never tested on the
    /// way are absent.
    pub fn path(&self, id: NodeId) -> Path {
        let mut path = Path::new();
        let mut current = match self.nodes.get(id) {
            Some(node) => node,
            None => return path,
        };

        while let Some(parent) = current.parent().and_then(|p| self.nodes.get(p)) {
            if let Some(decision) = parent.as_decision() {
                let constraint = &decision.constraints()[current.slot()];
                let merged = match path.get(&decision.variable()) {
                    Some(existing) => existing.intersection(constraint),
                    None => constraint.clone(),
                };
                path.insert(decision.variable(), merged);
            }
            current = parent;
        }

        path
    }

    /// Renders the path of `id`, e.g. `x ∈ (5, ∞) ∧ color = red`
    pub fn format_path(&self, id: NodeId) -> String {
        format_path(&self.path(id), &self.variables)
    }

    /// Checks whether the leaf `id` is consistent with a resolved assignment
    ///
    /// Every variable constrained by both the assignment and the path of the leaf must have
    /// overlapping constraints, all other variables are unconstrained.
    pub fn applies(&self, id: NodeId, assignment: &Path) -> bool {
        path_applies(&self.path(id), assignment)
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId, indent: usize) -> fmt::Result {
        let node = &self.nodes[id];
        let parent = node
            .parent()
            .map(|p| format!("DecisionNode<ID: {}>", p))
            .unwrap_or_else(|| "None".to_string());

        match node.kind() {
            NodeKind::Decision(decision) => {
                writeln!(
                    f,
                    "{}DecisionNode<ID: {}; CRITERION: {}; PARENT: {}; #CHILDREN: {}>",
                    " ".repeat(indent),
                    id,
                    node.label(&self.variables),
                    parent,
                    decision.children().len()
                )?;
                for child in decision.children() {
                    match child {
                        Some(child) => self.fmt_node(f, *child, indent + 5)?,
                        None => writeln!(f, "{}None", " ".repeat(indent + 5))?,
                    }
                }
                Ok(())
            }
            NodeKind::Leaf(leaf) => {
                let values = self
                    .variables
                    .iter()
                    .zip(leaf.distributions())
                    .map(|(var, dist)| format!("{}: {}", var.name(), dist))
                    .collect::<Vec<_>>();
                writeln!(
                    f,
                    "{}LeafNode<ID: {}; VALUE: {}; PARENT: {}>",
                    " ".repeat(indent),
                    id,
                    values.join(","),
                    parent
                )
            }
        }
    }
}

/// Returns true if no variable of `assignment` contradicts `path`
pub(crate) fn path_applies(path: &Path, assignment: &Path) -> bool {
    assignment.iter().all(|(var, constraint)| {
        path.get(var)
            .map(|restriction| restriction.intersects(constraint))
            .unwrap_or(true)
    })
}

impl fmt::Display for Jpt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Jpt<{}>:", self.name)?;
        writeln!(f, "{}\n", "=".repeat(self.name.chars().count() + 5))?;
        self.fmt_node(f, self.root, 0)?;
        writeln!(
            f,
            "JPT stats: #innernodes = {}, #leaves = {} ({} total)",
            self.inner_nodes.len(),
            self.leaves.len(),
            self.nodes.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_abs_diff_eq;
    use jpt::{Multinomial, Numeric, ParamGuard, Value};
    use ndarray::array;

    fn numeric_rows(values: &[f64]) -> TrainingData {
        TrainingData::Rows(values.iter().map(|&v| vec![Value::from(v)]).collect())
    }

    /// Splits on `x` at 5, then the right side on `y`
    pub(crate) fn handcrafted() -> Jpt {
        let x = Variable::numeric("x");
        let y = Variable::symbolic("y", vec!["a", "b"]);
        let leaf = |xs: Vec<f64>, ys: Vec<f64>| {
            NodeKind::Leaf(Leaf::new(vec![
                Distribution::Numeric(Numeric::fit(xs)),
                Distribution::Multinomial(Multinomial::fit(2, ys)),
            ]))
        };

        let mut root = DecisionNode::new(
            0,
            vec![
                Interval::at_most(5.).into(),
                Interval::greater_than(5.).into(),
            ],
        );
        root.set_child(0, 1);
        root.set_child(1, 2);
        let mut right = DecisionNode::new(1, vec![Constraint::label(0), Constraint::label(1)]);
        right.set_child(0, 3);
        right.set_child(1, 4);

        Jpt {
            name: "handcrafted".to_string(),
            variables: vec![x, y],
            min_samples_leaf: 1,
            min_impurity_improvement: 0.,
            nodes: vec![
                Node::new(0, None, 0, 4, NodeKind::Decision(root)),
                Node::new(1, Some(0), 0, 2, leaf(vec![1., 2.], vec![0., 1.])),
                Node::new(2, Some(0), 1, 2, NodeKind::Decision(right)),
                Node::new(3, Some(2), 0, 1, leaf(vec![7.], vec![0.])),
                Node::new(4, Some(2), 1, 1, leaf(vec![9.], vec![1.])),
            ],
            inner_nodes: vec![0, 2],
            leaves: vec![1, 3, 4],
            root: 0,
            data: array![[1., 0.], [2., 1.], [7., 0.], [9., 1.]],
        }
    }

    #[test]
    fn five_rows_split_once() -> Result<()> {
        let x = Variable::numeric("x");
        let tree = Jpt::params(vec![x])
            .min_samples_leaf(2)
            .min_impurity_improvement(0.)
            .fit(numeric_rows(&[1., 2., 3., 8., 9.]))?;

        assert_eq!(tree.num_inner_nodes(), 1);
        assert_eq!(tree.num_leaves(), 2);
        assert_eq!(tree.root().id(), 0);

        let root = tree.root().as_decision().unwrap();
        assert_eq!(root.variable(), 0);
        assert_eq!(
            root.constraints(),
            &[
                Constraint::from(Interval::at_most(5.5)),
                Constraint::from(Interval::greater_than(5.5))
            ]
        );
        assert_eq!(root.children(), &[Some(1), Some(2)]);

        let sizes = tree.leaves().map(|l| l.samples()).collect::<Vec<_>>();
        assert_eq!(sizes, vec![3, 2]);
        assert_eq!(tree.nsamples(), 5);
        assert_eq!(tree.depth(), 1);

        Ok(())
    }

    #[test]
    fn shifted_data_grows_the_same_tree() -> Result<()> {
        let values = [0., 0.1, 0.2, 10., 10.1, 10.2, 30., 30.1, 30.2];

        for &offset in &[0., 1e9] {
            let shifted = values.iter().map(|v| v + offset).collect::<Vec<_>>();
            let tree = Jpt::params(vec![Variable::numeric("x")])
                .min_samples_leaf(3)
                .fit(numeric_rows(&shifted))?;

            let samples = tree.nodes().iter().map(|n| n.samples()).collect::<Vec<_>>();
            assert_eq!(samples, vec![9, 6, 3, 3, 3]);

            let root = tree.root().as_decision().unwrap();
            assert_eq!(
                root.constraints()[0],
                Constraint::from(Interval::at_most((shifted[5] + shifted[6]) / 2.))
            );
            let left = tree.node(1).and_then(|n| n.as_decision()).unwrap();
            assert_eq!(
                left.constraints()[0],
                Constraint::from(Interval::at_most((shifted[2] + shifted[3]) / 2.))
            );
        }

        Ok(())
    }

    #[test]
    fn small_partitions_become_a_single_leaf() -> Result<()> {
        let x = Variable::numeric("x");
        let tree = Jpt::params(vec![x])
            .min_samples_leaf(5)
            .fit(numeric_rows(&[1., 2., 3., 8., 9.]))?;

        assert_eq!(tree.num_inner_nodes(), 0);
        assert_eq!(tree.num_leaves(), 1);
        assert!(tree.root().is_leaf());
        assert_eq!(tree.depth(), 0);
        assert!(tree.path(tree.root().id()).is_empty());

        Ok(())
    }

    #[test]
    fn improvement_threshold_prevents_splits() -> Result<()> {
        // the best split has a normalized score of exactly one
        let x = Variable::numeric("x");
        let tree = Jpt::params(vec![x])
            .min_samples_leaf(2)
            .min_impurity_improvement(1.)
            .fit(numeric_rows(&[1., 2., 3., 8., 9.]))?;

        assert_eq!(tree.num_leaves(), 1);

        Ok(())
    }

    #[test]
    fn symbolic_split_has_a_slot_per_label() -> Result<()> {
        let color = Variable::symbolic("color", vec!["red", "green", "blue"]);
        let rows = vec![
            vec!["red".into()],
            vec!["red".into()],
            vec!["green".into()],
            vec!["green".into()],
        ];

        let tree = Jpt::params(vec![color]).fit(TrainingData::Rows(rows))?;

        let root = tree.root().as_decision().unwrap();
        assert_eq!(root.variable(), 0);
        assert_eq!(
            root.constraints(),
            &[
                Constraint::label(0),
                Constraint::label(1),
                Constraint::label(2)
            ]
        );
        // no row had the label blue
        assert_eq!(root.children(), &[Some(1), Some(2), None]);
        assert_eq!(tree.format_path(2), "color = green");

        Ok(())
    }

    #[test]
    fn partitions_are_complete_and_ids_increase() -> Result<()> {
        let a = Variable::boolean("a");
        let x = Variable::numeric("x");
        let rows = (0..40)
            .map(|i| {
                vec![
                    Value::from(i % 3 == 0),
                    Value::from((i * 7 % 11) as f64 + if i % 3 == 0 { 20. } else { 0. }),
                ]
            })
            .collect();

        let tree = Jpt::params(vec![a, x])
            .min_samples_leaf(3)
            .fit(TrainingData::Rows(rows))?;

        for node in tree.inner_nodes() {
            let children = node.children();
            let routed: usize = children
                .iter()
                .map(|&c| tree.node(c).unwrap().samples())
                .sum();
            assert_eq!(routed, node.samples());
            for c in children {
                assert!(c > node.id());
                assert_eq!(tree.node(c).unwrap().parent(), Some(node.id()));
            }
        }

        assert_eq!(tree.leaves().map(|l| l.samples()).sum::<usize>(), 40);
        assert_eq!(tree.root().id(), 0);
        for (i, node) in tree.nodes().iter().enumerate() {
            assert_eq!(node.id(), i);
        }

        Ok(())
    }

    #[test]
    fn path_intersection_along_the_chain() {
        let tree = handcrafted();

        let path = tree.path(3);
        assert_eq!(path.len(), 2);
        assert_eq!(path[&0], Constraint::from(Interval::greater_than(5.)));
        assert_eq!(path[&1], Constraint::label(0));
        assert_eq!(tree.format_path(3), "x ∈ (5, ∞) ∧ y = a");

        assert_eq!(tree.path(1).len(), 1);
        assert_eq!(tree.path_to_root(4), vec![4, 2, 0]);
        assert_eq!(tree.depth(), 2);
    }

    #[test]
    fn repeated_variables_are_intersected() -> Result<()> {
        // three well separated clusters need two splits on x
        let x = Variable::numeric("x");
        let tree = Jpt::params(vec![x])
            .min_samples_leaf(2)
            .fit(numeric_rows(&[1., 1.1, 1.2, 10., 10.1, 10.2, 30., 30.1, 30.2]))?;

        assert_eq!(tree.num_leaves(), 3);
        for leaf in tree.leaves() {
            let path = tree.path(leaf.id());
            let interval = *path[&0].as_interval().unwrap();
            let inside = tree
                .training_data()
                .column(0)
                .iter()
                .filter(|&&v| interval.contains(v))
                .count();
            assert_eq!(inside, leaf.samples());
        }
        let middle = tree
            .leaves()
            .find(|l| tree.path(l.id())[&0].as_interval().unwrap().contains(10.1))
            .unwrap();
        let interval = *tree.path(middle.id())[&0].as_interval().unwrap();
        assert!(interval.lower().is_finite() && interval.upper().is_finite());

        Ok(())
    }

    #[test]
    fn leaves_fit_distributions_of_their_rows() -> Result<()> {
        let x = Variable::numeric("x");
        let tree = Jpt::params(vec![x])
            .min_samples_leaf(2)
            .fit(numeric_rows(&[1., 2., 3., 8., 9.]))?;

        let right = tree.node(2).unwrap().as_leaf().unwrap();
        assert_abs_diff_eq!(
            right
                .distribution(0)
                .probability(&Interval::closed(8., 9.).into()),
            1.0
        );
        assert_eq!(
            right.expectations(),
            vec![jpt::Expectation::Number(8.5)]
        );

        Ok(())
    }

    #[test]
    fn invalid_data_fails_before_learning() {
        let x = Variable::numeric("x");
        let params = Jpt::params(vec![x]).check().unwrap();

        assert!(params.fit(TrainingData::Rows(vec![])).is_err());
        assert!(params
            .fit(TrainingData::Rows(vec![vec!["a".into()]]))
            .is_err());
    }

    #[test]
    fn display_lists_nodes_and_stats() {
        let tree = handcrafted();
        let text = format!("{}", tree);

        assert!(text.starts_with("Jpt<handcrafted>:"));
        assert!(text.contains("DecisionNode<ID: 0; CRITERION: x; PARENT: None; #CHILDREN: 2>"));
        assert!(text.contains("LeafNode<ID: 4;"));
        assert!(text.contains("JPT stats: #innernodes = 2, #leaves = 3 (5 total)"));
    }
}
