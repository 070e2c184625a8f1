//! Probabilistic queries against a fitted tree
//!
//! Queries and evidence are partial assignments of values to variables. A leaf contributes to a
//! query with its share of the training samples, multiplied with the marginal probabilities its
//! distributions assign to every assigned variable that is not already fixed by its path.
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use log::debug;
use rand::Rng;

use super::algorithm::path_applies;
use super::node::{format_path, Node, NodeId, Path};
use super::Jpt;
use jpt::{
    error::{Error, Result},
    Constraint, Value, Variable,
};

/// A partial assignment of values to variables
pub type Event = HashMap<Variable, Value>;

/// The answer to `P(query | evidence)`
#[derive(Clone, Debug)]
pub struct QueryResult<'a> {
    tree: &'a Jpt,
    query: Path,
    evidence: Path,
    result: f64,
    candidates: Vec<NodeId>,
    weights: Vec<f64>,
}

impl<'a> QueryResult<'a> {
    /// The probability of the query given the evidence
    pub fn result(&self) -> f64 {
        self.result
    }

    /// The resolved query
    pub fn query(&self) -> &Path {
        &self.query
    }

    /// The resolved evidence
    pub fn evidence(&self) -> &Path {
        &self.evidence
    }

    /// Leaves that contributed to the probability of the query
    pub fn candidates(&self) -> &[NodeId] {
        &self.candidates
    }

    /// Unnormalized contribution of every candidate
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Pairs of contributing leaves and their weights
    pub fn contributions(&self) -> impl Iterator<Item = (&'a Node, f64)> + '_ {
        let tree = self.tree;
        self.candidates
            .iter()
            .zip(&self.weights)
            .filter_map(move |(&id, &w)| tree.node(id).map(|node| (node, w)))
    }

    /// Renders the result as `P(query | evidence) = xx.xxx%`
    pub fn format_result(&self) -> String {
        let variables = self.tree.variables();
        let evidence = if self.evidence.is_empty() {
            String::new()
        } else {
            format!(" | {}", format_path(&self.evidence, variables))
        };

        format!(
            "P({}{}) = {:.3}%",
            format_path(&self.query, variables),
            evidence,
            self.result * 100.
        )
    }

    /// The result followed by the contributing leaves, heaviest first
    pub fn explain(&self) -> String {
        let mut contributions = self.contributions().collect::<Vec<_>>();
        contributions.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        let mut text = self.format_result();
        text.push_str("\n\ncontributing leaves:\n");
        for (node, weight) in contributions {
            text.push_str(&format!(
                "{:.3}%: leaf {} ({})\n",
                weight * 100.,
                node.id(),
                self.tree.format_path(node.id())
            ));
        }
        text
    }
}

impl fmt::Display for QueryResult<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_result())
    }
}

/// A leaf returned by a reverse query
#[derive(Clone, Debug, PartialEq)]
pub struct ReverseMatch {
    confidences: Vec<f64>,
    path: Vec<NodeId>,
}

impl ReverseMatch {
    /// Confidence of every variable, in the order of the tree's variables
    pub fn confidences(&self) -> &[f64] {
        &self.confidences
    }

    pub fn confidence(&self, variable: usize) -> f64 {
        self.confidences[variable]
    }

    /// The ranking score
    pub fn total(&self) -> f64 {
        self.confidences.iter().sum()
    }

    /// Node ids from the root to the leaf
    pub fn path(&self) -> &[NodeId] {
        &self.path
    }

    pub fn leaf(&self) -> NodeId {
        self.path[self.path.len() - 1]
    }
}

impl Jpt {
    /// Converts an event into constraints keyed by variable index
    ///
    /// Fails with `Error::UnknownVariables` if the event assigns variables which are not part of
    /// the tree, and with `Error::InvalidInput` if a value does not fit its variable.
    pub fn resolve(&self, event: &Event) -> Result<Path> {
        let mut unknown = event
            .keys()
            .filter(|var| self.variable_index(var).is_none())
            .map(|var| var.name().to_string())
            .collect::<Vec<_>>();
        if !unknown.is_empty() {
            unknown.sort();
            return Err(Error::UnknownVariables(unknown));
        }

        let mut assignment = Path::new();
        for (var, value) in event {
            if let Some(index) = self.variable_index(var) {
                assignment.insert(index, var.resolve(value)?);
            }
        }
        Ok(assignment)
    }

    /// Leaves consistent with `query`, ordered by id
    pub fn apply(&self, query: &Event) -> Result<impl Iterator<Item = &Node> + '_> {
        let assignment = self.resolve(query)?;

        Ok(self
            .leaves()
            .filter(move |leaf| self.applies(leaf.id(), &assignment)))
    }

    /// Computes `P(query | evidence)`
    ///
    /// Every leaf consistent with the evidence contributes its share of the samples, multiplied
    /// by the marginal probability of every evidence variable not fixed by its path. Leaves also
    /// consistent with the query contribute in the same way to the probability of the query.
    ///
    /// Fails with `Error::NoSupportingEvidence` if no leaf supports the evidence.
    pub fn infer(&self, query: &Event, evidence: &Event) -> Result<QueryResult<'_>> {
        let query = self.resolve(query)?;
        let evidence = self.resolve(evidence)?;
        let nsamples = self.nsamples() as f64;

        let (mut p_q, mut p_e) = (0., 0.);
        let mut candidates = Vec::new();
        let mut weights = Vec::new();

        for node in self.leaves() {
            let leaf = match node.as_leaf() {
                Some(leaf) => leaf,
                None => continue,
            };
            let path = self.path(node.id());
            if !path_applies(&path, &evidence) {
                continue;
            }

            let marginal = |assignment: &Path| {
                assignment
                    .iter()
                    .filter(|(var, _)| !path.contains_key(var))
                    .map(|(&var, constraint)| leaf.distribution(var).probability(constraint))
                    .product::<f64>()
            };

            let weight = node.samples() as f64 / nsamples * marginal(&evidence);
            p_e += weight;

            if path_applies(&path, &query) {
                let weight = weight * marginal(&query);
                p_q += weight;
                candidates.push(node.id());
                weights.push(weight);
            }
        }

        if p_e <= 0. {
            return Err(Error::NoSupportingEvidence);
        }

        debug!(
            "p_q = {}, p_e = {} from {} candidates",
            p_q,
            p_e,
            candidates.len()
        );

        Ok(QueryResult {
            tree: self,
            query,
            evidence,
            result: p_q / p_e,
            candidates,
            weights,
        })
    }

    /// Finds the leaves which assign at least `confidence` to every variable of `query`
    ///
    /// Variables missing in `query` are constrained to their whole domain. The matches are
    /// ordered by their summed confidence, highest first, keeping the leaf order among equals.
    /// Returns no matches if `query` shares no variable with the tree.
    pub fn reverse(&self, query: &Event, confidence: f64) -> Result<Vec<ReverseMatch>> {
        if query.keys().all(|var| self.variable_index(var).is_none()) {
            return Ok(Vec::new());
        }

        let mut assignment = self.resolve(query)?;
        for (index, var) in self.variables().iter().enumerate() {
            assignment.entry(index).or_insert_with(|| var.domain());
        }

        let mut matches = self
            .leaves()
            .filter_map(|node| {
                let leaf = node.as_leaf()?;
                let confidences = assignment
                    .iter()
                    .map(|(&var, constraint)| leaf.distribution(var).probability(constraint))
                    .collect::<Vec<_>>();

                if confidences.iter().all(|&c| c >= confidence) {
                    let mut path = self.path_to_root(node.id());
                    path.reverse();
                    Some(ReverseMatch { confidences, path })
                } else {
                    None
                }
            })
            .collect::<Vec<_>>();

        matches.sort_by(|a, b| b.total().partial_cmp(&a.total()).unwrap_or(Ordering::Equal));

        Ok(matches)
    }

    /// Draws a value of `variable` within the constraint `assignment` places on it
    ///
    /// Symbolic variables yield the index of a uniformly chosen admissible label. Unconstrained
    /// variables are sampled from their whole domain. Returns `None` if the constraint is empty.
    pub fn sample_value<R: Rng>(
        &self,
        assignment: &Event,
        variable: &Variable,
        rng: &mut R,
    ) -> Result<Option<f64>> {
        let index = self
            .variable_index(variable)
            .ok_or_else(|| Error::UnknownVariables(vec![variable.name().to_string()]))?;
        let constraint = self
            .resolve(assignment)?
            .remove(&index)
            .unwrap_or_else(|| variable.domain());

        Ok(match constraint {
            Constraint::Interval(interval) => interval.sample(rng),
            Constraint::Labels(labels) if labels.is_empty() => None,
            Constraint::Labels(labels) => labels
                .iter()
                .nth(rng.gen_range(0..labels.len()))
                .map(|&i| i as f64),
        })
    }
}
