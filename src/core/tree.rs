// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Component tree builder
//!
//! Builds the immutable `ComponentTree` from a root `NodeSpec`. Every node
//! is validated against the typed configuration of its kind, ids are
//! checked for uniqueness, and an id index is kept for O(1) lookup.
//!
//! The finished tree is `Send + Sync` and is shared behind an `Arc` by the
//! binding registry and whatever renders it.

use log::debug;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

use crate::core::props::NodeConfig;
use crate::core::types::{NodeId, NodeKind, NodeSpec, PropertyRef};
use crate::core::validator::{validate_id, validate_node, ValidationError};
use crate::data::Dataset;

/// Named datasets available to chart and table nodes
pub type DatasetCatalog = HashMap<String, Arc<Dataset>>;

/// Tree construction errors
#[derive(Debug, Error, PartialEq)]
pub enum TreeError {
    #[error("Node id '{id}' is declared more than once")]
    DuplicateId { id: NodeId },

    /// `node` is the node's id, or its position when it has none
    #[error("Invalid property on {node}: {source}")]
    InvalidProperty {
        node: String,
        source: ValidationError,
    },
}

/// A validated node
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    id: Option<NodeId>,
    config: NodeConfig,
    children: Vec<Node>,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        self.config.kind()
    }

    pub fn id(&self) -> Option<&NodeId> {
        self.id.as_ref()
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Initial value of a property (`None` if the kind does not expose it)
    pub fn property(&self, name: &str) -> Option<Value> {
        self.config.property(name)
    }
}

/// Immutable tree of typed UI nodes
#[derive(Clone, Debug)]
pub struct ComponentTree {
    root: Node,
    /// Child-index path from the root to each identified node
    index: HashMap<NodeId, Vec<usize>>,
    node_count: usize,
}

impl ComponentTree {
    pub fn builder() -> TreeBuilder {
        TreeBuilder::new()
    }

    /// Builds a tree that uses no datasets
    pub fn build(spec: &NodeSpec) -> Result<Self, TreeError> {
        TreeBuilder::new().build(spec)
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Looks up a node by id
    pub fn get(&self, id: &str) -> Option<&Node> {
        let path = self.index.get(id)?;
        path.iter()
            .try_fold(&self.root, |node, &child| node.children.get(child))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Every declared id, sorted
    pub fn ids(&self) -> Vec<&NodeId> {
        let mut ids: Vec<&NodeId> = self.index.keys().collect();
        ids.sort();
        ids
    }

    /// Total number of nodes, identified or not
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Pre-order traversal as `(depth, node)` pairs, root at depth 0
    pub fn walk(&self) -> Vec<(usize, &Node)> {
        let mut nodes = Vec::with_capacity(self.node_count);
        let mut stack = vec![(0, &self.root)];

        while let Some((depth, node)) = stack.pop() {
            nodes.push((depth, node));
            for child in node.children.iter().rev() {
                stack.push((depth + 1, child));
            }
        }

        nodes
    }

    /// Initial value of a `(node, property)` pair
    ///
    /// Returns `None` when the node does not exist or its kind does not
    /// expose the property; unset properties read as `null`.
    pub fn initial_value(&self, target: &PropertyRef) -> Option<Value> {
        self.get(target.node.as_str())?.property(&target.property)
    }
}

/// Builds component trees, resolving chart and table datasets by name
///
/// # Example
/// ```
/// use reactive_dashboard::core::{ComponentTree, NodeSpec, TextLevel};
///
/// let tree = ComponentTree::builder().build(&NodeSpec::container(vec![
///     NodeSpec::text(TextLevel::H1, "Hello Dash").with_id("title"),
/// ]))?;
/// assert!(tree.contains("title"));
/// # Ok::<(), reactive_dashboard::core::TreeError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct TreeBuilder {
    datasets: DatasetCatalog,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes a dataset available under `name`
    pub fn dataset(mut self, name: impl Into<String>, data: impl Into<Arc<Dataset>>) -> Self {
        self.datasets.insert(name.into(), data.into());
        self
    }

    pub fn datasets(&self) -> &DatasetCatalog {
        &self.datasets
    }

    /// Validates `spec` and builds the tree
    ///
    /// # Errors
    ///
    /// - `TreeError::DuplicateId` if two nodes share an id
    /// - `TreeError::InvalidProperty` for a malformed id, a leaf with
    ///   children, or properties that fail validation
    pub fn build(&self, spec: &NodeSpec) -> Result<ComponentTree, TreeError> {
        let mut index = HashMap::new();
        let mut node_count = 0;
        let mut path = Vec::new();

        let root = self.build_node(spec, &mut path, &mut index, &mut node_count)?;

        debug!(
            "Built component tree: {} nodes, {} with ids",
            node_count,
            index.len()
        );

        Ok(ComponentTree {
            root,
            index,
            node_count,
        })
    }

    fn build_node(
        &self,
        spec: &NodeSpec,
        path: &mut Vec<usize>,
        index: &mut HashMap<NodeId, Vec<usize>>,
        node_count: &mut usize,
    ) -> Result<Node, TreeError> {
        let location = describe(spec, path);
        let invalid = |source: ValidationError| TreeError::InvalidProperty {
            node: location.clone(),
            source,
        };

        let id = match &spec.id {
            Some(id) => {
                validate_id(id).map_err(invalid)?;
                let id = NodeId::new(id.as_str());
                if index.contains_key(&id) {
                    return Err(TreeError::DuplicateId { id });
                }
                index.insert(id.clone(), path.clone());
                Some(id)
            }
            None => None,
        };

        if spec.kind.is_leaf() && !spec.children.is_empty() {
            return Err(invalid(ValidationError::LeafWithChildren(spec.kind)));
        }

        let config = validate_node(spec.kind, &spec.props, &self.datasets).map_err(invalid)?;
        *node_count += 1;

        let mut children = Vec::with_capacity(spec.children.len());
        for (position, child) in spec.children.iter().enumerate() {
            path.push(position);
            let built = self.build_node(child, path, index, node_count);
            path.pop();
            children.push(built?);
        }

        Ok(Node {
            id,
            config,
            children,
        })
    }
}

/// Names a node for error messages: its id, or kind and child path
fn describe(spec: &NodeSpec, path: &[usize]) -> String {
    match &spec.id {
        Some(id) => format!("'{}'", id),
        None if path.is_empty() => format!("root {}", spec.kind),
        None => {
            let steps: Vec<String> = path.iter().map(usize::to_string).collect();
            format!("{} at /{}", spec.kind, steps.join("/"))
        }
    }
}
