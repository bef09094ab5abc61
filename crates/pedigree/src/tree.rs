//! The typed family tree the layout engine works on.
//!
//! # Overview
//!
//! - [`TreeBuilder`] - Builds a [`FamilyTree`] from a [`FamilyRecord`] or node by node,
//!   rejecting anything that is not a strict single-parent hierarchy.
//! - [`FamilyTree`] - Arena of [`TreeNode`]s addressed by [`NodeId`].
//! - [`SizePolicy`] - Box size per depth tier.
//! - [`SizedTree`] - A tree whose depths and box sizes are final, produced by
//!   [`FamilyTree::measure`]. The layout engine only accepts this type.
//!
//! The arena owns every node; `parent` links are plain indices. All walks use
//! explicit stacks, so very deep lineages do not exhaust the call stack.

use log::{debug, trace};

use pedigree_core::{geometry::Size, record::FamilyRecord};

use crate::PedigreeError;

/// Index of a node inside its [`FamilyTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the arena index of this node.
    pub fn index(self) -> usize {
        self.0
    }
}

/// One family member.
#[derive(Debug, Clone)]
pub struct TreeNode {
    name: String,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    depth: usize,
    size: Size,
}

impl TreeNode {
    fn new(name: String) -> Self {
        Self {
            name,
            children: Vec::new(),
            parent: None,
            depth: 0,
            size: Size::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Children in left-to-right order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Generation index, 0 for the root. Zero until [`FamilyTree::measure`] runs.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Box size from the [`SizePolicy`]. Empty until [`FamilyTree::measure`] runs.
    pub fn size(&self) -> Size {
        self.size
    }
}

/// A strict single-parent hierarchy of family members.
#[derive(Debug, Clone)]
pub struct FamilyTree {
    nodes: Vec<TreeNode>,
    root: NodeId,
    generations: Vec<String>,
}

impl FamilyTree {
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the node for `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` belongs to a different tree.
    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }

    /// Number of members in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A built tree always has a root, so this is always false.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Generation names indexed by depth.
    pub fn generations(&self) -> &[String] {
        &self.generations
    }

    /// Node ids with every parent before its children and siblings left to right.
    pub fn pre_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.node(id).children.iter().rev());
        }
        order
    }

    /// Node ids with every child before its parent and siblings left to right.
    pub fn post_order(&self) -> Vec<NodeId> {
        // Parent first with the rightmost subtree first, then reversed
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.node(id).children.iter());
        }
        order.reverse();
        order
    }

    /// Assigns depths and box sizes in one pre-order walk.
    pub fn measure(mut self, policy: &SizePolicy) -> SizedTree {
        let root = self.root;
        self.nodes[root.0].depth = 0;
        for id in self.pre_order() {
            let depth = self.nodes[id.0].depth;
            self.nodes[id.0].size = policy.size_for(depth);
            for index in 0..self.nodes[id.0].children.len() {
                let child = self.nodes[id.0].children[index];
                self.nodes[child.0].depth = depth + 1;
            }
        }

        let generation_count = self.nodes.iter().map(|n| n.depth + 1).max().unwrap_or(0);
        debug!(nodes = self.nodes.len(), generation_count; "Measured tree");
        SizedTree {
            tree: self,
            generation_count,
        }
    }
}

/// A [`FamilyTree`] with final depths and box sizes.
#[derive(Debug, Clone)]
pub struct SizedTree {
    tree: FamilyTree,
    generation_count: usize,
}

impl SizedTree {
    pub fn tree(&self) -> &FamilyTree {
        &self.tree
    }

    pub fn root(&self) -> NodeId {
        self.tree.root
    }

    pub fn node(&self, id: NodeId) -> &TreeNode {
        self.tree.node(id)
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Number of depth levels present, the root alone being one.
    pub fn generation_count(&self) -> usize {
        self.generation_count
    }
}

/// Assigns a box size by depth.
///
/// Nodes above `deep_threshold` get the wide box with horizontal names.
/// Deeper generations have many more members, so they get the narrow box and
/// trade width for height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizePolicy {
    wide: Size,
    narrow: Size,
    deep_threshold: usize,
}

impl SizePolicy {
    pub fn new(wide: Size, narrow: Size, deep_threshold: usize) -> Self {
        Self {
            wide,
            narrow,
            deep_threshold,
        }
    }

    /// Returns true when `depth` uses the narrow tier.
    pub fn is_deep(&self, depth: usize) -> bool {
        depth >= self.deep_threshold
    }

    pub fn size_for(&self, depth: usize) -> Size {
        if self.is_deep(depth) {
            self.narrow
        } else {
            self.wide
        }
    }
}

/// Builds a [`FamilyTree`] while keeping it a tree.
///
/// # Examples
///
/// ```
/// # use pedigree::tree::TreeBuilder;
/// let mut builder = TreeBuilder::new();
/// let root = builder.add_root("文达").unwrap();
/// let child = builder.add_node("明圣").unwrap();
/// builder.attach(root, child).unwrap();
///
/// // A member cannot have two parents
/// let other = builder.add_node("明德").unwrap();
/// builder.attach(root, other).unwrap();
/// assert!(builder.attach(other, child).is_err());
///
/// let tree = builder.build().unwrap();
/// assert_eq!(tree.len(), 3);
/// ```
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<TreeNode>,
    root: Option<NodeId>,
    generations: Vec<String>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a tree mirroring `record`, ids assigned in pre-order.
    ///
    /// # Errors
    ///
    /// Returns [`PedigreeError::MalformedInput`] if any record has a blank name.
    pub fn from_record(record: &FamilyRecord) -> Result<FamilyTree, PedigreeError> {
        let mut builder = Self::new();
        builder.set_generations(record.generations.clone());

        let mut stack = vec![(record, None)];
        while let Some((current, parent)) = stack.pop() {
            let id = match parent {
                None => builder.add_root(&current.name)?,
                Some(parent) => {
                    let id = builder.add_node(&current.name)?;
                    builder.link(parent, id);
                    id
                }
            };
            stack.extend(current.children.iter().rev().map(|child| (child, Some(id))));
        }

        let tree = builder.build()?;
        trace!(tree:?; "Built family tree");
        Ok(tree)
    }

    /// Sets the generation names, indexed by depth.
    pub fn set_generations(&mut self, generations: Vec<String>) {
        self.generations = generations;
    }

    /// Adds the root member.
    ///
    /// # Errors
    ///
    /// Fails if a root already exists or the name is blank.
    pub fn add_root(&mut self, name: &str) -> Result<NodeId, PedigreeError> {
        if let Some(existing) = self.root {
            return Err(PedigreeError::MalformedInput(format!(
                "cannot add root `{name}`: `{}` is already the root",
                self.nodes[existing.0].name
            )));
        }
        let id = self.add_node(name)?;
        self.root = Some(id);
        Ok(id)
    }

    /// Adds a member that is not yet attached to anyone.
    ///
    /// # Errors
    ///
    /// Fails if the name is blank.
    pub fn add_node(&mut self, name: &str) -> Result<NodeId, PedigreeError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PedigreeError::MalformedInput(
                "family member without a name".to_string(),
            ));
        }
        self.nodes.push(TreeNode::new(name.to_string()));
        Ok(NodeId(self.nodes.len() - 1))
    }

    /// Makes `child` the last child of `parent`.
    ///
    /// # Errors
    ///
    /// Fails if either id is unknown, if `child` is the root or already has a
    /// parent, or if `child` is `parent` itself or one of its ancestors.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<(), PedigreeError> {
        let (Some(parent_node), Some(child_node)) =
            (self.nodes.get(parent.0), self.nodes.get(child.0))
        else {
            return Err(PedigreeError::MalformedInput(
                "node id does not belong to this tree".to_string(),
            ));
        };

        if self.root == Some(child) {
            return Err(PedigreeError::MalformedInput(format!(
                "root `{}` cannot be the child of `{}`",
                child_node.name, parent_node.name
            )));
        }
        if let Some(existing) = child_node.parent {
            return Err(PedigreeError::MalformedInput(format!(
                "`{}` already has the parent `{}`",
                child_node.name, self.nodes[existing.0].name
            )));
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(PedigreeError::MalformedInput(format!(
                "attaching `{}` under `{}` would form a cycle",
                child_node.name, parent_node.name
            )));
        }

        self.link(parent, child);
        Ok(())
    }

    /// Finishes the tree.
    ///
    /// # Errors
    ///
    /// Returns [`PedigreeError::EmptyTree`] without a root and
    /// [`PedigreeError::MalformedInput`] if a member was never attached.
    pub fn build(self) -> Result<FamilyTree, PedigreeError> {
        let root = self.root.ok_or(PedigreeError::EmptyTree)?;
        if let Some(orphan) = self
            .nodes
            .iter()
            .enumerate()
            .find(|(index, node)| *index != root.0 && node.parent.is_none())
            .map(|(_, node)| node)
        {
            return Err(PedigreeError::MalformedInput(format!(
                "`{}` is not attached to the tree",
                orphan.name
            )));
        }

        Ok(FamilyTree {
            nodes: self.nodes,
            root,
            generations: self.generations,
        })
    }

    fn link(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Walks up from `node` looking for `candidate`.
    fn is_ancestor_or_self(&self, candidate: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == candidate {
                return true;
            }
            current = self.nodes[id.0].parent;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(tree: &FamilyTree, ids: &[NodeId]) -> Vec<String> {
        ids.iter().map(|id| tree.node(*id).name().to_string()).collect()
    }

    fn sample() -> FamilyRecord {
        FamilyRecord::new("r")
            .with_child(
                FamilyRecord::new("a")
                    .with_child(FamilyRecord::new("a1"))
                    .with_child(FamilyRecord::new("a2")),
            )
            .with_child(FamilyRecord::new("b"))
            .with_generations(["一", "二"])
    }

    #[test]
    fn test_from_record_mirrors_shape() {
        let tree = TreeBuilder::from_record(&sample()).unwrap();

        assert_eq!(tree.len(), 5);
        let root = tree.node(tree.root());
        assert_eq!(root.name(), "r");
        assert!(root.parent().is_none());
        assert_eq!(names(&tree, root.children()), vec!["a", "b"]);

        let a = root.children()[0];
        assert_eq!(names(&tree, tree.node(a).children()), vec!["a1", "a2"]);
        for child in tree.node(a).children() {
            assert_eq!(tree.node(*child).parent(), Some(a));
        }
        assert_eq!(tree.generations(), ["一", "二"]);
    }

    #[test]
    fn test_traversal_orders() {
        let tree = TreeBuilder::from_record(&sample()).unwrap();
        assert_eq!(names(&tree, &tree.pre_order()), vec!["r", "a", "a1", "a2", "b"]);
        assert_eq!(names(&tree, &tree.post_order()), vec!["a1", "a2", "a", "b", "r"]);
    }

    #[test]
    fn test_blank_name_is_malformed() {
        let record = FamilyRecord::new("r").with_child(FamilyRecord::new("  "));
        let err = TreeBuilder::from_record(&record).unwrap_err();
        assert!(matches!(err, PedigreeError::MalformedInput(_)));
    }

    #[test]
    fn test_names_are_trimmed() {
        let tree = TreeBuilder::from_record(&FamilyRecord::new("  文达 ")).unwrap();
        assert_eq!(tree.node(tree.root()).name(), "文达");
    }

    #[test]
    fn test_attach_rejects_cycles_and_second_parents() {
        let mut builder = TreeBuilder::new();
        let root = builder.add_root("r").unwrap();
        let a = builder.add_node("a").unwrap();
        let b = builder.add_node("b").unwrap();
        builder.attach(root, a).unwrap();
        builder.attach(a, b).unwrap();

        // Root under its own descendant
        assert!(builder.attach(b, root).is_err());
        // Second parent
        assert!(builder.attach(root, b).is_err());
        // Self loop
        let c = builder.add_node("c").unwrap();
        assert!(builder.attach(c, c).is_err());
        // Ancestor under its descendant
        let d = builder.add_node("d").unwrap();
        builder.attach(c, d).unwrap();
        assert!(builder.attach(d, c).is_err());
        // Unknown ids
        assert!(builder.attach(root, NodeId(99)).is_err());
    }

    #[test]
    fn test_second_root_is_rejected() {
        let mut builder = TreeBuilder::new();
        builder.add_root("r").unwrap();
        assert!(builder.add_root("s").is_err());
    }

    #[test]
    fn test_build_requires_root_and_attached_nodes() {
        assert!(matches!(
            TreeBuilder::new().build(),
            Err(PedigreeError::EmptyTree)
        ));

        let mut builder = TreeBuilder::new();
        builder.add_root("r").unwrap();
        builder.add_node("loose").unwrap();
        let err = builder.build().unwrap_err();
        assert!(err.to_string().contains("loose"));
    }

    #[test]
    fn test_measure_assigns_depth_and_tier() {
        let policy = SizePolicy::new(Size::new(2.0, 1.0), Size::new(1.0, 3.0), 2);
        let sized = TreeBuilder::from_record(&sample()).unwrap().measure(&policy);

        assert_eq!(sized.generation_count(), 3);
        for id in sized.tree().pre_order() {
            let node = sized.node(id);
            match node.parent() {
                None => assert_eq!(node.depth(), 0),
                Some(parent) => assert_eq!(node.depth(), sized.node(parent).depth() + 1),
            }
            assert_eq!(node.size(), policy.size_for(node.depth()));
        }
    }

    #[test]
    fn test_deep_chain_does_not_recurse() {
        let mut builder = TreeBuilder::new();
        let mut parent = builder.add_root("g0").unwrap();
        for generation in 1..5_000 {
            let child = builder.add_node(&format!("g{generation}")).unwrap();
            builder.attach(parent, child).unwrap();
            parent = child;
        }
        let policy = SizePolicy::new(Size::new(2.0, 1.0), Size::new(1.0, 3.0), 2);
        let sized = builder.build().unwrap().measure(&policy);

        assert_eq!(sized.generation_count(), 5_000);
        assert_eq!(sized.node(parent).depth(), 4_999);
    }
}
