use std::fmt;

/// Split node of an isolation tree. A node with no children is an external
/// node. Subtrees are owned, so dropping a node drops everything below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    feature_name: String,
    split_value: u64,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}
impl Node {
    pub fn new(feature_name: impl Into<String>, split_value: u64) -> Self {
        Self {
            feature_name: feature_name.into(),
            split_value,
            left: None,
            right: None,
        }
    }
    pub fn feature_name(&self) -> &str {
        &self.feature_name
    }
    pub fn split_value(&self) -> u64 {
        self.split_value
    }
    pub fn left(&self) -> Option<&Node> {
        self.left.as_deref()
    }
    pub fn right(&self) -> Option<&Node> {
        self.right.as_deref()
    }
    /// Replaces the left subtree, dropping the previous one.
    pub fn set_left(&mut self, subtree: Option<Node>) {
        self.left = subtree.map(Box::new);
    }
    /// Replaces the right subtree, dropping the previous one.
    pub fn set_right(&mut self, subtree: Option<Node>) {
        self.right = subtree.map(Box::new);
    }
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
    /// Number of levels below and including this node.
    pub fn height(&self) -> usize {
        let left = self.left().map_or(0, Node::height);
        let right = self.right().map_or(0, Node::height);
        1 + left.max(right)
    }
    pub fn n_nodes(&self) -> usize {
        1 + self.left().map_or(0, Node::n_nodes) + self.right().map_or(0, Node::n_nodes)
    }
}

/// Debug dump: `{'Feature Name': 'x', 'Split Value': 3, 'Left': {}, 'Right': {}}`.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{'Feature Name': '{}', 'Split Value': {}, 'Left': ",
            self.feature_name, self.split_value
        )?;
        match self.left() {
            Some(left) => write!(f, "{}", left)?,
            None => f.write_str("{}")?,
        }
        f.write_str(", 'Right': ")?;
        match self.right() {
            Some(right) => write!(f, "{}", right)?,
            None => f.write_str("{}")?,
        }
        f.write_str("}")
    }
}
