/*!
# Node Representation

Nodes are identified by a caller-visible integer `NodeId` and carry a unique
display `name` plus canvas coordinates. Ids may have gaps; in addition every node
has a dense [`NodeIndex`], its position in insertion order, which the engines use
to size and index their private state.

Most graph operations accept a [`NodeRef`] so that an endpoint can be given
either by id or by name.
*/

use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

use stream_bitset::bitset::BitSetImpl;

/// Nodes are identified by unsigned integers
pub type NodeId = u32;

/// We limit the number of nodes to `2^32 - 1`.
pub type NumNodes = NodeId;

/// Position of a node in insertion order, always in `0..graph.len()`
pub type NodeIndex = u32;

/// BitSet over node positions
pub type NodeBitSet = BitSetImpl<NodeIndex>;

/// An `Option<NodeIndex>` in the space of a `NodeIndex`.
///
/// `NodeIndex::MAX` is never a valid position (a graph holds at most `2^32 - 1` nodes) and serves
/// as the niche, so `Option<OptionalIndex>` takes four bytes.
///
/// ```
/// use stepgraphs::prelude::*;
///
/// assert_eq!(OptionalIndex::new(7).map(|i| i.get()), Some(7));
/// assert_eq!(OptionalIndex::new(NodeIndex::MAX), None);
/// assert_eq!(size_of::<Option<OptionalIndex>>(), size_of::<NodeIndex>());
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct OptionalIndex(NonZero<NodeIndex>);

impl OptionalIndex {
    /// Returns `None` for `NodeIndex::MAX`
    pub const fn new(index: NodeIndex) -> Option<Self> {
        match NonZero::new(index ^ NodeIndex::MAX) {
            Some(x) => Some(Self(x)),
            None => None,
        }
    }

    pub const fn get(&self) -> NodeIndex {
        self.0.get() ^ NodeIndex::MAX
    }
}

impl Debug for OptionalIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// A named node with canvas coordinates. Immutable once added to a graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub x: f64,
    pub y: f64,
}

impl Node {
    /// Euclidean distance between the coordinates of two nodes
    pub fn distance_to(&self, other: &Node) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Reference to a node either by id or by its unique name.
///
/// ```
/// use stepgraphs::prelude::*;
///
/// assert_eq!(NodeRef::from(3), NodeRef::Id(3));
/// assert_eq!(NodeRef::from("A"), NodeRef::Name("A"));
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub enum NodeRef<'a> {
    Id(NodeId),
    Name(&'a str),
}

impl Display for NodeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeRef::Id(id) => write!(f, "#{id}"),
            NodeRef::Name(name) => write!(f, "{name:?}"),
        }
    }
}

impl Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

impl From<NodeId> for NodeRef<'_> {
    fn from(value: NodeId) -> Self {
        NodeRef::Id(value)
    }
}

impl From<&NodeId> for NodeRef<'_> {
    fn from(value: &NodeId) -> Self {
        NodeRef::Id(*value)
    }
}

impl<'a> From<&'a str> for NodeRef<'a> {
    fn from(value: &'a str) -> Self {
        NodeRef::Name(value)
    }
}

impl<'a> From<&'a String> for NodeRef<'a> {
    fn from(value: &'a String) -> Self {
        NodeRef::Name(value.as_str())
    }
}

impl<'a> From<&'a Node> for NodeRef<'a> {
    fn from(value: &'a Node) -> Self {
        NodeRef::Id(value.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance() {
        let a = Node {
            id: 0,
            name: "a".into(),
            x: 0.0,
            y: 0.0,
        };
        let b = Node {
            id: 1,
            name: "b".into(),
            x: 3.0,
            y: 4.0,
        };
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(b.distance_to(&a), 5.0);
    }

    #[test]
    fn optional_index() {
        for i in [0, 1, 17, NodeIndex::MAX - 1] {
            assert_eq!(OptionalIndex::new(i).map(|x| x.get()), Some(i));
        }
        assert!(OptionalIndex::new(NodeIndex::MAX).is_none());
        assert_eq!(format!("{:?}", OptionalIndex::new(5)), "Some(5)");
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", NodeRef::Id(7)), "#7");
        assert_eq!(format!("{:?}", NodeRef::Name("Central")), "\"Central\"");
    }
}
