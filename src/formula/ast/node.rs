// Expression tree node definitions

use super::types::{Fence, FontVariant, Number};
use serde::{Deserialize, Serialize};

/// A node of the semantic expression tree.
///
/// Every variant may carry a superscript and a subscript decoration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superscript: Option<Box<Node>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscript: Option<Box<Node>>,
}

/// Closed set of node shapes produced by the parser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Numeric literal
    Number(Number),

    /// Identifier or named constant
    Symbol {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        variant: Option<FontVariant>,
    },

    /// Fenced content that is not a bare number, symbol or application
    Group {
        inner: Box<Node>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fence: Option<Fence>,
    },

    /// Function application; one argument or an argument sequence
    Apply {
        name: String,
        args: Vec<Node>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        over: Option<Box<Node>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        under: Option<Box<Node>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fence: Option<Fence>,
    },

    /// Infix operation
    Binary {
        op: String,
        lhs: Box<Node>,
        rhs: Box<Node>,
    },

    /// Prefix operation
    Unary { op: String, rhs: Box<Node> },

    /// Literal text run
    Text(String),

    /// Complex number with optional real and imaginary parts
    Complex {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        re: Option<Box<Node>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        im: Option<Box<Node>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fence: Option<Fence>,
    },

    /// Token the parser could not classify
    Error {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        wrapped: Option<Box<Node>>,
        message: String,
    },
}

impl Node {
    #[inline]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    #[inline]
    pub fn has_scripts(&self) -> bool {
        self.superscript.is_some() || self.subscript.is_some()
    }

    /// Number payload of an undecorated literal
    pub fn as_number(&self) -> Option<&Number> {
        match &self.kind {
            NodeKind::Number(n) if !self.has_scripts() => Some(n),
            _ => None,
        }
    }

    /// Integer value of an undecorated float literal
    pub fn as_integer(&self) -> Option<i64> {
        self.as_number().and_then(Number::as_integer)
    }

    /// Name of an undecorated symbol
    pub fn as_symbol(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Symbol { name, .. } if !self.has_scripts() => Some(name),
            _ => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self.kind, NodeKind::Number(_))
    }

    pub fn is_symbol(&self) -> bool {
        matches!(self.kind, NodeKind::Symbol { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, NodeKind::Error { .. })
    }

    /// Operator of a binary node
    pub fn binary_op(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Binary { op, .. } => Some(op),
            _ => None,
        }
    }

    /// Function name of an application node
    pub fn apply_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Apply { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Whether any node in this tree is an error node
    pub fn contains_error(&self) -> bool {
        let in_scripts = self.superscript.as_deref().is_some_and(Node::contains_error)
            || self.subscript.as_deref().is_some_and(Node::contains_error);
        in_scripts
            || match &self.kind {
                NodeKind::Error { .. } => true,
                NodeKind::Group { inner, .. } => inner.contains_error(),
                NodeKind::Apply {
                    args, over, under, ..
                } => {
                    args.iter().any(Node::contains_error)
                        || over.as_deref().is_some_and(Node::contains_error)
                        || under.as_deref().is_some_and(Node::contains_error)
                },
                NodeKind::Binary { lhs, rhs, .. } => lhs.contains_error() || rhs.contains_error(),
                NodeKind::Unary { rhs, .. } => rhs.contains_error(),
                NodeKind::Complex { re, im, .. } => {
                    re.as_deref().is_some_and(Node::contains_error)
                        || im.as_deref().is_some_and(Node::contains_error)
                },
                NodeKind::Number(_) | NodeKind::Symbol { .. } | NodeKind::Text(_) => false,
            }
    }
}

impl From<NodeKind> for Node {
    fn from(kind: NodeKind) -> Self {
        Node {
            kind,
            superscript: None,
            subscript: None,
        }
    }
}
