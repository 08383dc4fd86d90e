
use super::node::{Node, NodeKind};
use super::types::{Fence, FontVariant, Number};

/// Constructors for expression nodes.
///
/// These keep call sites in the parser and in tests short; every
/// constructor returns an undecorated node.
impl Node {
    pub fn number(value: f64) -> Self {
        NodeKind::Number(Number::Float(value)).into()
    }

    pub fn rational(numer: i64, denom: i64) -> Self {
        NodeKind::Number(Number::rational(numer, denom)).into()
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        NodeKind::Symbol {
            name: name.into(),
            variant: None,
        }
        .into()
    }

    pub fn styled_symbol(name: impl Into<String>, variant: FontVariant) -> Self {
        NodeKind::Symbol {
            name: name.into(),
            variant: Some(variant),
        }
        .into()
    }

    pub fn group(inner: Node, fence: Option<Fence>) -> Self {
        NodeKind::Group {
            inner: Box::new(inner),
            fence,
        }
        .into()
    }

    /// Single-argument application
    pub fn apply(name: impl Into<String>, arg: Node) -> Self {
        Self::apply_n(name, vec![arg])
    }

    /// Application over an argument sequence
    pub fn apply_n(name: impl Into<String>, args: Vec<Node>) -> Self {
        NodeKind::Apply {
            name: name.into(),
            args,
            over: None,
            under: None,
            fence: None,
        }
        .into()
    }

    pub fn binary(op: impl Into<String>, lhs: Node, rhs: Node) -> Self {
        NodeKind::Binary {
            op: op.into(),
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
        .into()
    }

    pub fn unary(op: impl Into<String>, rhs: Node) -> Self {
        NodeKind::Unary {
            op: op.into(),
            rhs: Box::new(rhs),
        }
        .into()
    }

    pub fn text(value: impl Into<String>) -> Self {
        NodeKind::Text(value.into()).into()
    }

    pub fn complex(re: Option<Node>, im: Option<Node>) -> Self {
        NodeKind::Complex {
            re: re.map(Box::new),
            im: im.map(Box::new),
            fence: None,
        }
        .into()
    }

    pub fn error(wrapped: Option<Node>, message: impl Into<String>) -> Self {
        NodeKind::Error {
            wrapped: wrapped.map(Box::new),
            message: message.into(),
        }
        .into()
    }

    pub fn with_superscript(mut self, sup: Node) -> Self {
        self.superscript = Some(Box::new(sup));
        self
    }

    pub fn with_subscript(mut self, sub: Node) -> Self {
        self.subscript = Some(Box::new(sub));
        self
    }

    /// Attach a fence to a group, application or complex node
    pub fn with_fence(mut self, new_fence: Fence) -> Self {
        match &mut self.kind {
            NodeKind::Group { fence, .. }
            | NodeKind::Apply { fence, .. }
            | NodeKind::Complex { fence, .. } => *fence = Some(new_fence),
            _ => {},
        }
        self
    }

    /// Set the limits of a large operator application
    pub fn with_limits(mut self, lower: Option<Node>, upper: Option<Node>) -> Self {
        if let NodeKind::Apply { over, under, .. } = &mut self.kind {
            *under = lower.map(Box::new);
            *over = upper.map(Box::new);
        }
        self
    }
}
