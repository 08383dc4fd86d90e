// Semantic expression tree for mathematical formulas
//
// The tree describes the meaning of a formula independent of its visual
// layout. It is produced by the atom parser and consumed by the LaTeX
// serializer; nodes own their children and are never shared.

mod builder;
mod node;
mod types;

pub use node::{Node, NodeKind};
pub use types::{parse_rational, Fence, FontVariant, Number};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_yaml_export() {
        let node = Node::apply("abs", Node::symbol("x")).with_superscript(Node::number(2.0));
        let yaml = serde_saphyr::to_string(&node).unwrap();
        assert!(yaml.contains("abs"));
        assert!(yaml.contains("superscript"));
    }
}
