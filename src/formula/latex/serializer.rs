// Expression tree to LaTeX
//
// Rendering appends to one owned buffer. Sub-renders that must be measured
// or substituted into a template swap the buffer out and back in.

use std::borrow::Cow;

use smallvec::SmallVec;

use super::number::write_number;
use super::options::LatexOptions;
use super::template::{Placed, encloses_argument, fill_template, is_postfix};
use super::utils::{escape_math_char, escape_text, push_spaced};
use crate::formula::ast::{Fence, Node, NodeKind, Number};
use crate::formula::catalog::Catalog;
use crate::formula::delimiters::fence_latex;

/// Precedence of `*`; large-operator arguments below it need parentheses
const PRODUCT_PRECEDENCE: u16 = 390;
/// Arithmetic operators start here; relations and commas bind looser
const ADDITIVE_PRECEDENCE: u16 = 275;

/// LaTeX serializer for expression trees.
///
/// ```ignore
/// let options = LatexOptions::default();
/// let mut serializer = LatexSerializer::new(&options, &StandardCatalog);
/// let latex = serializer.serialize(&node);
/// ```
pub struct LatexSerializer<'a> {
    buffer: String,
    options: &'a LatexOptions,
    catalog: &'a dyn Catalog,
    /// Middle glyphs of the enclosing `\left…\right` groups
    middles: SmallVec<[String; 2]>,
}

impl<'a> LatexSerializer<'a> {
    pub fn new(options: &'a LatexOptions, catalog: &'a dyn Catalog) -> Self {
        Self {
            buffer: String::with_capacity(64),
            options,
            catalog,
            middles: SmallVec::new(),
        }
    }

    /// Render a node, replacing any previous output
    pub fn serialize(&mut self, node: &Node) -> &str {
        self.reset();
        self.write_node(node);
        &self.buffer
    }

    pub fn reset(&mut self) {
        self.buffer.clear();
        self.middles.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn into_string(self) -> String {
        self.buffer
    }

    #[inline]
    fn push(&mut self, text: &str) {
        push_spaced(&mut self.buffer, text);
    }

    /// Render a node on its own and return the text
    fn render(&mut self, node: &Node) -> String {
        let saved = std::mem::take(&mut self.buffer);
        self.write_node(node);
        std::mem::replace(&mut self.buffer, saved)
    }

    fn write_parenthesized(&mut self, node: &Node) {
        self.push("\\left(");
        self.write_node(node);
        self.push("\\right)");
    }

    fn write_node(&mut self, node: &Node) {
        let fenced = node.has_scripts() && needs_script_fence(node);
        if fenced {
            self.push("\\left(");
        }
        let placed = self.write_kind(node);
        if fenced {
            self.push("\\right)");
        }
        if !placed.subscript {
            if let Some(sub) = &node.subscript {
                self.push("_{");
                self.write_node(sub);
                self.push("}");
            }
        }
        if !placed.superscript {
            if let Some(sup) = &node.superscript {
                self.push("^{");
                self.write_node(sup);
                self.push("}");
            }
        }
    }

    fn write_kind(&mut self, node: &Node) -> Placed {
        match &node.kind {
            NodeKind::Number(number) => {
                write_number(&mut self.buffer, number, self.options);
            },
            NodeKind::Symbol { name, variant } => {
                let spelled = self.symbol_latex(name);
                match variant {
                    Some(variant) => {
                        self.push(variant.latex_command());
                        self.push("{");
                        self.push(&spelled);
                        self.push("}");
                    },
                    None => self.push(&spelled),
                }
            },
            NodeKind::Group { inner, fence } => self.write_group(inner, fence.as_ref()),
            NodeKind::Apply {
                name,
                args,
                over,
                under,
                fence,
            } => {
                return self.write_apply(
                    node,
                    name,
                    args,
                    over.as_deref(),
                    under.as_deref(),
                    fence.as_ref(),
                );
            },
            NodeKind::Binary { op, lhs, rhs } => self.write_binary(op, lhs, rhs),
            NodeKind::Unary { op, rhs } => {
                let spelled = self.operator_latex(op);
                self.push(spelled);
                let compound = rhs.binary_op().is_some_and(|op| op != "/") && !self.is_implicit_product(rhs);
                if compound {
                    self.write_parenthesized(rhs);
                } else {
                    self.write_node(rhs);
                }
            },
            NodeKind::Text(text) => {
                self.push("\\text{");
                escape_text(text, &mut self.buffer);
                self.push("}");
            },
            NodeKind::Complex { re, im, fence } => {
                self.write_complex(re.as_deref(), im.as_deref(), fence.as_ref());
            },
            NodeKind::Error { wrapped, .. } => {
                self.push("\\colorbox{red}{");
                match wrapped {
                    Some(wrapped) => self.write_node(wrapped),
                    None => self.push("\\square"),
                }
                self.push("}");
            },
        }
        Placed::default()
    }

    fn symbol_latex<'n>(&self, name: &'n str) -> Cow<'n, str>
    where
        'a: 'n,
    {
        let catalog = self.catalog;
        if let Some(latex) = catalog.latex_for_symbol(name) {
            return Cow::Borrowed(latex);
        }
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => match escape_math_char(ch) {
                Some(escaped) => Cow::Borrowed(escaped),
                None => Cow::Borrowed(name),
            },
            _ if name.starts_with('\\') => Cow::Borrowed(name),
            _ => Cow::Owned(format!("\\mathrm{{{name}}}")),
        }
    }

    fn operator_latex<'n>(&self, op: &'n str) -> &'n str
    where
        'a: 'n,
    {
        let catalog = self.catalog;
        catalog.latex_for_symbol(op).unwrap_or(op)
    }

    fn write_group(&mut self, inner: &Node, fence: Option<&Fence>) {
        let Some(fence) = fence else {
            self.push("{");
            self.write_node(inner);
            self.push("}");
            return;
        };
        self.push("\\left");
        self.push(fence_latex(&fence.open));
        let has_middle = !fence.middle.is_empty();
        if has_middle {
            self.middles.push(fence.middle.clone());
        }
        self.write_node(inner);
        if has_middle {
            self.middles.pop();
        }
        self.push("\\right");
        self.push(fence_latex(&fence.close));
    }

    fn write_apply(
        &mut self,
        node: &Node,
        name: &str,
        args: &[Node],
        over: Option<&Node>,
        under: Option<&Node>,
        fence: Option<&Fence>,
    ) -> Placed {
        match (name, args) {
            ("pow", [base, exponent]) => {
                self.write_power(base, exponent);
                return Placed::default();
            },
            ("root", [radicand, exponent]) => {
                self.write_root(radicand, exponent);
                return Placed::default();
            },
            _ => {},
        }
        let catalog = self.catalog;
        match catalog.latex_template_for(name) {
            Some(template) => {
                let large = catalog.is_large_operator(name);
                self.write_template(template, node, args, over, under, large)
            },
            None => self.write_function(node, name, args, over, under, fence),
        }
    }

    fn write_power(&mut self, base: &Node, exponent: &Node) {
        if is_bare_base(base) {
            self.write_node(base);
        } else {
            self.write_parenthesized(base);
        }
        self.push("^{");
        self.write_node(exponent);
        self.push("}");
    }

    fn write_root(&mut self, radicand: &Node, exponent: &Node) {
        let mut digits = itoa::Buffer::new();
        let index = match exponent.as_number().and_then(Number::rational_parts) {
            Some((1, q)) if q > 0 => Some(digits.format(q).to_string()),
            _ => match &exponent.kind {
                NodeKind::Binary { op, lhs, rhs } if op == "/" && lhs.as_integer() == Some(1) && !exponent.has_scripts() => {
                    Some(self.render(rhs))
                },
                _ => None,
            },
        };
        match index {
            Some(index) => {
                self.push("\\sqrt[");
                self.push(&index);
                self.push("]{");
                self.write_node(radicand);
                self.push("}");
            },
            None => self.write_power(radicand, exponent),
        }
    }

    fn write_template(
        &mut self,
        template: &str,
        node: &Node,
        args: &[Node],
        over: Option<&Node>,
        under: Option<&Node>,
        large: bool,
    ) -> Placed {
        let enclosed = encloses_argument(template);
        let postfix = is_postfix(template);
        let catalog = self.catalog;
        let rendered: SmallVec<[String; 2]> = args
            .iter()
            .map(|arg| {
                let text = self.render(arg);
                let parens = if large {
                    binds_looser_than_product(arg, catalog)
                } else {
                    needs_template_parens(arg, postfix)
                };
                if !enclosed && parens {
                    format!("\\left({text}\\right)")
                } else {
                    text
                }
            })
            .collect();
        let upper = over.or(node.superscript.as_deref());
        let lower = under.or(node.subscript.as_deref());
        let sup = upper.map(|n| self.render(n));
        let sub = lower.map(|n| self.render(n));
        let placed = fill_template(&mut self.buffer, template, &rendered, sup.as_deref(), sub.as_deref());
        // limits came from over/under; the node's own scripts still follow
        Placed {
            superscript: placed.superscript && over.is_none(),
            subscript: placed.subscript && under.is_none(),
        }
    }

    fn write_function(
        &mut self,
        node: &Node,
        name: &str,
        args: &[Node],
        over: Option<&Node>,
        under: Option<&Node>,
        fence: Option<&Fence>,
    ) -> Placed {
        let catalog = self.catalog;
        let head: Cow<'_, str> = match catalog.latex_for_symbol(name) {
            Some(latex) => Cow::Borrowed(latex),
            None if name.chars().count() == 1 => Cow::Borrowed(name),
            None => Cow::Owned(format!("\\operatorname{{{name}}}")),
        };
        self.push(&head);

        let large = catalog.is_large_operator(name);
        let lower = if large { under.or(node.subscript.as_deref()) } else { node.subscript.as_deref() };
        let upper = if large { over.or(node.superscript.as_deref()) } else { node.superscript.as_deref() };
        if let Some(lower) = lower {
            self.push("_{");
            self.write_node(lower);
            self.push("}");
        }
        if let Some(upper) = upper {
            self.push("^{");
            self.write_node(upper);
            self.push("}");
        }
        let placed = Placed {
            superscript: !large || over.is_none(),
            subscript: !large || under.is_none(),
        };

        match args {
            [] => {
                if fence.is_some() {
                    self.write_argument_list(args, fence);
                }
            },
            [arg] if fence.is_none() && large => {
                if binds_looser_than_product(arg, catalog) {
                    self.write_parenthesized(arg);
                } else {
                    self.write_node(arg);
                }
            },
            [arg] if catalog.has_optional_parens(name) && is_bare_argument(arg) => {
                self.write_node(arg);
            },
            _ => self.write_argument_list(args, fence),
        }
        placed
    }

    fn write_argument_list(&mut self, args: &[Node], fence: Option<&Fence>) {
        let (open, close) = match fence {
            Some(fence) => (fence_latex(&fence.open), fence_latex(&fence.close)),
            None => ("(", ")"),
        };
        self.push("\\left");
        self.push(open);
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                self.push(",");
            }
            self.write_node(arg);
        }
        self.push("\\right");
        self.push(close);
    }

    fn write_binary(&mut self, op: &str, lhs: &Node, rhs: &Node) {
        match op {
            "/" => {
                self.push("\\frac{");
                self.write_node(lhs);
                self.push("}{");
                self.write_node(rhs);
                self.push("}");
                return;
            },
            "middle" => {
                self.write_operand(lhs, op, false);
                let glyph = self.middles.last().cloned().unwrap_or_else(|| "|".to_string());
                self.push("\\middle");
                self.push(fence_latex(&glyph));
                self.write_operand(rhs, op, true);
                return;
            },
            "*" if self.implicit_between(lhs, rhs) => {
                self.write_operand(lhs, op, false);
                self.write_operand(rhs, op, true);
                return;
            },
            "*" => {
                self.write_operand(lhs, op, false);
                let options = self.options;
                self.push(&options.product);
                self.write_operand(rhs, op, true);
                return;
            },
            _ => {},
        }

        let catalog = self.catalog;
        if let Some(template) = catalog.latex_template_for(op) {
            let mut operands: SmallVec<[String; 2]> = SmallVec::new();
            for (operand, right) in [(lhs, false), (rhs, true)] {
                let saved = std::mem::take(&mut self.buffer);
                self.write_operand(operand, op, right);
                operands.push(std::mem::replace(&mut self.buffer, saved));
            }
            fill_template(&mut self.buffer, template, &operands, None, None);
            return;
        }
        self.write_operand(lhs, op, false);
        let spelled = self.operator_latex(op);
        self.push(spelled);
        self.write_operand(rhs, op, true);
    }

    fn write_operand(&mut self, child: &Node, parent: &str, right: bool) {
        if self.needs_parens(child, parent, right) {
            self.write_parenthesized(child);
        } else {
            self.write_node(child);
        }
    }

    fn precedence(&self, op: &str) -> u16 {
        self.catalog.precedence_of(op).unwrap_or(u16::MAX)
    }

    fn needs_parens(&self, child: &Node, parent: &str, right: bool) -> bool {
        let parent_precedence = self.precedence(parent);
        match &child.kind {
            NodeKind::Binary { op, .. } if op != "/" && !child.has_scripts() => {
                let child_precedence = self.precedence(op);
                child_precedence < parent_precedence
                    || (right && child_precedence == parent_precedence && parent == "-")
            },
            // a sign after an arithmetic operator
            NodeKind::Unary { .. } => right && parent_precedence >= ADDITIVE_PRECEDENCE,
            NodeKind::Number(number) => {
                right && parent_precedence >= ADDITIVE_PRECEDENCE && number.is_negative() && !child.has_scripts()
            },
            _ => false,
        }
    }

    /// Whether a product node renders by juxtaposition
    fn is_implicit_product(&self, node: &Node) -> bool {
        match &node.kind {
            NodeKind::Binary { op, lhs, rhs } if op == "*" && !node.has_scripts() => self.implicit_between(lhs, rhs),
            _ => false,
        }
    }

    fn implicit_between(&self, lhs: &Node, rhs: &Node) -> bool {
        let Some(tail) = self.product_tail(lhs) else {
            return false;
        };
        if self.needs_parens(rhs, "*", true) {
            // the right factor renders as a parenthesized group
            return match &tail.kind {
                NodeKind::Number(_) => true,
                NodeKind::Symbol { name, .. } => tail.has_scripts() || !matches!(name.as_str(), "f" | "g"),
                _ => false,
            };
        }
        let Some(head) = self.product_head(rhs) else {
            return false;
        };
        match (&tail.kind, &head.kind) {
            // `2e` would read as an exponent marker
            (NodeKind::Number(_), NodeKind::Symbol { name, .. }) => !matches!(name.as_str(), "e" | "E" | "d" | "D"),
            (NodeKind::Symbol { name, .. }, NodeKind::Group { fence: Some(fence), .. }) => {
                !(fence.is_parens() && !tail.has_scripts() && matches!(name.as_str(), "f" | "g"))
            },
            (NodeKind::Number(_) | NodeKind::Symbol { .. }, NodeKind::Symbol { .. } | NodeKind::Apply { .. }) => true,
            (NodeKind::Number(_), NodeKind::Group { fence: Some(_), .. }) => true,
            _ => false,
        }
    }

    /// Rightmost factor of an implicit product chain
    fn product_tail<'n>(&self, node: &'n Node) -> Option<&'n Node> {
        match &node.kind {
            NodeKind::Binary { rhs, .. } if self.is_implicit_product(node) => self.product_tail(rhs),
            NodeKind::Binary { .. } | NodeKind::Unary { .. } => None,
            _ => Some(node),
        }
    }

    /// Leftmost factor of an implicit product chain, looking through
    /// nodes whose rendering starts with one of their operands
    fn product_head<'n>(&self, node: &'n Node) -> Option<&'n Node> {
        match &node.kind {
            NodeKind::Binary { lhs, .. } if self.is_implicit_product(node) => self.product_head(lhs),
            NodeKind::Binary { .. } | NodeKind::Unary { .. } => None,
            NodeKind::Apply { name, args, .. } => match (name.as_str(), args.first()) {
                ("pow", Some(base)) if is_bare_base(base) => self.product_head(base),
                (_, Some(first))
                    if self.catalog.latex_template_for(name).is_some_and(is_postfix)
                        && !needs_template_parens(first, true) =>
                {
                    self.product_head(first)
                },
                _ => Some(node),
            },
            _ => Some(node),
        }
    }

    fn write_complex(&mut self, re: Option<&Node>, im: Option<&Node>, fence: Option<&Fence>) {
        if let Some(fence) = fence {
            self.push("\\left");
            self.push(fence_latex(&fence.open));
        }
        match (re, im) {
            (None, None) => self.push("0"),
            (Some(re), None) => self.write_node(re),
            (re, Some(im)) => {
                if let Some(re) = re {
                    self.write_node(re);
                }
                self.write_imaginary(im, re.is_none());
            },
        }
        if let Some(fence) = fence {
            self.push("\\right");
            self.push(fence_latex(&fence.close));
        }
    }

    fn write_imaginary(&mut self, im: &Node, leading: bool) {
        let magnitude = match im.as_number() {
            Some(number) if number.is_negative() => {
                self.push("-");
                Cow::Owned(Node::from(NodeKind::Number(number.clone().negate())))
            },
            _ => {
                if !leading {
                    self.push("+");
                }
                Cow::Borrowed(im)
            },
        };
        if magnitude.as_integer() != Some(1) {
            if matches!(magnitude.kind, NodeKind::Binary { .. } | NodeKind::Unary { .. }) {
                self.write_parenthesized(&magnitude);
            } else {
                self.write_node(&magnitude);
            }
        }
        self.push("i");
    }
}

impl AsRef<str> for LatexSerializer<'_> {
    fn as_ref(&self) -> &str {
        &self.buffer
    }
}

/// Bases that must be fenced before scripts are attached
fn needs_script_fence(node: &Node) -> bool {
    match &node.kind {
        NodeKind::Binary { op, .. } => op != "/",
        NodeKind::Unary { .. } => true,
        NodeKind::Number(number) => number.is_negative() || matches!(number, Number::Rational(_)),
        NodeKind::Complex { fence, .. } => fence.is_none(),
        NodeKind::Apply { name, .. } => name == "pow" || name == "root",
        _ => false,
    }
}

/// Power bases written without parentheses
fn is_bare_base(base: &Node) -> bool {
    !base.has_scripts()
        && match &base.kind {
            NodeKind::Symbol { .. } => true,
            NodeKind::Number(number @ Number::Float(_)) => !number.is_negative(),
            _ => false,
        }
}

/// Arguments an optional-parenthesis function takes without parentheses
fn is_bare_argument(arg: &Node) -> bool {
    match &arg.kind {
        NodeKind::Number(number) => !number.is_negative(),
        NodeKind::Symbol { .. } => true,
        NodeKind::Binary { op, .. } => op == "/",
        NodeKind::Apply { name, .. } => name == "sqrt",
        _ => false,
    }
}

/// Large-operator operands are parenthesized only below product precedence
fn binds_looser_than_product(arg: &Node, catalog: &dyn Catalog) -> bool {
    arg.binary_op()
        .is_some_and(|op| op != "/" && catalog.precedence_of(op).unwrap_or(u16::MAX) < PRODUCT_PRECEDENCE)
}

/// Arguments a template without its own delimiters must parenthesize
fn needs_template_parens(arg: &Node, postfix: bool) -> bool {
    match &arg.kind {
        NodeKind::Binary { op, .. } => op != "/" || postfix,
        NodeKind::Unary { .. } => true,
        NodeKind::Complex { fence, .. } => fence.is_none(),
        NodeKind::Number(number) => postfix && (number.is_negative() || matches!(number, Number::Rational(_))),
        NodeKind::Apply { .. } => postfix,
        _ => false,
    }
}
