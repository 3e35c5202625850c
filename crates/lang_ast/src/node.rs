//! AST node definitions.
//!
//! Every node lives in a [`lang_core::NodeArena`] and refers to its children
//! through arena references sharing one lifetime `'a`. Nodes are never freed
//! one by one; the whole arena goes at once.

use std::fmt;

use crate::token::Token;

/// Upper bound on top-level statements in one program.
pub const MAX_STATEMENTS: usize = 1024;

/// Upper bound on parameters in one function signature.
pub const MAX_PARAMETERS: usize = 127;

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expression<'a> {
    /// A number literal leaf.
    Literal(Token<'a>),
    /// An identifier leaf.
    Identifier(Token<'a>),
    Binary(BinaryOperation<'a>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryOperation<'a> {
    pub operator: Token<'a>,
    pub left: &'a Expression<'a>,
    pub right: &'a Expression<'a>,
}

impl<'a> Expression<'a> {
    /// The leaf token, or the operator token of a binary operation.
    pub fn token(&self) -> &Token<'a> {
        match self {
            Expression::Literal(token) | Expression::Identifier(token) => token,
            Expression::Binary(binary) => &binary.operator,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Expression::Literal(_) => NodeKind::Expression,
            Expression::Identifier(_) => NodeKind::Identifier,
            Expression::Binary(_) => NodeKind::BinaryOperation,
        }
    }

    /// Render the tree in prefix form with explicit grouping, e.g.
    /// `(+ 2 (* 3 4))`. Two trees with the same shape and literals render
    /// identically regardless of source positions.
    pub fn to_sexpr(&self) -> String {
        let mut out = String::new();
        let mut pending = vec![Piece::Node(self)];
        while let Some(piece) = pending.pop() {
            match piece {
                Piece::Node(Expression::Binary(binary)) => {
                    out.push('(');
                    out.push_str(&binary.operator.literal.to_string());
                    pending.extend([
                        Piece::Close,
                        Piece::Node(binary.right),
                        Piece::Space,
                        Piece::Node(binary.left),
                        Piece::Space,
                    ]);
                }
                Piece::Node(leaf) => out.push_str(&leaf.token().literal.to_string()),
                Piece::Space => out.push(' '),
                Piece::Close => out.push(')'),
                Piece::Operator(_) => {}
            }
        }
        out
    }
}

/// Work items for walking an expression without recursion, so long
/// operator chains render in constant stack space.
enum Piece<'e, 'a> {
    Node(&'e Expression<'a>),
    Operator(&'e Token<'a>),
    Space,
    Close,
}

/// Infix form without added parentheses, e.g. `2 + 3 * 4`.
impl fmt::Display for Expression<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pending = vec![Piece::Node(self)];
        while let Some(piece) = pending.pop() {
            match piece {
                Piece::Node(Expression::Binary(binary)) => {
                    pending.extend([
                        Piece::Node(binary.right),
                        Piece::Operator(&binary.operator),
                        Piece::Node(binary.left),
                    ]);
                }
                Piece::Node(leaf) => write!(f, "{}", leaf.token().literal)?,
                Piece::Operator(operator) => write!(f, " {} ", operator.literal)?,
                Piece::Space | Piece::Close => {}
            }
        }
        Ok(())
    }
}

// ============================================================================
// Declarations
// ============================================================================

/// A name with an optional declared type: `a` or `a: int`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameWithType<'a> {
    pub name: Token<'a>,
    pub ty: Option<Token<'a>>,
}

/// `name [: type] := expression;`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableAssignment<'a> {
    pub binding: &'a NameWithType<'a>,
    pub value: &'a Expression<'a>,
}

/// `(a: int, b: int) -> int`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeSignature<'a> {
    pub parameters: &'a [&'a NameWithType<'a>],
    pub return_type: Token<'a>,
}

/// `name :: (parameters) -> return_type`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionDeclaration<'a> {
    pub name: Token<'a>,
    pub signature: &'a TypeSignature<'a>,
    /// Function bodies are not parsed yet; always `None`.
    pub body: Option<&'a Expression<'a>>,
}

// ============================================================================
// Statements and program
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statement<'a> {
    Expression(&'a Expression<'a>),
    Assignment(&'a VariableAssignment<'a>),
    Function(&'a FunctionDeclaration<'a>),
}

impl<'a> Statement<'a> {
    pub fn as_node(&self) -> Node<'a> {
        match *self {
            Statement::Expression(expr) => Node::Expression(expr),
            Statement::Assignment(assignment) => Node::VariableAssignment(assignment),
            Statement::Function(function) => Node::FunctionDeclaration(function),
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.as_node().kind()
    }
}

/// The ordered top-level statements of one source text.
#[derive(Debug, Clone, Default)]
pub struct Program<'a> {
    pub statements: Vec<Statement<'a>>,
}

impl<'a> Program<'a> {
    pub fn new() -> Self {
        Self {
            statements: Vec::new(),
        }
    }

    pub fn push(&mut self, statement: Statement<'a>) {
        self.statements.push(statement);
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Statement<'a>> {
        self.statements.iter()
    }
}

// ============================================================================
// Node view
// ============================================================================

/// Tag shared by every node variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Expression,
    BinaryOperation,
    Identifier,
    NameWithType,
    VariableAssignment,
    FunctionDeclaration,
    TypeSignature,
}

impl NodeKind {
    /// Label used by the tree printer.
    pub fn label(self) -> &'static str {
        match self {
            NodeKind::Expression | NodeKind::BinaryOperation => "Expression",
            NodeKind::Identifier => "Identifier",
            NodeKind::NameWithType => "Parameter",
            NodeKind::VariableAssignment => "Assignment",
            NodeKind::FunctionDeclaration => "Function",
            NodeKind::TypeSignature => "Signature",
        }
    }
}

/// A borrowed view over any node, exposing the common `{kind, token}` header.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Expression(&'a Expression<'a>),
    NameWithType(&'a NameWithType<'a>),
    VariableAssignment(&'a VariableAssignment<'a>),
    FunctionDeclaration(&'a FunctionDeclaration<'a>),
    TypeSignature(&'a TypeSignature<'a>),
}

impl<'a> Node<'a> {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Expression(expr) => expr.kind(),
            Node::NameWithType(_) => NodeKind::NameWithType,
            Node::VariableAssignment(_) => NodeKind::VariableAssignment,
            Node::FunctionDeclaration(_) => NodeKind::FunctionDeclaration,
            Node::TypeSignature(_) => NodeKind::TypeSignature,
        }
    }

    /// The token that introduced this node.
    pub fn token(&self) -> &'a Token<'a> {
        match *self {
            Node::Expression(expr) => expr.token(),
            Node::NameWithType(binding) => &binding.name,
            Node::VariableAssignment(assignment) => &assignment.binding.name,
            Node::FunctionDeclaration(function) => &function.name,
            Node::TypeSignature(signature) => &signature.return_type,
        }
    }
}
