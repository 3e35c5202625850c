//! lang_printer: AST to text output.
//!
//! Renders a parsed [`Program`] as an indented tree for humans to read. The
//! printer only reads the tree; nothing in the front end depends on it.
//!
//! ```text
//! │[Program]
//! └──│[Statement]
//!    └───[Expression] 2 + 3 * 4
//! ```

use lang_ast::node::*;
use lang_ast::visitor::AstVisitor;

/// Options for the printer.
pub struct PrinterOptions {
    /// Newline string.
    pub new_line: String,
    /// Whether to emit a trailing newline.
    pub trailing_newline: bool,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        Self {
            new_line: "\n".to_string(),
            trailing_newline: true,
        }
    }
}

/// Writes one line per node, indented three columns per level.
pub struct TreePrinter {
    output: String,
    depth: usize,
    options: PrinterOptions,
}

impl TreePrinter {
    pub fn new() -> Self {
        Self::with_options(PrinterOptions::default())
    }

    pub fn with_options(options: PrinterOptions) -> Self {
        Self {
            output: String::with_capacity(4096),
            depth: 0,
            options,
        }
    }

    /// Print a program to a string.
    pub fn print_program(&mut self, program: &Program<'_>) -> String {
        self.output.clear();
        self.depth = 0;
        self.output.push_str("│[Program]");
        self.visit_program(program);
        if self.options.trailing_newline {
            self.output.push_str(&self.options.new_line);
        }
        self.output.clone()
    }

    fn write_node(&mut self, has_children: bool, label: &str, text: &str) {
        self.output.push_str(&self.options.new_line);
        for _ in 0..self.depth * 3 {
            self.output.push(' ');
        }
        self.output.push_str(if has_children { "└──│[" } else { "└───[" });
        self.output.push_str(label);
        self.output.push(']');
        if !text.is_empty() {
            self.output.push(' ');
            self.output.push_str(text);
        }
    }

    fn nested(&mut self, f: impl FnOnce(&mut Self)) {
        self.depth += 1;
        f(self);
        self.depth -= 1;
    }
}

impl Default for TreePrinter {
    fn default() -> Self {
        Self::new()
    }
}

/// `name` or `name: type`.
fn binding_text(binding: &NameWithType<'_>) -> String {
    match binding.ty {
        Some(ty) => format!("{}: {}", binding.name.literal, ty.literal),
        None => binding.name.literal.to_string(),
    }
}

impl<'a> AstVisitor<'a> for TreePrinter {
    fn visit_statement(&mut self, stmt: &Statement<'a>) {
        self.write_node(true, "Statement", "");
        self.nested(|printer| match *stmt {
            Statement::Expression(expr) => printer.visit_expression(expr),
            Statement::Assignment(assignment) => printer.visit_variable_assignment(assignment),
            Statement::Function(function) => printer.visit_function_declaration(function),
        });
    }

    /// Expressions print inline, in infix form.
    fn visit_expression(&mut self, expr: &'a Expression<'a>) {
        self.write_node(false, expr.kind().label(), &expr.to_string());
    }

    fn visit_name_with_type(&mut self, binding: &'a NameWithType<'a>) {
        self.write_node(false, NodeKind::Identifier.label(), &binding_text(binding));
    }

    fn visit_variable_assignment(&mut self, assignment: &'a VariableAssignment<'a>) {
        self.write_node(true, NodeKind::VariableAssignment.label(), "");
        self.nested(|printer| {
            printer.visit_name_with_type(assignment.binding);
            printer.visit_expression(assignment.value);
        });
    }

    fn visit_function_declaration(&mut self, function: &'a FunctionDeclaration<'a>) {
        self.write_node(true, NodeKind::FunctionDeclaration.label(), "");
        self.nested(|printer| {
            printer.write_node(false, NodeKind::Identifier.label(), &function.name.literal.to_string());
            printer.visit_type_signature(function.signature);
        });
    }

    fn visit_type_signature(&mut self, signature: &'a TypeSignature<'a>) {
        self.write_node(true, NodeKind::TypeSignature.label(), "");
        self.nested(|printer| {
            for &parameter in signature.parameters {
                printer.write_node(false, NodeKind::NameWithType.label(), &binding_text(parameter));
            }
            printer.write_node(false, "Return type", &signature.return_type.literal.to_string());
        });
    }
}

/// Print a program with the default options.
pub fn print_program(program: &Program<'_>) -> String {
    TreePrinter::new().print_program(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lang_ast::token::{Token, TokenKind};
    use lang_core::text::Text;

    fn token(kind: TokenKind, text: &'static str) -> Token<'static> {
        Token::new(kind, Text::from_static(text), 1, 1)
    }

    #[test]
    fn test_print_empty_program() {
        assert_eq!(print_program(&Program::new()), "│[Program]\n");
    }

    #[test]
    fn test_print_expression_statement() {
        let two = Expression::Literal(token(TokenKind::NumberLiteral, "2"));
        let three = Expression::Literal(token(TokenKind::NumberLiteral, "3"));
        let sum = Expression::Binary(BinaryOperation {
            operator: token(TokenKind::Plus, "+"),
            left: &two,
            right: &three,
        });
        let mut program = Program::new();
        program.push(Statement::Expression(&sum));
        assert_eq!(
            print_program(&program),
            "│[Program]\n└──│[Statement]\n   └───[Expression] 2 + 3\n"
        );
    }

    #[test]
    fn test_print_assignment_and_function() {
        let binding = NameWithType {
            name: token(TokenKind::Identifier, "x"),
            ty: Some(token(TokenKind::Identifier, "int")),
        };
        let value = Expression::Identifier(token(TokenKind::Identifier, "y"));
        let assignment = VariableAssignment {
            binding: &binding,
            value: &value,
        };
        let a = NameWithType {
            name: token(TokenKind::Identifier, "a"),
            ty: Some(token(TokenKind::Identifier, "int")),
        };
        let b = NameWithType {
            name: token(TokenKind::Identifier, "b"),
            ty: None,
        };
        let parameters = [&a, &b];
        let signature = TypeSignature {
            parameters: &parameters,
            return_type: token(TokenKind::Identifier, "int"),
        };
        let function = FunctionDeclaration {
            name: token(TokenKind::Identifier, "f"),
            signature: &signature,
            body: None,
        };

        let mut program = Program::new();
        program.push(Statement::Assignment(&assignment));
        program.push(Statement::Function(&function));

        let expected = [
            "│[Program]",
            "└──│[Statement]",
            "   └──│[Assignment]",
            "      └───[Identifier] x: int",
            "      └───[Identifier] y",
            "└──│[Statement]",
            "   └──│[Function]",
            "      └───[Identifier] f",
            "      └──│[Signature]",
            "         └───[Parameter] a: int",
            "         └───[Parameter] b",
            "         └───[Return type] int",
        ]
        .join("\n")
            + "\n";
        assert_eq!(print_program(&program), expected);
    }

    #[test]
    fn test_custom_newline() {
        let mut printer = TreePrinter::with_options(PrinterOptions {
            new_line: "\r\n".to_string(),
            trailing_newline: false,
        });
        assert_eq!(printer.print_program(&Program::new()), "│[Program]");
    }
}
