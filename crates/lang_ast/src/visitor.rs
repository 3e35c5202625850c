//! AST visitor trait for traversing the syntax tree.
//!
//! Default implementations walk into children, so an implementor only
//! overrides the node kinds it cares about.

use crate::node::*;

pub trait AstVisitor<'a> {
    fn visit_program(&mut self, program: &Program<'a>) {
        for stmt in program.iter() {
            self.visit_statement(stmt);
        }
    }

    fn visit_statement(&mut self, stmt: &Statement<'a>) {
        match *stmt {
            Statement::Expression(expr) => self.visit_expression(expr),
            Statement::Assignment(assignment) => self.visit_variable_assignment(assignment),
            Statement::Function(function) => self.visit_function_declaration(function),
        }
    }

    fn visit_expression(&mut self, expr: &'a Expression<'a>) {
        if let Expression::Binary(binary) = expr {
            self.visit_binary_operation(binary);
        }
    }

    fn visit_binary_operation(&mut self, binary: &'a BinaryOperation<'a>) {
        self.visit_expression(binary.left);
        self.visit_expression(binary.right);
    }

    fn visit_name_with_type(&mut self, _binding: &'a NameWithType<'a>) {}

    fn visit_variable_assignment(&mut self, assignment: &'a VariableAssignment<'a>) {
        self.visit_name_with_type(assignment.binding);
        self.visit_expression(assignment.value);
    }

    fn visit_function_declaration(&mut self, function: &'a FunctionDeclaration<'a>) {
        self.visit_type_signature(function.signature);
        if let Some(body) = function.body {
            self.visit_expression(body);
        }
    }

    fn visit_type_signature(&mut self, signature: &'a TypeSignature<'a>) {
        for &parameter in signature.parameters {
            self.visit_name_with_type(parameter);
        }
    }
}

/// Count every node reachable from a program.
pub fn count_nodes(program: &Program<'_>) -> usize {
    struct Counter(usize);

    impl<'a> AstVisitor<'a> for Counter {
        fn visit_expression(&mut self, expr: &'a Expression<'a>) {
            self.0 += 1;
            if let Expression::Binary(binary) = expr {
                self.visit_binary_operation(binary);
            }
        }

        fn visit_name_with_type(&mut self, _binding: &'a NameWithType<'a>) {
            self.0 += 1;
        }

        fn visit_variable_assignment(&mut self, assignment: &'a VariableAssignment<'a>) {
            self.0 += 1;
            self.visit_name_with_type(assignment.binding);
            self.visit_expression(assignment.value);
        }

        fn visit_function_declaration(&mut self, function: &'a FunctionDeclaration<'a>) {
            self.0 += 1;
            self.visit_type_signature(function.signature);
        }

        fn visit_type_signature(&mut self, signature: &'a TypeSignature<'a>) {
            self.0 += 1;
            for &parameter in signature.parameters {
                self.visit_name_with_type(parameter);
            }
        }
    }

    let mut counter = Counter(0);
    counter.visit_program(program);
    counter.0
}
