//! Parser integration tests.
//!
//! Verifies that the parser builds the expected trees from source text and
//! collects diagnostics for malformed input without stopping.

use lang_ast::node::{Expression, NodeKind, Program, Statement};
use lang_ast::token::TokenKind;
use lang_ast::visitor::count_nodes;
use lang_core::arena::{Arena, ArenaError, NodeArena};
use lang_diagnostics::{ErrorCollector, ErrorKind};
use lang_parser::{parse_source, ParseError, ParseLimits};
use pretty_assertions::assert_eq;

/// Helper: parse source text and hand the result to `f`.
fn with_parsed<R>(
    source: &str,
    limits: ParseLimits,
    f: impl FnOnce(&Program<'_>, &ErrorCollector<'_>) -> R,
) -> R {
    let mut buffer = vec![0u8; 1 << 16];
    let literals = Arena::new(&mut buffer);
    let nodes = NodeArena::new();
    let (program, errors) = parse_source(source, &literals, &nodes, limits).unwrap();
    f(&program, &errors)
}

/// Helper: every top-level expression statement in prefix form.
fn sexprs(source: &str) -> Vec<String> {
    with_parsed(source, ParseLimits::default(), |program, errors| {
        assert!(errors.is_empty(), "unexpected diagnostics: {:?}", errors.render());
        program
            .iter()
            .map(|stmt| match stmt {
                Statement::Expression(expr) => expr.to_sexpr(),
                other => panic!("expected an expression statement, got {:?}", other.kind()),
            })
            .collect()
    })
}

fn sexpr(source: &str) -> String {
    let mut all = sexprs(source);
    assert_eq!(all.len(), 1, "source: {}", source);
    all.remove(0)
}

/// Helper: the kinds of every diagnostic, in order.
fn error_kinds(source: &str, limits: ParseLimits) -> Vec<ErrorKind> {
    with_parsed(source, limits, |_, errors| errors.iter().map(|e| e.kind).collect())
}

// ============================================================================
// Expressions
// ============================================================================

#[test]
fn test_multiplication_binds_tighter() {
    assert_eq!(sexpr("2 + 3 * 4"), "(+ 2 (* 3 4))");
    assert_eq!(sexpr("2 * 3 + 4"), "(+ (* 2 3) 4)");
}

#[test]
fn test_left_associative_chain() {
    assert_eq!(sexpr("2 - 3 - 4"), "(- (- 2 3) 4)");
    assert_eq!(sexpr("8 / 4 / 2"), "(/ (/ 8 4) 2)");
}

#[test]
fn test_right_associative_chain() {
    assert_eq!(sexpr("2 ^ 3 ^ 4"), "(^ 2 (^ 3 4))");
}

#[test]
fn test_mixed_precedence() {
    assert_eq!(sexpr("2 ^ 3 * 4"), "(* (^ 2 3) 4)");
    assert_eq!(sexpr("1 + 2 ^ 3 ^ 2 * 4"), "(+ 1 (* (^ 2 (^ 3 2)) 4))");
}

#[test]
fn test_identifier_operands() {
    with_parsed("x := a * b + c;", ParseLimits::default(), |program, errors| {
        assert!(errors.is_empty());
        let Statement::Assignment(assignment) = program.statements[0] else {
            panic!("expected an assignment");
        };
        assert_eq!(assignment.value.to_sexpr(), "(+ (* a b) c)");
    });
}

#[test]
fn test_identifier_without_statement_form() {
    with_parsed("foo bar baz", ParseLimits::default(), |program, errors| {
        assert!(program.is_empty());
        let kinds: Vec<_> = errors.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![ErrorKind::UnexpectedToken { expected: None }; 3]);
        let literals: Vec<String> = errors.iter().map(|e| e.token.literal.to_string()).collect();
        assert_eq!(literals, vec!["foo", "bar", "baz"]);
    });
}

/// Helper: parse one long expression statement with room for every literal.
fn with_long_expression<R>(source: &str, f: impl FnOnce(&Expression<'_>) -> R) -> R {
    let mut buffer = vec![0u8; 1 << 20];
    let literals = Arena::new(&mut buffer);
    let nodes = NodeArena::new();
    let (program, errors) = parse_source(source, &literals, &nodes, ParseLimits::default()).unwrap();
    assert!(errors.is_empty(), "unexpected diagnostics: {:?}", errors.render());
    assert_eq!(program.len(), 1);
    let Statement::Expression(expr) = program.statements[0] else {
        panic!("expected an expression statement");
    };
    f(expr)
}

#[test]
fn test_long_right_associative_chain() {
    let source = "2 ^ ".repeat(20_000) + "2;";
    with_long_expression(&source, |expr| {
        assert!(expr.to_sexpr().starts_with("(^ 2 (^ 2 (^ 2"));
        assert!(expr.to_string().starts_with("2 ^ 2 ^ 2"));

        let mut depth = 0;
        let mut spine = expr;
        while let Expression::Binary(binary) = spine {
            assert!(matches!(binary.left, Expression::Literal(_)));
            spine = binary.right;
            depth += 1;
        }
        assert_eq!(depth, 20_000);
    });
}

#[test]
fn test_long_left_associative_chain() {
    let source = "1 + ".repeat(20_000) + "1;";
    with_long_expression(&source, |expr| {
        assert!(expr.to_sexpr().starts_with("(+ (+ (+"));

        let mut depth = 0;
        let mut spine = expr;
        while let Expression::Binary(binary) = spine {
            assert!(matches!(binary.right, Expression::Literal(_)));
            spine = binary.left;
            depth += 1;
        }
        assert_eq!(depth, 20_000);
    });
}

#[test]
fn test_expression_statements() {
    assert_eq!(sexprs("1 + 2; 3 * 4;"), vec!["(+ 1 2)", "(* 3 4)"]);
    assert!(sexprs("").is_empty());
}

#[test]
fn test_missing_operand() {
    let kinds = error_kinds("1 +", ParseLimits::default());
    assert_eq!(kinds, vec![ErrorKind::UnexpectedToken { expected: None }]);
}

// ============================================================================
// Assignments
// ============================================================================

#[test]
fn test_parse_assignment() {
    with_parsed("x := 1 + 2;", ParseLimits::default(), |program, errors| {
        assert!(errors.is_empty());
        assert_eq!(program.len(), 1);
        let Statement::Assignment(assignment) = program.statements[0] else {
            panic!("expected an assignment");
        };
        assert_eq!(assignment.binding.name.literal, "x");
        assert!(assignment.binding.ty.is_none());
        assert_eq!(assignment.value.to_sexpr(), "(+ 1 2)");
        assert_eq!(program.statements[0].kind(), NodeKind::VariableAssignment);
    });
}

#[test]
fn test_parse_typed_assignment() {
    with_parsed("count: int := 7;", ParseLimits::default(), |program, errors| {
        assert!(errors.is_empty());
        let Statement::Assignment(assignment) = program.statements[0] else {
            panic!("expected an assignment");
        };
        assert_eq!(assignment.binding.name.literal, "count");
        assert_eq!(assignment.binding.ty.map(|t| t.literal.to_string()), Some("int".to_string()));
        assert!(matches!(assignment.value, Expression::Literal(_)));
    });
}

#[test]
fn test_missing_semicolon_is_recorded() {
    with_parsed("x := 1\ny := 2;", ParseLimits::default(), |program, errors| {
        assert_eq!(program.len(), 2);
        assert_eq!(errors.len(), 1);
        let error = errors.errors()[0];
        assert_eq!(error.kind, ErrorKind::MissingSemicolon);
        assert_eq!(error.token.literal, "y");
        assert_eq!((error.token.line, error.token.column), (2, 1));
    });
}

#[test]
fn test_missing_semicolon_at_end_of_file() {
    with_parsed("x := 1\n", ParseLimits::default(), |_, errors| {
        assert_eq!(
            errors.render(),
            vec!["2:1: missing semicolon after assignment: found end of file.".to_string()]
        );
    });
}

// ============================================================================
// Functions
// ============================================================================

#[test]
fn test_parse_typed_function() {
    with_parsed("f :: (a: int, b: int) -> int", ParseLimits::default(), |program, errors| {
        assert!(errors.is_empty(), "{:?}", errors.render());
        let Statement::Function(function) = program.statements[0] else {
            panic!("expected a function declaration");
        };
        assert_eq!(function.name.literal, "f");
        let names: Vec<String> = function
            .signature
            .parameters
            .iter()
            .map(|p| p.name.literal.to_string())
            .collect();
        assert_eq!(names, vec!["a", "b"]);
        for parameter in function.signature.parameters {
            assert_eq!(parameter.ty.map(|t| t.literal.to_string()), Some("int".to_string()));
        }
        assert_eq!(function.signature.return_type.literal, "int");
        assert!(function.body.is_none());
    });
}

#[test]
fn test_parse_function_without_parameters() {
    with_parsed("g :: () -> void", ParseLimits::default(), |program, errors| {
        assert!(errors.is_empty());
        let Statement::Function(function) = program.statements[0] else {
            panic!("expected a function declaration");
        };
        assert!(function.signature.parameters.is_empty());
        assert_eq!(function.signature.return_type.literal, "void");
    });
}

#[test]
fn test_untyped_parameters() {
    with_parsed("h :: (a, b) -> int", ParseLimits::default(), |program, errors| {
        assert!(errors.is_empty());
        let Statement::Function(function) = program.statements[0] else {
            panic!("expected a function declaration");
        };
        assert_eq!(function.signature.parameters.len(), 2);
        assert!(function.signature.parameters.iter().all(|p| p.ty.is_none()));
    });
}

#[test]
fn test_missing_close_paren_cascades() {
    with_parsed("f :: (a: int -> int", ParseLimits::default(), |program, errors| {
        assert_eq!(program.len(), 1);
        let kinds: Vec<_> = errors.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ErrorKind::UnexpectedToken {
                    expected: Some(TokenKind::CloseParen)
                },
                ErrorKind::UnexpectedToken {
                    expected: Some(TokenKind::ThinArrow)
                },
                ErrorKind::UnexpectedToken {
                    expected: Some(TokenKind::Identifier)
                },
            ]
        );
        assert!(errors.render()[0].ends_with("found thin arrow, expected closing parenthesis."));
    });
}

// ============================================================================
// Capacity limits
// ============================================================================

#[test]
fn test_too_many_parameters() {
    let limits = ParseLimits {
        max_parameters: 2,
        ..ParseLimits::default()
    };
    with_parsed("f :: (a, b, c, d) -> int", limits, |program, errors| {
        let Statement::Function(function) = program.statements[0] else {
            panic!("expected a function declaration");
        };
        assert_eq!(function.signature.parameters.len(), 2);
        let kinds: Vec<_> = errors.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![ErrorKind::TooManyParameters { limit: 2 }]);
        assert_eq!(errors.errors()[0].token.literal, "c");
    });
}

#[test]
fn test_too_many_statements() {
    let limits = ParseLimits {
        max_statements: 2,
        ..ParseLimits::default()
    };
    with_parsed("1; 2; 3; 4;", limits, |program, errors| {
        assert_eq!(program.len(), 2);
        let kinds: Vec<_> = errors.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![ErrorKind::TooManyStatements { limit: 2 }]);
    });
}

// ============================================================================
// Diagnostics
// ============================================================================

#[test]
fn test_unmatched_statement_is_recorded() {
    with_parsed("; 1", ParseLimits::default(), |program, errors| {
        assert_eq!(program.len(), 1);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors()[0].kind, ErrorKind::UnexpectedToken { expected: None });
        assert_eq!(errors.errors()[0].token.kind, TokenKind::Semicolon);
    });
}

#[test]
fn test_illegal_token_reported_once() {
    with_parsed("x := 1.2.3;", ParseLimits::default(), |program, errors| {
        assert_eq!(program.len(), 1);
        let kinds: Vec<_> = errors.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![ErrorKind::IllegalToken]);
        assert_eq!(errors.errors()[0].token.literal, "1.2.3");
    });
}

#[test]
fn test_leading_illegal_token() {
    let kinds = error_kinds("$", ParseLimits::default());
    assert_eq!(kinds, vec![ErrorKind::IllegalToken]);
}

#[test]
fn test_count_nodes() {
    with_parsed("x := 1 + 2;\nf :: (a: int) -> int", ParseLimits::default(), |program, errors| {
        assert!(errors.is_empty());
        // assignment, binding, `+`, two literals; function, signature, parameter
        assert_eq!(count_nodes(program), 8);
    });
}

#[test]
fn test_node_arena_exhaustion_is_an_error() {
    let mut buffer = vec![0u8; 256];
    let literals = Arena::new(&mut buffer);
    let nodes = NodeArena::with_limit(0);
    let result = parse_source("1 + 2", &literals, &nodes, ParseLimits::default());
    assert!(matches!(
        result,
        Err(ParseError::Arena(ArenaError::Exhausted { .. }))
    ));
}
