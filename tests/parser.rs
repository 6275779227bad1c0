#[cfg(test)]
mod parser_tests {
    use pretty_assertions::assert_eq;

    use rlox_tree as lox;

    use lox::ast::{Expr, LiteralValue, Stmt};
    use lox::ast_printer::AstPrinter;
    use lox::parser::Parser;
    use lox::scanner::scan_tokens;

    fn parse_program(source: &str) -> (Vec<Stmt>, Vec<String>) {
        let (tokens, lex_errors) = scan_tokens(source);
        assert!(lex_errors.is_empty(), "unexpected lex errors: {:?}", lex_errors);

        let mut parser = Parser::new(tokens);
        let statements = parser.parse();
        let errors = parser.take_errors().iter().map(ToString::to_string).collect();

        (statements, errors)
    }

    fn print_expression(source: &str) -> String {
        let (tokens, _) = scan_tokens(source);
        let mut parser = Parser::new(tokens);
        let expr = parser.parse_expression().expect("expression should parse");

        assert!(parser.errors().is_empty());

        AstPrinter::print(&expr)
    }

    #[test]
    fn test_precedence_and_grouping() {
        assert_eq!(print_expression("-123 * (45.67)"), "(* (- 123.0) (group 45.67))");
        assert_eq!(print_expression("1 + 2 * 3 - 4"), "(- (+ 1.0 (* 2.0 3.0)) 4.0)");
        assert_eq!(print_expression("!true == false"), "(== (! true) false)");
        assert_eq!(print_expression("1 < 2 == 3 >= 4"), "(== (< 1.0 2.0) (>= 3.0 4.0))");
    }

    #[test]
    fn test_logical_operators_bind_looser_than_equality() {
        assert_eq!(
            print_expression("a or b and c == nil"),
            "(or a (and b (== c nil)))"
        );
    }

    #[test]
    fn test_assignment_is_right_associative() {
        assert_eq!(print_expression("a = b = \"x\""), "(= a (= b x))");
    }

    #[test]
    fn test_calls_and_properties_chain() {
        assert_eq!(
            print_expression("obj.method(1, two).field"),
            "(. (call (. obj method) 1.0 two) field)"
        );
        assert_eq!(print_expression("obj.field = 3"), "(.= obj field 3.0)");
        assert_eq!(print_expression("f()()"), "(call (call f))");
    }

    #[test]
    fn test_this_and_super() {
        assert_eq!(print_expression("this.x"), "(. this x)");
        assert_eq!(print_expression("super.init(1)"), "(call (super init) 1.0)");
    }

    #[test]
    fn test_for_is_desugared_into_while() {
        let (statements, errors) = parse_program("for (var i = 0; i < 3; i = i + 1) print i;");

        assert!(errors.is_empty());
        assert_eq!(statements.len(), 1);

        let Stmt::Block(outer) = &statements[0] else {
            panic!("expected block, got {:?}", statements[0]);
        };

        assert!(matches!(outer[0], Stmt::Var { .. }));

        let Stmt::While { condition, body } = &outer[1] else {
            panic!("expected while, got {:?}", outer[1]);
        };

        assert_eq!(AstPrinter::print(condition), "(< i 3.0)");

        let Stmt::Block(inner) = body.as_ref() else {
            panic!("expected body block, got {:?}", body);
        };

        assert!(matches!(inner[0], Stmt::Print(_)));
        assert!(matches!(inner[1], Stmt::Expression(Expr::Assign { .. })));
    }

    #[test]
    fn test_empty_for_clauses_loop_forever() {
        let (statements, errors) = parse_program("for (;;) break;");

        assert!(errors.is_empty());

        let Stmt::While { condition, body } = &statements[0] else {
            panic!("expected a bare while, got {:?}", statements[0]);
        };

        assert_eq!(*condition, Expr::Literal(LiteralValue::Bool(true)));
        assert!(matches!(body.as_ref(), Stmt::Break(_)));
    }

    #[test]
    fn test_class_declaration() {
        let (statements, errors) =
            parse_program("class B < A { init(x) { this.x = x; } get() { return this.x; } }");

        assert!(errors.is_empty());

        let Stmt::Class(decl) = &statements[0] else {
            panic!("expected class, got {:?}", statements[0]);
        };

        assert_eq!(decl.name.lexeme, "B");
        assert!(matches!(&decl.superclass, Some(Expr::Variable { name, .. }) if name.lexeme == "A"));

        let names: Vec<&str> = decl.methods.iter().map(|m| m.name.lexeme.as_str()).collect();
        assert_eq!(names, vec!["init", "get"]);
        assert_eq!(decl.methods[0].params.len(), 1);
    }

    #[test]
    fn test_missing_expression_reports_at_token() {
        let (_, errors) = parse_program("print ;");

        assert_eq!(errors, vec!["[line 1] Error at ';': Expect expression."]);
    }

    #[test]
    fn test_error_at_end() {
        let (_, errors) = parse_program("print 1");

        assert_eq!(errors, vec!["[line 1] Error at end: Expect ';' after value."]);
    }

    #[test]
    fn test_synchronize_reports_independent_errors() {
        let (statements, errors) = parse_program("var = 1;\nprint 2;\nvar x = ;\nprint 3;");

        assert_eq!(
            errors,
            vec![
                "[line 1] Error at '=': Expect variable name.",
                "[line 3] Error at ';': Expect expression.",
            ]
        );

        // the two good print statements survive
        assert_eq!(statements.len(), 2);
    }

    #[test]
    fn test_invalid_assignment_target_keeps_parsing() {
        let (statements, errors) = parse_program("1 + 2 = 3;\nprint 4;");

        assert_eq!(errors, vec!["[line 1] Error at '=': Invalid assignment target."]);
        assert_eq!(statements.len(), 2);
    }

    #[test]
    fn test_break_and_continue_outside_loop() {
        let (statements, errors) = parse_program("break;\ncontinue;");

        assert_eq!(
            errors,
            vec![
                "[line 1] Error at 'break': break statement not inside a loop.",
                "[line 2] Error at 'continue': continue statement not inside a loop.",
            ]
        );

        // nodes are still produced
        assert_eq!(statements.len(), 2);
    }

    #[test]
    fn test_break_inside_function_inside_loop_is_rejected() {
        let (_, errors) = parse_program("while (true) { fun f() { break; } }");

        assert_eq!(
            errors,
            vec!["[line 1] Error at 'break': break statement not inside a loop."]
        );
    }

    #[test]
    fn test_too_many_arguments_is_not_fatal() {
        let args: Vec<String> = (0..256).map(|i| i.to_string()).collect();
        let source = format!("f({});", args.join(", "));

        let (statements, errors) = parse_program(&source);

        assert_eq!(
            errors,
            vec!["[line 1] Error at '255': Can't have more than 255 arguments."]
        );

        let Stmt::Expression(Expr::Call { arguments, .. }) = &statements[0] else {
            panic!("expected call, got {:?}", statements[0]);
        };
        assert_eq!(arguments.len(), 256);
    }

    #[test]
    fn test_too_many_parameters_is_not_fatal() {
        let params: Vec<String> = (0..256).map(|i| format!("p{}", i)).collect();
        let source = format!("fun f({}) {{}}", params.join(", "));

        let (statements, errors) = parse_program(&source);

        assert_eq!(
            errors,
            vec!["[line 1] Error at 'p255': Can't have more than 255 parameters."]
        );
        assert_eq!(statements.len(), 1);
    }

    #[test]
    fn test_resolvable_nodes_get_distinct_ids() {
        let (statements, _) = parse_program("a; a;");

        let ids: Vec<_> = statements
            .iter()
            .map(|stmt| match stmt {
                Stmt::Expression(Expr::Variable { id, .. }) => *id,
                other => panic!("expected variable, got {:?}", other),
            })
            .collect();

        assert_ne!(ids[0], ids[1]);
    }
}
