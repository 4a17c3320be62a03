#[cfg(test)]
mod parser_tests {
    use treelox as lox;

    use lox::ast_printer::AstPrinter;
    use lox::error::LoxError;
    use lox::expr::Expr;
    use lox::parser::Parser;
    use lox::scanner::Scanner;
    use lox::stmt::Stmt;
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> Result<Vec<Stmt>, Vec<LoxError>> {
        let (tokens, errors) = Scanner::new(source).scan_tokens();
        assert!(errors.is_empty(), "lexical errors: {:?}", errors);

        Parser::new(tokens).parse()
    }

    fn printed(source: &str) -> Vec<String> {
        parse(source)
            .unwrap()
            .iter()
            .map(AstPrinter::print_stmt)
            .collect()
    }

    fn messages(errors: &[LoxError]) -> Vec<String> {
        errors.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn test_precedence_and_grouping() {
        assert_eq!(
            printed("1 + 2 * 3 - -4; (1 + 2) * 3;"),
            vec![
                "(; (- (+ 1.0 (* 2.0 3.0)) (- 4.0)))",
                "(; (* (group (+ 1.0 2.0)) 3.0))",
            ]
        );
    }

    #[test]
    fn test_comparison_equality_logic() {
        assert_eq!(
            printed("a < b == c >= d or e and !f;"),
            vec!["(; (or (== (< a b) (>= c d)) (and e (! f))))"]
        );
    }

    #[test]
    fn test_assignment_is_right_associative() {
        assert_eq!(printed("a = b = 1;"), vec!["(; (= a (= b 1.0)))"]);
    }

    #[test]
    fn test_ternary_is_right_associative() {
        assert_eq!(
            printed("print a ? 1 : b ? 2 : 3;"),
            vec!["(print (?: a 1.0 (?: b 2.0 3.0)))"]
        );
    }

    #[test]
    fn test_ternary_binds_looser_than_or() {
        assert_eq!(
            printed("x = a or b ? 1 : 2;"),
            vec!["(; (= x (?: (or a b) 1.0 2.0)))"]
        );
    }

    #[test]
    fn test_calls_chain() {
        assert_eq!(
            printed("f(1)(2, 3)();"),
            vec!["(; (call (call (call f 1.0) 2.0 3.0)))"]
        );
    }

    #[test]
    fn test_declarations() {
        assert_eq!(
            printed("var a; var b = \"s\"; fun add(x, y) { return x + y; }"),
            vec![
                "(var a)",
                "(var b s)",
                "(fun add (x y) (return (+ x y)))",
            ]
        );
    }

    #[test]
    fn test_anonymous_function_expression() {
        assert_eq!(
            printed("var f = fun (a) { print a; }; fun () {}();"),
            vec![
                "(var f (fun (a) (print a)))",
                "(; (call (fun ())))",
            ]
        );
    }

    #[test]
    fn test_control_flow() {
        assert_eq!(
            printed("if (a) print 1; else { print 2; } while (b) b = false;"),
            vec![
                "(if a (print 1.0) (block (print 2.0)))",
                "(while b (; (= b false)))",
            ]
        );
    }

    #[test]
    fn test_for_desugars_to_while() {
        assert_eq!(
            printed("for (var i = 0; i < 3; i = i + 1) print i;"),
            vec!["(block (var i 0.0) (while (< i 3.0) (block (print i) (; (= i (+ i 1.0))))))"]
        );

        // every clause optional; missing condition loops on true
        assert_eq!(printed("for (;;) print 1;"), vec!["(while true (print 1.0))"]);
    }

    #[test]
    fn test_variable_nodes_get_distinct_ids() {
        let stmts = parse("a; a;").unwrap();

        let ids: Vec<_> = stmts
            .iter()
            .map(|s| match s {
                Stmt::Expression(Expr::Variable { id, .. }) => *id,
                other => panic!("unexpected statement {:?}", other),
            })
            .collect();

        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn test_missing_semicolon_reports_at_next_token() {
        let errors = parse("print 1\nprint 2;").unwrap_err();

        assert_eq!(
            messages(&errors),
            vec!["[line 2] Error at 'print': Expect ';' after value."]
        );
    }

    #[test]
    fn test_error_at_end() {
        let errors = parse("print").unwrap_err();

        assert_eq!(
            messages(&errors),
            vec!["[line 1] Error at end: Expect expression."]
        );
    }

    #[test]
    fn test_recovery_reports_each_bad_statement() {
        let source = "var = 1;\nprint 2;\nvar x = ;\nfun f( { }\nprint 3;";
        let errors = parse(source).unwrap_err();

        assert_eq!(
            messages(&errors),
            vec![
                "[line 1] Error at '=': Expect variable name.",
                "[line 3] Error at ';': Expect expression.",
                "[line 4] Error at '{': Expect parameter name.",
            ]
        );
    }

    #[test]
    fn test_invalid_assignment_target_does_not_unwind() {
        let errors = parse("1 + 2 = 3; a = ;").unwrap_err();

        // the first statement parses on; the second still reports its own error
        assert_eq!(
            messages(&errors),
            vec![
                "[line 1] Error at '=': Invalid assignment target.",
                "[line 1] Error at ';': Expect expression.",
            ]
        );
    }

    #[test]
    fn test_unterminated_ternary() {
        let errors = parse("a ? b;").unwrap_err();

        assert_eq!(
            messages(&errors),
            vec!["[line 1] Error at ';': Expect ':' after then branch of conditional expression."]
        );
    }

    #[test]
    fn test_too_many_arguments() {
        let args: Vec<String> = (0..256).map(|i| i.to_string()).collect();
        let source = format!("f({});", args.join(", "));

        let errors = parse(&source).unwrap_err();

        assert_eq!(errors.len(), 1);
        assert!(errors[0]
            .to_string()
            .ends_with("Can't have more than 255 arguments."));
    }

    #[test]
    fn test_too_many_parameters() {
        let params: Vec<String> = (0..256).map(|i| format!("p{}", i)).collect();
        let source = format!("fun f({}) {{}}", params.join(", "));

        let errors = parse(&source).unwrap_err();

        assert_eq!(errors.len(), 1);
        assert!(errors[0]
            .to_string()
            .ends_with("Can't have more than 255 parameters."));
    }

    #[test]
    fn test_empty_program() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("// nothing\n").unwrap().is_empty());
    }

    #[test]
    fn test_source_rendering() {
        let stmts = parse("fun f(a, b) { return a ? -b : (a + 1); } print f(1, \"x\");").unwrap();

        assert_eq!(
            AstPrinter::source(&stmts),
            "fun f(a, b) { return a ? -b : (a + 1); }\nprint f(1, \"x\");"
        );
    }
}
