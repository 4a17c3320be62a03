#[cfg(test)]
mod property_tests {
    use proptest::prelude::*;

    use treelox as lox;

    use lox::ast_printer::AstPrinter;
    use lox::lox::Lox;
    use lox::scanner::Scanner;
    use lox::token::TokenType;

    fn identifier() -> impl Strategy<Value = String> {
        prop::sample::select(vec!["a", "b", "c", "foo", "bar_1"]).prop_map(str::to_string)
    }

    fn params() -> impl Strategy<Value = String> {
        prop::sample::subsequence(vec!["p", "q", "r"], 0..=3).prop_map(|ps| ps.join(", "))
    }

    fn expression() -> impl Strategy<Value = String> {
        let leaf = prop_oneof![
            (0u32..1000).prop_map(|n| n.to_string()),
            (0u32..100, 0u32..100).prop_map(|(i, f)| format!("{}.{}", i, f)),
            "[a-z ]{0,6}".prop_map(|s| format!("\"{}\"", s)),
            identifier(),
            Just("true".to_string()),
            Just("false".to_string()),
            Just("nil".to_string()),
        ];

        leaf.prop_recursive(4, 48, 4, |inner| {
            let op = prop::sample::select(vec![
                "+", "-", "*", "/", "<", "<=", ">", ">=", "==", "!=", "and", "or",
            ]);

            prop_oneof![
                (inner.clone(), op, inner.clone()).prop_map(|(l, o, r)| format!("{} {} {}", l, o, r)),
                inner.clone().prop_map(|e| format!("({})", e)),
                inner.clone().prop_map(|e| format!("-{}", e)),
                inner.clone().prop_map(|e| format!("!{}", e)),
                (inner.clone(), inner.clone(), inner.clone())
                    .prop_map(|(c, t, e)| format!("{} ? {} : {}", c, t, e)),
                (identifier(), inner.clone()).prop_map(|(n, v)| format!("({} = {})", n, v)),
                (identifier(), prop::collection::vec(inner.clone(), 0..3))
                    .prop_map(|(f, args)| format!("{}({})", f, args.join(", "))),
                (params(), inner).prop_map(|(ps, e)| format!("(fun ({}) {{ return {}; }})", ps, e)),
            ]
        })
    }

    fn statement() -> impl Strategy<Value = String> {
        let leaf = prop_oneof![
            expression().prop_map(|e| format!("print {};", e)),
            expression().prop_map(|e| format!("{};", e)),
            (identifier(), expression()).prop_map(|(n, e)| format!("var {} = {};", n, e)),
            identifier().prop_map(|n| format!("var {};", n)),
        ];

        leaf.prop_recursive(3, 24, 3, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..3)
                    .prop_map(|body| format!("{{ {} }}", body.join(" "))),
                (expression(), inner.clone(), prop::option::of(inner.clone())).prop_map(
                    |(c, t, e)| match e {
                        Some(e) => format!("if ({}) {} else {}", c, t, e),
                        None => format!("if ({}) {}", c, t),
                    }
                ),
                (expression(), inner.clone()).prop_map(|(c, b)| format!("while ({}) {}", c, b)),
                (identifier(), expression(), inner.clone())
                    .prop_map(|(n, c, b)| format!("for (var {} = 0; {}; {} = {} + 1) {}", n, c, n, n, b)),
                (identifier(), params(), inner)
                    .prop_map(|(n, ps, b)| format!("fun {}({}) {{ {} return; }}", n, ps, b)),
            ]
        })
    }

    fn program() -> impl Strategy<Value = String> {
        prop::collection::vec(statement(), 0..4).prop_map(|stmts| stmts.join("\n"))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        #[test]
        fn parse_render_parse_is_idempotent(source in program()) {
            let first = Lox::parse(&source).expect("generated program should parse");
            let rendered = AstPrinter::source(&first);

            let second = Lox::parse(&rendered).expect("rendered program should parse");

            let tree = |stmts: &[lox::stmt::Stmt]| -> Vec<String> {
                stmts.iter().map(AstPrinter::print_stmt).collect()
            };

            prop_assert_eq!(tree(&first), tree(&second));
            prop_assert_eq!(rendered, AstPrinter::source(&second));
        }

        #[test]
        fn scanner_always_ends_with_single_eof(source in any::<String>()) {
            let (tokens, _) = Scanner::new(&source).scan_tokens();

            let eofs = tokens.iter().filter(|t| t.token_type == TokenType::EOF).count();

            prop_assert_eq!(eofs, 1);
            prop_assert_eq!(tokens.last().map(|t| t.token_type.clone()), Some(TokenType::EOF));
        }

        #[test]
        fn whole_numbers_print_without_fraction(n in 0u32..1_000_000) {
            let source = format!("print {};", n);
            let (tokens, errors) = Scanner::new(&source).scan_tokens();

            prop_assert!(errors.is_empty());
            prop_assert_eq!(tokens[1].to_string(), format!("NUMBER {} {}.0", n, n));
        }
    }
}
