#[cfg(test)]
mod scanner_tests {
    use treelox as lox;

    use lox::error::LoxError;
    use lox::scanner::*;
    use lox::token::*;
    use pretty_assertions::assert_eq;

    fn assert_token_sequence(source: &str, expected: &[(TokenType, &str)]) {
        let (tokens, errors) = Scanner::new(source).scan_tokens();

        assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
        assert_eq!(tokens.len(), expected.len());

        for (actual, (expected_type, expected_lexeme)) in tokens.iter().zip(expected.iter()) {
            assert_eq!(actual.token_type, *expected_type);
            assert_eq!(actual.lexeme, *expected_lexeme);
        }
    }

    #[test]
    fn test_scanner_01_symbols() {
        assert_token_sequence(
            "({*.,+*})?:",
            &[
                (TokenType::LEFT_PAREN, "("),
                (TokenType::LEFT_BRACE, "{"),
                (TokenType::STAR, "*"),
                (TokenType::DOT, "."),
                (TokenType::COMMA, ","),
                (TokenType::PLUS, "+"),
                (TokenType::STAR, "*"),
                (TokenType::RIGHT_BRACE, "}"),
                (TokenType::RIGHT_PAREN, ")"),
                (TokenType::QUESTION, "?"),
                (TokenType::COLON, ":"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_02_two_char_operators() {
        assert_token_sequence(
            "! != = == < <= > >=",
            &[
                (TokenType::BANG, "!"),
                (TokenType::BANG_EQUAL, "!="),
                (TokenType::EQUAL, "="),
                (TokenType::EQUAL_EQUAL, "=="),
                (TokenType::LESS, "<"),
                (TokenType::LESS_EQUAL, "<="),
                (TokenType::GREATER, ">"),
                (TokenType::GREATER_EQUAL, ">="),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_03_keywords_and_identifiers() {
        assert_token_sequence(
            "var fun_ = fun; orchid or _x1",
            &[
                (TokenType::VAR, "var"),
                (TokenType::IDENTIFIER, "fun_"),
                (TokenType::EQUAL, "="),
                (TokenType::FUN, "fun"),
                (TokenType::SEMICOLON, ";"),
                (TokenType::IDENTIFIER, "orchid"),
                (TokenType::OR, "or"),
                (TokenType::IDENTIFIER, "_x1"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_04_literals() {
        let (tokens, errors) = Scanner::new("123 3.14 \"hi there\" 7.").scan_tokens();

        assert!(errors.is_empty());
        assert!(matches!(tokens[0].token_type, TokenType::NUMBER(n) if n == 123.0));
        assert!(matches!(tokens[1].token_type, TokenType::NUMBER(n) if n == 3.14));
        assert!(matches!(&tokens[2].token_type, TokenType::STRING(s) if s == "hi there"));
        assert_eq!(tokens[2].lexeme, "\"hi there\"");

        // trailing dot is not part of the number
        assert!(matches!(tokens[3].token_type, TokenType::NUMBER(n) if n == 7.0));
        assert_eq!(tokens[4].token_type, TokenType::DOT);
    }

    #[test]
    fn test_scanner_05_comments_and_lines() {
        let source = "a // one\n/* two\nthree */ b\n\"multi\nline\" c";
        let (tokens, errors) = Scanner::new(source).scan_tokens();

        assert!(errors.is_empty());

        let lines: Vec<(String, usize)> = tokens
            .iter()
            .map(|t| (t.lexeme.clone(), t.line))
            .collect();

        assert_eq!(
            lines,
            vec![
                ("a".to_string(), 1),
                ("b".to_string(), 3),
                ("\"multi\nline\"".to_string(), 5),
                ("c".to_string(), 5),
                ("".to_string(), 5),
            ]
        );
    }

    #[test]
    fn test_scanner_06_token_display() {
        let (tokens, _) = Scanner::new("var x = 3; \"s\" 2.5").scan_tokens();

        let shown: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();

        assert_eq!(
            shown,
            vec![
                "VAR var null",
                "IDENTIFIER x null",
                "EQUAL = null",
                "NUMBER 3 3.0",
                "SEMICOLON ; null",
                "STRING \"s\" s",
                "NUMBER 2.5 2.5",
                "EOF  null",
            ]
        );
    }

    #[test]
    fn test_unexpected_chars_token_sequence() {
        let source = ",.$(#";
        let results: Vec<_> = Scanner::new(source).collect();

        // COMMA, DOT, error, LEFT_PAREN, error, EOF
        assert_eq!(results.len(), 6, "Expected 6 items in result");

        assert_token_matches(&results[0], TokenType::COMMA, ",");
        assert_token_matches(&results[1], TokenType::DOT, ".");
        assert_token_matches(&results[3], TokenType::LEFT_PAREN, "(");
        assert_token_matches(&results[5], TokenType::EOF, "");

        let errors: Vec<String> = results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .map(|e| e.to_string())
            .collect();

        assert_eq!(
            errors,
            vec![
                "[line 1] Error: Unexpected character: $",
                "[line 1] Error: Unexpected character: #",
            ]
        );

        fn assert_token_matches(
            result: &Result<Token, LoxError>,
            expected_type: TokenType,
            expected_lexeme: &str,
        ) {
            match result {
                Ok(token) => {
                    assert_eq!(token.token_type, expected_type);
                    assert_eq!(token.lexeme, expected_lexeme);
                }
                Err(e) => panic!("Expected token but got error: {}", e),
            }
        }
    }

    #[test]
    fn test_non_ascii_character_is_one_error() {
        let (tokens, errors) = Scanner::new("a é b").scan_tokens();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "[line 1] Error: Unexpected character: é");
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn test_unterminated_string() {
        let (tokens, errors) = Scanner::new("print \"abc\n\n").scan_tokens();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "[line 3] Error: Unterminated string.");
        assert_eq!(errors[0].line(), Some(3));
        assert!(errors[0].is_static());

        // PRINT then EOF
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].token_type, TokenType::EOF);
    }

    #[test]
    fn test_iterator_is_fused() {
        let mut scanner = Scanner::new("");

        assert!(matches!(scanner.next(), Some(Ok(ref t)) if t.token_type == TokenType::EOF));
        assert!(scanner.next().is_none());
        assert!(scanner.next().is_none());
    }

    #[test]
    fn test_tokens_serialize_to_json() {
        let (tokens, _) = Scanner::new("x").scan_tokens();

        let json = serde_json::to_value(&tokens[0]).unwrap();

        assert_eq!(json["lexeme"], "x");
        assert_eq!(json["line"], 1);
    }
}
