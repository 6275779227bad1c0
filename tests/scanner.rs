#[cfg(test)]
mod scanner_tests {
    use pretty_assertions::assert_eq;

    use rlox_tree as lox;

    use lox::error::LoxError;
    use lox::scanner::*;
    use lox::token::*;

    fn assert_token_sequence(source: &str, expected: &[(TokenType, &str)]) {
        let scanner = Scanner::new(source);
        let tokens: Vec<_> = scanner.filter_map(Result::ok).collect();

        assert_eq!(tokens.len(), expected.len());

        for (actual, (expected_type, expected_lexeme)) in tokens.iter().zip(expected.iter()) {
            assert_eq!(actual.token_type, *expected_type);
            assert_eq!(actual.lexeme, *expected_lexeme);
        }
    }

    #[test]
    fn test_scanner_01_symbols() {
        assert_token_sequence(
            "({*.,+*})",
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
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_02_two_char_operators() {
        assert_token_sequence(
            "! != = == < <= > >= /",
            &[
                (TokenType::BANG, "!"),
                (TokenType::BANG_EQUAL, "!="),
                (TokenType::EQUAL, "="),
                (TokenType::EQUAL_EQUAL, "=="),
                (TokenType::LESS, "<"),
                (TokenType::LESS_EQUAL, "<="),
                (TokenType::GREATER, ">"),
                (TokenType::GREATER_EQUAL, ">="),
                (TokenType::SLASH, "/"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_03_keywords_and_identifiers() {
        assert_token_sequence(
            "class fun var while break continue _under score9 classy",
            &[
                (TokenType::CLASS, "class"),
                (TokenType::FUN, "fun"),
                (TokenType::VAR, "var"),
                (TokenType::WHILE, "while"),
                (TokenType::BREAK, "break"),
                (TokenType::CONTINUE, "continue"),
                (TokenType::IDENTIFIER, "_under"),
                (TokenType::IDENTIFIER, "score9"),
                (TokenType::IDENTIFIER, "classy"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_04_literals() {
        assert_token_sequence(
            "12.5 7 \"hi there\"",
            &[
                (TokenType::NUMBER(12.5), "12.5"),
                (TokenType::NUMBER(7.0), "7"),
                (TokenType::STRING("hi there".to_string()), "\"hi there\""),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_trailing_dot_is_not_part_of_number() {
        assert_token_sequence(
            "123.",
            &[
                (TokenType::NUMBER(123.0), "123"),
                (TokenType::DOT, "."),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_token_sequence(
            "a // line comment\n/* block\ncomment */ b",
            &[
                (TokenType::IDENTIFIER, "a"),
                (TokenType::IDENTIFIER, "b"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_lines_advance_through_strings_and_block_comments() {
        let (tokens, errors) = scan_tokens("a\n\"two\nlines\"\n/* x\ny */ b");

        assert!(errors.is_empty());

        let lines: Vec<usize> = tokens.iter().map(|t| t.line).collect();

        // a, the string (starts on line 2), b, EOF
        assert_eq!(lines, vec![1, 2, 5, 5]);
    }

    #[test]
    fn test_columns_are_one_based() {
        let (tokens, _) = scan_tokens("var x =\n  1;");

        let positions: Vec<(usize, usize)> = tokens.iter().map(|t| (t.line, t.column)).collect();

        assert_eq!(positions, vec![(1, 1), (1, 5), (1, 7), (2, 3), (2, 4), (2, 5)]);
    }

    #[test]
    fn test_unexpected_chars_token_sequence() {
        let source = ",.$(#";
        let results: Vec<_> = Scanner::new(source).collect();

        // COMMA, DOT, error '$', LEFT_PAREN, error '#', EOF
        assert_eq!(results.len(), 6, "Expected 6 items in result");

        assert_token_matches(&results[0], TokenType::COMMA, ",");
        assert_token_matches(&results[1], TokenType::DOT, ".");
        assert_token_matches(&results[3], TokenType::LEFT_PAREN, "(");
        assert_token_matches(&results[5], TokenType::EOF, "");

        let messages: Vec<String> = results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .map(LoxError::to_string)
            .collect();

        assert_eq!(
            messages,
            vec![
                "[line 1] Error: Unexpected character: $".to_string(),
                "[line 1] Error: Unexpected character: #".to_string(),
            ]
        );
    }

    #[test]
    fn test_multibyte_unexpected_character_is_one_error() {
        let (tokens, errors) = scan_tokens("é1");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "[line 1] Error: Unexpected character: é");
        assert_eq!(tokens[0].token_type, TokenType::NUMBER(1.0));
    }

    #[test]
    fn test_unterminated_string_and_comment() {
        let (_, errors) = scan_tokens("\"abc\ndef");
        assert_eq!(errors[0].to_string(), "[line 2] Error: Unterminated string.");

        let (tokens, errors) = scan_tokens("x /* never\nclosed");
        assert_eq!(errors[0].to_string(), "[line 2] Error: Unterminated block comment.");
        assert_eq!(tokens.len(), 2); // x, EOF
    }

    #[test]
    fn test_exactly_one_eof() {
        let mut scanner = Scanner::new("");

        assert_token_matches(&scanner.next().expect("eof"), TokenType::EOF, "");
        assert!(scanner.next().is_none());
        assert!(scanner.next().is_none());
    }

    #[test]
    fn test_token_display_format() {
        let (tokens, _) = scan_tokens("var s = \"x\"; 42 3.25");

        let printed: Vec<String> = tokens.iter().map(ToString::to_string).collect();

        assert_eq!(
            printed,
            vec![
                "VAR var null",
                "IDENTIFIER s null",
                "EQUAL = null",
                "STRING \"x\" x",
                "SEMICOLON ; null",
                "NUMBER 42 42.0",
                "NUMBER 3.25 3.25",
                "EOF  null",
            ]
        );
    }

    fn assert_token_matches(result: &Result<Token, LoxError>, expected_type: TokenType, expected_lexeme: &str) {
        match result {
            Ok(token) => {
                assert_eq!(token.token_type, expected_type);
                assert_eq!(token.lexeme, expected_lexeme);
            }
            Err(e) => panic!("Expected token, got error: {}", e),
        }
    }
}
