//! Property-based tests for the lexer and the column mapping.

use gim::highlight::{Lexer, TokenKind};
use gim::text::{logical_column, tab_advance, visual_column, visual_width};
use proptest::prelude::*;

fn source() -> impl Strategy<Value = String> {
    "[a-z0-9 \\t\\n\"/*_]{0,80}"
}

fn tab_width() -> impl Strategy<Value = usize> {
    1usize..9
}

proptest! {
    /// One token list per physical line, trailing empty lines included.
    #[test]
    fn line_count_matches_newlines(text in source()) {
        let lines = Lexer::default().tokenize(&text);
        prop_assert_eq!(lines.len(), text.matches('\n').count() + 1);
    }

    /// Tokens are gap-free, never cross lines and never embed a tab.
    #[test]
    fn tokens_tile_each_line(text in source(), width in tab_width()) {
        let mut lexer = Lexer::default();
        lexer.set_tab_width(width);
        let lines = lexer.tokenize(&text);

        for (idx, (tokens, raw)) in lines.iter().zip(text.split('\n')).enumerate() {
            let mut col = 0;
            let mut rebuilt = String::new();
            for token in tokens {
                prop_assert_eq!(token.location.line, idx);
                prop_assert_eq!(token.location.col, col);
                prop_assert!(!token.lexeme.contains('\n'));
                if token.lexeme.contains('\t') {
                    prop_assert_eq!(token.kind, TokenKind::Tab);
                    prop_assert_eq!(token.lexeme.as_str(), "\t");
                }
                col = token.visual_end(width);
                rebuilt.push_str(&token.lexeme);
            }
            prop_assert_eq!(&rebuilt, raw);
            prop_assert_eq!(col, visual_width(raw, width));
        }
    }

    /// A tab advances to the next multiple of the tab width.
    #[test]
    fn tab_reaches_next_stop(prefix in "[a-z]{0,12}", width in tab_width()) {
        let line = format!("{prefix}\tx");
        let before = prefix.chars().count();
        let after = visual_column(&line, before + 1, width);
        prop_assert_eq!(after % width, 0);
        prop_assert!(after > before);
        prop_assert!(after - before <= width);
        prop_assert_eq!(after - before, tab_advance(before, width));
    }

    /// Mapping a logical column to visual and back is lossless.
    #[test]
    fn logical_visual_round_trip(line in "[a-z\\t]{0,20}", col in 0usize..24, width in tab_width()) {
        let clamped = col.min(line.chars().count());
        let visual = visual_column(&line, clamped, width);
        prop_assert_eq!(logical_column(&line, visual, width), clamped);
    }
}
