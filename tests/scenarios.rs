//! End-to-end editing scenarios driven through the key map.

use gim::highlight::{HighlightingConfig, Lexer, TokenClass, TokenKind};
use gim::input::{Effect, Intent, KeyCode, KeyEvent, Keymap, Motion};
use gim::text::{Frame, Selection, normalize_selection, visual_column};
use gim::{EditSession, Location, Rgb};
use std::fmt::Write as _;
use std::sync::Arc;

/// Feed key events through the default key map.
fn press(session: &mut EditSession, keys: &[KeyEvent]) -> Vec<Effect> {
    let keymap = Keymap::new();
    keys.iter()
        .filter_map(|key| keymap.resolve(*key))
        .map(|intent| session.apply(intent))
        .collect()
}

fn typed(text: &str) -> Vec<KeyEvent> {
    text.chars()
        .map(|c| match c {
            '\n' => KeyEvent::key(KeyCode::Enter),
            '\t' => KeyEvent::key(KeyCode::Tab),
            c => KeyEvent::char(c),
        })
        .collect()
}

/// One row per line: `Kind("lexeme")@col` for every token.
fn render(frame: &Frame) -> String {
    let mut out = String::new();
    for (idx, tokens) in frame.lines.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        for (i, t) in tokens.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            write!(out, "{:?}({:?})@{}", t.kind, t.lexeme, t.location.col).unwrap();
        }
    }
    out
}

mod documented_scenarios {
    use super::*;

    #[test]
    fn comment_spanning_lines() {
        let session = EditSession::with_text("a /* x\ny */ b");
        insta::assert_snapshot!(render(&session.frame()), @r#"
        Identifier("a")@0 Default(" ")@1 Comment("/* x")@2
        Comment("y */")@0 Default(" ")@4 Identifier("b")@5
        "#);
    }

    #[test]
    fn word_jump() {
        let mut session = EditSession::with_text("foo  bar");
        let ctrl_right = KeyEvent::with_ctrl(KeyCode::Right);
        press(&mut session, &[ctrl_right]);
        assert_eq!(session.cursor(), Location::new(0, 3));
        press(&mut session, &[ctrl_right]);
        assert_eq!(session.cursor(), Location::new(0, 8));
    }

    #[test]
    fn multi_line_selection_delete() {
        let mut session = EditSession::with_text("hello world\nsecond line");
        session.set_selection(Selection::new(Location::new(0, 6), Location::new(1, 6)));
        session.apply(Intent::Backspace);
        // The selection ends before the space of "second line".
        assert_eq!(session.lines(), vec!["hello  line"]);
        assert_eq!(session.cursor(), Location::new(0, 6));
    }

    #[test]
    fn selection_normalization() {
        let sel = normalize_selection(Location::new(3, 5), Location::new(1, 2));
        assert_eq!((sel.min_line, sel.max_line), (1, 3));
        assert_eq!((sel.start_col, sel.end_col), (2, 5));
        assert!(sel.contains(2, 0));
        assert!(!sel.contains(1, 1));
        assert!(!sel.contains(3, 5));
    }

    #[test]
    fn tab_visual_length() {
        assert_eq!(visual_column("\t", 1, 4), 4);
        assert_eq!(visual_column("\t\t", 2, 4), 8);
    }

    #[test]
    fn empty_input_has_one_line() {
        assert_eq!(Lexer::default().tokenize("").len(), 1);
        assert_eq!(Lexer::default().tokenize("\n\n").len(), 3);
    }
}

mod typing {
    use super::*;

    #[test]
    fn typing_and_undo_per_keystroke() {
        let mut session = EditSession::default();
        press(&mut session, &typed("ab\n\tc"));
        assert_eq!(session.lines(), vec!["ab", "\tc"]);
        assert_eq!(session.history().len(), 5);

        let undo = KeyEvent::with_ctrl(KeyCode::Char('z'));
        press(&mut session, &[undo, undo]);
        assert_eq!(session.lines(), vec!["ab", ""]);
        press(&mut session, &[undo]);
        assert_eq!(session.lines(), vec!["ab"]);
        assert_eq!(session.cursor(), Location::new(0, 2));

        let redo = KeyEvent::with_ctrl(KeyCode::Char('y'));
        press(&mut session, &[redo, redo, redo]);
        assert_eq!(session.lines(), vec!["ab", "\tc"]);
        assert_eq!(session.cursor(), Location::new(1, 2));
    }

    #[test]
    fn shift_selection_then_cut_and_paste() {
        let mut session = EditSession::with_text("one two");
        let select_word = KeyEvent::new(
            KeyCode::Right,
            gim::KeyModifiers::CTRL | gim::KeyModifiers::SHIFT,
        );
        press(&mut session, &[select_word]);
        assert_eq!(session.selected_text().as_deref(), Some("one"));

        let effects = press(&mut session, &[KeyEvent::with_ctrl(KeyCode::Char('x'))]);
        assert_eq!(effects, vec![Effect::Clipboard("one".into())]);
        assert_eq!(session.text(), " two");

        let effects = press(&mut session, &[KeyEvent::with_ctrl(KeyCode::Char('v'))]);
        assert_eq!(effects, vec![Effect::RequestPaste]);
        press(&mut session, &[KeyEvent::key(KeyCode::End)]);
        session.apply(Intent::Paste("one".into()));
        assert_eq!(session.text(), " twoone");
    }

    #[test]
    fn sticky_column_across_short_lines() {
        let mut session = EditSession::with_text("abcdefgh\nab\n\tabcdefgh");
        session.set_cursor(Location::new(0, 6));
        press(&mut session, &[KeyEvent::key(KeyCode::Down)]);
        assert_eq!(session.cursor(), Location::new(1, 2));
        press(&mut session, &[KeyEvent::key(KeyCode::Down)]);
        // Visual column 6 is two characters past the tab.
        assert_eq!(session.cursor(), Location::new(2, 3));
    }

    #[test]
    fn find_then_replace() {
        let mut session = EditSession::with_text("let Value = 1;\nlet value = 2;");
        assert_eq!(
            session.apply(Intent::Find("VALUE".into())),
            Effect::Redraw
        );
        assert_eq!(session.cursor(), Location::new(1, 4));

        session.apply(Intent::Replace {
            find: "value".into(),
            with: "x".into(),
        });
        assert_eq!(session.lines(), vec!["let x = 1;", "let value = 2;"]);
    }
}

mod highlighting {
    use super::*;

    fn lexer() -> Lexer {
        let config = HighlightingConfig {
            keywords: TokenClass {
                tokens: vec!["return".into(), "nil".into()],
                color: Rgb::new(204, 120, 50),
            },
            literals: TokenClass {
                tokens: vec!["nil".into()],
                color: Rgb::new(152, 118, 170),
            },
            ..HighlightingConfig::default()
        };
        Lexer::new(Arc::new(config), 4)
    }

    #[test]
    fn literal_wins_over_keyword() {
        let tokens = lexer().tokenize_line("return nil");
        assert_eq!(tokens[0].kind, TokenKind::Keyword);
        assert_eq!(tokens[2].kind, TokenKind::Literal);
        assert_eq!(tokens[2].color, Rgb::new(152, 118, 170));
    }

    #[test]
    fn frame_after_edit_uses_visual_columns() {
        let mut session = EditSession::new(
            gim::LineBuffer::with_text("\treturn 1"),
            lexer(),
            gim::text::Viewport::new(40, 10),
        );
        session.apply(Intent::Move(Motion::LineEnd));
        session.apply(Intent::InsertChar('0'));
        insta::assert_snapshot!(render(&session.frame()), @r#"Tab("\t")@0 Keyword("return")@4 Default(" ")@10 Digits("10")@11"#);
        assert_eq!(session.frame().cursor, Some((0, 13)));
    }
}
