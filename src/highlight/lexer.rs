//! Single-pass classifier for highlighting and word motion.
//!
//! [`Lexer::tokenize`] walks the text once with one character of lookahead and
//! returns one token list per physical line. Token columns are visual: a tab
//! advances to the next tab stop. Tokens never cross a newline and never
//! contain a tab, so a renderer can place each token at `location.col` and
//! advance by [`Token::visual_len`] without special cases.
//!
//! The lexer keeps no state between calls. Callers re-tokenize the visible
//! lines after every edit.

use std::collections::HashMap;
use std::iter::Peekable;
use std::str::Chars;
use std::sync::Arc;

use crate::color::Rgb;
use crate::config::DEFAULT_TAB_WIDTH;
use crate::highlight::config::HighlightingConfig;
use crate::highlight::token::{Token, TokenKind};
use crate::location::Location;
use crate::text::tab_advance;

/// Tokens grouped by line.
pub type TokenLines = Vec<Vec<Token>>;

/// Tokenizer bound to one set of highlighting rules and a tab width.
#[derive(Clone, Debug)]
pub struct Lexer {
    config: Arc<HighlightingConfig>,
    classes: HashMap<String, (TokenKind, Rgb)>,
    tab_width: usize,
}

impl Default for Lexer {
    fn default() -> Self {
        Self::new(Arc::new(HighlightingConfig::default()), DEFAULT_TAB_WIDTH)
    }
}

impl Lexer {
    #[must_use]
    pub fn new(config: Arc<HighlightingConfig>, tab_width: usize) -> Self {
        let classes = classify_table(&config);
        Self {
            config,
            classes,
            tab_width: tab_width.max(1),
        }
    }

    /// Swap in new rules.
    pub fn set_config(&mut self, config: Arc<HighlightingConfig>) {
        self.classes = classify_table(&config);
        self.config = config;
    }

    #[must_use]
    pub fn config(&self) -> &HighlightingConfig {
        &self.config
    }

    #[must_use]
    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    pub fn set_tab_width(&mut self, tab_width: usize) {
        self.tab_width = tab_width.max(1);
    }

    /// Tokenize `text`, returning `count('\n') + 1` lines.
    #[must_use]
    pub fn tokenize(&self, text: &str) -> TokenLines {
        self.tokenize_from(text, 0)
    }

    /// Tokenize a slice of a document whose first line is `first_line`.
    ///
    /// The outer vector is indexed from the slice start; token locations carry
    /// document line numbers.
    #[must_use]
    pub fn tokenize_from(&self, text: &str, first_line: usize) -> TokenLines {
        let mut out: TokenLines = vec![Vec::new()];
        let mut scanner = Scanner::new(text, self.tab_width);

        while let Some(ch) = scanner.peek() {
            if ch == '\n' {
                scanner.bump();
                ensure_line(&mut out, scanner.line);
                continue;
            }
            let start = scanner.location();
            let (kind, lexeme) = self.scan_token(&mut scanner, ch);
            let color = self.color_of(kind, &lexeme);
            self.emit(&mut out, kind, &lexeme, color, start);
        }
        ensure_line(&mut out, scanner.line);

        if first_line > 0 {
            for token in out.iter_mut().flatten() {
                token.location.line += first_line;
            }
        }
        out
    }

    /// Tokens of a single line of text.
    #[must_use]
    pub fn tokenize_line(&self, line: &str) -> Vec<Token> {
        self.tokenize(line).into_iter().next().unwrap_or_default()
    }

    fn scan_token(&self, scanner: &mut Scanner<'_>, ch: char) -> (TokenKind, String) {
        let mut lexeme = String::new();
        match ch {
            '/' => {
                scanner.take(&mut lexeme);
                match scanner.peek() {
                    Some('/') => {
                        scanner.take_while(&mut lexeme, |c| c != '\n');
                        (TokenKind::Comment, lexeme)
                    }
                    Some('*') => {
                        scanner.take(&mut lexeme);
                        while let Some(c) = scanner.take(&mut lexeme) {
                            if c == '*' && scanner.peek() == Some('/') {
                                scanner.take(&mut lexeme);
                                break;
                            }
                        }
                        (TokenKind::Comment, lexeme)
                    }
                    _ => (TokenKind::Default, lexeme),
                }
            }
            '"' => {
                scanner.take(&mut lexeme);
                while let Some(c) = scanner.take(&mut lexeme) {
                    if c == '"' {
                        break;
                    }
                }
                (TokenKind::String, lexeme)
            }
            '\t' => {
                scanner.take(&mut lexeme);
                (TokenKind::Tab, lexeme)
            }
            c if is_ident_start(c) => {
                scanner.take_while(&mut lexeme, is_ident_continue);
                let kind = self
                    .classes
                    .get(&lexeme)
                    .map_or(TokenKind::Identifier, |&(kind, _)| kind);
                (kind, lexeme)
            }
            c if c.is_ascii_digit() => {
                scanner.take_while(&mut lexeme, |c| c.is_ascii_digit());
                (TokenKind::Digits, lexeme)
            }
            _ => {
                scanner.take(&mut lexeme);
                (TokenKind::Default, lexeme)
            }
        }
    }

    fn color_of(&self, kind: TokenKind, lexeme: &str) -> Rgb {
        match kind {
            TokenKind::Literal | TokenKind::BuiltIn | TokenKind::Type | TokenKind::Keyword => self
                .classes
                .get(lexeme)
                .map_or(self.config.default.color, |&(_, color)| color),
            TokenKind::Comment => self.config.comment.color,
            TokenKind::String => self.config.strings.color,
            TokenKind::Digits => self.config.digits.color,
            TokenKind::Identifier | TokenKind::Tab | TokenKind::Default => {
                self.config.default.color
            }
        }
    }

    /// Push a token, splitting it at every newline and tab.
    fn emit(
        &self,
        out: &mut TokenLines,
        kind: TokenKind,
        lexeme: &str,
        color: Rgb,
        start: Location,
    ) {
        if !lexeme.contains(['\n', '\t']) {
            ensure_line(out, start.line);
            out[start.line].push(Token::new(kind, lexeme, color, start));
            return;
        }

        for (i, fragment) in lexeme.split('\n').enumerate() {
            let line = start.line + i;
            ensure_line(out, line);
            let mut col = if i == 0 { start.col } else { 0 };

            for (j, piece) in fragment.split('\t').enumerate() {
                if j > 0 {
                    let at = Location::new(line, col);
                    out[line].push(Token::new(TokenKind::Tab, "\t", color, at));
                    col += tab_advance(col, self.tab_width);
                }
                if !piece.is_empty() {
                    out[line].push(Token::new(kind, piece, color, Location::new(line, col)));
                    col += piece.chars().count();
                }
            }
        }
    }
}

/// Identifier lookup built so earlier classes win: literals, built-ins,
/// types, then keywords.
fn classify_table(config: &HighlightingConfig) -> HashMap<String, (TokenKind, Rgb)> {
    let mut table = HashMap::new();
    let classes = [
        (TokenKind::Literal, &config.literals),
        (TokenKind::BuiltIn, &config.built_ins),
        (TokenKind::Type, &config.types),
        (TokenKind::Keyword, &config.keywords),
    ];
    for (kind, class) in classes {
        for token in &class.tokens {
            table.entry(token.clone()).or_insert((kind, class.color));
        }
    }
    table
}

fn ensure_line(out: &mut TokenLines, line: usize) {
    if out.len() <= line {
        out.resize_with(line + 1, Vec::new);
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Character cursor tracking the visual position of the next character.
struct Scanner<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    col: usize,
    tab_width: usize,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str, tab_width: usize) -> Self {
        Self {
            chars: text.chars().peekable(),
            line: 0,
            col: 0,
            tab_width,
        }
    }

    fn location(&self) -> Location {
        Location::new(self.line, self.col)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        match c {
            '\n' => {
                self.line += 1;
                self.col = 0;
            }
            '\t' => self.col += tab_advance(self.col, self.tab_width),
            _ => self.col += 1,
        }
        Some(c)
    }

    /// Consume one character into `buf`.
    fn take(&mut self, buf: &mut String) -> Option<char> {
        let c = self.bump()?;
        buf.push(c);
        Some(c)
    }

    /// Consume characters into `buf` while `pred` holds.
    fn take_while(&mut self, buf: &mut String, pred: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.take(buf);
        }
    }
}
