//! Editing and highlighting hot-path benchmarks.

#![allow(clippy::semicolon_if_nothing_returned)]

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use gim::highlight::{HighlightingConfig, Lexer, TokenClass};
use gim::input::{Intent, Motion};
use gim::text::{LineBuffer, visual_column};
use gim::{EditSession, Location, Rgb};
use std::hint::black_box;
use std::sync::Arc;

const SAMPLE_LINES: [&str; 4] = [
    "func main() { fmt.Println(\"hello\") }",
    "\tvar total int = 42 // running sum",
    "/* block comment spanning the line */",
    "\t\tif err != nil { return nil, err }",
];

fn build_source(lines: usize) -> String {
    let line = "\tfunc example() { x := 42; fmt.Println(\"{x}\") } // note\n";
    line.repeat(lines)
}

fn go_lexer() -> Lexer {
    let config = HighlightingConfig {
        keywords: TokenClass {
            tokens: ["func", "var", "if", "return"].map(String::from).to_vec(),
            color: Rgb::new(204, 120, 50),
        },
        literals: TokenClass {
            tokens: vec!["nil".into()],
            color: Rgb::new(152, 118, 170),
        },
        types: TokenClass {
            tokens: vec!["int".into()],
            color: Rgb::new(104, 151, 187),
        },
        ..HighlightingConfig::default()
    };
    Lexer::new(Arc::new(config), 4)
}

fn bench_tokenize_line(c: &mut Criterion) {
    let lexer = go_lexer();
    let mut group = c.benchmark_group("tokenize_line");
    for (idx, line) in SAMPLE_LINES.iter().enumerate() {
        group.bench_with_input(BenchmarkId::new("line", idx), line, |b, input| {
            b.iter(|| lexer.tokenize_line(black_box(input)));
        });
    }
    group.finish();
}

fn bench_tokenize_window(c: &mut Criterion) {
    let lexer = go_lexer();
    let window = build_source(60);
    let large = build_source(10_000);
    c.bench_function("tokenize_visible_window", |b| {
        b.iter(|| lexer.tokenize(black_box(&window)));
    });
    c.bench_function("tokenize_10k_lines", |b| {
        b.iter(|| lexer.tokenize(black_box(&large)));
    });
}

fn bench_buffer_edits(c: &mut Criterion) {
    let source = build_source(10_000);

    c.bench_function("buffer_from_bytes_10k", |b| {
        b.iter(|| LineBuffer::from_bytes(black_box(source.as_bytes())));
    });

    c.bench_function("buffer_insert_middle", |b| {
        b.iter_batched(
            || LineBuffer::with_text(&source),
            |mut buffer| {
                buffer.insert_text(5_000, 10, black_box("inserted"));
                buffer
            },
            BatchSize::LargeInput,
        );
    });

    c.bench_function("buffer_delete_lines_middle", |b| {
        b.iter_batched(
            || LineBuffer::with_text(&source),
            |mut buffer| {
                black_box(buffer.delete_lines(5_000, 100));
                buffer
            },
            BatchSize::LargeInput,
        );
    });
}

fn bench_session(c: &mut Criterion) {
    let source = build_source(1_000);

    c.bench_function("session_type_and_undo_100", |b| {
        b.iter_batched(
            || EditSession::with_text(&source),
            |mut session| {
                for ch in "abcdefghij".chars().cycle().take(100) {
                    session.apply(Intent::InsertChar(ch));
                }
                while session.history().can_undo() {
                    session.apply(Intent::Undo);
                }
                session
            },
            BatchSize::LargeInput,
        );
    });

    let mut session = EditSession::with_text(&source);
    session.set_cursor(Location::new(500, 0));
    c.bench_function("session_frame", |b| {
        b.iter(|| black_box(&session).frame());
    });

    c.bench_function("session_word_right", |b| {
        b.iter_batched(
            || session.clone(),
            |mut s| {
                s.apply(Intent::Move(Motion::WordRight));
                s
            },
            BatchSize::SmallInput,
        );
    });

    c.bench_function("visual_column", |b| {
        b.iter(|| visual_column(black_box(SAMPLE_LINES[3]), black_box(20), 4));
    });
}

criterion_group!(
    benches,
    bench_tokenize_line,
    bench_tokenize_window,
    bench_buffer_edits,
    bench_session
);
criterion_main!(benches);
