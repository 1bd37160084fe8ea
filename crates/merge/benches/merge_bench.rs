use criterion::{Criterion, black_box, criterion_group, criterion_main};
use html::parse;
use merge::{merge_html, merge_trees};

const SMALL_LINES: usize = 16;
const LARGE_LINES: usize = 2_000;

/// A dental-note-shaped document: a code header plus many one-line divs.
/// Every third line carries a per-variant suffix so the two sides share most
/// lines but not all of them.
fn make_note(lines: usize, variant: &str) -> String {
    let mut out = String::from("<div><ul><li><strong>D1110</strong></li></ul><div>");
    for i in 0..lines {
        if i % 3 == 0 {
            out.push_str(&format!("<div>line {i} {variant}</div>"));
        } else {
            out.push_str(&format!("<div>line {i}</div>"));
        }
    }
    out.push_str("</div></div>");
    out
}

fn bench_merge_trees_small(c: &mut Criterion) {
    let first = parse(&make_note(SMALL_LINES, "a")).expect("parse failed");
    let second = parse(&make_note(SMALL_LINES, "b")).expect("parse failed");
    c.bench_function("bench_merge_trees_small", |b| {
        b.iter(|| {
            let merged = merge_trees(black_box(&first), black_box(&second));
            black_box(merged);
        });
    });
}

fn bench_merge_trees_large(c: &mut Criterion) {
    let first = parse(&make_note(LARGE_LINES, "a")).expect("parse failed");
    let second = parse(&make_note(LARGE_LINES, "b")).expect("parse failed");
    c.bench_function("bench_merge_trees_large", |b| {
        b.iter(|| {
            let merged = merge_trees(black_box(&first), black_box(&second));
            black_box(merged);
        });
    });
}

fn bench_merge_html_end_to_end(c: &mut Criterion) {
    let first = make_note(LARGE_LINES, "a");
    let second = make_note(LARGE_LINES, "b");
    c.bench_function("bench_merge_html_end_to_end", |b| {
        b.iter(|| {
            let merged = merge_html(black_box(&first), black_box(&second)).expect("merge failed");
            black_box(merged.len());
        });
    });
}

criterion_group!(
    benches,
    bench_merge_trees_small,
    bench_merge_trees_large,
    bench_merge_html_end_to_end
);
criterion_main!(benches);
