//! Benchmark harness for the ILang pipeline.
//!
//! Run with: cargo bench -p ilang_compiler

use bumpalo::Bump;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ilang_binder::Binder;
use ilang_compiler::{Compilation, Variables};
use ilang_parser::SyntaxTree;
use ilang_transformers::Lowerer;

const SMALL_SOURCE: &str = "{ var a = 0 (a = 10) * a }";

const LOOP_SOURCE: &str = r#"
{
    var result = 0
    for i = 1 to 1000
    {
        if i / 2 * 2 == i
            result = result + i
        else
            result = result - 1
    }
    var j = 0
    while j < 1000
        j = j + 1
    result + j
}
"#;

fn generated_source(statements: usize) -> String {
    let mut source = String::from("{\n    var x0 = 1\n");
    for i in 1..statements {
        source.push_str(&format!("    var x{i} = x{} * 3 + {i}\n", i - 1));
    }
    source.push('}');
    source
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for size in [10, 100, 1000] {
        let source = generated_source(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &source, |b, source| {
            b.iter(|| {
                let arena = Bump::new();
                let tree = SyntaxTree::parse(&arena, black_box(source));
                black_box(tree.diagnostics().len());
            });
        });
    }
    group.finish();
}

fn bench_bind_and_lower(c: &mut Criterion) {
    let arena = Bump::new();
    let tree = SyntaxTree::parse(&arena, LOOP_SOURCE);
    c.bench_function("bind_and_lower", |b| {
        b.iter(|| {
            let scope = Binder::bind_global_scope(None, black_box(tree.root()));
            black_box(Lowerer::lower(scope.statement()));
        });
    });
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    for (name, source) in [("small", SMALL_SOURCE), ("loops", LOOP_SOURCE)] {
        group.bench_function(name, |b| {
            b.iter(|| {
                let arena = Bump::new();
                let compilation = Compilation::new(SyntaxTree::parse(&arena, source));
                let mut variables = Variables::new();
                black_box(compilation.evaluate(&mut variables).value);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_bind_and_lower, bench_evaluate);
criterion_main!(benches);
