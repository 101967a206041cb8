use criterion::{black_box, criterion_group, criterion_main, Criterion};

use minijava::{check, ParserConf, Reporter, Scanner};

/// Build a program with many classes, each with fields and a method.
fn generate_program(class_count: usize) -> String {
    let mut source = String::new();

    for i in 0..class_count {
        source.push_str(&format!(
            "class C{i} {{
    private int count;
    C{i} next;
    int[] values;

    /* sum the values */
    public int sum(int len) {{
        int total = 0;
        int j = 0;
        while (j < len && total >= 0) {{
            total = total + values[j] * 2 - (j / 3);
            j = j + 1;
        }}
        if (!(total == 0)) this.next.sum(len); else count = -total;
        return total;
    }}
}}
"
        ));
    }

    source
}

fn criterion_benchmark(c: &mut Criterion) {
    let source = generate_program(200);

    c.bench_function("scan", |b| {
        b.iter(|| {
            let mut reporter = Reporter::new();
            let count = Scanner::new(black_box(source.as_bytes()))
                .tokens(&mut reporter)
                .count();
            black_box(count)
        })
    });

    c.bench_function("scan and parse", |b| {
        b.iter(|| {
            let reporter = check(black_box(source.as_bytes()), ParserConf::default());
            black_box(reporter.has_errors())
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
