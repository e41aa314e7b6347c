use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use snipster::repo::{JsonRepository, MemoryRepository, SqliteRepository};
use snipster::{Language, Snippet, SnippetRepository};
use tempfile::TempDir;

/// Fill a repository with `count` tagged snippets
fn seed(repo: &mut dyn SnippetRepository, count: usize) {
    for i in 0..count {
        let snippet = Snippet::new(format!("snippet {i}"), "fn main() {}", Language::Rust)
            .with_tags(format!("rust, bench, n{i}"));
        repo.add(snippet).expect("seed snippet");
    }
}

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("add");

    for &count in &[10usize, 100] {
        group.bench_with_input(BenchmarkId::new("memory", count), &count, |b, &count| {
            b.iter(|| {
                let mut repo = MemoryRepository::new();
                seed(&mut repo, count);
                black_box(repo.len())
            });
        });

        group.bench_with_input(BenchmarkId::new("sqlite", count), &count, |b, &count| {
            b.iter(|| {
                let mut repo = SqliteRepository::open_in_memory().expect("open sqlite");
                seed(&mut repo, count);
                black_box(repo.all().expect("list").len())
            });
        });
    }

    group.finish();
}

fn bench_tag_edit(c: &mut Criterion) {
    let mut group = c.benchmark_group("tag_edit");

    let mut memory = MemoryRepository::new();
    seed(&mut memory, 100);
    group.bench_function("memory", |b| {
        b.iter(|| {
            let tags = vec!["extra".to_string()];
            memory.tag(black_box(50), &tags, false).expect("add tag");
            memory.tag(black_box(50), &tags, true).expect("remove tag");
        });
    });

    let mut sqlite = SqliteRepository::open_in_memory().expect("open sqlite");
    seed(&mut sqlite, 100);
    group.bench_function("sqlite", |b| {
        b.iter(|| {
            let tags = vec!["extra".to_string()];
            sqlite.tag(black_box(50), &tags, false).expect("add tag");
            sqlite.tag(black_box(50), &tags, true).expect("remove tag");
        });
    });

    group.finish();
}

fn bench_json_reopen(c: &mut Criterion) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("bench.json");
    {
        let mut repo = JsonRepository::open(&path).expect("open json");
        seed(&mut repo, 500);
    }

    c.bench_function("json_open_500", |b| {
        b.iter(|| {
            let repo = JsonRepository::open(black_box(&path)).expect("open json");
            black_box(repo.all().expect("list").len())
        });
    });
}

criterion_group!(benches, bench_add, bench_tag_edit, bench_json_reopen);
criterion_main!(benches);
