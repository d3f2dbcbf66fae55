//! Performance benchmarks for Realms.
//!
//! Run with: cargo bench
//!
//! Ranking runs on every keystroke and resolution on every drag frame, so
//! both should stay well under a frame (16ms) for a few hundred tabs.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use realms::core::fuzzy;
use realms::core::reorder::{move_item, resolve, DragItem, DropRegion};
use realms::{Dock, Realm, SearchEngine, Snapshot, Tab};

/// A snapshot shaped like a heavy session: 8 realms, 40 docks, 400 tabs.
fn build_snapshot() -> Snapshot {
    let realms: Vec<Realm> = (0..8)
        .map(|r| Realm {
            id: format!("realm-{}", r),
            name: format!("Realm {}", r),
            ..Default::default()
        })
        .collect();

    let mut docks = Vec::new();
    let mut tabs = Vec::new();
    for d in 0..40 {
        let dock_id = format!("dock-{}", d);
        let realm_id = format!("realm-{}", d % 8);
        let mut tab_ids = Vec::new();

        for t in 0..10 {
            let id = format!("tab-{}-{}", d, t);
            tabs.push(Tab {
                id: id.clone(),
                title: format!("Project {} - Page {} documentation", d, t),
                url: format!("https://site{}.example.com/docs/page/{}", d, t),
                realm_id: Some(realm_id.clone()),
                dock_id: Some(dock_id.clone()),
                ..Default::default()
            });
            tab_ids.push(id);
        }

        docks.push(Dock {
            id: dock_id,
            name: format!("Dock {}", d),
            tab_ids,
            realm_id: Some(realm_id),
            ..Default::default()
        });
    }

    Snapshot::new(realms, docks, tabs)
}

/// Benchmark the scoring ladder at each of its rungs.
fn bench_fuzzy(c: &mut Criterion) {
    let mut group = c.benchmark_group("fuzzy");
    let text = "Project 12 - Page 3 documentation";

    let patterns = [
        ("exact", "project 12 - page 3 documentation"),
        ("prefix", "project"),
        ("substring", "documentation"),
        ("subsequence", "pjdoc"),
        ("miss", "zzz"),
    ];

    for (name, pattern) in patterns {
        group.bench_with_input(BenchmarkId::from_parameter(name), &pattern, |b, pattern| {
            b.iter(|| black_box(fuzzy::score(black_box(text), black_box(pattern))))
        });
    }

    group.finish();
}

/// Benchmark ranking a full snapshot.
fn bench_rank(c: &mut Criterion) {
    let snapshot = build_snapshot();
    let engine = SearchEngine::default();

    let mut group = c.benchmark_group("rank");
    for query in ["", "docs", "project 3", "s1dp"] {
        group.bench_with_input(BenchmarkId::from_parameter(query), &query, |b, query| {
            b.iter(|| black_box(engine.rank(&snapshot, query)))
        });
    }
    group.finish();
}

/// Benchmark drop resolution and commit.
fn bench_reorder(c: &mut Criterion) {
    let snapshot = build_snapshot();
    let item = DragItem::tab("tab-0-0");
    let region = DropRegion::Tab {
        dock_id: "dock-39".to_string(),
        tab_id: "tab-39-5".to_string(),
    };

    c.bench_function("resolve_tab_move", |b| {
        b.iter(|| black_box(resolve(&snapshot, &item, &region)))
    });

    c.bench_function("commit_tab_move", |b| {
        b.iter(|| black_box(move_item(&snapshot, &item, &region)))
    });
}

criterion_group!(benches, bench_fuzzy, bench_rank, bench_reorder);
criterion_main!(benches);
