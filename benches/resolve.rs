use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vscode_workspaces::workspace::resolve_entries;
use vscode_workspaces::RawEntry;

fn bench_resolve(c: &mut Criterion) {
    let raw: Vec<RawEntry> = (0..10_000)
        .map(|i| match i % 3 {
            0 => RawEntry::new(format!("vscode-remote://ssh-remote+host{i}/home/user/project{i}")),
            1 => RawEntry::new(format!("vscode-remote%3A%2F%2Fssh-remote%2Bbox%2Fhome%2Fme%2Fapp%20{i}")),
            _ => RawEntry::new(format!("dev-container://container{i}")),
        })
        .collect();
    c.bench_function("resolve_10k", |b| {
        b.iter(|| resolve_entries(black_box(raw.clone()), None))
    });
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
