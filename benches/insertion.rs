//! Insertion throughput for the identity-keyed set.

use std::hash::{Hash, Hasher};
use std::rc::Rc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use identity_comparer::IdentitySet;

struct DegenerateElement {
    _payload: u64,
}

impl PartialEq for DegenerateElement {
    fn eq(&self, _: &Self) -> bool {
        true
    }
}

impl Eq for DegenerateElement {}

impl Hash for DegenerateElement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(123);
    }
}

fn identity_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("identity_set_add");
    for &count in &[1_000usize, 100_000] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let mut set = IdentitySet::by_identity_with_capacity(count);
                for _ in 0..count {
                    set.add(Rc::new(DegenerateElement {
                        _payload: black_box(0),
                    }));
                }
                black_box(set.len())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, identity_insert);
criterion_main!(benches);
