use std::time::Duration;

use compare_oracle::{Comparator, ConstantTimeComparator, DelayMode, VariableTimeComparator};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_comparators(c: &mut Criterion) {
    let secret = [0xA5u8; 32];
    let mut early_mismatch = secret;
    early_mismatch[0] ^= 1;
    let mut late_mismatch = secret;
    late_mismatch[31] ^= 1;

    // Zero delay isolates the comparison loop itself.
    let leaky = VariableTimeComparator::new(Duration::ZERO, DelayMode::Spin);

    let mut group = c.benchmark_group("compare_32_bytes");
    for (name, probe) in [("early_mismatch", &early_mismatch), ("late_mismatch", &late_mismatch)] {
        group.bench_function(format!("variable_time/{}", name), |b| {
            b.iter(|| leaky.compare(black_box(&secret), black_box(probe)))
        });
        group.bench_function(format!("constant_time/{}", name), |b| {
            b.iter(|| ConstantTimeComparator.compare(black_box(&secret), black_box(probe)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_comparators);
criterion_main!(benches);
