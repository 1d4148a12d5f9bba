use criterion::{black_box, criterion_group, criterion_main, Criterion};
use imageit_core::{sensor_mappings, MappingResolver};
use imageit_types::{Mapping, MappingValues, Sensor, Value};

fn mappings(count: usize) -> Vec<Mapping> {
    (0..count)
        .map(|i| {
            Mapping::new(
                format!("m{}", i),
                if i % 2 == 0 { "equal" } else { "greaterThan" },
                Value::Text(format!("{}", count - i)),
                MappingValues {
                    background_color: Some("red".to_string()),
                    ..Default::default()
                },
            )
        })
        .collect()
}

fn bench_resolve(c: &mut Criterion) {
    let all = mappings(200);
    let sensor = Sensor {
        mapping_ids: all.iter().rev().map(|m| m.id.clone()).collect(),
        ..Default::default()
    };
    let resolver = MappingResolver::default();

    c.bench_function("resolve_sensor_200_mappings", |b| {
        b.iter(|| resolver.resolve_sensor(black_box(&sensor), Some(Value::Number(150.5)), &all))
    });

    c.bench_function("sensor_mappings_lookup", |b| {
        b.iter(|| sensor_mappings(black_box(&sensor.mapping_ids), &all).len())
    });
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
