use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use chrono::NaiveDate;
use projfields::catalog::FieldCatalog;
use projfields::datatype::{Duration, TimeUnit, Value};
use projfields::index::PopulatedFieldIndex;
use projfields::record::{EntityRecord, RecordCollection};

fn collection(size: i64) -> RecordCollection {
    let catalog = FieldCatalog::tasks();
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(8, 0, 0).unwrap();
    let mut tasks = RecordCollection::new(FieldCatalog::tasks());
    for n in 0..size {
        let mut builder = EntityRecord::builder(&catalog)
            .set_by_name("ID", Value::Integer(n)).unwrap()
            .set_by_name("Name", Value::String(format!("Task {n}"))).unwrap()
            .set_by_name("Start", Value::Date(start)).unwrap()
            .set_by_name("Duration", Value::Duration(Duration::new(1.0, TimeUnit::Days))).unwrap();
        // sprinkle a rarely used field
        if n % 97 == 0 {
            builder = builder.set_by_name("Cost1", Value::currency(n as f64).unwrap()).unwrap();
        }
        tasks.push(builder.build()).unwrap();
    }
    tasks
}

pub fn criterion_benchmark(c: &mut Criterion) {
    for (label, size) in [("populated 1k", 1_000), ("populated 100k", 100_000)] {
        let tasks = collection(size);
        c.bench_function(label, |b| b.iter(|| PopulatedFieldIndex::compute(black_box(&tasks))));
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
