use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use models::ResourceKind;
use serde_json::json;
use service::resources::ResourceManager;
use service::storage::memory::MemoryCollection;

fn record(id: usize) -> models::Record {
    models::record::from_value(json!({"id": format!("u{id}"), "name": "Bench", "age": 42})).unwrap()
}

fn bench_resource_manager(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let users = ResourceManager::new(ResourceKind::USERS, Arc::new(MemoryCollection::new()));

    // pre-fill outside of the measured loop
    rt.block_on(async {
        for i in 0..1_000 {
            users.create(record(i)).await.unwrap();
        }
    });

    c.bench_function("users_get_last", |b| {
        b.to_async(&rt).iter(|| async { users.get("u999").await.unwrap() });
    });

    c.bench_function("users_update_merge", |b| {
        let patch = models::record::from_value(json!({"age": 43})).unwrap();
        b.to_async(&rt).iter(|| async { users.update("u500", patch.clone()).await.unwrap() });
    });

    c.bench_function("users_list_1000", |b| {
        b.to_async(&rt).iter(|| async { users.list().await.unwrap().len() });
    });
}

criterion_group!(benches, bench_resource_manager);
criterion_main!(benches);
