use criterion::{black_box, criterion_group, criterion_main, Criterion};
use realtor_agent::realtor::{flatten_records, ListingRecord};
use serde_json::{json, Value};

fn search_page(n: usize) -> Value {
    let results: Vec<Value> = (0..n)
        .map(|i| {
            json!({
                "property_id": format!("P{i}"),
                "list_price": 300_000 + i * 1_000,
                "description": { "beds": 3, "baths": 2, "sqft": 1800, "type": "single_family" },
                "location": {
                    "address": { "line": format!("{i} Main St"), "city": "Austin", "postal_code": "78701",
                                 "coordinate": { "lat": 30.26, "lon": -97.74 } },
                    "county": { "name": "Travis", "fips_code": "48453" }
                },
                "flags": { "is_new_listing": true, "is_pending": null },
                "photos": [{ "href": "https://example.invalid/a.jpg" }]
            })
        })
        .collect();
    Value::Array(results)
}

fn criterion_benchmark(c: &mut Criterion) {
    let page = search_page(200);
    c.bench_function("flatten 200 search results", |b| {
        b.iter(|| {
            let rows: Vec<ListingRecord> = flatten_records(black_box(&page), "results").unwrap();
            black_box(rows)
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
