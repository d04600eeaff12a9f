//! Benchmarks for `C2`, the sparse index builder: the component section 2
//! calls out as one of the two most expensive, since it enumerates every
//! valid cell the rest of the model is built over.

use chrono::NaiveDate;
use coldchain_planner::index::Indices;
use coldchain_planner::network::{LaborDay, ManufacturingParams, Network, NetworkBuilder, Node, Product};
use coldchain_planner::solver::PalletTrackingMode;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// A hub-and-spoke network with `spokes` destinations and `products` SKUs
/// over a `horizon_days`-day horizon, scaled to stress `C2`'s cardinality.
fn scaled_network(spokes: usize, products: usize, horizon_days: i64) -> Network {
    let start = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
    let end = start + chrono::Duration::days(horizon_days - 1);

    let mut builder = NetworkBuilder::new(start, end).node(Node::manufacturing(
        "plant",
        ManufacturingParams {
            rate_units_per_hour: 5_000.0,
            startup_hours: 0.5,
            shutdown_hours: 0.5,
            changeover_hours: 0.25,
        },
    ));

    for p in 0..products {
        builder = builder.product(Product::new(format!("sku-{p}"), 100));
    }

    for s in 0..spokes {
        let spoke = format!("spoke-{s}");
        builder = builder.node(Node::destination(spoke.as_str()));
        builder = builder.leg(coldchain_planner::network::Leg {
            origin: "plant".to_string(),
            destination: spoke.clone(),
            transit_days: 1,
            departure_state: coldchain_planner::network::ProductState::Ambient,
            cost_per_unit: 0.1,
        });
        for p in 0..products {
            for date in date_range(start, end) {
                builder = builder.demand(spoke.as_str(), format!("sku-{p}"), date, 200.0);
            }
        }
    }

    let mut date = start;
    while date <= end {
        builder = builder.labor_day(LaborDay::weekday(date, 40.0, 60.0));
        date += chrono::Duration::days(1);
    }

    builder.build().expect("scaled benchmark network must be valid")
}

fn date_range(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let mut current = start;
    std::iter::from_fn(move || {
        if current > end {
            None
        } else {
            let next = current;
            current += chrono::Duration::days(1);
            Some(next)
        }
    })
}

fn bench_index_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_build");

    for &(spokes, products, days) in &[(2usize, 2usize, 7i64), (5, 3, 14), (10, 4, 21)] {
        let network = scaled_network(spokes, products, days);
        let label = format!("{spokes}sp_{products}sku_{days}d");

        group.bench_with_input(BenchmarkId::from_parameter(label), &network, |b, net| {
            b.iter(|| Indices::build(black_box(net), &PalletTrackingMode::Off));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_index_build);
criterion_main!(benches);
