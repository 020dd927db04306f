use heavy_hitters::fixtures::RandomEvents;
use heavy_hitters::TopK;
use rand::{rngs::StdRng, SeedableRng};
use stats_alloc::{Region, StatsAlloc, INSTRUMENTED_SYSTEM};
use std::alloc::System;

#[global_allocator]
static GLOBAL: &StatsAlloc<System> = &INSTRUMENTED_SYSTEM;

fn main() {
    let names: Vec<String> = RandomEvents::new(StdRng::seed_from_u64(3), 100)
        .take(100_000)
        .collect();

    let region = Region::new(GLOBAL);
    let mut sketched = TopK::<String>::new(100).unwrap();
    names.iter().for_each(|n| {
        sketched.observe(n.as_str());
    });
    let sketch_stats = region.change();

    let region = Region::new(GLOBAL);
    let mut exact = TopK::<String, _>::exact(100).unwrap();
    names.iter().for_each(|n| {
        exact.observe(n.as_str());
    });
    let exact_stats = region.change();

    println!(
        "count-min sketch: {} bytes allocated, {} bytes live",
        sketch_stats.bytes_allocated,
        sketch_stats.bytes_allocated as isize - sketch_stats.bytes_deallocated as isize
    );
    println!(
        "exact counters:   {} bytes allocated, {} bytes live",
        exact_stats.bytes_allocated,
        exact_stats.bytes_allocated as isize - exact_stats.bytes_deallocated as isize
    );
    assert_eq!(sketched.len(), exact.len());
}
