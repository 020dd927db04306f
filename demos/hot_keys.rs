use heavy_hitters::fixtures::RandomEvents;
use heavy_hitters::{Observation, TopK};
use rand::{rngs::StdRng, SeedableRng};

fn main() {
    let mut source = RandomEvents::new(StdRng::seed_from_u64(2021), 24);
    let cold: Vec<String> = (&mut source).take(5_000).collect();
    let hot: Vec<String> = (&mut source).take(10).collect();

    let mut stream = source.repeat_shuffled(&cold, 1..=10);
    stream.extend(source.repeat_shuffled(&hot, 200..=400));

    let mut sketched = TopK::<String>::new(10).unwrap();
    let mut exact = TopK::<String, _>::exact(10).unwrap();
    let mut evictions = 0;
    for event in &stream {
        if let Observation::Evicted { .. } = sketched.observe(event.as_str()) {
            evictions += 1;
        }
        exact.observe(event.as_str());
    }

    println!(
        "observed {} events, {} evictions from the top-{}",
        stream.len(),
        evictions,
        sketched.cap()
    );
    println!(
        "sketch: {} rows x {} counters",
        sketched.estimator().depth(),
        sketched.estimator().width()
    );
    for (approx, truth) in sketched.sorted_topk().iter().zip(exact.sorted_topk().iter()) {
        println!(
            "{:<26} ~{:>5}    {:<26} {:>5}",
            approx.key, approx.count, truth.key, truth.count
        );
    }

    let found = hot.iter().filter(|k| sketched.in_topk(k.as_str())).count();
    assert_eq!(found, hot.len());
}
