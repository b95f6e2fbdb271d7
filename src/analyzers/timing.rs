use std::time::{Duration, Instant};

use tracing::info;

/// A computed value together with how long it took to compute.
#[derive(Debug, Clone)]
pub struct Timed<T> {
    pub value: T,
    pub elapsed: Duration,
}

/// Runs `f`, logging and returning its wall-clock duration alongside the result.
pub fn timed<T>(label: &str, f: impl FnOnce() -> T) -> Timed<T> {
    let start = Instant::now();
    let value = f();
    let elapsed = start.elapsed();

    info!(
        stat = label,
        elapsed_secs = elapsed.as_secs_f64(),
        "Statistic computed"
    );

    Timed { value, elapsed }
}
