//! Shared criterion setup

use std::time::Duration;

use criterion::Criterion;
use pprof::criterion::{Output, PProfProfiler};

/// Criterion with flamegraph profiling enabled
pub fn criterion_config() -> Criterion {
    Criterion::default()
        .warm_up_time(Duration::from_secs(2))
        .measurement_time(Duration::from_secs(5))
        .sample_size(50)
        .with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)))
}
