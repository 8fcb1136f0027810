use std::time::{Duration, Instant};

/// Per-tick timing and counter data for the collision pipeline.
///
/// The counters double as instrumentation for correctness tests: the
/// quadtree's pruning guarantee is checked by asserting how many
/// narrow-phase tests a sweep performed.
#[derive(Debug, Default, Clone, Copy)]
pub struct CollisionProfiler {
    pub broad_phase_time: Duration,
    pub narrow_phase_time: Duration,
    pub resolve_time: Duration,
    pub total_tick_time: Duration,

    pub shape_count: usize,
    pub dropped_count: usize,
    pub narrow_phase_tests: usize,
    pub contact_count: usize,
}

impl CollisionProfiler {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn report(&self) {
        let total_us = self.total_tick_time.as_micros() as f32;
        if total_us < 1.0 {
            return;
        }

        println!("--- Collision Profile ---");
        println!(
            "Shapes: {} ({} dropped), Pair tests: {}, Contacts: {}",
            self.shape_count, self.dropped_count, self.narrow_phase_tests, self.contact_count
        );

        println!(
            "Total Tick: {:.2} ms",
            self.total_tick_time.as_secs_f32() * 1000.0
        );

        println!(
            "  Broad Phase:  {:.2} ms ({:.1}%)",
            self.broad_phase_time.as_secs_f32() * 1000.0,
            (self.broad_phase_time.as_micros() as f32 / total_us) * 100.0
        );

        println!(
            "  Narrow Phase: {:.2} ms ({:.1}%)",
            self.narrow_phase_time.as_secs_f32() * 1000.0,
            (self.narrow_phase_time.as_micros() as f32 / total_us) * 100.0
        );

        println!(
            "  Resolve:      {:.2} ms ({:.1}%)",
            self.resolve_time.as_secs_f32() * 1000.0,
            (self.resolve_time.as_micros() as f32 / total_us) * 100.0
        );
        println!("-------------------------");
    }
}

pub struct ScopedTimer<'a> {
    start: Instant,
    output: &'a mut Duration,
}

impl<'a> ScopedTimer<'a> {
    pub fn new(output: &'a mut Duration) -> Self {
        Self {
            start: Instant::now(),
            output,
        }
    }
}

impl<'a> Drop for ScopedTimer<'a> {
    fn drop(&mut self) {
        *self.output += self.start.elapsed();
    }
}
