use std::io;
use std::time::{Duration, Instant};

/// Measurement context for a single benchmark call.
///
/// The runner brackets the whole call with a monotonic clock. A body that
/// wants to exclude setup work from the measurement can mark a precise
/// region instead, either with [`Timer::measure`] or the explicit
/// [`Timer::start_region`] / [`Timer::stop_region`] pair. The most recently
/// completed region replaces the whole-call interval; if no region
/// completes, the whole-call interval stands.
pub struct Timer {
    region_start: Option<Instant>,
    region: Option<Duration>,
}

impl Timer {
    pub(crate) fn new() -> Timer {
        Timer {
            region_start: None,
            region: None,
        }
    }

    /// Runs `body` once and returns its elapsed time.
    ///
    /// Uses `Instant`, so the measurement is immune to wall-clock
    /// adjustments. Errors from the body pass through unmeasured.
    pub fn time_call<E, F>(body: F) -> Result<Duration, E>
    where
        F: FnOnce(&mut Timer) -> Result<(), E>,
    {
        let mut timer = Timer::new();
        let start = Instant::now();
        body(&mut timer)?;
        let whole_call = start.elapsed();
        Ok(timer.region.unwrap_or(whole_call))
    }

    /// Opens an explicit timed region. The region only counts once
    /// [`Timer::stop_region`] closes it; a region left open is ignored.
    pub fn start_region(&mut self) {
        self.region_start = Some(Instant::now());
    }

    /// Closes the region opened by [`Timer::start_region`] and records its
    /// interval as the call's measurement. Does nothing if no region is open.
    pub fn stop_region(&mut self) {
        if let Some(start) = self.region_start.take() {
            self.region = Some(start.elapsed());
        }
    }

    /// Times `body` as the precise region for this call and returns its
    /// value. Equivalent to `start_region`/`stop_region` around the call.
    pub fn measure<R, F>(&mut self, body: F) -> R
    where
        F: FnOnce() -> R,
    {
        self.start_region();
        let result = body();
        self.stop_region();
        result
    }
}

/// Pins the current thread to one core to keep the scheduler from migrating
/// the measurement loop between CPUs.
pub fn pin_to_core(core: usize) -> io::Result<()> {
    affinity::set_thread_affinity([core])
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
}
