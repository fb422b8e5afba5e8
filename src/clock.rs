use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the current time in whole seconds since the Unix epoch.
///
/// The admission controller only compares timestamps against each other,
/// so implementors just need to be non-decreasing across calls.
pub trait Clock: Send + Sync {
    fn now(&self) -> u64;
}

// wall clock, used by the running server
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        // a clock set before 1970 reads as zero instead of failing
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default()
    }
}

// lets AppState hold a type-erased clock (tests swap in a manual one)
impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> u64 {
        (**self).now()
    }
}

/// Clock shared behind an `Arc`, the form stored in the server state.
pub type SharedClock = Arc<dyn Clock>;
