//! Scoped wall-clock timing for long-running phases.

use std::time::{Duration, Instant};

/// A value together with the time it took to produce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timed<T> {
    /// The produced value.
    pub value: T,
    /// Wall-clock duration of the call.
    pub elapsed: Duration,
}

impl<T> Timed<T> {
    /// Transform the value, keeping the duration.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Timed<U> {
        Timed {
            value: f(self.value),
            elapsed: self.elapsed,
        }
    }
}

/// Run `f` and measure how long it takes.
pub fn timed<T>(f: impl FnOnce() -> T) -> Timed<T> {
    let start = Instant::now();
    let value = f();
    Timed {
        value,
        elapsed: start.elapsed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timed_returns_value_and_duration() {
        let result = timed(|| {
            std::thread::sleep(Duration::from_millis(5));
            42
        });
        assert_eq!(result.value, 42);
        assert!(result.elapsed >= Duration::from_millis(5));
        assert_eq!(result.map(|v| v * 2).value, 84);
    }
}
