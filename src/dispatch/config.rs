//! # Dispatcher configuration.
//!
//! Provides [`DispatcherConfig`] settings applied at construction time.
//!
//! ## Sentinel values
//! - `queue_capacity = 0` → no preallocation (queue grows on demand)

/// Configuration for a dispatcher instance.
///
/// ## Field semantics
/// - `queue_capacity`: initial capacity reserved for the action queue
///   (`0` = no preallocation)
///
/// ## Notes
/// All fields are public for flexibility. Prefer the helper accessors to
/// avoid sprinkling sentinel checks (`0`) across calling code.
#[derive(Clone, Copy, Debug)]
pub struct DispatcherConfig {
    /// Initial capacity reserved for the action queue.
    ///
    /// Actions only accumulate while no subscriber is registered or while a
    /// drain is behind; the queue is usually near-empty, so preallocation is
    /// an optimization for bursty producers, not a limit.
    pub queue_capacity: usize,
}

impl DispatcherConfig {
    /// Returns the initial queue capacity as an `Option`.
    ///
    /// - `None` → no preallocation
    /// - `Some(n)` → reserve space for `n` actions up front
    #[inline]
    pub fn initial_capacity(&self) -> Option<usize> {
        if self.queue_capacity == 0 {
            None
        } else {
            Some(self.queue_capacity)
        }
    }
}

impl Default for DispatcherConfig {
    /// Default configuration:
    ///
    /// - `queue_capacity = 0` (no preallocation)
    fn default() -> Self {
        Self { queue_capacity: 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_sentinel() {
        assert_eq!(DispatcherConfig::default().initial_capacity(), None);

        let cfg = DispatcherConfig { queue_capacity: 8 };
        assert_eq!(cfg.initial_capacity(), Some(8));
    }
}
