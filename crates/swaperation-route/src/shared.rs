//! Thread-safe handle to a session.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{RouteError, RouteResult};
use crate::session::{AdvanceOutcome, RoutingSession, SwapOutcome};
use crate::snapshot::SessionSnapshot;

/// A [`RoutingSession`] behind one lock.
///
/// Each transition holds the lock for its whole duration, so observers see
/// either the state before a request or the state after it.
#[derive(Debug, Clone)]
pub struct SharedSession {
    inner: Arc<Mutex<RoutingSession>>,
}

impl SharedSession {
    pub fn new(session: RoutingSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    fn lock(&self) -> RouteResult<MutexGuard<'_, RoutingSession>> {
        self.inner.lock().map_err(|_| RouteError::Poisoned)
    }

    pub fn swap(&self, x: u32, y: u32) -> RouteResult<SwapOutcome> {
        self.lock()?.swap(x, y)
    }

    pub fn advance(&self) -> RouteResult<AdvanceOutcome> {
        self.lock()?.advance()
    }

    pub fn restart(&self) -> RouteResult<()> {
        self.lock()?.restart();
        Ok(())
    }

    pub fn snapshot(&self) -> RouteResult<SessionSnapshot> {
        Ok(self.lock()?.snapshot())
    }

    /// Run `f` with exclusive access.
    pub fn with<T>(&self, f: impl FnOnce(&mut RoutingSession) -> T) -> RouteResult<T> {
        Ok(f(&mut *self.lock()?))
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use swaperation_ir::{Architecture, Circuit, Gate};

    use super::*;

    #[test]
    fn test_concurrent_swaps_keep_bijection() {
        let circuit = Circuit::with_gates("shared", 4, [Gate::cx(0, 3)]).unwrap();
        let arch = Architecture::linear(4).unwrap();
        let session =
            RoutingSession::new(Arc::new(circuit), Arc::new(arch)).unwrap();
        let shared = SharedSession::new(session);

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for i in 0..50u32 {
                        let x = (t + i) % 4;
                        shared.swap(x, (x + 1) % 4).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let snap = shared.snapshot().unwrap();
        assert!(snap.current_mapping.is_bijection());
        assert_eq!(snap.current_mapping, snap.initial_mapping);
        assert_eq!(snap.num_swaps, 0);
    }

    #[test]
    fn test_poisoned_lock() {
        let circuit = Circuit::with_gates("poison", 2, [Gate::cx(0, 1)]).unwrap();
        let arch = Architecture::linear(2).unwrap();
        let shared = SharedSession::new(
            RoutingSession::new(Arc::new(circuit), Arc::new(arch)).unwrap(),
        );
        let clone = shared.clone();
        let _ = thread::spawn(move || {
            let _ = clone.with::<()>(|_| panic!("boom"));
        })
        .join();
        assert!(matches!(shared.advance(), Err(RouteError::Poisoned)));
    }
}
