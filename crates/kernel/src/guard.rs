use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Process-unique id of the current logical actor (one per thread).
fn current_actor() -> u64 {
    static NEXT_ACTOR: AtomicU64 = AtomicU64::new(1);
    thread_local! {
        static ACTOR_ID: u64 = NEXT_ACTOR.fetch_add(1, Ordering::Relaxed);
    }
    ACTOR_ID.with(|id| *id)
}

/// Wraps exactly one simulation world and serializes every touch of it.
///
/// `acquire` blocks until exclusive ownership is obtained and returns a
/// scoped [`WorldAccess`]; dropping the access releases the world on
/// every exit path, including panics in the critical section.
///
/// A reentrant `acquire` from the actor already holding the world is a
/// programming error and panics immediately instead of deadlocking.
#[derive(Debug)]
pub struct SimulationGuard<W> {
    world: Mutex<W>,
    holder: AtomicU64,
}

impl<W> SimulationGuard<W> {
    pub fn new(world: W) -> Self {
        Self {
            world: Mutex::new(world),
            holder: AtomicU64::new(0),
        }
    }

    /// Obtain exclusive access to the world, blocking while another
    /// actor holds it.
    ///
    /// # Panics
    /// If the calling actor already holds the world, or if a previous
    /// holder panicked mid-mutation (poisoned state).
    pub fn acquire(&self) -> WorldAccess<'_, W> {
        let actor = current_actor();
        if self.holder.load(Ordering::Acquire) == actor {
            panic!("simulation guard reacquired by the actor already holding it");
        }
        let inner = match self.world.lock() {
            Ok(inner) => inner,
            Err(_) => panic!("simulation world poisoned by a panicking holder"),
        };
        self.holder.store(actor, Ordering::Release);
        WorldAccess {
            inner,
            holder: &self.holder,
        }
    }

    /// Tear the guard down and recover the world.
    pub fn into_world(self) -> W {
        match self.world.into_inner() {
            Ok(world) => world,
            Err(_) => panic!("simulation world poisoned by a panicking holder"),
        }
    }
}

/// Scoped exclusive access to the guarded world.
pub struct WorldAccess<'a, W> {
    inner: MutexGuard<'a, W>,
    holder: &'a AtomicU64,
}

impl<W> Deref for WorldAccess<'_, W> {
    type Target = W;

    fn deref(&self) -> &W {
        &self.inner
    }
}

impl<W> DerefMut for WorldAccess<'_, W> {
    fn deref_mut(&mut self) -> &mut W {
        &mut self.inner
    }
}

impl<W> Drop for WorldAccess<'_, W> {
    fn drop(&mut self) {
        self.holder.store(0, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn access_mutates_world() {
        let guard = SimulationGuard::new(0u32);
        {
            let mut world = guard.acquire();
            *world += 5;
        }
        assert_eq!(*guard.acquire(), 5);
    }

    #[test]
    fn into_world_recovers_state() {
        let guard = SimulationGuard::new(vec![1, 2, 3]);
        guard.acquire().push(4);
        assert_eq!(guard.into_world(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn second_actor_blocks_until_release() {
        let guard = Arc::new(SimulationGuard::new(0u32));
        let (started_tx, started_rx) = mpsc::channel();
        let (done_tx, done_rx) = mpsc::channel::<()>();

        let held = guard.acquire();
        let worker = {
            let guard = Arc::clone(&guard);
            std::thread::spawn(move || {
                started_tx.send(()).unwrap();
                let mut world = guard.acquire();
                *world += 1;
                done_tx.send(()).unwrap();
            })
        };

        started_rx.recv().unwrap();
        // Worker is waiting on the guard; it must not get in while we hold it.
        assert!(done_rx.recv_timeout(Duration::from_millis(100)).is_err());
        drop(held);
        done_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        worker.join().unwrap();
        assert_eq!(*guard.acquire(), 1);
    }

    #[test]
    fn interleaved_actors_never_tear_state() {
        let guard = Arc::new(SimulationGuard::new(0u64));
        let mut workers = Vec::new();
        for _ in 0..4 {
            let guard = Arc::clone(&guard);
            workers.push(std::thread::spawn(move || {
                for _ in 0..1000 {
                    let mut world = guard.acquire();
                    *world += 1;
                }
            }));
        }
        for worker in workers {
            worker.join().unwrap();
        }
        assert_eq!(*guard.acquire(), 4000);
    }

    #[test]
    #[should_panic(expected = "reacquired")]
    fn reentrant_acquire_is_fatal() {
        let guard = SimulationGuard::new(0u32);
        let _held = guard.acquire();
        let _second = guard.acquire();
    }

    #[test]
    fn release_happens_on_panic_exit_path() {
        let guard = Arc::new(SimulationGuard::new(0u32));
        let worker = {
            let guard = Arc::clone(&guard);
            std::thread::spawn(move || {
                let _world = guard.acquire();
                // Access drops before the unwind leaves the closure.
                drop(_world);
                panic!("actor failure after release");
            })
        };
        assert!(worker.join().is_err());
        // Guard is free again for the next actor.
        assert_eq!(*guard.acquire(), 0);
    }
}
