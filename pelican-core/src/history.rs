/*
 * Fixed-capacity ring buffers for recent signal states.
 *
 * The control loop pushes a sample on every phase entry and the status
 * reporting task reads concurrently, so the ring lives behind a blocking
 * mutex. Every critical section is a handful of index updates and one
 * element copy, so the lock is never held across an await point or for more
 * than O(1) work.
 */

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

use crate::config::HISTORY_CAPACITY;
use crate::trafficlight::SignalColor;

pub type SignalHistory = RingHistory<SignalColor, HISTORY_CAPACITY>;

struct Ring<T, const N: usize> {
    slots: [Option<T>; N],
    /// Next slot to write.
    head: usize,
    len: usize,
}

pub struct RingHistory<T: Copy, const N: usize> {
    ring: Mutex<CriticalSectionRawMutex, RefCell<Ring<T, N>>>,
}

impl<T: Copy, const N: usize> RingHistory<T, N> {
    /// Const so instances can live in `static`s created once at startup.
    pub const fn new() -> Self {
        RingHistory {
            ring: Mutex::new(RefCell::new(Ring {
                slots: [None; N],
                head: 0,
                len: 0,
            })),
        }
    }

    /// Inserts `sample` as the newest element, evicting the oldest when the
    /// ring is at capacity. Never fails and never allocates.
    pub fn push(&self, sample: T) {
        self.ring.lock(|ring| {
            let mut ring = ring.borrow_mut();
            let head = ring.head;
            ring.slots[head] = Some(sample);
            ring.head = (head + 1) % N;
            if ring.len < N {
                ring.len += 1;
            }
        });
    }

    /// The most recently pushed sample, or `None` if nothing was ever pushed.
    pub fn peek_last(&self) -> Option<T> {
        self.ring.lock(|ring| {
            let ring = ring.borrow();
            if ring.len == 0 {
                return None;
            }
            ring.slots[(ring.head + N - 1) % N]
        })
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn len(&self) -> usize {
        self.ring.lock(|ring| ring.borrow().len)
    }

    /// Copies the retained samples into `out`, oldest first, and returns how
    /// many were written.
    pub fn snapshot(&self, out: &mut [T; N]) -> usize {
        self.ring.lock(|ring| {
            let ring = ring.borrow();
            let oldest = (ring.head + N - ring.len) % N;
            for i in 0..ring.len {
                if let Some(sample) = ring.slots[(oldest + i) % N] {
                    out[i] = sample;
                }
            }
            ring.len
        })
    }
}
