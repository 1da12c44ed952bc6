//! Values shared between tasks.
//!
//! Readers always copy out; nobody holds a reference across an await.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use portable_atomic::{AtomicU32, Ordering};
use relnav_core::{Attitude, RelNavSnapshot};

static ATTITUDE: Mutex<CriticalSectionRawMutex, Cell<Attitude>> =
    Mutex::new(Cell::new(Attitude::LEVEL));

static NAV_STATE: Mutex<CriticalSectionRawMutex, Cell<RelNavSnapshot>> =
    Mutex::new(Cell::new(RelNavSnapshot::empty()));

static CONTROL_TICKS: AtomicU32 = AtomicU32::new(0);

/// Store the latest own-ship attitude.
///
/// Nothing in this crate calls this; the attitude source added by the
/// integrator does. The control task reads [`Attitude::LEVEL`] until then.
pub fn publish_attitude(attitude: Attitude) {
    ATTITUDE.lock(|cell| cell.set(attitude));
}

#[must_use]
pub fn attitude() -> Attitude {
    ATTITUDE.lock(Cell::get)
}

/// Publish the navigation state after a control tick.
pub fn publish_snapshot(snapshot: RelNavSnapshot) {
    NAV_STATE.lock(|cell| cell.set(snapshot));
    CONTROL_TICKS.fetch_add(1, Ordering::Relaxed);
}

#[must_use]
pub fn snapshot() -> RelNavSnapshot {
    NAV_STATE.lock(Cell::get)
}

/// Control ticks completed since boot.
#[must_use]
pub fn control_ticks() -> u32 {
    CONTROL_TICKS.load(Ordering::Relaxed)
}
