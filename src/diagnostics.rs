//! Diagnostics logging for debug builds.
//!
//! The control loop publishes a snapshot every time the counter clock wraps.
//! Snapshots cross over to this task by value, so the loop never waits on
//! the logger.

use decade_rosary::Diagnostics;
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};

/// Latest snapshot from the control loop.
///
/// Older snapshots are overwritten if the task falls behind.
pub static DIAGNOSTICS: Signal<CriticalSectionRawMutex, Diagnostics> = Signal::new();

/// Async task printing control loop snapshots over RTT.
///
/// # Example
///
/// ```no_run
/// spawner.spawn(diagnostics_task()).unwrap();
/// ```
#[embassy_executor::task]
pub async fn diagnostics_task() {
    loop {
        let snapshot = DIAGNOSTICS.wait().await;
        defmt::debug!("{}", snapshot);
        if snapshot.cancel_countdown < decade_rosary::config::CANCEL_TICKS / 4 {
            defmt::warn!(
                "{} held, cancel in {=u8} wraps",
                snapshot.active_button,
                snapshot.cancel_countdown
            );
        }
    }
}
