//! Scoped motion state
//!
//! [`MotionStateGuard`] snapshots the ambient G-code state when a phase
//! starts and restores it when the phase ends, on every exit path.

use core::ops::{Deref, DerefMut};

use crate::platform::{MotionState, PrinterHost, Result};

/// Guard restoring the ambient motion state on release or drop.
///
/// Use [`MotionStateGuard::release`] on the success path to observe a
/// restore failure. When the guard is dropped instead (early return on
/// error) the restore still happens and a failure is only logged, so the
/// original error reaches the caller.
pub struct MotionStateGuard<'a, H: PrinterHost + ?Sized> {
    host: &'a mut H,
    saved: Option<MotionState>,
}

impl<'a, H: PrinterHost + ?Sized> MotionStateGuard<'a, H> {
    /// Snapshot the motion state of `host`
    pub fn acquire(host: &'a mut H) -> Self {
        let saved = host.motion_state();
        crate::log_trace!("Motion state saved");
        Self {
            host,
            saved: Some(saved),
        }
    }

    /// Restore the snapshot and end the scope
    pub fn release(mut self) -> Result<()> {
        match self.saved.take() {
            Some(saved) => self.host.restore_motion_state(&saved),
            None => Ok(()),
        }
    }
}

impl<H: PrinterHost + ?Sized> Deref for MotionStateGuard<'_, H> {
    type Target = H;

    fn deref(&self) -> &H {
        self.host
    }
}

impl<H: PrinterHost + ?Sized> DerefMut for MotionStateGuard<'_, H> {
    fn deref_mut(&mut self) -> &mut H {
        self.host
    }
}

impl<H: PrinterHost + ?Sized> Drop for MotionStateGuard<'_, H> {
    fn drop(&mut self) {
        if let Some(saved) = self.saved.take() {
            if let Err(error) = self.host.restore_motion_state(&saved) {
                crate::log_error!("Failed to restore motion state: {}", error);
            }
        }
    }
}
