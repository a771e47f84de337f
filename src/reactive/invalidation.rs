use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::OnceLock;

use bitflags::bitflags;
use calloop::ping::Ping;

bitflags! {
    /// Parts of the ring output a countdown step invalidated
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ChangeFlags: u8 {
        /// Label text or size changed, text must be re-measured
        const NEEDS_LAYOUT = 0b01;
        /// Ring sweep, opacity or stroke changed
        const NEEDS_PAINT  = 0b10;
    }
}

/// Global flag to indicate a frame is requested
static FRAME_REQUESTED: AtomicBool = AtomicBool::new(false);

/// Accumulated change flags since the host last drained them
static CHANGE_FLAGS: AtomicU8 = AtomicU8::new(0);

/// Global wakeup handle for signaling the host event loop
static WAKEUP_PING: OnceLock<Ping> = OnceLock::new();

/// Register a calloop ping that is triggered on the first frame request
/// after each [`take_frame_request`].
pub fn init_wakeup(ping: Ping) {
    if WAKEUP_PING.set(ping).is_err() {
        log::warn!("wakeup ping already registered, ignoring");
    }
}

/// Request that the host render a new frame
pub fn request_frame() {
    // Only ping on first request - avoids redundant syscalls when multiple signals update
    let was_requested = FRAME_REQUESTED.swap(true, Ordering::Relaxed);
    if !was_requested {
        if let Some(ping) = WAKEUP_PING.get() {
            ping.ping();
        }
    }
}

/// Check if a frame has been requested and clear the flag
pub fn take_frame_request() -> bool {
    FRAME_REQUESTED.swap(false, Ordering::Relaxed)
}

/// Record which parts of the output changed and request a frame
pub fn request_change(flags: ChangeFlags) {
    CHANGE_FLAGS.fetch_or(flags.bits(), Ordering::Relaxed);
    request_frame();
}

/// Drain the accumulated change flags
pub fn take_change_flags() -> ChangeFlags {
    ChangeFlags::from_bits_truncate(CHANGE_FLAGS.swap(0, Ordering::Relaxed))
}
