use std::time::Duration;

pub trait Delay {
    fn sleep_ms(&self, msec: u32);
}

/// Blocks the calling thread.
#[derive(Default, Copy, Clone)]
pub struct ThreadDelay;

impl Delay for ThreadDelay {
    #[inline]
    fn sleep_ms(&self, msec: u32) {
        std::thread::sleep(Duration::from_millis(u64::from(msec)));
    }
}
