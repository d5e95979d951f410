use windows::{
    Win32::{
        System::Threading::{ CreateMutexW, ReleaseMutex },
        Foundation::{ GetLastError, ERROR_ALREADY_EXISTS }
    },
    core::{ PCWSTR, Error }
};

use crate::auto;

#[derive(Debug, thiserror::Error)]
pub enum LockError {
    #[error("the lock is already held by another process")]
    AlreadyHeld,

    #[error("unable to create the mutex: {0}")]
    Create(#[source] Error)
}

///
/// Process-wide single-instance guard built on a named mutex.
///
/// The mutex is created initially owned; the first process to create it
/// holds it until the guard is dropped, every later `acquire` with the same
/// name observes `ERROR_ALREADY_EXISTS`.
///
pub struct InstanceLock {
    mutex_handle: auto::Handle
}

impl InstanceLock {
    /// # Errors
    ///
    /// Returns `LockError::AlreadyHeld` if another process owns the mutex
    /// and `LockError::Create` in case of `CreateMutexW` failure.
    pub fn acquire(name: &str) -> Result<Self, LockError> {
        let name_utf16: Vec<u16> = name.encode_utf16().chain(std::iter::once(0)).collect();

        let handle = unsafe { CreateMutexW(None, true, PCWSTR::from_raw(name_utf16.as_ptr())) }
            .map_err(LockError::Create)?;

        // Must be queried right after the call, anything in between may overwrite it:
        let already_exists = unsafe { GetLastError() } == ERROR_ALREADY_EXISTS;

        let mutex_handle = auto::Handle::new(handle);
        if already_exists {
            return Err(LockError::AlreadyHeld); // The handle is closed here, the mutex isn't ours
        }

        Ok(Self { mutex_handle })
    }
}

impl Drop for InstanceLock {
    fn drop(&mut self) {
        unsafe { ReleaseMutex(self.mutex_handle.get()) };
    }
}
