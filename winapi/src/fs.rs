use std::os::windows::ffi::OsStrExt;

use windows::{
    Win32::Storage::FileSystem::{ GetFileAttributesW, SetFileAttributesW, FILE_FLAGS_AND_ATTRIBUTES, FILE_ATTRIBUTE_HIDDEN, INVALID_FILE_ATTRIBUTES },
    core::{ PCWSTR, Error }
};

/// Adds the hidden attribute to a file or a directory keeping the other ones.
///
/// # Errors
///
/// Returns an error in case of `GetFileAttributesW` or `SetFileAttributesW` failure.
pub fn set_hidden(path: &std::path::Path) -> Result<(), Error> {
    let path_utf16: Vec<u16> = path.as_os_str().encode_wide().chain(std::iter::once(0)).collect();
    let path_ptr = PCWSTR::from_raw(path_utf16.as_ptr());

    let attributes = unsafe { GetFileAttributesW(path_ptr) };
    if attributes == INVALID_FILE_ATTRIBUTES {
        return Err(Error::from_win32());
    }

    let status = unsafe { SetFileAttributesW(path_ptr, FILE_FLAGS_AND_ATTRIBUTES(attributes) | FILE_ATTRIBUTE_HIDDEN) };
    if status.as_bool() {
        Ok(())
    } else {
        Err(Error::from_win32())
    }
}
