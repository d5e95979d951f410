use windows::Win32::{
    Security::{ GetTokenInformation, TokenElevation, TOKEN_ELEVATION, TOKEN_QUERY },
    System::Threading::{ GetCurrentProcess, OpenProcessToken },
    Foundation::HANDLE
};

use crate::auto;

/// Whether the current process runs with an elevated (administrator) token.
/// Any failure to query the token is reported as "not elevated".
#[must_use]
pub fn is_elevated() -> bool {
    let mut token = HANDLE::default();
    if !unsafe { OpenProcessToken(GetCurrentProcess(), TOKEN_QUERY, std::ptr::addr_of_mut!(token)) }.as_bool() {
        return false;
    }

    let token = auto::Handle::new(token);

    let mut elevation = TOKEN_ELEVATION::default();
    let mut returned = 0_u32;

    #[allow(clippy::cast_possible_truncation)]
    let status = unsafe { GetTokenInformation(
        token.get(),
        TokenElevation,
        Some(std::ptr::addr_of_mut!(elevation).cast()),
        std::mem::size_of::<TOKEN_ELEVATION>() as u32,
        std::ptr::addr_of_mut!(returned)
    ) };

    status.as_bool() && elevation.TokenIsElevated != 0
}
