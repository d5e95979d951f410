use windows::{
    Win32::System::LibraryLoader::{ GetProcAddress, LoadLibraryW },
    core::{ PCSTR, PCWSTR },
    s
};

use winapi::auto;

use crate::{
    Inpout,
    interface::{ Inp32, IsInpOutDriverOpen, Out32 },
    error::Error as InpoutError
};

impl crate::Inpout {
    #[cfg(target_arch = "x86_64")]
    pub const LIBRARY_NAME: &'static str = "InpOutx64.dll";

    #[cfg(target_arch = "x86")]
    pub const LIBRARY_NAME: &'static str = "InpOut32.dll";

    #[cfg(not(any(target_arch = "x86_64", target_arch = "x86")))]
    compile_error!("Unsupported platform, the only supported platforms are i386 and amd64.");

    /// The library next to the current executable.
    ///
    /// # Errors
    ///
    /// Returns an error if the executable path is unavailable.
    pub fn default_path() -> Result<std::path::PathBuf, InpoutError> {
        let exe_path = std::env::current_exe().map_err(InpoutError::ExePath)?;
        let exe_folder = exe_path.parent().ok_or_else(|| InpoutError::ExePath(std::io::ErrorKind::NotFound.into()))?;
        Ok(exe_folder.join(Self::LIBRARY_NAME))
    }

    fn resolve(module: &auto::Module, name: PCSTR, printable_name: &'static str) -> Result<unsafe extern "system" fn() -> isize, InpoutError> {
        unsafe { GetProcAddress(module.get(), name) }.ok_or(InpoutError::MissingExport(printable_name))
    }

    /// Loads the library and resolves `Out32`/`Inp32`.
    /// The library installs and opens its driver on load, so a successfully
    /// loaded module can still be unusable: it's checked by `IsInpOutDriverOpen`
    /// if the library exports it.
    ///
    /// # Errors
    ///
    /// Returns an error in case of library loading failure, absent exports
    /// or a closed driver.
    pub fn load(path: &std::path::Path) -> Result<Inpout, InpoutError> {
        use std::os::windows::ffi::OsStrExt;

        let path_utf16: Vec<u16> = path.as_os_str().encode_wide().chain(std::iter::once(0)).collect();

        let module = unsafe { LoadLibraryW(PCWSTR::from_raw(path_utf16.as_ptr())) }
            .map(auto::Module::new)
            .map_err(|source| InpoutError::LoadLibrary { path: path.to_path_buf(), source })?;

        let out32 = Self::resolve(&module, s!("Out32"), "Out32")?;
        let inp32 = Self::resolve(&module, s!("Inp32"), "Inp32")?;

        if let Ok(is_driver_open) = Self::resolve(&module, s!("IsInpOutDriverOpen"), "IsInpOutDriverOpen") {
            let is_driver_open: IsInpOutDriverOpen = unsafe { std::mem::transmute(is_driver_open) };
            if unsafe { is_driver_open() } == 0 {
                return Err(InpoutError::DriverNotOpen);
            }
        }

        Ok(Inpout {
            out32: unsafe { std::mem::transmute::<_, Out32>(out32) },
            inp32: unsafe { std::mem::transmute::<_, Inp32>(inp32) },
            _module: module
        })
    }
}
