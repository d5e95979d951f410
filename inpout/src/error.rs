#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unable to locate the executable folder: {0}")]
    ExePath(#[source] std::io::Error),

    #[error("Unable to load {}: {source}", .path.display())]
    LoadLibrary {
        path: std::path::PathBuf,
        #[source]
        source: windows::core::Error
    },

    #[error("Unable to find {0} in the InpOut library")]
    MissingExport(&'static str),

    #[error("InpOut library is loaded but its driver isn't open")]
    DriverNotOpen
}
