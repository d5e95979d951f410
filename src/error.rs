use std::path::PathBuf;

/// Failures that stop the program before it touches the controller.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[cfg(windows)]
    #[error("This program must be run as Administrator.")]
    NotElevated,

    #[error("The APPDATA environment variable is not set, use --state-dir to choose the state folder.")]
    MissingAppData,

    #[cfg(windows)]
    #[error("Cannot create state directory {}: {source}", .path.display())]
    CreateStateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error
    },

    #[cfg(windows)]
    #[error("Another instance of this program is already running.")]
    AlreadyRunning,

    #[cfg(windows)]
    #[error("Unable to acquire the single-instance lock: {0}")]
    InstanceLock(String),

    #[cfg(windows)]
    #[error("Cannot load the InpOut library: {0}")]
    Provider(String),

    #[cfg(not(windows))]
    #[error("This program controls the embedded controller of Windows machines only.")]
    UnsupportedPlatform
}

impl Error {
    pub const PRECONDITION_EXIT_CODE: u8 = 1;

    #[must_use]
    pub fn exit_code(&self) -> u8 {
        Self::PRECONDITION_EXIT_CODE
    }

    /// A malformed command line is a precondition failure, --help and --version aren't.
    #[must_use]
    pub fn cli_exit_code(err: &clap::Error) -> u8 {
        if err.use_stderr() {
            Self::PRECONDITION_EXIT_CODE
        } else {
            0
        }
    }
}
