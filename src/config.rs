use std::{
    ffi::OsString,
    path::PathBuf
};

use clap::Parser;

use crate::error::Error;

#[derive(Parser, Debug)]
#[command(name = "ledtoggle", version, about = "Toggles the EC-driven indicator light on every run")]
pub struct Cli {
    /// Folder for the persisted light state and the error log.
    /// Default: %APPDATA%\LedToggle
    #[arg(long, value_name = "PATH")]
    pub state_dir: Option<PathBuf>,

    /// Path to the InpOut library.
    /// Default: InpOutx64.dll (InpOut32.dll for 32-bit builds) next to the executable
    #[arg(long, value_name = "PATH")]
    pub provider: Option<PathBuf>,

    /// Log debug details of the controller communication
    #[arg(short, long)]
    pub verbose: bool
}

#[derive(Debug, Clone)]
#[cfg_attr(not(windows), allow(dead_code))] // Only the Windows run reads the settings
pub struct Config {
    pub state_dir: PathBuf,
    pub provider: Option<PathBuf>,
    pub verbose: bool
}

impl Config {
    pub const APP_FOLDER: &'static str = "LedToggle";
    #[cfg(any(windows, test))]
    pub const STATE_FILE: &'static str = "state.bin";
    #[cfg(any(windows, test))]
    pub const LOG_FILE: &'static str = "error.log";

    /// # Errors
    ///
    /// Returns an error if neither `--state-dir` nor `APPDATA` is available.
    pub fn from_cli(cli: Cli) -> Result<Self, Error> {
        Self::resolve(cli, std::env::var_os("APPDATA"))
    }

    fn resolve(cli: Cli, app_data: Option<OsString>) -> Result<Self, Error> {
        let state_dir = match cli.state_dir {
            Some(dir) => dir,
            None => PathBuf::from(app_data.filter(|dir| !dir.is_empty()).ok_or(Error::MissingAppData)?).join(Self::APP_FOLDER)
        };

        Ok(Self { state_dir, provider: cli.provider, verbose: cli.verbose })
    }

    #[cfg(any(windows, test))]
    #[must_use]
    pub fn state_file(&self) -> PathBuf {
        self.state_dir.join(Self::STATE_FILE)
    }

    #[cfg(any(windows, test))]
    #[must_use]
    pub fn log_file(&self) -> PathBuf {
        self.state_dir.join(Self::LOG_FILE)
    }
}



#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("ledtoggle").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn state_lives_under_app_data_by_default() {
        let config = Config::resolve(parse(&[]), Some(OsString::from("roaming"))).unwrap();

        assert_eq!(config.state_dir, PathBuf::from("roaming").join("LedToggle"));
        assert_eq!(config.state_file(), PathBuf::from("roaming").join("LedToggle").join("state.bin"));
        assert_eq!(config.log_file(), PathBuf::from("roaming").join("LedToggle").join("error.log"));
        assert!(config.provider.is_none());
        assert!(!config.verbose);
    }

    #[test]
    fn explicit_state_dir_doesnt_need_app_data() {
        let config = Config::resolve(parse(&["--state-dir", "elsewhere", "-v"]), None).unwrap();

        assert_eq!(config.state_dir, PathBuf::from("elsewhere"));
        assert!(config.verbose);
    }

    #[test]
    fn missing_app_data_is_a_precondition_failure() {
        let err = Config::resolve(parse(&[]), None).unwrap_err();
        assert!(matches!(err, Error::MissingAppData));
        assert_eq!(err.exit_code(), 1);

        let err = Config::resolve(parse(&[]), Some(OsString::new())).unwrap_err();
        assert!(matches!(err, Error::MissingAppData));
    }

    #[test]
    fn provider_path_is_passed_through() {
        let config = Config::resolve(parse(&["--provider", "C:\\io\\InpOutx64.dll"]), Some(OsString::from("roaming"))).unwrap();
        assert_eq!(config.provider, Some(PathBuf::from("C:\\io\\InpOutx64.dll")));
    }

    #[test]
    fn unknown_flags_are_rejected() {
        assert!(Cli::try_parse_from(["ledtoggle", "--on"]).is_err());
    }
}
