use std::sync::atomic::{AtomicBool, Ordering};

use ec::{delay::ThreadDelay, PortAccessor};
use inpout::{Inpout, Interface};
use winapi::{sync::{InstanceLock, LockError}, token};

use crate::{
    config::Config,
    error::Error,
    logger,
    state::FileStateStore,
    toggle::Toggler
};

const INSTANCE_MUTEX: &str = "Global\\LedToggleSingleInstance";

static INTERRUPTED: AtomicBool = AtomicBool::new(false);



struct InpoutDriver(Inpout);

impl PortAccessor for InpoutDriver {
    fn read_byte(&self, port: u16) -> Option<u8> {
        Some(self.0.read_port_byte(port))
    }

    fn write_byte(&self, port: u16, value: u8) -> bool {
        self.0.write_port_byte(port, value);
        true
    }
}

/// Process-wide resources of a run.
/// Fields drop in order: the library is unloaded before the lock is released.
struct Session {
    driver: InpoutDriver,
    _lock: InstanceLock
}

impl Session {
    fn open(config: &Config) -> Result<Self, Error> {
        let lock = InstanceLock::acquire(INSTANCE_MUTEX).map_err(|err| match err {
            LockError::AlreadyHeld => Error::AlreadyRunning,
            LockError::Create(err) => Error::InstanceLock(err.to_string())
        })?;

        let provider_path = match &config.provider {
            Some(path) => path.clone(),
            None => Inpout::default_path().map_err(|err| Error::Provider(err.to_string()))?
        };

        let inpout = Inpout::load(&provider_path).map_err(|err| Error::Provider(err.to_string()))?;

        Ok(Self { driver: InpoutDriver(inpout), _lock: lock })
    }
}

fn prepare_state_dir(config: &Config) -> Result<(), Error> {
    std::fs::DirBuilder::new()
        .recursive(true)
        .create(&config.state_dir)
        .map_err(|source| Error::CreateStateDir { path: config.state_dir.clone(), source })?;

    let _hide_status = winapi::fs::set_hidden(&config.state_dir);
    Ok(())
}

///
/// Checks every precondition, then toggles the light once.
/// Nothing touches the controller until all of them are met.
///
pub fn run(config: &Config) -> Result<u8, Error> {
    if !token::is_elevated() {
        return Err(Error::NotElevated);
    }

    prepare_state_dir(config)?;
    logger::init(&config.log_file(), config.verbose);

    let session = Session::open(config).inspect_err(|err| log::error!("{err}"))?;

    // A half-sent EC transaction can't be undone, so Ctrl-C only marks the run:
    if let Err(err) = ctrlc::set_handler(|| INTERRUPTED.store(true, Ordering::Relaxed)) {
        log::warn!("Unable to set the Ctrl-C handler: {err}");
    }

    let store = FileStateStore::new(config.state_file());
    log::debug!("Using the state file {}", store.path().display());

    let report = Toggler::new(&session.driver, &ThreadDelay, &store).run();
    log::debug!(
        "Lights were {}, now {}",
        if report.was_off { "off" } else { "on" },
        if report.is_off { "off" } else { "on" }
    );

    if INTERRUPTED.load(Ordering::Relaxed) {
        log::warn!("Interrupted, exiting after the toggle has been completed");
    }

    if !report.registers_written {
        eprintln!("Warning: Failed to communicate with Embedded Controller.");
    }

    if !report.state_persisted {
        eprintln!("Cannot save LED state.");
    }

    Ok(report.exit_code())
}
