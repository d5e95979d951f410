use std::{
    fs,
    io,
    path::{Path, PathBuf}
};

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("Unable to read the state file: {0}")]
    Read(#[source] io::Error),

    #[error("Unable to write the state file: {0}")]
    Write(#[source] io::Error),

    #[error("The state file is corrupted: {0:02X?}")]
    Corrupted(Vec<u8>)
}

/// Persisted "lights are off" flag.
pub trait StateStore {
    /// `Ok(None)` if nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored state exists but can't be read or decoded.
    fn load(&self) -> Result<Option<bool>, StateError>;

    /// # Errors
    ///
    /// Returns an error if the state can't be stored.
    fn save(&self, is_off: bool) -> Result<(), StateError>;
}

///
/// Keeps the flag in a one-byte file: ASCII '1' if the lights are off, '0' otherwise.
/// Raw 0x01/0x00 bytes and surrounding whitespace are accepted on load too.
///
pub struct FileStateStore {
    path: PathBuf
}

impl FileStateStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn encode(is_off: bool) -> u8 {
        if is_off { b'1' } else { b'0' }
    }

    /// # Errors
    ///
    /// Returns `StateError::Corrupted` for anything but a single flag byte.
    pub fn decode(content: &[u8]) -> Result<bool, StateError> {
        match content.trim_ascii() {
            [b'1' | 0x01] => Ok(true),
            [b'0' | 0x00] => Ok(false),
            other => Err(StateError::Corrupted(other.to_vec()))
        }
    }
}

impl StateStore for FileStateStore {
    fn load(&self) -> Result<Option<bool>, StateError> {
        match fs::read(&self.path) {
            Ok(content) => Self::decode(&content).map(Some),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StateError::Read(err))
        }
    }

    fn save(&self, is_off: bool) -> Result<(), StateError> {
        fs::write(&self.path, [Self::encode(is_off)]).map_err(StateError::Write)
    }
}



#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ledtoggle-state-{}-{name}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn absent_file_means_nothing_stored() {
        let dir = scratch_dir("absent");
        let store = FileStateStore::new(dir.join("state.bin"));

        assert!(matches!(store.load(), Ok(None)));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn saved_flag_is_loaded_back() {
        let dir = scratch_dir("saved");
        let store = FileStateStore::new(dir.join("state.bin"));

        store.save(true).unwrap();
        assert_eq!(fs::read(store.path()).unwrap(), b"1");
        assert!(matches!(store.load(), Ok(Some(true))));

        store.save(false).unwrap();
        assert_eq!(fs::read(store.path()).unwrap(), b"0");
        assert!(matches!(store.load(), Ok(Some(false))));

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn lenient_decoding() {
        assert!(FileStateStore::decode(b"1\r\n").unwrap());
        assert!(FileStateStore::decode(&[0x01]).unwrap());
        assert!(!FileStateStore::decode(b" 0").unwrap());
        assert!(!FileStateStore::decode(&[0x00]).unwrap());
    }

    #[test]
    fn garbage_is_corrupted() {
        assert!(matches!(FileStateStore::decode(b""), Err(StateError::Corrupted(_))));
        assert!(matches!(FileStateStore::decode(b"10"), Err(StateError::Corrupted(_))));
        assert!(matches!(FileStateStore::decode(b"true"), Err(StateError::Corrupted(_))));
    }

    #[test]
    fn unwritable_location_fails_to_save() {
        let dir = scratch_dir("unwritable");
        let store = FileStateStore::new(dir.join("missing").join("state.bin"));

        assert!(matches!(store.save(true), Err(StateError::Write(_))));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn directory_in_place_of_the_file_fails_to_load() {
        let dir = scratch_dir("dir-in-place");
        let store = FileStateStore::new(dir.clone());

        assert!(matches!(store.load(), Err(StateError::Read(_))));
        fs::remove_dir_all(dir).unwrap();
    }
}
