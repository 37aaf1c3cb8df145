use once_cell::sync::Lazy;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

/// Global mutex to serialize tests that modify process wide state such as
/// environment variables.
pub static TEST_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

/// Write `contents` to `dir/name`, creating parent directories, and return the path.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dirs");
    }
    fs::write(&path, contents).expect("write test file");
    path
}

/// Temp dir with a single file written into it. Keep the `TempDir` alive for
/// as long as the file is needed.
pub fn temp_file(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write_file(dir.path(), name, contents);
    (dir, path)
}

/// Set an environment variable for the duration of the closure.
/// Takes the global `TEST_MUTEX` lock and always restores the previous value,
/// even if the closure panics.
pub fn with_env_var<F, T>(key: &str, value: &str, f: F) -> T
where
    F: FnOnce() -> T,
{
    let _lock = TEST_MUTEX.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    struct Reset {
        key: String,
        original: Option<std::ffi::OsString>,
    }
    impl Drop for Reset {
        fn drop(&mut self) {
            match self.original.take() {
                Some(v) => env::set_var(&self.key, v),
                None => env::remove_var(&self.key),
            }
        }
    }

    let _guard = Reset {
        key: key.to_string(),
        original: env::var_os(key),
    };
    env::set_var(key, value);

    f()
}
