mod filesystem;
mod stash;
mod state;
mod traits;

pub use filesystem::{FilesystemStorage, META_DIR};
pub use stash::StashEntry;
pub use state::{State, DEFAULT_BRANCH};
pub use traits::{MutableState, SettingsStore, StashStore, StorageBackend};
