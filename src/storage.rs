use crate::errors::AppError;
use crate::state::Store;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::error;

pub fn resolve_data_path() -> PathBuf {
    if let Ok(path) = env::var("HABITS_DATA_PATH") {
        return PathBuf::from(path);
    }

    PathBuf::from("data/habits.json")
}

/// A missing file is a fresh install; an unreadable or corrupt one is
/// logged and replaced with an empty store on the next persist.
pub async fn load_store(path: &Path) -> Store {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(store) => store,
            Err(err) => {
                error!("failed to parse data file: {err}");
                Store::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Store::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            Store::default()
        }
    }
}

pub async fn persist_store(path: &Path, store: &Store) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(store).map_err(AppError::internal)?;
    if let Err(err) = fs::write(path, payload).await {
        error!("failed to write data file: {err}");
        return Err(AppError::internal(err));
    }
    Ok(())
}
