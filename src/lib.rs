pub mod app;
pub mod color;
pub mod dashboard;
pub mod errors;
pub mod handlers;
pub mod index;
pub mod models;
pub mod rates;
pub mod state;
pub mod storage;
pub mod streaks;

pub use app::router;
pub use state::{AppState, Store};
pub use storage::{load_store, persist_store, resolve_data_path};
