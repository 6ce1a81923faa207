pub mod commands;
pub mod error_fmt;
pub mod filter;
pub mod render;
pub mod settings;
pub mod store;
pub mod style;
pub mod task;

// Re-export commonly used types for convenience
pub use error_fmt::AppError;
pub use filter::{Filter, FilterError};
pub use settings::{Settings, SettingsError, StyleConfig};
pub use store::{RecordError, StoreReadError, TaskStore};
pub use style::{Line, Role, Segment, Theme, ThemeError};
pub use task::{Task, TaskRecord, MAX_PRIORITY};
