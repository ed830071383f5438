pub mod achievements;
pub mod auth;
pub mod cli;
pub mod config;
pub mod logging;
pub mod models;
pub mod stats;
pub mod storage;
pub mod store;
pub mod utils;

pub use config::Config;
pub use models::{Category, DailyUpdate, Mood, Priority, Status, Task, UserProfile};
pub use storage::Storage;
pub use store::{DailyUpdateStore, TaskStore};
pub use utils::Profile;
