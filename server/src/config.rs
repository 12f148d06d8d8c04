use std::env;
use std::path::PathBuf;

use once_cell::sync::Lazy;

/// Process-wide settings, read once from the environment at first use.
pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);

pub struct Config {
    pub rounds_per_page: i64,
    pub games_per_page: i64,
    pub upload_folder: PathBuf,
    pub allowed_extensions: Vec<String>,
}

impl Config {
    fn from_env() -> Config {
        Config {
            rounds_per_page: int_var("ROUNDS_PER_PAGE", 10),
            games_per_page: int_var("GAMES_PER_PAGE", 10),
            upload_folder: PathBuf::from(
                env::var("UPLOAD_FOLDER").unwrap_or_else(|_| "uploads".to_string()),
            ),
            allowed_extensions: env::var("ALLOWED_EXTENSIONS")
                .unwrap_or_else(|_| "jpg,png,gif,pdf,zip".to_string())
                .split(',')
                .map(|extension| extension.trim().to_lowercase())
                .filter(|extension| !extension.is_empty())
                .collect(),
        }
    }
}

fn int_var(name: &str, default: i64) -> i64 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
