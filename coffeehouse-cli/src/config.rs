use std::path::PathBuf;

use tracing::debug;

/// Load environment variables from .env files
///
/// Priority order (highest to lowest):
/// 1. Environment variables already set
/// 2. Current directory .env
/// 3. ~/.coffeehouse/.env
///
/// dotenvy never overwrites a variable that is already set, so the first
/// file loaded wins over the second.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!("Loaded .env from current directory: {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => debug!("Failed to load ./.env: {}", e),
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if env_file.exists() {
            match dotenvy::from_path(&env_file) {
                Ok(()) => debug!("Loaded .env from {}", env_file.display()),
                Err(e) => debug!("Failed to load {}: {}", env_file.display(), e),
            }
        }
    }
}

/// Get the coffeehouse config directory path (~/.coffeehouse)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".coffeehouse"))
}
