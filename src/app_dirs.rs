use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "guessnum";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// Best-records file under $HOME/.local/state/guessnum
    pub fn score_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join(APP_NAME);
            Some(state_dir.join("scores.json"))
        } else {
            ProjectDirs::from("", "", APP_NAME)
                .map(|proj_dirs| proj_dirs.data_local_dir().join("scores.json"))
        }
    }

    pub fn preferences_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|pd| pd.config_dir().join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_path_ends_with_file_name() {
        if let Some(path) = AppDirs::score_path() {
            assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("scores.json"));
        }
    }
}
