use std::path::PathBuf;
use std::time::Duration;

pub const CONFIG_FILE_PATH: &str = "/config/configs.yaml";
pub const SECRETS_FILE_PATH: &str = "/config/secrets";

pub const BANNER: &str = "Java-args-env-file V4";

pub const IDLE_DURATION: Duration = Duration::from_secs(60);

// terminator excluded
pub const MAX_LINE_LEN: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTarget {
    pub label: String,
    pub path: PathBuf,
}

impl FileTarget {
    pub fn new(label: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub banner: String,
    pub files: Vec<FileTarget>,
    pub idle: Duration,
    pub max_line_len: usize,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            banner: BANNER.to_string(),
            files: vec![
                FileTarget::new("Config File", CONFIG_FILE_PATH),
                FileTarget::new("Secrets File", SECRETS_FILE_PATH),
            ],
            idle: IDLE_DURATION,
            max_line_len: MAX_LINE_LEN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_targets_fixed_paths_in_order() {
        let config = ProbeConfig::default();

        assert_eq!(
            config.files,
            vec![
                FileTarget::new("Config File", "/config/configs.yaml"),
                FileTarget::new("Secrets File", "/config/secrets"),
            ]
        );
        assert_eq!(config.idle, Duration::from_secs(60));
        assert_eq!(config.max_line_len, 10_485_760);
    }

    #[test]
    fn default_banner_is_fixed_literal() {
        assert_eq!(ProbeConfig::default().banner, "Java-args-env-file V4");
    }
}
