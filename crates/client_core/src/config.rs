use std::{fs, path::Path};

use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "dashboard.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub server_url: String,
    pub ws_path: String,
    pub log_filter: String,
    pub training: bool,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            ws_path: "/ws".into(),
            log_filter: "info".into(),
            training: false,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    server_url: Option<String>,
    ws_path: Option<String>,
    log_filter: Option<String>,
    training: Option<bool>,
}

/// Defaults, then `dashboard.toml` (or `path`), then environment.
pub fn load_settings(path: Option<&Path>) -> ClientSettings {
    load_settings_with(path, |key| std::env::var(key).ok())
}

pub fn load_settings_with(
    path: Option<&Path>,
    lookup: impl Fn(&str) -> Option<String>,
) -> ClientSettings {
    let mut settings = ClientSettings::default();

    let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    if let Ok(raw) = fs::read_to_string(path) {
        apply_file_overrides(&mut settings, &raw);
    }

    apply_env_overrides(&mut settings, lookup);
    settings
}

pub fn apply_file_overrides(settings: &mut ClientSettings, raw: &str) {
    let file_cfg = match toml::from_str::<FileConfig>(raw) {
        Ok(file_cfg) => file_cfg,
        Err(err) => {
            tracing::warn!("ignoring unparseable dashboard config: {err}");
            return;
        }
    };

    if let Some(v) = file_cfg.server_url {
        settings.server_url = v;
    }
    if let Some(v) = file_cfg.ws_path {
        settings.ws_path = v;
    }
    if let Some(v) = file_cfg.log_filter {
        settings.log_filter = v;
    }
    if let Some(v) = file_cfg.training {
        settings.training = v;
    }
}

pub fn apply_env_overrides(
    settings: &mut ClientSettings,
    lookup: impl Fn(&str) -> Option<String>,
) {
    if let Some(v) = lookup("DASHBOARD_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = lookup("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = lookup("APP__WS_PATH") {
        settings.ws_path = v;
    }

    if let Some(v) = lookup("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    if let Some(v) = lookup("APP__TRAINING") {
        if let Some(parsed) = parse_flag(&v) {
            settings.training = parsed;
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        env,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::*;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn file_overrides_known_keys() {
        let mut settings = ClientSettings::default();
        apply_file_overrides(
            &mut settings,
            r#"
server_url = "https://sim.example:8443"
ws_path = "/events"
training = true
"#,
        );
        assert_eq!(settings.server_url, "https://sim.example:8443");
        assert_eq!(settings.ws_path, "/events");
        assert_eq!(settings.log_filter, "info");
        assert!(settings.training);
    }

    #[test]
    fn unparseable_file_keeps_defaults() {
        let mut settings = ClientSettings::default();
        apply_file_overrides(&mut settings, "server_url = ");
        assert_eq!(settings, ClientSettings::default());
    }

    #[test]
    fn app_prefixed_env_wins_over_plain_env() {
        let mut settings = ClientSettings::default();
        apply_env_overrides(
            &mut settings,
            env_from(&[
                ("DASHBOARD_SERVER_URL", "http://plain:1"),
                ("APP__SERVER_URL", "http://prefixed:2"),
                ("APP__LOG_FILTER", "debug"),
            ]),
        );
        assert_eq!(settings.server_url, "http://prefixed:2");
        assert_eq!(settings.log_filter, "debug");
    }

    #[test]
    fn bad_training_flag_is_ignored() {
        let mut settings = ClientSettings::default();
        apply_env_overrides(&mut settings, env_from(&[("APP__TRAINING", "maybe")]));
        assert!(!settings.training);

        apply_env_overrides(&mut settings, env_from(&[("APP__TRAINING", "ON")]));
        assert!(settings.training);
    }

    #[test]
    fn loads_settings_from_explicit_path() {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let path = env::temp_dir().join(format!("dashboard_config_test_{suffix}.toml"));
        fs::write(&path, "ws_path = \"/socket\"\n").expect("write config");

        let settings = load_settings_with(Some(&path), env_from(&[("APP__LOG_FILTER", "warn")]));
        assert_eq!(settings.ws_path, "/socket");
        assert_eq!(settings.log_filter, "warn");
        assert_eq!(settings.server_url, ClientSettings::default().server_url);

        fs::remove_file(path).expect("cleanup");
    }
}
