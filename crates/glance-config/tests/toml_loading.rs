//! Integration tests for TOML and environment configuration loading.
//!
//! Uses `figment::Jail` for sandboxed env var and file manipulation.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use glance_config::GlanceConfig;
use glance_core::enums::LengthPreference;
use pretty_assertions::assert_eq;

fn figment_from(file: &str) -> Figment {
    Figment::from(Serialized::defaults(GlanceConfig::default()))
        .merge(Toml::file(file))
        .merge(Env::prefixed("GLANCE_").split("__"))
}

#[test]
fn loads_all_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[service]
base_url = "https://glance.example.com"
timeout_secs = 15

[session]
default_length = "long"
upload_on_stage = false
chat_fallback_answer = "Try again later."

[history]
limit = 25

[export]
filename = "summary.pdf"
"#,
        )?;

        let config: GlanceConfig = figment_from("config.toml").extract()?;

        assert_eq!(config.service.base_url, "https://glance.example.com");
        assert_eq!(config.service.timeout_secs, 15);
        assert_eq!(config.session.default_length, LengthPreference::Long);
        assert!(!config.session.upload_on_stage);
        assert_eq!(config.session.chat_fallback_answer, "Try again later.");
        assert_eq!(config.session.empty_answer_text, "No answer received.");
        assert_eq!(config.history.limit, 25);
        assert_eq!(config.export.filename, "summary.pdf");
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[service]
base_url = "https://from-toml.example.com"
"#,
        )?;
        jail.set_env("GLANCE_SERVICE__BASE_URL", "http://127.0.0.1:9000");
        jail.set_env("GLANCE_HISTORY__LIMIT", "3");

        let config: GlanceConfig = figment_from("config.toml").extract()?;

        assert_eq!(config.service.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.history.limit, 3);
        Ok(())
    });
}

#[test]
fn missing_sections_fall_back_to_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "")?;

        let config: GlanceConfig = figment_from("config.toml").extract()?;

        assert_eq!(config.service.base_url, "http://localhost:8000");
        assert_eq!(config.session.default_length, LengthPreference::Medium);
        assert_eq!(config.export.filename, "research_summary.pdf");
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up_by_load() {
    Jail::expect_with(|jail| {
        jail.create_dir(".paperglance")?;
        jail.create_file(
            ".paperglance/config.toml",
            r#"
[session]
default_length = "short"
"#,
        )?;

        let config = GlanceConfig::load().expect("config loads");
        assert_eq!(config.session.default_length, LengthPreference::Short);
        Ok(())
    });
}

#[test]
fn invalid_length_in_env_is_an_error() {
    Jail::expect_with(|jail| {
        jail.set_env("GLANCE_SESSION__DEFAULT_LENGTH", "enormous");
        assert!(GlanceConfig::load().is_err());
        Ok(())
    });
}
