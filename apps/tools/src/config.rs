use std::{fs, io, path::Path, str::FromStr};

use anyhow::Context;
use tracing::warn;
use view_core::Settings;

pub const DEFAULT_CONFIG_PATH: &str = "portfolio.toml";
const ENV_PREFIX: &str = "PORTFOLIO__";

pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    let mut settings = match fs::read_to_string(path) {
        Ok(raw) => Settings::from_toml_str(&raw)
            .with_context(|| format!("invalid settings file '{}'", path.display()))?,
        Err(err) if err.kind() == io::ErrorKind::NotFound => Settings::default(),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read '{}'", path.display()))
        }
    };

    apply_env_overrides(&mut settings, std::env::vars())?;
    settings.validate()?;
    Ok(settings)
}

pub fn apply_env_overrides(
    settings: &mut Settings,
    vars: impl IntoIterator<Item = (String, String)>,
) -> anyhow::Result<()> {
    for (key, value) in vars {
        let Some(name) = key.strip_prefix(ENV_PREFIX) else {
            continue;
        };
        match name.to_ascii_lowercase().as_str() {
            "scroll_threshold_px" => settings.scroll_threshold_px = parse(&key, &value)?,
            "scroll_debounce_ms" => settings.scroll_debounce_ms = parse(&key, &value)?,
            "header_offset_px" => settings.header_offset_px = parse(&key, &value)?,
            "progress_stagger_ms" => settings.progress_stagger_ms = parse(&key, &value)?,
            "toast_enter_delay_ms" => settings.toast_enter_delay_ms = parse(&key, &value)?,
            "toast_display_ms" => settings.toast_display_ms = parse(&key, &value)?,
            "toast_exit_ms" => settings.toast_exit_ms = parse(&key, &value)?,
            "focus_delay_ms" => settings.focus_delay_ms = parse(&key, &value)?,
            "email__endpoint" => settings.email.endpoint = value,
            "email__service_id" => settings.email.service_id = value,
            "email__template_id" => settings.email.template_id = value,
            "email__public_key" => settings.email.public_key = value,
            "email__timeout_ms" => settings.email.timeout_ms = parse(&key, &value)?,
            _ => warn!(key = %key, "unknown settings override ignored"),
        }
    }
    Ok(())
}

fn parse<T>(key: &str, value: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse()
        .with_context(|| format!("{key} has an invalid value '{value}'"))
}

#[cfg(test)]
mod tests {
    use std::{
        env,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn env_overrides_scalars_and_nested_email_keys() {
        let mut settings = Settings::default();
        apply_env_overrides(
            &mut settings,
            vars(&[
                ("PORTFOLIO__HEADER_OFFSET_PX", "64"),
                ("PORTFOLIO__TOAST_DISPLAY_MS", " 2500 "),
                ("PORTFOLIO__EMAIL__SERVICE_ID", "service_staging"),
                ("PORTFOLIO__EMAIL__TIMEOUT_MS", "8000"),
                ("PATH", "/usr/bin"),
            ]),
        )
        .expect("overrides");

        assert_eq!(settings.header_offset_px, 64.0);
        assert_eq!(settings.toast_display_ms, 2500);
        assert_eq!(settings.email.service_id, "service_staging");
        assert_eq!(settings.email.timeout_ms, 8000);
        assert_eq!(settings.scroll_threshold_px, 20.0);
    }

    #[test]
    fn malformed_override_names_the_variable() {
        let mut settings = Settings::default();
        let err = apply_env_overrides(
            &mut settings,
            vars(&[("PORTFOLIO__SCROLL_DEBOUNCE_MS", "soon")]),
        )
        .expect_err("not a number");

        assert!(err.to_string().contains("PORTFOLIO__SCROLL_DEBOUNCE_MS"));
    }

    #[test]
    fn missing_file_means_defaults_and_bad_file_is_an_error() {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let root = env::temp_dir().join(format!("portfolio_tools_config_{suffix}"));
        fs::create_dir_all(&root).expect("temp root");

        let missing = root.join("absent.toml");
        let defaults = load_settings(&missing).expect("defaults");
        assert_eq!(defaults.toast_exit_ms, Settings::default().toast_exit_ms);

        let broken = root.join("broken.toml");
        fs::write(&broken, "toast_display_ms = 0\n").expect("write");
        let err = load_settings(&broken).expect_err("zero display time");
        assert!(format!("{err:#}").contains("broken.toml"));

        fs::remove_dir_all(root).expect("cleanup");
    }
}
