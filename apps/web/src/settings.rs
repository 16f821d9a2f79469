use tracing::{info, warn};
use view_core::Settings;

/// Id of an optional `<script type="application/toml">` block carrying
/// page settings overrides.
pub const SETTINGS_ELEMENT_ID: &str = "portfolio-settings";

pub fn settings_from_embedded(raw: Option<&str>) -> Settings {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Settings::default();
    };

    match Settings::from_toml_str(raw) {
        Ok(settings) => {
            info!("using embedded page settings");
            settings
        }
        Err(err) => {
            warn!(error = %format!("{err:#}"), "embedded page settings rejected; using defaults");
            Settings::default()
        }
    }
}
