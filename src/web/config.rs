//! Front-end settings. Build-time values come from `option_env!`; a static
//! deployment may override them through a `window.LINKR_CONFIG` object without
//! rebuilding. Everything here ends up public in the bundle.

use crate::config::{parse_redirect_delay, Endpoints};
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: String,
    pub redirect_delay: Duration,
    pub endpoints: Endpoints,
}

/// Settings that `window.LINKR_CONFIG` may replace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Setting {
    ApiBaseUrl,
    RedirectDelay,
    HomeUrl,
    AccountUrl,
}

/// Runtime keys in the order they are applied.
const RUNTIME_KEYS: [(&str, Setting); 4] = [
    ("api_base_url", Setting::ApiBaseUrl),
    ("redirect_delay_ms", Setting::RedirectDelay),
    ("home_url", Setting::HomeUrl),
    ("account_url", Setting::AccountUrl),
];

impl AppConfig {
    #[must_use]
    pub fn load() -> Self {
        let mut config = Self::from_build_env();
        for (setting, value) in runtime_overrides() {
            config.apply(setting, &value);
        }
        config
    }

    fn from_build_env() -> Self {
        Self {
            api_base_url: option_env!("LINKR_API_BASE_URL")
                .unwrap_or_default()
                .to_string(),
            redirect_delay: parse_redirect_delay(option_env!("LINKR_REDIRECT_DELAY_MS")),
            endpoints: Endpoints::default(),
        }
    }

    /// Blank values leave the setting untouched.
    fn apply(&mut self, setting: Setting, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            return;
        }
        match setting {
            Setting::ApiBaseUrl => self.api_base_url = value.to_string(),
            Setting::RedirectDelay => self.redirect_delay = parse_redirect_delay(Some(value)),
            Setting::HomeUrl => self.endpoints.home = value.to_string(),
            Setting::AccountUrl => self.endpoints.account = value.to_string(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn runtime_overrides() -> Vec<(Setting, String)> {
    use js_sys::Reflect;
    use wasm_bindgen::JsValue;

    let Some(window) = web_sys::window() else {
        return Vec::new();
    };
    let object = match Reflect::get(&window, &JsValue::from_str("LINKR_CONFIG")) {
        Ok(value) if value.is_object() => value,
        _ => return Vec::new(),
    };

    overrides_from(|key| {
        let value = Reflect::get(&object, &JsValue::from_str(key)).ok()?;
        // Numbers are accepted for the delay.
        value
            .as_string()
            .or_else(|| value.as_f64().map(|number| number.to_string()))
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn runtime_overrides() -> Vec<(Setting, String)> {
    overrides_from(|_| None)
}

fn overrides_from(lookup: impl Fn(&str) -> Option<String>) -> Vec<(Setting, String)> {
    RUNTIME_KEYS
        .iter()
        .filter_map(|(key, setting)| lookup(key).map(|value| (*setting, value)))
        .collect()
}
