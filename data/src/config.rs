//! Persisted application state: the spreadsheet server URL and the chosen
//! theme, written to a JSON file under the platform data directory.

use iced_core::{
    Color,
    theme::{Custom, Palette},
};
use serde::{Deserialize, Serialize};

use crate::{data_path, write_json_to_file, InternalError};

const STATE_FILE: &str = "dashboard_state.json";

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct WindowSpec {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowSpec {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 860.0,
        }
    }
}

#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct State {
    pub server_url: String,
    pub theme: Theme,
    pub window: WindowSpec,
}

impl Default for State {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            theme: Theme::default(),
            window: WindowSpec::default(),
        }
    }
}

impl State {
    pub fn load() -> Self {
        let path = data_path(Some(STATE_FILE));

        match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                log::error!("Failed to parse saved state, using defaults: {e}");
                State::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => State::default(),
            Err(e) => {
                log::error!("Failed to read saved state, using defaults: {e}");
                State::default()
            }
        }
    }

    pub fn save(&self) -> Result<(), InternalError> {
        let path = data_path(Some(STATE_FILE));

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| InternalError::Persistence(format!("Failed to serialize state: {e}")))?;

        write_json_to_file(&json, &path)
            .map_err(|e| InternalError::Persistence(format!("Failed to write state: {e}")))
    }
}

#[derive(Debug, Clone)]
pub struct Theme(pub iced_core::Theme);

impl Default for Theme {
    fn default() -> Self {
        Self(iced_core::Theme::Custom(custom_theme().into()))
    }
}

impl From<Theme> for iced_core::Theme {
    fn from(val: Theme) -> Self {
        val.0
    }
}

pub fn custom_theme() -> Custom {
    Custom::new(
        "Trastboard".to_string(),
        Palette {
            background: Color::from_rgb8(244, 246, 251),
            text: Color::from_rgb8(31, 41, 55),
            primary: Color::from_rgb8(37, 99, 235),
            success: Color::from_rgb8(22, 163, 74),
            danger: Color::from_rgb8(220, 38, 38),
        },
    )
}

impl Serialize for Theme {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let theme_str = match self.0 {
            iced_core::Theme::Ferra => "ferra",
            iced_core::Theme::Dark => "dark",
            iced_core::Theme::Light => "light",
            iced_core::Theme::Nord => "nord",
            iced_core::Theme::SolarizedLight => "solarized_light",
            iced_core::Theme::SolarizedDark => "solarized_dark",
            iced_core::Theme::GruvboxLight => "gruvbox_light",
            iced_core::Theme::GruvboxDark => "gruvbox_dark",
            iced_core::Theme::TokyoNight => "tokyo_night",
            iced_core::Theme::TokyoNightLight => "tokyo_night_light",
            iced_core::Theme::KanagawaWave => "kanagawa_wave",
            iced_core::Theme::KanagawaLotus => "kanagawa_lotus",
            _ => "trastboard",
        };
        theme_str.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Theme {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let theme_str = String::deserialize(deserializer)?;
        let theme = match theme_str.as_str() {
            "ferra" => iced_core::Theme::Ferra,
            "dark" => iced_core::Theme::Dark,
            "light" => iced_core::Theme::Light,
            "nord" => iced_core::Theme::Nord,
            "solarized_light" => iced_core::Theme::SolarizedLight,
            "solarized_dark" => iced_core::Theme::SolarizedDark,
            "gruvbox_light" => iced_core::Theme::GruvboxLight,
            "gruvbox_dark" => iced_core::Theme::GruvboxDark,
            "tokyo_night" => iced_core::Theme::TokyoNight,
            "tokyo_night_light" => iced_core::Theme::TokyoNightLight,
            "kanagawa_wave" => iced_core::Theme::KanagawaWave,
            "kanagawa_lotus" => iced_core::Theme::KanagawaLotus,
            "trastboard" => Theme::default().0,
            _ => return Err(serde::de::Error::custom("Invalid theme")),
        };
        Ok(Theme(theme))
    }
}
