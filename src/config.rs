use crate::props::{ListProps, Overridable, TreeProps};
use crate::theme::ThemePreset;
use anyhow::{Context, Result};
use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown theme preset: {0}")]
    UnknownPreset(String),
    #[error("unknown color: {0}")]
    UnknownColor(String),
    #[error("unknown modifier: {0}")]
    UnknownModifier(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<String>,
}

impl StyleConfig {
    pub fn is_empty(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.modifiers.is_empty()
    }

    pub fn to_style(&self) -> std::result::Result<Option<Style>, ConfigError> {
        if self.is_empty() {
            return Ok(None);
        }

        let mut style = Style::new();
        if let Some(fg) = &self.fg {
            style = style.fg(parse_color(fg)?);
        }
        if let Some(bg) = &self.bg {
            style = style.bg(parse_color(bg)?);
        }
        for name in &self.modifiers {
            style = style.add_modifier(parse_modifier(name)?);
        }
        Ok(Some(style))
    }
}

fn parse_color(raw: &str) -> std::result::Result<Color, ConfigError> {
    Color::from_str(raw.trim()).map_err(|_| ConfigError::UnknownColor(raw.to_string()))
}

fn parse_modifier(raw: &str) -> std::result::Result<Modifier, ConfigError> {
    match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
        "bold" => Ok(Modifier::BOLD),
        "dim" => Ok(Modifier::DIM),
        "italic" => Ok(Modifier::ITALIC),
        "underlined" | "underline" => Ok(Modifier::UNDERLINED),
        "slow_blink" => Ok(Modifier::SLOW_BLINK),
        "rapid_blink" => Ok(Modifier::RAPID_BLINK),
        "reversed" => Ok(Modifier::REVERSED),
        "hidden" => Ok(Modifier::HIDDEN),
        "crossed_out" => Ok(Modifier::CROSSED_OUT),
        _ => Err(ConfigError::UnknownModifier(raw.to_string())),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub config_version: u32,
    pub theme: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_height: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scaffold_block_width: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slide_region_size: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overscan_row_count: Option<usize>,
    #[serde(skip_serializing_if = "StyleConfig::is_empty")]
    pub style: StyleConfig,
    #[serde(skip_serializing_if = "StyleConfig::is_empty")]
    pub inner_style: StyleConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_version: 1,
            theme: ThemePreset::Default.name().to_string(),
            row_height: None,
            scaffold_block_width: None,
            slide_region_size: None,
            overscan_row_count: None,
            style: StyleConfig::default(),
            inner_style: StyleConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load_or_default() -> Result<Self> {
        let path = config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        let parsed = toml::from_str::<AppConfig>(&raw)
            .with_context(|| format!("failed to parse config: {}", path.display()))?;

        Ok(parsed)
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        ensure_parent_dir(path)?;

        let body = toml::to_string_pretty(self).context("failed to serialize config")?;
        fs::write(path, body)
            .with_context(|| format!("failed to write config: {}", path.display()))?;

        Ok(())
    }

    pub fn preset(&self) -> std::result::Result<ThemePreset, ConfigError> {
        ThemePreset::from_name(&self.theme)
            .ok_or_else(|| ConfigError::UnknownPreset(self.theme.clone()))
    }

    /// Unset scalars stay on the `Default` marker.
    pub fn to_tree_props<T>(&self) -> std::result::Result<TreeProps<T>, ConfigError> {
        Ok(TreeProps {
            style: self.style.to_style()?,
            inner_style: self.inner_style.to_style()?,
            list_props: self.overscan_row_count.map(|count| ListProps {
                overscan_row_count: Some(count),
                ..ListProps::default()
            }),
            row_height: Overridable::from(self.row_height),
            scaffold_block_width: Overridable::from(self.scaffold_block_width),
            slide_region_size: Overridable::from(self.slide_region_size),
            theme: Some(self.preset()?.props()),
            ..TreeProps::default()
        })
    }
}

pub fn config_path() -> Result<PathBuf> {
    let base = dirs::config_dir().context("could not resolve config directory")?;
    Ok(base.join("apple-tree").join("config.toml"))
}

pub fn log_path() -> Result<PathBuf> {
    let base = dirs::state_dir()
        .or_else(dirs::cache_dir)
        .context("could not resolve state directory")?;
    Ok(base.join("apple-tree").join("apple-tree.log"))
}

pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn default_values_leave_everything_to_theme() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.config_version, 1);
        assert_eq!(cfg.preset(), Ok(ThemePreset::Default));

        let props = cfg.to_tree_props::<()>().expect("default config maps");
        assert!(props.row_height.is_default());
        assert_eq!(props.style, None);
        assert_eq!(props.list_props, None);
    }

    #[test]
    fn minimal_config_is_deserialized_with_defaults() {
        let raw = r#"
config_version = 1
theme = "roomy"
"#;

        let cfg = toml::from_str::<AppConfig>(raw).expect("parse minimal config");
        assert_eq!(cfg.preset(), Ok(ThemePreset::Roomy));
        assert_eq!(cfg.row_height, None);
        assert!(cfg.style.is_empty());
    }

    #[test]
    fn overrides_map_onto_tree_props() {
        let raw = r#"
theme = "compact"
row_height = 0
overscan_row_count = 8

[inner_style]
fg = "red"
modifiers = ["bold", "crossed-out"]
"#;

        let cfg = toml::from_str::<AppConfig>(raw).expect("parse config");
        let props = cfg.to_tree_props::<()>().expect("map config");

        assert_eq!(props.row_height, Overridable::Explicit(0));
        assert!(props.scaffold_block_width.is_default());
        assert_eq!(
            props.inner_style,
            Some(
                Style::new()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD | Modifier::CROSSED_OUT)
            )
        );
        assert_eq!(
            props.list_props.and_then(|l| l.overscan_row_count),
            Some(8)
        );
        assert_eq!(props.theme, Some(ThemePreset::Compact.props()));
    }

    #[test]
    fn unknown_names_are_reported() {
        let cfg = AppConfig {
            theme: "nope".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(
            cfg.to_tree_props::<()>().err(),
            Some(ConfigError::UnknownPreset("nope".to_string()))
        );

        let style = StyleConfig {
            modifiers: vec!["sparkly".to_string()],
            ..StyleConfig::default()
        };
        assert_eq!(
            style.to_style(),
            Err(ConfigError::UnknownModifier("sparkly".to_string()))
        );
    }

    #[test]
    fn save_then_load_preserves_overrides() {
        let path = std::env::temp_dir().join(format!(
            "apple_tree_cfg_{}_{}",
            std::process::id(),
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("time")
                .as_nanos()
        ));
        let file = path.join("config.toml");
        let cfg = AppConfig {
            theme: "contrast".to_string(),
            slide_region_size: Some(5),
            style: StyleConfig {
                fg: Some("white".to_string()),
                ..StyleConfig::default()
            },
            ..AppConfig::default()
        };

        cfg.save_to(&file).expect("save config");
        let loaded = AppConfig::load_from(&file).expect("load config");
        assert_eq!(loaded, cfg);

        let _ = fs::remove_dir_all(path);
    }
}
