use crate::props::{ListProps, ThemeProps};
use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemePreset {
    #[default]
    Default,
    Compact,
    Roomy,
    Contrast,
}

impl ThemePreset {
    pub const ALL: [ThemePreset; 4] = [
        ThemePreset::Default,
        ThemePreset::Compact,
        ThemePreset::Roomy,
        ThemePreset::Contrast,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ThemePreset::Default => "default",
            ThemePreset::Compact => "compact",
            ThemePreset::Roomy => "roomy",
            ThemePreset::Contrast => "contrast",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(name))
    }

    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn props(self) -> ThemeProps {
        match self {
            ThemePreset::Default => ThemeProps::default(),
            ThemePreset::Compact => ThemeProps {
                inner_style: Some(Style::new().fg(Color::Gray)),
                row_height: Some(1),
                scaffold_block_width: Some(2),
                slide_region_size: Some(1),
                ..ThemeProps::default()
            },
            ThemePreset::Roomy => ThemeProps {
                style: Some(Style::new().fg(Color::White)),
                inner_style: Some(Style::new().fg(Color::LightCyan)),
                list_props: Some(ListProps {
                    overscan_row_count: Some(4),
                    ..ListProps::default()
                }),
                row_height: Some(2),
                scaffold_block_width: Some(6),
                slide_region_size: Some(3),
            },
            ThemePreset::Contrast => ThemeProps {
                style: Some(Style::new().fg(Color::White).bg(Color::Black)),
                inner_style: Some(
                    Style::new()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                ..ThemeProps::default()
            },
        }
    }
}
