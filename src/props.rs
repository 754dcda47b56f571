use ratatui::style::Style;

pub const DEFAULT_ROW_HEIGHT: u16 = 1;
pub const DEFAULT_SCAFFOLD_BLOCK_WIDTH: u16 = 4;
pub const DEFAULT_SLIDE_REGION_SIZE: u16 = 2;

/// `Default` falls through to the theme, then the global default.
/// `Explicit` is kept verbatim, `0` included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overridable<T> {
    Default,
    Explicit(T),
}

impl<T> Default for Overridable<T> {
    fn default() -> Self {
        Self::Default
    }
}

impl<T> Overridable<T> {
    pub fn resolve(self, theme: Option<T>, fallback: T) -> T {
        match self {
            Self::Explicit(value) => value,
            Self::Default => theme.unwrap_or(fallback),
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }
}

impl<T> From<Option<T>> for Overridable<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Default, Self::Explicit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowDirection {
    #[default]
    Ltr,
    Rtl,
}

impl RowDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Ltr => Self::Rtl,
            Self::Rtl => Self::Ltr,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollAlignment {
    #[default]
    Auto,
    Start,
    Center,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListProps {
    pub overscan_row_count: Option<usize>,
    pub scroll_to_index: Option<usize>,
    pub scroll_to_alignment: Option<ScrollAlignment>,
}

impl ListProps {
    pub fn patch(self, other: ListProps) -> ListProps {
        ListProps {
            overscan_row_count: other.overscan_row_count.or(self.overscan_row_count),
            scroll_to_index: other.scroll_to_index.or(self.scroll_to_index),
            scroll_to_alignment: other.scroll_to_alignment.or(self.scroll_to_alignment),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeProps {
    pub style: Option<Style>,
    pub inner_style: Option<Style>,
    pub list_props: Option<ListProps>,
    pub row_height: Option<u16>,
    pub scaffold_block_width: Option<u16>,
    pub slide_region_size: Option<u16>,
}

/// Structural fields left as `None` keep the previous snapshot's value.
/// `class_name: Some(None)` clears it.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeProps<T> {
    pub tree_data: Option<Vec<T>>,
    pub class_name: Option<Option<String>>,
    pub row_direction: Option<RowDirection>,
    pub is_virtualized: Option<bool>,
    pub can_drag: Option<bool>,
    pub style: Option<Style>,
    pub inner_style: Option<Style>,
    pub list_props: Option<ListProps>,
    pub row_height: Overridable<u16>,
    pub scaffold_block_width: Overridable<u16>,
    pub slide_region_size: Overridable<u16>,
    pub theme: Option<ThemeProps>,
}

impl<T> Default for TreeProps<T> {
    fn default() -> Self {
        Self {
            tree_data: None,
            class_name: None,
            row_direction: None,
            is_virtualized: None,
            can_drag: None,
            style: None,
            inner_style: None,
            list_props: None,
            row_height: Overridable::Default,
            scaffold_block_width: Overridable::Default,
            slide_region_size: Overridable::Default,
            theme: None,
        }
    }
}

impl<T> TreeProps<T> {
    pub fn new(tree_data: Vec<T>) -> Self {
        Self {
            tree_data: Some(tree_data),
            ..Self::default()
        }
    }

    pub fn with_theme(mut self, theme: ThemeProps) -> Self {
        self.theme = Some(theme);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergedTheme {
    pub style: Style,
    pub inner_style: Style,
    pub list_props: ListProps,
    pub row_height: u16,
    pub scaffold_block_width: u16,
    pub slide_region_size: u16,
}

pub fn merge_theme<T>(props: &TreeProps<T>) -> MergedTheme {
    let theme = props.theme.as_ref();

    MergedTheme {
        style: overlay_style(theme.and_then(|t| t.style), props.style),
        inner_style: overlay_style(theme.and_then(|t| t.inner_style), props.inner_style),
        list_props: theme
            .and_then(|t| t.list_props)
            .unwrap_or_default()
            .patch(props.list_props.unwrap_or_default()),
        row_height: props
            .row_height
            .resolve(theme.and_then(|t| t.row_height), DEFAULT_ROW_HEIGHT),
        scaffold_block_width: props.scaffold_block_width.resolve(
            theme.and_then(|t| t.scaffold_block_width),
            DEFAULT_SCAFFOLD_BLOCK_WIDTH,
        ),
        slide_region_size: props.slide_region_size.resolve(
            theme.and_then(|t| t.slide_region_size),
            DEFAULT_SLIDE_REGION_SIZE,
        ),
    }
}

fn overlay_style(base: Option<Style>, top: Option<Style>) -> Style {
    base.unwrap_or_default().patch(top.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq)]
pub struct TreeSnapshot<T> {
    pub tree_data: Vec<T>,
    pub class_name: Option<String>,
    pub row_direction: RowDirection,
    pub is_virtualized: bool,
    pub can_drag: bool,
    pub style: Style,
    pub inner_style: Style,
    pub list_props: ListProps,
    pub row_height: u16,
    pub scaffold_block_width: u16,
    pub slide_region_size: u16,
    pub theme: Option<ThemeProps>,
}

impl<T> Default for TreeSnapshot<T> {
    fn default() -> Self {
        Self {
            tree_data: Vec::new(),
            class_name: None,
            row_direction: RowDirection::Ltr,
            is_virtualized: true,
            can_drag: true,
            style: Style::default(),
            inner_style: Style::default(),
            list_props: ListProps::default(),
            row_height: DEFAULT_ROW_HEIGHT,
            scaffold_block_width: DEFAULT_SCAFFOLD_BLOCK_WIDTH,
            slide_region_size: DEFAULT_SLIDE_REGION_SIZE,
            theme: None,
        }
    }
}

impl<T: Clone> TreeSnapshot<T> {
    /// Merged theme fields always win over both `previous` and `incoming`.
    pub fn next(previous: &TreeSnapshot<T>, incoming: TreeProps<T>) -> TreeSnapshot<T> {
        let merged = merge_theme(&incoming);

        TreeSnapshot {
            tree_data: incoming
                .tree_data
                .unwrap_or_else(|| previous.tree_data.clone()),
            class_name: incoming
                .class_name
                .unwrap_or_else(|| previous.class_name.clone()),
            row_direction: incoming.row_direction.unwrap_or(previous.row_direction),
            is_virtualized: incoming.is_virtualized.unwrap_or(previous.is_virtualized),
            can_drag: incoming.can_drag.unwrap_or(previous.can_drag),
            style: merged.style,
            inner_style: merged.inner_style,
            list_props: merged.list_props,
            row_height: merged.row_height,
            scaffold_block_width: merged.scaffold_block_width,
            slide_region_size: merged.slide_region_size,
            theme: incoming.theme.or_else(|| previous.theme.clone()),
        }
    }
}
