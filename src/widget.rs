use crate::props::{RowDirection, ScrollAlignment, TreeSnapshot};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::Line;
use ratatui::widgets::{Block, StatefulWidget, Widget};
use std::ops::Range;

const GUIDE: &str = "│";

pub trait TreeRow {
    fn title(&self) -> Line<'_>;
    fn depth(&self) -> usize;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TreeViewState {
    pub selected: usize,
    pub offset: usize,
    scrolled_to: Option<usize>,
}

impl TreeViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, index: usize, len: usize) {
        self.selected = index.min(len.saturating_sub(1));
    }

    pub fn select_next(&mut self, len: usize) {
        self.select(self.selected.saturating_add(1), len);
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Keeps the selection at least `margin` rows from either edge.
    pub fn scroll_into_view(&mut self, len: usize, visible: usize, margin: usize) {
        if len == 0 || visible == 0 {
            self.offset = 0;
            return;
        }
        self.select(self.selected, len);

        let margin = margin.min(visible.saturating_sub(1) / 2);
        if self.selected < self.offset + margin {
            self.offset = self.selected.saturating_sub(margin);
        } else if self.selected + margin >= self.offset + visible {
            self.offset = self.selected + margin + 1 - visible;
        }
        self.offset = self.offset.min(len.saturating_sub(visible));
    }

    pub fn apply_scroll_to(
        &mut self,
        index: Option<usize>,
        alignment: Option<ScrollAlignment>,
        len: usize,
        visible: usize,
    ) -> bool {
        let Some(index) = index.filter(|i| *i < len) else {
            return false;
        };
        if self.scrolled_to == Some(index) {
            return false;
        }
        self.scrolled_to = Some(index);
        self.selected = index;

        let max_offset = len.saturating_sub(visible);
        self.offset = match alignment.unwrap_or_default() {
            ScrollAlignment::Auto => return true,
            ScrollAlignment::Start => index,
            ScrollAlignment::Center => index.saturating_sub(visible / 2),
            ScrollAlignment::End => (index + 1).saturating_sub(visible),
        }
        .min(max_offset);
        true
    }
}

pub fn render_range<T>(
    snapshot: &TreeSnapshot<T>,
    offset: usize,
    visible: usize,
) -> Range<usize> {
    let len = snapshot.tree_data.len();
    if !snapshot.is_virtualized {
        return 0..len;
    }
    let overscan = snapshot.list_props.overscan_row_count.unwrap_or(0);
    let start = offset.saturating_sub(overscan).min(len);
    let end = offset.saturating_add(visible).saturating_add(overscan).min(len);
    start..end
}

pub struct TreeView<'a, T> {
    snapshot: &'a TreeSnapshot<T>,
    block: Option<Block<'a>>,
    highlight: Modifier,
}

impl<'a, T: TreeRow> TreeView<'a, T> {
    pub fn new(snapshot: &'a TreeSnapshot<T>) -> Self {
        Self {
            snapshot,
            block: None,
            highlight: Modifier::REVERSED,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    pub fn highlight_modifier(mut self, modifier: Modifier) -> Self {
        self.highlight = modifier;
        self
    }

    fn render_row(&self, row: &T, selected: bool, area: Rect, buf: &mut Buffer) {
        let snapshot = self.snapshot;
        let mut style = snapshot.inner_style;
        if selected {
            style = style.add_modifier(self.highlight);
        }
        buf.set_style(area, style);

        let step = snapshot.scaffold_block_width;
        let depth = u16::try_from(row.depth()).unwrap_or(u16::MAX);
        let indent = depth.saturating_mul(step).min(area.width);
        let title = row.title();
        let width = area.width - indent;

        match snapshot.row_direction {
            RowDirection::Ltr => {
                if step > 0 {
                    for level in 0..depth {
                        let x = level.saturating_mul(step);
                        if x >= indent {
                            break;
                        }
                        buf.set_string(area.x + x, area.y, GUIDE, style);
                    }
                }
                buf.set_line(area.x + indent, area.y, &title, width);
            }
            RowDirection::Rtl => {
                let title_width = u16::try_from(title.width()).unwrap_or(u16::MAX).min(width);
                let x = area.right() - indent - title_width;
                buf.set_line(x, area.y, &title, title_width);
                if step > 0 {
                    for level in 0..depth {
                        let from_right = level.saturating_mul(step);
                        if from_right >= indent {
                            break;
                        }
                        buf.set_string(area.right() - 1 - from_right, area.y, GUIDE, style);
                    }
                }
            }
        }
    }
}

impl<T: TreeRow> StatefulWidget for TreeView<'_, T> {
    type State = TreeViewState;

    fn render(mut self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let snapshot = self.snapshot;
        buf.set_style(area, snapshot.style);

        let inner = match self.block.take() {
            Some(block) => {
                let inner = block.inner(area);
                block.style(snapshot.style).render(area, buf);
                inner
            }
            None => area,
        };
        if inner.is_empty() {
            return;
        }

        let row_height = snapshot.row_height.max(1);
        let visible = usize::from(inner.height / row_height);
        let len = snapshot.tree_data.len();

        let list = snapshot.list_props;
        if !state.apply_scroll_to(list.scroll_to_index, list.scroll_to_alignment, len, visible)
            || list.scroll_to_alignment.unwrap_or_default() == ScrollAlignment::Auto
        {
            state.scroll_into_view(len, visible, usize::from(snapshot.slide_region_size));
        }

        for index in render_range(snapshot, state.offset, visible) {
            let Some(slot) = index.checked_sub(state.offset).filter(|s| *s < visible) else {
                continue;
            };
            let y = inner.y + slot as u16 * row_height;
            let row_area = Rect::new(inner.x, y, inner.width, row_height);
            self.render_row(
                &snapshot.tree_data[index],
                index == state.selected,
                row_area,
                buf,
            );
        }
    }
}

impl<T: TreeRow> Widget for TreeView<'_, T> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut state = TreeViewState::default();
        StatefulWidget::render(self, area, buf, &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::ListProps;
    use pretty_assertions::assert_eq;

    struct Row(&'static str, usize);

    impl TreeRow for Row {
        fn title(&self) -> Line<'_> {
            Line::from(self.0)
        }

        fn depth(&self) -> usize {
            self.1
        }
    }

    fn snapshot(rows: Vec<Row>) -> TreeSnapshot<Row> {
        TreeSnapshot {
            tree_data: rows,
            scaffold_block_width: 2,
            ..TreeSnapshot::default()
        }
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol())
            .collect::<String>()
    }

    #[test]
    fn rows_are_indented_by_depth_with_guides() {
        let snap = snapshot(vec![Row("root", 0), Row("leaf", 1), Row("deep", 2)]);
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 3));

        Widget::render(TreeView::new(&snap), buf.area, &mut buf);

        assert_eq!(row_text(&buf, 0), "root      ");
        assert_eq!(row_text(&buf, 1), "│ leaf    ");
        assert_eq!(row_text(&buf, 2), "│ │ deep  ");
    }

    #[test]
    fn row_height_spaces_rows_apart() {
        let mut snap = snapshot(vec![Row("a", 0), Row("b", 0)]);
        snap.row_height = 2;
        let mut buf = Buffer::empty(Rect::new(0, 0, 4, 4));

        Widget::render(TreeView::new(&snap), buf.area, &mut buf);

        assert_eq!(row_text(&buf, 0), "a   ");
        assert_eq!(row_text(&buf, 1), "    ");
        assert_eq!(row_text(&buf, 2), "b   ");
    }

    #[test]
    fn rtl_rows_are_right_aligned() {
        let mut snap = snapshot(vec![Row("ab", 0), Row("cd", 1)]);
        snap.row_direction = RowDirection::Rtl;
        let mut buf = Buffer::empty(Rect::new(0, 0, 6, 2));

        Widget::render(TreeView::new(&snap), buf.area, &mut buf);

        assert_eq!(row_text(&buf, 0), "    ab");
        assert_eq!(row_text(&buf, 1), "  cd │");
    }

    #[test]
    fn selected_row_gets_highlight_modifier() {
        let snap = snapshot(vec![Row("a", 0), Row("b", 0)]);
        let mut buf = Buffer::empty(Rect::new(0, 0, 3, 2));
        let mut state = TreeViewState::new();
        state.select(1, 2);

        StatefulWidget::render(TreeView::new(&snap), buf.area, &mut buf, &mut state);

        assert!(buf[(0, 1)].modifier.contains(Modifier::REVERSED));
        assert!(!buf[(0, 0)].modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn slide_region_keeps_selection_away_from_the_edge() {
        let mut state = TreeViewState::new();
        state.select(5, 20);
        state.scroll_into_view(20, 6, 2);
        assert_eq!(state.offset, 2);

        state.select(1, 20);
        state.scroll_into_view(20, 6, 2);
        assert_eq!(state.offset, 0);

        state.select(19, 20);
        state.scroll_into_view(20, 6, 2);
        assert_eq!(state.offset, 14);
    }

    #[test]
    fn oversized_slide_region_is_capped_to_half_the_viewport() {
        let mut state = TreeViewState::new();
        state.select(4, 10);
        state.scroll_into_view(10, 3, 50);
        assert_eq!(state.offset, 3);
    }

    #[test]
    fn scroll_to_index_applies_once() {
        let mut state = TreeViewState::new();
        assert!(state.apply_scroll_to(Some(8), Some(ScrollAlignment::Start), 20, 5));
        assert_eq!((state.selected, state.offset), (8, 8));

        state.select(3, 20);
        assert!(!state.apply_scroll_to(Some(8), Some(ScrollAlignment::Start), 20, 5));
        assert_eq!(state.selected, 3);

        assert!(!state.apply_scroll_to(Some(99), None, 20, 5));
    }

    #[test]
    fn scroll_alignment_places_target_in_viewport() {
        let cases = [
            (ScrollAlignment::Start, 10, 10),
            (ScrollAlignment::Center, 10, 8),
            (ScrollAlignment::End, 10, 6),
            (ScrollAlignment::End, 2, 0),
            (ScrollAlignment::Start, 18, 15),
            (ScrollAlignment::Center, 19, 15),
        ];
        for (alignment, index, offset) in cases {
            let mut state = TreeViewState::new();
            assert!(state.apply_scroll_to(Some(index), Some(alignment), 20, 5));
            assert_eq!(
                (state.selected, state.offset),
                (index, offset),
                "{alignment:?} to {index}"
            );
        }
    }

    #[test]
    fn auto_alignment_only_selects_the_target() {
        let mut state = TreeViewState::new();
        assert!(state.apply_scroll_to(Some(12), Some(ScrollAlignment::Auto), 20, 5));
        assert_eq!((state.selected, state.offset), (12, 0));

        let mut state = TreeViewState::new();
        assert!(state.apply_scroll_to(Some(12), None, 20, 5));
        assert_eq!((state.selected, state.offset), (12, 0));
    }

    #[test]
    fn render_with_auto_alignment_falls_back_to_slide_region() {
        let mut snap = snapshot((0..20).map(|_| Row("x", 0)).collect());
        snap.list_props = ListProps {
            scroll_to_index: Some(12),
            scroll_to_alignment: Some(ScrollAlignment::Auto),
            ..ListProps::default()
        };
        let mut buf = Buffer::empty(Rect::new(0, 0, 3, 5));
        let mut state = TreeViewState::new();

        StatefulWidget::render(TreeView::new(&snap), buf.area, &mut buf, &mut state);

        assert_eq!((state.selected, state.offset), (12, 10));
        assert!(buf[(0, 2)].modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn render_with_end_alignment_keeps_the_aligned_offset() {
        let mut snap = snapshot((0..20).map(|_| Row("x", 0)).collect());
        snap.list_props = ListProps {
            scroll_to_index: Some(12),
            scroll_to_alignment: Some(ScrollAlignment::End),
            ..ListProps::default()
        };
        let mut buf = Buffer::empty(Rect::new(0, 0, 3, 5));
        let mut state = TreeViewState::new();

        StatefulWidget::render(TreeView::new(&snap), buf.area, &mut buf, &mut state);

        assert_eq!((state.selected, state.offset), (12, 8));
        assert!(buf[(0, 4)].modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn custom_highlight_modifier_replaces_reversed() {
        let snap = snapshot(vec![Row("a", 0)]);
        let mut buf = Buffer::empty(Rect::new(0, 0, 3, 1));
        let mut state = TreeViewState::new();

        StatefulWidget::render(
            TreeView::new(&snap).highlight_modifier(Modifier::BOLD),
            buf.area,
            &mut buf,
            &mut state,
        );

        assert!(buf[(0, 0)].modifier.contains(Modifier::BOLD));
        assert!(!buf[(0, 0)].modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn render_range_adds_overscan_only_when_virtualized() {
        let mut snap = snapshot((0..30).map(|_| Row("x", 0)).collect());
        snap.list_props = ListProps {
            overscan_row_count: Some(3),
            ..ListProps::default()
        };
        assert_eq!(render_range(&snap, 10, 5), 7..18);
        assert_eq!(render_range(&snap, 0, 5), 0..8);
        assert_eq!(render_range(&snap, 28, 5), 25..30);

        snap.is_virtualized = false;
        assert_eq!(render_range(&snap, 10, 5), 0..30);
    }
}
