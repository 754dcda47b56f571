use apple_tree::common::{DEFAULT_ID_LENGTH, classnames, generate_unique_id, line_text};
use apple_tree::config::AppConfig;
use apple_tree::list::{insert_at, remove_at};
use apple_tree::props::{Overridable, TreeProps, TreeSnapshot};
use apple_tree::store::PropertyStore;
use apple_tree::theme::ThemePreset;
use apple_tree::widget::{TreeRow, TreeViewState};
use ratatui::text::Line;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};

const MAX_LOG_LINES: usize = 500;
const MAX_ROW_HEIGHT: u16 = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: String,
    pub title: String,
    pub depth: usize,
}

impl Node {
    pub fn new(title: &str, depth: usize) -> Self {
        Self {
            id: generate_unique_id(DEFAULT_ID_LENGTH),
            title: title.to_string(),
            depth,
        }
    }
}

impl TreeRow for Node {
    fn title(&self) -> Line<'_> {
        Line::from(self.title.as_str())
    }

    fn depth(&self) -> usize {
        self.depth
    }
}

pub fn sample_tree() -> Vec<Node> {
    vec![
        Node::new("apple-tree", 0),
        Node::new("src", 1),
        Node::new("lib.rs", 2),
        Node::new("props.rs", 2),
        Node::new("store.rs", 2),
        Node::new("list.rs", 2),
        Node::new("Cargo.toml", 1),
        Node::new("DESIGN.md", 1),
    ]
}

pub struct App {
    pub config: AppConfig,
    pub preset: ThemePreset,
    pub props: TreeProps<Node>,
    pub snapshot: Arc<TreeSnapshot<Node>>,
    pub view_state: TreeViewState,
    pub logs: Vec<String>,
    pub should_quit: bool,
    store: PropertyStore<Node>,
    snapshot_rx: watch::Receiver<Arc<TreeSnapshot<Node>>>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self::with_tree(config, sample_tree())
    }

    pub fn with_tree(config: AppConfig, nodes: Vec<Node>) -> Self {
        let store = PropertyStore::new();
        let snapshot_rx = store.subscribe();
        let mut logs = Vec::new();

        let (preset, props) = match (config.preset(), config.to_tree_props()) {
            (Ok(preset), Ok(props)) => (preset, props),
            (preset, props) => {
                let reason = preset
                    .err()
                    .or(props.err())
                    .map_or_else(String::new, |err| err.to_string());
                let message = format!("config ignored: {reason}");
                warn!("{message}");
                logs.push(message);
                let preset = ThemePreset::Default;
                (preset, TreeProps::default().with_theme(preset.props()))
            }
        };

        let mut app = Self {
            config,
            preset,
            props,
            snapshot: store.read(),
            view_state: TreeViewState::new(),
            logs,
            should_quit: false,
            store,
            snapshot_rx,
        };
        app.props.tree_data = Some(nodes);
        app.refresh_class_name();
        app.commit();
        app
    }

    pub fn nodes(&self) -> &[Node] {
        &self.snapshot.tree_data
    }

    pub fn selected_node(&self) -> Option<&Node> {
        self.nodes().get(self.view_state.selected)
    }

    pub fn commit(&mut self) {
        self.store.commit(&self.props);
        self.sync();
    }

    /// Returns `true` when a commit happened since the last call.
    pub fn sync(&mut self) -> bool {
        if !self.snapshot_rx.has_changed().unwrap_or(false) {
            return false;
        }
        self.snapshot = Arc::clone(&self.snapshot_rx.borrow_and_update());
        let len = self.snapshot.tree_data.len();
        self.view_state.select(self.view_state.selected, len);
        true
    }

    fn set_nodes(&mut self, nodes: Vec<Node>, selected: usize) {
        let len = nodes.len();
        self.props.tree_data = Some(nodes);
        self.commit();
        self.view_state.select(selected, len);
    }

    pub fn select_next(&mut self) {
        self.view_state.select_next(self.nodes().len());
    }

    pub fn select_previous(&mut self) {
        self.view_state.select_previous();
    }

    pub fn move_selected(&mut self, delta: isize) {
        let Some(node) = self.selected_node().cloned() else {
            return;
        };
        let from = self.view_state.selected as isize;
        let to = from + delta;

        let without = remove_at(self.nodes(), from);
        let moved = insert_at(&without, node.clone(), Some(to));
        let last = moved.len().saturating_sub(1);
        let landed = usize::try_from(to).map_or(0, |i| i.min(last));

        self.log(format!(
            "moved '{}' from {} to {}",
            line_text(&node.title()),
            from,
            landed
        ));
        self.set_nodes(moved, landed);
    }

    pub fn shift_depth(&mut self, delta: isize) {
        let Some(node) = self.selected_node().cloned() else {
            return;
        };
        let depth = node.depth.saturating_add_signed(delta);
        if depth == node.depth {
            return;
        }
        let index = self.view_state.selected as isize;
        let replaced = insert_at(
            &remove_at(self.nodes(), index),
            Node { depth, ..node },
            Some(index),
        );
        self.set_nodes(replaced, self.view_state.selected);
    }

    pub fn add_node(&mut self) {
        let depth = self.selected_node().map_or(0, |n| n.depth);
        let node = Node::new(&format!("node {}", self.nodes().len() + 1), depth);
        let at = if self.nodes().is_empty() {
            None
        } else {
            Some(self.view_state.selected as isize + 1)
        };
        self.log(format!("added '{}' ({})", node.title, node.id));
        let grown = insert_at(self.nodes(), node, at);
        let selected = at.map_or(0, |i| i as usize);
        self.set_nodes(grown, selected);
    }

    pub fn delete_selected(&mut self) {
        let Some(node) = self.selected_node().cloned() else {
            return;
        };
        let shrunk = remove_at(self.nodes(), self.view_state.selected as isize).into_owned();
        self.log(format!("deleted '{}'", node.title));
        self.set_nodes(shrunk, self.view_state.selected);
    }

    pub fn cycle_theme(&mut self) {
        self.preset = self.preset.next();
        self.config.theme = self.preset.name().to_string();
        self.props.theme = Some(self.preset.props());
        self.refresh_class_name();
        self.commit();
        self.log(format!(
            "theme {} (row height {})",
            self.preset.name(),
            self.snapshot.row_height
        ));
    }

    pub fn adjust_row_height(&mut self, delta: i16) {
        let height = self
            .snapshot
            .row_height
            .saturating_add_signed(delta)
            .min(MAX_ROW_HEIGHT);
        self.props.row_height = Overridable::Explicit(height);
        self.config.row_height = Some(height);
        self.commit();
        self.log(format!("row height set to {height}"));
    }

    pub fn reset_row_height(&mut self) {
        self.props.row_height = Overridable::Default;
        self.config.row_height = None;
        self.commit();
        self.log(format!("row height reset to {}", self.snapshot.row_height));
    }

    pub fn toggle_direction(&mut self) {
        let direction = self.snapshot.row_direction.flipped();
        self.props.row_direction = Some(direction);
        self.commit();
        self.log(format!("row direction {}", direction.label()));
    }

    fn refresh_class_name(&mut self) {
        let can_drag = self.props.can_drag.unwrap_or(self.snapshot.can_drag);
        self.props.class_name = Some(Some(classnames(&[
            Some("apple-tree"),
            Some(self.preset.name()),
            can_drag.then_some("draggable"),
        ])));
    }

    pub fn log(&mut self, line: String) {
        info!("{line}");
        self.logs.push(line);
        if self.logs.len() > MAX_LOG_LINES {
            let to_trim = self.logs.len() - MAX_LOG_LINES;
            self.logs.drain(0..to_trim);
        }
    }
}
