//! Sidebar drawing surface.
//!
//! `SidebarSurface` is the slice of the page DOM the sidebar touches: one
//! fixed-position container with a section per list, plus a marker class on
//! the document body. `RecordingSurface` keeps the same structure in memory
//! for headless hosts and tests.

use crate::types::history::ListKind;
use crate::types::search::SearchRecord;

/// Body class that reserves layout space for the sidebar.
pub const BODY_MARKER_CLASS: &str = "show-history";

/// One interactive row: a link to the search plus its action icons.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryRow {
    pub list: ListKind,
    /// Link text, e.g. `JFK-LAX (Economy)`; also used as the tooltip.
    pub label: String,
    pub href: String,
    /// Identity the row's actions refer back to.
    pub record: SearchRecord,
    /// Pin icon, only offered in the history section.
    pub pin_title: Option<String>,
    pub remove_title: String,
}

pub trait SidebarSurface {
    /// Adds the container to the page, hidden.
    fn attach_container(&mut self);
    fn set_container_visible(&mut self, visible: bool);
    fn detach_container(&mut self);
    fn set_body_marker(&mut self, present: bool);
    /// Empties a section, creating it at the end of the container if needed.
    fn clear_section(&mut self, list: ListKind);
    fn append_heading(&mut self, list: ListKind, title: &str);
    fn append_time_label(&mut self, list: ListKind, label: &str);
    fn append_row(&mut self, list: ListKind, row: EntryRow);
}

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceNode {
    Heading(String),
    TimeLabel(String),
    Row(EntryRow),
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    attached: bool,
    visible: bool,
    body_marker: bool,
    sections: Vec<(ListKind, Vec<SurfaceNode>)>,
    appended: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn is_visible(&self) -> bool {
        self.attached && self.visible
    }

    pub fn has_body_marker(&self) -> bool {
        self.body_marker
    }

    /// Total nodes appended over the surface's lifetime.
    pub fn appended_count(&self) -> usize {
        self.appended
    }

    /// Sections in the order they were first created.
    pub fn section_order(&self) -> Vec<ListKind> {
        self.sections.iter().map(|(list, _)| *list).collect()
    }

    pub fn nodes(&self, list: ListKind) -> &[SurfaceNode] {
        self.sections
            .iter()
            .find(|(kind, _)| *kind == list)
            .map(|(_, nodes)| nodes.as_slice())
            .unwrap_or(&[])
    }

    pub fn rows(&self, list: ListKind) -> Vec<&EntryRow> {
        self.nodes(list)
            .iter()
            .filter_map(|node| match node {
                SurfaceNode::Row(row) => Some(row),
                _ => None,
            })
            .collect()
    }

    pub fn time_labels(&self, list: ListKind) -> Vec<&str> {
        self.nodes(list)
            .iter()
            .filter_map(|node| match node {
                SurfaceNode::TimeLabel(label) => Some(label.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Plain-text dump of the container, one node per line.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        if self.body_marker {
            out.push_str(&format!("<body.{}>\n", BODY_MARKER_CLASS));
        }
        for (list, nodes) in &self.sections {
            out.push_str(&format!("#{}\n", list.section_id()));
            for node in nodes {
                let line = match node {
                    SurfaceNode::Heading(title) => format!("{}\n", title),
                    SurfaceNode::TimeLabel(label) => format!("  {}\n", label),
                    SurfaceNode::Row(row) => {
                        let pin = if row.pin_title.is_some() { "*" } else { " " };
                        format!("   {} {}  -> {}\n", pin, row.label, row.href)
                    }
                };
                out.push_str(&line);
            }
        }
        out
    }

    fn section_mut(&mut self, list: ListKind) -> &mut Vec<SurfaceNode> {
        let index = match self.sections.iter().position(|(kind, _)| *kind == list) {
            Some(index) => index,
            None => {
                self.sections.push((list, Vec::new()));
                self.sections.len() - 1
            }
        };
        &mut self.sections[index].1
    }

    fn push(&mut self, list: ListKind, node: SurfaceNode) {
        self.section_mut(list).push(node);
        self.appended += 1;
    }
}

impl SidebarSurface for RecordingSurface {
    fn attach_container(&mut self) {
        self.attached = true;
        self.visible = false;
    }

    fn set_container_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn detach_container(&mut self) {
        self.attached = false;
        self.visible = false;
        self.sections.clear();
    }

    fn set_body_marker(&mut self, present: bool) {
        self.body_marker = present;
    }

    fn clear_section(&mut self, list: ListKind) {
        self.section_mut(list).clear();
    }

    fn append_heading(&mut self, list: ListKind, title: &str) {
        self.push(list, SurfaceNode::Heading(title.to_string()));
    }

    fn append_time_label(&mut self, list: ListKind, label: &str) {
        self.push(list, SurfaceNode::TimeLabel(label.to_string()));
    }

    fn append_row(&mut self, list: ListKind, row: EntryRow) {
        self.push(list, SurfaceNode::Row(row));
    }
}
