use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::WidgetColor;
use crate::data::aggregate::Metric;
use crate::data::model::Column;

// ---------------------------------------------------------------------------
// Chart widget definitions
// ---------------------------------------------------------------------------

/// How a widget draws its aggregated points. The data shape is the same for
/// every kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Area,
    Pie,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [ChartKind::Bar, ChartKind::Line, ChartKind::Area, ChartKind::Pie];
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChartKind::Bar => "Bar Chart",
            ChartKind::Line => "Line Chart",
            ChartKind::Area => "Area Chart",
            ChartKind::Pie => "Pie Chart",
        })
    }
}

/// What the builder form edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetDraft {
    pub title: String,
    pub kind: ChartKind,
    pub group_by: Column,
    pub metric: Metric,
    pub color: WidgetColor,
}

impl Default for WidgetDraft {
    fn default() -> Self {
        WidgetDraft {
            title: String::new(),
            kind: ChartKind::Bar,
            group_by: Column::Brand,
            metric: Metric::Defects,
            color: WidgetColor::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartWidget {
    pub id: u64,
    #[serde(flatten)]
    pub spec: WidgetDraft,
}

/// Ordered list of dashboard widgets.
#[derive(Debug, Clone, Default)]
pub struct WidgetBoard {
    widgets: Vec<ChartWidget>,
    next_id: u64,
}

impl WidgetBoard {
    pub fn widgets(&self) -> &[ChartWidget] {
        &self.widgets
    }

    /// Add a widget built from `draft`. A blank title becomes "New Chart".
    pub fn add(&mut self, mut draft: WidgetDraft) -> u64 {
        if draft.title.trim().is_empty() {
            draft.title = "New Chart".to_string();
        }
        self.next_id += 1;
        let id = self.next_id;
        log::info!(
            "Added widget {id} '{}' ({}, {} by {})",
            draft.title,
            draft.kind,
            draft.metric,
            draft.group_by
        );
        self.widgets.push(ChartWidget { id, spec: draft });
        id
    }

    pub fn remove(&mut self, id: u64) -> Option<ChartWidget> {
        let idx = self.widgets.iter().position(|w| w.id == id)?;
        log::info!("Removed widget {id}");
        Some(self.widgets.remove(idx))
    }
}
