//! Headless inspection of a history file through the same scene code the web
//! viewer runs.

use std::fs;
use std::path::{Path, PathBuf};

use foundation::math::Vec2;
use foundation::time::Time;
use formats::{HistoricalEvent, HistoryLoadError, ingest_history, load_history_file};
use runtime::frame::Frame;
use scene::config::{ConfigError, RadiantConfig};
use scene::interaction::{Hover, TooltipContent};
use scene::radiant::Radiant;
use scene::severity::Severity;
use serde::Serialize;

#[derive(Debug)]
pub enum ToolError {
    ConfigIo {
        path: PathBuf,
        source: std::io::Error,
    },
    Config(ConfigError),
    History(HistoryLoadError),
    Serialize(serde_json::Error),
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToolError::ConfigIo { path, source } => {
                write!(f, "failed to read config {}: {source}", path.display())
            }
            ToolError::Config(e) => write!(f, "{e}"),
            ToolError::History(e) => write!(f, "{e}"),
            ToolError::Serialize(e) => write!(f, "failed to serialize layout: {e}"),
        }
    }
}

impl std::error::Error for ToolError {}

pub fn load_config(path: Option<&Path>) -> Result<RadiantConfig, ToolError> {
    let Some(path) = path else {
        return Ok(RadiantConfig::default());
    };
    let text = fs::read_to_string(path).map_err(|e| ToolError::ConfigIo {
        path: path.to_path_buf(),
        source: e,
    })?;
    RadiantConfig::from_json_str(&text).map_err(ToolError::Config)
}

pub fn load_events(path: &Path) -> Result<Vec<HistoricalEvent>, ToolError> {
    load_history_file(path).map_err(ToolError::History)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub qualifying: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

pub fn summarize(events: &[HistoricalEvent]) -> Summary {
    let mut summary = Summary {
        total: events.len(),
        ..Summary::default()
    };
    for event in events.iter().filter(|e| e.is_major()) {
        summary.qualifying += 1;
        match Severity::classify(event.score()) {
            Severity::High => summary.high += 1,
            Severity::Medium => summary.medium += 1,
            Severity::Low => summary.low += 1,
        }
    }
    summary
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutRow {
    pub index: u32,
    pub year: String,
    pub score: f64,
    pub severity: Severity,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Marker world positions in id order.
pub fn layout_rows(radiant: &Radiant) -> Vec<LayoutRow> {
    let world = radiant.world();
    world
        .marker_world_positions()
        .into_iter()
        .filter_map(|(id, p)| {
            let m = world.marker(id)?;
            Some(LayoutRow {
                index: id.index(),
                year: m.data.year.clone(),
                score: m.data.score,
                severity: m.severity,
                x: p.x,
                y: p.y,
                z: p.z,
            })
        })
        .collect()
}

/// `layout_rows` as pretty-printed JSON.
pub fn layout_json(radiant: &Radiant) -> Result<String, ToolError> {
    serde_json::to_string_pretty(&layout_rows(radiant)).map_err(ToolError::Serialize)
}

/// Builds a radiant for a `width × height` viewport and ingests `events`.
pub fn build_radiant(
    config: RadiantConfig,
    events: &[HistoricalEvent],
    width: f64,
    height: f64,
) -> Radiant {
    let mut radiant = Radiant::new(config, width, height);
    ingest_history(&mut radiant, events);
    radiant
}

/// Runs `frames` animation steps, then hovers at `ndc`.
pub fn pick_after_frames(radiant: &mut Radiant, ndc: Vec2, frames: u64) -> Option<TooltipContent> {
    for i in 0..frames {
        radiant.advance_frame(Time(i as f64 * Frame::DEFAULT_DT_S));
    }
    match radiant.pointer_move(ndc) {
        Hover::Marker { tooltip, .. } => Some(tooltip),
        Hover::Nothing => None,
    }
}
