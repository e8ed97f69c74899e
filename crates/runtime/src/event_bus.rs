use crate::frame::Frame;

/// What happened, for traceability of loads and pointer interaction.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EventKind {
    Loaded,
    LoadFailed,
    Hover,
    HoverCleared,
    Selected,
    FlashEnded,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Loaded => "loaded",
            EventKind::LoadFailed => "load_failed",
            EventKind::Hover => "hover",
            EventKind::HoverCleared => "hover_cleared",
            EventKind::Selected => "selected",
            EventKind::FlashEnded => "flash_ended",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub frame_index: u64,
    pub kind: EventKind,
    pub message: String,
}

/// Append-only event log, drained by the host (console, CLI output, tests).
#[derive(Debug, Default)]
pub struct EventBus {
    events: Vec<Event>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, frame: Frame, kind: EventKind, message: impl Into<String>) {
        self.events.push(Event {
            frame_index: frame.index,
            kind,
            message: message.into(),
        });
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}
