use serde::{Deserialize, Serialize};

use crate::{ClickContext, Modifiers, MouseButton};

/// Message from the window-system adapter to the core, one JSON object per
/// line on stdin.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventMessage {
    Key {
        #[serde(default)]
        modifiers: Modifiers,
        key: String,
    },
    Button {
        context: ClickContext,
        #[serde(default)]
        modifiers: Modifiers,
        button: MouseButton,
    },
    WindowCreated {
        id: u32,
        #[serde(default)]
        class: String,
        #[serde(default)]
        instance: String,
        #[serde(default)]
        title: String,
        #[serde(default)]
        monitor: Option<usize>,
    },
    WindowDestroyed {
        id: u32,
    },
    FocusChanged {
        id: Option<u32>,
    },
    MonitorsChanged {
        monitors: Vec<MonitorInfo>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonitorInfo {
    pub id: usize,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Instruction from the core back to the adapter, one JSON object per line
/// on stdout. `Forward` means the preceding input event matched no binding
/// and default handling should apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Instruction {
    ApplyGeometries {
        monitor: usize,
        geometries: Vec<WindowGeometry>,
    },
    FocusWindow {
        id: u32,
    },
    CloseWindow {
        id: u32,
    },
    Forward,
    Shutdown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowGeometry {
    pub id: u32,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}
