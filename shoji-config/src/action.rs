use serde::{Deserialize, Serialize};

/// The command set a binding can invoke. Each variant carries exactly the
/// argument its handler consumes, so handlers match exhaustively and can
/// never misread another variant's payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    // External commands
    Spawn { argv: Vec<String> },
    SpawnShell { command: String },

    // Tag operations (a zero mask in View means "previously viewed set")
    View { tags: u32 },
    ToggleView { tags: u32 },
    Tag { tags: u32 },
    ToggleTag { tags: u32 },

    // Layout operations
    SetLayout {
        #[serde(default)]
        index: Option<usize>,
    },
    CycleLayout { step: i32 },
    #[serde(rename = "inc_nmaster")]
    IncNMaster { delta: i32 },
    #[serde(rename = "set_mfact")]
    SetMFact { delta: f64 },

    // Window operations
    FocusStack { step: i32 },
    Zoom,
    ToggleFloating,
    KillClient,

    // Monitor operations
    FocusMonitor { step: i32 },
    TagMonitor { step: i32 },

    // Control
    Quit,
}

/// The UI region a pointer event originated in. Used to disambiguate
/// pointer bindings; the regions themselves are drawn elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickContext {
    TagBar,
    LayoutSymbol,
    StatusText,
    WindowTitle,
    ClientWindow,
    RootWindow,
}

/// Argument vector for a shell-syntax command: no shell interpretation
/// happens in the core, the shell itself does the word splitting.
pub fn shell_argv(command: &str) -> Vec<String> {
    vec![
        "/bin/sh".to_string(),
        "-c".to_string(),
        command.to_string(),
    ]
}
