pub mod action;
pub mod keys;
pub mod schema;
pub mod wire;

pub use action::{shell_argv, Action, ClickContext};
pub use keys::{
    format_key_spec, parse_button_spec, parse_key_spec, parse_modifiers, ModMatch, Modifiers,
    MouseButton,
};
pub use schema::{ButtonSpec, ConfigFile, KeySpec, LayoutSpec, RuleSpec, Settings, TagKeys};
pub use wire::{EventMessage, Instruction, MonitorInfo, WindowGeometry};
