use shoji_config::{shell_argv, Action};

use crate::core::{MonitorId, Session};
use crate::effect::{ActionResult, Effect};

/// Pure function: mutates session state and computes effects, performing
/// no side effects itself. Guarded mutations that reject (zero bitmasks,
/// out-of-range indices) come back as empty results, never errors.
pub fn process_action(session: &mut Session, action: &Action) -> ActionResult {
    match action {
        Action::Spawn { argv } => {
            if argv.is_empty() {
                tracing::warn!("Ignoring spawn with empty argument vector");
                return ActionResult::none();
            }
            ActionResult::with(vec![Effect::Spawn { argv: argv.clone() }])
        }
        Action::SpawnShell { command } => ActionResult::with(vec![Effect::Spawn {
            argv: shell_argv(command),
        }]),

        Action::View { tags } => arrange_and_refocus(session.view(*tags)),
        Action::ToggleView { tags } => arrange_and_refocus(session.toggle_view(*tags)),
        Action::Tag { tags } => arrange_and_refocus(session.set_window_tags(*tags)),
        Action::ToggleTag { tags } => arrange_and_refocus(session.toggle_window_tags(*tags)),

        Action::SetLayout { index } => arrange(session.set_layout(*index)),
        Action::CycleLayout { step } => arrange(Some(session.cycle_layout(*step))),
        Action::IncNMaster { delta } => arrange(Some(session.inc_nmaster(*delta))),
        Action::SetMFact { delta } => arrange(Some(session.set_mfact(*delta))),

        Action::FocusStack { step } => match session.focus_stack(*step) {
            Some(window) => ActionResult::with(vec![Effect::Focus { window }]),
            None => ActionResult::none(),
        },
        Action::Zoom => arrange(session.zoom()),
        Action::ToggleFloating => arrange(session.toggle_focused_floating()),
        Action::KillClient => match session.focused {
            Some(window) => ActionResult::with(vec![Effect::Close { window }]),
            None => ActionResult::none(),
        },

        Action::FocusMonitor { step } => match session.focus_monitor(*step) {
            Some((_, Some(window))) => ActionResult::with(vec![Effect::Focus { window }]),
            Some((_, None)) | None => ActionResult::none(),
        },
        Action::TagMonitor { step } => match session.send_to_monitor(*step) {
            Some((source, target)) => ActionResult::with(vec![
                Effect::Arrange { monitor: source },
                Effect::Arrange { monitor: target },
                Effect::FocusVisibleIfNeeded,
            ]),
            None => ActionResult::none(),
        },

        Action::Quit => ActionResult::with(vec![Effect::Quit]),
    }
}

fn arrange(monitor: Option<MonitorId>) -> ActionResult {
    match monitor {
        Some(monitor) => ActionResult::with(vec![Effect::Arrange { monitor }]),
        None => ActionResult::none(),
    }
}

fn arrange_and_refocus(monitor: Option<MonitorId>) -> ActionResult {
    match monitor {
        Some(monitor) => ActionResult::with(vec![
            Effect::Arrange { monitor },
            Effect::FocusVisibleIfNeeded,
        ]),
        None => ActionResult::none(),
    }
}
