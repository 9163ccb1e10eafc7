use std::cell::RefCell;

use crate::core::Session;
use crate::effect::Effect;
use crate::platform::WindowHost;

/// Execute side effects against the window host. Returns true when a Quit
/// effect was executed.
pub fn execute_effects<H: WindowHost>(
    effects: Vec<Effect>,
    session: &RefCell<Session>,
    host: &mut H,
) -> bool {
    let mut quit = false;
    for effect in effects {
        match effect {
            Effect::Arrange { monitor } => {
                // None means the current layout is floating: skip the
                // arrange step entirely, windows keep their geometry.
                let geometries = session.borrow().arrange_geometries(monitor);
                if let Some(geometries) = geometries {
                    session.borrow_mut().record_geometries(&geometries);
                    host.apply_geometries(monitor, geometries);
                }
            }
            Effect::Focus { window } => {
                session.borrow_mut().set_focused(Some(window));
                host.focus_window(window);
            }
            Effect::FocusVisibleIfNeeded => {
                if let Some(window) = session.borrow_mut().refocus_if_hidden() {
                    host.focus_window(window);
                }
            }
            Effect::Close { window } => {
                host.close_window(window);
            }
            Effect::Spawn { argv } => {
                host.spawn_command(&argv);
            }
            Effect::Quit => {
                host.shutdown();
                quit = true;
            }
        }
    }
    quit
}
