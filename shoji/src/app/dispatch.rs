use std::cell::RefCell;

use shoji_config::{Action, EventMessage};

use crate::config::Bindings;
use crate::core::Session;
use crate::effect::Effect;
use crate::platform::WindowHost;

use super::command::process_action;
use super::effects::execute_effects;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Handled,
    /// No binding matched; the event goes back to default handling.
    Forwarded,
    Quit,
}

/// Resolve one incoming event. Input events scan the applicable binding
/// table in declaration order and invoke at most one handler; lifecycle
/// events mutate the session directly.
pub fn dispatch_event<H: WindowHost>(
    event: &EventMessage,
    bindings: &Bindings,
    session: &RefCell<Session>,
    host: &mut H,
) -> Dispatch {
    match event {
        EventMessage::Key { modifiers, key } => {
            let binding = bindings
                .keys
                .iter()
                .find(|b| b.mods.matches(*modifiers) && b.key == *key);
            match binding {
                Some(binding) => {
                    tracing::debug!("Key {:?} matched: {:?}", key, binding.action);
                    run_action(&binding.action, session, host)
                }
                None => {
                    host.forward_event();
                    Dispatch::Forwarded
                }
            }
        }
        EventMessage::Button {
            context,
            modifiers,
            button,
        } => {
            let binding = bindings.buttons.iter().find(|b| {
                b.context == *context && b.mods.matches(*modifiers) && b.button == *button
            });
            match binding {
                Some(binding) => {
                    tracing::debug!("Button {:?} in {:?} matched: {:?}", button, context, binding.action);
                    run_action(&binding.action, session, host)
                }
                None => {
                    host.forward_event();
                    Dispatch::Forwarded
                }
            }
        }
        EventMessage::WindowCreated {
            id,
            class,
            instance,
            title,
            monitor,
        } => {
            let monitor = session
                .borrow_mut()
                .manage_window(*id, class, instance, title, *monitor);
            let mut effects = vec![Effect::Arrange { monitor }];
            if session.borrow().focused == Some(*id) {
                effects.push(Effect::Focus { window: *id });
            }
            execute_effects(effects, session, host);
            Dispatch::Handled
        }
        EventMessage::WindowDestroyed { id } => {
            let monitor = session.borrow_mut().unmanage_window(*id);
            if let Some(monitor) = monitor {
                execute_effects(
                    vec![Effect::Arrange { monitor }, Effect::FocusVisibleIfNeeded],
                    session,
                    host,
                );
            }
            Dispatch::Handled
        }
        EventMessage::FocusChanged { id } => {
            session.borrow_mut().set_focused(*id);
            Dispatch::Handled
        }
        EventMessage::MonitorsChanged { monitors } => {
            let affected = session.borrow_mut().set_monitors(monitors);
            let mut effects: Vec<Effect> = affected
                .into_iter()
                .map(|monitor| Effect::Arrange { monitor })
                .collect();
            effects.push(Effect::FocusVisibleIfNeeded);
            execute_effects(effects, session, host);
            Dispatch::Handled
        }
    }
}

fn run_action<H: WindowHost>(
    action: &Action,
    session: &RefCell<Session>,
    host: &mut H,
) -> Dispatch {
    let result = process_action(&mut session.borrow_mut(), action);
    if execute_effects(result.effects, session, host) {
        Dispatch::Quit
    } else {
        Dispatch::Handled
    }
}
