use crate::core::{MonitorId, WindowId};

use super::Session;

pub fn set_focused(session: &mut Session, id: Option<WindowId>) {
    if session.focused != id {
        tracing::info!("Focus changed: {:?} -> {:?}", session.focused, id);
        session.focused = id;
    }
    if let Some(id) = id {
        if let Some(window) = session.windows.get(&id) {
            session.focused_monitor = window.monitor;
        }
    }
}

fn visible_stack(session: &Session, monitor_id: MonitorId) -> Vec<WindowId> {
    let Some(monitor) = session.monitor(monitor_id) else {
        return vec![];
    };
    monitor
        .stack
        .iter()
        .filter(|id| {
            session
                .windows
                .get(*id)
                .map(|w| w.visible_on(monitor.visible_tags))
                .unwrap_or(false)
        })
        .copied()
        .collect()
}

pub fn first_visible(session: &Session, monitor_id: MonitorId) -> Option<WindowId> {
    visible_stack(session, monitor_id).first().copied()
}

/// Cycle focus through the focused monitor's visible windows in stacking
/// order, wrapping in both directions.
pub fn focus_stack(session: &mut Session, step: i32) -> Option<WindowId> {
    let visible = visible_stack(session, session.focused_monitor);
    if visible.is_empty() {
        return None;
    }

    let next = match session
        .focused
        .and_then(|f| visible.iter().position(|&id| id == f))
    {
        Some(current) => (current as i32 + step).rem_euclid(visible.len() as i32) as usize,
        None => 0,
    };
    let id = visible[next];
    if session.focused == Some(id) {
        return None;
    }
    set_focused(session, Some(id));
    Some(id)
}

/// Focus the first visible window on the focused monitor when the current
/// focus is gone or no longer visible. Returns the newly focused window.
pub fn refocus_if_hidden(session: &mut Session) -> Option<WindowId> {
    let still_visible = session
        .focused
        .and_then(|id| session.windows.get(&id))
        .map(|w| {
            session
                .monitor(w.monitor)
                .map(|m| w.visible_on(m.visible_tags))
                .unwrap_or(false)
        })
        .unwrap_or(false);
    if still_visible {
        return None;
    }

    let next = first_visible(session, session.focused_monitor);
    set_focused(session, next);
    next
}

/// Move the focused window to the head of the stack so it becomes the
/// master. When it already is the master, promote the next visible window
/// instead and focus it.
pub fn zoom(session: &mut Session) -> Option<MonitorId> {
    let focused = session.focused?;
    let window = session.windows.get(&focused)?;
    if window.floating {
        return None;
    }
    if session.layouts.get(session.layout_cursor)?.arrange.is_none() {
        return None;
    }
    let monitor_id = window.monitor;

    let visible = visible_stack(session, monitor_id);
    let target = if visible.first() == Some(&focused) {
        let Some(&next) = visible.get(1) else {
            return None;
        };
        next
    } else {
        focused
    };

    let monitor = session.monitor_mut(monitor_id)?;
    monitor.stack.retain(|&id| id != target);
    monitor.stack.insert(0, target);
    tracing::info!("Zoom window {} on monitor {}", target, monitor_id);
    set_focused(session, Some(target));
    Some(monitor_id)
}

/// Shift focus to another monitor, wrapping. Returns the target monitor
/// and the window that received focus there, if any.
pub fn focus_monitor(session: &mut Session, step: i32) -> Option<(MonitorId, Option<WindowId>)> {
    if session.monitors.len() < 2 {
        return None;
    }
    let current = session
        .monitors
        .iter()
        .position(|m| m.id == session.focused_monitor)?;
    let next = (current as i32 + step).rem_euclid(session.monitors.len() as i32) as usize;
    let target = session.monitors[next].id;
    if target == session.focused_monitor {
        return None;
    }

    tracing::info!("Focus monitor: {} -> {}", session.focused_monitor, target);
    session.focused_monitor = target;
    let id = first_visible(session, target);
    session.focused = id;
    Some((target, id))
}

/// Send the focused window to another monitor, wrapping. Membership
/// travels with the window; both monitors need a re-arrange.
pub fn send_to_monitor(session: &mut Session, step: i32) -> Option<(MonitorId, MonitorId)> {
    if session.monitors.len() < 2 {
        return None;
    }
    let focused = session.focused?;
    let source = session.windows.get(&focused)?.monitor;
    let current = session.monitors.iter().position(|m| m.id == source)?;
    let next = (current as i32 + step).rem_euclid(session.monitors.len() as i32) as usize;
    let target = session.monitors[next].id;
    if target == source {
        return None;
    }

    tracing::info!("Send window {} to monitor {}", focused, target);
    session.windows.get_mut(&focused)?.monitor = target;
    if let Some(monitor) = session.monitor_mut(source) {
        monitor.stack.retain(|&id| id != focused);
    }
    if let Some(monitor) = session.monitor_mut(target) {
        monitor.stack.insert(0, focused);
    }
    Some((source, target))
}
