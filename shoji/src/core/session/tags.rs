use crate::core::{MonitorId, TagSet};

use super::Session;

/// Replace the focused monitor's visible set. A zero mask (after masking to
/// the configured tag range) swaps back to the previously viewed set;
/// viewing the current set is a no-op. Returns the monitor to re-arrange.
pub fn view(session: &mut Session, tags: u32) -> Option<MonitorId> {
    let valid = session.valid_tags;
    let monitor_id = session.focused_monitor;
    let monitor = session.monitor_mut(monitor_id)?;
    let requested = TagSet::from_mask(tags).intersection(valid);

    if requested.is_empty() {
        if monitor.visible_tags == monitor.previous_tags {
            return None;
        }
        std::mem::swap(&mut monitor.visible_tags, &mut monitor.previous_tags);
        tracing::info!(
            "View last on monitor {}: {:#b} -> {:#b}",
            monitor_id,
            monitor.previous_tags.mask(),
            monitor.visible_tags.mask()
        );
        return Some(monitor_id);
    }

    if monitor.visible_tags == requested {
        return None;
    }
    tracing::info!(
        "View on monitor {}: {:#b} -> {:#b}",
        monitor_id,
        monitor.visible_tags.mask(),
        requested.mask()
    );
    monitor.previous_tags = monitor.visible_tags;
    monitor.visible_tags = requested;
    Some(monitor_id)
}

/// XOR the mask into the focused monitor's visible set; rejected when the
/// result would leave no tag visible.
pub fn toggle_view(session: &mut Session, tags: u32) -> Option<MonitorId> {
    let valid = session.valid_tags;
    let monitor_id = session.focused_monitor;
    let monitor = session.monitor_mut(monitor_id)?;
    let mask = TagSet::from_mask(tags).intersection(valid);
    if mask.is_empty() {
        return None;
    }

    let toggled = monitor.visible_tags.toggle(mask);
    if toggled.is_empty() {
        tracing::debug!(
            "Rejecting toggle view on monitor {}: would leave no visible tag",
            monitor_id
        );
        return None;
    }
    tracing::info!(
        "Toggle view on monitor {}: {:#b} -> {:#b}",
        monitor_id,
        monitor.visible_tags.mask(),
        toggled.mask()
    );
    monitor.previous_tags = monitor.visible_tags;
    monitor.visible_tags = toggled;
    Some(monitor_id)
}

/// Replace the focused window's tag membership; a zero mask is rejected
/// since a window must belong to at least one tag.
pub fn set_window_tags(session: &mut Session, tags: u32) -> Option<MonitorId> {
    let valid = session.valid_tags;
    let focused = session.focused?;
    let window = session.windows.get_mut(&focused)?;
    let mask = TagSet::from_mask(tags).intersection(valid);
    if mask.is_empty() || window.tags == mask {
        return None;
    }
    tracing::info!(
        "Tag window {}: {:#b} -> {:#b}",
        focused,
        window.tags.mask(),
        mask.mask()
    );
    window.tags = mask;
    Some(window.monitor)
}

/// XOR the mask into the focused window's membership; rejected when the
/// result would be zero.
pub fn toggle_window_tags(session: &mut Session, tags: u32) -> Option<MonitorId> {
    let valid = session.valid_tags;
    let focused = session.focused?;
    let window = session.windows.get_mut(&focused)?;
    let mask = TagSet::from_mask(tags).intersection(valid);
    if mask.is_empty() {
        return None;
    }

    let toggled = window.tags.toggle(mask);
    if toggled.is_empty() {
        tracing::debug!(
            "Rejecting toggle tag on window {}: would leave no membership",
            focused
        );
        return None;
    }
    tracing::info!(
        "Toggle window {} tags: {:#b} -> {:#b}",
        focused,
        window.tags.mask(),
        toggled.mask()
    );
    window.tags = toggled;
    Some(window.monitor)
}
