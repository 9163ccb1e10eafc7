use crate::core::{MonitorId, MFACT_MAX, MFACT_MIN};

use super::Session;

/// Move the cursor directly. An out-of-range index is ignored; None keeps
/// the cursor and just requests a re-arrange of the focused monitor.
pub fn set_layout(session: &mut Session, index: Option<usize>) -> Option<MonitorId> {
    if let Some(index) = index {
        if index >= session.layouts.len() {
            tracing::warn!("Layout index {} out of range, ignored", index);
            return None;
        }
        if index != session.layout_cursor {
            tracing::info!("Set layout: {} -> {}", session.layout_cursor, index);
            session.layout_cursor = index;
        }
    }
    Some(session.focused_monitor)
}

/// Advance the cursor by `step`, wrapping in both directions.
pub fn cycle_layout(session: &mut Session, step: i32) -> MonitorId {
    let len = session.layouts.len() as i32;
    let next = (session.layout_cursor as i32 + step).rem_euclid(len) as usize;
    tracing::info!("Cycle layout: {} -> {}", session.layout_cursor, next);
    session.layout_cursor = next;
    session.focused_monitor
}

/// Adjust the master-area window count, floored at zero.
pub fn inc_nmaster(session: &mut Session, delta: i32) -> MonitorId {
    let next = (session.nmaster as i32 + delta).max(0) as u32;
    tracing::info!("Master count: {} -> {}", session.nmaster, next);
    session.nmaster = next;
    session.focused_monitor
}

/// Adjust the master/stack ratio, clamped to [MFACT_MIN, MFACT_MAX].
pub fn set_mfact(session: &mut Session, delta: f64) -> MonitorId {
    let next = (session.mfact + delta).clamp(MFACT_MIN, MFACT_MAX);
    tracing::info!("Master ratio: {:.2} -> {:.2}", session.mfact, next);
    session.mfact = next;
    session.focused_monitor
}
