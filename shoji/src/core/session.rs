use std::collections::HashMap;

use shoji_config::{MonitorInfo, Settings, WindowGeometry};

use super::{LayoutRegistry, Monitor, MonitorId, Rect, RulesEngine, TagSet, Window, WindowId};

mod focus;
mod layout;
mod rules;
mod tags;

/// All runtime window-manager state for one session, mutated only by
/// dispatched handlers on the single control thread. The layout registry
/// and rule table are read-only after construction.
pub struct Session {
    pub windows: HashMap<WindowId, Window>,
    pub monitors: Vec<Monitor>,
    pub focused: Option<WindowId>,
    pub focused_monitor: MonitorId,
    pub layout_cursor: usize,
    pub nmaster: u32,
    pub mfact: f64,
    pub layouts: LayoutRegistry,
    pub rules: RulesEngine,
    pub(crate) valid_tags: TagSet,
}

impl Session {
    pub fn new(
        layouts: LayoutRegistry,
        rules: RulesEngine,
        valid_tags: TagSet,
        settings: &Settings,
    ) -> Self {
        Self {
            windows: HashMap::new(),
            // A single default monitor until the adapter reports the real set
            monitors: vec![Monitor::new(0, Rect::new(0, 0, 1920, 1080))],
            focused: None,
            focused_monitor: 0,
            layout_cursor: 0,
            nmaster: settings.nmaster,
            mfact: settings.mfact,
            layouts,
            rules,
            valid_tags,
        }
    }

    pub fn monitor(&self, id: MonitorId) -> Option<&Monitor> {
        self.monitors.iter().find(|m| m.id == id)
    }

    pub fn monitor_mut(&mut self, id: MonitorId) -> Option<&mut Monitor> {
        self.monitors.iter_mut().find(|m| m.id == id)
    }

    pub fn visible_tags(&self) -> TagSet {
        self.monitor(self.focused_monitor)
            .map(|m| m.visible_tags)
            .unwrap_or(TagSet::new(1))
    }

    /// Replace the monitor list after a display change. Surviving monitors
    /// keep their view and stacking order; windows on vanished monitors
    /// move to the first monitor. Returns the monitors needing re-arrange.
    pub fn set_monitors(&mut self, infos: &[MonitorInfo]) -> Vec<MonitorId> {
        if infos.is_empty() {
            tracing::warn!("Ignoring empty monitor list");
            return vec![];
        }

        let monitors = infos
            .iter()
            .map(|info| {
                let frame = Rect::new(info.x, info.y, info.width, info.height);
                match self.monitors.iter().find(|m| m.id == info.id) {
                    Some(old) => {
                        let mut m = old.clone();
                        m.frame = frame;
                        m
                    }
                    None => Monitor::new(info.id, frame),
                }
            })
            .collect::<Vec<_>>();
        self.monitors = monitors;

        let first = self.monitors[0].id;
        let mut orphans = Vec::new();
        for window in self.windows.values_mut() {
            if !infos.iter().any(|i| i.id == window.monitor) {
                tracing::info!(
                    "Monitor {} gone, moving window {} to monitor {}",
                    window.monitor,
                    window.id,
                    first
                );
                window.monitor = first;
                orphans.push(window.id);
            }
        }
        if let Some(monitor) = self.monitor_mut(first) {
            for id in orphans {
                if !monitor.stack.contains(&id) {
                    monitor.stack.push(id);
                }
            }
        }

        if self.monitor(self.focused_monitor).is_none() {
            self.focused_monitor = first;
        }

        self.monitors.iter().map(|m| m.id).collect()
    }

    /// Compute the tiled geometries for a monitor under the current layout,
    /// or None when the current layout is floating (arrange is skipped and
    /// windows keep their geometry).
    pub fn arrange_geometries(&self, monitor_id: MonitorId) -> Option<Vec<WindowGeometry>> {
        let monitor = self.monitor(monitor_id)?;
        let layout = self.layouts.get(self.layout_cursor)?;
        let arrange = layout.arrange?;

        let tiled: Vec<WindowId> = monitor
            .stack
            .iter()
            .filter(|id| {
                self.windows
                    .get(*id)
                    .map(|w| w.visible_on(monitor.visible_tags) && !w.floating)
                    .unwrap_or(false)
            })
            .copied()
            .collect();

        let params = super::LayoutParams {
            nmaster: self.nmaster,
            mfact: self.mfact,
        };
        Some(arrange(&monitor.frame, &tiled, &params))
    }

    /// Record the geometry applied to a window so floating toggles and
    /// later arranges see the last known frame.
    pub fn record_geometries(&mut self, geometries: &[WindowGeometry]) {
        for g in geometries {
            if let Some(window) = self.windows.get_mut(&g.id) {
                window.frame = Rect::new(g.x, g.y, g.width, g.height);
            }
        }
    }

    pub fn toggle_focused_floating(&mut self) -> Option<MonitorId> {
        let focused = self.focused?;
        let window = self.windows.get_mut(&focused)?;
        window.floating = !window.floating;
        tracing::info!("Toggle floating for window {}: {}", focused, window.floating);
        Some(window.monitor)
    }

    // Tag operations - delegated to session/tags.rs

    pub fn view(&mut self, tags: u32) -> Option<MonitorId> {
        tags::view(self, tags)
    }

    pub fn toggle_view(&mut self, tags: u32) -> Option<MonitorId> {
        tags::toggle_view(self, tags)
    }

    pub fn set_window_tags(&mut self, tags: u32) -> Option<MonitorId> {
        tags::set_window_tags(self, tags)
    }

    pub fn toggle_window_tags(&mut self, tags: u32) -> Option<MonitorId> {
        tags::toggle_window_tags(self, tags)
    }

    // Layout operations - delegated to session/layout.rs

    pub fn set_layout(&mut self, index: Option<usize>) -> Option<MonitorId> {
        layout::set_layout(self, index)
    }

    pub fn cycle_layout(&mut self, step: i32) -> MonitorId {
        layout::cycle_layout(self, step)
    }

    pub fn inc_nmaster(&mut self, delta: i32) -> MonitorId {
        layout::inc_nmaster(self, delta)
    }

    pub fn set_mfact(&mut self, delta: f64) -> MonitorId {
        layout::set_mfact(self, delta)
    }

    // Focus operations - delegated to session/focus.rs

    pub fn set_focused(&mut self, id: Option<WindowId>) {
        focus::set_focused(self, id)
    }

    pub fn focus_stack(&mut self, step: i32) -> Option<WindowId> {
        focus::focus_stack(self, step)
    }

    pub fn refocus_if_hidden(&mut self) -> Option<WindowId> {
        focus::refocus_if_hidden(self)
    }

    pub fn zoom(&mut self) -> Option<MonitorId> {
        focus::zoom(self)
    }

    pub fn focus_monitor(&mut self, step: i32) -> Option<(MonitorId, Option<WindowId>)> {
        focus::focus_monitor(self, step)
    }

    pub fn send_to_monitor(&mut self, step: i32) -> Option<(MonitorId, MonitorId)> {
        focus::send_to_monitor(self, step)
    }

    // Rule application - delegated to session/rules.rs

    pub fn manage_window(
        &mut self,
        id: WindowId,
        class: &str,
        instance: &str,
        title: &str,
        monitor_hint: Option<MonitorId>,
    ) -> MonitorId {
        rules::manage_window(self, id, class, instance, title, monitor_hint)
    }

    pub fn unmanage_window(&mut self, id: WindowId) -> Option<MonitorId> {
        rules::unmanage_window(self, id)
    }
}
