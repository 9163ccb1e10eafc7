use crate::core::{MonitorId, TagSet, Window, WindowId};

use super::{focus, Session};

/// Classify and adopt a newly created window. Placement rules run once,
/// here; the first fully-matching rule supplies tags/floating/monitor, and
/// an unmatched window lands on the current view of its monitor, tiled.
pub fn manage_window(
    session: &mut Session,
    id: WindowId,
    class: &str,
    instance: &str,
    title: &str,
    monitor_hint: Option<MonitorId>,
) -> MonitorId {
    if session.windows.contains_key(&id) {
        tracing::warn!("Window {} already managed, re-managing", id);
        unmanage_window(session, id);
    }

    let mut monitor_id = monitor_hint
        .filter(|m| session.monitor(*m).is_some())
        .unwrap_or(session.focused_monitor);

    let placement = session.rules.resolve(class, instance, title);
    let (tags, floating) = match placement {
        Some(p) => {
            if let Some(m) = p.monitor {
                if session.monitor(m).is_some() {
                    monitor_id = m;
                } else {
                    tracing::warn!("Rule monitor {} not present, keeping {}", m, monitor_id);
                }
            }
            let tags = if p.tags.is_empty() {
                current_view(session, monitor_id)
            } else {
                p.tags
            };
            (tags, p.floating)
        }
        None => (current_view(session, monitor_id), false),
    };

    tracing::info!(
        "Managing window {} (class={:?} instance={:?}) tags={:#b} floating={} monitor={}",
        id,
        class,
        instance,
        tags.mask(),
        floating,
        monitor_id
    );

    let mut window = Window::new(id, monitor_id, tags);
    window.class = class.to_string();
    window.instance = instance.to_string();
    window.title = title.to_string();
    window.floating = floating;
    session.windows.insert(id, window);

    if let Some(monitor) = session.monitor_mut(monitor_id) {
        monitor.stack.insert(0, id);
    }

    // A window born on a hidden tag does not steal focus
    let visible = session
        .monitor(monitor_id)
        .map(|m| tags.intersects(m.visible_tags))
        .unwrap_or(false);
    if visible {
        focus::set_focused(session, Some(id));
    }
    monitor_id
}

pub fn unmanage_window(session: &mut Session, id: WindowId) -> Option<MonitorId> {
    let window = session.windows.remove(&id)?;
    for monitor in &mut session.monitors {
        monitor.stack.retain(|&w| w != id);
    }
    if session.focused == Some(id) {
        session.focused = None;
        let next = focus::first_visible(session, window.monitor);
        focus::set_focused(session, next);
    }
    tracing::info!("Unmanaged window {} (class={:?})", id, window.class);
    Some(window.monitor)
}

fn current_view(session: &Session, monitor_id: MonitorId) -> TagSet {
    session
        .monitor(monitor_id)
        .map(|m| m.visible_tags)
        .unwrap_or(TagSet::new(1))
}

#[cfg(test)]
mod tests {
    use crate::core::session::testing::*;
    use shoji_config::RuleSpec;

    fn rule(class: Option<&str>, tags: u32, floating: bool, monitor: Option<usize>) -> RuleSpec {
        RuleSpec {
            class: class.map(str::to_string),
            instance: None,
            title: None,
            tags,
            floating,
            monitor,
        }
    }

    #[test]
    fn test_unmatched_window_gets_current_view() {
        let mut session = test_session();
        session.view(0b110);

        session.manage_window(100, "App", "app", "w", None);
        let window = session.windows.get(&100).unwrap();
        assert_eq!(window.tags.mask(), 0b110);
        assert!(!window.floating);
        assert_eq!(session.focused, Some(100));
    }

    #[test]
    fn test_matching_rule_applies_directives() {
        let mut session = test_session_with_rules(&[rule(Some("Gimp"), 0b1000, true, None)]);

        session.manage_window(100, "Gimp", "gimp", "GIMP", None);
        let window = session.windows.get(&100).unwrap();
        assert_eq!(window.tags.mask(), 0b1000);
        assert!(window.floating);
    }

    #[test]
    fn test_window_on_hidden_tag_does_not_take_focus() {
        let mut session = test_session_with_rules(&[rule(Some("Gimp"), 0b1000, false, None)]);
        with_windows(&mut session, 1);
        assert_eq!(session.focused, Some(100));

        session.manage_window(200, "Gimp", "gimp", "GIMP", None);
        assert_eq!(session.focused, Some(100));
    }

    #[test]
    fn test_rule_with_zero_tags_falls_back_to_view() {
        let mut session = test_session_with_rules(&[rule(Some("Gimp"), 0, true, None)]);
        session.view(0b10);

        session.manage_window(100, "Gimp", "gimp", "GIMP", None);
        let window = session.windows.get(&100).unwrap();
        assert_eq!(window.tags.mask(), 0b10);
        assert!(window.floating);
    }

    #[test]
    fn test_rule_monitor_directive_overrides_hint() {
        let mut session = test_session_with_rules(&[rule(Some("mpv"), 0, false, Some(1))]);
        session.set_monitors(&[
            shoji_config::MonitorInfo {
                id: 0,
                x: 0,
                y: 0,
                width: 1920,
                height: 1080,
            },
            shoji_config::MonitorInfo {
                id: 1,
                x: 1920,
                y: 0,
                width: 1920,
                height: 1080,
            },
        ]);

        let monitor = session.manage_window(100, "mpv", "gl", "video", Some(0));
        assert_eq!(monitor, 1);
        assert_eq!(session.windows.get(&100).unwrap().monitor, 1);
        assert!(session.monitor(1).unwrap().stack.contains(&100));
    }

    #[test]
    fn test_rule_missing_monitor_falls_back() {
        let mut session = test_session_with_rules(&[rule(Some("mpv"), 0, false, Some(7))]);

        let monitor = session.manage_window(100, "mpv", "gl", "video", None);
        assert_eq!(monitor, 0);
    }

    #[test]
    fn test_new_window_attaches_at_stack_head() {
        let mut session = test_session();
        with_windows(&mut session, 2);
        assert_eq!(session.monitor(0).unwrap().stack, vec![101, 100]);
    }

    #[test]
    fn test_remanage_replaces_existing_window() {
        let mut session = test_session();
        with_windows(&mut session, 1);

        session.manage_window(100, "Other", "other", "w", None);
        assert_eq!(session.windows.len(), 1);
        assert_eq!(session.windows.get(&100).unwrap().class, "Other");
        assert_eq!(session.monitor(0).unwrap().stack, vec![100]);
    }

    #[test]
    fn test_unmanage_refocuses_next_visible() {
        let mut session = test_session();
        with_windows(&mut session, 2);
        assert_eq!(session.focused, Some(101));

        let monitor = session.unmanage_window(101);
        assert_eq!(monitor, Some(0));
        assert_eq!(session.focused, Some(100));
        assert!(!session.windows.contains_key(&101));
        assert_eq!(session.monitor(0).unwrap().stack, vec![100]);
    }

    #[test]
    fn test_unmanage_unknown_window_is_noop() {
        let mut session = test_session();
        assert!(session.unmanage_window(42).is_none());
    }

    #[test]
    fn test_unmanage_last_window_clears_focus() {
        let mut session = test_session();
        with_windows(&mut session, 1);

        session.unmanage_window(100);
        assert_eq!(session.focused, None);
    }
}
