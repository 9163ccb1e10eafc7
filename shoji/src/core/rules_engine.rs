use shoji_config::RuleSpec;

use super::{MonitorId, TagSet};

/// Placement directives resolved for a new window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub tags: TagSet,
    pub floating: bool,
    pub monitor: Option<MonitorId>,
}

#[derive(Debug, Clone)]
pub struct Rule {
    pub class: Option<String>,
    pub instance: Option<String>,
    pub title: Option<String>,
    pub tags: TagSet,
    pub floating: bool,
    pub monitor: Option<MonitorId>,
}

impl Rule {
    fn matches(&self, class: &str, instance: &str, title: &str) -> bool {
        field_matches(&self.class, class)
            && field_matches(&self.instance, instance)
            && field_matches(&self.title, title)
    }
}

// Absent fields are wildcards; present fields are case-sensitive substring
// matches against the window's identity strings.
fn field_matches(pattern: &Option<String>, value: &str) -> bool {
    match pattern {
        None => true,
        Some(p) => value.contains(p.as_str()),
    }
}

/// Ordered placement-rule table, fixed after load. Resolution is
/// first-match-wins in declaration order.
#[derive(Debug, Default)]
pub struct RulesEngine {
    rules: Vec<Rule>,
}

impl RulesEngine {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn from_specs(specs: &[RuleSpec], valid_tags: TagSet) -> Self {
        let rules = specs
            .iter()
            .map(|spec| {
                let tags = TagSet::from_mask(spec.tags).intersection(valid_tags);
                if tags.mask() != spec.tags {
                    tracing::warn!(
                        "Rule tag mask {:#b} truncated to {:#b} (out-of-range bits ignored)",
                        spec.tags,
                        tags.mask()
                    );
                }
                Rule {
                    class: spec.class.clone(),
                    instance: spec.instance.clone(),
                    title: spec.title.clone(),
                    tags,
                    floating: spec.floating,
                    monitor: spec.monitor,
                }
            })
            .collect();
        Self { rules }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Resolve the first fully-matching rule, or None if nothing matched.
    pub fn resolve(&self, class: &str, instance: &str, title: &str) -> Option<Placement> {
        let rule = self.rules.iter().find(|r| r.matches(class, instance, title))?;
        tracing::debug!(
            "Rule matched for class={:?} instance={:?} title={:?}: tags={:#b} floating={}",
            class,
            instance,
            title,
            rule.tags.mask(),
            rule.floating
        );
        Some(Placement {
            tags: rule.tags,
            floating: rule.floating,
            monitor: rule.monitor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(class: Option<&str>, tags: u32, floating: bool) -> RuleSpec {
        RuleSpec {
            class: class.map(str::to_string),
            instance: None,
            title: None,
            tags,
            floating,
            monitor: None,
        }
    }

    #[test]
    fn test_first_match_wins_over_wildcard() {
        let engine = RulesEngine::from_specs(
            &[spec(Some("Firefox"), 0b10, false), spec(None, 0b100, true)],
            TagSet::all(5),
        );

        let placement = engine.resolve("Firefox", "Navigator", "Home").unwrap();
        assert_eq!(placement.tags.mask(), 0b10);
        assert!(!placement.floating);

        // Anything else falls through to the wildcard rule
        let placement = engine.resolve("Gimp", "gimp", "GIMP").unwrap();
        assert_eq!(placement.tags.mask(), 0b100);
        assert!(placement.floating);
    }

    #[test]
    fn test_later_matching_rules_not_applied() {
        let engine = RulesEngine::from_specs(
            &[
                spec(Some("Firefox"), 0b1, false),
                spec(Some("Firefox"), 0b10, true),
            ],
            TagSet::all(5),
        );

        let placement = engine.resolve("Firefox", "", "").unwrap();
        assert_eq!(placement.tags.mask(), 0b1);
        assert!(!placement.floating);
    }

    #[test]
    fn test_substring_match() {
        let engine = RulesEngine::from_specs(&[spec(Some("irefox"), 0b10, false)], TagSet::all(5));
        assert!(engine.resolve("Firefox", "", "").is_some());
        assert!(engine.resolve("firefox", "", "").is_none());
    }

    #[test]
    fn test_all_present_fields_must_match() {
        let engine = RulesEngine::from_specs(
            &[RuleSpec {
                class: Some("Firefox".to_string()),
                instance: None,
                title: Some("Picture-in-Picture".to_string()),
                tags: 0,
                floating: true,
                monitor: None,
            }],
            TagSet::all(5),
        );

        assert!(engine
            .resolve("Firefox", "Navigator", "Picture-in-Picture")
            .is_some());
        assert!(engine.resolve("Firefox", "Navigator", "Home").is_none());
        assert!(engine
            .resolve("Chromium", "chromium", "Picture-in-Picture")
            .is_none());
    }

    #[test]
    fn test_no_rules_resolves_none() {
        let engine = RulesEngine::new();
        assert!(engine.resolve("Firefox", "", "").is_none());
    }

    #[test]
    fn test_monitor_directive() {
        let engine = RulesEngine::from_specs(
            &[RuleSpec {
                class: Some("mpv".to_string()),
                instance: None,
                title: None,
                tags: 0,
                floating: false,
                monitor: Some(1),
            }],
            TagSet::all(5),
        );
        let placement = engine.resolve("mpv", "gl", "video").unwrap();
        assert_eq!(placement.monitor, Some(1));
    }

    #[test]
    fn test_out_of_range_tags_truncated() {
        let engine = RulesEngine::from_specs(
            &[spec(Some("Firefox"), 0b1110_0000, false)],
            TagSet::all(5),
        );
        let placement = engine.resolve("Firefox", "", "").unwrap();
        // Only bit 5 of the requested mask lies inside the 5-tag range
        assert_eq!(placement.tags.mask(), 0b1_0000);
    }
}
