use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use shoji_config::{
    format_key_spec, parse_button_spec, parse_key_spec, parse_modifiers, Action, ClickContext,
    ConfigFile, ModMatch, Modifiers, MouseButton, Settings, TagKeys,
};

use crate::core::{LayoutRegistry, RulesEngine, TagSet, MFACT_MAX, MFACT_MIN};

/// A compiled keyboard binding. Tables are ordered; the dispatcher scans
/// them in declaration order and the first match wins.
#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub mods: ModMatch,
    pub key: String,
    pub action: Action,
}

#[derive(Debug, Clone)]
pub struct ButtonBinding {
    pub context: ClickContext,
    pub mods: ModMatch,
    pub button: MouseButton,
    pub action: Action,
}

pub struct Bindings {
    pub keys: Vec<KeyBinding>,
    pub buttons: Vec<ButtonBinding>,
}

pub struct CompiledConfig {
    pub tags: Vec<String>,
    pub valid_tags: TagSet,
    pub settings: Settings,
    pub bindings: Bindings,
    pub layouts: LayoutRegistry,
    pub rules: RulesEngine,
}

pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("shoji").join("config.json"))
}

pub fn load(path: Option<&Path>) -> Result<ConfigFile> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => default_path().context("Could not determine config directory")?,
    };
    let data = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let file: ConfigFile = serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    Ok(file)
}

/// Turn the declarative file into the load-time-fixed tables: validated
/// settings, the expanded binding tables, the layout registry and the rule
/// list. Everything here is read-only after this returns.
pub fn compile(file: ConfigFile) -> Result<CompiledConfig> {
    let tag_count = file.tags.len();
    if tag_count == 0 || tag_count > 32 {
        bail!("tag count must be between 1 and 32, got {}", tag_count);
    }
    let valid_tags = TagSet::all(tag_count as u32);

    let mut settings = file.settings.clone();
    if !(MFACT_MIN..=MFACT_MAX).contains(&settings.mfact) {
        let clamped = settings.mfact.clamp(MFACT_MIN, MFACT_MAX);
        tracing::warn!("mfact {} out of range, clamped to {}", settings.mfact, clamped);
        settings.mfact = clamped;
    }

    let layouts = LayoutRegistry::from_specs(&file.layouts).map_err(|e| anyhow!("{}", e))?;
    let rules = RulesEngine::from_specs(&file.rules, valid_tags);

    let mut keys = Vec::new();
    for spec in &file.keys {
        let (mods, key) = parse_key_spec(&spec.key)
            .map_err(|e| anyhow!("Invalid key binding {:?}: {}", spec.key, e))?;
        keys.push(KeyBinding {
            mods,
            key,
            action: spec.action.clone(),
        });
    }
    if let Some(tag_keys) = &file.tag_keys {
        keys.extend(expand_tag_keys(tag_keys, tag_count).map_err(|e| anyhow!("{}", e))?);
    }
    warn_shadowed_keys(&keys);

    let mut buttons = Vec::new();
    for spec in &file.buttons {
        let (mods, button) = parse_button_spec(&spec.button)
            .map_err(|e| anyhow!("Invalid button binding {:?}: {}", spec.button, e))?;
        buttons.push(ButtonBinding {
            context: spec.context,
            mods,
            button,
            action: spec.action.clone(),
        });
    }
    warn_shadowed_buttons(&buttons);

    Ok(CompiledConfig {
        tags: file.tags,
        valid_tags,
        settings,
        bindings: Bindings { keys, buttons },
        layouts,
        rules,
    })
}

/// Expand the tag-key block into independent bindings: for tag i, the base
/// modifier views it, +ctrl toggles its visibility, +shift moves the
/// focused window there, +ctrl+shift toggles membership.
fn expand_tag_keys(tag_keys: &TagKeys, tag_count: usize) -> Result<Vec<KeyBinding>, String> {
    let base = parse_modifiers(&tag_keys.modifier)?;
    if tag_keys.keys.len() > tag_count {
        tracing::warn!(
            "{} tag keys configured for {} tags, extras ignored",
            tag_keys.keys.len(),
            tag_count
        );
    }

    let mut bindings = Vec::new();
    for (i, name) in tag_keys.keys.iter().take(tag_count).enumerate() {
        let (mods, key) = parse_key_spec(name)?;
        if mods != ModMatch::Exact(Modifiers::none()) {
            return Err(format!("tag key {:?} must not carry modifiers", name));
        }
        let mask = 1u32 << i;
        let combos = [
            (base, Action::View { tags: mask }),
            (with_ctrl(base), Action::ToggleView { tags: mask }),
            (with_shift(base), Action::Tag { tags: mask }),
            (with_ctrl(with_shift(base)), Action::ToggleTag { tags: mask }),
        ];
        for (modifiers, action) in combos {
            bindings.push(KeyBinding {
                mods: ModMatch::Exact(modifiers),
                key: key.clone(),
                action,
            });
        }
    }
    Ok(bindings)
}

fn with_ctrl(mut modifiers: Modifiers) -> Modifiers {
    modifiers.ctrl = true;
    modifiers
}

fn with_shift(mut modifiers: Modifiers) -> Modifiers {
    modifiers.shift = true;
    modifiers
}

fn warn_shadowed_keys(keys: &[KeyBinding]) {
    for (i, binding) in keys.iter().enumerate() {
        if keys[..i]
            .iter()
            .any(|b| b.mods == binding.mods && b.key == binding.key)
        {
            tracing::warn!(
                "Duplicate key binding {}, first entry wins",
                format_key_spec(&binding.mods, &binding.key)
            );
        }
    }
}

fn warn_shadowed_buttons(buttons: &[ButtonBinding]) {
    for (i, binding) in buttons.iter().enumerate() {
        if buttons[..i].iter().any(|b| {
            b.context == binding.context && b.mods == binding.mods && b.button == binding.button
        }) {
            tracing::warn!(
                "Duplicate button binding {:?}+{:?} in {:?}, first entry wins",
                binding.mods,
                binding.button,
                binding.context
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shoji_config::{KeySpec, LayoutSpec};

    fn minimal_file() -> ConfigFile {
        serde_json::from_str(
            r#"{
                "tags": ["1", "2", "3", "4", "5"],
                "layouts": [
                    { "symbol": "[]=", "arrange": "tile" },
                    { "symbol": "><>", "arrange": null }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_compile_minimal() {
        let compiled = compile(minimal_file()).unwrap();
        assert_eq!(compiled.valid_tags.mask(), 0b11111);
        assert_eq!(compiled.layouts.len(), 2);
        assert!(compiled.bindings.keys.is_empty());
        assert!(compiled.rules.is_empty());
    }

    #[test]
    fn test_compile_rejects_no_tags() {
        let mut file = minimal_file();
        file.tags.clear();
        assert!(compile(file).is_err());
    }

    #[test]
    fn test_compile_rejects_too_many_tags() {
        let mut file = minimal_file();
        file.tags = (0..33).map(|i| i.to_string()).collect();
        assert!(compile(file).is_err());
    }

    #[test]
    fn test_compile_rejects_unknown_arrange() {
        let mut file = minimal_file();
        file.layouts.push(LayoutSpec {
            symbol: "@".to_string(),
            arrange: Some("fibonacci".to_string()),
        });
        assert!(compile(file).is_err());
    }

    #[test]
    fn test_compile_rejects_bad_key_spec() {
        let mut file = minimal_file();
        file.keys.push(KeySpec {
            key: "hyper-q".to_string(),
            action: Action::Quit,
        });
        assert!(compile(file).is_err());
    }

    #[test]
    fn test_compile_clamps_mfact() {
        let mut file = minimal_file();
        file.settings.mfact = 1.5;
        let compiled = compile(file).unwrap();
        assert!((compiled.settings.mfact - MFACT_MAX).abs() < f64::EPSILON);
    }

    #[test]
    fn test_tag_keys_expand_to_four_bindings_each() {
        let mut file = minimal_file();
        file.tag_keys = Some(TagKeys {
            modifier: "super".to_string(),
            keys: vec!["1".to_string(), "2".to_string()],
        });

        let compiled = compile(file).unwrap();
        let keys = &compiled.bindings.keys;
        assert_eq!(keys.len(), 8);

        // Tag 1: plain view, ctrl toggles view, shift tags, ctrl+shift toggles tag
        assert_eq!(keys[0].action, Action::View { tags: 0b1 });
        assert_eq!(keys[1].action, Action::ToggleView { tags: 0b1 });
        assert_eq!(keys[2].action, Action::Tag { tags: 0b1 });
        assert_eq!(keys[3].action, Action::ToggleTag { tags: 0b1 });

        // All four share the key and carry the same mask
        assert!(keys[..4].iter().all(|b| b.key == "1"));

        // Second key targets the second bit
        assert_eq!(keys[4].action, Action::View { tags: 0b10 });
        assert_eq!(keys[4].key, "2");

        // Modifier combinations are distinct
        let super_only = Modifiers {
            super_: true,
            ..Modifiers::none()
        };
        assert_eq!(keys[0].mods, ModMatch::Exact(super_only));
        assert_eq!(
            keys[2].mods,
            ModMatch::Exact(Modifiers {
                super_: true,
                shift: true,
                ..Modifiers::none()
            })
        );
    }

    #[test]
    fn test_tag_keys_extras_beyond_tag_count_ignored() {
        let mut file = minimal_file();
        file.tags = vec!["1".to_string(), "2".to_string()];
        file.tag_keys = Some(TagKeys {
            modifier: "super".to_string(),
            keys: vec!["1".to_string(), "2".to_string(), "3".to_string()],
        });

        let compiled = compile(file).unwrap();
        assert_eq!(compiled.bindings.keys.len(), 8);
    }

    #[test]
    fn test_tag_keys_reject_modified_keys() {
        let mut file = minimal_file();
        file.tag_keys = Some(TagKeys {
            modifier: "super".to_string(),
            keys: vec!["shift-1".to_string()],
        });
        assert!(compile(file).is_err());
    }

    #[test]
    fn test_duplicate_bindings_are_kept_in_order() {
        let mut file = minimal_file();
        file.keys.push(KeySpec {
            key: "super-x".to_string(),
            action: Action::Quit,
        });
        file.keys.push(KeySpec {
            key: "super-x".to_string(),
            action: Action::Zoom,
        });

        // Both survive compilation; the dispatcher resolves by table order
        let compiled = compile(file).unwrap();
        assert_eq!(compiled.bindings.keys.len(), 2);
        assert_eq!(compiled.bindings.keys[0].action, Action::Quit);
    }

    #[test]
    fn test_example_config_compiles() {
        let file: ConfigFile =
            serde_json::from_str(include_str!("../../config.example.json")).unwrap();
        let compiled = compile(file).unwrap();

        assert_eq!(compiled.tags.len(), 9);
        assert_eq!(compiled.valid_tags.mask(), 511);
        assert_eq!(compiled.layouts.len(), 3);
        assert_eq!(compiled.rules.len(), 2);
        assert_eq!(compiled.bindings.buttons.len(), 5);
        // 23 explicit bindings plus four generated per tag key
        assert_eq!(compiled.bindings.keys.len(), 23 + 9 * 4);
    }

    #[test]
    fn test_compile_buttons() {
        let file: ConfigFile = serde_json::from_str(
            r#"{
                "tags": ["1"],
                "layouts": [{ "symbol": "[]=", "arrange": "tile" }],
                "buttons": [
                    {
                        "context": "layout_symbol",
                        "button": "super-left",
                        "action": { "type": "cycle_layout", "step": 1 }
                    },
                    {
                        "context": "client_window",
                        "button": "any-middle",
                        "action": { "type": "toggle_floating" }
                    }
                ]
            }"#,
        )
        .unwrap();

        let compiled = compile(file).unwrap();
        let buttons = &compiled.bindings.buttons;
        assert_eq!(buttons.len(), 2);
        assert_eq!(buttons[0].context, ClickContext::LayoutSymbol);
        assert_eq!(buttons[0].button, MouseButton::Left);
        assert_eq!(buttons[1].mods, ModMatch::Any);
    }
}
