use serde::{Deserialize, Serialize};

use crate::{Action, ClickContext};

/// Root of the declarative configuration file. Everything here is fixed at
/// load time; the core never mutates it afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    pub tags: Vec<String>,
    #[serde(default)]
    pub settings: Settings,
    pub layouts: Vec<LayoutSpec>,
    #[serde(default)]
    pub keys: Vec<KeySpec>,
    #[serde(default)]
    pub tag_keys: Option<TagKeys>,
    #[serde(default)]
    pub buttons: Vec<ButtonSpec>,
    #[serde(default)]
    pub rules: Vec<RuleSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_mfact")]
    pub mfact: f64,
    #[serde(default = "default_nmaster")]
    pub nmaster: u32,
}

fn default_mfact() -> f64 {
    0.55
}

fn default_nmaster() -> u32 {
    1
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mfact: default_mfact(),
            nmaster: default_nmaster(),
        }
    }
}

/// One entry of the layout registry. `arrange` names a built-in strategy;
/// `null` selects floating behavior (no arrange step at all).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutSpec {
    pub symbol: String,
    pub arrange: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeySpec {
    /// Trigger in `modifier-...-key` form, e.g. "super-shift-return".
    pub key: String,
    pub action: Action,
}

/// Compact spelling of the per-tag key block: each listed key is expanded
/// at load into four independent bindings (view / toggle-view / tag /
/// toggle-tag) for its tag's bitmask.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagKeys {
    pub modifier: String,
    pub keys: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ButtonSpec {
    pub context: ClickContext,
    /// Trigger in `modifier-...-button` form, e.g. "super-left" or "any-middle".
    pub button: String,
    pub action: Action,
}

/// Placement directive applied once, at window creation. Present fields
/// must all match (case-sensitive substring); absent fields are wildcards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSpec {
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub instance: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub tags: u32,
    #[serde(default)]
    pub floating: bool,
    #[serde(default)]
    pub monitor: Option<usize>,
}
