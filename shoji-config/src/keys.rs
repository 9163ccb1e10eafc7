use serde::{Deserialize, Serialize};

/// Modifier state carried by an input event or required by a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Modifiers {
    #[serde(rename = "super", default)]
    pub super_: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub shift: bool,
}

impl Modifiers {
    pub fn none() -> Self {
        Self::default()
    }
}

/// How a binding compares against an event's modifier state.
/// Exact bindings require equality, not a subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModMatch {
    Any,
    Exact(Modifiers),
}

impl ModMatch {
    pub fn matches(&self, modifiers: Modifiers) -> bool {
        match self {
            ModMatch::Any => true,
            ModMatch::Exact(required) => *required == modifiers,
        }
    }
}

/// Mouse buttons recognized in pointer bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    ScrollUp,
    ScrollDown,
}

pub fn parse_key_spec(spec: &str) -> Result<(ModMatch, String), String> {
    let (mods, last) = split_spec(spec)?;
    let key = canonical_key(last)?;
    Ok((mods, key))
}

pub fn parse_button_spec(spec: &str) -> Result<(ModMatch, MouseButton), String> {
    let (mods, last) = split_spec(spec)?;
    let button = match last.to_lowercase().as_str() {
        "left" | "button1" => MouseButton::Left,
        "middle" | "button2" => MouseButton::Middle,
        "right" | "button3" => MouseButton::Right,
        "scroll_up" | "button4" => MouseButton::ScrollUp,
        "scroll_down" | "button5" => MouseButton::ScrollDown,
        _ => return Err(format!("Unknown button: {}", last)),
    };
    Ok((mods, button))
}

/// Parse a bare modifier combination like "super" or "super-alt".
pub fn parse_modifiers(spec: &str) -> Result<Modifiers, String> {
    if spec.is_empty() {
        return Err("Empty modifier string".to_string());
    }
    let mut modifiers = Modifiers::default();
    for part in spec.split('-') {
        match part.to_lowercase().as_str() {
            "super" | "mod" | "mod4" | "logo" => modifiers.super_ = true,
            "alt" | "mod1" => modifiers.alt = true,
            "ctrl" | "control" => modifiers.ctrl = true,
            "shift" => modifiers.shift = true,
            _ => return Err(format!("Unknown modifier: {}", part)),
        }
    }
    Ok(modifiers)
}

pub fn format_key_spec(mods: &ModMatch, key: &str) -> String {
    let mut parts = Vec::new();
    match mods {
        ModMatch::Any => parts.push("any"),
        ModMatch::Exact(m) => {
            if m.super_ {
                parts.push("super");
            }
            if m.alt {
                parts.push("alt");
            }
            if m.ctrl {
                parts.push("ctrl");
            }
            if m.shift {
                parts.push("shift");
            }
        }
    }
    parts.push(key);
    parts.join("-")
}

fn split_spec(spec: &str) -> Result<(ModMatch, &str), String> {
    let parts: Vec<&str> = spec.split('-').collect();
    let Some(last) = parts.last() else {
        return Err("Empty key string".to_string());
    };
    if last.is_empty() {
        return Err("Empty key string".to_string());
    }

    let mod_parts = &parts[..parts.len() - 1];
    if mod_parts.iter().any(|p| p.eq_ignore_ascii_case("any")) {
        if mod_parts.len() > 1 {
            return Err("\"any\" cannot be combined with other modifiers".to_string());
        }
        return Ok((ModMatch::Any, last));
    }

    let mut modifiers = Modifiers::default();
    for part in mod_parts {
        match part.to_lowercase().as_str() {
            "super" | "mod" | "mod4" | "logo" => modifiers.super_ = true,
            "alt" | "mod1" => modifiers.alt = true,
            "ctrl" | "control" => modifiers.ctrl = true,
            "shift" => modifiers.shift = true,
            _ => return Err(format!("Unknown modifier: {}", part)),
        }
    }
    Ok((ModMatch::Exact(modifiers), last))
}

fn canonical_key(key: &str) -> Result<String, String> {
    let lower = key.to_lowercase();
    if lower.len() == 1 && lower.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Ok(lower);
    }
    let named = match lower.as_str() {
        "return" | "enter" => "return",
        "tab" => "tab",
        "space" => "space",
        "delete" | "backspace" => "backspace",
        "escape" | "esc" => "escape",
        "left" => "left",
        "right" => "right",
        "up" => "up",
        "down" => "down",
        "minus" => "minus",
        "equal" => "equal",
        "comma" => "comma",
        "period" => "period",
        "slash" => "slash",
        "semicolon" => "semicolon",
        "quote" => "quote",
        "backslash" => "backslash",
        "grave" => "grave",
        "bracketleft" => "bracketleft",
        "bracketright" => "bracketright",
        "home" => "home",
        "end" => "end",
        "pageup" => "pageup",
        "pagedown" => "pagedown",
        "insert" => "insert",
        "print" => "print",
        "f1" | "f2" | "f3" | "f4" | "f5" | "f6" | "f7" | "f8" | "f9" | "f10" | "f11" | "f12" => {
            return Ok(lower)
        }
        _ => return Err(format!("Unknown key: {}", key)),
    };
    Ok(named.to_string())
}
