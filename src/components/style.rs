use serde_json::{Map, Value};

/// Free-form material options (color, opacity, linewidth, ...) handed to the
/// rendering backend untouched.
pub type Style = Map<String, Value>;

/// Layers `overrides` on top of `base`, later keys win.
pub fn merge_styles(base: Style, overrides: Option<&Style>) -> Style {
    let mut merged = base;
    if let Some(overrides) = overrides {
        for (key, value) in overrides {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}
