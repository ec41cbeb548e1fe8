//! Built-in expression presets.
//!
//! A fixed table of one-click expressions, same schema as an
//! `expression.json` file. Entries reference ARKit-style target names on a
//! `Face` mesh; on rigs named differently the unmatched keys are ignored
//! like any other preset key.

use super::preset::ExpressionPreset;

pub const BUILTIN_NAMES: [&str; 3] = ["thinking", "mouth_open", "oops"];

/// Look up a built-in expression by name.
pub fn builtin(name: &str) -> Option<ExpressionPreset> {
    let entries: &[(&str, f32)] = match name {
        "thinking" => &[
            ("browDownLeft", 0.35),
            ("browDownRight", 0.35),
            ("eyeSquintLeft", 0.4),
            ("eyeSquintRight", 0.4),
            ("mouthPucker", 0.3),
            ("mouthPressLeft", 0.25),
        ],
        "mouth_open" => &[("jawOpen", 0.65), ("mouthStretchLeft", 0.2), ("mouthStretchRight", 0.2)],
        "oops" => &[
            ("browInnerUp", 0.6),
            ("eyeWideLeft", 0.5),
            ("eyeWideRight", 0.5),
            ("jawOpen", 0.3),
            ("mouthFunnel", 0.4),
        ],
        _ => return None,
    };

    let mut preset = ExpressionPreset::default();
    let face = preset.0.entry("Face".to_string()).or_default();
    for &(target, value) in entries {
        face.insert(target.to_string(), value);
    }
    Some(preset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_builtin_resolves() {
        for name in BUILTIN_NAMES {
            let preset = builtin(name).unwrap();
            assert!(!preset.is_empty(), "{} is empty", name);
            // Built-ins stay within the slider range so they apply
            // identically under either clamp policy.
            for targets in preset.0.values() {
                for &v in targets.values() {
                    assert!((0.0..=1.0).contains(&v));
                }
            }
        }
    }

    #[test]
    fn test_unknown_builtin() {
        assert!(builtin("scowl").is_none());
    }
}
