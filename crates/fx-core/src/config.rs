//! Per-surface options.
//!
//! The web front-end reads these from `data-*` attributes on the container;
//! the native viewer fills them from command-line arguments.

use std::time::Duration;

use crate::constants::DEFAULT_ABERRATION_INTENSITY;
use crate::effect::EffectKind;
use crate::error::FxError;
use crate::gate::LeavePolicy;

#[derive(Clone, Debug, PartialEq)]
pub struct EffectConfig {
    pub kind: EffectKind,
    pub leave_policy: LeavePolicy,
    pub aberration_intensity: f32,
    /// Follow container resizes instead of keeping the mount-time size.
    pub track_resize: bool,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            kind: EffectKind::HoverRipple,
            leave_policy: LeavePolicy::default(),
            aberration_intensity: DEFAULT_ABERRATION_INTENSITY,
            track_resize: false,
        }
    }
}

impl EffectConfig {
    pub fn new(kind: EffectKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    /// Parse from named attributes (`effect`, `leave-delay-ms`, `aberration`,
    /// `track-resize`). Missing attributes keep their defaults. A leave delay
    /// of `0` selects immediate deactivation.
    pub fn from_attributes<F>(get: F) -> Result<Self, FxError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = EffectConfig::default();
        if let Some(kind) = get("effect") {
            config.kind = kind.parse()?;
        }
        if let Some(raw) = get("leave-delay-ms") {
            let ms: u64 = raw
                .trim()
                .parse()
                .map_err(|_| FxError::Config(format!("leave-delay-ms '{}' is not a number", raw)))?;
            config.leave_policy = if ms == 0 {
                LeavePolicy::Immediate
            } else {
                LeavePolicy::Delayed(Duration::from_millis(ms))
            };
        }
        if let Some(raw) = get("aberration") {
            let v: f32 = raw
                .trim()
                .parse()
                .map_err(|_| FxError::Config(format!("aberration '{}' is not a number", raw)))?;
            if !v.is_finite() || v < 0.0 {
                return Err(FxError::Config(format!("aberration {} must be >= 0", v)));
            }
            config.aberration_intensity = v;
        }
        if let Some(raw) = get("track-resize") {
            config.track_resize = matches!(raw.trim(), "" | "1" | "true" | "yes");
        }
        Ok(config)
    }
}

/// DOM attribute carrying option `key` on a web container. The effect name
/// doubles as the auto-mount marker.
pub fn data_attribute(key: &str) -> String {
    match key {
        "effect" => "data-hoverfx".to_string(),
        other => format!("data-{}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn attrs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn empty_attributes_yield_defaults() {
        let map = attrs(&[]);
        let cfg = EffectConfig::from_attributes(|k| map.get(k).cloned()).unwrap();
        assert_eq!(cfg, EffectConfig::default());
        assert_eq!(
            cfg.leave_policy,
            LeavePolicy::Delayed(Duration::from_millis(500))
        );
    }

    #[test]
    fn zero_delay_means_immediate() {
        let map = attrs(&[("leave-delay-ms", "0")]);
        let cfg = EffectConfig::from_attributes(|k| map.get(k).cloned()).unwrap();
        assert_eq!(cfg.leave_policy, LeavePolicy::Immediate);
    }

    #[test]
    fn grid_with_intensity_and_resize() {
        let map = attrs(&[
            ("effect", "grid"),
            ("aberration", "0.8"),
            ("track-resize", ""),
        ]);
        let cfg = EffectConfig::from_attributes(|k| map.get(k).cloned()).unwrap();
        assert_eq!(cfg.kind, EffectKind::GridAberration);
        assert!((cfg.aberration_intensity - 0.8).abs() < 1e-6);
        assert!(cfg.track_resize);
    }

    #[test]
    fn bad_values_are_config_errors() {
        for pairs in [
            vec![("leave-delay-ms", "soon")],
            vec![("aberration", "-1")],
            vec![("effect", "blur")],
        ] {
            let map = attrs(&pairs);
            let err = EffectConfig::from_attributes(|k| map.get(k).cloned()).unwrap_err();
            assert!(matches!(err, FxError::Config(_)), "{:?}", err);
        }
    }

    #[test]
    fn attribute_names() {
        assert_eq!(data_attribute("effect"), "data-hoverfx");
        assert_eq!(data_attribute("leave-delay-ms"), "data-leave-delay-ms");
    }
}
