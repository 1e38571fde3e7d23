use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use fx_core::{EffectConfig, EffectKind, FxError, LeavePolicy, DEFAULT_ABERRATION_INTENSITY};

#[derive(Parser, Debug)]
#[command(
    name = "fx-native",
    version,
    about = "Preview a pointer-reactive image effect in a desktop window"
)]
pub struct Cli {
    /// Image file to distort (PNG, JPEG, GIF, BMP or WebP).
    #[arg(value_name = "IMAGE")]
    pub image: PathBuf,

    /// Effect to apply: `ripple` or `grid`.
    #[arg(long, default_value = "ripple")]
    pub effect: EffectKind,

    /// Delay before the ripple switches off after the cursor leaves.
    #[arg(long, value_name = "MS", conflicts_with = "immediate_leave")]
    pub leave_delay_ms: Option<u64>,

    /// Switch the ripple off as soon as the cursor leaves.
    #[arg(long)]
    pub immediate_leave: bool,

    /// Color split strength for the grid effect.
    #[arg(long, value_name = "F", default_value_t = DEFAULT_ABERRATION_INTENSITY)]
    pub aberration: f32,

    #[arg(long, default_value_t = 800)]
    pub width: u32,

    #[arg(long, default_value_t = 600)]
    pub height: u32,
}

impl Cli {
    pub fn effect_config(&self) -> Result<EffectConfig, FxError> {
        if !self.aberration.is_finite() || self.aberration < 0.0 {
            return Err(FxError::Config(format!(
                "aberration {} must be >= 0",
                self.aberration
            )));
        }
        let leave_policy = match (self.immediate_leave, self.leave_delay_ms) {
            (true, _) | (false, Some(0)) => LeavePolicy::Immediate,
            (false, Some(ms)) => LeavePolicy::Delayed(Duration::from_millis(ms)),
            (false, None) => LeavePolicy::default(),
        };
        Ok(EffectConfig {
            kind: self.effect,
            leave_policy,
            aberration_intensity: self.aberration,
            // The window is the container, so follow its size.
            track_resize: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_delayed_ripple() {
        let cli = Cli::try_parse_from(["fx-native", "cat.png"]).unwrap();
        let cfg = cli.effect_config().unwrap();
        assert_eq!(cfg.kind, EffectKind::HoverRipple);
        assert_eq!(cfg.leave_policy, LeavePolicy::default());
        assert!(cfg.track_resize);
        assert_eq!((cli.width, cli.height), (800, 600));
    }

    #[test]
    fn grid_with_intensity() {
        let cli =
            Cli::try_parse_from(["fx-native", "cat.png", "--effect", "grid", "--aberration", "1.5"])
                .unwrap();
        let cfg = cli.effect_config().unwrap();
        assert_eq!(cfg.kind, EffectKind::GridAberration);
        assert!((cfg.aberration_intensity - 1.5).abs() < 1e-6);
    }

    #[test]
    fn leave_policy_flags() {
        let cli = Cli::try_parse_from(["fx-native", "a.png", "--immediate-leave"]).unwrap();
        assert_eq!(cli.effect_config().unwrap().leave_policy, LeavePolicy::Immediate);

        let cli = Cli::try_parse_from(["fx-native", "a.png", "--leave-delay-ms", "250"]).unwrap();
        assert_eq!(
            cli.effect_config().unwrap().leave_policy,
            LeavePolicy::Delayed(Duration::from_millis(250))
        );

        assert!(Cli::try_parse_from([
            "fx-native",
            "a.png",
            "--immediate-leave",
            "--leave-delay-ms",
            "5"
        ])
        .is_err());
    }

    #[test]
    fn rejects_unknown_effect_and_negative_aberration() {
        assert!(Cli::try_parse_from(["fx-native", "a.png", "--effect", "blur"]).is_err());
        let cli = Cli::try_parse_from(["fx-native", "a.png", "--aberration=-2"]).unwrap();
        assert!(matches!(cli.effect_config(), Err(FxError::Config(_))));
    }
}
