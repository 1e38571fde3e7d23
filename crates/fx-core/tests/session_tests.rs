// End-to-end behavior of one effect surface driven through `EffectSession`,
// the way the web and native hosts drive it.

use std::time::Duration;

use fx_core::asset::RgbaImage;
use fx_core::{
    ContainerRect, EffectConfig, EffectKind, EffectSession, FxError, GateCommand, ImageTexture,
    LeavePolicy, PointerSample, SurfaceState,
};
use instant::Instant;

fn approx(a: PointerSample, b: PointerSample) -> bool {
    (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6
}

fn mounted_ready(config: EffectConfig, rect: ContainerRect) -> EffectSession {
    let mut session = EffectSession::new(config);
    let ticket = session.mount(rect).unwrap();
    assert!(session.asset_ready(ticket, Instant::now()));
    session
}

#[test]
fn square_container_scenario() {
    let rect = ContainerRect::sized(600.0, 600.0);
    let mut session = mounted_ready(EffectConfig::default(), rect);
    assert_eq!(session.state(), SurfaceState::Ready);

    let first = session.pointer_move(300.0, 300.0, rect).unwrap();
    assert!(approx(first, PointerSample::new(0.5, 0.5)));
    let second = session.pointer_move(450.0, 150.0, rect).unwrap();
    assert!(approx(second, PointerSample::new(0.75, 0.75)));
    assert!(approx(session.effect().unwrap().pointer(), second));

    let start = Instant::now();
    for i in 1..=5 {
        let dt = session.tick(start + Duration::from_millis(16 * i)).unwrap();
        assert!(dt >= 0.0);
    }

    let (released, _) = session.dispose();
    assert!(released);
    assert_eq!(session.state(), SurfaceState::Disposed);
    assert!(session.tick(Instant::now()).is_none());
}

#[test]
fn offset_container_uses_its_own_rect() {
    let rect = ContainerRect::new(100.0, 50.0, 200.0, 100.0);
    let mut session = mounted_ready(EffectConfig::new(EffectKind::GridAberration), rect);
    let s = session.pointer_move(150.0, 75.0, rect).unwrap();
    assert!(approx(s, PointerSample::new(0.25, 0.75)));
}

#[test]
fn samples_inside_the_container_stay_in_unit_square() {
    let rect = ContainerRect::new(12.0, 34.0, 321.0, 123.0);
    let mut session = mounted_ready(EffectConfig::default(), rect);
    for ix in 0..=10 {
        for iy in 0..=10 {
            let cx = rect.left + rect.width * ix as f32 / 10.0;
            let cy = rect.top + rect.height * iy as f32 / 10.0;
            let s = session.pointer_move(cx, cy, rect).unwrap();
            assert!((0.0..=1.0).contains(&s.x), "{:?}", s);
            assert!((0.0..=1.0).contains(&s.y), "{:?}", s);
            // Larger client Y means lower on screen, so a smaller sample.
            assert!((s.y - (1.0 - iy as f32 / 10.0)).abs() < 1e-5);
        }
    }
}

#[test]
fn second_mount_is_a_no_op() {
    let mut session = EffectSession::new(EffectConfig::default());
    let ticket = session.mount(ContainerRect::sized(10.0, 10.0)).unwrap();
    assert!(session.mount(ContainerRect::sized(20.0, 20.0)).is_err());
    assert_eq!(session.state(), SurfaceState::Initializing);
    assert_eq!(session.rect(), ContainerRect::sized(10.0, 10.0));
    assert!(session.asset_ready(ticket, Instant::now()));
    assert!(session.mount(ContainerRect::sized(20.0, 20.0)).is_err());
    assert_eq!(session.state(), SurfaceState::Ready);
}

#[test]
fn re_enter_within_delay_never_flickers() {
    let rect = ContainerRect::sized(600.0, 600.0);
    let mut session = mounted_ready(EffectConfig::default(), rect);

    assert!(!session.effect().unwrap().distortion_enabled());
    session.pointer_enter();
    assert!(session.effect().unwrap().distortion_enabled());

    let GateCommand::Arm { delay, token } = session.pointer_leave() else {
        panic!("delayed policy should arm a timer");
    };
    assert_eq!(delay, Duration::from_millis(500));
    assert!(session.effect().unwrap().distortion_enabled());

    assert_eq!(session.pointer_enter(), GateCommand::Cancel { token });
    assert!(session.effect().unwrap().distortion_enabled());

    // A timer that slipped past the cancel must not switch it off.
    session.deferred_fire(token);
    assert!(session.effect().unwrap().distortion_enabled());
}

#[test]
fn deactivation_fires_after_leave() {
    let mut session = mounted_ready(EffectConfig::default(), ContainerRect::sized(50.0, 50.0));
    session.pointer_enter();
    let GateCommand::Arm { token, .. } = session.pointer_leave() else {
        panic!("expected arm");
    };
    session.deferred_fire(token);
    assert!(!session.effect().unwrap().distortion_enabled());
}

#[test]
fn immediate_policy_disables_on_leave() {
    let config = EffectConfig {
        leave_policy: LeavePolicy::Immediate,
        ..Default::default()
    };
    let mut session = mounted_ready(config, ContainerRect::sized(50.0, 50.0));
    session.pointer_enter();
    assert!(session.effect().unwrap().distortion_enabled());
    assert_eq!(session.pointer_leave(), GateCommand::None);
    assert!(!session.effect().unwrap().distortion_enabled());
}

#[test]
fn asset_failure_leaves_surface_inert() {
    let mut session = EffectSession::new(EffectConfig::default());
    let ticket = session.mount(ContainerRect::sized(600.0, 600.0)).unwrap();
    let err = FxError::AssetFetch {
        url: "missing.png".into(),
        reason: "404".into(),
    };
    assert!(err.is_asset_failure());
    assert!(session.asset_failed(ticket, &err));

    assert_eq!(session.state(), SurfaceState::Failed);
    assert!(session.state().is_mounted());
    assert_eq!(session.diagnostics(), 1);
    assert!(session.effect().is_none());
    assert!(session.tick(Instant::now()).is_none());
    assert!(session
        .pointer_move(1.0, 1.0, ContainerRect::sized(600.0, 600.0))
        .is_none());

    // Unmount still tears down exactly once.
    assert!(session.dispose().0);
    assert!(!session.dispose().0);
}

#[test]
fn image_over_texture_limit_fails_without_panicking() {
    let limits = wgpu::Limits::default();
    let max = limits.max_texture_dimension_2d;
    let image = RgbaImage::new(max + 1, 1);
    let (w, h) = image.dimensions();
    let err = ImageTexture::check_size(w, h, &limits).unwrap_err();

    let mut session = EffectSession::new(EffectConfig::new(EffectKind::GridAberration));
    let ticket = session.mount(ContainerRect::sized(600.0, 600.0)).unwrap();
    assert!(session.asset_failed(ticket, &err));
    assert_eq!(session.state(), SurfaceState::Failed);
    assert_eq!(session.diagnostics(), 1);
    assert!(session.tick(Instant::now()).is_none());
    assert!(session.dispose().0);
}

#[test]
fn unmount_before_asset_arrives_discards_it() {
    let mut session = EffectSession::new(EffectConfig::default());
    let ticket = session.mount(ContainerRect::sized(600.0, 600.0)).unwrap();
    assert!(session.dispose().0);
    assert!(!session.asset_ready(ticket, Instant::now()));
    assert!(session.effect().is_none());
    assert_eq!(session.state(), SurfaceState::Disposed);
}

#[test]
fn remount_after_unmount_ignores_stale_ticket() {
    let mut session = EffectSession::new(EffectConfig::default());
    let stale = session.mount(ContainerRect::sized(600.0, 600.0)).unwrap();
    session.dispose();
    let fresh = session.mount(ContainerRect::sized(600.0, 600.0)).unwrap();
    assert!(!session.asset_ready(stale, Instant::now()));
    assert_eq!(session.state(), SurfaceState::Initializing);
    assert!(session.asset_ready(fresh, Instant::now()));
    assert_eq!(session.state(), SurfaceState::Ready);
}

#[test]
fn resize_updates_camera_aspect() {
    let mut session = mounted_ready(EffectConfig::default(), ContainerRect::sized(600.0, 600.0));
    session.resize(ContainerRect::sized(900.0, 300.0));
    assert!((session.camera().unwrap().aspect - 3.0).abs() < 1e-6);
}
