// Composed WGSL must parse and validate, and the grid falloff must behave
// like a bump centered on the pointer.

use fx_core::effect::{self, compose_shader, SHADER_CONSTANTS};
use fx_core::sampling::{falloff, grid_cell_center, grid_strength};
use fx_core::{EffectConfig, EffectKind, GRID_CELLS, GRID_FALLOFF_RADIUS};
use glam::Vec2;

fn validate(kind: EffectKind) {
    let fx = effect::build(&EffectConfig::new(kind));
    let src = compose_shader(fx.as_ref());
    let module = naga::front::wgsl::parse_str(&src)
        .unwrap_or_else(|e| panic!("{} shader failed to parse: {}", kind, e.emit_to_string(&src)));
    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::empty(),
    )
    .validate(&module)
    .unwrap_or_else(|e| panic!("{} shader failed validation: {:?}", kind, e));

    let entry_points: Vec<&str> = module.entry_points.iter().map(|e| e.name.as_str()).collect();
    assert!(entry_points.contains(&"vs_main"));
    assert!(entry_points.contains(&"fs_main"));
}

#[test]
fn ripple_shader_validates() {
    validate(EffectKind::HoverRipple);
}

#[test]
fn grid_shader_validates() {
    validate(EffectKind::GridAberration);
}

#[test]
fn uniform_block_matches_shader_struct_size() {
    for kind in [EffectKind::HoverRipple, EffectKind::GridAberration] {
        let fx = effect::build(&EffectConfig::new(kind));
        let src = compose_shader(fx.as_ref());
        let module = naga::front::wgsl::parse_str(&src).unwrap();
        let ty = module
            .types
            .iter()
            .find(|(_, t)| t.name.as_deref() == Some("EffectUniforms"))
            .map(|(_, t)| t)
            .unwrap();
        let naga::TypeInner::Struct { span, .. } = ty.inner else {
            panic!("EffectUniforms is not a struct");
        };
        assert_eq!(span as usize, fx.uniform_bytes().len(), "{}", kind);
    }
}

#[test]
fn shader_constants_carry_the_rust_values() {
    for kind in [EffectKind::HoverRipple, EffectKind::GridAberration] {
        let fx = effect::build(&EffectConfig::new(kind));
        let src = compose_shader(fx.as_ref());
        let module = naga::front::wgsl::parse_str(&src).unwrap();
        for (name, value) in SHADER_CONSTANTS {
            let (_, c) = module
                .constants
                .iter()
                .find(|(_, c)| c.name.as_deref() == Some(name))
                .unwrap_or_else(|| panic!("{} missing from {} shader", name, kind));
            match module.global_expressions[c.init] {
                naga::Expression::Literal(naga::Literal::F32(v)) => {
                    assert_eq!(v, value, "{} in {} shader", name, kind)
                }
                ref other => panic!("{} is not an f32 literal: {:?}", name, other),
            }
        }
    }
}

#[test]
fn fragment_stages_have_no_inline_tuning_literals() {
    for src in [fx_core::RIPPLE_WGSL, fx_core::GRID_WGSL] {
        for literal in ["0.005", "0.01", "10.0", "5.0"] {
            assert!(!src.contains(literal), "inline {} in fragment stage", literal);
        }
    }
}

#[test]
fn strength_peaks_at_cell_center() {
    let pointer = grid_cell_center(Vec2::new(0.52, 0.47), GRID_CELLS);
    let s = grid_strength(pointer, pointer, GRID_CELLS, GRID_FALLOFF_RADIUS);
    assert!((s - 1.0).abs() < 1e-6);
}

#[test]
fn strength_decreases_with_distance_and_vanishes_outside_radius() {
    let mut last = falloff(0.0, GRID_FALLOFF_RADIUS);
    let steps = 60;
    for i in 1..=steps {
        let d = GRID_FALLOFF_RADIUS * 1.5 * i as f32 / steps as f32;
        let s = falloff(d, GRID_FALLOFF_RADIUS);
        assert!(s <= last + 1e-7, "not monotonic at {}", d);
        assert!((0.0..=1.0).contains(&s));
        if d >= GRID_FALLOFF_RADIUS {
            assert_eq!(s, 0.0);
        }
        last = s;
    }
}

#[test]
fn cells_far_from_pointer_are_untouched() {
    let pointer = Vec2::new(0.1, 0.1);
    let far = Vec2::new(0.9, 0.9);
    assert_eq!(grid_strength(far, pointer, GRID_CELLS, GRID_FALLOFF_RADIUS), 0.0);
}
