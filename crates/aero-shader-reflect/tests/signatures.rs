mod common;

use aero_shader_reflect::{
    ComponentMask, InOutSignature, ReflectError, SignatureRegistry, SystemValue,
};
use pretty_assertions::assert_eq;

fn gs_outputs() -> SignatureRegistry {
    SignatureRegistry::new(
        vec![InOutSignature::new("SV_Position", 0, ComponentMask::XYZW)
            .with_system_value(SystemValue::Position)],
        vec![
            InOutSignature::new("SV_Position", 0, ComponentMask::XYZW)
                .with_system_value(SystemValue::Position),
            InOutSignature::new("TEXCOORD", 1, ComponentMask::XY),
            InOutSignature::new("TEXCOORD", 1, ComponentMask::Z).with_semantic_index(1),
            InOutSignature::new("COLOR", 1, ComponentMask::XYZW).with_stream(1),
            InOutSignature::new("SV_Target", 2, ComponentMask::XYZW)
                .with_system_value(SystemValue::Target)
                .with_semantic_index(1),
        ],
        Vec::new(),
    )
}

#[test]
fn output_lookup_uses_mask_intersection() {
    common::init_tracing();
    let sigs = gs_outputs();

    let hit = sigs
        .find_output(1, ComponentMask::Y | ComponentMask::Z, 0, false)
        .unwrap()
        .expect("xy overlaps yz");
    assert_eq!(hit.semantic_name, "TEXCOORD");
    assert_eq!(hit.semantic_index, 0);

    let hit = sigs
        .find_output(1, ComponentMask::Z | ComponentMask::W, 0, false)
        .unwrap()
        .expect("z entry overlaps zw");
    assert_eq!(hit.semantic_index, 1);

    assert_eq!(sigs.find_output(1, ComponentMask::W, 0, true), Ok(None));
    assert_eq!(
        sigs.find_output(1, ComponentMask::W, 0, false),
        Err(ReflectError::MissingOutputSignature {
            register: 1,
            mask: ComponentMask::W,
            stream: 0
        })
    );
}

#[test]
fn output_lookup_matches_stream() {
    let sigs = gs_outputs();
    let hit = sigs
        .find_output(1, ComponentMask::W, 1, false)
        .unwrap()
        .unwrap();
    assert_eq!(hit.semantic_name, "COLOR");
    assert_eq!(sigs.find_output(0, ComponentMask::X, 1, true), Ok(None));
}

#[test]
fn xy_signature_against_yz_and_zw_queries() {
    let sigs = SignatureRegistry::new(
        Vec::new(),
        vec![InOutSignature::new("TEXCOORD", 3, ComponentMask::XY)],
        Vec::new(),
    );
    assert!(sigs
        .find_output(3, ComponentMask::Y | ComponentMask::Z, 0, true)
        .unwrap()
        .is_some());
    assert!(sigs
        .find_output(3, ComponentMask::Z | ComponentMask::W, 0, true)
        .unwrap()
        .is_none());
}

#[test]
fn system_value_lookup_is_exact_and_mandatory() {
    let sigs = gs_outputs();
    assert_eq!(
        sigs.find_output_by_system_value(SystemValue::Target, 1)
            .map(|s| s.register),
        Ok(2)
    );
    assert_eq!(
        sigs.find_output_by_system_value(SystemValue::Target, 0),
        Err(ReflectError::MissingSystemValueOutput {
            system_value: SystemValue::Target,
            semantic_index: 0
        })
    );
}

#[test]
fn input_lookup_is_first_superset_match() {
    let sigs = gs_outputs();
    let hit = sigs
        .find_input(0, ComponentMask::XY, false)
        .unwrap()
        .unwrap();
    assert_eq!(hit.system_value, SystemValue::Position);
    assert!(sigs.find_input(3, ComponentMask::X, false).is_err());
}
