#![allow(dead_code)]

use aero_shader_reflect::{ConstantBuffer, TypeDesc};
use tracing_subscriber::filter::LevelFilter;

/// Routes the crate's `tracing` output through the test harness so it shows up on failure.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(LevelFilter::TRACE)
        .with_test_writer()
        .try_init();
}

/// ```hlsl
/// cbuffer cbUIUpdates : register(b1)
/// {
///   float g_fLifeSpan;     // Offset:    0 Size:     4
///   float g_fLifeSpanVar;  // Offset:    4 Size:     4
///   float g_fRadiusMin;    // Offset:    8 Size:     4
///   float g_fRadiusMax;    // Offset:   12 Size:     4
///   float g_fGrowTime;     // Offset:   16 Size:     4
///   float g_fStepSize;     // Offset:   20 Size:     4
///   float g_fTurnRate;     // Offset:   24 Size:     4
///   float g_fTurnSpeed;    // Offset:   28 Size:     4
///   float g_fLeafRate;     // Offset:   32 Size:     4
///   float g_fShrinkTime;   // Offset:   36 Size:     4
///   uint g_uMaxFaces;      // Offset:   40 Size:     4
/// }
/// ```
pub fn ui_updates() -> ConstantBuffer {
    let names = [
        "g_fLifeSpan",
        "g_fLifeSpanVar",
        "g_fRadiusMin",
        "g_fRadiusMax",
        "g_fGrowTime",
        "g_fStepSize",
        "g_fTurnRate",
        "g_fTurnSpeed",
        "g_fLeafRate",
        "g_fShrinkTime",
        "g_uMaxFaces",
    ];
    names
        .iter()
        .enumerate()
        .fold(ConstantBuffer::new("cbUIUpdates", 1), |cb, (i, name)| {
            cb.with_variable(i as u32 * 4, 4, TypeDesc::scalar(*name, 0))
        })
}

/// ```hlsl
/// struct Light { float3 pos; float range; float4 color; };
/// cbuffer Lighting : register(b2)
/// {
///   Light lights[4];   // Offset:    0 Size:   128
///   float fogDensity;  // Offset:  128 Size:     4
/// }
/// ```
pub fn lighting() -> ConstantBuffer {
    ConstantBuffer::new("Lighting", 2)
        .with_variable(
            0,
            128,
            TypeDesc::structure(
                "lights",
                0,
                vec![
                    TypeDesc::vector("pos", 0, 3),
                    TypeDesc::scalar("range", 12),
                    TypeDesc::vector("color", 16, 4),
                ],
            )
            .array(4),
        )
        .with_variable(128, 4, TypeDesc::scalar("fogDensity", 0))
}
