//! Input/output/patch-constant signatures (`ISGN`/`OSGN`/`PCSG` and their v1 variants) and the
//! register lookups the emitter runs against them.

use bitflags::bitflags;
use tracing::debug;

use crate::error::{ReflectError, Result};

bitflags! {
    /// Component presence mask (`D3D_COMPONENT_MASK`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ComponentMask: u8 {
        const X = 0b0001;
        const Y = 0b0010;
        const Z = 0b0100;
        const W = 0b1000;
        const XY = Self::X.bits() | Self::Y.bits();
        const XYZ = Self::XY.bits() | Self::Z.bits();
        const XYZW = Self::XYZ.bits() | Self::W.bits();
    }
}

/// System value a signature element is bound to (`D3D_NAME`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SystemValue {
    #[default]
    Undefined,
    Position,
    ClipDistance,
    CullDistance,
    RenderTargetArrayIndex,
    ViewportArrayIndex,
    VertexId,
    PrimitiveId,
    InstanceId,
    IsFrontFace,
    SampleIndex,
    FinalQuadEdgeTessFactor,
    FinalQuadInsideTessFactor,
    FinalTriEdgeTessFactor,
    FinalTriInsideTessFactor,
    FinalLineDetailTessFactor,
    FinalLineDensityTessFactor,
    Target,
    Depth,
    Coverage,
    DepthGreaterEqual,
    DepthLessEqual,
    StencilRef,
    InnerCoverage,
}

impl SystemValue {
    pub const fn from_d3d_u32(v: u32) -> Option<Self> {
        Some(match v {
            0 => Self::Undefined,
            1 => Self::Position,
            2 => Self::ClipDistance,
            3 => Self::CullDistance,
            4 => Self::RenderTargetArrayIndex,
            5 => Self::ViewportArrayIndex,
            6 => Self::VertexId,
            7 => Self::PrimitiveId,
            8 => Self::InstanceId,
            9 => Self::IsFrontFace,
            10 => Self::SampleIndex,
            11 => Self::FinalQuadEdgeTessFactor,
            12 => Self::FinalQuadInsideTessFactor,
            13 => Self::FinalTriEdgeTessFactor,
            14 => Self::FinalTriInsideTessFactor,
            15 => Self::FinalLineDetailTessFactor,
            16 => Self::FinalLineDensityTessFactor,
            64 => Self::Target,
            65 => Self::Depth,
            66 => Self::Coverage,
            67 => Self::DepthGreaterEqual,
            68 => Self::DepthLessEqual,
            69 => Self::StencilRef,
            70 => Self::InnerCoverage,
            _ => return None,
        })
    }
}

/// One declared interface slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InOutSignature {
    pub semantic_name: String,
    pub semantic_index: u32,
    pub system_value: SystemValue,
    pub register: u32,
    pub mask: ComponentMask,
    /// Geometry shader output stream; always 0 for other stages.
    pub stream: u32,
}

impl InOutSignature {
    pub fn new(semantic_name: impl Into<String>, register: u32, mask: ComponentMask) -> Self {
        Self {
            semantic_name: semantic_name.into(),
            semantic_index: 0,
            system_value: SystemValue::Undefined,
            register,
            mask,
            stream: 0,
        }
    }

    pub fn with_semantic_index(mut self, semantic_index: u32) -> Self {
        self.semantic_index = semantic_index;
        self
    }

    pub fn with_system_value(mut self, system_value: SystemValue) -> Self {
        self.system_value = system_value;
        self
    }

    pub fn with_stream(mut self, stream: u32) -> Self {
        self.stream = stream;
        self
    }
}

/// Ordered input, output and patch-constant signatures of one shader.
///
/// Lookups scan in declaration order; which entry wins on ties is part of the contract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignatureRegistry {
    pub inputs: Vec<InOutSignature>,
    pub outputs: Vec<InOutSignature>,
    pub patch_constants: Vec<InOutSignature>,
}

impl SignatureRegistry {
    pub fn new(
        inputs: Vec<InOutSignature>,
        outputs: Vec<InOutSignature>,
        patch_constants: Vec<InOutSignature>,
    ) -> Self {
        Self {
            inputs,
            outputs,
            patch_constants,
        }
    }

    /// First input at `register` declaring every component of `mask`.
    pub fn find_input(
        &self,
        register: u32,
        mask: ComponentMask,
        allow_missing: bool,
    ) -> Result<Option<&InOutSignature>> {
        match first_covering(&self.inputs, register, mask) {
            Some(sig) => Ok(Some(sig)),
            None if allow_missing => Ok(None),
            None => Err(ReflectError::MissingInputSignature { register, mask }),
        }
    }

    /// First output at `register` on `stream` declaring at least one component of `mask`.
    ///
    /// Outputs may be written a few components at a time, so any overlap counts as a match.
    pub fn find_output(
        &self,
        register: u32,
        mask: ComponentMask,
        stream: u32,
        allow_missing: bool,
    ) -> Result<Option<&InOutSignature>> {
        if mask.is_empty() {
            return Err(ReflectError::EmptyOutputMask { register });
        }

        let found = self
            .outputs
            .iter()
            .find(|sig| sig.register == register && sig.mask.intersects(mask) && sig.stream == stream);
        match found {
            Some(sig) => Ok(Some(sig)),
            None if allow_missing => Ok(None),
            None => Err(ReflectError::MissingOutputSignature {
                register,
                mask,
                stream,
            }),
        }
    }

    /// Output bound to `system_value` with the given semantic index.
    pub fn find_output_by_system_value(
        &self,
        system_value: SystemValue,
        semantic_index: u32,
    ) -> Result<&InOutSignature> {
        self.outputs
            .iter()
            .find(|sig| sig.system_value == system_value && sig.semantic_index == semantic_index)
            .ok_or(ReflectError::MissingSystemValueOutput {
                system_value,
                semantic_index,
            })
    }

    /// Like [`Self::find_input`], against the patch-constant signature.
    ///
    /// With `dcl_indexrange` the compiler can write components outside the declared masks. When
    /// no entry covers `mask`, the last entry declared at `register` is returned instead, not
    /// counting the final entry of the whole signature.
    pub fn find_patch_constant(
        &self,
        register: u32,
        mask: ComponentMask,
        allow_missing: bool,
    ) -> Result<Option<&InOutSignature>> {
        if let Some(sig) = first_covering(&self.patch_constants, register, mask) {
            return Ok(Some(sig));
        }

        // The last declared entry is never a fallback candidate.
        let candidates = &self.patch_constants[..self.patch_constants.len().saturating_sub(1)];
        if let Some(sig) = candidates.iter().rev().find(|sig| sig.register == register) {
            debug!(
                register,
                ?mask,
                declared = ?sig.mask,
                semantic = %sig.semantic_name,
                "patch constant write exceeds declared mask; using last entry at register"
            );
            return Ok(Some(sig));
        }

        if allow_missing {
            Ok(None)
        } else {
            Err(ReflectError::MissingPatchConstantSignature { register, mask })
        }
    }
}

fn first_covering(
    signatures: &[InOutSignature],
    register: u32,
    mask: ComponentMask,
) -> Option<&InOutSignature> {
    signatures
        .iter()
        .find(|sig| sig.register == register && sig.mask.contains(mask))
}
