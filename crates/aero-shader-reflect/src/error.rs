use thiserror::Error;

use crate::resource::ResourceKind;
use crate::signature::{ComponentMask, SystemValue};

/// Result alias used by every fallible query in this crate.
pub type Result<T, E = ReflectError> = core::result::Result<T, E>;

/// Consistency violations detected while querying a [`crate::ShaderInfo`].
///
/// Every variant means the shader's declared metadata contradicts what the emitter asked for.
/// Expected absence (e.g. "no input declared at this register") is reported as `Ok(None)` by the
/// lookups that take an `allow_missing` argument, never through this type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReflectError {
    #[error("resource kind {0:?} has no binding group")]
    UnsupportedResourceKind(ResourceKind),
    #[error("no texture binding covers t{register}")]
    MissingTextureBinding { register: u32 },
    #[error("no constant buffer is bound at b{bind_point}")]
    MissingConstantBuffer { bind_point: u32 },
    #[error("shader model {major}.{minor} carries no per-buffer constant buffer reflection")]
    ConstantBuffersUnavailable { major: u32, minor: u32 },
    #[error("input signature does not declare v{register} with components {mask:?}")]
    MissingInputSignature { register: u32, mask: ComponentMask },
    #[error("output signature does not declare o{register} with components {mask:?} on stream {stream}")]
    MissingOutputSignature {
        register: u32,
        mask: ComponentMask,
        stream: u32,
    },
    #[error("output signature lookup for o{register} used an empty component mask")]
    EmptyOutputMask { register: u32 },
    #[error("output signature has no {system_value:?} with semantic index {semantic_index}")]
    MissingSystemValueOutput {
        system_value: SystemValue,
        semantic_index: u32,
    },
    #[error("patch constant signature does not declare register {register} (components {mask:?})")]
    MissingPatchConstantSignature { register: u32, mask: ComponentMask },
}
