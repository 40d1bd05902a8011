//! Shader reflection queries for the DXBC → GLSL/WGSL translators.
//!
//! The decoder hands over already-parsed metadata (resource bindings, signatures, constant buffer
//! variable trees); this crate answers the questions the emitter asks while walking the
//! instruction stream:
//!
//! - which declared resource or signature element a register refers to
//!   ([`BindingRegistry`], [`SignatureRegistry`]),
//! - which named, possibly array-indexed, variable a `cb#[n].swizzle` operand reads
//!   ([`resolve_offset`], reproducing HLSL constant buffer packing),
//! - the source-level name to emit for it ([`indexed_full_name`]).
//!
//! A missing entry is `Ok(None)` when the caller allows it; contradictions between the
//! shader's metadata and the query are [`ReflectError`]s.

#![forbid(unsafe_code)]

mod bindings;
mod cbuffer;
mod error;
mod layout;
mod naming;
mod precision;
mod resource;
mod shader_info;
mod signature;

pub use crate::bindings::BindingRegistry;
pub use crate::cbuffer::{
    ConstantBuffer, ShaderVar, ShaderVarType, TypeDesc, TypeId, TypeTree, VarClass,
};
pub use crate::error::{ReflectError, Result};
pub use crate::layout::{
    locate, packed_size, resolve_offset, Located, ResolvedVar, Swizzle, TranslateFlags, VEC4_SIZE,
};
pub use crate::naming::indexed_full_name;
pub use crate::precision::SamplerPrecisionInfo;
pub use crate::resource::{
    resource_group_of, Precision, ResourceBinding, ResourceGroup, ResourceKind, ReturnType,
    ScalarType,
};
pub use crate::shader_info::{ShaderInfo, ShaderModel};
pub use crate::signature::{ComponentMask, InOutSignature, SignatureRegistry, SystemValue};
