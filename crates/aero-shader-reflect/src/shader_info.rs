//! Per-shader reflection snapshot queried by the emitter.

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::bindings::BindingRegistry;
use crate::cbuffer::{ConstantBuffer, ShaderVar};
use crate::error::{ReflectError, Result};
use crate::layout::{resolve_offset, ResolvedVar, Swizzle, TranslateFlags};
use crate::precision::SamplerPrecisionInfo;
use crate::resource::{ResourceBinding, ResourceGroup, ScalarType};
use crate::signature::SignatureRegistry;

/// Shader model version from the bytecode's version token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShaderModel {
    pub major: u32,
    pub minor: u32,
}

impl ShaderModel {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// SM4+ reflection describes each constant buffer individually.
    pub const fn has_constant_buffers(self) -> bool {
        self.major > 3
    }
}

impl fmt::Display for ShaderModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.major, self.minor)
    }
}

/// Reflection snapshot of one shader, built once before translation and queried by the emitter.
///
/// Everything except binding precisions is read-only after construction.
#[derive(Debug, Clone)]
pub struct ShaderInfo {
    shader_model: ShaderModel,
    bindings: BindingRegistry,
    signatures: SignatureRegistry,
    constant_buffers: Vec<ConstantBuffer>,
    /// `b#` → index into `constant_buffers`.
    cbuffer_slots: BTreeMap<u32, usize>,
    this_pointer: Option<ConstantBuffer>,
}

impl ShaderInfo {
    pub fn new(
        shader_model: ShaderModel,
        bindings: Vec<ResourceBinding>,
        signatures: SignatureRegistry,
        constant_buffers: Vec<ConstantBuffer>,
    ) -> Result<Self> {
        let bindings = BindingRegistry::new(bindings)?;

        let mut cbuffer_slots = BTreeMap::new();
        for (index, cb) in constant_buffers.iter().enumerate() {
            if cbuffer_slots.insert(cb.bind_point, index).is_some() {
                debug!(
                    bind_point = cb.bind_point,
                    name = %cb.name,
                    "constant buffer slot declared twice; keeping the later one"
                );
            }
        }

        Ok(Self {
            shader_model,
            bindings,
            signatures,
            constant_buffers,
            cbuffer_slots,
            this_pointer: None,
        })
    }

    /// Attaches the constant buffer backing class-instance `this` pointers.
    pub fn with_this_pointer(mut self, cb: ConstantBuffer) -> Self {
        self.this_pointer = Some(cb);
        self
    }

    pub fn shader_model(&self) -> ShaderModel {
        self.shader_model
    }

    pub fn bindings(&self) -> &BindingRegistry {
        &self.bindings
    }

    pub fn signatures(&self) -> &SignatureRegistry {
        &self.signatures
    }

    pub fn constant_buffers(&self) -> &[ConstantBuffer] {
        &self.constant_buffers
    }

    pub fn find_binding(&self, group: ResourceGroup, bind_point: u32) -> Option<&ResourceBinding> {
        self.bindings.find_binding(group, bind_point)
    }

    pub fn texture_data_type(&self, register: u32) -> Result<ScalarType> {
        self.bindings.texture_data_type(register)
    }

    /// Constant buffer bound at `b{bind_point}`.
    pub fn constant_buffer_at(&self, bind_point: u32) -> Result<&ConstantBuffer> {
        if !self.shader_model.has_constant_buffers() {
            return Err(ReflectError::ConstantBuffersUnavailable {
                major: self.shader_model.major,
                minor: self.shader_model.minor,
            });
        }
        self.cbuffer_slots
            .get(&bind_point)
            .and_then(|&index| self.constant_buffers.get(index))
            .ok_or(ReflectError::MissingConstantBuffer { bind_point })
    }

    /// Resolves `cb{bind_point}[vec4_offset].<swizzle>` to a declared variable.
    pub fn resolve_constant(
        &self,
        bind_point: u32,
        vec4_offset: u32,
        swizzle: Swizzle,
        flags: TranslateFlags,
    ) -> Result<Option<ResolvedVar<'_>>> {
        let cb = self.constant_buffer_at(bind_point)?;
        Ok(resolve_offset(cb, vec4_offset, swizzle, flags))
    }

    /// Variable of the `this` pointer buffer whose byte range contains `offset`.
    pub fn interface_var_at(&self, offset: u32) -> Option<&ShaderVar> {
        self.this_pointer.as_ref()?.variable_at(offset)
    }

    /// One-shot pass applying caller supplied precision hints to textures and samplers.
    pub fn annotate_sampler_precision(&mut self, info: &SamplerPrecisionInfo) {
        self.bindings.annotate_precision(info);
    }
}
