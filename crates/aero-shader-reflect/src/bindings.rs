//! Register → declared resource lookups.

use tracing::debug;

use crate::error::{ReflectError, Result};
use crate::precision::SamplerPrecisionInfo;
use crate::resource::{ResourceBinding, ResourceGroup, ResourceKind, ScalarType};

/// The flat list of resources a shader declares, in declaration order.
///
/// Bind-point ranges of bindings in the same [`ResourceGroup`] are expected not to overlap; this is
/// guaranteed by the decoder and not re-validated here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingRegistry {
    bindings: Vec<ResourceBinding>,
}

impl BindingRegistry {
    /// Builds the registry, rejecting resource kinds that cannot be classified into a group.
    pub fn new(bindings: Vec<ResourceBinding>) -> Result<Self> {
        for binding in &bindings {
            binding.kind.group()?;
        }
        Ok(Self { bindings })
    }

    pub fn bindings(&self) -> &[ResourceBinding] {
        &self.bindings
    }

    /// Returns the first binding in `group` whose register range contains `bind_point`.
    pub fn find_binding(&self, group: ResourceGroup, bind_point: u32) -> Option<&ResourceBinding> {
        self.bindings
            .iter()
            .filter(|b| b.kind.group().ok() == Some(group))
            .find(|b| b.covers(bind_point))
    }

    /// Element type of the texture bound at `t{register}`.
    ///
    /// Only called once the register is known to be sampled as a texture, so a missing binding
    /// is an inconsistency in the shader rather than a normal miss.
    pub fn texture_data_type(&self, register: u32) -> Result<ScalarType> {
        self.find_binding(ResourceGroup::Texture, register)
            .map(ResourceBinding::data_type)
            .ok_or(ReflectError::MissingTextureBinding { register })
    }

    /// Applies per-name precision hints to texture and sampler bindings.
    ///
    /// Bindings without a matching hint keep their current precision.
    pub fn annotate_precision(&mut self, info: &SamplerPrecisionInfo) {
        if info.is_empty() {
            return;
        }

        for binding in &mut self.bindings {
            if !matches!(binding.kind, ResourceKind::Sampler | ResourceKind::Texture) {
                continue;
            }
            if let Some(precision) = info.lookup(&binding.name) {
                debug!(name = %binding.name, ?precision, "applying precision hint");
                binding.precision = precision;
            }
        }
    }
}
