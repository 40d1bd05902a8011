//! Resource binding records (`RDEF` bound resources) and their register groups.

use crate::error::{ReflectError, Result};

/// Kind of a bound resource (`D3D_SHADER_INPUT_TYPE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    CBuffer,
    TBuffer,
    Texture,
    Sampler,
    UavRwTyped,
    Structured,
    UavRwStructured,
    ByteAddress,
    UavRwByteAddress,
    UavAppendStructured,
    UavConsumeStructured,
    UavRwStructuredWithCounter,
}

impl ResourceKind {
    pub const fn from_d3d_u32(v: u32) -> Option<Self> {
        match v {
            0 => Some(Self::CBuffer),
            1 => Some(Self::TBuffer),
            2 => Some(Self::Texture),
            3 => Some(Self::Sampler),
            4 => Some(Self::UavRwTyped),
            5 => Some(Self::Structured),
            6 => Some(Self::UavRwStructured),
            7 => Some(Self::ByteAddress),
            8 => Some(Self::UavRwByteAddress),
            9 => Some(Self::UavAppendStructured),
            10 => Some(Self::UavConsumeStructured),
            11 => Some(Self::UavRwStructuredWithCounter),
            _ => None,
        }
    }

    /// Register group this kind is bound through.
    ///
    /// `tbuffer` has never been classified and is rejected.
    pub fn group(self) -> Result<ResourceGroup> {
        match self {
            Self::CBuffer => Ok(ResourceGroup::CBuffer),
            Self::Sampler => Ok(ResourceGroup::Sampler),
            Self::Texture | Self::ByteAddress | Self::Structured => Ok(ResourceGroup::Texture),
            Self::UavRwTyped
            | Self::UavRwStructured
            | Self::UavRwByteAddress
            | Self::UavAppendStructured
            | Self::UavConsumeStructured
            | Self::UavRwStructuredWithCounter => Ok(ResourceGroup::Uav),
            Self::TBuffer => Err(ReflectError::UnsupportedResourceKind(self)),
        }
    }
}

/// Shorthand for [`ResourceKind::group`].
pub fn resource_group_of(kind: ResourceKind) -> Result<ResourceGroup> {
    kind.group()
}

/// D3D register spaces: `b#`, `s#`, `t#` and `u#`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResourceGroup {
    CBuffer,
    Sampler,
    Texture,
    Uav,
}

/// Return type of a typed resource (`D3D_RESOURCE_RETURN_TYPE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReturnType {
    Unorm,
    Snorm,
    Sint,
    Uint,
    #[default]
    Float,
    Mixed,
    Double,
    Continued,
}

impl ReturnType {
    pub const fn from_d3d_u32(v: u32) -> Option<Self> {
        match v {
            1 => Some(Self::Unorm),
            2 => Some(Self::Snorm),
            3 => Some(Self::Sint),
            4 => Some(Self::Uint),
            5 => Some(Self::Float),
            6 => Some(Self::Mixed),
            7 => Some(Self::Double),
            8 => Some(Self::Continued),
            _ => None,
        }
    }
}

/// Scalar element type as seen by the emitted shader source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    Bool,
    Int,
    Uint,
    Float,
    Double,
}

/// Precision qualifier attached to textures and samplers for GLSL ES style targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Precision {
    #[default]
    Unknown,
    Low,
    Medium,
    High,
}

impl Precision {
    /// GLSL qualifier keyword, or `None` when no precision was requested.
    pub const fn qualifier(self) -> Option<&'static str> {
        match self {
            Self::Unknown => None,
            Self::Low => Some("lowp"),
            Self::Medium => Some("mediump"),
            Self::High => Some("highp"),
        }
    }
}

/// A bound resource as declared in the shader's resource definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceBinding {
    pub name: String,
    pub kind: ResourceKind,
    pub bind_point: u32,
    /// Number of consecutive registers covered, e.g. the length of a texture array.
    pub bind_count: u32,
    pub return_type: ReturnType,
    pub precision: Precision,
}

impl ResourceBinding {
    pub fn new(name: impl Into<String>, kind: ResourceKind, bind_point: u32) -> Self {
        Self {
            name: name.into(),
            kind,
            bind_point,
            bind_count: 1,
            return_type: ReturnType::default(),
            precision: Precision::default(),
        }
    }

    pub fn with_bind_count(mut self, bind_count: u32) -> Self {
        self.bind_count = bind_count;
        self
    }

    pub fn with_return_type(mut self, return_type: ReturnType) -> Self {
        self.return_type = return_type;
        self
    }

    /// Returns true if `register` falls inside `[bind_point, bind_point + bind_count)`.
    pub fn covers(&self, register: u32) -> bool {
        register >= self.bind_point && u64::from(register) < self.range_end()
    }

    fn range_end(&self) -> u64 {
        u64::from(self.bind_point) + u64::from(self.bind_count)
    }

    /// Element data type inferred from the declared return type.
    pub fn data_type(&self) -> ScalarType {
        match self.return_type {
            ReturnType::Sint => ScalarType::Int,
            ReturnType::Uint => ScalarType::Uint,
            ReturnType::Double => ScalarType::Double,
            _ => ScalarType::Float,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_supported_kind_maps_to_one_group() {
        for raw in 0..=11 {
            let kind = ResourceKind::from_d3d_u32(raw).expect("known shader input type");
            if kind == ResourceKind::TBuffer {
                continue;
            }
            assert!(kind.group().is_ok(), "{kind:?} should have a group");
        }
        assert_eq!(ResourceKind::from_d3d_u32(12), None);
    }

    #[test]
    fn buffers_share_the_texture_group() {
        assert_eq!(ResourceKind::Structured.group(), Ok(ResourceGroup::Texture));
        assert_eq!(ResourceKind::ByteAddress.group(), Ok(ResourceGroup::Texture));
        assert_eq!(ResourceKind::UavRwByteAddress.group(), Ok(ResourceGroup::Uav));
        assert_eq!(
            ResourceKind::UavRwStructuredWithCounter.group(),
            Ok(ResourceGroup::Uav)
        );
    }

    #[test]
    fn tbuffer_is_rejected() {
        assert_eq!(
            resource_group_of(ResourceKind::TBuffer),
            Err(ReflectError::UnsupportedResourceKind(ResourceKind::TBuffer))
        );
    }

    #[test]
    fn covers_handles_ranges_at_u32_max() {
        let b = ResourceBinding::new("tex", ResourceKind::Texture, u32::MAX).with_bind_count(4);
        assert!(b.covers(u32::MAX));
        assert!(!b.covers(u32::MAX - 1));
    }

    #[test]
    fn data_type_follows_return_type() {
        let tex = ResourceBinding::new("t", ResourceKind::Texture, 0);
        assert_eq!(tex.data_type(), ScalarType::Float);
        assert_eq!(
            tex.clone().with_return_type(ReturnType::Sint).data_type(),
            ScalarType::Int
        );
        assert_eq!(
            tex.with_return_type(ReturnType::Uint).data_type(),
            ScalarType::Uint
        );
    }
}
