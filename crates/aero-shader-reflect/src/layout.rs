//! HLSL constant buffer packing and offset → variable resolution.
//!
//! Packing rules reproduced here:
//! - every array element except the last starts on a 16-byte (vec4) boundary,
//! - a struct's size is the end of its last member,
//! - with [`TranslateFlags::TRANSLATE_MATRICES`], each matrix row (row-major) or column
//!   (column-major) takes a full vec4 slot,
//! - scalars and small vectors can share one vec4 slot; a vector that starts mid-slot is reported
//!   with a byte rebase so the emitter can shift its swizzle.

use bitflags::bitflags;
use tracing::{debug, trace};

use crate::cbuffer::{ConstantBuffer, ShaderVar, ShaderVarType, TypeId, TypeTree, VarClass};

/// Size of one constant register.
pub const VEC4_SIZE: u32 = 16;

bitflags! {
    /// Translation flags that affect how constant buffer contents are laid out.
    ///
    /// The same flags must be used for every size and offset computation of one lookup.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TranslateFlags: u32 {
        /// Matrices are emitted as arrays of vec4 rows/columns.
        const TRANSLATE_MATRICES = 1 << 0;
    }
}

impl TranslateFlags {
    pub fn matrices_as_vectors(self) -> bool {
        self.contains(Self::TRANSLATE_MATRICES)
    }
}

/// 4-component operand swizzle; each lane is 0..=3 for x/y/z/w.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swizzle(pub [u8; 4]);

impl Swizzle {
    pub const XYZW: Self = Self([0, 1, 2, 3]);
    pub const XXXX: Self = Self([0, 0, 0, 0]);
    pub const YYYY: Self = Self([1, 1, 1, 1]);
    pub const ZZZZ: Self = Self([2, 2, 2, 2]);
    pub const WWWW: Self = Self([3, 3, 3, 3]);

    /// Byte offset inside a vec4 selected by the first lane.
    pub fn first_component_offset(self) -> u32 {
        match self.0[0] {
            1 => 4,
            2 => 8,
            3 => 12,
            _ => 0,
        }
    }
}

fn align_vec4(size: u32) -> u32 {
    size.div_ceil(VEC4_SIZE) * VEC4_SIZE
}

/// Packed size in bytes of the type `id`.
///
/// With `whole_array_size`, arrays count every element, padding all but the last to a vec4
/// boundary. Otherwise the size of a single element is returned.
pub fn packed_size(
    tree: &TypeTree,
    id: TypeId,
    matrices_as_vectors: bool,
    whole_array_size: bool,
) -> u32 {
    let ty = tree.get(id);
    let mut size = ty.columns * ty.rows * 4;

    if ty.class == VarClass::Struct {
        size = match tree.last_member(id) {
            Some(last) => {
                let last_size = packed_size(tree, last, matrices_as_vectors, true);
                tree.get(last).offset.saturating_add(last_size)
            }
            None => 0,
        };
    } else if matrices_as_vectors {
        match ty.class {
            VarClass::MatrixRows => size = ty.rows * VEC4_SIZE,
            VarClass::MatrixColumns => size = ty.columns * VEC4_SIZE,
            _ => {}
        }
    }

    if whole_array_size && ty.is_array() {
        size = size.saturating_add((ty.elements - 1).saturating_mul(align_vec4(size)));
    }
    size
}

/// Result of [`locate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    /// The innermost type claiming the offset.
    pub ty: TypeId,
    /// The offset selects one vec4 slot of `ty` (an array element, or a matrix row/column).
    pub is_array: bool,
    /// Array indices from the outermost level inwards.
    pub indices: Vec<u32>,
    /// Byte offset of a vector that starts in the middle of a vec4 slot, else 0.
    pub rebase: u32,
}

/// Finds the type inside `id` (placed at `parent_offset`) that occupies byte `target`.
pub fn locate(
    tree: &TypeTree,
    id: TypeId,
    parent_offset: u32,
    target: u32,
    flags: TranslateFlags,
) -> Option<Located> {
    let mut indices = Vec::new();
    let mut rebase = 0;
    let (ty, is_array) =
        locate_in(tree, id, parent_offset, target, flags, &mut indices, &mut rebase)?;
    Some(Located {
        ty,
        is_array,
        indices,
        rebase,
    })
}

fn locate_in(
    tree: &TypeTree,
    id: TypeId,
    parent_offset: u32,
    target: u32,
    flags: TranslateFlags,
    indices: &mut Vec<u32>,
    rebase: &mut u32,
) -> Option<(TypeId, bool)> {
    let ty = tree.get(id);
    let this_offset = parent_offset.saturating_add(ty.offset);
    let this_size = packed_size(tree, id, flags.matrices_as_vectors(), false);
    let padded_size = align_vec4(this_size);
    let extent = match ty.elements {
        0 => this_size,
        n => padded_size.saturating_mul(n - 1).saturating_add(this_size),
    };

    if target < this_offset || target - this_offset >= extent {
        return None;
    }
    let rel = target - this_offset;

    match ty.class {
        VarClass::Struct => {
            if ty.is_array() {
                indices.push(rel / this_size);
            }
            // Fold an array-of-structs offset back into element zero.
            let offset_in_struct = rel % padded_size;
            for &member in ty.members() {
                if let Some(found) = locate_in(
                    tree,
                    member,
                    this_offset,
                    this_offset + offset_in_struct,
                    flags,
                    indices,
                    rebase,
                ) {
                    return Some(found);
                }
            }
            // Padding between members belongs to the struct itself.
            Some((id, false))
        }
        class if class.is_matrix() => {
            indices.push(rel / VEC4_SIZE);
            Some((id, true))
        }
        VarClass::Scalar | VarClass::Vector if ty.is_array() => {
            indices.push(rel / VEC4_SIZE);
            Some((id, true))
        }
        VarClass::Vector => {
            // cbuffer { float angle; float2 angle2; } puts angle2 in cb0[0].yz; its .x is the
            // slot's .y, so the emitter has to shift component selection by 4 bytes.
            *rebase = this_offset % VEC4_SIZE;
            if *rebase != 0 {
                debug!(name = %ty.full_name, rebase = *rebase, "vector starts mid-slot");
            }
            Some((id, false))
        }
        _ => Some((id, false)),
    }
}

/// A constant buffer variable resolved from a register offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVar<'a> {
    pub var: &'a ShaderVar,
    pub leaf_id: TypeId,
    pub leaf: &'a ShaderVarType,
    pub is_array: bool,
    pub indices: Vec<u32>,
    pub rebase: u32,
}

/// Resolves `cb[vec4_offset].<swizzle>` to the declared variable it reads.
///
/// The first swizzle lane selects the byte inside the slot, which is how scalars the compiler
/// packed into a single register are told apart.
pub fn resolve_offset<'a>(
    cb: &'a ConstantBuffer,
    vec4_offset: u32,
    swizzle: Swizzle,
    flags: TranslateFlags,
) -> Option<ResolvedVar<'a>> {
    let byte_offset = vec4_offset
        .checked_mul(VEC4_SIZE)?
        .checked_add(swizzle.first_component_offset())?;
    let tree = cb.types();

    for var in cb.variables() {
        if let Some(found) = locate(tree, var.ty, var.start_offset, byte_offset, flags) {
            let leaf = tree.get(found.ty);
            trace!(
                cbuffer = %cb.name,
                byte_offset,
                var = %var.name,
                leaf = %leaf.full_name,
                indices = ?found.indices,
                "resolved constant buffer offset"
            );
            return Some(ResolvedVar {
                var,
                leaf_id: found.ty,
                leaf,
                is_array: found.is_array,
                indices: found.indices,
                rebase: found.rebase,
            });
        }
    }

    trace!(cbuffer = %cb.name, byte_offset, "no variable covers constant buffer offset");
    None
}
