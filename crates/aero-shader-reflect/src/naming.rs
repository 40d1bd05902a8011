//! Indexed source-level names for resolved constant buffer variables.

use crate::cbuffer::{TypeId, TypeTree};
use crate::layout::{packed_size, ResolvedVar, TranslateFlags, VEC4_SIZE};

/// Fills the `[]` placeholders of a type's name template with array indices.
///
/// Placeholders are filled outermost first from `indices`; surplus indices (e.g. a matrix row)
/// are ignored and missing ones leave the brackets empty. When `dynamic_index` is non-empty it
/// replaces the outermost index, followed by ` + n` if the static index there is non-zero.
///
/// `revert_dynamic_calc` means `dynamic_index` is a register offset already multiplied by the
/// number of vec4 slots one element of the root variable takes; ` / slots` is appended to turn
/// it back into an element index.
pub fn indexed_full_name(
    tree: &TypeTree,
    id: TypeId,
    indices: &[u32],
    dynamic_index: &str,
    revert_dynamic_calc: bool,
    matrices_as_vectors: bool,
) -> String {
    let template = tree.get(id).full_name.as_str();
    let mut out = String::with_capacity(template.len() + dynamic_index.len() + 8);
    let mut rest = template;
    let mut level = 0usize;

    while let Some(pos) = rest.find('[') {
        out.push_str(&rest[..=pos]);
        rest = &rest[pos + 1..];

        if level == 0 && !dynamic_index.is_empty() {
            out.push_str(dynamic_index);
            if revert_dynamic_calc {
                let root = tree.root_of(id);
                let slots = packed_size(tree, root, matrices_as_vectors, false).div_ceil(VEC4_SIZE);
                out.push_str(&format!(" / {slots}"));
            }
            if let Some(&first) = indices.first().filter(|&&i| i != 0) {
                out.push_str(&format!(" + {first}"));
            }
        } else if let Some(index) = indices.get(level) {
            out.push_str(&index.to_string());
        }
        level += 1;
    }
    out.push_str(rest);
    out
}

impl ResolvedVar<'_> {
    /// [`indexed_full_name`] for this resolution's leaf and index path.
    pub fn indexed_name(
        &self,
        tree: &TypeTree,
        dynamic_index: &str,
        revert_dynamic_calc: bool,
        flags: TranslateFlags,
    ) -> String {
        indexed_full_name(
            tree,
            self.leaf_id,
            &self.indices,
            dynamic_index,
            revert_dynamic_calc,
            flags.matrices_as_vectors(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cbuffer::{ConstantBuffer, TypeDesc};

    fn nested() -> ConstantBuffer {
        ConstantBuffer::new("Skinning", 0).with_variable(
            0,
            0,
            TypeDesc::structure(
                "bones",
                0,
                vec![
                    TypeDesc::matrix_rows("xform", 0, 3, 4),
                    TypeDesc::vector("weights", 48, 4).array(2),
                ],
            )
            .array(8),
        )
    }

    fn leaf(cb: &ConstantBuffer) -> TypeId {
        cb.types().last_member(cb.variables()[0].ty).unwrap()
    }

    #[test]
    fn templates_without_brackets_are_unchanged() {
        let cb = ConstantBuffer::new("cb", 0).with_variable(0, 4, TypeDesc::scalar("fade", 0));
        let id = cb.variables()[0].ty;
        assert_eq!(indexed_full_name(cb.types(), id, &[], "", false, false), "fade");
        assert_eq!(indexed_full_name(cb.types(), id, &[2, 3], "idx", true, false), "fade");
    }

    #[test]
    fn static_indices_fill_left_to_right() {
        let cb = nested();
        assert_eq!(
            indexed_full_name(cb.types(), leaf(&cb), &[5, 1], "", false, false),
            "bones[5].weights[1]"
        );
        assert_eq!(
            indexed_full_name(cb.types(), leaf(&cb), &[5], "", false, false),
            "bones[5].weights[]"
        );
    }

    #[test]
    fn dynamic_index_replaces_outermost() {
        let cb = nested();
        assert_eq!(
            indexed_full_name(cb.types(), leaf(&cb), &[0, 1], "r0.x", false, false),
            "bones[r0.x].weights[1]"
        );
        assert_eq!(
            indexed_full_name(cb.types(), leaf(&cb), &[2, 1], "r0.x", false, false),
            "bones[r0.x + 2].weights[1]"
        );
    }

    #[test]
    fn reverting_divides_by_element_slots() {
        let cb = nested();
        // One bone: 3x4 matrix (3 slots) + two float4 weights (2 slots).
        assert_eq!(
            indexed_full_name(cb.types(), leaf(&cb), &[1, 0], "r1.y", true, true),
            "bones[r1.y / 5 + 1].weights[0]"
        );
    }
}
