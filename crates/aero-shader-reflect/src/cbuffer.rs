//! Constant buffer variables and their type trees.
//!
//! Type nodes live in a per-buffer arena ([`TypeTree`]) and refer to each other by [`TypeId`].
//! Member lists point down the tree; the parent link points up and is only used to find the
//! outermost array a leaf belongs to.

use crate::resource::ScalarType;

/// Variable class (`D3D_SHADER_VARIABLE_CLASS`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarClass {
    Scalar,
    Vector,
    MatrixRows,
    MatrixColumns,
    Object,
    Struct,
    InterfaceClass,
    InterfacePointer,
}

impl VarClass {
    pub const fn from_d3d_u32(v: u32) -> Option<Self> {
        match v {
            0 => Some(Self::Scalar),
            1 => Some(Self::Vector),
            2 => Some(Self::MatrixRows),
            3 => Some(Self::MatrixColumns),
            4 => Some(Self::Object),
            5 => Some(Self::Struct),
            6 => Some(Self::InterfaceClass),
            7 => Some(Self::InterfacePointer),
            _ => None,
        }
    }

    pub const fn is_matrix(self) -> bool {
        matches!(self, Self::MatrixRows | Self::MatrixColumns)
    }
}

/// Index of a [`ShaderVarType`] inside its buffer's [`TypeTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u32);

impl TypeId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Owned description of a type occurrence, as handed over by the decoder.
///
/// [`ConstantBuffer::with_variable`] flattens it into the buffer's arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDesc {
    pub name: String,
    pub class: VarClass,
    pub scalar_type: Option<ScalarType>,
    pub rows: u32,
    pub columns: u32,
    /// 0 or 1 for a single value, otherwise the array length.
    pub elements: u32,
    /// Byte offset relative to the enclosing struct, 0 for a variable's root type.
    pub offset: u32,
    pub members: Vec<TypeDesc>,
}

impl TypeDesc {
    fn numeric(
        name: impl Into<String>,
        class: VarClass,
        offset: u32,
        rows: u32,
        columns: u32,
    ) -> Self {
        Self {
            name: name.into(),
            class,
            scalar_type: Some(ScalarType::Float),
            rows,
            columns,
            elements: 0,
            offset,
            members: Vec::new(),
        }
    }

    pub fn scalar(name: impl Into<String>, offset: u32) -> Self {
        Self::numeric(name, VarClass::Scalar, offset, 1, 1)
    }

    pub fn vector(name: impl Into<String>, offset: u32, columns: u32) -> Self {
        Self::numeric(name, VarClass::Vector, offset, 1, columns)
    }

    pub fn matrix_rows(name: impl Into<String>, offset: u32, rows: u32, columns: u32) -> Self {
        Self::numeric(name, VarClass::MatrixRows, offset, rows, columns)
    }

    pub fn matrix_columns(name: impl Into<String>, offset: u32, rows: u32, columns: u32) -> Self {
        Self::numeric(name, VarClass::MatrixColumns, offset, rows, columns)
    }

    /// A struct; `members` must be ordered by increasing offset.
    pub fn structure(name: impl Into<String>, offset: u32, members: Vec<TypeDesc>) -> Self {
        Self {
            name: name.into(),
            class: VarClass::Struct,
            scalar_type: None,
            rows: 1,
            columns: 0,
            elements: 0,
            offset,
            members,
        }
    }

    pub fn array(mut self, elements: u32) -> Self {
        self.elements = elements;
        self
    }

    pub fn with_scalar_type(mut self, scalar_type: ScalarType) -> Self {
        self.scalar_type = Some(scalar_type);
        self
    }
}

/// One type occurrence in a constant buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderVarType {
    pub name: String,
    /// Dotted path from the owning variable, with a `[]` placeholder after every array level,
    /// e.g. `lights[].shadow[].bias`.
    pub full_name: String,
    pub class: VarClass,
    pub scalar_type: Option<ScalarType>,
    pub rows: u32,
    pub columns: u32,
    pub elements: u32,
    pub offset: u32,
    members: Vec<TypeId>,
    parent: Option<TypeId>,
}

impl ShaderVarType {
    pub fn is_array(&self) -> bool {
        self.elements > 1
    }

    pub fn members(&self) -> &[TypeId] {
        &self.members
    }

    pub fn parent(&self) -> Option<TypeId> {
        self.parent
    }
}

/// Arena owning every type node of one constant buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeTree {
    nodes: Vec<ShaderVarType>,
}

impl TypeTree {
    pub fn get(&self, id: TypeId) -> &ShaderVarType {
        &self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Last struct member, which alone determines the struct's size.
    pub fn last_member(&self, id: TypeId) -> Option<TypeId> {
        self.get(id).members.last().copied()
    }

    /// Walks parent links up to the variable's root type.
    pub fn root_of(&self, mut id: TypeId) -> TypeId {
        while let Some(parent) = self.get(id).parent {
            id = parent;
        }
        id
    }

    fn insert(&mut self, desc: &TypeDesc, parent: Option<TypeId>) -> TypeId {
        let mut full_name = match parent {
            Some(p) => format!("{}.{}", self.get(p).full_name, desc.name),
            None => desc.name.clone(),
        };
        if desc.elements > 1 {
            full_name.push_str("[]");
        }

        let id = TypeId(self.nodes.len() as u32);
        self.nodes.push(ShaderVarType {
            name: desc.name.clone(),
            full_name,
            class: desc.class,
            scalar_type: desc.scalar_type,
            rows: desc.rows,
            columns: desc.columns,
            elements: desc.elements,
            offset: desc.offset,
            members: Vec::with_capacity(desc.members.len()),
            parent,
        });

        for member in &desc.members {
            let member_id = self.insert(member, Some(id));
            self.nodes[id.index()].members.push(member_id);
        }
        id
    }
}

/// A top-level variable of a constant buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderVar {
    pub name: String,
    /// Byte offset of the variable inside its buffer.
    pub start_offset: u32,
    /// Declared size in bytes.
    pub size: u32,
    pub ty: TypeId,
}

impl ShaderVar {
    /// Returns true if `offset` lies inside `[start_offset, start_offset + size)`.
    pub fn contains(&self, offset: u32) -> bool {
        let end = u64::from(self.start_offset) + u64::from(self.size);
        offset >= self.start_offset && u64::from(offset) < end
    }
}

/// A constant buffer with its variables in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstantBuffer {
    pub name: String,
    pub bind_point: u32,
    vars: Vec<ShaderVar>,
    types: TypeTree,
}

impl ConstantBuffer {
    pub fn new(name: impl Into<String>, bind_point: u32) -> Self {
        Self {
            name: name.into(),
            bind_point,
            vars: Vec::new(),
            types: TypeTree::default(),
        }
    }

    /// Appends a variable whose name is `ty.name`.
    pub fn push_variable(&mut self, start_offset: u32, size: u32, ty: &TypeDesc) -> TypeId {
        let id = self.types.insert(ty, None);
        self.vars.push(ShaderVar {
            name: ty.name.clone(),
            start_offset,
            size,
            ty: id,
        });
        id
    }

    pub fn with_variable(mut self, start_offset: u32, size: u32, ty: TypeDesc) -> Self {
        self.push_variable(start_offset, size, &ty);
        self
    }

    pub fn variables(&self) -> &[ShaderVar] {
        &self.vars
    }

    pub fn types(&self) -> &TypeTree {
        &self.types
    }

    pub fn variable(&self, name: &str) -> Option<&ShaderVar> {
        self.vars.iter().find(|v| v.name == name)
    }

    /// First variable whose declared byte range contains `offset`.
    pub fn variable_at(&self, offset: u32) -> Option<&ShaderVar> {
        self.vars.iter().find(|v| v.contains(offset))
    }
}
