//! Type table: interning of mapped ABI types.
//!
//! Mapping a [`TypeNode`] yields a target-independent [`TypeRef`]. Composite
//! shapes are interned here exactly once, keyed by their canonical descriptor:
//! - records: declared structs, map pairs, tuples
//! - lists: fixed arrays, slices, and the pair list each map is used as
//!
//! A table lives for one compilation and is passed explicitly through the
//! pipeline.

pub(crate) mod naming;


use std::collections::{HashMap, HashSet};
use std::fmt;

use abibridge_core::{Interner, Symbol};
use tracing::trace;

use crate::types::{TypeError, TypeNode, parse_type};

pub use naming::digest_hex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scalar {
    Bool,
    Int(u16),
    UInt(u16),
    String,
    Bytes,
    FixedBytes(u8),
    Address,
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => write!(f, "bool"),
            Self::Int(w) => write!(f, "int{w}"),
            Self::UInt(w) => write!(f, "uint{w}"),
            Self::String => write!(f, "string"),
            Self::Bytes => write!(f, "bytes"),
            Self::FixedBytes(n) => write!(f, "bytes{n}"),
            Self::Address => write!(f, "address"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListId(u32);

impl RecordId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl ListId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A mapped type as it appears in a field or parameter position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Scalar(Scalar),
    Record(RecordId),
    List(ListId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Struct,
    /// The `{first, second}` pair a `map<K,V>` is made of.
    Map,
    Tuple,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub ty: TypeRef,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDef {
    pub name: String,
    pub kind: RecordKind,
    /// Canonical shape string: the struct name, or `map<..>` / `tuple<..>`.
    pub descriptor: String,
    /// Wire order.
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListDef {
    /// Codec name; lists have no declaration of their own.
    pub name: String,
    pub descriptor: String,
    pub elem: TypeRef,
    /// `Some(n)` for fixed-size arrays.
    pub len: Option<usize>,
}

#[derive(Debug, Default)]
pub struct TypeTable {
    descriptors: Interner,
    records_by_shape: HashMap<Symbol, RecordId>,
    lists_by_shape: HashMap<Symbol, ListId>,
    records: Vec<RecordDef>,
    lists: Vec<ListDef>,
    /// Every record and list name handed out so far.
    names: HashSet<String>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a declared struct name. Returns `None` if the name is taken.
    ///
    /// Fields are attached later with [`define_fields`](Self::define_fields),
    /// so structs may reference each other regardless of document order.
    pub fn declare_struct(&mut self, name: &str) -> Option<RecordId> {
        if self.names.contains(name) {
            return None;
        }

        let sym = self.descriptors.intern(name);
        let id = self.push_record(RecordDef {
            name: name.to_string(),
            kind: RecordKind::Struct,
            descriptor: name.to_string(),
            fields: Vec::new(),
        });
        self.records_by_shape.insert(sym, id);
        Some(id)
    }

    pub fn define_fields(&mut self, id: RecordId, fields: Vec<Field>) {
        self.records[id.index()].fields = fields;
    }

    pub fn find_struct(&self, name: &str) -> Option<RecordId> {
        let sym = self.descriptors.get(name)?;
        let id = *self.records_by_shape.get(&sym)?;
        (self.record(id).kind == RecordKind::Struct).then_some(id)
    }

    /// Look up a record by its emitted name.
    pub fn find_record(&self, name: &str) -> Option<RecordId> {
        self.records
            .iter()
            .position(|r| r.name == name)
            .map(|i| RecordId(i as u32))
    }

    /// Parse a type string and map it.
    pub fn resolve(&mut self, ty: &str) -> Result<TypeRef, TypeError> {
        let node = parse_type(ty)?;
        self.intern(&node)
    }

    /// Map a parsed type, interning every composite shape it contains.
    pub fn intern(&mut self, node: &TypeNode) -> Result<TypeRef, TypeError> {
        let ty = match node {
            TypeNode::Bool => TypeRef::Scalar(Scalar::Bool),
            TypeNode::Int(w) => TypeRef::Scalar(Scalar::Int(*w)),
            TypeNode::UInt(w) => TypeRef::Scalar(Scalar::UInt(*w)),
            TypeNode::String => TypeRef::Scalar(Scalar::String),
            TypeNode::Bytes => TypeRef::Scalar(Scalar::Bytes),
            TypeNode::FixedBytes(n) => TypeRef::Scalar(Scalar::FixedBytes(*n)),
            TypeNode::Address => TypeRef::Scalar(Scalar::Address),
            TypeNode::Unsupported(kind) => return Err(TypeError::Unsupported(*kind)),
            TypeNode::Struct(name) => TypeRef::Record(
                self.find_struct(name)
                    .ok_or_else(|| TypeError::UnknownStruct(name.clone()))?,
            ),
            TypeNode::FixedArray(elem, n) => {
                let elem = self.intern(elem)?;
                TypeRef::List(self.intern_list(node.to_string(), elem, Some(*n)))
            }
            TypeNode::Slice(elem) => {
                let elem = self.intern(elem)?;
                TypeRef::List(self.intern_list(node.to_string(), elem, None))
            }
            TypeNode::Map(key, value) => {
                let key = self.intern(key)?;
                let value = self.intern(value)?;
                let descriptor = node.to_string();
                let pair = self.intern_record(
                    descriptor.clone(),
                    RecordKind::Map,
                    vec![Field::new("first", key), Field::new("second", value)],
                );
                TypeRef::List(self.intern_list(descriptor, TypeRef::Record(pair), None))
            }
            TypeNode::Tuple(elems) => {
                let mut fields: Vec<Field> = Vec::with_capacity(elems.len());
                for (i, elem) in elems.iter().enumerate() {
                    let name = match &elem.name {
                        Some(name) => name.clone(),
                        None => format!("tuple_{i}"),
                    };
                    if fields.iter().any(|f| f.name == name) {
                        return Err(TypeError::DuplicateTupleElement(name));
                    }
                    fields.push(Field::new(name, self.intern(&elem.ty)?));
                }
                TypeRef::Record(self.intern_record(node.to_string(), RecordKind::Tuple, fields))
            }
        };
        Ok(ty)
    }

    fn intern_record(&mut self, descriptor: String, kind: RecordKind, fields: Vec<Field>) -> RecordId {
        let sym = self.descriptors.intern_owned(descriptor);
        if let Some(&id) = self.records_by_shape.get(&sym) {
            return id;
        }

        let descriptor = self.descriptors.resolve(sym).to_string();
        let prefix = match kind {
            RecordKind::Map => naming::MAP_PREFIX,
            _ => naming::TUPLE_PREFIX,
        };
        let name = naming::unique_name(prefix, &descriptor, &self.names);
        trace!(%name, %descriptor, "interned record");

        let id = self.push_record(RecordDef {
            name,
            kind,
            descriptor,
            fields,
        });
        self.records_by_shape.insert(sym, id);
        id
    }

    fn intern_list(&mut self, descriptor: String, elem: TypeRef, len: Option<usize>) -> ListId {
        let sym = self.descriptors.intern_owned(descriptor);
        if let Some(&id) = self.lists_by_shape.get(&sym) {
            return id;
        }

        let descriptor = self.descriptors.resolve(sym).to_string();
        let name = naming::unique_name(naming::LIST_PREFIX, &descriptor, &self.names);
        trace!(%name, %descriptor, "interned list");

        let id = ListId(self.lists.len() as u32);
        self.names.insert(name.clone());
        self.lists.push(ListDef {
            name,
            descriptor,
            elem,
            len,
        });
        self.lists_by_shape.insert(sym, id);
        id
    }

    fn push_record(&mut self, def: RecordDef) -> RecordId {
        let id = RecordId(self.records.len() as u32);
        self.names.insert(def.name.clone());
        self.records.push(def);
        id
    }

    pub fn record(&self, id: RecordId) -> &RecordDef {
        &self.records[id.index()]
    }

    pub fn list(&self, id: ListId) -> &ListDef {
        &self.lists[id.index()]
    }

    pub fn records(&self) -> impl Iterator<Item = (RecordId, &RecordDef)> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, r)| (RecordId(i as u32), r))
    }

    pub fn lists(&self) -> impl Iterator<Item = (ListId, &ListDef)> {
        self.lists
            .iter()
            .enumerate()
            .map(|(i, l)| (ListId(i as u32), l))
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn list_count(&self) -> usize {
        self.lists.len()
    }

    /// The record a map's pair list is made of, if `ty` is such a list.
    pub fn map_pair(&self, ty: TypeRef) -> Option<RecordId> {
        let TypeRef::List(id) = ty else {
            return None;
        };
        let list = self.list(id);
        match list.elem {
            TypeRef::Record(pair) if list.len.is_none() && self.record(pair).kind == RecordKind::Map => {
                Some(pair)
            }
            _ => None,
        }
    }

    /// Generated name of a composite type.
    pub fn name_of(&self, ty: TypeRef) -> Option<&str> {
        match ty {
            TypeRef::Scalar(_) => None,
            TypeRef::Record(id) => Some(&self.record(id).name),
            TypeRef::List(id) => Some(&self.list(id).name),
        }
    }

    /// Canonical descriptor, for diagnostics and listings.
    pub fn describe(&self, ty: TypeRef) -> String {
        match ty {
            TypeRef::Scalar(s) => s.to_string(),
            TypeRef::Record(id) => self.record(id).descriptor.clone(),
            TypeRef::List(id) => self.list(id).descriptor.clone(),
        }
    }
}
