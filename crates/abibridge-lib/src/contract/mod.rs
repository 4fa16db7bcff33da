//! Contract model: the compiler's output before rendering.
//!
//! [`Contract::build`] maps every declared struct and method through one
//! [`TypeTable`], builds the dependency graph, and fixes the emission order.


use abibridge_core::utils::is_identifier;
use abibridge_core::{AbiDocument, Argument, StructDecl};
use tracing::debug;

use crate::codec::{self, CodecError, Value};
use crate::graph::{DependencyGraph, Vertex};
use crate::table::{Field, RecordId, TypeRef, TypeTable};
use crate::types::{TypeError, TypeNode};
use crate::{Error, Result, Site};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: TypeRef,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub name: String,
    pub constant: bool,
    pub inputs: Vec<Param>,
    /// `None` for `void`.
    pub output: Option<TypeRef>,
}

#[derive(Debug)]
pub struct Contract {
    pub namespace: String,
    pub table: TypeTable,
    /// Every record (declared or synthesized), dependencies first.
    pub structs: Vec<RecordId>,
    /// Every record and list owning a codec, dependencies first.
    pub codecs: Vec<Vertex>,
    /// Callable methods in document order, `init` excluded.
    pub functions: Vec<Function>,
}

impl Contract {
    pub fn build(document: &AbiDocument, namespace: &str) -> Result<Self> {
        if !is_identifier(namespace) {
            return Err(Error::InvalidIdentifier(namespace.to_string()));
        }

        let mut table = TypeTable::new();

        let mut declared = Vec::with_capacity(document.structs.len());
        for decl in &document.structs {
            if !is_identifier(&decl.name) {
                return Err(Error::InvalidIdentifier(decl.name.clone()));
            }
            let id = table
                .declare_struct(&decl.name)
                .ok_or_else(|| Error::DuplicateStruct(decl.name.clone()))?;
            declared.push(id);
        }

        for (decl, &id) in document.structs.iter().zip(&declared) {
            let fields = struct_fields(&mut table, decl)?;
            table.define_fields(id, fields);
        }

        let mut functions = Vec::new();
        for method in &document.methods {
            if method.is_init() {
                continue;
            }
            if functions.iter().any(|f: &Function| f.name == method.name) {
                return Err(Error::DuplicateName {
                    owner: "contract".to_string(),
                    name: method.name.clone(),
                });
            }

            let owner = format!("method `{}`", method.name);
            let mut inputs: Vec<Param> = Vec::with_capacity(method.inputs.len());
            for (index, arg) in method.inputs.iter().enumerate() {
                check_name(&owner, index, arg, inputs.iter().map(|p| p.name.as_str()))?;
                let site = Site::Argument {
                    method: method.name.clone(),
                    arg: arg.name.clone(),
                };
                inputs.push(Param {
                    name: arg.name.clone(),
                    ty: resolve(&mut table, &arg.type_name, site)?,
                });
            }

            let output = match &method.output {
                Some(ty) => {
                    let site = Site::Output {
                        method: method.name.clone(),
                    };
                    Some(resolve(&mut table, ty, site)?)
                }
                None => None,
            };

            functions.push(Function {
                name: method.name.clone(),
                constant: method.constant,
                inputs,
                output,
            });
        }

        let signatures: Vec<Vec<TypeRef>> = functions
            .iter()
            .map(|f| f.inputs.iter().map(|p| p.ty).chain(f.output).collect())
            .collect();
        let graph = DependencyGraph::build(&table, &signatures)?;
        let codecs = graph.topological_order(&table)?;
        let structs = codecs
            .iter()
            .filter_map(|v| match v {
                Vertex::Record(id) => Some(*id),
                _ => None,
            })
            .collect::<Vec<_>>();

        debug!(
            namespace,
            records = table.record_count(),
            lists = table.list_count(),
            functions = functions.len(),
            "built contract"
        );

        Ok(Self {
            namespace: namespace.to_string(),
            table,
            structs,
            codecs,
            functions,
        })
    }

    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// Map a standalone type expression against this contract's structs.
    ///
    /// New shapes are interned into the contract's table, so the result can be
    /// used with the reference codec directly.
    pub fn resolve_type(&mut self, ty: &str) -> Result<TypeRef> {
        resolve(&mut self.table, ty, Site::Expression)
    }

    /// Encode the call payload for `method`: `[method name, args...]`.
    pub fn encode_call(&self, method: &str, args: &[Value]) -> std::result::Result<Vec<u8>, CodecError> {
        let function = self
            .function(method)
            .ok_or_else(|| CodecError::UnknownMethod(method.to_string()))?;
        if function.inputs.len() != args.len() {
            return Err(CodecError::Length {
                expected: function.inputs.len(),
                found: args.len(),
            });
        }

        let encoded = function
            .inputs
            .iter()
            .zip(args)
            .map(|(param, value)| codec::encode(&self.table, param.ty, value))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(codec::encode_call(method, &encoded))
    }
}

fn struct_fields(table: &mut TypeTable, decl: &StructDecl) -> Result<Vec<Field>> {
    let owner = format!("struct `{}`", decl.name);
    let mut fields: Vec<Field> = Vec::with_capacity(decl.baseclass.len() + decl.fields.len());

    for (index, base) in decl.baseclass.iter().enumerate() {
        let site = Site::Base {
            owner: decl.name.clone(),
            index,
        };
        let ty = table
            .intern(&TypeNode::Struct(base.clone()))
            .map_err(|error| type_error(site, base, error))?;
        fields.push(Field::new(format!("baseclass{index}"), ty));
    }

    for (index, field) in decl.fields.iter().enumerate() {
        check_name(&owner, index, field, fields.iter().map(|f| f.name.as_str()))?;
        let site = Site::Field {
            owner: decl.name.clone(),
            field: field.name.clone(),
        };
        fields.push(Field::new(
            field.name.clone(),
            resolve(table, &field.type_name, site)?,
        ));
    }

    Ok(fields)
}

fn check_name<'a>(
    owner: &str,
    index: usize,
    arg: &Argument,
    mut seen: impl Iterator<Item = &'a str>,
) -> Result<()> {
    if arg.name.trim().is_empty() {
        return Err(Error::MissingName {
            owner: owner.to_string(),
            index,
        });
    }
    if !is_identifier(&arg.name) {
        return Err(Error::InvalidIdentifier(arg.name.clone()));
    }
    if seen.any(|name| name == arg.name) {
        return Err(Error::DuplicateName {
            owner: owner.to_string(),
            name: arg.name.clone(),
        });
    }
    Ok(())
}

fn resolve(table: &mut TypeTable, ty: &str, site: Site) -> Result<TypeRef> {
    table.resolve(ty).map_err(|error| type_error(site, ty, error))
}

fn type_error(site: Site, ty: &str, error: TypeError) -> Error {
    Error::Type {
        site,
        ty: ty.to_string(),
        error,
    }
}
