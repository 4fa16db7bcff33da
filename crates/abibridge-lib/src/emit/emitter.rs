//! Core emitter struct and the section walk shared by every backend.

use crate::codec::{self, CodecPlan, FieldPlan, Strategy};
use crate::contract::{Contract, Function};
use crate::table::{ListDef, RecordDef, TypeRef, TypeTable};

use super::Config;

/// One render target.
///
/// [`Emitter::run`] walks the contract in a fixed section order and calls
/// into the backend for each item.
pub(super) trait Backend {
    /// Target type name of `ty` in field or parameter position.
    fn type_name(&self, table: &TypeTable, ty: TypeRef) -> String;

    fn prologue(&self, e: &mut Emitter<'_>);

    /// Targets without forward declarations keep the default.
    fn forward_declaration(&self, _e: &mut Emitter<'_>, _def: &RecordDef) {}

    fn definition(&self, e: &mut Emitter<'_>, def: &RecordDef);

    fn record_codec(&self, e: &mut Emitter<'_>, def: &RecordDef, fields: &[FieldPlan<'_>]);

    fn list_codec(&self, e: &mut Emitter<'_>, def: &ListDef, elem: Strategy);

    /// Encoder for a map's pair list that takes the key order explicitly.
    fn ordered_map_encoder(&self, e: &mut Emitter<'_>, list: &ListDef, pair: &RecordDef);

    fn call_stub(&self, e: &mut Emitter<'_>, function: &Function);

    fn epilogue(&self, e: &mut Emitter<'_>);
}

pub(super) struct Emitter<'a> {
    pub(super) contract: &'a Contract,
    pub(super) config: &'a Config,
    depth: usize,
    /// Output buffer
    output: String,
}

impl<'a> Emitter<'a> {
    pub(super) fn new(contract: &'a Contract, config: &'a Config) -> Self {
        Self {
            contract,
            config,
            depth: 0,
            output: String::new(),
        }
    }

    pub(super) fn table(&self) -> &'a TypeTable {
        &self.contract.table
    }

    pub(super) fn run(mut self, backend: &dyn Backend) -> String {
        let contract = self.contract;
        let table = &contract.table;

        backend.prologue(&mut self);

        for &id in &contract.structs {
            backend.forward_declaration(&mut self, table.record(id));
        }

        for &vertex in &contract.codecs {
            match codec::plan(table, vertex) {
                Some(CodecPlan::Record { def, fields, .. }) => {
                    backend.definition(&mut self, def);
                    backend.record_codec(&mut self, def, &fields);
                }
                Some(CodecPlan::List { id, def, elem }) => {
                    backend.list_codec(&mut self, def, elem);
                    if let Some(pair) = table.map_pair(TypeRef::List(id)) {
                        backend.ordered_map_encoder(&mut self, def, table.record(pair));
                    }
                }
                None => {}
            }
        }

        for function in &contract.functions {
            backend.call_stub(&mut self, function);
        }

        backend.epilogue(&mut self);

        // Ensure exactly one trailing newline
        self.output.truncate(self.output.trim_end().len());
        self.output.push('\n');
        self.output
    }

    /// Write one line at the current depth.
    pub(super) fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            self.output
                .push_str(&" ".repeat(self.depth * self.config.indent));
            self.output.push_str(text);
        }
        self.output.push('\n');
    }

    /// Write a line and indent what follows.
    pub(super) fn open(&mut self, text: impl AsRef<str>) {
        self.line(text);
        self.depth += 1;
    }

    /// Dedent and write a closing line.
    pub(super) fn close(&mut self, text: impl AsRef<str>) {
        self.depth = self.depth.saturating_sub(1);
        self.line(text);
    }

    /// Start a new item: a blank line, unless at the top of a block.
    pub(super) fn separate(&mut self) {
        if self.output.is_empty() || self.output.ends_with("{\n") || self.output.ends_with("\n\n") {
            return;
        }
        self.output.push('\n');
    }
}
