//! C++ backend: a header for contracts on the WASM side.

use crate::codec::{FieldPlan, Strategy, decoder_name, encoder_name};
use crate::contract::Function;
use crate::table::{ListDef, RecordDef, Scalar, TypeRef, TypeTable};

use super::emitter::{Backend, Emitter};

pub(super) struct Cpp;

fn scalar_type(scalar: Scalar) -> String {
    match scalar {
        Scalar::Bool => "bool".to_string(),
        Scalar::UInt(128) => "__uint128_t".to_string(),
        Scalar::UInt(256) => "std::uint256_t".to_string(),
        Scalar::UInt(w) => format!("uint{w}_t"),
        Scalar::Int(128) => "__int128_t".to_string(),
        Scalar::Int(256) => "std::int256_t".to_string(),
        Scalar::Int(w) => format!("int{w}_t"),
        Scalar::String => "std::string".to_string(),
        Scalar::Bytes => "std::vector<uint8_t>".to_string(),
        Scalar::FixedBytes(n) => format!("platon::FixedHash<{n}>"),
        Scalar::Address => "platon::Address".to_string(),
    }
}

impl Cpp {
    fn list_type(&self, table: &TypeTable, def: &ListDef) -> String {
        let elem = self.type_name(table, def.elem);
        match def.len {
            Some(n) => format!("std::array<{elem}, {n}>"),
            None => format!("std::vector<{elem}>"),
        }
    }

    /// Scalars other than strings and byte vectors are passed by value.
    fn param(&self, table: &TypeTable, ty: TypeRef, name: &str) -> String {
        match ty {
            TypeRef::Scalar(Scalar::String | Scalar::Bytes) | TypeRef::Record(_) | TypeRef::List(_) => {
                format!("const {} &{name}", self.type_name(table, ty))
            }
            TypeRef::Scalar(_) => format!("{} {name}", self.type_name(table, ty)),
        }
    }

    fn encode_stmt(table: &TypeTable, strategy: Strategy, stream: &str, expr: &str) -> String {
        match strategy {
            Strategy::Scalar(_) => format!("{stream} << {expr};"),
            Strategy::Nested(vertex) => format!("{}({stream}, {expr});", encoder_name(table, vertex)),
        }
    }

    fn decode_stmt(table: &TypeTable, strategy: Strategy, item: &str, target: &str) -> String {
        match strategy {
            Strategy::Scalar(_) => format!("platon::fetch({item}, {target});"),
            Strategy::Nested(vertex) => format!("{}({item}, {target});", decoder_name(table, vertex)),
        }
    }
}

impl Backend for Cpp {
    fn type_name(&self, table: &TypeTable, ty: TypeRef) -> String {
        match ty {
            TypeRef::Scalar(scalar) => scalar_type(scalar),
            TypeRef::Record(id) => table.record(id).name.clone(),
            TypeRef::List(id) => self.list_type(table, table.list(id)),
        }
    }

    fn prologue(&self, e: &mut Emitter<'_>) {
        let namespace = e.contract.namespace.clone();
        e.line("#pragma once");
        e.line("");
        e.line("#include <platon/platon.hpp>");
        e.line("");
        for header in ["array", "string", "utility", "vector"] {
            e.line(format!("#include <{header}>"));
        }
        e.line("");
        e.line(format!("namespace {namespace} {{"));
        e.line("");
    }

    fn forward_declaration(&self, e: &mut Emitter<'_>, def: &RecordDef) {
        e.line(format!("struct {};", def.name));
    }

    fn definition(&self, e: &mut Emitter<'_>, def: &RecordDef) {
        let table = e.table();
        e.separate();
        e.open(format!("struct {} {{", def.name));
        for field in &def.fields {
            e.line(format!("{} {};", self.type_name(table, field.ty), field.name));
        }
        e.close("};");
    }

    fn record_codec(&self, e: &mut Emitter<'_>, def: &RecordDef, fields: &[FieldPlan<'_>]) {
        let table = e.table();
        let name = &def.name;

        e.separate();
        e.open(format!(
            "inline void encode_{name}(platon::RLPStream &stream, const {name} &self) {{"
        ));
        e.line(format!("stream.appendList({});", fields.len()));
        for field in fields {
            e.line(Self::encode_stmt(
                table,
                field.strategy,
                "stream",
                &format!("self.{}", field.name),
            ));
        }
        e.close("}");

        e.separate();
        e.open(format!(
            "inline void decode_{name}(const platon::RLP &rlp, {name} &self) {{"
        ));
        e.line(format!(
            "platon_assert(rlp.itemCount() == {}, \"{name}: wrong field count\");",
            fields.len()
        ));
        for field in fields {
            e.line(Self::decode_stmt(
                table,
                field.strategy,
                &format!("rlp[{}]", field.index),
                &format!("self.{}", field.name),
            ));
        }
        e.close("}");
    }

    fn list_codec(&self, e: &mut Emitter<'_>, def: &ListDef, elem: Strategy) {
        let table = e.table();
        let name = &def.name;
        let ty = self.list_type(table, def);

        e.separate();
        e.open(format!(
            "inline void encode_{name}(platon::RLPStream &stream, const {ty} &self) {{"
        ));
        e.line("stream.appendList(self.size());");
        e.open("for (const auto &item : self) {");
        e.line(Self::encode_stmt(table, elem, "stream", "item"));
        e.close("}");
        e.close("}");

        e.separate();
        e.open(format!(
            "inline void decode_{name}(const platon::RLP &rlp, {ty} &self) {{"
        ));
        match def.len {
            Some(n) => e.line(format!(
                "platon_assert(rlp.itemCount() == {n}, \"{}: wrong element count\");",
                def.descriptor
            )),
            None => e.line("self.resize(rlp.itemCount());"),
        }
        e.open("for (size_t i = 0; i < self.size(); i++) {");
        e.line(Self::decode_stmt(table, elem, "rlp[i]", "self[i]"));
        e.close("}");
        e.close("}");
    }

    fn ordered_map_encoder(&self, e: &mut Emitter<'_>, list: &ListDef, pair: &RecordDef) {
        let table = e.table();
        let key = self.type_name(table, pair.fields[0].ty);

        e.separate();
        e.line("template <typename Entries>");
        e.open(format!(
            "inline void encode_{}_ordered(platon::RLPStream &stream, const Entries &entries, const std::vector<{key}> &keys) {{",
            list.name
        ));
        e.line("platon_assert(keys.size() == entries.size(), \"map keys and entries differ in count\");");
        e.line("stream.appendList(keys.size());");
        e.open("for (const auto &key : keys) {");
        e.line(format!(
            "encode_{0}(stream, {0}{{key, entries.at(key)}});",
            pair.name
        ));
        e.close("}");
        e.close("}");
    }

    fn call_stub(&self, e: &mut Emitter<'_>, function: &Function) {
        let table = e.table();

        let mut params = vec![
            "const platon::Address &_addr_".to_string(),
            "const value_type &_value_".to_string(),
            "const gas_type &_gas_".to_string(),
        ];
        params.extend(
            function
                .inputs
                .iter()
                .map(|p| self.param(table, p.ty, &p.name)),
        );
        let output = function.output.map(|ty| self.type_name(table, ty));
        let returns = match &output {
            Some(ty) => format!("std::pair<{ty}, bool>"),
            None => "bool".to_string(),
        };

        e.separate();
        e.line("template <typename value_type, typename gas_type>");
        e.open(format!(
            "inline {returns} {}({}) {{",
            function.name,
            params.join(", ")
        ));
        e.line("platon::RLPStream _stream_;");
        e.line(format!("_stream_.appendList({});", function.inputs.len() + 1));
        e.line(format!("_stream_ << std::string(\"{}\");", function.name));
        for param in &function.inputs {
            e.line(Self::encode_stmt(
                table,
                Strategy::of(param.ty),
                "_stream_",
                &param.name,
            ));
        }

        let (Some(ty), Some(output)) = (output, function.output) else {
            e.line("return platon::platon_call(_addr_, _stream_.out(), _value_, _gas_);");
            e.close("}");
            return;
        };

        e.line(format!("{ty} _result_{{}};"));
        e.open("if (!platon::platon_call(_addr_, _stream_.out(), _value_, _gas_)) {");
        e.line("return std::make_pair(_result_, false);");
        e.close("}");
        e.line("platon::bytes _output_(::platon_get_call_output_length());");
        e.line("::platon_get_call_output(_output_.data());");
        e.line(Self::decode_stmt(
            table,
            Strategy::of(output),
            "platon::RLP(_output_)",
            "_result_",
        ));
        e.line("return std::make_pair(_result_, true);");
        e.close("}");
    }

    fn epilogue(&self, e: &mut Emitter<'_>) {
        e.separate();
        e.line(format!("}}  // namespace {}", e.contract.namespace));
    }
}
