//! Solidity backend.
//!
//! Everything lands in one `library`: struct definitions, their
//! `encode_*`/`decode_*` functions, and the call stubs. Encoding goes through
//! the `RLPEncode` and `RLPReader` helper libraries.

use crate::codec::{FieldPlan, Strategy, decoder_name, encoder_name};
use crate::contract::Function;
use crate::table::{ListDef, RecordDef, Scalar, TypeRef, TypeTable};

use super::emitter::{Backend, Emitter};

pub(super) struct Solidity;

impl Solidity {
    /// Reference types need a data location in declarations.
    fn is_reference(ty: TypeRef) -> bool {
        !matches!(
            ty,
            TypeRef::Scalar(
                Scalar::Bool | Scalar::Int(_) | Scalar::UInt(_) | Scalar::FixedBytes(_) | Scalar::Address
            )
        )
    }

    fn declare(&self, table: &TypeTable, ty: TypeRef, name: &str) -> String {
        let location = if Self::is_reference(ty) { " memory" } else { "" };
        format!("{}{location} {name}", self.type_name(table, ty))
    }

    fn returns(&self, table: &TypeTable, ty: TypeRef) -> String {
        let location = if Self::is_reference(ty) { " memory" } else { "" };
        format!("{}{location}", self.type_name(table, ty))
    }

    fn encode_expr(table: &TypeTable, strategy: Strategy, expr: &str) -> String {
        match strategy {
            Strategy::Scalar(scalar) => encode_scalar(scalar, expr),
            Strategy::Nested(vertex) => format!("{}({expr})", encoder_name(table, vertex)),
        }
    }

    /// `item` is an `RLPReader.RLPItem` expression.
    fn decode_expr(table: &TypeTable, strategy: Strategy, item: &str) -> String {
        match strategy {
            Strategy::Scalar(scalar) => decode_scalar(scalar, item),
            Strategy::Nested(vertex) => format!(
                "{}(RLPReader.toRlpBytes({item}))",
                decoder_name(table, vertex)
            ),
        }
    }
}

fn encode_scalar(scalar: Scalar, expr: &str) -> String {
    match scalar {
        Scalar::Bool => format!("RLPEncode.encodeUint({expr} ? 1 : 0)"),
        Scalar::UInt(_) => format!("RLPEncode.encodeUint({expr})"),
        Scalar::Int(_) => format!("RLPEncode.encodeInt({expr})"),
        Scalar::String => format!("RLPEncode.encodeString({expr})"),
        Scalar::Bytes => format!("RLPEncode.encodeBytes({expr})"),
        Scalar::FixedBytes(_) => format!("RLPEncode.encodeBytes(abi.encodePacked({expr}))"),
        Scalar::Address => format!("RLPEncode.encodeAddress({expr})"),
    }
}

fn decode_scalar(scalar: Scalar, item: &str) -> String {
    match scalar {
        Scalar::Bool => format!("RLPReader.toBoolean({item})"),
        Scalar::UInt(256) => format!("RLPReader.toUint({item})"),
        Scalar::UInt(w) => format!("uint{w}(RLPReader.toUint({item}))"),
        Scalar::Int(256) => format!("RLPReader.toInt({item})"),
        Scalar::Int(w) => format!("int{w}(RLPReader.toInt({item}))"),
        Scalar::String => format!("RLPReader.toString({item})"),
        Scalar::Bytes => format!("RLPReader.toBytes({item})"),
        Scalar::FixedBytes(n) => format!("bytes{n}(RLPReader.toBytes({item}))"),
        Scalar::Address => format!("RLPReader.toAddress({item})"),
    }
}

impl Backend for Solidity {
    fn type_name(&self, table: &TypeTable, ty: TypeRef) -> String {
        match ty {
            TypeRef::Scalar(scalar) => scalar.to_string(),
            TypeRef::Record(id) => table.record(id).name.clone(),
            TypeRef::List(id) => {
                let list = table.list(id);
                let elem = self.type_name(table, list.elem);
                match list.len {
                    Some(n) => format!("{elem}[{n}]"),
                    None => format!("{elem}[]"),
                }
            }
        }
    }

    fn prologue(&self, e: &mut Emitter<'_>) {
        let config = e.config;
        e.line(format!("pragma solidity {};", config.pragma));
        e.line("");
        e.line(format!("import \"{}RLPEncode.sol\";", config.rlp_import_dir));
        e.line(format!("import \"{}RLPReader.sol\";", config.rlp_import_dir));
        e.line("");
        e.open(format!("library {} {{", e.contract.namespace));
    }

    fn definition(&self, e: &mut Emitter<'_>, def: &RecordDef) {
        let table = e.table();
        e.separate();
        e.open(format!("struct {} {{", def.name));
        for field in &def.fields {
            e.line(format!("{} {};", self.type_name(table, field.ty), field.name));
        }
        e.close("}");
    }

    fn record_codec(&self, e: &mut Emitter<'_>, def: &RecordDef, fields: &[FieldPlan<'_>]) {
        let table = e.table();
        let name = &def.name;

        e.separate();
        e.open(format!(
            "function encode_{name}({name} memory self) internal pure returns (bytes memory) {{"
        ));
        e.line(format!(
            "bytes[] memory allRlpPara = new bytes[]({});",
            fields.len()
        ));
        for field in fields {
            let expr = Self::encode_expr(table, field.strategy, &format!("self.{}", field.name));
            e.line(format!("allRlpPara[{}] = {expr};", field.index));
        }
        e.line("return RLPEncode.encodeList(allRlpPara);");
        e.close("}");

        e.separate();
        e.open(format!(
            "function decode_{name}(bytes memory data) internal pure returns ({name} memory) {{"
        ));
        e.line("RLPReader.RLPItem[] memory allItem = RLPReader.toList(RLPReader.toRlpItem(data));");
        e.line(format!(
            "require(allItem.length == {}, \"{name}: wrong field count\");",
            fields.len()
        ));
        e.line(format!("{name} memory result;"));
        for field in fields {
            let expr = Self::decode_expr(table, field.strategy, &format!("allItem[{}]", field.index));
            e.line(format!("result.{} = {expr};", field.name));
        }
        e.line("return result;");
        e.close("}");
    }

    fn list_codec(&self, e: &mut Emitter<'_>, def: &ListDef, elem: Strategy) {
        let table = e.table();
        let name = &def.name;
        let ty = {
            let elem = self.type_name(table, def.elem);
            match def.len {
                Some(n) => format!("{elem}[{n}]"),
                None => format!("{elem}[]"),
            }
        };

        e.separate();
        e.open(format!(
            "function encode_{name}({ty} memory self) internal pure returns (bytes memory) {{"
        ));
        e.line("uint length = self.length;");
        e.line("bytes[] memory allRlpPara = new bytes[](length);");
        e.open("for (uint i = 0; i < length; i++) {");
        e.line(format!(
            "allRlpPara[i] = {};",
            Self::encode_expr(table, elem, "self[i]")
        ));
        e.close("}");
        e.line("return RLPEncode.encodeList(allRlpPara);");
        e.close("}");

        e.separate();
        e.open(format!(
            "function decode_{name}(bytes memory data) internal pure returns ({ty} memory) {{"
        ));
        e.line("RLPReader.RLPItem[] memory allItem = RLPReader.toList(RLPReader.toRlpItem(data));");
        e.line("uint length = allItem.length;");
        match def.len {
            Some(n) => {
                e.line(format!("require(length == {n}, \"{ty}: wrong element count\");"));
                e.line(format!("{ty} memory result;"));
            }
            None => e.line(format!("{ty} memory result = new {ty}(length);")),
        }
        e.open("for (uint i = 0; i < length; i++) {");
        e.line(format!(
            "result[i] = {};",
            Self::decode_expr(table, elem, "allItem[i]")
        ));
        e.close("}");
        e.line("return result;");
        e.close("}");
    }

    fn ordered_map_encoder(&self, e: &mut Emitter<'_>, list: &ListDef, pair: &RecordDef) {
        let table = e.table();
        let [key, value] = [&pair.fields[0], &pair.fields[1]].map(|f| self.type_name(table, f.ty));

        e.separate();
        e.open(format!(
            "function encode_{}_ordered({key}[] memory keys, {value}[] memory values) internal pure returns (bytes memory) {{",
            list.name
        ));
        e.line("require(keys.length == values.length, \"map keys and values differ in length\");");
        e.line("uint length = keys.length;");
        e.line("bytes[] memory allRlpPara = new bytes[](length);");
        e.open("for (uint i = 0; i < length; i++) {");
        e.line(format!(
            "allRlpPara[i] = encode_{0}({0}(keys[i], values[i]));",
            pair.name
        ));
        e.close("}");
        e.line("return RLPEncode.encodeList(allRlpPara);");
        e.close("}");
    }

    fn call_stub(&self, e: &mut Emitter<'_>, function: &Function) {
        let table = e.table();

        let mut params = vec![
            "address _addr_".to_string(),
            "uint256 _value_".to_string(),
            "uint256 _gas_".to_string(),
        ];
        params.extend(
            function
                .inputs
                .iter()
                .map(|p| self.declare(table, p.ty, &p.name)),
        );
        let returns = match function.output {
            Some(ty) => format!("bool, {}", self.returns(table, ty)),
            None => "bool".to_string(),
        };

        e.separate();
        e.open(format!(
            "function {}({}) internal returns ({returns}) {{",
            function.name,
            params.join(", ")
        ));
        e.line(format!(
            "bytes[] memory _input_ = new bytes[]({});",
            function.inputs.len() + 1
        ));
        e.line(format!(
            "_input_[0] = RLPEncode.encodeString(\"{}\");",
            function.name
        ));
        for (i, param) in function.inputs.iter().enumerate() {
            let expr = Self::encode_expr(table, Strategy::of(param.ty), &param.name);
            e.line(format!("_input_[{}] = {expr};", i + 1));
        }
        e.line("bytes memory _payload_ = RLPEncode.encodeList(_input_);");

        let Some(output) = function.output else {
            e.line("(bool _success_, ) = _addr_.call{value: _value_, gas: _gas_}(_payload_);");
            e.line("return _success_;");
            e.close("}");
            return;
        };

        e.line(
            "(bool _success_, bytes memory _data_) = _addr_.call{value: _value_, gas: _gas_}(_payload_);",
        );
        e.line(format!("{};", self.declare(table, output, "_result_")));
        e.open("if (_success_) {");
        let decoded = match Strategy::of(output) {
            Strategy::Scalar(scalar) => decode_scalar(scalar, "RLPReader.toRlpItem(_data_)"),
            Strategy::Nested(vertex) => format!("{}(_data_)", decoder_name(table, vertex)),
        };
        e.line(format!("_result_ = {decoded};"));
        e.close("}");
        e.line("return (_success_, _result_);");
        e.close("}");
    }

    fn epilogue(&self, e: &mut Emitter<'_>) {
        e.close("}");
    }
}
