//! Plain-text listing of what a compilation interned.
//!
//! One line per generated definition in emission order, then one line per
//! callable method. Types are shown in canonical form.

use abibridge_core::Colors;

use crate::contract::Contract;
use crate::graph::Vertex;
use crate::table::RecordKind;

const NAME_WIDTH: usize = 24;

pub fn listing(contract: &Contract, colors: Colors) -> String {
    let table = &contract.table;
    let mut out = String::new();

    for &vertex in &contract.codecs {
        let (name, kind, descriptor) = match vertex {
            Vertex::Record(id) => {
                let record = table.record(id);
                let kind = match record.kind {
                    RecordKind::Struct => "struct",
                    RecordKind::Map => "map",
                    RecordKind::Tuple => "tuple",
                };
                (&record.name, kind, &record.descriptor)
            }
            Vertex::List(id) => {
                let list = table.list(id);
                (&list.name, "list", &list.descriptor)
            }
            Vertex::Root(_) => continue,
        };
        out.push_str(&format!(
            "{} {} {}\n",
            colors.paint_name(&format!("{name:<NAME_WIDTH$}")),
            colors.paint_kind(&format!("{kind:<6}")),
            colors.paint_dim(descriptor),
        ));
    }

    if !contract.codecs.is_empty() && !contract.functions.is_empty() {
        out.push('\n');
    }

    for function in &contract.functions {
        let params = function
            .inputs
            .iter()
            .map(|p| format!("{} {}", table.describe(p.ty), p.name))
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&colors.paint_name(&function.name));
        out.push_str(&format!("({params})"));
        if let Some(output) = function.output {
            out.push_str(&colors.paint_dim(&format!(" -> {}", table.describe(output))));
        }
        if function.constant {
            out.push_str(&colors.paint_dim(" const"));
        }
        out.push('\n');
    }

    out
}
