//! Type printing for diagnostic messages.

use crate::db::TypeDatabase;
use crate::types::{LiteralValue, TypeData, TypeId};
use tsl_common::ScriptTarget;
use tsl_syntax::utilities::needs_quoting;

/// Render a type the way it reads in source: `"a"`, `1`, `10n`,
/// `Fruit.Apple`, `string | undefined`, `number[]`.
pub fn type_to_string(db: &dyn TypeDatabase, type_id: TypeId) -> String {
    if type_id == TypeId::BOOLEAN {
        return "boolean".to_string();
    }
    match db.lookup(type_id) {
        Some(TypeData::Intrinsic(kind)) => kind.name().to_string(),
        Some(TypeData::Literal(value)) => literal_to_string(&value),
        Some(TypeData::EnumLiteral {
            enum_name, member, ..
        }) => {
            if needs_quoting(&member, ScriptTarget::ESNext) {
                format!("{enum_name}[\"{member}\"]")
            } else {
                format!("{enum_name}.{member}")
            }
        }
        Some(TypeData::UniqueSymbol { name }) => format!("typeof {name}"),
        Some(TypeData::TypeParameter { name, .. }) => name.to_string(),
        Some(TypeData::Union(members)) => union_to_string(db, &members),
        Some(TypeData::Intersection(members)) => members
            .iter()
            .map(|&m| type_to_string(db, m))
            .collect::<Vec<_>>()
            .join(" & "),
        Some(TypeData::Array(element)) => {
            let element_text = type_to_string(db, element);
            if matches!(
                db.lookup(element),
                Some(TypeData::Union(_) | TypeData::Intersection(_))
            ) && element != TypeId::BOOLEAN
            {
                format!("({element_text})[]")
            } else {
                format!("{element_text}[]")
            }
        }
        Some(TypeData::Tuple(elements)) => format!(
            "[{}]",
            elements
                .iter()
                .map(|&e| type_to_string(db, e))
                .collect::<Vec<_>>()
                .join(", ")
        ),
        Some(TypeData::Object(shape)) => {
            if let Some(name) = &shape.name {
                return name.to_string();
            }
            if shape.properties.is_empty() && shape.index_signatures.is_empty() {
                if let Some(signature) = shape.call_signatures.first() {
                    return format!("() => {}", type_to_string(db, signature.return_type));
                }
                return "{}".to_string();
            }
            let members: Vec<String> = shape
                .properties
                .iter()
                .map(|p| {
                    format!(
                        "{}{}{}: {};",
                        if p.readonly { "readonly " } else { "" },
                        p.name,
                        if p.optional { "?" } else { "" },
                        type_to_string(db, p.type_id)
                    )
                })
                .chain(shape.index_signatures.iter().map(|s| {
                    format!(
                        "[key: {}]: {};",
                        type_to_string(db, s.key_type),
                        type_to_string(db, s.value_type)
                    )
                }))
                .collect();
            format!("{{ {} }}", members.join(" "))
        }
        None => "error".to_string(),
    }
}

/// Union members with `true | false` folded into `boolean` and the nullish
/// members moved to the end.
fn union_to_string(db: &dyn TypeDatabase, members: &[TypeId]) -> String {
    let has_boolean = members.contains(&TypeId::TRUE) && members.contains(&TypeId::FALSE);
    let mut parts = Vec::with_capacity(members.len());
    let mut boolean_written = false;
    for &member in members {
        match member {
            TypeId::TRUE | TypeId::FALSE if has_boolean => {
                if !boolean_written {
                    parts.push("boolean".to_string());
                    boolean_written = true;
                }
            }
            TypeId::NULL | TypeId::UNDEFINED => {}
            _ => parts.push(type_to_string(db, member)),
        }
    }
    for nullish in [TypeId::NULL, TypeId::UNDEFINED] {
        if members.contains(&nullish) {
            parts.push(type_to_string(db, nullish));
        }
    }
    parts.join(" | ")
}

fn literal_to_string(value: &LiteralValue) -> String {
    match value {
        LiteralValue::String(s) => format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\"")),
        LiteralValue::Number(n) => number_to_string(n.0),
        LiteralValue::BigInt(digits) => format!("{digits}n"),
        LiteralValue::Boolean(b) => b.to_string(),
    }
}

/// JavaScript `Number.prototype.toString` for the values literal types hold.
pub fn number_to_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}
