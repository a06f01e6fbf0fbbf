// mailsoap-cli/src/commands/record.rs
use crate::output::{label, Formattable, Meta, Printer};
use anyhow::{anyhow, Context, Result};
use mailsoap_codec::{record_kind, record_kinds, Codec, Inspection, RecordKind};
use mailsoap_types::TypeError;
use serde::Serialize;
use serde_json::Value;
use std::io::Read;

#[derive(clap::Subcommand, Clone, Debug)]
pub enum RecordCommands {
    /// List the record kinds that can be rendered or validated
    Kinds,
    /// Decode a record and print its canonical form
    Render {
        /// Element or record name, e.g. mp, reply, FolderActionSelector
        kind: String,
        /// Attribute map as JSON, or - to read stdin
        input: String,
    },
    /// Report the required fields a record lacks
    Validate {
        /// Element or record name
        kind: String,
        /// Attribute map as JSON, or - to read stdin
        input: String,
    },
}

#[derive(Debug, Serialize)]
struct KindView {
    record: &'static str,
    element: &'static str,
    required: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
struct KindList(Vec<KindView>);

impl Formattable for KindList {
    fn to_human(&self) -> String {
        self.0
            .iter()
            .map(|k| format!("{:<16} {:<28} required: {}", k.element, k.record, k.required.join(", ")))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Formattable for Inspection {
    fn to_human(&self) -> String {
        format!("{}\n{} {}", self.rendered, label("attrs:"), self.attrs)
    }
}

#[derive(Debug, Serialize)]
struct Verdict {
    record: &'static str,
    valid: bool,
}

impl Formattable for Verdict {
    fn to_human(&self) -> String {
        format!("{} is valid", self.record)
    }
}

fn lookup_kind(name: &str) -> Result<&'static RecordKind> {
    record_kind(name).ok_or_else(|| anyhow!("Unknown record kind {:?}", name))
}

fn read_input(input: &str) -> Result<String> {
    if input != "-" {
        return Ok(input.to_string());
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("Cannot read stdin")?;
    Ok(buf)
}

/// Parses the attribute map, unwrapping `{ element: attrs }` when given.
fn parse_attrs(kind: &RecordKind, input: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(input).context("Input is not valid JSON")?;
    if let Value::Object(map) = &value {
        if map.len() == 1 {
            if let Some(inner @ Value::Object(_)) = map.get(kind.element) {
                return Ok(inner.clone());
            }
        }
    }
    Ok(value)
}

pub fn handle_record(printer: &Printer, codec: &Codec, cmd: RecordCommands) -> Result<()> {
    match cmd {
        RecordCommands::Kinds => {
            let list = KindList(
                record_kinds()
                    .iter()
                    .map(|k| KindView {
                        record: k.record,
                        element: k.element,
                        required: k
                            .fields
                            .iter()
                            .filter(|f| f.required)
                            .map(|f| f.external)
                            .collect(),
                    })
                    .collect(),
            );
            printer.success(&list, None)
        }
        RecordCommands::Render { kind, input } => {
            let kind = lookup_kind(&kind)?;
            let attrs = parse_attrs(kind, &read_input(&input)?)?;
            let inspection = kind.inspect(codec, &attrs)?;
            let meta = Meta {
                strict: Some(codec.is_strict()),
                ..Meta::default()
            };
            printer.success(&inspection, Some(meta))
        }
        RecordCommands::Validate { kind, input } => {
            let kind = lookup_kind(&kind)?;
            let attrs = parse_attrs(kind, &read_input(&input)?)?;
            let inspection = kind.inspect(&Codec::lenient(), &attrs)?;
            if let Some(&field) = inspection.missing.first() {
                let err = anyhow::Error::new(TypeError::MissingField {
                    record: inspection.record,
                    field,
                })
                .context(format!(
                    "{} is missing required fields: {}",
                    inspection.record,
                    inspection.missing.join(", ")
                ));
                return Err(err);
            }
            let verdict = Verdict {
                record: inspection.record,
                valid: true,
            };
            printer.success(&verdict, None)
        }
    }
}
