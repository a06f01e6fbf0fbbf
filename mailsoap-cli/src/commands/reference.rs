// mailsoap-cli/src/commands/reference.rs
use crate::output::{label, Formattable, Printer};
use anyhow::{anyhow, Result};
use mailsoap_codec::Codec;
use mailsoap_types::{AnyDataSource, DataSourceType, NameOrId, TokenEnum};
use serde::Serialize;
use serde_json::Value;

#[derive(clap::Args, Clone, Debug)]
pub struct RefArgs {
    /// Data source type: pop3, imap, caldav, yab, rss, gal, cal, unknown
    pub kind: String,
    /// Reference by id
    #[arg(long, conflicts_with = "name", required_unless_present = "name")]
    pub id: Option<String>,
    /// Reference by name
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
struct RefView {
    rendered: String,
    element: Value,
}

impl Formattable for RefView {
    fn to_human(&self) -> String {
        format!("{}\n{} {}", self.rendered, label("element:"), self.element)
    }
}

pub fn handle_ref(printer: &Printer, codec: &Codec, args: RefArgs) -> Result<()> {
    let kind = DataSourceType::from_token(&args.kind).ok_or_else(|| {
        anyhow!(
            "Unknown data source type {:?}, expected one of: {}",
            args.kind,
            DataSourceType::tokens().join(", ")
        )
    })?;
    let inner = match (args.id, args.name) {
        (Some(id), _) => NameOrId::for_id(id),
        (None, Some(name)) => NameOrId::for_name(name),
        (None, None) => return Err(anyhow!("Either --id or --name is required")),
    };
    let source = AnyDataSource::from_parts(kind, inner);
    let view = RefView {
        rendered: source.render(),
        element: codec.encode_data_source(&source)?,
    };
    printer.success(&view, None)
}
