// mailsoap-cli/src/commands/flag.rs
use crate::output::{Formattable, Printer};
use anyhow::Result;
use mailsoap_types::TriBool;
use serde::Serialize;

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogicalArg {
    True,
    False,
    Absent,
}

impl From<LogicalArg> for TriBool {
    fn from(arg: LogicalArg) -> Self {
        match arg {
            LogicalArg::True => TriBool::True,
            LogicalArg::False => TriBool::False,
            LogicalArg::Absent => TriBool::Absent,
        }
    }
}

#[derive(clap::Subcommand, Clone, Debug)]
pub enum FlagCommands {
    /// Convert a logical value to its wire token
    Encode {
        #[arg(value_enum)]
        value: LogicalArg,
    },
    /// Convert a wire token to its logical value (omit the token for absent)
    Decode { token: Option<String> },
}

#[derive(Debug, Serialize)]
struct FlagView {
    logical: Option<bool>,
    token: Option<&'static str>,
}

impl From<TriBool> for FlagView {
    fn from(flag: TriBool) -> Self {
        Self {
            logical: flag.to_logical(),
            token: flag.token(),
        }
    }
}

impl Formattable for FlagView {
    fn to_human(&self) -> String {
        let logical = self
            .logical
            .map_or_else(|| "absent".to_string(), |b| b.to_string());
        format!("{} -> {}", logical, self.token.unwrap_or("(omitted)"))
    }
}

pub fn handle_flag(printer: &Printer, cmd: FlagCommands) -> Result<()> {
    let flag = match cmd {
        FlagCommands::Encode { value } => TriBool::from(value),
        FlagCommands::Decode { token } => TriBool::from_token(token.as_deref())?,
    };
    printer.success(&FlagView::from(flag), None)
}
