// mailsoap-cli/src/commands/vocab.rs
use crate::output::{label, Formattable, Meta, Printer};
use anyhow::{anyhow, Result};
use mailsoap_types::vocab::{families, family, Family};
use serde::Serialize;

#[derive(clap::Subcommand, Clone, Debug)]
pub enum VocabCommands {
    /// List every token family
    List,
    /// Show the tokens of one family
    Show {
        /// Family name, e.g. FilterImportance
        family: String,
    },
    /// Resolve a token under its family's lookup policy
    Parse {
        /// Family name
        family: String,
        /// Token to resolve
        token: String,
    },
}

#[derive(Debug, Serialize)]
struct FamilyView {
    name: &'static str,
    policy: &'static str,
    tokens: &'static [&'static str],
}

impl From<&Family> for FamilyView {
    fn from(family: &Family) -> Self {
        Self {
            name: family.name,
            policy: family.policy.as_str(),
            tokens: family.tokens(),
        }
    }
}

impl Formattable for FamilyView {
    fn to_human(&self) -> String {
        format!(
            "{} ({})\n  {}",
            label(self.name),
            self.policy,
            self.tokens.join(" ")
        )
    }
}

#[derive(Debug, Serialize)]
struct FamilyList(Vec<FamilyView>);

impl Formattable for FamilyList {
    fn to_human(&self) -> String {
        self.0
            .iter()
            .map(|f| format!("{:<20} {:<10} {} tokens", f.name, f.policy, f.tokens.len()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Serialize)]
struct Parsed {
    family: &'static str,
    token: String,
    /// Canonical token, or null when a fail-quiet family does not know it
    value: Option<&'static str>,
}

impl Formattable for Parsed {
    fn to_human(&self) -> String {
        match self.value {
            Some(value) => format!("{} {}", label(self.family), value),
            None => format!("{} {:?} is not recognized", label(self.family), self.token),
        }
    }
}

fn lookup_family(name: &str) -> Result<&'static Family> {
    family(name).ok_or_else(|| {
        let known: Vec<&str> = families().iter().map(|f| f.name).collect();
        anyhow!("Unknown family {:?}, known families: {}", name, known.join(", "))
    })
}

pub fn handle_vocab(printer: &Printer, cmd: VocabCommands) -> Result<()> {
    match cmd {
        VocabCommands::List => {
            let list = FamilyList(families().iter().map(FamilyView::from).collect());
            printer.success(&list, None)
        }
        VocabCommands::Show { family } => {
            let family = lookup_family(&family)?;
            printer.success(&FamilyView::from(family), None)
        }
        VocabCommands::Parse { family, token } => {
            let family = lookup_family(&family)?;
            let value = family.parse(&token)?;
            let meta = Meta {
                policy: Some(family.policy.as_str()),
                ..Meta::default()
            };
            let parsed = Parsed {
                family: family.name,
                token,
                value,
            };
            printer.success(&parsed, Some(meta))
        }
    }
}
