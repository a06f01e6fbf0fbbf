// mailsoap-cli/src/commands/mod.rs
pub mod flag;
pub mod record;
pub mod reference;
pub mod vocab;

pub use flag::{handle_flag, FlagCommands};
pub use record::{handle_record, RecordCommands};
pub use reference::{handle_ref, RefArgs};
pub use vocab::{handle_vocab, VocabCommands};
