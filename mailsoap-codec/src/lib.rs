// mailsoap-codec/src/lib.rs
pub mod codec;
pub mod config;
pub mod registry;

pub use codec::Codec;
pub use config::Config;
pub use registry::{record_kind, record_kinds, Inspection, RecordKind};
