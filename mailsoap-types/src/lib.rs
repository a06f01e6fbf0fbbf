// mailsoap-types/src/lib.rs
pub mod error;
pub mod flag;
pub mod token;

pub mod record;
pub mod vocab;

pub mod action;
pub mod attach;
pub mod calendar;
pub mod data_source;
pub mod filter;
pub mod message;
pub mod name_or_id;
pub mod notify;

pub use error::TypeError;
pub use flag::TriBool;
pub use record::{FieldSpec, FieldValue, Record};
pub use token::{LookupPolicy, TokenEnum};
pub use vocab::{
    AlarmAction, DataSourceType, Family, FilterImportance, ItemActionOp, ItemType,
    ParticipationStatus,
};

pub use name_or_id::NameOrId;
pub use data_source::{
    kind, AnyDataSource, CalDataSourceNameOrId, CaldavDataSourceNameOrId, DataSourceKind,
    DataSourceNameOrId, GalDataSourceNameOrId, ImapDataSourceNameOrId, Pop3DataSourceNameOrId,
    RssDataSourceNameOrId, UnknownDataSourceNameOrId, YabDataSourceNameOrId,
};
pub use types::*;

/// Concrete records, grouped for glob import.
pub mod types {
    pub use crate::action::{ActionSelector, FolderActionSelector};
    pub use crate::attach::{
        AttachSpec, AttachmentsInfo, ContactAttachSpec, DocAttachSpec, MimePartAttachSpec,
        MsgAttachSpec,
    };
    pub use crate::calendar::{AlarmInfo, CalendarReply};
    pub use crate::filter::{AddressTest, FilterTestHeader, ImportanceTest};
    pub use crate::message::ImapMessageInfo;
    pub use crate::notify::{
        CreateItemNotification, DeleteItemNotification, ModifyItemNotification,
        PendingFolderModifications, RenameFolderNotification,
    };
}
