// mailsoap-types/src/vocab.rs
//! Token families used across the mail and calendar records.

use crate::error::TypeError;
use crate::token::{token_enum, LookupPolicy, TokenEnum};

token_enum! {
    /// Importance level matched by a filter rule.
    pub enum FilterImportance: FailLoud {
        High => "high",
        Normal => "normal",
        Low => "low",
    }
}

token_enum! {
    /// Calendar alarm action (RFC 5545 ACTION plus vendor extensions).
    pub enum AlarmAction: FailLoud {
        Display => "DISPLAY",
        Audio => "AUDIO",
        Email => "EMAIL",
        Procedure => "PROCEDURE",
        XYahooCalendarActionIm => "X_YAHOO_CALENDAR_ACTION_IM",
        XYahooCalendarActionMobile => "X_YAHOO_CALENDAR_ACTION_MOBILE",
    }
}

token_enum! {
    /// Operation carried by an item action request. Negated operations use a
    /// leading `!`.
    pub enum ItemActionOp: FailLoud {
        Delete => "delete",
        Read => "read",
        Unread => "!read",
        Flag => "flag",
        Unflag => "!flag",
        Tag => "tag",
        Untag => "!tag",
        Move => "move",
        Trash => "trash",
        Spam => "spam",
        NotSpam => "!spam",
        Update => "update",
        Color => "color",
        Rename => "rename",
        Lock => "lock",
        Unlock => "unlock",
    }
}

token_enum! {
    /// Attendee participation status (RFC 5545 PARTSTAT, abbreviated).
    pub enum ParticipationStatus: FailQuiet {
        NeedsAction => "NE",
        Accept => "AC",
        Tentative => "TE",
        Declined => "DE",
        Delegated => "DG",
        Completed => "CO",
        InProcess => "IN",
        Waiting => "WE",
        Deferred => "DF",
    }
}

token_enum! {
    /// Mail item type as reported in change notifications.
    pub enum ItemType: FailQuiet {
        Folder => "folder",
        Search => "search",
        Tag => "tag",
        Conversation => "conversation",
        Message => "message",
        Contact => "contact",
        Appointment => "appointment",
        Task => "task",
        Document => "document",
        Chat => "chat",
        Link => "link",
        Comment => "comment",
    }
}

token_enum! {
    /// External data source protocol. Tokens double as element names.
    pub enum DataSourceType: FailQuiet {
        Pop3 => "pop3",
        Imap => "imap",
        Caldav => "caldav",
        Yab => "yab",
        Rss => "rss",
        Gal => "gal",
        Cal => "cal",
        Unknown => "unknown",
    }
}

/// Type-erased view of one token family, for tooling that picks a family by
/// name at run time.
#[derive(Clone, Copy)]
pub struct Family {
    pub name: &'static str,
    pub policy: LookupPolicy,
    tokens: fn() -> &'static [&'static str],
    resolve: fn(&str) -> Option<&'static str>,
}

fn resolve<T: TokenEnum>(token: &str) -> Option<&'static str> {
    T::lookup(token).map(T::token)
}

impl Family {
    pub const fn of<T: TokenEnum>() -> Self {
        Self {
            name: T::FAMILY,
            policy: T::POLICY,
            tokens: T::tokens,
            resolve: resolve::<T>,
        }
    }

    pub fn tokens(&self) -> &'static [&'static str] {
        (self.tokens)()
    }

    /// Resolves `token` under this family's policy. A fail-quiet miss is
    /// `Ok(None)`.
    pub fn parse(&self, token: &str) -> Result<Option<&'static str>, TypeError> {
        match ((self.resolve)(token), self.policy) {
            (Some(canonical), _) => Ok(Some(canonical)),
            (None, LookupPolicy::FailQuiet) => Ok(None),
            (None, LookupPolicy::FailLoud) => Err(TypeError::InvalidInput {
                family: self.name,
                token: token.to_string(),
                valid: self.tokens().to_vec(),
            }),
        }
    }
}

impl std::fmt::Debug for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Family")
            .field("name", &self.name)
            .field("policy", &self.policy)
            .finish()
    }
}

static FAMILIES: [Family; 6] = [
    Family::of::<FilterImportance>(),
    Family::of::<AlarmAction>(),
    Family::of::<ItemActionOp>(),
    Family::of::<ParticipationStatus>(),
    Family::of::<ItemType>(),
    Family::of::<DataSourceType>(),
];

pub fn families() -> &'static [Family] {
    &FAMILIES
}

pub fn family(name: &str) -> Option<&'static Family> {
    FAMILIES.iter().find(|f| f.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Barrier;

    fn assert_round_trip<T: TokenEnum + std::fmt::Debug>() {
        assert_eq!(T::table().len(), T::VARIANTS.len(), "{} is not a bijection", T::FAMILY);
        for &variant in T::VARIANTS {
            assert_eq!(T::lookup(variant.token()), Some(variant));
        }
    }

    #[test]
    fn test_every_family_round_trips() {
        assert_round_trip::<FilterImportance>();
        assert_round_trip::<AlarmAction>();
        assert_round_trip::<ItemActionOp>();
        assert_round_trip::<ParticipationStatus>();
        assert_round_trip::<ItemType>();
        assert_round_trip::<DataSourceType>();
    }

    #[test]
    fn test_fail_loud_families() {
        let err = FilterImportance::from_token("not-a-real-token").unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"invalid value for FilterImportance: "not-a-real-token", valid values: [high, normal, low]"#
        );

        let err = ItemActionOp::from_token("not-a-real-token").unwrap_err();
        for &op in ItemActionOp::VARIANTS {
            assert!(err.to_string().contains(op.token()));
        }
        assert_eq!(ItemActionOp::from_token("!read").unwrap(), ItemActionOp::Unread);
        assert_eq!(AlarmAction::XYahooCalendarActionIm.to_string(), "X_YAHOO_CALENDAR_ACTION_IM");
    }

    #[test]
    fn test_fail_quiet_families() {
        assert_eq!(ParticipationStatus::from_token("not-a-real-token"), None);
        assert_eq!(ItemType::from_token("not-a-real-token"), None);
        assert_eq!(DataSourceType::from_token("not-a-real-token"), None);
        assert_eq!(ParticipationStatus::from_token("AC"), Some(ParticipationStatus::Accept));
        assert_eq!(ParticipationStatus::from_token("ac"), None);
    }

    #[test]
    fn test_registry_parse() {
        let importance = family("FilterImportance").unwrap();
        assert_eq!(importance.policy, LookupPolicy::FailLoud);
        assert_eq!(importance.parse("low").unwrap(), Some("low"));
        assert!(importance.parse("LOW").is_err());

        let ptst = family("ParticipationStatus").unwrap();
        assert_eq!(ptst.parse("TE").unwrap(), Some("TE"));
        assert_eq!(ptst.parse("??").unwrap(), None);

        assert!(family("Nope").is_none());
        assert_eq!(families().len(), 6);
    }

    #[test]
    fn test_concurrent_lookups_agree() {
        const THREADS: usize = 16;
        let barrier = Barrier::new(THREADS);
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    scope.spawn(|| {
                        barrier.wait();
                        ItemType::VARIANTS
                            .iter()
                            .all(|&t| ItemType::from_token(t.token()) == Some(t))
                    })
                })
                .collect();
            for handle in handles {
                assert!(handle.join().unwrap());
            }
        });
        assert_eq!(ItemType::table().len(), ItemType::VARIANTS.len());
    }
}
