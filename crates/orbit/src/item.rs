use crate::error::Error;
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    From,
    Into,
)]
#[serde(transparent)]
pub struct ItemId(u32);

impl ItemId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct Label(String);

crate::impl_label_newtype!(Label);

/// Play length of a track, written `m:ss` or `h:mm:ss`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, SerializeDisplay, DeserializeFromStr)]
pub struct TrackLength(Duration);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseLengthError {
    #[error("expected `m:ss` or `h:mm:ss`, got {0:?}")]
    Format(String),
    #[error("seconds out of range in {0:?}")]
    Seconds(String),
}

impl TrackLength {
    pub const fn from_secs(secs: u64) -> Self {
        Self(Duration::from_secs(secs))
    }

    pub fn as_duration(self) -> Duration {
        self.0
    }
}

impl FromStr for TrackLength {
    type Err = ParseLengthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format_err = || ParseLengthError::Format(s.to_string());
        let parts = s
            .trim()
            .split(':')
            .map(|p| p.parse::<u64>().map_err(|_| format_err()))
            .collect::<Result<Vec<_>, _>>()?;

        let (hours, minutes, seconds) = match parts.as_slice() {
            [min, sec] => (0, *min, *sec),
            [hr, min, sec] => (*hr, *min, *sec),
            _ => return Err(format_err()),
        };
        if seconds >= 60 || (hours > 0 && minutes >= 60) {
            return Err(ParseLengthError::Seconds(s.to_string()));
        }

        Ok(Self::from_secs(hours * 3600 + minutes * 60 + seconds))
    }
}

impl fmt::Display for TrackLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.0.as_secs();
        let (hours, minutes, seconds) = (total / 3600, (total / 60) % 60, total % 60);
        if hours > 0 {
            write!(f, "{hours}:{minutes:02}:{seconds:02}")
        } else {
            write!(f, "{minutes}:{seconds:02}")
        }
    }
}

/// An entry of a dial or a playlist. Menu entries carry no length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub label: Label,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<TrackLength>,
}

impl Item {
    pub fn entry(id: u32, label: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(id),
            label: Label::new(label),
            length: None,
        }
    }

    pub fn track(id: u32, label: impl Into<String>, length: TrackLength) -> Self {
        Self {
            length: Some(length),
            ..Self::entry(id, label)
        }
    }

    /// Numbers `labels` in order, giving each its position as id.
    pub fn entries<I, S>(labels: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        labels
            .into_iter()
            .zip(0..)
            .map(|(label, id)| Self::entry(id, label))
            .collect()
    }
}

pub fn ensure_unique_ids(items: &[Item]) -> Result<(), Error> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .iter()
        .find(|item| !seen.insert(item.id))
        .map_or(Ok(()), |dup| Err(Error::DuplicateId(dup.id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_length_parsing() {
        let cases = [
            ("0:00", 0),
            ("3:07", 187),
            (" 12:59 ", 779),
            ("1:02:03", 3723),
        ];

        for (input, secs) in cases {
            assert_eq!(input.parse::<TrackLength>(), Ok(TrackLength::from_secs(secs)));
        }
    }

    #[test]
    fn test_track_length_rejects_garbage() {
        assert!(matches!(
            "abc".parse::<TrackLength>(),
            Err(ParseLengthError::Format(_))
        ));
        assert!(matches!(
            "1:2:3:4".parse::<TrackLength>(),
            Err(ParseLengthError::Format(_))
        ));
        assert!(matches!(
            "3:75".parse::<TrackLength>(),
            Err(ParseLengthError::Seconds(_))
        ));
    }

    #[test]
    fn test_track_length_display() {
        assert_eq!(TrackLength::from_secs(0).to_string(), "0:00");
        assert_eq!(TrackLength::from_secs(187).to_string(), "3:07");
        assert_eq!(TrackLength::from_secs(3723).to_string(), "1:02:03");
    }

    #[test]
    fn test_item_deserialization() {
        let json = r#"[
            {"id": 0, "label": "Home"},
            {"id": 7, "label": "lorem ipsum", "length": "4:20"}
        ]"#;
        let items: Vec<Item> = serde_json::from_str(json).unwrap();

        assert_eq!(items[0], Item::entry(0, "Home"));
        assert_eq!(items[1], Item::track(7, "lorem ipsum", TrackLength::from_secs(260)));
    }

    #[test]
    fn test_entries_are_numbered_in_order() {
        let items = Item::entries(["Home", "Music", "Merch", "Blog"]);

        assert_eq!(items.len(), 4);
        assert_eq!(items[2].id, ItemId::new(2));
        assert_eq!(items[2].label.as_str(), "Merch");
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let items = vec![Item::entry(1, "a"), Item::entry(2, "b"), Item::entry(1, "c")];

        assert_eq!(
            ensure_unique_ids(&items),
            Err(Error::DuplicateId(ItemId::new(1)))
        );
        assert_eq!(ensure_unique_ids(&Item::entries(["a", "b"])), Ok(()));
    }
}
