//! Timeline item types, normalization and commit application.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::date::{from_day_number, to_day_number};
use crate::error::TimelineError;

/// Opaque item identifier, either numeric or textual.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Int(i64),
    Text(String),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for ItemId {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for ItemId {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl ItemId {
    /// Parse a command-line id: all-digit input is numeric, anything else text.
    pub fn parse_loose(s: &str) -> Self {
        s.parse::<i64>()
            .map(Self::Int)
            .unwrap_or_else(|_| Self::Text(s.to_string()))
    }
}

/// An item record as supplied by the owning application.
///
/// Dates arrive either as `startDate`/`endDate` or as `start`/`end`. Any other
/// fields ride along untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawItem {
    pub id: ItemId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl RawItem {
    /// Create a record in the canonical `startDate`/`endDate` shape.
    pub fn new(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            start_date: Some(start_date.into()),
            end_date: Some(end_date.into()),
            start: None,
            end: None,
            extra: serde_json::Map::new(),
        }
    }

    /// The date pair this record carries, preferring `startDate`/`endDate`.
    pub fn date_pair(&self) -> Option<(&str, &str)> {
        match (&self.start_date, &self.end_date, &self.start, &self.end) {
            (Some(s), Some(e), _, _) | (_, _, Some(s), Some(e)) => Some((s.as_str(), e.as_str())),
            _ => None,
        }
    }
}

/// A normalized item with resolved day numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineItem {
    pub id: ItemId,
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub start_day: i64,
    pub end_day: i64,
    /// Set only by lane assignment; stale once the item set changes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lane: Option<usize>,
}

impl TimelineItem {
    /// Build an item from calendar dates.
    ///
    /// # Errors
    /// Returns an error if either date is malformed or the range is inverted.
    pub fn try_new(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        start_date: &str,
        end_date: &str,
    ) -> Result<Self, TimelineError> {
        let start_day = to_day_number(start_date)?;
        let end_day = to_day_number(end_date)?;
        check_range(start_day, end_day)?;
        Ok(Self {
            id: id.into(),
            name: name.into(),
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
            start_day,
            end_day,
            lane: None,
        })
    }

    /// Build an item from day numbers.
    pub fn from_days(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        start_day: i64,
        end_day: i64,
    ) -> Result<Self, TimelineError> {
        check_range(start_day, end_day)?;
        Ok(Self {
            id: id.into(),
            name: name.into(),
            start_date: from_day_number(start_day)?,
            end_date: from_day_number(end_day)?,
            start_day,
            end_day,
            lane: None,
        })
    }

    /// Days between start and end; zero for a single-day item.
    pub fn duration_days(&self) -> i64 {
        self.end_day - self.start_day
    }

    /// Inclusive overlap: items sharing even one day overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start_day <= other.end_day && other.start_day <= self.end_day
    }
}

/// Resolve a raw record into a [`TimelineItem`].
///
/// # Errors
/// `MissingDateField` when neither date pair is present, `InvalidDateFormat`
/// for unparseable dates, `InvertedRange` when start follows end.
pub fn normalize(raw: &RawItem) -> Result<TimelineItem, TimelineError> {
    let (start, end) = raw
        .date_pair()
        .ok_or_else(|| TimelineError::MissingDateField { id: raw.id.clone() })?;
    TimelineItem::try_new(raw.id.clone(), raw.name.clone(), start, end)
}

/// Normalize every record, failing on the first bad one.
pub fn normalize_all(raws: &[RawItem]) -> Result<Vec<TimelineItem>, TimelineError> {
    raws.iter().map(normalize).collect()
}

/// A record that failed normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejected {
    pub id: ItemId,
    pub error: TimelineError,
}

/// Split records into normalized items and rejections, keeping input order.
pub fn partition_valid(raws: &[RawItem]) -> (Vec<TimelineItem>, Vec<Rejected>) {
    let mut valid = Vec::with_capacity(raws.len());
    let mut rejected = Vec::new();
    for raw in raws {
        match normalize(raw) {
            Ok(item) => valid.push(item),
            Err(error) => rejected.push(Rejected {
                id: raw.id.clone(),
                error,
            }),
        }
    }
    (valid, rejected)
}

/// A completed edit proposed by an item controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commit {
    pub id: ItemId,
    pub start_day: i64,
    pub end_day: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Commit {
    /// Reject inverted ranges; they are never swapped.
    pub fn validate(&self) -> Result<(), TimelineError> {
        check_range(self.start_day, self.end_day)
    }
}

/// Merge a commit into a collection, returning the updated collection.
///
/// The matching record is rewritten into the canonical `startDate`/`endDate`
/// shape; its name is replaced only when the commit carries one.
pub fn apply_commit(items: &[RawItem], commit: &Commit) -> Result<Vec<RawItem>, TimelineError> {
    commit.validate()?;
    let start_date = from_day_number(commit.start_day)?;
    let end_date = from_day_number(commit.end_day)?;

    if !items.iter().any(|raw| raw.id == commit.id) {
        return Err(TimelineError::UnknownItem {
            id: commit.id.clone(),
        });
    }

    Ok(items
        .iter()
        .map(|raw| {
            if raw.id != commit.id {
                return raw.clone();
            }
            RawItem {
                id: raw.id.clone(),
                name: commit.name.clone().unwrap_or_else(|| raw.name.clone()),
                start_date: Some(start_date.clone()),
                end_date: Some(end_date.clone()),
                start: None,
                end: None,
                extra: raw.extra.clone(),
            }
        })
        .collect())
}

fn check_range(start_day: i64, end_day: i64) -> Result<(), TimelineError> {
    if start_day > end_day {
        return Err(TimelineError::InvertedRange { start_day, end_day });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_both_date_shapes() {
        let json = r#"[
            {"id": 1, "name": "A", "startDate": "2024-01-01", "endDate": "2024-01-05"},
            {"id": "b", "name": "B", "start": "2024-01-03", "end": "2024-01-07"}
        ]"#;
        let raws: Vec<RawItem> = serde_json::from_str(json).unwrap();
        let items = normalize_all(&raws).unwrap();
        assert_eq!(items[0].id, ItemId::Int(1));
        assert_eq!(items[0].duration_days(), 4);
        assert_eq!(items[1].id, ItemId::Text("b".into()));
        assert_eq!(items[1].start_date, "2024-01-03");
    }

    #[test]
    fn missing_dates_fail() {
        let json = r#"{"id": 7, "name": "Half", "startDate": "2024-01-01", "end": "2024-01-02"}"#;
        let raw: RawItem = serde_json::from_str(json).unwrap();
        assert_eq!(
            normalize(&raw),
            Err(TimelineError::MissingDateField { id: ItemId::Int(7) })
        );
    }

    #[test]
    fn inverted_input_is_rejected() {
        let raw = RawItem::new(1, "Backwards", "2024-01-05", "2024-01-01");
        assert!(matches!(
            normalize(&raw),
            Err(TimelineError::InvertedRange { .. })
        ));
    }

    #[test]
    fn partition_keeps_good_items() {
        let raws = vec![
            RawItem::new(1, "ok", "2024-01-01", "2024-01-02"),
            RawItem::new(2, "bad", "2024-01-xx", "2024-01-02"),
            RawItem::new(3, "ok too", "2024-02-01", "2024-02-01"),
        ];
        let (valid, rejected) = partition_valid(&raws);
        assert_eq!(valid.len(), 2);
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].id, ItemId::Int(2));
        assert!(matches!(
            rejected[0].error,
            TimelineError::InvalidDateFormat { .. }
        ));
    }

    #[test]
    fn overlap_is_inclusive() {
        let a = TimelineItem::from_days(1, "a", 10, 12).unwrap();
        let b = TimelineItem::from_days(2, "b", 12, 14).unwrap();
        let c = TimelineItem::from_days(3, "c", 13, 14).unwrap();
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn apply_commit_rewrites_dates_and_name() {
        let mut raw = RawItem::new(1, "A", "2024-01-01", "2024-01-05");
        raw.extra
            .insert("color".into(), serde_json::Value::String("red".into()));
        let raws = vec![raw, RawItem::new(2, "B", "2024-01-03", "2024-01-07")];
        let start = to_day_number("2024-01-04").unwrap();

        let commit = Commit {
            id: ItemId::Int(1),
            start_day: start,
            end_day: start + 4,
            name: Some("Renamed".into()),
        };
        let next = apply_commit(&raws, &commit).unwrap();
        assert_eq!(next[0].name, "Renamed");
        assert_eq!(next[0].date_pair(), Some(("2024-01-04", "2024-01-08")));
        assert_eq!(next[0].extra.get("color"), Some(&serde_json::json!("red")));
        assert_eq!(next[1], raws[1]);
    }

    #[test]
    fn apply_commit_converts_legacy_shape() {
        let raws = vec![RawItem {
            start_date: None,
            end_date: None,
            start: Some("2024-01-01".into()),
            end: Some("2024-01-02".into()),
            ..RawItem::new("x", "X", "", "")
        }];
        let start = to_day_number("2024-01-02").unwrap();
        let next = apply_commit(
            &raws,
            &Commit { id: "x".into(), start_day: start, end_day: start, name: None },
        )
        .unwrap();
        assert_eq!(next[0].start, None);
        assert_eq!(next[0].start_date.as_deref(), Some("2024-01-02"));
        assert_eq!(next[0].name, "X");
    }

    #[test]
    fn apply_commit_rejects_inverted_and_unknown() {
        let raws = vec![RawItem::new(1, "A", "2024-01-01", "2024-01-05")];
        let inverted = Commit { id: 1.into(), start_day: 20, end_day: 10, name: None };
        assert_eq!(
            apply_commit(&raws, &inverted),
            Err(TimelineError::InvertedRange { start_day: 20, end_day: 10 })
        );

        let unknown = Commit { id: 9.into(), start_day: 10, end_day: 20, name: None };
        assert_eq!(
            apply_commit(&raws, &unknown),
            Err(TimelineError::UnknownItem { id: ItemId::Int(9) })
        );
    }

    #[test]
    fn commit_serializes_camel_case() {
        let commit = Commit { id: 3.into(), start_day: 13, end_day: 15, name: None };
        let json = serde_json::to_value(&commit).unwrap();
        assert_eq!(json, serde_json::json!({"id": 3, "startDay": 13, "endDay": 15}));
    }
}
