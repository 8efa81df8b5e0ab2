use serde::{Deserialize, Serialize};

// ── Group keys ────────────────────────────────────────────────────────────────

/// Day buckets of the weekly schedule page, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
    Other,
    Unknown,
}

impl GroupKey {
    pub const ALL: [GroupKey; 9] = [
        GroupKey::Monday,
        GroupKey::Tuesday,
        GroupKey::Wednesday,
        GroupKey::Thursday,
        GroupKey::Friday,
        GroupKey::Saturday,
        GroupKey::Sunday,
        GroupKey::Other,
        GroupKey::Unknown,
    ];

    /// Key as it appears in the container class suffix.
    pub fn slug(self) -> &'static str {
        match self {
            GroupKey::Monday => "monday",
            GroupKey::Tuesday => "tuesday",
            GroupKey::Wednesday => "wednesday",
            GroupKey::Thursday => "thursday",
            GroupKey::Friday => "friday",
            GroupKey::Saturday => "saturday",
            GroupKey::Sunday => "sunday",
            GroupKey::Other => "other",
            GroupKey::Unknown => "unknown",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GroupKey::Monday => "Monday",
            GroupKey::Tuesday => "Tuesday",
            GroupKey::Wednesday => "Wednesday",
            GroupKey::Thursday => "Thursday",
            GroupKey::Friday => "Friday",
            GroupKey::Saturday => "Saturday",
            GroupKey::Sunday => "Sunday",
            GroupKey::Other => "Other",
            GroupKey::Unknown => "Unknown",
        }
    }
}

// ── Extracted records ─────────────────────────────────────────────────────────

/// One program entry pulled from a day container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: Option<String>,
    pub title: String,
    pub score: Option<f64>,
    pub audience: Option<i64>,
    pub image_url: Option<String>,
    pub group: String,               // owning day label, copied
    pub air_date: Option<String>,    // free text, e.g. "Oct 6, 2025"
    pub episode_count: Option<String>, // digits or "?"
    pub episode_duration: Option<String>, // "<N> min"
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleGroup {
    pub label: String,
    pub records: Vec<Record>,
}

/// Aggregated extraction result. Groups are non-empty and in bucket order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schedule {
    pub groups: Vec<ScheduleGroup>,
    pub total: usize,
}

impl Schedule {
    /// Drops empty groups and recomputes the total.
    pub fn from_groups(groups: Vec<ScheduleGroup>) -> Self {
        let groups: Vec<ScheduleGroup> = groups
            .into_iter()
            .filter(|g| !g.records.is_empty())
            .collect();
        let total = groups.iter().map(|g| g.records.len()).sum();
        Self { groups, total }
    }
}

// ── Wire envelopes ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayEntry {
    pub day: String,
    pub anime: Vec<Record>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    pub last_updated: i64, // unix seconds
    pub total: usize,
    pub schedule: Vec<DayEntry>,
}

impl ScheduleResponse {
    pub fn new(schedule: Schedule, last_updated: i64) -> Self {
        Self {
            last_updated,
            total: schedule.total,
            schedule: schedule
                .groups
                .into_iter()
                .map(|g| DayEntry {
                    day: g.label,
                    anime: g.records,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: Vec<String>,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
    pub details: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, group: &str) -> Record {
        Record {
            id: None,
            title: title.to_string(),
            score: None,
            audience: None,
            image_url: None,
            group: group.to_string(),
            air_date: None,
            episode_count: None,
            episode_duration: None,
        }
    }

    #[test]
    fn test_group_key_order_and_labels() {
        let labels: Vec<&str> = GroupKey::ALL.iter().map(|k| k.label()).collect();
        assert_eq!(
            labels,
            vec![
                "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
                "Other", "Unknown"
            ]
        );
        assert_eq!(GroupKey::Other.slug(), "other");
    }

    #[test]
    fn test_from_groups_drops_empty_and_totals() {
        let schedule = Schedule::from_groups(vec![
            ScheduleGroup {
                label: "Monday".into(),
                records: vec![record("A", "Monday"), record("B", "Monday")],
            },
            ScheduleGroup {
                label: "Tuesday".into(),
                records: vec![],
            },
            ScheduleGroup {
                label: "Other".into(),
                records: vec![record("C", "Other")],
            },
        ]);

        assert_eq!(schedule.total, 3);
        let labels: Vec<&str> = schedule.groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["Monday", "Other"]);
    }

    #[test]
    fn test_schedule_response_wire_shape() {
        let schedule = Schedule::from_groups(vec![ScheduleGroup {
            label: "Friday".into(),
            records: vec![Record {
                id: Some("59978".into()),
                score: Some(8.5),
                image_url: Some("https://cdn.myanimelist.net/images/anime/1/1.webp".into()),
                episode_count: Some("12".into()),
                ..record("Frieren", "Friday")
            }],
        }]);

        let json = serde_json::to_value(ScheduleResponse::new(schedule, 1_700_000_000)).unwrap();
        assert_eq!(json["lastUpdated"], 1_700_000_000);
        assert_eq!(json["total"], 1);
        assert_eq!(json["schedule"][0]["day"], "Friday");

        let anime = &json["schedule"][0]["anime"][0];
        assert_eq!(anime["id"], "59978");
        assert_eq!(anime["score"], 8.5);
        assert_eq!(anime["imageUrl"], "https://cdn.myanimelist.net/images/anime/1/1.webp");
        assert_eq!(anime["episodeCount"], "12");
        assert!(anime["audience"].is_null());
        assert!(anime["airDate"].is_null());
    }
}
