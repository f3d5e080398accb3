use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Relationship between a predecessor and the task that depends on it.
///
/// `FinishToStart` is the classic "B starts after A finishes" link and the
/// default for legacy records that carry bare predecessor ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DependencyType {
    #[default]
    #[serde(rename = "FS")]
    FinishToStart,
    #[serde(rename = "SS")]
    StartToStart,
    #[serde(rename = "FF")]
    FinishToFinish,
    #[serde(rename = "SF")]
    StartToFinish,
}

impl DependencyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyType::FinishToStart => "FS",
            DependencyType::StartToStart => "SS",
            DependencyType::FinishToFinish => "FF",
            DependencyType::StartToFinish => "SF",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "FS" => Some(DependencyType::FinishToStart),
            "SS" => Some(DependencyType::StartToStart),
            "FF" => Some(DependencyType::FinishToFinish),
            "SF" => Some(DependencyType::StartToFinish),
            _ => None,
        }
    }
}

/// A typed link to an upstream task, with a signed day offset.
/// Negative `lag_days` is lead time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DependencyEdge {
    pub predecessor_id: i32,
    pub dependency_type: DependencyType,
    pub lag_days: i64,
}

impl DependencyEdge {
    pub fn new(predecessor_id: i32, dependency_type: DependencyType, lag_days: i64) -> Self {
        Self {
            predecessor_id,
            dependency_type,
            lag_days,
        }
    }

    /// The legacy form: finish-to-start with no lag.
    pub fn finish_to_start(predecessor_id: i32) -> Self {
        Self::new(predecessor_id, DependencyType::FinishToStart, 0)
    }
}

impl From<i32> for DependencyEdge {
    fn from(predecessor_id: i32) -> Self {
        Self::finish_to_start(predecessor_id)
    }
}

// Accepts both the edge object form and the legacy bare-id form, so old
// records normalize to FS/0 here instead of in downstream pass logic.
impl<'de> Deserialize<'de> for DependencyEdge {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum EdgeRepr {
            Bare(i32),
            Full {
                predecessor_id: i32,
                #[serde(default)]
                dependency_type: DependencyType,
                #[serde(default)]
                lag_days: i64,
            },
        }

        Ok(match EdgeRepr::deserialize(deserializer)? {
            EdgeRepr::Bare(id) => DependencyEdge::finish_to_start(id),
            EdgeRepr::Full {
                predecessor_id,
                dependency_type,
                lag_days,
            } => DependencyEdge::new(predecessor_id, dependency_type, lag_days),
        })
    }
}

/// One schedulable task. Date ranges are inclusive on both ends.
///
/// `start_date`/`end_date`/`duration_days` hold the live (earliest) schedule
/// and are rewritten by the forward pass; `late_start`, `late_finish`,
/// `total_float`, and `is_critical` are written by the backward pass and the
/// critical-path analysis. Baseline dates are reference-only and never moved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_days: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub predecessors: Vec<DependencyEdge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline_start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline_finish: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub late_start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub late_finish: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_float: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_critical: Option<bool>,
}

impl Task {
    pub fn new(id: i32, name: impl Into<String>, duration_days: i64) -> Self {
        Self {
            id,
            name: name.into(),
            duration_days: Some(duration_days),
            start_date: None,
            end_date: None,
            predecessors: Vec::new(),
            baseline_start: None,
            baseline_finish: None,
            late_start: None,
            late_finish: None,
            total_float: None,
            is_critical: None,
        }
    }

    /// Effective duration in calendar days: the stored value when present,
    /// otherwise derived from the inclusive date range, clamped to at least 1.
    pub fn normalized_duration(&self) -> i64 {
        let duration = match self.duration_days {
            Some(days) => days,
            None => match (self.start_date, self.end_date) {
                (Some(start), Some(end)) => (end - start).num_days() + 1,
                _ => 1,
            },
        };
        duration.max(1)
    }

    /// Duration restated in working days via [`approximate_working_days`].
    pub fn working_days_estimate(&self) -> i64 {
        approximate_working_days(self.normalized_duration())
    }
}

/// Coarse calendar-days to working-days conversion: five working days per
/// full week, remainder days counted as working days up to the weekly rate.
/// The result ignores which weekday the range starts on; downstream reporting
/// depends on this exact arithmetic, so it is kept as-is.
pub fn approximate_working_days(calendar_days: i64) -> i64 {
    if calendar_days <= 0 {
        return 0;
    }
    let full_weeks = calendar_days / 7;
    let remainder = calendar_days % 7;
    full_weeks * 5 + remainder.min(5)
}
