use crate::domain::insights::{Insight, InsightPriority};
use serde::{Deserialize, Serialize};
use time::{Date, Duration, OffsetDateTime};

pub const MIN_SCORE: i32 = 0;
pub const MAX_SCORE: i32 = 100;

/// An average above this is classified as strong.
const STRONG_THRESHOLD: i32 = 80;

pub const DAILY_HIGHLIGHTS: [&str; 3] = [
    "Team completed 85% of sprint tasks",
    "3 new features shipped to production",
    "Customer satisfaction rating at 92%",
];

pub const KEY_ACCOMPLISHMENTS: [&str; 3] = [
    "Completed sprint with 92% of planned story points",
    "Reduced bug backlog by 15%",
    "Improved API response time by 30%",
];

pub const AREAS_FOR_IMPROVEMENT: [&str; 3] = [
    "Meeting efficiency could be improved",
    "More cross-team collaboration needed",
    "Documentation updates lagging behind code changes",
];

text_enum! {
    pub enum DigestType: "digest type" {
        Daily => "daily",
        Weekly => "weekly",
    }
}

text_enum! {
    pub enum Trend: "trend" {
        Increasing => "increasing",
        Stable => "stable",
        Decreasing => "decreasing",
    }
}

text_enum! {
    pub enum Standing: "standing" {
        Strong => "strong",
        NeedsImprovement => "needs improvement",
    }
}

impl Standing {
    pub fn classify(average: i32) -> Self {
        if average > STRONG_THRESHOLD {
            Standing::Strong
        } else {
            Standing::NeedsImprovement
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    #[serde(rename = "collaborationScore")]
    pub collaboration: i32,
    #[serde(rename = "productivityScore")]
    pub productivity: i32,
    #[serde(rename = "moraleScore")]
    pub morale: i32,
    #[serde(rename = "wellnessScore")]
    pub wellness: i32,
}

impl Scores {
    pub fn validate(&self) -> Result<(), String> {
        for (name, score) in [
            ("collaboration", self.collaboration),
            ("productivity", self.productivity),
            ("morale", self.morale),
            ("wellness", self.wellness),
        ] {
            if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
                return Err(format!(
                    "{name} must be between {MIN_SCORE} and {MAX_SCORE}, got {score}"
                ));
            }
        }

        Ok(())
    }

    /// Rounded per-score mean. An empty slice averages to zero.
    pub fn average(metrics: &[TeamMetric]) -> Self {
        let count = metrics.len().max(1) as f64;
        let mean = |score: fn(&Scores) -> i32| {
            let sum: i64 = metrics.iter().map(|m| i64::from(score(&m.scores))).sum();
            (sum as f64 / count).round() as i32
        };

        Scores {
            collaboration: mean(|s| s.collaboration),
            productivity: mean(|s| s.productivity),
            morale: mean(|s| s.morale),
            wellness: mean(|s| s.wellness),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricTrends {
    pub collaboration: Trend,
    pub productivity: Trend,
    pub morale: Trend,
    pub wellness: Trend,
}

impl MetricTrends {
    pub const DAILY: MetricTrends = MetricTrends {
        collaboration: Trend::Stable,
        productivity: Trend::Increasing,
        morale: Trend::Stable,
        wellness: Trend::Decreasing,
    };
}

/// Trend and highlight data recorded next to a metric's scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricData {
    pub trends: MetricTrends,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamMetric {
    pub id: String,
    pub team_id: String,
    pub date: Date,
    pub scores: Scores,
    pub data: Option<MetricData>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Insight ids grouped by priority.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestInsights {
    pub high: Vec<String>,
    pub medium: Vec<String>,
    pub low: Vec<String>,
}

impl DigestInsights {
    pub fn from_insights(insights: &[Insight]) -> Self {
        let mut buckets = DigestInsights::default();
        for insight in insights {
            let bucket = match insight.priority {
                InsightPriority::High => &mut buckets.high,
                InsightPriority::Medium => &mut buckets.medium,
                InsightPriority::Low => &mut buckets.low,
            };
            bucket.push(insight.id.clone());
        }

        buckets
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyTrends {
    pub collaboration: Standing,
    pub productivity: Standing,
    pub morale: Standing,
    pub wellness: Standing,
}

impl From<Scores> for WeeklyTrends {
    fn from(averages: Scores) -> Self {
        WeeklyTrends {
            collaboration: Standing::classify(averages.collaboration),
            productivity: Standing::classify(averages.productivity),
            morale: Standing::classify(averages.morale),
            wellness: Standing::classify(averages.wellness),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyMetrics {
    #[serde(flatten)]
    pub scores: Scores,
    pub trends: MetricTrends,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyMetrics {
    #[serde(flatten)]
    pub scores: Scores,
    pub weekly_trends: WeeklyTrends,
    pub key_accomplishments: Vec<String>,
    pub areas_for_improvement: Vec<String>,
}

impl WeeklyMetrics {
    pub fn from_averages(averages: Scores) -> Self {
        WeeklyMetrics {
            scores: averages,
            weekly_trends: averages.into(),
            key_accomplishments: KEY_ACCOMPLISHMENTS.map(String::from).to_vec(),
            areas_for_improvement: AREAS_FOR_IMPROVEMENT.map(String::from).to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DigestMetrics {
    Daily(DailyMetrics),
    Weekly(WeeklyMetrics),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PulseDigest {
    pub id: String,
    pub team_id: String,
    pub date: Date,
    pub digest_type: DigestType,
    pub insights: DigestInsights,
    pub metrics: DigestMetrics,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// First and last day of the Sunday-start week containing `date`, both inclusive.
pub fn week_bounds(date: Date) -> (Date, Date) {
    let offset = i64::from(date.weekday().number_days_from_sunday());
    let start = date.saturating_sub(Duration::days(offset));
    let end = start.saturating_add(Duration::days(6));

    (start, end)
}
