use crate::domain::insights::{
    AnalyzeParams, AnalyzerError, InsightAnalyzer, InsightData, InsightDraft, InsightPriority,
    InsightType,
};
use crate::domain::integrations::IntegrationType;
use async_trait::async_trait;
use std::sync::Arc;

/// The analyzers of every supported integration, in fan-out order.
pub fn default_analyzers() -> Arc<[Arc<dyn InsightAnalyzer>]> {
    let analyzers: [Arc<dyn InsightAnalyzer>; 5] = [
        Arc::new(SlackAnalyzer),
        Arc::new(LinearAnalyzer),
        Arc::new(GithubAnalyzer),
        Arc::new(CalendarAnalyzer),
        Arc::new(HrAnalyzer),
    ];

    Arc::from(analyzers)
}

fn draft(
    title: &str,
    description: &str,
    insight_type: InsightType,
    priority: InsightPriority,
    data: InsightData,
) -> InsightDraft {
    InsightDraft {
        title: title.to_string(),
        description: description.to_string(),
        insight_type,
        priority,
        data,
    }
}

//------------------------------------------------------------------------------
// Slack
//------------------------------------------------------------------------------

pub struct SlackAnalyzer;

#[async_trait]
impl InsightAnalyzer for SlackAnalyzer {
    fn source(&self) -> IntegrationType {
        IntegrationType::Slack
    }

    async fn analyze(&self, _params: AnalyzeParams) -> Result<Vec<InsightDraft>, AnalyzerError> {
        Ok(vec![
            draft(
                "Potential burnout risk detected",
                "Team member Jane Smith has worked late hours for 5 consecutive days.",
                InsightType::Burnout,
                InsightPriority::High,
                InsightData::AfterHoursActivity {
                    user: "Jane Smith".to_string(),
                    late_hours: 5,
                    average_response_time: "10 minutes".to_string(),
                },
            ),
            draft(
                "Team celebration opportunity",
                "The team has successfully completed the Q2 objectives ahead of schedule.",
                InsightType::Celebration,
                InsightPriority::Medium,
                InsightData::ChannelSentiment {
                    channel: "general".to_string(),
                    sentiment: "positive".to_string(),
                    keywords: vec![
                        "completed".to_string(),
                        "ahead of schedule".to_string(),
                        "great work".to_string(),
                    ],
                },
            ),
        ])
    }
}

//------------------------------------------------------------------------------
// Linear
//------------------------------------------------------------------------------

pub struct LinearAnalyzer;

#[async_trait]
impl InsightAnalyzer for LinearAnalyzer {
    fn source(&self) -> IntegrationType {
        IntegrationType::Linear
    }

    async fn analyze(&self, _params: AnalyzeParams) -> Result<Vec<InsightDraft>, AnalyzerError> {
        Ok(vec![
            draft(
                "Project bottleneck identified",
                "The authentication feature has been in review for over a week with no progress.",
                InsightType::Bottleneck,
                InsightPriority::Medium,
                InsightData::StalledProject {
                    project: "Authentication".to_string(),
                    status: "In Review".to_string(),
                    days_stuck: 7,
                    assignee: "Mark Johnson".to_string(),
                },
            ),
            draft(
                "Sprint completion rate declining",
                "The team's sprint completion rate has decreased by 15% over the last three sprints.",
                InsightType::General,
                InsightPriority::High,
                InsightData::CompletionRate {
                    current_completion_rate: "65%".to_string(),
                    previous_completion_rate: "80%".to_string(),
                    trend: "declining".to_string(),
                },
            ),
        ])
    }
}

//------------------------------------------------------------------------------
// GitHub
//------------------------------------------------------------------------------

pub struct GithubAnalyzer;

#[async_trait]
impl InsightAnalyzer for GithubAnalyzer {
    fn source(&self) -> IntegrationType {
        IntegrationType::Github
    }

    async fn analyze(&self, _params: AnalyzeParams) -> Result<Vec<InsightDraft>, AnalyzerError> {
        Ok(vec![
            draft(
                "Pull request review bottleneck",
                "Several pull requests have been waiting for review for more than 3 days.",
                InsightType::Bottleneck,
                InsightPriority::High,
                InsightData::ReviewQueue {
                    pending_prs: 5,
                    oldest_pr: "3 days".to_string(),
                    repository: "main-app".to_string(),
                },
            ),
            draft(
                "Code quality improvement",
                "Test coverage has increased by 10% in the last month.",
                InsightType::Celebration,
                InsightPriority::Medium,
                InsightData::TestCoverage {
                    current_coverage: "85%".to_string(),
                    previous_coverage: "75%".to_string(),
                    trend: "improving".to_string(),
                },
            ),
        ])
    }
}

//------------------------------------------------------------------------------
// Calendar
//------------------------------------------------------------------------------

pub struct CalendarAnalyzer;

#[async_trait]
impl InsightAnalyzer for CalendarAnalyzer {
    fn source(&self) -> IntegrationType {
        IntegrationType::Calendar
    }

    async fn analyze(&self, _params: AnalyzeParams) -> Result<Vec<InsightDraft>, AnalyzerError> {
        Ok(vec![
            draft(
                "Meeting efficiency improvement needed",
                "Weekly planning meetings are consistently running 15 minutes over scheduled time.",
                InsightType::General,
                InsightPriority::Low,
                InsightData::MeetingOverrun {
                    meeting_type: "Planning".to_string(),
                    average_overrun: "15 minutes".to_string(),
                    frequency: "weekly".to_string(),
                },
            ),
            draft(
                "Deep work time decreasing",
                "Team members have 20% less uninterrupted work time compared to last month.",
                InsightType::Burnout,
                InsightPriority::Medium,
                InsightData::DeepWork {
                    current_deep_work_hours: "12 hours/week".to_string(),
                    previous_deep_work_hours: "15 hours/week".to_string(),
                    trend: "decreasing".to_string(),
                },
            ),
        ])
    }
}

//------------------------------------------------------------------------------
// HR
//------------------------------------------------------------------------------

pub struct HrAnalyzer;

#[async_trait]
impl InsightAnalyzer for HrAnalyzer {
    fn source(&self) -> IntegrationType {
        IntegrationType::Hr
    }

    async fn analyze(&self, _params: AnalyzeParams) -> Result<Vec<InsightDraft>, AnalyzerError> {
        Ok(vec![
            draft(
                "Employee growth opportunity",
                "Sarah Lee has completed all required training and is ready for promotion consideration.",
                InsightType::Celebration,
                InsightPriority::Medium,
                InsightData::GrowthReadiness {
                    employee: "Sarah Lee".to_string(),
                    training_completed: true,
                    time_in_role: "18 months".to_string(),
                },
            ),
            draft(
                "Retention risk identified",
                "Alex Wong has shown signs of disengagement and may be at risk of leaving.",
                InsightType::Burnout,
                InsightPriority::High,
                InsightData::Engagement {
                    employee: "Alex Wong".to_string(),
                    engagement_score: "65%".to_string(),
                    previous_score: "85%".to_string(),
                    trend: "decreasing".to_string(),
                },
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::integrations::Integration;
    use time::OffsetDateTime;

    fn params(integration_type: IntegrationType) -> AnalyzeParams {
        AnalyzeParams {
            team_id: "team_1".to_string(),
            integration: Integration {
                id: "intg_1".to_string(),
                team_id: "team_1".to_string(),
                integration_type,
                name: integration_type.display_name().to_string(),
                config: None,
                active: true,
                created_at: OffsetDateTime::UNIX_EPOCH,
                updated_at: OffsetDateTime::UNIX_EPOCH,
            },
        }
    }

    #[test]
    fn test_default_analyzers_cover_every_integration_type() {
        let sources: Vec<IntegrationType> =
            default_analyzers().iter().map(|a| a.source()).collect();

        assert_eq!(IntegrationType::ALL.to_vec(), sources);
    }

    #[tokio::test]
    async fn test_every_analyzer_returns_two_drafts() {
        for analyzer in default_analyzers().iter() {
            let drafts = analyzer.analyze(params(analyzer.source())).await.unwrap();

            assert_eq!(2, drafts.len(), "{}", analyzer.source());
        }
    }

    #[tokio::test]
    async fn test_slack_drafts() {
        let drafts = SlackAnalyzer
            .analyze(params(IntegrationType::Slack))
            .await
            .unwrap();

        assert_eq!("Potential burnout risk detected", drafts[0].title);
        assert_eq!(InsightType::Burnout, drafts[0].insight_type);
        assert_eq!(InsightPriority::High, drafts[0].priority);
        assert_eq!(InsightType::Celebration, drafts[1].insight_type);
        assert_eq!(InsightPriority::Medium, drafts[1].priority);
    }

    #[tokio::test]
    async fn test_calendar_meeting_draft_is_low_priority() {
        let drafts = CalendarAnalyzer
            .analyze(params(IntegrationType::Calendar))
            .await
            .unwrap();

        assert_eq!("Meeting efficiency improvement needed", drafts[0].title);
        assert_eq!(InsightPriority::Low, drafts[0].priority);
    }
}
