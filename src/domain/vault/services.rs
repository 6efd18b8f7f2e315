use crate::domain::vault::{
    CreateEventDBParams, CreateEventServiceParams, Event, EventRepository, EventServiceParams,
    FindEventDBParams, ListEventsDBParams, ListTeamEventsParams, VaultError, VaultService,
};
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct Service<DB>
where
    DB: EventRepository,
{
    db: DB,
}

impl<DB> Service<DB>
where
    DB: EventRepository,
{
    pub fn new(db: DB) -> Self {
        Self { db }
    }
}

#[async_trait]
impl<DB> VaultService for Service<DB>
where
    DB: EventRepository,
{
    async fn create_event(&self, params: CreateEventServiceParams) -> Result<Event, VaultError> {
        if params.title.trim().is_empty() {
            return Err(VaultError::Validation("title must not be empty".to_string()));
        }

        let tags = params
            .tags
            .into_iter()
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect();

        let team_id = params.team_id.clone();
        let event = self
            .db
            .create_event(CreateEventDBParams {
                team_id: params.team_id,
                event_type: params.event_type,
                title: params.title.trim().to_string(),
                description: params.description,
                date: params.date,
                tags,
                data: params.data,
            })
            .await
            .inspect_err(|e| tracing::error!(error = ?e, team_id = %team_id, "error creating event"))?;

        tracing::info!(event_id = %event.id, event_type = %event.event_type, "event created");

        Ok(event)
    }

    async fn get_event(&self, params: EventServiceParams) -> Result<Option<Event>, VaultError> {
        let event = self
            .db
            .find_event_by_id(FindEventDBParams {
                team_id: params.team_id,
                event_id: params.event_id.clone(),
            })
            .await
            .inspect_err(|e| {
                tracing::error!(error = ?e, event_id = %params.event_id, "error getting event")
            })?;

        Ok(event)
    }

    async fn list_team_events(
        &self,
        params: ListTeamEventsParams,
    ) -> Result<Vec<Event>, VaultError> {
        let events = self
            .db
            .list_events_by_team(ListEventsDBParams {
                team_id: params.team_id.clone(),
                event_type: params.event_type,
            })
            .await
            .inspect_err(|e| {
                tracing::error!(error = ?e, team_id = %params.team_id, "error getting team events")
            })?;

        Ok(events)
    }

    async fn delete_event(&self, params: EventServiceParams) -> Result<bool, VaultError> {
        let deleted = self
            .db
            .delete_event(FindEventDBParams {
                team_id: params.team_id,
                event_id: params.event_id.clone(),
            })
            .await
            .inspect_err(|e| {
                tracing::error!(error = ?e, event_id = %params.event_id, "error deleting event")
            })?;

        if deleted {
            tracing::info!(event_id = %params.event_id, "event deleted");
        }

        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::vault::{EventType, MockEventRepository};
    use std::future;
    use time::OffsetDateTime;
    use time::macros::date;

    #[tokio::test]
    async fn test_create_event_trims_tags() {
        let mut db = MockEventRepository::new();
        db.expect_create_event()
            .times(1)
            .withf(|params| params.tags == vec!["launch".to_string(), "q3".to_string()])
            .returning(|params| {
                Box::pin(future::ready(Ok(Event {
                    id: "evnt_1".to_string(),
                    team_id: params.team_id,
                    event_type: params.event_type,
                    title: params.title,
                    description: params.description,
                    date: params.date,
                    tags: params.tags,
                    data: params.data,
                    created_at: OffsetDateTime::UNIX_EPOCH,
                    updated_at: OffsetDateTime::UNIX_EPOCH,
                })))
            });

        let service = Service::new(db);
        let event = service
            .create_event(CreateEventServiceParams {
                team_id: "team_1".to_string(),
                event_type: EventType::Milestone,
                title: "Beta launch".to_string(),
                description: None,
                date: date!(2024 - 07 - 01),
                tags: vec![" launch ".to_string(), "".to_string(), "q3".to_string()],
                data: None,
            })
            .await
            .unwrap();

        assert_eq!("evnt_1", event.id);
        assert_eq!(EventType::Milestone, event.event_type);
    }

    #[tokio::test]
    async fn test_create_event_requires_title() {
        let mut db = MockEventRepository::new();
        db.expect_create_event().times(0);

        let service = Service::new(db);
        let result = service
            .create_event(CreateEventServiceParams {
                team_id: "team_1".to_string(),
                event_type: EventType::Decision,
                title: "  ".to_string(),
                description: None,
                date: date!(2024 - 07 - 01),
                tags: vec![],
                data: None,
            })
            .await;

        assert!(matches!(result, Err(VaultError::Validation(_))));
    }

    #[tokio::test]
    async fn test_list_team_events_passes_type_filter() {
        let mut db = MockEventRepository::new();
        db.expect_list_events_by_team()
            .times(1)
            .withf(|params| params.event_type == Some(EventType::Meeting))
            .returning(|_| Box::pin(future::ready(Ok(vec![]))));

        let service = Service::new(db);
        let events = service
            .list_team_events(ListTeamEventsParams {
                team_id: "team_1".to_string(),
                event_type: Some(EventType::Meeting),
            })
            .await
            .unwrap();

        assert!(events.is_empty());
    }
}
