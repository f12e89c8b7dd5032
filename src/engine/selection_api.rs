use super::Engine;

use async_trait::async_trait;
use tokio::time::sleep;
use uuid::Uuid;

use crate::{
    api::SelectionAPI,
    entities::{
        Category, Confirmation, LocationRecord, NotificationLevel, Phase, RouteSelectionState,
        SearchRole,
    },
    error::{invalid_input_error, invalid_state_error, Error},
};

#[async_trait]
impl SelectionAPI for Engine {
    #[tracing::instrument(skip(self, record), fields(name = %record.name))]
    async fn on_result_selected(&self, role: SearchRole, record: LocationRecord) -> Confirmation {
        let route_ready = {
            let mut state = self.state.lock().await;

            let was_complete = state.selection.is_complete();
            state.selection.set(role, record.clone());

            self.close_all_lists(&mut state);
            self.view.set_input_text(role, &record.name);

            // pending lookups for this role must not reopen its list
            let role_state = state.role_mut(role);
            role_state.latest_request += 1;
            role_state.input_text = record.name.clone();
            role_state.phase = Phase::Selected {
                record: record.clone(),
            };

            !was_complete && state.selection.is_complete()
        };

        let confirmation = Confirmation {
            role,
            name: record.name.clone(),
        };

        tracing::info!("{} committed", role.key());
        self.notifications
            .notify(&confirmation.message(), NotificationLevel::Success);

        if let (Some(map), Some(coordinates)) = (&self.map, record.coordinates) {
            match role {
                SearchRole::Pickup => map.set_pickup_location(coordinates).await,
                SearchRole::Destination => map.set_destination_location(coordinates).await,
            }
        }

        if route_ready {
            tracing::info!("pickup and destination set, requesting route");

            if let Some(map) = &self.map {
                sleep(self.route_delay).await;
                map.calculate_route().await;
            }
        }

        confirmation
    }

    #[tracing::instrument(skip(self))]
    async fn select_result(&self, role: SearchRole, index: usize) -> Result<Confirmation, Error> {
        let record = {
            let state = self.state.lock().await;

            let results = state
                .role(role)
                .phase
                .results()
                .ok_or_else(|| invalid_state_error())?;

            results
                .candidate(index)
                .cloned()
                .ok_or_else(|| invalid_input_error())?
        };

        Ok(self.on_result_selected(role, record).await)
    }

    #[tracing::instrument(skip(self))]
    async fn use_current_location(&self, role: SearchRole) -> Result<Confirmation, Error> {
        let position = self.geolocation.current_position().await?;
        let address = self.source.reverse_geocode(position).await?;

        let record = LocationRecord::new(
            Uuid::new_v4().to_string(),
            "Current Location",
            address,
            Category::Current,
            Some(position),
        );

        Ok(self.on_result_selected(role, record).await)
    }

    #[tracing::instrument(skip(self))]
    async fn reset(&self) {
        let mut state = self.state.lock().await;

        state.selection.clear();

        for role in SearchRole::ALL {
            self.idle(&mut state, role);

            let role_state = state.role_mut(role);
            role_state.latest_request += 1;
            role_state.input_text.clear();

            self.view.set_input_text(role, "");
        }
    }

    async fn selection(&self) -> RouteSelectionState {
        self.state.lock().await.selection.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::super::fakes::{HarnessBuilder, MapCall, ViewCall};
    use super::*;
    use crate::api::SearchAPI;
    use crate::entities::Coordinates;
    use crate::error::{permission_denied_error, timeout_error};
    use tokio_test::block_on;

    async fn pick(engine: &Engine, role: SearchRole, query: &str) -> Confirmation {
        engine.on_query_changed(role, query).await;
        engine.select_result(role, 0).await.unwrap()
    }

    #[test]
    fn selection_fills_only_its_role() {
        let h = HarnessBuilder::new().build();

        let (confirmation, selection) = block_on(async {
            let confirmation = pick(&h.engine, SearchRole::Pickup, "times").await;
            (confirmation, h.engine.selection().await)
        });

        assert_eq!(
            confirmation,
            Confirmation {
                role: SearchRole::Pickup,
                name: "Times Square".into()
            }
        );
        assert_eq!(selection.pickup.map(|r| r.id), Some("1".to_string()));
        assert!(selection.destination.is_none());
    }

    #[test]
    fn selection_updates_input_closes_lists_and_notifies() {
        let h = HarnessBuilder::new().build();

        block_on(async {
            h.engine.on_query_changed(SearchRole::Destination, "jfk").await;
            pick(&h.engine, SearchRole::Pickup, "times").await;

            assert_eq!(h.engine.input_text(SearchRole::Pickup).await, "Times Square");
            assert!(matches!(
                h.engine.phase(SearchRole::Pickup).await,
                Phase::Selected { .. }
            ));
            assert_eq!(h.engine.phase(SearchRole::Destination).await, Phase::Idle);
        });

        let calls = h.view.calls.lock().unwrap().clone();
        assert!(calls.contains(&ViewCall::Input(SearchRole::Pickup, "Times Square".into())));
        assert!(calls.contains(&ViewCall::Clear(SearchRole::Destination)));

        let messages = h.notifications.messages.lock().unwrap().clone();
        assert_eq!(
            messages,
            vec![(
                "📍 PICKUP set to Times Square".to_string(),
                NotificationLevel::Success
            )]
        );
    }

    #[test]
    fn coordinates_are_forwarded_to_the_map() {
        let h = HarnessBuilder::new().build();

        block_on(async {
            pick(&h.engine, SearchRole::Pickup, "times").await;
            pick(&h.engine, SearchRole::Destination, "jfk").await;
        });

        let calls = h.map.calls.lock().unwrap().clone();
        assert_eq!(
            calls,
            vec![
                MapCall::Pickup(Coordinates::new(40.7580, -73.9855)),
                MapCall::Destination(Coordinates::new(40.6413, -73.7781)),
                MapCall::CalculateRoute,
            ]
        );
    }

    #[test]
    fn route_is_requested_once_per_transition() {
        let h = HarnessBuilder::new().build();

        block_on(async {
            pick(&h.engine, SearchRole::Pickup, "times").await;
            assert_eq!(h.map.route_requests(), 0);

            pick(&h.engine, SearchRole::Destination, "jfk").await;
            assert_eq!(h.map.route_requests(), 1);

            pick(&h.engine, SearchRole::Destination, "laguardia").await;
            pick(&h.engine, SearchRole::Pickup, "wall").await;
            assert_eq!(h.map.route_requests(), 1);
        });
    }

    #[test]
    fn reset_allows_a_new_transition() {
        let h = HarnessBuilder::new().build();

        block_on(async {
            pick(&h.engine, SearchRole::Pickup, "times").await;
            pick(&h.engine, SearchRole::Destination, "jfk").await;

            h.engine.reset().await;
            assert_eq!(h.engine.selection().await, RouteSelectionState::default());
            assert_eq!(h.engine.input_text(SearchRole::Pickup).await, "");

            pick(&h.engine, SearchRole::Pickup, "central").await;
            pick(&h.engine, SearchRole::Destination, "bridge").await;
        });

        assert_eq!(h.map.route_requests(), 2);
    }

    #[test]
    fn fallback_candidate_skips_the_map() {
        let h = HarnessBuilder::new().failing_source().build();

        let selection = block_on(async {
            pick(&h.engine, SearchRole::Pickup, "times").await;
            h.engine.selection().await
        });

        assert_eq!(selection.pickup, Some(LocationRecord::use_current_location()));
        assert!(h.map.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn missing_map_is_a_no_op() {
        let h = HarnessBuilder::new().without_map().build();

        let selection = block_on(async {
            pick(&h.engine, SearchRole::Pickup, "times").await;
            pick(&h.engine, SearchRole::Destination, "jfk").await;
            h.engine.selection().await
        });

        assert!(selection.is_complete());
        assert!(h.map.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn selecting_without_open_list_fails() {
        let h = HarnessBuilder::new().build();

        let err = block_on(h.engine.select_result(SearchRole::Pickup, 0)).unwrap_err();

        assert_eq!(err, invalid_state_error());
    }

    #[test]
    fn selecting_past_the_end_fails() {
        let h = HarnessBuilder::new().build();

        let err = block_on(async {
            h.engine.on_query_changed(SearchRole::Pickup, "times").await;
            h.engine.select_result(SearchRole::Pickup, 1).await.unwrap_err()
        });

        assert_eq!(err, invalid_input_error());
    }

    #[tokio::test]
    async fn selection_discards_pending_lookup() {
        let h = HarnessBuilder::new()
            .delay("jf", tokio::time::Duration::from_millis(50))
            .build();

        let record = crate::external::catalog::default_catalog()[4].clone();

        tokio::join!(
            h.engine.on_query_changed(SearchRole::Destination, "jf"),
            h.engine.on_result_selected(SearchRole::Destination, record),
        );

        assert!(matches!(
            h.engine.phase(SearchRole::Destination).await,
            Phase::Selected { .. }
        ));
    }

    #[test]
    fn current_location_is_reverse_geocoded() {
        let position = Coordinates::new(40.75, -73.98);
        let h = HarnessBuilder::new().geolocation(Ok(position)).build();

        let selection = block_on(async {
            let confirmation = h
                .engine
                .use_current_location(SearchRole::Pickup)
                .await
                .unwrap();
            assert_eq!(confirmation.name, "Current Location");

            h.engine.selection().await
        });

        let pickup = selection.pickup.unwrap();
        assert_eq!(pickup.address, "Times Square, Manhattan, NY");
        assert_eq!(pickup.category, Category::Current);
        assert_eq!(pickup.coordinates, Some(position));
        assert_eq!(
            h.map.calls.lock().unwrap().clone(),
            vec![MapCall::Pickup(position)]
        );
    }

    #[test]
    fn geolocation_failures_reach_the_caller() {
        for failure in [permission_denied_error(), timeout_error()] {
            let h = HarnessBuilder::new().geolocation(Err(failure.clone())).build();

            let err = block_on(h.engine.use_current_location(SearchRole::Pickup)).unwrap_err();

            assert_eq!(err, failure);
            assert!(block_on(h.engine.selection()).pickup.is_none());
        }
    }
}
