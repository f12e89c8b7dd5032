use super::{Engine, MIN_QUERY_CHARS};

use async_trait::async_trait;

use crate::{
    api::SearchAPI,
    config::ListPolicy,
    entities::{LocationRecord, Phase, ResultList, SearchRole},
};

#[async_trait]
impl SearchAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn on_query_changed(&self, role: SearchRole, text: &str) {
        let request = {
            let mut state = self.state.lock().await;

            let role_state = state.role_mut(role);
            role_state.latest_request += 1;
            role_state.input_text = text.to_string();
            let request = role_state.latest_request;

            if text.chars().count() < MIN_QUERY_CHARS {
                self.idle(&mut state, role);
                return;
            }

            self.close_lists_before_open(&mut state, role);
            state.role_mut(role).phase = Phase::Searching { request };

            request
        };

        let records = match self.source.search(text).await {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!("location search failed, offering current location: {}", err);
                vec![LocationRecord::use_current_location()]
            }
        };

        self.on_results_ready(role, request, records).await;
    }

    #[tracing::instrument(skip(self, results))]
    async fn on_results_ready(
        &self,
        role: SearchRole,
        request: u64,
        results: Vec<LocationRecord>,
    ) -> bool {
        let mut state = self.state.lock().await;

        if state.role(role).latest_request != request {
            tracing::debug!(
                "discarding results of superseded request, latest is {}",
                state.role(role).latest_request
            );
            return false;
        }

        if self.list_policy == ListPolicy::Exclusive {
            self.close_all_lists(&mut state);
        }

        let results = ResultList::from_records(results);
        self.view.render_results(role, &results);
        state.role_mut(role).phase = Phase::ResultsShown { results };

        true
    }

    #[tracing::instrument(skip(self))]
    async fn on_outside_interaction(&self) {
        let mut state = self.state.lock().await;

        self.close_all_lists(&mut state);
    }

    async fn phase(&self, role: SearchRole) -> Phase {
        self.state.lock().await.role(role).phase.clone()
    }

    async fn input_text(&self, role: SearchRole) -> String {
        self.state.lock().await.role(role).input_text.clone()
    }
}
