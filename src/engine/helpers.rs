use super::{Engine, State};

use crate::{
    config::ListPolicy,
    entities::{Phase, SearchRole},
};

impl Engine {
    /// Removes the open list of `role`, if any. Selected and searching roles
    /// keep their phase.
    pub(super) fn close_list(&self, state: &mut State, role: SearchRole) {
        let role_state = state.role_mut(role);

        if let Phase::ResultsShown { results: _ } = role_state.phase {
            role_state.phase = Phase::Idle;
            self.view.clear_results(role);
        }
    }

    pub(super) fn close_all_lists(&self, state: &mut State) {
        for role in SearchRole::ALL {
            self.close_list(state, role);
        }
    }

    /// Closes whatever must go before `role` opens a new list.
    pub(super) fn close_lists_before_open(&self, state: &mut State, role: SearchRole) {
        match self.list_policy {
            ListPolicy::Independent => self.close_list(state, role),
            ListPolicy::Exclusive => self.close_all_lists(state),
        }
    }

    /// Leaves `role` idle with no list, whatever it was doing.
    pub(super) fn idle(&self, state: &mut State, role: SearchRole) {
        self.close_list(state, role);
        state.role_mut(role).phase = Phase::Idle;
    }
}
