use serde::{Deserialize, Serialize};

use crate::entities::{LocationRecord, SearchRole};

/// The rider's committed pickup and destination.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteSelectionState {
    pub pickup: Option<LocationRecord>,
    pub destination: Option<LocationRecord>,
}

impl RouteSelectionState {
    pub fn get(&self, role: SearchRole) -> Option<&LocationRecord> {
        match role {
            SearchRole::Pickup => self.pickup.as_ref(),
            SearchRole::Destination => self.destination.as_ref(),
        }
    }

    /// Overwrites the slot for `role`, returning the previous record.
    pub fn set(&mut self, role: SearchRole, record: LocationRecord) -> Option<LocationRecord> {
        let slot = match role {
            SearchRole::Pickup => &mut self.pickup,
            SearchRole::Destination => &mut self.destination,
        };

        slot.replace(record)
    }

    pub fn is_complete(&self) -> bool {
        self.pickup.is_some() && self.destination.is_some()
    }

    pub fn clear(&mut self) {
        self.pickup = None;
        self.destination = None;
    }
}
