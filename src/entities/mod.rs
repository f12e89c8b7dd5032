mod location;
mod role;
mod search;
mod selection;

pub use location::{Category, Coordinates, LocationRecord};
pub use role::SearchRole;
pub use search::{Confirmation, NotificationLevel, Phase, ResultList};
pub use selection::RouteSelectionState;
