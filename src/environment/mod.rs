//! The shared environment and the views pets get of it.

#[allow(clippy::module_inception)]
mod environment;
mod event;
mod region;
mod view;

pub use environment::{Environment, RegionNotFound};
pub use event::{ActiveEvent, MAX_ACTIVE_EVENTS};
pub use region::{Projection, Region, RegionFeature, ResourcePool};
pub use view::{EnvView, FeatureView, ProjectionView, RegionView};
