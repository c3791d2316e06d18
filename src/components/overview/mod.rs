//! Miniature diagram overview that frames the current station.
//!
//! [`Overview`] holds the document, the highlight target and the zoom/pan
//! transform; [`StationOverview`] binds it to a canvas element.

mod component;
pub mod config;
pub mod error;
pub mod framing;
pub mod groups;
pub mod loader;
mod render;
pub mod scale;
pub mod scene;
pub mod state;
pub mod types;

pub use component::StationOverview;
pub use config::{OverviewConfig, OverviewStyle};
pub use error::{LoadError, MultipleGroupMembershipError, OverviewError};
pub use state::Overview;
pub use types::{DiagramDocument, DiagramNode, NodeKind, StationId};
