pub mod api;
pub mod builder;
pub mod config;
pub mod event;
pub mod location;
pub mod metadata;
pub mod request;
pub mod sink;
pub mod time;
pub mod utils;

pub use builder::{EventBuilder, FeedbackInput};
pub use event::{EventType, FeedbackKind, NavigationEvent, RerouteDetail, RouteProgress};
pub use metadata::{Metadata, SessionState, EVENT_VERSION};
