pub mod display;
pub mod domain;
pub mod lifecycle;
pub mod notes;
pub mod ports;
pub mod route;
pub mod validation;

pub use display::{ComparisonDisplay, TrendChart};
pub use domain::{
    ComparisonResult, MissedPoint, Mode, NewTopic, Session, SessionId, SessionStatus, SoloMetric,
    Topic, TopicId, TrendSnapshot,
};
pub use lifecycle::{LifecycleError, RescheduleError, SessionAction};
pub use notes::NoteSubmission;
pub use ports::{PortError, PortResult, TokenError, TokenProvider, TrackerApi};
pub use route::Route;
pub use validation::ValidationError;
