//! Subject domain entities.

pub mod kind;
pub mod model;
pub mod role;
pub mod status;

pub use kind::SubjectKind;
pub use model::Subject;
pub use role::SubjectRole;
pub use status::SubjectStatus;
