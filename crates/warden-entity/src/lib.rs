//! # warden-entity
//!
//! Domain entity models for Warden. The only entity the auth subsystem
//! touches is the [`Subject`](subject::Subject): the authenticated party a
//! credential resolves to.

pub mod subject;

pub use subject::{Subject, SubjectKind, SubjectRole, SubjectStatus};
