//! Requirements gathering sessions
//!
//! This module holds the per-session state model:
//!
//! - `requirements`: the fixed eight-field requirements record
//! - `transcript`: the append-only role-tagged message log
//! - `snapshot`: the exportable JSON capture of a session
//! - `core`: the [`Session`] state manager that ties them together
//! - `registry`: isolated, serialized sessions keyed by id

pub mod core;
pub mod registry;
pub mod requirements;
pub mod snapshot;
pub mod transcript;

pub use self::core::{Session, SessionPhase, FAILURE_PLACEHOLDER};
pub use registry::{SessionId, SessionRegistry, SharedSession};
pub use requirements::{FieldKind, RequirementField, RequirementsRecord};
pub use snapshot::SessionSnapshot;
pub use transcript::Transcript;
