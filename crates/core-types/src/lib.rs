//! # Camp Registry Core Types
//!
//! The domain layer of the registry: the stored records, the validated inputs
//! that may be written, and the projections that shape records for callers.
//!
//! Nothing in this crate performs I/O. The `database` crate persists the
//! structs defined here and the `web-server` crate drives validation and
//! projection around each store mutation.

pub mod error;
pub mod projection;
pub mod structs;
pub mod validation;

// Re-export the core types to provide a clean public API.
pub use error::ValidationError;
pub use projection::{ActivityJson, CamperJson, CamperView, SignupJson, SignupView};
pub use structs::{Activity, Camper, CamperChanges, NewCamper, NewSignup, ScheduledSignup, Signup};
pub use validation::{
    AGE_RANGE, TIME_RANGE, validate_camper_changes, validate_new_camper, validate_new_signup,
};
