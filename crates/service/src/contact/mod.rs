//! Public contact form: submission validation and the outbound email relay.

pub mod domain;
pub mod errors;
pub mod relay;

pub use domain::ContactSubmission;
pub use errors::RelayError;
pub use relay::ContactRelay;
