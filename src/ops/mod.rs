//! Lifecycle operations: validation plus persistence, one module per
//! aggregate. Every operation takes the caller's resolved organizer id
//! explicitly; there is no ambient identity.

pub mod code_ops;
pub mod member_ops;
pub mod poll_ops;
pub mod vote_ops;
