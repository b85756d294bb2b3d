//! Session lifecycle: records, issuance, rotation, revocation.

pub mod authority;
pub mod record;
