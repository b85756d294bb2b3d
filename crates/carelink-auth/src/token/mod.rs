//! Access credential minting and verification.
//!
//! Credentials are self-contained signed tokens; verifying one touches
//! nothing but the signing key. Whether the embedded session is still
//! live is a separate question answered by the session authority.

pub mod claims;
pub mod decoder;
pub mod encoder;
