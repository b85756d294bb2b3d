//! # carelink-auth
//!
//! The session and credential lifecycle authority for CareLink: session
//! issuance under a single-active-session policy, idle-TTL renewal,
//! refresh-secret rotation with reuse detection, revocation, and the
//! minting/verification of short-lived signed access credentials.

pub mod session;
pub mod token;

pub use session::authority::{IssuedSession, RotatedRefresh, SessionAuthority};
pub use token::claims::AccessClaims;
pub use token::decoder::TokenDecoder;
pub use token::encoder::{MintedCredential, TokenEncoder};
