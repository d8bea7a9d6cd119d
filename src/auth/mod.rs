//! Request signing for the MovieBox mobile API.
//!
//! Every request carries two headers derived from the same millisecond
//! timestamp: `x-client-token` (see [`token::client_token`]) and
//! `x-tr-signature`, an HMAC-MD5 over the canonical form of the request
//! (see [`canonical::canonical_string`]).

pub mod canonical;
pub mod signer;
pub mod token;

pub use signer::{AuthHeaders, HttpMethod, RequestSigner};
