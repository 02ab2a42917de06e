//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (HMAC-SHA256 signing, base64url, randomness)
//! - Password hashing (Argon2id with zeroized clear text)
//! - Cookie and bearer-token transport helpers

pub mod cookie;
pub mod crypto;
pub mod password;
