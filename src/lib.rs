//! # Keyhole (username/password authentication)
//!
//! `keyhole` stores user credentials and login attempts in flat JSON documents
//! and exposes two operations over HTTP: signup and login.
//!
//! ## Credentials
//!
//! Passwords are hashed with **Argon2id** using a per-user random salt. Only the
//! PHC-format hash string is persisted; plaintext passwords never reach disk or
//! the logs.
//!
//! ## Attempt log
//!
//! Every login attempt (successful or not) appends one entry to the attempt log.
//! Unknown usernames and wrong passwords produce the same `401` response so the
//! API cannot be used to enumerate accounts.
//!
//! ## Storage
//!
//! Both documents are loaded fully, mutated and rewritten in full. Mutations are
//! serialized by the store, so the duplicate-username check and the insert happen
//! as one step.

pub mod api;
pub mod auth;
pub mod cli;
pub mod store;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
