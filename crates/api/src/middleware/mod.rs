//! Request guards.

pub mod portal;

pub use portal::{PORTAL_CODE_HEADER, PORTAL_USER_HEADER, PortalLogin};
