//! Routing and request handlers
//!
//! This module maps parsed requests to the handlers that answer them: the
//! fixed root, echo and user-agent endpoints, and static file read/write.

pub mod files;
pub mod handlers;
pub mod router;

pub use files::{FileError, StaticFiles};
pub use router::{Handler, PathMatcher, Route, Router};
