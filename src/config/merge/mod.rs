//! Config composition: defaults and source precedence.

pub(crate) mod merge_policy;
pub(crate) mod service;
