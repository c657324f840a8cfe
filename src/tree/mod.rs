//! Filesystem enumeration and hashing
//!
//! Walks a directory tree and computes a content digest for every regular
//! file found under it.

pub mod builder;
pub mod hasher;
pub mod path;
pub mod walker;
