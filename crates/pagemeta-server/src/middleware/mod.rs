//! Request middleware.

pub(crate) mod meta;
