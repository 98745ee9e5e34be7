//! Test suites for the pgtools service.

pub(crate) mod support;
