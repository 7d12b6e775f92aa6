//! Infrastructure shared by the checker: DNS transport and domain-name helpers.

pub mod dns;
pub mod domain;
