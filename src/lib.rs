//! CNAME host checker: verifies that hostnames resolve to a CNAME target
//! sitting directly under a configured parent domain.
//!
//! DNS transport is abstracted behind the `DnsResolver` trait — tests run
//! against a `MockResolver`, the binary against a fixed public upstream.

pub mod check;
pub mod common;
