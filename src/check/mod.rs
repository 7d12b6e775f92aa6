//! Host CNAME checking: parse input lines, query, classify, report.

mod parser;
mod report;
mod types;
mod validate;

pub use parser::{parse_input, parse_line, InputError};
pub use report::Reporter;
pub use types::{CheckError, CheckRequest, HostResult, Outcome};
pub use validate::CnameChecker;

use std::io::{self, Write};

use crate::common::dns::DnsResolver;

/// Runs every request through the checker, sequentially and in input order,
/// writing the report as it goes. Per-host failures never abort the batch.
///
/// Returns one [`HostResult`] per request, in input order.
pub async fn run_checks<R: DnsResolver, W: Write>(
    checker: &CnameChecker<R>,
    requests: &[CheckRequest],
    out: W,
) -> io::Result<Vec<HostResult>> {
    let mut reporter = Reporter::new(out, requests.len())?;
    let mut results = Vec::with_capacity(requests.len());

    for request in requests {
        let result = match checker
            .check(&request.host, request.expected_label.as_deref())
            .await
        {
            Ok(()) => HostResult::pass(&request.host),
            Err(e) => HostResult::fail(&request.host, e.to_string()),
        };
        reporter.record(&result)?;
        results.push(result);
    }

    reporter.finish()?;
    Ok(results)
}
