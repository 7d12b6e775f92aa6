use tracing::debug;

use crate::common::dns::DnsResolver;
use crate::common::domain::labels;

use super::types::CheckError;

/// Checks that hosts CNAME into a fixed parent domain.
pub struct CnameChecker<R: DnsResolver> {
    resolver: R,
    parent: Vec<String>,
}

impl<R: DnsResolver> CnameChecker<R> {
    /// `parent_domain` is the label sequence every CNAME target must sit
    /// directly under, e.g. `"nusii.com"`.
    pub fn new(resolver: R, parent_domain: &str) -> Self {
        let parent = labels(parent_domain)
            .into_iter()
            .map(str::to_string)
            .collect();
        Self { resolver, parent }
    }

    /// One CNAME query, two exact string checks per target.
    ///
    /// Every CNAME record in the answer must pass; the first mismatch is the
    /// verdict. Matching is case-sensitive, and the only normalization
    /// applied to a target is stripping one trailing dot.
    pub async fn check(
        &self,
        host: &str,
        expected_label: Option<&str>,
    ) -> Result<(), CheckError> {
        let targets = self.resolver.query_cname(host).await?;

        if targets.is_empty() {
            return Err(CheckError::NoCname {
                host: host.to_string(),
            });
        }

        for target in &targets {
            debug!(host, target = %target, "found CNAME record");
            // labels() never yields an empty vec, so indexing past the
            // first label stays in range even for single-label targets.
            let parts = labels(target);

            if let Some(expected) = expected_label {
                if parts[0] != expected {
                    return Err(CheckError::LabelMismatch {
                        got: parts[0].to_string(),
                        expected: expected.to_string(),
                    });
                }
            }

            let parent: Vec<String> = parts[1..].iter().map(|l| l.to_string()).collect();
            if parent != self.parent {
                return Err(CheckError::ParentMismatch {
                    got: parent,
                    expected: self.parent.clone(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::dns::{DnsError, MockResolver};

    fn checker(resolver: MockResolver) -> CnameChecker<MockResolver> {
        CnameChecker::new(resolver, "nusii.com")
    }

    #[tokio::test]
    async fn pass_with_expected_label() {
        let resolver = MockResolver::new();
        resolver.add_cname("proposals.acme.com", vec!["app.nusii.com.".to_string()]);

        let result = checker(resolver).check("proposals.acme.com", Some("app")).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn pass_without_trailing_dot() {
        let resolver = MockResolver::new();
        resolver.add_cname("proposals.acme.com", vec!["app.nusii.com".to_string()]);

        let result = checker(resolver).check("proposals.acme.com", Some("app")).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn no_label_skips_first_label_check() {
        let resolver = MockResolver::new();
        resolver.add_cname("proposals.acme.com", vec!["anything.nusii.com.".to_string()]);

        let result = checker(resolver).check("proposals.acme.com", None).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn label_mismatch() {
        let resolver = MockResolver::new();
        resolver.add_cname("proposals.acme.com", vec!["www.nusii.com.".to_string()]);

        let err = checker(resolver)
            .check("proposals.acme.com", Some("app"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "got \"www\"; expected \"app\"");
    }

    #[tokio::test]
    async fn label_matching_is_case_sensitive() {
        let resolver = MockResolver::new();
        resolver.add_cname("proposals.acme.com", vec!["App.nusii.com.".to_string()]);

        let err = checker(resolver)
            .check("proposals.acme.com", Some("app"))
            .await
            .unwrap_err();
        assert!(matches!(err, CheckError::LabelMismatch { .. }));
    }

    #[tokio::test]
    async fn wrong_parent_domain() {
        let resolver = MockResolver::new();
        resolver.add_cname("proposals.acme.com", vec!["foo.example.com.".to_string()]);

        let err = checker(resolver)
            .check("proposals.acme.com", None)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            CheckError::ParentMismatch {
                got: vec!["example".to_string(), "com".to_string()],
                expected: vec!["nusii".to_string(), "com".to_string()],
            }
        );
        assert_eq!(
            err.to_string(),
            "got [\"example\", \"com\"]; expected [\"nusii\", \"com\"]"
        );
    }

    #[tokio::test]
    async fn parent_with_extra_labels_fails() {
        let resolver = MockResolver::new();
        resolver.add_cname("proposals.acme.com", vec!["app.eu.nusii.com.".to_string()]);

        let err = checker(resolver)
            .check("proposals.acme.com", Some("app"))
            .await
            .unwrap_err();
        assert!(matches!(err, CheckError::ParentMismatch { .. }));
    }

    #[tokio::test]
    async fn single_label_target_fails_cleanly() {
        let resolver = MockResolver::new();
        resolver.add_cname("proposals.acme.com", vec!["localhost.".to_string()]);

        let err = checker(resolver)
            .check("proposals.acme.com", None)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            CheckError::ParentMismatch {
                got: vec![],
                expected: vec!["nusii".to_string(), "com".to_string()],
            }
        );
    }

    #[tokio::test]
    async fn no_cname_record() {
        let resolver = MockResolver::new();
        resolver.add_cname("proposals.acme.com", vec![]);

        let err = checker(resolver)
            .check("proposals.acme.com", None)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "no CNAME for \"proposals.acme.com\"");
    }

    #[tokio::test]
    async fn resolution_failure_is_surfaced() {
        let resolver = MockResolver::new();
        resolver.set_error("proposals.acme.com", DnsError::Timeout);

        let err = checker(resolver)
            .check("proposals.acme.com", None)
            .await
            .unwrap_err();
        assert_eq!(err, CheckError::Resolution(DnsError::Timeout));
        assert_eq!(err.to_string(), "timeout");
    }

    #[tokio::test]
    async fn every_record_must_pass() {
        let resolver = MockResolver::new();
        resolver.add_cname(
            "proposals.acme.com",
            vec!["app.nusii.com.".to_string(), "app.other.com.".to_string()],
        );

        let err = checker(resolver)
            .check("proposals.acme.com", Some("app"))
            .await
            .unwrap_err();
        assert!(matches!(err, CheckError::ParentMismatch { .. }));
    }

    #[tokio::test]
    async fn first_mismatch_wins() {
        let resolver = MockResolver::new();
        resolver.add_cname(
            "proposals.acme.com",
            vec!["www.nusii.com.".to_string(), "app.other.com.".to_string()],
        );

        let err = checker(resolver)
            .check("proposals.acme.com", Some("app"))
            .await
            .unwrap_err();
        assert!(matches!(err, CheckError::LabelMismatch { .. }));
    }

    #[tokio::test]
    async fn injected_parent_domain() {
        let resolver = MockResolver::new();
        resolver.add_cname("docs.acme.com", vec!["site.pages.dev.".to_string()]);

        let checker = CnameChecker::new(resolver, "pages.dev");
        let result = checker.check("docs.acme.com", Some("site")).await;
        assert!(result.is_ok());
    }
}
