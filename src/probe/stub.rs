//! Placeholder checkers for probe kinds without a real implementation yet.
//!
//! They honor the [`Checker`](crate::Checker) contract instead of panicking:
//! every probe classifies as Unreachable with an explanatory error. They are
//! not registered by default; collaborators supplying real TCP/DNS probing
//! replace them under the same kind tags.

use std::time::Duration;

use async_trait::async_trait;

use crate::endpoint::{Endpoint, DNS_KIND, TCP_KIND};
use crate::probe::Checker;
use crate::report::Report;

/// Placeholder for TCP connect probing.
pub struct TcpChecker;

#[async_trait]
impl Checker for TcpChecker {
    fn kind(&self) -> &str {
        TCP_KIND
    }

    async fn check(&self, endpoint: &Endpoint) -> Report {
        Report::unreachable(&endpoint.url, Duration::ZERO, "TCP probing not implemented")
    }
}

/// Placeholder for DNS resolution probing.
pub struct DnsChecker;

#[async_trait]
impl Checker for DnsChecker {
    fn kind(&self) -> &str {
        DNS_KIND
    }

    async fn check(&self, endpoint: &Endpoint) -> Report {
        Report::unreachable(&endpoint.url, Duration::ZERO, "DNS probing not implemented")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Status;

    #[tokio::test]
    async fn test_stubs_honor_the_checker_contract() {
        let ep = Endpoint::new("db", "example.com:5432").with_kind(TCP_KIND);
        let report = TcpChecker.check(&ep).await;
        assert_eq!(report.status, Status::Unreachable);
        assert!(!report.error.is_empty());

        let report = DnsChecker.check(&ep).await;
        assert_eq!(report.status, Status::Unreachable);
        assert_eq!(report.status_code, 0);
    }
}
