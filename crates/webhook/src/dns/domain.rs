//! Challenge FQDN to zone / record-name resolution

use crate::error::{SolverError, SolverResult};

/// A challenge FQDN split into the provider's zone and record-name parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainParts {
    /// Zone the record is managed under (e.g. "example.com")
    pub zone: String,
    /// Record name relative to the zone, "@" at the apex
    pub record_name: String,
}

/// Split a challenge FQDN into zone and record name.
///
/// One trailing dot is stripped, then the zone is taken as the last two
/// labels and the record name as everything before them ("@" when nothing
/// remains). Fewer than two labels is an error. No case normalization or
/// punycode handling is performed, and multi-label public suffixes
/// ("example.co.uk") are not recognized; the last two labels win
/// regardless.
pub fn split_fqdn(fqdn: &str) -> SolverResult<DomainParts> {
    let trimmed = fqdn.strip_suffix('.').unwrap_or(fqdn);
    if trimmed.is_empty() {
        return Err(SolverError::MalformedFqdn {
            fqdn: fqdn.to_string(),
        });
    }

    let labels: Vec<&str> = trimmed.split('.').collect();
    if labels.len() < 2 {
        return Err(SolverError::MalformedFqdn {
            fqdn: fqdn.to_string(),
        });
    }

    let zone = labels[labels.len() - 2..].join(".");
    let record_name = if labels.len() > 2 {
        labels[..labels.len() - 2].join(".")
    } else {
        "@".to_string()
    };

    Ok(DomainParts { zone, record_name })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_challenge_fqdn() {
        let parts = split_fqdn("_acme-challenge.example.com.").unwrap();
        assert_eq!(parts.zone, "example.com");
        assert_eq!(parts.record_name, "_acme-challenge");
    }

    #[test]
    fn test_split_without_trailing_dot() {
        let parts = split_fqdn("_acme-challenge.example.com").unwrap();
        assert_eq!(parts.zone, "example.com");
        assert_eq!(parts.record_name, "_acme-challenge");
    }

    #[test]
    fn test_split_apex() {
        let parts = split_fqdn("example.com").unwrap();
        assert_eq!(parts.zone, "example.com");
        assert_eq!(parts.record_name, "@");
    }

    #[test]
    fn test_split_nested_subdomain() {
        let parts = split_fqdn("a.b.c.example.com").unwrap();
        assert_eq!(parts.zone, "example.com");
        assert_eq!(parts.record_name, "a.b.c");
    }

    #[test]
    fn test_split_challenge_under_subdomain() {
        let parts = split_fqdn("_acme-challenge.www.example.com").unwrap();
        assert_eq!(parts.zone, "example.com");
        assert_eq!(parts.record_name, "_acme-challenge.www");
    }

    // The two-label heuristic treats "co.uk" as the zone. Pinned so the
    // limitation stays visible rather than silently changing.
    #[test]
    fn test_split_multi_label_suffix_limitation() {
        let parts = split_fqdn("_acme-challenge.example.co.uk").unwrap();
        assert_eq!(parts.zone, "co.uk");
        assert_eq!(parts.record_name, "_acme-challenge.example");
    }

    #[test]
    fn test_split_single_label_fails() {
        let result = split_fqdn("com");
        assert!(matches!(
            result,
            Err(SolverError::MalformedFqdn { .. })
        ));
    }

    #[test]
    fn test_split_empty_fails() {
        assert!(split_fqdn("").is_err());
        assert!(split_fqdn(".").is_err());
    }
}
