/// Classification of an inbound request's hostname.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostClass {
    /// The platform's own domain (apex or a reserved label). No rewrite.
    Platform,
    /// `<slug>.<base-domain>` - a tenant addressed by platform subdomain.
    TenantSubdomain(String),
    /// Any other hostname. Only the domain store can tell whether a tenant
    /// owns it, so it is not trusted until resolved.
    CustomCandidate(String),
}

/// Labels that never address a tenant even though they sit directly in
/// front of the base domain.
const RESERVED_LABELS: &[&str] = &["www"];

/// Classify a raw `Host` header value against the platform base domain.
///
/// Total over all inputs: malformed or empty hosts classify as `Platform`,
/// which downstream treats as "no rewrite".
pub fn classify(raw_host: &str, base_domain: &str) -> HostClass {
    let host = normalize_host(raw_host);
    if host.is_empty() {
        return HostClass::Platform;
    }

    let base = base_domain.to_ascii_lowercase();
    if host == base {
        return HostClass::Platform;
    }

    let suffix = format!(".{}", base);
    if let Some(label) = host.strip_suffix(&suffix) {
        if RESERVED_LABELS.contains(&label) {
            return HostClass::Platform;
        }
        if !label.is_empty() && !label.contains('.') {
            return HostClass::TenantSubdomain(label.to_string());
        }
        // Nested labels are never tenant slugs; let the resolver decide.
    }

    HostClass::CustomCandidate(host)
}

/// Lowercase a hostname and strip any `:port` suffix.
pub fn normalize_host(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_port = match trimmed.rsplit_once(':') {
        Some((head, tail)) if !tail.is_empty() && tail.chars().all(|c| c.is_ascii_digit()) => head,
        _ => trimmed,
    };
    without_port.to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "creator0x.com";

    #[test]
    fn apex_and_www_are_platform() {
        assert_eq!(classify("creator0x.com", BASE), HostClass::Platform);
        assert_eq!(classify("www.creator0x.com", BASE), HostClass::Platform);
    }

    #[test]
    fn empty_host_is_platform() {
        assert_eq!(classify("", BASE), HostClass::Platform);
        assert_eq!(classify("   ", BASE), HostClass::Platform);
    }

    #[test]
    fn single_label_subdomain_is_tenant() {
        assert_eq!(
            classify("art0x.creator0x.com", BASE),
            HostClass::TenantSubdomain("art0x".to_string())
        );
    }

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(
            classify("Art0x.Creator0x.COM", BASE),
            HostClass::TenantSubdomain("art0x".to_string())
        );
        assert_eq!(classify("WWW.CREATOR0X.COM", BASE), HostClass::Platform);
    }

    #[test]
    fn port_suffix_is_stripped() {
        assert_eq!(classify("creator0x.com:3000", BASE), HostClass::Platform);
        assert_eq!(
            classify("art0x.creator0x.com:8080", BASE),
            HostClass::TenantSubdomain("art0x".to_string())
        );
    }

    #[test]
    fn foreign_hostname_is_candidate() {
        assert_eq!(
            classify("elcaminodelprogramador.com", BASE),
            HostClass::CustomCandidate("elcaminodelprogramador.com".to_string())
        );
    }

    #[test]
    fn candidate_hostname_is_normalized() {
        assert_eq!(
            classify("Custom-Domain.Example:443", BASE),
            HostClass::CustomCandidate("custom-domain.example".to_string())
        );
    }

    #[test]
    fn nested_labels_are_not_tenant_subdomains() {
        assert_eq!(
            classify("a.b.creator0x.com", BASE),
            HostClass::CustomCandidate("a.b.creator0x.com".to_string())
        );
    }

    #[test]
    fn suffix_lookalike_is_candidate() {
        // Ends with the base domain text but not on a label boundary.
        assert_eq!(
            classify("evilcreator0x.com", BASE),
            HostClass::CustomCandidate("evilcreator0x.com".to_string())
        );
    }
}
