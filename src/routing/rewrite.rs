/// Compute the internal path addressing `slug`'s landing page.
///
/// Returns `None` when the request already targets the landing route, so
/// applying the rewrite any number of times is a no-op. The original path
/// is kept as a suffix: deep links on custom domains map onto the tenant's
/// page tree (`/` becomes `/landing/<slug>/`, `/pricing` becomes
/// `/landing/<slug>/pricing`).
pub fn rewrite_path(path: &str, landing_root: &str, slug: &str) -> Option<String> {
    if targets_landing_route(path, landing_root) {
        return None;
    }
    Some(format!("{}/{}{}", landing_root, slug, path))
}

fn targets_landing_route(path: &str, landing_root: &str) -> bool {
    path == landing_root
        || path
            .strip_prefix(landing_root)
            .map_or(false, |rest| rest.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT: &str = "/landing";

    #[test]
    fn rewrites_root_path() {
        assert_eq!(
            rewrite_path("/", ROOT, "art0x"),
            Some("/landing/art0x/".to_string())
        );
    }

    #[test]
    fn preserves_deep_link_suffix() {
        assert_eq!(
            rewrite_path("/pricing", ROOT, "art0x"),
            Some("/landing/art0x/pricing".to_string())
        );
    }

    #[test]
    fn landing_paths_pass_through() {
        assert_eq!(rewrite_path("/landing", ROOT, "art0x"), None);
        assert_eq!(rewrite_path("/landing/art0x", ROOT, "art0x"), None);
        assert_eq!(rewrite_path("/landing/other/deep", ROOT, "art0x"), None);
    }

    #[test]
    fn rewriting_is_idempotent() {
        let first = rewrite_path("/", ROOT, "art0x").unwrap();
        assert_eq!(rewrite_path(&first, ROOT, "art0x"), None);
    }

    #[test]
    fn prefix_lookalike_still_rewrites() {
        // "/landingpage" is not under the landing route.
        assert_eq!(
            rewrite_path("/landingpage", ROOT, "art0x"),
            Some("/landing/art0x/landingpage".to_string())
        );
    }
}
