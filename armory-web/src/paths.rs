//! Helpers for constructing URLs to static assets that respect the deployment base path.
use armory_core::ArmorCategory;

/// Prefix `relative` with the compile-time `PUBLIC_URL`, or anchor it at the
/// root when none is configured.
#[must_use]
pub fn asset_path(relative: &str) -> String {
    asset_path_with_base(relative, option_env!("PUBLIC_URL").unwrap_or(""))
}

/// Location of one category's catalog document.
#[must_use]
pub fn catalog_url(category: ArmorCategory) -> String {
    asset_path(&format!("data/{}.json", category.as_str()))
}

fn asset_path_with_base(relative: &str, base: &str) -> String {
    let base = base.trim_end_matches('/');
    let rel = relative.trim_start_matches('/');

    if base.is_empty() {
        format!("/{rel}")
    } else {
        format!("{base}/{rel}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_urls_are_root_anchored_without_base() {
        assert_eq!(catalog_url(ArmorCategory::Relic), "/data/Relic.json");
        assert_eq!(asset_path("/data/Artifact.json"), "/data/Artifact.json");
    }

    #[test]
    fn builds_paths_with_public_base() {
        assert_eq!(
            asset_path_with_base("data/Empyrean.json", "/armory"),
            "/armory/data/Empyrean.json"
        );
        assert_eq!(
            asset_path_with_base("/data/Empyrean.json", "/armory/"),
            "/armory/data/Empyrean.json"
        );
    }
}
