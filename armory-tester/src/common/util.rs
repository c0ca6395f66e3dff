use anyhow::{Context, Result};
use armory_core::ArmorCategory;
use std::fs;
use std::path::{Path, PathBuf};

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Parse a comma-separated seed list.
pub fn parse_seeds(s: &str) -> Result<Vec<u64>> {
    split_csv(s)
        .iter()
        .map(|token| {
            token
                .parse::<u64>()
                .with_context(|| format!("invalid seed '{token}'"))
        })
        .collect()
}

/// Location of a category's catalog document inside `dir`.
pub fn catalog_file(dir: &Path, category: ArmorCategory) -> PathBuf {
    dir.join(format!("{}.json", category.as_str()))
}

pub fn read_catalog_file(dir: &Path, category: ArmorCategory) -> Result<String> {
    let path = catalog_file(dir, category);
    fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_csv_trims_and_filters() {
        let parts = split_csv(" alpha, ,beta,  gamma ");
        assert_eq!(parts, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn parse_seeds_reads_numbers() {
        assert_eq!(parse_seeds("1337, 42").unwrap(), vec![1337, 42]);
        assert!(parse_seeds("1337,abc").is_err());
        assert!(parse_seeds("").unwrap().is_empty());
    }

    #[test]
    fn catalog_file_uses_category_name() {
        let path = catalog_file(Path::new("static/data"), ArmorCategory::Empyrean);
        assert!(path.ends_with("Empyrean.json"));
    }
}
