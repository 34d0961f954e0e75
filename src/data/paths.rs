use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{ProcessError, Result};

// ---------------------------------------------------------------------------
// PathKey – (experiment key, gene pool id)
// ---------------------------------------------------------------------------

/// Identifies one gene pool of one experiment.
///
/// Both parts are checked on construction so they can be joined into a path
/// without escaping the data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathKey {
    experiment_key: String,
    gene_pool_id: String,
}

impl PathKey {
    /// Gene pool ids are usually integers; anything `Display` is accepted.
    pub fn new(experiment_key: &str, gene_pool_id: impl fmt::Display) -> Result<Self> {
        let gene_pool_id = gene_pool_id.to_string();
        validate_identifier(experiment_key)?;
        validate_identifier(&gene_pool_id)?;
        Ok(PathKey {
            experiment_key: experiment_key.to_string(),
            gene_pool_id,
        })
    }

    pub fn experiment_key(&self) -> &str {
        &self.experiment_key
    }

    pub fn gene_pool_id(&self) -> &str {
        &self.gene_pool_id
    }

    /// `<data_root>/experiments/<key>/gene_pools/gene_pool_<id>/fitness.csv`
    pub fn source_path(&self, data_root: &Path) -> PathBuf {
        let mut path = data_root.to_path_buf();
        path.push("experiments");
        path.push(&self.experiment_key);
        path.push("gene_pools");
        path.push(format!("gene_pool_{}", self.gene_pool_id));
        path.push("fitness.csv");
        path
    }

    /// `<output_dir>/<key>_<id>.csv`
    pub fn output_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(format!("{}_{}.csv", self.experiment_key, self.gene_pool_id))
    }
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/gene_pool_{}", self.experiment_key, self.gene_pool_id)
    }
}

/// Whitelist: ASCII alphanumerics, `_`, `-` and `.`, but not `.` or `..`.
fn validate_identifier(id: &str) -> Result<()> {
    let reject = |reason: &str| {
        Err(ProcessError::InvalidIdentifier {
            identifier: id.to_string(),
            reason: reason.to_string(),
        })
    };

    if id.is_empty() {
        return reject("must not be empty");
    }
    if id == "." || id == ".." {
        return reject("must not be a relative directory reference");
    }
    if let Some(c) = id
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')))
    {
        return reject(&format!("character {c:?} is not allowed"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_path_follows_experiment_layout() {
        let key = PathKey::new("compare_chem_configs", 0).unwrap();
        let path = key.source_path(Path::new("../data"));
        assert_eq!(
            path,
            PathBuf::from(
                "../data/experiments/compare_chem_configs/gene_pools/gene_pool_0/fitness.csv"
            )
        );
    }

    #[test]
    fn output_path_is_flattened() {
        let key = PathKey::new("compare_chem_configs", 3).unwrap();
        assert_eq!(
            key.output_path(Path::new("./data")),
            PathBuf::from("./data/compare_chem_configs_3.csv")
        );
    }

    #[test]
    fn string_gene_pool_ids_are_accepted() {
        let key = PathKey::new("exp-1", "pool.a").unwrap();
        assert_eq!(key.gene_pool_id(), "pool.a");
        assert_eq!(key.to_string(), "exp-1/gene_pool_pool.a");
    }

    #[test]
    fn traversal_attempts_are_rejected() {
        for bad in ["..", ".", "../etc", "a/b", "a\\b", "", "exp key", "/abs"] {
            let err = PathKey::new(bad, 0).unwrap_err();
            assert!(
                matches!(err, ProcessError::InvalidIdentifier { .. }),
                "{bad:?} should be rejected"
            );
        }
        assert!(PathKey::new("exp", "..").is_err());
    }

    #[test]
    fn dots_inside_identifiers_are_fine() {
        assert!(PathKey::new("run..2", 1).is_ok());
        assert!(PathKey::new("v1.2", 1).is_ok());
    }
}
