//! Target repository resolution

use crate::error::{GitHubError, Result};
use std::fmt;
use watch_core::GitHubSettings;

/// A resolved owner/repository pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    /// Resolve the target repository from configuration
    ///
    /// An explicit owner together with a plain repository name wins. When the
    /// owner is absent, the repository string must be a combined
    /// "owner/repo". An explicit owner alongside a combined string is
    /// rejected as inconsistent rather than silently preferring either.
    pub fn from_settings(settings: &GitHubSettings) -> Result<Self> {
        let repo = settings
            .repo
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| GitHubError::Config("GITHUB_REPO is not configured".to_string()))?;

        match settings.owner.as_deref().filter(|s| !s.is_empty()) {
            Some(owner) => {
                if repo.contains('/') {
                    return Err(GitHubError::Config(format!(
                        "owner '{owner}' is set but repository '{repo}' also carries an owner; \
                         set either GITHUB_OWNER with a plain repository name, or a combined \
                         GITHUB_REPO alone"
                    )));
                }
                Ok(Self {
                    owner: owner.to_string(),
                    name: repo.to_string(),
                })
            }
            None => Self::parse_combined(repo),
        }
    }

    /// Parse a combined "owner/repo" string
    ///
    /// Exactly one slash separating two non-empty components; anything else
    /// is a configuration error.
    pub fn parse_combined(combined: &str) -> Result<Self> {
        let parts: Vec<&str> = combined.split('/').collect();
        match parts.as_slice() {
            [owner, name] if !owner.is_empty() && !name.is_empty() => Ok(Self {
                owner: (*owner).to_string(),
                name: (*name).to_string(),
            }),
            _ => Err(GitHubError::Config(format!(
                "repository must be 'owner/repo', got '{combined}'"
            ))),
        }
    }

    /// The "owner/repo" form
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
