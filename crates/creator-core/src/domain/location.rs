//! Target location rules.
//!
//! The domain never touches the disk: callers observe the location through
//! the `Filesystem` port, classify it as a [`LocationState`], and hand that
//! to [`ProjectLocation::check`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// What is currently on disk at the target location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationState {
    Absent,
    EmptyDirectory,
    NonEmptyDirectory,
    NotADirectory,
}

/// How to treat a location that already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExistingPolicy {
    /// Any existing path is an error.
    #[default]
    Reject,
    /// An existing *empty* directory is reused.
    AllowEmpty,
}

impl ExistingPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reject => "reject",
            Self::AllowEmpty => "allow-empty",
        }
    }
}

impl fmt::Display for ExistingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExistingPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reject" | "strict" => Ok(Self::Reject),
            "allow-empty" | "allow_empty" | "empty" => Ok(Self::AllowEmpty),
            other => Err(DomainError::InvalidRecipe(format!(
                "unknown existing-location policy '{other}'"
            ))),
        }
    }
}

/// Whether the pipeline has to create the root directory itself.
///
/// Drives rollback: a directory the tool created is removed outright, a
/// reused one is only emptied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootOwnership {
    Created,
    Reused,
}

/// A validated project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLocation {
    path: PathBuf,
    ownership: RootOwnership,
}

impl ProjectLocation {
    /// Apply `policy` to the observed `state` of `path`.
    pub fn check(
        path: impl Into<PathBuf>,
        state: LocationState,
        policy: ExistingPolicy,
    ) -> Result<Self, DomainError> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(DomainError::EmptyLocation);
        }

        let ownership = match (state, policy) {
            (LocationState::Absent, _) => RootOwnership::Created,
            (LocationState::NotADirectory, _) => {
                return Err(DomainError::LocationNotDirectory { path });
            }
            (LocationState::EmptyDirectory, ExistingPolicy::AllowEmpty) => RootOwnership::Reused,
            (LocationState::NonEmptyDirectory, ExistingPolicy::AllowEmpty) => {
                return Err(DomainError::LocationNotEmpty { path });
            }
            (_, ExistingPolicy::Reject) => return Err(DomainError::LocationExists { path }),
        };

        Ok(Self { path, ownership })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn ownership(&self) -> RootOwnership {
        self.ownership
    }

    /// `true` when the pipeline must create the directory.
    pub fn needs_creation(&self) -> bool {
        self.ownership == RootOwnership::Created
    }
}

impl fmt::Display for ProjectLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_location_is_created() {
        let loc = ProjectLocation::check("/tmp/proj1", LocationState::Absent, ExistingPolicy::Reject)
            .unwrap();
        assert!(loc.needs_creation());
        assert_eq!(loc.path(), Path::new("/tmp/proj1"));
    }

    #[test]
    fn strict_policy_rejects_any_existing_directory() {
        for state in [LocationState::EmptyDirectory, LocationState::NonEmptyDirectory] {
            assert!(matches!(
                ProjectLocation::check("/tmp/proj1", state, ExistingPolicy::Reject),
                Err(DomainError::LocationExists { .. })
            ));
        }
    }

    #[test]
    fn permissive_policy_reuses_empty_directory() {
        let loc = ProjectLocation::check(
            "/tmp/proj1",
            LocationState::EmptyDirectory,
            ExistingPolicy::AllowEmpty,
        )
        .unwrap();
        assert_eq!(loc.ownership(), RootOwnership::Reused);
    }

    #[test]
    fn permissive_policy_still_rejects_non_empty_directory() {
        assert!(matches!(
            ProjectLocation::check(
                "/tmp/proj1",
                LocationState::NonEmptyDirectory,
                ExistingPolicy::AllowEmpty
            ),
            Err(DomainError::LocationNotEmpty { .. })
        ));
    }

    #[test]
    fn file_is_never_a_valid_location() {
        for policy in [ExistingPolicy::Reject, ExistingPolicy::AllowEmpty] {
            assert!(matches!(
                ProjectLocation::check("/tmp/proj1", LocationState::NotADirectory, policy),
                Err(DomainError::LocationNotDirectory { .. })
            ));
        }
    }

    #[test]
    fn empty_path_is_rejected() {
        assert_eq!(
            ProjectLocation::check("", LocationState::Absent, ExistingPolicy::Reject),
            Err(DomainError::EmptyLocation)
        );
    }

    #[test]
    fn policy_parses_aliases() {
        assert_eq!("strict".parse::<ExistingPolicy>().unwrap(), ExistingPolicy::Reject);
        assert_eq!(
            "allow_empty".parse::<ExistingPolicy>().unwrap(),
            ExistingPolicy::AllowEmpty
        );
        assert!("sometimes".parse::<ExistingPolicy>().is_err());
    }
}
