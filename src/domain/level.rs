//! Hierarchy levels, breadcrumb step tags and navigation modes

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Selectable level below the study root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Cro,
    Hcf,
    Pcp,
    Patient,
}

impl Level {
    pub const ALL: [Level; 4] = [Level::Cro, Level::Hcf, Level::Pcp, Level::Patient];

    /// Number of ids a selection path holds once this level is selected (1..=4).
    pub fn depth(self) -> usize {
        match self {
            Level::Cro => 1,
            Level::Hcf => 2,
            Level::Pcp => 3,
            Level::Patient => 4,
        }
    }

    /// Level whose selection path length is `depth - 1`.
    pub fn from_depth(depth: usize) -> Option<Level> {
        Level::ALL.get(depth.checked_sub(1)?).copied()
    }

    pub fn next(self) -> Option<Level> {
        Level::from_depth(self.depth() + 1)
    }

    pub fn tag(self) -> StepTag {
        match self {
            Level::Cro => StepTag::Cro,
            Level::Hcf => StepTag::Hcf,
            Level::Pcp => StepTag::Pcp,
            Level::Patient => StepTag::Patient,
        }
    }

    pub fn as_str(self) -> &'static str {
        self.tag().as_str()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<StepTag>()? {
            StepTag::Root => Err(DomainError::InvalidLevel(s.to_string())),
            tag => tag
                .level()
                .ok_or_else(|| DomainError::InvalidLevel(s.to_string())),
        }
    }
}

/// Breadcrumb tag: the root study or one of the levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StepTag {
    Root,
    Cro,
    Hcf,
    Pcp,
    Patient,
}

impl StepTag {
    /// Path length kept when navigating back to this tag.
    pub fn depth(self) -> usize {
        match self.level() {
            Some(level) => level.depth(),
            None => 0,
        }
    }

    pub fn level(self) -> Option<Level> {
        match self {
            StepTag::Root => None,
            StepTag::Cro => Some(Level::Cro),
            StepTag::Hcf => Some(Level::Hcf),
            StepTag::Pcp => Some(Level::Pcp),
            StepTag::Patient => Some(Level::Patient),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StepTag::Root => "ROOT",
            StepTag::Cro => "CRO",
            StepTag::Hcf => "HCF",
            StepTag::Pcp => "PCP",
            StepTag::Patient => "PATIENT",
        }
    }
}

impl fmt::Display for StepTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StepTag {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ROOT" => Ok(StepTag::Root),
            "CRO" => Ok(StepTag::Cro),
            "HCF" => Ok(StepTag::Hcf),
            "PCP" => Ok(StepTag::Pcp),
            "PATIENT" => Ok(StepTag::Patient),
            _ => Err(DomainError::InvalidStepTag(s.to_string())),
        }
    }
}

/// Guided: one level at a time with breadcrumbs.
/// Free: all levels shown side by side as columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationMode {
    #[default]
    Guided,
    Free,
}

impl fmt::Display for NavigationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationMode::Guided => f.write_str("guided"),
            NavigationMode::Free => f.write_str("free"),
        }
    }
}

impl FromStr for NavigationMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "guided" => Ok(NavigationMode::Guided),
            "free" => Ok(NavigationMode::Free),
            _ => Err(DomainError::InvalidMode(s.to_string())),
        }
    }
}

/// Whether a guided `select` that misses its lookup still advances the step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepPolicy {
    /// Stay on the current step until a lookup succeeds.
    #[default]
    Hold,
    /// Advance unconditionally, leaving the missed level empty.
    Advance,
}

impl fmt::Display for StepPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepPolicy::Hold => f.write_str("hold"),
            StepPolicy::Advance => f.write_str("advance"),
        }
    }
}

impl FromStr for StepPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hold" => Ok(StepPolicy::Hold),
            "advance" => Ok(StepPolicy::Advance),
            _ => Err(DomainError::InvalidStepPolicy(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Level::Cro, Some(Level::Hcf))]
    #[case(Level::Hcf, Some(Level::Pcp))]
    #[case(Level::Pcp, Some(Level::Patient))]
    #[case(Level::Patient, None)]
    fn test_next_level(#[case] level: Level, #[case] expected: Option<Level>) {
        assert_eq!(level.next(), expected);
    }

    #[rstest]
    #[case("root", StepTag::Root)]
    #[case("CRO", StepTag::Cro)]
    #[case(" hcf ", StepTag::Hcf)]
    #[case("Patient", StepTag::Patient)]
    fn test_parse_step_tag(#[case] input: &str, #[case] expected: StepTag) {
        assert_eq!(input.parse::<StepTag>().unwrap(), expected);
    }

    #[test]
    fn test_root_is_not_a_level() {
        assert!(matches!(
            "ROOT".parse::<Level>(),
            Err(DomainError::InvalidLevel(_))
        ));
        assert!("site".parse::<StepTag>().is_err());
    }
}
