//! Scripted navigation steps (`cro:ID`, `crumb:ROOT`, `open:0`, ...)

use std::fmt;
use std::str::FromStr;

use crate::domain::{DomainError, HierarchySelectionController, Level, StepTag};

/// One command from the rendering side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavStep {
    Select {
        level: Level,
        id: String,
        offset: Option<u32>,
    },
    Breadcrumb(StepTag),
    OpenCandidate(usize),
    CloseDetail,
}

impl NavStep {
    /// Apply the step; returns whether it took effect.
    pub fn apply(&self, controller: &mut HierarchySelectionController) -> bool {
        match self {
            NavStep::Select { level, id, offset } => match offset {
                Some(offset) => controller.select_at(*level, id, *offset),
                None => controller.select(*level, id),
            }
            .is_selected(),
            NavStep::Breadcrumb(tag) => controller.navigate_to_breadcrumb(*tag),
            NavStep::OpenCandidate(index) => controller.select_candidate(*index).is_some(),
            NavStep::CloseDetail => {
                controller.close_detail();
                true
            }
        }
    }
}

fn invalid(step: &str, message: impl Into<String>) -> DomainError {
    DomainError::InvalidStep {
        step: step.to_string(),
        message: message.into(),
    }
}

impl FromStr for NavStep {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("close") {
            return Ok(NavStep::CloseDetail);
        }
        let (verb, arg) = s
            .split_once(':')
            .ok_or_else(|| invalid(s, "expected <verb>:<argument>"))?;
        if arg.is_empty() {
            return Err(invalid(s, "missing argument"));
        }

        match verb.to_ascii_lowercase().as_str() {
            "crumb" => Ok(NavStep::Breadcrumb(arg.parse()?)),
            "open" => arg
                .parse()
                .map(NavStep::OpenCandidate)
                .map_err(|_| invalid(s, "candidate index must be a number")),
            _ => {
                let level: Level = verb.parse().map_err(|_| invalid(s, "unknown verb"))?;
                // a trailing `@<digits>` is an offset; any other `@` belongs to the id
                let (id, offset) = match arg.rsplit_once('@') {
                    Some((id, offset)) if !id.is_empty() => match offset.parse::<u32>() {
                        Ok(offset) => (id, Some(offset)),
                        Err(_) => (arg, None),
                    },
                    _ => (arg, None),
                };
                Ok(NavStep::Select {
                    level,
                    id: id.to_string(),
                    offset,
                })
            }
        }
    }
}

impl fmt::Display for NavStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavStep::Select {
                level,
                id,
                offset: Some(offset),
            } => write!(f, "{}:{}@{}", level.as_str().to_lowercase(), id, offset),
            NavStep::Select { level, id, .. } => {
                write!(f, "{}:{}", level.as_str().to_lowercase(), id)
            }
            NavStep::Breadcrumb(tag) => write!(f, "crumb:{}", tag),
            NavStep::OpenCandidate(index) => write!(f, "open:{}", index),
            NavStep::CloseDetail => f.write_str("close"),
        }
    }
}
