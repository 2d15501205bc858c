//! Subcommand implementations and exit-code mapping.

use anyhow::{Result, bail};

use albumdl_core::ChildProfile;

pub mod config;
pub mod download;
pub mod fetch;
pub mod list;

/// Process exit outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessExit {
    /// Every transfer succeeded (or there was nothing to do).
    Success,
    /// Some transfers succeeded, some failed.
    Partial,
    /// Every transfer failed.
    Failure,
}

impl ProcessExit {
    /// Maps the outcome to the process exit code. Any failure is nonzero;
    /// the caller has already reported how many items succeeded.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Partial | Self::Failure => 1,
        }
    }
}

/// Determines the process exit outcome from succeeded and failed counts.
pub(crate) fn determine_exit_outcome(succeeded: usize, failed: usize) -> ProcessExit {
    if failed == 0 {
        ProcessExit::Success
    } else if succeeded > 0 {
        ProcessExit::Partial
    } else {
        ProcessExit::Failure
    }
}

/// Selects target children by optional index; `None` selects all.
pub(crate) fn select_targets(
    children: &[ChildProfile],
    index: Option<usize>,
) -> Result<Vec<(usize, &ChildProfile)>> {
    if children.is_empty() {
        bail!("no stored child profiles; run a login capture first");
    }
    match index {
        None => Ok(children.iter().enumerate().collect()),
        Some(i) if i < children.len() => Ok(vec![(i, &children[i])]),
        Some(i) => bail!(
            "invalid child index {i}; expected a value between 0 and {}",
            children.len() - 1
        ),
    }
}
