//! The proceed/optional/forced decision policy

use crate::gate::semver::SemanticVersion;
use crate::gate::types::UpdateMetadata;

/// Outcome of an update check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateVerdict {
    /// Installed version satisfies the policy.
    Proceed,
    /// A newer version exists; the user may keep using the app.
    OptionalUpdate { latest: SemanticVersion },
    /// Installed version is below the minimum; the app must block.
    ForcedUpdate { min_required: SemanticVersion },
}

impl GateVerdict {
    /// Whether the verdict must block normal app usage.
    pub fn is_blocking(&self) -> bool {
        matches!(self, GateVerdict::ForcedUpdate { .. })
    }
}

/// Decide what should happen for an installed version under the given policy.
///
/// The forced check runs first: being below the minimum wins over merely
/// being outdated. Pure and total; fetch failures and malformed metadata are
/// the caller's problem, this function only sees validated values.
pub fn decide(installed: &SemanticVersion, metadata: &UpdateMetadata) -> GateVerdict {
    if *installed < metadata.min_required {
        GateVerdict::ForcedUpdate {
            min_required: metadata.min_required.clone(),
        }
    } else if *installed < metadata.latest {
        GateVerdict::OptionalUpdate {
            latest: metadata.latest.clone(),
        }
    } else {
        GateVerdict::Proceed
    }
}
