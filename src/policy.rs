//! Emission gate shared by every logger.

use crate::Severity;

/// Whether a record at `candidate` passes both floors.
///
/// The instance and process-wide thresholds are independent; the stricter
/// one wins and an instance cannot lower the global floor.
pub fn should_emit(candidate: Severity, instance: Severity, global: Severity) -> bool {
    !(candidate < instance || candidate < global)
}
