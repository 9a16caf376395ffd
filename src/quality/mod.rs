/*!
 * Quality assessment for translated files.
 *
 * - `issues`: issue kinds and severities
 * - `checks`: individual source/target checks
 * - `checker`: runs configured checks over units and files
 * - `score`: the results aggregate and the overall score calculation
 */

// Re-export main types for easier usage
pub use self::checker::{CheckConfig, QualityChecker};
pub use self::checks::GlossaryTerm;
pub use self::issues::{Issue, IssueKind, Severity};
pub use self::score::{QualityResults, calculate_overall_score, issue_penalty};

// Submodules
pub mod checker;
pub mod checks;
pub mod issues;
pub mod score;
