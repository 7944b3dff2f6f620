use crate::config::ReadinessCriteria;
use crate::types::{DatasetSummary, QualityFlags, ReadinessVerdict};

/// Decide whether a dataset is usable for training as-is.
///
/// Requires enough rows, a largest missing share strictly below the
/// criteria's limit, and neither `too_many_missing` nor
/// `has_constant_columns`. Each failed check adds a reason.
pub fn assess_readiness(
    summary: &DatasetSummary,
    flags: &QualityFlags,
    criteria: &ReadinessCriteria,
) -> ReadinessVerdict {
    let mut reasons = Vec::new();

    if summary.n_rows < criteria.min_rows {
        reasons.push(format!(
            "only {} rows (need at least {})",
            summary.n_rows, criteria.min_rows
        ));
    }
    if flags.max_missing_share() >= criteria.max_missing_share {
        reasons.push(format!(
            "max missing share {:.3} is not below {:.3}",
            flags.max_missing_share(),
            criteria.max_missing_share
        ));
    }
    if flags.summary.too_many_missing {
        reasons.push("too_many_missing".to_string());
    }
    if flags.summary.has_constant_columns {
        reasons.push("has_constant_columns".to_string());
    }

    ReadinessVerdict {
        ok_for_model: reasons.is_empty(),
        reasons,
    }
}
