//! Pairwise Pearson correlation among numeric columns.

use crate::table::Table;
use crate::types::CorrelationMatrix;
use std::borrow::Cow;
use tracing::debug;

/// Correlation analysis over the numeric columns of a table.
pub struct CorrelationAnalyzer;

impl CorrelationAnalyzer {
    /// Pearson correlation for every pair of numeric columns.
    ///
    /// Rows are deleted pairwise: a coefficient only uses rows where both
    /// columns are present. A pair with fewer than two joint rows, or with a
    /// constant side, gets `NaN`. Fewer than two numeric columns give an
    /// empty matrix.
    pub fn correlation_matrix(table: &Table) -> CorrelationMatrix {
        let numeric: Vec<(&str, Cow<'_, [Option<f64>]>)> = table
            .columns()
            .iter()
            .filter_map(|col| col.numeric_values().map(|v| (col.name(), v)))
            .collect();

        if numeric.len() < 2 {
            debug!(
                "Skipping correlation: {} numeric column(s)",
                numeric.len()
            );
            return CorrelationMatrix::default();
        }

        let n = numeric.len();
        let mut values = vec![vec![f64::NAN; n]; n];
        for i in 0..n {
            for j in i..n {
                let r = if i == j {
                    self_correlation(&numeric[i].1)
                } else {
                    pearson(&numeric[i].1, &numeric[j].1)
                };
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        CorrelationMatrix {
            columns: numeric.iter().map(|(name, _)| name.to_string()).collect(),
            values,
        }
    }
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

/// 1.0 when the column varies over at least two present cells.
fn self_correlation(x: &[Option<f64>]) -> f64 {
    let present: Vec<f64> = x.iter().flatten().copied().collect();
    if present.len() < 2 || is_constant(&present) {
        f64::NAN
    } else {
        1.0
    }
}

pub(crate) fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> f64 {
    let (xs, ys): (Vec<f64>, Vec<f64>) = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .unzip();

    if xs.len() < 2 || is_constant(&xs) || is_constant(&ys) {
        return f64::NAN;
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in xs.iter().zip(&ys) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    (sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0)
}
