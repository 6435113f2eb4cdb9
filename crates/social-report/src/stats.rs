//! Network-wide statistics: totals, engagement-rate distribution, and a least-squares fit of
//! engagement rate against follower count.

use serde::{Deserialize, Serialize};
use social_graph::scoring::engagement_rate;
use social_graph::{GraphError, GraphStore};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallStatistics {
    pub total_comments: u64,
    pub total_likes: u64,
    /// Sum of follower counts, i.e. the number of follow edges.
    pub total_following: u64,
    pub total_members: u64,
    pub mean_engagement_rate: f64,
    /// Population standard deviation.
    pub std_dev_engagement_rate: f64,
    /// Slope of engagement rate over follower count; `None` with fewer than two members.
    pub regression_coefficient: Option<f64>,
    pub r_squared: Option<f64>,
}

impl OverallStatistics {
    /// Label/value pairs in display order.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        // Debug keeps the trailing `.0` on whole numbers.
        let decimal = |v: f64| format!("{v:?}");
        let optional = |v: Option<f64>| v.map_or_else(|| "None".to_string(), decimal);
        vec![
            ("Total comments", self.total_comments.to_string()),
            ("Total likes", self.total_likes.to_string()),
            ("Total following", self.total_following.to_string()),
            ("Total members", self.total_members.to_string()),
            ("Mean engagement rate", decimal(self.mean_engagement_rate)),
            (
                "Standard deviation of engagement rates",
                decimal(self.std_dev_engagement_rate),
            ),
            (
                "Engagement rate vs Followers regression coefficient",
                optional(self.regression_coefficient),
            ),
            ("R-squared value", optional(self.r_squared)),
        ]
    }
}

pub fn overall_statistics<G: GraphStore + ?Sized>(
    graph: &G,
) -> Result<OverallStatistics, GraphError> {
    let ids = graph.member_ids();
    let mut total_likes: u64 = 0;
    let mut total_comments: u64 = 0;
    let mut follower_counts = Vec::with_capacity(ids.len());
    let mut rates = Vec::with_capacity(ids.len());

    for &id in &ids {
        for (_, interaction) in graph.interactions_from(id)? {
            total_likes = total_likes
                .checked_add(interaction.likes)
                .ok_or(GraphError::CounterOverflow(id))?;
            total_comments = total_comments
                .checked_add(interaction.comments)
                .ok_or(GraphError::CounterOverflow(id))?;
        }
        follower_counts.push(graph.followers(id)?.len() as f64);
        rates.push(engagement_rate(graph, id)?);
    }

    let (mean, std_dev) = mean_and_std(&rates);
    let fit = if ids.len() > 1 {
        Some(linear_fit(&follower_counts, &rates))
    } else {
        None
    };

    Ok(OverallStatistics {
        total_comments,
        total_likes,
        total_following: follower_counts.iter().sum::<f64>() as u64,
        total_members: ids.len() as u64,
        mean_engagement_rate: round2(mean),
        std_dev_engagement_rate: round2(std_dev),
        regression_coefficient: fit.map(|(coef, _)| round2(coef)),
        r_squared: fit.map(|(_, r2)| round2(r2)),
    })
}

fn mean_and_std(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

/// Ordinary least squares `y = coef * x + intercept`, returning `(coef, r_squared)`.
///
/// Constant `x` yields a zero slope. R² is 1.0 for a perfect fit of constant `y` and 0.0 when
/// `y` varies but the model explains none of it.
pub(crate) fn linear_fit(x: &[f64], y: &[f64]) -> (f64, f64) {
    let n = x.len() as f64;
    let x_mean = x.iter().sum::<f64>() / n;
    let y_mean = y.iter().sum::<f64>() / n;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    for (xi, yi) in x.iter().zip(y) {
        sxy += (xi - x_mean) * (yi - y_mean);
        sxx += (xi - x_mean).powi(2);
    }
    let coef = if sxx == 0.0 { 0.0 } else { sxy / sxx };
    let intercept = y_mean - coef * x_mean;

    let ss_res: f64 = x
        .iter()
        .zip(y)
        .map(|(xi, yi)| (yi - (coef * xi + intercept)).powi(2))
        .sum();
    let ss_tot: f64 = y.iter().map(|yi| (yi - y_mean).powi(2)).sum();

    let r_squared = if ss_tot == 0.0 {
        if ss_res == 0.0 {
            1.0
        } else {
            0.0
        }
    } else {
        1.0 - ss_res / ss_tot
    };
    (coef, r_squared)
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
