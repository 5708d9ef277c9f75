//! Series transforms: raw analytic payloads -> display-ready sequences
//!
//! Output order is render order. Nothing here mutates its input.

use crate::format::round2;
use crate::labels;
use crate::models::{DisplayFeature, DisplayTrend, RawFeatureRecord, RawTrendRecord, TopN};
use std::cmp::Ordering;

/// Rank features by importance and keep the top `top_n`
///
/// Sort is stable and descending; ties keep service order. NaN importances
/// rank below every real value.
pub fn rank_features(raw: &[RawFeatureRecord], top_n: TopN) -> Vec<DisplayFeature> {
    let mut ranked: Vec<&RawFeatureRecord> = raw.iter().collect();
    ranked.sort_by(|a, b| importance_desc(a.importance, b.importance));

    ranked
        .into_iter()
        .take(top_n.value())
        .map(display_feature)
        .collect()
}

/// Enrich one raw record through the label resolver
pub fn display_feature(record: &RawFeatureRecord) -> DisplayFeature {
    let label = labels::label(&record.feature_key);

    DisplayFeature {
        label: label.to_string(),
        importance: record.importance,
        description: labels::description(label).to_string(),
        color: labels::color(label).to_string(),
    }
}

/// Map trend records 1:1, preserving the service's city order
pub fn display_trends(raw: &[RawTrendRecord]) -> Vec<DisplayTrend> {
    raw.iter()
        .map(|r| DisplayTrend {
            city: r.city.clone(),
            average_rent: round2(r.average_rent),
            median_rent: r.median_rent,
            min_rent: r.min_rent,
            max_rent: r.max_rent,
            listing_count: r.listing_count,
        })
        .collect()
}

fn importance_desc(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}
