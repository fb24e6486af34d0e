//! Grouping and aggregation for the overview bar chart.
//!
//! Records are partitioned by `(category, group label)`, each partition gets a count and a mean
//! amount, and every category is expanded into a series that follows `group_order` exactly.
//! Pairs without data are zero-filled so all series line up with the shared bar layout.

use std::collections::{BTreeMap, BTreeSet};

use crate::core::record::{Record, Season};

use super::selection::{AggregateQuery, Dimension, MetricType, SortMode};

/// One `(category, group)` partition.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateCell {
    pub category: String,
    pub group: String,
    pub average: f64,
    pub count: usize,
    /// `average` or `count`, per the query's metric.
    pub value: f64,
}

/// One entry of a category series. Missing partitions appear with zero count and value.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesValue {
    pub group: String,
    pub value: f64,
    pub average: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategorySeries {
    pub category: String,
    pub values: Vec<SeriesValue>,
}

impl CategorySeries {
    /// Mean of the selected values across the series; used for descending sorts.
    pub fn mean_value(&self) -> f64 {
        if self.values.is_empty() {
            0.0
        } else {
            self.values.iter().map(|v| v.value).sum::<f64>() / self.values.len() as f64
        }
    }

    pub fn max_value(&self) -> f64 {
        self.values.iter().map(|v| v.value).fold(0.0, f64::max)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Aggregation {
    pub metric: Option<MetricType>,
    /// Categories in display order.
    pub series: Vec<CategorySeries>,
    /// Ordered group labels: the color and bar-position domain.
    pub group_order: Vec<String>,
    /// Every non-empty partition, keyed-sorted by `(category, group)`.
    pub cells: Vec<AggregateCell>,
}

impl Aggregation {
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn categories(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.category.as_str()).collect()
    }

    /// Largest selected value across all series (0 when empty).
    pub fn max_value(&self) -> f64 {
        self.series
            .iter()
            .map(CategorySeries::max_value)
            .fold(0.0, f64::max)
    }

    /// Records represented by the series (labels dropped by the season ordering are excluded).
    pub fn total_count(&self) -> usize {
        self.series
            .iter()
            .flat_map(|s| s.values.iter())
            .map(|v| v.count)
            .sum()
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Accumulator {
    sum: f64,
    count: usize,
}

impl Accumulator {
    fn push(&mut self, amount: f64) {
        self.sum += amount;
        self.count += 1;
    }

    fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }

    fn value(&self, metric: MetricType) -> f64 {
        match metric {
            MetricType::Average => self.mean(),
            MetricType::Count => self.count as f64,
        }
    }
}

/// Aggregates `records` for one bar-chart render. Pure: the same inputs always give the same
/// output, and the records are never modified.
pub fn aggregate(records: &[Record], query: &AggregateQuery) -> Aggregation {
    let mut partitions: BTreeMap<(&str, &str), Accumulator> = BTreeMap::new();
    for record in query.season.apply(records) {
        let key = (record.category.as_str(), query.dimension.group_of(record));
        partitions.entry(key).or_default().push(record.amount);
    }

    if partitions.is_empty() {
        return Aggregation {
            metric: Some(query.metric),
            ..Aggregation::default()
        };
    }

    let group_order = order_groups(query.dimension, partitions.keys().map(|(_, group)| *group));

    let cells = partitions
        .iter()
        .map(|((category, group), acc)| AggregateCell {
            category: category.to_string(),
            group: group.to_string(),
            average: acc.mean(),
            count: acc.count,
            value: acc.value(query.metric),
        })
        .collect();

    let categories: BTreeSet<&str> = partitions.keys().map(|(category, _)| *category).collect();
    let mut series: Vec<CategorySeries> = categories
        .into_iter()
        .map(|category| CategorySeries {
            category: category.to_string(),
            values: group_order
                .iter()
                .map(|group| {
                    let acc = partitions
                        .get(&(category, group.as_str()))
                        .copied()
                        .unwrap_or_default();
                    SeriesValue {
                        group: group.clone(),
                        value: acc.value(query.metric),
                        average: acc.mean(),
                        count: acc.count,
                    }
                })
                .collect(),
        })
        .collect();

    sort_categories(&mut series, query.sort);

    Aggregation {
        metric: Some(query.metric),
        series,
        group_order,
        cells,
    }
}

/// Orders distinct group labels: canonical season order (dropping non-seasons) for the season
/// dimension, ascending otherwise.
pub fn order_groups<'a>(dimension: Dimension, labels: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let distinct: BTreeSet<&str> = labels.into_iter().collect();
    match dimension {
        Dimension::Season => Season::ALL
            .into_iter()
            .map(Season::label)
            .filter(|label| distinct.contains(label))
            .map(str::to_string)
            .collect(),
        _ => distinct.into_iter().map(str::to_string).collect(),
    }
}

fn sort_categories(series: &mut [CategorySeries], sort: SortMode) {
    match sort {
        SortMode::Alphabetical => series.sort_by(|a, b| a.category.cmp(&b.category)),
        SortMode::ValueDescending => series.sort_by(|a, b| {
            b.mean_value()
                .total_cmp(&a.mean_value())
                .then_with(|| a.category.cmp(&b.category))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explore::selection::{SeasonFilter, OTHER_LABEL};

    fn rec(category: &str, amount: f64, season: &str, gender: &str) -> Record {
        Record {
            category: category.into(),
            gender: gender.into(),
            amount,
            age: Some(30),
            age_group: Some(crate::core::record::AgeGroup::from_age(30)),
            season: season.into(),
            shipping: "Standard".into(),
            subscription: "No".into(),
            discount: "No".into(),
            previous_purchases: Some(3),
            frequency: "Monthly".into(),
        }
    }

    fn query(dimension: Dimension, season: SeasonFilter, metric: MetricType, sort: SortMode) -> AggregateQuery {
        AggregateQuery {
            dimension,
            season,
            metric,
            sort,
        }
    }

    fn values(series: &CategorySeries) -> Vec<f64> {
        series.values.iter().map(|v| v.value).collect()
    }

    #[test]
    fn shoes_by_season_average() {
        let records = vec![
            rec("Shoes", 50.0, "Winter", "Male"),
            rec("Shoes", 30.0, "Summer", "Male"),
        ];
        let agg = aggregate(
            &records,
            &query(Dimension::Season, SeasonFilter::All, MetricType::Average, SortMode::Alphabetical),
        );
        assert_eq!(agg.group_order, vec!["Winter", "Summer"]);
        assert_eq!(agg.series.len(), 1);
        assert_eq!(agg.series[0].category, "Shoes");
        assert_eq!(values(&agg.series[0]), vec![50.0, 30.0]);
    }

    #[test]
    fn season_filter_collapses_season_groups() {
        let records = vec![
            rec("Shoes", 50.0, "Winter", "Male"),
            rec("Shoes", 30.0, "Summer", "Male"),
        ];
        let agg = aggregate(
            &records,
            &query(
                Dimension::Season,
                SeasonFilter::Only(Season::Winter),
                MetricType::Average,
                SortMode::Alphabetical,
            ),
        );
        assert_eq!(agg.group_order, vec!["Winter"]);
        assert_eq!(values(&agg.series[0]), vec![50.0]);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        let agg = aggregate(
            &[],
            &query(Dimension::Gender, SeasonFilter::All, MetricType::Count, SortMode::Alphabetical),
        );
        assert!(agg.is_empty());
        assert!(agg.group_order.is_empty());
        assert!(agg.cells.is_empty());
        assert_eq!(agg.max_value(), 0.0);
    }

    #[test]
    fn filter_that_matches_nothing_is_empty_not_an_error() {
        let records = vec![rec("Shoes", 50.0, "Winter", "Male")];
        let agg = aggregate(
            &records,
            &query(
                Dimension::Gender,
                SeasonFilter::Only(Season::Fall),
                MetricType::Average,
                SortMode::ValueDescending,
            ),
        );
        assert!(agg.is_empty());
        assert!(agg.group_order.is_empty());
    }

    #[test]
    fn missing_pairs_are_zero_filled_and_series_are_not_ragged() {
        let records = vec![
            rec("Shoes", 50.0, "Winter", "Male"),
            rec("Hats", 20.0, "Winter", "Female"),
            rec("Hats", 40.0, "Winter", "Female"),
        ];
        let agg = aggregate(
            &records,
            &query(Dimension::Gender, SeasonFilter::All, MetricType::Average, SortMode::Alphabetical),
        );
        assert_eq!(agg.group_order, vec!["Female", "Male"]);
        for series in &agg.series {
            let groups: Vec<&str> = series.values.iter().map(|v| v.group.as_str()).collect();
            assert_eq!(groups, agg.group_order);
        }
        assert_eq!(agg.categories(), vec!["Hats", "Shoes"]);
        assert_eq!(values(&agg.series[0]), vec![30.0, 0.0]);
        assert_eq!(values(&agg.series[1]), vec![0.0, 50.0]);
        assert_eq!(agg.series[0].values[1].count, 0);
    }

    #[test]
    fn non_canonical_seasons_are_dropped_from_group_order() {
        let records = vec![
            rec("Shoes", 10.0, "Fall", "Male"),
            rec("Shoes", 10.0, "Autumn", "Male"),
            rec("Shoes", 10.0, "", "Male"),
            rec("Shoes", 10.0, "Spring", "Male"),
        ];
        let agg = aggregate(
            &records,
            &query(Dimension::Season, SeasonFilter::All, MetricType::Count, SortMode::Alphabetical),
        );
        assert_eq!(agg.group_order, vec!["Spring", "Fall"]);
        assert_eq!(agg.total_count(), 2);
        assert_eq!(agg.cells.len(), 4);
    }

    #[test]
    fn blank_dimension_values_become_other() {
        let records = vec![rec("Shoes", 10.0, "Fall", ""), rec("Shoes", 20.0, "Fall", "Male")];
        let agg = aggregate(
            &records,
            &query(Dimension::Gender, SeasonFilter::All, MetricType::Count, SortMode::Alphabetical),
        );
        assert_eq!(agg.group_order, vec!["Male", OTHER_LABEL]);
    }

    #[test]
    fn descending_sort_uses_series_mean_and_puts_zero_series_last() {
        let records = vec![
            rec("Bags", 10.0, "Winter", "Male"),
            rec("Coats", 90.0, "Winter", "Male"),
            rec("Shoes", 40.0, "Winter", "Female"),
            rec("Shoes", 40.0, "Winter", "Male"),
            // Only a non-canonical season: all-zero series under the season dimension.
            rec("Aprons", 500.0, "Autumn", "Male"),
        ];
        let by_gender = aggregate(
            &records,
            &query(Dimension::Gender, SeasonFilter::All, MetricType::Average, SortMode::ValueDescending),
        );
        assert_eq!(by_gender.categories(), vec!["Aprons", "Coats", "Shoes", "Bags"]);

        let by_season = aggregate(
            &records,
            &query(Dimension::Season, SeasonFilter::All, MetricType::Average, SortMode::ValueDescending),
        );
        assert_eq!(by_season.categories(), vec!["Coats", "Shoes", "Bags", "Aprons"]);
        assert_eq!(values(&by_season.series[3]), vec![0.0]);
    }

    #[test]
    fn count_metric_reports_partition_sizes() {
        let records = vec![
            rec("Shoes", 10.0, "Winter", "Male"),
            rec("Shoes", 30.0, "Winter", "Male"),
            rec("Shoes", 30.0, "Winter", "Female"),
        ];
        let agg = aggregate(
            &records,
            &query(Dimension::Gender, SeasonFilter::All, MetricType::Count, SortMode::Alphabetical),
        );
        assert_eq!(values(&agg.series[0]), vec![1.0, 2.0]);
        assert_eq!(agg.series[0].values[1].average, 20.0);
        assert_eq!(agg.total_count(), records.len());
    }

    #[test]
    fn aggregation_is_idempotent() {
        let records = vec![
            rec("Shoes", 10.0, "Winter", "Male"),
            rec("Hats", 30.0, "Spring", "Female"),
        ];
        let q = query(Dimension::Season, SeasonFilter::All, MetricType::Average, SortMode::ValueDescending);
        let snapshot = records.clone();
        assert_eq!(aggregate(&records, &q), aggregate(&records, &q));
        assert_eq!(records, snapshot);
    }
}
