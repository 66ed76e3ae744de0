//! Reporting aggregations over the reservation history.
//!
//! The aggregation functions are pure over the full record set; the
//! service fetches and applies. Statistics windows use the caller's
//! wall-clock "now" and its calendar (the HTTP layer passes local time;
//! the week starts on Sunday).

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Datelike, Duration, NaiveDateTime, TimeZone};

use crate::domain::history::HistoryRecord;
use crate::domain::slot::VehicleCategory;
use crate::domain::{DomainResult, RepositoryProvider};

/// Count and revenue of one calendar month (1–12, pooled across years)
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyBucket {
    pub month: u32,
    pub count: u64,
    pub total_price: f64,
}

/// Count and revenue of one statistics window
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WindowStats {
    pub count: u64,
    pub revenue: f64,
}

/// Day / week / month / year-to-date windows plus the all-time total
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatisticsReport {
    pub daily: WindowStats,
    pub weekly: WindowStats,
    pub monthly: WindowStats,
    pub yearly: WindowStats,
    pub total: WindowStats,
}

/// Revenue and contributing records of one vehicle category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBreakdown {
    pub vehicle_category: VehicleCategory,
    pub total_price: f64,
    pub records: Vec<HistoryRecord>,
}

/// Bucket records by the calendar month of their entry time. Months are
/// pooled across years: a January 2024 and a January 2025 visit land in
/// the same bucket.
pub fn monthly_buckets(records: &[HistoryRecord]) -> Vec<MonthlyBucket> {
    let mut buckets: BTreeMap<u32, (u64, f64)> = BTreeMap::new();
    for record in records {
        let entry = buckets.entry(record.entry_time.month()).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += record.price;
    }

    buckets
        .into_iter()
        .map(|(month, (count, total_price))| MonthlyBucket {
            month,
            count,
            total_price,
        })
        .collect()
}

/// Windowed statistics from `now` backwards, in `now`'s calendar.
///
/// Windows start at midnight of today / the most recent Sunday / the
/// first of the month / January 1st. Records are compared after
/// conversion into `now`'s timezone, keyed by their archival time.
pub fn window_statistics<Tz: TimeZone>(
    records: &[HistoryRecord],
    now: DateTime<Tz>,
) -> StatisticsReport {
    let tz = now.timezone();
    let today = now.date_naive();

    let start_of_day = today.and_hms_opt(0, 0, 0).unwrap();
    let start_of_week = (today
        - Duration::days(now.weekday().num_days_from_sunday() as i64))
    .and_hms_opt(0, 0, 0)
    .unwrap();
    let start_of_month = today.with_day(1).unwrap_or(today).and_hms_opt(0, 0, 0).unwrap();
    let start_of_year = today
        .with_month(1)
        .and_then(|d| d.with_day(1))
        .unwrap_or(today)
        .and_hms_opt(0, 0, 0)
        .unwrap();

    let mut report = StatisticsReport::default();
    let add = |window: &mut WindowStats, price: f64| {
        window.count += 1;
        window.revenue += price;
    };

    for record in records {
        let archived: NaiveDateTime = record.archived_at.with_timezone(&tz).naive_local();

        add(&mut report.total, record.price);
        if archived >= start_of_year {
            add(&mut report.yearly, record.price);
        }
        if archived >= start_of_month {
            add(&mut report.monthly, record.price);
        }
        if archived >= start_of_week {
            add(&mut report.weekly, record.price);
        }
        if archived >= start_of_day {
            add(&mut report.daily, record.price);
        }
    }

    report
}

/// Group records by vehicle category, optionally filtered to one
pub fn category_breakdown(
    records: &[HistoryRecord],
    filter: Option<VehicleCategory>,
) -> Vec<CategoryBreakdown> {
    let mut groups: Vec<CategoryBreakdown> = Vec::new();

    for record in records {
        if filter.is_some_and(|wanted| record.vehicle_category != wanted) {
            continue;
        }
        match groups
            .iter_mut()
            .find(|g| g.vehicle_category == record.vehicle_category)
        {
            Some(group) => {
                group.total_price += record.price;
                group.records.push(record.clone());
            }
            None => groups.push(CategoryBreakdown {
                vehicle_category: record.vehicle_category,
                total_price: record.price,
                records: vec![record.clone()],
            }),
        }
    }

    groups
}

/// All-time revenue
pub fn total_revenue(records: &[HistoryRecord]) -> f64 {
    records.iter().map(|r| r.price).sum()
}

// ── Service ────────────────────────────────────────────────────

pub struct ReportingService {
    repos: Arc<dyn RepositoryProvider>,
}

impl ReportingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn all_records(&self) -> DomainResult<Vec<HistoryRecord>> {
        self.repos.history().find_all().await
    }

    pub async fn monthly_buckets(&self) -> DomainResult<Vec<MonthlyBucket>> {
        let records = self.repos.history().find_all().await?;
        Ok(monthly_buckets(&records))
    }

    pub async fn statistics<Tz: TimeZone>(&self, now: DateTime<Tz>) -> DomainResult<StatisticsReport> {
        let records = self.repos.history().find_all().await?;
        Ok(window_statistics(&records, now))
    }

    pub async fn category_breakdown(
        &self,
        filter: Option<VehicleCategory>,
    ) -> DomainResult<Vec<CategoryBreakdown>> {
        let records = self.repos.history().find_all().await?;
        Ok(category_breakdown(&records, filter))
    }

    /// All-time revenue, or None when there is no history at all
    pub async fn total_revenue(&self) -> DomainResult<Option<f64>> {
        let records = self.repos.history().find_all().await?;
        if records.is_empty() {
            return Ok(None);
        }
        Ok(Some(total_revenue(&records)))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn record(
        entry: DateTime<Utc>,
        archived: DateTime<Utc>,
        category: VehicleCategory,
        price: f64,
    ) -> HistoryRecord {
        HistoryRecord {
            id: 0,
            owner_id: "driver@example.com".to_string(),
            plate: "ABC-1234".to_string(),
            entry_time: entry,
            exit_time: entry + Duration::hours(2),
            vehicle_category: category,
            price,
            slot_number: 1,
            archived_at: archived,
        }
    }

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
            .and_utc()
    }

    #[test]
    fn monthly_buckets_pool_across_years() {
        let records = vec![
            record(utc(2024, 1, 10, 9, 0), utc(2024, 1, 10, 12, 0), VehicleCategory::Car, 50.0),
            record(utc(2025, 1, 3, 9, 0), utc(2025, 1, 3, 12, 0), VehicleCategory::Car, 30.0),
            record(utc(2025, 4, 20, 9, 0), utc(2025, 4, 20, 12, 0), VehicleCategory::Motorcycle, 20.0),
        ];

        let buckets = monthly_buckets(&records);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].month, 1);
        assert_eq!(buckets[0].count, 2);
        assert_eq!(buckets[0].total_price, 80.0);
        assert_eq!(buckets[1].month, 4);
        assert_eq!(buckets[1].count, 1);
    }

    #[test]
    fn windows_split_on_day_week_month_year_boundaries() {
        // Wednesday 2025-03-12; the week started Sunday 2025-03-09
        let now = utc(2025, 3, 12, 15, 0);
        let records = vec![
            // today at midnight: in every window
            record(utc(2025, 3, 12, 0, 0), utc(2025, 3, 12, 0, 0), VehicleCategory::Car, 1.0),
            // Sunday start of week, but not today
            record(utc(2025, 3, 9, 8, 0), utc(2025, 3, 9, 8, 0), VehicleCategory::Car, 2.0),
            // Saturday before the week started, still this month
            record(utc(2025, 3, 8, 23, 0), utc(2025, 3, 8, 23, 0), VehicleCategory::Car, 4.0),
            // February: this year only
            record(utc(2025, 2, 20, 12, 0), utc(2025, 2, 20, 12, 0), VehicleCategory::Car, 8.0),
            // previous year: total only
            record(utc(2024, 11, 1, 12, 0), utc(2024, 11, 1, 12, 0), VehicleCategory::Car, 16.0),
        ];

        let report = window_statistics(&records, now);
        assert_eq!(report.daily, WindowStats { count: 1, revenue: 1.0 });
        assert_eq!(report.weekly, WindowStats { count: 2, revenue: 3.0 });
        assert_eq!(report.monthly, WindowStats { count: 3, revenue: 7.0 });
        assert_eq!(report.yearly, WindowStats { count: 4, revenue: 15.0 });
        assert_eq!(report.total, WindowStats { count: 5, revenue: 31.0 });
    }

    #[test]
    fn week_window_starts_on_sunday_even_on_a_sunday() {
        // now is itself a Sunday; the week window starts this morning
        let now = utc(2025, 3, 9, 10, 0);
        let records = vec![
            record(utc(2025, 3, 9, 1, 0), utc(2025, 3, 9, 1, 0), VehicleCategory::Car, 1.0),
            record(utc(2025, 3, 8, 22, 0), utc(2025, 3, 8, 22, 0), VehicleCategory::Car, 2.0),
        ];

        let report = window_statistics(&records, now);
        assert_eq!(report.weekly.count, 1);
        assert_eq!(report.daily.count, 1);
    }

    #[test]
    fn empty_history_yields_empty_report() {
        let report = window_statistics(&[], utc(2025, 3, 12, 15, 0));
        assert_eq!(report, StatisticsReport::default());
        assert!(monthly_buckets(&[]).is_empty());
        assert_eq!(total_revenue(&[]), 0.0);
    }

    #[test]
    fn category_breakdown_groups_and_filters() {
        let records = vec![
            record(utc(2025, 3, 1, 9, 0), utc(2025, 3, 1, 12, 0), VehicleCategory::Car, 50.0),
            record(utc(2025, 3, 2, 9, 0), utc(2025, 3, 2, 12, 0), VehicleCategory::Motorcycle, 20.0),
            record(utc(2025, 3, 3, 9, 0), utc(2025, 3, 3, 12, 0), VehicleCategory::Car, 30.0),
        ];

        let groups = category_breakdown(&records, None);
        assert_eq!(groups.len(), 2);
        let car = groups
            .iter()
            .find(|g| g.vehicle_category == VehicleCategory::Car)
            .unwrap();
        assert_eq!(car.total_price, 80.0);
        assert_eq!(car.records.len(), 2);

        let only_moto = category_breakdown(&records, Some(VehicleCategory::Motorcycle));
        assert_eq!(only_moto.len(), 1);
        assert_eq!(only_moto[0].total_price, 20.0);
    }

    #[test]
    fn total_revenue_sums_all_records() {
        let records = vec![
            record(utc(2025, 3, 1, 9, 0), utc(2025, 3, 1, 12, 0), VehicleCategory::Car, 50.0),
            record(utc(2025, 3, 2, 9, 0), utc(2025, 3, 2, 12, 0), VehicleCategory::Motorcycle, 20.5),
        ];
        assert_eq!(total_revenue(&records), 70.5);
    }
}
