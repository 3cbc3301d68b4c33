//! Recency / Frequency / Monetary customer segmentation.
//!
//! Each customer of a store gets a 1..=4 score per dimension from quartile
//! binning (1 is the best quartile), the three scores are concatenated into an
//! RFM code, and the ranked codes are binned once more into four segments.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

use super::quantile::{quartile_bins, rank_first};
use crate::models::order::CustomerOrder;

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerRfm {
    pub customerid: i64,
    pub recency: i64,
    pub frequency: u32,
    pub monetary: f64,
    pub r_score: u8,
    pub f_score: u8,
    pub m_score: u8,
    pub segment: u8,
}

impl CustomerRfm {
    pub fn rfm_score(&self) -> String {
        format!("{}{}{}", self.r_score, self.f_score, self.m_score)
    }
}

/// Aggregate of one segment for a store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RfmSegment {
    pub segment: u8,
    pub customer_count: usize,
    pub avg_recency: f64,
    pub avg_frequency: f64,
    pub avg_monetary: f64,
}

#[derive(Default)]
struct CustomerTotals {
    last_order: Option<NaiveDateTime>,
    orders: u32,
    spent: f64,
}

/// Score every customer found in `orders`, which must all belong to one store.
/// Customers come back ordered by id.
pub fn score_customers(orders: &[CustomerOrder]) -> Vec<CustomerRfm> {
    let Some(latest) = orders.iter().map(|o| o.orderdate).max() else {
        return Vec::new();
    };
    let reference = latest + Duration::days(1);

    let mut totals: BTreeMap<i64, CustomerTotals> = BTreeMap::new();
    for order in orders {
        let entry = totals.entry(order.customerid).or_default();
        entry.last_order = entry.last_order.max(Some(order.orderdate));
        entry.orders += 1;
        entry.spent += order.total_amount;
    }

    let customers: Vec<(i64, i64, u32, f64)> = totals
        .into_iter()
        .map(|(customerid, t)| {
            let recency = t
                .last_order
                .map_or(0, |last| (reference - last).num_days());
            (customerid, recency, t.orders, t.spent)
        })
        .collect();

    let recency: Vec<f64> = customers.iter().map(|c| c.1 as f64).collect();
    let frequency: Vec<f64> = customers.iter().map(|c| f64::from(c.2)).collect();
    let monetary: Vec<f64> = customers.iter().map(|c| c.3).collect();

    let r_bins = quartile_bins(&recency);
    let f_bins = quartile_bins(&rank_first(&frequency));
    let m_bins = quartile_bins(&monetary);

    let mut scored: Vec<CustomerRfm> = customers
        .into_iter()
        .zip(r_bins.into_iter().zip(f_bins).zip(m_bins))
        .map(|((customerid, recency, frequency, monetary), ((r, f), m))| CustomerRfm {
            customerid,
            recency,
            frequency,
            monetary,
            r_score: r,
            f_score: 5 - f,
            m_score: 5 - m,
            segment: 0,
        })
        .collect();

    // Scores are single digits, so the numeric code orders like the string code.
    let codes: Vec<f64> = scored
        .iter()
        .map(|c| f64::from(c.r_score) * 100.0 + f64::from(c.f_score) * 10.0 + f64::from(c.m_score))
        .collect();
    for (customer, segment) in scored.iter_mut().zip(quartile_bins(&rank_first(&codes))) {
        customer.segment = segment;
    }

    scored
}

/// Average recency, frequency and spend per non-empty segment, best segment first.
pub fn summarize_segments(customers: &[CustomerRfm]) -> Vec<RfmSegment> {
    let mut groups: BTreeMap<u8, Vec<&CustomerRfm>> = BTreeMap::new();
    for customer in customers {
        groups.entry(customer.segment).or_default().push(customer);
    }

    groups
        .into_iter()
        .map(|(segment, members)| {
            let count = members.len() as f64;
            RfmSegment {
                segment,
                customer_count: members.len(),
                avg_recency: members.iter().map(|c| c.recency as f64).sum::<f64>() / count,
                avg_frequency: members.iter().map(|c| f64::from(c.frequency)).sum::<f64>() / count,
                avg_monetary: members.iter().map(|c| c.monetary).sum::<f64>() / count,
            }
        })
        .collect()
}

/// Segment summaries per store, ordered by store id.
pub fn segments_by_store(orders: &[CustomerOrder]) -> Vec<(String, Vec<RfmSegment>)> {
    let mut by_store: BTreeMap<&str, Vec<CustomerOrder>> = BTreeMap::new();
    for order in orders {
        by_store
            .entry(order.storeid.as_str())
            .or_default()
            .push(order.clone());
    }

    by_store
        .into_iter()
        .map(|(storeid, store_orders)| {
            let scored = score_customers(&store_orders);
            (storeid.to_string(), summarize_segments(&scored))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;

    fn order(storeid: &str, customerid: i64, orderid: i64, date: (i32, u32, u32), total: f64) -> CustomerOrder {
        order_at(storeid, customerid, orderid, date, 0, total)
    }

    fn order_at(
        storeid: &str,
        customerid: i64,
        orderid: i64,
        date: (i32, u32, u32),
        hour: u32,
        total: f64,
    ) -> CustomerOrder {
        CustomerOrder {
            storeid: storeid.to_string(),
            customerid,
            orderid,
            orderdate: NaiveDate::from_ymd_opt(date.0, date.1, date.2)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            total_amount: total,
        }
    }

    /// Four customers, each strictly better than the next in every dimension.
    fn graded_store() -> Vec<CustomerOrder> {
        vec![
            order("S1", 1, 1, (2022, 12, 1), 40.0),
            order("S1", 1, 2, (2022, 12, 20), 40.0),
            order("S1", 1, 3, (2022, 12, 31), 40.0),
            order("S1", 1, 4, (2022, 12, 30), 40.0),
            order("S1", 2, 5, (2022, 11, 1), 30.0),
            order("S1", 2, 6, (2022, 11, 30), 30.0),
            order("S1", 2, 7, (2022, 12, 10), 30.0),
            order("S1", 3, 8, (2022, 6, 1), 25.0),
            order("S1", 3, 9, (2022, 9, 1), 25.0),
            order("S1", 4, 10, (2022, 1, 15), 20.0),
        ]
    }

    #[test]
    fn recency_is_counted_from_the_day_after_the_latest_order() {
        let scored = score_customers(&graded_store());
        let recency: Vec<i64> = scored.iter().map(|c| c.recency).collect();
        // Reference date is 2023-01-01.
        assert_eq!(recency, vec![1, 22, 122, 351]);
        let frequency: Vec<u32> = scored.iter().map(|c| c.frequency).collect();
        assert_eq!(frequency, vec![4, 3, 2, 1]);
        assert_eq!(scored[0].monetary, 160.0);
    }

    #[test]
    fn recency_counts_whole_days_between_timestamps() {
        // Reference is 2023-01-01 10:00; 2022-12-30 20:00 is 1 day 14 hours before it.
        let orders = vec![
            order_at("S4", 1, 1, (2022, 12, 30), 20, 10.0),
            order_at("S4", 2, 2, (2022, 12, 31), 10, 15.0),
        ];
        let recency: Vec<i64> = score_customers(&orders).iter().map(|c| c.recency).collect();
        assert_eq!(recency, vec![1, 1]);
    }

    #[test]
    fn best_customer_scores_ones_and_worst_scores_fours() {
        let scored = score_customers(&graded_store());
        assert_eq!(scored[0].rfm_score(), "111");
        assert_eq!(scored[3].rfm_score(), "444");
        let segments: Vec<u8> = scored.iter().map(|c| c.segment).collect();
        assert_eq!(segments, vec![1, 2, 3, 4]);
    }

    #[test]
    fn summaries_average_each_segment() {
        let mut orders = graded_store();
        // A second customer mirroring customer 1 lands in the same top segment.
        orders.push(order("S1", 5, 11, (2022, 12, 31), 50.0));
        orders.push(order("S1", 5, 12, (2022, 12, 29), 50.0));
        orders.push(order("S1", 5, 13, (2022, 12, 28), 50.0));
        orders.push(order("S1", 5, 14, (2022, 12, 27), 50.0));

        let summary = summarize_segments(&score_customers(&orders));
        let total: usize = summary.iter().map(|s| s.customer_count).sum();
        assert_eq!(total, 5);
        assert!(summary.windows(2).all(|w| w[0].segment < w[1].segment));

        let worst = summary.last().unwrap();
        assert_eq!(worst.segment, 4);
        assert_eq!(worst.avg_frequency, 1.0);
        assert_eq!(worst.avg_monetary, 20.0);
    }

    #[test]
    fn stores_are_segmented_independently() {
        let mut orders = graded_store();
        orders.push(order("S0", 9, 99, (2022, 3, 3), 12.5));

        let result = segments_by_store(&orders);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].0, "S0");
        assert_eq!(
            result[0].1,
            vec![RfmSegment {
                segment: 1,
                customer_count: 1,
                avg_recency: 1.0,
                avg_frequency: 1.0,
                avg_monetary: 12.5,
            }]
        );
        assert_eq!(result[1].0, "S1");
        assert_eq!(result[1].1.len(), 4);
    }

    #[test]
    fn no_orders_means_no_segments() {
        assert!(score_customers(&[]).is_empty());
        assert!(segments_by_store(&[]).is_empty());
    }
}
