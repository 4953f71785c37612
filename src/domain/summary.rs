use std::collections::BTreeMap;

use crate::domain::entities::row::{EventRow, EventStatus, OrderRow, OrderStatus};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSummary {
    pub total_events: usize,
    pub upcoming_events: usize,
    pub tickets_sold: u32,
    pub revenue: f64,
    pub refunded: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategorySales {
    pub ticket_type: String,
    pub sold: u32,
    pub capacity: u32,
    pub revenue: f64,
    /// Sold over capacity, in percent. Zero when nothing was on sale.
    pub conversion: f64,
}

pub fn summarize(events: &[EventRow], orders: &[OrderRow]) -> DashboardSummary {
    let upcoming_events = events
        .iter()
        .filter(|event| event.status == EventStatus::Upcoming)
        .count();
    let tickets_sold = events
        .iter()
        .fold(0_u32, |total, event| total.saturating_add(event.tickets_sold()));
    let revenue = orders
        .iter()
        .filter(|order| order.status == OrderStatus::Completed)
        .map(|order| order.total)
        .sum();
    let refunded = orders
        .iter()
        .filter(|order| order.status == OrderStatus::Refunded)
        .map(|order| order.total)
        .sum();

    DashboardSummary {
        total_events: events.len(),
        upcoming_events,
        tickets_sold,
        revenue,
        refunded,
    }
}

/// Aggregates ticket tiers across events by tier name. Counts saturate at
/// `u32::MAX` rather than overflow.
pub fn category_sales(events: &[EventRow]) -> Vec<CategorySales> {
    let mut by_type: BTreeMap<String, (u32, u32, f64)> = BTreeMap::new();
    for tier in events.iter().flat_map(|event| event.tiers.iter()) {
        let entry = by_type.entry(tier.name.clone()).or_default();
        entry.0 = entry.0.saturating_add(tier.sold);
        entry.1 = entry.1.saturating_add(tier.capacity);
        entry.2 += tier.price * f64::from(tier.sold);
    }

    by_type
        .into_iter()
        .map(|(ticket_type, (sold, capacity, revenue))| CategorySales {
            ticket_type,
            sold,
            capacity,
            revenue,
            conversion: if capacity == 0 {
                0.0
            } else {
                f64::from(sold) / f64::from(capacity) * 100.0
            },
        })
        .collect()
}
