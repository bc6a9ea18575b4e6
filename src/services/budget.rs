//! Budget allocation across trip days and categories

use crate::models::BudgetSplit;

pub const ACTIVITIES_SHARE: f64 = 0.4;
pub const ACCOMMODATION_SHARE: f64 = 0.3;
pub const MEALS_SHARE: f64 = 0.2;
pub const TRANSPORT_SHARE: f64 = 0.1;

/// Split `total` evenly across `days`, then by category.
///
/// A zero-day range keeps the whole budget for the single planned day.
/// Values are not rounded.
pub fn allocate(total: f64, days: usize) -> BudgetSplit {
    let daily = if days > 0 { total / days as f64 } else { total };

    BudgetSplit {
        daily,
        activities: daily * ACTIVITIES_SHARE,
        accommodation: daily * ACCOMMODATION_SHARE,
        meals: daily * MEALS_SHARE,
        transport: daily * TRANSPORT_SHARE,
    }
}

/// Whole-dollar display amount
pub fn usd(amount: f64) -> String {
    format!("{:.0}", amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_even_split() {
        let split = allocate(900.0, 3);
        assert_eq!(split.daily, 300.0);
        assert!((split.activities - 120.0).abs() < 1e-9);
        assert!((split.accommodation - 90.0).abs() < 1e-9);
        assert!((split.meals - 60.0).abs() < 1e-9);
        assert!((split.transport - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_categories_sum_to_daily() {
        for (total, days) in [(900.0, 3), (1234.56, 7), (0.01, 1), (99_999.0, 13), (500.0, 30)] {
            let split = allocate(total, days);
            let expected = total / days as f64;
            assert!(
                (split.category_total() - expected).abs() <= expected * 1e-12,
                "total={} days={}",
                total,
                days
            );
        }
    }

    #[test]
    fn test_zero_days_keeps_total() {
        assert_eq!(allocate(450.0, 0).daily, 450.0);
    }

    #[test]
    fn test_usd_formatting() {
        assert_eq!(usd(300.0), "300");
        assert_eq!(usd(133.333), "133");
        assert_eq!(usd(0.0), "0");
    }
}
