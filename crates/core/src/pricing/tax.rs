use serde::{Deserialize, Serialize};

/// Above-or-at `threshold`, `rate` applies.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaxTier {
    pub threshold: f64,
    pub rate: f64,
}

/// Step function from selling price to output tax rate. Structurally the
/// same range-to-value mapping as a cost slab, so the inverse solver feeds
/// its thresholds into the same breakpoint partition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaxSchedule {
    base_rate: f64,
    tiers: Vec<TaxTier>,
}

impl TaxSchedule {
    pub fn new(base_rate: f64, mut tiers: Vec<TaxTier>) -> Self {
        tiers.sort_by(|a, b| a.threshold.total_cmp(&b.threshold));
        Self { base_rate, tiers }
    }

    /// The engine's constant two-tier schedule: 5% below 2064, 18% at or
    /// above it.
    pub fn goods_and_services() -> Self {
        Self::new(0.05, vec![TaxTier { threshold: 2064.0, rate: 0.18 }])
    }

    pub fn rate_at(&self, price: f64) -> f64 {
        self.tiers
            .iter()
            .rev()
            .find(|tier| price >= tier.threshold)
            .map(|tier| tier.rate)
            .unwrap_or(self.base_rate)
    }

    pub fn thresholds(&self) -> impl Iterator<Item = f64> + '_ {
        self.tiers.iter().map(|tier| tier.threshold)
    }
}

impl Default for TaxSchedule {
    fn default() -> Self {
        Self::goods_and_services()
    }
}

#[cfg(test)]
mod tests {
    use super::{TaxSchedule, TaxTier};

    #[test]
    fn threshold_is_inclusive_on_the_high_side() {
        let schedule = TaxSchedule::goods_and_services();
        assert_eq!(schedule.rate_at(2063.99), 0.05);
        assert_eq!(schedule.rate_at(2064.0), 0.18);
        assert_eq!(schedule.rate_at(0.0), 0.05);
        assert_eq!(schedule.rate_at(1_000_000.0), 0.18);
    }

    #[test]
    fn tiers_are_ordered_regardless_of_construction_order() {
        let schedule = TaxSchedule::new(
            0.0,
            vec![
                TaxTier { threshold: 500.0, rate: 0.12 },
                TaxTier { threshold: 100.0, rate: 0.05 },
            ],
        );
        assert_eq!(schedule.rate_at(50.0), 0.0);
        assert_eq!(schedule.rate_at(100.0), 0.05);
        assert_eq!(schedule.rate_at(700.0), 0.12);
    }
}
