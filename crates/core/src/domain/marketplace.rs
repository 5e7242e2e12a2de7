use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarketplaceId(pub i64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CostCategory {
    Commission,
    Shipping,
    Marketing,
}

impl CostCategory {
    pub const ALL: [CostCategory; 3] =
        [CostCategory::Commission, CostCategory::Shipping, CostCategory::Marketing];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Commission => "COMMISSION",
            Self::Shipping => "SHIPPING",
            Self::Marketing => "MARKETING",
        }
    }
}

impl std::fmt::Display for CostCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `P` and `A` are the wire codes marketplace operators configure; the long
/// aliases are accepted for hand-written scenario files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CostValueType {
    #[serde(rename = "P", alias = "PERCENT")]
    Percent,
    #[serde(rename = "A", alias = "FLAT")]
    Flat,
}

/// Inclusive price range parsed from an operator-entered string.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PriceRange {
    pub from: f64,
    pub to: f64,
}

impl PriceRange {
    /// Parses `"from-to"` (e.g. `"0-300"`, `"301 - 500"`) into inclusive
    /// bounds. Blank, non-numeric, reversed, or degenerate input yields
    /// `None`: the rule is treated as un-tiered rather than rejected, since
    /// ranges are operator-entered configuration.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        // Split on the first '-' past the first character so a leading minus
        // sign is not mistaken for the separator. Scanned by char, since the
        // input is operator-entered and may open with multi-byte text.
        let split = raw.char_indices().skip(1).find(|&(_, ch)| ch == '-').map(|(idx, _)| idx)?;
        let from = raw[..split].trim().parse::<f64>().ok()?;
        let to = raw[split + 1..].trim().parse::<f64>().ok()?;
        if !from.is_finite() || !to.is_finite() || to <= from {
            return None;
        }
        Some(Self { from, to })
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.from && value <= self.to
    }
}

/// One cost entry of a marketplace's tiered cost structure. Immutable input
/// to the engine; several rules may share a category (price slabs) or carry
/// no range at all.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostRule {
    #[serde(default)]
    pub id: Option<i64>,
    pub category: CostCategory,
    pub value_type: CostValueType,
    pub value: f64,
    #[serde(default)]
    pub price_range: Option<String>,
}

impl CostRule {
    pub fn range(&self) -> Option<PriceRange> {
        self.price_range.as_deref().and_then(PriceRange::parse)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marketplace {
    pub id: MarketplaceId,
    pub name: String,
    pub enabled: bool,
    pub costs: Vec<CostRule>,
}
