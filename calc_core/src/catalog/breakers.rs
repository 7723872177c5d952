//! Moulded-case and air circuit breaker catalog
//!
//! The standard product line is built once on first use and shared
//! read-only by every selection call. Callers may also supply their own
//! table (e.g. a distributor price list in JSON).

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// A protective device SKU.
///
/// `series` and `model_name` are descriptive only: the same model can appear
/// with several ratings.
///
/// ## JSON Example
///
/// ```json
/// {
///   "series": "T5",
///   "model_name": "T5H400",
///   "rated_current_a": 320.0,
///   "breaking_capacity_ka": 65.0,
///   "price_eur": 2200.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakerModel {
    /// Product series (e.g. "T2", "E1")
    pub series: String,

    /// Frame/model designation (e.g. "T2S160")
    pub model_name: String,

    /// Nominal current rating In (A)
    pub rated_current_a: f64,

    /// Ultimate breaking capacity Icu (kA)
    pub breaking_capacity_ka: f64,

    /// Unit price (€)
    pub price_eur: f64,
}

impl BreakerModel {
    pub fn new(
        series: impl Into<String>,
        model_name: impl Into<String>,
        rated_current_a: f64,
        breaking_capacity_ka: f64,
        price_eur: f64,
    ) -> Self {
        BreakerModel {
            series: series.into(),
            model_name: model_name.into(),
            rated_current_a,
            breaking_capacity_ka,
            price_eur,
        }
    }

    /// Validate ratings and price.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.rated_current_a.is_finite() || self.rated_current_a <= 0.0 {
            return Err(CalcError::invalid_field(
                "rated_current_a",
                self.rated_current_a.to_string(),
                format!("Rated current of {} must be positive", self.model_name),
            ));
        }
        if !self.breaking_capacity_ka.is_finite() || self.breaking_capacity_ka <= 0.0 {
            return Err(CalcError::invalid_field(
                "breaking_capacity_ka",
                self.breaking_capacity_ka.to_string(),
                format!("Breaking capacity of {} must be positive", self.model_name),
            ));
        }
        if !self.price_eur.is_finite() || self.price_eur < 0.0 {
            return Err(CalcError::invalid_field(
                "price_eur",
                self.price_eur.to_string(),
                format!("Price of {} cannot be negative", self.model_name),
            ));
        }
        Ok(())
    }

    /// Short label, e.g. "T5H400 320A"
    pub fn label(&self) -> String {
        format!("{} {:.0}A", self.model_name, self.rated_current_a)
    }
}

/// Read-only ordered table of breakers.
///
/// Every row is validated on construction, including deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<BreakerModel>", into = "Vec<BreakerModel>")]
pub struct BreakerCatalog {
    entries: Vec<BreakerModel>,
}

impl BreakerCatalog {
    /// Build a catalog from entries, validating each row.
    pub fn new(entries: Vec<BreakerModel>) -> CalcResult<Self> {
        for entry in &entries {
            entry.validate()?;
        }
        Ok(BreakerCatalog { entries })
    }

    /// Parse a JSON array of [`BreakerModel`] rows.
    pub fn from_json(json: &str) -> CalcResult<Self> {
        let entries: Vec<BreakerModel> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    /// The built-in standard product line.
    ///
    /// # Example
    ///
    /// ```rust
    /// use calc_core::catalog::BreakerCatalog;
    ///
    /// let catalog = BreakerCatalog::standard();
    /// assert_eq!(catalog.len(), 14);
    /// assert_eq!(catalog.entries()[0].model_name, "T1S160");
    /// ```
    pub fn standard() -> &'static BreakerCatalog {
        &STANDARD_CATALOG
    }

    /// Rows in catalog order
    pub fn entries(&self) -> &[BreakerModel] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BreakerModel> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest rated current in the catalog (A)
    pub fn max_rated_current_a(&self) -> Option<f64> {
        self.entries.iter().map(|b| b.rated_current_a).reduce(f64::max)
    }
}

impl TryFrom<Vec<BreakerModel>> for BreakerCatalog {
    type Error = CalcError;

    fn try_from(entries: Vec<BreakerModel>) -> CalcResult<Self> {
        BreakerCatalog::new(entries)
    }
}

impl From<BreakerCatalog> for Vec<BreakerModel> {
    fn from(catalog: BreakerCatalog) -> Self {
        catalog.entries
    }
}

/// (series, model, In [A], Icu [kA], price [€])
static STANDARD_BREAKER_ROWS: &[(&str, &str, f64, f64, f64)] = &[
    ("T1", "T1S160", 63.0, 15.0, 450.0),
    ("T1", "T1S160", 80.0, 15.0, 520.0),
    ("T2", "T2S160", 100.0, 25.0, 680.0),
    ("T2", "T2S160", 125.0, 25.0, 750.0),
    ("T3", "T3S250", 160.0, 35.0, 950.0),
    ("T3", "T3S250", 200.0, 35.0, 1100.0),
    ("T4", "T4S250", 250.0, 50.0, 1450.0),
    ("T5", "T5H400", 320.0, 65.0, 2200.0),
    ("T5", "T5H400", 400.0, 65.0, 2800.0),
    ("E1", "E1N800", 630.0, 42.0, 4500.0),
    ("E1", "E1N800", 800.0, 42.0, 5200.0),
    ("E2", "E2N1250", 1000.0, 65.0, 7800.0),
    ("E3", "E3N1600", 1250.0, 65.0, 12000.0),
    ("E3", "E3N3200", 1600.0, 65.0, 15000.0),
];

static STANDARD_CATALOG: Lazy<BreakerCatalog> = Lazy::new(|| BreakerCatalog {
    entries: STANDARD_BREAKER_ROWS
        .iter()
        .map(|&(series, model, rated, icu, price)| BreakerModel::new(series, model, rated, icu, price))
        .collect(),
});
