use crate::error::CatalogError;
use core_types::{Frequency, Indicator, IndicatorId};
use serde::{Deserialize, Serialize};

/// Per-indicator parameters for synthesising a plausible history.
///
/// Everything that used to be a per-indicator literal (base level, drift) lives
/// here, so adding an indicator is a one-entry change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesProfile {
    /// Level the series oscillates around.
    pub base_value: f64,
    /// Linear drift added per period.
    pub drift_per_period: f64,
    /// Amplitude of the 12-period seasonal wave.
    pub seasonal_amplitude: f64,
    /// Amplitude of the 48-period business-cycle wave.
    pub cyclical_amplitude: f64,
    /// Total width of the uniform noise band (values stay within +/- half of it).
    pub noise_amplitude: f64,
}

impl SeriesProfile {
    pub fn new(base_value: f64, drift_per_period: f64) -> Self {
        Self {
            base_value,
            drift_per_period,
            seasonal_amplitude: 0.1,
            cyclical_amplitude: 0.2,
            noise_amplitude: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub indicator: Indicator,
    pub profile: SeriesProfile,
}

/// The registry of known indicators, keyed by `IndicatorId`.
///
/// It is built once at start-up and shared read-only; lookups never mutate it.
#[derive(Debug, Clone)]
pub struct IndicatorCatalog {
    entries: Vec<CatalogEntry>,
}

impl IndicatorCatalog {
    /// Builds a catalog from explicit entries. Order is preserved for `list()`.
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        for (i, entry) in entries.iter().enumerate() {
            if entries[..i].iter().any(|e| e.indicator.id == entry.indicator.id) {
                return Err(CatalogError::Duplicate(entry.indicator.id.to_string()));
            }
        }
        Ok(Self { entries })
    }

    /// The four standard FRED-sourced indicators.
    pub fn builtin() -> Self {
        Self {
            entries: vec![
                entry(
                    IndicatorId::Cpi,
                    "Consumer Price Index",
                    "YoY %",
                    Frequency::Monthly,
                    "Inflation",
                    "Measures changes in the prices consumers pay for goods and services",
                    SeriesProfile::new(3.2, 0.02),
                ),
                entry(
                    IndicatorId::Gdp,
                    "Gross Domestic Product",
                    "YoY %",
                    Frequency::Quarterly,
                    "Growth",
                    "Headline measure of overall economic output growth",
                    SeriesProfile::new(2.8, 0.01),
                ),
                entry(
                    IndicatorId::Unemployment,
                    "Unemployment Rate",
                    "%",
                    Frequency::Monthly,
                    "Employment",
                    "Share of the labour force without a job. <4% = tight labour market",
                    SeriesProfile::new(3.7, -0.01),
                ),
                entry(
                    IndicatorId::InterestRate,
                    "Federal Funds Rate",
                    "%",
                    Frequency::Monthly,
                    "Monetary Policy",
                    "The central bank policy rate that anchors short-term borrowing costs",
                    SeriesProfile::new(5.25, 0.005),
                ),
            ],
        }
    }

    pub fn get(&self, id: IndicatorId) -> Result<&CatalogEntry, CatalogError> {
        self.entries
            .iter()
            .find(|e| e.indicator.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    /// Looks up an indicator by its wire name.
    pub fn get_by_str(&self, id: &str) -> Result<&CatalogEntry, CatalogError> {
        let parsed: IndicatorId = id
            .parse()
            .map_err(|_| CatalogError::NotFound(id.to_string()))?;
        self.get(parsed)
    }

    /// Active indicators only, in registration order.
    pub fn list(&self) -> Vec<&Indicator> {
        self.entries
            .iter()
            .map(|e| &e.indicator)
            .filter(|i| i.is_active)
            .collect()
    }
}

impl Default for IndicatorCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn entry(
    id: IndicatorId,
    name_en: &str,
    unit: &str,
    frequency: Frequency,
    category: &str,
    description: &str,
    profile: SeriesProfile,
) -> CatalogEntry {
    CatalogEntry {
        indicator: Indicator {
            id,
            name: name_en.to_string(),
            name_en: name_en.to_string(),
            unit: unit.to_string(),
            frequency,
            source: "FRED".to_string(),
            category: category.to_string(),
            description: description.to_string(),
            is_active: true,
        },
        profile,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_covers_every_indicator() {
        let catalog = IndicatorCatalog::builtin();
        for id in IndicatorId::ALL {
            let entry = catalog.get(id).unwrap();
            assert_eq!(entry.indicator.id, id);
            assert_eq!(entry.indicator.source, "FRED");
        }
        assert_eq!(catalog.get(IndicatorId::Gdp).unwrap().indicator.frequency, Frequency::Quarterly);
        assert_eq!(catalog.get(IndicatorId::InterestRate).unwrap().profile.base_value, 5.25);
    }

    #[test]
    fn test_list_hides_inactive_indicators() {
        let mut entries = IndicatorCatalog::builtin().entries;
        entries[1].indicator.is_active = false;
        let catalog = IndicatorCatalog::new(entries).unwrap();

        let listed: Vec<IndicatorId> = catalog.list().iter().map(|i| i.id).collect();
        assert_eq!(listed, vec![IndicatorId::Cpi, IndicatorId::Unemployment, IndicatorId::InterestRate]);
        // Inactive indicators can still be looked up directly.
        assert!(catalog.get(IndicatorId::Gdp).is_ok());
    }

    #[test]
    fn test_lookup_failures() {
        let catalog = IndicatorCatalog::new(vec![]).unwrap();
        assert_eq!(
            catalog.get(IndicatorId::Cpi).unwrap_err(),
            CatalogError::NotFound("cpi".to_string())
        );
        let builtin = IndicatorCatalog::builtin();
        assert!(matches!(builtin.get_by_str("exchange_rate"), Err(CatalogError::NotFound(_))));
        assert_eq!(builtin.get_by_str("unemployment").unwrap().indicator.id, IndicatorId::Unemployment);
    }

    #[test]
    fn test_duplicate_entries_are_rejected() {
        let mut entries = IndicatorCatalog::builtin().entries;
        entries.push(entries[0].clone());
        assert_eq!(
            IndicatorCatalog::new(entries).unwrap_err(),
            CatalogError::Duplicate("cpi".to_string())
        );
    }
}
