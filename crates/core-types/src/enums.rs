use crate::error::CoreError;
use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of economic indicators the dashboard knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorId {
    Cpi,
    Gdp,
    Unemployment,
    InterestRate,
}

impl IndicatorId {
    pub const ALL: [IndicatorId; 4] = [
        IndicatorId::Cpi,
        IndicatorId::Gdp,
        IndicatorId::Unemployment,
        IndicatorId::InterestRate,
    ];

    /// The wire name used in URLs, JSON and the CLI.
    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorId::Cpi => "cpi",
            IndicatorId::Gdp => "gdp",
            IndicatorId::Unemployment => "unemployment",
            IndicatorId::InterestRate => "interest_rate",
        }
    }
}

impl fmt::Display for IndicatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndicatorId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cpi" => Ok(IndicatorId::Cpi),
            "gdp" => Ok(IndicatorId::Gdp),
            "unemployment" => Ok(IndicatorId::Unemployment),
            "interest_rate" => Ok(IndicatorId::InterestRate),
            other => Err(CoreError::UnknownIndicator(other.to_string())),
        }
    }
}

/// How often an indicator is published. Drives the calendar spacing of
/// generated observations and of forecast points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Annually,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Quarterly => "quarterly",
            Frequency::Annually => "annually",
        }
    }

    /// Nominal length of one period in days.
    pub fn interval_days(&self) -> u32 {
        match self {
            Frequency::Daily => 1,
            Frequency::Weekly => 7,
            Frequency::Monthly => 30,
            Frequency::Quarterly => 90,
            Frequency::Annually => 365,
        }
    }

    /// Moves `steps` periods away from `anchor` (negative steps go back in time).
    ///
    /// Month-based frequencies are computed from the anchor in one jump rather than
    /// by repeated single steps, so a series anchored on the 31st clamps to month-end
    /// where needed instead of drifting earlier with every step.
    /// Returns `None` if the result falls outside chrono's representable range.
    pub fn shift(&self, anchor: NaiveDate, steps: i64) -> Option<NaiveDate> {
        let magnitude = steps.unsigned_abs();
        let forward = steps >= 0;
        match self {
            Frequency::Daily | Frequency::Weekly => {
                let days = Days::new(magnitude.checked_mul(u64::from(self.interval_days()))?);
                if forward {
                    anchor.checked_add_days(days)
                } else {
                    anchor.checked_sub_days(days)
                }
            }
            Frequency::Monthly | Frequency::Quarterly | Frequency::Annually => {
                let per_step: u64 = match self {
                    Frequency::Monthly => 1,
                    Frequency::Quarterly => 3,
                    _ => 12,
                };
                let months = Months::new(u32::try_from(magnitude.checked_mul(per_step)?).ok()?);
                if forward {
                    anchor.checked_add_months(months)
                } else {
                    anchor.checked_sub_months(months)
                }
            }
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The forecasting methodologies the engine can dispatch to.
///
/// Parsing never fails: an unrecognised name falls back to `Linear`, both through
/// `Methodology::parse_lossy` and when deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Methodology {
    #[default]
    Linear,
    Exponential,
    Arima,
    Prophet,
}

impl Methodology {
    pub const ALL: [Methodology; 4] = [
        Methodology::Linear,
        Methodology::Exponential,
        Methodology::Arima,
        Methodology::Prophet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Methodology::Linear => "linear",
            Methodology::Exponential => "exponential",
            Methodology::Arima => "arima",
            Methodology::Prophet => "prophet",
        }
    }

    pub fn parse_lossy(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "exponential" => Methodology::Exponential,
            "arima" => Methodology::Arima,
            "prophet" => Methodology::Prophet,
            _ => Methodology::Linear,
        }
    }
}

impl From<String> for Methodology {
    fn from(value: String) -> Self {
        Methodology::parse_lossy(&value)
    }
}

impl fmt::Display for Methodology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Increasing => "increasing",
            TrendDirection::Decreasing => "decreasing",
            TrendDirection::Stable => "stable",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How large a point-to-point move inside the trend window was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeSeverity {
    Moderate,
    Significant,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_indicator_id_parses_wire_names() {
        for id in IndicatorId::ALL {
            assert_eq!(id.as_str().parse::<IndicatorId>().unwrap(), id);
        }
        assert_eq!("  CPI ".parse::<IndicatorId>().unwrap(), IndicatorId::Cpi);
        assert!(matches!(
            "exchange_rate".parse::<IndicatorId>(),
            Err(CoreError::UnknownIndicator(_))
        ));
    }

    #[test]
    fn test_methodology_falls_back_to_linear() {
        assert_eq!(Methodology::parse_lossy("prophet"), Methodology::Prophet);
        assert_eq!(Methodology::parse_lossy("ARIMA"), Methodology::Arima);
        assert_eq!(Methodology::parse_lossy("holt-winters"), Methodology::Linear);

        let parsed: Methodology = serde_json::from_str("\"neural\"").unwrap();
        assert_eq!(parsed, Methodology::Linear);
        let parsed: Methodology = serde_json::from_str("\"exponential\"").unwrap();
        assert_eq!(parsed, Methodology::Exponential);
        assert_eq!(serde_json::to_string(&Methodology::Arima).unwrap(), "\"arima\"");
    }

    #[test]
    fn test_monthly_shift_clamps_without_drift() {
        let anchor = date("2024-01-31");
        assert_eq!(Frequency::Monthly.shift(anchor, 1), Some(date("2024-02-29")));
        assert_eq!(Frequency::Monthly.shift(anchor, 2), Some(date("2024-03-31")));
        assert_eq!(Frequency::Monthly.shift(anchor, -2), Some(date("2023-11-30")));
    }

    #[test]
    fn test_shift_steps_per_frequency() {
        let anchor = date("2024-06-15");
        assert_eq!(Frequency::Daily.shift(anchor, -3), Some(date("2024-06-12")));
        assert_eq!(Frequency::Weekly.shift(anchor, 2), Some(date("2024-06-29")));
        assert_eq!(Frequency::Quarterly.shift(anchor, 1), Some(date("2024-09-15")));
        assert_eq!(Frequency::Annually.shift(anchor, -1), Some(date("2023-06-15")));
        assert_eq!(Frequency::Monthly.shift(anchor, 0), Some(anchor));
    }
}
