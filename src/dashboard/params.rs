//! Chart parameters
//!
//! The closed set of display modes a user can pick from, and the single
//! "current" selection held by the page.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::types::DailyObservation;

/// Identifier of a chart parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParamId {
    #[serde(rename = "cases-per-1000")]
    CasesPer1000,
    TotalCasesLog,
    NewCases,
}

impl ParamId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamId::CasesPer1000 => "cases-per-1000",
            ParamId::TotalCasesLog => "total-cases-log",
            ParamId::NewCases => "new-cases",
        }
    }
}

impl fmt::Display for ParamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParamId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        list_params()
            .iter()
            .map(|p| p.id)
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("Unknown chart parameter: {}", s))
    }
}

/// Y-axis scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleKind {
    Linear,
    Log,
}

/// How a series is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    Line,
    Area,
}

/// Which observation field is plotted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessor {
    CasesPer1000,
    Cases,
    NewCases,
}

impl Accessor {
    pub fn read(&self, obs: &DailyObservation) -> f64 {
        match self {
            Accessor::CasesPer1000 => obs.cases_per_1000,
            Accessor::Cases => obs.cases as f64,
            Accessor::NewCases => obs.new_cases as f64,
        }
    }
}

/// A display mode: metric, scale and labels
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartParam {
    pub id: ParamId,
    pub label: &'static str,
    pub axis_label: &'static str,
    pub accessor: Accessor,
    pub scale: ScaleKind,
    pub mark: Mark,
}

impl ChartParam {
    /// Plotted value of an observation
    pub fn value(&self, obs: &DailyObservation) -> f64 {
        self.accessor.read(obs)
    }

    /// Plotted value, or `None` when the scale cannot represent it
    pub fn plot_value(&self, obs: &DailyObservation) -> Option<f64> {
        let value = self.value(obs);
        match self.scale {
            ScaleKind::Log if value <= 0.0 => None,
            _ if !value.is_finite() => None,
            _ => Some(value),
        }
    }
}

const CHART_PARAMS: [ChartParam; 3] = [
    ChartParam {
        id: ParamId::CasesPer1000,
        label: "Cases/1000",
        axis_label: "Cases per 1000 people",
        accessor: Accessor::CasesPer1000,
        scale: ScaleKind::Linear,
        mark: Mark::Line,
    },
    ChartParam {
        id: ParamId::TotalCasesLog,
        label: "Total cases (log chart)",
        axis_label: "Total cases",
        accessor: Accessor::Cases,
        scale: ScaleKind::Log,
        mark: Mark::Line,
    },
    ChartParam {
        id: ParamId::NewCases,
        label: "New Cases",
        axis_label: "New cases per day",
        accessor: Accessor::NewCases,
        scale: ScaleKind::Linear,
        mark: Mark::Area,
    },
];

/// All chart parameters, in display order
pub fn list_params() -> &'static [ChartParam] {
    &CHART_PARAMS
}

/// Look up a parameter by id
pub fn param(id: ParamId) -> &'static ChartParam {
    list_params()
        .iter()
        .find(|p| p.id == id)
        .unwrap_or(&CHART_PARAMS[0])
}

/// The page's active chart parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartParams {
    current: ParamId,
}

impl Default for ChartParams {
    fn default() -> Self {
        Self {
            current: CHART_PARAMS[0].id,
        }
    }
}

impl ChartParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> &'static [ChartParam] {
        list_params()
    }

    pub fn current(&self) -> &'static ChartParam {
        param(self.current)
    }

    pub fn current_id(&self) -> ParamId {
        self.current
    }

    /// Switch to `param_id`. Unknown ids leave the current parameter as is.
    pub fn set_current(&mut self, param_id: &str) {
        match param_id.parse::<ParamId>() {
            Ok(id) => {
                if id != self.current {
                    tracing::debug!(from = %self.current, to = %id, "Chart parameter changed");
                }
                self.current = id;
            }
            Err(e) => {
                tracing::debug!(param_id, error = %e, "Ignoring chart parameter change");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn obs(cases: u64, new_cases: i64) -> DailyObservation {
        DailyObservation {
            day: 1,
            date: NaiveDate::from_ymd_opt(2020, 3, 1).unwrap(),
            cases,
            new_cases,
            cases_per_1000: cases as f64 / 100.0,
        }
    }

    #[test]
    fn test_list_order() {
        let ids: Vec<_> = list_params().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["cases-per-1000", "total-cases-log", "new-cases"]);
    }

    #[test]
    fn test_default_is_first() {
        let params = ChartParams::new();
        assert_eq!(params.current().id, list_params()[0].id);
    }

    #[test]
    fn test_set_current() {
        let mut params = ChartParams::new();
        params.set_current("new-cases");
        assert_eq!(params.current_id(), ParamId::NewCases);
        assert_eq!(params.current().mark, Mark::Area);
    }

    #[test]
    fn test_set_current_unknown_is_noop() {
        let mut params = ChartParams::new();
        params.set_current("total-cases-log");
        params.set_current("unknown-id");
        assert_eq!(params.current_id(), ParamId::TotalCasesLog);
    }

    #[test]
    fn test_param_id_parse_roundtrip() {
        for p in list_params() {
            assert_eq!(p.id.to_string().parse::<ParamId>(), Ok(p.id));
        }
        assert!("cases".parse::<ParamId>().is_err());
    }

    #[test]
    fn test_accessors() {
        let o = obs(250, 12);
        assert_eq!(param(ParamId::CasesPer1000).value(&o), 2.5);
        assert_eq!(param(ParamId::TotalCasesLog).value(&o), 250.0);
        assert_eq!(param(ParamId::NewCases).value(&o), 12.0);
    }

    #[test]
    fn test_log_scale_drops_non_positive() {
        let log = param(ParamId::TotalCasesLog);
        assert_eq!(log.plot_value(&obs(0, 0)), None);
        assert_eq!(log.plot_value(&obs(10, 0)), Some(10.0));

        // Linear scale keeps zero and negative corrections
        let linear = param(ParamId::NewCases);
        assert_eq!(linear.plot_value(&obs(10, -3)), Some(-3.0));
    }

    #[test]
    fn test_param_serializes_kebab_id() {
        let json = serde_json::to_value(param(ParamId::TotalCasesLog)).unwrap();
        assert_eq!(json["id"], "total-cases-log");
        assert_eq!(json["scale"], "log");
    }

    #[test]
    fn test_marks_and_scales() {
        let cases = param(ParamId::CasesPer1000);
        assert_eq!((cases.scale, cases.mark), (ScaleKind::Linear, Mark::Line));
        let new_cases = param(ParamId::NewCases);
        assert_eq!((new_cases.scale, new_cases.mark), (ScaleKind::Linear, Mark::Area));
    }

    #[test]
    fn test_serialized_ids_match_display() {
        for p in list_params() {
            let json = serde_json::to_value(p.id).unwrap();
            assert_eq!(json, p.id.as_str());

            let back: ParamId = serde_json::from_value(json.clone()).unwrap();
            assert_eq!(back, p.id);

            // A served id must be accepted back by the picker
            let other = list_params().iter().find(|o| o.id != p.id).unwrap();
            let mut params = ChartParams::default();
            params.set_current(other.id.as_str());
            params.set_current(json.as_str().unwrap());
            assert_eq!(params.current_id(), p.id);
        }
    }
}
