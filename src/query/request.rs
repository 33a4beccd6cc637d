use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use super::error::FilterError;
use super::filter::FilterSet;

/// Filter state as sent by the dashboard UI
///
/// Every field is optional. Selections the catalog does not know are
/// resolved to defaults by the builder, not rejected here.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DashboardRequest {
    #[serde(default)]
    pub indicator: String,
    #[serde(default)]
    pub granularity: String,
    /// Time bucket key (jour, semaine, mois, annee)
    pub time_dimension: Option<String>,
    /// One region or several; `"all"` means no restriction
    #[serde(default, deserialize_with = "one_or_many")]
    pub region: Option<Vec<String>>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub categorie: Option<Vec<String>>,
    /// ISO date, inclusive
    pub date_debut: Option<String>,
    /// ISO date, inclusive
    pub date_fin: Option<String>,
}

impl DashboardRequest {
    /// Validate the filter fields into a FilterSet
    pub fn filters(&self) -> Result<FilterSet, FilterError> {
        let mut builder = FilterSet::builder();
        if let Some(region) = &self.region {
            builder = builder.regions(selected(region));
        }
        if let Some(categories) = &self.categorie {
            builder = builder.categories(selected(categories));
        }
        if let Some(start) = parse_date(self.date_debut.as_deref())? {
            builder = builder.date_start(start);
        }
        if let Some(end) = parse_date(self.date_fin.as_deref())? {
            builder = builder.date_end(end);
        }
        builder.build()
    }

    /// Time bucket key, defaulting to month
    pub fn time_dimension(&self) -> &str {
        self.time_dimension.as_deref().unwrap_or("mois")
    }
}

/// Dropdown value that selects every member
pub const ALL_SENTINEL: &str = "all";

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<OneOrMany>::deserialize(deserializer)?.map(|v| match v {
        OneOrMany::One(s) => vec![s],
        OneOrMany::Many(v) => v,
    }))
}

fn selected(values: &[String]) -> impl Iterator<Item = String> + '_ {
    values
        .iter()
        .filter(|v| !v.trim().eq_ignore_ascii_case(ALL_SENTINEL))
        .cloned()
}

/// Blank strings count as "not set"
fn parse_date(value: Option<&str>) -> Result<Option<NaiveDate>, FilterError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| FilterError::InvalidDate(s.to_string())),
    }
}
