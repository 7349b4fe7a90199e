use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::client::Client;
use crate::newtypes::{DataSourceId, QueryId, UserId};
use crate::users::User;
use crate::{Error, Page};

#[derive(Clone, Debug, Deserialize)]
pub struct Query {
    pub id: QueryId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub query_hash: Option<String>,
    #[serde(default)]
    pub version: Option<i64>,
    #[serde(default)]
    pub schedule: Option<QuerySchedule>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default)]
    pub is_draft: bool,
    #[serde(default)]
    pub is_safe: bool,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub can_edit: bool,
    #[serde(default)]
    pub data_source_id: Option<DataSourceId>,
    #[serde(default)]
    pub latest_query_data_id: Option<i64>,
    #[serde(default)]
    pub last_modified_by_id: Option<UserId>,
    #[serde(default)]
    pub runtime: Option<f64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub retrieved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub last_modified_by: Option<User>,
    #[serde(default)]
    pub options: QueryOptions,
    #[serde(default)]
    pub visualizations: Vec<Visualization>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct QuerySchedule {
    /// Seconds between runs.
    #[serde(default)]
    pub interval: Option<i64>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub day_of_week: Option<String>,
    #[serde(default)]
    pub until: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct QueryOptions {
    #[serde(default)]
    pub parameters: Vec<QueryParameter>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct QueryParameter {
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub enum_options: Option<String>,
    #[serde(default)]
    pub locals: Vec<Value>,
    /// Strings for text parameters, arrays for date ranges.
    #[serde(default)]
    pub value: Option<Value>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Visualization {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub options: VisualizationOptions,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct VisualizationOptions {
    #[serde(default)]
    pub global_series_type: Option<String>,
    #[serde(default)]
    pub sort_x: Option<bool>,
    #[serde(default)]
    pub legend: Option<LegendOptions>,
    #[serde(default)]
    pub y_axis: Vec<AxisOptions>,
    #[serde(default)]
    pub x_axis: Option<AxisOptions>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LegendOptions {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub placement: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AxisOptions {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub opposite: bool,
    #[serde(default)]
    pub labels: Option<AxisLabels>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AxisLabels {
    #[serde(default)]
    pub enabled: bool,
}

impl Client {
    /// Returns one page of queries.
    pub async fn list_queries(&self) -> Result<Page<Query>, Error> {
        self.get_json("/api/queries", &[]).await
    }

    pub async fn get_query(&self, id: QueryId) -> Result<Query, Error> {
        self.get_json(&format!("/api/queries/{id}"), &[]).await
    }
}
