use chrono::{DateTime, Utc};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use redash_client::client::{Client, Config};
use redash_client::newtypes::{DataSourceId, QueryId, UserId};

const API_KEY: &str = "ApIkEyApIkEyApIkEyApIkEyApIkEy";

fn client(server: &MockServer) -> Client {
    Client::new(Config {
        base_url: server.uri(),
        api_key: API_KEY.to_string(),
        strict: false,
    })
    .unwrap()
}

fn timestamp(value: &str) -> DateTime<Utc> {
    value.parse().unwrap()
}

#[tokio::test]
async fn list_queries_decodes_the_page_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/queries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 3,
            "page": 1,
            "page_size": 10,
            "results": [
                {"id": 1, "name": "Daily Active Users", "query": "SELECT 1 + 1;",
                 "is_draft": false, "tags": ["kpi"]},
                {"id": 2, "name": "Weekly Signups", "query": "SELECT 2;",
                 "is_draft": true},
                {"id": 3, "name": "Revenue", "query": "SELECT 3;",
                 "schedule": {"interval": 86400, "time": "07:00"}},
            ],
        })))
        .mount(&server)
        .await;

    let page = client(&server).list_queries().await.unwrap();

    assert_eq!(page.count, 3);
    assert_eq!(page.page, 1);
    assert_eq!(page.page_size, 10);
    assert_eq!(page.results.len(), 3);
    assert_eq!(page.results[0].tags, vec!["kpi".to_string()]);
    assert!(page.results[1].is_draft);
    let schedule = page.results[2].schedule.as_ref().unwrap();
    assert_eq!(schedule.interval, Some(86400));
    assert_eq!(schedule.time.as_deref(), Some("07:00"));
}

#[tokio::test]
async fn get_query_decodes_nested_structures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/queries/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "name": "Daily Active Users",
            "description": "Service X DAU",
            "query": "SELECT 1 + 1;",
            "query_hash": "ec2fda0cc5a54b38f81744fcad43ce5a",
            "version": 1,
            "schedule": null,
            "is_archived": false,
            "is_draft": false,
            "is_safe": true,
            "is_favorite": false,
            "can_edit": false,
            "data_source_id": 2,
            "updated_at": "2021-11-07T22:22:34.929Z",
            "created_at": "2021-08-13T23:29:12.743Z",
            "user": {"id": 1, "name": "Admin", "email": "admin@example.com"},
            "last_modified_by": {"id": 2, "name": "Developer", "email": "developer@example.com"},
            "options": {
                "parameters": [
                    {"name": "date_range", "title": "Date Range", "type": "date-range",
                     "value": ["2021-01-01", "2021-12-31"]},
                ],
            },
            "visualizations": [
                {"id": 1, "type": "TABLE", "name": "Table", "options": {}},
                {"id": 2, "type": "CHART", "name": "DAU", "options": {
                    "global_series_type": "line",
                    "sort_x": true,
                    "legend": {"enabled": true, "placement": "auto"},
                    "y_axis": [{"type": "linear"}, {"type": "linear", "opposite": true}],
                    "x_axis": {"type": "datetime", "labels": {"enabled": true}},
                }},
            ],
        })))
        .mount(&server)
        .await;

    let query = client(&server).get_query(QueryId::new(1)).await.unwrap();

    assert_eq!(query.id, QueryId::new(1));
    assert_eq!(query.name, "Daily Active Users");
    assert_eq!(query.description.as_deref(), Some("Service X DAU"));
    assert_eq!(query.query, "SELECT 1 + 1;");
    assert_eq!(
        query.query_hash.as_deref(),
        Some("ec2fda0cc5a54b38f81744fcad43ce5a")
    );
    assert_eq!(query.version, Some(1));
    assert!(query.is_safe);
    assert!(!query.is_archived);
    assert_eq!(query.data_source_id, Some(DataSourceId::new(2)));
    assert_eq!(
        query.updated_at,
        Some(timestamp("2021-11-07T22:22:34.929Z"))
    );
    assert_eq!(
        query.created_at,
        Some(timestamp("2021-08-13T23:29:12.743Z"))
    );

    let user = query.user.as_ref().unwrap();
    assert_eq!(user.id, UserId::new(1));
    assert_eq!(user.name, "Admin");
    let editor = query.last_modified_by.as_ref().unwrap();
    assert_eq!(editor.id, UserId::new(2));
    assert_eq!(editor.name, "Developer");

    let parameter = &query.options.parameters[0];
    assert_eq!(parameter.name, "date_range");
    assert_eq!(parameter.kind.as_deref(), Some("date-range"));
    assert_eq!(parameter.value, Some(json!(["2021-01-01", "2021-12-31"])));

    assert_eq!(query.visualizations.len(), 2);
    assert_eq!(query.visualizations[0].kind, "TABLE");
    assert_eq!(query.visualizations[0].name, "Table");
    let chart = &query.visualizations[1];
    assert_eq!(chart.kind, "CHART");
    assert_eq!(chart.name, "DAU");
    assert_eq!(chart.options.global_series_type.as_deref(), Some("line"));
    assert_eq!(chart.options.y_axis.len(), 2);
    assert!(chart.options.y_axis[1].opposite);
    let legend = chart.options.legend.as_ref().unwrap();
    assert!(legend.enabled);
    assert_eq!(legend.placement.as_deref(), Some("auto"));
}
