/// Integration tests for the estimate HTTP API
use arc_swap::ArcSwap;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use coach_fare::{
    config::{BusinessConfig, Config, MetricsConfig, ServerConfig},
    fare::{BusType, FleetEntry, RateTable},
    handlers::AppState,
    server::create_router,
};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use tower::ServiceExt;

fn test_config(rates: [(u32, f64); 3]) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        business: BusinessConfig {
            name: "Dwarkamai Tours and Travels".to_string(),
            phone: "+918999785954".to_string(),
            currency_symbol: "₹".to_string(),
        },
        fleet: rates
            .iter()
            .map(|(seats, _)| FleetEntry {
                seats: BusType::new(*seats),
                label: format!("{} Seater Bus (Non AC)", seats),
            })
            .collect(),
        pricing: RateTable {
            daily_allowance: 2000,
            long_trip_threshold_km: 300.0,
            min_km_per_day: 300.0,
            rates: rates
                .iter()
                .map(|(seats, rate)| (BusType::new(*seats), *rate))
                .collect::<BTreeMap<_, _>>(),
        },
        metrics: MetricsConfig {
            enabled: false,
            endpoint: "/metrics".to_string(),
        },
    }
}

fn app_with(config: Config) -> (Router, Arc<ArcSwap<Config>>) {
    let config = Arc::new(ArcSwap::from_pointee(config));
    (create_router(AppState::new(config.clone()), None), config)
}

fn app() -> Router {
    app_with(test_config([(20, 24.0), (32, 35.0), (44, 45.0)])).0
}

async fn post_estimate(app: Router, body: Value) -> (StatusCode, Value) {
    let request = Request::post("/v1/estimate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_long_single_day_trip_is_priced() {
    let (status, body) = post_estimate(
        app(),
        json!({
            "origin": "Mumbai",
            "destination": "Shirdi",
            "distanceKm": "350",
            "days": "1",
            "busType": "20",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["eligible"], json!(true));
    assert_eq!(body["billableKm"], json!(350.0));
    assert_eq!(body["ratePerKm"], json!(24.0));
    assert_eq!(body["baseCost"], json!(8400));
    assert_eq!(body["dailyAllowanceTotal"], json!(2000));
    assert_eq!(body["total"], json!(10400));
    assert_eq!(body["days"], json!(1));
    assert_eq!(body["busType"], json!("20"));
    assert_eq!(body["contactPhone"], json!("+918999785954"));
}

#[tokio::test]
async fn test_short_single_day_trip_needs_manual_quote() {
    let (status, body) = post_estimate(
        app(),
        json!({
            "origin": "Mumbai",
            "destination": "Lonavala",
            "distanceKm": 150,
            "days": 1,
            "busType": 32,
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["eligible"], json!(false));
    assert_eq!(body["reason"], json!("below-threshold-single-day"));
    assert_eq!(body["dailyAllowanceTotal"], json!(2000));
    assert!(body.get("total").is_none());
    assert!(body["message"].as_str().unwrap().contains("custom quote"));
}

#[tokio::test]
async fn test_multi_day_trip_uses_floor() {
    let (status, body) = post_estimate(
        app(),
        json!({
            "from": "Pune",
            "to": "Nashik",
            "distance": "150",
            "days": "3",
            "busType": "44",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["billableKm"], json!(900.0));
    assert_eq!(body["minKmPerDayApplied"], json!(true));
    assert_eq!(body["baseCost"], json!(40500));
    assert_eq!(body["dailyAllowanceTotal"], json!(6000));
    assert_eq!(body["total"], json!(46500));
}

#[tokio::test]
async fn test_each_invalid_field_gets_its_own_error() {
    let valid = json!({
        "origin": "Mumbai",
        "destination": "Shirdi",
        "distanceKm": "350",
        "days": "1",
        "busType": "20",
    });

    let cases = [
        ("origin", json!("  "), "empty_origin"),
        ("destination", json!(null), "empty_destination"),
        ("distanceKm", json!("-5"), "invalid_distance"),
        ("distanceKm", json!("far"), "invalid_distance"),
        ("days", json!("0"), "invalid_days"),
        ("days", json!(false), "invalid_days"),
        ("busType", json!("50"), "invalid_bus_type"),
    ];

    for (field, value, expected) in cases {
        let mut body = valid.clone();
        body[field] = value;

        let (status, response) = post_estimate(app(), body).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "field {}", field);
        assert_eq!(response["error"]["type"], json!(expected), "field {}", field);
        assert_eq!(response["error"]["field"], json!(field));
    }
}

#[tokio::test]
async fn test_validation_message_is_user_facing() {
    let (_, body) = post_estimate(app(), json!({ "origin": "Mumbai" })).await;
    assert_eq!(
        body["error"]["message"],
        json!("Please enter destination (To).")
    );
}

#[tokio::test]
async fn test_unquotable_distance_is_rejected_as_invalid_distance() {
    let (status, body) = post_estimate(
        app(),
        json!({
            "origin": "Mumbai",
            "destination": "Goa",
            "distanceKm": "1e308",
            "days": 1,
            "busType": 20,
        }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["type"], json!("invalid_distance"));
    assert_eq!(body["error"]["field"], json!("distanceKm"));
    assert!(body.get("total").is_none());
}

#[tokio::test]
async fn test_missing_rate_reports_configuration_error() {
    let mut config = test_config([(20, 24.0), (32, 35.0), (44, 45.0)]);
    config.pricing.rates.remove(&BusType::new(44));
    let (app, _) = app_with(config);

    let (status, body) = post_estimate(
        app,
        json!({
            "origin": "Mumbai",
            "destination": "Goa",
            "distanceKm": 580,
            "days": 2,
            "busType": 44,
        }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["type"], json!("configuration_error"));
}

#[tokio::test]
async fn test_rate_table_swap_takes_effect_without_restart() {
    let (app, config) = app_with(test_config([(20, 24.0), (32, 35.0), (44, 45.0)]));
    let trip = json!({
        "origin": "Mumbai",
        "destination": "Shirdi",
        "distanceKm": 350,
        "days": 1,
        "busType": 20,
    });

    let (_, before) = post_estimate(app.clone(), trip.clone()).await;
    assert_eq!(before["total"], json!(10400));

    config.store(Arc::new(test_config([(20, 250.0), (32, 300.0), (44, 350.0)])));

    let (_, after) = post_estimate(app, trip).await;
    assert_eq!(after["baseCost"], json!(87500));
    assert_eq!(after["total"], json!(89500));
}

#[tokio::test]
async fn test_concurrent_requests_return_identical_quotes() {
    let app = app();
    let trip = json!({
        "origin": "Mumbai",
        "destination": "Kolhapur",
        "distanceKm": "375.5",
        "days": "2",
        "busType": "32",
    });

    let handles: Vec<_> = (0..16)
        .map(|_| tokio::spawn(post_estimate(app.clone(), trip.clone())))
        .collect();

    let mut bodies = Vec::new();
    for handle in handles {
        let (status, body) = handle.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        bodies.push(body);
    }

    assert!(bodies.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(bodies[0]["billableKm"], json!(600.0));
}

#[tokio::test]
async fn test_fleet_lists_price_rules() {
    let request = Request::get("/v1/fleet").body(Body::empty()).unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["dailyAllowance"], json!(2000));
    assert_eq!(body["buses"].as_array().unwrap().len(), 3);
    assert_eq!(body["buses"][0]["busType"], json!("20"));
    assert_eq!(body["buses"][0]["ratePerKm"], json!(24.0));
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let request = Request::post("/v1/estimate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert!(response.status().is_client_error());
}
