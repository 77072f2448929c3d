//! End-to-end tool reports with KMA and Kakao mocked.

use config::Config;
use mountain_weather::{AppConfig, MountainWeather};
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn nowcast(temperature: &str, pty: &str) -> serde_json::Value {
    let item = |category: &str, value: &str| {
        serde_json::json!({ "category": category, "obsrValue": value, "nx": 0, "ny": 0 })
    };
    serde_json::json!({
        "response": {
            "header": { "resultCode": "00", "resultMsg": "NORMAL_SERVICE" },
            "body": { "items": { "item": [
                item("T1H", temperature),
                item("REH", "55"),
                item("WSD", "3.2"),
                item("VEC", "90"),
                item("RN1", "0"),
                item("PTY", pty),
            ]}}
        }
    })
}

fn no_data() -> serde_json::Value {
    serde_json::json!({ "response": { "header": { "resultCode": "03", "resultMsg": "NO_DATA" } } })
}

fn service(server: &MockServer, kakao_key: Option<&str>) -> MountainWeather {
    let config = AppConfig::default()
        .with_kma_api_base(server.uri())
        .with_kakao_api_base(server.uri())
        .with_api_keys(Some("kma-key"), kakao_key);
    MountainWeather::new(config).unwrap()
}

#[tokio::test]
async fn test_mountain_weather_report() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getUltraSrtNcst"))
        .and(query_param("nx", "74"))
        .and(query_param("ny", "78"))
        .respond_with(ResponseTemplate::new(200).set_body_json(nowcast("11.5", "1")))
        .expect(1)
        .mount(&server)
        .await;

    let report = service(&server, None)
        .mountain_weather_report("지리산")
        .await
        .unwrap();

    assert!(report.starts_with("Jirisan (지리산) 1915m - Gyeongsangnam-do"));
    assert!(report.contains("Conditions: Rain"));
    assert!(report.contains("Temperature: 11.5\u{00b0}C"));
    assert!(report.contains("Wind: 3.2 m/s E (90\u{00b0})"));
    assert!(report.contains("grid 74, 78"));
}

#[tokio::test]
async fn test_mountain_weather_upstream_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getUltraSrtNcst"))
        .respond_with(ResponseTemplate::new(200).set_body_json(no_data()))
        .mount(&server)
        .await;

    let err = service(&server, None)
        .mountain_weather_report("Seoraksan")
        .await
        .unwrap_err();
    assert!(err.message.contains("Failed to fetch weather for Seoraksan"));
    assert!(err.message.contains("NO_DATA"));
}

#[tokio::test]
async fn test_region_report_isolates_failures() {
    let server = MockServer::start().await;

    // Seoraksan succeeds, every other cell has no data
    Mock::given(method("GET"))
        .and(path("/getUltraSrtNcst"))
        .and(query_param("nx", "85"))
        .and(query_param("ny", "139"))
        .respond_with(ResponseTemplate::new(200).set_body_json(nowcast("-1.0", "3")))
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/getUltraSrtNcst"))
        .respond_with(ResponseTemplate::new(200).set_body_json(no_data()))
        .with_priority(10)
        .expect(2)
        .mount(&server)
        .await;

    let report = service(&server, None)
        .region_weather_report(Some("gangwon-DO"))
        .await
        .unwrap();

    assert!(report.starts_with("Mountain Weather (Gangwon-do):"));
    assert!(report.contains("Seoraksan (설악산)"));
    assert!(report.contains("Conditions: Snow"));
    assert_eq!(report.matches("Error: KMA API error 03: NO_DATA").count(), 2);
    assert!(!report.contains("Jirisan"));
}

#[tokio::test]
async fn test_location_weather_includes_place_name() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getUltraSrtNcst"))
        .and(query_param("nx", "60"))
        .and(query_param("ny", "127"))
        .respond_with(ResponseTemplate::new(200).set_body_json(nowcast("18.0", "0")))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/local/geo/coord2address.json"))
        .and(query_param("x", "126.978"))
        .and(query_param("y", "37.5665"))
        .and(header("Authorization", "KakaoAK kakao-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "meta": { "total_count": 1 },
            "documents": [ { "address": {
                "region_1depth_name": "서울",
                "region_2depth_name": "중구"
            } } ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let report = service(&server, Some("kakao-key"))
        .location_weather_report(37.5665, 126.978)
        .await
        .unwrap();

    assert!(report.starts_with("서울 중구\n"));
    assert!(report.contains("Conditions: Clear"));
    assert!(report.contains("grid 60, 127"));
}

#[tokio::test]
async fn test_location_weather_survives_geocoder_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getUltraSrtNcst"))
        .respond_with(ResponseTemplate::new(200).set_body_json(nowcast("18.0", "0")))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/local/geo/coord2address.json"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let report = service(&server, Some("bad-key"))
        .location_weather_report(37.5665, 126.978)
        .await
        .unwrap();

    assert!(report.starts_with("Location unavailable\n"));
    assert!(report.contains("Temperature: 18.0\u{00b0}C"));
}

#[tokio::test]
async fn test_location_weather_with_no_address() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getUltraSrtNcst"))
        .respond_with(ResponseTemplate::new(200).set_body_json(nowcast("18.0", "0")))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/local/geo/coord2address.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "documents": [] })),
        )
        .mount(&server)
        .await;

    let report = service(&server, Some("kakao-key"))
        .location_weather_report(34.0, 130.0)
        .await
        .unwrap();

    assert!(report.starts_with("Unknown location\n"));
}

#[tokio::test]
async fn test_unreachable_kma_does_not_leak_service_key() {
    let config = AppConfig::default()
        .with_kma_api_base("http://127.0.0.1:1")
        .with_api_keys(Some("SUPERSECRETKEY"), None);
    let service = MountainWeather::new(config).unwrap();

    let err = service
        .mountain_weather_report("Seoraksan")
        .await
        .unwrap_err();
    assert!(err.message.contains("Failed to fetch weather for Seoraksan"));
    assert!(!err.message.contains("SUPERSECRETKEY"), "{}", err.message);

    let report = service.region_weather_report(Some("Jeju-do")).await.unwrap();
    assert!(report.contains("Error: Network error"));
    assert!(!report.contains("SUPERSECRETKEY"), "{report}");
}

#[tokio::test]
async fn test_configured_timeout_bounds_slow_kma() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getUltraSrtNcst"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(nowcast("5.0", "0"))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let builder = Config::builder()
        .set_override("kma_api_key", "kma-key")
        .unwrap()
        .set_override("kma_api_base", server.uri())
        .unwrap()
        .set_override("request_timeout_secs", 1)
        .unwrap();
    let config = AppConfig::from_builder(builder).unwrap();
    let service = MountainWeather::new(config).unwrap();

    let err = service
        .mountain_weather_report("Hallasan")
        .await
        .unwrap_err();
    assert!(
        err.message
            .contains("Failed to fetch weather for Hallasan: Network error"),
        "{}",
        err.message
    );
}
