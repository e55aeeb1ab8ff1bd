//! End-to-end toggle scenarios: federation client against wiremock, driven
//! through the controller into the headless map surface.

use clubmap_core::{LatLng, ToggleEvent};
use clubmap_fff::FffClient;
use clubmap_overlay::{
    ErrorListHtml, GeoJsonMap, OverlayRegistry, ToggleController, ToggleOutcome,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

type Controller = ToggleController<FffClient, GeoJsonMap, ErrorListHtml>;

fn controller(server: &MockServer) -> Controller {
    let client = FffClient::with_base_url(&format!("{}/api", server.uri()), 30, "clubmap-test/0.1")
        .expect("client construction should not fail");
    ToggleController::new(
        client,
        OverlayRegistry::new(GeoJsonMap::new(), "https://cdn.example/logos"),
        ErrorListHtml::new(),
    )
}

async fn mount_championship(server: &MockServer, club: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/compets/101/phases/1/poules.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!([{ "stage_number": 1 }])),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/engagements.json"))
        .and(query_param("competition.cp_no", "101"))
        .and(query_param("poule.gp_no", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "equipe": { "club": { "cl_no": 7 } },
                "competition": { "name": "Regional 1" }
            }
        ])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/clubs/7.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(club))
        .mount(server)
        .await;
}

#[tokio::test]
async fn toggling_on_places_the_engaged_club() {
    let server = MockServer::start().await;
    mount_championship(
        &server,
        serde_json::json!({
            "cl_no": 7,
            "name": "Club C",
            "latitude": 45.0,
            "longitude": 2.0,
            "affiliation_number": 500_007
        }),
    )
    .await;
    let controller = controller(&server);

    let outcome = controller.handle(ToggleEvent::enabled("101")).await;

    assert_eq!(outcome, ToggleOutcome::Activated { placed: 1, failed: 0 });
    controller
        .with_registry(|reg| {
            assert_eq!(reg.markers().len(), 1);
            assert_eq!(reg.markers()[0].championship_id, "101");
            assert_eq!(reg.markers()[0].position, LatLng::new(45.0, 2.0));
            assert!(reg.errors().is_empty());

            let fc = reg.map().to_feature_collection(None);
            let properties = &fc["features"][0]["properties"];
            assert_eq!(properties["popup"], "<b>Club C</b><br>Regional 1<br>");
            assert_eq!(
                properties["icon"]["url"],
                "https://cdn.example/logos/BC500007.jpg"
            );
        })
        .await;
}

#[tokio::test]
async fn toggling_on_a_club_without_coordinates_lists_a_failure() {
    let server = MockServer::start().await;
    mount_championship(
        &server,
        serde_json::json!({ "cl_no": 7, "name": "Club C", "latitude": 0, "longitude": 0 }),
    )
    .await;
    let controller = controller(&server);

    controller.handle(ToggleEvent::enabled("101")).await;

    controller
        .with_registry(|reg| {
            assert!(reg.markers().is_empty());
            assert_eq!(reg.errors().len(), 1);
            assert_eq!(reg.errors()[0].club.name, "Club C");
            assert_eq!(reg.errors()[0].championship.id, "101");
        })
        .await;
    let html = controller
        .with_error_surface(|s| s.html().to_string())
        .await;
    assert_eq!(html, "<li>cannot load coordinates for: Club C (Regional 1)</li>");
}

#[tokio::test]
async fn toggling_on_then_off_empties_the_overlay() {
    let server = MockServer::start().await;
    mount_championship(
        &server,
        serde_json::json!({ "cl_no": 7, "name": "Club C", "latitude": 45.0, "longitude": 2.0 }),
    )
    .await;
    let controller = controller(&server);

    controller.handle(ToggleEvent::enabled("101")).await;
    let outcome = controller.handle(ToggleEvent::disabled("101")).await;

    assert_eq!(outcome, ToggleOutcome::Deactivated { removed: 1 });
    controller
        .with_registry(|reg| {
            assert!(reg.markers().is_empty());
            assert!(reg.errors().is_empty());
            assert!(reg.map().is_empty());
        })
        .await;
}

#[tokio::test]
async fn failed_club_fetch_is_skipped_not_listed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/compets/101/phases/1/poules.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!([{ "stage_number": 1 }])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/engagements.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "equipe": { "club": { "cl_no": 7 } }, "competition": { "name": "Regional 1" } }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/clubs/7.json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let controller = controller(&server);
    let outcome = controller.handle(ToggleEvent::enabled("101")).await;

    assert_eq!(outcome, ToggleOutcome::Activated { placed: 0, failed: 0 });
    assert!(controller.with_error_surface(|s| s.lines().is_empty()).await);
}

#[tokio::test]
async fn partial_gateway_failures_keep_the_rest_of_the_batch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/compets/101/phases/1/poules.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "stage_number": 1 },
            { "stage_number": 2 }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/engagements.json"))
        .and(query_param("poule.gp_no", "1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/engagements.json"))
        .and(query_param("poule.gp_no", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "equipe": { "club": { "cl_no": 7 } }, "competition": { "name": "Regional 1" } },
            { "equipe": { "club": { "cl_no": 8 } }, "competition": { "name": "Regional 1" } },
            { "equipe": { "club": { "cl_no": "9" } }, "competition": { "name": "Regional 1" } }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/clubs/7.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "cl_no": 7, "name": "Club A", "latitude": 45.0, "longitude": 2.0
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/clubs/8.json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/clubs/9.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "cl_no": 9, "name": "Club B", "latitude": 46.0, "longitude": 3.0
        })))
        .mount(&server)
        .await;

    let controller = controller(&server);
    let outcome = controller.handle(ToggleEvent::enabled("101")).await;

    assert_eq!(outcome, ToggleOutcome::Activated { placed: 2, failed: 0 });
    controller
        .with_registry(|reg| {
            let clubs: Vec<u64> = reg.markers().iter().map(|m| m.club_id).collect();
            assert_eq!(clubs, vec![7, 9]);
            assert_eq!(reg.markers()[1].position, LatLng::new(46.0, 3.0));
            assert!(reg.errors().is_empty());
        })
        .await;
    assert!(controller.with_error_surface(|s| s.lines().is_empty()).await);
}
