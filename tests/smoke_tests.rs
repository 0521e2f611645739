//! End-to-end flow for one city across every domain.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

use common::{forecast, forecast_path, mount_geocode, seattle_geocode, test_config};

async fn get(app: &Router, uri: &str) -> Value {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK, "{uri}");
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

async fn mount_once(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn seattle_across_all_domains() {
    let server = MockServer::start().await;
    mount_geocode(&server, "seattle", seattle_geocode(), 1).await;

    mount_once(
        &server,
        &forecast_path(),
        forecast(&[
            (1_547_424_000, "Rain."),
            (1_547_510_400, "Drizzle."),
            (1_547_596_800, "Overcast."),
        ]),
    )
    .await;
    mount_once(
        &server,
        "/v3/businesses/search",
        json!({ "businesses": [
            { "name": "Paseo", "image_url": null, "price": "$", "rating": 4.0, "url": null }
        ]}),
    )
    .await;
    mount_once(
        &server,
        "/3/search/movie",
        json!({ "results": [
            { "title": "Sleepless in Seattle", "poster_path": "/poster.jpg", "vote_count": 10 }
        ]}),
    )
    .await;
    mount_once(
        &server,
        "/find/groups",
        json!([
            {
                "link": "https://www.meetup.com/seattle-rust/",
                "name": "Seattle Rust User Group",
                "created": 1_551_787_200,
                "organizer": { "name": "Ferris" }
            }
        ]),
    )
    .await;
    mount_once(
        &server,
        "/data/get-trails",
        json!({ "trails": [
            { "name": "Rattlesnake Ledge", "conditionDate": "2019-01-14 18:47:36" }
        ]}),
    )
    .await;

    let state = city_explorer::api::create_app_state_from_config(
        test_config(&server, "smoke"),
        None,
    )
    .await
    .expect("failed to create app state");
    let app = city_explorer::api::router(state.clone());

    let location = get(&app, "/location?data=seattle").await;
    assert_eq!(location["formatted_query"], "Seattle, WA, USA");

    // Each domain twice: the second round must come from the store.
    for _ in 0..2 {
        let weather = get(&app, "/weather?data=seattle").await;
        let weather = weather.as_array().unwrap();
        assert_eq!(weather.len(), 3);
        assert!(
            weather
                .iter()
                .all(|day| day["created_time"] == weather[0]["created_time"])
        );
        assert_eq!(weather[2]["forecast"], "Overcast.");

        let yelp = get(&app, "/yelp?data=seattle").await;
        assert_eq!(yelp[0]["name"], "Paseo");

        let movies = get(&app, "/movies?data=seattle").await;
        assert_eq!(movies[0]["title"], "Sleepless in Seattle");
        assert_eq!(movies[0]["total_votes"], 10);

        let meetups = get(&app, "/meetups?data=seattle").await;
        assert_eq!(meetups[0]["host"], "Ferris");
        assert_eq!(meetups[0]["creation_date"], "Tue Mar 05 2019");

        let trails = get(&app, "/trails?data=seattle").await;
        assert_eq!(trails[0]["condition_time"], "Mon Jan 14 2019");
    }

    assert_eq!(state.store().count_locations().await.unwrap(), 1);
}
