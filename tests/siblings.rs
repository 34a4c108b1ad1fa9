mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{delete, get, post, put, stored, Planet, PlanetTag, Tag};
use crud_scaffold::{AppState, CrudRouter, Methods, SiblingDelete, Siblings};
use serde_json::json;

fn app(policy: SiblingDelete) -> (Router, AppState) {
    let state = AppState::memory();
    let mut crud = CrudRouter::new();
    crud.crud::<Planet>(Methods::All, |planet| {
        planet.siblings(
            Siblings::<Planet, Tag, PlanetTag>::left().on_delete(policy),
            Methods::All,
            |_| {},
        );
    });
    crud.crud::<Tag>(Methods::All, |tag| {
        tag.siblings(Siblings::<Tag, Planet, PlanetTag>::right(), Methods::All, |_| {});
    });
    (crud.into_router(state.clone()), state)
}

async fn planet(app: &Router, name: &str) -> i64 {
    let (_, body) = post(app, "/planet", json!({"name": name})).await;
    body["data"]["id"].as_i64().unwrap()
}

async fn attach_new_tag(app: &Router, planet: i64, name: &str) -> String {
    let (status, body) = post(app, &format!("/planet/{}/tag", planet), json!({"name": name})).await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn attach_list_read_and_detach() {
    let (app, state) = app(SiblingDelete::ById);
    let mars = planet(&app, "Mars").await;
    let red = attach_new_tag(&app, mars, "red").await;
    let dusty = attach_new_tag(&app, mars, "dusty").await;

    let (status, body) = get(&app, &format!("/planet/{}/tag", mars)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["count"], 2);
    assert_eq!(stored::<PlanetTag>(&state).await.len(), 2);

    let (status, body) = get(&app, &format!("/planet/{}/tag/{}", mars, red)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "red");

    let (status, _) = delete(&app, &format!("/planet/{}/tag/{}", mars, red)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = get(&app, &format!("/planet/{}/tag/{}", mars, red)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = get(&app, &format!("/planet/{}/tag", mars)).await;
    assert_eq!(body["meta"]["count"], 1);
    assert_eq!(body["data"][0]["id"], dusty.as_str());
    let links = stored::<PlanetTag>(&state).await;
    assert_eq!(links.len(), 1);
    assert_eq!(links[0]["tag_id"], dusty.as_str());
    assert_eq!(stored::<Tag>(&state).await.len(), 1);
}

#[tokio::test]
async fn attaching_an_existing_record_only_adds_the_link() {
    let (app, state) = app(SiblingDelete::ById);
    let mars = planet(&app, "Mars").await;
    let venus = planet(&app, "Venus").await;
    let rocky = attach_new_tag(&app, mars, "rocky").await;

    let uri = format!("/planet/{}/tag", venus);
    let (status, body) = post(&app, &uri, json!({"id": rocky, "name": "ignored"})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["name"], "rocky");
    post(&app, &uri, json!({"id": rocky, "name": "rocky"})).await;

    assert_eq!(stored::<Tag>(&state).await.len(), 1);
    assert_eq!(stored::<PlanetTag>(&state).await.len(), 2);
    let (_, body) = get(&app, &format!("/tag/{}/planet", rocky)).await;
    assert_eq!(body["meta"]["count"], 2);
}

#[tokio::test]
async fn right_side_links_with_pivot_columns_in_order() {
    let (app, state) = app(SiblingDelete::ById);
    let (_, body) = post(&app, "/tag", json!({"name": "gas giant"})).await;
    let giant = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = post(&app, &format!("/tag/{}/planet", giant), json!({"name": "Jupiter"})).await;
    assert_eq!(status, StatusCode::CREATED);
    let jupiter = body["data"]["id"].as_i64().unwrap();

    let links = stored::<PlanetTag>(&state).await;
    assert_eq!(links.len(), 1);
    assert_eq!(links[0]["planet_id"], jupiter);
    assert_eq!(links[0]["tag_id"], giant.as_str());

    let (_, body) = get(&app, &format!("/planet/{}/tag", jupiter)).await;
    assert_eq!(body["data"][0]["name"], "gas giant");
}

#[tokio::test]
async fn first_attached_policy_deletes_the_first_link_whatever_the_path_says() {
    let (app, state) = app(SiblingDelete::FirstAttached);
    let mars = planet(&app, "Mars").await;
    let first = attach_new_tag(&app, mars, "first").await;
    let second = attach_new_tag(&app, mars, "second").await;

    let (status, _) = delete(&app, &format!("/planet/{}/tag/{}", mars, second)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = get(&app, &format!("/planet/{}/tag", mars)).await;
    assert_eq!(body["meta"]["count"], 1);
    assert_eq!(body["data"][0]["id"], second.as_str());
    let (status, _) = get(&app, &format!("/tag/{}", first)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(stored::<PlanetTag>(&state).await.len(), 1);
}

#[tokio::test]
async fn by_id_policy_rejects_unattached_siblings() {
    let (app, state) = app(SiblingDelete::ById);
    let mars = planet(&app, "Mars").await;
    let earth = planet(&app, "Earth").await;
    attach_new_tag(&app, mars, "red").await;
    let blue = attach_new_tag(&app, earth, "blue").await;

    let (status, _) = delete(&app, &format!("/planet/{}/tag/{}", mars, blue)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(stored::<Tag>(&state).await.len(), 2);
    assert_eq!(stored::<PlanetTag>(&state).await.len(), 2);
}

#[tokio::test]
async fn unattached_sibling_cannot_be_read_or_updated() {
    let (app, state) = app(SiblingDelete::ById);
    let mars = planet(&app, "Mars").await;
    let (_, body) = post(&app, "/tag", json!({"name": "loose"})).await;
    let loose = body["data"]["id"].as_str().unwrap().to_string();

    let uri = format!("/planet/{}/tag/{}", mars, loose);
    assert_eq!(get(&app, &uri).await.0, StatusCode::NOT_FOUND);
    assert_eq!(put(&app, &uri, json!({"name": "renamed"})).await.0, StatusCode::NOT_FOUND);
    assert_eq!(stored::<Tag>(&state).await[0]["name"], "loose");
}

#[tokio::test]
async fn attached_sibling_update_keeps_its_id() {
    let (app, _) = app(SiblingDelete::ById);
    let mars = planet(&app, "Mars").await;
    let red = attach_new_tag(&app, mars, "red").await;

    let (status, body) = put(&app, &format!("/planet/{}/tag/{}", mars, red), json!({"name": "crimson"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], red.as_str());
    assert_eq!(body["data"]["name"], "crimson");
}

#[tokio::test]
async fn missing_base_and_malformed_ids() {
    let (app, _) = app(SiblingDelete::ById);
    assert_eq!(get(&app, "/planet/5/tag").await.0, StatusCode::NOT_FOUND);
    assert_eq!(
        post(&app, "/planet/5/tag", json!({"name": "orphan"})).await.0,
        StatusCode::NOT_FOUND
    );
    let mars = planet(&app, "Mars").await;
    let (status, body) = get(&app, &format!("/planet/{}/tag/not-a-uuid", mars)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");
}

#[tokio::test]
async fn deleting_a_shared_sibling_removes_every_link_to_it() {
    let (app, state) = app(SiblingDelete::ById);
    let mars = planet(&app, "Mars").await;
    let venus = planet(&app, "Venus").await;
    let rocky = attach_new_tag(&app, mars, "rocky").await;
    post(&app, &format!("/planet/{}/tag", venus), json!({"id": rocky, "name": "rocky"})).await;
    let hot = attach_new_tag(&app, venus, "hot").await;
    assert_eq!(stored::<PlanetTag>(&state).await.len(), 3);

    let (status, _) = delete(&app, &format!("/planet/{}/tag/{}", mars, rocky)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let links = stored::<PlanetTag>(&state).await;
    assert_eq!(links.len(), 1);
    assert_eq!(links[0]["tag_id"], hot.as_str());
    let (_, body) = get(&app, &format!("/planet/{}/tag", venus)).await;
    assert_eq!(body["meta"]["count"], 1);
    assert_eq!(body["data"][0]["name"], "hot");
    let (status, _) = get(&app, &format!("/planet/{}/tag/{}", venus, rocky)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
