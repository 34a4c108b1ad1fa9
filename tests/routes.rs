mod common;

use axum::http::{Method, StatusCode};
use common::{send, Galaxy, Planet, PlanetTag, Tag};
use crud_scaffold::{
    AppState, BaseMethod, Children, ChildrenMethod, CrudRouter, Methods, Parent, ParentMethod, Siblings, Verb,
};

fn paths(crud: &CrudRouter) -> Vec<(Verb, String)> {
    crud.routes()
        .entries()
        .iter()
        .map(|e| (e.verb, e.path.clone()))
        .collect()
}

#[test]
fn default_registration_binds_five_routes() {
    let mut crud = CrudRouter::new();
    crud.register::<Planet>();
    assert_eq!(
        paths(&crud),
        vec![
            (Verb::Get, "/planet/:planetID".to_string()),
            (Verb::Get, "/planet".to_string()),
            (Verb::Post, "/planet".to_string()),
            (Verb::Put, "/planet/:planetID".to_string()),
            (Verb::Delete, "/planet/:planetID".to_string()),
        ]
    );
}

#[test]
fn only_and_except_narrow_the_set() {
    let mut only = CrudRouter::new();
    only.crud::<Planet>(Methods::only([BaseMethod::Create, BaseMethod::Delete]), |_| {});
    assert_eq!(only.routes().len(), 2);
    assert!(only.routes().contains(Verb::Post, "/planet"));
    assert!(only.routes().contains(Verb::Delete, "/planet/:planetID"));

    let mut except = CrudRouter::new();
    except.crud::<Planet>(Methods::except([BaseMethod::Delete]), |_| {});
    assert_eq!(except.routes().len(), 4);
    assert!(!except.routes().contains(Verb::Delete, "/planet/:planetID"));
}

#[test]
fn empty_selection_binds_nothing() {
    let mut crud = CrudRouter::new();
    crud.crud::<Planet>(Methods::Only(vec![]), |_| {});
    assert!(crud.routes().is_empty());
}

#[test]
fn children_nest_under_the_parent_id_path() {
    let mut crud = CrudRouter::new();
    crud.crud::<Galaxy>(Methods::All, |galaxy| {
        assert_eq!(galaxy.id_path().render(), "/galaxy/:galaxyID");
        galaxy.children(
            Children::<Galaxy, Planet>::new("galaxy_id"),
            Methods::except([ChildrenMethod::Delete]),
            |_| {},
        );
    });
    let nested: Vec<_> = crud.routes().under("/galaxy/:galaxyID/planet").collect();
    assert_eq!(nested.len(), 4);
    assert!(crud.routes().contains(Verb::Get, "/galaxy/:galaxyID/planet"));
    assert!(crud.routes().contains(Verb::Post, "/galaxy/:galaxyID/planet"));
    assert!(crud.routes().contains(Verb::Get, "/galaxy/:galaxyID/planet/:planetID"));
    assert!(crud.routes().contains(Verb::Put, "/galaxy/:galaxyID/planet/:planetID"));
    assert_eq!(crud.routes().len(), 9);
}

#[test]
fn parent_binds_read_and_update_without_its_own_id() {
    let mut crud = CrudRouter::new();
    crud.crud::<Planet>(Methods::Only(vec![]), |planet| {
        planet.parent(Parent::<Planet, Galaxy>::new("galaxy_id"), Methods::All, |galaxy| {
            assert_eq!(galaxy.id_path().render(), "/planet/:planetID/galaxy/:galaxyID");
        });
    });
    assert_eq!(
        paths(&crud),
        vec![
            (Verb::Get, "/planet/:planetID/galaxy".to_string()),
            (Verb::Put, "/planet/:planetID/galaxy".to_string()),
        ]
    );

    let mut read_only = CrudRouter::new();
    read_only.crud::<Planet>(Methods::Only(vec![]), |planet| {
        planet.parent(
            Parent::<Planet, Galaxy>::new("galaxy_id"),
            Methods::only([ParentMethod::Read]),
            |_| {},
        );
    });
    assert_eq!(read_only.routes().len(), 1);
}

#[test]
fn relations_nest_recursively() {
    let mut crud = CrudRouter::with_base(&["api", "v1"]);
    crud.crud::<Galaxy>(Methods::Only(vec![]), |galaxy| {
        galaxy.children(Children::<Galaxy, Planet>::new("galaxy_id"), Methods::Only(vec![]), |planet| {
            planet.siblings(
                Siblings::<Planet, Tag, PlanetTag>::left(),
                Methods::only([crud_scaffold::SiblingsMethod::ReadAll]),
                |_| {},
            );
        });
    });
    assert_eq!(
        paths(&crud),
        vec![(Verb::Get, "/api/v1/galaxy/:galaxyID/planet/:planetID/tag".to_string())]
    );
}

#[tokio::test]
async fn unselected_method_is_not_routed() {
    let mut crud = CrudRouter::new();
    crud.crud::<Planet>(Methods::only([BaseMethod::ReadAll]), |_| {});
    let app = crud.into_router(AppState::memory());

    let (status, _) = send(&app, Method::GET, "/planet", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::POST, "/planet", Some(serde_json::json!({"name": "Mars"}))).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    let (status, _) = send(&app, Method::GET, "/planet/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
