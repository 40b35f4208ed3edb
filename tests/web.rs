//! Browser tests for the JS-facing API.
//!
//! Run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use js_sys::{Object, Reflect};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

use taxonomy_graph_wasm::TaxonomyGraphWasm;

wasm_bindgen_test_configure!(run_in_browser);

fn object(entries: &[(&str, JsValue)]) -> JsValue {
    let object = Object::new();
    for (key, value) in entries {
        Reflect::set(&object, &JsValue::from_str(key), value).unwrap();
    }
    object.into()
}

fn array(items: Vec<JsValue>) -> JsValue {
    items.into_iter().collect::<js_sys::Array>().into()
}

fn leaf(id: &str, name: &str) -> JsValue {
    object(&[("id", id.into()), ("name", name.into())])
}

fn taxonomy() -> JsValue {
    object(&[
        ("id", "git".into()),
        ("name", "Git".into()),
        (
            "children",
            array(vec![
                object(&[
                    ("id", "branches".into()),
                    ("name", "Branches".into()),
                    ("description", "Movable pointers".into()),
                    ("children", array(vec![leaf("rebase", "Rebase"), leaf("merge", "Merge")])),
                ]),
                leaf("remotes", "Remotes"),
            ]),
        ),
    ])
}

fn get(value: &JsValue, key: &str) -> JsValue {
    Reflect::get(value, &JsValue::from_str(key)).unwrap()
}

fn length(value: &JsValue) -> u32 {
    get(value, "length").as_f64().unwrap() as u32
}

#[wasm_bindgen_test]
fn test_frame_is_plain_object() {
    let mut graph = TaxonomyGraphWasm::new(taxonomy()).unwrap();
    graph.resize(1024.0, 768.0);

    let frame = graph.frame().unwrap();
    let nodes = get(&frame, "nodes");
    assert_eq!(length(&nodes), 3);
    let root = Reflect::get_u32(&nodes, 0).unwrap();
    assert_eq!(get(&root, "id").as_string().as_deref(), Some("git"));
    assert_eq!(length(&get(&frame, "links")), 2);
}

#[wasm_bindgen_test]
fn test_click_expands_and_selects() {
    let mut graph = TaxonomyGraphWasm::new(taxonomy()).unwrap();
    graph.resize(1024.0, 768.0);

    graph.node_click("branches".into()).unwrap();
    assert!(graph.is_expanded("branches"));
    let selection = graph.selection().unwrap();
    assert_eq!(get(&selection, "name").as_string().as_deref(), Some("Branches"));
    assert_eq!(
        get(&selection, "kindLabel").as_string().as_deref(),
        Some("has sub-concepts")
    );
    assert_eq!(graph.screen_positions().unwrap().length(), 10);
}

#[wasm_bindgen_test]
fn test_dispatch_event_objects() {
    let mut graph = TaxonomyGraphWasm::new(taxonomy()).unwrap();
    graph.resize(1024.0, 768.0);
    graph.frame().unwrap();
    let fitted = graph.scale();

    graph
        .dispatch(object(&[("type", "wheel".into()), ("deltaY", 120.0.into())]))
        .unwrap();
    assert!((graph.scale() - (fitted - 0.1).max(0.3)).abs() < 1e-9);

    assert!(graph.dispatch(object(&[("type", "teleport".into())])).is_err());
}

#[wasm_bindgen_test]
fn test_select_unknown_taxonomy_shows_placeholder() {
    let mut graph = TaxonomyGraphWasm::new(taxonomy()).unwrap();
    graph.register_taxonomy("git", taxonomy()).unwrap();
    assert_eq!(graph.taxonomy_keys(), ["git"]);

    assert!(!graph.select_taxonomy("git").unwrap());
    assert!(graph.select_taxonomy("svn").unwrap());
    let frame = graph.frame().unwrap();
    let root = Reflect::get_u32(&get(&frame, "nodes"), 0).unwrap();
    assert_eq!(get(&root, "name").as_string().as_deref(), Some("No Data"));
}

#[wasm_bindgen_test]
fn test_duplicate_ids_rejected() {
    let tree = object(&[
        ("id", "a".into()),
        ("name", "A".into()),
        ("children", array(vec![leaf("a", "Again")])),
    ]);
    assert!(TaxonomyGraphWasm::new(tree).is_err());
}
