// Browser test: wasm-pack test --headless --firefox -- --no-default-features --features csr
#![cfg(target_arch = "wasm32")]

use class_feedback::components::review_chart::ItemDetailCharts;
use class_feedback::dashboard::ItemTally;
use leptos::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn container() -> web_sys::HtmlElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let container = document.create_element("div").unwrap();
    document.body().unwrap().append_child(&container).unwrap();
    container.unchecked_into()
}

#[wasm_bindgen_test]
fn detail_charts_draw_one_figure_per_item() {
    let root = container();
    let tallies = vec![
        ("Cô giáo Thu".to_string(), ItemTally { satisfied: 3, unsatisfied: 1 }),
        ("Vệ sinh lớp học".to_string(), ItemTally { satisfied: 0, unsatisfied: 2 }),
    ];
    mount_to(root.clone(), move || view! { <ItemDetailCharts tallies=tallies/> });

    assert_eq!(root.query_selector_all("figure").unwrap().length(), 2);
    let text = root.text_content().unwrap_or_default();
    assert!(text.contains("(75%)"));
    assert!(text.contains("(100%)"));
}

#[wasm_bindgen_test]
fn empty_item_draws_only_the_track() {
    let root = container();
    let tallies = vec![("Cô giáo Ngọc".to_string(), ItemTally::default())];
    mount_to(root.clone(), move || view! { <ItemDetailCharts tallies=tallies/> });

    // background ring only
    assert_eq!(root.query_selector_all("circle").unwrap().length(), 1);
}
