//! Cat Clicker Shell
//!
//! Static page layout. Leptos renders the containers, admin toggle and edit
//! form once; the imperative views then take them over by id.

use leptos::prelude::*;

use crate::config::ElementIds;

#[component]
pub fn App(ids: ElementIds, hidden_class: String) -> impl IntoView {
    let ElementIds {
        item_list,
        detail_container,
        admin_toggle,
        form_container,
        form,
        name_input,
        url_input,
        counter_input,
        save_button,
        cancel_button,
        ..
    } = ids;

    view! {
        <div class="container cat-clicker">
            <h1>"Cat Clicker"</h1>

            // List of item buttons, filled by ListView
            <div id=item_list class="cat-list btn-group"></div>

            // Image + counter, filled by DetailView
            <div id=detail_container class="cat-img-ctnr"></div>

            <button id=admin_toggle type="button" class="btn btn-secondary adm-btn">"Admin"</button>

            <div id=form_container class=format!("cat-form-ctnr {}", hidden_class)>
                <form id=form class="cat-form">
                    <input id=name_input type="text" class="form-control" placeholder="Name"/>
                    <input id=url_input type="text" class="form-control" placeholder="Image URL"/>
                    <input id=counter_input type="number" min="0" class="form-control" placeholder="Clicks"/>
                    <button id=save_button type="submit" class="btn btn-primary save-btn">"Save"</button>
                    <button id=cancel_button type="button" class="btn btn-light cancel-btn">"Cancel"</button>
                </form>
            </div>
        </div>
    }
}
