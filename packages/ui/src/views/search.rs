use dioxus::prelude::*;

use crate::components::Input;

/// Search field above a list.
#[component]
pub fn SearchBox(
    value: String,
    #[props(default = "Search...".to_string())] placeholder: String,
    oninput: EventHandler<String>,
) -> Element {
    rsx! {
        div { class: "search-box",
            Input {
                r#type: "search",
                placeholder,
                value,
                oninput: move |evt: FormEvent| oninput.call(evt.value()),
            }
        }
    }
}

/// Full-width row shown when a filtered table has nothing to show.
#[component]
pub fn EmptyRow(
    colspan: u32,
    #[props(default = "No results found".to_string())] message: String,
) -> Element {
    rsx! {
        tr { class: "empty-row",
            td { colspan: "{colspan}", "{message}" }
        }
    }
}
