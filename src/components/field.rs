//! Form field helpers shared by the modals

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::api::upload::{read_files, PickedFile};
use crate::context::use_app_context;

/// Labelled text input bound to a signal
#[component]
pub fn TextField(
    #[prop(into)] label: String,
    value: RwSignal<String>,
    #[prop(into, default = "text".to_string())] input_type: String,
    #[prop(into, optional)] placeholder: String,
) -> impl IntoView {
    view! {
        <label class="field">
            <span class="field-label">{label}</span>
            <input
                type=input_type
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </label>
    }
}

/// Labelled `<select>` over `(value, label)` pairs
#[component]
pub fn SelectField(
    #[prop(into)] label: String,
    value: RwSignal<String>,
    #[prop(into)] options: Signal<Vec<(String, String)>>,
    #[prop(into, default = "Select...".to_string())] placeholder: String,
) -> impl IntoView {
    view! {
        <label class="field">
            <span class="field-label">{label}</span>
            <select
                prop:value=move || value.get()
                on:change=move |ev| value.set(event_target_value(&ev))
            >
                <option value="">{placeholder}</option>
                {move || {
                    let selected = value.get();
                    options
                        .get()
                        .into_iter()
                        .map(|(v, l)| {
                            let is_selected = v == selected;
                            view! { <option value=v selected=is_selected>{l}</option> }
                        })
                        .collect_view()
                }}
            </select>
        </label>
    }
}

/// File input; chosen files are read into memory right away
#[component]
pub fn FileField(
    #[prop(into)] label: String,
    files: RwSignal<Vec<PickedFile>>,
    #[prop(optional)] multiple: bool,
    #[prop(into, default = "image/*".to_string())] accept: String,
) -> impl IntoView {
    let ctx = use_app_context();

    let on_change = move |ev: web_sys::Event| {
        let list = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            .and_then(|input| input.files());
        spawn_local(async move {
            match read_files(list).await {
                Ok(picked) => files.set(picked),
                Err(e) => ctx.toast_error(e.user_message()),
            }
        });
    };

    view! {
        <label class="field">
            <span class="field-label">{label}</span>
            <input type="file" accept=accept multiple=multiple on:change=on_change />
            <span class="field-hint">
                {move || match files.with(Vec::len) {
                    0 => String::new(),
                    1 => "1 file selected".to_string(),
                    n => format!("{n} files selected"),
                }}
            </span>
        </label>
    }
}
