use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::api::HttpApi;
use crate::forms::{CategoryEdit, CategoryForm};
use crate::icons::{icon_plus, icon_trash};
use crate::indicators::Indicators;
use crate::models::Category;
use crate::services;

#[derive(Properties, PartialEq)]
pub struct CategoryModalProps {
    pub api: HttpApi,
    pub indicators: Indicators,
    /// `None` opens the modal in create mode.
    pub category: Option<Category>,
    pub on_close: Callback<()>,
    pub on_saved: Callback<Vec<Category>>,
}

#[function_component(CategoryModal)]
pub fn category_modal(props: &CategoryModalProps) -> Html {
    let initial = props
        .category
        .as_ref()
        .map(CategoryForm::from_category)
        .unwrap_or_default();
    let form = use_reducer(move || initial);
    let form_error = use_state(|| None::<String>);
    let saving = use_state(|| false);

    let on_name = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            form.dispatch(CategoryEdit::Name(input.value()));
        })
    };

    let on_add_store = {
        let form = form.clone();
        Callback::from(move |_: MouseEvent| form.dispatch(CategoryEdit::AddStore))
    };

    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let on_submit = {
        let form = form.clone();
        let form_error = form_error.clone();
        let saving = saving.clone();
        let api = props.api.clone();
        let indicators = props.indicators.clone();
        let on_saved = props.on_saved.clone();
        let original = props
            .category
            .as_ref()
            .map(|c| c.stores.clone())
            .unwrap_or_default();

        Callback::from(move |_: MouseEvent| {
            if *saving {
                return;
            }
            let snapshot = (*form).clone();
            let form_error = form_error.clone();
            let saving = saving.clone();
            let api = api.clone();
            let indicators = indicators.clone();
            let on_saved = on_saved.clone();
            let original = original.clone();

            form_error.set(None);
            saving.set(true);
            spawn_local(async move {
                let result = services::save_category(&api, &snapshot, &original).await;
                saving.set(false);
                match result {
                    Ok(list) => on_saved.emit(list),
                    Err(err) => match services::is_validation(&err) {
                        Some(invalid) => form_error.set(Some(invalid.to_string())),
                        None => services::report_failure(&indicators, &err),
                    },
                }
            });
        })
    };

    let title = if form.is_new() { "Create Category" } else { "Edit Category" };

    html! {
        <div class="fixed inset-0 z-40 flex items-center justify-center bg-gray-500/20">
            <div class="bg-white w-full max-w-md rounded-[10px] shadow-lg border border-border p-6 flex flex-col gap-4">
                <div class="flex justify-between items-center">
                    <h2 class="text-xl font-bold text-[#173E63]">{ title }</h2>
                    <button class="text-muted-foreground text-sm" onclick={on_close.clone()}>{"✕"}</button>
                </div>

                <div class="flex flex-col gap-1">
                    <label for="category-name" class="text-[12px] font-bold text-muted-foreground">{"Category Name"}</label>
                    <input id="category-name" type="text" placeholder="Name" value={form.name.clone()} oninput={on_name}
                        class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm text-[#173E63] border-none" />
                </div>

                <div class="flex flex-col gap-2">
                    <div class="flex items-center justify-between">
                        <span class="text-[12px] font-bold text-muted-foreground">{"Stores"}</span>
                        <button type="button" onclick={on_add_store} class="flex items-center gap-1 text-xs font-bold text-[#173E63]">
                            { icon_plus() }{"Add Store"}
                        </button>
                    </div>
                    { for form.stores.iter().enumerate().map(|(index, draft)| {
                        let on_rename = {
                            let form = form.clone();
                            Callback::from(move |e: InputEvent| {
                                let input: HtmlInputElement = e.target_unchecked_into();
                                form.dispatch(CategoryEdit::RenameStore(index, input.value()));
                            })
                        };
                        let on_toggle = {
                            let form = form.clone();
                            Callback::from(move |_: MouseEvent| form.dispatch(CategoryEdit::ToggleStoreDeleted(index)))
                        };
                        let row_class = if draft.deleted {
                            "flex-1 bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm text-slate-400 line-through border-none"
                        } else {
                            "flex-1 bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm text-[#173E63] border-none"
                        };
                        html! {
                            <div key={index} class="flex items-center gap-2">
                                <input type="text" placeholder="Store name" value={draft.name.clone()} oninput={on_rename}
                                    disabled={draft.deleted} class={row_class} />
                                <button type="button" onclick={on_toggle} class="text-xs font-bold text-[#173E63] flex items-center gap-1">
                                    { if draft.deleted { html! { <span>{"Restore"}</span> } } else { icon_trash() } }
                                </button>
                            </div>
                        }
                    }) }
                </div>

                {
                    if let Some(msg) = &*form_error {
                        html! { <p class="text-sm text-red-500">{ msg.clone() }</p> }
                    } else { html!{} }
                }

                <div class="flex justify-between gap-3">
                    <button onclick={on_close} class="flex-1 bg-[#B2CBDE] text-[#173E63] py-2 rounded-[10px] text-xs font-bold">{"Close"}</button>
                    <button onclick={on_submit} disabled={*saving} class="flex-1 bg-[#173E63] text-white py-2 rounded-[10px] text-xs font-bold">
                        { if *saving { "Saving..." } else { "Submit" } }
                    </button>
                </div>
            </div>
        </div>
    }
}
