use uuid::Uuid;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::api::HttpApi;
use crate::forms::{SpendingEdit, SpendingForm};
use crate::indicators::Indicators;
use crate::models::{Category, Spending};
use crate::services;

#[derive(Properties, PartialEq)]
pub struct SpendingModalProps {
    pub api: HttpApi,
    pub indicators: Indicators,
    pub on_close: Callback<()>,
    pub on_saved: Callback<Vec<Spending>>,
}

const INPUT_CLASS: &str = "w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm text-[#173E63] border-none";
const LABEL_CLASS: &str = "text-[12px] font-bold text-muted-foreground";

fn selected_id(e: &Event) -> Option<Uuid> {
    let select: HtmlSelectElement = e.target_unchecked_into();
    Uuid::parse_str(&select.value()).ok()
}

#[function_component(SpendingModal)]
pub fn spending_modal(props: &SpendingModalProps) -> Html {
    let categories = use_state(Vec::<Category>::new);
    let form = use_reducer(SpendingForm::default);
    let form_error = use_state(|| None::<String>);
    let saving = use_state(|| false);

    {
        let categories = categories.clone();
        let api = props.api.clone();
        let indicators = props.indicators.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match services::load_categories(&api).await {
                        Ok(list) => categories.set(list),
                        Err(err) => services::report_failure(&indicators, &err),
                    }
                });
                || ()
            },
            (),
        );
    }

    let text_input = |edit: fn(String) -> SpendingEdit| {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            form.dispatch(edit(input.value()));
        })
    };
    let on_amount = text_input(SpendingEdit::Amount);
    let on_date = text_input(SpendingEdit::Date);
    let on_remark = text_input(SpendingEdit::Remark);

    let on_category = {
        let form = form.clone();
        Callback::from(move |e: Event| form.dispatch(SpendingEdit::Category(selected_id(&e))))
    };
    let on_store = {
        let form = form.clone();
        Callback::from(move |e: Event| form.dispatch(SpendingEdit::Store(selected_id(&e))))
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

            form_error.set(None);
            saving.set(true);
            spawn_local(async move {
                let result = services::create_spending(&api, &snapshot).await;
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

    let selected_category = form
        .category_id
        .and_then(|id| categories.iter().find(|c| c.id == id));
    let category_value = form.category_id.map(|id| id.to_string()).unwrap_or_default();
    let store_value = form.store_id.map(|id| id.to_string()).unwrap_or_default();

    html! {
        <div class="fixed inset-0 z-40 flex items-end md:items-center justify-center bg-gray-500/20">
            <div class="bg-white w-full max-w-md rounded-t-[10px] md:rounded-[10px] shadow-lg border border-border p-6 flex flex-col gap-4">
                <h2 class="text-xl font-bold text-[#173E63]">{"Add Spending"}</h2>

                <div class="flex flex-col gap-1">
                    <label for="amount" class={LABEL_CLASS}>{"Amount"}</label>
                    <input id="amount" type="number" step="0.01" placeholder="Amount" value={form.amount.clone()} oninput={on_amount} class={INPUT_CLASS} />
                </div>

                <div class="flex flex-col gap-1">
                    <label for="date" class={LABEL_CLASS}>{"Date"}</label>
                    <input id="date" type="date" value={form.spending_date.clone()} oninput={on_date} class={INPUT_CLASS} />
                </div>

                <div class="flex flex-col gap-1">
                    <label for="category" class={LABEL_CLASS}>{"Category"}</label>
                    <select id="category" onchange={on_category} class={INPUT_CLASS}>
                        <option value="" selected={category_value.is_empty()}>{"Select Category"}</option>
                        { for categories.iter().map(|c| {
                            let value = c.id.to_string();
                            html! { <option key={value.clone()} value={value.clone()} selected={value == category_value}>{ c.name.clone() }</option> }
                        }) }
                    </select>
                </div>

                {
                    if let Some(category) = selected_category {
                        html! {
                            <div class="flex flex-col gap-1">
                                <label for="store" class={LABEL_CLASS}>{"Store"}</label>
                                <select id="store" onchange={on_store} class={INPUT_CLASS}>
                                    <option value="" selected={store_value.is_empty()}>{"Select Store"}</option>
                                    { for category.stores.iter().map(|s| {
                                        let value = s.id.to_string();
                                        html! { <option key={value.clone()} value={value.clone()} selected={value == store_value}>{ s.name.clone() }</option> }
                                    }) }
                                </select>
                            </div>
                        }
                    } else { html!{} }
                }

                <div class="flex flex-col gap-1">
                    <label for="remark" class={LABEL_CLASS}>{"Remark"}</label>
                    <input id="remark" type="text" placeholder="Remark" value={form.remark.clone()} oninput={on_remark} class={INPUT_CLASS} />
                </div>

                {
                    if let Some(msg) = &*form_error {
                        html! { <p class="text-sm text-red-500">{ msg.clone() }</p> }
                    } else { html!{} }
                }

                <button onclick={on_submit} disabled={*saving} class="bg-[#173E63] text-white py-3 rounded-[10px] text-xs font-bold">
                    { if *saving { "Saving..." } else { "Submit" } }
                </button>
                <button onclick={on_close} class="bg-[#B2CBDE] text-[#173E63] py-3 rounded-[10px] text-xs font-bold">{"Close"}</button>
            </div>
        </div>
    }
}
