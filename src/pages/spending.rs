use uuid::Uuid;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::{SpendingModal, UploadModal};
use crate::format::{format_currency, format_optional_date};
use crate::icons::{icon_camera, icon_plus, icon_trash};
use crate::models::Spending;
use crate::services::{self, ReceiptTarget};

use super::{empty_or_loading, page_shell, use_currency_symbol, PageProps};

#[derive(Clone, Copy, PartialEq)]
enum Dialog {
    Add,
    Scan,
}

fn place(spending: &Spending) -> String {
    match (&spending.category, &spending.store) {
        (Some(category), Some(store)) => format!("{} · {}", category.name, store.name),
        (Some(category), None) => category.name.clone(),
        (None, Some(store)) => store.name.clone(),
        (None, None) => String::new(),
    }
}

#[function_component(SpendingPage)]
pub fn spending_page(props: &PageProps) -> Html {
    let currency_symbol = use_currency_symbol();
    let spending = use_state(Vec::<Spending>::new);
    let loading = use_state(|| true);
    let dialog = use_state(|| None::<Dialog>);

    let reload = {
        let spending = spending.clone();
        let loading = loading.clone();
        let api = props.api.clone();
        let indicators = props.indicators.clone();
        Callback::from(move |_: ()| {
            let spending = spending.clone();
            let loading = loading.clone();
            let api = api.clone();
            let indicators = indicators.clone();
            spawn_local(async move {
                match services::load_spending(&api).await {
                    Ok(list) => spending.set(list),
                    Err(err) => services::report_failure(&indicators, &err),
                }
                loading.set(false);
            });
        })
    };

    {
        let reload = reload.clone();
        use_effect_with_deps(
            move |_| {
                reload.emit(());
                || ()
            },
            (),
        );
    }

    let on_delete = {
        let spending = spending.clone();
        let api = props.api.clone();
        let indicators = props.indicators.clone();
        Callback::from(move |id: Uuid| {
            let spending = spending.clone();
            let api = api.clone();
            let indicators = indicators.clone();
            spawn_local(async move {
                let result = services::with_loading(&indicators, services::delete_spending(&api, id)).await;
                match result {
                    Ok(list) => spending.set(list),
                    Err(err) => services::report_failure(&indicators, &err),
                }
            });
        })
    };

    let open = |mode: Dialog| {
        let dialog = dialog.clone();
        Callback::from(move |_: MouseEvent| dialog.set(Some(mode)))
    };

    let on_close = {
        let dialog = dialog.clone();
        Callback::from(move |_: ()| dialog.set(None))
    };

    let on_saved = {
        let dialog = dialog.clone();
        let spending = spending.clone();
        Callback::from(move |list: Vec<Spending>| {
            spending.set(list);
            dialog.set(None);
        })
    };

    let on_scanned = {
        let dialog = dialog.clone();
        let reload = reload.clone();
        Callback::from(move |_: ()| {
            dialog.set(None);
            reload.emit(());
        })
    };

    let actions = html! {
        <div class="flex gap-2">
            <button onclick={open(Dialog::Scan)} class="flex items-center gap-2 bg-[#B2CBDE] text-[#173E63] px-4 py-2 rounded-[10px] text-xs font-bold">
                { icon_camera() }{"Scan Receipt"}
            </button>
            <button onclick={open(Dialog::Add)} class="flex items-center gap-2 bg-[#173E63] text-white px-4 py-2 rounded-[10px] text-xs font-bold">
                { icon_plus() }{"Add Spending"}
            </button>
        </div>
    };

    let body = empty_or_loading(*loading, spending.is_empty(), "No spending recorded yet.").unwrap_or_else(|| html! {
        <div class="bg-white rounded-[10px] border border-border shadow-sm divide-y divide-border">
            { for spending.iter().map(|entry| {
                let on_delete = {
                    let on_delete = on_delete.clone();
                    let id = entry.id;
                    Callback::from(move |_: MouseEvent| on_delete.emit(id))
                };
                html! {
                    <div key={entry.id.to_string()} class="flex items-center justify-between px-4 py-3">
                        <div class="flex flex-col">
                            <span class="text-sm font-bold text-[#173E63]">{ entry.remark.clone() }</span>
                            <span class="text-xs text-muted-foreground">{ place(entry) }</span>
                        </div>
                        <div class="flex items-center gap-4">
                            <div class="flex flex-col items-end">
                                <span class="text-sm font-bold text-[#173E63]">{ format_currency(entry.amount, &currency_symbol) }</span>
                                <span class="text-xs text-muted-foreground">{ format_optional_date(entry.spending_date.as_ref()) }</span>
                            </div>
                            <button onclick={on_delete} aria-label="Delete spending" class="text-red-500">{ icon_trash() }</button>
                        </div>
                    </div>
                }
            }) }
        </div>
    });

    let modal = match *dialog {
        Some(Dialog::Add) => html! {
            <SpendingModal
                api={props.api.clone()}
                indicators={props.indicators.clone()}
                on_close={on_close}
                on_saved={on_saved}
            />
        },
        Some(Dialog::Scan) => html! {
            <UploadModal
                api={props.api.clone()}
                indicators={props.indicators.clone()}
                target={ReceiptTarget::Spending}
                on_close={on_close}
                on_completed={on_scanned}
            />
        },
        None => html! {},
    };

    html! {
        <>
            { page_shell("Spending", actions, body) }
            { modal }
        </>
    }
}
