use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::UploadModal;
use crate::format::{format_currency, format_date};
use crate::icons::icon_camera;
use crate::models::Receipt;
use crate::services::{self, ReceiptTarget};

use super::{empty_or_loading, page_shell, use_currency_symbol, PageProps};

#[function_component(ReceiptPage)]
pub fn receipt_page(props: &PageProps) -> Html {
    let currency_symbol = use_currency_symbol();
    let receipts = use_state(Vec::<Receipt>::new);
    let loading = use_state(|| true);
    let uploading = use_state(|| false);

    let reload = {
        let receipts = receipts.clone();
        let loading = loading.clone();
        let api = props.api.clone();
        let indicators = props.indicators.clone();
        Callback::from(move |_: ()| {
            let receipts = receipts.clone();
            let loading = loading.clone();
            let api = api.clone();
            let indicators = indicators.clone();
            spawn_local(async move {
                match services::load_receipts(&api).await {
                    Ok(list) => receipts.set(list),
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

    let on_open = {
        let uploading = uploading.clone();
        Callback::from(move |_: MouseEvent| uploading.set(true))
    };
    let on_close = {
        let uploading = uploading.clone();
        Callback::from(move |_: ()| uploading.set(false))
    };
    let on_completed = {
        let uploading = uploading.clone();
        Callback::from(move |_: ()| {
            uploading.set(false);
            reload.emit(());
        })
    };

    let actions = html! {
        <button onclick={on_open} class="flex items-center gap-2 bg-[#173E63] text-white px-4 py-2 rounded-[10px] text-xs font-bold">
            { icon_camera() }{"Upload Receipt"}
        </button>
    };

    let body = empty_or_loading(*loading, receipts.is_empty(), "No receipts saved yet.").unwrap_or_else(|| html! {
        <div class="bg-white rounded-[10px] border border-border shadow-sm divide-y divide-border">
            { for receipts.iter().map(|receipt| html! {
                <div key={receipt.id.to_string()} class="flex items-center justify-between px-4 py-3">
                    <div class="flex flex-col">
                        <span class="text-sm font-bold text-[#173E63]">{ receipt.store_name.clone() }</span>
                        <span class="text-xs text-muted-foreground">
                            { format!("{} · {} item(s)", format_date(&receipt.date), receipt.items.len()) }
                        </span>
                    </div>
                    <span class="text-sm font-bold text-[#173E63]">{ format_currency(receipt.total, &currency_symbol) }</span>
                </div>
            }) }
        </div>
    });

    html! {
        <>
            { page_shell("Receipts", actions, body) }
            {
                if *uploading {
                    html! {
                        <UploadModal
                            api={props.api.clone()}
                            indicators={props.indicators.clone()}
                            target={ReceiptTarget::Receipt}
                            on_close={on_close}
                            on_completed={on_completed}
                        />
                    }
                } else { html!{} }
            }
        </>
    }
}
