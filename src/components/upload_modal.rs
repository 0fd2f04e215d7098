use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, Url};
use yew::prelude::*;

use crate::api::HttpApi;
use crate::error::ValidationError;
use crate::format::{format_currency, format_date};
use crate::icons::icon_camera;
use crate::indicators::{Feedback, Indicators};
use crate::models::ReceiptOcr;
use crate::pages::use_currency_symbol;
use crate::receipt::{validate_image_type, IMAGE_INPUT_ACCEPT};
use crate::services::{self, ReceiptTarget};

#[derive(Properties, PartialEq)]
pub struct UploadModalProps {
    pub api: HttpApi,
    pub indicators: Indicators,
    pub target: ReceiptTarget,
    pub on_close: Callback<()>,
    pub on_completed: Callback<()>,
}

#[function_component(UploadModal)]
pub fn upload_modal(props: &UploadModalProps) -> Html {
    let currency_symbol = use_currency_symbol();
    let preview = use_state(|| None::<String>);
    let receipt = use_state(|| None::<ReceiptOcr>);
    let submitting = use_state(|| false);

    let on_file = {
        let preview = preview.clone();
        let receipt = receipt.clone();
        let api = props.api.clone();
        let indicators = props.indicators.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                indicators.alert(&ValidationError::UnsupportedImage(String::new()).to_string());
                return;
            };
            input.set_value("");

            let mime = file.type_();
            if validate_image_type(&mime).is_ok() {
                if let Some(old) = (*preview).clone() {
                    let _ = Url::revoke_object_url(&old);
                }
                preview.set(Url::create_object_url_with_blob(&file).ok());
                receipt.set(None);
            }

            let receipt = receipt.clone();
            let api = api.clone();
            let indicators = indicators.clone();
            spawn_local(async move {
                match services::scan_receipt(&api, &indicators, &file, &mime).await {
                    Ok(parsed) => receipt.set(Some(parsed)),
                    Err(err) => {
                        if services::is_validation(&err).is_none() {
                            services::report_failure(&indicators, &err);
                        }
                    }
                }
            });
        })
    };

    let on_close = {
        let preview = preview.clone();
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(url) = (*preview).clone() {
                let _ = Url::revoke_object_url(&url);
            }
            on_close.emit(());
        })
    };

    let on_submit = {
        let receipt = receipt.clone();
        let submitting = submitting.clone();
        let api = props.api.clone();
        let indicators = props.indicators.clone();
        let target = props.target;
        let on_completed = props.on_completed.clone();
        let preview = preview.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(parsed) = (*receipt).clone() else {
                return;
            };
            if *submitting {
                return;
            }
            let submitting = submitting.clone();
            let api = api.clone();
            let indicators = indicators.clone();
            let on_completed = on_completed.clone();
            let preview = (*preview).clone();

            submitting.set(true);
            spawn_local(async move {
                let result = services::confirm_receipt(&api, &parsed, target).await;
                submitting.set(false);
                match result {
                    Ok(()) => {
                        if let Some(url) = preview {
                            let _ = Url::revoke_object_url(&url);
                        }
                        on_completed.emit(());
                    }
                    Err(err) => services::report_failure(&indicators, &err),
                }
            });
        })
    };

    let details = match &*receipt {
        Some(parsed) => html! {
            <div class="w-full text-sm text-[#173E63]">
                <h3 class="text-center font-bold mb-2">{"Receipt Details"}</h3>
                <div class="flex"><span class="flex-1 text-right pr-2 text-muted-foreground">{"Store:"}</span><span class="flex-1 pl-2">{ parsed.store_name.clone() }</span></div>
                <div class="flex"><span class="flex-1 text-right pr-2 text-muted-foreground">{"Date:"}</span><span class="flex-1 pl-2">{ format_date(&parsed.date) }</span></div>
                { for parsed.items.iter().enumerate().map(|(idx, item)| html! {
                    <div key={idx} class="flex">
                        <span class="flex-1 text-right pr-2 text-muted-foreground">{ format!("{}:", item.name) }</span>
                        <span class="flex-1 pl-2">{ format_currency(item.price, &currency_symbol) }</span>
                    </div>
                }) }
                <div class="flex font-bold mt-1"><span class="flex-1 text-right pr-2">{"Total:"}</span><span class="flex-1 pl-2">{ format_currency(parsed.total(), &currency_symbol) }</span></div>
            </div>
        },
        None => html! {},
    };

    let pickers = if preview.is_none() {
        html! {
            <div class="flex flex-col items-center gap-3">
                <label class="cursor-pointer bg-[#B2CBDE] text-[#173E63] px-6 py-3 rounded-[10px] text-xs font-bold">
                    {"Upload Image"}
                    <input type="file" accept={IMAGE_INPUT_ACCEPT} class="hidden" onchange={on_file.clone()} />
                </label>
                <label class="cursor-pointer flex items-center gap-2 bg-[#B2CBDE] text-[#173E63] px-6 py-3 rounded-[10px] text-xs font-bold">
                    { icon_camera() }{"Capture Photo"}
                    <input type="file" accept={IMAGE_INPUT_ACCEPT} capture="environment" class="hidden" onchange={on_file} />
                </label>
            </div>
        }
    } else {
        html! {}
    };

    html! {
        <div class="fixed inset-0 z-40 flex items-end md:items-center justify-center bg-gray-500/20">
            <div class="bg-white w-full max-w-md max-h-[90vh] overflow-y-auto rounded-t-[10px] md:rounded-[10px] shadow-lg border border-border p-6 flex flex-col items-center gap-4">
                { pickers }
                {
                    if let Some(url) = &*preview {
                        html! { <img src={url.clone()} alt="Selected receipt" class="w-[275px] h-auto" /> }
                    } else { html!{} }
                }
                { details }
                {
                    if receipt.is_some() {
                        html! {
                            <button onclick={on_submit} disabled={*submitting} class="w-full bg-[#173E63] text-white py-3 rounded-[10px] text-xs font-bold">
                                { if *submitting { "Saving..." } else { "Submit" } }
                            </button>
                        }
                    } else { html!{} }
                }
                <button onclick={on_close} class="w-full bg-[#B2CBDE] text-[#173E63] py-3 rounded-[10px] text-xs font-bold">{"Close"}</button>
            </div>
        </div>
    }
}
