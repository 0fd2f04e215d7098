mod category;
mod home;
mod receipt;
mod spending;

pub use category::CategoryPage;
pub use home::HomePage;
pub use receipt::ReceiptPage;
pub use spending::SpendingPage;

use yew::prelude::*;

use crate::api::HttpApi;
use crate::config::{AppConfig, DEFAULT_CURRENCY_SYMBOL};
use crate::indicators::Indicators;

/// Handles every data page needs.
#[derive(Properties, PartialEq)]
pub struct PageProps {
    pub api: HttpApi,
    pub indicators: Indicators,
}

#[hook]
pub fn use_currency_symbol() -> String {
    use_context::<AppConfig>()
        .map(|c| c.currency_symbol)
        .unwrap_or_else(|| DEFAULT_CURRENCY_SYMBOL.to_string())
}

pub fn page_shell(title: &'static str, actions: Html, children: Html) -> Html {
    html! {
        <div class="p-6 max-w-7xl mx-auto">
            <div class="flex items-center justify-between pb-4 border-b border-border">
                <h1 class="text-2xl font-bold text-foreground">{ title }</h1>
                { actions }
            </div>
            <div class="pt-5 space-y-6">
                { children }
            </div>
        </div>
    }
}

pub fn empty_or_loading(loading: bool, empty: bool, empty_text: &'static str) -> Option<Html> {
    if loading {
        Some(html! { <p class="px-2 py-6 text-center text-muted-foreground">{"Loading..."}</p> })
    } else if empty {
        Some(html! { <p class="px-2 py-6 text-center text-muted-foreground">{ empty_text }</p> })
    } else {
        None
    }
}
