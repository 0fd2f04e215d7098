mod api;
mod components;
mod config;
mod error;
mod format;
mod forms;
mod icons;
mod indicators;
mod logging;
mod models;
mod pages;
mod receipt;
mod services;

use yew::prelude::*;

use crate::api::HttpApi;
use crate::config::AppConfig;
use crate::icons::{icon_credit_card, icon_layout_grid, icon_receipt, icon_wallet};
use crate::indicators::{use_indicators, IndicatorOverlay};
use crate::pages::{CategoryPage, HomePage, ReceiptPage, SpendingPage};

#[derive(Clone, Copy, Debug, PartialEq)]
enum Page {
    Home,
    Spending,
    Category,
    Receipt,
}

#[derive(Properties, PartialEq)]
struct LayoutProps {
    children: Children,
    active_page: Page,
    on_select: Callback<Page>,
}

#[function_component(Layout)]
fn layout(props: &LayoutProps) -> Html {
    html! {
        <div class="flex h-screen bg-background">
            <div class="hidden md:flex">
                <Sidebar active_page={props.active_page} on_select={props.on_select.clone()} />
            </div>

            <div class="flex-1 flex flex-col overflow-hidden">
                <Header active_page={props.active_page} on_select={props.on_select.clone()} />
                <main class="flex-1 overflow-y-auto">
                    { for props.children.iter() }
                </main>
            </div>
        </div>
    }
}

struct NavItem {
    label: &'static str,
    page: Page,
    icon: fn() -> Html,
}

fn nav_items() -> [NavItem; 4] {
    [
        NavItem {
            label: "Home",
            page: Page::Home,
            icon: icon_layout_grid,
        },
        NavItem {
            label: "Spending",
            page: Page::Spending,
            icon: icon_wallet,
        },
        NavItem {
            label: "Categories",
            page: Page::Category,
            icon: icon_credit_card,
        },
        NavItem {
            label: "Receipts",
            page: Page::Receipt,
            icon: icon_receipt,
        },
    ]
}

#[derive(Properties, PartialEq)]
struct NavProps {
    active_page: Page,
    on_select: Callback<Page>,
}

// Compact navigation for narrow screens where the sidebar is hidden.
#[function_component(Header)]
fn header(props: &NavProps) -> Html {
    html! {
        <header class="bg-[#D8E1E8] border-b border-border h-16 flex items-center justify-between px-6">
            <span class="text-[#173E63] text-lg font-black tracking-tight md:hidden">{"Spending Tracker"}</span>
            <nav class="flex gap-2 md:hidden">
                { for nav_items().into_iter().map(|item| {
                    let on_select = props.on_select.clone();
                    let page = item.page;
                    let class_name = if page == props.active_page {
                        "p-2 rounded-xl bg-[#173E63] text-white"
                    } else {
                        "p-2 rounded-xl text-[#173E63]"
                    };
                    html! {
                        <button type="button" aria-label={item.label} class={class_name} onclick={Callback::from(move |_| on_select.emit(page))}>
                            { (item.icon)() }
                        </button>
                    }
                }) }
            </nav>
        </header>
    }
}

#[function_component(Sidebar)]
fn sidebar(props: &NavProps) -> Html {
    html! {
        <div class="w-[220px] h-screen bg-[#D8E1E8] p-4 flex flex-col">
            <div class="flex items-center gap-3 px-2 mb-8">
                <span class="text-[#173E63] text-xl font-black tracking-tight">{"Spending Tracker"}</span>
            </div>

            <div class="flex-1 bg-[#173E63] rounded-[24px] flex flex-col py-6 px-3 shadow-lg">
                <nav class="flex-1 space-y-2">
                    { for nav_items().into_iter().map(|item| {
                        let is_active = item.page == props.active_page;
                        let class_name = if is_active {
                            "flex items-center gap-3 px-4 py-3 rounded-xl transition-all text-[13px] font-medium bg-[#B2CBDE] text-[#173E63] w-full"
                        } else {
                            "flex items-center gap-3 px-4 py-3 rounded-xl transition-all text-[13px] font-medium text-slate-300 hover:bg-white/5 hover:text-white w-full"
                        };
                        let on_select = props.on_select.clone();
                        let page = item.page;

                        html! {
                            <button type="button" class={class_name} onclick={Callback::from(move |_| on_select.emit(page))}>
                                <span class="shrink-0">{ (item.icon)() }</span>
                                <span class="truncate whitespace-nowrap text-left">{ item.label }</span>
                            </button>
                        }
                    }) }
                </nav>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct AppProps {
    config: AppConfig,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let active_page = use_state(|| Page::Home);
    let indicators = use_indicators();
    let api = HttpApi::new(props.config.api_base_url.clone());

    let on_select = {
        let active_page = active_page.clone();
        Callback::from(move |page: Page| {
            tracing::debug!(?page, "navigate");
            active_page.set(page)
        })
    };

    let content = match *active_page {
        Page::Home => html! { <HomePage /> },
        Page::Spending => html! { <SpendingPage api={api} indicators={indicators.clone()} /> },
        Page::Category => html! { <CategoryPage api={api} indicators={indicators.clone()} /> },
        Page::Receipt => html! { <ReceiptPage api={api} indicators={indicators.clone()} /> },
    };

    html! {
        <ContextProvider<AppConfig> context={props.config.clone()}>
            <Layout active_page={*active_page} on_select={on_select}>
                { content }
            </Layout>
            <IndicatorOverlay indicators={indicators} />
        </ContextProvider<AppConfig>>
    }
}

fn main() {
    console_error_panic_hook::set_once();
    let config = AppConfig::load();
    logging::init_tracing(&config.log_filter);
    tracing::info!(api = %config.api_base_url, "starting spending tracker");
    yew::Renderer::<App>::with_props(AppProps { config }).render();
}
