use uuid::Uuid;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::CategoryModal;
use crate::icons::{icon_plus, icon_trash};
use crate::models::Category;
use crate::services;

use super::{empty_or_loading, page_shell, PageProps};

#[derive(Clone, PartialEq)]
enum Editing {
    New,
    Existing(Category),
}

#[function_component(CategoryPage)]
pub fn category_page(props: &PageProps) -> Html {
    let categories = use_state(Vec::<Category>::new);
    let loading = use_state(|| true);
    let editing = use_state(|| None::<Editing>);

    let reload = {
        let categories = categories.clone();
        let loading = loading.clone();
        let api = props.api.clone();
        let indicators = props.indicators.clone();
        Callback::from(move |_: ()| {
            let categories = categories.clone();
            let loading = loading.clone();
            let api = api.clone();
            let indicators = indicators.clone();
            spawn_local(async move {
                match services::load_categories(&api).await {
                    Ok(list) => categories.set(list),
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
        let categories = categories.clone();
        let api = props.api.clone();
        let indicators = props.indicators.clone();
        Callback::from(move |id: Uuid| {
            let categories = categories.clone();
            let api = api.clone();
            let indicators = indicators.clone();
            spawn_local(async move {
                let result = services::with_loading(&indicators, services::delete_category(&api, id)).await;
                match result {
                    Ok(list) => categories.set(list),
                    Err(err) => services::report_failure(&indicators, &err),
                }
            });
        })
    };

    let on_create = {
        let editing = editing.clone();
        Callback::from(move |_: MouseEvent| editing.set(Some(Editing::New)))
    };

    let on_close = {
        let editing = editing.clone();
        Callback::from(move |_: ()| editing.set(None))
    };

    let on_saved = {
        let editing = editing.clone();
        let categories = categories.clone();
        Callback::from(move |list: Vec<Category>| {
            categories.set(list);
            editing.set(None);
        })
    };

    let actions = html! {
        <button onclick={on_create} class="flex items-center gap-2 bg-[#173E63] text-white px-4 py-2 rounded-[10px] text-xs font-bold">
            { icon_plus() }{"Create Category"}
        </button>
    };

    let body = empty_or_loading(*loading, categories.is_empty(), "No categories yet.").unwrap_or_else(|| html! {
        <div class="grid gap-4 sm:grid-cols-2 lg:grid-cols-3">
            { for categories.iter().map(|category| {
                let on_edit = {
                    let editing = editing.clone();
                    let category = category.clone();
                    Callback::from(move |_: MouseEvent| editing.set(Some(Editing::Existing(category.clone()))))
                };
                let on_delete = {
                    let on_delete = on_delete.clone();
                    let id = category.id;
                    Callback::from(move |_: MouseEvent| on_delete.emit(id))
                };
                html! {
                    <div key={category.id.to_string()} class="bg-white rounded-[10px] border border-border shadow-sm p-4 flex flex-col gap-3">
                        <div class="flex items-start justify-between">
                            <h3 class="text-lg font-bold text-[#173E63]">{ category.name.clone() }</h3>
                            <div class="flex gap-2">
                                <button onclick={on_edit} class="text-xs font-bold text-[#173E63] bg-[#B2CBDE] px-3 py-1 rounded-[10px]">{"Edit"}</button>
                                <button onclick={on_delete} aria-label="Delete category" class="text-red-500 px-2">{ icon_trash() }</button>
                            </div>
                        </div>
                        {
                            if category.stores.is_empty() {
                                html! { <p class="text-xs text-muted-foreground">{"No stores"}</p> }
                            } else {
                                html! {
                                    <ul class="flex flex-wrap gap-2">
                                        { for category.stores.iter().map(|store| html! {
                                            <li key={store.id.to_string()} class="text-xs bg-[#f1f4f9] text-[#173E63] px-2 py-1 rounded-full">{ store.name.clone() }</li>
                                        }) }
                                    </ul>
                                }
                            }
                        }
                    </div>
                }
            }) }
        </div>
    });

    let modal = match &*editing {
        Some(mode) => {
            let (key, category) = match mode {
                Editing::New => ("new".to_string(), None),
                Editing::Existing(c) => (c.id.to_string(), Some(c.clone())),
            };
            html! {
                <CategoryModal
                    key={key}
                    api={props.api.clone()}
                    indicators={props.indicators.clone()}
                    category={category}
                    on_close={on_close}
                    on_saved={on_saved}
                />
            }
        }
        None => html! {},
    };

    html! {
        <>
            { page_shell("Categories", actions, body) }
            { modal }
        </>
    }
}
