use yew::prelude::*;

#[function_component(HomePage)]
pub fn home_page() -> Html {
    html! {
        <div class="flex flex-col flex-1 items-center justify-center h-full p-6">
            <h1 class="text-2xl font-bold text-[#173E63]">{"Welcome to the Spending Tracker"}</h1>
            <p class="mt-4 text-muted-foreground">{"Track your expenses and manage your budget effectively."}</p>
        </div>
    }
}
