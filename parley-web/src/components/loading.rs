use yew::{Html, function_component, html};

#[function_component(Loading)]
pub fn loading() -> Html {
    html! {
        <div class="flex flex-col items-center justify-center min-h-screen animate-fadeIn">
            <div class="bg-base-200 p-6 rounded-lg shadow-md flex flex-col items-center">
                <div class="text-xl font-medium">{"Parley"}</div>
                <div class="mt-3 flex items-center">
                    <span class="loading loading-spinner loading-sm mr-2"></span>
                    <span>{"Loading"}</span>
                </div>
            </div>
        </div>
    }
}
