//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"PantryPal"</h1>
            <p class="tagline">"Snap your ingredients. Get a recipe. Plan a feast."</p>
        </header>
    }
}
