//! ステップ表示コンポーネント

use leptos::prelude::*;

#[component]
pub fn StepIndicator<F>(step: F, total: u8, labels: &'static [&'static str]) -> impl IntoView
where
    F: Fn() -> u8 + Copy + Send + Sync + 'static,
{
    let ratio = move || f32::from(step()) / f32::from(total.max(1));

    view! {
        <div class="progress-container">
            <div class="progress-bar">
                <div
                    class="progress-fill"
                    style=move || format!("width: {}%", ratio() * 100.0)
                />
            </div>
            <p class="progress-text">
                {move || {
                    let current = step();
                    let label = labels.get(usize::from(current.saturating_sub(1))).copied().unwrap_or("");
                    format!("Step {} of {}: {}", current, total, label)
                }}
            </p>
        </div>
    }
}
