//! 入力部品（チップ・セレクト・スライダー）

use leptos::prelude::*;
use std::fmt::Display;
use std::str::FromStr;

/// 複数選択チップ
#[component]
pub fn ChipGroup<T, S, F>(
    label: &'static str,
    options: &'static [T],
    is_selected: S,
    on_toggle: F,
) -> impl IntoView
where
    T: Copy + Display + Send + Sync + 'static,
    S: Fn(T) -> bool + Copy + Send + Sync + 'static,
    F: Fn(T) + Copy + Send + Sync + 'static,
{
    view! {
        <div class="form-group">
            <label>{label}</label>
            <div class="chips">
                {options
                    .iter()
                    .copied()
                    .map(|option| {
                        view! {
                            <button
                                type="button"
                                class=move || if is_selected(option) { "chip selected" } else { "chip" }
                                on:click=move |_| on_toggle(option)
                            >
                                {option.to_string()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

/// 単一選択セレクト
#[component]
pub fn ChoiceSelect<T, V, F>(
    label: &'static str,
    options: &'static [T],
    value: V,
    on_change: F,
) -> impl IntoView
where
    T: Copy + PartialEq + Display + FromStr + Send + Sync + 'static,
    V: Fn() -> T + Copy + Send + Sync + 'static,
    F: Fn(T) + Copy + Send + Sync + 'static,
{
    view! {
        <div class="form-group">
            <label>{label}</label>
            <select on:change=move |ev| {
                if let Ok(choice) = event_target_value(&ev).parse::<T>() {
                    on_change(choice);
                }
            }>
                {options
                    .iter()
                    .copied()
                    .map(|option| {
                        view! {
                            <option value=option.to_string() selected=move || value() == option>
                                {option.to_string()}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
    }
}

/// 数値スライダー（範囲外の値はフォーム側で丸める）
#[component]
pub fn RangeInput<V, F>(
    label: &'static str,
    min: u32,
    max: u32,
    step: u32,
    unit: &'static str,
    value: V,
    on_change: F,
) -> impl IntoView
where
    V: Fn() -> u32 + Copy + Send + Sync + 'static,
    F: Fn(u32) + Copy + Send + Sync + 'static,
{
    view! {
        <div class="form-group">
            <label>{move || format!("{}: {} {}", label, value(), unit)}</label>
            <input
                type="range"
                min=min.to_string()
                max=max.to_string()
                step=step.to_string()
                prop:value=move || value().to_string()
                on:input=move |ev| {
                    if let Ok(v) = event_target_value(&ev).parse::<u32>() {
                        on_change(v);
                    }
                }
            />
        </div>
    }
}

/// 自由入力欄
#[component]
pub fn TextField<V, F>(
    label: &'static str,
    placeholder: &'static str,
    value: V,
    on_input: F,
) -> impl IntoView
where
    V: Fn() -> String + Copy + Send + Sync + 'static,
    F: Fn(String) + Copy + Send + Sync + 'static,
{
    view! {
        <div class="form-group">
            <label>{label}</label>
            <input
                type="text"
                placeholder=placeholder
                prop:value=move || value()
                on:input=move |ev| on_input(event_target_value(&ev))
            />
        </div>
    }
}
