//! 生成結果の表示（レシピカード・メニュー・プラン）

use leptos::prelude::*;
use pantry_pal_common::render::{MenuView, MissingItemsView, PlanView, RecipeCardView};

#[component]
pub fn MissingItemsPanel(items: MissingItemsView) -> impl IntoView {
    let MissingItemsView { items, links } = items;
    view! {
        <div class="missing-items">
            <h4>"You might need"</h4>
            <ul>
                {items.into_iter().map(|item| view! { <li>{item}</li> }).collect_view()}
            </ul>
            <div class="grocery-links">
                <a href=links.swiggy target="_blank" rel="noopener noreferrer" class="btn btn-small">
                    "Order on Swiggy Instamart"
                </a>
                <a href=links.blinkit target="_blank" rel="noopener noreferrer" class="btn btn-small">
                    "Order on Blinkit"
                </a>
            </div>
        </div>
    }
}

fn numbered(steps: Vec<(usize, String)>) -> impl IntoView {
    view! {
        <ol>
            {steps
                .into_iter()
                .map(|(n, text)| view! { <li value=n.to_string()>{text}</li> })
                .collect_view()}
        </ol>
    }
}

#[component]
pub fn RecipeCard(card: RecipeCardView) -> impl IntoView {
    let RecipeCardView {
        title,
        description,
        cooking_time,
        ingredients,
        instructions,
        missing,
    } = card;

    view! {
        <article class="recipe-card">
            <h3>{title}</h3>
            <p class="text-muted">{description}</p>
            <p class="cooking-time">"⏱ " {cooking_time}</p>
            <h4>"Ingredients"</h4>
            <ul>
                {ingredients.into_iter().map(|i| view! { <li>{i}</li> }).collect_view()}
            </ul>
            <h4>"Instructions"</h4>
            {numbered(instructions)}
            {missing.map(|m| view! { <MissingItemsPanel items=m /> })}
        </article>
    }
}

#[component]
pub fn MenuCard(card: MenuView) -> impl IntoView {
    view! {
        <article class="menu-card">
            <h2>{card.title}</h2>
            <p class="text-muted">{card.description}</p>
            {card
                .courses
                .into_iter()
                .map(|course| {
                    view! {
                        <div class="course">
                            <h4>{course.label}</h4>
                            <p class="course-name">{course.name}</p>
                            <p class="text-muted">{course.description}</p>
                        </div>
                    }
                })
                .collect_view()}
        </article>
    }
}

#[component]
pub fn PlanCard(card: PlanView) -> impl IntoView {
    view! {
        <article class="plan-card">
            <h2>{card.title}</h2>
            <p class="text-muted">{card.description}</p>
            {card
                .recipes
                .into_iter()
                .map(|recipe| {
                    view! {
                        <section class="recipe-card">
                            <span class="course-label">{recipe.course}</span>
                            <h3>{recipe.title}</h3>
                            <p class="text-muted">{recipe.description}</p>
                            <h4>"Ingredients"</h4>
                            <ul>
                                {recipe.ingredients.into_iter().map(|i| view! { <li>{i}</li> }).collect_view()}
                            </ul>
                            <h4>"Instructions"</h4>
                            {numbered(recipe.instructions)}
                        </section>
                    }
                })
                .collect_view()}
            {card.missing.map(|m| view! { <MissingItemsPanel items=m /> })}
        </article>
    }
}

/// 結果画面・エラー時の操作ボタン
#[component]
pub fn ActionBar<F>(actions: Vec<pantry_pal_common::Action>, on_action: F) -> impl IntoView
where
    F: Fn(pantry_pal_common::Action) + Copy + Send + Sync + 'static,
{
    view! {
        <div class="actions">
            {actions
                .into_iter()
                .map(|action| {
                    view! {
                        <button type="button" class="btn btn-primary" on:click=move |_| on_action(action)>
                            {action.label()}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}
