//! レシピ生成ウィザード
//!
//! 1. 食材写真とスパイス → 2. 好み → 3. 条件 → 4. 結果

use crate::app::{submit, warn_on_err, Settings};
use crate::components::choices::{ChipGroup, ChoiceSelect, RangeInput, TextField};
use crate::components::image_uploader::ImageUploader;
use crate::components::results::{ActionBar, RecipeCard};
use crate::components::step_indicator::StepIndicator;
use crate::previews::ObjectUrlPreviews;
use leptos::prelude::*;
use pantry_pal_common::form::{COOKING_TIME_RANGE, COOKING_TIME_STEP, SERVINGS_RANGE};
use pantry_pal_common::render::recipe_actions;
use pantry_pal_common::{
    Action, Allergy, Cuisine, DietaryChoice, FormState, ImageId, ImagePayload, IngredientCategory, MealType,
    Mood, RecipeCardView, RecipeField, RecipeToggle, RecipeWizard, Spice, Status,
};
use std::sync::Arc;

const STEP_LABELS: &[&str] = &["Your Ingredients", "Preferences", "Constraints", "Your Recipes"];

#[component]
pub fn RecipeGenerator<H>(on_home: H) -> impl IntoView
where
    H: Fn() + Copy + Send + Sync + 'static,
{
    let settings = expect_context::<Settings>();
    let wizard = RwSignal::new(RecipeWizard::new(Arc::new(ObjectUrlPreviews)));
    let notice = RwSignal::new(None::<String>);

    // 画面を離れるときにプレビューURLを解放（生成中でも）
    on_cleanup(move || {
        wizard.try_update(|w| w.release_previews());
    });

    let step = Memo::new(move |_| wizard.with(|w| w.step()));
    let status = Memo::new(move |_| wizard.with(|w| w.status().clone()));
    let generating = move || matches!(status.get(), Status::Generating(_));

    let set_field = move |field: RecipeField| {
        wizard.update(|w| warn_on_err(w.update_form(|form| form.set_field(field))));
    };
    let toggle = move |t: RecipeToggle| {
        wizard.update(|w| warn_on_err(w.update_form(|form| form.toggle(t))));
    };
    let run_action = move |action: Action| {
        wizard.update(|w| match action {
            Action::TryAgain => {
                w.retry();
            }
            Action::StartOver => warn_on_err(w.reset()),
            Action::Proceed | Action::Redesign => {}
        });
    };

    let ingredients_step = move || {
        view! {
            <h2>"What's in your kitchen?"</h2>
            {IngredientCategory::ALL
                .iter()
                .copied()
                .map(|category| {
                    view! {
                        <ImageUploader
                            category=category
                            assets=move || wizard.with(|w| w.form().images().get(category).to_vec())
                            disabled=generating
                            on_added={move |files: Vec<ImagePayload>| {
                                wizard.try_update(|w| warn_on_err(w.stage_images(category, files)));
                            }}
                            on_remove=move |id: ImageId| {
                                wizard.update(|w| warn_on_err(w.unstage_image(category, id)));
                            }
                        />
                    }
                })
                .collect_view()}
            <ChipGroup
                label="Spices you have"
                options=Spice::ALL
                is_selected=move |s: Spice| wizard.with(|w| w.form().spices.contains(s))
                on_toggle=move |s: Spice| toggle(RecipeToggle::Spice(s))
            />
            <TextField
                label="Other spices"
                placeholder="e.g. garam masala, star anise"
                value=move || wizard.with(|w| w.form().other_spices.clone())
                on_input=move |v: String| set_field(RecipeField::OtherSpices(v))
            />
        }
    };

    let preferences_step = move || {
        view! {
            <h2>"Any preferences?"</h2>
            <ChipGroup
                label="Allergies"
                options=Allergy::ALL
                is_selected=move |a: Allergy| wizard.with(|w| w.form().allergies.contains(a))
                on_toggle=move |a: Allergy| toggle(RecipeToggle::Allergy(a))
            />
            <TextField
                label="Other allergies"
                placeholder="e.g. kiwi"
                value=move || wizard.with(|w| w.form().other_allergies.clone())
                on_input=move |v: String| set_field(RecipeField::OtherAllergies(v))
            />
            <ChipGroup
                label="Dietary choices"
                options=DietaryChoice::ALL
                is_selected=move |d: DietaryChoice| wizard.with(|w| w.form().dietary_choices.contains(d))
                on_toggle=move |d: DietaryChoice| toggle(RecipeToggle::Dietary(d))
            />
            <ChoiceSelect
                label="Mood"
                options=Mood::ALL
                value=move || wizard.with(|w| w.form().mood)
                on_change=move |m: Mood| set_field(RecipeField::Mood(m))
            />
        }
    };

    let constraints_step = move || {
        view! {
            <h2>"A few constraints"</h2>
            <RangeInput
                label="Max cooking time"
                min=*COOKING_TIME_RANGE.start()
                max=*COOKING_TIME_RANGE.end()
                step=COOKING_TIME_STEP
                unit="minutes"
                value=move || wizard.with(|w| w.form().cooking_time)
                on_change=move |v: u32| set_field(RecipeField::CookingTime(v))
            />
            <RangeInput
                label="Servings"
                min=*SERVINGS_RANGE.start()
                max=*SERVINGS_RANGE.end()
                step=1
                unit="people"
                value=move || wizard.with(|w| w.form().servings)
                on_change=move |v: u32| set_field(RecipeField::Servings(v))
            />
            <ChoiceSelect
                label="Meal type"
                options=MealType::ALL
                value=move || wizard.with(|w| w.form().meal_type)
                on_change=move |m: MealType| set_field(RecipeField::MealType(m))
            />
            <ChoiceSelect
                label="Cuisine"
                options=Cuisine::ALL
                value=move || wizard.with(|w| w.form().cuisine)
                on_change=move |c: Cuisine| set_field(RecipeField::Cuisine(c))
            />
        }
    };

    let results_step = move || {
        let cards: Vec<RecipeCardView> =
            wizard.with(|w| w.results().recipes().iter().map(RecipeCardView::from).collect());
        view! {
            <h2>"Here's what you can make"</h2>
            <div class="recipe-grid">
                {cards.into_iter().map(|card| view! { <RecipeCard card=card /> }).collect_view()}
            </div>
        }
    };

    view! {
        <div class="wizard">
            <button class="btn btn-tertiary btn-small" on:click=move |_| on_home()>"← Home"</button>
            <StepIndicator step=move || step.get() total=4 labels=STEP_LABELS />

            {move || match status.get() {
                Status::Generating(_) => view! {
                    <div class="loading">
                        <div class="spinner"></div>
                        <p>"Whipping up recipe ideas..."</p>
                    </div>
                }
                .into_any(),
                Status::Error(e) => view! {
                    <div class="error-panel">
                        <h3>"Oops! There was a hiccup."</h3>
                        <p>{e.to_string()}</p>
                    </div>
                }
                .into_any(),
                Status::Idle | Status::Ready => match step.get() {
                    1 => ingredients_step().into_any(),
                    2 => preferences_step().into_any(),
                    3 => constraints_step().into_any(),
                    _ => results_step().into_any(),
                },
            }}

            <Show when=move || notice.get().is_some()>
                <p class="warning">{move || notice.get().unwrap_or_default()}</p>
            </Show>

            <Show when=move || matches!(status.get(), Status::Idle | Status::Ready) && step.get() < 4>
                <div class="nav">
                    <button
                        class="btn btn-secondary"
                        prop:disabled=move || step.get() == 1
                        on:click=move |_| {
                            wizard.update(|w| {
                                w.back();
                            });
                        }
                    >
                        "Back"
                    </button>
                    {move || {
                        if step.get() < 3 {
                            view! {
                                <button
                                    class="btn btn-primary"
                                    on:click=move |_| {
                                        wizard.update(|w| {
                                            w.next();
                                        });
                                    }
                                >
                                    "Next"
                                </button>
                            }
                            .into_any()
                        } else {
                            view! {
                                <button
                                    class="btn btn-primary"
                                    on:click=move |_| submit(wizard, settings, notice)
                                >
                                    "Generate Recipes"
                                </button>
                            }
                            .into_any()
                        }
                    }}
                </div>
            </Show>

            {move || {
                let actions = wizard.with(|w| recipe_actions(&w.snapshot()));
                (!actions.is_empty()).then(|| view! { <ActionBar actions=actions on_action=run_action /> })
            }}
        </div>
    }
}
