//! 宴会プランナー
//!
//! 1. テーマ・ゲスト → メニュー案 → 2. 在庫確認 → 3. 詳細プラン

use crate::app::{submit, warn_on_err, Settings};
use crate::components::choices::{ChipGroup, ChoiceSelect, RangeInput, TextField};
use crate::components::image_uploader::ImageUploader;
use crate::components::results::{ActionBar, MenuCard, PlanCard};
use crate::components::step_indicator::StepIndicator;
use crate::previews::ObjectUrlPreviews;
use leptos::prelude::*;
use pantry_pal_common::form::GUESTS_RANGE;
use pantry_pal_common::render::feast_actions;
use pantry_pal_common::{
    Action, AgeGroup, Allergy, Cuisine, FeastField, FeastToggle, FeastWizard, FormState, ImageId,
    ImagePayload, IngredientCategory, MenuView, PlanView, Spice, Status,
};
use std::sync::Arc;

const STEP_LABELS: &[&str] = &["Feast Details", "Your Inventory", "Feast Plan"];

#[component]
pub fn FeastPlanner<H>(on_home: H) -> impl IntoView
where
    H: Fn() + Copy + Send + Sync + 'static,
{
    let settings = expect_context::<Settings>();
    let wizard = RwSignal::new(FeastWizard::new(Arc::new(ObjectUrlPreviews)));
    let notice = RwSignal::new(None::<String>);

    // 生成中でもプレビューURLは解放する
    on_cleanup(move || {
        wizard.try_update(|w| w.release_previews());
    });

    let step = Memo::new(move |_| wizard.with(|w| w.step()));
    let status = Memo::new(move |_| wizard.with(|w| w.status().clone()));
    let has_menu = Memo::new(move |_| wizard.with(|w| w.results().menu().is_some()));
    let generating = move || matches!(status.get(), Status::Generating(_));

    let set_field = move |field: FeastField| {
        wizard.update(|w| warn_on_err(w.update_form(|form| form.set_field(field))));
    };
    let toggle = move |t: FeastToggle| {
        wizard.update(|w| warn_on_err(w.update_form(|form| form.toggle(t))));
    };
    let run_action = move |action: Action| {
        wizard.update(|w| match action {
            Action::Proceed => {
                w.proceed();
            }
            Action::Redesign => warn_on_err(w.redesign()),
            Action::TryAgain => {
                w.retry();
            }
            Action::StartOver => warn_on_err(w.reset()),
        });
    };

    let details_form = move || {
        view! {
            <h2>"Plan your feast"</h2>
            <TextField
                label="Theme or occasion"
                placeholder="e.g. Diwali dinner, Summer BBQ"
                value=move || wizard.with(|w| w.form().theme.clone())
                on_input=move |v: String| set_field(FeastField::Theme(v))
            />
            <RangeInput
                label="Guests"
                min=*GUESTS_RANGE.start()
                max=*GUESTS_RANGE.end()
                step=1
                unit="people"
                value=move || wizard.with(|w| w.form().guests)
                on_change=move |v: u32| set_field(FeastField::Guests(v))
            />
            <ChoiceSelect
                label="Age group"
                options=AgeGroup::ALL
                value=move || wizard.with(|w| w.form().age_group)
                on_change=move |a: AgeGroup| set_field(FeastField::AgeGroup(a))
            />
            <ChoiceSelect
                label="Cuisine"
                options=Cuisine::ALL
                value=move || wizard.with(|w| w.form().cuisine)
                on_change=move |c: Cuisine| set_field(FeastField::Cuisine(c))
            />
            <ChipGroup
                label="Allergies"
                options=Allergy::ALL
                is_selected=move |a: Allergy| wizard.with(|w| w.form().allergies.contains(a))
                on_toggle=move |a: Allergy| toggle(FeastToggle::Allergy(a))
            />
            <TextField
                label="Other allergies"
                placeholder="e.g. kiwi"
                value=move || wizard.with(|w| w.form().other_allergies.clone())
                on_input=move |v: String| set_field(FeastField::OtherAllergies(v))
            />
            <div class="nav">
                <button class="btn btn-primary" on:click=move |_| submit(wizard, settings, notice)>
                    "Design the Menu"
                </button>
            </div>
        }
    };

    let menu_card = move || {
        let menu = wizard.with(|w| w.results().menu().map(MenuView::from));
        menu.map(|menu| view! { <MenuCard card=menu /> })
    };

    let inventory_step = move || {
        view! {
            <h2>"What do you already have?"</h2>
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
                on_toggle=move |s: Spice| toggle(FeastToggle::Spice(s))
            />
            <TextField
                label="Other spices"
                placeholder="e.g. saffron"
                value=move || wizard.with(|w| w.form().other_spices.clone())
                on_input=move |v: String| set_field(FeastField::OtherSpices(v))
            />
            <div class="nav">
                <button
                    class="btn btn-secondary"
                    on:click=move |_| {
                        wizard.update(|w| {
                            w.back();
                        });
                    }
                >
                    "Back to Menu"
                </button>
                <button class="btn btn-primary" on:click=move |_| submit(wizard, settings, notice)>
                    "Create Feast Plan"
                </button>
            </div>
        }
    };

    let plan_step = move || {
        let plan = wizard.with(|w| w.results().plan().map(PlanView::from));
        plan.map(|plan| view! { <PlanCard card=plan /> })
    };

    view! {
        <div class="wizard">
            <button class="btn btn-tertiary btn-small" on:click=move |_| on_home()>"← Home"</button>
            <StepIndicator step=move || step.get() total=3 labels=STEP_LABELS />

            {move || match status.get() {
                Status::Generating(kind) => view! {
                    <div class="loading">
                        <div class="spinner"></div>
                        <p>{format!("Working on your {}...", kind)}</p>
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
                    1 if has_menu.get() => menu_card().into_any(),
                    1 => details_form().into_any(),
                    2 => inventory_step().into_any(),
                    _ => plan_step().into_any(),
                },
            }}

            <Show when=move || status.get() == Status::Idle>
                {move || {
                    wizard
                        .with(|w| w.last_error().map(|e| e.to_string()))
                        .map(|message| view! { <p class="warning">{message}</p> })
                }}
            </Show>

            <Show when=move || notice.get().is_some()>
                <p class="warning">{move || notice.get().unwrap_or_default()}</p>
            </Show>

            {move || {
                let actions = wizard.with(|w| feast_actions(&w.snapshot()));
                (!actions.is_empty()).then(|| view! { <ActionBar actions=actions on_action=run_action /> })
            }}
        </div>
    }
}
