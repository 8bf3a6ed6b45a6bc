//! 対話式ウィザード
//!
//! dialoguer でステップごとに入力を受け、共通ウィザードを進める。

use crate::display::{print_error, print_menu, print_plan, print_recipes, submit_with_spinner};
use crate::error::{PantryError, Result};
use crate::scanner::{collect_images, load_images};
use dialoguer::{Input, MultiSelect, Select};
use pantry_pal_common::render::{feast_actions, recipe_actions, Action};
use pantry_pal_common::wizard::Flow;
use pantry_pal_common::{
    AgeGroup, Allergy, Cuisine, DietaryChoice, FeastField, FeastToggle, FeastWizard, FormState,
    GenerationClient, IngredientCategory, MealType, Mood, RecipeField, RecipeToggle, RecipeWizard,
    Selection, Spice, Status, Wizard,
};
use std::fmt::Display;
use std::path::PathBuf;

fn prompt_err(e: dialoguer::Error) -> PantryError {
    PantryError::Prompt(e.to_string())
}

fn select<T: Copy + PartialEq + Display>(prompt: &str, options: &[T], current: T) -> Result<T> {
    let default = options.iter().position(|o| *o == current).unwrap_or(0);
    let index = Select::new()
        .with_prompt(prompt)
        .items(options)
        .default(default)
        .interact()
        .map_err(prompt_err)?;
    Ok(options[index])
}

/// 複数選択。選択状態が変わった値（トグル対象）を返す
fn multi_select<T: Copy + PartialEq + Display>(
    prompt: &str,
    options: &[T],
    current: &Selection<T>,
) -> Result<Vec<T>> {
    let defaults: Vec<bool> = options.iter().map(|o| current.contains(*o)).collect();
    let picked = MultiSelect::new()
        .with_prompt(prompt)
        .items(options)
        .defaults(&defaults)
        .interact()
        .map_err(prompt_err)?;

    Ok(changed_members(options, current, &picked))
}

fn changed_members<T: Copy + PartialEq>(options: &[T], current: &Selection<T>, picked: &[usize]) -> Vec<T> {
    options
        .iter()
        .enumerate()
        .filter(|(i, o)| picked.contains(i) != current.contains(**o))
        .map(|(_, o)| *o)
        .collect()
}

fn input_text(prompt: &str, current: &str) -> Result<String> {
    Input::<String>::new()
        .with_prompt(prompt)
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)
}

fn input_number(prompt: &str, current: u32) -> Result<u32> {
    Input::<u32>::new()
        .with_prompt(prompt)
        .default(current)
        .interact_text()
        .map_err(prompt_err)
}

/// "Next" / "Back" の選択。trueなら進む
fn confirm_forward(forward_label: &str) -> Result<bool> {
    let index = Select::new()
        .items(&[forward_label, "Back"])
        .default(0)
        .interact()
        .map_err(prompt_err)?;
    Ok(index == 0)
}

/// 結果画面の操作を選ぶ。Noneは終了
fn choose_action(actions: &[Action]) -> Result<Option<Action>> {
    let mut labels: Vec<&str> = actions.iter().map(|a| a.label()).collect();
    labels.push("Quit");
    let index = Select::new()
        .with_prompt("What next?")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(prompt_err)?;
    Ok(actions.get(index).copied())
}

fn header<F: Flow>(wizard: &Wizard<F>, title: &str) {
    println!("\n[{}/{}] {}", wizard.step(), F::STEPS, title);
}

/// カテゴリごとに写真のパスを入力してステージングする
fn stage_photos<F: Flow>(wizard: &mut Wizard<F>, max_image_size: u32) -> Result<()> {
    for &category in IngredientCategory::ALL {
        let staged = wizard.form().images().get(category).len();
        loop {
            let prompt = format!(
                "{} photos, files or folders separated by commas ({} staged, empty to skip)",
                category, staged
            );
            let answer = input_text(&prompt, "")?;
            let paths: Vec<PathBuf> = answer
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(PathBuf::from)
                .collect();
            if paths.is_empty() {
                break;
            }

            match collect_images(&paths).and_then(|infos| load_images(&infos, max_image_size)) {
                Ok(payloads) => {
                    let added = wizard.stage_images(category, payloads)?;
                    println!("✔ {} photo(s) added to {}", added.len(), category);
                    break;
                }
                Err(e) => println!("⚠ {}", e),
            }
        }
    }
    Ok(())
}

// =============================================
// レシピ
// =============================================

fn edit_recipe_preferences(wizard: &mut RecipeWizard) -> Result<()> {
    let form = wizard.form().clone();
    let diet = multi_select("Dietary choices", DietaryChoice::ALL, &form.dietary_choices)?;
    let mood = select("Mood", Mood::ALL, form.mood)?;
    let meal = select("Meal type", MealType::ALL, form.meal_type)?;
    let cuisine = select("Cuisine", Cuisine::ALL, form.cuisine)?;

    wizard.update_form(|f| {
        diet.iter()
            .fold(f.clone(), |f, d| f.toggle(RecipeToggle::Dietary(*d)))
            .set_field(RecipeField::Mood(mood))
            .set_field(RecipeField::MealType(meal))
            .set_field(RecipeField::Cuisine(cuisine))
    })?;
    Ok(())
}

fn edit_recipe_constraints(wizard: &mut RecipeWizard) -> Result<()> {
    let form = wizard.form().clone();
    let time = input_number("Max cooking time in minutes (10-120)", form.cooking_time)?;
    let servings = input_number("Servings (1-20)", form.servings)?;
    let allergies = multi_select("Allergies", Allergy::ALL, &form.allergies)?;
    let other_allergies = input_text("Other allergies", &form.other_allergies)?;
    let spices = multi_select("Spices you have", Spice::ALL, &form.spices)?;
    let other_spices = input_text("Other spices", &form.other_spices)?;

    wizard.update_form(|f| {
        let f = allergies
            .iter()
            .fold(f.clone(), |f, a| f.toggle(RecipeToggle::Allergy(*a)));
        spices
            .iter()
            .fold(f, |f, s| f.toggle(RecipeToggle::Spice(*s)))
            .set_field(RecipeField::CookingTime(time))
            .set_field(RecipeField::Servings(servings))
            .set_field(RecipeField::OtherAllergies(other_allergies))
            .set_field(RecipeField::OtherSpices(other_spices))
    })?;
    Ok(())
}

/// レシピウィザードを対話で進める
pub async fn run_recipe<C: GenerationClient>(
    wizard: &mut RecipeWizard,
    client: &C,
    max_image_size: u32,
) -> Result<()> {
    loop {
        match (wizard.step(), wizard.status().clone()) {
            (_, Status::Error(error)) => {
                print_error(&error);
                match choose_action(&recipe_actions(&wizard.snapshot()))? {
                    Some(Action::TryAgain) => {
                        wizard.retry();
                    }
                    Some(_) => wizard.reset()?,
                    None => return Err(error.into()),
                }
            }
            (1, _) => {
                header(wizard, "What ingredients do you have?");
                stage_photos(wizard, max_image_size)?;
                wizard.next();
            }
            (2, _) => {
                header(wizard, "Your preferences");
                edit_recipe_preferences(wizard)?;
                if confirm_forward("Next")? {
                    wizard.next();
                } else {
                    wizard.back();
                }
            }
            (3, _) => {
                header(wizard, "Final touches");
                edit_recipe_constraints(wizard)?;
                if confirm_forward("Generate recipes")? {
                    // 失敗時は次のループでエラー表示
                    let _ = submit_with_spinner(wizard, client, "Whipping up recipe ideas...").await;
                } else {
                    wizard.back();
                }
            }
            _ => {
                header(wizard, "Your recipes");
                print_recipes(wizard.results().recipes());
                match choose_action(&recipe_actions(&wizard.snapshot()))? {
                    Some(Action::StartOver) => wizard.reset()?,
                    Some(_) => {}
                    None => return Ok(()),
                }
            }
        }
    }
}

// =============================================
// 宴会
// =============================================

fn edit_feast_details(wizard: &mut FeastWizard) -> Result<()> {
    let form = wizard.form().clone();
    let theme = input_text("Theme or occasion (e.g. Summer BBQ)", &form.theme)?;
    let guests = input_number("Number of guests (1-100)", form.guests)?;
    let age = select("Guest age profile", AgeGroup::ALL, form.age_group)?;
    let cuisine = select("Cuisine", Cuisine::ALL, form.cuisine)?;
    let allergies = multi_select("Allergies to avoid", Allergy::ALL, &form.allergies)?;
    let other_allergies = input_text("Other allergies", &form.other_allergies)?;

    wizard.update_form(|f| {
        allergies
            .iter()
            .fold(f.clone(), |f, a| f.toggle(FeastToggle::Allergy(*a)))
            .set_field(FeastField::Theme(theme))
            .set_field(FeastField::Guests(guests))
            .set_field(FeastField::AgeGroup(age))
            .set_field(FeastField::Cuisine(cuisine))
            .set_field(FeastField::OtherAllergies(other_allergies))
    })?;
    Ok(())
}

fn edit_feast_inventory(wizard: &mut FeastWizard, max_image_size: u32) -> Result<()> {
    stage_photos(wizard, max_image_size)?;
    let form = wizard.form().clone();
    let spices = multi_select("Spices you have", Spice::ALL, &form.spices)?;
    let other_spices = input_text("Other spices", &form.other_spices)?;

    wizard.update_form(|f| {
        spices
            .iter()
            .fold(f.clone(), |f, s| f.toggle(FeastToggle::Spice(*s)))
            .set_field(FeastField::OtherSpices(other_spices))
    })?;
    Ok(())
}

/// 宴会ウィザードを対話で進める
pub async fn run_feast<C: GenerationClient>(
    wizard: &mut FeastWizard,
    client: &C,
    max_image_size: u32,
) -> Result<()> {
    loop {
        let has_menu = wizard.results().menu().is_some();
        match (wizard.step(), wizard.status().clone()) {
            (_, Status::Error(error)) => {
                print_error(&error);
                match choose_action(&feast_actions(&wizard.snapshot()))? {
                    Some(Action::TryAgain) => {
                        wizard.retry();
                    }
                    Some(_) => wizard.reset()?,
                    None => return Err(error.into()),
                }
            }
            (1, _) if !has_menu => {
                header(wizard, "Plan your perfect feast");
                edit_feast_details(wizard)?;
                let outcome = submit_with_spinner(wizard, client, "Planning your feast...").await;
                if let (Err(e), Status::Idle) = (&outcome, wizard.status()) {
                    println!("⚠ {}", e);
                }
            }
            (1, _) => {
                header(wizard, "Your menu");
                if let Some(menu) = wizard.results().menu() {
                    print_menu(menu);
                }
                match choose_action(&feast_actions(&wizard.snapshot()))? {
                    Some(Action::Proceed) => {
                        wizard.proceed();
                    }
                    Some(Action::Redesign) => wizard.redesign()?,
                    Some(_) => wizard.reset()?,
                    None => return Ok(()),
                }
            }
            (2, _) => {
                header(wizard, "What do you have in the kitchen?");
                edit_feast_inventory(wizard, max_image_size)?;
                if confirm_forward("Create the detailed plan")? {
                    let _ = submit_with_spinner(wizard, client, "Writing the recipes...").await;
                } else {
                    wizard.back();
                }
            }
            _ => {
                header(wizard, "Your feast plan");
                if let Some(plan) = wizard.results().plan() {
                    print_plan(plan);
                }
                match choose_action(&feast_actions(&wizard.snapshot()))? {
                    Some(_) => wizard.reset()?,
                    None => return Ok(()),
                }
            }
        }
    }
}
