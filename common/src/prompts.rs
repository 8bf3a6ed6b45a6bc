//! プロンプト生成モジュール
//!
//! CLIとWeb(WASM)で共有されるプロンプト生成ロジック:
//! - build_recipe_prompt: レシピ生成用
//! - build_feast_menu_prompt: 宴会メニュー案用
//! - build_feast_plan_prompt: 宴会詳細プラン用（承認済みメニューを含む）
//!
//! `*_request` はプロンプト・スキーマ・画像をまとめて [`GenerationRequest`] にする。

use crate::client::{CallKind, GenerationRequest, InlineImage};
use crate::form::{FeastForm, RecipeForm};
use crate::schema::{feast_menu_schema, feast_plan_schema, recipe_schema};
use crate::staging::ImageStaging;
use crate::types::FeastMenu;

/// スパイス未選択時の文言
pub const DEFAULT_SPICES: &str = "Basic spices like salt and pepper";

fn or_none(joined: String) -> String {
    if joined.is_empty() {
        "None".to_string()
    } else {
        joined
    }
}

fn spices_or_default(joined: String) -> String {
    if joined.is_empty() {
        DEFAULT_SPICES.to_string()
    } else {
        joined
    }
}

/// レシピ生成プロンプト
pub fn build_recipe_prompt(form: &RecipeForm) -> String {
    let cuisine = form
        .cuisine
        .specified()
        .unwrap_or("No specific preference, feel free to be creative!");
    let allergies = or_none(form.all_allergies());
    let dietary = or_none(form.all_dietary_choices());
    let spices = spices_or_default(form.all_spices());

    format!(
        r#"You are a creative chef's assistant. Your goal is to suggest delicious recipes using only the ingredients provided, minimizing waste and the need for new groceries. Based on the following images of ingredients and user preferences, generate 2 recipe ideas.

- **User Preferences:**
- Cuisine Preference: {cuisine}
- Allergies: {allergies} (strictly avoid these)
- Dietary Choices: {dietary}
- Desired Mood: {mood}
- Meal Type: {meal_type}
- Max Cooking Time: {cooking_time} minutes
- Servings: {servings} people
- Available Spices: {spices}

For each recipe, provide the recipe name, a description, ingredients used, step-by-step instructions, and a minimal list of essential items to buy if something crucial is missing. If nothing is missing, the 'missingItems' list should be empty. Ensure the cooking time for each recipe is within the user's specified limit and the recipe strongly reflects the chosen cuisine.

Return the response as a JSON array adhering to the provided schema.
"#,
        mood = form.mood,
        meal_type = form.meal_type,
        cooking_time = form.cooking_time,
        servings = form.servings,
    )
}

fn feast_details(form: &FeastForm) -> String {
    let cuisine = form
        .cuisine
        .specified()
        .unwrap_or("No specific preference, be creative with the theme.");
    let allergies = or_none(form.all_allergies());

    format!(
        r#"- **Theme/Occasion:** {theme}
- **Cuisine Preference:** {cuisine}
- **Number of Guests:** {guests}
- **Guest Age Profile:** {age_group}
- **Allergies to Avoid:** {allergies} (strictly avoid any ingredients related to these allergies)"#,
        theme = form.theme.trim(),
        guests = form.guests,
        age_group = form.age_group,
    )
}

/// 宴会メニュー案プロンプト
pub fn build_feast_menu_prompt(form: &FeastForm) -> String {
    format!(
        r#"You are an expert event caterer. Plan a full course menu (appetizer, main course, dessert, and a beverage suggestion) for a feast based on the following details:
{details}

The menu should be cohesive and appropriate for the theme and strongly reflect the chosen cuisine. For each dish, provide the name and a brief, enticing description. Return the response as a single JSON object adhering to the provided schema."#,
        details = feast_details(form),
    )
}

/// 宴会詳細プランプロンプト
pub fn build_feast_plan_prompt(form: &FeastForm, menu: &FeastMenu) -> String {
    let courses = menu
        .courses()
        .iter()
        .map(|(label, course)| format!("- **{}:** {} ({})", label, course.name, course.description))
        .collect::<Vec<_>>()
        .join("\n");
    let spices = spices_or_default(form.all_spices());

    format!(
        r#"You are an expert event caterer and chef. The host has approved the following menu, "{title}": {description}
{courses}

Feast details:
{details}
- **Available Spices:** {spices}

Using the ingredients shown in the attached images wherever possible, write one detailed recipe for every course of the approved menu, in menu order. For each recipe, provide the course (Appetizer, Main Course, Dessert or Beverage Suggestion), the recipe name, a short description, ingredients with quantities for all {guests} guests, and step-by-step instructions. Then provide a single consolidated list of items the host still needs to buy, with no duplicates across recipes. If nothing is missing, the 'missingItems' list should be empty.

Return the response as a single JSON object adhering to the provided schema."#,
        title = menu.menu_title,
        description = menu.description,
        details = feast_details(form),
        guests = form.guests,
    )
}

fn inline_images(images: &ImageStaging) -> Vec<InlineImage> {
    images
        .ordered()
        .map(|asset| InlineImage::from_payload(&asset.payload))
        .collect()
}

/// レシピ生成リクエスト（画像付き）
pub fn recipe_request(form: &RecipeForm) -> GenerationRequest {
    GenerationRequest {
        kind: CallKind::RecipeGeneration,
        prompt: build_recipe_prompt(form),
        schema: recipe_schema(),
        images: inline_images(&form.images),
    }
}

/// 宴会メニュー案リクエスト（テキストのみ）
pub fn feast_menu_request(form: &FeastForm) -> GenerationRequest {
    GenerationRequest {
        kind: CallKind::FeastMenuConcept,
        prompt: build_feast_menu_prompt(form),
        schema: feast_menu_schema(),
        images: Vec::new(),
    }
}

/// 宴会詳細プランリクエスト（在庫画像付き）
pub fn feast_plan_request(form: &FeastForm, menu: &FeastMenu) -> GenerationRequest {
    GenerationRequest {
        kind: CallKind::FeastDetailedPlan,
        prompt: build_feast_plan_prompt(form, menu),
        schema: feast_plan_schema(),
        images: inline_images(&form.images),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{FeastField, FeastToggle, FormState, RecipeField, RecipeToggle};
    use crate::options::{AgeGroup, Allergy, Cuisine, IngredientCategory, Spice};
    use crate::staging::tests::{payload, RecordingPreviews};
    use crate::types::Course;

    fn menu() -> FeastMenu {
        let course = |n: &str, d: &str| Course {
            name: n.to_string(),
            description: d.to_string(),
        };
        FeastMenu {
            menu_title: "Lantern Night".to_string(),
            description: "A glowing evening".to_string(),
            appetizer: course("Spring Rolls", "Crisp"),
            main_course: course("Mapo Tofu", "Numbing"),
            dessert: course("Mango Pudding", "Silky"),
            beverage: course("Jasmine Tea", "Floral"),
        }
    }

    // =============================================
    // build_recipe_prompt テスト
    // =============================================

    #[test]
    fn test_recipe_prompt_joins_allergies() {
        let form = RecipeForm::default()
            .toggle(RecipeToggle::Allergy(Allergy::Milk))
            .toggle(RecipeToggle::Allergy(Allergy::Eggs))
            .set_field(RecipeField::OtherAllergies("kiwi".to_string()));

        let prompt = build_recipe_prompt(&form);
        assert!(prompt.contains("- Allergies: Milk, Eggs, kiwi (strictly avoid these)"));
    }

    #[test]
    fn test_recipe_prompt_defaults() {
        let prompt = build_recipe_prompt(&RecipeForm::default());

        assert!(prompt.contains("generate 2 recipe ideas"));
        assert!(prompt.contains("Cuisine Preference: No specific preference, feel free to be creative!"));
        assert!(prompt.contains("- Allergies: None (strictly avoid these)"));
        assert!(prompt.contains("- Dietary Choices: None"));
        assert!(prompt.contains("- Desired Mood: Comfort Food"));
        assert!(prompt.contains("- Meal Type: Dinner"));
        assert!(prompt.contains("- Max Cooking Time: 30 minutes"));
        assert!(prompt.contains("- Servings: 2 people"));
        assert!(prompt.contains("- Available Spices: Basic spices like salt and pepper"));
        assert!(prompt.contains("JSON array adhering to the provided schema"));
    }

    #[test]
    fn test_recipe_prompt_specified_cuisine_and_spices() {
        let form = RecipeForm::default()
            .set_field(RecipeField::Cuisine(Cuisine::SouthIndian))
            .toggle(RecipeToggle::Spice(Spice::Turmeric))
            .toggle(RecipeToggle::Spice(Spice::Cumin));

        let prompt = build_recipe_prompt(&form);
        assert!(prompt.contains("- Cuisine Preference: South Indian\n"));
        assert!(prompt.contains("- Available Spices: Turmeric, Cumin"));
    }

    #[test]
    fn test_recipe_prompt_is_deterministic() {
        let form = RecipeForm::default().set_field(RecipeField::Servings(6));
        assert_eq!(build_recipe_prompt(&form), build_recipe_prompt(&form.clone()));
    }

    // =============================================
    // build_feast_menu_prompt テスト
    // =============================================

    #[test]
    fn test_feast_menu_prompt() {
        let form = FeastForm::default()
            .set_field(FeastField::Theme("  Diwali dinner ".to_string()))
            .set_field(FeastField::Guests(12))
            .set_field(FeastField::AgeGroup(AgeGroup::Seniors))
            .toggle(FeastToggle::Allergy(Allergy::Peanuts));

        let prompt = build_feast_menu_prompt(&form);
        assert!(prompt.contains("- **Theme/Occasion:** Diwali dinner\n"));
        assert!(prompt.contains("- **Cuisine Preference:** No specific preference, be creative with the theme."));
        assert!(prompt.contains("- **Number of Guests:** 12"));
        assert!(prompt.contains("- **Guest Age Profile:** Seniors"));
        assert!(prompt.contains("- **Allergies to Avoid:** Peanuts (strictly avoid any ingredients"));
        assert!(prompt.contains("single JSON object"));
    }

    // =============================================
    // build_feast_plan_prompt テスト
    // =============================================

    #[test]
    fn test_feast_plan_prompt_lists_courses() {
        let form = FeastForm::default().set_field(FeastField::Theme("Lunar New Year".to_string()));
        let prompt = build_feast_plan_prompt(&form, &menu());

        assert!(prompt.contains("\"Lantern Night\": A glowing evening"));
        assert!(prompt.contains("- **Appetizer:** Spring Rolls (Crisp)"));
        assert!(prompt.contains("- **Main Course:** Mapo Tofu (Numbing)"));
        assert!(prompt.contains("- **Beverage Suggestion:** Jasmine Tea (Floral)"));
        assert!(prompt.contains("- **Available Spices:** Basic spices like salt and pepper"));
        assert!(prompt.contains("for all 4 guests"));
    }

    // =============================================
    // リクエスト生成テスト
    // =============================================

    #[test]
    fn test_recipe_request_images_in_staging_order() {
        let previews = RecordingPreviews::default();
        let (form, _) = RecipeForm::default().with_images(|images| {
            images.add(IngredientCategory::Greens, vec![payload("mint")], &previews);
            images.add(IngredientCategory::Vegetables, vec![payload("okra")], &previews);
        });

        let request = recipe_request(&form);
        assert_eq!(request.kind, CallKind::RecipeGeneration);
        assert_eq!(request.images.len(), 2);
        // Vegetables が Greens より先
        assert_eq!(request.images[0].data, "b2tyYQ==");
        assert_eq!(request.images[1].data, "bWludA==");
        assert_eq!(request.schema, recipe_schema());
    }

    #[test]
    fn test_feast_menu_request_has_no_images() {
        let previews = RecordingPreviews::default();
        let (form, _) = FeastForm::default().with_images(|images| {
            images.add(IngredientCategory::Fruits, vec![payload("fig")], &previews);
        });

        let request = feast_menu_request(&form);
        assert!(request.images.is_empty());
        assert_eq!(request.kind, CallKind::FeastMenuConcept);

        let plan = feast_plan_request(&form, &menu());
        assert_eq!(plan.images.len(), 1);
        assert_eq!(plan.kind, CallKind::FeastDetailedPlan);
    }
}
