//! PantryPal Common Library
//!
//! CLIとWeb(WASM)で共有されるウィザード・プロンプト・表示ロジック

pub mod client;
pub mod error;
pub mod form;
pub mod gemini;
pub mod options;
pub mod parser;
pub mod prompts;
pub mod render;
pub mod schema;
pub mod staging;
pub mod types;
pub mod wizard;

pub use client::{invoke, CallKind, GenerationClient, GenerationRequest, InlineImage, ScriptedClient, DEFAULT_MODEL};
pub use error::{Error, Result, FORMAT_ERROR_MESSAGE};
pub use form::{FeastField, FeastForm, FeastToggle, FormState, RecipeField, RecipeForm, RecipeToggle, Selection};
pub use options::{AgeGroup, Allergy, Cuisine, DietaryChoice, IngredientCategory, MealType, Mood, Spice};
pub use parser::{extract_json, parse_feast_menu, parse_feast_plan, parse_recipes};
pub use render::{Action, MenuView, MissingItemsView, PlanView, RecipeCardView};
pub use staging::{FileNamePreviews, ImageAsset, ImageId, ImagePayload, ImageStaging, Preview, PreviewProvider};
pub use types::{Course, DetailedRecipe, FeastMenu, FeastPlan, Generated, Recipe};
pub use wizard::{FeastFlow, FeastWizard, Flow, RecipeFlow, RecipeWizard, Snapshot, Status, Wizard};
