//! 画面出力
//!
//! 生成中のスピナーと、結果ビューのテキスト出力

use crate::error::Result;
use indicatif::{ProgressBar, ProgressStyle};
use pantry_pal_common::render::{MenuView, PlanView, RecipeCardView};
use pantry_pal_common::{FeastMenu, FeastPlan, GenerationClient, Recipe, Wizard};
use pantry_pal_common::wizard::Flow;
use serde::Serialize;
use std::path::Path;
use std::time::Duration;

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// スピナーを表示しながら送信する
///
/// 生成エラーはウィザードに保存されるのでそのまま返す
pub async fn submit_with_spinner<F, C>(
    wizard: &mut Wizard<F>,
    client: &C,
    message: &str,
) -> pantry_pal_common::Result<()>
where
    F: Flow,
    C: GenerationClient,
{
    let pb = spinner(message);
    let outcome = wizard.submit(client).await;
    pb.finish_and_clear();
    outcome
}

pub fn print_recipes(recipes: &[Recipe]) {
    for (i, recipe) in recipes.iter().enumerate() {
        println!("─── Recipe {} of {} ───", i + 1, recipes.len());
        println!("{}", RecipeCardView::from(recipe));
    }
}

pub fn print_menu(menu: &FeastMenu) {
    println!("{}", MenuView::from(menu));
}

pub fn print_plan(plan: &FeastPlan) {
    println!("{}", PlanView::from(plan));
}

pub fn print_error(error: &pantry_pal_common::Error) {
    println!("Oops! There was a hiccup.");
    println!("  {}", error);
}

/// 結果をJSONで保存
pub fn write_output<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)?;
    println!("✔ Saved: {}", path.display());
    Ok(())
}
