//! 結果表示
//!
//! 生成結果を表示用のビューモデルに変換する。CLIは `Display` 実装をそのまま出力し、
//! Webはフィールドを個別に描画する。

use crate::types::{FeastMenu, FeastPlan, Recipe};
use crate::wizard::{FeastFlow, RecipeFlow, Snapshot, Status};
use regex::Regex;
use std::collections::HashSet;
use std::fmt;

/// Swiggy Instamart 検索URL
pub const SWIGGY_SEARCH_URL: &str = "https://www.swiggy.com/instamart/search?query=";
/// Blinkit 検索URL
pub const BLINKIT_SEARCH_URL: &str = "https://blinkit.com/search?q=";

// =============================================
// 不足食材
// =============================================

/// 不足食材の重複除去
///
/// 前後空白を除き、連続空白を1つにまとめ、大文字小文字を無視して比較する。
/// 表記は最初に出現したものを残す
pub fn dedup_items(items: &[String]) -> Vec<String> {
    lazy_static::lazy_static! {
        static ref SPACES: Regex = Regex::new(r"\s+").unwrap();
    }

    let mut seen = HashSet::new();
    let mut result = Vec::new();
    for item in items {
        let cleaned = SPACES.replace_all(item.trim(), " ").into_owned();
        if cleaned.is_empty() {
            continue;
        }
        if seen.insert(cleaned.to_lowercase()) {
            result.push(cleaned);
        }
    }
    result
}

/// 買い物サイトへのリンク
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroceryLinks {
    pub swiggy: String,
    pub blinkit: String,
}

impl GroceryLinks {
    pub fn for_items(items: &[String]) -> Self {
        Self {
            swiggy: format!("{}{}", SWIGGY_SEARCH_URL, urlencoding::encode(&items.join(","))),
            blinkit: format!("{}{}", BLINKIT_SEARCH_URL, urlencoding::encode(&items.join(" "))),
        }
    }
}

/// 不足食材パネル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingItemsView {
    pub items: Vec<String>,
    pub links: GroceryLinks,
}

impl MissingItemsView {
    /// 重複除去後に空ならNone
    pub fn from_items(items: &[String]) -> Option<Self> {
        let items = dedup_items(items);
        if items.is_empty() {
            return None;
        }
        let links = GroceryLinks::for_items(&items);
        Some(Self { items, links })
    }
}

impl fmt::Display for MissingItemsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Missing items:")?;
        for item in &self.items {
            writeln!(f, "  - {}", item)?;
        }
        writeln!(f, "Order on Swiggy Instamart: {}", self.links.swiggy)?;
        write!(f, "Order on Blinkit: {}", self.links.blinkit)
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, heading: &str, lines: &[String]) -> fmt::Result {
    writeln!(f, "{}:", heading)?;
    for line in lines {
        writeln!(f, "  - {}", line)?;
    }
    Ok(())
}

fn write_steps(f: &mut fmt::Formatter<'_>, steps: &[(usize, String)]) -> fmt::Result {
    writeln!(f, "Instructions:")?;
    for (number, text) in steps {
        writeln!(f, "  {}. {}", number, text)?;
    }
    Ok(())
}

fn numbered(instructions: &[String]) -> Vec<(usize, String)> {
    instructions
        .iter()
        .enumerate()
        .map(|(i, text)| (i + 1, text.clone()))
        .collect()
}

// =============================================
// レシピカード
// =============================================

/// レシピカード
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeCardView {
    pub title: String,
    pub description: String,
    pub cooking_time: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<(usize, String)>,
    pub missing: Option<MissingItemsView>,
}

impl From<&Recipe> for RecipeCardView {
    fn from(recipe: &Recipe) -> Self {
        Self {
            title: recipe.recipe_name.clone(),
            description: recipe.description.clone(),
            cooking_time: format!("{} minutes", recipe.cooking_time),
            ingredients: recipe.ingredients.clone(),
            instructions: numbered(&recipe.instructions),
            missing: MissingItemsView::from_items(&recipe.missing_items),
        }
    }
}

impl fmt::Display for RecipeCardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.title, self.cooking_time)?;
        writeln!(f, "{}", self.description)?;
        write_list(f, "Ingredients", &self.ingredients)?;
        write_steps(f, &self.instructions)?;
        if let Some(missing) = &self.missing {
            writeln!(f, "{}", missing)?;
        }
        Ok(())
    }
}

// =============================================
// メニュー
// =============================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseView {
    pub label: &'static str,
    pub name: String,
    pub description: String,
}

/// 宴会メニュー案
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuView {
    pub title: String,
    pub description: String,
    pub courses: Vec<CourseView>,
}

impl From<&FeastMenu> for MenuView {
    fn from(menu: &FeastMenu) -> Self {
        Self {
            title: menu.menu_title.clone(),
            description: menu.description.clone(),
            courses: menu
                .courses()
                .iter()
                .map(|&(label, course)| CourseView {
                    label,
                    name: course.name.clone(),
                    description: course.description.clone(),
                })
                .collect(),
        }
    }
}

impl fmt::Display for MenuView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", self.description)?;
        for course in &self.courses {
            writeln!(f)?;
            writeln!(f, "{}: {}", course.label, course.name)?;
            writeln!(f, "  {}", course.description)?;
        }
        Ok(())
    }
}

// =============================================
// 詳細プラン
// =============================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRecipeView {
    pub course: String,
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<(usize, String)>,
}

/// 宴会の詳細プラン
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanView {
    pub title: String,
    pub description: String,
    pub recipes: Vec<PlanRecipeView>,
    pub missing: Option<MissingItemsView>,
}

impl From<&FeastPlan> for PlanView {
    fn from(plan: &FeastPlan) -> Self {
        Self {
            title: plan.feast_title.clone(),
            description: plan.feast_description.clone(),
            recipes: plan
                .recipes
                .iter()
                .map(|r| PlanRecipeView {
                    course: r.course.clone(),
                    title: r.recipe_name.clone(),
                    description: r.description.clone(),
                    ingredients: r.ingredients.clone(),
                    instructions: numbered(&r.instructions),
                })
                .collect(),
            missing: MissingItemsView::from_items(&plan.missing_items),
        }
    }
}

impl fmt::Display for PlanView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", self.description)?;
        for recipe in &self.recipes {
            writeln!(f)?;
            writeln!(f, "[{}] {}", recipe.course, recipe.title)?;
            writeln!(f, "{}", recipe.description)?;
            write_list(f, "Ingredients", &recipe.ingredients)?;
            write_steps(f, &recipe.instructions)?;
        }
        if let Some(missing) = &self.missing {
            writeln!(f)?;
            writeln!(f, "{}", missing)?;
        }
        Ok(())
    }
}

// =============================================
// アクション
// =============================================

/// 結果画面で選べる操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Proceed,
    Redesign,
    StartOver,
    TryAgain,
}

impl Action {
    pub fn label(&self) -> &'static str {
        match self {
            Action::Proceed => "Looks good, plan the recipes",
            Action::Redesign => "Redesign the menu",
            Action::StartOver => "Start Over",
            Action::TryAgain => "Try Again",
        }
    }
}

/// レシピフローで選べる操作
pub fn recipe_actions(snapshot: &Snapshot<RecipeFlow>) -> Vec<Action> {
    match (&snapshot.status, snapshot.step) {
        (Status::Error(_), _) => vec![Action::TryAgain, Action::StartOver],
        (_, 4) => vec![Action::StartOver],
        _ => Vec::new(),
    }
}

/// 宴会フローで選べる操作
pub fn feast_actions(snapshot: &Snapshot<FeastFlow>) -> Vec<Action> {
    if matches!(snapshot.status, Status::Error(_)) {
        return vec![Action::TryAgain, Action::StartOver];
    }
    match snapshot.step {
        1 if snapshot.results.menu().is_some() => {
            vec![Action::Proceed, Action::Redesign, Action::StartOver]
        }
        3 if snapshot.results.plan().is_some() => vec![Action::StartOver],
        _ => Vec::new(),
    }
}
