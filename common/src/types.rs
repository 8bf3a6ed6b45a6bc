//! 生成結果の型定義
//!
//! モデルが返すJSONをそのまま受ける値オブジェクト:
//! - Recipe: レシピ生成の出力（2件の配列）
//! - FeastMenu: 宴会メニュー案
//! - FeastPlan: 宴会の詳細プラン

use serde::{Deserialize, Serialize};

/// 生成されたレシピ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub recipe_name: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    #[serde(default)]
    pub missing_items: Vec<String>,
    pub cooking_time: u32, // 分
}

/// コース1品（名前と説明）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub name: String,
    pub description: String,
}

/// 宴会メニュー案
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeastMenu {
    pub menu_title: String,
    pub description: String,
    pub appetizer: Course,
    pub main_course: Course,
    pub dessert: Course,
    pub beverage: Course,
}

impl FeastMenu {
    /// 表示ラベル付きのコース一覧（前菜→メイン→デザート→飲み物）
    pub fn courses(&self) -> [(&'static str, &Course); 4] {
        [
            ("Appetizer", &self.appetizer),
            ("Main Course", &self.main_course),
            ("Dessert", &self.dessert),
            ("Beverage Suggestion", &self.beverage),
        ]
    }
}

/// 詳細プラン内のレシピ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedRecipe {
    pub course: String,
    pub recipe_name: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
}

/// 宴会の詳細プラン
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeastPlan {
    pub feast_title: String,
    pub feast_description: String,
    pub recipes: Vec<DetailedRecipe>,
    #[serde(default)]
    pub missing_items: Vec<String>,
}

/// パース済みの生成結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generated {
    Recipes(Vec<Recipe>),
    Menu(FeastMenu),
    Plan(FeastPlan),
}
