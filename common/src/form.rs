//! フォーム状態
//!
//! ウィザードの各ステップで編集する入力値。更新は常に新しいスナップショットを返し、
//! 既存のスナップショットは変更しない（画像の追加・削除のみウィザード経由）。

use crate::options::{AgeGroup, Allergy, Cuisine, DietaryChoice, MealType, Mood, Spice};
use crate::staging::ImageStaging;
use std::fmt::Display;
use std::ops::RangeInclusive;

/// 調理時間の範囲（分）
pub const COOKING_TIME_RANGE: RangeInclusive<u32> = 10..=120;
/// 調理時間スライダーの刻み
pub const COOKING_TIME_STEP: u32 = 5;
/// 人数の範囲
pub const SERVINGS_RANGE: RangeInclusive<u32> = 1..=20;
/// ゲスト数の範囲
pub const GUESTS_RANGE: RangeInclusive<u32> = 1..=100;

fn clamp(value: u32, range: &RangeInclusive<u32>) -> u32 {
    value.clamp(*range.start(), *range.end())
}

/// 複数選択（重複なし・選択順を保持）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<T> {
    items: Vec<T>,
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Copy + PartialEq> Selection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 未選択なら追加、選択済みなら除去した新しい選択を返す
    pub fn toggled(&self, value: T) -> Self {
        let mut items = self.items.clone();
        match items.iter().position(|v| *v == value) {
            Some(index) => {
                items.remove(index);
            }
            None => items.push(value),
        }
        Self { items }
    }

    pub fn contains(&self, value: T) -> bool {
        self.items.contains(&value)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Copy + PartialEq> FromIterator<T> for Selection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::default(), |acc, value| {
                if acc.contains(value) {
                    acc
                } else {
                    acc.toggled(value)
                }
            })
    }
}

/// 選択肢と自由入力を ", " で連結する
///
/// 自由入力はカンマで区切り、空要素と選択肢に完全一致する要素は重ねない
pub fn join_with_other<T: Display>(selected: &[T], other: &str) -> String {
    let mut parts: Vec<String> = selected.iter().map(|v| v.to_string()).collect();
    let labels = parts.len();
    for token in other.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !parts[..labels].iter().any(|p| p == token) {
            parts.push(token.to_string());
        }
    }
    parts.join(", ")
}

/// 両フォーム共通のアクセサ
pub trait FormState: Clone + PartialEq + Default {
    fn images(&self) -> &ImageStaging;
    fn images_mut(&mut self) -> &mut ImageStaging;

    /// 画像ステージングを編集した新しいスナップショット
    fn with_images<R>(&self, edit: impl FnOnce(&mut ImageStaging) -> R) -> (Self, R) {
        let mut next = self.clone();
        let out = edit(next.images_mut());
        (next, out)
    }
}

// =============================================
// レシピ生成フォーム
// =============================================

/// レシピ生成フォーム
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeForm {
    pub images: ImageStaging,
    pub spices: Selection<Spice>,
    pub other_spices: String,
    pub allergies: Selection<Allergy>,
    pub other_allergies: String,
    pub dietary_choices: Selection<DietaryChoice>,
    pub mood: Mood,
    pub cooking_time: u32,
    pub servings: u32,
    pub meal_type: MealType,
    pub cuisine: Cuisine,
}

impl Default for RecipeForm {
    fn default() -> Self {
        Self {
            images: ImageStaging::default(),
            spices: Selection::new(),
            other_spices: String::new(),
            allergies: Selection::new(),
            other_allergies: String::new(),
            dietary_choices: Selection::new(),
            mood: Mood::ComfortFood,
            cooking_time: 30,
            servings: 2,
            meal_type: MealType::Dinner,
            cuisine: Cuisine::Unspecified,
        }
    }
}

/// レシピフォームの単一フィールド更新
#[derive(Debug, Clone, PartialEq)]
pub enum RecipeField {
    OtherSpices(String),
    OtherAllergies(String),
    Mood(Mood),
    CookingTime(u32),
    Servings(u32),
    MealType(MealType),
    Cuisine(Cuisine),
}

/// レシピフォームの複数選択トグル
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeToggle {
    Spice(Spice),
    Allergy(Allergy),
    Dietary(DietaryChoice),
}

impl RecipeForm {
    /// フィールドを1つ置き換えた新しいスナップショット
    pub fn set_field(&self, field: RecipeField) -> Self {
        let mut next = self.clone();
        match field {
            RecipeField::OtherSpices(v) => next.other_spices = v,
            RecipeField::OtherAllergies(v) => next.other_allergies = v,
            RecipeField::Mood(v) => next.mood = v,
            RecipeField::CookingTime(v) => next.cooking_time = clamp(v, &COOKING_TIME_RANGE),
            RecipeField::Servings(v) => next.servings = clamp(v, &SERVINGS_RANGE),
            RecipeField::MealType(v) => next.meal_type = v,
            RecipeField::Cuisine(v) => next.cuisine = v,
        }
        next
    }

    /// 複数選択をトグルした新しいスナップショット
    pub fn toggle(&self, toggle: RecipeToggle) -> Self {
        let mut next = self.clone();
        match toggle {
            RecipeToggle::Spice(v) => next.spices = self.spices.toggled(v),
            RecipeToggle::Allergy(v) => next.allergies = self.allergies.toggled(v),
            RecipeToggle::Dietary(v) => next.dietary_choices = self.dietary_choices.toggled(v),
        }
        next
    }

    pub fn all_spices(&self) -> String {
        join_with_other(self.spices.as_slice(), &self.other_spices)
    }

    pub fn all_allergies(&self) -> String {
        join_with_other(self.allergies.as_slice(), &self.other_allergies)
    }

    pub fn all_dietary_choices(&self) -> String {
        join_with_other(self.dietary_choices.as_slice(), "")
    }
}

impl FormState for RecipeForm {
    fn images(&self) -> &ImageStaging {
        &self.images
    }

    fn images_mut(&mut self) -> &mut ImageStaging {
        &mut self.images
    }
}

// =============================================
// 宴会フォーム
// =============================================

/// 宴会（フィースト）フォーム
///
/// 後半（在庫確認）の画像・スパイスは詳細プラン生成でのみ使う
#[derive(Debug, Clone, PartialEq)]
pub struct FeastForm {
    pub theme: String,
    pub guests: u32,
    pub age_group: AgeGroup,
    pub cuisine: Cuisine,
    pub allergies: Selection<Allergy>,
    pub other_allergies: String,
    pub images: ImageStaging,
    pub spices: Selection<Spice>,
    pub other_spices: String,
}

impl Default for FeastForm {
    fn default() -> Self {
        Self {
            theme: String::new(),
            guests: 4,
            age_group: AgeGroup::MixedAdults,
            cuisine: Cuisine::Unspecified,
            allergies: Selection::new(),
            other_allergies: String::new(),
            images: ImageStaging::default(),
            spices: Selection::new(),
            other_spices: String::new(),
        }
    }
}

/// 宴会フォームの単一フィールド更新
#[derive(Debug, Clone, PartialEq)]
pub enum FeastField {
    Theme(String),
    Guests(u32),
    AgeGroup(AgeGroup),
    Cuisine(Cuisine),
    OtherAllergies(String),
    OtherSpices(String),
}

/// 宴会フォームの複数選択トグル
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeastToggle {
    Allergy(Allergy),
    Spice(Spice),
}

impl FeastForm {
    pub fn set_field(&self, field: FeastField) -> Self {
        let mut next = self.clone();
        match field {
            FeastField::Theme(v) => next.theme = v,
            FeastField::Guests(v) => next.guests = clamp(v, &GUESTS_RANGE),
            FeastField::AgeGroup(v) => next.age_group = v,
            FeastField::Cuisine(v) => next.cuisine = v,
            FeastField::OtherAllergies(v) => next.other_allergies = v,
            FeastField::OtherSpices(v) => next.other_spices = v,
        }
        next
    }

    pub fn toggle(&self, toggle: FeastToggle) -> Self {
        let mut next = self.clone();
        match toggle {
            FeastToggle::Allergy(v) => next.allergies = self.allergies.toggled(v),
            FeastToggle::Spice(v) => next.spices = self.spices.toggled(v),
        }
        next
    }

    pub fn all_allergies(&self) -> String {
        join_with_other(self.allergies.as_slice(), &self.other_allergies)
    }

    pub fn all_spices(&self) -> String {
        join_with_other(self.spices.as_slice(), &self.other_spices)
    }
}

impl FormState for FeastForm {
    fn images(&self) -> &ImageStaging {
        &self.images
    }

    fn images_mut(&mut self) -> &mut ImageStaging {
        &mut self.images
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =============================================
    // Selection テスト
    // =============================================

    #[test]
    fn test_toggle_twice_restores_membership() {
        let original: Selection<Allergy> = [Allergy::Milk, Allergy::Soy].into_iter().collect();

        for value in Allergy::ALL.iter().copied() {
            let round_trip = original.toggled(value).toggled(value);
            assert_eq!(
                round_trip.as_slice().len(),
                original.len(),
                "membership changed for {}",
                value
            );
            for member in original.as_slice() {
                assert!(round_trip.contains(*member));
            }
        }
    }

    #[test]
    fn test_toggle_removes_selected() {
        let selection = Selection::new().toggled(Spice::Cumin).toggled(Spice::Salt);
        let removed = selection.toggled(Spice::Cumin);
        assert_eq!(removed.as_slice(), &[Spice::Salt]);
        // 元のスナップショットは変わらない
        assert_eq!(selection.as_slice(), &[Spice::Cumin, Spice::Salt]);
    }

    #[test]
    fn test_from_iter_deduplicates() {
        let selection: Selection<Spice> =
            [Spice::Basil, Spice::Basil, Spice::Oregano].into_iter().collect();
        assert_eq!(selection.as_slice(), &[Spice::Basil, Spice::Oregano]);
    }

    // =============================================
    // join_with_other テスト
    // =============================================

    #[test]
    fn test_join_with_other_appends_free_text() {
        let joined = join_with_other(&[Allergy::Milk, Allergy::Eggs], "kiwi");
        assert_eq!(joined, "Milk, Eggs, kiwi");
    }

    #[test]
    fn test_join_with_other_filters_empty() {
        assert_eq!(join_with_other(&[Allergy::Milk], "   "), "Milk");
        assert_eq!(join_with_other::<Allergy>(&[], ""), "");
        assert_eq!(join_with_other::<Allergy>(&[], "kiwi"), "kiwi");
    }

    #[test]
    fn test_join_with_other_skips_exact_duplicate() {
        assert_eq!(join_with_other(&[Allergy::Milk], "Milk"), "Milk");
        // 大文字小文字が違えば別扱い
        assert_eq!(join_with_other(&[Allergy::Milk], "milk"), "Milk, milk");
    }

    #[test]
    fn test_join_with_other_splits_free_text_list() {
        assert_eq!(join_with_other(&[Allergy::Milk], "Milk, kiwi"), "Milk, kiwi");
        assert_eq!(join_with_other(&[Allergy::Milk], " kiwi ,, Milk ,mango"), "Milk, kiwi, mango");

        let form = RecipeForm::default()
            .toggle(RecipeToggle::Allergy(Allergy::Milk))
            .set_field(RecipeField::OtherAllergies("Milk, kiwi".to_string()));
        assert_eq!(form.all_allergies(), "Milk, kiwi");
    }

    // =============================================
    // RecipeForm テスト
    // =============================================

    #[test]
    fn test_recipe_defaults() {
        let form = RecipeForm::default();
        assert_eq!(form.mood, Mood::ComfortFood);
        assert_eq!(form.cooking_time, 30);
        assert_eq!(form.servings, 2);
        assert_eq!(form.meal_type, MealType::Dinner);
        assert_eq!(form.cuisine, Cuisine::Unspecified);
        assert!(form.images.is_empty());
        assert!(form.spices.is_empty());
        assert_eq!(form.other_allergies, "");
    }

    #[test]
    fn test_recipe_set_field_returns_new_snapshot() {
        let form = RecipeForm::default();
        let updated = form.set_field(RecipeField::Cuisine(Cuisine::Thai));

        assert_eq!(updated.cuisine, Cuisine::Thai);
        assert_eq!(form.cuisine, Cuisine::Unspecified);
    }

    #[test]
    fn test_recipe_numeric_fields_clamped() {
        let form = RecipeForm::default()
            .set_field(RecipeField::CookingTime(500))
            .set_field(RecipeField::Servings(0));
        assert_eq!(form.cooking_time, 120);
        assert_eq!(form.servings, 1);

        let form = form.set_field(RecipeField::CookingTime(3));
        assert_eq!(form.cooking_time, 10);
    }

    #[test]
    fn test_recipe_toggle() {
        let form = RecipeForm::default()
            .toggle(RecipeToggle::Dietary(DietaryChoice::Vegan))
            .toggle(RecipeToggle::Allergy(Allergy::Peanuts));
        assert!(form.dietary_choices.contains(DietaryChoice::Vegan));
        assert!(form.allergies.contains(Allergy::Peanuts));

        let form = form.toggle(RecipeToggle::Dietary(DietaryChoice::Vegan));
        assert!(form.dietary_choices.is_empty());
    }

    #[test]
    fn test_recipe_all_allergies() {
        let form = RecipeForm::default()
            .toggle(RecipeToggle::Allergy(Allergy::Milk))
            .toggle(RecipeToggle::Allergy(Allergy::Eggs))
            .set_field(RecipeField::OtherAllergies("kiwi".to_string()));
        assert_eq!(form.all_allergies(), "Milk, Eggs, kiwi");
    }

    // =============================================
    // FeastForm テスト
    // =============================================

    #[test]
    fn test_feast_defaults() {
        let form = FeastForm::default();
        assert_eq!(form.theme, "");
        assert_eq!(form.guests, 4);
        assert_eq!(form.age_group, AgeGroup::MixedAdults);
        assert_eq!(form.cuisine, Cuisine::Unspecified);
        assert!(form.allergies.is_empty());
    }

    #[test]
    fn test_feast_guests_clamped() {
        let form = FeastForm::default().set_field(FeastField::Guests(250));
        assert_eq!(form.guests, 100);
    }

    #[test]
    fn test_feast_toggle_and_join() {
        let form = FeastForm::default()
            .toggle(FeastToggle::Spice(Spice::Paprika))
            .set_field(FeastField::OtherSpices("sumac".to_string()));
        assert_eq!(form.all_spices(), "Paprika, sumac");
    }
}
