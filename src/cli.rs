use clap::{Args, Parser, Subcommand};
use pantry_pal_common::{
    AgeGroup, Allergy, Cuisine, DietaryChoice, FeastField, FeastForm, FeastToggle,
    IngredientCategory, MealType, Mood, RecipeField, RecipeForm, RecipeToggle, Spice,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pantry-pal")]
#[command(about = "Turn photos of your ingredients into recipes and feast plans", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 手元の食材からレシピを2件提案
    Recipe(RecipeArgs),

    /// テーマに合わせた宴会メニューを作成
    Feast(FeastArgs),

    /// 設定を表示・変更
    Config {
        /// APIキーを保存
        #[arg(long)]
        set_api_key: Option<String>,

        /// 使用するモデルを保存
        #[arg(long)]
        model: Option<String>,

        /// 現在の設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// 食材写真とスパイス（カテゴリごとにファイルかフォルダを指定）
#[derive(Args, Debug, Default, Clone)]
pub struct InventoryArgs {
    /// 野菜の写真
    #[arg(long, num_args = 1.., value_name = "PATH")]
    pub vegetables: Vec<PathBuf>,

    /// 果物の写真
    #[arg(long, num_args = 1.., value_name = "PATH")]
    pub fruits: Vec<PathBuf>,

    /// タンパク質の写真
    #[arg(long, num_args = 1.., value_name = "PATH")]
    pub proteins: Vec<PathBuf>,

    /// 葉物・ハーブの写真
    #[arg(long, num_args = 1.., value_name = "PATH")]
    pub greens: Vec<PathBuf>,

    /// 手元のスパイス（カンマ区切り）
    #[arg(long, value_delimiter = ',')]
    pub spices: Vec<Spice>,

    /// その他のスパイス（自由入力）
    #[arg(long, default_value = "")]
    pub other_spices: String,
}

impl InventoryArgs {
    /// カテゴリ順に指定パスを返す
    pub fn by_category(&self) -> Vec<(IngredientCategory, &[PathBuf])> {
        vec![
            (IngredientCategory::Vegetables, self.vegetables.as_slice()),
            (IngredientCategory::Fruits, self.fruits.as_slice()),
            (IngredientCategory::Proteins, self.proteins.as_slice()),
            (IngredientCategory::Greens, self.greens.as_slice()),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.by_category().iter().all(|(_, paths)| paths.is_empty())
    }
}

#[derive(Args, Debug, Clone)]
pub struct RecipeArgs {
    #[command(flatten)]
    pub inventory: InventoryArgs,

    /// アレルギー（カンマ区切り）
    #[arg(long, value_delimiter = ',')]
    pub allergies: Vec<Allergy>,

    /// その他のアレルギー（自由入力）
    #[arg(long, default_value = "")]
    pub other_allergies: String,

    /// 食事制限（カンマ区切り）
    #[arg(long, value_delimiter = ',')]
    pub diet: Vec<DietaryChoice>,

    #[arg(long)]
    pub mood: Option<Mood>,

    /// 最大調理時間（分, 10-120）
    #[arg(long)]
    pub time: Option<u32>,

    /// 人数（1-20）
    #[arg(long)]
    pub servings: Option<u32>,

    #[arg(long)]
    pub meal: Option<MealType>,

    /// 料理ジャンル（"Any" で指定なし）
    #[arg(long)]
    pub cuisine: Option<Cuisine>,

    /// 対話モードで入力
    #[arg(short, long)]
    pub interactive: bool,

    /// 結果JSONの保存先
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl RecipeArgs {
    /// 引数からフォームを組み立てる（画像は別途）
    pub fn to_form(&self) -> RecipeForm {
        let mut form = RecipeForm::default()
            .set_field(RecipeField::OtherSpices(self.inventory.other_spices.clone()))
            .set_field(RecipeField::OtherAllergies(self.other_allergies.clone()));

        for spice in &self.inventory.spices {
            if !form.spices.contains(*spice) {
                form = form.toggle(RecipeToggle::Spice(*spice));
            }
        }
        for allergy in &self.allergies {
            if !form.allergies.contains(*allergy) {
                form = form.toggle(RecipeToggle::Allergy(*allergy));
            }
        }
        for choice in &self.diet {
            if !form.dietary_choices.contains(*choice) {
                form = form.toggle(RecipeToggle::Dietary(*choice));
            }
        }

        let fields = [
            self.mood.map(RecipeField::Mood),
            self.time.map(RecipeField::CookingTime),
            self.servings.map(RecipeField::Servings),
            self.meal.map(RecipeField::MealType),
            self.cuisine.map(RecipeField::Cuisine),
        ];
        fields
            .into_iter()
            .flatten()
            .fold(form, |form, field| form.set_field(field))
    }
}

#[derive(Args, Debug, Clone)]
pub struct FeastArgs {
    /// テーマ・行事（例: "Summer BBQ"）
    #[arg(long)]
    pub theme: Option<String>,

    /// ゲスト数（1-100）
    #[arg(long)]
    pub guests: Option<u32>,

    /// ゲストの年齢層
    #[arg(long)]
    pub age: Option<AgeGroup>,

    /// 料理ジャンル（"Any" で指定なし）
    #[arg(long)]
    pub cuisine: Option<Cuisine>,

    /// アレルギー（カンマ区切り）
    #[arg(long, value_delimiter = ',')]
    pub allergies: Vec<Allergy>,

    /// その他のアレルギー（自由入力）
    #[arg(long, default_value = "")]
    pub other_allergies: String,

    /// メニュー確定後に詳細プランまで作成
    #[arg(long)]
    pub plan: bool,

    #[command(flatten)]
    pub inventory: InventoryArgs,

    /// 対話モードで入力
    #[arg(short, long)]
    pub interactive: bool,

    /// 結果JSONの保存先
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl FeastArgs {
    pub fn to_form(&self) -> FeastForm {
        let mut form = FeastForm::default()
            .set_field(FeastField::Theme(self.theme.clone().unwrap_or_default()))
            .set_field(FeastField::OtherAllergies(self.other_allergies.clone()))
            .set_field(FeastField::OtherSpices(self.inventory.other_spices.clone()));

        for allergy in &self.allergies {
            if !form.allergies.contains(*allergy) {
                form = form.toggle(FeastToggle::Allergy(*allergy));
            }
        }
        for spice in &self.inventory.spices {
            if !form.spices.contains(*spice) {
                form = form.toggle(FeastToggle::Spice(*spice));
            }
        }

        let fields = [
            self.guests.map(FeastField::Guests),
            self.age.map(FeastField::AgeGroup),
            self.cuisine.map(FeastField::Cuisine),
        ];
        fields
            .into_iter()
            .flatten()
            .fold(form, |form, field| form.set_field(field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_recipe_args() {
        let cli = Cli::try_parse_from([
            "pantry-pal",
            "recipe",
            "--vegetables",
            "carrot.jpg",
            "potato.jpg",
            "--allergies",
            "Milk,Eggs",
            "--other-allergies",
            "kiwi",
            "--cuisine",
            "south indian",
            "--time",
            "500",
        ])
        .unwrap();

        let Commands::Recipe(args) = cli.command else {
            panic!("expected recipe command");
        };
        assert_eq!(args.inventory.vegetables.len(), 2);

        let form = args.to_form();
        assert_eq!(form.all_allergies(), "Milk, Eggs, kiwi");
        assert_eq!(form.cuisine, Cuisine::SouthIndian);
        assert_eq!(form.cooking_time, 120);
        assert_eq!(form.servings, 2);
    }

    #[test]
    fn test_parse_unknown_choice() {
        let result = Cli::try_parse_from(["pantry-pal", "recipe", "--mood", "Sleepy"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_flags_do_not_toggle_off() {
        let cli = Cli::try_parse_from(["pantry-pal", "recipe", "--spices", "Salt,Salt,Cumin"]).unwrap();
        let Commands::Recipe(args) = cli.command else {
            panic!("expected recipe command");
        };
        assert_eq!(args.to_form().all_spices(), "Salt, Cumin");
    }

    #[test]
    fn test_parse_feast_args() {
        let cli = Cli::try_parse_from([
            "pantry-pal",
            "feast",
            "--theme",
            "Diwali",
            "--guests",
            "12",
            "--age",
            "Seniors",
            "--plan",
            "--proteins",
            "fridge/",
        ])
        .unwrap();

        let Commands::Feast(args) = cli.command else {
            panic!("expected feast command");
        };
        assert!(args.plan);
        assert!(!args.inventory.is_empty());

        let form = args.to_form();
        assert_eq!(form.theme, "Diwali");
        assert_eq!(form.guests, 12);
        assert_eq!(form.age_group, AgeGroup::Seniors);
    }
}
