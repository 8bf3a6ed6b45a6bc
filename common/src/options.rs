//! 選択肢の定義
//!
//! フォームのセレクト・チップで使う列挙型。表示ラベルがそのままJSON値・プロンプト文字列になる。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// ラベル付き列挙型を定義する
///
/// `as_str` / `ALL` / `Display` / `FromStr` / serde をまとめて生成
macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// 画面表示順の全選択肢
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            pub fn labels() -> Vec<&'static str> {
                Self::ALL.iter().map(|v| v.as_str()).collect()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| {
                        format!(
                            "Unknown {}: {}. Use one of: {}",
                            stringify!($name),
                            s,
                            Self::labels().join(", ")
                        )
                    })
            }
        }
    };
}

choice_enum! {
    /// 食事制限
    pub enum DietaryChoice {
        Vegan => "Vegan",
        Vegetarian => "Vegetarian",
        GlutenFree => "Gluten-Free",
        DairyFree => "Dairy-Free",
        Keto => "Keto",
    }
}

choice_enum! {
    /// 気分
    pub enum Mood {
        ComfortFood => "Comfort Food",
        LightAndHealthy => "Light & Healthy",
        QuickAndEasy => "Quick & Easy",
        Spicy => "Spicy",
        Adventurous => "Adventurous",
    }
}

choice_enum! {
    /// 食事の種類
    pub enum MealType {
        Breakfast => "Breakfast",
        Lunch => "Lunch",
        Dinner => "Dinner",
        Snack => "Snack",
        Dessert => "Dessert",
    }
}

choice_enum! {
    /// 料理ジャンル。`Unspecified` は「指定なし」
    pub enum Cuisine {
        Unspecified => "Any",
        Indian => "Indian",
        Chinese => "Chinese",
        SouthIndian => "South Indian",
        NorthIndian => "North Indian",
        Greek => "Greek",
        Mediterranean => "Mediterranean",
        Italian => "Italian",
        Mexican => "Mexican",
        Japanese => "Japanese",
        Thai => "Thai",
        American => "American",
    }
}

choice_enum! {
    /// 手元にあるスパイス
    pub enum Spice {
        Salt => "Salt",
        BlackPepper => "Black Pepper",
        Cumin => "Cumin",
        Coriander => "Coriander",
        Turmeric => "Turmeric",
        Paprika => "Paprika",
        ChiliPowder => "Chili Powder",
        GarlicPowder => "Garlic Powder",
        OnionPowder => "Onion Powder",
        Oregano => "Oregano",
        Basil => "Basil",
        Rosemary => "Rosemary",
    }
}

choice_enum! {
    /// アレルギー・避けたい食材
    pub enum Allergy {
        Peanuts => "Peanuts",
        TreeNuts => "Tree Nuts",
        Milk => "Milk",
        Eggs => "Eggs",
        Soy => "Soy",
        Wheat => "Wheat",
        Fish => "Fish",
        Shellfish => "Shellfish",
        Gluten => "Gluten",
        Sesame => "Sesame",
    }
}

choice_enum! {
    /// ゲストの年齢層
    pub enum AgeGroup {
        YoungChildren => "Young Children",
        Teenagers => "Teenagers",
        YoungAdults => "Young Adults",
        MixedAdults => "Mixed Adults",
        Seniors => "Seniors",
    }
}

choice_enum! {
    /// 食材写真のカテゴリ。並び順がそのまま送信順になる
    pub enum IngredientCategory {
        Vegetables => "Vegetables",
        Fruits => "Fruits",
        Proteins => "Proteins",
        Greens => "Greens & Herbs",
    }
}

impl Cuisine {
    /// 指定ありの場合のみ返す
    pub fn specified(&self) -> Option<&'static str> {
        match self {
            Cuisine::Unspecified => None,
            other => Some(other.as_str()),
        }
    }
}
