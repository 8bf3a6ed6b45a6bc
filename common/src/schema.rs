//! レスポンススキーマ
//!
//! Gemini の `responseSchema` に渡すJSON（OpenAPIサブセット、型名は大文字）

use serde_json::{json, Value};

fn string_list(description: &str) -> Value {
    json!({
        "type": "ARRAY",
        "items": { "type": "STRING" },
        "description": description,
    })
}

fn course() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "name": { "type": "STRING" },
            "description": { "type": "STRING" },
        },
        "required": ["name", "description"],
    })
}

/// レシピ生成: レシピ2件の配列
pub fn recipe_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "recipeName": { "type": "STRING", "description": "The name of the recipe." },
                "description": { "type": "STRING", "description": "A brief, enticing description of the dish." },
                "ingredients": string_list("List of ingredients used from what was available."),
                "instructions": string_list("Step-by-step cooking instructions."),
                "missingItems": string_list("A minimal list of essential items to buy. Should be empty if nothing is needed."),
                "cookingTime": { "type": "INTEGER", "description": "Estimated cooking time in minutes." },
            },
            "required": ["recipeName", "description", "ingredients", "instructions", "missingItems", "cookingTime"],
        },
    })
}

/// 宴会メニュー案
pub fn feast_menu_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "menuTitle": { "type": "STRING", "description": "A creative title for the whole menu." },
            "description": { "type": "STRING", "description": "A brief, thematic description of the feast." },
            "appetizer": course(),
            "mainCourse": course(),
            "dessert": course(),
            "beverage": course(),
        },
        "required": ["menuTitle", "description", "appetizer", "mainCourse", "dessert", "beverage"],
    })
}

/// 宴会の詳細プラン
pub fn feast_plan_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "feastTitle": { "type": "STRING", "description": "The title of the feast." },
            "feastDescription": { "type": "STRING", "description": "A short overview of how the feast comes together." },
            "recipes": {
                "type": "ARRAY",
                "description": "One detailed recipe per course of the approved menu, in menu order.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "course": { "type": "STRING", "description": "Appetizer, Main Course, Dessert or Beverage Suggestion." },
                        "recipeName": { "type": "STRING" },
                        "description": { "type": "STRING" },
                        "ingredients": string_list("Ingredients with quantities for all guests."),
                        "instructions": string_list("Step-by-step instructions."),
                    },
                    "required": ["course", "recipeName", "description", "ingredients", "instructions"],
                },
            },
            "missingItems": string_list("One consolidated list of items to buy, without duplicates. Empty if nothing is needed."),
        },
        "required": ["feastTitle", "feastDescription", "recipes", "missingItems"],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required(schema: &Value) -> Vec<&str> {
        schema["required"]
            .as_array()
            .expect("required配列がない")
            .iter()
            .filter_map(|v| v.as_str())
            .collect()
    }

    #[test]
    fn test_recipe_schema_requires_all_fields() {
        let schema = recipe_schema();
        assert_eq!(schema["type"], "ARRAY");
        assert_eq!(
            required(&schema["items"]),
            vec!["recipeName", "description", "ingredients", "instructions", "missingItems", "cookingTime"]
        );
        assert_eq!(schema["items"]["properties"]["cookingTime"]["type"], "INTEGER");
    }

    #[test]
    fn test_feast_menu_schema_courses() {
        let schema = feast_menu_schema();
        assert_eq!(schema["type"], "OBJECT");
        for key in ["appetizer", "mainCourse", "dessert", "beverage"] {
            assert_eq!(required(&schema["properties"][key]), vec!["name", "description"]);
        }
        assert_eq!(required(&schema).len(), 6);
    }

    #[test]
    fn test_feast_plan_schema() {
        let schema = feast_plan_schema();
        assert_eq!(
            required(&schema),
            vec!["feastTitle", "feastDescription", "recipes", "missingItems"]
        );
        assert_eq!(schema["properties"]["recipes"]["type"], "ARRAY");
        assert_eq!(required(&schema["properties"]["recipes"]["items"]).len(), 5);
    }
}
