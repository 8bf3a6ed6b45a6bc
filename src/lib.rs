//! PantryPal CLI
//!
//! 食材写真と好みから Gemini でレシピ・宴会プランを生成するコマンドラインツール

pub mod app;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod gemini;
pub mod interactive;
pub mod scanner;
