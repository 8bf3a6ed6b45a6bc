pub mod choices;
pub mod feast_planner;
pub mod header;
pub mod image_uploader;
pub mod recipe_generator;
pub mod results;
pub mod settings_panel;
pub mod step_indicator;
