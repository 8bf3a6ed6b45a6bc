//! サブコマンドの実行
//!
//! 引数からフォームを作り、ウィザードを最後まで進めて結果を表示する。

use crate::cli::{FeastArgs, InventoryArgs, RecipeArgs};
use crate::display::{print_error, print_menu, print_plan, print_recipes, submit_with_spinner, write_output};
use crate::error::{PantryError, Result};
use crate::interactive;
use crate::scanner::{collect_images, load_images};
use pantry_pal_common::wizard::Flow;
use pantry_pal_common::{FeastMenu, FeastPlan, FeastWizard, GenerationClient, RecipeWizard, Wizard};
use serde::Serialize;

/// 宴会コマンドの出力JSON
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeastOutput<'a> {
    pub menu: Option<&'a FeastMenu>,
    pub plan: Option<&'a FeastPlan>,
}

/// 指定された写真を読み込んでステージングする
pub fn stage_inventory<F: Flow>(
    wizard: &mut Wizard<F>,
    inventory: &InventoryArgs,
    max_image_size: u32,
) -> Result<usize> {
    let mut total = 0;
    for (category, paths) in inventory.by_category() {
        if paths.is_empty() {
            continue;
        }
        let infos = collect_images(paths)?;
        let payloads = load_images(&infos, max_image_size)?;
        total += wizard.stage_images(category, payloads)?.len();
    }
    tracing::info!(count = total, "photos staged");
    Ok(total)
}

fn report(outcome: pantry_pal_common::Result<()>) -> Result<()> {
    outcome.map_err(|e| {
        print_error(&e);
        PantryError::from(e)
    })
}

pub async fn run_recipe<C: GenerationClient>(
    args: &RecipeArgs,
    client: &C,
    max_image_size: u32,
) -> Result<RecipeWizard> {
    let mut wizard = RecipeWizard::default();
    wizard.update_form(|_| args.to_form())?;

    if args.interactive {
        interactive::run_recipe(&mut wizard, client, max_image_size).await?;
    } else {
        let staged = stage_inventory(&mut wizard, &args.inventory, max_image_size)?;
        if staged == 0 {
            return Err(PantryError::NoImagesFound(
                "pass photos with --vegetables, --fruits, --proteins or --greens".to_string(),
            ));
        }
        println!("✔ {} photo(s) ready\n", staged);

        while wizard.next() {}
        report(submit_with_spinner(&mut wizard, client, "Whipping up recipe ideas...").await)?;
        print_recipes(wizard.results().recipes());
    }

    if let Some(output) = &args.output {
        write_output(output, wizard.results().recipes())?;
    }
    Ok(wizard)
}

pub async fn run_feast<C: GenerationClient>(
    args: &FeastArgs,
    client: &C,
    max_image_size: u32,
) -> Result<FeastWizard> {
    let mut wizard = FeastWizard::default();
    wizard.update_form(|_| args.to_form())?;

    if args.interactive {
        interactive::run_feast(&mut wizard, client, max_image_size).await?;
    } else {
        report(submit_with_spinner(&mut wizard, client, "Planning your feast...").await)?;
        if let Some(menu) = wizard.results().menu() {
            print_menu(menu);
        }

        if args.plan {
            wizard.proceed();
            let staged = stage_inventory(&mut wizard, &args.inventory, max_image_size)?;
            println!("✔ {} photo(s) ready\n", staged);
            report(submit_with_spinner(&mut wizard, client, "Writing the recipes...").await)?;
            if let Some(plan) = wizard.results().plan() {
                print_plan(plan);
            }
        }
    }

    if let Some(output) = &args.output {
        let results = wizard.results();
        write_output(
            output,
            &FeastOutput {
                menu: results.menu(),
                plan: results.plan(),
            },
        )?;
    }
    Ok(wizard)
}
