//! メインアプリケーションコンポーネント

use crate::api::gemini::{build_time_api_key, FetchClient};
use crate::components::{
    feast_planner::FeastPlanner, header::Header, recipe_generator::RecipeGenerator,
    settings_panel::SettingsPanel,
};
use leptos::prelude::*;
use pantry_pal_common::wizard::Flow;
use pantry_pal_common::{invoke, Wizard, DEFAULT_MODEL};
use wasm_bindgen_futures::spawn_local;

/// 画面モード
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Home,
    Recipe,
    Feast,
}

/// APIキーとモデル（コンテキストで共有）
#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub api_key: RwSignal<String>,
    pub model: RwSignal<String>,
}

impl Settings {
    /// 送信のたびに現在の設定でクライアントを作る
    pub fn client(&self) -> pantry_pal_common::Result<FetchClient> {
        FetchClient::new(Some(self.api_key.get_untracked()), &self.model.get_untracked())
    }
}

/// 失敗をコンソールに出すだけの操作用
pub fn warn_on_err<T>(result: pantry_pal_common::Result<T>) {
    if let Err(e) = result {
        gloo::console::warn!(e.to_string());
    }
}

/// 送信を開始し、応答を待ってウィザードに反映する
///
/// クライアントを作れない場合は `notice` にメッセージを出して何もしない
pub fn submit<F>(wizard: RwSignal<Wizard<F>>, settings: Settings, notice: RwSignal<Option<String>>)
where
    F: Flow + 'static,
    Wizard<F>: Send + Sync + 'static,
{
    let client = match settings.client() {
        Ok(client) => client,
        Err(e) => {
            notice.set(Some(e.to_string()));
            return;
        }
    };
    notice.set(None);

    let mut started = None;
    wizard.update(|w| started = Some(w.begin_submit()));
    let request = match started {
        Some(Ok(request)) => request,
        Some(Err(e)) => {
            gloo::console::log!(format!("{} submit rejected: {}", F::NAME, e));
            return;
        }
        None => return,
    };

    gloo::console::log!(format!(
        "{} request to {} ({} image bytes)",
        request.kind,
        client.model(),
        request.image_bytes()
    ));

    spawn_local(async move {
        let outcome = invoke(&client, &request).await;
        if let Err(e) = &outcome {
            gloo::console::error!(format!("{} failed: {:?}", request.kind, e));
        }
        wizard.try_update(|w| {
            let _ = w.finish_submit(outcome);
        });
    });
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let settings = Settings {
        api_key: RwSignal::new(build_time_api_key().unwrap_or_default().to_string()),
        model: RwSignal::new(DEFAULT_MODEL.to_string()),
    };
    provide_context(settings);

    let mode = RwSignal::new(Mode::Home);

    view! {
        <div class="container">
            <Header />

            <SettingsPanel api_key=settings.api_key model=settings.model />

            {move || match mode.get() {
                Mode::Home => view! {
                    <div class="mode-select">
                        <button class="btn btn-primary" on:click=move |_| mode.set(Mode::Recipe)>
                            "🍳 Generate a Recipe"
                        </button>
                        <button class="btn btn-primary" on:click=move |_| mode.set(Mode::Feast)>
                            "🎉 Plan a Feast"
                        </button>
                    </div>
                }
                .into_any(),
                Mode::Recipe => view! { <RecipeGenerator on_home=move || mode.set(Mode::Home) /> }.into_any(),
                Mode::Feast => view! { <FeastPlanner on_home=move || mode.set(Mode::Home) /> }.into_any(),
            }}
        </div>
    }
}
