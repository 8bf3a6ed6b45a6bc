//! ウィザード制御
//!
//! レシピ・宴会の両フローで共有するステップ制御。フロー固有の部分
//! （ステップ数、どのステップで何を生成するか、結果の保持）は [`Flow`] が持つ。
//!
//! 送信は `begin_submit` → (モデル呼び出し) → `finish_submit` の2段階。
//! ブラウザではシグナルを跨いで await できないため分割している。

use crate::client::{invoke, CallKind, GenerationClient, GenerationRequest};
use crate::error::{Error, Result};
use crate::form::{FeastForm, FormState, RecipeForm};
use crate::options::IngredientCategory;
use crate::prompts::{feast_menu_request, feast_plan_request, recipe_request};
use crate::staging::{FileNamePreviews, ImageAsset, ImageId, ImagePayload, PreviewProvider};
use crate::types::{FeastMenu, FeastPlan, Generated, Recipe};
use std::fmt;
use std::sync::Arc;

/// テーマ未入力時のメッセージ
pub const THEME_REQUIRED_MESSAGE: &str = "Please enter a theme for your feast!";

/// 生成処理の状態
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Idle,
    Generating(CallKind),
    Error(Error),
    Ready,
}

/// フロー定義
pub trait Flow: Clone + PartialEq + Default + fmt::Debug {
    type Form: FormState + fmt::Debug;

    const NAME: &'static str;
    /// 総ステップ数
    const STEPS: u8;
    /// `next` で到達できる最後のステップ
    const LAST_INPUT_STEP: u8;

    /// このステップで送信できる呼び出し（なければNone）
    fn call_at(&self, step: u8) -> Option<CallKind>;

    /// リクエスト生成。入力チェックもここで行う
    fn build_request(&self, kind: CallKind, form: &Self::Form) -> Result<GenerationRequest>;

    /// 送信前に、その呼び出しの以前の結果を破棄
    fn discard(&mut self, kind: CallKind);

    /// 結果を保存し、遷移先ステップを返す
    fn accept(&mut self, generated: Generated) -> Result<u8>;

    /// `step` から先へ進めるか
    fn can_advance(&self, _step: u8) -> bool {
        true
    }
}

/// 表示用スナップショット
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<F: Flow> {
    pub step: u8,
    pub status: Status,
    pub form: F::Form,
    pub results: F,
    pub last_error: Option<Error>,
}

/// ステップ制御本体
#[derive(Clone)]
pub struct Wizard<F: Flow> {
    step: u8,
    form: F::Form,
    results: F,
    status: Status,
    last_error: Option<Error>,
    previews: Arc<dyn PreviewProvider + Send + Sync>,
}

impl<F: Flow> fmt::Debug for Wizard<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wizard")
            .field("flow", &F::NAME)
            .field("step", &self.step)
            .field("status", &self.status)
            .field("form", &self.form)
            .field("results", &self.results)
            .field("last_error", &self.last_error)
            .finish()
    }
}

impl<F: Flow> Default for Wizard<F> {
    fn default() -> Self {
        Self::new(Arc::new(FileNamePreviews))
    }
}

impl<F: Flow> Wizard<F> {
    pub fn new(previews: Arc<dyn PreviewProvider + Send + Sync>) -> Self {
        Self {
            step: 1,
            form: F::Form::default(),
            results: F::default(),
            status: Status::Idle,
            last_error: None,
            previews,
        }
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn form(&self) -> &F::Form {
        &self.form
    }

    pub fn results(&self) -> &F {
        &self.results
    }

    pub fn last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }

    pub fn is_generating(&self) -> bool {
        matches!(self.status, Status::Generating(_))
    }

    pub fn snapshot(&self) -> Snapshot<F> {
        Snapshot {
            step: self.step,
            status: self.status.clone(),
            form: self.form.clone(),
            results: self.results.clone(),
            last_error: self.last_error.clone(),
        }
    }

    /// 現在のステップで送信できる呼び出し
    pub fn pending_call(&self) -> Option<CallKind> {
        self.results.call_at(self.step)
    }

    // =============================================
    // ナビゲーション
    // =============================================

    /// 次のステップへ。進めなければfalse
    pub fn next(&mut self) -> bool {
        if self.is_generating()
            || self.step >= F::LAST_INPUT_STEP
            || !self.results.can_advance(self.step)
        {
            return false;
        }
        self.step += 1;
        tracing::info!(flow = F::NAME, step = self.step, "advanced");
        true
    }

    /// 前のステップへ（1で止まる）
    pub fn back(&mut self) -> bool {
        if self.is_generating() || self.step <= 1 {
            return false;
        }
        self.step -= 1;
        tracing::info!(flow = F::NAME, step = self.step, "went back");
        true
    }

    // =============================================
    // フォーム編集
    // =============================================

    fn ensure_idle(&self) -> Result<()> {
        if self.is_generating() {
            return Err(Error::InFlight);
        }
        Ok(())
    }

    /// フォームを新しいスナップショットに置き換える
    pub fn update_form(&mut self, update: impl FnOnce(&F::Form) -> F::Form) -> Result<()> {
        self.ensure_idle()?;
        self.form = update(&self.form);
        if self.status == Status::Idle {
            self.last_error = None;
        }
        Ok(())
    }

    pub fn stage_images(
        &mut self,
        category: IngredientCategory,
        files: Vec<ImagePayload>,
    ) -> Result<Vec<ImageAsset>> {
        self.ensure_idle()?;
        let previews = self.previews.as_ref();
        Ok(self.form.images_mut().add(category, files, previews))
    }

    pub fn unstage_image(&mut self, category: IngredientCategory, id: ImageId) -> Result<bool> {
        self.ensure_idle()?;
        let previews = self.previews.as_ref();
        Ok(self.form.images_mut().remove(category, id, previews))
    }

    /// ステージング済み画像を外してプレビューを解放する
    ///
    /// 生成中でも実行できる（画面破棄時用）。送信済みリクエストには影響しない
    pub fn release_previews(&mut self) {
        if self.form.images().is_empty() {
            return;
        }
        self.form.images_mut().clear(self.previews.as_ref());
        tracing::debug!(flow = F::NAME, "previews released");
    }

    // =============================================
    // 送信
    // =============================================

    /// 入力チェック後に Generating へ入り、送信すべきリクエストを返す
    ///
    /// 入力エラーは `last_error` に残り、状態は Idle のまま
    pub fn begin_submit(&mut self) -> Result<GenerationRequest> {
        match &self.status {
            Status::Generating(_) => return Err(Error::InFlight),
            Status::Error(_) => {
                return Err(Error::InvalidTransition(
                    "retry or reset before submitting again",
                ))
            }
            Status::Idle | Status::Ready => {}
        }

        let kind = self
            .results
            .call_at(self.step)
            .ok_or(Error::InvalidTransition("nothing to generate at this step"))?;

        let request = match self.results.build_request(kind, &self.form) {
            Ok(request) => request,
            Err(e) => {
                tracing::debug!(flow = F::NAME, error = %e, "submit rejected");
                self.last_error = Some(e.clone());
                return Err(e);
            }
        };

        self.results.discard(kind);
        self.last_error = None;
        self.status = Status::Generating(kind);
        tracing::info!(flow = F::NAME, step = self.step, kind = %kind, "generation started");
        Ok(request)
    }

    /// 呼び出し結果を反映する
    ///
    /// 生成エラーはそのまま返す（状態にも保存済み）
    pub fn finish_submit(&mut self, outcome: Result<Generated>) -> Result<()> {
        let Status::Generating(kind) = self.status else {
            return Err(Error::InvalidTransition("no generation in progress"));
        };

        match outcome.and_then(|generated| self.results.accept(generated)) {
            Ok(landing) => {
                self.step = landing;
                self.status = Status::Ready;
                tracing::info!(flow = F::NAME, step = landing, kind = %kind, "generation finished");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(flow = F::NAME, kind = %kind, error = %e, "generation failed");
                self.status = Status::Error(e.clone());
                self.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// begin_submit → invoke → finish_submit
    pub async fn submit<C: GenerationClient + ?Sized>(&mut self, client: &C) -> Result<()> {
        let request = self.begin_submit()?;
        let outcome = invoke(client, &request).await;
        self.finish_submit(outcome)
    }

    // =============================================
    // エラー復帰・リセット
    // =============================================

    /// エラー状態からステップ1へ戻る（フォームは保持）
    pub fn retry(&mut self) -> bool {
        if !matches!(self.status, Status::Error(_)) {
            return false;
        }
        self.status = Status::Idle;
        self.last_error = None;
        self.step = 1;
        true
    }

    /// 初期状態に戻す（画像プレビューは解放）
    ///
    /// 画像IDのカウンタは引き継ぐので、リセット後もIDは重複しない
    pub fn reset(&mut self) -> Result<()> {
        self.ensure_idle()?;
        self.release_previews();
        let staging = std::mem::take(self.form.images_mut());
        self.form = F::Form::default();
        *self.form.images_mut() = staging;
        self.results = F::default();
        self.status = Status::Idle;
        self.last_error = None;
        self.step = 1;
        tracing::info!(flow = F::NAME, "reset");
        Ok(())
    }
}

// =============================================
// レシピフロー
// =============================================

/// レシピ生成フロー: 食材 → 好み → 条件 → 結果
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecipeFlow {
    recipes: Vec<Recipe>,
}

impl RecipeFlow {
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }
}

impl Flow for RecipeFlow {
    type Form = RecipeForm;

    const NAME: &'static str = "recipe";
    const STEPS: u8 = 4;
    const LAST_INPUT_STEP: u8 = 3;

    fn call_at(&self, step: u8) -> Option<CallKind> {
        (step == 3).then_some(CallKind::RecipeGeneration)
    }

    fn build_request(&self, _kind: CallKind, form: &RecipeForm) -> Result<GenerationRequest> {
        Ok(recipe_request(form))
    }

    fn discard(&mut self, _kind: CallKind) {
        self.recipes.clear();
    }

    fn accept(&mut self, generated: Generated) -> Result<u8> {
        match generated {
            Generated::Recipes(recipes) => {
                self.recipes = recipes;
                Ok(4)
            }
            _ => Err(Error::format("expected recipes")),
        }
    }
}

// =============================================
// 宴会フロー
// =============================================

/// 宴会フロー: メニュー案 → 在庫 → 詳細プラン
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeastFlow {
    menu: Option<FeastMenu>,
    plan: Option<FeastPlan>,
}

impl FeastFlow {
    pub fn menu(&self) -> Option<&FeastMenu> {
        self.menu.as_ref()
    }

    pub fn plan(&self) -> Option<&FeastPlan> {
        self.plan.as_ref()
    }
}

impl Flow for FeastFlow {
    type Form = FeastForm;

    const NAME: &'static str = "feast";
    const STEPS: u8 = 3;
    const LAST_INPUT_STEP: u8 = 2;

    fn call_at(&self, step: u8) -> Option<CallKind> {
        match (step, self.menu.is_some()) {
            (1, false) => Some(CallKind::FeastMenuConcept),
            (2, true) => Some(CallKind::FeastDetailedPlan),
            _ => None,
        }
    }

    fn build_request(&self, kind: CallKind, form: &FeastForm) -> Result<GenerationRequest> {
        match kind {
            CallKind::FeastMenuConcept => {
                if form.theme.trim().is_empty() {
                    return Err(Error::Validation(THEME_REQUIRED_MESSAGE.to_string()));
                }
                Ok(feast_menu_request(form))
            }
            CallKind::FeastDetailedPlan => {
                let menu = self
                    .menu
                    .as_ref()
                    .ok_or(Error::InvalidTransition("a menu is required before planning"))?;
                Ok(feast_plan_request(form, menu))
            }
            CallKind::RecipeGeneration => {
                Err(Error::InvalidTransition("recipe generation is not part of the feast flow"))
            }
        }
    }

    fn discard(&mut self, kind: CallKind) {
        match kind {
            CallKind::FeastMenuConcept => {
                self.menu = None;
                self.plan = None;
            }
            _ => self.plan = None,
        }
    }

    fn accept(&mut self, generated: Generated) -> Result<u8> {
        match generated {
            Generated::Menu(menu) => {
                self.menu = Some(menu);
                Ok(1)
            }
            Generated::Plan(plan) => {
                self.plan = Some(plan);
                Ok(3)
            }
            Generated::Recipes(_) => Err(Error::format("expected a feast menu or plan")),
        }
    }

    fn can_advance(&self, step: u8) -> bool {
        step != 1 || self.menu.is_some()
    }
}

impl Wizard<FeastFlow> {
    /// メニュー案を破棄してステップ1へ（テーマ等の入力は保持）
    pub fn redesign(&mut self) -> Result<()> {
        self.ensure_idle()?;
        self.results = FeastFlow::default();
        self.status = Status::Idle;
        self.last_error = None;
        self.step = 1;
        tracing::info!(flow = FeastFlow::NAME, "menu discarded for redesign");
        Ok(())
    }

    /// メニュー案を承認して在庫入力へ
    pub fn proceed(&mut self) -> bool {
        self.step == 1 && self.next()
    }
}

/// レシピウィザード
pub type RecipeWizard = Wizard<RecipeFlow>;
/// 宴会ウィザード
pub type FeastWizard = Wizard<FeastFlow>;
