// Builder orchestration: optimistic CRUD for one portfolio and its
// components against the platform API.
// Per-component state machine: unsaved (no id) → saved (has id).
// All remote calls go through the PortfolioApi seam so tests swap in a mock.

pub mod autosave;
pub mod merge;

use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

use crate::builder::autosave::Autosaver;
use crate::content::default_content;
use crate::models::portfolio::{ComponentType, Portfolio, PortfolioComponent};
use crate::upstream::types::{ComponentPatch, ComponentPayload, PortfolioCreate, PortfolioUpdate};
use crate::upstream::{PortfolioApi, Session, UpstreamError};

#[derive(Debug, Error)]
pub enum BuilderError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Orchestrates edits to one portfolio. Local state is the working copy;
/// every mutation decides per operation whether the remote call confirms
/// first (add/edit/delete) or the local change applies optimistically
/// (reorder, visibility).
pub struct PortfolioBuilder {
    api: Arc<dyn PortfolioApi>,
    session: Session,
    portfolio: Portfolio,
    autosaver: Autosaver,
}

impl PortfolioBuilder {
    pub fn new(api: Arc<dyn PortfolioApi>, session: Session, portfolio: Portfolio) -> Self {
        let autosaver = Autosaver::new(Arc::clone(&api), session.clone());
        PortfolioBuilder {
            api,
            session,
            portfolio,
            autosaver,
        }
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    /// Creates the portfolio upstream if it has no id yet. Rejected with a
    /// validation error when the title is blank — nothing is sent.
    async fn ensure_saved(&mut self) -> Result<i64, BuilderError> {
        if let Some(id) = self.portfolio.id {
            return Ok(id);
        }
        if self.portfolio.title.trim().is_empty() {
            return Err(BuilderError::Validation(
                "Please enter a portfolio title and save before adding components".to_string(),
            ));
        }

        let created = self
            .api
            .create_portfolio(
                &self.session,
                &PortfolioCreate {
                    title: self.portfolio.title.clone(),
                    template: self.portfolio.template,
                    template_type: self.portfolio.template_type.clone(),
                    custom_settings: self.portfolio.custom_settings.clone(),
                },
            )
            .await?;

        let id = created.id.ok_or(UpstreamError::Api {
            status: 502,
            message: "create response carried no portfolio id".to_string(),
        })?;
        self.portfolio.id = Some(id);
        self.portfolio.slug = created.slug;
        Ok(id)
    }

    /// Adds a component of `component_type` with seeded default content.
    /// Order is max(existing) + 1; the local list grows only after the
    /// remote create succeeds.
    pub async fn add_component(
        &mut self,
        component_type: ComponentType,
    ) -> Result<&PortfolioComponent, BuilderError> {
        let portfolio_id = self.ensure_saved().await?;

        let next_order = self
            .portfolio
            .components
            .iter()
            .map(|c| c.order)
            .max()
            .map_or(0, |max| max + 1);

        let created = self
            .api
            .create_component(
                &self.session,
                portfolio_id,
                &ComponentPayload {
                    component_type: component_type.as_str().to_string(),
                    order: next_order,
                    is_visible: true,
                    content: default_content(component_type),
                },
            )
            .await?;

        self.portfolio.components.push(created);
        let index = self.portfolio.components.len() - 1;
        Ok(&self.portfolio.components[index])
    }

    /// Create-or-update: a component without an id is created, one with an
    /// id is updated. The local entry is replaced only on success, matched by
    /// id — or, for unsaved components, by (type, order).
    pub async fn save_component(
        &mut self,
        component: PortfolioComponent,
    ) -> Result<(), BuilderError> {
        let Some(portfolio_id) = self.portfolio.id else {
            return Err(BuilderError::Validation(
                "Please save the portfolio first".to_string(),
            ));
        };

        let saved = match component.id {
            Some(component_id) => {
                self.api
                    .update_component(
                        &self.session,
                        portfolio_id,
                        component_id,
                        &ComponentPatch {
                            component_type: Some(component.component_type.as_str().to_string()),
                            order: Some(component.order),
                            is_visible: Some(component.is_visible),
                            content: Some(component.content.clone()),
                        },
                    )
                    .await?
            }
            None => {
                self.api
                    .create_component(
                        &self.session,
                        portfolio_id,
                        &ComponentPayload {
                            component_type: component.component_type.as_str().to_string(),
                            order: component.order,
                            is_visible: component.is_visible,
                            content: component.content.clone(),
                        },
                    )
                    .await?
            }
        };

        let slot = self.portfolio.components.iter_mut().find(|c| {
            match (c.id, component.id) {
                (Some(a), Some(b)) => a == b,
                (None, None) => {
                    c.component_type == component.component_type && c.order == component.order
                }
                _ => false,
            }
        });
        match slot {
            Some(slot) => *slot = saved,
            None => self.portfolio.components.push(saved),
        }
        Ok(())
    }

    /// Remote delete first when the component is saved; on failure the local
    /// list is left unchanged so state cannot diverge. Unsaved components
    /// are removed locally right away.
    pub async fn delete_component(&mut self, index: usize) -> Result<(), BuilderError> {
        let Some(component) = self.portfolio.components.get(index) else {
            return Err(BuilderError::Validation(format!(
                "No component at position {index}"
            )));
        };

        if let (Some(portfolio_id), Some(component_id)) = (self.portfolio.id, component.id) {
            self.api
                .delete_component(&self.session, portfolio_id, component_id)
                .await?;
        }

        self.portfolio.components.remove(index);
        Ok(())
    }

    /// Drag-reorder: moves the component at `from` to `to`, renumbers every
    /// `order` to its new 0-based array index, applies locally right away,
    /// then persists each changed order best-effort. Persistence failures
    /// are logged, not rolled back.
    pub async fn move_component(&mut self, from: usize, to: usize) -> Result<(), BuilderError> {
        let len = self.portfolio.components.len();
        if from >= len || to >= len {
            return Err(BuilderError::Validation(format!(
                "Move out of bounds: {from} -> {to} with {len} components"
            )));
        }
        if from == to {
            return Ok(());
        }

        let before: Vec<(Option<i64>, i64)> = self
            .portfolio
            .components
            .iter()
            .map(|c| (c.id, c.order))
            .collect();

        move_item(&mut self.portfolio.components, from, to);
        renumber(&mut self.portfolio.components);

        if let Some(portfolio_id) = self.portfolio.id {
            for component in &self.portfolio.components {
                let Some(component_id) = component.id else {
                    continue;
                };
                let unchanged = before
                    .iter()
                    .any(|(id, order)| *id == Some(component_id) && *order == component.order);
                if unchanged {
                    continue;
                }
                let patch = ComponentPatch {
                    order: Some(component.order),
                    ..Default::default()
                };
                if let Err(e) = self
                    .api
                    .update_component(&self.session, portfolio_id, component_id, &patch)
                    .await
                {
                    warn!("Failed to persist order for component {component_id}: {e}");
                }
            }
        }

        self.schedule_autosave();
        Ok(())
    }

    /// Optimistic visibility flip with fire-and-forget persistence. Returns
    /// the new state. Content and order are untouched.
    pub fn toggle_visibility(&mut self, index: usize) -> Result<bool, BuilderError> {
        let portfolio_id = self.portfolio.id;
        let Some(component) = self.portfolio.components.get_mut(index) else {
            return Err(BuilderError::Validation(format!(
                "No component at position {index}"
            )));
        };

        component.is_visible = !component.is_visible;
        let new_visibility = component.is_visible;

        if let (Some(portfolio_id), Some(component_id)) = (portfolio_id, component.id) {
            let api = Arc::clone(&self.api);
            let session = self.session.clone();
            tokio::spawn(async move {
                let patch = ComponentPatch {
                    is_visible: Some(new_visibility),
                    ..Default::default()
                };
                if let Err(e) = api
                    .update_component(&session, portfolio_id, component_id, &patch)
                    .await
                {
                    warn!("Failed to persist visibility for component {component_id}: {e}");
                }
            });
        }

        self.schedule_autosave();
        Ok(new_visibility)
    }

    /// Publish toggle is remote-confirmed: on failure the local
    /// `is_published` stays unchanged.
    pub async fn set_published(&mut self, is_published: bool) -> Result<(), BuilderError> {
        let Some(id) = self.portfolio.id else {
            return Err(BuilderError::Validation(
                "Please save the portfolio first".to_string(),
            ));
        };
        let updated = self
            .api
            .publish_portfolio(&self.session, id, is_published)
            .await?;
        self.portfolio.is_published = updated.is_published;
        if updated.slug.is_some() {
            self.portfolio.slug = updated.slug;
        }
        Ok(())
    }

    // ── debounced field edits ──

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.portfolio.title = title.into();
        self.schedule_autosave();
    }

    pub fn set_template_type(&mut self, template_type: impl Into<String>) {
        self.portfolio.template_type = template_type.into();
        self.schedule_autosave();
    }

    pub fn set_custom_settings(&mut self, settings: serde_json::Value) {
        self.portfolio.custom_settings = settings;
        self.schedule_autosave();
    }

    pub fn set_seo(
        &mut self,
        title: Option<String>,
        description: Option<String>,
        keywords: Option<String>,
    ) {
        self.portfolio.seo_title = title;
        self.portfolio.seo_description = description;
        self.portfolio.seo_keywords = keywords;
        self.schedule_autosave();
    }

    /// Arms the debounce timer with the current snapshot. Unsaved portfolios
    /// and blank titles never autosave.
    fn schedule_autosave(&mut self) {
        let Some(id) = self.portfolio.id else {
            return;
        };
        if self.portfolio.title.trim().is_empty() {
            return;
        }
        self.autosaver.schedule(
            id,
            PortfolioUpdate {
                title: Some(self.portfolio.title.clone()),
                template: self.portfolio.template,
                template_type: Some(self.portfolio.template_type.clone()),
                custom_settings: Some(self.portfolio.custom_settings.clone()),
                seo_title: self.portfolio.seo_title.clone(),
                seo_description: self.portfolio.seo_description.clone(),
                seo_keywords: self.portfolio.seo_keywords.clone(),
            },
        );
    }

    /// Waits out a pending autosave, if any. Used on session teardown.
    pub async fn flush_autosave(&mut self) {
        self.autosaver.flush().await;
    }
}

/// Single-element move, preserving the relative order of everything else.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) {
    let item = items.remove(from);
    items.insert(to, item);
}

/// Renumbers `order` to match 0-based array positions.
pub fn renumber(components: &mut [PortfolioComponent]) {
    for (index, component) in components.iter_mut().enumerate() {
        component.order = index as i64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    /// In-memory stand-in for the platform API, recording calls and failing
    /// on demand.
    #[derive(Default)]
    struct MockApi {
        next_id: AtomicI64,
        fail_create_component: AtomicBool,
        fail_delete_component: AtomicBool,
        fail_update_component: AtomicBool,
        fail_publish: AtomicBool,
        portfolio_updates: Mutex<Vec<PortfolioUpdate>>,
        component_patches: Mutex<Vec<(i64, ComponentPatch)>>,
        created_portfolios: Mutex<Vec<PortfolioCreate>>,
    }

    impl MockApi {
        fn new() -> Arc<Self> {
            let mock = MockApi::default();
            mock.next_id.store(100, Ordering::SeqCst);
            Arc::new(mock)
        }

        fn fresh_id(&self) -> i64 {
            self.next_id.fetch_add(1, Ordering::SeqCst)
        }

        fn fail(status: u16) -> UpstreamError {
            UpstreamError::Api {
                status,
                message: "induced failure".to_string(),
            }
        }
    }

    #[async_trait]
    impl PortfolioApi for MockApi {
        async fn create_portfolio(
            &self,
            _session: &Session,
            req: &PortfolioCreate,
        ) -> Result<Portfolio, UpstreamError> {
            self.created_portfolios.lock().unwrap().push(req.clone());
            Ok(Portfolio {
                id: Some(self.fresh_id()),
                title: req.title.clone(),
                template_type: req.template_type.clone(),
                template: req.template,
                custom_settings: req.custom_settings.clone(),
                components: vec![],
                seo_title: None,
                seo_description: None,
                seo_keywords: None,
                profile_photo_url: None,
                user_profile_photo_url: None,
                slug: Some("fresh-slug".to_string()),
                is_published: false,
            })
        }

        async fn update_portfolio(
            &self,
            _session: &Session,
            id: i64,
            req: &PortfolioUpdate,
        ) -> Result<Portfolio, UpstreamError> {
            self.portfolio_updates.lock().unwrap().push(req.clone());
            Ok(Portfolio {
                id: Some(id),
                title: req.title.clone().unwrap_or_default(),
                template_type: req.template_type.clone().unwrap_or_default(),
                template: req.template,
                custom_settings: req.custom_settings.clone().unwrap_or(json!({})),
                components: vec![],
                seo_title: req.seo_title.clone(),
                seo_description: req.seo_description.clone(),
                seo_keywords: req.seo_keywords.clone(),
                profile_photo_url: None,
                user_profile_photo_url: None,
                slug: None,
                is_published: false,
            })
        }

        async fn publish_portfolio(
            &self,
            _session: &Session,
            id: i64,
            is_published: bool,
        ) -> Result<Portfolio, UpstreamError> {
            if self.fail_publish.load(Ordering::SeqCst) {
                return Err(Self::fail(500));
            }
            Ok(Portfolio {
                id: Some(id),
                title: "T".to_string(),
                template_type: "modern".to_string(),
                template: None,
                custom_settings: json!({}),
                components: vec![],
                seo_title: None,
                seo_description: None,
                seo_keywords: None,
                profile_photo_url: None,
                user_profile_photo_url: None,
                slug: Some("published-slug".to_string()),
                is_published,
            })
        }

        async fn create_component(
            &self,
            _session: &Session,
            _portfolio_id: i64,
            req: &ComponentPayload,
        ) -> Result<PortfolioComponent, UpstreamError> {
            if self.fail_create_component.load(Ordering::SeqCst) {
                return Err(Self::fail(500));
            }
            Ok(PortfolioComponent {
                id: Some(self.fresh_id()),
                component_type: serde_json::from_value(json!(req.component_type))
                    .unwrap_or(ComponentType::Unknown),
                order: req.order,
                is_visible: req.is_visible,
                content: req.content.clone(),
            })
        }

        async fn update_component(
            &self,
            _session: &Session,
            _portfolio_id: i64,
            component_id: i64,
            patch: &ComponentPatch,
        ) -> Result<PortfolioComponent, UpstreamError> {
            if self.fail_update_component.load(Ordering::SeqCst) {
                return Err(Self::fail(500));
            }
            self.component_patches
                .lock()
                .unwrap()
                .push((component_id, patch.clone()));
            Ok(PortfolioComponent {
                id: Some(component_id),
                component_type: patch
                    .component_type
                    .as_deref()
                    .map(|t| serde_json::from_value(json!(t)).unwrap_or(ComponentType::Unknown))
                    .unwrap_or(ComponentType::About),
                order: patch.order.unwrap_or(0),
                is_visible: patch.is_visible.unwrap_or(true),
                content: patch.content.clone().unwrap_or(json!({})),
            })
        }

        async fn delete_component(
            &self,
            _session: &Session,
            _portfolio_id: i64,
            _component_id: i64,
        ) -> Result<(), UpstreamError> {
            if self.fail_delete_component.load(Ordering::SeqCst) {
                return Err(Self::fail(500));
            }
            Ok(())
        }
    }

    fn unsaved_portfolio(title: &str) -> Portfolio {
        Portfolio {
            id: None,
            title: title.to_string(),
            template_type: "modern".to_string(),
            template: None,
            custom_settings: json!({}),
            components: vec![],
            seo_title: None,
            seo_description: None,
            seo_keywords: None,
            profile_photo_url: None,
            user_profile_photo_url: None,
            slug: None,
            is_published: false,
        }
    }

    fn saved_portfolio(components: Vec<PortfolioComponent>) -> Portfolio {
        Portfolio {
            id: Some(1),
            ..unsaved_portfolio("Saved")
        }
        .with_components(components)
    }

    impl Portfolio {
        fn with_components(mut self, components: Vec<PortfolioComponent>) -> Self {
            self.components = components;
            self
        }
    }

    fn saved_component(id: i64, component_type: ComponentType, order: i64) -> PortfolioComponent {
        PortfolioComponent {
            id: Some(id),
            component_type,
            order,
            is_visible: true,
            content: json!({}),
        }
    }

    #[tokio::test]
    async fn test_add_component_rejects_blank_title_without_calling_api() {
        let mock = MockApi::new();
        let mut builder = PortfolioBuilder::new(
            mock.clone(),
            Session::anonymous(),
            unsaved_portfolio("   "),
        );
        let err = builder.add_component(ComponentType::About).await.unwrap_err();
        assert!(matches!(err, BuilderError::Validation(_)));
        assert!(mock.created_portfolios.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_component_auto_creates_portfolio_first() {
        let mock = MockApi::new();
        let mut builder = PortfolioBuilder::new(
            mock.clone(),
            Session::anonymous(),
            unsaved_portfolio("My Work"),
        );
        builder.add_component(ComponentType::Header).await.unwrap();

        assert_eq!(mock.created_portfolios.lock().unwrap().len(), 1);
        assert!(builder.portfolio().id.is_some());
        assert_eq!(builder.portfolio().slug.as_deref(), Some("fresh-slug"));
        assert_eq!(builder.portfolio().components.len(), 1);
        assert!(builder.portfolio().components[0].id.is_some());
    }

    #[tokio::test]
    async fn test_add_component_order_is_max_plus_one() {
        let mock = MockApi::new();
        let portfolio = saved_portfolio(vec![
            saved_component(1, ComponentType::Header, 0),
            saved_component(2, ComponentType::About, 7),
        ]);
        let mut builder = PortfolioBuilder::new(mock, Session::anonymous(), portfolio);
        let component = builder.add_component(ComponentType::Skills).await.unwrap();
        assert_eq!(component.order, 8);
    }

    #[tokio::test]
    async fn test_add_component_failure_leaves_local_list_unchanged() {
        let mock = MockApi::new();
        mock.fail_create_component.store(true, Ordering::SeqCst);
        let mut builder = PortfolioBuilder::new(
            mock,
            Session::anonymous(),
            saved_portfolio(vec![]),
        );
        assert!(builder.add_component(ComponentType::About).await.is_err());
        assert!(builder.portfolio().components.is_empty());
    }

    #[tokio::test]
    async fn test_save_component_creates_when_unsaved() {
        let mock = MockApi::new();
        let mut builder =
            PortfolioBuilder::new(mock, Session::anonymous(), saved_portfolio(vec![]));
        let component = PortfolioComponent {
            id: None,
            component_type: ComponentType::About,
            order: 0,
            is_visible: true,
            content: json!({"bio": "hello"}),
        };
        builder.save_component(component).await.unwrap();
        assert_eq!(builder.portfolio().components.len(), 1);
        assert!(builder.portfolio().components[0].id.is_some());
    }

    #[tokio::test]
    async fn test_save_component_updates_in_place_by_id() {
        let mock = MockApi::new();
        let portfolio = saved_portfolio(vec![saved_component(9, ComponentType::About, 0)]);
        let mut builder = PortfolioBuilder::new(mock, Session::anonymous(), portfolio);

        let mut edited = builder.portfolio().components[0].clone();
        edited.content = json!({"bio": "updated"});
        builder.save_component(edited).await.unwrap();

        assert_eq!(builder.portfolio().components.len(), 1);
        assert_eq!(
            builder.portfolio().components[0].content,
            json!({"bio": "updated"})
        );
    }

    #[tokio::test]
    async fn test_delete_component_remote_failure_keeps_local_state() {
        let mock = MockApi::new();
        mock.fail_delete_component.store(true, Ordering::SeqCst);
        let portfolio = saved_portfolio(vec![saved_component(9, ComponentType::About, 0)]);
        let mut builder = PortfolioBuilder::new(mock, Session::anonymous(), portfolio);

        assert!(builder.delete_component(0).await.is_err());
        assert_eq!(builder.portfolio().components.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_component_success_removes_locally() {
        let mock = MockApi::new();
        let portfolio = saved_portfolio(vec![
            saved_component(9, ComponentType::About, 0),
            saved_component(10, ComponentType::Skills, 1),
        ]);
        let mut builder = PortfolioBuilder::new(mock, Session::anonymous(), portfolio);
        builder.delete_component(0).await.unwrap();
        assert_eq!(builder.portfolio().components.len(), 1);
        assert_eq!(builder.portfolio().components[0].id, Some(10));
    }

    #[tokio::test]
    async fn test_move_component_renumbers_contiguously() {
        let mock = MockApi::new();
        let portfolio = saved_portfolio(vec![
            saved_component(1, ComponentType::Header, 0),
            saved_component(2, ComponentType::About, 1),
            saved_component(3, ComponentType::Skills, 2),
            saved_component(4, ComponentType::Contact, 3),
        ]);
        let mut builder = PortfolioBuilder::new(mock.clone(), Session::anonymous(), portfolio);
        builder.move_component(0, 2).await.unwrap();

        let components = &builder.portfolio().components;
        let ids: Vec<_> = components.iter().map(|c| c.id.unwrap()).collect();
        assert_eq!(ids, vec![2, 3, 1, 4]);
        // The moved item's order equals its target index; all orders form
        // the contiguous 0..n-1 range.
        assert_eq!(components[2].id, Some(1));
        assert_eq!(components[2].order, 2);
        let orders: Vec<_> = components.iter().map(|c| c.order).collect();
        assert_eq!(orders, vec![0, 1, 2, 3]);
    }

    #[tokio::test]
    async fn test_move_component_persists_only_changed_orders() {
        let mock = MockApi::new();
        let portfolio = saved_portfolio(vec![
            saved_component(1, ComponentType::Header, 0),
            saved_component(2, ComponentType::About, 1),
            saved_component(3, ComponentType::Skills, 2),
            saved_component(4, ComponentType::Contact, 3),
        ]);
        let mut builder = PortfolioBuilder::new(mock.clone(), Session::anonymous(), portfolio);
        builder.move_component(0, 2).await.unwrap();

        // Components 1, 2, 3 changed position; 4 stayed at order 3.
        let patched: Vec<i64> = mock
            .component_patches
            .lock()
            .unwrap()
            .iter()
            .map(|(id, _)| *id)
            .collect();
        assert_eq!(patched.len(), 3);
        assert!(!patched.contains(&4));
    }

    #[tokio::test]
    async fn test_move_component_persistence_failure_is_not_rolled_back() {
        let mock = MockApi::new();
        mock.fail_update_component.store(true, Ordering::SeqCst);
        let portfolio = saved_portfolio(vec![
            saved_component(1, ComponentType::Header, 0),
            saved_component(2, ComponentType::About, 1),
        ]);
        let mut builder = PortfolioBuilder::new(mock, Session::anonymous(), portfolio);
        builder.move_component(0, 1).await.unwrap();
        // Local optimistic state survives the failed persistence.
        assert_eq!(builder.portfolio().components[0].id, Some(2));
    }

    #[tokio::test]
    async fn test_toggle_visibility_twice_restores_state() {
        let mock = MockApi::new();
        let mut component = saved_component(9, ComponentType::About, 5);
        component.content = json!({"bio": "keep me"});
        let portfolio = saved_portfolio(vec![component]);
        let mut builder = PortfolioBuilder::new(mock, Session::anonymous(), portfolio);

        assert!(!builder.toggle_visibility(0).unwrap());
        assert!(builder.toggle_visibility(0).unwrap());

        let component = &builder.portfolio().components[0];
        assert!(component.is_visible);
        assert_eq!(component.order, 5);
        assert_eq!(component.content, json!({"bio": "keep me"}));
    }

    #[tokio::test]
    async fn test_publish_failure_leaves_local_flag_unchanged() {
        let mock = MockApi::new();
        mock.fail_publish.store(true, Ordering::SeqCst);
        let mut builder =
            PortfolioBuilder::new(mock, Session::anonymous(), saved_portfolio(vec![]));
        assert!(builder.set_published(true).await.is_err());
        assert!(!builder.portfolio().is_published);
    }

    #[tokio::test]
    async fn test_publish_success_adopts_server_slug() {
        let mock = MockApi::new();
        let mut builder =
            PortfolioBuilder::new(mock, Session::anonymous(), saved_portfolio(vec![]));
        builder.set_published(true).await.unwrap();
        assert!(builder.portfolio().is_published);
        assert_eq!(builder.portfolio().slug.as_deref(), Some("published-slug"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_autosave_debounces_rapid_edits_into_one_update() {
        let mock = MockApi::new();
        let mut builder = PortfolioBuilder::new(
            mock.clone(),
            Session::anonymous(),
            saved_portfolio(vec![]),
        );

        builder.set_title("A");
        tokio::time::advance(Duration::from_millis(500)).await;
        builder.set_title("AB");
        tokio::time::advance(Duration::from_millis(500)).await;
        builder.set_title("ABC");

        tokio::time::advance(Duration::from_secs(3)).await;
        builder.flush_autosave().await;

        let updates = mock.portfolio_updates.lock().unwrap();
        assert_eq!(updates.len(), 1, "rapid edits must collapse to one save");
        assert_eq!(updates[0].title.as_deref(), Some("ABC"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_autosave_fires_again_after_quiet_period() {
        let mock = MockApi::new();
        let mut builder = PortfolioBuilder::new(
            mock.clone(),
            Session::anonymous(),
            saved_portfolio(vec![]),
        );

        builder.set_title("First");
        tokio::time::advance(Duration::from_secs(3)).await;
        builder.flush_autosave().await;

        builder.set_title("Second");
        tokio::time::advance(Duration::from_secs(3)).await;
        builder.flush_autosave().await;

        let updates = mock.portfolio_updates.lock().unwrap();
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[1].title.as_deref(), Some("Second"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_autosave_skipped_for_unsaved_portfolio() {
        let mock = MockApi::new();
        let mut builder = PortfolioBuilder::new(
            mock.clone(),
            Session::anonymous(),
            unsaved_portfolio("Draft"),
        );
        builder.set_title("Draft v2");
        tokio::time::advance(Duration::from_secs(3)).await;
        builder.flush_autosave().await;
        assert!(mock.portfolio_updates.lock().unwrap().is_empty());
    }

    #[test]
    fn test_move_item_preserves_relative_order() {
        let mut items = vec!['a', 'b', 'c', 'd'];
        move_item(&mut items, 0, 2);
        assert_eq!(items, vec!['b', 'c', 'a', 'd']);
        move_item(&mut items, 3, 0);
        assert_eq!(items, vec!['d', 'b', 'c', 'a']);
    }

    #[test]
    fn test_renumber_assigns_array_positions() {
        let mut components = vec![
            saved_component(1, ComponentType::Header, 9),
            saved_component(2, ComponentType::About, 4),
        ];
        renumber(&mut components);
        assert_eq!(components[0].order, 0);
        assert_eq!(components[1].order, 1);
    }
}
