use paseo_checkout::{CheckoutRules, CheckoutValidator, FormRenderer, PassengerManifestSchema};
use paseo_core::OrderMetaRepository;
use paseo_order::{AdminPresenter, OrderMetadataStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
}

/// Checkout components built once from the configured rules and shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub rules: CheckoutRules,
    pub schema: PassengerManifestSchema,
    pub renderer: FormRenderer,
    pub validator: CheckoutValidator,
    pub store: OrderMetadataStore,
    pub presenter: AdminPresenter,
    pub auth: AuthConfig,
}

impl AppState {
    pub fn new(meta_repo: Arc<dyn OrderMetaRepository>, rules: CheckoutRules, auth: AuthConfig) -> Self {
        let store = OrderMetadataStore::new(meta_repo, &rules);
        Self {
            schema: rules.schema(),
            renderer: FormRenderer::new(&rules),
            validator: CheckoutValidator::new(&rules),
            presenter: AdminPresenter::new(store.clone()),
            store,
            rules,
            auth,
        }
    }
}
