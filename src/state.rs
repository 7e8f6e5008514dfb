//! Application State
//!
//! One shared catalog plus a session map. Each session owns a cart and its
//! checkout flow; handlers reach both only through [`AppState`]. Reads never
//! create a session, and sessions left idle are swept periodically.

use crate::{
    cart::{helpers::format_item_summary, store::CartStore},
    catalog::{
        errors::CatalogError,
        images::ImageResolver,
        source::{HttpProductSource, ProductSource, SourceError},
        store::Catalog,
    },
    checkout::{
        errors::CheckoutError,
        flow::{CheckoutFlow, CheckoutPhase},
        models::{CheckoutForm, CheckoutReceipt, NavigationSignal},
        submitter::SimulatedSubmitter,
    },
    config::StorefrontSettings,
};
use dashmap::DashMap;
use rust_decimal::Decimal;
use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// Cart and checkout progress of one visitor
#[derive(Debug, Clone)]
pub struct Session {
    pub cart: CartStore,
    pub checkout: CheckoutFlow,
    last_seen: Instant,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            cart: CartStore::default(),
            checkout: CheckoutFlow::default(),
            last_seen: Instant::now(),
        }
    }
}

impl Session {
    /// Time since the session was last read or changed.
    pub fn idle_for(&self) -> Duration {
        self.last_seen.elapsed()
    }

    fn touch(&mut self) {
        self.last_seen = Instant::now();
    }
}

/// Core application state containing the catalog and the sessions
pub struct AppState {
    /// Product catalog shared by every session.
    pub catalog: Catalog,

    /// In-memory sessions, keyed by session id.
    /// DashMap allows concurrent access without external Mutexes.
    pub sessions: DashMap<String, Session>,

    /// Resolves product thumbnails into image URLs.
    pub images: ImageResolver,

    submitter: SimulatedSubmitter,
    default_delivery_charge: Decimal,
    redirect_delay: Duration,
    session_idle_timeout: Duration,
    session_sweep_interval: Duration,
}

impl AppState {
    /// Creates a state fed from the given product source.
    pub fn new(source: Arc<dyn ProductSource>, settings: &StorefrontSettings) -> Self {
        Self {
            catalog: Catalog::new(source),
            sessions: DashMap::new(),
            images: ImageResolver::new(settings.storage_base_url.clone()),
            submitter: SimulatedSubmitter::new(settings.submit_delay),
            default_delivery_charge: settings.default_delivery_charge,
            redirect_delay: settings.redirect_delay,
            session_idle_timeout: settings.session_idle_timeout,
            session_sweep_interval: settings.session_sweep_interval.max(Duration::from_millis(1)),
        }
    }

    /// Creates a state fed from the remote product API.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_settings(settings: &StorefrontSettings) -> Result<Self, SourceError> {
        let source = HttpProductSource::new(&settings.products_url, settings.products_timeout)?;
        Ok(Self::new(Arc::new(source), settings))
    }

    pub fn default_delivery_charge(&self) -> Decimal {
        self.default_delivery_charge
    }

    /// Runs `f` on the session, creating an empty one first if needed.
    ///
    /// The session stays locked while `f` runs; `f` must not touch
    /// `self.sessions`.
    pub fn with_session<R>(&self, session_id: &str, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut session = self.sessions.entry(session_id.to_owned()).or_default();
        session.touch();
        f(&mut *session)
    }

    /// Runs `f` on the session, or on an empty session when there is none.
    ///
    /// Unknown ids are not inserted.
    pub fn read_session<R>(&self, session_id: &str, f: impl FnOnce(&Session) -> R) -> R {
        match self.sessions.get_mut(session_id) {
            Some(mut session) => {
                session.touch();
                f(&*session)
            }
            None => f(&Session::default()),
        }
    }

    /// Drops sessions idle for at least `max_idle`, except those with a
    /// submission in flight. Returns how many were dropped.
    pub fn evict_idle_sessions(&self, max_idle: Duration) -> usize {
        let mut evicted = 0;
        self.sessions.retain(|_, session| {
            let keep = session.checkout.phase() == CheckoutPhase::Submitting
                || session.idle_for() < max_idle;
            if !keep {
                evicted += 1;
            }
            keep
        });
        evicted
    }

    /// Starts the background task evicting idle sessions.
    pub fn spawn_session_sweeper(self: &Arc<Self>) -> JoinHandle<()> {
        let me = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(me.session_sweep_interval);
            loop {
                interval.tick().await;
                let evicted = me.evict_idle_sessions(me.session_idle_timeout);
                if evicted > 0 {
                    debug!(evicted, remaining = me.sessions.len(), "idle sessions evicted");
                }
            }
        })
    }

    /// Adds one unit of a product to the session's cart and opens the cart.
    ///
    /// Returns the line's new quantity.
    ///
    /// # Errors
    ///
    /// Returns the catalog error when the product cannot be found.
    pub async fn add_to_cart(&self, session_id: &str, product_id: u64) -> Result<u32, CatalogError> {
        let product = self.catalog.find_product(&product_id.to_string()).await?;

        Ok(self.with_session(session_id, |session| {
            let quantity = session.cart.add(product);
            session.cart.open();
            quantity
        }))
    }

    /// Validates and submits the session's order.
    ///
    /// The submission runs on its own task and always runs to completion,
    /// even if the caller stops waiting. The session is not locked while it
    /// runs. On completion the ordered quantities leave the cart and the cart
    /// is closed; anything added meanwhile stays.
    ///
    /// # Errors
    ///
    /// Returns the checkout error when validation fails or a submission is
    /// already running. The cart is unchanged in both cases.
    pub async fn submit_checkout(
        self: &Arc<Self>,
        session_id: &str,
        form: &CheckoutForm,
    ) -> Result<CheckoutReceipt, CheckoutError> {
        let (order, ordered, summary) = self.with_session(session_id, |session| {
            session
                .checkout
                .start_submission(&session.cart, form, self.default_delivery_charge)
                .map(|order| {
                    let lines = session.cart.lines();
                    (order, session.cart.quantities(), format_item_summary(lines))
                })
        })?;

        let state = Arc::clone(self);
        let owner = session_id.to_owned();
        let submitted = order.clone();
        let submission = tokio::spawn(async move {
            state.submitter.submit(&submitted).await;

            state.with_session(&owner, |session| {
                session
                    .checkout
                    .complete_submission(&mut session.cart, &ordered);
            });
            info!(session_id = %owner, items = %summary, "checkout completed");
        });

        if let Err(error) = submission.await {
            error!(%error, session_id, "order submission task failed");
            return Err(CheckoutError::SubmissionInterrupted);
        }

        Ok(CheckoutReceipt {
            order,
            redirect: NavigationSignal {
                path: "/".to_owned(),
                after_ms: u64::try_from(self.redirect_delay.as_millis()).unwrap_or(u64::MAX),
            },
        })
    }
}
