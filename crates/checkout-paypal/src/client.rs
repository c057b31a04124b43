//! # PayPal Checkout Client
//!
//! Drives PayPal's order and subscription workflows:
//!
//! - One-time purchase: create order → user approves in browser → capture.
//! - Subscription: create product → create plan → create subscription →
//!   user approves in browser (no capture step; PayPal activates it).
//!
//! Requests are JSON; authentication is a bearer token obtained once per
//! client via the client-credentials grant and re-acquired near expiry.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::Method;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

use checkout_core::{
    money, transport, ApiResponse, ApprovalPoller, CheckoutClient, CheckoutError, CheckoutOutcome,
    CheckoutResult, CheckoutSurface, MessageConfig, PaymentPeriod, PollOutcome, UrlOpener, Verdict,
};

use crate::api;
use crate::config::PayPalConfig;

const PROVIDER: &str = "paypal";

const ORDER_CREATED: &str = "CREATED";
const ORDER_APPROVED: &str = "APPROVED";
const ORDER_COMPLETED: &str = "COMPLETED";
const SUBSCRIPTION_PENDING: &str = "APPROVAL_PENDING";

/// Re-acquire the access token this long before it would expire.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// PayPal subscription ids carry this prefix; order ids never do.
///
/// Undocumented provider convention. It decides which endpoint a poll hits,
/// so it lives in exactly one place. Swap for a tagged id if the provider
/// contract is ever confirmed.
const SUBSCRIPTION_ID_PREFIX: &str = "I-";

/// True when `transaction_id` names a billing subscription rather than an
/// order.
pub fn is_subscription_id(transaction_id: &str) -> bool {
    transaction_id.starts_with(SUBSCRIPTION_ID_PREFIX)
}

fn transaction_endpoint(transaction_id: &str) -> String {
    if is_subscription_id(transaction_id) {
        format!("v1/billing/subscriptions/{transaction_id}")
    } else {
        format!("v2/checkout/orders/{transaction_id}")
    }
}

struct CachedToken {
    value: String,
    expires_at: Instant,
}

/// Client for PayPal's checkout and billing APIs.
pub struct PayPalClient {
    config: PayPalConfig,
    http: reqwest::Client,
    surface: Arc<dyn CheckoutSurface>,
    opener: Arc<dyn UrlOpener>,
    messages: MessageConfig,
    approval_interval: Duration,
    token: Mutex<Option<CachedToken>>,
}

impl PayPalClient {
    /// Create a new client against the configured environment.
    pub fn new(
        config: PayPalConfig,
        surface: Arc<dyn CheckoutSurface>,
        opener: Arc<dyn UrlOpener>,
    ) -> Self {
        Self {
            config,
            http: transport::http_client(),
            surface,
            opener,
            messages: MessageConfig::default(),
            approval_interval: Duration::from_secs(1),
            token: Mutex::new(None),
        }
    }

    /// Create from environment variables.
    pub fn from_env(
        surface: Arc<dyn CheckoutSurface>,
        opener: Arc<dyn UrlOpener>,
    ) -> CheckoutResult<Self> {
        let config = PayPalConfig::from_env()?;
        Ok(Self::new(config, surface, opener))
    }

    /// Builder: how often to ask PayPal whether the user approved.
    pub fn with_approval_interval(mut self, interval: Duration) -> Self {
        self.approval_interval = interval;
        self
    }

    /// Bearer token for API calls, exchanged lazily and cached until close
    /// to expiry.
    async fn access_token(&self) -> CheckoutResult<String> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.expires_at {
                return Ok(token.value.clone());
            }
            debug!("access token near expiry, re-acquiring");
        }

        let credentials = BASE64.encode(format!(
            "{}:{}",
            self.config.client_id, self.config.client_secret
        ));

        let response = transport::send(
            self.http
                .post(self.config.endpoint("v1/oauth2/token"))
                .header("Accept", "application/json")
                .header("Accept-Language", "en_US")
                .header("Authorization", format!("Basic {credentials}"))
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body("grant_type=client_credentials"),
        )
        .await?;

        if !response.is_success() {
            return Err(provider_error(response));
        }

        let token: api::AccessToken = parse(&response.body)?;
        let lifetime = Duration::from_secs(token.expires_in.max(0) as u64)
            .saturating_sub(TOKEN_EXPIRY_MARGIN);

        *cached = Some(CachedToken {
            value: token.access_token.clone(),
            expires_at: Instant::now() + lifetime,
        });

        Ok(token.access_token)
    }

    /// One authenticated API round trip. JSON body when given.
    async fn request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<String>,
    ) -> CheckoutResult<ApiResponse> {
        let token = self.access_token().await?;

        let mut builder = self
            .http
            .request(method, self.config.endpoint(endpoint))
            .header("Authorization", format!("Bearer {token}"))
            .header("Content-Type", "application/json");

        if let Some(body) = body {
            builder = builder.body(body);
        }

        transport::send(builder).await
    }

    async fn create_product(&self, name: &str) -> CheckoutResult<api::Product> {
        let request = api::ProductRequest {
            name: name.to_string(),
            product_type: "SERVICE",
        };

        let response = self
            .request(
                Method::POST,
                "v1/catalogs/products",
                Some(to_json(&request)?),
            )
            .await?;

        if !response.is_success() {
            return Err(provider_error(response));
        }
        parse(&response.body)
    }

    async fn create_plan(
        &self,
        product: &api::Product,
        price: &str,
        period: PaymentPeriod,
        intervals: u32,
    ) -> CheckoutResult<api::Plan> {
        let now = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S").to_string();
        let request = api::PlanRequest {
            product_id: product.id.clone(),
            name: product.name.clone(),
            billing_cycles: vec![api::BillingCycle {
                frequency: api::Frequency {
                    interval_unit: period.as_str().to_uppercase(),
                    interval_count: intervals,
                },
                tenure_type: "REGULAR".to_string(),
                pricing_scheme: api::PricingScheme {
                    fixed_price: api::Amount::new(&self.config.currency_code, price),
                    create_time: Some(now.clone()),
                    update_time: Some(now),
                },
                sequence: 1,
                total_cycles: 0,
            }],
            payment_preferences: api::PaymentPreferences {
                auto_bill_outstanding: false,
                setup_fee: api::Amount::new(&self.config.currency_code, "0"),
                payment_failure_threshold: 2,
            },
        };

        let response = self
            .request(Method::POST, "v1/billing/plans", Some(to_json(&request)?))
            .await?;

        if !response.is_success() {
            return Err(provider_error(response));
        }
        parse(&response.body)
    }

    async fn create_subscription_resource(
        &self,
        plan: &api::Plan,
    ) -> CheckoutResult<api::Subscription> {
        let request = api::SubscriptionRequest {
            plan_id: plan.id.clone(),
            application_context: api::ApplicationContext {
                return_url: self.config.success_url.clone(),
                cancel_url: self.config.cancel_url.clone(),
            },
        };

        let response = self
            .request(
                Method::POST,
                "v1/billing/subscriptions",
                Some(to_json(&request)?),
            )
            .await?;

        if !response.is_success() {
            return Err(provider_error(response));
        }

        let subscription: api::Subscription = parse(&response.body)?;
        if subscription.status != SUBSCRIPTION_PENDING {
            return Err(CheckoutError::UnexpectedState {
                provider: PROVIDER,
                expected: SUBSCRIPTION_PENDING,
                body: response.body,
            });
        }
        Ok(subscription)
    }

    /// One poll round trip. Any non-approved answer, including request
    /// failures, keeps the loop going.
    async fn check_approval(&self, endpoint: &str) -> Verdict<()> {
        match self.request(Method::GET, endpoint, None).await {
            Ok(response) if response.is_success() => {
                match serde_json::from_str::<api::StatusProbe>(&response.body) {
                    Ok(probe) if probe.status == ORDER_APPROVED => Verdict::Approved(()),
                    _ => Verdict::Pending,
                }
            }
            Ok(_) | Err(_) => Verdict::Pending,
        }
    }
}

#[async_trait]
impl CheckoutClient for PayPalClient {
    type OrderDetails = api::Order;
    type SubscriptionDetails = api::Plan;

    fn message_config(&self) -> &MessageConfig {
        &self.messages
    }

    fn set_message_config(&mut self, config: MessageConfig) {
        self.messages = config;
    }

    #[instrument(skip(self, price), fields(item = item_name))]
    async fn create_order(
        &self,
        item_name: &str,
        price: &str,
        quantity: u32,
    ) -> CheckoutResult<CheckoutOutcome> {
        if !self.surface.confirm(&self.messages.order_window).await {
            return Ok(CheckoutOutcome::Abandoned);
        }

        let total = money::line_total(price, quantity)?;
        let request = api::OrderRequest::single_item(
            item_name,
            price,
            &total,
            quantity,
            &self.config.currency_code,
            &self.config.success_url,
            &self.config.cancel_url,
        );

        let response = self
            .request(Method::POST, "v2/checkout/orders", Some(to_json(&request)?))
            .await?;

        if !response.is_success() {
            return Err(provider_error(response));
        }

        let order: api::Order = parse(&response.body)?;
        if order.status != ORDER_CREATED {
            return Err(CheckoutError::UnexpectedState {
                provider: PROVIDER,
                expected: ORDER_CREATED,
                body: response.body,
            });
        }

        let approve = order.approve_link().ok_or(CheckoutError::UnexpectedState {
            provider: PROVIDER,
            expected: "approve link",
            body: response.body.clone(),
        })?;

        info!(order_id = %order.id, "order created, awaiting user approval");
        self.opener.open(approve)?;

        self.wait_for_approval(&order.id).await
    }

    #[instrument(skip(self))]
    async fn wait_for_approval(&self, transaction_id: &str) -> CheckoutResult<CheckoutOutcome> {
        self.surface.show_waiting(&self.messages.wait_window);

        let endpoint = transaction_endpoint(transaction_id);
        let poller = ApprovalPoller::new(self.approval_interval, self.surface.dismissed());
        let outcome = poller.run(|_tick| self.check_approval(&endpoint)).await;

        if let PollOutcome::Abandoned = outcome {
            return Ok(CheckoutOutcome::Abandoned);
        }

        if is_subscription_id(transaction_id) {
            // Approved subscriptions are live; there is no capture step.
            if self
                .surface
                .confirm(&self.messages.subscribe_complete_window)
                .await
            {
                self.surface.hide();
            }
            return Ok(CheckoutOutcome::Completed(transaction_id.to_string()));
        }

        if !self.surface.confirm(&self.messages.confirm_window).await {
            return Ok(CheckoutOutcome::Abandoned);
        }

        let order_id = self.confirm_purchase(transaction_id).await?;
        Ok(CheckoutOutcome::Completed(order_id))
    }

    #[instrument(skip(self))]
    async fn confirm_purchase(&self, transaction_id: &str) -> CheckoutResult<String> {
        let response = self
            .request(
                Method::POST,
                &format!("v2/checkout/orders/{transaction_id}/capture"),
                None,
            )
            .await?;

        let captured = response
            .is_success()
            .then(|| serde_json::from_str::<api::Order>(&response.body).ok())
            .flatten()
            .filter(|order| order.status == ORDER_COMPLETED);

        match captured {
            Some(order) => {
                info!(order_id = %order.id, "payment captured");
                if self
                    .surface
                    .confirm(&self.messages.complete_window.success)
                    .await
                {
                    self.surface.hide();
                }
                Ok(order.id)
            }
            None => {
                warn!(status = response.status, "capture failed");
                if self
                    .surface
                    .confirm(&self.messages.complete_window.failure)
                    .await
                {
                    self.surface.hide();
                }
                if response.is_success() {
                    Err(CheckoutError::UnexpectedState {
                        provider: PROVIDER,
                        expected: ORDER_COMPLETED,
                        body: response.body,
                    })
                } else {
                    Err(provider_error(response))
                }
            }
        }
    }

    async fn get_order_details(&self, transaction_id: &str) -> CheckoutResult<api::Order> {
        let response = self
            .request(
                Method::GET,
                &format!("v2/checkout/orders/{transaction_id}"),
                None,
            )
            .await?;

        if !response.is_success() {
            return Err(provider_error(response));
        }
        parse(&response.body)
    }

    #[instrument(skip(self, price), fields(plan = plan_name))]
    async fn create_subscription(
        &self,
        plan_name: &str,
        price: &str,
        period: PaymentPeriod,
        intervals: u32,
    ) -> CheckoutResult<CheckoutOutcome> {
        if !self.surface.confirm(&self.messages.subscribe_window).await {
            return Ok(CheckoutOutcome::Abandoned);
        }

        // Three-resource chain; the first failure short-circuits with that
        // step's raw response.
        let product = self.create_product(plan_name).await?;
        let plan = self.create_plan(&product, price, period, intervals).await?;
        let subscription = self.create_subscription_resource(&plan).await?;

        let approve = subscription
            .approve_link()
            .ok_or(CheckoutError::UnexpectedState {
                provider: PROVIDER,
                expected: "approve link",
                body: String::new(),
            })?;

        info!(subscription_id = %subscription.id, "subscription created, awaiting user approval");
        self.opener.open(approve)?;

        self.wait_for_approval(&subscription.id).await
    }

    /// Unpause billing. `provider_id` is the *plan* id, resolved via
    /// [`get_subscription_details`](CheckoutClient::get_subscription_details);
    /// it is not the id returned by the initial subscribe.
    async fn activate_subscription(&self, provider_id: &str) -> CheckoutResult<String> {
        let response = self
            .request(
                Method::POST,
                &format!("v1/billing/plans/{provider_id}/activate"),
                None,
            )
            .await?;

        if !response.is_success() {
            return Err(provider_error(response));
        }
        Ok(response.body)
    }

    /// Pause billing. Same plan-id caveat as activation.
    async fn deactivate_subscription(&self, provider_id: &str) -> CheckoutResult<String> {
        let response = self
            .request(
                Method::POST,
                &format!("v1/billing/plans/{provider_id}/deactivate"),
                None,
            )
            .await?;

        if !response.is_success() {
            return Err(provider_error(response));
        }
        Ok(response.body)
    }

    async fn update_subscription_pricing(
        &self,
        provider_id: &str,
        price: &str,
    ) -> CheckoutResult<String> {
        let request = api::PricingUpdateRequest {
            pricing_schemes: vec![api::PricingSchemeUpdate {
                billing_cycle_sequence: 1,
                pricing_scheme: api::PricingScheme {
                    fixed_price: api::Amount::new(&self.config.currency_code, price),
                    create_time: None,
                    update_time: None,
                },
            }],
        };

        let response = self
            .request(
                Method::POST,
                &format!("v1/billing/plans/{provider_id}/update-pricing-schemes"),
                Some(to_json(&request)?),
            )
            .await?;

        if !response.is_success() {
            return Err(provider_error(response));
        }
        Ok(response.body)
    }

    /// Fetch the plan behind a subscription. The subscribe-result id only
    /// names the subscription; management operations need the plan, so this
    /// is a two-step fetch.
    async fn get_subscription_details(&self, subscription_id: &str) -> CheckoutResult<api::Plan> {
        let response = self
            .request(
                Method::GET,
                &format!("v1/billing/subscriptions/{subscription_id}"),
                None,
            )
            .await?;

        if !response.is_success() {
            return Err(provider_error(response));
        }
        let subscription: api::Subscription = parse(&response.body)?;

        let response = self
            .request(
                Method::GET,
                &format!("v1/billing/plans/{}", subscription.plan_id),
                None,
            )
            .await?;

        if !response.is_success() {
            return Err(provider_error(response));
        }
        parse(&response.body)
    }
}

fn provider_error(response: ApiResponse) -> CheckoutError {
    CheckoutError::Provider {
        provider: PROVIDER,
        status: response.status,
        body: response.body,
    }
}

fn parse<T: serde::de::DeserializeOwned>(body: &str) -> CheckoutResult<T> {
    serde_json::from_str(body)
        .map_err(|e| CheckoutError::Serialization(format!("Failed to parse PayPal response: {e}")))
}

fn to_json<T: serde::Serialize>(value: &T) -> CheckoutResult<String> {
    serde_json::to_string(value).map_err(|e| CheckoutError::Serialization(e.to_string()))
}
