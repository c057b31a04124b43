//! # Stripe Checkout Client
//!
//! Drives Stripe's hosted-checkout workflow. One-time purchases and
//! subscriptions share a single chain (product, then price, then checkout
//! session), differing only in whether the price carries a recurrence
//! descriptor.
//! Capture happens on Stripe's hosted page; there is no confirm step.
//!
//! Requests are form-urlencoded; responses are JSON.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use checkout_core::{
    money, transport, ApiResponse, ApprovalPoller, CheckoutClient, CheckoutError, CheckoutOutcome,
    CheckoutResult, CheckoutSurface, MessageConfig, PaymentPeriod, PollOutcome, UrlOpener, Verdict,
};

use crate::api;
use crate::config::{RedirectMode, StripeConfig};
use crate::redirect;

const PROVIDER: &str = "stripe";

const MODE_PAYMENT: &str = "payment";
const MODE_SUBSCRIPTION: &str = "subscription";

/// Recurrence attached to a price: bill every `count` × `interval`.
#[derive(Debug, Clone, Copy)]
struct RecurringSpec {
    interval: PaymentPeriod,
    count: u32,
}

/// Client for Stripe's checkout and billing APIs.
pub struct StripeClient {
    config: StripeConfig,
    http: reqwest::Client,
    surface: Arc<dyn CheckoutSurface>,
    opener: Arc<dyn UrlOpener>,
    messages: MessageConfig,
    approval_interval: Duration,
}

impl StripeClient {
    /// Create a new client.
    pub fn new(
        config: StripeConfig,
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
        }
    }

    /// Create from environment variables.
    pub fn from_env(
        surface: Arc<dyn CheckoutSurface>,
        opener: Arc<dyn UrlOpener>,
    ) -> CheckoutResult<Self> {
        let config = StripeConfig::from_env()?;
        Ok(Self::new(config, surface, opener))
    }

    /// Builder: how often to ask Stripe whether the user completed checkout.
    pub fn with_approval_interval(mut self, interval: Duration) -> Self {
        self.approval_interval = interval;
        self
    }

    /// One API round trip. Form body when given.
    async fn request(
        &self,
        method: Method,
        endpoint: &str,
        form: Option<&[(String, String)]>,
    ) -> CheckoutResult<ApiResponse> {
        let mut builder = self
            .http
            .request(method, self.config.endpoint(endpoint))
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version);

        if let Some(form) = form {
            builder = builder.form(form);
        }

        transport::send(builder).await
    }

    async fn create_product(&self, name: &str) -> CheckoutResult<api::Product> {
        let form = vec![("name".to_string(), name.to_string())];
        let response = self
            .request(Method::POST, "v1/products", Some(&form))
            .await?;

        if !response.is_success() {
            return Err(provider_error(response));
        }
        parse(&response.body)
    }

    async fn create_price(
        &self,
        product_id: &str,
        name: &str,
        unit_price: &str,
        recurring: Option<RecurringSpec>,
    ) -> CheckoutResult<api::Price> {
        let cents = money::to_minor_units(unit_price)?;

        let mut form = vec![
            ("nickname".to_string(), name.to_string()),
            ("unit_amount".to_string(), cents.to_string()),
            ("currency".to_string(), self.config.wire_currency()),
            ("product".to_string(), product_id.to_string()),
        ];
        if let Some(spec) = recurring {
            form.push((
                "recurring[interval]".to_string(),
                spec.interval.as_str().to_string(),
            ));
            form.push((
                "recurring[interval_count]".to_string(),
                spec.count.to_string(),
            ));
        }

        let response = self.request(Method::POST, "v1/prices", Some(&form)).await?;

        if !response.is_success() {
            return Err(provider_error(response));
        }
        parse(&response.body)
    }

    /// Create the checkout session. Product name, quantity, and unit price
    /// are echoed onto the session as metadata so order details can be
    /// rebuilt later without extra round trips.
    async fn create_session(
        &self,
        price: &api::Price,
        quantity: u32,
        mode: &str,
    ) -> CheckoutResult<api::Session> {
        let form = vec![
            ("mode".to_string(), mode.to_string()),
            ("payment_method_types[0]".to_string(), "card".to_string()),
            ("metadata[product]".to_string(), price.nickname.clone()),
            ("metadata[quantity]".to_string(), quantity.to_string()),
            (
                "metadata[unit_price]".to_string(),
                price.unit_amount.to_string(),
            ),
            ("line_items[0][price]".to_string(), price.id.clone()),
            ("line_items[0][quantity]".to_string(), quantity.to_string()),
            ("success_url".to_string(), self.config.success_url.clone()),
            ("cancel_url".to_string(), self.config.cancel_url.clone()),
        ];

        let response = transport::send(
            self.http
                .post(self.config.endpoint("v1/checkout/sessions"))
                .header("Authorization", self.config.auth_header())
                .header("Stripe-Version", &self.config.api_version)
                .header("Idempotency-Key", Uuid::new_v4().to_string())
                .form(&form),
        )
        .await?;

        if !response.is_success() {
            return Err(provider_error(response));
        }
        parse(&response.body)
    }

    /// The shared chain behind both order and subscription creation.
    async fn run_checkout(
        &self,
        item_name: &str,
        unit_price: &str,
        quantity: u32,
        recurring: Option<RecurringSpec>,
    ) -> CheckoutResult<CheckoutOutcome> {
        let product = self.create_product(item_name).await?;
        let price = self
            .create_price(&product.id, item_name, unit_price, recurring)
            .await?;

        let mode = if recurring.is_some() {
            MODE_SUBSCRIPTION
        } else {
            MODE_PAYMENT
        };
        let session = self.create_session(&price, quantity, mode).await?;

        info!(session_id = %session.id, mode, "checkout session created");
        self.launch(&session)?;

        self.wait_for_approval(&session.id).await
    }

    /// Hand the user off to the hosted checkout page.
    fn launch(&self, session: &api::Session) -> CheckoutResult<()> {
        match self.config.redirect_mode {
            RedirectMode::LocalPage => {
                let url = redirect::write_page(&session.id, &self.config.publishable_key)?;
                self.opener.open(&url)
            }
            RedirectMode::HostedUrl => {
                let url = session
                    .url
                    .as_deref()
                    .filter(|u| !u.is_empty())
                    .ok_or(CheckoutError::UnexpectedState {
                        provider: PROVIDER,
                        expected: "hosted checkout url",
                        body: String::new(),
                    })?;
                self.opener.open(url)
            }
        }
    }

    /// One poll round trip: the session is approved once a customer
    /// reference appears on it.
    async fn check_session(&self, endpoint: &str) -> Verdict<api::Session> {
        match self.request(Method::GET, endpoint, None).await {
            Ok(response) if response.is_success() => {
                match serde_json::from_str::<api::Session>(&response.body) {
                    Ok(session) if session.has_customer() => Verdict::Approved(session),
                    _ => Verdict::Pending,
                }
            }
            Ok(_) | Err(_) => Verdict::Pending,
        }
    }

    async fn set_collection_status(
        &self,
        subscription_id: &str,
        active: bool,
    ) -> CheckoutResult<String> {
        // An empty value clears the pause; "void" stops collection.
        let form = vec![if active {
            ("pause_collection".to_string(), String::new())
        } else {
            ("pause_collection[behavior]".to_string(), "void".to_string())
        }];

        let response = self
            .request(
                Method::POST,
                &format!("v1/subscriptions/{subscription_id}"),
                Some(&form),
            )
            .await?;

        if !response.is_success() {
            return Err(provider_error(response));
        }
        let subscription: api::Subscription = parse(&response.body)?;
        Ok(subscription.id)
    }
}

#[async_trait]
impl CheckoutClient for StripeClient {
    type OrderDetails = api::Session;
    type SubscriptionDetails = api::Subscription;

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
        self.run_checkout(item_name, price, quantity, None).await
    }

    #[instrument(skip(self))]
    async fn wait_for_approval(&self, transaction_id: &str) -> CheckoutResult<CheckoutOutcome> {
        self.surface.show_waiting(&self.messages.wait_window);

        let endpoint = format!("v1/checkout/sessions/{transaction_id}");
        let poller = ApprovalPoller::new(self.approval_interval, self.surface.dismissed());
        let outcome = poller.run(|_tick| self.check_session(&endpoint)).await;

        // The redirect document has served its purpose once polling stops,
        // approved or not.
        redirect::remove_page();

        let session = match outcome {
            PollOutcome::Abandoned => return Ok(CheckoutOutcome::Abandoned),
            PollOutcome::Approved(session) => session,
        };

        let window = match session.subscription_ref() {
            Some(_) => &self.messages.subscribe_complete_window,
            None => &self.messages.complete_window.success,
        };
        if self.surface.confirm(window).await {
            self.surface.hide();
        }

        Ok(CheckoutOutcome::Completed(transaction_id.to_string()))
    }

    /// Not part of Stripe's flow: the hosted checkout page captures the
    /// payment itself.
    ///
    /// # Panics
    ///
    /// Always. Reaching this is an integration bug, not a runtime failure.
    async fn confirm_purchase(&self, _transaction_id: &str) -> CheckoutResult<String> {
        unimplemented!(
            "Stripe checkout captures automatically after approval; there is no confirm step"
        )
    }

    async fn get_order_details(&self, transaction_id: &str) -> CheckoutResult<api::Session> {
        let response = self
            .request(
                Method::GET,
                &format!("v1/checkout/sessions/{transaction_id}"),
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
        self.run_checkout(
            plan_name,
            price,
            1,
            Some(RecurringSpec {
                interval: period,
                count: intervals,
            }),
        )
        .await
    }

    /// Resume billing. `provider_id` is the *subscription* id from
    /// [`get_subscription_details`](CheckoutClient::get_subscription_details),
    /// not the session id returned by the initial subscribe.
    async fn activate_subscription(&self, provider_id: &str) -> CheckoutResult<String> {
        self.set_collection_status(provider_id, true).await
    }

    /// Pause billing. Same id caveat as activation.
    async fn deactivate_subscription(&self, provider_id: &str) -> CheckoutResult<String> {
        self.set_collection_status(provider_id, false).await
    }

    async fn update_subscription_pricing(
        &self,
        provider_id: &str,
        price: &str,
    ) -> CheckoutResult<String> {
        let response = self
            .request(
                Method::GET,
                &format!("v1/subscriptions/{provider_id}"),
                None,
            )
            .await?;

        if !response.is_success() {
            return Err(provider_error(response));
        }
        let subscription: api::Subscription = parse(&response.body)?;

        let item = subscription
            .items
            .data
            .first()
            .ok_or(CheckoutError::UnexpectedState {
                provider: PROVIDER,
                expected: "subscription item",
                body: response.body.clone(),
            })?;
        let interval = item
            .price
            .recurring
            .as_ref()
            .map(|r| r.interval.clone())
            .unwrap_or_default();

        let form = vec![
            ("items[0][id]".to_string(), item.id.clone()),
            (
                "items[0][price_data][currency]".to_string(),
                self.config.wire_currency(),
            ),
            (
                "items[0][price_data][product]".to_string(),
                item.price.product.clone(),
            ),
            (
                "items[0][price_data][recurring][interval]".to_string(),
                interval,
            ),
            (
                "items[0][price_data][unit_amount]".to_string(),
                money::to_minor_units(price)?.to_string(),
            ),
        ];

        let response = self
            .request(
                Method::POST,
                &format!("v1/subscriptions/{}", subscription.id),
                Some(&form),
            )
            .await?;

        if !response.is_success() {
            return Err(provider_error(response));
        }
        Ok(subscription.id)
    }

    /// The subscribe-result id names a checkout session; the subscription
    /// behind it is fetched through the session's reference.
    async fn get_subscription_details(
        &self,
        subscription_id: &str,
    ) -> CheckoutResult<api::Subscription> {
        let session = self.get_order_details(subscription_id).await?;

        let sub_ref = session
            .subscription_ref()
            .ok_or(CheckoutError::UnexpectedState {
                provider: PROVIDER,
                expected: "subscription reference",
                body: String::new(),
            })?;

        let response = self
            .request(Method::GET, &format!("v1/subscriptions/{sub_ref}"), None)
            .await?;

        if !response.is_success() {
            return Err(provider_error(response));
        }
        parse(&response.body)
    }
}

fn provider_error(response: ApiResponse) -> CheckoutError {
    if response.status >= 500 {
        warn!(status = response.status, "stripe server error");
    }
    CheckoutError::Provider {
        provider: PROVIDER,
        status: response.status,
        body: response.body,
    }
}

fn parse<T: serde::de::DeserializeOwned>(body: &str) -> CheckoutResult<T> {
    serde_json::from_str(body)
        .map_err(|e| CheckoutError::Serialization(format!("Failed to parse Stripe response: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_core::HeadlessSurface;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Default)]
    struct RecordingOpener(std::sync::Mutex<Vec<String>>);

    impl UrlOpener for RecordingOpener {
        fn open(&self, url: &str) -> CheckoutResult<()> {
            self.0.lock().unwrap().push(url.to_string());
            Ok(())
        }
    }

    fn test_client(
        server: &MockServer,
    ) -> (StripeClient, Arc<HeadlessSurface>, Arc<RecordingOpener>) {
        let surface = Arc::new(HeadlessSurface::new());
        let opener = Arc::new(RecordingOpener::default());
        let config = StripeConfig::new("sk_test_abc", "pk_test_xyz")
            .with_api_base_url(server.uri());
        let client = StripeClient::new(config, surface.clone(), opener.clone())
            .with_approval_interval(Duration::from_millis(10));
        (client, surface, opener)
    }

    async fn mock_chain(server: &MockServer, mode: &str) {
        Mock::given(method("POST"))
            .and(path("/v1/products"))
            .respond_with(ResponseTemplate::new(200)
                .set_body_json(json!({"id": "prod_1", "name": "Gold"})))
            .expect(1)
            .mount(server)
            .await;

        Mock::given(method("POST"))
            .and(path("/v1/checkout/sessions"))
            .and(body_string_contains(format!("mode={mode}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "cs_test_1",
                "mode": mode,
                "url": "https://checkout.stripe.com/c/pay/cs_test_1"
            })))
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_subscribe_flow_builds_recurring_price() {
        let server = MockServer::start().await;
        mock_chain(&server, "subscription").await;

        Mock::given(method("POST"))
            .and(path("/v1/prices"))
            .and(body_string_contains("unit_amount=999"))
            .and(body_string_contains("recurring%5Binterval%5D=month"))
            .and(body_string_contains("recurring%5Binterval_count%5D=1"))
            .and(body_string_contains("currency=usd"))
            .and(body_string_contains("product=prod_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "price_1",
                "nickname": "Gold",
                "currency": "usd",
                "product": "prod_1",
                "unit_amount": 999,
                "recurring": {"interval": "month", "interval_count": 1}
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v1/checkout/sessions/cs_test_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "cs_test_1",
                "customer": "cus_1",
                "subscription": "sub_1"
            })))
            .mount(&server)
            .await;

        let (client, _surface, opener) = test_client(&server);
        let outcome = client
            .create_subscription("Gold", "9.99", PaymentPeriod::Month, 1)
            .await
            .unwrap();

        assert_eq!(outcome, CheckoutOutcome::Completed("cs_test_1".to_string()));
        assert_eq!(
            opener.0.lock().unwrap().as_slice(),
            ["https://checkout.stripe.com/c/pay/cs_test_1"]
        );
    }

    #[tokio::test]
    async fn test_buy_flow_uses_payment_mode() {
        let server = MockServer::start().await;
        mock_chain(&server, "payment").await;

        Mock::given(method("POST"))
            .and(path("/v1/prices"))
            .and(body_string_contains("unit_amount=499"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "price_1",
                "nickname": "Widget",
                "currency": "usd",
                "product": "prod_1",
                "unit_amount": 499
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v1/checkout/sessions/cs_test_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "cs_test_1",
                "customer": "cus_1",
                "subscription": null
            })))
            .mount(&server)
            .await;

        let (client, _surface, _opener) = test_client(&server);
        let outcome = client.create_order("Widget", "4.99", 2).await.unwrap();

        assert_eq!(outcome, CheckoutOutcome::Completed("cs_test_1".to_string()));
    }

    #[tokio::test]
    async fn test_chain_short_circuits_on_price_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/products"))
            .respond_with(ResponseTemplate::new(200)
                .set_body_json(json!({"id": "prod_1", "name": "Widget"})))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/v1/prices"))
            .respond_with(ResponseTemplate::new(400)
                .set_body_string(r#"{"error":{"message":"Invalid currency"}}"#))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/v1/checkout/sessions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let (client, _surface, _opener) = test_client(&server);
        let err = client.create_order("Widget", "4.99", 1).await.unwrap_err();

        assert!(matches!(err, CheckoutError::Provider { status: 400, .. }));
        assert!(err.raw_body().unwrap().contains("Invalid currency"));
    }

    #[tokio::test]
    #[should_panic(expected = "captures automatically")]
    async fn test_confirm_purchase_is_misuse() {
        let surface = Arc::new(HeadlessSurface::new());
        let opener = Arc::new(RecordingOpener::default());
        let client = StripeClient::new(
            StripeConfig::new("sk_test_abc", "pk_test_xyz"),
            surface,
            opener,
        );

        let _ = client.confirm_purchase("cs_test_1").await;
    }

    #[tokio::test]
    async fn test_abandoned_wait_resolves_silently() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/checkout/sessions/cs_test_9"))
            .respond_with(ResponseTemplate::new(200)
                .set_body_json(json!({"id": "cs_test_9", "customer": null})))
            .mount(&server)
            .await;

        let (client, surface, _opener) = test_client(&server);
        let dismisser = surface.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            dismisser.dismiss();
        });

        let outcome = client.wait_for_approval("cs_test_9").await.unwrap();
        assert!(outcome.is_abandoned());
    }

    #[tokio::test]
    async fn test_local_redirect_page_written_and_cleaned_up() {
        let server = MockServer::start().await;
        mock_chain(&server, "payment").await;

        Mock::given(method("POST"))
            .and(path("/v1/prices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "price_1",
                "nickname": "Widget",
                "currency": "usd",
                "product": "prod_1",
                "unit_amount": 499
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v1/checkout/sessions/cs_test_1"))
            .respond_with(ResponseTemplate::new(200)
                .set_body_json(json!({"id": "cs_test_1", "customer": "cus_1"})))
            .mount(&server)
            .await;

        let surface = Arc::new(HeadlessSurface::new());
        let opener = Arc::new(RecordingOpener::default());
        let config = StripeConfig::new("sk_test_abc", "pk_test_xyz")
            .with_api_base_url(server.uri())
            .with_redirect_mode(RedirectMode::LocalPage);
        let client = StripeClient::new(config, surface, opener.clone())
            .with_approval_interval(Duration::from_millis(10));

        let outcome = client.create_order("Widget", "4.99", 1).await.unwrap();

        assert_eq!(outcome, CheckoutOutcome::Completed("cs_test_1".to_string()));
        let opened = opener.0.lock().unwrap();
        assert!(opened[0].starts_with("file://"), "opened {}", opened[0]);
        assert!(!redirect::page_path().exists());
    }

    #[tokio::test]
    async fn test_pause_and_resume_mutate_collection_field() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/subscriptions/sub_1"))
            .and(body_string_contains("pause_collection%5Bbehavior%5D=void"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "sub_1",
                "status": "active",
                "pause_collection": {"behavior": "void"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (client, _surface, _opener) = test_client(&server);
        let id = client.deactivate_subscription("sub_1").await.unwrap();
        assert_eq!(id, "sub_1");

        server.reset().await;

        Mock::given(method("POST"))
            .and(path("/v1/subscriptions/sub_1"))
            .and(body_string_contains("pause_collection="))
            .respond_with(ResponseTemplate::new(200)
                .set_body_json(json!({"id": "sub_1", "status": "active"})))
            .expect(1)
            .mount(&server)
            .await;

        let id = client.activate_subscription("sub_1").await.unwrap();
        assert_eq!(id, "sub_1");
    }

    #[tokio::test]
    async fn test_subscription_details_follow_session_reference() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/checkout/sessions/cs_test_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "cs_test_1",
                "customer": "cus_1",
                "subscription": "sub_1"
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v1/subscriptions/sub_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "sub_1",
                "status": "active",
                "items": {"data": [{
                    "id": "si_1",
                    "price": {
                        "id": "price_1",
                        "nickname": "Gold",
                        "currency": "usd",
                        "product": "prod_1",
                        "unit_amount": 999,
                        "recurring": {"interval": "month", "interval_count": 1}
                    }
                }]}
            })))
            .mount(&server)
            .await;

        let (client, _surface, _opener) = test_client(&server);
        let subscription = client.get_subscription_details("cs_test_1").await.unwrap();

        assert_eq!(subscription.id, "sub_1");
        assert_eq!(subscription.items.data[0].price.unit_amount, 999);
        assert!(subscription.is_collecting());
    }

    #[tokio::test]
    async fn test_update_pricing_carries_existing_recurrence() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/subscriptions/sub_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "sub_1",
                "status": "active",
                "items": {"data": [{
                    "id": "si_1",
                    "price": {
                        "id": "price_1",
                        "nickname": "Gold",
                        "currency": "usd",
                        "product": "prod_1",
                        "unit_amount": 999,
                        "recurring": {"interval": "month", "interval_count": 1}
                    }
                }]}
            })))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/v1/subscriptions/sub_1"))
            .and(body_string_contains("items%5B0%5D%5Bid%5D=si_1"))
            .and(body_string_contains("unit_amount=1299"))
            .and(body_string_contains("recurring%5D%5Binterval%5D=month"))
            .respond_with(ResponseTemplate::new(200)
                .set_body_json(json!({"id": "sub_1", "status": "active"})))
            .expect(1)
            .mount(&server)
            .await;

        let (client, _surface, _opener) = test_client(&server);
        let id = client
            .update_subscription_pricing("sub_1", "12.99")
            .await
            .unwrap();
        assert_eq!(id, "sub_1");
    }
}
