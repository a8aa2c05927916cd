//! Payment provider customers and subscription plans

use super::service::{internal, Service};
use crate::contract::{CustomerLink, MarketplaceError, Session, SubscriptionPlan};

impl Service {
    /// Link the caller to a payment provider customer, creating one if needed
    pub async fn create_customer(&self, session: &Session) -> Result<CustomerLink, MarketplaceError> {
        let user = self.current_user(session).await?;

        if let Some(customer_id) = user.stripe_customer_id {
            return Ok(CustomerLink {
                customer_id,
                created: false,
            });
        }

        let customer_id = self
            .payments
            .create_customer(&user.email, user.name.as_deref(), user.id)
            .await
            .map_err(internal("stripe"))?;

        self.repos
            .users
            .set_stripe_customer_id(user.id, &customer_id)
            .await
            .map_err(internal("stripe"))?;

        tracing::info!(user_id = %user.id, customer_id = %customer_id, "Payment customer created");
        Ok(CustomerLink {
            customer_id,
            created: true,
        })
    }

    /// Active plans, cheapest first
    pub async fn list_subscription_plans(&self) -> Result<Vec<SubscriptionPlan>, MarketplaceError> {
        let mut plans = self
            .repos
            .plans
            .list_active()
            .await
            .map_err(internal("subscription"))?;
        plans.retain(|p| p.is_active);
        plans.sort_by(|a, b| a.price_cents.cmp(&b.price_cents).then_with(|| a.name.cmp(&b.name)));
        Ok(plans)
    }
}
