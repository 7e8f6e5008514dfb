//! Simulated order submission

use super::models::Order;
use std::time::Duration;
use tracing::info;

/// Stand-in for the order API: logs the order and waits a fixed delay.
///
/// Submission always succeeds.
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter {
    delay: Duration,
}

impl SimulatedSubmitter {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub async fn submit(&self, order: &Order) {
        info!(
            product_ids = %order.product_ids,
            quantities = %order.product_quantities,
            courier = ?order.courier,
            cod_amount = %order.cod_amount,
            delivery_charge = %order.delivery_charge,
            "submitting order"
        );

        tokio::time::sleep(self.delay).await;

        info!(product_ids = %order.product_ids, "order accepted");
    }
}
