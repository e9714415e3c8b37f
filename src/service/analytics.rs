//! Admin dashboard analytics

use crate::domain::AdminStats;
use crate::error::Result;
use crate::repository::{MenuRepository, PaymentRepository, UserRepository};
use std::sync::Arc;

pub struct AnalyticsService<U, M, P>
where
    U: UserRepository,
    M: MenuRepository,
    P: PaymentRepository,
{
    users: Arc<U>,
    menu: Arc<M>,
    payments: Arc<P>,
}

impl<U, M, P> AnalyticsService<U, M, P>
where
    U: UserRepository,
    M: MenuRepository,
    P: PaymentRepository,
{
    pub fn new(users: Arc<U>, menu: Arc<M>, payments: Arc<P>) -> Self {
        Self {
            users,
            menu,
            payments,
        }
    }

    /// Counts use the store's estimated counters; revenue is aggregated
    /// server-side over the full ledger.
    pub async fn snapshot(&self) -> Result<AdminStats> {
        let users = self.users.estimated_count().await?;
        let menu_items = self.menu.estimated_count().await?;
        let orders = self.payments.estimated_count().await?;
        let total_revenue = self.payments.total_revenue().await?;

        Ok(AdminStats {
            users,
            menu_items,
            orders,
            total_revenue,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MockMenuRepository, MockPaymentRepository, MockUserRepository};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_snapshot_combines_counters_and_revenue() {
        let mut users = MockUserRepository::new();
        let mut menu = MockMenuRepository::new();
        let mut payments = MockPaymentRepository::new();

        users.expect_estimated_count().returning(|| Ok(3));
        menu.expect_estimated_count().returning(|| Ok(12));
        payments.expect_estimated_count().returning(|| Ok(5));
        payments.expect_total_revenue().returning(|| Ok(60.5));

        let service = AnalyticsService::new(Arc::new(users), Arc::new(menu), Arc::new(payments));
        let stats = service.snapshot().await.unwrap();
        assert_eq!(
            stats,
            AdminStats {
                users: 3,
                menu_items: 12,
                orders: 5,
                total_revenue: 60.5,
            }
        );
    }

    #[tokio::test]
    async fn test_snapshot_empty_store() {
        let mut users = MockUserRepository::new();
        let mut menu = MockMenuRepository::new();
        let mut payments = MockPaymentRepository::new();

        users.expect_estimated_count().returning(|| Ok(0));
        menu.expect_estimated_count().returning(|| Ok(0));
        payments.expect_estimated_count().returning(|| Ok(0));
        payments.expect_total_revenue().returning(|| Ok(0.0));

        let service = AnalyticsService::new(Arc::new(users), Arc::new(menu), Arc::new(payments));
        let stats = service.snapshot().await.unwrap();
        assert_eq!(stats.total_revenue, 0.0);
        assert_eq!(stats.orders, 0);
    }
}
