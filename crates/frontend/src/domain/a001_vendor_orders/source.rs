use super::api;
use super::mock::MockOrderSource;
use crate::shared::config::DashboardConfig;
use crate::shared::infinite_list::FetchError;
use contracts::domain::a001_vendor_orders::dto::VendorOrderListItem;

/// Откуда список заказов берёт страницы
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrdersSource {
    Api,
    Mock(MockOrderSource),
}

impl OrdersSource {
    pub fn from_config(config: &DashboardConfig) -> Self {
        if config.use_mock_data {
            OrdersSource::Mock(
                MockOrderSource::new(config.mock_total_orders)
                    .with_latency(config.mock_latency_ms),
            )
        } else {
            OrdersSource::Api
        }
    }

    pub async fn fetch_page(
        self,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<VendorOrderListItem>, FetchError> {
        match self {
            OrdersSource::Api => api::fetch_orders_page(page, page_size).await,
            OrdersSource::Mock(mock) => mock.fetch_page(page, page_size).await,
        }
    }
}
