use crate::domain::a001_vendor_orders::source::OrdersSource;
use crate::domain::a001_vendor_orders::ui::list::VendorOrdersList;
use crate::shared::config::DashboardConfig;
use leptos::prelude::*;
use thaw::ConfigProvider;

#[component]
pub fn App() -> impl IntoView {
    let config = DashboardConfig::load();
    log::info!(
        "dashboard started (mock data: {}, page size: {})",
        config.use_mock_data,
        config.infinite_list.page_size
    );

    let source = OrdersSource::from_config(&config);

    view! {
        <ConfigProvider>
            <VendorOrdersList source=source config=config.infinite_list />
        </ConfigProvider>
    }
}
