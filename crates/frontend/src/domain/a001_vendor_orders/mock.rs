//! Локальный набор заказов для работы дашборда без сервера.

use crate::shared::infinite_list::FetchError;
use chrono::{Days, NaiveDate};
use contracts::domain::a001_vendor_orders::dto::{VendorOrderListItem, VendorOrderStatus};
use contracts::shared::paging::{PageQuery, PageResponse};
use uuid::Uuid;

const PATIENTS: &[&str] = &[
    "Анна Смирнова",
    "Игорь Кузнецов",
    "Мария Попова",
    "Олег Васильев",
    "Елена Морозова",
    "Дмитрий Волков",
];

const SERVICES: &[(&str, f64)] = &[
    ("Первичная консультация", 2500.0),
    ("Повторный приём", 1800.0),
    ("УЗИ брюшной полости", 3200.0),
    ("Общий анализ крови", 650.0),
    ("Массаж спины", 2100.0),
];

const STATUSES: &[VendorOrderStatus] = &[
    VendorOrderStatus::New,
    VendorOrderStatus::Confirmed,
    VendorOrderStatus::Completed,
    VendorOrderStatus::Completed,
    VendorOrderStatus::Cancelled,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockOrderSource {
    total: u32,
    latency_ms: u32,
}

impl MockOrderSource {
    pub fn new(total: u32) -> Self {
        Self {
            total,
            latency_ms: 0,
        }
    }

    pub fn with_latency(mut self, latency_ms: u32) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    /// Страница за пределами набора возвращается пустой
    pub fn page(&self, query: PageQuery) -> PageResponse<VendorOrderListItem> {
        let start = query.offset().min(u64::from(self.total)) as u32;
        let end = start.saturating_add(query.page_size).min(self.total);
        PageResponse::new(query.page, (start..end).map(order_at).collect())
    }

    pub async fn fetch_page(
        self,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<VendorOrderListItem>, FetchError> {
        if self.latency_ms > 0 {
            gloo_timers::future::TimeoutFuture::new(self.latency_ms).await;
        }
        Ok(self.page(PageQuery::new(page, page_size)).items)
    }
}

fn order_at(index: u32) -> VendorOrderListItem {
    let i = index as usize;
    let (service_name, price) = SERVICES[i % SERVICES.len()];
    let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();
    let order_date = base
        .checked_add_days(Days::new(u64::from(index / 3)))
        .unwrap_or(base);

    VendorOrderListItem {
        id: Uuid::from_u128(u128::from(index) + 1),
        document_no: format!("ORD-{:06}", index + 1),
        order_date,
        patient_name: PATIENTS[i % PATIENTS.len()].to_string(),
        service_name: service_name.to_string(),
        amount: price * f64::from(1 + index % 3),
        status: STATUSES[i % STATUSES.len()],
    }
}
