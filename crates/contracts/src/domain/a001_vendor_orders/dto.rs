use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Статус заказа вендора
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VendorOrderStatus {
    New,
    Confirmed,
    Completed,
    Cancelled,
}

impl VendorOrderStatus {
    pub fn label(&self) -> &'static str {
        match self {
            VendorOrderStatus::New => "Новый",
            VendorOrderStatus::Confirmed => "Подтверждён",
            VendorOrderStatus::Completed => "Выполнен",
            VendorOrderStatus::Cancelled => "Отменён",
        }
    }
}

/// Строка списка заказов
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorOrderListItem {
    pub id: Uuid,
    /// Номер документа (`ORD-000123`)
    pub document_no: String,
    pub order_date: NaiveDate,
    pub patient_name: String,
    pub service_name: String,
    pub amount: f64,
    pub status: VendorOrderStatus,
}
