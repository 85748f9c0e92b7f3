use crate::shared::infinite_list::FetchError;
use contracts::domain::a001_vendor_orders::dto::VendorOrderListItem;
use contracts::shared::paging::{PageQuery, PageResponse};
use gloo_net::http::Request;

const API_BASE: &str = "/api/a001/vendor-orders";

pub fn list_url(page: u32, page_size: u32) -> Result<String, FetchError> {
    let query = serde_qs::to_string(&PageQuery::new(page, page_size))
        .map_err(|e| FetchError::Request(e.to_string()))?;
    Ok(format!("{}/list?{}", API_BASE, query))
}

/// Получить страницу заказов (страницы с 1, пустая страница = конец списка)
pub async fn fetch_orders_page(
    page: u32,
    page_size: u32,
) -> Result<Vec<VendorOrderListItem>, FetchError> {
    let url = list_url(page, page_size)?;

    let response = Request::get(&url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(FetchError::Http {
            status: response.status(),
        });
    }

    let data: PageResponse<VendorOrderListItem> = response
        .json()
        .await
        .map_err(|e| FetchError::Decode(e.to_string()))?;

    Ok(data.items)
}
