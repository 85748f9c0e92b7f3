use crate::domain::a001_vendor_orders::source::OrdersSource;
use crate::shared::infinite_list::{
    use_incremental_list, use_viewport_trigger, InfiniteListConfig, InfiniteScrollSentinel,
};
use contracts::domain::a001_vendor_orders::dto::{VendorOrderListItem, VendorOrderStatus};
use leptos::html;
use leptos::prelude::*;
use thaw::*;

#[component]
fn VendorOrdersHeader(
    #[prop(into)] loaded_count: Signal<usize>,
    #[prop(into)] is_loading: Signal<bool>,
    on_refresh: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="page__header">
            <div class="page__header-left">
                <h1 class="page__title">"Заказы"</h1>
                <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>
                    <span>{move || loaded_count.get().to_string()}</span>
                </Badge>
            </div>

            <div class="page__header-right">
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| on_refresh.run(())
                    disabled=is_loading
                >
                    {move || if is_loading.get() { "Загрузка..." } else { "Обновить" }}
                </Button>
            </div>
        </div>
    }
}

fn status_class(status: VendorOrderStatus) -> &'static str {
    match status {
        VendorOrderStatus::New => "status status--new",
        VendorOrderStatus::Confirmed => "status status--confirmed",
        VendorOrderStatus::Completed => "status status--completed",
        VendorOrderStatus::Cancelled => "status status--cancelled",
    }
}

#[component]
fn VendorOrderRow(row: VendorOrderListItem) -> impl IntoView {
    view! {
        <tr>
            <td>{row.document_no}</td>
            <td>{row.order_date.format("%d.%m.%Y").to_string()}</td>
            <td>{row.patient_name}</td>
            <td>{row.service_name}</td>
            <td class="text-right">{format!("{:.2}", row.amount)}</td>
            <td><span class={status_class(row.status)}>{row.status.label()}</span></td>
        </tr>
    }
}

/// Список заказов вендора с подгрузкой страниц при прокрутке
#[component]
pub fn VendorOrdersList(
    source: OrdersSource,
    #[prop(optional)] config: InfiniteListConfig,
) -> impl IntoView {
    let page_size = config.page_size;
    let list = use_incremental_list(move |page| source.fetch_page(page, page_size));

    let scroll_container = NodeRef::<html::Div>::new();
    let sentinel = use_viewport_trigger(
        move || list.request_next_page(),
        list.trigger_enabled(),
        config.lookahead_px,
        Some(scroll_container),
    );

    let items = list.items();

    view! {
        <div class="page">
            <VendorOrdersHeader
                loaded_count=list.len()
                is_loading=list.is_loading()
                on_refresh=Callback::new(move |_| list.reset())
            />

            <div class="page__content" node_ref=scroll_container style="overflow-y: auto; max-height: calc(100vh - 120px);">
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"Номер"</th>
                            <th>"Дата"</th>
                            <th>"Пациент"</th>
                            <th>"Услуга"</th>
                            <th class="text-right">"Сумма"</th>
                            <th>"Статус"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || items.get()
                            key=|row| row.id
                            children=|row| view! { <VendorOrderRow row=row /> }
                        />
                    </tbody>
                </table>

                <InfiniteScrollSentinel
                    sentinel=sentinel
                    is_loading=list.is_loading()
                    has_more=list.has_more()
                    error=list.error()
                    on_retry=Callback::new(move |_| list.retry())
                />
            </div>
        </div>
    }
}
