use super::error::FetchError;
use leptos::html;
use leptos::prelude::*;
use thaw::*;

/// Маркер конца списка и строка состояния под ним
/// (загрузка / ошибка с повтором / всё загружено).
#[component]
pub fn InfiniteScrollSentinel(
    /// NodeRef из `use_viewport_trigger`
    sentinel: NodeRef<html::Div>,
    #[prop(into)] is_loading: Signal<bool>,
    #[prop(into)] has_more: Signal<bool>,
    #[prop(into)] error: Signal<Option<FetchError>>,
    on_retry: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="infinite-list__footer">
            <div class="infinite-list__sentinel" node_ref=sentinel style="height: 1px;"></div>
            {move || match error.get() {
                Some(err) => view! {
                    <div class="infinite-list__status infinite-list__status--error">
                        <span>{format!("Ошибка загрузки: {}", err)}</span>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| on_retry.run(())
                        >
                            "Повторить"
                        </Button>
                    </div>
                }.into_any(),
                None if is_loading.get() => view! {
                    <div class="infinite-list__status">"Загрузка..."</div>
                }.into_any(),
                None if !has_more.get() => view! {
                    <div class="infinite-list__status">"Все записи загружены"</div>
                }.into_any(),
                None => view! { <></> }.into_any(),
            }}
        </div>
    }
}
