use leptos::prelude::*;

/// Чекбокс строки таблицы
///
/// Рендерит `<td>` с чекбоксом. Клик не всплывает до строки, поэтому
/// флажок и клик по строке выделяют независимо.
#[component]
pub fn TableCheckbox(
    /// Сигнал состояния чекбокса
    checked: Signal<bool>,
    /// Вызывается при клике по флажку
    on_toggle: Callback<()>,
) -> impl IntoView {
    view! {
        <td
            class="table__cell table__cell--checkbox"
            on:click=|e| e.stop_propagation()
        >
            <input
                type="checkbox"
                class="table__checkbox"
                prop:checked=checked
                on:change=move |_| on_toggle.run(())
            />
        </td>
    }
}
