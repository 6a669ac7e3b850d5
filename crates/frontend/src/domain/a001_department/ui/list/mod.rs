use crate::shared::components::table_checkbox::TableCheckbox;
use crate::shared::http_client::CrudApi;
use crate::shared::row_selection::RowSelection;
use contracts::domain::a001_department::aggregate::{DepartmentCreateDto, DepartmentDto};
use contracts::domain::common::AggregateId;
use contracts::shared::paging::FilterRequest;
use leptos::ev::MouseEvent;
use leptos::prelude::*;
use uuid::Uuid;

const DEPARTMENTS: CrudApi = CrudApi::new("Departments");

#[derive(Clone, Debug, PartialEq)]
pub struct DepartmentRow {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub modified_at: String,
}

impl From<DepartmentDto> for DepartmentRow {
    fn from(d: DepartmentDto) -> Self {
        Self {
            id: d.department_id.value(),
            code: d.department_code,
            name: d.department_name,
            modified_at: d
                .metadata
                .modified_date
                .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

#[component]
#[allow(non_snake_case)]
pub fn DepartmentList() -> impl IntoView {
    let (items, set_items) = signal::<Vec<DepartmentRow>>(Vec::new());
    let (total, set_total) = signal(0i64);
    let (search, set_search) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (new_code, set_new_code) = signal(String::new());
    let (new_name, set_new_name) = signal(String::new());
    let selection = RwSignal::new(RowSelection::<Uuid>::new());

    let fetch = move || {
        let request = FilterRequest {
            search: Some(search.get_untracked()),
            ..FilterRequest::default()
        };
        wasm_bindgen_futures::spawn_local(async move {
            match DEPARTMENTS.filter::<DepartmentDto>(&request).await {
                Ok(page) => {
                    let rows: Vec<DepartmentRow> = page.data.into_iter().map(Into::into).collect();
                    let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
                    selection.update(|s| s.retain_existing(&ids));
                    set_items.set(rows);
                    set_total.set(page.total_record);
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
        });
    };

    let prepare_new = move || {
        wasm_bindgen_futures::spawn_local(async move {
            match DEPARTMENTS.get_new_code().await {
                Ok(code) => set_new_code.set(code),
                Err(e) => set_error.set(Some(e.to_string())),
            }
        });
    };

    let create = move || {
        let dto = DepartmentCreateDto {
            department_code: new_code.get_untracked(),
            department_name: new_name.get_untracked(),
        };
        wasm_bindgen_futures::spawn_local(async move {
            match DEPARTMENTS.insert(&dto).await {
                Ok(id) => {
                    log::info!("department {} created", id);
                    set_new_name.set(String::new());
                    fetch();
                    prepare_new();
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
        });
    };

    let delete_selected = move || {
        let ids = selection.with_untracked(|s| s.selected_rows().to_vec());
        if ids.is_empty() {
            return;
        }
        let confirmed = web_sys::window()
            .and_then(|win| {
                win.confirm_with_message(&format!(
                    "Удалить выбранные подразделения? Количество: {}",
                    ids.len()
                ))
                .ok()
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }

        wasm_bindgen_futures::spawn_local(async move {
            match DEPARTMENTS.delete_many(&ids).await {
                Ok(()) => {
                    selection.update(|s| s.clear());
                    fetch();
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
        });
    };

    let row_ids = move || items.with(|rows| rows.iter().map(|r| r.id).collect::<Vec<Uuid>>());

    let on_row_click = move |id: Uuid, ev: MouseEvent| {
        let rows = row_ids();
        selection.update(|s| {
            if ev.ctrl_key() || ev.meta_key() {
                s.ctrl_click(&rows, &id);
            } else {
                s.click(&rows, &id);
            }
        });
    };

    let on_checkbox = move |id: Uuid| {
        let rows = row_ids();
        selection.update(|s| s.checkbox_click(&rows, &id));
    };

    fetch();
    prepare_new();

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{"Подразделения"}</h1>
                    <span class="header__badge">{move || total.get()}</span>
                </div>
                <div class="header__actions">
                    <input
                        class="form__input"
                        placeholder="Поиск по коду или наименованию"
                        prop:value=search
                        on:input=move |ev| set_search.set(event_target_value(&ev))
                        on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                            if ev.key() == "Enter" {
                                fetch();
                            }
                        }
                    />
                    <button class="button button--secondary" on:click=move |_| fetch()>
                        {"Обновить"}
                    </button>
                    <button
                        class="button button--secondary"
                        on:click=move |_| delete_selected()
                        disabled=move || selection.with(|s| s.selected_rows().is_empty())
                    >
                        {move || format!("Удалить ({})", selection.with(|s| s.selected_rows().len()))}
                    </button>
                </div>
            </div>

            <div class="form form--inline">
                <input class="form__input" prop:value=new_code on:input=move |ev| set_new_code.set(event_target_value(&ev)) />
                <input
                    class="form__input"
                    placeholder="Наименование"
                    prop:value=new_name
                    on:input=move |ev| set_new_name.set(event_target_value(&ev))
                />
                <button class="button button--primary" on:click=move |_| create()>
                    {"Добавить"}
                </button>
            </div>

            {move || error.get().map(|e| view! {
                <div class="warning-box">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <div class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell table__header-cell--checkbox"></th>
                            <th class="table__header-cell">{"Код"}</th>
                            <th class="table__header-cell">{"Наименование"}</th>
                            <th class="table__header-cell">{"Изменено"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || items.get().into_iter().map(|row| {
                            let id = row.id;
                            view! {
                                <tr
                                    class="table__row"
                                    class:table__row--selected=move || selection.with(|s| s.is_selected(&id))
                                    on:click=move |ev| on_row_click(id, ev)
                                >
                                    <TableCheckbox
                                        checked=Signal::derive(move || selection.with(|s| s.is_checked(&id)))
                                        on_toggle=Callback::new(move |_| on_checkbox(id))
                                    />
                                    <td class="table__cell">{row.code}</td>
                                    <td class="table__cell">{row.name}</td>
                                    <td class="table__cell">{row.modified_at}</td>
                                </tr>
                            }
                        }).collect_view()}
                    </tbody>
                </table>
            </div>
        </div>
    }
}
