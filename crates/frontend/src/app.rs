use crate::domain::a001_department::ui::list::DepartmentList;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <main class="app">
            <DepartmentList />
        </main>
    }
}
