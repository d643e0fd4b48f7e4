use crate::shared::components::data_table::DataTable;
use contracts::shared::data_table::{
    load_config, ColumnDecl, FilterKind, Row, TableConfig, ValueKind, WrapPolicy,
};
use leptos::prelude::*;

/// Page size and layout overrides for the demo table
const APP_CONFIG: &str = r#"
default_page_size = 10
page_size_options = [5, 10, 25]
sticky_fallback_width = 150.0
popover_gap = 4.0
"#;

fn user_columns() -> Vec<ColumnDecl> {
    vec![
        ColumnDecl::new("id", "ID").width_px(60.0).sticky(),
        ColumnDecl::new("name", "Имя")
            .width_px(180.0)
            .wrap(WrapPolicy::NoWrap)
            .sticky()
            .filterable(),
        ColumnDecl::new("email", "Email").filterable(),
        ColumnDecl::new("role", "Роль").filter_type(FilterKind::Dropdown),
        ColumnDecl::new("age", "Возраст")
            .kind(ValueKind::Integer)
            .width_px(90.0)
            .filterable(),
        ColumnDecl::new("joined", "Дата регистрации")
            .kind(ValueKind::Date)
            .filterable(),
        ColumnDecl::new("status", "Статус").kind(ValueKind::Markup),
        ColumnDecl::new("notes", "Заметки")
            .width_percent(30.0)
            .wrap(WrapPolicy::BreakWord),
    ]
}

fn user_rows() -> Vec<Row> {
    const NAMES: [&str; 8] = [
        "Анна Иванова",
        "Борис Петров",
        "Clara Schmidt",
        "Дмитрий Соколов",
        "Elena Popova",
        "Фёдор Кузнецов",
        "Galina Orlova",
        "Игорь Волков",
    ];
    const ROLES: [&str; 3] = ["Admin", "User", "Guest"];

    (0..42usize)
        .map(|i| {
            let name = NAMES[i % NAMES.len()];
            let active = i % 3 != 0;
            let mut row = Row::new()
                .with("id", i + 1)
                .with("name", name)
                .with("email", format!("user{}@example.com", i + 1))
                .with("role", ROLES[i % ROLES.len()])
                .with("joined", format!("202{}-{:02}-{:02}", i % 5, i % 12 + 1, i % 28 + 1))
                .with(
                    "status",
                    if active {
                        r#"<span class="status status--active">активен</span>"#
                    } else {
                        r#"<span class="status">заблокирован</span>"#
                    },
                );
            // a few rows without age to show empty values
            if i % 7 != 0 {
                row = row.with("age", 18 + (i * 13) % 50);
            }
            if i % 4 == 0 {
                row = row.with("notes", "Длинная заметка, которая переносится внутри ячейки");
            }
            row
        })
        .collect()
}

#[component]
pub fn App() -> impl IntoView {
    let config = match load_config(Some(APP_CONFIG)) {
        Ok(config) => config,
        Err(e) => {
            log::error!("table config rejected, using defaults: {:#}", e);
            TableConfig::default()
        }
    };
    let rows = RwSignal::new(user_rows());

    view! {
        <div class="page">
            <div class="page__header">
                <h1 class="page__title">"Пользователи"</h1>
            </div>
            <div class="page__content">
                <DataTable
                    columns=user_columns()
                    rows=rows
                    default_hidden=vec!["notes".to_string()]
                    config=config
                    table_id="users-table"
                />
            </div>
        </div>
    }
}
