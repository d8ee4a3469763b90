use chrono::NaiveDate;
use contracts::filter::{apply_filters, filter_options, FilterSelection};
use contracts::payload::{AggregateRow, Dashboard};
use contracts::summary::{summarize, totals_by};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::dashboards::sales::api;
use crate::shared::components::bar_chart::BarChart;
use crate::shared::components::data_table::DataTable;
use crate::shared::components::date_input::DateInput;
use crate::shared::components::stat_card::{KpiCard, KpiTone};
use crate::shared::format::{format_int, format_money, format_pct};
use crate::shared::search::row_matches;
use crate::system::auth::context::{sign_out, use_auth};

/// Sales analytics dashboard.
///
/// One payload load per session; after that every change to the filter
/// selection recomputes the filtered view from the authoritative raw list
/// and re-renders the raw table, the view totals, and both charts. The
/// pre-aggregated tables and KPI tiles are load-time data and stay put.
#[component]
pub fn SalesDashboard() -> impl IntoView {
    let (auth_state, set_auth_state) = use_auth();

    // Load state
    let (data, set_data) = signal(None::<Dashboard>);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);

    // Draft selector values (as the inputs hold them)
    let (channel_draft, set_channel_draft) = signal(String::new());
    let (part_draft, set_part_draft) = signal(String::new());
    let (date_from_draft, set_date_from_draft) = signal(String::new());
    let (date_to_draft, set_date_to_draft) = signal(String::new());

    // Applied filter selection and the free-text row search
    let (selection, set_selection) = signal(FilterSelection::default());
    let (search, set_search) = signal(String::new());

    // Load the payload exactly once per session. The effect bails out until
    // a token exists, so nothing is fetched while the login page is up or
    // after a failed login.
    let load_started = StoredValue::new(false);
    Effect::new(move |_| {
        let Some(token) = auth_state.get().access_token else {
            return;
        };
        if load_started.get_value() {
            return;
        }
        load_started.set_value(true);
        set_loading.set(true);

        spawn_local(async move {
            match api::fetch_latest_payload(&token).await {
                Ok(dashboard) => {
                    set_data.set(Some(dashboard));
                    set_error.set(None);
                }
                Err(e) => {
                    log::error!("Failed to load dashboard payload: {}", e);
                    set_error.set(Some(e));
                }
            }
            set_loading.set(false);
        });
    });

    // Selector options come from the raw list, once per load
    let options = Memo::new(move |_| {
        data.with(|d| {
            d.as_ref()
                .map(|d| filter_options(&d.raw_data))
                .unwrap_or_default()
        })
    });

    // Filtered view: always recomputed from the full raw list
    let filtered = Memo::new(move |_| {
        data.with(|d| {
            d.as_ref()
                .map(|d| apply_filters(&d.raw_data, &selection.get()))
                .unwrap_or_default()
        })
    });

    // Raw table rows, with the text search applied on top
    let visible_rows = Memo::new(move |_| {
        let query = search.get();
        filtered
            .get()
            .iter()
            .map(|record| record.to_row())
            .filter(|row| row_matches(row, &query))
            .collect::<Vec<AggregateRow>>()
    });

    let view_totals = Memo::new(move |_| summarize(&filtered.get()));
    let category_series = Memo::new(move |_| totals_by(&filtered.get(), |r| &r.category));
    let channel_series = Memo::new(move |_| totals_by(&filtered.get(), |r| &r.channel));

    let category_rows =
        Memo::new(move |_| data.with(|d| d.as_ref().map(|d| d.category_table.clone())).unwrap_or_default());
    let channel_rows =
        Memo::new(move |_| data.with(|d| d.as_ref().map(|d| d.channel_table.clone())).unwrap_or_default());
    let exec_rows =
        Memo::new(move |_| data.with(|d| d.as_ref().map(|d| d.exec_table.clone())).unwrap_or_default());

    // Build a selection from the drafts and apply it
    let apply_now = move || {
        set_selection.set(FilterSelection {
            channel: none_if_empty(channel_draft.get_untracked()),
            part_number: none_if_empty(part_draft.get_untracked()),
            date_from: parse_date(&date_from_draft.get_untracked()),
            date_to: parse_date(&date_to_draft.get_untracked()),
        });
    };

    let reset_filters = move |_| {
        set_channel_draft.set(String::new());
        set_part_draft.set(String::new());
        set_date_from_draft.set(String::new());
        set_date_to_draft.set(String::new());
        set_search.set(String::new());
        set_selection.set(FilterSelection::default());
    };

    let on_logout = move |_| {
        let token = auth_state.get_untracked().access_token;
        sign_out(set_auth_state, token);
    };

    let user_email = move || {
        auth_state
            .get()
            .user_info
            .map(|u| u.email)
            .unwrap_or_default()
    };

    view! {
        <div class="dashboard">
            <header class="dashboard__header">
                <h1>"Sales Pulse"</h1>
                <div class="dashboard__header-right">
                    <span class="dashboard__user">{user_email}</span>
                    <button class="btn-secondary" on:click=on_logout>"Sign out"</button>
                </div>
            </header>

            {move || {
                if loading.get() {
                    view! { <div class="dashboard__loading">"Loading dashboard..."</div> }
                        .into_any()
                } else if let Some(err) = error.get() {
                    view! {
                        <div class="dashboard__error">
                            <strong>"Failed to load data"</strong>
                            <span>{err}</span>
                        </div>
                    }
                    .into_any()
                } else if let Some(dashboard) = data.get() {
                    let kpi = dashboard.kpi;
                    let total_sales = kpi
                        .total_sales
                        .map(format_money)
                        .unwrap_or_else(|| "0".to_string());
                    let total_qty = kpi
                        .total_qty
                        .map(format_int)
                        .unwrap_or_else(|| "0".to_string());
                    let mtd_sales = kpi
                        .mtd_sales
                        .map(format_money)
                        .unwrap_or_else(|| "0".to_string());
                    let growth = kpi
                        .growth_pct
                        .map(format_pct)
                        .unwrap_or_else(|| "0%".to_string());
                    let growth_tone = match kpi.growth_pct {
                        Some(pct) if pct > 0.0 => KpiTone::Up,
                        Some(pct) if pct < 0.0 => KpiTone::Down,
                        _ => KpiTone::Neutral,
                    };
                    let top_category = kpi.top_category.unwrap_or_else(|| "-".to_string());
                    let best_channel = kpi.best_channel.unwrap_or_else(|| "-".to_string());

                    view! {
                        <section class="kpi-grid">
                            <KpiCard label="Total Sales" value=total_sales />
                            <KpiCard label="Total Qty" value=total_qty />
                            <KpiCard label="MTD Sales" value=mtd_sales />
                            <KpiCard label="Growth" value=growth tone=growth_tone />
                            <KpiCard label="Top Category" value=top_category />
                            <KpiCard label="Best Channel" value=best_channel />
                        </section>

                        <section class="filter-bar">
                            <label>
                                "Channel"
                                <select
                                    prop:value=channel_draft
                                    on:change=move |ev| {
                                        set_channel_draft.set(event_target_value(&ev));
                                        apply_now();
                                    }
                                >
                                    <option value="">"All Channels"</option>
                                    {move || options.get().channels.into_iter().map(|channel| {
                                        let value = channel.clone();
                                        view! { <option value=value>{channel}</option> }
                                    }).collect_view()}
                                </select>
                            </label>

                            <label>
                                "Part Number"
                                <select
                                    prop:value=part_draft
                                    on:change=move |ev| {
                                        set_part_draft.set(event_target_value(&ev));
                                        apply_now();
                                    }
                                >
                                    <option value="">"All Parts"</option>
                                    {move || options.get().parts.into_iter().map(|part| {
                                        let value = part.clone();
                                        view! { <option value=value>{part}</option> }
                                    }).collect_view()}
                                </select>
                            </label>

                            <label>
                                "From"
                                <DateInput
                                    value=date_from_draft
                                    on_change=move |val| {
                                        set_date_from_draft.set(val);
                                        apply_now();
                                    }
                                />
                            </label>

                            <label>
                                "To"
                                <DateInput
                                    value=date_to_draft
                                    on_change=move |val| {
                                        set_date_to_draft.set(val);
                                        apply_now();
                                    }
                                />
                            </label>

                            <button class="btn-primary" on:click=move |_| apply_now()>
                                "Apply"
                            </button>
                            <button class="btn-secondary" on:click=reset_filters>
                                "Reset"
                            </button>

                            {move || {
                                let count = selection.get().active_count();
                                if count > 0 {
                                    view! { <span class="badge badge--primary">{count}</span> }
                                        .into_any()
                                } else {
                                    view! { <></> }.into_any()
                                }
                            }}
                        </section>

                        <section class="chart-grid">
                            <BarChart title="Sales by Category" series=category_series />
                            <BarChart title="Sales by Channel" series=channel_series />
                        </section>

                        <section class="table-section">
                            <div class="table-section__header">
                                <h2>"Raw Transactions"</h2>
                                <span class="table-section__totals">
                                    {move || {
                                        let totals = view_totals.get();
                                        format!(
                                            "{} rows | Qty {} | Amount {}",
                                            filtered.get().len(),
                                            format_int(totals.total_qty),
                                            format_money(totals.total_amount),
                                        )
                                    }}
                                </span>
                                <input
                                    type="text"
                                    class="table-section__search"
                                    placeholder="Search rows..."
                                    prop:value=search
                                    on:input=move |ev| set_search.set(event_target_value(&ev))
                                />
                            </div>
                            <DataTable rows=visible_rows empty_text="No matching transactions" />
                        </section>

                        <section class="table-section">
                            <h2>"Category Performance"</h2>
                            <DataTable rows=category_rows />
                        </section>

                        <section class="table-section">
                            <h2>"Channel Performance"</h2>
                            <DataTable rows=channel_rows />
                        </section>

                        <section class="table-section">
                            <h2>"Executive Performance"</h2>
                            <DataTable rows=exec_rows />
                        </section>
                    }
                    .into_any()
                } else {
                    // Pre-load: nothing mounted yet
                    view! { <></> }.into_any()
                }
            }}
        </div>
    }
}

fn none_if_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}
