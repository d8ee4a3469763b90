use leptos::prelude::*;

/// Visual tone of a KPI tile.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum KpiTone {
    #[default]
    Neutral,
    Up,
    Down,
}

/// A single KPI tile with a fixed label and a preformatted value.
///
/// The caller formats the value; a missing upstream field must be turned
/// into a placeholder ("0", "-", "0.00%") before it gets here, so the tile
/// never shows "undefined"-style text.
#[component]
pub fn KpiCard(
    /// Label displayed above the value
    label: &'static str,
    /// Preformatted value text
    #[prop(into)]
    value: Signal<String>,
    /// Visual tone
    #[prop(into, optional)]
    tone: Signal<KpiTone>,
) -> impl IntoView {
    let tone_class = move || match tone.get() {
        KpiTone::Up => "kpi-card kpi-card--up",
        KpiTone::Down => "kpi-card kpi-card--down",
        KpiTone::Neutral => "kpi-card",
    };

    view! {
        <div class=tone_class>
            <div class="kpi-card__label">{label}</div>
            <div class="kpi-card__value">{value}</div>
        </div>
    }
}
