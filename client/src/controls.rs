use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use crate::app::{CurrentPayload, HoveredArea, PanelOpen, SelectedArea};
use crate::cities;
use crate::detail;
use crate::map_view;
use crate::refresh::{self, RefreshContext};
use crate::scenario;
use crate::stats::StatsView;

fn event_input_value(e: &leptos::ev::Event) -> Option<String> {
    let target = e.target()?;
    let input = target.dyn_into::<web_sys::HtmlInputElement>().ok()?;
    Some(input.value())
}

fn event_select_value(e: &leptos::ev::Event) -> Option<String> {
    let target = e.target()?;
    let select = target.dyn_into::<web_sys::HtmlSelectElement>().ok()?;
    Some(select.value())
}

/// One scenario slider row. Input only updates the stored multiplier and its
/// label; the value is picked up by the next refresh.
#[component]
fn ScenarioSlider(
    label: &'static str,
    value: RwSignal<f64>,
    describe: fn(f64) -> &'static str,
) -> impl IntoView {
    let on_input = move |e: leptos::ev::Event| {
        let Some(raw) = event_input_value(&e) else {
            return;
        };
        if let Ok(parsed) = raw.trim().parse::<f64>() {
            value.set(parsed.clamp(scenario::SLIDER_MIN, scenario::SLIDER_MAX));
        }
    };

    view! {
        <div style="margin-bottom: 14px;">
            <div style="display: flex; justify-content: space-between; font-size: 0.82rem; margin-bottom: 4px;">
                <span style="color: #ccd2e3;">{label}</span>
                <span style="color: #8fa3c8; font-family: monospace;">
                    {move || {
                        let v = value.get();
                        scenario::slider_display(describe(v), v)
                    }}
                </span>
            </div>
            <input
                type="range"
                min=scenario::SLIDER_MIN
                max=scenario::SLIDER_MAX
                step=scenario::SLIDER_STEP
                value=move || format!("{:.1}", value.get())
                on:input=on_input
                style="width: 100%; margin: 0; accent-color: #3b82f6;"
            />
        </div>
    }
}

#[component]
fn CitySelect() -> impl IntoView {
    let ctx: RefreshContext = expect_context();

    // Fly first, fetch once the camera has landed. A stale in-flight response
    // for the old city loses to this fetch via the request sequence guard.
    let on_change = move |e: leptos::ev::Event| {
        let Some(name) = event_select_value(&e) else {
            return;
        };
        let Some(city) = cities::find_city(&name) else {
            return;
        };
        ctx.city.set(name);
        map_view::fly_to_city(city);
        spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(cities::CITY_FLY_SETTLE_MS).await;
            refresh::refresh_map(ctx);
        });
    };

    view! {
        <div style="margin-bottom: 14px;">
            <div style="font-size: 0.82rem; color: #ccd2e3; margin-bottom: 4px;">"City"</div>
            <select
                on:change=on_change
                style="width: 100%; background: #1a2233; border: 1px solid #2c3a55; border-radius: 4px; color: #e4e9f5; font-size: 0.85rem; padding: 6px 8px; outline: none;"
            >
                {cities::CITIES
                    .iter()
                    .map(|city| {
                        let name = city.name;
                        view! {
                            <option value=name selected=move || ctx.city.get() == name>
                                {name}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
    }
}

/// Scenario controls: sliders, night toggle, city picker, auto-update and the
/// manual refresh button. Collapsible; the open state persists across loads.
#[component]
pub fn ControlPanel() -> impl IntoView {
    let ctx: RefreshContext = expect_context();
    let PanelOpen(panel_open) = expect_context();

    let on_night = move |e: leptos::ev::Event| {
        let Some(target) = e.target() else {
            return;
        };
        let Ok(input) = target.dyn_into::<web_sys::HtmlInputElement>() else {
            return;
        };
        ctx.night.set(input.checked());
    };

    let on_auto_update = move |e: leptos::ev::Event| {
        let Some(target) = e.target() else {
            return;
        };
        let Ok(input) = target.dyn_into::<web_sys::HtmlInputElement>() else {
            return;
        };
        let enabled = input.checked();
        ctx.auto_update.set(enabled);
        if enabled {
            refresh::start_auto_refresh(ctx);
        } else {
            refresh::stop_auto_refresh();
        }
    };

    // Manual refresh is rate-limited by a short cooldown, independent of how
    // the fetch itself turns out.
    let refreshing: RwSignal<bool> = RwSignal::new(false);
    let on_refresh = move |_| {
        if refreshing.get_untracked() {
            return;
        }
        refreshing.set(true);
        refresh::refresh_map(ctx);
        spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(1_000).await;
            refreshing.set(false);
        });
    };

    let on_recenter = move |_| {
        let name = ctx.city.get_untracked();
        if let Some(city) = cities::find_city(&name) {
            map_view::fly_to_city(city);
        }
    };

    view! {
        <div style="position: absolute; top: 12px; left: 12px; z-index: 1000; width: 280px; background: rgba(16, 22, 36, 0.94); border: 1px solid #2c3a55; border-radius: 8px; color: #e4e9f5; box-shadow: 0 4px 18px rgba(0,0,0,0.45);">
            <div
                style="display: flex; justify-content: space-between; align-items: center; padding: 10px 14px; cursor: pointer;"
                on:click=move |_| panel_open.update(|open| *open = !*open)
            >
                <span style="font-weight: bold; font-size: 0.95rem;">"Flood Risk Scenario"</span>
                <span style="color: #8fa3c8;">
                    {move || if panel_open.get() { "\u{25be}" } else { "\u{25b8}" }}
                </span>
            </div>
            <div
                style="padding: 0 14px 12px;"
                style:display=move || if panel_open.get() { "block" } else { "none" }
            >
                <ScenarioSlider
                    label="Rainfall Intensity"
                    value=ctx.rainfall
                    describe=scenario::rainfall_label
                />
                <ScenarioSlider
                    label="Drainage Load"
                    value=ctx.drainage
                    describe=scenario::drainage_label
                />
                <label style="display: flex; align-items: center; gap: 8px; font-size: 0.82rem; color: #ccd2e3; margin-bottom: 14px; cursor: pointer;">
                    <input
                        type="checkbox"
                        prop:checked=move || ctx.night.get()
                        on:change=on_night
                    />
                    "Night Scenario"
                </label>
                <CitySelect />
                <label style="display: flex; align-items: center; gap: 8px; font-size: 0.82rem; color: #ccd2e3; margin-bottom: 10px; cursor: pointer;">
                    <input
                        type="checkbox"
                        prop:checked=move || ctx.auto_update.get()
                        on:change=on_auto_update
                    />
                    "Auto Update"
                    <span style="margin-left: auto; color: #8fa3c8; font-family: monospace; font-size: 0.75rem;">
                        {move || refresh::interval_label(ctx.auto_update.get())}
                    </span>
                </label>
                <button
                    on:click=on_refresh
                    disabled=move || refreshing.get()
                    style="width: 100%; padding: 7px 0; background: #2563eb; border: none; border-radius: 4px; color: white; font-size: 0.85rem; cursor: pointer;"
                >
                    {move || if refreshing.get() { "Refreshing..." } else { "Refresh Now" }}
                </button>
                <div style="display: flex; justify-content: space-between; align-items: center; margin-top: 8px; font-size: 0.72rem; color: #8fa3c8;">
                    <span>{move || format!("Current: {}", ctx.city.get())}</span>
                    <button
                        on:click=on_recenter
                        style="background: none; border: 1px solid #2c3a55; border-radius: 4px; color: #8fa3c8; font-size: 0.7rem; padding: 2px 8px; cursor: pointer;"
                    >
                        "Recenter"
                    </button>
                </div>
                <div style="margin-top: 6px; text-align: center; font-size: 0.72rem; color: #8fa3c8;">
                    {move || ctx.last_updated.get().unwrap_or_else(|| "Not updated yet".to_string())}
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn ZoomControls() -> impl IntoView {
    let button_style = "width: 34px; height: 34px; background: rgba(16, 22, 36, 0.94); border: 1px solid #2c3a55; border-radius: 4px; color: #e4e9f5; font-size: 1.1rem; cursor: pointer;";
    view! {
        <div style="position: absolute; bottom: 24px; right: 12px; z-index: 1000; display: flex; flex-direction: column; gap: 6px;">
            <button style=button_style on:click=move |_| map_view::zoom_in()>"+"</button>
            <button style=button_style on:click=move |_| map_view::zoom_out()>"\u{2212}"</button>
        </div>
    }
}

fn stat_row(label: &'static str, value: String, color: &'static str) -> impl IntoView {
    view! {
        <div style="display: flex; justify-content: space-between; font-size: 0.8rem; margin-bottom: 4px;">
            <span style="color: #ccd2e3;">{label}</span>
            <span style=format!("color: {color}; font-family: monospace;")>{value}</span>
        </div>
    }
}

/// Aggregate counts for the current payload. Recomputed wholesale on every
/// applied refresh.
#[component]
pub fn StatsPanel() -> impl IntoView {
    let CurrentPayload(payload) = expect_context();

    view! {
        <div style="position: absolute; top: 12px; right: 12px; z-index: 1000; width: 230px; background: rgba(16, 22, 36, 0.94); border: 1px solid #2c3a55; border-radius: 8px; color: #e4e9f5; padding: 12px 14px; box-shadow: 0 4px 18px rgba(0,0,0,0.45);">
            <div style="font-weight: bold; font-size: 0.95rem; margin-bottom: 8px;">"Risk Statistics"</div>
            {move || {
                let Some(current) = payload.get() else {
                    return view! {
                        <div style="font-size: 0.8rem; color: #8fa3c8;">"Waiting for data..."</div>
                    }
                    .into_any();
                };
                let stats = StatsView::from_statistics(&current.statistics);
                view! {
                    <div>
                        {stat_row("Total Areas", stats.total_areas.to_string(), "#e4e9f5")}
                        {stat_row(
                            "High Risk",
                            format!("{} ({})", stats.high_risk, stats.high_risk_percent),
                            "#ff5c5c",
                        )}
                        {stat_row(
                            "Medium Risk",
                            format!("{} ({})", stats.medium_risk, stats.medium_risk_percent),
                            "#ffb347",
                        )}
                        {stat_row(
                            "Low Risk",
                            format!("{} ({})", stats.low_risk, stats.low_risk_percent),
                            "#4ade80",
                        )}
                        {stat_row("Average Risk", stats.avg_risk_percent, "#8fa3c8")}
                    </div>
                }
                .into_any()
            }}
        </div>
    }
}

/// Compact summary of the last hovered area. Keeps showing the last area
/// after the pointer leaves its marker.
#[component]
pub fn HoverPanel() -> impl IntoView {
    let HoveredArea(hovered) = expect_context();

    view! {
        <div style="position: absolute; bottom: 24px; left: 12px; z-index: 1000; width: 240px; background: rgba(16, 22, 36, 0.94); border: 1px solid #2c3a55; border-radius: 8px; color: #e4e9f5; padding: 10px 14px; box-shadow: 0 4px 18px rgba(0,0,0,0.45);">
            {move || {
                let Some(area) = hovered.get() else {
                    return view! {
                        <div style="font-size: 0.8rem; color: #8fa3c8;">
                            "Hover over an area to see details"
                        </div>
                    }
                    .into_any();
                };
                let risk = &area.risk_assessment;
                let color = risk.risk_level.color();
                view! {
                    <div>
                        <div style=format!(
                            "font-weight: bold; font-size: 0.9rem; color: {color};",
                        )>{area.name.clone()}</div>
                        <div style="font-size: 0.8rem; color: #ccd2e3; margin-top: 2px;">
                            {detail::risk_badge_text(risk)}
                        </div>
                        <div style="font-size: 0.75rem; color: #8fa3c8; margin-top: 2px;">
                            {format!(
                                "Elevation: {}m \u{00b7} Floods: {}",
                                detail::fmt_opt_f64(area.elevation),
                                area.historical_floods.unwrap_or(0),
                            )}
                        </div>
                    </div>
                }
                .into_any()
            }}
        </div>
    }
}

fn detail_field(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div style="font-size: 0.8rem; margin-bottom: 3px;">
            <span style="color: #8fa3c8;">{label}": "</span>
            <span style="color: #e4e9f5;">{value}</span>
        </div>
    }
}

/// Full analysis of the clicked area: fields, component-breakdown bars, and
/// the zoom and emergency actions. Open until explicitly closed; values track
/// the area's current payload entry across refreshes.
#[component]
pub fn DetailPanel() -> impl IntoView {
    let SelectedArea(selected) = expect_context();
    let panel_ref: NodeRef<leptos::html::Div> = NodeRef::new();

    // Bring the panel into view whenever a new area is picked.
    Effect::new(move || {
        if selected.get().is_none() {
            return;
        }
        if let Some(el) = panel_ref.get() {
            el.scroll_into_view();
        }
    });

    let on_emergency = move |_| {
        let Some(area) = selected.get_untracked() else {
            return;
        };
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(&detail::emergency_info_text(&area.id));
        }
    };

    let on_zoom = move |_| {
        if let Some(area) = selected.get_untracked() {
            map_view::fly_to_area(area.center[0], area.center[1]);
        }
    };

    view! {
        <div
            node_ref=panel_ref
            style="position: absolute; top: 12px; right: 254px; z-index: 1000; width: 280px; max-height: calc(100% - 48px); overflow-y: auto; background: rgba(16, 22, 36, 0.96); border: 1px solid #2c3a55; border-radius: 8px; color: #e4e9f5; padding: 12px 14px; box-shadow: 0 4px 18px rgba(0,0,0,0.45);"
            style:display=move || if selected.get().is_some() { "block" } else { "none" }
        >
            {move || {
                let Some(area) = selected.get() else {
                    return ().into_any();
                };
                let risk = area.risk_assessment.clone();
                let color = risk.risk_level.color();
                let bars = detail::component_bars(&risk);
                view! {
                    <div>
                        <div style="display: flex; justify-content: space-between; align-items: center; margin-bottom: 8px;">
                            <span style="font-weight: bold; font-size: 0.95rem;">
                                {area.name.clone()}
                            </span>
                            <button
                                on:click=move |_| selected.set(None)
                                style="background: none; border: none; color: #8fa3c8; font-size: 1rem; cursor: pointer;"
                            >
                                "\u{2715}"
                            </button>
                        </div>
                        <div style=format!(
                            "display: inline-block; background: {color}; color: white; padding: 3px 10px; border-radius: 12px; font-size: 0.78rem; font-weight: bold; margin-bottom: 10px;",
                        )>{detail::risk_badge_text(&risk)}</div>
                        {detail_field("City", detail::fmt_opt_str(area.city.as_deref()))}
                        {detail_field("Region", detail::fmt_opt_str(area.region.as_deref()))}
                        {detail_field("Land Type", detail::fmt_opt_str(area.land_type.as_deref()))}
                        {detail_field(
                            "Elevation",
                            format!("{}m", detail::fmt_opt_f64(area.elevation)),
                        )}
                        {detail_field(
                            "Population Density",
                            format!(
                                "{}/km\u{b2}",
                                detail::format_density(area.population_density),
                            ),
                        )}
                        {detail_field(
                            "River Distance",
                            format!("{}km", detail::fmt_opt_f64(area.river_distance)),
                        )}
                        {detail_field(
                            "Coastal",
                            detail::yes_no(area.coastal.unwrap_or(false)).to_string(),
                        )}
                        {detail_field(
                            "Drainage Score",
                            format!("{}/1.0", detail::fmt_opt_f64(area.drainage_score)),
                        )}
                        {detail_field(
                            "Past Floods",
                            format!("{} incidents", area.historical_floods.unwrap_or(0)),
                        )}
                        <div
                            style="font-weight: bold; font-size: 0.85rem; margin: 10px 0 6px;"
                            style:display=if bars.is_empty() { "none" } else { "block" }
                        >
                            "Risk Components"
                        </div>
                        {bars
                            .into_iter()
                            .map(|bar| {
                                view! {
                                    <div style="margin-bottom: 6px;">
                                        <div style="display: flex; justify-content: space-between; font-size: 0.75rem; color: #ccd2e3;">
                                            <span>{bar.label}</span>
                                            <span>{bar.display}</span>
                                        </div>
                                        <div style="height: 6px; background: #1a2233; border-radius: 3px; overflow: hidden;">
                                            <div style=format!(
                                                "height: 100%; width: {:.1}%; background: {color};",
                                                bar.percent.clamp(0.0, 100.0),
                                            ) />
                                        </div>
                                    </div>
                                }
                            })
                            .collect_view()}
                        <div style="display: flex; gap: 8px; margin-top: 12px;">
                            <button
                                on:click=on_zoom
                                style="flex: 1; padding: 6px 0; background: #2563eb; border: none; border-radius: 4px; color: white; font-size: 0.8rem; cursor: pointer;"
                            >
                                "Zoom to Area"
                            </button>
                            <button
                                on:click=on_emergency
                                style="flex: 1; padding: 6px 0; background: #dc2626; border: none; border-radius: 4px; color: white; font-size: 0.8rem; cursor: pointer;"
                            >
                                "Emergency Info"
                            </button>
                        </div>
                    </div>
                }
                .into_any()
            }}
        </div>
    }
}

/// Dismissable banner for failed refreshes; auto-dismisses after five
/// seconds.
#[component]
pub fn NoticeBanner() -> impl IntoView {
    let ctx: RefreshContext = expect_context();

    view! {
        <div
            style="position: absolute; top: 12px; left: 50%; transform: translateX(-50%); z-index: 1100; max-width: 420px; background: #b91c1c; border-radius: 6px; color: white; padding: 10px 14px; display: flex; align-items: center; gap: 12px; box-shadow: 0 4px 18px rgba(0,0,0,0.45); font-size: 0.85rem;"
            style:display=move || if ctx.notice.get().is_some() { "flex" } else { "none" }
        >
            <span>
                {move || ctx.notice.get().map(|n| n.message).unwrap_or_default()}
            </span>
            <button
                on:click=move |_| ctx.notice.set(None)
                style="background: none; border: none; color: white; font-size: 1rem; cursor: pointer;"
            >
                "\u{2715}"
            </button>
        </div>
    }
}
