use leptos::prelude::*;
use wasm_bindgen::JsCast;

use gloo_storage::Storage;

use floodmap_shared::{Area, MapPayload};

use crate::cities;
use crate::controls::{
    ControlPanel, DetailPanel, HoverPanel, NoticeBanner, StatsPanel, ZoomControls,
};
use crate::map_view::MapView;
use crate::refresh::{self, Notice, RefreshContext};

fn set_loading_shell_step(step: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    if let Some(step_el) = document.get_element_by_id("app-loading-step") {
        step_el.set_text_content(Some(step));
    }
}

fn remove_loading_shell() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    if let Some(shell) = document.get_element_by_id("app-loading-shell") {
        shell.remove();
    }
}

/// Last successfully applied payload; `None` until the first fetch lands.
#[derive(Clone, Copy)]
pub(crate) struct CurrentPayload(pub RwSignal<Option<MapPayload>>);

/// Area under the pointer (sticky: keeps the last hovered area).
#[derive(Clone, Copy)]
pub(crate) struct HoveredArea(pub RwSignal<Option<Area>>);

/// Area picked for the detail panel; cleared only by the close button.
#[derive(Clone, Copy)]
pub(crate) struct SelectedArea(pub RwSignal<Option<Area>>);

#[derive(Clone, Copy)]
pub(crate) struct PanelOpen(pub RwSignal<bool>);

/// Presentation settings only; scenario inputs are deliberately not
/// persisted.
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
struct Settings {
    panel_open: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self { panel_open: true }
    }
}

/// Root application component. Provides global reactive signals via context.
#[component]
pub fn App() -> impl IntoView {
    let saved: Settings = gloo_storage::LocalStorage::get("floodmap_settings").unwrap_or_default();

    let rainfall: RwSignal<f64> = RwSignal::new(1.0);
    let drainage: RwSignal<f64> = RwSignal::new(1.0);
    let night: RwSignal<bool> = RwSignal::new(false);
    let auto_update: RwSignal<bool> = RwSignal::new(true);
    let city: RwSignal<String> = RwSignal::new(cities::DEFAULT_CITY.to_string());
    let payload: RwSignal<Option<MapPayload>> = RwSignal::new(None);
    let last_updated: RwSignal<Option<String>> = RwSignal::new(None);
    let notice: RwSignal<Option<Notice>> = RwSignal::new(None);
    let hovered: RwSignal<Option<Area>> = RwSignal::new(None);
    let selected: RwSignal<Option<Area>> = RwSignal::new(None);
    let panel_open: RwSignal<bool> = RwSignal::new(saved.panel_open);
    let booted: RwSignal<bool> = RwSignal::new(false);
    let loading_shell_removed: RwSignal<bool> = RwSignal::new(false);

    let ctx = RefreshContext {
        rainfall,
        drainage,
        night,
        auto_update,
        city,
        payload,
        last_updated,
        notice,
    };

    provide_context(ctx);
    provide_context(CurrentPayload(payload));
    provide_context(HoveredArea(hovered));
    provide_context(SelectedArea(selected));
    provide_context(PanelOpen(panel_open));

    // Persist settings to localStorage on any change
    Effect::new(move || {
        let settings = Settings {
            panel_open: panel_open.get(),
        };
        let _ = gloo_storage::LocalStorage::set("floodmap_settings", &settings);
    });

    // Initial fetch, plus the repeating 15 s timer when auto-update starts
    // enabled. Starting always clears the previous interval, so toggling
    // never stacks timers.
    Effect::new(move || {
        if booted.get_untracked() {
            return;
        }
        booted.set(true);
        refresh::refresh_map(ctx);
        if auto_update.get_untracked() {
            refresh::start_auto_refresh(ctx);
        }
        on_cleanup(refresh::stop_auto_refresh);
    });

    // Keep shell step text tied to real startup milestones.
    Effect::new(move || {
        if payload.get().is_some() {
            set_loading_shell_step("Rendering map");
        } else {
            set_loading_shell_step("Connecting to API");
        }
    });

    // Remove static shell shortly after the first payload so the final step
    // is visible briefly.
    Effect::new(move || {
        if payload.get().is_none() || loading_shell_removed.get_untracked() {
            return;
        }
        loading_shell_removed.set(true);
        if let Some(window) = web_sys::window() {
            let cb = wasm_bindgen::closure::Closure::once(|| {
                remove_loading_shell();
            });
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                240,
            );
            cb.forget();
        } else {
            remove_loading_shell();
        }
    });

    view! {
        <div style="position: fixed; inset: 0; overflow: hidden; background: #0b0f18;">
            <MapView />
            <ControlPanel />
            <StatsPanel />
            <DetailPanel />
            <HoverPanel />
            <ZoomControls />
            <NoticeBanner />
        </div>
    }
}
