use std::cell::RefCell;

use leptos::prelude::*;
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use floodmap_shared::{Area, Hospital, MapPayload};

use crate::app::{CurrentPayload, HoveredArea, SelectedArea};
use crate::cities::{self, City};
use crate::detail;
use crate::layers::{self, MarkerStyle};
use crate::leaflet::{self, CircleMarker, HeatLayer, LeafletMap, Marker};

pub const MAP_CONTAINER_ID: &str = "map";

const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const TILE_ATTRIBUTION: &str = "\u{00a9} OpenStreetMap contributors";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MapOptions {
    center: [f64; 2],
    zoom: f64,
    zoom_control: bool,
    max_zoom: f64,
    min_zoom: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TileOptions {
    attribution: &'static str,
    max_zoom: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PopupOptions {
    max_width: f64,
    min_width: f64,
    class_name: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TooltipOptions {
    direction: &'static str,
    permanent: bool,
    class_name: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FlyOptions {
    duration: f64,
    ease_linearity: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DivIconOptions {
    html: String,
    icon_size: [f64; 2],
    class_name: &'static str,
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::UNDEFINED)
}

fn latlng_js(lat: f64, lng: f64) -> JsValue {
    to_js(&[lat, lng])
}

fn style_js(style: &MarkerStyle) -> JsValue {
    to_js(style)
}

/// Gradient stops as a plain `{ "0.3": "#ffff00", ... }` object, the shape
/// the heat plugin expects.
fn gradient_js() -> JsValue {
    let gradient = js_sys::Object::new();
    for &(stop, color) in layers::HEAT_GRADIENT {
        let _ = js_sys::Reflect::set(
            &gradient,
            &JsValue::from_str(&format!("{stop}")),
            &JsValue::from_str(color),
        );
    }
    gradient.into()
}

/// Signals the marker event closures feed. Copy so closures can capture it.
#[derive(Clone, Copy)]
pub struct MarkerSignals {
    pub hovered: RwSignal<Option<Area>>,
    pub selected: RwSignal<Option<Area>>,
}

/// One area marker plus the closures keeping its event handlers alive.
struct AreaMarkerBinding {
    marker: CircleMarker,
    area_id: String,
    base_style: MarkerStyle,
    _on_mouseover: Closure<dyn Fn()>,
    _on_mouseout: Closure<dyn Fn()>,
    _on_click: Closure<dyn Fn()>,
}

/// The live render generation. Exactly one exists at a time; a new payload
/// tears this down before installing its replacement.
#[derive(Default)]
struct RenderedLayers {
    heat: Option<HeatLayer>,
    areas: Vec<AreaMarkerBinding>,
    hospitals: Vec<Marker>,
}

impl RenderedLayers {
    fn clear(&mut self, map: &LeafletMap) {
        if let Some(heat) = self.heat.take() {
            map.remove_layer(&heat);
        }
        for binding in self.areas.drain(..) {
            map.remove_layer(&binding.marker);
        }
        for marker in self.hospitals.drain(..) {
            map.remove_layer(&marker);
        }
    }

    fn area_count(&self) -> usize {
        self.areas.len()
    }
}

struct MapBinding {
    map: LeafletMap,
    layers: RenderedLayers,
}

thread_local! {
    static MAP_BINDING: RefCell<Option<MapBinding>> = const { RefCell::new(None) };
}

/// Create the map over the given container, centered on the default city.
/// Replaces any previous map instance.
pub fn init_map(container_id: &str) -> bool {
    let Some(city) = cities::find_city(cities::DEFAULT_CITY) else {
        return false;
    };

    teardown_map();

    let map = leaflet::new_map(
        container_id,
        &to_js(&MapOptions {
            center: [city.lat, city.lng],
            zoom: city.zoom,
            zoom_control: false,
            max_zoom: 18.0,
            min_zoom: 3.0,
        }),
    );
    leaflet::tile_layer(
        TILE_URL,
        &to_js(&TileOptions {
            attribution: TILE_ATTRIBUTION,
            max_zoom: 19.0,
        }),
    )
    .add_to(&map);

    MAP_BINDING.with(|slot| {
        *slot.borrow_mut() = Some(MapBinding {
            map,
            layers: RenderedLayers::default(),
        });
    });
    true
}

/// Drop the map and every owned layer handle.
pub fn teardown_map() {
    MAP_BINDING.with(|slot| {
        if let Some(mut binding) = slot.borrow_mut().take() {
            binding.layers.clear(&binding.map);
            binding.map.remove();
        }
    });
}

fn build_area_marker(
    map: &LeafletMap,
    area: &Area,
    signals: MarkerSignals,
) -> AreaMarkerBinding {
    let base_style = layers::area_base_style(area);
    let marker = leaflet::circle_marker(
        &latlng_js(area.center[0], area.center[1]),
        &style_js(&base_style),
    );
    marker.bind_popup(
        &detail::area_popup_html(area),
        &to_js(&PopupOptions {
            max_width: 300.0,
            min_width: 250.0,
            class_name: "custom-popup",
        }),
    );

    let tooltip_html = detail::tooltip_html(area);
    let hover_style = layers::hovered_style(base_style);

    let on_mouseover = {
        let marker = marker.clone();
        let area = area.clone();
        Closure::<dyn Fn()>::new(move || {
            marker.set_style(&style_js(&hover_style));
            marker.bind_tooltip(
                &tooltip_html,
                &to_js(&TooltipOptions {
                    direction: "top",
                    permanent: false,
                    class_name: "area-tooltip",
                }),
            );
            marker.open_tooltip();
            signals.hovered.set(Some(area.clone()));
        })
    };
    // Hover-out reverts the marker but leaves the hover panel on the last
    // hovered area.
    let on_mouseout = {
        let marker = marker.clone();
        Closure::<dyn Fn()>::new(move || {
            marker.set_style(&style_js(&base_style));
            marker.unbind_tooltip();
        })
    };
    let on_click = {
        let area = area.clone();
        Closure::<dyn Fn()>::new(move || {
            signals.selected.set(Some(area.clone()));
        })
    };

    marker.on("mouseover", on_mouseover.as_ref().unchecked_ref());
    marker.on("mouseout", on_mouseout.as_ref().unchecked_ref());
    marker.on("click", on_click.as_ref().unchecked_ref());
    marker.add_to(map);

    AreaMarkerBinding {
        marker,
        area_id: area.id.clone(),
        base_style,
        _on_mouseover: on_mouseover,
        _on_mouseout: on_mouseout,
        _on_click: on_click,
    }
}

fn build_hospital_marker(map: &LeafletMap, hospital: &Hospital) -> Marker {
    let icon = leaflet::div_icon(&to_js(&DivIconOptions {
        html: "<div style=\"color: #0066ff; font-size: 24px; text-shadow: 0 0 3px white;\">\u{1f3e5}</div>"
            .to_string(),
        icon_size: [30.0, 30.0],
        class_name: "hospital-icon",
    }));
    let options = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&options, &JsValue::from_str("icon"), icon.as_ref());

    let marker = leaflet::marker(
        &latlng_js(hospital.location[0], hospital.location[1]),
        &options,
    );
    marker.bind_popup(&detail::hospital_popup_html(hospital));
    marker.add_to(map);
    marker
}

/// Swap in a new render generation for the payload: heat layer, area markers,
/// hospital markers. The previous generation is removed first; the selection
/// highlight is re-applied by id.
pub fn render_payload(payload: &MapPayload, signals: MarkerSignals, selected_id: Option<&str>) {
    MAP_BINDING.with(|slot| {
        let mut slot = slot.borrow_mut();
        let Some(binding) = slot.as_mut() else {
            return;
        };
        binding.layers.clear(&binding.map);

        let points = layers::heat_points(&payload.areas);
        let heat_options = to_js(&layers::heat_options());
        let _ = js_sys::Reflect::set(
            &heat_options,
            &JsValue::from_str("gradient"),
            &gradient_js(),
        );
        let heat = leaflet::heat_layer(&to_js(&points), &heat_options);
        heat.add_to(&binding.map);
        binding.layers.heat = Some(heat);

        for area in &payload.areas {
            let marker = build_area_marker(&binding.map, area, signals);
            if selected_id == Some(marker.area_id.as_str()) {
                marker
                    .marker
                    .set_style(&style_js(&layers::selected_style(marker.base_style)));
                marker.marker.bring_to_front();
            }
            binding.layers.areas.push(marker);
        }
        for hospital in &payload.hospitals {
            let marker = build_hospital_marker(&binding.map, hospital);
            binding.layers.hospitals.push(marker);
        }

        web_sys::console::info_1(
            &format!(
                "rendered {} areas and {} hospitals",
                binding.layers.area_count(),
                binding.layers.hospitals.len()
            )
            .into(),
        );
    });
}

/// Restyle every area marker so exactly the selected one is highlighted and
/// brought to the front.
pub fn apply_selection(selected_id: Option<&str>) {
    MAP_BINDING.with(|slot| {
        let slot = slot.borrow();
        let Some(binding) = slot.as_ref() else {
            return;
        };
        for marker in &binding.layers.areas {
            if selected_id == Some(marker.area_id.as_str()) {
                marker
                    .marker
                    .set_style(&style_js(&layers::selected_style(marker.base_style)));
                marker.marker.bring_to_front();
            } else {
                marker.marker.set_style(&style_js(&marker.base_style));
            }
        }
    });
}

fn with_map(f: impl FnOnce(&LeafletMap)) {
    MAP_BINDING.with(|slot| {
        if let Some(binding) = slot.borrow().as_ref() {
            f(&binding.map);
        }
    });
}

pub fn fly_to_city(city: &City) {
    with_map(|map| {
        map.fly_to(
            &latlng_js(city.lat, city.lng),
            city.zoom,
            &to_js(&FlyOptions {
                duration: cities::CITY_FLY_DURATION_SECS,
                ease_linearity: 0.25,
            }),
        );
    });
}

/// Recenter on a single area (detail view "Zoom to Area" action).
pub fn fly_to_area(lat: f64, lng: f64) {
    with_map(|map| {
        map.fly_to(
            &latlng_js(lat, lng),
            cities::AREA_ZOOM,
            &to_js(&FlyOptions {
                duration: cities::AREA_FLY_DURATION_SECS,
                ease_linearity: 0.25,
            }),
        );
    });
}

pub fn zoom_in() {
    with_map(|map| map.zoom_in());
}

pub fn zoom_out() {
    with_map(|map| map.zoom_out());
}

/// Map container plus the effects tying payload and selection signals to the
/// imperative layer swap.
#[component]
pub fn MapView() -> impl IntoView {
    let CurrentPayload(payload) = expect_context();
    let SelectedArea(selected) = expect_context();
    let HoveredArea(hovered) = expect_context();
    let map_ready: RwSignal<bool> = RwSignal::new(false);

    // Create the map once the container exists; tear it down with the view.
    Effect::new(move || {
        if map_ready.get_untracked() {
            return;
        }
        if init_map(MAP_CONTAINER_ID) {
            map_ready.set(true);
        }
        on_cleanup(teardown_map);
    });

    // Each applied payload replaces the whole layer generation. The selected
    // area is refreshed from the new payload by id so the detail panel tracks
    // current values; it is never cleared here.
    Effect::new(move || {
        if !map_ready.get() {
            return;
        }
        let Some(current) = payload.get() else {
            return;
        };
        let previous_selected = selected.get_untracked();
        if let Some(prev) = &previous_selected
            && let Some(updated) = current.areas.iter().find(|a| a.id == prev.id)
            && updated != prev
        {
            selected.set(Some(updated.clone()));
        }
        render_payload(
            &current,
            MarkerSignals { hovered, selected },
            previous_selected.as_ref().map(|a| a.id.as_str()),
        );
    });

    // Selection changes restyle markers in place (no layer rebuild).
    Effect::new(move || {
        let current = selected.get();
        if !map_ready.get_untracked() {
            return;
        }
        apply_selection(current.as_ref().map(|a| a.id.as_str()));
    });

    view! {
        <div
            id=MAP_CONTAINER_ID
            style="position: absolute; inset: 0; z-index: 0; background: #aad3df;"
        />
    }
}
