//! Typed bindings for the slice of the Leaflet capability (global `L`,
//! plus the leaflet.heat plugin) this client consumes. Tile loading,
//! pan/zoom, and layer primitives stay on the library's side of the line.

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    pub type LeafletMap;

    #[wasm_bindgen(js_namespace = L, js_name = map)]
    pub fn new_map(container_id: &str, options: &JsValue) -> LeafletMap;

    #[wasm_bindgen(method, js_name = flyTo)]
    pub fn fly_to(this: &LeafletMap, center: &JsValue, zoom: f64, options: &JsValue);

    #[wasm_bindgen(method, js_name = zoomIn)]
    pub fn zoom_in(this: &LeafletMap);

    #[wasm_bindgen(method, js_name = zoomOut)]
    pub fn zoom_out(this: &LeafletMap);

    #[wasm_bindgen(method, js_name = removeLayer)]
    pub fn remove_layer(this: &LeafletMap, layer: &JsValue);

    #[wasm_bindgen(method)]
    pub fn remove(this: &LeafletMap);

    pub type TileLayer;

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    pub fn tile_layer(url_template: &str, options: &JsValue) -> TileLayer;

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_to(this: &TileLayer, map: &LeafletMap);

    pub type HeatLayer;

    #[wasm_bindgen(js_namespace = L, js_name = heatLayer)]
    pub fn heat_layer(points: &JsValue, options: &JsValue) -> HeatLayer;

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_to(this: &HeatLayer, map: &LeafletMap);

    #[derive(Clone)]
    pub type CircleMarker;

    #[wasm_bindgen(js_namespace = L, js_name = circleMarker)]
    pub fn circle_marker(latlng: &JsValue, options: &JsValue) -> CircleMarker;

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_to(this: &CircleMarker, map: &LeafletMap);

    #[wasm_bindgen(method, js_name = setStyle)]
    pub fn set_style(this: &CircleMarker, style: &JsValue);

    #[wasm_bindgen(method, js_name = bindPopup)]
    pub fn bind_popup(this: &CircleMarker, content: &str, options: &JsValue);

    #[wasm_bindgen(method, js_name = bindTooltip)]
    pub fn bind_tooltip(this: &CircleMarker, content: &str, options: &JsValue);

    #[wasm_bindgen(method, js_name = unbindTooltip)]
    pub fn unbind_tooltip(this: &CircleMarker);

    #[wasm_bindgen(method, js_name = openTooltip)]
    pub fn open_tooltip(this: &CircleMarker);

    #[wasm_bindgen(method, js_name = bringToFront)]
    pub fn bring_to_front(this: &CircleMarker);

    #[wasm_bindgen(method)]
    pub fn on(this: &CircleMarker, event: &str, handler: &js_sys::Function);

    pub type Marker;

    #[wasm_bindgen(js_namespace = L, js_name = marker)]
    pub fn marker(latlng: &JsValue, options: &JsValue) -> Marker;

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_to(this: &Marker, map: &LeafletMap);

    #[wasm_bindgen(method, js_name = bindPopup)]
    pub fn bind_popup(this: &Marker, content: &str);

    pub type DivIcon;

    #[wasm_bindgen(js_namespace = L, js_name = divIcon)]
    pub fn div_icon(options: &JsValue) -> DivIcon;
}
