use std::cell::{Cell, RefCell};

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use floodmap_shared::MapPayload;

use crate::api;
use crate::scenario::Scenario;
use crate::time_format;

pub const AUTO_REFRESH_INTERVAL_MS: i32 = 15_000;
pub const ERROR_BANNER_DISMISS_MS: u32 = 5_000;

/// Signals the fetch-and-render cycle reads and writes. Passed by value;
/// every field is a `Copy` signal handle.
#[derive(Clone, Copy)]
pub struct RefreshContext {
    pub rainfall: RwSignal<f64>,
    pub drainage: RwSignal<f64>,
    pub night: RwSignal<bool>,
    pub auto_update: RwSignal<bool>,
    pub city: RwSignal<String>,
    pub payload: RwSignal<Option<MapPayload>>,
    pub last_updated: RwSignal<Option<String>>,
    pub notice: RwSignal<Option<Notice>>,
}

/// Transient banner content. The nonce ties each auto-dismiss timer to the
/// notice that scheduled it, so a newer notice is not dismissed early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub nonce: u64,
}

thread_local! {
    static LATEST_ISSUED_SEQ: Cell<u64> = const { Cell::new(0) };
    static NOTICE_NONCE: Cell<u64> = const { Cell::new(0) };
}

/// Issue a new request sequence number. Monotonic per thread; the UI runs on
/// one thread, so this totally orders all refreshes.
fn next_request_seq() -> u64 {
    LATEST_ISSUED_SEQ.with(|seq| {
        let next = seq.get() + 1;
        seq.set(next);
        next
    })
}

/// A completion may only be applied if no newer request has been issued
/// since. "Latest issued wins" — a slow early response never rolls the view
/// back over a fast later one.
fn is_latest_issued(seq: u64) -> bool {
    LATEST_ISSUED_SEQ.with(|latest| latest.get() == seq)
}

fn next_notice_nonce() -> u64 {
    NOTICE_NONCE.with(|nonce| {
        let next = nonce.get() + 1;
        nonce.set(next);
        next
    })
}

/// Show the banner and schedule its auto-dismiss. A newer banner invalidates
/// the older dismiss timer via the nonce.
pub fn show_notice(notice: RwSignal<Option<Notice>>, message: String) {
    let nonce = next_notice_nonce();
    notice.set(Some(Notice { message, nonce }));
    spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(ERROR_BANNER_DISMISS_MS).await;
        notice.update(|current| {
            if current.as_ref().is_some_and(|n| n.nonce == nonce) {
                *current = None;
            }
        });
    });
}

/// One fetch-and-render cycle for the current scenario and city.
///
/// On success the payload signal is replaced wholesale (the map view reacts by
/// swapping its layer generation). On failure the existing render state is
/// left untouched and the banner names the failing city. Stale completions
/// are discarded.
pub fn refresh_map(ctx: RefreshContext) {
    let scenario = Scenario {
        rainfall: ctx.rainfall.get_untracked(),
        drainage: ctx.drainage.get_untracked(),
        is_night: ctx.night.get_untracked(),
    };
    let city = ctx.city.get_untracked();
    let seq = next_request_seq();

    spawn_local(async move {
        let result = api::fetch_map_data(scenario, &city).await;

        if !is_latest_issued(seq) {
            web_sys::console::info_1(
                &format!("discarding stale map response for {city} (seq {seq})").into(),
            );
            return;
        }

        match result {
            Ok(payload) => {
                ctx.payload.set(Some(payload));
                ctx.last_updated.set(Some(time_format::current_clock_label()));
            }
            Err(e) => {
                web_sys::console::warn_1(&format!("map data fetch failed for {city}: {e}").into());
                show_notice(ctx.notice, format!("Failed to load {city} data: {e}"));
            }
        }
    });
}

struct AutoRefreshBinding {
    window: web_sys::Window,
    interval_id: i32,
    _callback: Closure<dyn Fn()>,
}

thread_local! {
    static AUTO_REFRESH_BINDING: RefCell<Option<AutoRefreshBinding>> = const { RefCell::new(None) };
}

/// Enter the Running state: one repeating 15 s timer. Any existing timer is
/// cancelled first, so there is never more than one.
pub fn start_auto_refresh(ctx: RefreshContext) {
    stop_auto_refresh();

    let Some(window) = web_sys::window() else {
        return;
    };
    let cb = Closure::<dyn Fn()>::new(move || {
        if ctx.auto_update.get_untracked() {
            refresh_map(ctx);
        }
    });
    let Ok(interval_id) = window.set_interval_with_callback_and_timeout_and_arguments_0(
        cb.as_ref().unchecked_ref(),
        AUTO_REFRESH_INTERVAL_MS,
    ) else {
        return;
    };
    AUTO_REFRESH_BINDING.with(|slot| {
        *slot.borrow_mut() = Some(AutoRefreshBinding {
            window: window.clone(),
            interval_id,
            _callback: cb,
        });
    });
}

/// Enter the Stopped state: cancel and drop the timer if one is running.
pub fn stop_auto_refresh() {
    AUTO_REFRESH_BINDING.with(|slot| {
        if let Some(old) = slot.borrow_mut().take() {
            old.window.clear_interval_with_handle(old.interval_id);
        }
    });
}

/// Panel label for the refresh interval indicator.
pub fn interval_label(auto_update: bool) -> &'static str {
    if auto_update { "15s" } else { "Off" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completions_apply_only_for_the_latest_issued_request() {
        let first = next_request_seq();
        let second = next_request_seq();
        assert!(!is_latest_issued(first));
        assert!(is_latest_issued(second));

        let third = next_request_seq();
        assert!(!is_latest_issued(second));
        assert!(is_latest_issued(third));
    }

    #[test]
    fn notice_nonces_are_monotonic() {
        let a = next_notice_nonce();
        let b = next_notice_nonce();
        assert!(b > a);
    }

    #[test]
    fn interval_label_reflects_auto_update_state() {
        assert_eq!(interval_label(true), "15s");
        assert_eq!(interval_label(false), "Off");
    }
}
