//! WebAssembly bindings for WordGuard
//!
//! Exposes a `WordValidator` class to the page. The form-binding layer calls
//! `check` on every value change and every render; whoever fetches the list
//! resource hands the body to `loadLists`.

use wasm_bindgen::prelude::*;
use wg_core::{UpdateMode, Validator, ValidatorConfig};
use wg_loader::apply_json;

mod console;

#[wasm_bindgen]
pub struct WordValidator {
    inner: Validator,
}

#[wasm_bindgen]
impl WordValidator {
    /// Create a validator with empty lists. Everything is valid until the
    /// first successful `loadLists`.
    #[wasm_bindgen(constructor)]
    pub fn new(cache_capacity: Option<u32>) -> WordValidator {
        console::init();
        let config = ValidatorConfig {
            cache_capacity: cache_capacity.map(|c| c as usize),
            ..ValidatorConfig::default()
        };
        WordValidator {
            inner: Validator::with_config(config),
        }
    }

    /// Apply a list resource body. Returns `false` and keeps the current
    /// lists if the body cannot be parsed.
    #[wasm_bindgen(js_name = loadLists)]
    pub fn load_lists(&self, json: &str, merge: bool) -> bool {
        let mode = if merge { UpdateMode::Merge } else { UpdateMode::Replace };
        apply_json(&self.inner, json, mode).is_ok()
    }

    /// `true` when the text is acceptable.
    pub fn check(&self, text: Option<String>) -> bool {
        self.inner.check(text.as_deref())
    }

    /// `"clean"`, `"blacklisted"` or `"whitelisted"`.
    pub fn classify(&self, text: &str) -> String {
        self.inner.classify(text).as_str().to_string()
    }

    pub fn generation(&self) -> f64 {
        self.inner.store().generation() as f64
    }

    pub fn stats(&self) -> JsValue {
        let stats = self.inner.stats();
        let result = js_sys::Object::new();
        let _ = js_sys::Reflect::set(&result, &"checks".into(), &JsValue::from(stats.checks as f64));
        let _ = js_sys::Reflect::set(&result, &"shortCircuits".into(), &JsValue::from(stats.short_circuits as f64));
        let _ = js_sys::Reflect::set(&result, &"cacheHits".into(), &JsValue::from(stats.cache_hits as f64));
        let _ = js_sys::Reflect::set(&result, &"cacheMisses".into(), &JsValue::from(stats.cache_misses as f64));
        result.into()
    }
}
