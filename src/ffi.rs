//! FFI bindings for fitcoach
//!
//! C-compatible functions for calling the engine from mobile host apps.
//! All functions use null-terminated C strings and return allocated memory that
//! must be freed by the caller using `fitcoach_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::config::EngineConfig;
use crate::metabolic::estimate_bmr;
use crate::pipeline::{assess_json, CoachingEngine};
use crate::types::Sex;

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Helper to convert C string to Rust string
unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Helper to convert Rust string to C string (caller must free)
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

fn result_to_cstr<E: std::fmt::Display>(result: Result<String, E>) -> *mut c_char {
    match result {
        Ok(json) => string_to_cstr(&json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Stateless API
// ============================================================================

/// Assess a snapshot JSON document with the default thresholds.
///
/// # Safety
/// - `json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `fitcoach_free_string`.
/// - Returns NULL on error; call `fitcoach_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn fitcoach_assess_json(json: *const c_char) -> *mut c_char {
    clear_last_error();

    let json_str = match cstr_to_string(json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid JSON string pointer");
            return ptr::null_mut();
        }
    };

    result_to_cstr(assess_json(&json_str))
}

/// Default engine configuration as pretty-printed JSON.
///
/// # Safety
/// - Returns a newly allocated string that must be freed with `fitcoach_free_string`.
#[no_mangle]
pub unsafe extern "C" fn fitcoach_default_config_json() -> *mut c_char {
    clear_last_error();
    result_to_cstr(EngineConfig::default().to_json())
}

/// Mifflin-St Jeor BMR.
///
/// `sex` is `"male"` or `"female"`.
///
/// # Safety
/// - `sex` must be a valid null-terminated C string.
/// - Returns NaN on error; call `fitcoach_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn fitcoach_estimate_bmr(
    weight_kg: f64,
    height_cm: f64,
    age_years: u32,
    sex: *const c_char,
) -> f64 {
    clear_last_error();

    let sex_str = match cstr_to_string(sex) {
        Some(s) => s,
        None => {
            set_last_error("Invalid sex string pointer");
            return f64::NAN;
        }
    };

    match sex_str.parse::<Sex>() {
        Ok(sex) => estimate_bmr(weight_kg, height_cm, age_years, sex),
        Err(e) => {
            set_last_error(&e.to_string());
            f64::NAN
        }
    }
}

// ============================================================================
// Engine API
// ============================================================================

/// Opaque handle to a configured engine
pub struct CoachingEngineHandle {
    engine: CoachingEngine,
}

/// Create an engine.
///
/// # Safety
/// - `config_json` may be NULL for the default thresholds, otherwise it must be a
///   valid null-terminated C string holding an engine configuration.
/// - Returns a pointer that must be freed with `fitcoach_engine_free`.
/// - Returns NULL on error; call `fitcoach_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn fitcoach_engine_new(config_json: *const c_char) -> *mut CoachingEngineHandle {
    clear_last_error();

    let engine = if config_json.is_null() {
        CoachingEngine::new()
    } else {
        let json_str = match cstr_to_string(config_json) {
            Some(s) => s,
            None => {
                set_last_error("Invalid config string pointer");
                return ptr::null_mut();
            }
        };
        match CoachingEngine::from_config_json(&json_str) {
            Ok(engine) => engine,
            Err(e) => {
                set_last_error(&e.to_string());
                return ptr::null_mut();
            }
        }
    };

    Box::into_raw(Box::new(CoachingEngineHandle { engine }))
}

/// Free an engine.
///
/// # Safety
/// - `engine` must be a valid pointer returned by `fitcoach_engine_new`, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn fitcoach_engine_free(engine: *mut CoachingEngineHandle) {
    if !engine.is_null() {
        drop(Box::from_raw(engine));
    }
}

/// Assess a snapshot JSON document with a configured engine.
///
/// # Safety
/// - `engine` must be a valid pointer returned by `fitcoach_engine_new`.
/// - `json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `fitcoach_free_string`.
/// - Returns NULL on error; call `fitcoach_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn fitcoach_engine_assess_json(
    engine: *const CoachingEngineHandle,
    json: *const c_char,
) -> *mut c_char {
    clear_last_error();

    if engine.is_null() {
        set_last_error("Null engine pointer");
        return ptr::null_mut();
    }
    let handle = &*engine;

    let json_str = match cstr_to_string(json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid JSON string pointer");
            return ptr::null_mut();
        }
    };

    result_to_cstr(handle.engine.assess_json(&json_str))
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free a string returned by fitcoach functions.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by a fitcoach function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn fitcoach_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Get the last error message.
///
/// # Safety
/// - Returns a pointer to a thread-local error string.
/// - The returned pointer is valid until the next fitcoach call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn fitcoach_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

// ============================================================================
// Version Information
// ============================================================================

/// Get the library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn fitcoach_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}
