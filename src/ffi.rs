//! FFI bindings for Synheart Slumber
//!
//! This module provides C-compatible functions for calling Slumber from other languages.
//! All functions use C strings (null-terminated) and return allocated memory that
//! must be freed by the caller using `slumber_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::adapter::parse_form;
use crate::encoder::report_json;
use crate::error::ComputeError;
use crate::predictor::{predict, predict_json};

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Set the last error message
fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

/// Clear the last error message
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

/// Shared body of the JSON-in, JSON-out entry points
unsafe fn call_with_json(
    json: *const c_char,
    f: impl FnOnce(String) -> Result<String, ComputeError>,
) -> *mut c_char {
    clear_last_error();

    let json_str = match cstr_to_string(json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid JSON string pointer");
            return ptr::null_mut();
        }
    };

    match f(json_str) {
        Ok(output) => string_to_cstr(&output),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Prediction API
// ============================================================================

/// Predict sleep quality from a prediction input JSON object.
///
/// # Safety
/// - `json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `slumber_free_string`.
/// - Returns NULL on error; call `slumber_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn slumber_predict(json: *const c_char) -> *mut c_char {
    call_with_json(json, predict_json)
}

/// Predict sleep quality from a front-end form submission JSON object.
///
/// # Safety
/// - `json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `slumber_free_string`.
/// - Returns NULL on error; call `slumber_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn slumber_predict_form(json: *const c_char) -> *mut c_char {
    call_with_json(json, |raw| {
        let input = parse_form(&raw)?;
        Ok(serde_json::to_string(&predict(&input))?)
    })
}

/// Produce a full prediction report from a prediction input JSON object.
///
/// # Safety
/// - `json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `slumber_free_string`.
/// - Returns NULL on error; call `slumber_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn slumber_report(json: *const c_char) -> *mut c_char {
    call_with_json(json, report_json)
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free a string returned by Slumber functions.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by a Slumber function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn slumber_free_string(ptr: *mut c_char) {
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
/// - The returned pointer is valid until the next Slumber function call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn slumber_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

// ============================================================================
// Version Information
// ============================================================================

/// Get the Slumber library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn slumber_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    fn sample_input_json() -> CString {
        CString::new(
            r#"{
                "age": 30,
                "gender": "Male",
                "sleepDurationHours": 8,
                "physicalActivityMinutes": 30,
                "stressLevel": 3,
                "bmiCategory": "Normal",
                "heartRateBpm": 70,
                "dailySteps": 8000,
                "systolicBP": 115,
                "diastolicBP": 75
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_ffi_predict() {
        let json = sample_input_json();

        unsafe {
            let result = slumber_predict(json.as_ptr());
            assert!(!result.is_null());

            let result_str = CStr::from_ptr(result).to_str().unwrap();
            let value: serde_json::Value = serde_json::from_str(result_str).unwrap();
            assert_eq!(value["quality"], "Good");

            slumber_free_string(result);
        }
    }

    #[test]
    fn test_ffi_predict_form() {
        let json = CString::new(
            r#"{"age": 70, "gender": "female", "sleepDuration": 4,
                "physicalActivity": 0, "stressLevel": 9, "bmiCategory": "Obese"}"#,
        )
        .unwrap();

        unsafe {
            let result = slumber_predict_form(json.as_ptr());
            assert!(!result.is_null());

            let result_str = CStr::from_ptr(result).to_str().unwrap();
            assert!(result_str.contains("\"quality\":\"Poor\""));

            slumber_free_string(result);
        }
    }

    #[test]
    fn test_ffi_report() {
        let json = sample_input_json();

        unsafe {
            let result = slumber_report(json.as_ptr());
            assert!(!result.is_null());

            let result_str = CStr::from_ptr(result).to_str().unwrap();
            assert!(result_str.contains("report_version"));
            assert!(result_str.contains("breakdown"));

            slumber_free_string(result);
        }
    }

    #[test]
    fn test_ffi_error_handling() {
        unsafe {
            let invalid_json = CString::new("not json").unwrap();
            let result = slumber_predict(invalid_json.as_ptr());
            assert!(result.is_null());

            let error = slumber_last_error();
            assert!(!error.is_null());

            let error_str = CStr::from_ptr(error).to_str().unwrap();
            assert!(!error_str.is_empty());

            // A successful call clears the previous error
            let json = sample_input_json();
            let result = slumber_predict(json.as_ptr());
            assert!(!result.is_null());
            assert!(slumber_last_error().is_null());
            slumber_free_string(result);
        }
    }

    #[test]
    fn test_ffi_null_pointer() {
        unsafe {
            let result = slumber_predict(ptr::null());
            assert!(result.is_null());

            let error_str = CStr::from_ptr(slumber_last_error()).to_str().unwrap();
            assert_eq!(error_str, "Invalid JSON string pointer");
        }
    }

    #[test]
    fn test_ffi_version() {
        unsafe {
            let version = slumber_version();
            assert!(!version.is_null());

            let version_str = CStr::from_ptr(version).to_str().unwrap();
            assert!(!version_str.is_empty());
        }
    }
}
