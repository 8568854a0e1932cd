//! FFI bindings for Vitalscore
//!
//! This module provides C-compatible functions for calling the risk-scoring
//! pipeline from other languages. All functions use C strings
//! (null-terminated) and return allocated memory that must be freed by the
//! caller using `vitalscore_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::path::Path;
use std::ptr;

use crate::diabetes::{score_diabetes_risk, FrozenDiabetesModel};
use crate::model::FrozenHeartModel;
use crate::pipeline::{score_heart_risk, score_heart_synthetic, RiskEngine};
use crate::schema::{DiabetesRiskInput, HeartRiskInput};

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

/// Helper to serialize an assessment, recording any error
fn assessment_to_cstr(assessment: &crate::types::RiskAssessment) -> *mut c_char {
    match serde_json::to_string(assessment) {
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

/// Score a heart submission against a frozen model artifact.
///
/// Parses the artifact on every call; hold an engine handle instead when
/// scoring repeatedly against the same model.
///
/// # Safety
/// - `model_json` and `input_json` must be valid null-terminated C strings.
/// - Returns a newly allocated assessment JSON string that must be freed with
///   `vitalscore_free_string`.
/// - Returns NULL on error; call `vitalscore_last_error` to get the message.
#[no_mangle]
pub unsafe extern "C" fn vitalscore_score_heart(
    model_json: *const c_char,
    input_json: *const c_char,
) -> *mut c_char {
    clear_last_error();

    let model_str = match cstr_to_string(model_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid model JSON pointer");
            return ptr::null_mut();
        }
    };

    let input_str = match cstr_to_string(input_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid input JSON pointer");
            return ptr::null_mut();
        }
    };

    let model = match FrozenHeartModel::from_json(&model_str) {
        Ok(m) => m,
        Err(e) => {
            set_last_error(&e.to_string());
            return ptr::null_mut();
        }
    };

    let input = match HeartRiskInput::from_json(&input_str) {
        Ok(i) => i,
        Err(e) => {
            set_last_error(&e.to_string());
            return ptr::null_mut();
        }
    };

    match score_heart_risk(&model, &input) {
        Ok(assessment) => assessment_to_cstr(&assessment),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Score a diabetes submission against a frozen model artifact.
///
/// # Safety
/// - `model_json` and `input_json` must be valid null-terminated C strings.
/// - Returns a newly allocated assessment JSON string that must be freed with
///   `vitalscore_free_string`.
/// - Returns NULL on error; call `vitalscore_last_error` to get the message.
#[no_mangle]
pub unsafe extern "C" fn vitalscore_score_diabetes(
    model_json: *const c_char,
    input_json: *const c_char,
) -> *mut c_char {
    clear_last_error();

    let model_str = match cstr_to_string(model_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid model JSON pointer");
            return ptr::null_mut();
        }
    };

    let input_str = match cstr_to_string(input_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid input JSON pointer");
            return ptr::null_mut();
        }
    };

    let model = match FrozenDiabetesModel::from_json(&model_str) {
        Ok(m) => m,
        Err(e) => {
            set_last_error(&e.to_string());
            return ptr::null_mut();
        }
    };

    let input = match DiabetesRiskInput::from_json(&input_str) {
        Ok(i) => i,
        Err(e) => {
            set_last_error(&e.to_string());
            return ptr::null_mut();
        }
    };

    match score_diabetes_risk(&model, &input) {
        Ok(assessment) => assessment_to_cstr(&assessment),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Score a heart submission with the throwaway synthetic model.
///
/// # Safety
/// - `input_json` must be a valid null-terminated C string.
/// - Returns a newly allocated assessment JSON string that must be freed with
///   `vitalscore_free_string`.
/// - Returns NULL on error; call `vitalscore_last_error` to get the message.
#[no_mangle]
pub unsafe extern "C" fn vitalscore_score_heart_synthetic(
    input_json: *const c_char,
) -> *mut c_char {
    clear_last_error();

    let input_str = match cstr_to_string(input_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid input JSON pointer");
            return ptr::null_mut();
        }
    };

    let input = match HeartRiskInput::from_json(&input_str) {
        Ok(i) => i,
        Err(e) => {
            set_last_error(&e.to_string());
            return ptr::null_mut();
        }
    };

    match score_heart_synthetic(&input) {
        Ok(assessment) => assessment_to_cstr(&assessment),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Stateful Engine API
// ============================================================================

/// Opaque handle to a RiskEngine
pub struct RiskEngineHandle {
    engine: RiskEngine,
}

/// Create a new RiskEngine from an artifact directory.
///
/// # Safety
/// - `artifact_dir` must be a valid null-terminated C string naming a
///   directory that contains the frozen model artifacts.
/// - Returns a pointer to a newly allocated RiskEngine.
/// - Must be freed with `vitalscore_engine_free`.
/// - Returns NULL on error; call `vitalscore_last_error` to get the message.
#[no_mangle]
pub unsafe extern "C" fn vitalscore_engine_new(
    artifact_dir: *const c_char,
) -> *mut RiskEngineHandle {
    clear_last_error();

    let dir = match cstr_to_string(artifact_dir) {
        Some(s) => s,
        None => {
            set_last_error("Invalid artifact directory pointer");
            return ptr::null_mut();
        }
    };

    match RiskEngine::from_artifact_dir(Path::new(&dir)) {
        Ok(engine) => Box::into_raw(Box::new(RiskEngineHandle { engine })),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Free a RiskEngine.
///
/// # Safety
/// - `engine` must be a valid pointer returned by `vitalscore_engine_new`.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn vitalscore_engine_free(engine: *mut RiskEngineHandle) {
    if !engine.is_null() {
        drop(Box::from_raw(engine));
    }
}

/// Score a heart submission and record it for the user.
///
/// # Safety
/// - `engine` must be a valid pointer returned by `vitalscore_engine_new`.
/// - `user_id` and `input_json` must be valid null-terminated C strings.
/// - Returns a newly allocated assessment JSON string that must be freed with
///   `vitalscore_free_string`.
/// - Returns NULL on error; call `vitalscore_last_error` to get the message.
#[no_mangle]
pub unsafe extern "C" fn vitalscore_engine_score_heart(
    engine: *mut RiskEngineHandle,
    user_id: *const c_char,
    input_json: *const c_char,
) -> *mut c_char {
    clear_last_error();

    if engine.is_null() {
        set_last_error("Null engine pointer");
        return ptr::null_mut();
    }

    let handle = &mut *engine;

    let user = match cstr_to_string(user_id) {
        Some(s) => s,
        None => {
            set_last_error("Invalid user_id pointer");
            return ptr::null_mut();
        }
    };

    let input_str = match cstr_to_string(input_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid input JSON pointer");
            return ptr::null_mut();
        }
    };

    let input = match HeartRiskInput::from_json(&input_str) {
        Ok(i) => i,
        Err(e) => {
            set_last_error(&e.to_string());
            return ptr::null_mut();
        }
    };

    match handle.engine.score_heart(&user, &input) {
        Ok(assessment) => assessment_to_cstr(&assessment),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Score a diabetes submission and record it for the user.
///
/// # Safety
/// - `engine` must be a valid pointer returned by `vitalscore_engine_new`.
/// - `user_id` and `input_json` must be valid null-terminated C strings.
/// - Returns a newly allocated assessment JSON string that must be freed with
///   `vitalscore_free_string`.
/// - Returns NULL on error; call `vitalscore_last_error` to get the message.
#[no_mangle]
pub unsafe extern "C" fn vitalscore_engine_score_diabetes(
    engine: *mut RiskEngineHandle,
    user_id: *const c_char,
    input_json: *const c_char,
) -> *mut c_char {
    clear_last_error();

    if engine.is_null() {
        set_last_error("Null engine pointer");
        return ptr::null_mut();
    }

    let handle = &mut *engine;

    let user = match cstr_to_string(user_id) {
        Some(s) => s,
        None => {
            set_last_error("Invalid user_id pointer");
            return ptr::null_mut();
        }
    };

    let input_str = match cstr_to_string(input_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid input JSON pointer");
            return ptr::null_mut();
        }
    };

    let input = match DiabetesRiskInput::from_json(&input_str) {
        Ok(i) => i,
        Err(e) => {
            set_last_error(&e.to_string());
            return ptr::null_mut();
        }
    };

    match handle.engine.score_diabetes(&user, &input) {
        Ok(assessment) => assessment_to_cstr(&assessment),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Render the user's latest health summary as JSON.
///
/// # Safety
/// - `engine` must be a valid pointer returned by `vitalscore_engine_new`.
/// - `user_id` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with
///   `vitalscore_free_string`.
/// - Returns NULL on error; call `vitalscore_last_error` to get the message.
#[no_mangle]
pub unsafe extern "C" fn vitalscore_engine_latest_summary(
    engine: *mut RiskEngineHandle,
    user_id: *const c_char,
) -> *mut c_char {
    clear_last_error();

    if engine.is_null() {
        set_last_error("Null engine pointer");
        return ptr::null_mut();
    }

    let handle = &*engine;

    let user = match cstr_to_string(user_id) {
        Some(s) => s,
        None => {
            set_last_error("Invalid user_id pointer");
            return ptr::null_mut();
        }
    };

    let summary = handle.engine.latest_summary(&user);
    match serde_json::to_string(&summary) {
        Ok(json) => string_to_cstr(&json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Save engine record state to JSON.
///
/// # Safety
/// - `engine` must be a valid pointer returned by `vitalscore_engine_new`.
/// - Returns a newly allocated string that must be freed with
///   `vitalscore_free_string`.
/// - Returns NULL on error; call `vitalscore_last_error` to get the message.
#[no_mangle]
pub unsafe extern "C" fn vitalscore_engine_save_records(
    engine: *mut RiskEngineHandle,
) -> *mut c_char {
    clear_last_error();

    if engine.is_null() {
        set_last_error("Null engine pointer");
        return ptr::null_mut();
    }

    let handle = &*engine;

    match handle.engine.save_records() {
        Ok(json) => string_to_cstr(&json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Load engine record state from JSON.
///
/// # Safety
/// - `engine` must be a valid pointer returned by `vitalscore_engine_new`.
/// - `json` must be a valid null-terminated C string.
/// - Returns 0 on success, non-zero on error.
/// - On error, call `vitalscore_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn vitalscore_engine_load_records(
    engine: *mut RiskEngineHandle,
    json: *const c_char,
) -> i32 {
    clear_last_error();

    if engine.is_null() {
        set_last_error("Null engine pointer");
        return -1;
    }

    let handle = &mut *engine;

    let json_str = match cstr_to_string(json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid JSON string pointer");
            return -1;
        }
    };

    match handle.engine.load_records(&json_str) {
        Ok(()) => 0,
        Err(e) => {
            set_last_error(&e.to_string());
            -1
        }
    }
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free a string returned by Vitalscore functions.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by a Vitalscore function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn vitalscore_free_string(ptr: *mut c_char) {
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
/// - The returned pointer is valid until the next Vitalscore call on this
///   thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn vitalscore_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

// ============================================================================
// Version Information
// ============================================================================

/// Get the Vitalscore library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn vitalscore_version() -> *const c_char {
    // Use a static CString to avoid allocation
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}
