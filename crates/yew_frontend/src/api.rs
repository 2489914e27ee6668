//! Calls to the 见心AI server

use diagnosis_core::{InvocationError, Mode, ShellState, StatusResponse};
use gloo_net::http::Request;
use web_sys::{File, FormData};

/// Ask the server whether analysis is available
pub async fn fetch_status() -> Result<StatusResponse, gloo_net::Error> {
    Request::get("/api/status").send().await?.json().await
}

/// Upload one screenshot and return the shell state to display
///
/// Never fails: transport problems become a `ShowingError` like any
/// other failed invocation.
pub async fn submit(file: &File, mode: Mode) -> ShellState {
    match try_submit(file, mode).await {
        Ok(state) => state,
        Err(e) => {
            gloo::console::error!(format!("diagnose request failed: {}", e));
            ShellState::from_outcome(Err(InvocationError::new(e)))
        }
    }
}

async fn try_submit(file: &File, mode: Mode) -> Result<ShellState, String> {
    let form = FormData::new().map_err(|e| format!("{:?}", e))?;
    form.append_with_str("mode", mode.keyword())
        .map_err(|e| format!("{:?}", e))?;
    form.append_with_blob_and_filename("image", file, &file.name())
        .map_err(|e| format!("{:?}", e))?;

    let response = Request::post("/api/diagnose")
        .body(form)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;

    let status = response.status();
    response
        .json::<ShellState>()
        .await
        .map_err(|e| format!("HTTP {}: {}", status, e))
}
