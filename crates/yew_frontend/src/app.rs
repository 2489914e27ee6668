//! Main application component

use crate::api;
use crate::components::{HelpPanel, ModeSelector, ReportView, UploadControl};
use diagnosis_core::{Mode, ModeInfo, ShellState, StatusResponse, ALLOWED_EXTENSIONS};
use wasm_bindgen_futures::spawn_local;
use web_sys::{File, Url};
use yew::prelude::*;

pub const LOGO_URL: &str =
    "https://raw.githubusercontent.com/Felix-bangbang/Take-off-the-mask-AI-Agent/main/logo.png";

/// The selected file and its object URL for the preview
#[derive(Clone)]
struct Upload {
    file: File,
    preview_url: String,
}

#[function_component(App)]
pub fn app() -> Html {
    let status = use_state(|| None::<StatusResponse>);
    let mode = use_state(Mode::default);
    let upload = use_state(|| None::<Upload>);
    let shell = use_state(ShellState::default);

    {
        let status = status.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match api::fetch_status().await {
                    Ok(response) => status.set(Some(response)),
                    Err(e) => {
                        gloo::console::error!(format!("status request failed: {}", e));
                        status.set(Some(StatusResponse::unavailable(e)));
                    }
                }
            });
            || ()
        });
    }

    let analysis_enabled = (*status).as_ref().is_some_and(|s| s.analysis_enabled);
    let notice = (*status).as_ref().and_then(|s| s.notice.clone());
    let modes: Vec<ModeInfo> = (*status)
        .as_ref()
        .map(|s| s.modes.clone())
        .unwrap_or_else(|| Mode::ALL.into_iter().map(ModeInfo::from).collect());
    let formats: Vec<String> = (*status)
        .as_ref()
        .map(|s| s.formats.clone())
        .unwrap_or_else(|| ALLOWED_EXTENSIONS.iter().map(|e| e.to_string()).collect());

    let on_mode = {
        let mode = mode.clone();
        Callback::from(move |selected: Mode| mode.set(selected))
    };

    let on_select = {
        let upload = upload.clone();
        let shell = shell.clone();
        Callback::from(move |file: File| {
            if let Some(previous) = (*upload).as_ref() {
                let _ = Url::revoke_object_url(&previous.preview_url);
            }
            let preview_url = Url::create_object_url_with_blob(&file).unwrap_or_default();
            upload.set(Some(Upload { file, preview_url }));
            shell.set(ShellState::AwaitingInput);
        })
    };

    let on_analyze = {
        let upload = upload.clone();
        let mode = mode.clone();
        let shell = shell.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(current) = (*upload).clone() else {
                return;
            };
            if shell.is_busy() {
                return;
            }
            if !analysis_enabled {
                shell.set(ShellState::configuration_error());
                return;
            }

            shell.set(ShellState::AwaitingResponse);
            let shell = shell.clone();
            let mode = *mode;
            spawn_local(async move {
                shell.set(api::submit(&current.file, mode).await);
            });
        })
    };

    let busy = shell.is_busy();

    html! {
        <div class="app">
            <header class="app-header">
                <img class="logo" src={LOGO_URL} width="50" alt="logo" />
                <h1>{ "见心AI" }</h1>
            </header>
            <p class="caption">{ "上传朋友圈/小红书/抖音截图，AI 帮你一眼看穿本质。" }</p>

            if let Some(notice) = notice {
                <div class="banner error" data-testid="config-error">{ notice }</div>
            }

            <main class="app-main">
                <ModeSelector
                    modes={modes}
                    selected={*mode}
                    on_change={on_mode}
                    disabled={busy}
                />
                <UploadControl formats={formats} on_select={on_select} disabled={busy} />

                if let Some(current) = (*upload).as_ref() {
                    <figure class="preview">
                        <img src={current.preview_url.clone()} alt="screenshot" data-testid="preview" />
                        <figcaption>{ "已上传" }</figcaption>
                    </figure>
                    <button
                        class="primary"
                        onclick={on_analyze}
                        disabled={busy || !analysis_enabled}
                        data-testid="analyze-button"
                    >
                        { "开始分析 ⚡️" }
                    </button>
                }

                <ReportView state={(*shell).clone()} />
            </main>

            <footer class="app-footer">
                <HelpPanel />
            </footer>
        </div>
    }
}
