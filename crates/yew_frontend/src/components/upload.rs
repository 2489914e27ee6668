//! File upload component

use web_sys::{Event, File, HtmlInputElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct UploadControlProps {
    /// Allow-listed extensions, without the dot
    pub formats: Vec<String>,
    pub on_select: Callback<File>,
    #[prop_or_default]
    pub disabled: bool,
}

/// `accept` attribute for the file input, e.g. `.jpg,.png`
pub fn accept_attr(formats: &[String]) -> String {
    formats
        .iter()
        .map(|ext| format!(".{}", ext))
        .collect::<Vec<_>>()
        .join(",")
}

#[function_component(UploadControl)]
pub fn upload_control(props: &UploadControlProps) -> Html {
    let on_file_change = {
        let on_select = props.on_select.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                on_select.emit(file);
            }
        })
    };

    html! {
        <div class="upload-component">
            <label for="screenshot-input">{ "点击上传截图..." }</label>
            <input
                id="screenshot-input"
                type="file"
                accept={accept_attr(&props.formats)}
                disabled={props.disabled}
                onchange={on_file_change}
                data-testid="file-input"
            />
        </div>
    }
}
