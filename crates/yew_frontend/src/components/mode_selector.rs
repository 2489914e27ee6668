//! Horizontal radio group for the observation persona

use diagnosis_core::{Mode, ModeInfo};
use web_sys::Event;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ModeSelectorProps {
    pub modes: Vec<ModeInfo>,
    pub selected: Mode,
    pub on_change: Callback<Mode>,
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component(ModeSelector)]
pub fn mode_selector(props: &ModeSelectorProps) -> Html {
    html! {
        <fieldset class="mode-selector" disabled={props.disabled}>
            <legend>{ "请选择观测人格：" }</legend>
            <div class="mode-options">
                { for props.modes.iter().map(|info| {
                    let mode = info.mode;
                    html! {
                        <label class="mode-option" data-testid={format!("mode-{}", mode.keyword())}>
                            <input
                                type="radio"
                                name="mode"
                                value={mode.keyword()}
                                checked={mode == props.selected}
                                onchange={props.on_change.reform(move |_: Event| mode)}
                            />
                            { info.label.clone() }
                        </label>
                    }
                })}
            </div>
        </fieldset>
    }
}
