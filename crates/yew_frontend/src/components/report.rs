//! Result area: spinner, rendered report, or error banner

use crate::markdown;
use diagnosis_core::ShellState;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ReportViewProps {
    pub state: ShellState,
}

#[function_component(ReportView)]
pub fn report_view(props: &ReportViewProps) -> Html {
    match &props.state {
        ShellState::AwaitingInput => html! {},
        ShellState::AwaitingResponse => html! {
            <div class="spinner" data-testid="spinner">{ "AI 正在连接神经网络..." }</div>
        },
        ShellState::ShowingResult { markdown, notice } => html! {
            <>
                <hr />
                <article class="report" data-testid="report">
                    { Html::from_html_unchecked(AttrValue::from(markdown::render(markdown))) }
                </article>
                <div class="banner success" data-testid="success">{ notice.clone() }</div>
            </>
        },
        ShellState::ShowingError { message } => html! {
            <div class="banner error" data-testid="error">{ message.clone() }</div>
        },
    }
}
