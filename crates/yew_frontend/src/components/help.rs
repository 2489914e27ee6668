use yew::prelude::*;

#[function_component(HelpPanel)]
pub fn help_panel() -> Html {
    html! {
        <details class="help-panel">
            <summary>{ "📲 如何把这个装到手机桌面上？" }</summary>
            <h4>{ "iPhone 用户：" }</h4>
            <ol>
                <li>{ "点击 Safari 底部中间的 " }<strong>{ "分享按钮" }</strong>{ " (⬆️)。" }</li>
                <li>{ "下滑找到 " }<strong>{ "“添加到主屏幕”" }</strong>{ "。" }</li>
                <li>{ "点击右上角 " }<strong>{ "“添加”" }</strong>{ "。" }</li>
            </ol>
            <h4>{ "Android 用户：" }</h4>
            <ol>
                <li>{ "点击浏览器右上角 " }<strong>{ "三个点" }</strong>{ "。" }</li>
                <li>{ "选择 " }<strong>{ "“添加到主屏幕”" }</strong>{ " 或 " }<strong>{ "“安装应用”" }</strong>{ "。" }</li>
            </ol>
        </details>
    }
}
