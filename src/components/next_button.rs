use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct NextButtonProps {
    pub show: bool,
    pub on_next: Callback<()>,
}

#[function_component]
pub fn NextButton(props: &NextButtonProps) -> Html {
    if !props.show {
        return html! {};
    }
    let next_cb = props.on_next.clone();
    let next_btn = Callback::from(move |_| next_cb.emit(()));
    html! {
        <button onclick={next_btn} style="margin-top:8px; padding:12px 32px; background:#ff6b8a; color:#fff; font-weight:600; border:none; border-radius:999px; box-shadow:0 6px 14px rgba(255,107,138,0.4);">
            {"Next \u{2665}"}
        </button>
    }
}
