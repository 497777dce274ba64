use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ProgressDotsProps {
    pub total: usize,
    pub current: usize,
}

#[function_component]
pub fn ProgressDots(props: &ProgressDotsProps) -> Html {
    html! {
        <div style="display:flex; align-items:center; justify-content:center; gap:8px; padding:16px 0;">
            { for (0..props.total).map(|i| {
                let width = if i == props.current { 24 } else { 8 };
                let color = if i <= props.current { "#FF6B8A" } else { "#FFD6E0" };
                html! {
                    <div key={i} style={format!("width:{}px; height:8px; border-radius:999px; background:{}; transition:all 0.3s;", width, color)} />
                }
            }) }
        </div>
    }
}
