use gloo::events::EventListener;
use web_sys::KeyboardEvent;
use wasm_bindgen::JsCast;
use yew::prelude::*;

use super::{next_button::NextButton, progress_dots::ProgressDots, scratch_card::ScratchCard};
use crate::model::{Card, Deck, GreetingAction, GreetingState};
use crate::util::{clog, cwarn};

fn load_deck() -> Option<Deck> {
    match Deck::bundled() {
        Ok(deck) => Some(deck),
        Err(e) => {
            cwarn(&format!("deck unavailable: {e}"));
            None
        }
    }
}

fn card_face(card: &Card) -> Html {
    html! {
        <div style="display:flex; flex-direction:column; align-items:center; justify-content:space-between; gap:12px; padding:24px; background:#fff; width:100%; height:100%; box-sizing:border-box;">
            if let Some(src) = card.image.clone() {
                <img src={src} alt={card.title.clone()} style="width:240px; height:240px; object-fit:contain;" />
            }
            <div style="display:flex; flex-direction:column; gap:8px;">
                <h3 style="margin:0; font-size:20px; color:#b45670; text-align:center;">{ card.title.clone() }</h3>
                <p style="margin:0; font-size:14px; line-height:1.5; color:#d4899e; text-align:center;">{ card.message.clone() }</p>
            </div>
        </div>
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let deck = use_memo((), |_| load_deck());
    let state = use_reducer({
        let total = deck.as_ref().as_ref().map(|d| d.cards.len()).unwrap_or(0);
        move || GreetingState::new(total)
    });

    // Enter advances, but only once the current card is revealed.
    {
        let state = state.clone();
        use_effect_with((state.current, state.revealed), move |_| {
            let listener = web_sys::window().map(|win| {
                EventListener::new(&win, "keydown", move |e| {
                    let Some(key) = e.dyn_ref::<KeyboardEvent>() else {
                        return;
                    };
                    if key.key() == "Enter" && state.revealed {
                        state.dispatch(GreetingAction::Next);
                    }
                })
            });
            move || drop(listener)
        });
    }

    let on_reveal = {
        let state = state.clone();
        Callback::from(move |_| state.dispatch(GreetingAction::Revealed))
    };
    let on_next = {
        let state = state.clone();
        Callback::from(move |_| {
            clog("next card");
            state.dispatch(GreetingAction::Next)
        })
    };

    let content = match deck.as_ref() {
        None => html! { <p style="text-align:center;">{"Nothing to show."}</p> },
        Some(deck) if state.finished() => html! {
            <h2 style="margin:0; font-size:28px; color:#ff6b8a; text-align:center;">{ deck.closing.clone() }</h2>
        },
        Some(deck) => {
            let card = &deck.cards[state.current];
            let tuning = deck.scratch.clone();
            html! {
                <>
                    <ProgressDots total={state.total} current={state.current} />
                    <ScratchCard
                        key={state.current}
                        width={tuning.width}
                        height={tuning.height}
                        reveal_threshold={tuning.reveal_threshold}
                        tuning={tuning}
                        on_reveal={on_reveal}
                    >
                        { card_face(card) }
                    </ScratchCard>
                    <NextButton show={state.revealed} on_next={on_next} />
                </>
            }
        }
    };

    html! {
        <div style="display:flex; flex-direction:column; align-items:center; justify-content:center; gap:16px; min-height:100vh; padding:24px 16px; box-sizing:border-box; background:#fff5f7; font-family:'Poppins', sans-serif;">
            { content }
        </div>
    }
}
