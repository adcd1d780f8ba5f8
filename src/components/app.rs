use std::cell::RefCell;
use std::rc::Rc;

use yew::prelude::*;
use zoom_overlay::{setup_from_window, ZoomHandle};

use super::figure::{FigureData, FigureList};

const INITIAL_FIGURES: usize = 2;

#[function_component(App)]
pub fn app() -> Html {
    let figures = use_state(|| (1..=INITIAL_FIGURES).map(FigureData::numbered).collect::<Vec<_>>());
    let zoom: Rc<RefCell<Option<ZoomHandle>>> = use_mut_ref(|| None);

    {
        // Wire the overlay once the first render is in the document
        let zoom = zoom.clone();
        use_effect_with((), move |_| {
            match setup_from_window() {
                Ok(handle) => *zoom.borrow_mut() = Some(handle),
                Err(err) => log::error!("zoom overlay unavailable: {}", err),
            }
            move || {
                zoom.borrow_mut().take();
            }
        });
    }

    // New figures are picked up by the overlay's mutation observer.
    let add_figure = {
        let figures = figures.clone();
        Callback::from(move |_| {
            let mut next = (*figures).clone();
            next.push(FigureData::numbered(next.len() + 1));
            figures.set(next);
        })
    };

    html! {
        <main id="root" style="max-width:720px; margin:0 auto; padding:24px;">
            <header style="display:flex; align-items:center; justify-content:space-between; margin-bottom:16px;">
                <div>
                    <h1 style="margin:0; font-size:22px;">{"Zoom overlay"}</h1>
                    <p style="margin:4px 0 0 0; opacity:0.8;">{"Double-tap a photo to open it. Wheel or pinch to zoom, Esc or click outside to close."}</p>
                </div>
                <button onclick={add_figure}>{"Add figure"}</button>
            </header>
            <FigureList figures={(*figures).clone()} />
        </main>
    }
}
