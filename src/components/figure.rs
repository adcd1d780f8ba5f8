use yew::prelude::*;

#[derive(Clone, PartialEq)]
pub struct FigureData {
    pub id: usize,
    pub src: AttrValue,
    pub alt: AttrValue,
    pub caption: AttrValue,
}

impl FigureData {
    pub fn numbered(id: usize) -> Self {
        Self {
            id,
            src: format!("https://picsum.photos/seed/zoom-{id}/1600/1067").into(),
            alt: format!("Sample photograph {id}").into(),
            caption: format!("Figure {id}").into(),
        }
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct FigureProps {
    pub figure: FigureData,
}

// One zoomable figure; the overlay binds to it through the container class.
#[function_component]
pub fn Figure(props: &FigureProps) -> Html {
    let f = &props.figure;
    html! {<figure class="zoomable" style="margin:0 0 24px 0;">
        <img src={f.src.clone()} alt={f.alt.clone()} loading="lazy" style="max-width:100%; border-radius:6px;" />
        <figcaption style="font-size:12px; color:#8b949e; margin-top:4px;">{f.caption.clone()}</figcaption>
    </figure>}
}

#[derive(Properties, PartialEq, Clone)]
pub struct FigureListProps {
    pub figures: Vec<FigureData>,
}

#[function_component]
pub fn FigureList(props: &FigureListProps) -> Html {
    html! {<section id="figures">
        { for props.figures.iter().map(|f| html!{ <Figure key={f.id} figure={f.clone()} /> }) }
    </section>}
}
