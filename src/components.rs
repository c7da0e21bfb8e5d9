//! Yew components rendered into host-page containers.

use crate::config::Selectors;
use crate::dom;
use crate::error::EnhanceError;
use crate::hooks::use_active_card;
use crate::timeline::TimelineHandle;
use log::info;
use web_sys::{Document, Element};
use yew::prelude::*;
use yew::AppHandle;

#[derive(Properties, PartialEq)]
pub struct IndicatorStripProps {
    pub timeline: TimelineHandle,
}

/// One indicator button per card; the one nearest the scroll offset is active.
#[function_component(IndicatorStrip)]
pub fn indicator_strip(props: &IndicatorStripProps) -> Html {
    let active = use_active_card(&props.timeline);

    html! {
        <>
        { (0..props.timeline.card_count()).map(|index| {
            let is_active = index == *active;
            let onclick = {
                let timeline = props.timeline.clone();
                Callback::from(move |_: MouseEvent| timeline.scroll_to_card(index))
            };
            html! {
                <button
                    type="button"
                    class={classes!("indicator", is_active.then_some("active"))}
                    aria-label={format!("Go to card {}", index + 1)}
                    aria-current={is_active.then_some("true")}
                    {onclick}
                />
            }
        }).collect::<Html>() }
        </>
    }
}

/// Render the indicator strip into the page's indicator container.
pub fn mount_indicators(
    document: &Document,
    selectors: &Selectors,
    timeline: TimelineHandle,
) -> Result<AppHandle<IndicatorStrip>, EnhanceError> {
    let container: Element = dom::require(document, &selectors.indicators)?;
    if timeline.card_count() == 0 {
        return Err(EnhanceError::MissingElement(selectors.card.clone()));
    }
    info!("Rendering {} timeline indicators", timeline.card_count());
    Ok(yew::Renderer::<IndicatorStrip>::with_root_and_props(
        container,
        IndicatorStripProps { timeline },
    )
    .render())
}
